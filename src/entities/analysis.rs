use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{variant, Category, IdScheme, Record};
use crate::locale::{self, Locale};
use crate::slug::{slugify, unique_slug};

/// A laboratory test from the price list. Prices are whole tenge.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "analyses")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default, with = "locale::variant")]
    pub name_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    pub name_en: Option<String>,
    #[serde(default)]
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub description_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub deadline: String,
    #[serde(default, with = "locale::variant")]
    pub deadline_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    pub deadline_en: Option<String>,
    #[serde(default)]
    pub biomaterial: String,
    #[serde(default, with = "locale::variant")]
    pub biomaterial_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    pub biomaterial_en: Option<String>,
    #[serde(default)]
    #[sea_orm(column_type = "Text")]
    pub preparation: String,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub preparation_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub preparation_en: Option<String>,
    pub category_id: String,
    pub price: u32,
    #[serde(default)]
    pub collection_price: u32,
}

pub type Analysis = Model;

// No foreign key: a dangling category id is allowed and shown as-is.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Deserialize, Validate, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub name_kz: Option<String>,
    pub name_en: Option<String>,
    #[serde(default)]
    pub description: String,
    pub description_kz: Option<String>,
    pub description_en: Option<String>,
    #[serde(default)]
    pub deadline: String,
    pub deadline_kz: Option<String>,
    pub deadline_en: Option<String>,
    #[serde(default)]
    pub biomaterial: String,
    pub biomaterial_kz: Option<String>,
    pub biomaterial_en: Option<String>,
    #[serde(default)]
    pub preparation: String,
    pub preparation_kz: Option<String>,
    pub preparation_en: Option<String>,
    #[validate(length(min = 1, message = "category is required"))]
    pub category_id: String,
    pub price: u32,
    #[serde(default)]
    pub collection_price: u32,
}

impl AnalysisDraft {
    pub fn new(name: impl Into<String>, category_id: impl Into<String>, price: u32) -> Self {
        AnalysisDraft {
            name: name.into(),
            name_kz: None,
            name_en: None,
            description: String::new(),
            description_kz: None,
            description_en: None,
            deadline: String::new(),
            deadline_kz: None,
            deadline_en: None,
            biomaterial: String::new(),
            biomaterial_kz: None,
            biomaterial_en: None,
            preparation: String::new(),
            preparation_kz: None,
            preparation_en: None,
            category_id: category_id.into(),
            price,
            collection_price: 0,
        }
    }
}

#[derive(Deserialize, Validate, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPatch {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub name_kz: Option<String>,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub description_kz: Option<String>,
    pub description_en: Option<String>,
    pub deadline: Option<String>,
    pub deadline_kz: Option<String>,
    pub deadline_en: Option<String>,
    pub biomaterial: Option<String>,
    pub biomaterial_kz: Option<String>,
    pub biomaterial_en: Option<String>,
    pub preparation: Option<String>,
    pub preparation_kz: Option<String>,
    pub preparation_en: Option<String>,
    #[validate(length(min = 1))]
    pub category_id: Option<String>,
    pub price: Option<u32>,
    pub collection_price: Option<u32>,
}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;
    type Draft = AnalysisDraft;
    type Patch = AnalysisPatch;

    const COLLECTION: &'static str = "analyses";
    const ID_SCHEME: IdScheme = IdScheme::Sequential;

    fn id(&self) -> &str {
        &self.id
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn build(id: String, draft: AnalysisDraft, existing: &[Self], _now: DateTime<Utc>) -> Self {
        // Slugs always come from the russian name; callers cannot choose one.
        let base = slugify(&draft.name);
        let base = if base.is_empty() {
            format!("analysis-{id}")
        } else {
            base
        };
        let slug = unique_slug(&base, |s| existing.iter().any(|a| a.slug == s));

        Model {
            id,
            slug,
            name: draft.name,
            name_kz: variant(draft.name_kz),
            name_en: variant(draft.name_en),
            description: draft.description,
            description_kz: variant(draft.description_kz),
            description_en: variant(draft.description_en),
            deadline: draft.deadline,
            deadline_kz: variant(draft.deadline_kz),
            deadline_en: variant(draft.deadline_en),
            biomaterial: draft.biomaterial,
            biomaterial_kz: variant(draft.biomaterial_kz),
            biomaterial_en: variant(draft.biomaterial_en),
            preparation: draft.preparation,
            preparation_kz: variant(draft.preparation_kz),
            preparation_en: variant(draft.preparation_en),
            category_id: draft.category_id,
            price: draft.price,
            collection_price: draft.collection_price,
        }
    }

    fn apply(&mut self, patch: AnalysisPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.name_kz.is_some() {
            self.name_kz = variant(patch.name_kz);
        }
        if patch.name_en.is_some() {
            self.name_en = variant(patch.name_en);
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if patch.description_kz.is_some() {
            self.description_kz = variant(patch.description_kz);
        }
        if patch.description_en.is_some() {
            self.description_en = variant(patch.description_en);
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if patch.deadline_kz.is_some() {
            self.deadline_kz = variant(patch.deadline_kz);
        }
        if patch.deadline_en.is_some() {
            self.deadline_en = variant(patch.deadline_en);
        }
        if let Some(biomaterial) = patch.biomaterial {
            self.biomaterial = biomaterial;
        }
        if patch.biomaterial_kz.is_some() {
            self.biomaterial_kz = variant(patch.biomaterial_kz);
        }
        if patch.biomaterial_en.is_some() {
            self.biomaterial_en = variant(patch.biomaterial_en);
        }
        if let Some(preparation) = patch.preparation {
            self.preparation = preparation;
        }
        if patch.preparation_kz.is_some() {
            self.preparation_kz = variant(patch.preparation_kz);
        }
        if patch.preparation_en.is_some() {
            self.preparation_en = variant(patch.preparation_en);
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(collection_price) = patch.collection_price {
            self.collection_price = collection_price;
        }
    }
}

impl Model {
    pub fn name_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.name,
            self.name_kz.as_deref(),
            self.name_en.as_deref(),
        )
    }

    pub fn description_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.description,
            self.description_kz.as_deref(),
            self.description_en.as_deref(),
        )
    }

    pub fn deadline_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.deadline,
            self.deadline_kz.as_deref(),
            self.deadline_en.as_deref(),
        )
    }

    pub fn biomaterial_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.biomaterial,
            self.biomaterial_kz.as_deref(),
            self.biomaterial_en.as_deref(),
        )
    }

    pub fn preparation_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.preparation,
            self.preparation_kz.as_deref(),
            self.preparation_en.as_deref(),
        )
    }

    /// Localized view. `categories` is the category collection; an unknown
    /// `category_id` is shown as the raw id.
    pub fn view<'a>(&'a self, locale: Locale, categories: &'a [Category]) -> AnalysisView<'a> {
        let category_name = categories
            .iter()
            .find(|c| c.id == self.category_id)
            .map(|c| c.name_in(locale))
            .unwrap_or(self.category_id.as_str());

        AnalysisView {
            id: &self.id,
            slug: &self.slug,
            name: self.name_in(locale),
            description: self.description_in(locale),
            deadline: self.deadline_in(locale),
            biomaterial: self.biomaterial_in(locale),
            preparation: self.preparation_in(locale),
            category_id: &self.category_id,
            category_name,
            price: self.price,
            collection_price: self.collection_price,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub deadline: &'a str,
    pub biomaterial: &'a str,
    pub preparation: &'a str,
    pub category_id: &'a str,
    pub category_name: &'a str,
    pub price: u32,
    pub collection_price: u32,
}

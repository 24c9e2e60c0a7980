use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{variant, IdScheme, Record};
use crate::locale::{self, Locale};
use crate::slug::{slugify, unique_slug};

/// Analysis category. Reference data: admins only read it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[serde(default, with = "locale::variant")]
    pub name_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    pub name_en: Option<String>,
    pub slug: String,
}

pub type Category = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Deserialize, Validate, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    #[validate(length(min = 1))]
    pub name: String,
    pub name_kz: Option<String>,
    pub name_en: Option<String>,
    #[validate(custom(function = "crate::slug::validate_slug"))]
    pub slug: Option<String>,
}

#[derive(Deserialize, Validate, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub name_kz: Option<String>,
    pub name_en: Option<String>,
}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;

    const COLLECTION: &'static str = "categories";
    const ID_SCHEME: IdScheme = IdScheme::Sequential;

    fn id(&self) -> &str {
        &self.id
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn build(id: String, draft: CategoryDraft, existing: &[Self], _now: DateTime<Utc>) -> Self {
        let base = slugify(draft.slug.as_deref().unwrap_or(&draft.name));
        let base = if base.is_empty() {
            format!("category-{id}")
        } else {
            base
        };

        Model {
            slug: unique_slug(&base, |s| existing.iter().any(|c| c.slug == s)),
            id,
            name: draft.name,
            name_kz: variant(draft.name_kz),
            name_en: variant(draft.name_en),
        }
    }

    fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.name_kz.is_some() {
            self.name_kz = variant(patch.name_kz);
        }
        if patch.name_en.is_some() {
            self.name_en = variant(patch.name_en);
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

    pub fn view(&self, locale: Locale) -> CategoryView<'_> {
        CategoryView {
            id: &self.id,
            slug: &self.slug,
            name: self.name_in(locale),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CategoryView<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub name: &'a str,
}

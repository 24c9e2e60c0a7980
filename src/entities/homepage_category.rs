use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{sort_by_order, variant, IdScheme, Record};
use crate::locale::{self, Locale};

/// Ordered tag list, stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Tags(pub Vec<String>);

impl From<Vec<String>> for Tags {
    fn from(value: Vec<String>) -> Self {
        Tags(value)
    }
}

impl std::ops::Deref for Tags {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Category tile on the homepage.
///
/// Tags are kept independently per language; the lists may differ in length.
/// At most one record is `featured`: writing a featured tile clears the flag
/// on every other tile.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "homepage_categories")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
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
    #[sea_orm(column_type = "Text")]
    pub description2: String,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub description2_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub description2_en: Option<String>,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub tags_kz: Tags,
    #[serde(default)]
    pub tags_en: Tags,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub featured: bool,
}

pub type HomepageCategory = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Deserialize, Validate, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct HomepageCategoryDraft {
    #[validate(length(min = 1))]
    pub name: String,
    pub name_kz: Option<String>,
    pub name_en: Option<String>,
    #[serde(default)]
    pub description: String,
    pub description_kz: Option<String>,
    pub description_en: Option<String>,
    #[serde(default)]
    pub description2: String,
    pub description2_kz: Option<String>,
    pub description2_en: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tags_kz: Vec<String>,
    #[serde(default)]
    pub tags_en: Vec<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Deserialize, Validate, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HomepageCategoryPatch {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub name_kz: Option<String>,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub description_kz: Option<String>,
    pub description_en: Option<String>,
    pub description2: Option<String>,
    pub description2_kz: Option<String>,
    pub description2_en: Option<String>,
    pub tags: Option<Vec<String>>,
    pub tags_kz: Option<Vec<String>>,
    pub tags_en: Option<Vec<String>>,
    pub order: Option<i32>,
    pub featured: Option<bool>,
}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;
    type Draft = HomepageCategoryDraft;
    type Patch = HomepageCategoryPatch;

    const COLLECTION: &'static str = "homepage_categories";
    const ID_SCHEME: IdScheme = IdScheme::Timestamped("hcat");

    fn id(&self) -> &str {
        &self.id
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn build(
        id: String,
        draft: HomepageCategoryDraft,
        _existing: &[Self],
        _now: DateTime<Utc>,
    ) -> Self {
        Model {
            id,
            name: draft.name,
            name_kz: variant(draft.name_kz),
            name_en: variant(draft.name_en),
            description: draft.description,
            description_kz: variant(draft.description_kz),
            description_en: variant(draft.description_en),
            description2: draft.description2,
            description2_kz: variant(draft.description2_kz),
            description2_en: variant(draft.description2_en),
            tags: draft.tags.into(),
            tags_kz: draft.tags_kz.into(),
            tags_en: draft.tags_en.into(),
            order: draft.order,
            featured: draft.featured,
        }
    }

    fn apply(&mut self, patch: HomepageCategoryPatch) {
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
        if let Some(description2) = patch.description2 {
            self.description2 = description2;
        }
        if patch.description2_kz.is_some() {
            self.description2_kz = variant(patch.description2_kz);
        }
        if patch.description2_en.is_some() {
            self.description2_en = variant(patch.description2_en);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags.into();
        }
        if let Some(tags) = patch.tags_kz {
            self.tags_kz = tags.into();
        }
        if let Some(tags) = patch.tags_en {
            self.tags_en = tags.into();
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
    }

    fn arrange(records: &mut Vec<Self>) {
        sort_by_order(records, |r| r.order);
    }

    fn displaced_by(&self, written: &Self) -> bool {
        written.featured && self.featured && self.id != written.id
    }

    fn displace(&mut self) {
        self.featured = false;
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

    pub fn description2_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.description2,
            self.description2_kz.as_deref(),
            self.description2_en.as_deref(),
        )
    }

    pub fn tags_in(&self, locale: Locale) -> &[String] {
        locale::resolve_list(locale, &self.tags, &self.tags_kz, &self.tags_en)
    }

    pub fn view(&self, locale: Locale) -> HomepageCategoryView<'_> {
        HomepageCategoryView {
            id: &self.id,
            name: self.name_in(locale),
            description: self.description_in(locale),
            description2: self.description2_in(locale),
            tags: self.tags_in(locale),
            order: self.order,
            featured: self.featured,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HomepageCategoryView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub description2: &'a str,
    pub tags: &'a [String],
    pub order: i32,
    pub featured: bool,
}

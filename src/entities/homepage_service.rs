use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{sort_by_order, variant, IdScheme, Record};
use crate::locale::{self, Locale};

/// Service card in the homepage "what we do" strip.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "homepage_services")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[serde(default, with = "locale::variant")]
    pub title_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    pub title_en: Option<String>,
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
    pub icon: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub order: i32,
}

pub type HomepageService = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Deserialize, Validate, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HomepageServiceDraft {
    #[validate(length(min = 1))]
    pub title: String,
    pub title_kz: Option<String>,
    pub title_en: Option<String>,
    #[serde(default)]
    pub description: String,
    pub description_kz: Option<String>,
    pub description_en: Option<String>,
    #[serde(default)]
    pub icon: String,
    pub link: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Deserialize, Validate, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HomepageServicePatch {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub title_kz: Option<String>,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_kz: Option<String>,
    pub description_en: Option<String>,
    pub icon: Option<String>,
    pub link: Option<String>,
    pub order: Option<i32>,
}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;
    type Draft = HomepageServiceDraft;
    type Patch = HomepageServicePatch;

    const COLLECTION: &'static str = "homepage_services";
    const ID_SCHEME: IdScheme = IdScheme::Timestamped("hservice");

    fn id(&self) -> &str {
        &self.id
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn build(
        id: String,
        draft: HomepageServiceDraft,
        _existing: &[Self],
        _now: DateTime<Utc>,
    ) -> Self {
        Model {
            id,
            title: draft.title,
            title_kz: variant(draft.title_kz),
            title_en: variant(draft.title_en),
            description: draft.description,
            description_kz: variant(draft.description_kz),
            description_en: variant(draft.description_en),
            icon: draft.icon,
            link: variant(draft.link),
            order: draft.order,
        }
    }

    fn apply(&mut self, patch: HomepageServicePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if patch.title_kz.is_some() {
            self.title_kz = variant(patch.title_kz);
        }
        if patch.title_en.is_some() {
            self.title_en = variant(patch.title_en);
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
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if patch.link.is_some() {
            self.link = variant(patch.link);
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }

    fn arrange(records: &mut Vec<Self>) {
        sort_by_order(records, |r| r.order);
    }
}

impl Model {
    pub fn view(&self, locale: Locale) -> HomepageServiceView<'_> {
        HomepageServiceView {
            id: &self.id,
            title: locale::resolve(
                locale,
                &self.title,
                self.title_kz.as_deref(),
                self.title_en.as_deref(),
            ),
            description: locale::resolve(
                locale,
                &self.description,
                self.description_kz.as_deref(),
                self.description_en.as_deref(),
            ),
            icon: &self.icon,
            link: self.link.as_deref(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HomepageServiceView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub icon: &'a str,
    pub link: Option<&'a str>,
}

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{sort_by_order, variant, IdScheme, Record};
use crate::locale::{self, Locale};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[serde(default, with = "locale::variant")]
    pub name_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    pub name_en: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub text_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub text_en: Option<String>,
    pub rating: u8,
    pub date: Date,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub show_on_homepage: bool,
    #[serde(default)]
    pub order: i32,
}

pub type Review = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Deserialize, Validate, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    #[validate(length(min = 1))]
    pub name: String,
    pub name_kz: Option<String>,
    pub name_en: Option<String>,
    #[validate(length(min = 1))]
    pub text: String,
    pub text_kz: Option<String>,
    pub text_en: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    pub date: Option<NaiveDate>,
    pub photo: Option<String>,
    #[serde(default)]
    pub show_on_homepage: bool,
    #[serde(default)]
    pub order: i32,
}

impl ReviewDraft {
    pub fn new(name: impl Into<String>, text: impl Into<String>, rating: u8) -> Self {
        ReviewDraft {
            name: name.into(),
            name_kz: None,
            name_en: None,
            text: text.into(),
            text_kz: None,
            text_en: None,
            rating,
            date: None,
            photo: None,
            show_on_homepage: false,
            order: 0,
        }
    }
}

#[derive(Deserialize, Validate, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub name_kz: Option<String>,
    pub name_en: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    pub text_kz: Option<String>,
    pub text_en: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
    pub date: Option<NaiveDate>,
    pub photo: Option<String>,
    pub show_on_homepage: Option<bool>,
    pub order: Option<i32>,
}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;
    type Draft = ReviewDraft;
    type Patch = ReviewPatch;

    const COLLECTION: &'static str = "reviews";
    const ID_SCHEME: IdScheme = IdScheme::Timestamped("review");

    fn id(&self) -> &str {
        &self.id
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn build(id: String, draft: ReviewDraft, _existing: &[Self], now: DateTime<Utc>) -> Self {
        Model {
            id,
            name: draft.name,
            name_kz: variant(draft.name_kz),
            name_en: variant(draft.name_en),
            text: draft.text,
            text_kz: variant(draft.text_kz),
            text_en: variant(draft.text_en),
            rating: draft.rating,
            date: draft.date.unwrap_or_else(|| now.date_naive()),
            photo: variant(draft.photo),
            show_on_homepage: draft.show_on_homepage,
            order: draft.order,
        }
    }

    fn apply(&mut self, patch: ReviewPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.name_kz.is_some() {
            self.name_kz = variant(patch.name_kz);
        }
        if patch.name_en.is_some() {
            self.name_en = variant(patch.name_en);
        }
        if let Some(text) = patch.text {
            self.text = text;
        }
        if patch.text_kz.is_some() {
            self.text_kz = variant(patch.text_kz);
        }
        if patch.text_en.is_some() {
            self.text_en = variant(patch.text_en);
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if patch.photo.is_some() {
            self.photo = variant(patch.photo);
        }
        if let Some(show_on_homepage) = patch.show_on_homepage {
            self.show_on_homepage = show_on_homepage;
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
    pub fn name_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.name,
            self.name_kz.as_deref(),
            self.name_en.as_deref(),
        )
    }

    pub fn text_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.text,
            self.text_kz.as_deref(),
            self.text_en.as_deref(),
        )
    }

    pub fn view(&self, locale: Locale) -> ReviewView<'_> {
        ReviewView {
            id: &self.id,
            name: self.name_in(locale),
            text: self.text_in(locale),
            rating: self.rating,
            date: self.date,
            photo: self.photo.as_deref(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ReviewView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub text: &'a str,
    pub rating: u8,
    pub date: NaiveDate,
    pub photo: Option<&'a str>,
}

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{variant, IdScheme, Record};
use crate::locale::{self, Locale};
use crate::slug::{slugify, unique_slug};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, with = "locale::variant")]
    pub title_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    pub title_en: Option<String>,
    #[serde(default)]
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt_en: Option<String>,
    #[serde(default)]
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub content_kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    #[sea_orm(column_type = "Text", nullable)]
    pub content_en: Option<String>,
    #[serde(default)]
    pub image: String,
    pub category: NewsCategory,
    pub published_at: Date,
    #[serde(default)]
    pub featured: bool,
}

pub type NewsItem = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(
    enum_name = "news_category",
    db_type = "String(StringLen::N(16))",
    rs_type = "String"
)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    #[sea_orm(string_value = "news")]
    News,
    #[sea_orm(string_value = "promotion")]
    Promotion,
    #[sea_orm(string_value = "article")]
    Article,
}

#[derive(Deserialize, Validate, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewsDraft {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub title_kz: Option<String>,
    pub title_en: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    pub excerpt_kz: Option<String>,
    pub excerpt_en: Option<String>,
    #[serde(default)]
    pub content: String,
    pub content_kz: Option<String>,
    pub content_en: Option<String>,
    #[serde(default)]
    pub image: String,
    pub category: NewsCategory,
    pub published_at: Option<NaiveDate>,
    pub featured: Option<bool>,
}

impl NewsDraft {
    pub fn new(title: impl Into<String>, category: NewsCategory) -> NewsDraft {
        NewsDraft {
            title: title.into(),
            title_kz: None,
            title_en: None,
            excerpt: String::new(),
            excerpt_kz: None,
            excerpt_en: None,
            content: String::new(),
            content_kz: None,
            content_en: None,
            image: String::new(),
            category,
            published_at: None,
            featured: None,
        }
    }
}

#[derive(Deserialize, Validate, Default, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewsPatch {
    #[validate(length(min = 1, message = "title can not be blank"))]
    pub title: Option<String>,
    pub title_kz: Option<String>,
    pub title_en: Option<String>,
    pub excerpt: Option<String>,
    pub excerpt_kz: Option<String>,
    pub excerpt_en: Option<String>,
    pub content: Option<String>,
    pub content_kz: Option<String>,
    pub content_en: Option<String>,
    pub image: Option<String>,
    pub category: Option<NewsCategory>,
    pub published_at: Option<NaiveDate>,
    pub featured: Option<bool>,
}

// Translations not given on create start out as copies of the russian text.
fn or_base(value: Option<String>, base: &str) -> Option<String> {
    variant(value).or_else(|| variant(Some(base.to_string())))
}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;
    type Draft = NewsDraft;
    type Patch = NewsPatch;

    const COLLECTION: &'static str = "news";
    const ID_SCHEME: IdScheme = IdScheme::Sequential;

    fn id(&self) -> &str {
        &self.id
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn build(id: String, draft: NewsDraft, existing: &[Self], now: DateTime<Utc>) -> Self {
        // Slugs always come from the russian title; callers cannot choose one.
        let base = slugify(&draft.title);
        let base = if base.is_empty() {
            format!("news-{id}")
        } else {
            base
        };
        let slug = unique_slug(&base, |s| existing.iter().any(|n| n.slug == s));

        Model {
            title_kz: or_base(draft.title_kz, &draft.title),
            title_en: or_base(draft.title_en, &draft.title),
            excerpt_kz: or_base(draft.excerpt_kz, &draft.excerpt),
            excerpt_en: or_base(draft.excerpt_en, &draft.excerpt),
            content_kz: or_base(draft.content_kz, &draft.content),
            content_en: or_base(draft.content_en, &draft.content),
            id,
            slug,
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            image: draft.image,
            category: draft.category,
            published_at: draft.published_at.unwrap_or_else(|| now.date_naive()),
            featured: draft.featured.unwrap_or(false),
        }
    }

    fn apply(&mut self, patch: NewsPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if patch.title_kz.is_some() {
            self.title_kz = variant(patch.title_kz);
        }
        if patch.title_en.is_some() {
            self.title_en = variant(patch.title_en);
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if patch.excerpt_kz.is_some() {
            self.excerpt_kz = variant(patch.excerpt_kz);
        }
        if patch.excerpt_en.is_some() {
            self.excerpt_en = variant(patch.excerpt_en);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if patch.content_kz.is_some() {
            self.content_kz = variant(patch.content_kz);
        }
        if patch.content_en.is_some() {
            self.content_en = variant(patch.content_en);
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(published_at) = patch.published_at {
            self.published_at = published_at;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
    }
}

impl Model {
    pub fn title_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.title,
            self.title_kz.as_deref(),
            self.title_en.as_deref(),
        )
    }

    pub fn excerpt_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.excerpt,
            self.excerpt_kz.as_deref(),
            self.excerpt_en.as_deref(),
        )
    }

    pub fn content_in(&self, locale: Locale) -> &str {
        locale::resolve(
            locale,
            &self.content,
            self.content_kz.as_deref(),
            self.content_en.as_deref(),
        )
    }

    pub fn view(&self, locale: Locale) -> NewsView<'_> {
        NewsView {
            id: &self.id,
            slug: &self.slug,
            title: self.title_in(locale),
            excerpt: self.excerpt_in(locale),
            content: self.content_in(locale),
            image: &self.image,
            category: self.category,
            published_at: self.published_at,
            featured: self.featured,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewsView<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub title: &'a str,
    pub excerpt: &'a str,
    pub content: &'a str,
    pub image: &'a str,
    pub category: NewsCategory,
    pub published_at: NaiveDate,
    pub featured: bool,
}

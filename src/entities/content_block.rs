use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entities::{sort_by_order, IdScheme, Record};
use crate::locale::{self, Locale};

/// A translated string inside block content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub ru: String,
    #[serde(default, with = "locale::variant")]
    pub kz: Option<String>,
    #[serde(default, with = "locale::variant")]
    pub en: Option<String>,
}

impl Text {
    pub fn new(ru: impl Into<String>) -> Self {
        Text {
            ru: ru.into(),
            kz: None,
            en: None,
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        locale::resolve(locale, &self.ru, self.kz.as_deref(), self.en.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: Text,
    pub answer: Text,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub image: String,
    pub title: Text,
    #[serde(default)]
    pub subtitle: Text,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub title: Text,
    pub url: String,
}

/// Typed block content, discriminated by `block_type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(tag = "block_type", content = "content", rename_all = "snake_case")]
pub enum BlockKind {
    Text { title: Text, body: Text },
    Faq { items: Vec<FaqItem> },
    HeroCarousel { slides: Vec<HeroSlide> },
    Documents { items: Vec<DocumentLink> },
}

impl BlockKind {
    pub fn block_type(&self) -> &'static str {
        match self {
            BlockKind::Text { .. } => "text",
            BlockKind::Faq { .. } => "faq",
            BlockKind::HeroCarousel { .. } => "hero_carousel",
            BlockKind::Documents { .. } => "documents",
        }
    }

    pub fn localize(&self, locale: Locale) -> LocalizedBlock<'_> {
        match self {
            BlockKind::Text { title, body } => LocalizedBlock::Text {
                title: title.get(locale),
                body: body.get(locale),
            },
            BlockKind::Faq { items } => LocalizedBlock::Faq {
                items: items
                    .iter()
                    .map(|item| LocalizedFaq {
                        question: item.question.get(locale),
                        answer: item.answer.get(locale),
                    })
                    .collect(),
            },
            BlockKind::HeroCarousel { slides } => LocalizedBlock::HeroCarousel {
                slides: slides
                    .iter()
                    .map(|slide| LocalizedSlide {
                        image: &slide.image,
                        title: slide.title.get(locale),
                        subtitle: slide.subtitle.get(locale),
                        link: slide.link.as_deref(),
                    })
                    .collect(),
            },
            BlockKind::Documents { items } => LocalizedBlock::Documents {
                items: items
                    .iter()
                    .map(|doc| LocalizedDocument {
                        title: doc.title.get(locale),
                        url: &doc.url,
                    })
                    .collect(),
            },
        }
    }
}

fn validate_block(block: &BlockKind) -> Result<(), ValidationError> {
    let empty = match block {
        BlockKind::Text { title, body } => title.ru.is_empty() && body.ru.is_empty(),
        BlockKind::Faq { items } => items.is_empty(),
        BlockKind::HeroCarousel { slides } => slides.is_empty(),
        BlockKind::Documents { items } => items.is_empty(),
    };
    if empty {
        return Err(ValidationError::new("empty_block"));
    }
    Ok(())
}

/// Page section edited from the admin panel (hero carousel, FAQ, ...).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_blocks")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub page: String,
    #[serde(default)]
    pub order: i32,
    #[serde(flatten)]
    pub block: BlockKind,
}

pub type ContentBlock = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct ContentBlockDraft {
    #[validate(length(min = 1))]
    pub page: String,
    #[serde(default)]
    pub order: i32,
    #[serde(flatten)]
    #[validate(custom(function = "validate_block"))]
    pub block: BlockKind,
}

#[derive(Deserialize, Validate, Default, Clone, Debug)]
pub struct ContentBlockPatch {
    #[validate(length(min = 1))]
    pub page: Option<String>,
    pub order: Option<i32>,
    #[serde(flatten)]
    #[validate(custom(function = "validate_block"))]
    pub block: Option<BlockKind>,
}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;
    type Draft = ContentBlockDraft;
    type Patch = ContentBlockPatch;

    const COLLECTION: &'static str = "content_blocks";
    const ID_SCHEME: IdScheme = IdScheme::Timestamped("block");

    fn id(&self) -> &str {
        &self.id
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn build(id: String, draft: ContentBlockDraft, _existing: &[Self], _now: DateTime<Utc>) -> Self {
        Model {
            id,
            page: draft.page,
            order: draft.order,
            block: draft.block,
        }
    }

    fn apply(&mut self, patch: ContentBlockPatch) {
        if let Some(page) = patch.page {
            self.page = page;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(block) = patch.block {
            self.block = block;
        }
    }

    fn arrange(records: &mut Vec<Self>) {
        sort_by_order(records, |r| r.order);
    }
}

impl Model {
    pub fn view(&self, locale: Locale) -> ContentBlockView<'_> {
        ContentBlockView {
            id: &self.id,
            order: self.order,
            block: self.block.localize(locale),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ContentBlockView<'a> {
    pub id: &'a str,
    pub order: i32,
    #[serde(flatten)]
    pub block: LocalizedBlock<'a>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "block_type", content = "content", rename_all = "snake_case")]
pub enum LocalizedBlock<'a> {
    Text { title: &'a str, body: &'a str },
    Faq { items: Vec<LocalizedFaq<'a>> },
    HeroCarousel { slides: Vec<LocalizedSlide<'a>> },
    Documents { items: Vec<LocalizedDocument<'a>> },
}

#[derive(Serialize, Debug)]
pub struct LocalizedFaq<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

#[derive(Serialize, Debug)]
pub struct LocalizedSlide<'a> {
    pub image: &'a str,
    pub title: &'a str,
    pub subtitle: &'a str,
    pub link: Option<&'a str>,
}

#[derive(Serialize, Debug)]
pub struct LocalizedDocument<'a> {
    pub url: &'a str,
    pub title: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_type_discriminates_content() {
        let raw = json!({
            "id": "block_1",
            "page": "faq",
            "order": 1,
            "block_type": "faq",
            "content": {
                "items": [
                    {
                        "question": { "ru": "Как сдать анализ?", "kz": "", "en": "How to take a test?" },
                        "answer": { "ru": "Натощак", "kz": "", "en": "" }
                    }
                ]
            }
        });

        let block: ContentBlock = serde_json::from_value(raw).unwrap();
        assert_eq!(block.block.block_type(), "faq");

        match block.block.localize(Locale::En) {
            LocalizedBlock::Faq { items } => {
                assert_eq!(items[0].question, "How to take a test?");
                assert_eq!(items[0].answer, "Натощак");
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn unknown_block_type_is_rejected() {
        let raw = json!({
            "id": "block_2",
            "page": "home",
            "block_type": "video",
            "content": { "url": "https://example.com" }
        });
        assert!(serde_json::from_value::<ContentBlock>(raw).is_err());
    }
}

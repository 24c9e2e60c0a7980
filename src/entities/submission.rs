use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{variant, IdScheme, Record};

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]{7,20}$").unwrap());

/// Contact or booking form sent from the public site. Append-only: admins may
/// delete a submission but never edit it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[serde(rename = "type")]
    #[sea_orm(column_name = "type")]
    pub kind: SubmissionKind,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    #[serde(default)]
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub analysis_id: Option<String>,
    #[serde(default)]
    pub analysis_name: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<Date>,
    pub created_at: DateTimeUtc,
}

pub type Submission = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(
    enum_name = "submission_kind",
    db_type = "String(StringLen::N(16))",
    rs_type = "String"
)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    #[default]
    #[sea_orm(string_value = "contact")]
    Contact,
    #[sea_orm(string_value = "booking")]
    Booking,
}

#[derive(Deserialize, Validate, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDraft {
    #[serde(rename = "type", default)]
    pub kind: SubmissionKind,
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "phone is required"))]
    pub phone: String,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
    pub analysis_id: Option<String>,
    pub analysis_name: Option<String>,
    pub preferred_date: Option<NaiveDate>,
}

impl SubmissionDraft {
    pub fn contact(first_name: impl Into<String>, phone: impl Into<String>) -> Self {
        SubmissionDraft {
            kind: SubmissionKind::Contact,
            first_name: first_name.into(),
            last_name: None,
            email: None,
            phone: phone.into(),
            message: None,
            rating: None,
            analysis_id: None,
            analysis_name: None,
            preferred_date: None,
        }
    }

    pub fn booking(
        first_name: impl Into<String>,
        phone: impl Into<String>,
        analysis_id: impl Into<String>,
    ) -> Self {
        SubmissionDraft {
            kind: SubmissionKind::Booking,
            analysis_id: Some(analysis_id.into()),
            ..SubmissionDraft::contact(first_name, phone)
        }
    }
}

/// Submissions are never edited; the patch carries nothing.
#[derive(Deserialize, Validate, Default, Clone, Debug)]
pub struct SubmissionPatch {}

impl Record for Model {
    type Entity = Entity;
    type ActiveModel = ActiveModel;
    type Draft = SubmissionDraft;
    type Patch = SubmissionPatch;

    const COLLECTION: &'static str = "submissions";
    const ID_SCHEME: IdScheme = IdScheme::Submission;
    const PREPEND: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn build(id: String, draft: SubmissionDraft, _existing: &[Self], now: DateTime<Utc>) -> Self {
        Model {
            id,
            kind: draft.kind,
            first_name: draft.first_name,
            last_name: variant(draft.last_name),
            email: variant(draft.email),
            phone: draft.phone,
            message: variant(draft.message),
            rating: draft.rating,
            analysis_id: variant(draft.analysis_id),
            analysis_name: variant(draft.analysis_name),
            preferred_date: draft.preferred_date,
            created_at: now,
        }
    }

    fn apply(&mut self, _patch: SubmissionPatch) {}

    // Most recent first. The file collection is kept that way by prepending;
    // the sort is what orders rows coming back from a table.
    fn arrange(records: &mut Vec<Self>) {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

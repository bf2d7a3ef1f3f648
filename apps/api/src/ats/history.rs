use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::ats::scoring::{ScoreBand, ScoringResult};
use crate::backend::{BackendApi, BackendError, PageQuery, TableId};
use crate::config::TableIds;
use crate::errors::AppError;
use crate::models::resume::AtsCheckRecord;
use crate::profile::{bump_activity, ActivityCounter};

const HISTORY_PAGE_SIZE: u32 = 50;

/// A stored check with its feedback decoded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsCheck {
    #[serde(flatten)]
    pub record: AtsCheckRecord,
    pub band: ScoreBand,
    /// `None` when the stored feedback no longer decodes.
    pub result: Option<ScoringResult>,
}

impl From<AtsCheckRecord> for AtsCheck {
    fn from(record: AtsCheckRecord) -> Self {
        let result = serde_json::from_str(&record.feedback).ok();
        Self {
            band: ScoreBand::of(record.score),
            result,
            record,
        }
    }
}

pub struct NewCheck<'a> {
    pub user_id: &'a str,
    pub resume_id: &'a str,
    pub job_description: &'a str,
    pub result: &'a ScoringResult,
}

/// Stores a scored check, reads it back, and bumps the user's check counter.
pub async fn record_check(
    backend: &dyn BackendApi,
    tables: &TableIds,
    check: NewCheck<'_>,
) -> Result<AtsCheckRecord, AppError> {
    let check_date = Utc::now().to_rfc3339();
    let feedback = serde_json::to_string(check.result)?;

    backend
        .table_create(
            tables.ats_checks,
            json!({
                "user_id": check.user_id,
                "resume_id": check.resume_id,
                "job_description": check.job_description,
                "score": check.result.overall_score,
                "feedback": feedback,
                "check_date": &check_date,
            }),
        )
        .await?;

    let query = PageQuery::first_page(1)
        .filter_eq("user_id", check.user_id)
        .filter_eq("check_date", check_date.as_str());
    let record: AtsCheckRecord = backend
        .table_page(tables.ats_checks, &query)
        .await?
        .first()?
        .ok_or(BackendError::EmptyData("ats check"))?;

    bump_activity(backend, tables.activity, check.user_id, ActivityCounter::AtsChecks).await?;
    info!(check_id = record.id, score = record.score, "Recorded ATS check");
    Ok(record)
}

/// The user's checks, newest first.
pub async fn list_checks(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
) -> Result<Vec<AtsCheck>, AppError> {
    let query = PageQuery::first_page(HISTORY_PAGE_SIZE)
        .order_by("check_date", false)
        .filter_eq("user_id", user_id);
    let records: Vec<AtsCheckRecord> = backend.table_page(table, &query).await?.rows()?;
    Ok(records.into_iter().map(AtsCheck::from).collect())
}

/// Deletes one of the user's checks. Checks owned by another user read as missing.
pub async fn delete_check(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
    id: i64,
) -> Result<(), AppError> {
    let query = PageQuery::first_page(1).filter_eq("id", id);
    backend
        .table_page(table, &query)
        .await?
        .first::<AtsCheckRecord>()?
        .filter(|record| record.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("ATS check {id} not found")))?;

    backend.table_delete(table, id).await?;
    info!(check_id = id, "Deleted ATS check");
    Ok(())
}

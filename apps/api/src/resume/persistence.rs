//! Saved resumes in the backend's resumes table.
//!
//! Each workflow is a strict sequence of remote calls; the first failure ends
//! the chain and nothing after it runs.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::backend::{BackendApi, BackendError, PageQuery, TableId};
use crate::config::TableIds;
use crate::errors::AppError;
use crate::models::resume::{ResumeData, ResumeRecord};
use crate::profile::{bump_activity, ActivityCounter};
use crate::resume::validation::validate_resume;

const HISTORY_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct SaveResumeRequest {
    /// Present when overwriting an existing record.
    pub id: Option<i64>,
    pub title: String,
    pub template: String,
    pub resume: ResumeData,
    #[serde(default)]
    pub thumbnail: String,
}

/// Creates or updates a resume record owned by `user_id`.
///
/// New records are read back to learn their id, then the user's resume
/// counter is bumped.
pub async fn save_resume(
    backend: &dyn BackendApi,
    tables: &TableIds,
    user_id: &str,
    req: SaveResumeRequest,
) -> Result<ResumeRecord, AppError> {
    validate_resume(&req.resume)?;

    let content = serde_json::to_string(&req.resume)?;
    let last_modified = Utc::now().to_rfc3339();

    if let Some(id) = req.id {
        let existing = get_resume(backend, tables.resumes, user_id, id).await?;
        let record = ResumeRecord {
            id,
            user_id: existing.user_id,
            title: req.title,
            template: req.template,
            content,
            last_modified,
            thumbnail: req.thumbnail,
        };
        backend
            .table_update(tables.resumes, serde_json::to_value(&record)?)
            .await?;
        info!(resume_id = id, "Updated resume");
        return Ok(record);
    }

    backend
        .table_create(
            tables.resumes,
            json!({
                "user_id": user_id,
                "title": &req.title,
                "template": &req.template,
                "content": &content,
                "last_modified": &last_modified,
                "thumbnail": &req.thumbnail,
            }),
        )
        .await?;

    let query = PageQuery::first_page(1)
        .filter_eq("user_id", user_id)
        .filter_eq("last_modified", last_modified.as_str());
    let record: ResumeRecord = backend
        .table_page(tables.resumes, &query)
        .await?
        .first()?
        .ok_or(BackendError::EmptyData("resume"))?;

    bump_activity(backend, tables.activity, &record.user_id, ActivityCounter::Resumes).await?;
    info!(resume_id = record.id, user_id = %record.user_id, "Created resume");
    Ok(record)
}

/// The user's resumes, most recently modified first.
pub async fn list_resumes(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
) -> Result<Vec<ResumeRecord>, AppError> {
    let query = PageQuery::first_page(HISTORY_PAGE_SIZE)
        .order_by("last_modified", false)
        .filter_eq("user_id", user_id);
    Ok(backend.table_page(table, &query).await?.rows()?)
}

/// Loads one resume. Records owned by another user read as missing.
pub async fn get_resume(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
    id: i64,
) -> Result<ResumeRecord, AppError> {
    let query = PageQuery::first_page(1).filter_eq("id", id);
    backend
        .table_page(table, &query)
        .await?
        .first::<ResumeRecord>()?
        .filter(|record| record.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

pub async fn delete_resume(
    backend: &dyn BackendApi,
    table: TableId,
    user_id: &str,
    id: i64,
) -> Result<(), AppError> {
    get_resume(backend, table, user_id, id).await?;
    backend.table_delete(table, id).await?;
    info!(resume_id = id, "Deleted resume");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use crate::resume::defaults::default_resume;

    fn request(id: Option<i64>) -> SaveResumeRequest {
        SaveResumeRequest {
            id,
            title: "Backend roles".to_string(),
            template: "modern".to_string(),
            resume: default_resume(),
            thumbnail: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_reads_back_and_bumps_activity() {
        let backend = MemoryBackend::new();
        let tables = TableIds::default();

        let record = save_resume(&backend, &tables, "7", request(None)).await.unwrap();
        assert!(record.id > 0);
        assert_eq!(record.resume_data().unwrap(), default_resume());

        assert_eq!(
            backend.calls(),
            vec![
                "tableCreate",
                "tablePage",
                // activity get-or-create, then the counter update
                "tablePage",
                "tableCreate",
                "tablePage",
                "tableUpdate",
            ]
        );
        assert_eq!(backend.rows(tables.activity)[0]["resume_count"], 1);
    }

    #[tokio::test]
    async fn test_create_failure_short_circuits() {
        let backend = MemoryBackend::new();
        backend.fail_on("tableCreate");
        let result = save_resume(&backend, &TableIds::default(), "7", request(None)).await;

        assert!(matches!(result, Err(AppError::Backend(_))));
        assert_eq!(backend.calls(), vec!["tableCreate"]);
    }

    #[tokio::test]
    async fn test_invalid_resume_makes_no_remote_calls() {
        let backend = MemoryBackend::new();
        let mut req = request(None);
        req.resume.skills.push(String::new());

        let result = save_resume(&backend, &TableIds::default(), "7", req).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_existing_record() {
        let backend = MemoryBackend::new();
        let tables = TableIds::default();
        let created = save_resume(&backend, &tables, "7", request(None)).await.unwrap();

        let mut req = request(Some(created.id));
        req.title = "Renamed".to_string();
        let updated = save_resume(&backend, &tables, "7", req).await.unwrap();

        assert_eq!(updated.id, created.id);
        let stored = get_resume(&backend, tables.resumes, "7", created.id)
            .await
            .unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(backend.rows(tables.resumes).len(), 1);
    }

    #[tokio::test]
    async fn test_update_of_other_users_resume_is_not_found() {
        let backend = MemoryBackend::new();
        let tables = TableIds::default();
        let created = save_resume(&backend, &tables, "7", request(None)).await.unwrap();

        let result = save_resume(&backend, &tables, "8", request(Some(created.id))).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(backend.rows(tables.resumes)[0]["user_id"], "7");
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let backend = MemoryBackend::new();
        let table = TableIds::default().resumes;
        for (title, modified) in [
            ("old", "2024-01-01T00:00:00Z"),
            ("new", "2024-03-01T00:00:00Z"),
            ("mid", "2024-02-01T00:00:00Z"),
        ] {
            backend.insert(
                table,
                json!({
                    "user_id": "7",
                    "title": title,
                    "template": "basic",
                    "content": "{}",
                    "last_modified": modified,
                }),
            );
        }
        backend.insert(
            table,
            json!({
                "user_id": "8",
                "title": "someone else",
                "template": "basic",
                "content": "{}",
                "last_modified": "2025-01-01T00:00:00Z",
            }),
        );

        let titles: Vec<_> = list_resumes(&backend, table, "7")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_get_and_delete_missing() {
        let backend = MemoryBackend::new();
        let table = TableIds::default().resumes;
        assert!(matches!(
            get_resume(&backend, table, "7", 99).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_resume(&backend, table, "7", 99).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_other_users_resume_cannot_be_read_or_deleted() {
        let backend = MemoryBackend::new();
        let table = TableIds::default().resumes;
        let id = backend.insert(
            table,
            json!({
                "user_id": "8",
                "title": "theirs",
                "template": "basic",
                "content": "{}",
                "last_modified": "2024-01-01T00:00:00Z",
            }),
        );

        assert!(matches!(
            get_resume(&backend, table, "7", id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_resume(&backend, table, "7", id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(backend.rows(table).len(), 1);

        delete_resume(&backend, table, "8", id).await.unwrap();
        assert!(backend.rows(table).is_empty());
    }
}

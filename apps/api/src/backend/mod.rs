//! Backend client: the single point of entry for calls into the hosted
//! backend-as-a-service (tables, file storage, identity).
//!
//! Every remote operation answers with a `{ data, error }` envelope; a non-null
//! `error` is the only failure signal. The client is injected through
//! `AppState` as `Arc<dyn BackendApi>` and passed explicitly into workflows.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod http;
#[cfg(test)]
pub mod memory;

pub use http::HttpBackend;

pub type TableId = u32;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote error: {0}")]
    Remote(String),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend returned no data for '{0}'")]
    EmptyData(&'static str),
}

/// The `{ data, error }` envelope wrapping every backend response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<Value>,
}

impl<T> Envelope<T> {
    /// Turns a non-null, non-empty `error` into `BackendError::Remote`.
    pub fn into_result(self) -> Result<Option<T>, BackendError> {
        match self.error {
            None | Some(Value::Null) => Ok(self.data),
            Some(Value::String(s)) if s.is_empty() => Ok(self.data),
            Some(Value::String(s)) => Err(BackendError::Remote(s)),
            Some(other) => Err(BackendError::Remote(other.to_string())),
        }
    }
}

/// A single `{ name, op, value }` filter on a table query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Filter {
    pub name: String,
    pub op: String,
    pub value: Value,
}

impl Filter {
    pub fn equal(name: &str, value: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            op: "Equal".to_string(),
            value: value.into(),
        }
    }
}

/// Paginated table query.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PageQuery {
    pub page_no: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_field: Option<String>,
    pub is_asc: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

impl PageQuery {
    pub fn first_page(page_size: u32) -> Self {
        Self {
            page_no: 1,
            page_size,
            order_by_field: None,
            is_asc: true,
            filters: Vec::new(),
        }
    }

    pub fn order_by(mut self, field: &str, ascending: bool) -> Self {
        self.order_by_field = Some(field.to_string());
        self.is_asc = ascending;
        self
    }

    pub fn filter_eq(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::equal(name, value));
        self
    }
}

/// One page of rows returned by `table_page`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Page {
    #[serde(default)]
    pub list: Vec<Value>,
    #[serde(default)]
    pub virtual_count: u64,
}

impl Page {
    /// Decodes every row into `T`.
    pub fn rows<T: DeserializeOwned>(&self) -> Result<Vec<T>, BackendError> {
        self.list
            .iter()
            .map(|row| serde_json::from_value(row.clone()).map_err(BackendError::Decode))
            .collect()
    }

    /// Decodes the first row, if any.
    pub fn first<T: DeserializeOwned>(&self) -> Result<Option<T>, BackendError> {
        self.list
            .first()
            .map(|row| serde_json::from_value(row.clone()))
            .transpose()
            .map_err(BackendError::Decode)
    }
}

/// Opaque reference to a file held by backend storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRef(pub i64);

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordReset {
    pub token: String,
    pub password: String,
}

/// Session token issued by the identity service on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

/// The signed-in user as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
}

/// The backend-as-a-service surface consumed by this service.
///
/// Carried in `AppState` as `Arc<dyn BackendApi>`.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn table_page(&self, table: TableId, query: &PageQuery) -> Result<Page, BackendError>;

    async fn table_create(&self, table: TableId, row: Value) -> Result<(), BackendError>;

    /// `row` must carry the `id` of the record being replaced.
    async fn table_update(&self, table: TableId, row: Value) -> Result<(), BackendError>;

    async fn table_delete(&self, table: TableId, id: i64) -> Result<(), BackendError>;

    async fn upload(&self, file: UploadFile) -> Result<FileRef, BackendError>;

    /// Public download URL for a stored file.
    fn file_url(&self, file: FileRef) -> String;

    async fn login(&self, credentials: &Credentials) -> Result<Session, BackendError>;

    async fn register(&self, credentials: &Credentials) -> Result<(), BackendError>;

    async fn logout(&self, session: &Session) -> Result<(), BackendError>;

    async fn send_reset_password_email(&self, email: &str) -> Result<(), BackendError>;

    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), BackendError>;

    async fn current_user(&self, session: &Session) -> Result<UserInfo, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_null_error_is_ok() {
        let env: Envelope<Value> = serde_json::from_value(json!({"data": 7, "error": null})).unwrap();
        assert_eq!(env.into_result().unwrap(), Some(json!(7)));
    }

    #[test]
    fn test_envelope_string_error_is_remote() {
        let env: Envelope<Value> =
            serde_json::from_value(json!({"data": null, "error": "permission denied"})).unwrap();
        match env.into_result() {
            Err(BackendError::Remote(msg)) => assert_eq!(msg, "permission denied"),
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_empty_string_error_is_ok() {
        let env: Envelope<Value> = serde_json::from_value(json!({"data": 1, "error": ""})).unwrap();
        assert!(env.into_result().is_ok());
    }

    #[test]
    fn test_page_query_serializes_pascal_case() {
        let query = PageQuery::first_page(50)
            .order_by("last_modified", false)
            .filter_eq("user_id", 42);
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["PageNo"], 1);
        assert_eq!(value["PageSize"], 50);
        assert_eq!(value["OrderByField"], "last_modified");
        assert_eq!(value["IsAsc"], false);
        assert_eq!(value["Filters"][0]["op"], "Equal");
        assert_eq!(value["Filters"][0]["value"], 42);
    }

    #[test]
    fn test_page_query_omits_empty_filters() {
        let value = serde_json::to_value(PageQuery::first_page(1)).unwrap();
        assert!(value.get("Filters").is_none());
        assert!(value.get("OrderByField").is_none());
    }

    #[test]
    fn test_page_rows_decode() {
        #[derive(Deserialize)]
        struct Row {
            id: i64,
        }
        let page: Page =
            serde_json::from_value(json!({"List": [{"id": 1}, {"id": 2}], "VirtualCount": 2}))
                .unwrap();
        let rows: Vec<Row> = page.rows().unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(page.virtual_count, 2);
    }

    #[test]
    fn test_page_first_on_empty_is_none() {
        let page = Page::default();
        let first: Option<Value> = page.first().unwrap();
        assert!(first.is_none());
    }
}

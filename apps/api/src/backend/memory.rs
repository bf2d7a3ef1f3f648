//! In-memory `BackendApi` used by workflow and handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{
    BackendApi, BackendError, Credentials, FileRef, Page, PageQuery, PasswordReset, Session,
    TableId, UploadFile, UserInfo,
};

#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<HashMap<TableId, Vec<Value>>>,
    files: Mutex<Vec<UploadFile>>,
    next_id: Mutex<i64>,
    /// Operation name that should fail with a remote error, e.g. "tableCreate".
    fail_on: Mutex<Option<&'static str>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, operation: &'static str) {
        *self.fail_on.lock().unwrap() = Some(operation);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn rows(&self, table: TableId) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn insert(&self, table: TableId, mut row: Value) -> i64 {
        let id = self.allocate_id();
        row["id"] = Value::from(id);
        self.tables
            .lock()
            .unwrap()
            .entry(table)
            .or_default()
            .push(row);
        id
    }

    fn allocate_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }

    fn enter(&self, operation: &'static str) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(operation);
        match *self.fail_on.lock().unwrap() {
            Some(op) if op == operation => {
                Err(BackendError::Remote(format!("{operation} rejected")))
            }
            _ => Ok(()),
        }
    }
}

fn compare(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => a
            .as_str()
            .unwrap_or_default()
            .cmp(b.as_str().unwrap_or_default()),
    }
}

#[async_trait]
impl BackendApi for MemoryBackend {
    async fn table_page(&self, table: TableId, query: &PageQuery) -> Result<Page, BackendError> {
        self.enter("tablePage")?;
        let mut rows: Vec<Value> = self
            .rows(table)
            .into_iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|f| row.get(&f.name) == Some(&f.value))
            })
            .collect();

        if let Some(field) = &query.order_by_field {
            rows.sort_by(|a, b| {
                let ord = compare(&a[field.as_str()], &b[field.as_str()]);
                if query.is_asc {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }

        let virtual_count = rows.len() as u64;
        let skip = (query.page_no.saturating_sub(1) * query.page_size) as usize;
        let list = rows
            .into_iter()
            .skip(skip)
            .take(query.page_size as usize)
            .collect();
        Ok(Page {
            list,
            virtual_count,
        })
    }

    async fn table_create(&self, table: TableId, row: Value) -> Result<(), BackendError> {
        self.enter("tableCreate")?;
        self.insert(table, row);
        Ok(())
    }

    async fn table_update(&self, table: TableId, row: Value) -> Result<(), BackendError> {
        self.enter("tableUpdate")?;
        let id = row.get("id").cloned();
        let mut tables = self.tables.lock().unwrap();
        let existing = tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|r| r.get("id") == id.as_ref()))
            .ok_or_else(|| BackendError::Remote("record not found".to_string()))?;
        *existing = row;
        Ok(())
    }

    async fn table_delete(&self, table: TableId, id: i64) -> Result<(), BackendError> {
        self.enter("tableDelete")?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table).or_default();
        let before = rows.len();
        rows.retain(|r| r.get("id").and_then(Value::as_i64) != Some(id));
        if rows.len() == before {
            return Err(BackendError::Remote("record not found".to_string()));
        }
        Ok(())
    }

    async fn upload(&self, file: UploadFile) -> Result<FileRef, BackendError> {
        self.enter("upload")?;
        let mut files = self.files.lock().unwrap();
        files.push(file);
        Ok(FileRef(files.len() as i64))
    }

    fn file_url(&self, file: FileRef) -> String {
        format!("memory://file/{}", file.0)
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        self.enter("login")?;
        Ok(Session {
            token: format!("session-{}", credentials.email),
        })
    }

    async fn register(&self, _credentials: &Credentials) -> Result<(), BackendError> {
        self.enter("register")
    }

    async fn logout(&self, _session: &Session) -> Result<(), BackendError> {
        self.enter("logout")
    }

    async fn send_reset_password_email(&self, _email: &str) -> Result<(), BackendError> {
        self.enter("sendResetPwdEmail")
    }

    async fn reset_password(&self, _reset: &PasswordReset) -> Result<(), BackendError> {
        self.enter("resetPassword")
    }

    async fn current_user(&self, session: &Session) -> Result<UserInfo, BackendError> {
        self.enter("getUserInfo")?;
        let email = session
            .token
            .strip_prefix("session-")
            .ok_or_else(|| BackendError::Remote("invalid session".to_string()))?;
        Ok(UserInfo {
            id: 1,
            name: "Test User".to_string(),
            email: email.to_string(),
        })
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{
    BackendApi, BackendError, Credentials, Envelope, FileRef, Page, PageQuery, PasswordReset,
    Session, TableId, UploadFile, UserInfo,
};

const SESSION_HEADER: &str = "x-session-token";

/// `BackendApi` over HTTP. Each operation is `POST {base_url}/api/{operation}`
/// answering with the `{ data, error }` envelope. No retries: every failure is
/// terminal for the calling operation.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, operation: &str) -> String {
        format!("{}/api/{}", self.base_url, operation)
    }

    async fn call<B, T>(
        &self,
        operation: &'static str,
        body: &B,
        session: Option<&Session>,
    ) -> Result<Option<T>, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(self.endpoint(operation))
            .bearer_auth(&self.api_key)
            .json(body);
        if let Some(session) = session {
            request = request.header(SESSION_HEADER, &session.token);
        }

        let response = request.send().await?;
        decode_response(operation, response).await
    }
}

async fn decode_response<T: DeserializeOwned>(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<Option<T>, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("Backend operation '{operation}' returned {status}");
        // Prefer the envelope's own error message when the body carries one
        let message = serde_json::from_str::<Envelope<Value>>(&body)
            .ok()
            .and_then(|env| env.into_result().err())
            .map(|e| e.to_string())
            .unwrap_or_else(|| format!("status {status}: {body}"));
        return Err(BackendError::Remote(message));
    }

    let envelope: Envelope<T> = serde_json::from_str(&body)?;
    debug!("Backend operation '{operation}' succeeded");
    envelope.into_result()
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn table_page(&self, table: TableId, query: &PageQuery) -> Result<Page, BackendError> {
        let body = json!({ "table_id": table, "query": query });
        Ok(self
            .call::<_, Page>("tablePage", &body, None)
            .await?
            .unwrap_or_default())
    }

    async fn table_create(&self, table: TableId, row: Value) -> Result<(), BackendError> {
        let body = json!({ "table_id": table, "row": row });
        self.call::<_, Value>("tableCreate", &body, None).await?;
        Ok(())
    }

    async fn table_update(&self, table: TableId, row: Value) -> Result<(), BackendError> {
        let body = json!({ "table_id": table, "row": row });
        self.call::<_, Value>("tableUpdate", &body, None).await?;
        Ok(())
    }

    async fn table_delete(&self, table: TableId, id: i64) -> Result<(), BackendError> {
        let body = json!({ "table_id": table, "row": { "ID": id } });
        self.call::<_, Value>("tableDelete", &body, None).await?;
        Ok(())
    }

    async fn upload(&self, file: UploadFile) -> Result<FileRef, BackendError> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new()
            .text("filename", file.filename)
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        decode_response::<FileRef>("upload", response)
            .await?
            .ok_or(BackendError::EmptyData("upload"))
    }

    fn file_url(&self, file: FileRef) -> String {
        format!("{}/api/file/{}", self.base_url, file.0)
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        self.call::<_, Session>("login", credentials, None)
            .await?
            .ok_or(BackendError::EmptyData("login"))
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), BackendError> {
        self.call::<_, Value>("register", credentials, None).await?;
        Ok(())
    }

    async fn logout(&self, session: &Session) -> Result<(), BackendError> {
        self.call::<_, Value>("logout", &json!({}), Some(session))
            .await?;
        Ok(())
    }

    async fn send_reset_password_email(&self, email: &str) -> Result<(), BackendError> {
        self.call::<_, Value>("sendResetPwdEmail", &json!({ "email": email }), None)
            .await?;
        Ok(())
    }

    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), BackendError> {
        self.call::<_, Value>("resetPassword", reset, None).await?;
        Ok(())
    }

    async fn current_user(&self, session: &Session) -> Result<UserInfo, BackendError> {
        self.call::<_, UserInfo>("getUserInfo", &json!({}), Some(session))
            .await?
            .ok_or(BackendError::EmptyData("getUserInfo"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HttpBackend {
        HttpBackend::new(
            "https://backend.example.com/",
            "key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        assert_eq!(
            backend().endpoint("tablePage"),
            "https://backend.example.com/api/tablePage"
        );
    }

    #[test]
    fn test_file_url_embeds_reference() {
        assert_eq!(
            backend().file_url(FileRef(991)),
            "https://backend.example.com/api/file/991"
        );
    }
}

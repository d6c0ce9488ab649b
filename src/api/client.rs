use super::session::Session;
use crate::db::users::User;
use crate::libs::client::ClientRecord;
use crate::libs::entry::{EntryWithDuration, WorkEntry};
use crate::libs::messages::Message;
use crate::libs::period::PeriodKind;
use crate::msg_error_anyhow;
use crate::server::handlers::auth::AuthResponse;
use crate::server::handlers::reports::{InvoicePreview, SummaryResponse};
use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// HTTP client for the REST backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attaches the token of `session`, if any.
    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.token = session.map(|s| s.token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn health(&self) -> Result<Value> {
        self.send(self.request(Method::GET, "/health")).await
    }

    pub async fn signup(&self, first_name: &str, last_name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let body = json!({
            "firstName": first_name,
            "lastName": last_name,
            "email": email,
            "password": password,
        });
        self.send(self.request(Method::POST, "/auth/signup").json(&body)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = json!({ "email": email, "password": password });
        self.send(self.request(Method::POST, "/auth/login").json(&body)).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.send_empty(self.request(Method::POST, "/auth/logout")).await
    }

    pub async fn me(&self) -> Result<User> {
        self.send(self.request(Method::GET, "/users/me")).await
    }

    pub async fn list_entries(&self) -> Result<Vec<EntryWithDuration>> {
        self.send(self.request(Method::GET, "/work-entries")).await
    }

    /// Creates `entry` on the server. The server assigns the id and owner.
    pub async fn create_entry(&self, entry: &WorkEntry) -> Result<EntryWithDuration> {
        self.send(self.request(Method::POST, "/work-entries").json(entry)).await
    }

    pub async fn update_entry(&self, id: &str, patch: &Value) -> Result<EntryWithDuration> {
        self.send(self.request(Method::PUT, &format!("/work-entries/{}", id)).json(patch)).await
    }

    pub async fn delete_entry(&self, id: &str) -> Result<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/work-entries/{}", id))).await
    }

    pub async fn list_clients(&self) -> Result<Vec<ClientRecord>> {
        self.send(self.request(Method::GET, "/clients")).await
    }

    pub async fn create_client(&self, payload: &Value) -> Result<ClientRecord> {
        self.send(self.request(Method::POST, "/clients").json(payload)).await
    }

    pub async fn list_categories(&self) -> Result<Vec<String>> {
        self.send(self.request(Method::GET, "/categories")).await
    }

    pub async fn invoice_preview(&self, from: Option<&str>, to: Option<&str>, hourly_rate: Option<f64>) -> Result<InvoicePreview> {
        let body = json!({ "from": from, "to": to, "hourlyRate": hourly_rate });
        self.send(self.request(Method::POST, "/invoice-preview").json(&body)).await
    }

    pub async fn summary(
        &self,
        period: Option<PeriodKind>,
        reference: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
        hourly_rate: Option<f64>,
    ) -> Result<SummaryResponse> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(period) = period {
            let value = serde_json::to_value(period)?;
            query.push(("period", value.as_str().unwrap_or_default().to_string()));
        }
        for (key, value) in [("reference", reference), ("from", from), ("to", to)] {
            if let Some(value) = value {
                query.push((key, value.to_string()));
            }
        }
        if let Some(rate) = hourly_rate {
            query.push(("hourlyRate", rate.to_string()));
        }
        self.send(self.request(Method::GET, "/summary").query(&query)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let res = Self::checked(request.send().await?).await?;
        Ok(res.json::<T>().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        Self::checked(request.send().await?).await?;
        Ok(())
    }

    /// Passes successful responses through. Failures become errors carrying
    /// the server's `error` message, or the bare status.
    async fn checked(res: Response) -> Result<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let detail = res
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        tracing::debug!(status = status.as_u16(), error = %detail, "API request failed");
        Err(msg_error_anyhow!(Message::ApiRequestFailed(detail)))
    }
}

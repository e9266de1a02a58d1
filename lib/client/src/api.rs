//! The blocking HTTP wrapper shared by all entity clients.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use plantlab_core::{Error, Record};

use crate::config::Context;

/// One connection to a PlantLab API server: base URL plus an optional
/// bearer token baked into the default headers.
#[derive(Debug, Clone)]
pub struct Api {
    http: Client,
    base_url: String,
}

impl Api {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let value = format!("Bearer {token}");
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&value)
                    .map_err(|e| Error::Config(format!("invalid token: {e}")))?,
            );
        }

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Api {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build an `Api` from a configured context.
    pub fn from_context(ctx: &Context) -> Result<Self, Error> {
        if ctx.server.is_empty() {
            return Err(Error::Config(format!(
                "no server URL set for context \"{}\". Run `plantlab context set {} --server <url>`.",
                ctx.name, ctx.name
            )));
        }
        let token = (!ctx.token.is_empty()).then_some(ctx.token.as_str());
        Self::new(&ctx.server, token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path and parse the JSON body.
    pub fn get_json(&self, path: &str) -> Result<Value, Error> {
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;
        check(resp)
    }

    /// GET a full record list (the API returns rows newest first).
    pub fn list(&self, path: &str) -> Result<Vec<Record>, Error> {
        let body = self.get_json(path)?;
        serde_json::from_value(body)
            .map_err(|e| Error::Transport(format!("unexpected list body: {e}")))
    }

    /// POST a new row.
    pub fn create(&self, path: &str, payload: &Value) -> Result<Value, Error> {
        let resp = self
            .http
            .post(self.url(path))
            .json(payload)
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;
        check(resp)
    }

    /// PUT an existing row by id.
    pub fn update(&self, path: &str, id: i64, payload: &Value) -> Result<Value, Error> {
        let resp = self
            .http
            .put(format!("{}/{}", self.url(path), id))
            .json(payload)
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;
        check(resp)
    }

    /// DELETE a row by id.
    pub fn delete(&self, path: &str, id: i64) -> Result<(), Error> {
        let resp = self
            .http
            .delete(format!("{}/{}", self.url(path), id))
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;
        check(resp).map(|_| ())
    }

    /// POST credentials to `/auth/login`, returning the bearer token.
    pub fn login(&self, username: &str, password: &str) -> Result<String, Error> {
        let body = serde_json::json!({ "username": username, "password": password });
        let data = self.create("/auth/login", &body)?;
        data["access_token"]
            .as_str()
            .or_else(|| data["token"].as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::Transport("no access token in login response".to_string()))
    }

    /// Server reachability probe.
    pub fn health(&self) -> Result<(), Error> {
        self.get_json("/health").map(|_| ())
    }
}

/// Turn a response into its JSON body, mapping non-2xx statuses to
/// `Error::Api` with the server's own `message` when it sent one.
fn check(resp: Response) -> Result<Value, Error> {
    let status = resp.status();
    let body: Value = match resp.json() {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(%status, error = %e, "response body is not JSON");
            Value::Null
        }
    };
    if status.is_success() {
        return Ok(body);
    }
    let message = body["message"]
        .as_str()
        .or_else(|| body["error"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    Err(Error::Api { status: status.as_u16(), message })
}

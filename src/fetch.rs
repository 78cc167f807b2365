//! HTTP request builder used by every resource client

use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, RETRY_AFTER},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::messages::{self, StatusMessages};

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    messages: StatusMessages,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: None,
            messages: messages::GENERIC,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Append one query parameter
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Messages used when the endpoint answers 404/401/500
    pub fn messages(mut self, messages: StatusMessages) -> Self {
        self.messages = messages;
        self
    }

    fn build(&self) -> Result<RequestBuilder> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        debug!("{} {}", self.method, url);

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    async fn send(&self) -> Result<Response> {
        let req = self.build()?;
        Ok(req.send().await?)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &self.messages).await);
        }

        Ok(response.json::<T>().await?)
    }

    /// Like [`execute`](Self::execute), but a 404 is an empty result
    pub async fn execute_optional<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let response = self.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response, &self.messages).await);
        }

        Ok(Some(response.json::<T>().await?))
    }

    /// Execute the request and ignore any response body
    pub async fn execute_empty(&self) -> Result<()> {
        let response = self.send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &self.messages).await);
        }

        Ok(())
    }
}

/// Turn a non-success response into the matching error variant.
pub(crate) async fn error_from_response(response: Response, messages: &StatusMessages) -> Error {
    let status = response.status();

    if status != StatusCode::TOO_MANY_REQUESTS {
        debug!("request failed with status {}", status);
        return messages.error_for(status);
    }

    let header_hint = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let body_hint = match response.text().await {
        Ok(text) => retry_after_from_body(&text),
        Err(_) => None,
    };

    let retry_after = body_hint.or(header_hint);
    Error::RateLimited {
        message: messages::rate_limited(retry_after),
        retry_after,
    }
}

/// The API puts `retry_after` either at the top level or inside `error`.
fn retry_after_from_body(text: &str) -> Option<u64> {
    let value: Value = serde_json::from_str(text).ok()?;
    value
        .get("retry_after")
        .or_else(|| value.get("error").and_then(|e| e.get("retry_after")))
        .and_then(Value::as_u64)
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PATCH request
    pub fn patch<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PATCH)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}

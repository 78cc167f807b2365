//! Shared HTTP plumbing for the resource clients

use reqwest::Client;
use std::sync::Arc;

use crate::auth::SessionStore;
use crate::config::{ClientConfig, ClientOptions};
use crate::error::Result;
use crate::fetch::{Fetch, FetchBuilder};
use crate::messages::StatusMessages;

/// Configuration, HTTP client and session shared by every resource client.
///
/// Cloning is cheap; all clones see the same session.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    http_client: Client,
    sessions: SessionStore,
}

impl ApiClient {
    pub fn new(config: ClientConfig, sessions: SessionStore) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
            sessions,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.config.options
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn url(&self, path: &str) -> Result<String> {
        Ok(self.config.endpoint(path)?.to_string())
    }

    fn prepare<'a>(
        &'a self,
        builder: FetchBuilder<'a>,
        messages: StatusMessages,
    ) -> FetchBuilder<'a> {
        let builder = builder
            .header("X-Client-Info", &self.config.options.client_info)
            .messages(messages);

        match self.sessions.access_token() {
            Some(token) => builder.bearer_auth(&token),
            None => builder,
        }
    }

    pub fn get(&self, path: &str, messages: StatusMessages) -> Result<FetchBuilder<'_>> {
        let url = self.url(path)?;
        Ok(self.prepare(Fetch::get(&self.http_client, &url), messages))
    }

    pub fn post(&self, path: &str, messages: StatusMessages) -> Result<FetchBuilder<'_>> {
        let url = self.url(path)?;
        Ok(self.prepare(Fetch::post(&self.http_client, &url), messages))
    }

    pub fn patch(&self, path: &str, messages: StatusMessages) -> Result<FetchBuilder<'_>> {
        let url = self.url(path)?;
        Ok(self.prepare(Fetch::patch(&self.http_client, &url), messages))
    }

    pub fn delete(&self, path: &str, messages: StatusMessages) -> Result<FetchBuilder<'_>> {
        let url = self.url(path)?;
        Ok(self.prepare(Fetch::delete(&self.http_client, &url), messages))
    }
}

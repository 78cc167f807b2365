//! The user's profile record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::Result;
use crate::messages;

/// One per authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ProfileClient {
    api: ApiClient,
}

impl ProfileClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<Profile> {
        self.api
            .get("/api/v1/profile", messages::PROFILE)?
            .execute::<Profile>()
            .await
    }
}

//! Calorie Tracker Rust Client Library
//!
//! A client for the calorie tracker API: authentication, meals, daily
//! progress, calorie goals and AI calorie estimation, plus the view-state
//! controllers (dashboard, day details, settings) built on top of them.

pub mod auth;
pub mod client;
pub mod config;
pub mod controllers;
pub mod error;
pub mod fetch;
pub mod format;
pub mod generations;
pub mod goals;
pub mod meals;
pub mod messages;
pub mod preferences;
pub mod profile;
pub mod progress;
pub mod storage;
pub mod types;

use chrono::NaiveDate;
use std::sync::Arc;

use crate::auth::{AuthClient, SessionStore};
use crate::client::ApiClient;
use crate::config::{ClientConfig, ClientOptions};
use crate::controllers::{DashboardController, DayDetailsController, SettingsController};
use crate::error::Result;
use crate::generations::GenerationsClient;
use crate::goals::GoalsClient;
use crate::meals::MealsClient;
use crate::preferences::Preferences;
use crate::profile::ProfileClient;
use crate::progress::ProgressClient;
use crate::storage::{MemoryStore, SharedStore};

/// The main entry point for the calorie tracker client
#[derive(Clone)]
pub struct CalorieTracker {
    api: ApiClient,
    store: SharedStore,
}

impl CalorieTracker {
    /// Create a client whose session lives only in memory
    ///
    /// # Example
    ///
    /// ```
    /// use calorie_tracker::CalorieTracker;
    ///
    /// let tracker = CalorieTracker::new("http://localhost:4321").unwrap();
    /// assert!(!tracker.auth().is_logged_in());
    /// ```
    pub fn new(url: &str) -> Result<Self> {
        Self::with_store(ClientConfig::new(url)?, Arc::new(MemoryStore::new()))
    }

    /// Create a client with custom options
    pub fn new_with_options(url: &str, options: ClientOptions) -> Result<Self> {
        let config = ClientConfig::new(url)?.with_options(options);
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Create a client over a persistent store; the saved session, if any,
    /// is read now.
    pub fn with_store(config: ClientConfig, store: SharedStore) -> Result<Self> {
        let sessions = SessionStore::load(store.clone())?;
        let api = ApiClient::new(config, sessions)?;
        Ok(Self { api, store })
    }

    pub fn options(&self) -> &ClientOptions {
        self.api.options()
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.api.clone())
    }

    pub fn meals(&self) -> MealsClient {
        MealsClient::new(self.api.clone())
    }

    pub fn progress(&self) -> ProgressClient {
        ProgressClient::new(self.api.clone())
    }

    pub fn goals(&self) -> GoalsClient {
        GoalsClient::new(self.api.clone())
    }

    pub fn profile(&self) -> ProfileClient {
        ProfileClient::new(self.api.clone())
    }

    pub fn generations(&self) -> GenerationsClient {
        GenerationsClient::new(self.api.clone())
    }

    /// UI preferences as currently stored
    pub fn preferences(&self) -> Result<Preferences> {
        Preferences::load(self.store.clone())
    }

    pub fn dashboard(&self) -> DashboardController {
        DashboardController::new(self.progress(), self.options().page_size)
    }

    pub fn day_details(&self, date: NaiveDate) -> DayDetailsController {
        DayDetailsController::new(
            date,
            self.progress(),
            self.meals(),
            self.options().meals_page_size,
        )
    }

    pub fn settings(&self) -> SettingsController {
        SettingsController::new(self.profile(), self.goals(), self.auth())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::{ClientConfig, ClientOptions};
    pub use crate::controllers::Route;
    pub use crate::error::Error;
    pub use crate::meals::{Meal, MealCategory, NewMeal};
    pub use crate::progress::{DailyProgressEntry, ProgressStatus};
    pub use crate::CalorieTracker;
}

//! Daily progress: calories consumed per day against the goal

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::messages;
use crate::types::{ListResponse, PageRequest};

/// How a day's intake compares to the goal. Computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Under,
    OnTrack,
    Over,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Under => "under",
            ProgressStatus::OnTrack => "on_track",
            ProgressStatus::Over => "over",
        }
    }
}

/// One calendar day of one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgressEntry {
    pub date: NaiveDate,
    pub total_calories: i32,
    pub calorie_goal: i32,
    pub status: ProgressStatus,
}

impl DailyProgressEntry {
    /// Consumed share of the goal, in percent
    pub fn percentage(&self) -> f64 {
        if self.calorie_goal <= 0 {
            return 0.0;
        }
        f64::from(self.total_calories) * 100.0 / f64::from(self.calorie_goal)
    }

    /// Calories left before reaching the goal; negative when over
    pub fn remaining(&self) -> i32 {
        self.calorie_goal - self.total_calories
    }
}

/// Aggregate of the seven days ending at `end`
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days_logged: usize,
    pub total_calories: i64,
    pub average_calories: i32,
    pub days_over: usize,
    pub days_on_track: usize,
}

impl WeekSummary {
    pub fn from_entries<'a, I>(entries: I, end: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a DailyProgressEntry>,
    {
        let start = end - Duration::days(6);
        let in_week: Vec<_> = entries
            .into_iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect();

        let total_calories: i64 = in_week.iter().map(|e| i64::from(e.total_calories)).sum();
        let days_logged = in_week.len();
        let average_calories = if days_logged == 0 {
            0
        } else {
            (total_calories / days_logged as i64) as i32
        };

        Self {
            start,
            end,
            days_logged,
            total_calories,
            average_calories,
            days_over: in_week
                .iter()
                .filter(|e| e.status == ProgressStatus::Over)
                .count(),
            days_on_track: in_week
                .iter()
                .filter(|e| e.status == ProgressStatus::OnTrack)
                .count(),
        }
    }
}

/// Client for `/api/v1/daily-progress`
#[derive(Clone)]
pub struct ProgressClient {
    api: ApiClient,
}

impl ProgressClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// One page of entries, newest first
    pub async fn list(&self, page: PageRequest) -> Result<Vec<DailyProgressEntry>> {
        let response = self
            .api
            .get("/api/v1/daily-progress", messages::DAILY_PROGRESS_LIST)?
            .query("limit", page.limit)
            .query("offset", page.offset)
            .execute::<ListResponse<DailyProgressEntry>>()
            .await?;
        Ok(response.into_inner())
    }

    pub async fn get(&self, date: NaiveDate) -> Result<DailyProgressEntry> {
        let path = format!("/api/v1/daily-progress/{}", date.format("%Y-%m-%d"));
        self.api
            .get(&path, messages::DAILY_PROGRESS)?
            .execute::<DailyProgressEntry>()
            .await
    }
}

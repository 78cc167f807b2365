//! Daily calorie goal

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::Result;
use crate::messages;

/// The goal in force. A changed goal takes effect the next day, so past days
/// keep the goal they were logged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieGoal {
    pub id: Uuid,
    pub daily_goal: i32,
    pub effective_from: NaiveDate,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `POST /api/v1/calorie-goals`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewCalorieGoal {
    #[validate(range(min = 500, max = 10000, message = "Cel musi być w zakresie 500-10000 kcal"))]
    pub daily_goal: i32,
}

impl NewCalorieGoal {
    pub fn new(daily_goal: i32) -> Self {
        Self { daily_goal }
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}

/// Client for `/api/v1/calorie-goals`
#[derive(Clone)]
pub struct GoalsClient {
    api: ApiClient,
}

impl GoalsClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The current goal; `None` when the user never set one
    pub async fn current(&self) -> Result<Option<CalorieGoal>> {
        self.api
            .get("/api/v1/calorie-goals/current", messages::CALORIE_GOAL)?
            .execute_optional::<CalorieGoal>()
            .await
    }

    pub async fn set(&self, goal: &NewCalorieGoal) -> Result<CalorieGoal> {
        goal.check()?;

        self.api
            .post("/api/v1/calorie-goals", messages::CALORIE_GOAL)?
            .json(goal)?
            .execute::<CalorieGoal>()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn goal_range_is_enforced() {
        assert!(NewCalorieGoal::new(2000).check().is_ok());
        match NewCalorieGoal::new(100).check() {
            Err(Error::Validation(msg)) => assert!(msg.contains("500-10000")),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn created_at_is_optional() {
        let goal: CalorieGoal = serde_json::from_value(serde_json::json!({
            "id": "5f0c7c8e-9d0f-4f6a-8a53-3e1b2f0a9b11",
            "daily_goal": 2200,
            "effective_from": "2024-05-08"
        }))
        .unwrap();
        assert_eq!(goal.daily_goal, 2200);
        assert!(goal.created_at.is_none());
    }
}

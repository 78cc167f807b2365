//! AI-assisted calorie estimation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::Result;
use crate::meals::{InputMethod, MealCategory, NewMeal};
use crate::messages;

/// `POST /api/v1/ai-generations`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct GenerationRequest {
    #[validate(length(min = 3, max = 500, message = "Opis musi mieć od 3 do 500 znaków"))]
    pub description: String,
}

impl GenerationRequest {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Completed,
    Failed,
}

/// Result of one estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiGeneration {
    pub id: Uuid,
    pub prompt: String,
    pub generated_calories: Option<i32>,

    #[serde(default)]
    pub assumptions: Option<String>,

    pub status: GenerationStatus,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl AiGeneration {
    /// Prefill a meal form from a completed estimation.
    ///
    /// Returns `None` when the estimation produced no calorie value.
    pub fn to_meal_draft(
        &self,
        category: MealCategory,
        meal_timestamp: DateTime<Utc>,
    ) -> Option<NewMeal> {
        if self.status != GenerationStatus::Completed {
            return None;
        }
        let calories = self.generated_calories?;

        Some(NewMeal {
            description: self.prompt.clone(),
            calories,
            category,
            meal_timestamp,
            input_method: InputMethod::Ai,
            ai_generation_id: Some(self.id),
        })
    }
}

#[derive(Clone)]
pub struct GenerationsClient {
    api: ApiClient,
}

impl GenerationsClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ask the backend to estimate the calories of a described meal.
    ///
    /// A 429 comes back as [`Error::RateLimited`](crate::error::Error::RateLimited).
    pub async fn estimate(&self, request: &GenerationRequest) -> Result<AiGeneration> {
        request.validate()?;

        self.api
            .post("/api/v1/ai-generations", messages::AI_GENERATION)?
            .json(request)?
            .execute::<AiGeneration>()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation(status: GenerationStatus, calories: Option<i32>) -> AiGeneration {
        AiGeneration {
            id: Uuid::new_v4(),
            prompt: "Dwie kanapki z serem".to_string(),
            generated_calories: calories,
            assumptions: None,
            status,
            error_message: None,
        }
    }

    #[test]
    fn completed_generation_becomes_ai_meal() {
        let gen = generation(GenerationStatus::Completed, Some(520));
        let draft = gen
            .to_meal_draft(MealCategory::Breakfast, Utc::now())
            .unwrap();
        assert_eq!(draft.calories, 520);
        assert_eq!(draft.input_method, InputMethod::Ai);
        assert_eq!(draft.ai_generation_id, Some(gen.id));
    }

    #[test]
    fn failed_generation_has_no_draft() {
        let gen = generation(GenerationStatus::Failed, Some(520));
        assert!(gen.to_meal_draft(MealCategory::Other, Utc::now()).is_none());
        let gen = generation(GenerationStatus::Completed, None);
        assert!(gen.to_meal_draft(MealCategory::Other, Utc::now()).is_none());
    }

    #[test]
    fn request_is_validated() {
        assert!(GenerationRequest::new(" a ").validate().is_err());
        assert!(GenerationRequest::new("jajecznica z trzech jaj").validate().is_ok());
    }
}

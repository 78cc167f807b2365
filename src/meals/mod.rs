//! Meal CRUD through `/api/v1/meals`

mod types;

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::messages;
use crate::types::ListResponse;

pub use types::*;

/// Client for meal operations
#[derive(Clone)]
pub struct MealsClient {
    api: ApiClient,
}

impl MealsClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List meals, optionally restricted to one day.
    ///
    /// The backend never returns more than `query.limit` rows; anything past
    /// the window is truncated here as well.
    pub async fn list(&self, query: MealQuery) -> Result<Vec<Meal>> {
        let mut request = self
            .api
            .get("/api/v1/meals", messages::MEALS_LIST)?
            .query("limit", query.limit)
            .query("offset", query.offset);
        if let Some(date) = query.date {
            request = request.query("date", date.format("%Y-%m-%d"));
        }

        let mut meals = request.execute::<ListResponse<Meal>>().await?.into_inner();
        meals.truncate(query.limit as usize);
        Ok(meals)
    }

    pub async fn get(&self, id: Uuid) -> Result<Meal> {
        self.api
            .get(&format!("/api/v1/meals/{}", id), messages::MEAL)?
            .execute::<Meal>()
            .await
    }

    pub async fn create(&self, meal: &NewMeal) -> Result<Meal> {
        meal.check()?;

        self.api
            .post("/api/v1/meals", messages::MEAL)?
            .json(meal)?
            .execute::<Meal>()
            .await
    }

    pub async fn update(&self, id: Uuid, update: &MealUpdate) -> Result<Meal> {
        if update.is_empty() {
            return Err(Error::validation("Brak zmian do zapisania"));
        }
        update.check()?;

        self.api
            .patch(&format!("/api/v1/meals/{}", id), messages::MEAL)?
            .json(update)?
            .execute::<Meal>()
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.api
            .delete(&format!("/api/v1/meals/{}", id), messages::MEAL)?
            .execute_empty()
            .await
    }
}

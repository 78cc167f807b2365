//! Types for meals

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;

/// Meal category; a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Other,
}

impl MealCategory {
    pub const ALL: [MealCategory; 5] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
        MealCategory::Snack,
        MealCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "breakfast",
            MealCategory::Lunch => "lunch",
            MealCategory::Dinner => "dinner",
            MealCategory::Snack => "snack",
            MealCategory::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// How the calorie value was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    #[default]
    Manual,
    Ai,
}

/// A logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub description: String,
    pub calories: i32,
    pub category: MealCategory,
    pub meal_timestamp: DateTime<Utc>,

    #[serde(default)]
    pub input_method: InputMethod,

    #[serde(default)]
    pub ai_generation_id: Option<Uuid>,
}

impl Meal {
    /// The calendar day the meal belongs to
    pub fn day(&self) -> NaiveDate {
        self.meal_timestamp.date_naive()
    }
}

/// `POST /api/v1/meals`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewMeal {
    #[validate(length(min = 1, max = 500, message = "Opis musi mieć od 1 do 500 znaków"))]
    pub description: String,

    #[validate(range(min = 1, max = 10000, message = "Kalorie muszą być w zakresie 1-10000"))]
    pub calories: i32,

    pub category: MealCategory,
    pub meal_timestamp: DateTime<Utc>,
    pub input_method: InputMethod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_generation_id: Option<Uuid>,
}

impl NewMeal {
    pub fn manual(
        description: &str,
        calories: i32,
        category: MealCategory,
        meal_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            description: description.trim().to_string(),
            calories,
            category,
            meal_timestamp,
            input_method: InputMethod::Manual,
            ai_generation_id: None,
        }
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}

/// `PATCH /api/v1/meals/{id}`; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct MealUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 500, message = "Opis musi mieć od 1 do 500 znaków"))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10000, message = "Kalorie muszą być w zakresie 1-10000"))]
    pub calories: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MealCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_timestamp: Option<DateTime<Utc>>,
}

impl MealUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.calories.is_none()
            && self.category.is_none()
            && self.meal_timestamp.is_none()
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}

/// Query for `GET /api/v1/meals`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealQuery {
    pub date: Option<NaiveDate>,
    pub limit: u32,
    pub offset: u32,
}

impl MealQuery {
    /// First page of the meals of one day
    pub fn for_day(date: NaiveDate, limit: u32) -> Self {
        Self {
            date: Some(date),
            limit,
            offset: 0,
        }
    }
}

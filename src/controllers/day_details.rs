//! One day's progress and meals, with delete and edit selection

use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::error::Result;
use crate::meals::{Meal, MealQuery, MealsClient};
use crate::progress::{DailyProgressEntry, ProgressClient};

#[derive(Debug, Clone)]
pub struct DayDetailsState {
    pub date: NaiveDate,
    pub progress: Option<DailyProgressEntry>,
    pub meals: Vec<Meal>,
    pub loading: bool,
    pub error: Option<String>,

    /// Meal whose delete request is in flight
    pub deleting_meal_id: Option<Uuid>,

    /// Meal open in the edit form
    pub editing_meal: Option<Meal>,

    generation: u64,
}

impl DayDetailsState {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            progress: None,
            meals: Vec::new(),
            loading: false,
            error: None,
            deleting_meal_id: None,
            editing_meal: None,
            generation: 0,
        }
    }

    pub fn total_calories(&self) -> i32 {
        self.meals.iter().map(|m| m.calories).sum()
    }
}

pub struct DayDetailsController {
    progress: ProgressClient,
    meals: MealsClient,
    meals_page_size: u32,
    state: Mutex<DayDetailsState>,
}

impl DayDetailsController {
    pub fn new(
        date: NaiveDate,
        progress: ProgressClient,
        meals: MealsClient,
        meals_page_size: u32,
    ) -> Self {
        Self {
            progress,
            meals,
            meals_page_size: meals_page_size.max(1),
            state: Mutex::new(DayDetailsState::new(date)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DayDetailsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> DayDetailsState {
        self.lock().clone()
    }

    pub fn date(&self) -> NaiveDate {
        self.lock().date
    }

    /// Both requests run concurrently; the state only changes once both
    /// have answered, and an error from either fails the whole load.
    async fn fetch_day(&self, date: NaiveDate) -> Result<(DailyProgressEntry, Vec<Meal>)> {
        tokio::try_join!(
            self.progress.get(date),
            self.meals.list(MealQuery::for_day(date, self.meals_page_size)),
        )
    }

    /// Start a reload; returns the generation and date it belongs to
    fn begin(&self, show_loading: bool) -> (u64, NaiveDate) {
        let mut state = self.lock();
        state.generation += 1;
        if show_loading {
            state.loading = true;
            state.error = None;
        }
        (state.generation, state.date)
    }

    pub async fn load_day_data(&self) {
        let (generation, date) = self.begin(true);

        let result = self.fetch_day(date).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!("dropping stale day data for {}", date);
            return;
        }
        state.loading = false;
        match result {
            Ok((progress, meals)) => {
                state.progress = Some(progress);
                state.meals = meals;
            }
            Err(e) => {
                warn!("loading day {} failed: {}", date, e);
                state.error = Some(e.user_message());
            }
        }
    }

    /// Same reload as [`load_day_data`](Self::load_day_data) without the
    /// spinner; failures are logged and the last good data stays.
    pub async fn refresh_after_meal_change(&self) {
        let (generation, date) = self.begin(false);

        let result = self.fetch_day(date).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!("dropping stale silent refresh for {}", date);
            return;
        }
        match result {
            Ok((progress, meals)) => {
                state.progress = Some(progress);
                state.meals = meals;
            }
            Err(e) => warn!("silent refresh of {} failed: {}", date, e),
        }
    }

    /// Delete a meal, then reload the day from the server.
    ///
    /// The meal stays in the list until the reload confirms it is gone.
    pub async fn delete_meal(&self, id: Uuid) {
        {
            let mut state = self.lock();
            state.deleting_meal_id = Some(id);
            state.error = None;
        }

        match self.meals.delete(id).await {
            Ok(()) => {
                info!("deleted meal {}", id);
                self.load_day_data().await;
                let mut state = self.lock();
                if state.editing_meal.as_ref().map(|m| m.id) == Some(id) {
                    state.editing_meal = None;
                }
                clear_deleting(&mut state, id);
            }
            Err(e) => {
                warn!("deleting meal {} failed: {}", id, e);
                let mut state = self.lock();
                clear_deleting(&mut state, id);
                state.error = Some(e.user_message());
            }
        }
    }

    pub fn set_editing_meal(&self, meal: Option<Meal>) {
        self.lock().editing_meal = meal;
    }

    /// Switch to another day and load it
    pub async fn show_date(&self, date: NaiveDate) {
        {
            let mut state = self.lock();
            let generation = state.generation;
            *state = DayDetailsState::new(date);
            state.generation = generation;
        }
        self.load_day_data().await;
    }
}

fn clear_deleting(state: &mut DayDetailsState, id: Uuid) {
    // A second delete may have started meanwhile.
    if state.deleting_meal_id == Some(id) {
        state.deleting_meal_id = None;
    }
}

//! Settings view: profile, calorie goal, account email, and logout

use chrono::Utc;
use log::{debug, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Route;
use crate::auth::AuthClient;
use crate::goals::{CalorieGoal, GoalsClient, NewCalorieGoal};
use crate::profile::{Profile, ProfileClient};

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub profile: Option<Profile>,

    /// `None` until the user sets a goal
    pub current_goal: Option<CalorieGoal>,

    /// A saved goal that starts on a later day
    pub scheduled_goal: Option<CalorieGoal>,

    pub email: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub edit_goal_dialog_open: bool,
    pub logout_dialog_open: bool,
    pub saving_goal: bool,
    pub logging_out: bool,
    generation: u64,
}

pub struct SettingsController {
    profile: ProfileClient,
    goals: GoalsClient,
    auth: AuthClient,
    state: Mutex<SettingsState>,
}

impl SettingsController {
    pub fn new(profile: ProfileClient, goals: GoalsClient, auth: AuthClient) -> Self {
        Self {
            profile,
            goals,
            auth,
            state: Mutex::new(SettingsState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SettingsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SettingsState {
        self.lock().clone()
    }

    /// Fetch profile, goal and email concurrently.
    ///
    /// A missing goal is a valid state, not an error.
    pub async fn load(&self) {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.generation
        };

        let result = tokio::try_join!(
            self.profile.get(),
            self.goals.current(),
            self.auth.current_user(),
        );

        let mut state = self.lock();
        if state.generation != generation {
            debug!("dropping stale settings load");
            return;
        }
        state.loading = false;
        match result {
            Ok((profile, goal, user)) => {
                state.profile = Some(profile);
                state.current_goal = goal;
                state.email = user.email;
            }
            Err(e) => {
                warn!("loading settings failed: {}", e);
                state.error = Some(e.user_message());
            }
        }
    }

    pub fn open_edit_goal_dialog(&self) {
        self.lock().edit_goal_dialog_open = true;
    }

    pub fn close_edit_goal_dialog(&self) {
        self.lock().edit_goal_dialog_open = false;
    }

    pub fn open_logout_dialog(&self) {
        self.lock().logout_dialog_open = true;
    }

    pub fn close_logout_dialog(&self) {
        self.lock().logout_dialog_open = false;
    }

    /// Save a new daily goal. On success the edit dialog closes; a goal that
    /// starts tomorrow is kept apart from the one in force today.
    pub async fn save_goal(&self, daily_goal: i32) {
        {
            let mut state = self.lock();
            state.saving_goal = true;
            state.error = None;
        }

        let result = self.goals.set(&NewCalorieGoal::new(daily_goal)).await;

        let mut state = self.lock();
        state.saving_goal = false;
        match result {
            Ok(goal) => {
                if goal.effective_from > Utc::now().date_naive() {
                    state.scheduled_goal = Some(goal);
                } else {
                    state.current_goal = Some(goal);
                    state.scheduled_goal = None;
                }
                state.edit_goal_dialog_open = false;
            }
            Err(e) => state.error = Some(e.user_message()),
        }
    }

    /// Sign out and leave the settings view. The local session is gone and
    /// the login route is returned even if the request failed.
    pub async fn logout(&self) -> Route {
        self.lock().logging_out = true;

        if let Err(e) = self.auth.logout().await {
            warn!("logout failed, leaving anyway: {}", e);
        }

        let mut state = self.lock();
        state.logging_out = false;
        state.logout_dialog_open = false;
        Route::Login
    }
}

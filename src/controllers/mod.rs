//! View-state controllers.
//!
//! Each controller owns its state behind a mutex that is never held across
//! a request, so methods take `&self` and may overlap. User-initiated
//! operations put their errors into the state; background reloads after a
//! meal change only log them.

mod dashboard;
mod day_details;
mod paginated;
mod settings;

pub use dashboard::*;
pub use day_details::*;
pub use paginated::{PageFetcher, PageState, PaginatedController};
pub use settings::*;

/// Where the view goes next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/auth/login",
        }
    }
}

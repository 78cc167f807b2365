//! User-facing messages and the per-endpoint status mapping.
//!
//! Controllers show these strings verbatim, so they are part of the public
//! behaviour of the crate.

use reqwest::StatusCode;

use crate::error::Error;

pub const UNAUTHORIZED: &str = "Brak autoryzacji. Zaloguj się ponownie.";
pub const SERVER_ERROR: &str = "Wystąpił błąd serwera. Spróbuj ponownie później.";
pub const NETWORK_ERROR: &str = "Nie udało się połączyć z serwerem. Sprawdź połączenie.";
pub const UNEXPECTED_ERROR: &str = "Wystąpił nieoczekiwany błąd. Spróbuj ponownie.";
pub const INVALID_INPUT: &str = "Nieprawidłowe dane formularza.";
pub const UNKNOWN_STATUS: &str = "Nieznany błąd";

/// Messages for the three statuses every endpoint maps explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMessages {
    pub not_found: &'static str,
    pub unauthorized: &'static str,
    pub server_error: &'static str,
}

impl StatusMessages {
    const fn with_not_found(not_found: &'static str) -> Self {
        Self {
            not_found,
            unauthorized: UNAUTHORIZED,
            server_error: SERVER_ERROR,
        }
    }

    /// Map a non-success status to an error.
    ///
    /// 404, 401 and 500 use the fixed messages; any other status falls back
    /// to its canonical status text. 429 is handled by the caller because it
    /// needs the response body.
    pub fn error_for(&self, status: StatusCode) -> Error {
        match status {
            StatusCode::NOT_FOUND => Error::NotFound(self.not_found.to_string()),
            StatusCode::UNAUTHORIZED => Error::Unauthorized(self.unauthorized.to_string()),
            StatusCode::INTERNAL_SERVER_ERROR => Error::Server(self.server_error.to_string()),
            other => Error::Status {
                status: other.as_u16(),
                message: other
                    .canonical_reason()
                    .unwrap_or(UNKNOWN_STATUS)
                    .to_string(),
            },
        }
    }
}

pub const GENERIC: StatusMessages = StatusMessages::with_not_found("Nie znaleziono zasobu");
pub const DAILY_PROGRESS_LIST: StatusMessages =
    StatusMessages::with_not_found("Nie znaleziono danych o postępach");
pub const DAILY_PROGRESS: StatusMessages =
    StatusMessages::with_not_found("Brak danych dla wybranego dnia");
pub const MEALS_LIST: StatusMessages = StatusMessages::with_not_found("Nie znaleziono posiłków");
pub const MEAL: StatusMessages = StatusMessages::with_not_found("Posiłek nie istnieje");
pub const PROFILE: StatusMessages = StatusMessages::with_not_found("Profil nie istnieje");
pub const CALORIE_GOAL: StatusMessages =
    StatusMessages::with_not_found("Nie ustawiono celu kalorycznego");
pub const AI_GENERATION: StatusMessages =
    StatusMessages::with_not_found("Nie znaleziono generacji");
pub const AUTH_USER: StatusMessages = StatusMessages::with_not_found("Użytkownik nie istnieje");

/// Login reports bad credentials instead of an expired session.
pub const LOGIN: StatusMessages = StatusMessages {
    not_found: "Użytkownik nie istnieje",
    unauthorized: "Nieprawidłowy email lub hasło",
    server_error: SERVER_ERROR,
};

pub fn rate_limited(retry_after: Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!("Przekroczono limit zapytań. Spróbuj ponownie za {} s.", secs),
        None => "Przekroczono limit zapytań. Spróbuj ponownie później.".to_string(),
    }
}

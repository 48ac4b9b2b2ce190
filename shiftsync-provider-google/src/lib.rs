//! Google Calendar backend for shiftsync.
//!
//! Credentials and sessions live under the user's config directory:
//!   ~/.config/shiftsync/google/app_config.toml
//!   ~/.config/shiftsync/google/session/{account}.toml

pub mod app_config;
pub mod auth;
pub mod calendar;
mod google_event;
pub mod session;

pub use app_config::AppConfig;
pub use auth::authenticate;
pub use calendar::GoogleCalendar;
pub use session::Session;

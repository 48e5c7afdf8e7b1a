//! API endpoint handlers.
//!
//! Each module corresponds to a dashboard screen. Handlers are thin: they
//! parse the request and delegate to `CoreState`.

pub mod dashboard;
pub mod health;
pub mod patients;
pub mod reports;

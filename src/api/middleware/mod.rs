//! API middleware stack.
//!
//! Only one layer today: the access log, which wraps every `/api` route.

pub mod access_log;

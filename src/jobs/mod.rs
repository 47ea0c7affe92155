//! One-shot maintenance jobs, selected by the first CLI argument.
//!
//! Jobs share the server's configuration and database bootstrap, run to
//! completion, and exit. Scheduling is left to cron or an equivalent.

pub mod digest;
pub mod remind;

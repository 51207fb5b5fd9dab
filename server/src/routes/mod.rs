//! Route handlers.
//!
//! - `health`: liveness
//! - `analyze`: analyse a page and return the roast report

pub mod analyze;
pub mod health;

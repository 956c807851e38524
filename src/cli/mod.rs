//! Terminal presentation: renders quotes and price series, runs fetches off
//! the interactive thread.

pub mod history;
pub mod quote;
pub mod setup;
pub mod ui;
pub mod worker;

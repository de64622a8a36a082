//! Library half of the `churn-etl` binary: configuration, logging and the
//! staged pipeline driver.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;

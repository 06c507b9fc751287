//! openFDA drug safety dashboard: fetch adverse-event reports, aggregate
//! them into views, and serve or print the result.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod signals;

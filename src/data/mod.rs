//! Data ingestion from openFDA and CSV export.

pub mod export;
pub mod openfda;
pub mod report;

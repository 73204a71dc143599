pub mod api;
pub mod calculators;
pub mod cli;
pub mod core;
pub mod error;
pub mod export;
pub mod form;
pub mod format;
pub mod logging;
pub mod report;

pub mod app;
pub mod cli;
pub mod core;
pub mod error;
pub mod report;

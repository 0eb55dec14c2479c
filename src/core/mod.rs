pub mod connection;
pub mod error;
pub mod filters;
pub mod parser;
pub mod ports;
pub mod stats;
pub mod timestamp;

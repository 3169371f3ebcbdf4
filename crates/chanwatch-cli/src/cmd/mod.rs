pub mod config;
pub mod search;

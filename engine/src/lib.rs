// Engine library root.

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod insights;
pub mod services;

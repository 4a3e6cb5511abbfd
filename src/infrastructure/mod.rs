pub mod config;
pub mod processors;
pub mod repositories;

pub mod allocator;
pub mod cli;
pub mod config;
pub mod data_paths;
pub mod logging;
pub mod quotes;
pub mod report;
pub mod universe;

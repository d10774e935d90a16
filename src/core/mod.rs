// src/core/mod.rs
//! Configuration and file system services shared by the sync and feed passes

pub mod config_manager;
pub mod fs_ops;

pub use config_manager::{ConfigManager, FeedConfig, ScraperConfig, SheetsConfig};
pub use fs_ops::FsOps;

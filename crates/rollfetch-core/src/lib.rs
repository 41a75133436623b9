pub mod catalog;
pub mod config;
pub mod downloader;
pub mod logging;
pub mod retry;
pub mod scheduler;
pub mod storage;

pub mod config;
pub mod logging;

pub mod discovery;
pub mod fetcher;
pub mod progress;
pub mod scheduler;
pub mod storage;
pub mod url_model;

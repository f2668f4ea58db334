pub mod config;
pub mod logging;

pub mod catalog;
pub mod collector;
pub mod fetcher;
pub mod hex_grid;
pub mod mod_file;
pub mod pipeline;
pub mod planner;
pub mod storage;
pub mod url_model;

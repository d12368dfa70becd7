pub mod config;
pub mod logging;

pub mod fetcher;
pub mod file_set;
pub mod locator;
pub mod pipeline;
pub mod rewriter;
pub mod scanner;

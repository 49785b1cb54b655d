pub mod config;
pub mod searcher;

pub use config::Config;
pub use searcher::{FilesSearcher, SearchParams, SearchReport};

// 分层架构模块
pub mod error;
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

// 重新导出主要类型
pub use error::SearchError;
pub use domain::{ArgsParser, SearchStrategy, SearchType, WalkOptions};
pub use application::{Config, FilesSearcher, SearchParams, SearchReport};
pub use infrastructure::{Logger, LoggerTrait};
pub use presentation::SearchSummary;

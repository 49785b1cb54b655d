pub mod args;
pub mod strategy;
pub mod file_walker;

pub use args::ArgsParser;
pub use strategy::{SearchStrategy, SearchType};
pub use file_walker::{collect_matches, WalkOptions, WalkOutcome};

pub mod display;

pub use display::{format_duration, SearchSummary};

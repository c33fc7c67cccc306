pub mod merge;
pub mod stats;

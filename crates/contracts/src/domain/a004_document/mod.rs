pub mod aggregate;
mod commands;

pub use commands::MergeSummary;

//! Dashboard view (P900): document + UI state -> render tree

pub mod dto;
pub mod render;
pub mod search;

pub use dto::{CardView, DashboardView, GroupView, NavEntryView, Segment, SectionView};
pub use render::{icon_src, render, RenderOutcome, UiState};

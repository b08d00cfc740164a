//! Card editor dialog
//!
//! - model.rs: favicon check
//! - view_model.rs: form state and commands
//! - view.rs: Leptos component (pure UI)

mod model;
mod view;
mod view_model;

pub use view::CardEditor;
pub use view_model::CardEditorViewModel;

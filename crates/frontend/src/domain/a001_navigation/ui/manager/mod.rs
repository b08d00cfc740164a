//! Navigation manager dialog
//!
//! - view_model.rs: form state and commands
//! - view.rs: Leptos component (pure UI)

mod view;
mod view_model;

pub use view::NavigationManager;
pub use view_model::NavigationManagerViewModel;

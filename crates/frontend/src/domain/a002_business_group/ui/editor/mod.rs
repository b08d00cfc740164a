//! Group editor dialog: create, rename, recolor, move and delete.

mod view;
mod view_model;

pub use view::GroupEditor;
pub use view_model::GroupEditorViewModel;

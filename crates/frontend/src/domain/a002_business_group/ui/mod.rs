pub mod editor;

pub use editor::GroupEditor;

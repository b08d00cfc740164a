pub mod title_editor;

pub use title_editor::TitleEditor;

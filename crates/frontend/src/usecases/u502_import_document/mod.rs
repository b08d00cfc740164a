mod view;

pub use view::ImportDocumentDialog;

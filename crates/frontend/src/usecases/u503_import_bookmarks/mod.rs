mod view;

pub use view::ImportBookmarksDialog;

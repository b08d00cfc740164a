pub mod common;
pub mod u501_export_document;
pub mod u502_import_document;
pub mod u503_import_bookmarks;

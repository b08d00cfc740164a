pub mod export;

pub use export::{export_document, export_filename};

use crate::usecases::common::UseCaseMetadata;

pub struct ExportDocument;

impl UseCaseMetadata for ExportDocument {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "export_document"
    }

    fn display_name() -> &'static str {
        "Export data"
    }

    fn description() -> &'static str {
        "Download navigation, cards and title as one JSON file"
    }
}

pub mod import;

pub use import::{import_document, ImportedDocument};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportDocument;

impl UseCaseMetadata for ImportDocument {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "import_document"
    }

    fn display_name() -> &'static str {
        "Import data"
    }

    fn description() -> &'static str {
        "Replace all navigation and cards with a previously exported JSON file"
    }
}

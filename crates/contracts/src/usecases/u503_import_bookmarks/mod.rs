pub mod convert;
pub mod parser;

pub use convert::GroupingMode;
pub use parser::{parse_bookmarks_html, BookmarkFolder, BookmarkLink, ParsedBookmarks};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportBookmarks;

impl UseCaseMetadata for ImportBookmarks {
    fn usecase_index() -> &'static str {
        "u503"
    }

    fn usecase_name() -> &'static str {
        "import_bookmarks"
    }

    fn display_name() -> &'static str {
        "Import browser bookmarks"
    }

    fn description() -> &'static str {
        "Merge a bookmark export (HTML) into the active navigation entry"
    }
}

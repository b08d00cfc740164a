use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::a004_document::aggregate::Document;
use crate::shared::error::DashboardError;

const FALLBACK_FILE_STEM: &str = "webnav";

/// Формат файла экспорта: документ + заголовок сайта
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportPayload<'a> {
    #[serde(flatten)]
    document: &'a Document,
    website_title: &'a str,
}

/// Pretty-printed export of the document and display title
pub fn export_document(document: &Document, title: &str) -> Result<String, DashboardError> {
    let payload = ExportPayload {
        document,
        website_title: title,
    };
    serde_json::to_string_pretty(&payload).map_err(|e| DashboardError::format(e.to_string()))
}

/// `<title>_<YYYY-MM-DD>_<HH-MM>.json` with characters illegal in file
/// names removed
pub fn export_filename(title: &str, now: NaiveDateTime) -> String {
    let stem: String = title
        .chars()
        .filter(|c| !matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .filter(|c| !c.is_control())
        .collect();
    let stem = stem.trim();
    let stem = if stem.is_empty() { FALLBACK_FILE_STEM } else { stem };
    format!("{}_{}.json", stem, now.format("%Y-%m-%d_%H-%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_export_contains_title_and_document() {
        let mut doc = Document::default();
        doc.add_navigation("tools", "Tools").unwrap();
        let json = export_document(&doc, "My Links").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["websiteTitle"], "My Links");
        assert_eq!(value["navigation"][1]["id"], "tools");
        assert!(value["cards"]["tools"].is_array());
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_filename_is_sanitized() {
        assert_eq!(
            export_filename("a/b:c*?\"<>|d", at(9, 5)),
            "abcd_2024-03-07_09-05.json"
        );
        assert_eq!(export_filename("Links", at(23, 59)), "Links_2024-03-07_23-59.json");
    }

    #[test]
    fn test_filename_falls_back_when_title_is_only_illegal_chars() {
        assert_eq!(export_filename(" /// ", at(0, 0)), "webnav_2024-03-07_00-00.json");
    }
}

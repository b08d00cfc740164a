use crate::layout::global_context::DashboardContext;
use crate::shared::export::download_json;
use contracts::shared::error::DashboardError;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_export_document::{export_document, export_filename, ExportDocument};
use leptos::prelude::*;

/// Скачать документ и заголовок одним JSON-файлом
pub fn export_current(ctx: &DashboardContext) {
    let title = ctx.title.get_untracked();
    let json = match ctx.document.with_untracked(|d| export_document(d, &title)) {
        Ok(json) => json,
        Err(e) => {
            ctx.report(&ExportDocument::full_name(), &e);
            return;
        }
    };
    let filename = export_filename(&title, chrono::Local::now().naive_local());
    match download_json(&json, &filename) {
        Ok(()) => {
            log::info!("exported {} ({} bytes)", filename, json.len());
            ctx.notices().success(format!("Exported to {}", filename));
        }
        Err(e) => ctx.report(&ExportDocument::full_name(), &DashboardError::format(e)),
    }
}

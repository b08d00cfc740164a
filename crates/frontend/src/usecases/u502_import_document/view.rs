use crate::layout::global_context::use_dashboard;
use crate::layout::modal_service::use_dialogs;
use crate::shared::dom::read_selected_file;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u502_import_document::{import_document, ImportDocument, ImportedDocument};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Импорт ранее выгруженного JSON с полной заменой данных
#[component]
pub fn ImportDocumentDialog() -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();

    let file_name = RwSignal::new(None::<String>);
    let parsed = RwSignal::new(None::<ImportedDocument>);
    let error = RwSignal::new(None::<String>);

    let on_file = move |ev: web_sys::Event| {
        parsed.set(None);
        error.set(None);
        spawn_local(async move {
            match read_selected_file(ev).await {
                Ok(Some((name, text))) => {
                    file_name.set(Some(name));
                    match import_document(&text) {
                        Ok(imported) => parsed.set(Some(imported)),
                        Err(e) => {
                            log::warn!("import rejected: {}", e);
                            error.set(Some(e.to_string()));
                        }
                    }
                }
                Ok(None) => file_name.set(None),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let summary = move || {
        parsed.with(|p| {
            p.as_ref().map(|imported| {
                let doc = &imported.document;
                let groups: usize = doc.sections().map(|(_, g)| g.len()).sum();
                format!(
                    "{} navigation entries, {} groups, {} cards",
                    doc.navigation().len(),
                    groups,
                    doc.item_count()
                )
            })
        })
    };

    let apply = move |_| {
        let Some(imported) = parsed.get_untracked() else {
            return;
        };
        if ctx.replace_document(imported) {
            ctx.notices().success("Data imported");
            dialogs.import_document.set(false);
        }
    };

    view! {
        <Dialog open=dialogs.import_document>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{ImportDocument::display_name()}</DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Medium>
                            <MessageBar intent=MessageBarIntent::Warning>
                                {ImportDocument::description()}
                            </MessageBar>
                            <input type="file" accept=".json,application/json" on:change=on_file />
                            {move || file_name.get().map(|n| view! { <div class="import-file">{n}</div> })}
                            {move || summary().map(|s| view! {
                                <MessageBar intent=MessageBarIntent::Success>{s}</MessageBar>
                            })}
                            {move || error.get().map(|e| view! {
                                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                            })}
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || parsed.with(|p| p.is_none()))
                            on_click=apply
                        >
                            "Import"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| dialogs.import_document.set(false)
                        >
                            "Cancel"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

use crate::layout::global_context::use_dashboard;
use crate::layout::modal_service::use_dialogs;
use leptos::prelude::*;
use thaw::*;

/// Диалог изменения заголовка страницы
#[component]
pub fn TitleEditor() -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();
    let title = RwSignal::new(ctx.title.get_untracked());

    let save = move |_| {
        if ctx.set_title(&title.get_untracked()) {
            dialogs.title.set(false);
        }
    };

    view! {
        <Dialog open=dialogs.title>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Page title"</DialogTitle>
                    <DialogContent>
                        <Input value=title placeholder="Web Navigation" />
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || title.get().trim().is_empty())
                            on_click=save
                        >
                            "Save"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| dialogs.title.set(false)
                        >
                            "Cancel"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

use super::view_model::NavigationManagerViewModel;
use crate::layout::global_context::use_dashboard;
use crate::layout::modal_service::use_dialogs;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn NavigationManager() -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();
    let vm = NavigationManagerViewModel::new();

    let entries = move || {
        ctx.document.with(|d| {
            d.navigation()
                .iter()
                .map(|e| (e.id.clone(), e.name.clone(), e.is_active))
                .collect::<Vec<_>>()
        })
    };
    let single = move || ctx.document.with(|d| d.navigation().len() <= 1);

    view! {
        <Dialog open=dialogs.navigation>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Navigation"</DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Medium>
                            <ul class="nav-manager-list">
                                {move || entries().into_iter().map(|(id, name, active)| {
                                    let rename = {
                                        let (id, name) = (id.clone(), name.clone());
                                        move |_| vm.start_rename(id.clone(), name.clone())
                                    };
                                    let delete = {
                                        let id = id.clone();
                                        move |_| ctx.delete_navigation(&id)
                                    };
                                    let is_editing = {
                                        let id = id.clone();
                                        move || vm.editing.get().as_deref() == Some(id.as_str())
                                    };
                                    view! {
                                        <li class="nav-manager-item" class:active=active>
                                            <Show
                                                when=is_editing
                                                fallback={
                                                    let name = name.clone();
                                                    let id = id.clone();
                                                    move || view! {
                                                        <span class="nav-manager-name">{name.clone()}</span>
                                                        <span class="nav-manager-id">{id.clone()}</span>
                                                    }
                                                }
                                            >
                                                <Input value=vm.edit_name placeholder="Name" />
                                                <Button
                                                    appearance=ButtonAppearance::Primary
                                                    on_click=move |_| vm.save_rename_command(&ctx)
                                                >
                                                    "Save"
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| vm.cancel_rename()
                                                >
                                                    "Cancel"
                                                </Button>
                                            </Show>
                                            <button class="icon-btn" title="Rename" on:click=rename>
                                                {icon("edit")}
                                            </button>
                                            <button
                                                class="icon-btn"
                                                title="Delete"
                                                disabled=single
                                                on:click=delete
                                            >
                                                {icon("delete")}
                                            </button>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>

                            <Flex gap=FlexGap::Small align=FlexAlign::End>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Id"</Label>
                                    <Input value=vm.new_id placeholder="e.g. work" />
                                </Flex>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Name"</Label>
                                    <Input value=vm.new_name placeholder="Displayed name" />
                                </Flex>
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    disabled=Signal::derive(move || !vm.is_add_valid())
                                    on_click=move |_| vm.add_command(&ctx)
                                >
                                    {icon("plus")}
                                    "Add"
                                </Button>
                            </Flex>
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| dialogs.navigation.set(false)
                        >
                            "Close"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

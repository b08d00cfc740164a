use super::view_model::GroupEditorViewModel;
use crate::layout::global_context::use_dashboard;
use crate::layout::modal_service::{close_when_dismissed, use_dialogs, GroupTarget};
use contracts::domain::a002_business_group::aggregate::ColorIndex;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn GroupEditor(target: GroupTarget) -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();
    let vm = StoredValue::new(GroupEditorViewModel::new(target, &ctx));
    let is_new = vm.with_value(|vm| vm.is_new());

    let open = RwSignal::new(true);
    close_when_dismissed(open, move || dialogs.close_group());

    // other navigation entries the group can move to
    let destinations = {
        let current = StoredValue::new(vm.with_value(|vm| vm.nav_id().to_string()));
        move || {
            ctx.document.with(|d| {
                d.navigation()
                    .iter()
                    .filter(|e| current.with_value(|current| e.id != *current))
                    .map(|e| (e.id.clone(), e.name.clone()))
                    .collect::<Vec<_>>()
            })
        }
    };

    let save = move |_| {
        if vm.with_value(|vm| vm.save_command(&ctx)) {
            open.set(false);
        }
    };
    let move_group = move |_| {
        if vm.with_value(|vm| vm.move_command(&ctx)) {
            open.set(false);
        }
    };
    let delete = move |_| {
        if vm.with_value(|vm| vm.delete_command(&ctx)) {
            open.set(false);
        }
    };

    let (name, color, move_to) = vm.with_value(|vm| (vm.name, vm.color, vm.move_to));

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{if is_new { "New group" } else { "Edit group" }}</DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Medium>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Name"</Label>
                                <Input value=name placeholder="Group name" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Color"</Label>
                                <Select value=color>
                                    {ColorIndex::all()
                                        .map(|c| {
                                            let v = c.value().to_string();
                                            view! { <option value=v.clone()>{format!("Color {}", v)}</option> }
                                        })
                                        .collect_view()}
                                </Select>
                            </Flex>
                            <Show when=move || !is_new>
                                <Flex gap=FlexGap::Small align=FlexAlign::End>
                                    <Flex vertical=true gap=FlexGap::Small>
                                        <Label>"Move to"</Label>
                                        <Select value=move_to>
                                            <option value="">"-- Choose navigation --"</option>
                                            {
                                                let destinations = destinations.clone();
                                                move || destinations()
                                                    .into_iter()
                                                    .map(|(id, name)| view! { <option value=id>{name}</option> })
                                                    .collect_view()
                                            }
                                        </Select>
                                    </Flex>
                                    <Button
                                        appearance=ButtonAppearance::Secondary
                                        disabled=Signal::derive(move || move_to.get().is_empty())
                                        on_click=move_group
                                    >
                                        "Move"
                                    </Button>
                                </Flex>
                            </Show>
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Primary on_click=save>
                            "Save"
                        </Button>
                        <Show when=move || !is_new>
                            <Button appearance=ButtonAppearance::Secondary on_click=delete>
                                "Delete group"
                            </Button>
                        </Show>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

use super::view_model::CardEditorViewModel;
use crate::layout::global_context::use_dashboard;
use crate::layout::modal_service::{close_when_dismissed, use_dialogs, CardTarget};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn CardEditor(target: CardTarget) -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();
    let vm = CardEditorViewModel::new(target, &ctx);
    vm.watch_url(&ctx);

    let open = RwSignal::new(true);
    close_when_dismissed(open, move || dialogs.close_card());

    let is_new = vm.is_new();
    let (url, title, description, icon, card_type, group, new_group, session_icon) = (
        vm.url,
        vm.title,
        vm.description,
        vm.icon,
        vm.card_type,
        vm.group,
        vm.new_group,
        vm.session_icon,
    );
    let groups = StoredValue::new(vm.groups.clone());
    let sentinel = vm.sentinel.clone();

    let (catalog, styles, icon_dir, favicon) = ctx.config.with_value(|c| {
        (
            c.icon_catalog.clone(),
            c.card_styles.clone(),
            c.icon_dir.clone(),
            c.icon_source(),
        )
    });

    // предпросмотр иконки сайта
    let site_preview = Signal::derive(move || {
        session_icon.get().unwrap_or_else(|| {
            let u = url.get();
            if u.trim().is_empty() {
                String::new()
            } else {
                favicon.favicon_url(u.trim())
            }
        })
    });

    let vm = StoredValue::new(vm);
    let valid = Signal::derive(move || vm.with_value(|vm| vm.is_form_valid()));
    let save = move |_| {
        if vm.with_value(|vm| vm.save_command(&ctx)) {
            open.set(false);
        }
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{if is_new { "New card" } else { "Edit card" }}</DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Medium>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Address"</Label>
                                <Input value=url placeholder="https://..." />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Title"</Label>
                                <Input value=title placeholder="Card title" />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Description"</Label>
                                <Textarea value=description placeholder="Optional" />
                            </Flex>

                            <Show when=move || is_new>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Group"</Label>
                                    <Select value=group>
                                        {groups
                                            .with_value(|groups| groups
                                                .iter()
                                                .map(|g| view! { <option value=g.clone()>{g.clone()}</option> })
                                                .collect_view())}
                                        <option value="">"New group..."</option>
                                    </Select>
                                    <Show when=move || group.get().is_empty()>
                                        <Input value=new_group placeholder="New group name" />
                                    </Show>
                                </Flex>
                            </Show>

                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Style"</Label>
                                <Select value=card_type>
                                    {styles
                                        .iter()
                                        .map(|s| view! { <option value=s.clone()>{s.clone()}</option> })
                                        .collect_view()}
                                </Select>
                            </Flex>

                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Icon"</Label>
                                <div class="icon-selector">
                                    {icon_options(catalog.clone(), sentinel.clone(), icon_dir.clone(), icon, site_preview)}
                                </div>
                            </Flex>
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || !valid.get())
                            on_click=save
                        >
                            "Save"
                        </Button>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

/// Icon picker: the site-icon option first, then the local catalog
fn icon_options(
    catalog: Vec<String>,
    sentinel: String,
    icon_dir: String,
    icon: RwSignal<String>,
    site_preview: Signal<String>,
) -> impl IntoView {
    std::iter::once(sentinel.clone())
        .chain(catalog)
        .map(|name| {
            let is_site = name == sentinel;
            let selected = {
                let name = name.clone();
                move || icon.get() == name
            };
            let pick = {
                let name = name.clone();
                move |_| icon.set(name.clone())
            };
            let preview = if is_site {
                view! {
                    <img src=site_preview alt="" />
                    <span>"Site"</span>
                }
                .into_any()
            } else {
                view! { <img src=format!("{}{}", icon_dir, name) alt="" /> }.into_any()
            };
            view! {
                <button
                    type="button"
                    class="icon-option"
                    class:selected=selected
                    title=if is_site { "Use the site icon".to_string() } else { name }
                    on:click=pick
                >
                    {preview}
                </button>
            }
        })
        .collect_view()
}

//! Custom page background: the fixed layer behind the dashboard and the
//! dialog that edits it.

use contracts::shared::background::{BackgroundKind, BackgroundSettings};
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::use_dashboard;
use crate::layout::modal_service::use_dialogs;

#[component]
pub fn BackgroundLayer() -> impl IntoView {
    let ctx = use_dashboard();

    move || {
        ctx.background.get().map(|bg| {
            let style = format!("opacity: {};", bg.css_opacity());
            match bg.kind {
                BackgroundKind::Image => view! {
                    <div class="custom-background">
                        <img src=bg.data style=style alt="" />
                    </div>
                }
                .into_any(),
                BackgroundKind::Video => view! {
                    <div class="custom-background">
                        <video src=bg.data style=style autoplay=true muted=true loop=true playsinline=true></video>
                    </div>
                }
                .into_any(),
            }
        })
    }
}

fn kind_value(kind: BackgroundKind) -> &'static str {
    match kind {
        BackgroundKind::Image => "image",
        BackgroundKind::Video => "video",
    }
}

fn parse_kind(value: &str) -> BackgroundKind {
    if value == "video" {
        BackgroundKind::Video
    } else {
        BackgroundKind::Image
    }
}

#[component]
pub fn BackgroundDialog() -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();

    let current = ctx.background.get_untracked();
    let kind = RwSignal::new(
        current
            .as_ref()
            .map(|b| kind_value(b.kind))
            .unwrap_or("image")
            .to_string(),
    );
    let data = RwSignal::new(current.as_ref().map(|b| b.data.clone()).unwrap_or_default());
    let opacity = RwSignal::new(current.as_ref().map(|b| i32::from(b.opacity)).unwrap_or(100));
    let error = RwSignal::new(None::<String>);

    let save = move |_| {
        let source = data.get_untracked().trim().to_string();
        if source.is_empty() {
            error.set(Some("Enter an image or video address".into()));
            return;
        }
        let settings = BackgroundSettings::new(parse_kind(&kind.get_untracked()), source, 100)
            .with_opacity(opacity.get_untracked());
        if ctx.save_background(settings) {
            dialogs.background.set(false);
        }
    };

    let clear = move |_| {
        ctx.clear_background();
        dialogs.background.set(false);
    };

    view! {
        <Dialog open=dialogs.background>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Background"</DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Medium>
                            {move || error.get().map(|e| view! {
                                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                            })}
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Type"</Label>
                                <Select value=kind>
                                    <option value="image">"Image"</option>
                                    <option value="video">"Video"</option>
                                </Select>
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Address (URL or data URI)"</Label>
                                <Input value=data placeholder="https://..." />
                            </Flex>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>{move || format!("Opacity: {}%", opacity.get())}</Label>
                                <input
                                    type="range"
                                    min="0"
                                    max="100"
                                    prop:value=move || opacity.get().to_string()
                                    on:input=move |ev| {
                                        if let Ok(v) = event_target_value(&ev).parse::<i32>() {
                                            opacity.set(v);
                                        }
                                    }
                                />
                            </Flex>
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Primary on_click=save>
                            "Apply"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=clear>
                            "Remove background"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| dialogs.background.set(false)
                        >
                            "Cancel"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

use crate::layout::global_context::use_dashboard;
use crate::layout::modal_service::{use_dialogs, CardTarget, GroupTarget};
use crate::shared::dom::child_rects;
use crate::shared::icons::icon;
use contracts::projections::p900_dashboard_view::{CardView, GroupView, Segment};
use contracts::shared::drag_drop::{
    nearest_insertion_index, CardDragPayload, CardDropTarget, Rect,
};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlImageElement};

fn segments_view(segments: Vec<Segment>) -> impl IntoView {
    segments
        .into_iter()
        .map(|s| {
            if s.highlighted {
                view! { <mark class="search-highlight">{s.text}</mark> }.into_any()
            } else {
                view! { <span>{s.text}</span> }.into_any()
            }
        })
        .collect_view()
}

/// Перевод визуальной позиции вставки в индекс карточки. Контейнер может
/// показывать отфильтрованное подмножество, поэтому позиция берётся из
/// `data-index` отрисованных карточек.
fn insertion_item_index(laid_out: &[(Rect, usize)], raw: usize) -> usize {
    match laid_out.get(raw) {
        Some((_, index)) => *index,
        None => laid_out.last().map(|(_, index)| index + 1).unwrap_or(0),
    }
}

#[component]
pub fn GroupBlock(group: GroupView, edit_mode: bool) -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();

    let target = CardDropTarget {
        nav_id: group.nav_id.clone(),
        group_index: group.group_index,
    };

    let on_dragover = move |ev: DragEvent| {
        if ctx.card_drag.with_untracked(|m| m.is_dragging()) {
            ev.prevent_default();
        }
    };

    let on_drop = {
        let target = target.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            let mut laid_out = child_rects(&ev, ".card");
            laid_out.sort_by_key(|(_, index)| *index);
            let rects: Vec<Rect> = laid_out.iter().map(|(r, _)| *r).collect();
            let raw = nearest_insertion_index(&rects, f64::from(ev.client_x()), f64::from(ev.client_y()));
            ctx.drop_card(target.clone(), insertion_item_index(&laid_out, raw));
        }
    };

    let highlighted = {
        let target = target.clone();
        move || ctx.card_drag.with(|m| m.is_highlighted(&target))
    };

    let on_dragenter = {
        let target = target.clone();
        move |_| ctx.card_drag.update(|m| m.enter(target.clone()))
    };

    let on_dragleave = {
        let target = target.clone();
        move |_| ctx.card_drag.update(|m| m.leave(&target))
    };

    let add_card = {
        let nav_id = group.nav_id.clone();
        let name = group.name.clone();
        move |_| {
            dialogs.edit_card(CardTarget::New {
                nav_id: nav_id.clone(),
                group_name: Some(name.clone()),
            })
        }
    };

    let edit_group = {
        let nav_id = group.nav_id.clone();
        let name = group.name.clone();
        move |_| {
            dialogs.edit_group(GroupTarget::Existing {
                nav_id: nav_id.clone(),
                group_name: name.clone(),
            })
        }
    };

    view! {
        <section class=format!("business-group group-color-{}", group.color)>
            <div class="group-header">
                <h3 class="group-title">{group.name.clone()}</h3>
                <Show when=move || edit_mode>
                    <div class="group-actions">
                        <button class="icon-btn" title="Add card" on:click=add_card.clone()>
                            {icon("plus")}
                        </button>
                        <button class="icon-btn" title="Edit group" on:click=edit_group.clone()>
                            {icon("edit")}
                        </button>
                    </div>
                </Show>
            </div>
            <div
                class="group-items"
                class:drag-over=highlighted
                on:dragenter=on_dragenter
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
            >
                {group
                    .items
                    .into_iter()
                    .map(|card| view! { <CardTile card=card edit_mode=edit_mode /> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn CardTile(card: CardView, edit_mode: bool) -> impl IntoView {
    let ctx = use_dashboard();
    let dialogs = use_dialogs();
    let fallback = ctx.config.with_value(|c| c.default_icon_path());

    let payload = CardDragPayload {
        nav_id: card.nav_id.clone(),
        group_index: card.group_index,
        item_index: card.item_index,
    };

    let on_dragstart = move |ev: DragEvent| {
        if !ctx.begin_card_drag(payload.clone()) {
            ev.prevent_default();
            return;
        }
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", "card");
            dt.set_effect_allowed("move");
        }
    };

    let (nav_id, group_index, item_index) = (card.nav_id.clone(), card.group_index, card.item_index);
    let edit = {
        let nav_id = nav_id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            dialogs.edit_card(CardTarget::Existing {
                nav_id: nav_id.clone(),
                group_index,
                item_index,
            });
        }
    };
    let delete = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        ctx.delete_card(&nav_id, group_index, item_index);
    };

    view! {
        <a
            class=format!("card {}", card.card_type)
            href=card.url
            target="_blank"
            rel="noopener noreferrer"
            title=card.tooltip
            data-index=card.item_index.to_string()
            draggable=if card.draggable { "true" } else { "false" }
            on:dragstart=on_dragstart
            on:dragend=move |_| ctx.end_card_drag()
        >
            <img
                class="card-icon"
                src=card.icon_src
                alt=""
                on:error=move |ev| {
                    let Some(img) = ev
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
                    else {
                        return;
                    };
                    if !img.src().ends_with(&fallback) {
                        log::debug!("icon {} failed, using default", img.src());
                        img.set_src(&fallback);
                    }
                }
            />
            <div class="card-body">
                <div class="card-title">{segments_view(card.title)}</div>
                <div class="card-description">{segments_view(card.description)}</div>
            </div>
            <Show when=move || edit_mode>
                <div class="card-actions">
                    <button class="icon-btn" title="Edit" on:click=edit.clone()>
                        {icon("edit")}
                    </button>
                    <button class="icon-btn" title="Delete" on:click=delete.clone()>
                        {icon("delete")}
                    </button>
                </div>
            </Show>
        </a>
    }
}

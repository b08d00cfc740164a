use crate::layout::global_context::use_dashboard;
use contracts::projections::p900_dashboard_view::NavEntryView;
use contracts::shared::drag_drop::NavDragPayload;
use leptos::prelude::*;
use web_sys::DragEvent;

/// Список пунктов навигации; в режиме редактирования их можно перетаскивать
#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_dashboard();
    let entries = Memo::new(move |_| ctx.view.with(|v| v.view().navigation.clone()));

    view! {
        <nav class="main-nav-bar">
            <ul>
                <For
                    each=move || entries.get()
                    key=|e| (e.id.clone(), e.index, e.active, e.name.clone(), e.draggable)
                    children=move |entry: NavEntryView| view! { <NavItem entry=entry /> }
                />
            </ul>
        </nav>
    }
}

#[component]
fn NavItem(entry: NavEntryView) -> impl IntoView {
    let ctx = use_dashboard();
    let index = entry.index;
    let id = entry.id.clone();

    let on_click = {
        let id = id.clone();
        move |_| ctx.activate(&id)
    };

    let on_dragstart = {
        let id = id.clone();
        move |ev: DragEvent| {
            let payload = NavDragPayload {
                nav_id: id.clone(),
                index,
            };
            if !ctx.begin_nav_drag(payload) {
                ev.prevent_default();
                return;
            }
            if let Some(dt) = ev.data_transfer() {
                let _ = dt.set_data("text/plain", &id);
                dt.set_effect_allowed("move");
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        if ctx.nav_drag.with_untracked(|m| m.is_dragging()) {
            ev.prevent_default();
        }
    };

    view! {
        <li
            class="nav-item"
            class:active=entry.active
            class:drag-over=move || ctx.nav_drag.with(|m| m.is_highlighted(&index))
            data-index=index.to_string()
            draggable=if entry.draggable { "true" } else { "false" }
            on:click=on_click
            on:dragstart=on_dragstart
            on:dragenter=move |_| ctx.nav_drag.update(|m| m.enter(index))
            on:dragover=on_dragover
            on:dragleave=move |_| ctx.nav_drag.update(|m| m.leave(&index))
            on:drop=move |ev: DragEvent| {
                ev.prevent_default();
                ctx.drop_nav(index);
            }
            on:dragend=move |_| ctx.end_nav_drag()
        >
            <span>{entry.name}</span>
        </li>
    }
}

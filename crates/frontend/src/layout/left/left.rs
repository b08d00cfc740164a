use crate::layout::global_context::use_dashboard;
use leptos::prelude::*;

#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = use_dashboard();

    view! {
        <div data-zone="left" class="left" class:edit-mode=move || ctx.edit_mode.get()>
            {children()}
        </div>
    }
}

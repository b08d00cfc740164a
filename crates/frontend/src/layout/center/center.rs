use super::group::GroupBlock;
use crate::layout::global_context::use_dashboard;
use contracts::projections::p900_dashboard_view::SectionView;
use leptos::prelude::*;

/// Область карточек; перестраивается из дерева рендера при каждом изменении документа
#[component]
pub fn Center() -> impl IntoView {
    let ctx = use_dashboard();

    view! {
        <div data-zone="center" class="center">
            {move || {
                ctx.view.with(|outcome| {
                    let view = outcome.view();
                    let edit_mode = view.edit_mode;
                    let searching = view.searching;
                    let found = view.card_count();
                    let sections = view
                        .visible_sections()
                        .cloned()
                        .map(|section| view! { <Section section=section edit_mode=edit_mode searching=searching /> })
                        .collect_view();
                    view! {
                        <Show when=move || searching>
                            <div class="search-summary">
                                {format!("Found {} cards", found)}
                            </div>
                        </Show>
                        {sections}
                    }
                })
            }}
        </div>
    }
}

#[component]
fn Section(section: SectionView, edit_mode: bool, searching: bool) -> impl IntoView {
    let empty = section.groups.is_empty();
    let groups = section
        .groups
        .into_iter()
        .map(|group| view! { <GroupBlock group=group edit_mode=edit_mode /> })
        .collect_view();

    view! {
        <div class="card-group" data-nav=section.nav_id>
            <Show when=move || searching>
                <h2 class="card-group-title">{section.nav_name.clone()}</h2>
            </Show>
            {if empty {
                view! {
                    <div class="card-group-empty">
                        {if edit_mode { "No groups yet. Add a group or a card." } else { "No cards yet." }}
                    </div>
                }
                .into_any()
            } else {
                groups.into_any()
            }}
        </div>
    }
}

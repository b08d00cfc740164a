use crate::layout::{DashboardContext, DialogService, Shell};
use crate::shared::notice::NoticeService;
use contracts::shared::config::DashboardConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::default();

    let notices = NoticeService::new(config.notice_timeout_ms);
    provide_context(notices);

    // Provide the dashboard controller to the whole app via context.
    let dashboard = DashboardContext::new(config, notices);
    dashboard.init_effects();
    provide_context(dashboard);

    provide_context(DialogService::new());

    view! {
        <Shell />
    }
}

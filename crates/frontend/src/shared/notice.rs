//! Transient notices shown above the page, dismissed after a timeout.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn intent(self) -> MessageBarIntent {
        match self {
            NoticeLevel::Info => MessageBarIntent::Info,
            NoticeLevel::Success => MessageBarIntent::Success,
            NoticeLevel::Warning => MessageBarIntent::Warning,
            NoticeLevel::Error => MessageBarIntent::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    id: u64,
    level: NoticeLevel,
    text: String,
}

/// Сервис уведомлений
#[derive(Clone, Copy)]
pub struct NoticeService {
    items: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u64>,
    timeout_ms: u32,
}

impl NoticeService {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            timeout_ms,
        }
    }

    pub fn show(&self, level: NoticeLevel, text: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| {
            items.push(Notice {
                id,
                level,
                text: text.into(),
            })
        });

        let items = self.items;
        let timeout = self.timeout_ms;
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            items.update(|items| items.retain(|n| n.id != id));
        });
    }

    pub fn info(&self, text: impl Into<String>) {
        self.show(NoticeLevel::Info, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(NoticeLevel::Success, text);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.show(NoticeLevel::Warning, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(NoticeLevel::Error, text);
    }
}

#[component]
pub fn NoticeHost() -> impl IntoView {
    let notices = use_context::<NoticeService>().expect("NoticeService not provided in context");

    view! {
        <div class="notice-host">
            <For
                each=move || notices.items.get()
                key=|n| n.id
                children=move |n| {
                    view! {
                        <MessageBar intent=n.level.intent()>
                            <span class="notice-text">{n.text}</span>
                        </MessageBar>
                    }
                }
            />
        </div>
    }
}

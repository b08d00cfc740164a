use leptos::prelude::*;

/// Какую карточку открыть в редакторе
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardTarget {
    New {
        nav_id: String,
        group_name: Option<String>,
    },
    Existing {
        nav_id: String,
        group_index: usize,
        item_index: usize,
    },
}

/// Какую группу открыть в редакторе
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupTarget {
    New { nav_id: String },
    Existing { nav_id: String, group_name: String },
}

/// Сервис для централизованного управления диалогами
///
/// Диалог смонтирован, пока его сигнал задан; закрытие сбрасывает сигнал,
/// поэтому каждое открытие начинается с чистой формы.
#[derive(Clone, Copy)]
pub struct DialogService {
    pub card: RwSignal<Option<CardTarget>>,
    pub group: RwSignal<Option<GroupTarget>>,
    pub navigation: RwSignal<bool>,
    pub title: RwSignal<bool>,
    pub import_document: RwSignal<bool>,
    pub import_bookmarks: RwSignal<bool>,
    pub background: RwSignal<bool>,
}

impl DialogService {
    pub fn new() -> Self {
        Self {
            card: RwSignal::new(None),
            group: RwSignal::new(None),
            navigation: RwSignal::new(false),
            title: RwSignal::new(false),
            import_document: RwSignal::new(false),
            import_bookmarks: RwSignal::new(false),
            background: RwSignal::new(false),
        }
    }

    pub fn edit_card(&self, target: CardTarget) {
        self.card.set(Some(target));
    }

    pub fn edit_group(&self, target: GroupTarget) {
        self.group.set(Some(target));
    }

    pub fn close_card(&self) {
        self.card.set(None);
    }

    pub fn close_group(&self) {
        self.group.set(None);
    }
}

impl Default for DialogService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_dialogs() -> DialogService {
    use_context::<DialogService>().expect("DialogService not provided in context")
}

/// Mirror a local `open` flag of a thaw dialog back into the service:
/// once the dialog closes, `on_closed` runs.
pub fn close_when_dismissed(open: RwSignal<bool>, on_closed: impl Fn() + 'static) {
    Effect::new(move |_| {
        if !open.get() {
            on_closed();
        }
    });
}

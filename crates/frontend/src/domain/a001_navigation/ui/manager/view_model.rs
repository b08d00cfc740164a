use crate::layout::global_context::DashboardContext;
use leptos::prelude::*;

/// ViewModel для менеджера навигации
#[derive(Clone, Copy)]
pub struct NavigationManagerViewModel {
    pub new_id: RwSignal<String>,
    pub new_name: RwSignal<String>,
    /// Id переименовываемого пункта
    pub editing: RwSignal<Option<String>>,
    pub edit_name: RwSignal<String>,
}

impl NavigationManagerViewModel {
    pub fn new() -> Self {
        Self {
            new_id: RwSignal::new(String::new()),
            new_name: RwSignal::new(String::new()),
            editing: RwSignal::new(None),
            edit_name: RwSignal::new(String::new()),
        }
    }

    pub fn is_add_valid(&self) -> bool {
        !self.new_id.get().trim().is_empty() && !self.new_name.get().trim().is_empty()
    }

    pub fn add_command(&self, ctx: &DashboardContext) {
        let id = self.new_id.get_untracked();
        let name = self.new_name.get_untracked();
        if ctx.add_navigation(&id, &name) {
            self.new_id.set(String::new());
            self.new_name.set(String::new());
        }
    }

    pub fn start_rename(&self, id: String, name: String) {
        self.edit_name.set(name);
        self.editing.set(Some(id));
    }

    pub fn save_rename_command(&self, ctx: &DashboardContext) {
        let Some(id) = self.editing.get_untracked() else {
            return;
        };
        if ctx.rename_navigation(&id, &self.edit_name.get_untracked()) {
            self.cancel_rename();
        }
    }

    pub fn cancel_rename(&self) {
        self.editing.set(None);
        self.edit_name.set(String::new());
    }
}

impl Default for NavigationManagerViewModel {
    fn default() -> Self {
        Self::new()
    }
}

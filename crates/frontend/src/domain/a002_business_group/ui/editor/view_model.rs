use crate::layout::global_context::DashboardContext;
use crate::layout::modal_service::GroupTarget;
use contracts::domain::a002_business_group::aggregate::ColorIndex;
use leptos::prelude::*;

#[derive(Clone)]
pub struct GroupEditorViewModel {
    pub target: GroupTarget,
    pub name: RwSignal<String>,
    /// Select value, "1".."6"
    pub color: RwSignal<String>,
    /// Пункт навигации, куда переносится группа
    pub move_to: RwSignal<String>,
}

impl GroupEditorViewModel {
    pub fn new(target: GroupTarget, ctx: &DashboardContext) -> Self {
        let (name, color) = ctx.document.with_untracked(|d| match &target {
            GroupTarget::New { nav_id } => {
                let count = d.groups(nav_id).map_or(0, <[_]>::len);
                (String::new(), ColorIndex::rotation(count))
            }
            GroupTarget::Existing { nav_id, group_name } => {
                let groups = d.groups(nav_id).unwrap_or(&[]);
                let position = groups.iter().position(|g| &g.group_name == group_name);
                let color = position
                    .and_then(|i| groups[i].color_index)
                    .unwrap_or_else(|| ColorIndex::rotation(position.unwrap_or(0)));
                (group_name.clone(), color)
            }
        });

        Self {
            target,
            name: RwSignal::new(name),
            color: RwSignal::new(color.value().to_string()),
            move_to: RwSignal::new(String::new()),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self.target, GroupTarget::New { .. })
    }

    pub fn nav_id(&self) -> &str {
        match &self.target {
            GroupTarget::New { nav_id } | GroupTarget::Existing { nav_id, .. } => nav_id,
        }
    }

    fn selected_color(&self) -> ColorIndex {
        self.color
            .get_untracked()
            .parse::<u8>()
            .ok()
            .and_then(|v| ColorIndex::new(v).ok())
            .unwrap_or_else(|| ColorIndex::rotation(0))
    }

    /// Returns `true` when the dialog can close
    pub fn save_command(&self, ctx: &DashboardContext) -> bool {
        let name = self.name.get_untracked();
        let color = self.selected_color();
        match &self.target {
            GroupTarget::New { nav_id } => ctx.add_group(nav_id, &name, color),
            GroupTarget::Existing { nav_id, group_name } => {
                ctx.rename_group(nav_id, group_name, &name, color)
            }
        }
    }

    pub fn move_command(&self, ctx: &DashboardContext) -> bool {
        let GroupTarget::Existing { nav_id, group_name } = &self.target else {
            return false;
        };
        let target = self.move_to.get_untracked();
        if target.is_empty() {
            return false;
        }
        ctx.move_group(nav_id, group_name, &target)
    }

    pub fn delete_command(&self, ctx: &DashboardContext) -> bool {
        let GroupTarget::Existing { nav_id, group_name } = &self.target else {
            return false;
        };
        ctx.delete_group(nav_id, group_name)
    }
}

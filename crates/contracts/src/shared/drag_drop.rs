//! Автоматы перетаскивания карточек и пунктов навигации.
//!
//! `Idle -> Dragging -> (Accepted | Cancelled) -> Idle`. Автомат хранит только
//! состояние жеста; принятый drop превращает в изменение документа вызывающий код.

use serde::{Deserialize, Serialize};

/// Адрес перетаскиваемой карточки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDragPayload {
    pub nav_id: String,
    pub group_index: usize,
    pub item_index: usize,
}

/// Контейнер карточек, принимающий drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDropTarget {
    pub nav_id: String,
    pub group_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavDragPayload {
    pub nav_id: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState<P, T> {
    Idle,
    Dragging { payload: P, over: Option<T> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome<P, T> {
    Accepted { payload: P, target: T },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragMachine<P, T> {
    state: DragState<P, T>,
}

impl<P, T> Default for DragMachine<P, T> {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
        }
    }
}

impl<P: Clone, T: Clone + PartialEq> DragMachine<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState<P, T> {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn payload(&self) -> Option<&P> {
        match &self.state {
            DragState::Dragging { payload, .. } => Some(payload),
            DragState::Idle => None,
        }
    }

    /// Перетаскивание начинается только в режиме редактирования
    pub fn begin(&mut self, edit_mode: bool, payload: P) -> bool {
        if !edit_mode {
            return false;
        }
        self.state = DragState::Dragging {
            payload,
            over: None,
        };
        true
    }

    pub fn enter(&mut self, target: T) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = Some(target);
        }
    }

    pub fn leave(&mut self, target: &T) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            if over.as_ref() == Some(target) {
                *over = None;
            }
        }
    }

    pub fn is_highlighted(&self, target: &T) -> bool {
        matches!(&self.state, DragState::Dragging { over: Some(o), .. } if o == target)
    }

    pub fn drop_on(&mut self, target: T) -> DropOutcome<P, T> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { payload, .. } => DropOutcome::Accepted { payload, target },
            DragState::Idle => DropOutcome::Cancelled,
        }
    }

    /// Конец жеста без принятого drop; `true`, если перетаскивание отменено
    pub fn end(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}

pub type CardDragMachine = DragMachine<CardDragPayload, CardDropTarget>;
pub type NavDragMachine = DragMachine<NavDragPayload, usize>;

/// Прямоугольник элемента на экране (getBoundingClientRect)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Insertion index for a drop at `(x, y)` among the target's items.
///
/// Picks the item with the nearest center; a pointer right of that center
/// inserts after it. Empty container: 0.
pub fn nearest_insertion_index(items: &[Rect], x: f64, y: f64) -> usize {
    let mut closest = 0;
    let mut best = f64::MAX;
    for (index, rect) in items.iter().enumerate() {
        let (cx, cy) = rect.center();
        let distance = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        if distance < best {
            best = distance;
            closest = if x > cx { index + 1 } else { index };
        }
    }
    closest
}

/// Turn an accepted card drop into the index passed to the move operation.
/// Within the same container the removal shifts later items left by one.
pub fn card_target_index(payload: &CardDragPayload, target: &CardDropTarget, raw: usize) -> usize {
    let same_container =
        payload.nav_id == target.nav_id && payload.group_index == target.group_index;
    if same_container && raw > payload.item_index {
        raw - 1
    } else {
        raw
    }
}

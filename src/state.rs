use ratatui::widgets::TableState;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;

use crate::action::{ExplorerAction, ExplorerEvent};
use crate::menu::{MenuAction, menu_actions};
use crate::node::ConceptId;
use crate::store::ConceptStore;
use crate::style::ScrollPolicy;
use crate::tree::ConceptTree;

#[cfg(feature = "keymap")]
use crate::keymap::ExplorerKeyBindings;
#[cfg(feature = "keymap")]
use crossterm::event::KeyEvent;

/// A visible row with metadata used for rendering and navigation.
#[derive(Clone)]
pub struct VisibleRow {
    pub(crate) id: ConceptId,
    pub(crate) level: u16,
    pub(crate) parent: Option<ConceptId>,
    pub(crate) has_indicator: bool,
    pub(crate) is_loading: bool,
    pub(crate) is_tail_stack: SmallVec<[bool; 8]>,
}

impl VisibleRow {
    #[inline]
    pub const fn id(&self) -> ConceptId {
        self.id
    }

    #[inline]
    pub const fn level(&self) -> u16 {
        self.level
    }
}

/// Presentation state: cached visible rows, scrolling, key bindings.
///
/// Selection authority lives in the tree (so collapse-all can clear it
/// atomically); this state only maps the selected id back to a row. The
/// row cache is rebuilt whenever the tree revision moves.
pub struct ExplorerState {
    list_state: TableState,
    visible_rows: Vec<VisibleRow>,
    // Fast lookup from node id to visible row index.
    row_index: FxHashMap<ConceptId, usize>,
    seen_revision: Option<u64>,
    draw_lines: bool,
    #[cfg(feature = "keymap")]
    keymap: ExplorerKeyBindings,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a state with preallocated capacity for the given number of rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list_state: TableState::default(),
            visible_rows: Vec::with_capacity(capacity),
            row_index: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            seen_revision: None,
            draw_lines: true,
            #[cfg(feature = "keymap")]
            keymap: ExplorerKeyBindings::new(),
        }
    }

    #[cfg(feature = "keymap")]
    /// Returns a mutable reference to the key binding set.
    pub const fn keymap_mut(&mut self) -> &mut ExplorerKeyBindings {
        &mut self.keymap
    }

    pub(crate) const fn list_state(&self) -> &TableState {
        &self.list_state
    }

    pub(crate) const fn list_state_mut(&mut self) -> &mut TableState {
        &mut self.list_state
    }

    pub(crate) fn visible_rows(&self) -> &[VisibleRow] {
        &self.visible_rows
    }

    /// Returns the visible row index of a node, if it is on screen.
    pub fn row_of(&self, id: ConceptId) -> Option<usize> {
        self.row_index.get(&id).copied()
    }

    /// Returns the number of visible rows in the current view.
    pub const fn visible_len(&self) -> usize {
        self.visible_rows.len()
    }

    /// Returns whether guide lines are drawn.
    #[inline]
    pub const fn draw_lines(&self) -> bool {
        self.draw_lines
    }

    /// Enables or disables drawing of guide lines.
    pub const fn set_draw_lines(&mut self, draw: bool) {
        self.draw_lines = draw;
    }

    /// Forces a rebuild of the visible-row cache on the next render.
    pub const fn invalidate(&mut self) {
        self.seen_revision = None;
    }

    /// Rebuilds the visible-row cache if the tree changed underneath it.
    pub fn ensure_visible_rows(&mut self, tree: &ConceptTree) {
        if self.seen_revision == Some(tree.revision()) {
            return;
        }

        self.visible_rows.clear();
        self.row_index.clear();
        if let Some(root) = tree.root() {
            let mut is_tail_stack: SmallVec<[bool; 8]> = SmallVec::new();
            self.push_rows(tree, root, 0, None, &mut is_tail_stack);
        }
        self.seen_revision = Some(tree.revision());
        self.sync_selection(tree);
    }

    fn push_rows(
        &mut self,
        tree: &ConceptTree,
        id: ConceptId,
        level: u16,
        parent: Option<ConceptId>,
        is_tail_stack: &mut SmallVec<[bool; 8]>,
    ) {
        let Some(node) = tree.get(id) else {
            return;
        };
        let idx = self.visible_rows.len();
        self.visible_rows.push(VisibleRow {
            id,
            level,
            parent,
            has_indicator: node.kind().is_expandable(),
            is_loading: node.is_loading(),
            is_tail_stack: is_tail_stack.clone(),
        });
        self.row_index.insert(id, idx);

        if !node.is_open() {
            return;
        }

        let children = tree.visible_children(id);
        let last_idx = children.len().saturating_sub(1);
        for (i, child) in children.iter().copied().enumerate() {
            is_tail_stack.push(i == last_idx);
            self.push_rows(tree, child, level + 1, Some(id), is_tail_stack);
            is_tail_stack.pop();
        }
    }

    // Map the authoritative selected id to a highlighted row. A selected
    // node hidden by a collapsed ancestor simply has no highlight.
    fn sync_selection(&mut self, tree: &ConceptTree) {
        let row = tree.selected_id().and_then(|id| self.row_of(id));
        self.list_state.select(row);
    }

    /// Adjusts scroll offset so the selection is within the viewport.
    pub fn ensure_selection_visible(&mut self, viewport_height: usize) {
        let Some(selected) = self.list_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let offset = self.list_state.offset();
        if selected < offset {
            *self.list_state.offset_mut() = selected;
        } else if selected >= offset + viewport_height {
            *self.list_state.offset_mut() = selected + 1 - viewport_height;
        }
    }

    /// Adjusts selection visibility according to the provided scroll policy.
    pub fn ensure_selection_visible_with_policy(
        &mut self,
        viewport_height: usize,
        policy: ScrollPolicy,
    ) {
        match policy {
            ScrollPolicy::KeepInView => self.ensure_selection_visible(viewport_height),
            ScrollPolicy::CenterOnSelect => {
                self.ensure_selection_visible_centered(viewport_height);
            }
        }
    }

    fn ensure_selection_visible_centered(&mut self, viewport_height: usize) {
        let Some(selected) = self.list_state.selected() else {
            return;
        };
        let viewport_height = viewport_height.max(1);
        let total = self.visible_rows.len();
        if total <= viewport_height {
            *self.list_state.offset_mut() = 0;
            return;
        }

        // Center selection, then clamp to valid scroll range.
        let half = viewport_height / 2;
        let mut offset = selected.saturating_sub(half);
        let max_offset = total.saturating_sub(viewport_height);
        if offset > max_offset {
            offset = max_offset;
        }
        *self.list_state.offset_mut() = offset;
    }

    /// Scrolls the view down by the given number of rows.
    pub fn scroll_down_by(&mut self, amount: u16) {
        self.list_state.scroll_down_by(amount);
    }

    /// Scrolls the view up by the given number of rows.
    pub fn scroll_up_by(&mut self, amount: u16) {
        self.list_state.scroll_up_by(amount);
    }

    /// Handles an explorer action and returns the resulting event.
    ///
    /// Navigation, selection, compress and collapse-all apply directly to
    /// the store; expand-with-fetch, source navigation and service
    /// execution come back as events for the caller's runtime.
    pub fn handle_action(
        &mut self,
        store: &mut ConceptStore,
        action: ExplorerAction,
    ) -> ExplorerEvent {
        self.ensure_visible_rows(store.tree());
        let event = self.handle_action_inner(store, action);
        self.ensure_visible_rows(store.tree());
        event
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event into an action and handles it.
    pub fn handle_key(&mut self, store: &mut ConceptStore, key: KeyEvent) -> ExplorerEvent {
        let Some(action) = self.keymap.resolve(key) else {
            return ExplorerEvent::Unhandled;
        };
        self.handle_action(store, action)
    }

    fn handle_action_inner(
        &mut self,
        store: &mut ConceptStore,
        action: ExplorerAction,
    ) -> ExplorerEvent {
        match action {
            ExplorerAction::SelectPrev => self.select_offset(store, -1),
            ExplorerAction::SelectNext => self.select_offset(store, 1),
            ExplorerAction::SelectFirst => self.select_row(store, 0),
            ExplorerAction::SelectLast => {
                self.select_row(store, self.visible_rows.len().saturating_sub(1))
            }
            ExplorerAction::SelectParent => self.select_parent(store),
            ExplorerAction::Activate => self.activate(store),
            ExplorerAction::Expand => self.expand_selected(store),
            ExplorerAction::Compress => self.compress_selected(store),
            ExplorerAction::CollapseAll => {
                store.collapse_all();
                ExplorerEvent::Handled
            }
            ExplorerAction::ViewSource => self.menu_entry(store, MenuAction::ViewSource),
            ExplorerAction::Menu(entry) => self.menu_entry(store, entry),
        }
    }

    fn select_offset(&mut self, store: &mut ConceptStore, delta: isize) -> ExplorerEvent {
        if self.visible_rows.is_empty() {
            return ExplorerEvent::Unhandled;
        }
        let target = match store.tree().selected_id().and_then(|id| self.row_of(id)) {
            Some(current) => current
                .saturating_add_signed(delta)
                .min(self.visible_rows.len() - 1),
            None => 0,
        };
        self.select_row(store, target)
    }

    fn select_row(&mut self, store: &mut ConceptStore, row: usize) -> ExplorerEvent {
        let Some(id) = self.visible_rows.get(row).map(|r| r.id) else {
            return ExplorerEvent::Unhandled;
        };
        store.select(id);
        ExplorerEvent::Handled
    }

    fn select_parent(&mut self, store: &mut ConceptStore) -> ExplorerEvent {
        let parent = store
            .tree()
            .selected_id()
            .and_then(|id| self.row_of(id))
            .and_then(|row| self.visible_rows.get(row))
            .and_then(|row| row.parent);
        let Some(parent) = parent else {
            return ExplorerEvent::Unhandled;
        };
        store.select(parent);
        ExplorerEvent::Handled
    }

    fn activate(&mut self, store: &mut ConceptStore) -> ExplorerEvent {
        let Some((id, kind, loading, open, loaded)) = Self::selected_node(store.tree()) else {
            return ExplorerEvent::Unhandled;
        };
        if loading {
            // User interaction must not toggle a node mid-fetch.
            return ExplorerEvent::Handled;
        }
        if !kind.is_expandable() {
            return ExplorerEvent::OpenSource(id);
        }
        if open {
            store.compress(id);
            ExplorerEvent::Handled
        } else if loaded {
            // Cached children: re-open synchronously, no fetch.
            store.begin_expand(id);
            ExplorerEvent::Handled
        } else {
            ExplorerEvent::Expand(id)
        }
    }

    fn expand_selected(&mut self, store: &mut ConceptStore) -> ExplorerEvent {
        let Some((id, kind, loading, open, loaded)) = Self::selected_node(store.tree()) else {
            return ExplorerEvent::Unhandled;
        };
        if !kind.is_expandable() {
            return ExplorerEvent::Unhandled;
        }
        if loading || open {
            return ExplorerEvent::Handled;
        }
        if loaded {
            store.begin_expand(id);
            ExplorerEvent::Handled
        } else {
            ExplorerEvent::Expand(id)
        }
    }

    fn compress_selected(&mut self, store: &mut ConceptStore) -> ExplorerEvent {
        let Some((id, _, loading, open, _)) = Self::selected_node(store.tree()) else {
            return ExplorerEvent::Unhandled;
        };
        if loading {
            return ExplorerEvent::Handled;
        }
        if open {
            store.compress(id);
            ExplorerEvent::Handled
        } else {
            // Already closed: behave like "go to parent".
            self.select_parent(store)
        }
    }

    fn menu_entry(&mut self, store: &mut ConceptStore, entry: MenuAction) -> ExplorerEvent {
        let Some((id, kind, ..)) = Self::selected_node(store.tree()) else {
            return ExplorerEvent::Unhandled;
        };
        if !menu_actions(kind).contains(&entry) {
            return ExplorerEvent::Unhandled;
        }
        if !entry.is_supported() {
            return ExplorerEvent::Unsupported(entry);
        }
        match entry {
            MenuAction::ViewSource => ExplorerEvent::OpenSource(id),
            MenuAction::ServiceJson => ExplorerEvent::ServiceJson(id),
            MenuAction::RunTests => ExplorerEvent::RunTests(id),
            // is_supported() already filtered the rename/move family.
            _ => ExplorerEvent::Unsupported(entry),
        }
    }

    #[allow(clippy::type_complexity)]
    fn selected_node(
        tree: &ConceptTree,
    ) -> Option<(ConceptId, crate::node::ConceptKind, bool, bool, bool)> {
        let id = tree.selected_id()?;
        let node = tree.get(id)?;
        Some((
            id,
            node.kind(),
            node.is_loading(),
            node.is_open(),
            node.load().is_loaded(),
        ))
    }
}

use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;

use crate::node::{ConceptId, ConceptNode, ConceptRecord};

/// Authoritative mapping from node id to node record.
///
/// Consumers read through the accessors below; all mutation goes through
/// [`crate::ConceptStore`], which keeps single-writer discipline over the
/// collection.
pub struct ConceptTree {
    nodes: FxHashMap<ConceptId, ConceptNode>,
    root: Option<ConceptId>,
    selected: Option<ConceptId>,
    // Bumped on every structural or flag change so view caches can tell
    // when their visible-row snapshot went stale.
    revision: u64,
}

impl ConceptTree {
    pub fn new(root: ConceptRecord) -> Self {
        let root_id = root.id;
        let mut nodes = FxHashMap::with_capacity_and_hasher(16, FxBuildHasher);
        nodes.insert(root_id, ConceptNode::from(root));
        Self {
            nodes,
            root: Some(root_id),
            selected: None,
            revision: 0,
        }
    }

    pub fn empty() -> Self {
        Self {
            nodes: FxHashMap::with_hasher(FxBuildHasher),
            root: None,
            selected: None,
            revision: 0,
        }
    }

    #[inline]
    pub const fn root(&self) -> Option<ConceptId> {
        self.root
    }

    #[inline]
    pub fn get(&self, id: ConceptId) -> Option<&ConceptNode> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: ConceptId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub const fn selected_id(&self) -> Option<ConceptId> {
        self.selected
    }

    #[inline]
    pub fn is_selected(&self, id: ConceptId) -> bool {
        self.selected == Some(id)
    }

    #[inline]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Iterates over all known nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &ConceptNode> {
        self.nodes.values()
    }

    /// Children of `id` that currently resolve in the collection.
    ///
    /// Empty while the node is unloaded or a fetch is in flight. Ids that
    /// no longer resolve are filtered out, so a stale reference left by
    /// the backend never surfaces as a phantom row.
    pub fn visible_children(&self, id: ConceptId) -> SmallVec<[ConceptId; 8]> {
        let Some(children) = self.get(id).and_then(ConceptNode::children) else {
            return SmallVec::new();
        };
        children
            .iter()
            .copied()
            .filter(|child| self.nodes.contains_key(child))
            .collect()
    }

    pub(crate) fn node_mut(&mut self, id: ConceptId) -> Option<&mut ConceptNode> {
        self.revision += 1;
        self.nodes.get_mut(&id)
    }

    pub(crate) fn insert(&mut self, record: ConceptRecord) {
        self.revision += 1;
        self.nodes.insert(record.id, ConceptNode::from(record));
    }

    pub(crate) fn set_selected(&mut self, selected: Option<ConceptId>) {
        if self.selected != selected {
            self.revision += 1;
        }
        self.selected = selected;
    }

    pub(crate) fn close_all(&mut self) {
        self.revision += 1;
        for node in self.nodes.values_mut() {
            node.open = false;
        }
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ConceptKind, LoadState};

    fn record(id: u64, kind: ConceptKind) -> ConceptRecord {
        ConceptRecord::new(ConceptId(id), format!("n{id}"), kind)
    }

    #[test]
    fn visible_children_filters_unresolvable_ids() {
        let mut tree = ConceptTree::new(record(0, ConceptKind::Package));
        tree.insert(record(1, ConceptKind::Class));
        // Id 2 is referenced but never inserted.
        tree.node_mut(ConceptId(0)).unwrap().load =
            LoadState::Loaded(vec![ConceptId(1), ConceptId(2)]);

        let visible = tree.visible_children(ConceptId(0));
        assert_eq!(visible.as_slice(), &[ConceptId(1)]);
    }

    #[test]
    fn visible_children_empty_while_loading() {
        let mut tree = ConceptTree::new(record(0, ConceptKind::Package));
        tree.node_mut(ConceptId(0)).unwrap().load = LoadState::Loading;

        assert!(tree.visible_children(ConceptId(0)).is_empty());
    }

    #[test]
    fn visible_children_empty_for_unknown_node() {
        let tree = ConceptTree::new(record(0, ConceptKind::Package));
        assert!(tree.visible_children(ConceptId(42)).is_empty());
    }

    #[test]
    fn close_all_clears_selection() {
        let mut tree = ConceptTree::new(record(0, ConceptKind::Package));
        tree.set_selected(Some(ConceptId(0)));
        tree.node_mut(ConceptId(0)).unwrap().open = true;

        tree.close_all();

        assert_eq!(tree.selected_id(), None);
        assert!(!tree.get(ConceptId(0)).unwrap().is_open());
    }
}

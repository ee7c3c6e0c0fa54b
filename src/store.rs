use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::ExplorerError;
use crate::node::{ConceptId, ConceptRecord, LoadState};
use crate::source::ConceptSource;
use crate::tree::ConceptTree;

/// Single writer over the node collection.
///
/// The store applies the per-node loading protocol
/// `Unloaded -> Loading -> Loaded` and the synchronous commands
/// (compress, select, collapse-all). Every asynchronous failure is sent
/// to the error channel returned by [`ConceptStore::new`] instead of
/// propagating into the view.
pub struct ConceptStore {
    tree: ConceptTree,
    source: Arc<dyn ConceptSource>,
    errors: UnboundedSender<ExplorerError>,
}

impl ConceptStore {
    /// Creates a store rooted at `root` together with the receiving end
    /// of the unhandled-error channel.
    pub fn new(
        root: ConceptRecord,
        source: Arc<dyn ConceptSource>,
    ) -> (Self, UnboundedReceiver<ExplorerError>) {
        let (errors, receiver) = mpsc::unbounded_channel();
        (
            Self {
                tree: ConceptTree::new(root),
                source,
                errors,
            },
            receiver,
        )
    }

    #[inline]
    pub const fn tree(&self) -> &ConceptTree {
        &self.tree
    }

    /// First phase of an expand: moves an unloaded node to `Loading`.
    ///
    /// Returns `true` when a fetch should be started. Expanding a node
    /// that is already loading is suppressed (a second trigger is a
    /// no-op); expanding a loaded node only re-opens it from cache.
    pub fn begin_expand(&mut self, id: ConceptId) -> bool {
        let Some((expandable, loading, loaded)) = self.tree.get(id).map(|node| {
            (
                node.kind().is_expandable(),
                node.is_loading(),
                node.load().is_loaded(),
            )
        }) else {
            self.report(ExplorerError::UnknownNode(id));
            return false;
        };
        if !expandable {
            self.report(ExplorerError::NotExpandable(id));
            return false;
        }
        if loading {
            tracing::debug!(node = %id, "expand suppressed, fetch already in flight");
            return false;
        }
        if loaded {
            if let Some(node) = self.tree.node_mut(id) {
                node.open = true;
            }
            return false;
        }
        if let Some(node) = self.tree.node_mut(id) {
            node.load = LoadState::Loading;
        }
        true
    }

    /// Second phase of an expand: applies the fetch result.
    ///
    /// On success the fetched children join the collection and the node
    /// opens; on failure the node falls back to `Unloaded`/closed and the
    /// error goes to the shared channel. Returns `true` on success.
    pub fn complete_expand(
        &mut self,
        id: ConceptId,
        result: anyhow::Result<Vec<ConceptRecord>>,
    ) -> bool {
        let loading = self.tree.get(id).is_some_and(|node| node.is_loading());
        if !loading {
            // Stale completion: the node was never moved to Loading by us.
            tracing::debug!(node = %id, "ignoring completion for node not in Loading state");
            return false;
        }

        match result {
            Ok(records) => {
                let child_ids: Vec<ConceptId> = records.iter().map(|r| r.id).collect();
                for record in records {
                    self.tree.insert(record);
                }
                if let Some(node) = self.tree.node_mut(id) {
                    node.load = LoadState::Loaded(child_ids);
                    node.open = true;
                }
                true
            }
            Err(err) => {
                if let Some(node) = self.tree.node_mut(id) {
                    node.load = LoadState::Unloaded;
                    node.open = false;
                }
                self.report(ExplorerError::Fetch {
                    id,
                    reason: err.to_string(),
                });
                false
            }
        }
    }

    /// Expands a node, fetching its children if they are not cached yet.
    ///
    /// Returns `true` if the node ended up open with loaded children.
    pub async fn expand(&mut self, id: ConceptId) -> bool {
        if !self.begin_expand(id) {
            // Either a cache re-open (now open) or a suppressed/invalid
            // request; in both cases there is nothing to fetch.
            return self.tree.get(id).is_some_and(|n| n.is_open());
        }
        let result = self.source.fetch_children(id).await;
        self.complete_expand(id, result)
    }

    /// Hides a node's children without discarding them. Never re-fetches.
    pub fn compress(&mut self, id: ConceptId) {
        if let Some(node) = self.tree.node_mut(id) {
            node.open = false;
        }
    }

    /// Closes every known node and clears the selection.
    pub fn collapse_all(&mut self) {
        self.tree.close_all();
    }

    /// Selects `id` if it is present in the collection.
    pub fn select(&mut self, id: ConceptId) -> bool {
        if self.tree.contains(id) {
            self.tree.set_selected(Some(id));
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.tree.set_selected(None);
    }

    /// Resolves the node's source location and asks the backend to
    /// reveal it. Failures go to the error channel.
    pub async fn open_source(&mut self, id: ConceptId) {
        let Some(location) = self.tree.get(id).and_then(|n| n.source().cloned()) else {
            self.report(ExplorerError::NoSource(id));
            return;
        };
        if let Err(err) = self.source.reveal(&location).await {
            self.report(ExplorerError::Reveal {
                location,
                reason: err.to_string(),
            });
        }
    }

    fn report(&self, err: ExplorerError) {
        tracing::warn!(error = %err, "explorer error");
        // The receiver may be gone during shutdown; nothing else to do.
        let _ = self.errors.send(err);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::node::{ConceptKind, SourceLocation};

    struct FixtureSource {
        children: Mutex<rustc_hash::FxHashMap<ConceptId, Vec<ConceptRecord>>>,
        fail_fetch: bool,
        fail_reveal: bool,
    }

    impl FixtureSource {
        fn new() -> Self {
            Self {
                children: Mutex::new(rustc_hash::FxHashMap::default()),
                fail_fetch: false,
                fail_reveal: false,
            }
        }

        fn with_children(self, id: ConceptId, children: Vec<ConceptRecord>) -> Self {
            self.children.lock().unwrap().insert(id, children);
            self
        }
    }

    #[async_trait]
    impl ConceptSource for FixtureSource {
        async fn fetch_children(&self, id: ConceptId) -> anyhow::Result<Vec<ConceptRecord>> {
            if self.fail_fetch {
                anyhow::bail!("backend unavailable");
            }
            Ok(self
                .children
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .unwrap_or_default())
        }

        async fn reveal(&self, _location: &SourceLocation) -> anyhow::Result<()> {
            if self.fail_reveal {
                anyhow::bail!("no viewer registered");
            }
            Ok(())
        }
    }

    fn root() -> ConceptRecord {
        ConceptRecord::new(ConceptId(0), "model", ConceptKind::Package)
    }

    fn class(id: u64) -> ConceptRecord {
        ConceptRecord::new(ConceptId(id), format!("Class{id}"), ConceptKind::Class)
    }

    #[tokio::test]
    async fn expand_transitions_unloaded_to_loaded_and_open() {
        let source =
            Arc::new(FixtureSource::new().with_children(ConceptId(0), vec![class(1), class(2)]));
        let (mut store, _errors) = ConceptStore::new(root(), source);

        assert!(store.expand(ConceptId(0)).await);

        let node = store.tree().get(ConceptId(0)).unwrap();
        assert!(node.is_open());
        assert_eq!(node.children(), Some(&[ConceptId(1), ConceptId(2)][..]));
        assert!(store.tree().contains(ConceptId(1)));
        assert!(store.tree().contains(ConceptId(2)));
    }

    #[test]
    fn begin_expand_moves_node_to_loading() {
        let source = Arc::new(FixtureSource::new());
        let (mut store, _errors) = ConceptStore::new(root(), source);

        assert!(store.begin_expand(ConceptId(0)));
        assert!(store.tree().get(ConceptId(0)).unwrap().is_loading());
    }

    #[test]
    fn expand_while_loading_is_a_noop() {
        let source = Arc::new(FixtureSource::new());
        let (mut store, _errors) = ConceptStore::new(root(), source);

        assert!(store.begin_expand(ConceptId(0)));
        // Second trigger while the fetch is in flight must be suppressed.
        assert!(!store.begin_expand(ConceptId(0)));
        assert!(store.tree().get(ConceptId(0)).unwrap().is_loading());
        assert!(!store.tree().get(ConceptId(0)).unwrap().is_open());
    }

    #[tokio::test]
    async fn failed_fetch_returns_node_to_unloaded_and_reports() {
        let mut source = FixtureSource::new();
        source.fail_fetch = true;
        let (mut store, mut errors) = ConceptStore::new(root(), Arc::new(source));

        assert!(!store.expand(ConceptId(0)).await);

        let node = store.tree().get(ConceptId(0)).unwrap();
        assert_eq!(node.load(), &LoadState::Unloaded);
        assert!(!node.is_open());
        assert!(matches!(
            errors.try_recv(),
            Ok(ExplorerError::Fetch { id: ConceptId(0), .. })
        ));
    }

    #[tokio::test]
    async fn expand_on_loaded_node_reopens_without_refetch() {
        let source =
            Arc::new(FixtureSource::new().with_children(ConceptId(0), vec![class(1)]));
        let (mut store, _errors) =
            ConceptStore::new(root(), Arc::clone(&source) as Arc<dyn ConceptSource>);

        assert!(store.expand(ConceptId(0)).await);
        store.compress(ConceptId(0));
        // Change the backend's answer; a refetch would pick it up.
        source
            .children
            .lock()
            .unwrap()
            .insert(ConceptId(0), vec![class(9)]);
        assert!(store.expand(ConceptId(0)).await);

        let node = store.tree().get(ConceptId(0)).unwrap();
        assert!(node.is_open());
        assert_eq!(node.children(), Some(&[ConceptId(1)][..]));
    }

    #[tokio::test]
    async fn compress_keeps_cached_children() {
        let source =
            Arc::new(FixtureSource::new().with_children(ConceptId(0), vec![class(1)]));
        let (mut store, _errors) = ConceptStore::new(root(), source);
        store.expand(ConceptId(0)).await;

        store.compress(ConceptId(0));

        let node = store.tree().get(ConceptId(0)).unwrap();
        assert!(!node.is_open());
        assert_eq!(node.children(), Some(&[ConceptId(1)][..]));
    }

    #[tokio::test]
    async fn collapse_all_closes_everything_and_clears_selection() {
        let source = Arc::new(
            FixtureSource::new()
                .with_children(ConceptId(0), vec![class(1), class(2)])
                .with_children(ConceptId(1), vec![class(3)]),
        );
        let (mut store, _errors) = ConceptStore::new(root(), source);
        store.expand(ConceptId(0)).await;
        store.expand(ConceptId(1)).await;
        store.select(ConceptId(3));

        store.collapse_all();

        assert_eq!(store.tree().selected_id(), None);
        assert!(store.tree().nodes().all(|node| !node.is_open()));
        // Children stay cached.
        assert!(store.tree().get(ConceptId(0)).unwrap().load().is_loaded());
    }

    #[test]
    fn expand_on_non_expandable_kind_reports() {
        let source = Arc::new(FixtureSource::new());
        let (mut store, mut errors) = ConceptStore::new(
            ConceptRecord::new(ConceptId(0), "size", ConceptKind::Property),
            source,
        );

        assert!(!store.begin_expand(ConceptId(0)));
        assert!(matches!(
            errors.try_recv(),
            Ok(ExplorerError::NotExpandable(ConceptId(0)))
        ));
    }

    #[tokio::test]
    async fn open_source_without_location_reports() {
        let source = Arc::new(FixtureSource::new());
        let (mut store, mut errors) = ConceptStore::new(root(), source);

        store.open_source(ConceptId(0)).await;

        assert!(matches!(
            errors.try_recv(),
            Ok(ExplorerError::NoSource(ConceptId(0)))
        ));
    }

    #[tokio::test]
    async fn failed_reveal_reports_on_channel() {
        let mut source = FixtureSource::new();
        source.fail_reveal = true;
        let record = ConceptRecord::new(ConceptId(0), "Order", ConceptKind::Class)
            .with_source(SourceLocation::new("model/orders.pure", 4, 1));
        let (mut store, mut errors) = ConceptStore::new(record, Arc::new(source));

        store.open_source(ConceptId(0)).await;

        assert!(matches!(
            errors.try_recv(),
            Ok(ExplorerError::Reveal { .. })
        ));
    }

    #[test]
    fn select_unknown_node_is_rejected() {
        let source = Arc::new(FixtureSource::new());
        let (mut store, _errors) = ConceptStore::new(root(), source);

        assert!(!store.select(ConceptId(99)));
        assert_eq!(store.tree().selected_id(), None);
    }
}

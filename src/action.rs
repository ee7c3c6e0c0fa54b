use crate::menu::MenuAction;
use crate::node::ConceptId;

/// Actions a user or application can initiate on the explorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplorerAction {
    /// Move selection to the previous visible row.
    SelectPrev,
    /// Move selection to the next visible row.
    SelectNext,
    /// Move selection to the parent node.
    SelectParent,
    /// Select the first visible row.
    SelectFirst,
    /// Select the last visible row.
    SelectLast,
    /// Double-click equivalent: toggle expandable nodes, open the source
    /// of everything else.
    Activate,
    /// Expand the selected node (loads children on first use).
    Expand,
    /// Compress the selected node; on an already-closed node, move to its
    /// parent instead.
    Compress,
    /// Close every node and clear the selection.
    CollapseAll,
    /// Navigate to the selected node's source location.
    ViewSource,
    /// A context-menu entry was invoked for the selected node.
    Menu(MenuAction),
}

/// Result of handling an action.
///
/// Synchronous commands are applied immediately and come back as
/// `Handled`; anything that needs the backend is forwarded so the caller
/// can drive it on its runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplorerEvent {
    /// The action was applied and state was updated.
    Handled,
    /// The action was ignored (nothing selected, loading node, entry not
    /// offered for this kind).
    Unhandled,
    /// Caller should run [`crate::ConceptStore::expand`] for the node.
    Expand(ConceptId),
    /// Caller should run [`crate::ConceptStore::open_source`] for the node.
    OpenSource(ConceptId),
    /// Caller should open the service-execution URL for the function.
    ServiceJson(ConceptId),
    /// Caller should run the package's tests.
    RunTests(ConceptId),
    /// The entry exists but is intentionally unavailable; show a notice.
    Unsupported(MenuAction),
}

//! Lazy-loading concept tree explorer widget for ratatui.
//!
//! The crate pairs a single-writer [`ConceptStore`] (which owns the node
//! collection and the `Unloaded -> Loading -> Loaded` expansion protocol)
//! with a stateful [`ConceptTreeView`] widget. Fetches go through the
//! async [`ConceptSource`] boundary; failures land on a shared error
//! channel instead of the view.
//!
//! Feature flags:
//! - `keymap`: crossterm-based key bindings and `ExplorerState::handle_key`.
//! - `serde`: serde support for the inbound [`ConceptRecord`] data shape.

mod action;
mod columns;
mod context;
mod drag;
mod error;
mod glyphs;
#[cfg(feature = "keymap")]
mod keymap;
mod menu;
mod node;
pub mod prelude;
mod source;
mod state;
mod store;
mod style;
mod tree;
mod validation;
mod widget;

pub use action::{ExplorerAction, ExplorerEvent};
pub use columns::{
    ColumnDef, ColumnFn, ConceptColumns, LabelOnly, SimpleColumns, kind_cell, location_cell,
};
pub use context::RowContext;
pub use drag::DragPayload;
pub use error::ExplorerError;
pub use glyphs::{ExplorerGlyphs, concept_label_cell, concept_label_line, sanitize_label};
#[cfg(feature = "keymap")]
pub use keymap::{ExplorerKeyBindings, KeymapProfile};
pub use menu::{MenuAction, ServiceMode, menu_actions, service_url};
pub use node::{ConceptId, ConceptKind, ConceptNode, ConceptRecord, LoadState, SourceLocation};
pub use source::ConceptSource;
pub use state::{ExplorerState, VisibleRow};
pub use store::ConceptStore;
pub use style::{ExplorerStyle, ScrollPolicy};
pub use tree::ConceptTree;
pub use validation::{ExprHandle, ValidationSpec};
pub use widget::ConceptTreeView;

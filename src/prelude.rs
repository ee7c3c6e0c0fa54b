pub use crate::{
    ColumnDef, ColumnFn, ConceptColumns, ConceptId, ConceptKind, ConceptNode, ConceptRecord,
    ConceptSource, ConceptStore, ConceptTree, ConceptTreeView, DragPayload, ExplorerAction,
    ExplorerError, ExplorerEvent, ExplorerGlyphs, ExplorerState, ExplorerStyle, ExprHandle,
    LabelOnly, LoadState, MenuAction, RowContext, ScrollPolicy, ServiceMode, SimpleColumns,
    SourceLocation, ValidationSpec, VisibleRow, concept_label_cell, concept_label_line, kind_cell,
    location_cell, menu_actions, sanitize_label, service_url,
};

#[cfg(feature = "keymap")]
pub use crate::{ExplorerKeyBindings, KeymapProfile};

// Minimal example: expand a tiny concept tree from an in-memory backend
// and render it into a buffer (no terminal required).
use std::sync::Arc;

use async_trait::async_trait;
use ratatui::layout::Rect;
use ratatui::prelude::Buffer;
use ratatui::widgets::StatefulWidget;

use tui_concept_explorer::{
    ConceptId, ConceptKind, ConceptRecord, ConceptSource, ConceptStore, ConceptTreeView,
    ExplorerState, ExplorerStyle, LabelOnly, SourceLocation,
};

// Backend fixture: the root package contains two classes.
struct Fixture;

#[async_trait]
impl ConceptSource for Fixture {
    async fn fetch_children(&self, id: ConceptId) -> anyhow::Result<Vec<ConceptRecord>> {
        if id != ConceptId(0) {
            return Ok(Vec::new());
        }
        Ok(vec![
            ConceptRecord::new(ConceptId(1), "Order", ConceptKind::Class),
            ConceptRecord::new(ConceptId(2), "Customer", ConceptKind::Class),
        ])
    }

    async fn reveal(&self, location: &SourceLocation) -> anyhow::Result<()> {
        println!("reveal {location}");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let root = ConceptRecord::new(ConceptId(0), "model", ConceptKind::Package);
    let (mut store, _errors) = ConceptStore::new(root, Arc::new(Fixture));

    // First expand fetches the children; the tree caches them after that.
    store.expand(ConceptId(0)).await;

    let mut state = ExplorerState::new();
    let widget = ConceptTreeView::new(store.tree(), &LabelOnly, ExplorerStyle::default());

    let area = Rect::new(0, 0, 40, 8);
    let mut buffer = Buffer::empty(area);
    widget.render(area, &mut buffer, &mut state);
}

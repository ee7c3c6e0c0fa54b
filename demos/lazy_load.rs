// Lazy-loading example: drive the expansion protocol by hand, watch the
// error channel, and build a service URL for a function node.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use tui_concept_explorer::{
    ConceptId, ConceptKind, ConceptRecord, ConceptSource, ConceptStore, ExplorerAction,
    ExplorerEvent, ExplorerState, ServiceMode, SourceLocation, service_url,
};

// A backend that answers slowly and fails for one node.
struct SlowSource;

#[async_trait]
impl ConceptSource for SlowSource {
    async fn fetch_children(&self, id: ConceptId) -> anyhow::Result<Vec<ConceptRecord>> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        match id.0 {
            0 => Ok(vec![
                ConceptRecord::new(ConceptId(1), "trading", ConceptKind::Package),
                ConceptRecord::new(ConceptId(2), "priceOf", ConceptKind::Function)
                    .with_source(SourceLocation::new("model/pricing.pure", 14, 1)),
            ]),
            1 => anyhow::bail!("backend timed out"),
            _ => Ok(Vec::new()),
        }
    }

    async fn reveal(&self, location: &SourceLocation) -> anyhow::Result<()> {
        println!("open viewer at {location}");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let root = ConceptRecord::new(ConceptId(0), "model", ConceptKind::Package);
    let (mut store, mut errors) = ConceptStore::new(root, Arc::new(SlowSource));
    let mut state = ExplorerState::new();

    state.handle_action(&mut store, ExplorerAction::SelectFirst);
    if let ExplorerEvent::Expand(id) = state.handle_action(&mut store, ExplorerAction::Activate) {
        store.expand(id).await;
    }

    // The nested package fails to load and ends up back at Unloaded.
    store.expand(ConceptId(1)).await;
    if let Ok(err) = errors.try_recv() {
        println!("unhandled error: {err}");
    }

    let base = Url::parse("http://localhost:8080/ide/").expect("static URL");
    let url = service_url(&base, ConceptId(2), ServiceMode::Json).expect("base is a valid URL");
    println!("service endpoint: {url}");
}

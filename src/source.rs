use async_trait::async_trait;

use crate::node::{ConceptId, ConceptRecord, SourceLocation};

/// Asynchronous boundary to the backend that owns the concept data.
///
/// Implementations are free to hit the network, a parser service, or an
/// in-memory fixture. Fetches are never cancelled by the explorer; an
/// in-flight call runs to completion or failure.
#[async_trait]
pub trait ConceptSource: Send + Sync {
    /// Fetches the direct children of `id`.
    async fn fetch_children(&self, id: ConceptId) -> anyhow::Result<Vec<ConceptRecord>>;

    /// Asks the host environment to reveal a source location, e.g. by
    /// focusing an editor at `(file, line, column)`.
    async fn reveal(&self, location: &SourceLocation) -> anyhow::Result<()>;
}

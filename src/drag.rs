use crate::node::{ConceptId, ConceptKind};

/// Payload attached when a node row acts as a drag source.
///
/// Drop targets accept or reject on the tag alone: only class nodes
/// carry a usable payload, everything else is tagged unsupported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPayload {
    Class(ConceptId),
    Unsupported,
}

impl DragPayload {
    pub const fn for_node(kind: ConceptKind, id: ConceptId) -> Self {
        match kind {
            ConceptKind::Class => Self::Class(id),
            _ => Self::Unsupported,
        }
    }

    /// Tag used by drop targets to accept or reject the drag.
    pub const fn kind_tag(&self) -> &'static str {
        match self {
            Self::Class(_) => "CLASS",
            Self::Unsupported => "UNSUPPORTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_nodes_carry_class_payload() {
        let payload = DragPayload::for_node(ConceptKind::Class, ConceptId(5));
        assert_eq!(payload, DragPayload::Class(ConceptId(5)));
        assert_eq!(payload.kind_tag(), "CLASS");
    }

    #[test]
    fn every_other_kind_is_unsupported() {
        for kind in [
            ConceptKind::Package,
            ConceptKind::Association,
            ConceptKind::Property,
            ConceptKind::Function,
            ConceptKind::Other,
        ] {
            let payload = DragPayload::for_node(kind, ConceptId(5));
            assert_eq!(payload, DragPayload::Unsupported);
            assert_eq!(payload.kind_tag(), "UNSUPPORTED");
        }
    }
}

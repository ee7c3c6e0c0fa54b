use crate::node::SourceLocation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque handle to a validation expression owned by the parser arena.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExprHandle(pub u64);

/// Source location paired with the validation expression attached there.
///
/// Built once by the grammar step that parses a merge-operation function
/// and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationSpec {
    location: SourceLocation,
    expression: ExprHandle,
}

impl ValidationSpec {
    pub const fn new(location: SourceLocation, expression: ExprHandle) -> Self {
        Self {
            location,
            expression,
        }
    }

    #[inline]
    pub const fn location(&self) -> &SourceLocation {
        &self.location
    }

    #[inline]
    pub const fn expression(&self) -> ExprHandle {
        self.expression
    }
}

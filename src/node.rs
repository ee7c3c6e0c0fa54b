use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable node identifier within a concept tree.
///
/// Identifiers are assigned by the backend and must stay stable between
/// fetches (selection and open flags are keyed by them).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptId(pub u64);

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind tag of a concept node (closed set).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConceptKind {
    Package,
    Class,
    Association,
    Property,
    Function,
    Other,
}

impl ConceptKind {
    /// Returns `true` for container kinds that get an expand/collapse
    /// indicator and may be lazily loaded.
    pub const fn is_expandable(self) -> bool {
        matches!(self, Self::Package | Self::Class | Self::Association)
    }

    /// Short display name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Class => "class",
            Self::Association => "association",
            Self::Property => "property",
            Self::Function => "function",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a concept in its defining model source.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Loading lifecycle of a node's children.
///
/// Children exist exactly when the node is `Loaded`; `Loading` marks an
/// in-flight fetch and suppresses further expand requests for the node.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded(Vec<ConceptId>),
}

impl LoadState {
    #[inline]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[inline]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Returns the child ids if they have been fetched.
    pub fn children(&self) -> Option<&[ConceptId]> {
        match self {
            Self::Loaded(children) => Some(children),
            Self::Unloaded | Self::Loading => None,
        }
    }
}

/// Inbound data shape supplied by the backend for one concept.
///
/// Records carry no transient explorer flags; a fresh node built from a
/// record starts unloaded and closed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConceptRecord {
    pub id: ConceptId,
    pub label: String,
    pub kind: ConceptKind,
    pub source: Option<SourceLocation>,
}

impl ConceptRecord {
    pub fn new(id: ConceptId, label: impl Into<String>, kind: ConceptKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            source: None,
        }
    }

    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }
}

/// A node in the explorer tree: record data plus transient flags.
#[derive(Clone, Debug)]
pub struct ConceptNode {
    pub(crate) id: ConceptId,
    pub(crate) label: String,
    pub(crate) kind: ConceptKind,
    pub(crate) source: Option<SourceLocation>,
    pub(crate) load: LoadState,
    pub(crate) open: bool,
}

impl ConceptNode {
    #[inline]
    pub const fn id(&self) -> ConceptId {
        self.id
    }

    /// Raw label as supplied by the backend. May contain markup; render
    /// through [`crate::sanitize_label`].
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub const fn kind(&self) -> ConceptKind {
        self.kind
    }

    #[inline]
    pub const fn source(&self) -> Option<&SourceLocation> {
        self.source.as_ref()
    }

    #[inline]
    pub const fn load(&self) -> &LoadState {
        &self.load
    }

    #[inline]
    pub const fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    #[inline]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Child ids once fetched, `None` otherwise.
    pub fn children(&self) -> Option<&[ConceptId]> {
        self.load.children()
    }
}

impl From<ConceptRecord> for ConceptNode {
    fn from(record: ConceptRecord) -> Self {
        Self {
            id: record.id,
            label: record.label,
            kind: record.kind,
            source: record.source,
            load: LoadState::Unloaded,
            open: false,
        }
    }
}

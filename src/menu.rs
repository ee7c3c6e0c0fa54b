use url::Url;

use crate::node::{ConceptId, ConceptKind};

/// Context-menu entries, gated by node kind via [`menu_actions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    RenamePackage,
    RunTests,
    RenameProperty,
    Rename,
    Move,
    ServiceJson,
    ViewSource,
}

impl MenuAction {
    /// User-facing label for the menu entry.
    pub const fn label(self) -> &'static str {
        match self {
            Self::RenamePackage => "Rename package",
            Self::RunTests => "Run tests",
            Self::RenameProperty => "Rename property",
            Self::Rename => "Rename",
            Self::Move => "Move",
            Self::ServiceJson => "Service (JSON)",
            Self::ViewSource => "View Source",
        }
    }

    /// The rename/move family is intentionally not implemented; invoking
    /// those entries yields an informational notice, not an error.
    pub const fn is_supported(self) -> bool {
        match self {
            Self::RunTests | Self::ServiceJson | Self::ViewSource => true,
            Self::RenamePackage | Self::RenameProperty | Self::Rename | Self::Move => false,
        }
    }
}

/// Menu entries offered for a node of the given kind.
pub const fn menu_actions(kind: ConceptKind) -> &'static [MenuAction] {
    use MenuAction::*;
    match kind {
        ConceptKind::Package => &[RenamePackage, RunTests],
        ConceptKind::Property => &[RenameProperty, ViewSource],
        ConceptKind::Function => &[Rename, Move, ServiceJson, ViewSource],
        ConceptKind::Class | ConceptKind::Association | ConceptKind::Other => {
            &[Rename, Move, ViewSource]
        }
    }
}

/// Execution mode for the remote service endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ServiceMode {
    #[default]
    Json,
}

impl ServiceMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
        }
    }
}

/// Builds the `{base}/execute?func={id}&mode={mode}` URL for the
/// "Service (JSON)" entry. The URL is handed to the host environment for
/// a GET in an external viewing context; no response is handled here.
pub fn service_url(
    base: &Url,
    func: ConceptId,
    mode: ServiceMode,
) -> Result<Url, url::ParseError> {
    let mut url = base.join("execute")?;
    url.query_pairs_mut()
        .clear()
        .append_pair("func", &func.to_string())
        .append_pair("mode", mode.as_str());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_menu_is_exactly_rename_package_and_run_tests() {
        assert_eq!(
            menu_actions(ConceptKind::Package),
            &[MenuAction::RenamePackage, MenuAction::RunTests]
        );
    }

    #[test]
    fn property_menu_is_exactly_rename_property_and_view_source() {
        assert_eq!(
            menu_actions(ConceptKind::Property),
            &[MenuAction::RenameProperty, MenuAction::ViewSource]
        );
    }

    #[test]
    fn function_menu_includes_service_json() {
        assert_eq!(
            menu_actions(ConceptKind::Function),
            &[
                MenuAction::Rename,
                MenuAction::Move,
                MenuAction::ServiceJson,
                MenuAction::ViewSource
            ]
        );
    }

    #[test]
    fn other_kinds_get_generic_rename_move_view_source() {
        for kind in [
            ConceptKind::Class,
            ConceptKind::Association,
            ConceptKind::Other,
        ] {
            assert_eq!(
                menu_actions(kind),
                &[MenuAction::Rename, MenuAction::Move, MenuAction::ViewSource]
            );
        }
    }

    #[test]
    fn rename_and_move_entries_are_unsupported_notices() {
        assert!(!MenuAction::Rename.is_supported());
        assert!(!MenuAction::Move.is_supported());
        assert!(!MenuAction::RenamePackage.is_supported());
        assert!(!MenuAction::RenameProperty.is_supported());
        assert!(MenuAction::ViewSource.is_supported());
        assert!(MenuAction::ServiceJson.is_supported());
        assert!(MenuAction::RunTests.is_supported());
    }

    #[test]
    fn service_url_has_execute_path_and_query() {
        let base = Url::parse("http://localhost:8080/ide/").unwrap();
        let url = service_url(&base, ConceptId(42), ServiceMode::Json).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/ide/execute?func=42&mode=json"
        );
    }
}

use crossterm::event::{KeyCode, KeyEvent};

use crate::action::ExplorerAction;
use crate::menu::MenuAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeymapProfile {
    #[default]
    Default,
    Vim,
    Arrows,
}

/// Key bindings for the explorer, resolved per profile.
#[derive(Clone, Copy, Debug)]
pub struct ExplorerKeyBindings {
    profile: KeymapProfile,
}

impl Default for ExplorerKeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerKeyBindings {
    pub const fn new() -> Self {
        Self {
            profile: KeymapProfile::Default,
        }
    }

    pub const fn with_profile(profile: KeymapProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> KeymapProfile {
        self.profile
    }

    pub const fn set_profile(&mut self, profile: KeymapProfile) {
        self.profile = profile;
    }

    pub fn resolve(&self, key: KeyEvent) -> Option<ExplorerAction> {
        let nav_action = match self.profile {
            KeymapProfile::Default => Self::resolve_default_nav(key),
            KeymapProfile::Vim => Self::resolve_vim_nav(key),
            KeymapProfile::Arrows => Self::resolve_arrow_nav(key),
        };
        if nav_action.is_some() {
            return nav_action;
        }

        Self::resolve_common(key)
    }

    const fn resolve_default_nav(key: KeyEvent) -> Option<ExplorerAction> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(ExplorerAction::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(ExplorerAction::SelectNext),
            KeyCode::Left | KeyCode::Char('h') => Some(ExplorerAction::Compress),
            KeyCode::Right | KeyCode::Char('l') => Some(ExplorerAction::Expand),
            _ => None,
        }
    }

    const fn resolve_vim_nav(key: KeyEvent) -> Option<ExplorerAction> {
        match key.code {
            KeyCode::Char('k') => Some(ExplorerAction::SelectPrev),
            KeyCode::Char('j') => Some(ExplorerAction::SelectNext),
            KeyCode::Char('h') => Some(ExplorerAction::Compress),
            KeyCode::Char('l') => Some(ExplorerAction::Expand),
            _ => None,
        }
    }

    const fn resolve_arrow_nav(key: KeyEvent) -> Option<ExplorerAction> {
        match key.code {
            KeyCode::Up => Some(ExplorerAction::SelectPrev),
            KeyCode::Down => Some(ExplorerAction::SelectNext),
            KeyCode::Left => Some(ExplorerAction::Compress),
            KeyCode::Right => Some(ExplorerAction::Expand),
            _ => None,
        }
    }

    const fn resolve_common(key: KeyEvent) -> Option<ExplorerAction> {
        match key.code {
            KeyCode::Enter => Some(ExplorerAction::Activate),
            KeyCode::Char('p') => Some(ExplorerAction::SelectParent),
            KeyCode::Char('c') => Some(ExplorerAction::CollapseAll),
            KeyCode::Char('v') => Some(ExplorerAction::ViewSource),
            KeyCode::Char('s') => Some(ExplorerAction::Menu(MenuAction::ServiceJson)),
            KeyCode::Char('t') => Some(ExplorerAction::Menu(MenuAction::RunTests)),
            KeyCode::Home => Some(ExplorerAction::SelectFirst),
            KeyCode::End => Some(ExplorerAction::SelectLast),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_activates() {
        let bindings = ExplorerKeyBindings::new();
        assert_eq!(
            bindings.resolve(key(KeyCode::Enter)),
            Some(ExplorerAction::Activate)
        );
    }

    #[test]
    fn arrows_profile_ignores_letters() {
        let bindings = ExplorerKeyBindings::with_profile(KeymapProfile::Arrows);
        assert_eq!(bindings.resolve(key(KeyCode::Char('j'))), None);
        assert_eq!(
            bindings.resolve(key(KeyCode::Down)),
            Some(ExplorerAction::SelectNext)
        );
    }

    #[test]
    fn collapse_all_on_c() {
        let bindings = ExplorerKeyBindings::new();
        assert_eq!(
            bindings.resolve(key(KeyCode::Char('c'))),
            Some(ExplorerAction::CollapseAll)
        );
    }
}

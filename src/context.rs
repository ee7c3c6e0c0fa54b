use ratatui::style::Style;

/// Render context for a single visible row.
#[derive(Clone, Copy)]
pub struct RowContext<'a> {
    pub level: u16,
    pub is_tail_stack: &'a [bool],
    pub is_open: bool,
    /// Whether the node kind gets an expand/collapse indicator.
    pub has_indicator: bool,
    pub is_loading: bool,
    pub is_selected: bool,
    pub draw_lines: bool,
    pub line_style: Style,
}

use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::Buffer;
use ratatui::widgets::{
    Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
    Table, TableState,
};
use smallvec::SmallVec;

use crate::columns::{ConceptColumns, LabelOnly};
use crate::context::RowContext;
use crate::glyphs::{ExplorerGlyphs, concept_label_cell, sanitize_label};
use crate::state::{ExplorerState, VisibleRow};
use crate::style::ExplorerStyle;
use crate::tree::ConceptTree;

/// Stateful concept-tree widget (table based).
///
/// Renders the currently open slice of the tree: an expand/collapse
/// indicator for container kinds, a loading marker while a fetch is in
/// flight, and sanitized labels (never raw markup).
pub struct ConceptTreeView<'a, C = LabelOnly>
where
    C: ConceptColumns,
{
    tree: &'a ConceptTree,
    columns: &'a C,
    style: ExplorerStyle<'a>,
    glyphs: ExplorerGlyphs<'a>,
}

impl<'a, C> ConceptTreeView<'a, C>
where
    C: ConceptColumns,
{
    pub const fn new(tree: &'a ConceptTree, columns: &'a C, style: ExplorerStyle<'a>) -> Self {
        Self {
            tree,
            columns,
            style,
            glyphs: ExplorerGlyphs::unicode(),
        }
    }

    pub const fn glyphs(mut self, glyphs: ExplorerGlyphs<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }

    #[inline]
    fn build_rows(&self, rows: &[VisibleRow], state: &ExplorerState) -> Vec<Row<'a>> {
        let mut out = Vec::with_capacity(rows.len());
        for visible in rows {
            let Some(node) = self.tree.get(visible.id) else {
                continue;
            };
            let ctx = RowContext {
                level: visible.level,
                is_tail_stack: visible.is_tail_stack.as_slice(),
                is_open: node.is_open(),
                has_indicator: visible.has_indicator,
                is_loading: visible.is_loading,
                is_selected: self.tree.is_selected(visible.id),
                draw_lines: state.draw_lines(),
                line_style: self.style.line_style,
            };
            let label = sanitize_label(node.label());
            let label_cell = concept_label_cell(&ctx, label, &self.glyphs);
            let mut cells = SmallVec::<[Cell; 4]>::new();
            cells.push(label_cell);
            cells.extend(self.columns.cells(self.tree, visible.id));
            let mut row = Row::new(cells);
            if visible.is_loading {
                row = row.style(self.style.loading_style);
            }
            out.push(row);
        }
        out
    }

    #[inline]
    fn build_table(
        &self,
        rows: Vec<Row<'a>>,
        constraints: &[Constraint],
        block: Block<'a>,
        header: Option<Row<'a>>,
    ) -> Table<'a> {
        let mut table = Table::new(rows, constraints.iter().copied())
            .style(self.style.block_style)
            .block(block)
            .row_highlight_style(self.style.highlight_style)
            .highlight_symbol(self.style.highlight_symbol);
        if let Some(header) = header {
            table = table.header(header);
        }
        table
    }

    #[inline]
    fn render_scrollbar(
        &self,
        area: Rect,
        buf: &mut Buffer,
        state: &ExplorerState,
        inner_height: usize,
        scroll_rows: usize,
    ) {
        let scroll_len = scroll_rows.saturating_add(1);
        let position = state
            .list_state()
            .offset()
            .min(scroll_len.saturating_sub(1));
        let mut scrollbar_state = ScrollbarState::new(scroll_len)
            .position(position)
            .viewport_content_length(inner_height);
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .render(area, buf, &mut scrollbar_state);
    }
}

impl<C> StatefulWidget for ConceptTreeView<'_, C>
where
    C: ConceptColumns,
{
    type State = ExplorerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.ensure_visible_rows(self.tree);

        let header = self.columns.header();
        let header_height = u16::from(header.is_some());

        let mut block = Block::default().borders(self.style.borders);
        if let Some(title) = self.style.title.clone() {
            block = block.title(title);
        }
        block = block
            .style(self.style.block_style)
            .border_style(self.style.border_style);

        let inner_height = block.inner(area).height.saturating_sub(header_height) as usize;
        state.ensure_selection_visible_with_policy(inner_height, self.style.scroll_policy);

        let visible_rows = state.visible_rows();
        let total_rows = visible_rows.len();
        let (range_start, range_end) = if self.style.virtualize_rows {
            let start = state.list_state().offset().min(total_rows);
            let end = (start + inner_height).min(total_rows);
            (start, end)
        } else {
            (0, total_rows)
        };

        let rows = self.build_rows(&visible_rows[range_start..range_end], state);

        let scroll_rows = total_rows.saturating_sub(inner_height);

        let mut local_state = if self.style.virtualize_rows {
            Some(*state.list_state())
        } else {
            None
        };
        let table_state: &mut TableState = local_state.as_mut().map_or_else(
            || state.list_state_mut(),
            |state_ref| {
                *state_ref.offset_mut() = 0;
                if let Some(selected) = state_ref.selected() {
                    if selected < range_start || selected >= range_end {
                        state_ref.select(None);
                    } else {
                        state_ref.select(Some(selected - range_start));
                    }
                }
                state_ref
            },
        );

        let (table_area, table_block, constraints, header, scrollbar_area) = if scroll_rows > 0 {
            let table_area = Rect {
                width: area.width.saturating_sub(1),
                ..area
            };
            let scrollbar_area = Rect {
                x: area.x + area.width - 1,
                y: area.y,
                width: 1,
                height: area.height,
            };
            let mut table_borders = self.style.borders;
            table_borders.remove(Borders::RIGHT);
            let table_block = block.borders(table_borders);
            let constraints = self
                .columns
                .constraints_for_area(table_block.inner(table_area));
            (
                table_area,
                table_block,
                constraints,
                header.clone(),
                Some(scrollbar_area),
            )
        } else {
            let constraints = self.columns.constraints_for_area(block.inner(area));
            (area, block, constraints, header, None)
        };

        let table = self.build_table(rows, constraints.as_slice(), table_block, header);
        table.render(table_area, buf, table_state);

        if let Some(scrollbar_area) = scrollbar_area {
            self.render_scrollbar(scrollbar_area, buf, state, inner_height, scroll_rows);
        }
    }
}

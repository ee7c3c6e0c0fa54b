use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Row};
use smallvec::SmallVec;

use crate::node::ConceptId;
use crate::tree::ConceptTree;

/// Column layout and cell rendering for explorer rows.
///
/// The first (label) column is always the tree itself; implementations
/// add columns such as kind or source location next to it.
pub trait ConceptColumns {
    /// Returns the constraint for the label (tree) column.
    fn label_constraint(&self) -> Constraint;
    /// Returns constraints for the additional columns.
    fn other_constraints(&self) -> &[Constraint];
    /// Returns an optional header row for the table.
    fn header(&self) -> Option<Row<'_>> {
        None
    }
    /// Returns cells for the additional columns of a row.
    fn cells<'a>(&'a self, tree: &'a ConceptTree, id: ConceptId) -> SmallVec<[Cell<'a>; 4]>;
    /// Returns constraints for all columns based on the available area.
    fn constraints_for_area(&self, _area: Rect) -> SmallVec<[Constraint; 4]> {
        let mut constraints = SmallVec::<[Constraint; 4]>::new();
        constraints.push(self.label_constraint());
        constraints.extend_from_slice(self.other_constraints());
        constraints
    }
}

/// Function pointer type for rendering a single column cell.
pub type ColumnFn = for<'a> fn(&'a ConceptTree, ConceptId) -> Cell<'a>;

/// Column definition: header label, width constraint, and cell renderer.
#[derive(Clone, Copy)]
pub struct ColumnDef {
    pub header: &'static str,
    pub constraint: Constraint,
    pub cell: ColumnFn,
}

impl ColumnDef {
    pub const fn new(header: &'static str, constraint: Constraint, cell: ColumnFn) -> Self {
        Self {
            header,
            constraint,
            cell,
        }
    }
}

/// Cell renderer showing the node's kind tag.
pub fn kind_cell(tree: &ConceptTree, id: ConceptId) -> Cell<'_> {
    tree.get(id)
        .map_or_else(|| Cell::from(""), |node| Cell::from(node.kind().as_str()))
}

/// Cell renderer showing the node's `file:line:column`, if any.
pub fn location_cell(tree: &ConceptTree, id: ConceptId) -> Cell<'_> {
    tree.get(id)
        .and_then(|node| node.source())
        .map_or_else(|| Cell::from(""), |loc| Cell::from(loc.to_string()))
}

/// Label-only layout with no extra columns and no header.
pub struct LabelOnly;

impl ConceptColumns for LabelOnly {
    fn label_constraint(&self) -> Constraint {
        Constraint::Percentage(100)
    }

    fn other_constraints(&self) -> &[Constraint] {
        &[]
    }

    fn cells<'a>(&'a self, _tree: &'a ConceptTree, _id: ConceptId) -> SmallVec<[Cell<'a>; 4]> {
        SmallVec::new()
    }
}

/// Fixed-width column layout with optional header.
pub struct SimpleColumns<const N: usize> {
    label_constraint: Constraint,
    label_header: &'static str,
    columns: [ColumnDef; N],
    constraints: [Constraint; N],
    header_style: Style,
    show_header: bool,
}

impl<const N: usize> SimpleColumns<N> {
    pub fn new(
        label_constraint: Constraint,
        label_header: &'static str,
        columns: [ColumnDef; N],
    ) -> Self {
        let constraints = std::array::from_fn(|idx| columns[idx].constraint);
        Self {
            label_constraint,
            label_header,
            columns,
            constraints,
            header_style: Style::default(),
            show_header: true,
        }
    }

    /// Sets the header row style.
    pub const fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    /// Disables the header row.
    pub const fn without_header(mut self) -> Self {
        self.show_header = false;
        self
    }
}

impl<const N: usize> ConceptColumns for SimpleColumns<N> {
    fn label_constraint(&self) -> Constraint {
        self.label_constraint
    }

    fn other_constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn header(&self) -> Option<Row<'_>> {
        if !self.show_header {
            return None;
        }

        let mut cells = SmallVec::<[Cell; 4]>::new();
        cells.push(Cell::from(self.label_header));
        for column in &self.columns {
            cells.push(Cell::from(column.header));
        }

        Some(Row::new(cells).style(self.header_style))
    }

    fn cells<'a>(&'a self, tree: &'a ConceptTree, id: ConceptId) -> SmallVec<[Cell<'a>; 4]> {
        let mut cells = SmallVec::<[Cell<'a>; 4]>::new();
        for column in &self.columns {
            cells.push((column.cell)(tree, id));
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ConceptKind, ConceptRecord, SourceLocation};

    fn tree() -> ConceptTree {
        ConceptTree::new(
            ConceptRecord::new(ConceptId(0), "Order", ConceptKind::Class)
                .with_source(SourceLocation::new("model/orders.pure", 5, 2)),
        )
    }

    #[test]
    fn simple_columns_render_kind_and_location() {
        let tree = tree();
        let columns = SimpleColumns::new(
            Constraint::Percentage(60),
            "Concept",
            [
                ColumnDef::new("Kind", Constraint::Length(12), kind_cell),
                ColumnDef::new("Location", Constraint::Length(24), location_cell),
            ],
        );

        let cells = columns.cells(&tree, ConceptId(0));
        assert_eq!(cells.len(), 2);
        assert!(columns.header().is_some());
        assert_eq!(
            columns.constraints_for_area(Rect::new(0, 0, 80, 1)).len(),
            3
        );
    }

    #[test]
    fn cells_for_missing_node_are_empty() {
        let tree = tree();
        // Renderers must not panic on a stale id.
        let _ = kind_cell(&tree, ConceptId(9));
        let _ = location_cell(&tree, ConceptId(9));
    }
}

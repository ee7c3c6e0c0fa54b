use std::borrow::Cow;

use ratatui::text::{Line, Span};
use ratatui::widgets::Cell;

use crate::context::RowContext;

/// Glyph set for tree guides, expand indicators, and the loading marker.
#[derive(Clone, Copy)]
pub struct ExplorerGlyphs<'a> {
    pub indent: &'a str,
    pub branch_last: &'a str,
    pub branch: &'a str,
    pub vert: &'a str,
    pub empty: &'a str,
    pub leaf: &'a str,
    pub expanded: &'a str,
    pub collapsed: &'a str,
    /// Shown in place of the indicator while a fetch is in flight.
    pub loading: &'a str,
}

impl ExplorerGlyphs<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "   ",
            branch_last: "└──",
            branch: "├──",
            vert: "│  ",
            empty: "   ",
            leaf: "•",
            expanded: "▼",
            collapsed: "▶",
            loading: "◌",
        }
    }

    pub const fn ascii() -> Self {
        Self {
            indent: "   ",
            branch_last: "`--",
            branch: "|--",
            vert: "|  ",
            empty: "   ",
            leaf: "*",
            expanded: "v",
            collapsed: ">",
            loading: "~",
        }
    }
}

// Labels come from the backend and may carry markup. Only these entities
// are decoded; everything between angle brackets is dropped.
const ENTITIES: [(&str, char); 4] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
];

/// Strips markup tags and decodes basic entities from a node label.
///
/// Labels are an explicit trust boundary: the widget never renders raw
/// markup, so `<b>Name</b>` displays as `Name` and `&lt;T&gt;` as `<T>`.
pub fn sanitize_label(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['<', '&']) {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    let mut in_tag = false;
    'outer: while let Some(ch) = rest.chars().next() {
        if in_tag {
            if ch == '>' {
                in_tag = false;
            }
            rest = &rest[ch.len_utf8()..];
            continue;
        }
        match ch {
            '<' => {
                in_tag = true;
                rest = &rest[1..];
            }
            '&' => {
                for (entity, decoded) in ENTITIES {
                    if let Some(tail) = rest.strip_prefix(entity) {
                        out.push(decoded);
                        rest = tail;
                        continue 'outer;
                    }
                }
                out.push('&');
                rest = &rest[1..];
            }
            _ => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    Cow::Owned(out)
}

/// Assembles the label line for one row: guides, indicator, label text.
pub fn concept_label_line<'a>(
    ctx: &RowContext<'_>,
    label: Cow<'a, str>,
    glyphs: &ExplorerGlyphs<'a>,
) -> Line<'a> {
    let indicator = if ctx.is_loading {
        glyphs.loading
    } else if ctx.has_indicator {
        if ctx.is_open {
            glyphs.expanded
        } else {
            glyphs.collapsed
        }
    } else if ctx.level == 0 {
        ""
    } else {
        glyphs.leaf
    };

    if ctx.level == 0 || !ctx.draw_lines {
        let mut spans = Vec::with_capacity(ctx.level as usize + 4);
        for _ in 0..ctx.level {
            spans.push(Span::raw(glyphs.empty));
        }
        if !indicator.is_empty() {
            spans.push(Span::raw(indicator));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::raw(label));
        return Line::from(spans);
    }

    let mut spans = Vec::with_capacity(ctx.is_tail_stack.len() + 4);
    for (l, is_last) in ctx.is_tail_stack.iter().enumerate() {
        let part = if l == (ctx.level as usize) - 1 {
            if *is_last {
                glyphs.branch_last
            } else {
                glyphs.branch
            }
        } else if ctx.is_tail_stack[l] {
            glyphs.indent
        } else {
            glyphs.vert
        };
        spans.push(Span::styled(part, ctx.line_style));
    }

    if !indicator.is_empty() {
        spans.push(Span::raw(indicator));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(label));
    Line::from(spans)
}

/// Convenience wrapper producing a table cell instead of a line.
pub fn concept_label_cell<'a>(
    ctx: &RowContext<'_>,
    label: Cow<'a, str>,
    glyphs: &ExplorerGlyphs<'a>,
) -> Cell<'a> {
    Cell::from(concept_label_line(ctx, label, glyphs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels_borrow() {
        assert!(matches!(sanitize_label("Order"), Cow::Borrowed("Order")));
    }

    #[test]
    fn tags_are_stripped() {
        assert_eq!(sanitize_label("<b>Order</b>"), "Order");
        assert_eq!(sanitize_label("pre<i>mid</i>post"), "premidpost");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(sanitize_label("List&lt;Order&gt;"), "List<Order>");
        assert_eq!(sanitize_label("a &amp; b"), "a & b");
        assert_eq!(sanitize_label("&quot;x&quot;"), "\"x\"");
    }

    #[test]
    fn lone_ampersand_survives() {
        assert_eq!(sanitize_label("a & b"), "a & b");
    }

    #[test]
    fn unterminated_tag_drops_the_rest() {
        assert_eq!(sanitize_label("name<span class="), "name");
    }
}

//! Drawing document lines through the editor's decorations.

use noderium_editor::theme;
use noderium_editor::{Decoration, DecorationSpec, Line};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

/// Terminal style for a (possibly space separated) class list.
pub fn style_for_class(class: &str) -> Style {
    class.split_whitespace().fold(Style::default(), |style, part| match part {
        theme::MARKER | theme::CODEBLOCK_FENCE | theme::CODEBLOCK_FENCE_TEXT => {
            style.fg(Color::DarkGray)
        }
        theme::STRONG => style.add_modifier(Modifier::BOLD),
        theme::EMPHASIS => style.add_modifier(Modifier::ITALIC),
        theme::INLINE_CODE => style.fg(Color::Yellow),
        theme::LINK_ACTIVE | theme::LINK_WIDGET => {
            style.fg(Color::Blue).add_modifier(Modifier::UNDERLINED)
        }
        theme::CODEBLOCK => style.fg(Color::Green),
        heading if heading.starts_with(theme::HEADING_PREFIX) => {
            style.fg(Color::Cyan).add_modifier(Modifier::BOLD)
        }
        _ => style,
    })
}

fn hides(class: &str) -> bool {
    matches!(
        class,
        theme::HIDE_MARKDOWN | theme::HIDE_MARKDOWN_FENCE | theme::HIDE_LINK_SYNTAX
    )
}

/// One rendered row and the document offset under each of its columns.
#[derive(Debug, Clone, Default)]
pub struct RenderedLine {
    pub text: TextLine<'static>,
    pub columns: Vec<usize>,
    /// Offset just past the line's last character
    pub end: usize,
}

impl RenderedLine {
    /// Offset under display column `column`, or the end of the line past it.
    pub fn offset_at(&self, column: usize) -> usize {
        self.columns.get(column).copied().unwrap_or(self.end)
    }

    /// First column showing `offset` or anything after it.
    pub fn column_of(&self, offset: usize) -> usize {
        self.columns
            .iter()
            .position(|&at| at >= offset)
            .unwrap_or(self.columns.len())
    }
}

struct Builder {
    spans: Vec<Span<'static>>,
    columns: Vec<usize>,
    pending: String,
    pending_style: Style,
}

impl Builder {
    fn push(&mut self, text: &str, style: Style, offset: usize) {
        if style != self.pending_style && !self.pending.is_empty() {
            self.flush();
        }
        self.pending_style = style;
        self.pending.push_str(text);
        self.columns
            .extend(std::iter::repeat_n(offset, text.chars().count()));
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.spans.push(Span::styled(text, self.pending_style));
        }
    }
}

/// Render `line`, dropping hidden ranges and drawing link widgets as their
/// text. Code lines get a line-number gutter that maps to the line start.
pub fn render_line<'a>(
    line: &Line,
    decorations: impl IntoIterator<Item = &'a Decoration>,
) -> RenderedLine {
    let mut line_style = Style::default();
    let mut gutter = None;
    let mut marks: Vec<(usize, usize, Style)> = Vec::new();
    let mut hidden: Vec<(usize, usize)> = Vec::new();
    let mut widgets: Vec<&Decoration> = Vec::new();

    for decoration in decorations {
        match &decoration.spec {
            DecorationSpec::Line { class, .. } if decoration.from == line.from => {
                line_style = line_style.patch(style_for_class(class));
                if let Some(number) = decoration.spec.attribute(theme::DATA_CODE_LINE) {
                    gutter = Some(number.to_string());
                }
            }
            DecorationSpec::Line { .. } => {}
            _ if decoration.to <= line.from || decoration.from >= line.to => {}
            DecorationSpec::Mark { class } if hides(class) => {
                hidden.push((decoration.from, decoration.to));
            }
            DecorationSpec::Mark { class } => {
                marks.push((decoration.from, decoration.to, style_for_class(class)));
            }
            DecorationSpec::Replace { widget: Some(_) } => widgets.push(decoration),
            DecorationSpec::Replace { widget: None } => {
                hidden.push((decoration.from, decoration.to));
            }
        }
    }

    let mut builder = Builder {
        spans: Vec::new(),
        columns: Vec::new(),
        pending: String::new(),
        pending_style: Style::default(),
    };

    if let Some(number) = gutter {
        builder.push(&format!("{number:>3} "), Style::default().fg(Color::DarkGray), line.from);
        builder.flush();
    }

    let mut drawn_widget = None;
    for (index, ch) in line.text.char_indices() {
        let offset = line.from + index;

        if let Some(widget) = widgets.iter().find(|d| d.from <= offset && offset < d.to) {
            if drawn_widget != Some(widget.from) {
                drawn_widget = Some(widget.from);
                if let Some(link) = widget.spec.widget() {
                    let style = line_style.patch(style_for_class(link.class()));
                    builder.push(&link.text, style, widget.from);
                }
            }
            continue;
        }
        if hidden.iter().any(|&(from, to)| from <= offset && offset < to) {
            continue;
        }

        let style = marks
            .iter()
            .filter(|&&(from, to, _)| from <= offset && offset < to)
            .fold(line_style, |style, &(_, _, mark)| style.patch(mark));
        let mut buf = [0u8; 4];
        builder.push(ch.encode_utf8(&mut buf), style, offset);
    }
    builder.flush();

    RenderedLine {
        text: TextLine::from(builder.spans).style(line_style),
        columns: builder.columns,
        end: line.to,
    }
}

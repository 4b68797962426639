// Markdown rendering for slide bodies
//
// Parses with pulldown-cmark and produces styled, pre-wrapped ratatui lines.
// Wrapping happens here (not in Paragraph) so list items keep a hanging
// indent and widths are measured in display columns.
//
// Supports: headings, paragraphs, bullet and numbered lists, bold, italic,
// inline code, hard breaks, horizontal rules.

use super::theme::Theme;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Render `markdown` into lines no wider than `width` columns
pub fn render_markdown(markdown: &str, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let mut out = LineBuilder::new(width.max(1) as usize, theme);

    let mut heading: Option<HeadingLevel> = None;
    let mut bold = 0usize;
    let mut italic = 0usize;
    // Next number per open list (None = bullets)
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                out.flush();
                heading = Some(level);
            }
            Event::End(TagEnd::Heading(_)) => {
                out.flush();
                out.blank();
                heading = None;
            }

            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => {
                out.flush();
                if lists.is_empty() {
                    out.blank();
                }
            }

            Event::Start(Tag::List(first)) => {
                out.flush();
                lists.push(first);
            }
            Event::End(TagEnd::List(_)) => {
                out.flush();
                lists.pop();
                if lists.is_empty() {
                    out.blank();
                }
            }
            Event::Start(Tag::Item) => {
                out.flush();
                let depth = lists.len().saturating_sub(1);
                let marker = match lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                out.start_item(depth * 2, marker);
            }
            Event::End(TagEnd::Item) => {
                out.flush();
                out.indent = 0;
            }

            Event::Start(Tag::Strong) => bold += 1,
            Event::End(TagEnd::Strong) => bold = bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => italic += 1,
            Event::End(TagEnd::Emphasis) => italic = italic.saturating_sub(1),

            Event::Code(code) => {
                let style = Style::default().fg(theme.code);
                out.push_text(&code, style);
            }
            Event::Text(text) => {
                let style = inline_style(theme, heading, bold > 0, italic > 0);
                out.push_text(&text, style);
            }
            Event::SoftBreak => {
                let style = inline_style(theme, heading, bold > 0, italic > 0);
                out.push_text(" ", style);
            }
            Event::HardBreak => out.flush(),
            Event::Rule => {
                out.flush();
                out.lines.push(Line::styled(
                    "─".repeat(out.width),
                    Style::default().fg(theme.border),
                ));
                out.blank();
            }
            _ => {}
        }
    }

    out.finish()
}

fn inline_style(theme: &Theme, heading: Option<HeadingLevel>, bold: bool, italic: bool) -> Style {
    let mut style = match heading {
        Some(HeadingLevel::H1) | Some(HeadingLevel::H2) => Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
        Some(_) => Style::default()
            .fg(theme.foreground)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(theme.foreground),
    };
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

/// Accumulates spans into width-limited lines
struct LineBuilder {
    width: usize,
    marker: Style,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    current_width: usize,
    /// Hanging indent for wrapped continuation lines
    indent: usize,
}

impl LineBuilder {
    fn new(width: usize, theme: &Theme) -> Self {
        Self {
            width,
            marker: Style::default().fg(theme.accent),
            lines: Vec::new(),
            current: Vec::new(),
            current_width: 0,
            indent: 0,
        }
    }

    fn start_item(&mut self, depth_indent: usize, marker: String) {
        let lead = " ".repeat(depth_indent);
        self.indent = depth_indent + marker.width();
        self.current_width = self.indent;
        self.current.push(Span::raw(lead));
        self.current.push(Span::styled(marker, self.marker));
    }

    fn push_text(&mut self, text: &str, style: Style) {
        for piece in text.split_inclusive(' ') {
            let word_width = piece.trim_end().width();
            let at_line_start = self.current_width <= self.indent;

            if !at_line_start && self.current_width + word_width > self.width {
                self.wrap();
            }

            let piece = if self.current_width <= self.indent {
                piece.trim_start()
            } else {
                piece
            };
            if piece.is_empty() {
                continue;
            }

            self.current_width += piece.width();
            self.current.push(Span::styled(piece.to_string(), style));
        }
    }

    /// Continue on a new line at the hanging indent
    fn wrap(&mut self) {
        self.flush();
        if self.indent > 0 {
            self.current.push(Span::raw(" ".repeat(self.indent)));
            self.current_width = self.indent;
        }
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = std::mem::take(&mut self.current);
        // Trailing separator may overhang the width by one column
        if let Some(last) = spans.last_mut() {
            if last.content.ends_with(' ') {
                last.content = last.content.trim_end().to_string().into();
            }
        }
        self.lines.push(Line::from(spans));
        self.current_width = 0;
    }

    /// One blank separator line, never two in a row
    fn blank(&mut self) {
        if matches!(self.lines.last(), Some(line) if line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while matches!(self.lines.last(), Some(line) if line.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn paragraphs_are_separated_by_one_blank_line() {
        let theme = Theme::light();
        let lines = render_markdown("First paragraph.\n\nSecond one.", 80, &theme);
        assert_eq!(plain(&lines), vec!["First paragraph.", "", "Second one."]);
    }

    #[test]
    fn long_text_wraps_within_width() {
        let theme = Theme::light();
        let lines = render_markdown(
            "Aneurysm treatment planning today depends on manual measurement.",
            20,
            &theme,
        );
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width() <= 20, "too wide: {:?}", line);
        }
    }

    #[test]
    fn list_items_get_markers_and_hanging_indent() {
        let theme = Theme::light();
        let lines = render_markdown(
            "- alpha beta gamma delta\n- second\n\n1. one\n2. two",
            14,
            &theme,
        );
        let text = plain(&lines);
        assert_eq!(text[0], "• alpha beta");
        assert_eq!(text[1], "  gamma delta");
        assert_eq!(text[2], "• second");
        assert_eq!(text[3], "");
        assert_eq!(text[4], "1. one");
        assert_eq!(text[5], "2. two");
    }

    #[test]
    fn emphasis_and_headings_are_styled() {
        let theme = Theme::light();
        let lines = render_markdown("## Market\n\nA **big** one", 80, &theme);
        let heading = &lines[0].spans[0];
        assert_eq!(heading.style.fg, Some(theme.accent));
        assert!(heading.style.add_modifier.contains(Modifier::BOLD));

        let bold = lines[2]
            .spans
            .iter()
            .find(|s| s.content.contains("big"))
            .unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }
}

//! Markdown → ratatui `Text` renderer for article bodies.
//!
//! Walks `pulldown_cmark` events and emits styled `Line`/`Span` values:
//! headings in the section accent, `•` bullets, bold/italic, inline code,
//! and bordered code blocks with syntect highlighting. Example code outside
//! the markdown body goes through the same code block path via
//! [`render_code`].

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";
const BORDER: Color = Color::DarkGray;

/// Colors a rendered body is drawn with.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Color,
    pub heading: Color,
}

/// Parse a markdown body into styled, owned `Text`.
pub fn render(content: &str, palette: Palette) -> Text<'static> {
    let mut w = Writer::new(palette);
    for event in Parser::new(content) {
        w.handle(event);
    }
    w.text
}

/// A bordered, highlighted code block captioned with `label`.
///
/// `language` picks the syntax; unknown or absent languages render plain.
pub fn render_code(code: &str, label: &str, language: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![code_top_border(label)];
    let body = highlight(code, language.unwrap_or(""));
    lines.extend(body.into_iter().map(|mut line| {
        line.spans.insert(0, Span::styled("│ ", Style::default().fg(BORDER)));
        line
    }));
    lines.push(Line::from(Span::styled("╰──", Style::default().fg(BORDER))));
    lines
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    palette: Palette,
    /// Inline style stack. Styles compose via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Open fenced/indented code block: language token and collected source.
    code: Option<(String, String)>,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(palette: Palette) -> Self {
        Self {
            text: Text::default(),
            palette,
            styles: vec![],
            list_indices: vec![],
            code: None,
            needs_newline: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.palette.text))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_line(&mut self, line: Line<'static>) {
        self.text.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.push_line(Line::from(vec![span])),
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.push_span(Span::styled(
                c.to_string(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(BORDER),
                )));
                self.needs_newline = true;
            }
            // Raw HTML and extensions are not part of authored content.
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                    self.push_line(Line::default());
                }
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
                self.push_style(heading_style(self.palette.heading, level));
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(l) => l.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}• "),
                        Some(n) => {
                            let s = format!("{indent}{n}. ");
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(
                        marker,
                        Style::default().fg(self.palette.heading),
                    ));
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                if let Some((lang, source)) = self.code.take() {
                    self.blank_line_if_needed();
                    let label = if lang.is_empty() { "" } else { lang.as_str() };
                    let language = (!lang.is_empty()).then_some(lang.as_str());
                    for line in render_code(source.trim_end_matches('\n'), label, language) {
                        self.push_line(line);
                    }
                }
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Emphasis | TagEnd::Strong => self.pop_style(),
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        if let Some((_, source)) = self.code.as_mut() {
            source.push_str(&cow);
            return;
        }
        let style = self.style();
        self.push_span(Span::styled(cow.replace('\t', "    "), style));
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn code_top_border(label: &str) -> Line<'static> {
    let bs = Style::default().fg(BORDER);
    if label.is_empty() {
        return Line::from(Span::styled("╭──", bs));
    }
    Line::from(vec![
        Span::styled("╭── ", bs),
        Span::styled(label.to_uppercase(), bs.add_modifier(Modifier::BOLD)),
        Span::styled(" ──", bs),
    ])
}

/// Highlight `code` line by line. Tabs become four spaces, since ratatui
/// renders `\t` as zero-width.
fn highlight(code: &str, lang: &str) -> Vec<Line<'static>> {
    let syntax = (!lang.is_empty())
        .then(|| SYNTAX_SET.find_syntax_by_token(lang))
        .flatten();
    let theme = THEME_SET.themes.get(THEME);

    let (Some(syntax), Some(theme)) = (syntax, theme) else {
        let plain = Style::default().fg(Color::White);
        return code
            .lines()
            .map(|l| Line::from(Span::styled(l.replace('\t', "    "), plain)))
            .collect();
    };

    let mut hl = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) else {
            lines.push(Line::raw(line.trim_end_matches('\n').replace('\t', "    ")));
            continue;
        };
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .filter_map(|(hl_style, frag)| {
                let content = frag.trim_end_matches('\n').replace('\t', "    ");
                if content.is_empty() {
                    return None;
                }
                let fg = Color::Rgb(
                    hl_style.foreground.r,
                    hl_style.foreground.g,
                    hl_style.foreground.b,
                );
                Some(Span::styled(content, Style::default().fg(fg)))
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}

fn heading_style(color: Color, level: HeadingLevel) -> Style {
    let base = Style::default().fg(color).add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 | HeadingLevel::H2 => base.add_modifier(Modifier::UNDERLINED),
        _ => base,
    }
}

//! JSON → ratatui `Text` with syntect highlighting.
//!
//! Falls back to plain white lines if the JSON syntax or theme is missing
//! or a line fails to highlight.

use std::sync::LazyLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";

/// Highlight pretty-printed JSON. One output line per input line.
pub fn json(text: &str) -> Text<'static> {
    let (Some(syntax), Some(theme)) = (
        SYNTAX_SET.find_syntax_by_extension("json"),
        THEME_SET.themes.get(THEME),
    ) else {
        log::debug!("JSON syntax or theme unavailable, rendering plain");
        return plain(text);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let lines: Vec<Line<'static>> = LinesWithEndings::from(text)
        .map(|line| match highlighter.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => Line::from(
                ranges
                    .into_iter()
                    .filter_map(|(hl_style, frag)| {
                        let content = frag.trim_end_matches(['\n', '\r']).replace('\t', "    ");
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
                    .collect::<Vec<_>>(),
            ),
            Err(e) => {
                log::debug!("Highlight failed, using plain line: {}", e);
                plain_line(line)
            }
        })
        .collect();

    Text::from(lines)
}

fn plain(text: &str) -> Text<'static> {
    Text::from(text.lines().map(plain_line).collect::<Vec<_>>())
}

fn plain_line(line: &str) -> Line<'static> {
    Line::styled(
        line.trim_end_matches(['\n', '\r']).to_string(),
        Style::default().fg(Color::White),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn preserves_line_structure() {
        let text = json("{\n  \"valid\": true\n}");
        let lines: Vec<String> = text.lines.iter().map(line_text).collect();
        assert_eq!(lines, vec!["{", "  \"valid\": true", "}"]);
    }

    #[test]
    fn applies_color() {
        let text = json("{\n  \"valid\": true\n}");
        let colored = text
            .lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .any(|s| matches!(s.style.fg, Some(Color::Rgb(..))));
        assert!(colored);
    }

    #[test]
    fn plain_fallback_strips_newlines() {
        let text = plain("a\nb\n");
        let lines: Vec<String> = text.lines.iter().map(line_text).collect();
        assert_eq!(lines, vec!["a", "b"]);
    }
}

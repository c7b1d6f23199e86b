use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use super::theme::Theme;

/// Applies light markdown styling to one raw line of model output.
/// Structure is recognized per line; LaTeX fragments pass through
/// verbatim, highlighted between `$` delimiters.
pub fn styled_line(raw: &str, theme: &Theme) -> Line<'static> {
    let trimmed = raw.trim_start();

    if let Some(text) = heading_text(trimmed) {
        let style = theme.accent.add_modifier(Modifier::BOLD);
        return Line::from(Span::styled(text.to_string(), style));
    }
    if let Some(rest) = trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
    {
        let mut spans = vec![Span::styled("  • ".to_string(), theme.accent)];
        spans.extend(inline_spans(rest, theme));
        return Line::from(spans);
    }
    if let Some(rest) = trimmed.strip_prefix("> ") {
        let mut spans = vec![Span::styled("  │ ".to_string(), theme.muted)];
        for span in inline_spans(rest, theme) {
            spans.push(Span::styled(
                span.content.into_owned(),
                span.style.add_modifier(Modifier::ITALIC),
            ));
        }
        return Line::from(spans);
    }

    Line::from(inline_spans(raw, theme))
}

fn heading_text(line: &str) -> Option<&str> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    line[hashes..].strip_prefix(' ')
}

/// Splits a line into plain and `$...$` math segments. An unmatched
/// dollar sign is treated as ordinary text.
fn inline_spans(text: &str, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('$') {
        let Some(close_rel) = rest[open + 1..].find('$') else {
            break;
        };
        let close = open + 1 + close_rel;
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), theme.text));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), theme.math));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), theme.text));
    }
    if spans.is_empty() {
        spans.push(Span::styled(String::new(), theme.text));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::{heading_text, inline_spans, styled_line};
    use crate::ui::theme::Theme;

    fn contents(line: &ratatui::text::Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn headings_drop_their_hashes() {
        assert_eq!(heading_text("### 第一步：追本溯源"), Some("第一步：追本溯源"));
        assert_eq!(heading_text("#no space"), None);
        assert_eq!(heading_text("not a heading"), None);
    }

    #[test]
    fn bullet_marker_is_replaced() {
        let theme = Theme::default();
        let line = styled_line("* 核心定义", &theme);
        assert_eq!(contents(&line), "  • 核心定义");
    }

    #[test]
    fn math_span_is_isolated() {
        let theme = Theme::default();
        let spans = inline_spans("分数 $\\frac{a}{b}$ 表示", &theme);
        let texts: Vec<_> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["分数 ", "$\\frac{a}{b}$", " 表示"]);
        assert_eq!(spans[1].style, theme.math);
    }

    #[test]
    fn unmatched_dollar_stays_plain() {
        let theme = Theme::default();
        let spans = inline_spans("价格是 $5", &theme);
        let joined: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, "价格是 $5");
        assert!(spans.iter().all(|s| s.style == theme.text));
    }

    #[test]
    fn blockquote_gets_a_gutter() {
        let theme = Theme::default();
        let line = styled_line("> 温故而知新", &theme);
        assert!(contents(&line).starts_with("  │ "));
    }

    #[test]
    fn plain_text_passes_through() {
        let theme = Theme::default();
        let line = styled_line("每步一行。", &theme);
        assert_eq!(contents(&line), "每步一行。");
    }
}

use ratatui::layout::Alignment;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::theme;

pub(crate) fn wrapped_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    Paragraph::new(text).wrap(Wrap { trim: false })
}

pub(crate) fn key_hint_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    wrapped_paragraph(text).alignment(Alignment::Center)
}

pub(crate) fn key_hint_height(total_width: u16, text: &str) -> u16 {
    let content_width = total_width.saturating_sub(2).max(1) as usize;
    let lines = wrapped_line_count(text, content_width);
    lines.saturating_add(2).max(3)
}

pub(crate) fn compact_hint<'a>(
    width: u16,
    full: &'a str,
    medium: &'a str,
    compact: &'a str,
) -> &'a str {
    if width >= 110 {
        full
    } else if width >= 78 {
        medium
    } else {
        compact
    }
}

pub(crate) fn focus_line(message: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(message.into(), theme::focus_prompt()))
}

pub(crate) fn error_line(message: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(message.into(), theme::error_prompt()))
}

pub(crate) fn label_value_line(
    label: impl Into<String>,
    value: impl Into<String>,
) -> Line<'static> {
    let label = label.into();
    let value = value.into();
    Line::from(vec![
        Span::styled(format!("{label}: "), theme::secondary_text()),
        Span::raw(value),
    ])
}

pub(crate) fn step_header_line(step_number: u8, title: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("Step {step_number}/4  "), theme::secondary_text()),
        Span::styled(title.into(), theme::focus_prompt()),
    ])
}

pub(crate) fn result_footer(width: u16) -> &'static str {
    compact_hint(
        width,
        "n: new booking    Enter/Esc: back to home    q: quit navalha",
        "n: new    Enter/Esc: home    q: quit",
        "n new | Enter/Esc home | q quit",
    )
}

fn wrapped_line_count(text: &str, width: usize) -> u16 {
    if text.is_empty() {
        return 1;
    }

    let mut total = 0u16;
    for line in text.split('\n') {
        total = total.saturating_add(wrapped_line_count_single(line, width));
    }

    total.max(1)
}

fn wrapped_line_count_single(line: &str, width: usize) -> u16 {
    if line.is_empty() {
        return 1;
    }

    let characters = line.chars().count();
    let lines = characters.div_ceil(width.max(1));
    u16::try_from(lines.max(1)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Modifier};

    use super::{
        compact_hint, error_line, focus_line, key_hint_height, label_value_line, result_footer,
        step_header_line, wrapped_line_count_single,
    };

    #[test]
    fn compact_hint_selects_variant_by_width() {
        assert_eq!(compact_hint(120, "full", "medium", "compact"), "full");
        assert_eq!(compact_hint(90, "full", "medium", "compact"), "medium");
        assert_eq!(compact_hint(60, "full", "medium", "compact"), "compact");
    }

    #[test]
    fn key_hint_height_is_single_line_when_hint_fits() {
        let height = key_hint_height(80, "Enter: continue    Esc: back");
        assert_eq!(height, 3);
    }

    #[test]
    fn key_hint_height_grows_when_hint_wraps() {
        let height = key_hint_height(20, "Enter: continue    Up/Down or j/k: move    Esc: back");
        assert!(height > 3);
    }

    #[test]
    fn wrapped_line_count_rounds_up() {
        assert_eq!(wrapped_line_count_single("abcdef", 4), 2);
        assert_eq!(wrapped_line_count_single("abc", 4), 1);
        assert_eq!(wrapped_line_count_single("", 4), 1);
    }

    #[test]
    fn focus_line_uses_blue_bold_style() {
        let line = focus_line("choose a service");
        assert_eq!(line.spans[0].content.as_ref(), "choose a service");
        assert_eq!(line.spans[0].style.fg, Some(Color::Blue));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn error_line_uses_red_bold_style() {
        let line = error_line("Horário não disponível");
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn label_value_line_formats_with_colon() {
        let line = label_value_line("Barber", "Joe");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content.as_ref(), "Barber: ");
        assert_eq!(line.spans[1].content.as_ref(), "Joe");
    }

    #[test]
    fn step_header_shows_position_out_of_four() {
        let line = step_header_line(3, "Pick a date and time");
        assert_eq!(line.spans[0].content.as_ref(), "Step 3/4  ");
        assert_eq!(line.spans[1].content.as_ref(), "Pick a date and time");
    }

    #[test]
    fn result_footer_compacts_by_width() {
        assert!(result_footer(120).contains("quit navalha"));
        assert_eq!(result_footer(60), "n new | Enter/Esc home | q quit");
    }
}

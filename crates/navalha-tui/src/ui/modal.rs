use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Clear;

use crate::centered_rect;
use crate::theme;
use crate::ui::text::{key_hint_height, key_hint_paragraph, wrapped_paragraph};

pub(crate) struct ModalSpec<'a> {
    pub(crate) title: &'a str,
    pub(crate) title_style: Option<Style>,
    pub(crate) body: Text<'a>,
    pub(crate) key_hint: Option<&'a str>,
    pub(crate) width_pct: u16,
    pub(crate) height_pct: u16,
}

pub(crate) fn render_modal(frame: &mut Frame<'_>, spec: ModalSpec<'_>) {
    let area = centered_rect(spec.width_pct, spec.height_pct, frame.area());
    let title = if let Some(style) = spec.title_style {
        Line::from(Span::styled(spec.title.to_string(), style))
    } else {
        Line::from(spec.title.to_string())
    };

    frame.render_widget(Clear, area);
    frame.render_widget(
        wrapped_paragraph(spec.body).block(theme::chrome(title)),
        area,
    );

    if let Some(key_hint) = spec.key_hint {
        let footer_height = key_hint_height(area.width, key_hint);
        if let Some(key_area) = choose_key_area(frame.area(), area, footer_height) {
            frame.render_widget(Clear, key_area);
            frame.render_widget(
                key_hint_paragraph(key_hint).block(theme::key_block()),
                key_area,
            );
        }
    }
}

fn choose_key_area(screen: Rect, body: Rect, footer_height: u16) -> Option<Rect> {
    let screen_top = screen.y;
    let screen_bottom = screen.y.saturating_add(screen.height);
    let below_y = body.y.saturating_add(body.height);
    if below_y.saturating_add(footer_height) <= screen_bottom {
        return Some(Rect::new(body.x, below_y, body.width, footer_height));
    }

    let above_y = body.y.saturating_sub(footer_height);
    if above_y >= screen_top {
        return Some(Rect::new(body.x, above_y, body.width, footer_height));
    }

    None
}

pub(crate) fn render_error_modal(frame: &mut Frame<'_>, message: &str, footer: &str) {
    render_modal(
        frame,
        ModalSpec {
            title: "Error",
            title_style: Some(theme::error_prompt()),
            body: text_from_message(message),
            key_hint: Some(footer),
            width_pct: 88,
            height_pct: 72,
        },
    );
}

fn text_from_message(message: &str) -> Text<'static> {
    let base = message.trim_end();
    let lines: Vec<Line<'static>> = if base.is_empty() {
        vec![Line::from("")]
    } else {
        base.lines().map(|line| Line::from(line.to_string())).collect()
    };
    Text::from(lines)
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use tui_input::Input;

use navalha_core::dates::format_iso_date;
use navalha_core::models::format_brl;
use navalha_core::wizard::WizardStep;

use crate::theme;
use crate::ui::loading::render_loading_box;
use crate::ui::text::{
    compact_hint, error_line, focus_line, key_hint_height, key_hint_paragraph, label_value_line,
    result_footer, step_header_line, wrapped_paragraph,
};

use super::{BookFlow, ClientField, ScheduleFocus};

const SLOTS_PER_ROW: usize = 4;

impl BookFlow {
    pub(super) fn render(&self, frame: &mut Frame<'_>) {
        if self.wizard.step() == WizardStep::Confirmed {
            self.render_confirmed(frame);
            return;
        }

        let key_text = self.key_hint(frame.area().width);
        let footer_height = key_hint_height(frame.area().width, key_text);
        let [header, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(8),
                Constraint::Length(footer_height),
            ])
            .areas(frame.area());

        self.render_header(frame, header);

        match self.wizard.step() {
            WizardStep::Service => self.render_service_step(frame, body),
            WizardStep::Barber => self.render_barber_step(frame, body),
            WizardStep::Schedule => self.render_schedule_step(frame, body),
            WizardStep::Client => self.render_client_step(frame, body),
            WizardStep::Confirmed => {}
        }

        let hints = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(hints, footer);
    }

    fn key_hint(&self, width: u16) -> &'static str {
        match self.wizard.step() {
            WizardStep::Service | WizardStep::Barber => compact_hint(
                width,
                "Space: choose    Enter: next    Up/Down or j/k: move    Esc: back",
                "Space: choose    Enter: next    j/k: move    Esc: back",
                "Space choose | Enter next | Esc back",
            ),
            WizardStep::Schedule => compact_hint(
                width,
                "Type the date (YYYY-MM-DD)    Enter: load/next    Tab: switch focus    Space: pick time    Esc: back",
                "Enter: load/next    Tab: focus    Space: pick time    Esc: back",
                "Enter load/next | Tab focus | Space pick | Esc back",
            ),
            WizardStep::Client => compact_hint(
                width,
                "Type to edit    Tab: next field    Space: toggle consent    Enter: confirm booking    Esc: back",
                "Tab: next field    Space: consent    Enter: confirm    Esc: back",
                "Tab field | Space consent | Enter confirm | Esc back",
            ),
            WizardStep::Confirmed => result_footer(width),
        }
    }

    fn render_header(&self, frame: &mut Frame<'_>, area: Rect) {
        let step = self.wizard.step();
        let title = match step {
            WizardStep::Service => "Choose a service",
            WizardStep::Barber => "Choose a barber",
            WizardStep::Schedule => "Pick a date and time",
            WizardStep::Client => "Your details",
            WizardStep::Confirmed => "Booking confirmed",
        };

        let mut lines = vec![step_header_line(step.number(), title)];
        if let Some(error) = self.wizard.error() {
            lines.push(error_line(error.to_string()));
        } else {
            lines.push(Line::from(""));
        }

        let header = wrapped_paragraph(Text::from(lines)).block(theme::chrome("Online booking"));
        frame.render_widget(header, area);
    }

    fn render_service_step(&self, frame: &mut Frame<'_>, area: Rect) {
        let marked = self.wizard.service().and_then(|selected| {
            self.catalog
                .services
                .iter()
                .position(|service| service.id == selected.id)
        });
        self.service_list
            .render(frame, area, focus_line("Services"), marked);
    }

    fn render_barber_step(&self, frame: &mut Frame<'_>, area: Rect) {
        let marked = self.wizard.barber().and_then(|selected| {
            self.catalog
                .barbers
                .iter()
                .position(|barber| barber.id == selected.id)
        });
        self.barber_list
            .render(frame, area, focus_line("Barbers"), marked);
    }

    fn render_schedule_step(&self, frame: &mut Frame<'_>, area: Rect) {
        let [date_area, slots_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(4)])
            .areas(area);

        self.render_date_box(frame, date_area);
        self.render_slot_grid(frame, slots_area);
    }

    fn render_date_box(&self, frame: &mut Frame<'_>, area: Rect) {
        let title = if self.schedule_focus == ScheduleFocus::Date {
            focus_line("Date (YYYY-MM-DD)")
        } else {
            Line::from("Date (YYYY-MM-DD)")
        };
        frame.render_widget(theme::chrome(title), area);

        let inner = area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let input_area = Rect::new(inner.x, inner.y, inner.width, 1);
        render_input_line(frame, input_area, &self.date_input, self.schedule_focus == ScheduleFocus::Date);

        if let Some(error) = &self.date_error
            && inner.height > 1
        {
            let error_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
            frame.render_widget(wrapped_paragraph(error_line(error.clone())), error_area);
        }
    }

    fn render_slot_grid(&self, frame: &mut Frame<'_>, area: Rect) {
        let title = if self.schedule_focus == ScheduleFocus::Slots {
            focus_line("Available times")
        } else {
            Line::from("Available times")
        };

        if self.is_loading() {
            render_loading_box(frame, area, "Available times", "Loading available times…", &self.loading);
            return;
        }

        if self.wizard.date().is_none() {
            let hint = Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Enter a date above to load available times.",
                    theme::secondary_text(),
                )),
            ]);
            frame.render_widget(wrapped_paragraph(hint).block(theme::chrome(title)), area);
            return;
        }

        let labels = self.available_labels();
        if labels.is_empty() {
            let hint = Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No free times on this date. Try another day.",
                    theme::secondary_text(),
                )),
            ]);
            frame.render_widget(wrapped_paragraph(hint).block(theme::chrome(title)), area);
            return;
        }

        let grid_focused = self.schedule_focus == ScheduleFocus::Slots;
        let mut lines = vec![Line::from("")];
        for (row_index, row) in labels.chunks(SLOTS_PER_ROW).enumerate() {
            let mut spans = Vec::new();
            for (column_index, label) in row.iter().enumerate() {
                let index = row_index * SLOTS_PER_ROW + column_index;
                let chosen = self.wizard.time() == Some(*label);
                let cell = format!(" {label} ");

                let span = if grid_focused && index == self.slot_cursor {
                    Span::styled(cell, theme::list_highlight(ratatui::style::Color::Cyan))
                } else if chosen {
                    Span::styled(cell, theme::selected_marker())
                } else {
                    Span::raw(cell)
                };
                spans.push(span);
                spans.push(Span::raw("  "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        if let Some(time) = self.wizard.time() {
            lines.push(label_value_line("Chosen time", time));
        }

        frame.render_widget(
            wrapped_paragraph(Text::from(lines)).block(theme::chrome(title)),
            area,
        );
    }

    fn render_client_step(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(theme::chrome(focus_line("Contact details")), area);

        let inner = area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        if inner.width < 16 || inner.height < 8 {
            return;
        }

        let fields = [
            (ClientField::Name, "Full name", &self.name_input),
            (ClientField::Email, "Email", &self.email_input),
            (ClientField::Phone, "Phone", &self.phone_input),
        ];

        let label_width = 12u16;
        let mut y = inner.y;
        for (field, label, input) in fields {
            let focused = self.client_field == field;
            let label_style = if focused {
                theme::focus_prompt()
            } else {
                theme::secondary_text()
            };
            let label_area = Rect::new(inner.x, y, label_width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(format!("{label}:"), label_style)),
                label_area,
            );

            let input_area = Rect::new(
                inner.x + label_width,
                y,
                inner.width.saturating_sub(label_width),
                1,
            );
            render_input_line(frame, input_area, input, focused);
            y += 2;
        }

        let consent_focused = self.client_field == ClientField::Consent;
        let consent_style = if consent_focused {
            theme::focus_prompt()
        } else {
            theme::secondary_text()
        };
        let consent_marker = if self.wizard.client().lgpd_consent {
            "[x]"
        } else {
            "[ ]"
        };
        let consent_area = Rect::new(inner.x, y, inner.width, 2);
        let consent = Text::from(vec![
            Line::from(vec![
                Span::styled(format!("{consent_marker} "), consent_style),
                Span::raw("I accept the terms of use and the privacy policy (LGPD)."),
            ]),
            Line::from(""),
        ]);
        frame.render_widget(wrapped_paragraph(consent), consent_area);

        let summary_y = y + 2;
        if summary_y < inner.y + inner.height {
            let summary_area = Rect::new(
                inner.x,
                summary_y,
                inner.width,
                inner.y + inner.height - summary_y,
            );
            frame.render_widget(wrapped_paragraph(Text::from(self.summary_lines())), summary_area);
        }
    }

    fn render_confirmed(&self, frame: &mut Frame<'_>) {
        let footer = result_footer(frame.area().width);
        let footer_height = key_hint_height(frame.area().width, footer);
        let [body, footer_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(footer_height)])
            .areas(frame.area());

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.wizard.success().unwrap_or_default().to_string(),
                theme::success_prompt(),
            )),
            Line::from("You will receive a confirmation by email."),
            Line::from(""),
        ];
        lines.extend(self.summary_lines());

        frame.render_widget(
            wrapped_paragraph(Text::from(lines))
                .block(theme::chrome(focus_line("Booking confirmed"))),
            body,
        );
        frame.render_widget(key_hint_paragraph(footer).block(theme::key_block()), footer_area);
    }

    fn summary_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(service) = self.wizard.service() {
            lines.push(label_value_line(
                "Service",
                format!(
                    "{} ({})",
                    service.name,
                    format_brl(service.price_centavos)
                ),
            ));
        }
        if let Some(barber) = self.wizard.barber() {
            lines.push(label_value_line("Barber", barber.name.clone()));
        }
        if let Some(date) = self.wizard.date() {
            lines.push(label_value_line("Date", format_iso_date(date)));
        }
        if let Some(time) = self.wizard.time() {
            lines.push(label_value_line("Time", time));
        }
        lines
    }
}

fn render_input_line(frame: &mut Frame<'_>, area: Rect, input: &Input, focused: bool) {
    let width = area.width as usize;
    if width == 0 {
        return;
    }

    let scroll = input.visual_scroll(width);
    let paragraph = Paragraph::new(input.value()).scroll((0, scroll as u16));
    frame.render_widget(paragraph, area);

    if focused {
        let visual = input.visual_cursor();
        let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
        frame.set_cursor_position((area.x + relative as u16, area.y));
    }
}

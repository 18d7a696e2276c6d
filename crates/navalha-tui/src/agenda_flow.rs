use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use navalha_app::{AgendaRow, App};
use navalha_core::dates::{format_iso_date, parse_iso_date, today_utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Row, Table, TableState};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::UiExit;
use crate::keymap;
use crate::theme;
use crate::ui::text::{
    compact_hint, error_line, focus_line, key_hint_height, key_hint_paragraph, wrapped_paragraph,
};

pub(crate) trait AgendaFlowOps {
    fn agenda_for(&self, date: &str) -> Result<Vec<AgendaRow>>;
}

impl<'a> AgendaFlowOps for App<'a> {
    fn agenda_for(&self, date: &str) -> Result<Vec<AgendaRow>> {
        self.agenda(Some(date), None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgendaFocus {
    Date,
    Table,
}

pub(crate) struct AgendaScreen {
    date_input: Input,
    date_error: Option<String>,
    rows: Vec<AgendaRow>,
    selected: usize,
    focus: AgendaFocus,
}

impl AgendaScreen {
    pub(crate) fn new(app: &App<'_>) -> Result<Self> {
        Self::new_with_ops(app)
    }

    fn new_with_ops(ops: &dyn AgendaFlowOps) -> Result<Self> {
        let today = format_iso_date(today_utc());
        let rows = ops.agenda_for(&today)?;

        Ok(Self {
            date_input: Input::new(today),
            date_error: None,
            rows,
            selected: 0,
            focus: AgendaFocus::Table,
        })
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent, app: &App<'_>) -> Result<Option<UiExit>> {
        self.handle_key(key, app)
    }

    fn handle_key(
        &mut self,
        key: KeyEvent,
        ops: &dyn AgendaFlowOps,
    ) -> Result<Option<UiExit>> {
        if keymap::is_back(key) {
            return Ok(Some(UiExit::BackAtRoot));
        }

        if keymap::is_field_switch(key) {
            self.focus = match self.focus {
                AgendaFocus::Date => AgendaFocus::Table,
                AgendaFocus::Table => AgendaFocus::Date,
            };
            return Ok(None);
        }

        match self.focus {
            AgendaFocus::Date => {
                if keymap::is_confirm(key) {
                    self.reload(ops)?;
                    return Ok(None);
                }

                if self.date_input.handle_event(&Event::Key(key)).is_some() {
                    self.date_error = None;
                }
                Ok(None)
            }
            AgendaFocus::Table => {
                if keymap::is_quit(key) {
                    return Ok(Some(UiExit::Completed));
                }

                if keymap::is_up(key) {
                    self.selected = self.selected.saturating_sub(1);
                } else if keymap::is_down(key) && self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
                Ok(None)
            }
        }
    }

    fn reload(&mut self, ops: &dyn AgendaFlowOps) -> Result<()> {
        match parse_iso_date(self.date_input.value()) {
            Ok(date) => {
                let date = format_iso_date(date);
                self.date_input = Input::new(date.clone());
                self.date_error = None;
                self.rows = ops.agenda_for(&date)?;
                self.selected = 0;
                self.focus = AgendaFocus::Table;
            }
            Err(error) => {
                self.date_error = Some(error.to_string());
            }
        }
        Ok(())
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        let key_text = compact_hint(
            frame.area().width,
            "Tab: edit date    Enter: reload    Up/Down or j/k: move    Esc: back    q: quit",
            "Tab: date    Enter: reload    j/k: move    Esc: back",
            "Tab date | Enter reload | Esc back",
        );
        let footer_height = key_hint_height(frame.area().width, key_text);
        let [date_area, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(footer_height),
            ])
            .areas(frame.area());

        self.render_date_box(frame, date_area);
        self.render_table(frame, body);

        let hints = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(hints, footer);
    }

    fn render_date_box(&self, frame: &mut Frame<'_>, area: Rect) {
        let title = if self.focus == AgendaFocus::Date {
            focus_line("Agenda date (YYYY-MM-DD)")
        } else {
            Line::from("Agenda date (YYYY-MM-DD)")
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
        let width = input_area.width as usize;
        let scroll = self.date_input.visual_scroll(width);
        frame.render_widget(
            Paragraph::new(self.date_input.value()).scroll((0, scroll as u16)),
            input_area,
        );

        if self.focus == AgendaFocus::Date && width > 0 {
            let visual = self.date_input.visual_cursor();
            let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
            frame.set_cursor_position((input_area.x + relative as u16, input_area.y));
        }

        if let Some(error) = &self.date_error
            && inner.height > 1
        {
            let error_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
            frame.render_widget(wrapped_paragraph(error_line(error.clone())), error_area);
        }
    }

    fn render_table(&self, frame: &mut Frame<'_>, area: Rect) {
        if self.rows.is_empty() {
            let empty = wrapped_paragraph("No appointments for this date.")
                .block(theme::chrome(focus_line("Appointments")));
            frame.render_widget(empty, area);
            return;
        }

        let rows: Vec<Row<'_>> = self
            .rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    row.date_time.clone(),
                    row.client.clone(),
                    row.barber.clone(),
                    row.service.clone(),
                    row.status.clone(),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(19),
                Constraint::Min(14),
                Constraint::Min(10),
                Constraint::Min(14),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["When", "Client", "Barber", "Service", "Status"])
                .style(theme::table_header()),
        )
        .block(theme::chrome(focus_line("Appointments")))
        .row_highlight_style(theme::list_highlight(ratatui::style::Color::Cyan));

        let mut state = TableState::default();
        state.select(Some(self.selected.min(self.rows.len() - 1)));
        frame.render_stateful_widget(table, area, &mut state);
    }
}

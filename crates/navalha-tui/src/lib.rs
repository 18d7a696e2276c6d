mod agenda_flow;
mod book_flow;
mod keymap;
mod theme;
mod ui;

use std::io::{Stdout, stdout};
use std::time::Duration;

use agenda_flow::AgendaScreen;
use anyhow::{Context, Result};
use book_flow::BookScreen;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use navalha_app::App;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Color;
use ratatui::text::{Line, Text};
use ratatui::widgets::{List, ListItem, ListState};

use crate::ui::modal::render_error_modal;
use crate::ui::text::{
    compact_hint, focus_line, key_hint_height, key_hint_paragraph, wrapped_paragraph,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiExit {
    Completed,
    BackAtRoot,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootMenuExit {
    Action(RootAction),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootAction {
    Book,
    Agenda,
}

impl RootAction {
    fn title(self) -> &'static str {
        match self {
            Self::Book => "Book an appointment",
            Self::Agenda => "Browse the agenda",
        }
    }
}

const ROOT_ACTIONS: [RootAction; 2] = [RootAction::Book, RootAction::Agenda];

pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub(crate) fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;

        let mut out = stdout();
        if let Err(error) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error).context("failed to enter alternate screen");
        }

        match Terminal::new(CrosstermBackend::new(stdout())) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let mut out = stdout();
                let _ = execute!(out, Show, LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(error).context("failed to create terminal backend")
            }
        }
    }

    pub(crate) fn draw<F>(&mut self, draw_fn: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame<'_>),
    {
        self.terminal
            .draw(draw_fn)
            .context("failed to render terminal")?;
        Ok(())
    }

    pub(crate) fn autoresize(&mut self) -> Result<()> {
        self.terminal
            .autoresize()
            .context("failed to autoresize terminal")?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub(crate) fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

#[derive(Debug)]
struct RootScreen {
    selected: usize,
}

impl RootScreen {
    fn new() -> Self {
        Self { selected: 0 }
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<RootMenuExit> {
        if keymap::is_back(key) || keymap::is_quit(key) {
            return Some(RootMenuExit::Exit);
        }

        if keymap::is_up(key) {
            self.selected = self.selected.saturating_sub(1);
            return None;
        }

        if keymap::is_down(key) {
            if self.selected + 1 < ROOT_ACTIONS.len() {
                self.selected += 1;
            }
            return None;
        }

        if keymap::is_confirm(key) {
            return Some(RootMenuExit::Action(ROOT_ACTIONS[self.selected]));
        }

        None
    }

    fn render(&self, frame: &mut ratatui::Frame<'_>, base_url: &str) {
        let area = frame.area();
        let key_text = compact_hint(
            area.width,
            "Enter: select    Up/Down or j/k: move    Esc/q: exit",
            "Enter: select    j/k: move    Esc/q: exit",
            "Enter select | j/k move | Esc/q exit",
        );
        let footer_height = key_hint_height(area.width, key_text);
        let [header, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        let header_text = Text::from(vec![
            Line::from("navalha"),
            Line::from(base_url.to_string()),
            focus_line("Choose what you want to do"),
        ]);
        let title = wrapped_paragraph(header_text).block(theme::chrome("Home"));
        frame.render_widget(title, header);

        let items: Vec<ListItem<'_>> = ROOT_ACTIONS
            .iter()
            .map(|action| ListItem::new(action.title()))
            .collect();
        let list = List::new(items)
            .block(theme::chrome(focus_line("Actions")))
            .highlight_style(theme::list_highlight(Color::Cyan));

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, body, &mut state);

        let hints = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(hints, footer);
    }
}

enum ActiveScreen {
    Root(RootScreen),
    Book(Box<BookScreen>),
    Agenda(Box<AgendaScreen>),
}

enum Transition {
    Open(RootAction),
    Return(UiExit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrainReason {
    Timeout,
    AfterInput,
}

trait RootLoopTickTarget {
    fn on_tick(&mut self);
    fn should_drain_loader_after_input(&self) -> bool;
}

impl RootLoopTickTarget for BookScreen {
    fn on_tick(&mut self) {
        BookScreen::on_tick(self);
    }

    fn should_drain_loader_after_input(&self) -> bool {
        BookScreen::should_drain_loader_after_input(self)
    }
}

fn root_loop_drain_helper<T: RootLoopTickTarget>(target: &mut T, reason: DrainReason) -> bool {
    if !matches!(reason, DrainReason::Timeout) && !target.should_drain_loader_after_input() {
        return false;
    }

    target.on_tick();
    true
}

fn root_loop_drain_slot_loader(active: &mut ActiveScreen, reason: DrainReason) -> bool {
    let ActiveScreen::Book(screen) = active else {
        return false;
    };

    root_loop_drain_helper(screen.as_mut(), reason)
}

pub fn run_root(app: &App<'_>, base_url: &str) -> Result<UiExit> {
    let mut session = TerminalSession::enter()?;
    let mut active = ActiveScreen::Root(RootScreen::new());
    let mut global_error: Option<String> = None;
    const TICK_RATE: Duration = Duration::from_millis(120);

    loop {
        session.draw(|frame| {
            match &active {
                ActiveScreen::Root(screen) => screen.render(frame, base_url),
                ActiveScreen::Book(screen) => screen.render(frame),
                ActiveScreen::Agenda(screen) => screen.render(frame),
            }

            if let Some(message) = global_error.as_deref() {
                render_global_error(frame, message);
            }
        })?;

        let has_event = event::poll(TICK_RATE).context("failed to poll terminal event")?;
        if !has_event {
            root_loop_drain_slot_loader(&mut active, DrainReason::Timeout);
            continue;
        }

        let event = event::read().context("failed to read terminal event")?;
        let key = match event {
            Event::Resize(_, _) => {
                session.autoresize()?;
                continue;
            }
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => key,
            _ => continue,
        };

        if is_ctrl_c(key) {
            return Ok(UiExit::Canceled);
        }

        if global_error.is_some() {
            if keymap::is_confirm(key) || keymap::is_back(key) {
                global_error = None;
            }
            continue;
        }

        let transition = match &mut active {
            ActiveScreen::Root(screen) => match screen.on_key(key) {
                Some(RootMenuExit::Action(action)) => Some(Transition::Open(action)),
                Some(RootMenuExit::Exit) => Some(Transition::Return(UiExit::Completed)),
                None => None,
            },
            ActiveScreen::Book(screen) => match screen.on_key(key, app) {
                Ok(value) => value.map(Transition::Return),
                Err(error) => {
                    global_error = Some(format!("{error:#}"));
                    None
                }
            },
            ActiveScreen::Agenda(screen) => match screen.on_key(key, app) {
                Ok(value) => value.map(Transition::Return),
                Err(error) => {
                    global_error = Some(format!("{error:#}"));
                    None
                }
            },
        };

        if let Some(transition) = transition {
            match transition {
                Transition::Open(action) => match action {
                    RootAction::Book => match BookScreen::new(app) {
                        Ok(screen) => active = ActiveScreen::Book(Box::new(screen)),
                        Err(error) => global_error = Some(format!("{error:#}")),
                    },
                    RootAction::Agenda => match AgendaScreen::new(app) {
                        Ok(screen) => active = ActiveScreen::Agenda(Box::new(screen)),
                        Err(error) => global_error = Some(format!("{error:#}")),
                    },
                },
                Transition::Return(UiExit::Canceled) => return Ok(UiExit::Canceled),
                Transition::Return(UiExit::Completed) => return Ok(UiExit::Completed),
                Transition::Return(UiExit::BackAtRoot) => {
                    active = ActiveScreen::Root(RootScreen::new());
                }
            }
        }

        if global_error.is_none() {
            root_loop_drain_slot_loader(&mut active, DrainReason::AfterInput);
        }
    }
}

fn render_global_error(frame: &mut ratatui::Frame<'_>, message: &str) {
    let text = format!("Operation failed.\n\n{message}");
    render_error_modal(frame, &text, "Enter/Esc: continue");
}

pub(crate) fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    area: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let pct_x = percent_x.min(100);
    let pct_y = percent_y.min(100);

    let [_, vertical, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .areas(area);
    let [_, horizontal, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .areas(vertical);
    horizontal
}

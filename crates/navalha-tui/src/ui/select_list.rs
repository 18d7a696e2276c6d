use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState};

use crate::keymap;
use crate::theme;

/// Cursor over a fixed list of display rows; the caller keeps the backing
/// data and maps the selected index back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectList {
    rows: Vec<String>,
    selected: usize,
}

impl SelectList {
    pub(crate) fn new(rows: Vec<String>) -> Self {
        Self { rows, selected: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    /// Returns true when the key moved the cursor.
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> bool {
        if keymap::is_up(key) {
            self.selected = self.selected.saturating_sub(1);
            return true;
        }

        if keymap::is_down(key) {
            if self.selected + 1 < self.rows.len() {
                self.selected += 1;
            }
            return true;
        }

        false
    }

    pub(crate) fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        title: Line<'_>,
        marked: Option<usize>,
    ) {
        let items: Vec<ListItem<'_>> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let marker = if Some(index) == marked { "● " } else { "○ " };
                ListItem::new(format!("{marker}{row}"))
            })
            .collect();

        let list = List::new(items)
            .block(theme::chrome(title))
            .highlight_style(theme::list_highlight(Color::Cyan));

        let mut state = ListState::default();
        if !self.rows.is_empty() {
            state.select(Some(self.selected.min(self.rows.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::SelectList;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn list() -> SelectList {
        SelectList::new(vec![
            "Corte Masculino".to_string(),
            "Barba".to_string(),
            "Corte + Barba".to_string(),
        ])
    }

    #[test]
    fn cursor_moves_within_bounds() {
        let mut list = list();
        assert_eq!(list.selected(), 0);

        assert!(list.on_key(key(KeyCode::Char('j'))));
        assert!(list.on_key(key(KeyCode::Down)));
        assert_eq!(list.selected(), 2);

        assert!(list.on_key(key(KeyCode::Down)));
        assert_eq!(list.selected(), 2, "cursor stops at the last row");

        assert!(list.on_key(key(KeyCode::Char('k'))));
        assert_eq!(list.selected(), 1);
    }

    #[test]
    fn cursor_floors_at_zero() {
        let mut list = list();
        assert!(list.on_key(key(KeyCode::Up)));
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn unrelated_keys_do_not_move_the_cursor() {
        let mut list = list();
        assert!(!list.on_key(key(KeyCode::Char('x'))));
        assert!(!list.on_key(key(KeyCode::Enter)));
        assert_eq!(list.selected(), 0);
    }
}

use crossterm::event::{KeyCode, KeyEvent};

pub(crate) fn is_back(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
}

pub(crate) fn is_confirm(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter)
}

pub(crate) fn is_up(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Up | KeyCode::Char('k'))
}

pub(crate) fn is_down(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Down | KeyCode::Char('j'))
}

pub(crate) fn is_left(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Left | KeyCode::Char('h'))
}

pub(crate) fn is_right(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Right | KeyCode::Char('l'))
}

pub(crate) fn is_toggle(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(' '))
}

pub(crate) fn is_field_switch(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Tab)
}

pub(crate) fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{
        is_back, is_confirm, is_down, is_field_switch, is_left, is_quit, is_right, is_toggle,
        is_up,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vertical_keys_match_arrows_and_vim() {
        assert!(is_up(key(KeyCode::Up)));
        assert!(is_up(key(KeyCode::Char('k'))));
        assert!(is_down(key(KeyCode::Down)));
        assert!(is_down(key(KeyCode::Char('j'))));
        assert!(!is_up(key(KeyCode::Char('j'))));
    }

    #[test]
    fn horizontal_keys_match_arrows_and_vim() {
        assert!(is_left(key(KeyCode::Left)));
        assert!(is_left(key(KeyCode::Char('h'))));
        assert!(is_right(key(KeyCode::Right)));
        assert!(is_right(key(KeyCode::Char('l'))));
        assert!(!is_right(key(KeyCode::Char('h'))));
    }

    #[test]
    fn confirm_back_toggle_switch_and_quit_match_contract() {
        assert!(is_confirm(key(KeyCode::Enter)));
        assert!(is_back(key(KeyCode::Esc)));
        assert!(is_toggle(key(KeyCode::Char(' '))));
        assert!(is_field_switch(key(KeyCode::Tab)));
        assert!(is_quit(key(KeyCode::Char('q'))));
        assert!(!is_back(key(KeyCode::Enter)));
    }
}

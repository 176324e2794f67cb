use crossterm::event::KeyCode;

/// Outcome of a confirmed menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Choice(usize),
    Quit,
}

/// Highlight state for one selection prompt. The Quit pseudo-option, when
/// allowed, occupies one extra slot after the labels; navigation wraps over
/// the full slot count in both directions.
#[derive(Debug, Clone)]
pub struct Menu {
    prompt: String,
    labels: Vec<String>,
    allow_quit: bool,
    highlighted: usize,
}

impl Menu {
    pub fn new(prompt: impl Into<String>, labels: Vec<String>, allow_quit: bool) -> Self {
        Self {
            prompt: prompt.into(),
            labels,
            allow_quit,
            highlighted: 0,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn allow_quit(&self) -> bool {
        self.allow_quit
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    fn slot_count(&self) -> usize {
        self.labels.len() + usize::from(self.allow_quit)
    }

    fn is_quit_highlighted(&self) -> bool {
        self.allow_quit && self.highlighted == self.labels.len()
    }

    pub fn select_prev(&mut self) {
        let slots = self.slot_count();
        self.highlighted = (self.highlighted + slots - 1) % slots;
    }

    pub fn select_next(&mut self) {
        self.highlighted = (self.highlighted + 1) % self.slot_count();
    }

    fn confirm(&self) -> Selection {
        if self.is_quit_highlighted() {
            Selection::Quit
        } else {
            Selection::Choice(self.highlighted)
        }
    }

    /// Apply one key. Returns the selection once confirmed; any key other
    /// than Up/Down/Enter does nothing.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<Selection> {
        match code {
            KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Enter => Some(self.confirm()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(allow_quit: bool) -> Menu {
        Menu::new(
            "Select Study Time:",
            vec!["25:00 (Short Study)".into(), "50:00 (Long Study)".into()],
            allow_quit,
        )
    }

    #[test]
    fn test_starts_at_first_option() {
        assert_eq!(menu(true).highlighted(), 0);
    }

    #[test]
    fn test_down_wraps_over_quit_slot() {
        let mut menu = menu(true);
        menu.select_next();
        assert_eq!(menu.highlighted(), 1);
        menu.select_next();
        assert_eq!(menu.highlighted(), 2); // the Quit slot
        menu.select_next();
        assert_eq!(menu.highlighted(), 0);
    }

    #[test]
    fn test_up_from_first_wraps_to_quit_slot() {
        let mut menu = menu(true);
        menu.select_prev();
        assert_eq!(menu.highlighted(), 2);
        menu.select_prev();
        assert_eq!(menu.highlighted(), 1);
    }

    #[test]
    fn test_wrap_without_quit_slot() {
        let mut menu = menu(false);
        menu.select_prev();
        assert_eq!(menu.highlighted(), 1);
        menu.select_next();
        assert_eq!(menu.highlighted(), 0);
    }

    #[test]
    fn test_enter_confirms_highlighted_index() {
        let mut menu = menu(true);
        menu.select_next();
        assert_eq!(menu.handle_key(KeyCode::Enter), Some(Selection::Choice(1)));
    }

    #[test]
    fn test_enter_on_quit_slot_cancels() {
        let mut menu = menu(true);
        menu.select_prev(); // wraps straight onto Quit
        assert_eq!(menu.handle_key(KeyCode::Enter), Some(Selection::Quit));
    }

    #[test]
    fn test_unrecognized_keys_do_nothing() {
        let mut menu = menu(true);
        assert_eq!(menu.handle_key(KeyCode::Char('x')), None);
        assert_eq!(menu.handle_key(KeyCode::Esc), None);
        assert_eq!(menu.handle_key(KeyCode::Left), None);
        assert_eq!(menu.highlighted(), 0);
    }

    #[test]
    fn test_arrow_keys_move_without_confirming() {
        let mut menu = menu(true);
        assert_eq!(menu.handle_key(KeyCode::Down), None);
        assert_eq!(menu.handle_key(KeyCode::Up), None);
        assert_eq!(menu.highlighted(), 0);
    }

    #[test]
    fn test_single_option_menu_wraps_in_place() {
        let mut menu = Menu::new("Pick:", vec!["only".into()], false);
        menu.select_next();
        assert_eq!(menu.highlighted(), 0);
        menu.select_prev();
        assert_eq!(menu.highlighted(), 0);
    }
}

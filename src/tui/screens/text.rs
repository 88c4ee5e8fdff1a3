use std::any::Any;

use crate::core::screen::{Screen, ScreenBase};
use crate::core::state::App;
use crate::source::FetchError;
use crate::tui::screen::pprint;

const TEXT_MARGIN: usize = 3;

/// Free text reflowed to a fixed column width.
pub struct TextScreen {
    base: ScreenBase,
    text: String,
    width: usize,
}

impl TextScreen {
    pub fn new(text: String, width: usize) -> Self {
        Self {
            base: ScreenBase::new("Text"),
            text,
            width: width.max(1),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Screen for TextScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn event(&mut self, _app: &mut App, out: &mut String) -> Result<(), FetchError> {
        for line in textwrap::wrap(&self.text, self.width) {
            pprint(out, &line, TEXT_MARGIN);
        }
        out.push('\n');
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Transition;
    use crate::test_support::test_app;

    #[test]
    fn test_lines_wrap_at_width() {
        let mut app = test_app();
        let mut screen = TextScreen::new("one two three four five six".into(), 10);

        let mut out = String::new();
        screen.event(&mut app, &mut out).unwrap();

        let lines: Vec<&str> = out.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["   one two", "   three four", "   five six"]);
    }

    #[test]
    fn test_any_input_stays() {
        let mut app = test_app();
        let mut screen = TextScreen::new("x".into(), 80);
        assert!(matches!(screen.action("z", &mut app), Transition::Stay));
    }
}

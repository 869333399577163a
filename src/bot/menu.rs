//! The demo menu: two pages that swap in place via inline buttons.

use super::keyboard::{Button, Keyboard};
use crate::constants::{buttons, links};

const FIRST_MENU: &str = "<b>Menu 1</b>\n\nA beautiful menu with a shiny inline button.";
const SECOND_MENU: &str = "<b>Menu 2</b>\n\nA better menu with even more shiny inline buttons.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPage {
    First,
    Second,
}

impl MenuPage {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::First => FIRST_MENU,
            Self::Second => SECOND_MENU,
        }
    }

    #[must_use]
    pub fn keyboard(self) -> Keyboard {
        match self {
            Self::First => Keyboard::new(vec![vec![Button::callback(
                buttons::NEXT,
                buttons::NEXT,
            )]]),
            Self::Second => Keyboard::new(vec![
                vec![Button::callback(buttons::BACK, buttons::BACK)],
                vec![Button::url(buttons::TUTORIAL, links::TUTORIAL_URL)],
            ]),
        }
    }

    /// Page to show after a menu button press, `None` for other buttons.
    #[must_use]
    pub fn after_press(data: &str) -> Option<Self> {
        match data {
            buttons::NEXT => Some(Self::Second),
            buttons::BACK => Some(Self::First),
            _ => None,
        }
    }
}

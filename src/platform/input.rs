//! Input adapter
//!
//! Collapses raw host events into the game's single logical action.

/// On-screen buttons the host may forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiButton {
    Start,
    Restart,
    /// Window chrome; not a gameplay input
    Fullscreen,
}

/// A raw event as the host reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Keyboard press: physical `code` (e.g. "Space") and logical `key`
    /// (e.g. "ArrowUp")
    Key { code: String, key: String },
    /// Mouse click or touch on the play area
    PointerDown,
    Button(UiButton),
}

impl RawInput {
    pub fn key(code: &str, key: &str) -> Self {
        RawInput::Key {
            code: code.to_string(),
            key: key.to_string(),
        }
    }
}

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start/restart when not running, flap when running
    Primary,
}

/// Map a raw event to an action; anything unrecognized is ignored
pub fn map_input(raw: &RawInput) -> Option<Action> {
    match raw {
        RawInput::Key { code, key } if code == "Space" || key == "ArrowUp" => {
            Some(Action::Primary)
        }
        RawInput::PointerDown => Some(Action::Primary),
        RawInput::Button(UiButton::Start | UiButton::Restart) => Some(Action::Primary),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_sources() {
        assert_eq!(map_input(&RawInput::key("Space", " ")), Some(Action::Primary));
        assert_eq!(
            map_input(&RawInput::key("ArrowUp", "ArrowUp")),
            Some(Action::Primary)
        );
        assert_eq!(map_input(&RawInput::PointerDown), Some(Action::Primary));
        assert_eq!(
            map_input(&RawInput::Button(UiButton::Restart)),
            Some(Action::Primary)
        );
    }

    #[test]
    fn test_other_events_ignored() {
        assert_eq!(map_input(&RawInput::key("KeyA", "a")), None);
        assert_eq!(map_input(&RawInput::key("ArrowDown", "ArrowDown")), None);
        assert_eq!(map_input(&RawInput::Button(UiButton::Fullscreen)), None);
    }
}

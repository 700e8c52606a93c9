//! Keyboard input mapping

/// Maximum username length accepted on the submit form
pub const USERNAME_MAX: usize = 16;

/// What a key press means during play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayKey {
    FocusNext,
    FocusPrev,
    Activate,
    PanelSlot(usize),
    Quit,
}

/// Classify a key during the playing screen. Focus movement and
/// activation only apply when keyboard navigation is enabled; the
/// caller gates that.
pub fn classify_play_key(key: &str, shift: bool) -> Option<PlayKey> {
    match key {
        "Tab" if shift => Some(PlayKey::FocusPrev),
        "Tab" | "ArrowRight" | "ArrowDown" => Some(PlayKey::FocusNext),
        "ArrowLeft" | "ArrowUp" => Some(PlayKey::FocusPrev),
        "Enter" | " " => Some(PlayKey::Activate),
        "1" => Some(PlayKey::PanelSlot(0)),
        "2" => Some(PlayKey::PanelSlot(1)),
        "3" => Some(PlayKey::PanelSlot(2)),
        "Escape" => Some(PlayKey::Quit),
        _ => None,
    }
}

/// Advance the focused-object index, wrapping at both ends
pub fn cycle_focus(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

/// Result of applying a key to the username field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameEdit {
    Changed,
    Submit,
    Ignored,
}

/// Edit the submit-form username with a raw key value
pub fn apply_username_key(username: &mut String, key: &str) -> UsernameEdit {
    match key {
        "Enter" => UsernameEdit::Submit,
        "Backspace" => {
            if username.pop().is_some() {
                UsernameEdit::Changed
            } else {
                UsernameEdit::Ignored
            }
        }
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None)
                    if (c.is_ascii_alphanumeric() || c == '_' || c == '-')
                        && username.len() < USERNAME_MAX =>
                {
                    username.push(c);
                    UsernameEdit::Changed
                }
                _ => UsernameEdit::Ignored,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_key_classification() {
        assert_eq!(classify_play_key("Tab", false), Some(PlayKey::FocusNext));
        assert_eq!(classify_play_key("Tab", true), Some(PlayKey::FocusPrev));
        assert_eq!(classify_play_key("Enter", false), Some(PlayKey::Activate));
        assert_eq!(classify_play_key(" ", false), Some(PlayKey::Activate));
        assert_eq!(classify_play_key("2", false), Some(PlayKey::PanelSlot(1)));
        assert_eq!(classify_play_key("Escape", false), Some(PlayKey::Quit));
        assert_eq!(classify_play_key("q", false), None);
    }

    #[test]
    fn test_focus_wraps() {
        assert_eq!(cycle_focus(4, 5, true), 0);
        assert_eq!(cycle_focus(0, 5, false), 4);
        assert_eq!(cycle_focus(2, 5, true), 3);
        assert_eq!(cycle_focus(0, 0, true), 0, "Empty list stays put");
    }

    #[test]
    fn test_username_editing() {
        let mut name = String::new();
        assert_eq!(apply_username_key(&mut name, "g"), UsernameEdit::Changed);
        assert_eq!(apply_username_key(&mut name, "e"), UsernameEdit::Changed);
        assert_eq!(apply_username_key(&mut name, "m"), UsernameEdit::Changed);
        assert_eq!(apply_username_key(&mut name, "!"), UsernameEdit::Ignored);
        assert_eq!(apply_username_key(&mut name, "Shift"), UsernameEdit::Ignored);
        assert_eq!(apply_username_key(&mut name, "Backspace"), UsernameEdit::Changed);
        assert_eq!(name, "ge");
        assert_eq!(apply_username_key(&mut name, "Enter"), UsernameEdit::Submit);
    }

    #[test]
    fn test_username_length_cap() {
        let mut name = "a".repeat(USERNAME_MAX);
        assert_eq!(apply_username_key(&mut name, "b"), UsernameEdit::Ignored);
        assert_eq!(name.len(), USERNAME_MAX);
    }

    #[test]
    fn test_backspace_on_empty_is_ignored() {
        let mut name = String::new();
        assert_eq!(apply_username_key(&mut name, "Backspace"), UsernameEdit::Ignored);
    }
}

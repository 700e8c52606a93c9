//! Screen State Machine
//!
//! Routes the UI between menu, tutorial, play and leaderboard screens.

/// UI screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Tutorial,
    ModeSelect,
    Intro,
    Playing,
    Complete,
    Settings,
    Accessibility,
    Leaderboard,
    Submit,
}

/// Actions that trigger screen transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Play,
    SkipTutorial,
    TutorialDone,
    ModeChosen,
    IntroDone,
    GameOver,
    EndAndSubmit,
    ScoreSubmitted,
    PlayAgain,
    OpenSettings,
    OpenAccessibility,
    OpenLeaderboard,
    Quit,
    Back,
}

/// Result of a screen transition
#[derive(Debug, Clone, Copy)]
pub struct TransitionResult {
    pub success: bool,
    pub from_screen: Screen,
    pub to_screen: Screen,
    pub action: UiAction,
}

/// Screen Finite State Machine
pub struct ScreenFsm {
    screen: Screen,
}

impl ScreenFsm {
    pub fn new() -> Self {
        Self {
            screen: Screen::Menu,
        }
    }

    /// Get current screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: UiAction) -> bool {
        self.next_screen(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: UiAction) -> TransitionResult {
        let from_screen = self.screen;

        if let Some(next) = self.next_screen(action) {
            self.screen = next;
            TransitionResult {
                success: true,
                from_screen,
                to_screen: next,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_screen,
                to_screen: from_screen,
                action,
            }
        }
    }

    /// Get next screen for a given action (if valid)
    fn next_screen(&self, action: UiAction) -> Option<Screen> {
        match (self.screen, action) {
            // From Menu
            (Screen::Menu, UiAction::Play) => Some(Screen::Tutorial),
            (Screen::Menu, UiAction::SkipTutorial) => Some(Screen::ModeSelect),
            (Screen::Menu, UiAction::OpenSettings) => Some(Screen::Settings),
            (Screen::Menu, UiAction::OpenAccessibility) => Some(Screen::Accessibility),
            (Screen::Menu, UiAction::OpenLeaderboard) => Some(Screen::Leaderboard),

            // From Tutorial
            (Screen::Tutorial, UiAction::TutorialDone) => Some(Screen::ModeSelect),
            (Screen::Tutorial, UiAction::Back) => Some(Screen::Menu),

            // From ModeSelect
            (Screen::ModeSelect, UiAction::ModeChosen) => Some(Screen::Intro),
            (Screen::ModeSelect, UiAction::Back) => Some(Screen::Menu),

            // From Intro
            (Screen::Intro, UiAction::IntroDone) => Some(Screen::Playing),
            (Screen::Intro, UiAction::Quit) => Some(Screen::Menu),

            // From Playing
            (Screen::Playing, UiAction::GameOver) => Some(Screen::Complete),
            (Screen::Playing, UiAction::EndAndSubmit) => Some(Screen::Submit),
            (Screen::Playing, UiAction::Quit) => Some(Screen::Menu),

            // From Complete
            (Screen::Complete, UiAction::PlayAgain) => Some(Screen::Intro),
            (Screen::Complete, UiAction::EndAndSubmit) => Some(Screen::Submit),
            (Screen::Complete, UiAction::Back) => Some(Screen::Menu),

            // From Submit
            (Screen::Submit, UiAction::ScoreSubmitted) => Some(Screen::Leaderboard),
            (Screen::Submit, UiAction::Back) => Some(Screen::Complete),

            // From Settings
            (Screen::Settings, UiAction::OpenAccessibility) => Some(Screen::Accessibility),
            (Screen::Settings, UiAction::Back) => Some(Screen::Menu),

            // From Accessibility
            (Screen::Accessibility, UiAction::Back) => Some(Screen::Menu),

            // From Leaderboard
            (Screen::Leaderboard, UiAction::Back) => Some(Screen::Menu),

            // Invalid transition
            _ => None,
        }
    }

    /// Reset to the menu
    pub fn reset(&mut self) {
        self.screen = Screen::Menu;
    }

    /// Check if gameplay input should reach the field
    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Playing
    }

    /// Check if a session is live (intro counts; the field is visible)
    pub fn in_session(&self) -> bool {
        matches!(self.screen, Screen::Intro | Screen::Playing)
    }
}

impl Default for ScreenFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_screen() {
        let fsm = ScreenFsm::new();
        assert_eq!(fsm.screen(), Screen::Menu);
    }

    #[test]
    fn test_valid_transition() {
        let mut fsm = ScreenFsm::new();
        let result = fsm.transition(UiAction::Play);
        assert!(result.success);
        assert_eq!(fsm.screen(), Screen::Tutorial);
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = ScreenFsm::new();
        let result = fsm.transition(UiAction::GameOver);
        assert!(!result.success);
        assert_eq!(fsm.screen(), Screen::Menu);
    }

    #[test]
    fn test_first_visit_flow() {
        let mut fsm = ScreenFsm::new();
        fsm.transition(UiAction::Play);
        fsm.transition(UiAction::TutorialDone);
        assert_eq!(fsm.screen(), Screen::ModeSelect);
        fsm.transition(UiAction::ModeChosen);
        assert_eq!(fsm.screen(), Screen::Intro);
        fsm.transition(UiAction::IntroDone);
        assert!(fsm.is_playing());
        fsm.transition(UiAction::GameOver);
        assert_eq!(fsm.screen(), Screen::Complete);
        fsm.transition(UiAction::PlayAgain);
        assert_eq!(fsm.screen(), Screen::Intro);
    }

    #[test]
    fn test_returning_player_skips_tutorial() {
        let mut fsm = ScreenFsm::new();
        fsm.transition(UiAction::SkipTutorial);
        assert_eq!(fsm.screen(), Screen::ModeSelect);
    }

    #[test]
    fn test_submit_flow_from_play() {
        let mut fsm = ScreenFsm::new();
        fsm.transition(UiAction::SkipTutorial);
        fsm.transition(UiAction::ModeChosen);
        fsm.transition(UiAction::IntroDone);
        fsm.transition(UiAction::EndAndSubmit);
        assert_eq!(fsm.screen(), Screen::Submit);
        fsm.transition(UiAction::ScoreSubmitted);
        assert_eq!(fsm.screen(), Screen::Leaderboard);
        fsm.transition(UiAction::Back);
        assert_eq!(fsm.screen(), Screen::Menu);
    }

    #[test]
    fn test_settings_and_accessibility_routes() {
        let mut fsm = ScreenFsm::new();
        fsm.transition(UiAction::OpenSettings);
        assert_eq!(fsm.screen(), Screen::Settings);
        fsm.transition(UiAction::OpenAccessibility);
        assert_eq!(fsm.screen(), Screen::Accessibility);
        fsm.transition(UiAction::Back);
        assert_eq!(fsm.screen(), Screen::Menu);
    }

    #[test]
    fn test_quit_leaves_session() {
        let mut fsm = ScreenFsm::new();
        fsm.transition(UiAction::SkipTutorial);
        fsm.transition(UiAction::ModeChosen);
        assert!(fsm.in_session());
        fsm.transition(UiAction::Quit);
        assert_eq!(fsm.screen(), Screen::Menu);
        assert!(!fsm.in_session());
    }
}

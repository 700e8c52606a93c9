//! Screen layout and HUD text
//!
//! Button rectangles live in a fixed 600-unit design space; callers scale
//! raw canvas pixels into design units before hit-testing, so the same
//! geometry drives both rendering and click dispatch.

use crate::fsm::Screen;
use game_core::GameMode;

/// Edge of the design coordinate space
pub const DESIGN_EDGE: f32 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Everything clickable that is not a field object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Play,
    OpenSettings,
    OpenAccessibility,
    OpenLeaderboard,
    TutorialNext,
    ChooseClassic,
    ChooseTimeTrial,
    PlayAgain,
    EndAndSubmit,
    SubmitScore,
    QuitToMenu,
    Back,
    ToggleSound,
    ToggleHighContrast,
    ToggleColorBlind,
    ToggleScreenReader,
    ToggleKeyboardNav,
    ToggleReducedMotion,
    ToggleLargeText,
}

#[derive(Debug, Clone, Copy)]
pub struct Button {
    pub id: ButtonId,
    pub label: &'static str,
    pub rect: Rect,
}

const fn button(id: ButtonId, label: &'static str, x: f32, y: f32, w: f32, h: f32) -> Button {
    Button {
        id,
        label,
        rect: Rect::new(x, y, w, h),
    }
}

const BACK: Button = button(ButtonId::Back, "Back", 20.0, 20.0, 90.0, 36.0);

/// Buttons shown on a screen, top to bottom
pub fn buttons_for(screen: Screen) -> Vec<Button> {
    match screen {
        Screen::Menu => vec![
            button(ButtonId::Play, "Play", 200.0, 270.0, 200.0, 56.0),
            button(ButtonId::OpenLeaderboard, "Leaderboard", 200.0, 340.0, 200.0, 44.0),
            button(ButtonId::OpenSettings, "Settings", 200.0, 396.0, 200.0, 44.0),
            button(ButtonId::OpenAccessibility, "Accessibility", 200.0, 452.0, 200.0, 44.0),
        ],
        Screen::Tutorial => vec![
            button(ButtonId::TutorialNext, "Got it!", 200.0, 480.0, 200.0, 52.0),
            BACK,
        ],
        Screen::ModeSelect => vec![
            button(ButtonId::ChooseClassic, "Classic", 150.0, 240.0, 300.0, 64.0),
            button(ButtonId::ChooseTimeTrial, "Time Trial", 150.0, 330.0, 300.0, 64.0),
            BACK,
        ],
        Screen::Intro => vec![],
        Screen::Playing => vec![
            button(ButtonId::QuitToMenu, "Menu", 10.0, 562.0, 110.0, 30.0),
            button(ButtonId::EndAndSubmit, "End & Submit", 440.0, 562.0, 150.0, 30.0),
        ],
        Screen::Complete => vec![
            button(ButtonId::PlayAgain, "Play Again", 200.0, 380.0, 200.0, 52.0),
            button(ButtonId::EndAndSubmit, "Submit Score", 200.0, 444.0, 200.0, 44.0),
            button(ButtonId::Back, "Menu", 200.0, 500.0, 200.0, 40.0),
        ],
        Screen::Submit => vec![
            button(ButtonId::SubmitScore, "Submit", 200.0, 420.0, 200.0, 52.0),
            BACK,
        ],
        Screen::Settings => vec![
            button(ButtonId::ToggleSound, "Sound", 150.0, 220.0, 300.0, 48.0),
            button(ButtonId::OpenAccessibility, "Accessibility...", 150.0, 288.0, 300.0, 48.0),
            BACK,
        ],
        Screen::Accessibility => vec![
            button(ButtonId::ToggleHighContrast, "High Contrast", 150.0, 140.0, 300.0, 48.0),
            button(ButtonId::ToggleColorBlind, "Color Blind Mode", 150.0, 198.0, 300.0, 48.0),
            button(ButtonId::ToggleScreenReader, "Screen Reader", 150.0, 256.0, 300.0, 48.0),
            button(ButtonId::ToggleKeyboardNav, "Keyboard Navigation", 150.0, 314.0, 300.0, 48.0),
            button(ButtonId::ToggleReducedMotion, "Reduced Motion", 150.0, 372.0, 300.0, 48.0),
            button(ButtonId::ToggleLargeText, "Large Text", 150.0, 430.0, 300.0, 48.0),
            BACK,
        ],
        Screen::Leaderboard => vec![BACK],
    }
}

/// Hit-test a design-space point against a screen's buttons
pub fn button_at(screen: Screen, x: f32, y: f32) -> Option<ButtonId> {
    buttons_for(screen)
        .iter()
        .find(|b| b.rect.contains(x, y))
        .map(|b| b.id)
}

/// Side-panel power-up slots along the right edge during play
pub fn panel_slot_rect(index: usize) -> Rect {
    Rect::new(542.0, 150.0 + index as f32 * 76.0, 48.0, 48.0)
}

pub fn panel_slot_at(x: f32, y: f32) -> Option<usize> {
    (0..3).find(|i| panel_slot_rect(*i).contains(x, y))
}

/// Clock readout, one decimal
pub fn format_seconds(ms: f32) -> String {
    format!("{:.1}s", ms.max(0.0) / 1000.0)
}

pub fn round_label(mode: GameMode, round: u32) -> String {
    match mode.max_rounds() {
        Some(max) => format!("Round {}/{}", round, max),
        None => format!("Round {}", round),
    }
}

//! Session controller
//!
//! Owns the simulation state and the UI shell around it: screen routing,
//! the intro staging, display clocks, input dispatch and the leaderboard
//! submission flow. One instance lives in the thread-local slot in
//! `lib.rs` and is driven by the animation-frame loop.

use crate::audio::AudioPlayer;
use crate::fsm::{Screen, ScreenFsm, UiAction};
use crate::gesture::PinchTracker;
use crate::hud::{self, ButtonId, DESIGN_EDGE};
use crate::input::{self, PlayKey, UsernameEdit};
use crate::settings::{self, AccessibilitySettings};
use crate::{announcer, leaderboard, render};
use game_core::systems::activate_panel_slot;
use game_core::*;
use glam::Vec2;
use hecs::World;
use proto::{ScoreRow, ScoreSubmission};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

const TUTORIAL_KEY: &str = "tutorial-seen";

/// "FIND THE GEM!" display window, ms
const INTRO_BANNER_MS: f64 = 2000.0;
/// "GET READY..." display window, ms
const INTRO_READY_MS: f64 = 1000.0;
/// Display-clock cadence, ms
const CLOCK_TICK_MS: f32 = 100.0;
/// How long transient HUD flashes stay up, ms
const FLASH_MS: f64 = 900.0;
const HINT_FLASH_MS: f64 = 2000.0;

pub struct App {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub fsm: ScreenFsm,
    pub mode: GameMode,
    pub settings: AccessibilitySettings,
    pub seen_tutorial: bool,

    // Simulation state
    pub world: World,
    pub time: Time,
    pub config: Config,
    pub round: Round,
    pub effects: Effects,
    pub panel: SidePanel,
    pub stats: SessionStats,
    pub events: Events,
    pub queue: ActivationQueue,
    pub rng: GameRng,

    // Controller clocks (performance.now ms for UI, seconds inside `time`)
    pub last_ts: f64,
    pub intro_started: f64,
    pub display_time_ms: f32,
    pub remaining_ms: f32,
    clock_accum_ms: f32,

    // UI state
    pub focus: usize,
    pub pinch: PinchTracker,
    pub audio: AudioPlayer,
    pub username: String,
    pub submit_status: Option<&'static str>,
    pub pending: Option<ScoreSubmission>,
    pub rows: Vec<ScoreRow>,
    pub personal_best: Option<ScoreRow>,
    pub earned: Vec<&'static Achievement>,
    pub points_flash: Option<(u64, f64)>,
    pub hint_flash: Option<(Quadrant, f64)>,
}

impl App {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas not found"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let settings = settings::load();
        let device = if window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .is_some_and(|w| w < 768.0)
        {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        };
        let config = Config {
            device,
            access: settings.to_core(),
            field_size_px: canvas.width() as f32,
            ..Config::default()
        };

        Ok(Self {
            canvas,
            ctx,
            fsm: ScreenFsm::new(),
            mode: GameMode::Classic,
            settings,
            seen_tutorial: flag_set(TUTORIAL_KEY),
            world: World::new(),
            time: Time::new(0.0, 0.0),
            config,
            round: Round::new(),
            effects: Effects::new(),
            panel: SidePanel::default(),
            stats: SessionStats::new(),
            events: Events::new(),
            queue: ActivationQueue::default(),
            rng: GameRng::new(js_sys::Date::now() as u64),
            last_ts: 0.0,
            intro_started: 0.0,
            display_time_ms: 0.0,
            remaining_ms: 0.0,
            clock_accum_ms: 0.0,
            focus: 0,
            pinch: PinchTracker::new(),
            audio: AudioPlayer::new(),
            username: String::new(),
            submit_status: None,
            pending: None,
            rows: Vec::new(),
            personal_best: None,
            earned: Vec::new(),
            points_flash: None,
            hint_flash: None,
        })
    }

    /// One animation frame: advance whatever the current screen owns,
    /// then repaint.
    pub fn frame(&mut self, ts: f64) {
        let dt = if self.last_ts > 0.0 {
            ((ts - self.last_ts) / 1000.0) as f32
        } else {
            0.0
        };
        self.last_ts = ts;

        match self.fsm.screen() {
            Screen::Intro => self.advance_intro(ts),
            Screen::Playing => self.advance_play(dt, ts),
            _ => {}
        }

        render::draw_frame(self);
    }

    /// Caption for the staged intro
    pub fn intro_caption(&self) -> &'static str {
        if self.last_ts - self.intro_started < INTRO_BANNER_MS {
            "FIND THE GEM!"
        } else {
            "GET READY..."
        }
    }

    fn advance_intro(&mut self, ts: f64) {
        if ts - self.intro_started >= INTRO_BANNER_MS + INTRO_READY_MS {
            self.fsm.transition(UiAction::IntroDone);
            self.start_round(1);
        }
    }

    fn advance_play(&mut self, dt: f32, ts: f64) {
        self.time.dt = dt;
        game_core::step(
            &mut self.world,
            &mut self.time,
            &self.config,
            &mut self.round,
            &mut self.effects,
            &mut self.stats,
            &mut self.events,
            &mut self.queue,
            &mut self.rng,
        );
        self.consume_events(ts);
        // A final-round completion may have already left the screen
        if self.fsm.is_playing() {
            self.tick_clock(dt);
        }
    }

    fn consume_events(&mut self, ts: f64) {
        let events = std::mem::take(&mut self.events);

        if self.settings.sound_enabled {
            for cue in &events.cues {
                self.audio.play(*cue);
            }
        }

        if self.settings.screen_reader {
            if events.target_found {
                self.announce("Gem found!");
            }
            for _ in &events.decoy_hits {
                self.announce("Wrong object");
            }
            for power in &events.powerups {
                match power.kind {
                    PowerUpKind::Zoom => self.announce("Zoom activated"),
                    PowerUpKind::Freeze => self.announce("Freeze activated"),
                    PowerUpKind::Hint => self.announce("Hint activated"),
                }
            }
        }

        if let Some(quadrant) = events.hint {
            self.hint_flash = Some((quadrant, ts + HINT_FLASH_MS));
            if self.settings.screen_reader {
                let text = format!("The gem is in the {} area", quadrant.label());
                self.announce(&text);
            }
        }

        if let Some(complete) = events.round_complete {
            self.points_flash = Some((complete.points, ts + FLASH_MS));
            if self.settings.screen_reader {
                let text = format!(
                    "Round {} complete, {} points",
                    self.round.number, complete.points
                );
                self.announce(&text);
            }
            if self.mode.is_final_round(self.round.number) {
                self.complete_game();
            } else {
                self.start_round(self.round.number + 1);
            }
        }

        // Hand the buffers back so allocations get reused
        self.events = events;
    }

    /// Advance the display clock on its 100 ms cadence. Time Trial counts
    /// down and ends the game at zero, even mid-round.
    fn tick_clock(&mut self, dt: f32) {
        self.clock_accum_ms += dt * 1000.0;
        while self.clock_accum_ms >= CLOCK_TICK_MS {
            self.clock_accum_ms -= CLOCK_TICK_MS;
            match self.mode {
                GameMode::Classic => self.display_time_ms += CLOCK_TICK_MS,
                GameMode::TimeTrial => {
                    self.remaining_ms -= CLOCK_TICK_MS;
                    if self.remaining_ms <= 0.0 {
                        self.remaining_ms = 0.0;
                        self.complete_game();
                        return;
                    }
                }
            }
        }
    }

    /// Reset session state and run the staged intro
    fn start_session(&mut self) {
        self.stats = SessionStats::new();
        self.display_time_ms = 0.0;
        self.remaining_ms = self.mode.time_budget_ms().unwrap_or(0.0);
        self.clock_accum_ms = 0.0;
        self.points_flash = None;
        self.hint_flash = None;
        self.earned.clear();
        self.pending = None;
        self.submit_status = None;
        self.pinch.reset();
        self.intro_started = now_ms();
        if self.settings.screen_reader {
            let text = format!("Starting {}", self.mode.name());
            self.announce(&text);
        }
    }

    fn start_round(&mut self, number: u32) {
        begin_round(
            &mut self.world,
            &self.time,
            &self.config,
            &mut self.round,
            &mut self.effects,
            &mut self.panel,
            &mut self.rng,
            number,
        );
        self.focus = 0;
        if self.settings.screen_reader {
            let text = hud::round_label(self.mode, number);
            self.announce(&text);
        }
    }

    fn complete_game(&mut self) {
        self.fsm.transition(UiAction::GameOver);
        self.earned = earned_achievements(&self.stats);
        if self.settings.screen_reader {
            let text = format!("Game complete. Final score {}", self.stats.score);
            self.announce(&text);
        }
    }

    // ----- input ------------------------------------------------------

    /// Pointer press in client coordinates, `contacts` live touch count
    /// (1 for the mouse)
    pub fn pointer_down(&mut self, client_x: f32, client_y: f32, contacts: u8) {
        let (x, y) = self.to_design(client_x, client_y);
        let screen = self.fsm.screen();

        if screen == Screen::Playing {
            if let Some(index) = hud::panel_slot_at(x, y) {
                self.use_panel_slot(index);
                return;
            }
            if let Some(id) = hud::button_at(screen, x, y) {
                self.handle_button(id);
                return;
            }
            let (fx, fy) = self.pinch.to_field_pct(x, y, DESIGN_EDGE);
            self.queue
                .push_activation(Vec2::new(fx, fy), contacts, self.round.generation);
            return;
        }

        if let Some(id) = hud::button_at(screen, x, y) {
            self.handle_button(id);
        }
    }

    /// Map client-space coordinates into the 600-unit design space
    fn to_design(&self, client_x: f32, client_y: f32) -> (f32, f32) {
        let rect = self.canvas.get_bounding_client_rect();
        let sx = DESIGN_EDGE / rect.width() as f32;
        let sy = DESIGN_EDGE / rect.height() as f32;
        (
            (client_x - rect.left() as f32) * sx,
            (client_y - rect.top() as f32) * sy,
        )
    }

    fn use_panel_slot(&mut self, index: usize) {
        activate_panel_slot(
            &mut self.world,
            &self.time,
            &self.round,
            &mut self.effects,
            &mut self.panel,
            &mut self.stats,
            &mut self.events,
            &mut self.rng,
            index,
        );
        // Effects queued as events land next frame; cues are in the
        // buffer the next `step` would clear, so surface them now.
        let ts = now_ms();
        self.consume_events(ts);
    }

    pub fn handle_button(&mut self, id: ButtonId) {
        if self.settings.sound_enabled {
            self.audio.play(Cue::Click);
        }
        match id {
            ButtonId::Play => {
                if self.seen_tutorial {
                    self.fsm.transition(UiAction::SkipTutorial);
                } else {
                    self.fsm.transition(UiAction::Play);
                }
            }
            ButtonId::TutorialNext => {
                self.seen_tutorial = true;
                set_flag(TUTORIAL_KEY);
                self.fsm.transition(UiAction::TutorialDone);
            }
            ButtonId::ChooseClassic => {
                self.mode = GameMode::Classic;
                if self.fsm.transition(UiAction::ModeChosen).success {
                    self.start_session();
                }
            }
            ButtonId::ChooseTimeTrial => {
                self.mode = GameMode::TimeTrial;
                if self.fsm.transition(UiAction::ModeChosen).success {
                    self.start_session();
                }
            }
            ButtonId::PlayAgain => {
                if self.fsm.transition(UiAction::PlayAgain).success {
                    self.start_session();
                }
            }
            ButtonId::EndAndSubmit => {
                self.pending = Some(self.snapshot_submission());
                self.earned = earned_achievements(&self.stats);
                self.fsm.transition(UiAction::EndAndSubmit);
            }
            ButtonId::SubmitScore => self.submit(),
            ButtonId::QuitToMenu => {
                self.fsm.transition(UiAction::Quit);
            }
            ButtonId::Back => {
                self.fsm.transition(UiAction::Back);
            }
            ButtonId::OpenSettings => {
                self.fsm.transition(UiAction::OpenSettings);
            }
            ButtonId::OpenAccessibility => {
                self.fsm.transition(UiAction::OpenAccessibility);
            }
            ButtonId::OpenLeaderboard => {
                self.fsm.transition(UiAction::OpenLeaderboard);
                refresh_leaderboard();
            }
            ButtonId::ToggleSound
            | ButtonId::ToggleHighContrast
            | ButtonId::ToggleColorBlind
            | ButtonId::ToggleScreenReader
            | ButtonId::ToggleKeyboardNav
            | ButtonId::ToggleReducedMotion
            | ButtonId::ToggleLargeText => self.toggle(id),
        }
    }

    fn toggle(&mut self, id: ButtonId) {
        let s = &mut self.settings;
        match id {
            ButtonId::ToggleSound => s.sound_enabled = !s.sound_enabled,
            ButtonId::ToggleHighContrast => s.high_contrast = !s.high_contrast,
            ButtonId::ToggleColorBlind => s.color_blind_mode = !s.color_blind_mode,
            ButtonId::ToggleScreenReader => s.screen_reader = !s.screen_reader,
            ButtonId::ToggleKeyboardNav => s.keyboard_navigation = !s.keyboard_navigation,
            ButtonId::ToggleReducedMotion => s.reduced_motion = !s.reduced_motion,
            ButtonId::ToggleLargeText => s.large_text = !s.large_text,
            _ => return,
        }
        settings::save(&self.settings);
        // Difficulty inputs pick the new snapshot up at the next round
        self.config.access = self.settings.to_core();
    }

    /// Wall-clock total for the submission, per mode
    fn snapshot_submission(&self) -> ScoreSubmission {
        let total_time = match self.mode.time_budget_ms() {
            Some(budget) => (budget - self.remaining_ms).max(0.0) as u64,
            None => self.display_time_ms as u64,
        };
        ScoreSubmission {
            username: String::new(),
            score: self.stats.score,
            total_time,
            best_combo: self.stats.best_combo,
        }
    }

    fn submit(&mut self) {
        if self.username.trim().is_empty() {
            self.submit_status = Some("Enter a name first");
            return;
        }
        let mut submission = match self.pending.clone() {
            Some(pending) => pending,
            None => self.snapshot_submission(),
        };
        submission.username = self.username.trim().to_string();
        self.submit_status = Some("Submitting...");

        spawn_local(async move {
            match leaderboard::post_score(&submission).await {
                Ok(row) => {
                    let best = leaderboard::best_score(&row.username).await.ok().flatten();
                    let rows = leaderboard::top_scores(10).await.unwrap_or_default();
                    crate::with_app(|app| {
                        app.rows = rows;
                        app.personal_best = best;
                        app.submit_status = None;
                        app.fsm.transition(UiAction::ScoreSubmitted);
                    });
                }
                Err(err) => {
                    web_sys::console::warn_1(&err);
                    crate::with_app(|app| app.submit_status = Some("Submission failed"));
                }
            }
        });
    }

    pub fn key_down(&mut self, event: &KeyboardEvent) {
        let key = event.key();
        match self.fsm.screen() {
            Screen::Submit => {
                if key == "Backspace" {
                    event.prevent_default();
                }
                match input::apply_username_key(&mut self.username, &key) {
                    UsernameEdit::Submit => self.submit(),
                    UsernameEdit::Changed | UsernameEdit::Ignored => {}
                }
            }
            Screen::Playing => self.play_key(event, &key),
            Screen::Menu => {
                if key == "Enter" {
                    self.handle_button(ButtonId::Play);
                }
            }
            Screen::Intro => {
                if key == "Escape" {
                    self.fsm.transition(UiAction::Quit);
                }
            }
            _ => {
                if key == "Escape" {
                    self.fsm.transition(UiAction::Back);
                }
            }
        }
    }

    fn play_key(&mut self, event: &KeyboardEvent, key: &str) {
        let Some(play_key) = input::classify_play_key(key, event.shift_key()) else {
            return;
        };
        match play_key {
            PlayKey::FocusNext | PlayKey::FocusPrev => {
                if self.settings.keyboard_navigation {
                    event.prevent_default();
                    let len = self.focus_targets().len();
                    let forward = play_key == PlayKey::FocusNext;
                    self.focus = input::cycle_focus(self.focus, len, forward);
                }
            }
            PlayKey::Activate => {
                if self.settings.keyboard_navigation {
                    event.prevent_default();
                    if let Some((pos, _)) = self.focus_targets().get(self.focus).copied() {
                        self.queue.push_activation(pos, 1, self.round.generation);
                    }
                }
            }
            PlayKey::PanelSlot(index) => self.use_panel_slot(index),
            PlayKey::Quit => {
                self.fsm.transition(UiAction::Quit);
            }
        }
    }

    /// Focusable field objects in a stable left-to-right order:
    /// uncollected power-ups, decoys, the target.
    pub fn focus_targets(&self) -> Vec<(Vec2, f32)> {
        let mut targets: Vec<(Vec2, f32)> = Vec::new();
        for (_, power) in self.world.query::<&FieldPowerUp>().iter() {
            if !power.collected {
                targets.push((power.pos, Params::POWERUP_SIZE));
            }
        }
        for (_, decoy) in self.world.query::<&Decoy>().iter() {
            targets.push((decoy.pos, decoy.size));
        }
        for (_, target) in self.world.query::<&Target>().iter() {
            targets.push((target.pos, target.size));
        }
        targets.sort_by(|a, b| {
            (a.0.x, a.0.y)
                .partial_cmp(&(b.0.x, b.0.y))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        targets
    }

    fn announce(&self, text: &str) {
        if let Err(err) = announcer::announce(text) {
            web_sys::console::warn_1(&err);
        }
    }

    // ----- touch ------------------------------------------------------

    pub fn touch_start(&mut self, contacts: u8, span: Option<f32>, x: f32, y: f32) {
        self.pinch.begin(contacts as u32, span);
        // Single and multi-touch both enqueue; the simulation's contact
        // guard rejects taps that are part of a pinch.
        self.pointer_down(x, y, contacts);
    }

    pub fn touch_move(&mut self, span: f32) {
        if self.pinch.is_pinching() {
            self.pinch.moved(span);
        }
    }

    pub fn touch_end(&mut self, contacts: u8) {
        self.pinch.end(contacts as u32);
    }
}

/// performance.now(), 0 when unavailable
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn flag_set(key: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .and_then(|s| s.get_item(key).ok())
        .flatten()
        .is_some()
}

fn set_flag(key: &str) {
    if let Some(storage) = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
    {
        let _ = storage.set_item(key, "1");
    }
}

fn refresh_leaderboard() {
    spawn_local(async move {
        match leaderboard::top_scores(10).await {
            Ok(rows) => crate::with_app(|app| app.rows = rows),
            Err(err) => web_sys::console::warn_1(&err),
        }
    });
}

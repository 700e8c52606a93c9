//! Canvas 2D rendering
//!
//! Draws the whole UI in the 600-unit design space each frame: field
//! objects during play, chrome screens otherwise. Pixel sizes on field
//! objects come straight from the difficulty curve.

use crate::app::App;
use crate::fsm::Screen;
use crate::hud::{self, Button, ButtonId, DESIGN_EDGE};
use crate::settings::AccessibilitySettings;
use game_core::*;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

const EDGE: f64 = DESIGN_EDGE as f64;

struct Palette {
    background: &'static str,
    field: &'static str,
    border: &'static str,
    text: &'static str,
    dim: &'static str,
    target: &'static str,
    target_edge: &'static str,
    powerup: &'static str,
    button: &'static str,
    button_text: &'static str,
    accent: &'static str,
    focus: &'static str,
}

fn palette(settings: &AccessibilitySettings) -> Palette {
    if settings.high_contrast {
        Palette {
            background: "#000000",
            field: "#000000",
            border: "#ffffff",
            text: "#ffffff",
            dim: "#cccccc",
            target: "#ffff00",
            target_edge: "#ffffff",
            powerup: "#00ffff",
            button: "#222222",
            button_text: "#ffffff",
            accent: "#ffff00",
            focus: "#00ffff",
        }
    } else if settings.color_blind_mode {
        // Blue/orange split reads for the common dichromacies
        Palette {
            background: "#1a1a2e",
            field: "#16213e",
            border: "#444444",
            text: "#eeeeee",
            dim: "#99a3b3",
            target: "#3b82f6",
            target_edge: "#dbeafe",
            powerup: "#f97316",
            button: "#0f3460",
            button_text: "#eeeeee",
            accent: "#f97316",
            focus: "#ffffff",
        }
    } else {
        Palette {
            background: "#1a1a2e",
            field: "#16213e",
            border: "#444444",
            text: "#eeeeee",
            dim: "#99a3b3",
            target: "#4fc3f7",
            target_edge: "#e1f5fe",
            powerup: "#ffd166",
            button: "#0f3460",
            button_text: "#eeeeee",
            accent: "#ffd166",
            focus: "#ffffff",
        }
    }
}

fn decoy_fill(shade: f32, settings: &AccessibilitySettings) -> String {
    if settings.high_contrast {
        "#3a3a3a".to_string()
    } else {
        // Avocado greens, varied per object
        format!(
            "hsl({:.0}, 40%, {:.0}%)",
            90.0 + shade * 30.0,
            28.0 + shade * 16.0
        )
    }
}

pub fn draw_frame(app: &App) {
    let ctx = &app.ctx;
    let pal = palette(&app.settings);

    ctx.set_fill_style_str(pal.background);
    ctx.fill_rect(0.0, 0.0, EDGE, EDGE);

    match app.fsm.screen() {
        Screen::Menu => draw_menu(app, ctx, &pal),
        Screen::Tutorial => draw_tutorial(app, ctx, &pal),
        Screen::ModeSelect => draw_mode_select(app, ctx, &pal),
        Screen::Intro => {
            draw_field(app, ctx, &pal);
            draw_hud(app, ctx, &pal);
            draw_caption(ctx, &pal, app.intro_caption());
        }
        Screen::Playing => {
            draw_field(app, ctx, &pal);
            draw_hud(app, ctx, &pal);
            draw_flashes(app, ctx, &pal);
            draw_buttons(app, ctx, &pal);
        }
        Screen::Complete => draw_complete(app, ctx, &pal),
        Screen::Settings => draw_toggles(app, ctx, &pal, "SETTINGS"),
        Screen::Accessibility => draw_toggles(app, ctx, &pal, "ACCESSIBILITY"),
        Screen::Leaderboard => draw_leaderboard(app, ctx, &pal),
        Screen::Submit => draw_submit(app, ctx, &pal),
    }
}

fn px(pct: f32) -> f64 {
    pct as f64 / 100.0 * EDGE
}

fn text(
    ctx: &CanvasRenderingContext2d,
    s: &str,
    x: f64,
    y: f64,
    font: &str,
    fill: &str,
    align: &str,
) {
    ctx.set_font(font);
    ctx.set_text_align(align);
    ctx.set_fill_style_str(fill);
    ctx.fill_text(s, x, y).ok();
}

// ----- field ------------------------------------------------------------

fn draw_field(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    ctx.save();

    let scale = app.pinch.scale() as f64;
    if scale > 1.0 {
        let center = EDGE / 2.0;
        ctx.translate(center, center).ok();
        ctx.scale(scale, scale).ok();
        ctx.translate(-center, -center).ok();
    }

    ctx.set_fill_style_str(pal.field);
    ctx.fill_rect(0.0, 0.0, EDGE, EDGE);

    // Quadrant hint wash under everything else
    if let Some((quadrant, until)) = app.hint_flash {
        if app.last_ts < until {
            let (qx, qy) = match quadrant {
                Quadrant::LeftTop => (0.0, 0.0),
                Quadrant::RightTop => (EDGE / 2.0, 0.0),
                Quadrant::LeftBottom => (0.0, EDGE / 2.0),
                Quadrant::RightBottom => (EDGE / 2.0, EDGE / 2.0),
            };
            ctx.set_fill_style_str("rgba(255, 209, 102, 0.15)");
            ctx.fill_rect(qx, qy, EDGE / 2.0, EDGE / 2.0);
        }
    }

    for (_, particle) in app.world.query::<&Particle>().iter() {
        ctx.set_global_alpha(particle.alpha() as f64);
        ctx.set_fill_style_str(&format!(
            "rgb({},{},{})",
            particle.color[0], particle.color[1], particle.color[2]
        ));
        let (x, y) = (px(particle.pos.x), px(particle.pos.y));
        ctx.fill_rect(x - 2.0, y - 2.0, 4.0, 4.0);
    }
    ctx.set_global_alpha(1.0);

    for (_, power) in app.world.query::<&FieldPowerUp>().iter() {
        if power.collected {
            continue;
        }
        let (x, y) = (px(power.pos.x), px(power.pos.y));
        let radius = Params::POWERUP_SIZE as f64 / 2.0;
        ctx.set_fill_style_str(pal.powerup);
        ctx.begin_path();
        ctx.arc(x, y, radius, 0.0, TAU).ok();
        ctx.fill();
        let glyph = match power.kind {
            PowerUpKind::Zoom => "Z",
            PowerUpKind::Freeze => "F",
            PowerUpKind::Hint => "?",
        };
        text(ctx, glyph, x, y + 6.0, "18px monospace", pal.field, "center");
    }

    for (_, decoy) in app.world.query::<&Decoy>().iter() {
        let (x, y) = (px(decoy.pos.x), px(decoy.pos.y));
        let radius = decoy.size as f64 / 2.0;
        ctx.set_fill_style_str(&decoy_fill(decoy.shade, &app.settings));
        ctx.begin_path();
        ctx.arc(x, y, radius, 0.0, TAU).ok();
        ctx.fill();
        if app.settings.high_contrast {
            ctx.set_stroke_style_str(pal.border);
            ctx.stroke();
        }
    }

    let zoomed = app.effects.zoom_active(app.time.now);
    for (_, target) in app.world.query::<&Target>().iter() {
        let (x, y) = (px(target.pos.x), px(target.pos.y));
        let mut size = target.size as f64;
        if zoomed {
            size *= app.config.zoom_scale as f64;
        }
        let half = size / 2.0;
        ctx.set_fill_style_str(pal.target);
        ctx.begin_path();
        ctx.move_to(x, y - half);
        ctx.line_to(x + half, y);
        ctx.line_to(x, y + half);
        ctx.line_to(x - half, y);
        ctx.close_path();
        ctx.fill();
        ctx.set_stroke_style_str(pal.target_edge);
        ctx.set_line_width(2.0);
        ctx.stroke();
    }

    if app.settings.keyboard_navigation && app.fsm.is_playing() {
        if let Some((pos, size)) = app.focus_targets().get(app.focus).copied() {
            let (x, y) = (px(pos.x), px(pos.y));
            let half = size as f64 / 2.0 + 6.0;
            ctx.set_stroke_style_str(pal.focus);
            ctx.set_line_width(2.0);
            ctx.stroke_rect(x - half, y - half, half * 2.0, half * 2.0);
        }
    }

    ctx.restore();

    ctx.set_stroke_style_str(pal.border);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(1.0, 1.0, EDGE - 2.0, EDGE - 2.0);
}

fn draw_hud(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    let font = "16px monospace";
    text(
        ctx,
        &format!("Score {}", app.stats.score),
        12.0,
        24.0,
        font,
        pal.text,
        "left",
    );
    if app.stats.combo > 0 {
        text(
            ctx,
            &format!("Combo x{}", app.stats.combo),
            12.0,
            46.0,
            font,
            pal.accent,
            "left",
        );
    }
    text(
        ctx,
        &hud::round_label(app.mode, app.round.number.max(1)),
        EDGE / 2.0,
        24.0,
        font,
        pal.text,
        "center",
    );
    let clock = match app.mode {
        GameMode::Classic => hud::format_seconds(app.display_time_ms),
        GameMode::TimeTrial => format!("Left {}", hud::format_seconds(app.remaining_ms)),
    };
    text(ctx, &clock, EDGE - 12.0, 24.0, font, pal.text, "right");

    // Side-panel power-up slots
    for (i, slot) in app.panel.slots.iter().enumerate() {
        let rect = hud::panel_slot_rect(i);
        let used = slot.is_used(app.time.now);
        ctx.set_fill_style_str(if used { pal.accent } else { pal.button });
        ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        ctx.set_stroke_style_str(pal.border);
        ctx.set_line_width(1.0);
        ctx.stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        let glyph = match slot.kind {
            PowerUpKind::Zoom => "Z",
            PowerUpKind::Freeze => "F",
            PowerUpKind::Hint => "?",
        };
        let (cx, cy) = rect.center();
        text(
            ctx,
            glyph,
            cx as f64,
            cy as f64 + 6.0,
            "20px monospace",
            if used { pal.field } else { pal.button_text },
            "center",
        );
        text(
            ctx,
            &format!("{}", i + 1),
            cx as f64,
            rect.y as f64 - 4.0,
            "11px monospace",
            pal.dim,
            "center",
        );
    }
}

fn draw_flashes(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    if app.round.phase == Phase::Found {
        draw_caption(ctx, pal, "FOUND!");
    }
    if let Some((points, until)) = app.points_flash {
        if app.last_ts < until {
            text(
                ctx,
                &format!("+{}", points),
                EDGE / 2.0,
                EDGE / 2.0 - 60.0,
                "32px monospace",
                pal.accent,
                "center",
            );
        }
    }
    if let Some((quadrant, until)) = app.hint_flash {
        if app.last_ts < until {
            text(
                ctx,
                &format!("Gem is in the {}", quadrant.label()),
                EDGE / 2.0,
                58.0,
                "18px monospace",
                pal.accent,
                "center",
            );
        }
    }
}

fn draw_caption(ctx: &CanvasRenderingContext2d, pal: &Palette, caption: &str) {
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.55)");
    ctx.fill_rect(0.0, EDGE / 2.0 - 60.0, EDGE, 96.0);
    text(
        ctx,
        caption,
        EDGE / 2.0,
        EDGE / 2.0,
        "44px monospace",
        pal.accent,
        "center",
    );
}

// ----- chrome screens ----------------------------------------------------

fn toggle_state(settings: &AccessibilitySettings, id: ButtonId) -> Option<bool> {
    match id {
        ButtonId::ToggleSound => Some(settings.sound_enabled),
        ButtonId::ToggleHighContrast => Some(settings.high_contrast),
        ButtonId::ToggleColorBlind => Some(settings.color_blind_mode),
        ButtonId::ToggleScreenReader => Some(settings.screen_reader),
        ButtonId::ToggleKeyboardNav => Some(settings.keyboard_navigation),
        ButtonId::ToggleReducedMotion => Some(settings.reduced_motion),
        ButtonId::ToggleLargeText => Some(settings.large_text),
        _ => None,
    }
}

fn draw_button(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette, button: &Button) {
    let r = button.rect;
    ctx.set_fill_style_str(pal.button);
    ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
    ctx.set_stroke_style_str(pal.border);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);

    let label = match toggle_state(&app.settings, button.id) {
        Some(true) => format!("{}: On", button.label),
        Some(false) => format!("{}: Off", button.label),
        None => button.label.to_string(),
    };
    let (cx, cy) = r.center();
    text(
        ctx,
        &label,
        cx as f64,
        cy as f64 + 6.0,
        "18px monospace",
        pal.button_text,
        "center",
    );
}

fn draw_buttons(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    for button in hud::buttons_for(app.fsm.screen()) {
        draw_button(app, ctx, pal, &button);
    }
}

fn title(ctx: &CanvasRenderingContext2d, pal: &Palette, s: &str, y: f64) {
    text(ctx, s, EDGE / 2.0, y, "40px monospace", pal.text, "center");
}

fn draw_menu(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    title(ctx, pal, "GEM HUNT", 160.0);
    text(
        ctx,
        "Find the gem that doesn't move",
        EDGE / 2.0,
        200.0,
        "16px monospace",
        pal.dim,
        "center",
    );
    draw_buttons(app, ctx, pal);
}

fn draw_tutorial(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    title(ctx, pal, "HOW TO PLAY", 110.0);
    let lines = [
        "One gem hides among moving avocados.",
        "The gem never moves. Tap it fast for points.",
        "Tapping an avocado costs nothing but time.",
        "",
        "Power-ups: Z zooms the gem, F freezes motion,",
        "? reveals the gem's quadrant.",
        "Keys 1, 2, 3 fire the side-panel slots.",
        "Pinch to zoom the view on touch screens.",
    ];
    for (i, line) in lines.iter().enumerate() {
        text(
            ctx,
            line,
            EDGE / 2.0,
            170.0 + i as f64 * 30.0,
            "16px monospace",
            pal.text,
            "center",
        );
    }
    draw_buttons(app, ctx, pal);
}

fn draw_mode_select(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    title(ctx, pal, "CHOOSE MODE", 150.0);
    draw_buttons(app, ctx, pal);
    for (mode, y) in [(GameMode::Classic, 322.0), (GameMode::TimeTrial, 412.0)] {
        text(
            ctx,
            mode.description(),
            EDGE / 2.0,
            y,
            "14px monospace",
            pal.dim,
            "center",
        );
    }
}

fn draw_toggles(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette, heading: &str) {
    title(ctx, pal, heading, 100.0);
    draw_buttons(app, ctx, pal);
}

fn draw_leaderboard(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    title(ctx, pal, "LEADERBOARD", 100.0);
    if app.rows.is_empty() {
        text(
            ctx,
            "No scores yet",
            EDGE / 2.0,
            220.0,
            "18px monospace",
            pal.dim,
            "center",
        );
    }
    for (i, row) in app.rows.iter().take(10).enumerate() {
        let y = 160.0 + i as f64 * 34.0;
        text(
            ctx,
            &format!("{:>2}. {}", i + 1, row.username),
            110.0,
            y,
            "18px monospace",
            pal.text,
            "left",
        );
        text(
            ctx,
            &row.score.to_string(),
            490.0,
            y,
            "18px monospace",
            pal.accent,
            "right",
        );
    }
    if let Some(best) = &app.personal_best {
        text(
            ctx,
            &format!("Your best: {}", best.score),
            EDGE / 2.0,
            540.0,
            "16px monospace",
            pal.dim,
            "center",
        );
    }
    draw_buttons(app, ctx, pal);
}

fn draw_submit(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    title(ctx, pal, "SUBMIT SCORE", 120.0);
    if let Some(pending) = &app.pending {
        let lines = [
            format!("Score      {}", pending.score),
            format!("Time       {}", hud::format_seconds(pending.total_time as f32)),
            format!("Best combo x{}", pending.best_combo),
        ];
        for (i, line) in lines.iter().enumerate() {
            text(
                ctx,
                line,
                EDGE / 2.0,
                180.0 + i as f64 * 30.0,
                "18px monospace",
                pal.text,
                "center",
            );
        }
    }
    text(
        ctx,
        "Type your name:",
        EDGE / 2.0,
        310.0,
        "16px monospace",
        pal.dim,
        "center",
    );
    text(
        ctx,
        &format!("{}_", app.username),
        EDGE / 2.0,
        350.0,
        "26px monospace",
        pal.accent,
        "center",
    );
    if let Some(status) = app.submit_status {
        text(
            ctx,
            status,
            EDGE / 2.0,
            396.0,
            "16px monospace",
            pal.dim,
            "center",
        );
    }
    draw_buttons(app, ctx, pal);
}

fn draw_complete(app: &App, ctx: &CanvasRenderingContext2d, pal: &Palette) {
    title(ctx, pal, "GAME COMPLETE", 90.0);
    text(
        ctx,
        &app.stats.score.to_string(),
        EDGE / 2.0,
        150.0,
        "48px monospace",
        pal.accent,
        "center",
    );

    let total_ms = match app.mode.time_budget_ms() {
        Some(budget) => budget - app.remaining_ms,
        None => app.display_time_ms,
    };
    let mut lines = vec![
        format!("Rounds     {}", app.stats.rounds_completed),
        format!("Best combo x{}", app.stats.best_combo),
        format!("Time       {}", hud::format_seconds(total_ms)),
    ];
    if let Some(avg) = app.stats.average_round_ms() {
        lines.push(format!("Avg round  {}", hud::format_seconds(avg)));
    }
    for (i, line) in lines.iter().enumerate() {
        text(
            ctx,
            line,
            EDGE / 2.0,
            195.0 + i as f64 * 26.0,
            "16px monospace",
            pal.text,
            "center",
        );
    }

    if !app.earned.is_empty() {
        text(
            ctx,
            "Achievements",
            EDGE / 2.0,
            312.0,
            "16px monospace",
            pal.dim,
            "center",
        );
        let row = app
            .earned
            .iter()
            .map(|a| a.icon)
            .collect::<Vec<_>>()
            .join(" ");
        text(ctx, &row, EDGE / 2.0, 344.0, "22px monospace", pal.text, "center");
    }

    draw_buttons(app, ctx, pal);
}

//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a canvas and an immutable view of the world.  No
//! game logic is performed; this module only translates state into pixels
//! and text, which `Canvas::flush` turns into terminal commands.

pub mod canvas;
pub mod viewport;

use std::io::Write;

use crate::assets::{Assets, SpriteKind};
use crate::compute::{meter_band, meter_fill, meter_percent, METER_WIDTH};
use crate::entities::{MeterBand, Rect, World};

use self::canvas::{Canvas, Rgb};
use self::viewport::Viewport;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Rgb = Rgb::new(135, 206, 235);
const C_TEXT: Rgb = Rgb::BLACK;
const C_LIVES: Rgb = Rgb::new(255, 0, 0);
const C_ALERT: Rgb = Rgb::new(255, 50, 50);
const C_ALERT_BOX: Rgb = Rgb::WHITE;
const C_METER_FRAME: Rgb = Rgb::BLACK;
const C_METER_LOW: Rgb = Rgb::new(0, 200, 0);
const C_METER_ELEVATED: Rgb = Rgb::new(255, 255, 0);
const C_METER_CRITICAL: Rgb = Rgb::new(255, 0, 0);

/// Pollution bar geometry, logical pixels from the top-right corner.
const METER_RIGHT_INSET: i32 = 210;
const METER_TOP: i32 = 10;
const METER_HEIGHT: i32 = 30;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols × rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    world: &World,
    assets: &Assets,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    if cols == 0 || rows == 0 {
        return Ok(());
    }
    let viewport = Viewport::new(cols, rows, world.width, world.height);
    compose(world, assets, &viewport).flush(out)
}

/// Draw the frame into an off-screen canvas.
pub fn compose(world: &World, assets: &Assets, viewport: &Viewport) -> Canvas {
    let mut canvas = Canvas::new(viewport.cols, viewport.rows, C_SKY);

    draw_sprite(&mut canvas, viewport, assets, SpriteKind::Avatar, &world.player.rect);
    for cloud in &world.hazards {
        draw_sprite(&mut canvas, viewport, assets, SpriteKind::DirtyCloud, &cloud.rect);
    }
    for reward in &world.rewards {
        draw_sprite(&mut canvas, viewport, assets, SpriteKind::CleanCloud, &reward.rect);
    }

    draw_hud(&mut canvas, viewport, world);
    draw_alert(&mut canvas, viewport, world);

    if world.state.is_over() {
        draw_game_over(&mut canvas, viewport, world);
    }

    canvas
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_sprite(
    canvas: &mut Canvas,
    viewport: &Viewport,
    assets: &Assets,
    kind: SpriteKind,
    rect: &Rect,
) {
    let area = viewport.project(rect);
    let (w, h) = (area.width() as f32, area.height() as f32);

    for py in area.y0..area.y1 {
        for px in area.x0..area.x1 {
            // Sample the centre of each pixel.
            let u = (px - area.x0) as f32 / w + 0.5 / w;
            let v = (py - area.y0) as f32 / h + 0.5 / h;
            if let Some(color) = assets.sample(kind, u, v) {
                canvas.set_pixel(px, py, color);
            }
        }
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn meter_color(band: MeterBand) -> Rgb {
    match band {
        MeterBand::Low => C_METER_LOW,
        MeterBand::Elevated => C_METER_ELEVATED,
        MeterBand::Critical => C_METER_CRITICAL,
    }
}

fn text_at(canvas: &mut Canvas, viewport: &Viewport, x: i32, y: i32, text: &str, fg: Rgb) {
    let (col, row) = viewport.cell(x, y);
    canvas.put_text(col, row, text, fg, None);
}

/// Centre `text` horizontally on logical point `(x, y)`.
fn centered_text(
    canvas: &mut Canvas,
    viewport: &Viewport,
    x: i32,
    y: i32,
    text: &str,
    fg: Rgb,
    bg: Option<Rgb>,
) {
    let (col, row) = viewport.cell(x, y);
    let half = text.chars().count() as i32 / 2;
    canvas.put_text(col - half, row, text, fg, bg);
}

fn draw_hud(canvas: &mut Canvas, viewport: &Viewport, world: &World) {
    let state = &world.state;

    text_at(canvas, viewport, 10, 10, &format!("Score: {}", state.score), C_TEXT);
    text_at(canvas, viewport, 10, 40, &format!("Lives: {}", state.lives), C_LIVES);

    // Pollution bar, top right
    let left = world.width - METER_RIGHT_INSET;
    let percent = meter_percent(state);
    let fill = Rect::new(left, METER_TOP, meter_fill(state), METER_HEIGHT);
    if fill.w > 0 {
        let area = viewport.project(&fill);
        canvas.fill_rect(area.x0, area.y0, area.x1, area.y1, meter_color(meter_band(percent)));
    }
    let frame = viewport.project(&Rect::new(left, METER_TOP, METER_WIDTH, METER_HEIGHT));
    canvas.outline_rect(frame.x0, frame.y0, frame.x1, frame.y1, C_METER_FRAME);

    text_at(
        canvas,
        viewport,
        left + 20,
        METER_TOP + 5,
        &format!("CO level: {}%", percent),
        C_TEXT,
    );
}

fn draw_alert(canvas: &mut Canvas, viewport: &Viewport, world: &World) {
    if let Some(message) = world.state.visible_alert() {
        let padded = format!(" {} ", message);
        centered_text(
            canvas,
            viewport,
            world.width / 2,
            50,
            &padded,
            C_ALERT,
            Some(C_ALERT_BOX),
        );
    }
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over(canvas: &mut Canvas, viewport: &Viewport, world: &World) {
    let cx = world.width / 2;
    let cy = world.height / 2;
    let score_line = format!("Final score: {}", world.state.score);

    let lines: [(&str, i32); 3] = [
        ("GAME OVER", cy - 50),
        (&score_line, cy),
        ("Press any key to exit", cy + 50),
    ];
    for (text, y) in lines {
        centered_text(canvas, viewport, cx, y, text, C_TEXT, None);
    }
}

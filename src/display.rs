/// Rendering layer.  All terminal output lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// world.  No game logic is performed; this module only maps the logical
/// play area onto the terminal grid and translates state into terminal
/// commands.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_shooter::assets::GlyphTheme;
use space_shooter::compute::GameWorld;
use space_shooter::entities::{EnemyKind, Rgb, Vec2};
use space_shooter::hud::{HealthBand, HudInfo, Screen};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_SHIELD: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_LASER: Color = Color::Red;
const C_POWERUP: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const BAR_WIDTH: usize = 20;
const MIN_COLS: u16 = 30;
const MIN_ROWS: u16 = 12;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Terminal geometry:
///   row 0          HUD text
///   row 1          health / shield bars
///   row 2          top border
///   rows 3..=h-3   play area
///   row h-2        bottom border
///   row h-1        controls hint
#[derive(Clone, Copy)]
struct Layout {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Layout {
    const TOP: i32 = 3;

    fn inner_cols(&self) -> i32 {
        self.cols as i32 - 2
    }

    fn inner_rows(&self) -> i32 {
        self.rows as i32 - 5
    }

    fn bottom(&self) -> i32 {
        Self::TOP + self.inner_rows() - 1
    }

    /// Terminal cell for a world position, or `None` outside the play area.
    fn cell(&self, p: Vec2) -> Option<(i32, i32)> {
        if p.x < 0.0 || p.x > self.world_w || p.y < 0.0 || p.y > self.world_h {
            return None;
        }
        let col = 1 + ((p.x / self.world_w) * (self.inner_cols() - 1) as f32).round() as i32;
        let row = Self::TOP + ((p.y / self.world_h) * (self.inner_rows() - 1) as f32).round() as i32;
        Some((col, row))
    }

    fn row_for(&self, y: f32) -> i32 {
        let y = y.clamp(0.0, self.world_h);
        Self::TOP + ((y / self.world_h) * (self.inner_rows() - 1) as f32).round() as i32
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols × rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    world: &GameWorld,
    glyphs: &GlyphTheme,
    (cols, rows): (u16, u16),
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if cols < MIN_COLS || rows < MIN_ROWS {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(Print("Terminal too small"))?;
        return out.flush();
    }

    let layout = Layout {
        cols,
        rows,
        world_w: world.rules.width,
        world_h: world.rules.height,
    };

    match Screen::for_status(world.status) {
        Screen::Menu => draw_menu(out, layout)?,
        screen => {
            draw_field(out, world, glyphs, layout)?;
            match screen {
                Screen::FieldWithGameOver => draw_game_over(out, world, layout)?,
                Screen::FieldWithVictory => draw_victory(out, world, layout)?,
                _ => {}
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()
}

// ── Primitives ────────────────────────────────────────────────────────────────

/// Print `text` centred on `col`, clipped to the play area.
fn put<W: Write>(
    out: &mut W,
    layout: Layout,
    col: i32,
    row: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if row < Layout::TOP || row > layout.bottom() {
        return Ok(());
    }
    let len = text.chars().count() as i32;
    let mut start = col - len / 2;
    let mut chars: Vec<char> = text.chars().collect();
    if start < 1 {
        let skip = (1 - start) as usize;
        chars.drain(..skip.min(chars.len()));
        start = 1;
    }
    let room = (layout.inner_cols() + 1 - start).max(0) as usize;
    chars.truncate(room);
    if chars.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(start as u16, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(chars.into_iter().collect::<String>()))?;
    Ok(())
}

/// Stack a multi-row sprite vertically centred on `p`.
fn put_sprite<W: Write>(
    out: &mut W,
    layout: Layout,
    p: Vec2,
    sprite: &[String],
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = layout.cell(p) else {
        return Ok(());
    };
    let top = row - sprite.len() as i32 / 2;
    for (i, line) in sprite.iter().enumerate() {
        put(out, layout, col, top + i as i32, line, color)?;
    }
    Ok(())
}

/// Print `text` centred on the whole terminal width at `row`.
fn put_centred<W: Write>(
    out: &mut W,
    layout: Layout,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (layout.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn faded(Rgb(r, g, b): Rgb, alpha: f32) -> Color {
    let f = |c: u8| (c as f32 * alpha) as u8;
    Color::Rgb {
        r: f(r),
        g: f(g),
        b: f(b),
    }
}

fn bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round()) as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

// ── Field ─────────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(
    out: &mut W,
    world: &GameWorld,
    glyphs: &GlyphTheme,
    layout: Layout,
) -> std::io::Result<()> {
    draw_border(out, layout)?;
    draw_hud(out, world, layout)?;

    for enemy in &world.enemies {
        put_sprite(out, layout, enemy.position(), glyphs.enemy(enemy.kind), enemy_color(enemy.kind))?;
    }
    if let Some(boss) = &world.boss {
        put_sprite(out, layout, boss.position(), glyphs.enemy(EnemyKind::Boss), enemy_color(EnemyKind::Boss))?;
    }
    for powerup in &world.powerups {
        put_sprite(out, layout, powerup.position(), &[glyphs.powerup(powerup.kind).to_string()], C_POWERUP)?;
    }
    for laser in &world.lasers {
        let b = laser.bounds();
        let Some((col, _)) = layout.cell(Vec2::new(laser.position().x, layout.world_h / 2.0)) else {
            continue;
        };
        for row in layout.row_for(b.top)..=layout.row_for(b.bottom()) {
            put(out, layout, col, row, &glyphs.laser, C_LASER)?;
        }
    }
    for bullet in &world.bullets {
        put_sprite(out, layout, bullet.position(), &[glyphs.player_bullet.clone()], C_BULLET_PLAYER)?;
    }
    for bullet in &world.enemy_bullets {
        put_sprite(out, layout, bullet.position(), &[glyphs.enemy_bullet.clone()], C_BULLET_ENEMY)?;
    }
    for particle in world.explosions.iter().flat_map(|e| &e.particles) {
        if let Some((col, row)) = layout.cell(particle.position) {
            put(out, layout, col, row, &glyphs.particle, faded(particle.color, particle.alpha()))?;
        }
    }

    draw_player(out, world, glyphs, layout)?;

    if world.boss_warning > 0.0 {
        put_centred(out, layout, layout.rows / 2, "WARNING: BOSS APPROACHING!", Color::Red)?;
    }

    out.queue(cursor::MoveTo(1, layout.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Arrows / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Basic => Color::Green,
        EnemyKind::Fast => Color::Yellow,
        EnemyKind::Tanky => Color::Red,
        EnemyKind::Boss => Color::Magenta,
    }
}

fn draw_border<W: Write>(out: &mut W, layout: Layout) -> std::io::Result<()> {
    let w = layout.cols as usize;
    let top = (Layout::TOP - 1) as u16;
    let bottom = (layout.bottom() + 1) as u16;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w - 2))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w - 2))))?;

    for row in (top + 1)..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(layout.cols - 1, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (rows 0 and 1) ────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &GameWorld, layout: Layout) -> std::io::Result<()> {
    let hud = HudInfo::from_world(world);

    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&hud.score_text))?;

    // Level, centre
    let lx = (layout.cols / 2).saturating_sub(hud.level_text.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&hud.level_text))?;

    // Weapon, right
    let rx = layout
        .cols
        .saturating_sub(hud.weapon_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(Print(&hud.weapon_text))?;

    // Bars
    let health_color = match hud.health_band {
        HealthBand::Green => Color::Green,
        HealthBand::Yellow => Color::Yellow,
        HealthBand::Red => Color::Red,
    };
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(health_color))?;
    out.queue(Print(format!("HP {}", bar(hud.health_fraction))))?;
    out.queue(style::SetForegroundColor(C_SHIELD))?;
    out.queue(Print(format!("  SH {}", bar(hud.shield_fraction))))?;
    Ok(())
}

// ── Player ────────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    world: &GameWorld,
    glyphs: &GlyphTheme,
    layout: Layout,
) -> std::io::Result<()> {
    let p = world.player.position();
    put_sprite(out, layout, p, &glyphs.player, C_PLAYER)?;

    if world.player.has_shield() {
        if let Some((col, row)) = layout.cell(p) {
            put(out, layout, col - 3, row, &glyphs.shield, C_SHIELD)?;
            put(out, layout, col + 3, row, &glyphs.shield, C_SHIELD)?;
        }
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, layout: Layout) -> std::io::Result<()> {
    let cy = layout.rows / 2;
    let lines: &[(&str, Color)] = &[
        ("★  SPACE  SHOOTER  ★", Color::Cyan),
        ("", Color::White),
        ("Press ENTER to start", Color::White),
        ("", Color::White),
        ("Arrows / WASD : Move", Color::DarkGrey),
        ("SPACE : Shoot", Color::DarkGrey),
        ("Q : Quit", Color::DarkGrey),
    ];
    let start = cy.saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        put_centred(out, layout, start + i as u16, text, *color)?;
    }
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    world: &GameWorld,
    layout: Layout,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", world.player.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", color),
        (title, color),
        ("╚══════════════════╝", color),
        (score_line.as_str(), Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];
    let start = (layout.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        put_centred(out, layout, start + i as u16, text, *color)?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, world: &GameWorld, layout: Layout) -> std::io::Result<()> {
    draw_banner(out, world, layout, "║    GAME  OVER    ║", Color::Red)
}

fn draw_victory<W: Write>(out: &mut W, world: &GameWorld, layout: Layout) -> std::io::Result<()> {
    draw_banner(out, world, layout, "║     VICTORY!     ║", Color::Green)
}

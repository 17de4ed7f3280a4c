//! Pure game-logic functions.
//!
//! Every public function that drives the game takes an immutable reference
//! to the current `World` (and, where needed, an RNG handle) and returns a
//! brand-new `World`.  Side effects are limited to the injected RNG.  The
//! per-sprite helpers mutate the copy in place and receive the `GameState`
//! they are allowed to touch explicitly.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{GameConfig, Rules};
use crate::input::Action;
use crate::entities::{
    CleanCloud, Direction, GameOverReason, GameState, GameStatus, MeterBand, Player,
    PollutionCloud, Rect, SpriteSizes, World, ALERT_MESSAGES,
};

/// Width of the pollution bar in logical pixels.
pub const METER_WIDTH: i32 = 200;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial world: player centred at the bottom, a full pool of
/// pollution clouds above the screen.
pub fn init_world(config: &GameConfig, sizes: SpriteSizes, rng: &mut impl Rng) -> World {
    let width = config.screen.width;
    let height = config.screen.height;
    let rules = config.rules.clone();

    let (pw, ph) = sizes.player;
    let player = Player {
        rect: Rect::new(
            width / 2 - pw / 2,
            height - rules.player_margin_bottom - ph,
            pw,
            ph,
        ),
        vx: 0,
    };

    let hazards = (0..rules.hazard_pool)
        .map(|_| spawn_hazard(width, sizes.hazard, &rules, rng))
        .collect();

    World {
        player,
        hazards,
        rewards: Vec::new(),
        state: GameState::new(rules.starting_lives, rules.max_pollution),
        rules,
        sizes,
        width,
        height,
        frame: 0,
    }
}

/// A fresh cloud somewhere above the visible area.
pub fn spawn_hazard(
    width: i32,
    (w, h): (i32, i32),
    rules: &Rules,
    rng: &mut impl Rng,
) -> PollutionCloud {
    let mut cloud = PollutionCloud {
        rect: Rect::new(0, 0, w, h),
        vy: 0,
    };
    respawn_hazard(&mut cloud, width, rules, rng);
    cloud
}

fn respawn_hazard(cloud: &mut PollutionCloud, width: i32, rules: &Rules, rng: &mut impl Rng) {
    cloud.rect.x = rng.gen_range(0..(width - cloud.rect.w).max(1));
    cloud.rect.y = rng.gen_range(rules.hazard_spawn_y_min..rules.hazard_spawn_y_max);
    cloud.vy = rng.gen_range(rules.hazard_speed_min..rules.hazard_speed_max);
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Point the player in `direction`.
pub fn move_player(world: &World, direction: Direction) -> World {
    let speed = world.rules.player_speed;
    let vx = match direction {
        Direction::Left => -speed,
        Direction::Right => speed,
        Direction::Stop => 0,
    };
    World {
        player: Player {
            vx,
            ..world.player.clone()
        },
        ..world.clone()
    }
}

/// A direction key went up.  Only stop if that key is the one currently
/// steering; releasing Left while Right is held must not stall the player.
pub fn release_key(world: &World, direction: Direction) -> World {
    let steering = match direction {
        Direction::Left => world.player.vx < 0,
        Direction::Right => world.player.vx > 0,
        Direction::Stop => false,
    };
    if steering {
        move_player(world, Direction::Stop)
    } else {
        world.clone()
    }
}

/// Apply one input action.  `None` ends the session: `Quit` at any time,
/// or any key press once the game is over.  Other keys do nothing in play.
pub fn apply_action(world: &World, action: Action) -> Option<World> {
    match action {
        Action::Quit => None,
        Action::AnyKey | Action::Press(_) if world.state.is_over() => None,
        Action::Press(direction) => Some(move_player(world, direction)),
        Action::Release(direction) => Some(release_key(world, direction)),
        Action::AnyKey => Some(world.clone()),
    }
}

// ── Per-sprite updates ───────────────────────────────────────────────────────

/// Apply velocity, then keep the whole box on screen.
pub fn advance_player(player: &mut Player, width: i32) {
    player.rect.x += player.vx;
    if player.rect.left() < 0 {
        player.rect.x = 0;
    }
    if player.rect.right() > width {
        player.rect.x = width - player.rect.w;
    }
}

/// Let a cloud fall.  A cloud that leaves the bottom edge costs a life,
/// raises pollution and is recycled above the screen.
pub fn advance_hazard(
    cloud: &mut PollutionCloud,
    state: &mut GameState,
    width: i32,
    height: i32,
    rules: &Rules,
    rng: &mut impl Rng,
) {
    cloud.rect.y += cloud.vy;
    if cloud.rect.top() > height {
        state.lives -= 1;
        state.pollution += rules.pollution_per_miss;
        log::debug!(
            "cloud missed: lives={} pollution={}",
            state.lives,
            state.pollution
        );
        respawn_hazard(cloud, width, rules, rng);
    }
}

/// Drift upward and age.  Returns `false` once the cloud has expired.
pub fn advance_reward(reward: &mut CleanCloud, rules: &Rules) -> bool {
    reward.rect.y -= rules.reward_rise;
    reward.ttl = reward.ttl.saturating_sub(1);
    reward.ttl > 0
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Credit one caught cloud.
pub fn award_catch(state: &mut GameState, rules: &Rules) {
    state.score += rules.score_per_catch;
    state.pollution = (state.pollution - rules.pollution_relief).max(0);
}

/// Move to `GameOver` if lives are gone or the meter is full.  Lives are
/// checked first, so they win when both happen on the same frame.
pub fn check_game_over(state: &mut GameState, rules: &Rules) -> Option<GameOverReason> {
    if state.is_over() {
        return None;
    }
    let reason = if state.lives <= 0 {
        GameOverReason::OutOfLives
    } else if state.pollution_level() >= state.max_pollution {
        GameOverReason::CriticalPollution
    } else {
        return None;
    };
    state.status = GameStatus::GameOver(reason);
    state.show_alert(reason.message(), rules.alert_duration);
    Some(reason)
}

fn freeze_hazards(hazards: &mut [PollutionCloud]) {
    for cloud in hazards {
        cloud.vy = 0;
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Once the game is over this only re-applies the hazard freeze; score,
/// lives and positions stay put.
pub fn tick(world: &World, rng: &mut impl Rng) -> World {
    let mut next = world.clone();

    if next.state.is_over() {
        freeze_hazards(&mut next.hazards);
        return next;
    }

    next.frame += 1;
    let rules = &world.rules;

    // ── 1. Move everything ──────────────────────────────────────────────────
    advance_player(&mut next.player, next.width);
    for cloud in next.hazards.iter_mut() {
        advance_hazard(cloud, &mut next.state, next.width, next.height, rules, rng);
    }
    next.rewards.retain_mut(|reward| advance_reward(reward, rules));

    // ── 2. Player ↔ clouds ──────────────────────────────────────────────────
    let player_box = next.player.rect;
    let (caught, falling): (Vec<PollutionCloud>, Vec<PollutionCloud>) = next
        .hazards
        .into_iter()
        .partition(|cloud| cloud.rect.intersects(&player_box));
    next.hazards = falling;

    // ── 3. Reward each catch ────────────────────────────────────────────────
    for cloud in &caught {
        award_catch(&mut next.state, rules);

        let (rw, rh) = next.sizes.reward;
        next.rewards.push(CleanCloud {
            rect: Rect::centered_at(cloud.rect.centerx(), cloud.rect.centery(), rw, rh),
            ttl: rules.reward_lifetime,
        });

        if rng.gen_bool(rules.alert_chance) {
            if let Some(message) = ALERT_MESSAGES.choose(rng) {
                next.state.show_alert(*message, rules.alert_duration);
            }
        }

        if rng.gen_bool(rules.respawn_chance) {
            next.hazards
                .push(spawn_hazard(next.width, next.sizes.hazard, rules, rng));
        }
    }
    if !caught.is_empty() {
        log::debug!(
            "frame {}: caught {} cloud(s), score={} pollution={} active={}",
            next.frame,
            caught.len(),
            next.state.score,
            next.state.pollution,
            next.hazards.len()
        );
    }

    // ── 4. End of game ──────────────────────────────────────────────────────
    if let Some(reason) = check_game_over(&mut next.state, rules) {
        log::info!(
            "game over after {} frames ({:?}), final score {}",
            next.frame,
            reason,
            next.state.score
        );
        freeze_hazards(&mut next.hazards);
    }

    next
}

/// Count the alert banner down by one rendered frame.  Runs in every state.
pub fn count_down_alert(world: &World) -> World {
    let mut next = world.clone();
    if let Some(alert) = next.state.alert.as_mut() {
        alert.frames_left = alert.frames_left.saturating_sub(1);
        if alert.frames_left == 0 {
            next.state.alert = None;
        }
    }
    next
}

// ── HUD helpers ──────────────────────────────────────────────────────────────

/// Pollution as a percentage of `max_pollution`, clamped to 0..=100.
pub fn meter_percent(state: &GameState) -> i32 {
    state.pollution_level() * 100 / state.max_pollution
}

/// Colour band for a pollution percentage.
pub fn meter_band(percent: i32) -> MeterBand {
    if percent > 80 {
        MeterBand::Critical
    } else if percent > 50 {
        MeterBand::Elevated
    } else {
        MeterBand::Low
    }
}

/// Filled width of the pollution bar, in logical pixels.
pub fn meter_fill(state: &GameState) -> i32 {
    state.pollution_level() * METER_WIDTH / state.max_pollution
}

//! Tuning constants for the dungeon simulation.

/// Edge length of one grid tile in world units.
pub const TILE_SIZE: f32 = 50.0;

/// Default arena dimensions in tiles, border included.
pub const ARENA_WIDTH: i32 = 29;
pub const ARENA_HEIGHT: i32 = 17;

/// Smallest usable arena side: two border tiles around one interior tile.
pub const MIN_ARENA_SIDE: i32 = 3;

/// Player spawn tile (x, rows below the top border).
pub const PLAYER_SPAWN_X: i32 = 10;
pub const PLAYER_SPAWN_DEPTH: i32 = 4;

/// Warden waves appear in this column, starting two rows below the top border.
pub const WAVE_COLUMN: i32 = 3;
pub const WAVE_TOP_DEPTH: i32 = 2;

/// Per-tile generation chances, in percent.
pub const WALL_CHANCE: u32 = 15;
pub const CHEST_CHANCE: u32 = 5;
pub const MONSTER_CHANCE: u32 = 5;

/// Chest bounty is rolled as 1..=CHEST_BOUNTY_DIE gold.
pub const CHEST_BOUNTY_DIE: u32 = 20;

/// Both sides of a strike add 2d6 to their flat stat.
pub const STRIKE_DICE: u32 = 2;
pub const STRIKE_DIE_SIDES: u32 = 6;

/// Seconds an attacker holds the striking pose after a blow.
pub const ATTACK_FLASH_SECS: f32 = 0.15;

/// Bumping a wall chips 1..=WALL_BUMP_DIE off its hitpoints.
pub const WALL_BUMP_DIE: u32 = 10;

/// Patrolling fatigue: +1..=FATIGUE_GAIN_DIE per turn, sleep above the threshold.
pub const FATIGUE_SLEEP_THRESHOLD: i32 = 100;
pub const FATIGUE_GAIN_DIE: u32 = 10;

/// Being attacked shakes off this much fatigue.
pub const ATTACKED_FATIGUE_RELIEF: i32 = 20;

/// Fireballs fly one tile per second.
pub const FIREBALL_SPEED: f32 = TILE_SIZE;

/// Scrollback limit of the combat log.
pub const LOG_CAPACITY: usize = 200;

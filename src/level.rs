use std::time::Duration;

use crate::config::GameConfig;

/// (level, minimum cumulative score), ascending by level.
pub const LEVEL_THRESHOLDS: [(u32, u32); 6] = [(1, 0), (2, 20), (3, 40), (4, 60), (5, 80), (6, 100)];

pub fn level_for(score: u32) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .rev()
        .find(|&&(_, threshold)| score >= threshold)
        .map_or(1, |&(level, _)| level)
}

/// Ticks per second for a snake of `length` cells at `level`.
pub fn speed(config: &GameConfig, length: usize, level: u32) -> f64 {
    let length_bonus = length.saturating_sub(1) as f64 * config.speed_increment;
    let level_bonus = level.saturating_sub(1) as f64 * config.level_bonus;
    (config.base_speed + length_bonus + level_bonus).min(config.max_speed)
}

pub fn frame_duration(config: &GameConfig, length: usize, level: u32) -> Duration {
    Duration::from_secs_f64(1.0 / speed(config, length, level))
}

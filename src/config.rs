use std::path::PathBuf;

/// Tunables for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Logical width of the play field
    pub width: i32,
    /// Logical height of the play field
    pub height: i32,
    /// Logical size of one grid cell
    pub block: i32,

    // Speed, in ticks per second
    pub base_speed: f64,
    pub speed_increment: f64,
    pub level_bonus: f64,
    pub max_speed: f64,

    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 800,
            height: 600,
            block: 20,
            base_speed: 6.0,
            speed_increment: 0.3,
            level_bonus: 1.0,
            max_speed: 25.0,
            high_score_path: PathBuf::from("high_score.txt"),
            log_path: PathBuf::from("snake.log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_field_is_forty_by_thirty_cells() {
        let config = GameConfig::default();
        assert_eq!(config.width / config.block, 40);
        assert_eq!(config.height / config.block, 30);
    }
}

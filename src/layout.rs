use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::field::{Cell, Field};
use crate::snake::Snake;

pub const OBSTACLES_PER_LEVEL: usize = 3;
pub const MAX_PLACEMENT_ATTEMPTS: usize = 500;

/// Random obstacles for `level`, avoiding the snake and the food.
///
/// Gives up after `MAX_PLACEMENT_ATTEMPTS` draws and returns what it has,
/// so a crowded field yields fewer obstacles than the target.
pub fn obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    field: &Field,
    level: u32,
    snake: &Snake,
    food: Cell,
) -> HashSet<Cell> {
    let target = level.saturating_sub(1) as usize * OBSTACLES_PER_LEVEL;
    let region = field.obstacle_region();
    let mut placed = HashSet::with_capacity(target);

    let mut attempts = 0;
    while placed.len() < target && attempts < MAX_PLACEMENT_ATTEMPTS {
        attempts += 1;

        let cell = match region.sample(rng) {
            Some(cell) => cell,
            None => break,
        };

        if !snake.contains(cell) && cell != food {
            placed.insert(cell);
        }
    }

    if placed.len() < target {
        debug!("placed {} of {} obstacles for level {}", placed.len(), target, level);
    }

    placed
}

/// Fixed wall patterns. Each level keeps every pattern of the levels below it.
///
/// Walls are laid out without looking at the snake or the food.
pub fn walls(field: &Field, level: u32) -> HashSet<Cell> {
    let (w, h, b) = (field.width(), field.height(), field.block());
    let mut out = Vec::new();

    if level >= 2 {
        // short segments near the top and bottom edges
        for i in 0..3 {
            out.push((w / 4 + i * b, b * 3));
            out.push((w * 3 / 4 - i * b, h - b * 4));
        }
    }

    if level >= 3 {
        // left and right side segments
        for i in 0..4 {
            out.push((b * 3, h / 3 + i * b));
            out.push((w - b * 4, h * 2 / 3 - i * b));
        }
    }

    if level >= 4 {
        // center cross
        for i in 0..5 {
            out.push((w / 2 - 2 * b + i * b, h / 2));
        }
        for i in 0..3 {
            out.push((w / 2, h / 2 - b - i * b));
            out.push((w / 2, h / 2 + b + i * b));
        }
    }

    if level >= 5 {
        // opposite corner L-shapes
        for i in 0..4 {
            out.push((b * 5 + i * b, b * 5));
            out.push((b * 5, b * 5 + i * b));
            out.push((w - b * 6 - i * b, h - b * 6));
            out.push((w - b * 6, h - b * 6 - i * b));
        }
    }

    if level >= 6 {
        // maze lines
        for i in 0..6 {
            out.push((w / 3, h / 4 + i * b));
            out.push((w * 2 / 3, h * 3 / 4 - i * b));
        }
    }

    out.into_iter().map(|(x, y)| field.cell_at(x, y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::{rngs::StdRng, SeedableRng};

    fn field() -> Field {
        Field::from_config(&GameConfig::default())
    }

    #[test]
    fn no_walls_on_level_one() {
        assert!(walls(&field(), 0).is_empty());
        assert!(walls(&field(), 1).is_empty());
    }

    #[test]
    fn level_two_walls() {
        let expected: HashSet<Cell> = vec![
            Cell::new(10, 3),
            Cell::new(11, 3),
            Cell::new(12, 3),
            Cell::new(30, 26),
            Cell::new(29, 26),
            Cell::new(28, 26),
        ]
        .into_iter()
        .collect();

        assert_eq!(walls(&field(), 2), expected);
    }

    #[test]
    fn walls_accumulate_with_level() {
        let f = field();
        for level in 2..=6 {
            let lower = walls(&f, level - 1);
            let upper = walls(&f, level);
            assert!(upper.is_superset(&lower), "level {} dropped walls", level);
            assert!(upper.len() > lower.len());
        }
        assert_eq!(walls(&f, 6), walls(&f, 9));
    }

    #[test]
    fn walls_stay_inside_the_field() {
        let f = field();
        assert!(walls(&f, 6).iter().all(|&cell| f.contains(cell)));
    }

    #[test]
    fn center_cross_on_level_four() {
        let w = walls(&field(), 4);
        assert!(w.contains(&Cell::new(20, 15)));
        assert!(w.contains(&Cell::new(18, 15)));
        assert!(w.contains(&Cell::new(20, 12)));
        assert!(w.contains(&Cell::new(20, 18)));
    }

    #[test]
    fn obstacle_count_follows_level() {
        let f = field();
        let snake = Snake::new(f.center());
        let food = Cell::new(5, 5);
        let mut rng = StdRng::seed_from_u64(42);

        assert!(obstacles(&mut rng, &f, 1, &snake, food).is_empty());
        for level in 2..=6 {
            let placed = obstacles(&mut rng, &f, level, &snake, food);
            assert_eq!(placed.len(), (level as usize - 1) * 3);
        }
    }

    #[test]
    fn obstacles_avoid_snake_and_food() {
        let f = field();
        let snake = Snake::from_body(
            (2..=37).map(|x| Cell::new(x, 10)).collect(),
            None,
        );
        let food = Cell::new(20, 20);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let placed = obstacles(&mut rng, &f, 6, &snake, food);
            assert!(!placed.contains(&food));
            assert!(placed.iter().all(|&cell| !snake.contains(cell)));
            let region = f.obstacle_region();
            assert!(placed.iter().all(|cell| region.cells().any(|c| c == *cell)));
        }
    }

    #[test]
    fn saturated_region_returns_partial_set() {
        // 6x8 cells leaves a 2x2 obstacle region
        let f = Field::new(120, 160, 20);
        let snake = Snake::new(Cell::new(0, 0));
        let mut rng = StdRng::seed_from_u64(3);

        let placed = obstacles(&mut rng, &f, 6, &snake, Cell::new(0, 1));
        assert_eq!(placed.len(), 4);
    }

    #[test]
    fn empty_region_places_nothing() {
        let f = Field::new(60, 60, 20);
        let snake = Snake::new(Cell::new(1, 1));
        let mut rng = StdRng::seed_from_u64(3);

        assert!(obstacles(&mut rng, &f, 6, &snake, Cell::new(0, 0)).is_empty());
    }
}

use std::collections::HashSet;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info};

use crate::field::{Cell, Field};
use crate::layout::{self, MAX_PLACEMENT_ATTEMPTS};
use crate::level::level_for;
use crate::snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Boundary,
    Obstacle,
    Wall,
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No heading yet, nothing moved
    Idle,
    Moved,
    Ate { level_up: Option<u32> },
    Crashed(Hazard),
    /// Food was eaten and there is nowhere left to put the next one
    FieldFull,
}

/// One session's worth of game state, advanced one tick at a time.
pub struct GameState {
    field: Field,
    snake: Snake,
    food: Cell,
    obstacles: HashSet<Cell>,
    walls: HashSet<Cell>,
    score: u32,
    level: u32,
    rng: StdRng,
}

impl GameState {
    pub fn new(field: Field) -> Self {
        GameState::with_rng(field, StdRng::from_entropy())
    }

    pub fn with_rng(field: Field, rng: StdRng) -> Self {
        let level = 1;
        let mut state = GameState {
            field,
            snake: Snake::new(field.center()),
            food: field.center(),
            obstacles: HashSet::new(),
            walls: layout::walls(&field, level),
            score: 0,
            level,
            rng,
        };

        if let Some(food) = state.spawn_food() {
            state.food = food;
        }

        state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn obstacles(&self) -> &HashSet<Cell> {
        &self.obstacles
    }

    pub fn walls(&self) -> &HashSet<Cell> {
        &self.walls
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn steer(&mut self, dir: Direction) {
        self.snake.steer(dir);
    }

    /// Advances the game by one step.
    pub fn tick(&mut self) -> TickOutcome {
        let next = match self.snake.next_head() {
            Some(next) => next,
            None => return TickOutcome::Idle,
        };

        if let Some(hazard) = self.hazard_at(next) {
            debug!("crashed into {:?} at {:?}", hazard, next);
            return TickOutcome::Crashed(hazard);
        }

        self.snake.advance(next);

        if next != self.food {
            return TickOutcome::Moved;
        }

        self.snake.grow();
        self.score += 1;

        match self.spawn_food() {
            Some(food) => self.food = food,
            None => return TickOutcome::FieldFull,
        }

        let level = level_for(self.score);
        if level <= self.level {
            return TickOutcome::Ate { level_up: None };
        }

        self.level = level;
        self.walls = layout::walls(&self.field, level);
        self.obstacles = layout::obstacles(&mut self.rng, &self.field, level, &self.snake, self.food);
        info!(
            "level {} at score {}: {} obstacles, {} walls",
            level,
            self.score,
            self.obstacles.len(),
            self.walls.len()
        );

        TickOutcome::Ate { level_up: Some(level) }
    }

    /// Checked in order: field edge, obstacles, walls, own body.
    fn hazard_at(&self, cell: Cell) -> Option<Hazard> {
        if !self.field.contains(cell) {
            Some(Hazard::Boundary)
        } else if self.obstacles.contains(&cell) {
            Some(Hazard::Obstacle)
        } else if self.walls.contains(&cell) {
            Some(Hazard::Wall)
        } else if self.snake.bites(cell) {
            Some(Hazard::SelfCollision)
        } else {
            None
        }
    }

    fn is_free(&self, cell: Cell) -> bool {
        !self.snake.contains(cell) && !self.obstacles.contains(&cell) && !self.walls.contains(&cell)
    }

    /// Random free cell for the next food. Falls back to picking among all
    /// free cells when random draws keep landing on occupied ones.
    fn spawn_food(&mut self) -> Option<Cell> {
        let region = self.field.food_region();

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let cell = region.sample(&mut self.rng)?;
            if self.is_free(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = region.cells().filter(|&cell| self.is_free(cell)).collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
impl GameState {
    /// Puts the food and layout in known places.
    pub fn place(&mut self, food: Cell, obstacles: Vec<Cell>, walls: Vec<Cell>) {
        self.food = food;
        self.obstacles = obstacles.into_iter().collect();
        self.walls = walls.into_iter().collect();
    }
}

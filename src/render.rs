use std::{thread::sleep, time::Duration};

use anyhow::{bail, Result};
use crossterm::style::Color;

use crate::field::{Cell, Field};
use crate::snake::Snake;
use crate::state::GameState;
use crate::term::TermManager;
use crate::{Coords, TermInt};

/// Terminal columns per field cell, so cells look roughly square.
const CELL_WIDTH: TermInt = 2;

const BODY: [char; 2] = ['█', '█'];
const FOOD: [char; 2] = ['(', ')'];
const OBSTACLE: [char; 2] = ['X', 'X'];
const WALL: [char; 2] = ['▒', '▒'];
const EMPTY: [char; 2] = [' ', ' '];
const DEAD: [char; 2] = ['X', 'X'];

const FLASHES: usize = 3;
const FLASH_ON_MS: u64 = 300;
const FLASH_OFF_MS: u64 = 150;

/// What the game over box reports.
pub struct Summary {
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub won: bool,
}

/// Draws game state onto the terminal. Holds only the screen layout.
pub struct Renderer {
    origin: Coords,
    cols: TermInt,
    rows: TermInt,
}

impl Renderer {
    pub fn new(term_size: Coords, field: &Field) -> Result<Self> {
        let (cols, rows) = (field.cols() as TermInt, field.rows() as TermInt);

        // border on each side, plus the score panel row on top
        let needed = (cols * CELL_WIDTH + 2, rows + 3);
        if term_size.0 < needed.0 || term_size.1 < needed.1 {
            bail!(
                "terminal is {}x{}, the game needs at least {}x{}",
                term_size.0, term_size.1, needed.0, needed.1
            );
        }

        let origin = ((term_size.0 - needed.0) / 2 + 1, (term_size.1 - needed.1) / 2 + 2);
        Ok(Renderer { origin, cols, rows })
    }

    pub fn draw_frame(&self, term: &mut TermManager) -> Result<()> {
        term.draw_borders(self.origin, (self.cols * CELL_WIDTH, self.rows))?;
        term.flush()
    }

    pub fn draw(&self, term: &mut TermManager, state: &GameState, high_score: u32) -> Result<()> {
        self.draw_panel(term, state.score(), high_score, state.level())?;

        let head_glyph = [state.snake().head_char(); 2];

        for y in 0..self.rows as i32 {
            for x in 0..self.cols as i32 {
                let cell = Cell::new(x, y);
                let (glyph, color) = match occupant(state, cell) {
                    Occupant::Head => (head_glyph, Color::DarkGreen),
                    Occupant::Body => (BODY, Color::Green),
                    Occupant::Obstacle => (OBSTACLE, Color::Magenta),
                    Occupant::Wall => (WALL, Color::Grey),
                    Occupant::Food => (FOOD, Color::Red),
                    Occupant::Empty => (EMPTY, Color::Reset),
                };

                self.draw_cell(term, cell, glyph, color)?;
            }
        }

        term.flush()
    }

    /// Blinks a level banner. Blocks until done.
    pub fn level_up(&self, term: &mut TermManager, level: u32) -> Result<()> {
        let banner = format!("LEVEL {}!", level);

        for _ in 0..FLASHES {
            term.show_message(&[banner.as_str()])?;
            sleep(Duration::from_millis(FLASH_ON_MS));
            term.hide_message()?;
            sleep(Duration::from_millis(FLASH_OFF_MS));
        }

        Ok(())
    }

    /// Redraws the snake as a crashed one.
    pub fn bury(&self, term: &mut TermManager, snake: &Snake) -> Result<()> {
        for &cell in snake.body() {
            self.draw_cell(term, cell, DEAD, Color::DarkRed)?;
        }

        term.flush()
    }

    pub fn game_over(&self, term: &mut TermManager, summary: &Summary) -> Result<()> {
        let title = if summary.won {"YOU WIN!"} else {"GAME OVER!"};
        let result = format!("Final Score: {}  |  Level: {}", summary.score, summary.level);
        let record = if summary.score > 0 && summary.score >= summary.high_score {
            format!("NEW HIGH SCORE: {}!", summary.high_score)
        } else {
            format!("High Score: {}", summary.high_score)
        };

        term.show_message(&[
            title,
            "",
            result.as_str(),
            record.as_str(),
            "",
            "Press C to Play Again  |  Press Q to Quit",
        ])
    }

    pub fn intro(&self, term: &mut TermManager) -> Result<()> {
        term.show_message(&[
            "Arrow keys or WASD to move",
            "Q or CTRL+C to quit",
            "",
            "Every 20 points brings a new level",
            "",
            "Press any key to begin",
        ])
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_panel(&self, term: &mut TermManager, score: u32, high_score: u32, level: u32) -> Result<()> {
        let y = self.origin.1 - 2;
        let left = self.origin.0 - 1;
        let width = self.cols * CELL_WIDTH + 2;

        let score_text = format!("Score: {:<8}", score);
        let high_text = format!("High Score: {:<8}", high_score);
        let level_text = format!("Level: {:<3}", level);

        term.print_str((left, y), &score_text, Color::White)?;
        term.print_str((left + width / 2 - 10, y), &high_text, Color::Yellow)?;
        term.print_str((left + width - level_text.len() as TermInt, y), &level_text, level_color(level))
    }

    fn draw_cell(&self, term: &mut TermManager, cell: Cell, glyph: [char; 2], color: Color) -> Result<()> {
        let x = self.origin.0 + cell.x as TermInt * CELL_WIDTH;
        let y = self.origin.1 + cell.y as TermInt;

        for (i, ch) in glyph.iter().enumerate() {
            term.print_at((x + i as TermInt, y), *ch, color)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupant {
    Head,
    Body,
    Obstacle,
    Wall,
    Food,
    Empty,
}

/// What shows in a cell. Hazards win over food, since a wall laid on the
/// food makes that cell deadly.
fn occupant(state: &GameState, cell: Cell) -> Occupant {
    let snake = state.snake();

    if snake.head() == Some(cell) {
        Occupant::Head
    } else if snake.contains(cell) {
        Occupant::Body
    } else if state.obstacles().contains(&cell) {
        Occupant::Obstacle
    } else if state.walls().contains(&cell) {
        Occupant::Wall
    } else if cell == state.food() {
        Occupant::Food
    } else {
        Occupant::Empty
    }
}

fn level_color(level: u32) -> Color {
    match level {
        1 => Color::Green,
        2 => Color::Yellow,
        3 => Color::DarkYellow,
        4 => Color::Red,
        5 => Color::Magenta,
        6 => Color::Blue,
        _ => Color::White,
    }
}

use std::collections::{HashSet, VecDeque};

use crate::field::Cell;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }
}

/// The snake's body, tail first, head last.
///
/// `length` is the size the body is allowed to reach. Eating raises it by one
/// and the body catches up on the next move by keeping its tail.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
    length: usize,
    heading: Option<Direction>,
}

impl Snake {
    /// A one-cell snake standing still at `pos`.
    pub fn new(pos: Cell) -> Self {
        Snake::from_body(vec![pos], None)
    }

    /// Builds a snake from cells ordered tail to head.
    pub fn from_body(cells: Vec<Cell>, heading: Option<Direction>) -> Self {
        let occupied = cells.iter().copied().collect();
        let length = cells.len();
        Snake { body: cells.into(), occupied, length, heading }
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    /// Cells the body is allowed to span, counting growth not yet caught up.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Turns onto the other axis. Turns along the current axis are ignored,
    /// so the snake can never reverse straight into itself.
    pub fn steer(&mut self, dir: Direction) -> bool {
        match self.heading {
            Some(current) if current.is_horizontal() == dir.is_horizontal() => false,
            _ => {
                self.heading = Some(dir);
                true
            }
        }
    }

    /// Where the head goes next, or `None` while the snake has not started moving.
    pub fn next_head(&self) -> Option<Cell> {
        let (dx, dy) = self.heading?.delta();
        self.head().map(|head| head.offset(dx, dy))
    }

    /// True if moving the head to `next` would hit the body. The tail cell
    /// doesn't count when it moves away on the same step.
    pub fn bites(&self, next: Cell) -> bool {
        if !self.occupied.contains(&next) {
            return false;
        }

        let tail_leaves = self.body.len() >= self.length;
        !(tail_leaves && self.body.front() == Some(&next))
    }

    /// Pushes `new_head` and drops tail cells until the body fits `length`.
    /// Returns the dropped cells.
    pub fn advance(&mut self, new_head: Cell) -> Vec<Cell> {
        self.body.push_back(new_head);
        self.occupied.insert(new_head);

        let mut dropped = Vec::new();
        while self.body.len() > self.length {
            if let Some(tail) = self.body.pop_front() {
                if tail != new_head {
                    self.occupied.remove(&tail);
                }
                dropped.push(tail);
            }
        }

        dropped
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn head_char(&self) -> char {
        match self.heading {
            Some(Up) => '^',
            Some(Down) => 'v',
            Some(Left) => '<',
            Some(Right) | None => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(len: i32) -> Snake {
        // horizontal, head at (len - 1, 5), moving right
        Snake::from_body((0..len).map(|x| Cell::new(x, 5)).collect(), Some(Right))
    }

    #[test]
    fn new_snake_is_idle() {
        let snake = Snake::new(Cell::new(3, 4));
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.head(), Some(Cell::new(3, 4)));
        assert_eq!(snake.next_head(), None);
    }

    #[test]
    fn first_input_sets_any_heading() {
        let mut snake = Snake::new(Cell::new(3, 4));
        assert!(snake.steer(Left));
        assert_eq!(snake.next_head(), Some(Cell::new(2, 4)));
    }

    #[test]
    fn no_reversal_on_the_same_axis() {
        let mut snake = line(3);

        assert!(!snake.steer(Left));
        assert!(!snake.steer(Right));
        assert_eq!(snake.next_head(), Some(Cell::new(3, 5)));

        assert!(snake.steer(Up));
        assert!(!snake.steer(Down));
        assert_eq!(snake.next_head(), Some(Cell::new(2, 4)));

        assert!(snake.steer(Left));
        assert_eq!(snake.next_head(), Some(Cell::new(1, 5)));
        assert_eq!(snake.head_char(), '<');
    }

    #[test]
    fn advance_keeps_length() {
        let mut snake = line(3);
        let next = snake.next_head().unwrap();
        let dropped = snake.advance(next);

        assert_eq!(dropped, vec![Cell::new(0, 5)]);
        assert_eq!(snake.body().count(), 3);
        assert_eq!(snake.head(), Some(Cell::new(3, 5)));
        assert!(!snake.contains(Cell::new(0, 5)));
    }

    #[test]
    fn grow_keeps_the_tail_once() {
        let mut snake = line(3);
        snake.grow();

        let next = snake.next_head().unwrap();
        assert!(snake.advance(next).is_empty());
        assert_eq!(snake.body().count(), 4);

        let next = snake.next_head().unwrap();
        assert_eq!(snake.advance(next).len(), 1);
        assert_eq!(snake.body().count(), 4);
    }

    #[test]
    fn biting_the_body() {
        // U-shape: (2,5) (1,5) (0,5) (0,4) (1,4) head, moving down into (1,5)
        let snake = Snake::from_body(
            vec![Cell::new(2, 5), Cell::new(1, 5), Cell::new(0, 5), Cell::new(0, 4), Cell::new(1, 4)],
            Some(Down),
        );
        let next = snake.next_head().unwrap();
        assert_eq!(next, Cell::new(1, 5));
        assert!(snake.bites(next));
    }

    #[test]
    fn chasing_the_tail_is_safe() {
        // 2x2 loop: the head steps onto the cell the tail is leaving
        let snake = Snake::from_body(
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1), Cell::new(0, 1)],
            Some(Up),
        );
        assert!(!snake.bites(Cell::new(0, 0)));

        let mut growing = snake.clone();
        growing.grow();
        assert!(growing.bites(Cell::new(0, 0)));
    }
}

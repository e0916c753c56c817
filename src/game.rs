use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::Result;
use tracing::info;

use crate::config::GameConfig;
use crate::field::Field;
use crate::input::{key_action, KeyAction};
use crate::level::frame_duration;
use crate::render::{Renderer, Summary};
use crate::state::{GameState, TickOutcome};
use crate::storage::HighScoreStore;
use crate::term::TermManager;

const TICK_INTERVAL_MS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    GameOver { won: bool },
    Restart,
    Quit,
}

pub struct SnakeGame {
    config: GameConfig,
    field: Field,
    term: TermManager,
    renderer: Renderer,
    store: HighScoreStore,
    high_score: u32,
    state: GameState,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let term = TermManager::new()?;
        let field = Field::from_config(&config);
        let renderer = Renderer::new(term.get_terminal_size(), &field)?;
        let store = HighScoreStore::new(&config.high_score_path);
        let high_score = store.load();

        Ok(SnakeGame {
            config,
            field,
            term,
            renderer,
            store,
            high_score,
            state: GameState::new(field),
        })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        self.term.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    /// Runs sessions back to back until the player quits.
    pub fn run(&mut self) -> Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        let mut phase = Phase::Restart;
        loop {
            phase = match phase {
                Phase::Restart => {
                    self.reset()?;
                    Phase::Running
                }
                Phase::Running => self.play()?,
                Phase::GameOver { won } => self.game_over(won)?,
                Phase::Quit => return Ok(()),
            };
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Returns false if the player quit from the intro screen.
    fn show_intro(&mut self) -> Result<bool> {
        self.renderer.intro(&mut self.term)?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        Ok(key_action(&key) != KeyAction::Quit)
    }

    fn reset(&mut self) -> Result<()> {
        self.state = GameState::new(self.field);
        info!("new session, high score {}", self.high_score);

        self.term.clear()?;
        self.renderer.draw_frame(&mut self.term)?;
        self.renderer.draw(&mut self.term, &self.state, self.high_score)
    }

    fn play(&mut self) -> Result<Phase> {
        let mut next_step = Instant::now() + self.frame_duration();

        loop {
            sleep(Duration::from_millis(TICK_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match key_action(&key_ev) {
                    KeyAction::Steer(dir) => self.state.steer(dir),
                    KeyAction::Quit => return Ok(Phase::Quit),
                    KeyAction::Restart | KeyAction::None => {}
                }
            }

            if Instant::now() < next_step {
                continue;
            }

            match self.state.tick() {
                TickOutcome::Crashed(hazard) => {
                    info!("crashed into {:?}", hazard);
                    return Ok(Phase::GameOver { won: false });
                }
                TickOutcome::FieldFull => {
                    self.renderer.draw(&mut self.term, &self.state, self.high_score)?;
                    return Ok(Phase::GameOver { won: true });
                }
                TickOutcome::Ate { level_up: Some(level) } => {
                    self.renderer.draw(&mut self.term, &self.state, self.high_score)?;
                    self.renderer.level_up(&mut self.term, level)?;
                }
                TickOutcome::Ate { level_up: None } | TickOutcome::Moved | TickOutcome::Idle => {
                    self.renderer.draw(&mut self.term, &self.state, self.high_score)?;
                }
            }

            next_step = Instant::now() + self.frame_duration();
        }
    }

    fn game_over(&mut self, won: bool) -> Result<Phase> {
        let score = self.state.score();
        info!("game over: score {} at level {}", score, self.state.level());

        if self.store.record(&mut self.high_score, score) {
            info!("new high score {}", score);
        }

        let summary = Summary {
            score,
            level: self.state.level(),
            high_score: self.high_score,
            won,
        };
        if !won {
            self.renderer.bury(&mut self.term, self.state.snake())?;
        }
        self.renderer.game_over(&mut self.term, &summary)?;

        loop {
            sleep(Duration::from_millis(TICK_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match key_action(&key_ev) {
                    KeyAction::Restart => return Ok(Phase::Restart),
                    KeyAction::Quit => return Ok(Phase::Quit),
                    KeyAction::Steer(_) | KeyAction::None => {}
                }
            }
        }
    }

    fn frame_duration(&self) -> Duration {
        frame_duration(&self.config, self.state.snake().length(), self.state.level())
    }
}

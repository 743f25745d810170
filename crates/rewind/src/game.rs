//! Game subject with restore-only checkpoints.

use rewind_history::{Originator, SnapshotStack};
use std::fmt;
use tracing::debug;

/// Saved progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    level: u32,
    health: u32,
    position: String,
}

impl GameSnapshot {
    pub fn new(level: u32, health: u32, position: impl Into<String>) -> Self {
        Self {
            level,
            health,
            position: position.into(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn position(&self) -> &str {
        &self.position
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    level: u32,
    health: u32,
    position: String,
}

impl Game {
    pub fn new(level: u32, health: u32, position: impl Into<String>) -> Self {
        Self {
            level,
            health,
            position: position.into(),
        }
    }

    /// Advance to a new point in the game.
    pub fn play(&mut self, level: u32, health: u32, position: impl Into<String>) {
        self.level = level;
        self.health = health;
        self.position = position.into();
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn position(&self) -> &str {
        &self.position
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  level {} | health {} | position {}",
            self.level(),
            self.health(),
            self.position()
        )
    }
}

impl Originator for Game {
    type Snapshot = GameSnapshot;

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(self.level, self.health, self.position.clone())
    }

    fn restore(&mut self, snapshot: &GameSnapshot) {
        self.level = snapshot.level;
        self.health = snapshot.health;
        self.position = snapshot.position.clone();
    }
}

/// A single game operation from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOp {
    Play {
        level: u32,
        health: u32,
        position: String,
    },
    Save,
    Restore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Played,
    Saved,
    Restored,
    NothingToRestore,
}

/// A game and its checkpoint stack.
pub struct GameSession {
    game: Game,
    saves: SnapshotStack<GameSnapshot>,
}

impl GameSession {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            saves: SnapshotStack::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn saves(&self) -> &SnapshotStack<GameSnapshot> {
        &self.saves
    }

    pub fn apply(&mut self, op: &GameOp) -> GameOutcome {
        debug!(?op, "Applying game op");
        match op {
            GameOp::Play {
                level,
                health,
                position,
            } => {
                self.game.play(*level, *health, position.as_str());
                GameOutcome::Played
            }
            GameOp::Save => {
                self.saves.push(self.game.snapshot());
                GameOutcome::Saved
            }
            GameOp::Restore => match self.saves.pop() {
                Some(snapshot) => {
                    self.game.restore(&snapshot);
                    GameOutcome::Restored
                }
                None => GameOutcome::NothingToRestore,
            },
        }
    }
}

/// Starting game and operations used when none are given.
pub fn default_script() -> (Game, Vec<GameOp>) {
    let play = |level, health, position: &str| GameOp::Play {
        level,
        health,
        position: position.to_string(),
    };

    (
        Game::new(1, 100, "Start"),
        vec![
            GameOp::Save,
            play(2, 90, "Enchanted Forest"),
            GameOp::Save,
            play(3, 70, "Dark Cave"),
            GameOp::Save,
            play(4, 50, "Dragon Castle"),
            GameOp::Restore,
            GameOp::Restore,
        ],
    )
}

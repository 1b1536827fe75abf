//! Receipt session
//!
//! Talks to the receipt service between ticks and applies what it returns
//! at the reset points: a new round, a refreshed receipt list, a new game.
//! Every operation either succeeds completely or leaves the game untouched.

use crate::config::SimConfig;
use crate::driver::Simulation;
use crate::error::SessionError;
use crate::input::InputIntent;
use crate::receipts::{Receipt, ReceiptSource};
use crate::sim::{Game, GamePhase, GameState, ObstacleField, TickReport};

pub struct Session<S: ReceiptSource> {
    game: Game,
    source: S,
    receipts: Vec<Receipt>,
}

impl<S: ReceiptSource> Session<S> {
    pub fn new(config: SimConfig, source: S) -> Self {
        Self {
            game: Game::new(config),
            source,
            receipts: Vec::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    /// Receipts from the last successful refresh
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Reload the receipt list and pick the waiting phase to match.
    ///
    /// While a round is being played only the list is updated.
    pub fn refresh_receipts(&mut self) -> Result<&[Receipt], SessionError> {
        let receipts = self.source.list_receipts()?;
        log::info!("{} receipts available", receipts.len());

        match self.game.phase() {
            GamePhase::Playing => {}
            GamePhase::None
            | GamePhase::NeedsInput
            | GamePhase::ReadyToSelect
            | GamePhase::GameOver
            | GamePhase::Won => {
                if receipts.is_empty() {
                    self.game.enter_needs_input()?;
                } else {
                    self.game.enter_ready_to_select()?;
                }
            }
        }

        self.receipts = receipts;
        Ok(&self.receipts)
    }

    /// Upload a receipt and move on to selection
    pub fn upload(&mut self, filename: &str, contents: &[u8]) -> Result<u32, SessionError> {
        match self.game.phase() {
            GamePhase::NeedsInput | GamePhase::ReadyToSelect | GamePhase::None => {}
            from @ (GamePhase::Playing | GamePhase::GameOver | GamePhase::Won) => {
                return Err(SessionError::InvalidTransition {
                    from,
                    to: GamePhase::ReadyToSelect,
                });
            }
        }

        let id = self.source.upload(filename, contents)?;
        self.refresh_receipts()?;
        Ok(id)
    }

    /// Load a receipt's line items and start a round on them.
    ///
    /// Fetch failures, empty receipts and bad prices all leave the phase
    /// where it was.
    pub fn select_receipt(&mut self, id: u32) -> Result<(), SessionError> {
        match self.game.phase() {
            GamePhase::ReadyToSelect => {}
            from @ (GamePhase::None
            | GamePhase::NeedsInput
            | GamePhase::Playing
            | GamePhase::GameOver
            | GamePhase::Won) => {
                return Err(SessionError::InvalidTransition {
                    from,
                    to: GamePhase::Playing,
                });
            }
        }

        let items = self.source.line_items(id)?;
        if items.is_empty() {
            return Err(SessionError::EmptyReceipt { id });
        }
        let field = ObstacleField::from_line_items(&items, self.game.config())?;
        log::info!("Selected receipt {}", id);
        self.game.start_round(field)
    }

    /// After a finished round: same receipts, fresh game
    pub fn new_game(&mut self) -> Result<(), SessionError> {
        let from = self.game.phase();
        if from.is_finished() {
            self.game.enter_ready_to_select()
        } else {
            Err(SessionError::InvalidTransition {
                from,
                to: GamePhase::ReadyToSelect,
            })
        }
    }

    /// Go back to the upload prompt
    pub fn upload_new(&mut self) -> Result<(), SessionError> {
        let from = self.game.phase();
        if from.is_finished() || from == GamePhase::ReadyToSelect {
            self.game.enter_needs_input()
        } else {
            Err(SessionError::InvalidTransition {
                from,
                to: GamePhase::NeedsInput,
            })
        }
    }
}

impl<S: ReceiptSource> Simulation for Session<S> {
    fn tick(&mut self, input: &InputIntent, dt: f32) -> TickReport {
        self.game.tick(input, dt)
    }

    fn snapshot(&self) -> GameState {
        self.game.snapshot()
    }
}

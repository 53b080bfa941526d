//! @acp:module "Game Controller"
//! @acp:summary "Async game loop bridging the game manager and the views"
//! @acp:domain game
//! @acp:layer handler
//!
//! Bots move after a short pause. Human moves arrive as messages through a
//! [`ControllerHandle`], so any view (terminal prompt, JSON stdin, a test) can
//! drive a human seat without the controller knowing how input is collected.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::deck::{Card, Color};
use crate::error::Result;
use crate::game::{GameEnd, GameManager, GameOutcome, PlayerId, TurnReport};
use crate::player::TurnAction;
use crate::view::GameView;

/// Messages accepted by the game loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    Move(TurnAction),
    Stop,
}

/// @acp:summary "Cloneable sender for human moves and stop requests"
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<ControlMessage>,
}

impl ControllerHandle {
    fn send(&self, message: ControlMessage) {
        if self.tx.send(message).is_err() {
            tracing::debug!("Controller is gone, message dropped");
        }
    }

    pub fn submit(&self, action: TurnAction) {
        self.send(ControlMessage::Move(action));
    }

    /// The human seat plays `card`; wild cards need `color`
    pub fn human_played_card(&self, card: Card, color: Option<Color>) {
        self.submit(TurnAction::Play { card, color });
    }

    pub fn human_drew_card(&self) {
        self.submit(TurnAction::Draw);
    }

    pub fn stop(&self) {
        self.send(ControlMessage::Stop);
    }
}

/// Loop timing and limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub bot_delay: Duration,
    pub max_turns: u32,
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            bot_delay: Duration::from_millis(config.bot_delay_ms),
            max_turns: config.max_turns,
        }
    }
}

/// Text shown to views for an accepted move
pub fn describe_report(label: &str, report: &TurnReport) -> String {
    match report {
        TurnReport::Played { card } => format!("{} plays {}", label, card),
        TurnReport::Defended { card, malus } => {
            format!("{} answers the penalty of {} with {}", label, malus, card)
        }
        TurnReport::Drew { count: 0 } => format!("{} has nothing left to draw", label),
        TurnReport::Drew { .. } => format!("{} draws a card", label),
        TurnReport::TookPenalty { count, .. } => {
            format!("{} takes the penalty and draws {}", label, count)
        }
    }
}

/// @acp:summary "Runs one game from deal to outcome"
pub struct GameController {
    manager: GameManager,
    views: Vec<Box<dyn GameView>>,
    tx: mpsc::UnboundedSender<ControlMessage>,
    rx: mpsc::UnboundedReceiver<ControlMessage>,
    settings: ControllerSettings,
}

impl GameController {
    pub fn new(manager: GameManager, settings: ControllerSettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            manager,
            views: Vec::new(),
            tx,
            rx,
            settings,
        }
    }

    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn add_view(&mut self, view: Box<dyn GameView>) {
        self.views.push(view);
    }

    pub fn manager(&self) -> &GameManager {
        &self.manager
    }

    /// Deal a fresh game and play it to the end, a stop request, or the turn limit
    pub async fn start(&mut self) -> Result<GameOutcome> {
        self.manager.init()?;
        tracing::info!(game = %self.manager.game_id(), "Game loop started");

        let state = self.manager.game_state();
        self.broadcast(|view| view.update_view(&state));

        let end = loop {
            if self.manager.winner().is_some() {
                break GameEnd::Finished;
            }
            if self.drain_pending() {
                break GameEnd::Stopped;
            }
            if self.manager.turns() >= self.settings.max_turns {
                tracing::warn!("Turn limit of {} reached", self.settings.max_turns);
                break GameEnd::TurnLimit;
            }

            let id = self.manager.advance_turn();
            let state = self.manager.game_state();
            if let Some(seat) = state.seat(id).cloned() {
                self.broadcast(|view| view.show_current_player(&seat));
            }

            let completed = if self.manager.is_bot(id) {
                self.handle_bot_turn(id).await?
            } else {
                self.handle_human_turn(id).await?
            };
            if !completed {
                break GameEnd::Stopped;
            }

            let state = self.manager.game_state();
            self.broadcast(|view| view.update_view(&state));
        };

        let outcome = self.manager.outcome(end);
        tracing::info!(
            game = %outcome.game_id,
            turns = outcome.turns,
            "Game ended: {:?}, winner {:?}",
            outcome.end,
            outcome.winner
        );
        self.broadcast(|view| view.show_outcome(&outcome));
        Ok(outcome)
    }

    /// Ask every human-facing view for a move until one is accepted.
    /// Returns false when the game was stopped instead.
    async fn handle_human_turn(&mut self, id: PlayerId) -> Result<bool> {
        loop {
            let state = self.manager.game_state();
            self.broadcast(|view| view.request_human_move(&state));

            let action = match self.rx.recv().await {
                Some(ControlMessage::Move(action)) => action,
                Some(ControlMessage::Stop) | None => return Ok(false),
            };

            match self.manager.execute_turn(id, action) {
                Ok(report) => {
                    self.announce(id, &report);
                    return Ok(true);
                }
                Err(rejection) => {
                    let message = format!("Invalid move: {}. Try again.", rejection);
                    self.broadcast(|view| view.show_error(&message));
                }
            }
        }
    }

    /// Pause, then let the bot move. Returns false when stopped during the pause.
    async fn handle_bot_turn(&mut self, id: PlayerId) -> Result<bool> {
        if !self.settings.bot_delay.is_zero() {
            tokio::time::sleep(self.settings.bot_delay).await;
            if self.drain_pending() {
                return Ok(false);
            }
        }

        let report = self.manager.play_bot_turn()?;
        self.announce(id, &report);
        Ok(true)
    }

    fn announce(&mut self, id: PlayerId, report: &TurnReport) {
        let label = self
            .manager
            .player(id)
            .map(|p| p.label().to_string())
            .unwrap_or_else(|| format!("Player {}", id));
        let message = describe_report(&label, report);
        self.broadcast(|view| view.show_message(&message));
    }

    /// Empty the inbox between turns. Moves sent out of turn are dropped; returns
    /// true if a stop was requested.
    fn drain_pending(&mut self) -> bool {
        let mut stop = false;
        while let Ok(message) = self.rx.try_recv() {
            match message {
                ControlMessage::Stop => stop = true,
                ControlMessage::Move(action) => {
                    tracing::debug!("Dropping move sent out of turn: {:?}", action)
                }
            }
        }
        stop
    }

    fn broadcast(&mut self, mut f: impl FnMut(&mut dyn GameView)) {
        for view in &mut self.views {
            f(view.as_mut());
        }
    }
}

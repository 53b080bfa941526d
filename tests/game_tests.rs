//! Game loop integration tests
//!
//! Drives the async controller with in-memory views standing in for a person.

use std::time::Duration;

use primus::config::{Config, SeatConfig, SeatKind};
use primus::controller::{ControllerHandle, ControllerSettings, GameController};
use primus::deck::{Card, CardEffect, Color, DeckCatalog, Value};
use primus::game::{GameEnd, GameManager, GameState, SeatSummary};
use primus::player::TurnAction;
use primus::view::{GameView, RecordingView, ViewEvent};
use primus::GameOutcome;

const TURN_LIMIT: u32 = 3000;

fn table(seed: u64, seats: &[SeatKind]) -> Config {
    Config {
        seed: Some(seed),
        bot_delay_ms: 0,
        max_turns: TURN_LIMIT,
        seats: seats.iter().map(|k| SeatConfig::new(*k)).collect(),
        ..Config::default()
    }
}

fn controller(config: Config) -> GameController {
    let settings = ControllerSettings::from(&config);
    let manager = GameManager::new(config, &DeckCatalog::standard().unwrap()).unwrap();
    GameController::new(manager, settings)
}

fn wild() -> Card {
    Card::with_effects(
        Color::Black,
        Value::Wild,
        0,
        [CardEffect::ChangeColor, CardEffect::AlwaysPlayable],
    )
}

/// Stands in for a person: answers every prompt from a script, then stops
struct ScriptedHuman {
    handle: ControllerHandle,
    script: Vec<TurnAction>,
    repeat_last: bool,
}

impl ScriptedHuman {
    fn always(handle: ControllerHandle, action: TurnAction) -> Self {
        Self {
            handle,
            script: vec![action],
            repeat_last: true,
        }
    }

    fn once(handle: ControllerHandle, action: TurnAction) -> Self {
        Self {
            handle,
            script: vec![action],
            repeat_last: false,
        }
    }
}

impl GameView for ScriptedHuman {
    fn update_view(&mut self, _state: &GameState) {}
    fn show_current_player(&mut self, _seat: &SeatSummary) {}
    fn show_message(&mut self, _message: &str) {}
    fn show_error(&mut self, _message: &str) {}
    fn show_outcome(&mut self, _outcome: &GameOutcome) {}

    fn request_human_move(&mut self, _state: &GameState) {
        match self.script.first().cloned() {
            Some(action) => {
                if !self.repeat_last {
                    self.script.remove(0);
                }
                match action {
                    TurnAction::Draw => self.handle.human_drew_card(),
                    TurnAction::Play { card, color } => self.handle.human_played_card(card, color),
                }
            }
            None => self.handle.stop(),
        }
    }
}

mod controller_tests {
    use super::*;

    #[tokio::test]
    async fn test_bot_game_runs_to_an_end() {
        let mut controller = controller(table(
            21,
            &[SeatKind::Fortuitus, SeatKind::Implacabilis, SeatKind::Fallax],
        ));
        let recorder = RecordingView::new();
        controller.add_view(Box::new(recorder.clone()));

        let outcome = controller.start().await.unwrap();

        assert_ne!(outcome.end, GameEnd::Stopped);
        if outcome.end == GameEnd::Finished {
            let winner = outcome.winner.unwrap();
            assert!(outcome.scores.contains(&(winner, 0)));
        } else {
            assert_eq!(outcome.turns, TURN_LIMIT);
        }

        assert!(!recorder.messages().is_empty());
        assert!(recorder.errors().is_empty());
        assert!(matches!(
            recorder.events().last(),
            Some(ViewEvent::Outcome { .. })
        ));
    }

    #[tokio::test]
    async fn test_human_moves_arrive_through_the_handle() {
        let mut controller = controller(table(22, &[SeatKind::Human, SeatKind::Implacabilis]));
        let recorder = RecordingView::new();
        let handle = controller.handle();
        controller.add_view(Box::new(recorder.clone()));
        controller.add_view(Box::new(ScriptedHuman::always(handle, TurnAction::Draw)));

        let outcome = controller.start().await.unwrap();

        // drawing forever never wins
        assert_ne!(outcome.winner, Some(1));
        assert_ne!(outcome.end, GameEnd::Stopped);

        let requested = recorder
            .events()
            .iter()
            .filter(|e| matches!(e, ViewEvent::MoveRequested { player: 1 }))
            .count();
        assert!(requested > 0);
        assert!(recorder.messages().iter().any(|m| m.starts_with("Player ")));
    }

    #[tokio::test]
    async fn test_invalid_human_move_is_reported_and_requested_again() {
        let mut controller = controller(table(23, &[SeatKind::Human, SeatKind::Fortuitus]));
        let recorder = RecordingView::new();
        let handle = controller.handle();
        controller.add_view(Box::new(recorder.clone()));

        // a black declaration is refused whether or not the wild is held
        let illegal = TurnAction::Play {
            card: wild(),
            color: Some(Color::Black),
        };
        controller.add_view(Box::new(ScriptedHuman::once(handle, illegal)));

        let outcome = controller.start().await.unwrap();

        assert_eq!(outcome.end, GameEnd::Stopped);
        assert_eq!(outcome.turns, 0);
        assert_eq!(recorder.errors().len(), 1);
        assert!(recorder.errors()[0].starts_with("Invalid move"));

        let requested = recorder
            .events()
            .iter()
            .filter(|e| matches!(e, ViewEvent::MoveRequested { .. }))
            .count();
        assert_eq!(requested, 2);
    }

    #[tokio::test]
    async fn test_stop_before_start() {
        let mut controller = controller(table(24, &[SeatKind::Human, SeatKind::Fallax]));
        let recorder = RecordingView::new();
        controller.add_view(Box::new(recorder.clone()));
        controller.handle().stop();

        let outcome = controller.start().await.unwrap();

        assert_eq!(outcome.end, GameEnd::Stopped);
        assert_eq!(outcome.turns, 0);
        assert!(outcome.winner.is_none());
    }

    #[tokio::test]
    async fn test_turn_limit_ends_the_game() {
        let mut config = table(25, &[SeatKind::Fortuitus, SeatKind::Fortuitus]);
        config.max_turns = 3;
        let mut controller = controller(config);

        let outcome = controller.start().await.unwrap();

        assert_eq!(outcome.end, GameEnd::TurnLimit);
        assert_eq!(outcome.turns, 3);
        assert_eq!(controller.manager().turns(), 3);
    }

    #[tokio::test]
    async fn test_bot_delay_is_honoured() {
        let config = table(26, &[SeatKind::Fortuitus, SeatKind::Implacabilis]);
        let manager = GameManager::new(config, &DeckCatalog::standard().unwrap()).unwrap();
        let mut controller = GameController::new(
            manager,
            ControllerSettings {
                bot_delay: Duration::from_millis(5),
                max_turns: 4,
            },
        );

        let started = std::time::Instant::now();
        let outcome = controller.start().await.unwrap();

        assert_eq!(outcome.turns, 4);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}

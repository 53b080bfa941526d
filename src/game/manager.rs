//! @acp:module "Game Manager"
//! @acp:summary "Owns the table and applies moves according to the rules"
//! @acp:domain game
//! @acp:layer service
//!
//! The manager is synchronous and knows nothing about timing or input; the
//! controller and the simulator both drive it.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::scheduler::Scheduler;
use super::state::{GameEnd, GameOutcome, GameState, PlayerSetupData, SeatSummary, TurnReport};
use super::PlayerId;
use crate::config::{Config, SeatKind};
use crate::deck::{Card, CardEffect, Color, Deck, DeckCatalog, DropPile};
use crate::error::{PrimusError, Result};
use crate::player::{BotFactory, HumanPlayer, OpponentView, Player, TurnAction, TurnContext};
use crate::rules::{MoveRejection, Sanctioner, Validator};

/// Proposals a bot gets per turn before it is made to draw
const MAX_BOT_ATTEMPTS: usize = 5;

/// @acp:summary "Game flow: deal, validate, apply effects, detect the winner"
pub struct GameManager {
    config: Config,
    template: Vec<Card>,
    seed: u64,
    round: u64,
    game_id: Uuid,
    players: HashMap<PlayerId, Box<dyn Player>>,
    deck: Deck,
    drop_pile: DropPile,
    scheduler: Scheduler,
    sanctioner: Sanctioner,
    validator: Validator,
    turns: u32,
    started: bool,
}

impl GameManager {
    /// Validate `config` against `catalog` and deal the first game
    pub fn new(config: Config, catalog: &DeckCatalog) -> Result<Self> {
        config.validate(catalog.size())?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let template = catalog.cards();

        let mut deck = Deck::new(template.clone(), seed);
        let start = deck.draw_card()?;
        let seats: Vec<PlayerId> = (0..config.seats.len()).map(Config::seat_id).collect();

        let mut manager = Self {
            config,
            template,
            seed,
            round: 0,
            game_id: Uuid::new_v4(),
            players: HashMap::new(),
            deck,
            drop_pile: DropPile::new(start),
            scheduler: Scheduler::new(seats)?,
            sanctioner: Sanctioner::new(),
            validator: Validator::new(),
            turns: 0,
            started: false,
        };
        manager.init()?;
        Ok(manager)
    }

    /// Start a fresh game at the same table: new shuffle, new hands, same seats
    pub fn init(&mut self) -> Result<()> {
        let shuffle_seed = self.seed.wrapping_add(self.round);
        self.round += 1;

        self.deck = Deck::new(self.template.clone(), shuffle_seed);
        self.sanctioner.reset();
        self.players = self.build_players(shuffle_seed);
        self.scheduler = Scheduler::new(self.players_in_order())?;
        self.game_id = Uuid::new_v4();
        self.turns = 0;
        self.started = false;

        for id in self.players_in_order() {
            let dealt = self.deal(id, self.config.hand_size);
            if dealt < self.config.hand_size {
                return Err(PrimusError::InvalidDeck(format!(
                    "only {} of {} cards could be dealt to player {}",
                    dealt, self.config.hand_size, id
                )));
            }
        }

        let start = self.deck.draw_card()?;
        tracing::info!(game = %self.game_id, "New game, start card {}", start);
        self.drop_pile = DropPile::new(start);

        Ok(())
    }

    fn players_in_order(&self) -> Vec<PlayerId> {
        (0..self.config.seats.len()).map(Config::seat_id).collect()
    }

    fn build_players(&self, seed: u64) -> HashMap<PlayerId, Box<dyn Player>> {
        let factory = BotFactory::new(seed);
        self.config
            .seats
            .iter()
            .enumerate()
            .map(|(index, seat)| {
                let id = Config::seat_id(index);
                let label = seat.label();
                let player: Box<dyn Player> = match seat.kind {
                    SeatKind::Human => Box::new(HumanPlayer::new(id, label)),
                    SeatKind::Fortuitus => Box::new(factory.create_fortuitus(id).with_label(label)),
                    SeatKind::Implacabilis => {
                        Box::new(factory.create_implacabilis(id).with_label(label))
                    }
                    SeatKind::Fallax => {
                        let victim = self.config.fallax_victim(index);
                        Box::new(factory.create_fallax(id, victim).with_label(label))
                    }
                };
                (id, player)
            })
            .collect()
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accepted moves so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn top_card(&self) -> &Card {
        self.drop_pile.peek()
    }

    pub fn malus(&self) -> u32 {
        self.sanctioner.malus_amount()
    }

    pub fn current_player(&self) -> PlayerId {
        self.scheduler.current_player()
    }

    pub fn player(&self, id: PlayerId) -> Option<&dyn Player> {
        self.players.get(&id).map(|p| p.as_ref())
    }

    pub fn is_bot(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.is_bot())
    }

    /// Snapshot of the table from the active seat's point of view
    pub fn game_state(&self) -> GameState {
        let active = self.scheduler.current_player();
        GameState {
            top_card: self.drop_pile.peek().clone(),
            active_hand: self
                .player(active)
                .map(|p| p.hand().cards().to_vec())
                .unwrap_or_default(),
            active_player: active,
            malus: self.sanctioner.malus_amount(),
            seats: self
                .scheduler
                .seats()
                .iter()
                .filter_map(|id| self.player(*id))
                .map(|p| SeatSummary {
                    id: p.id(),
                    label: p.label().to_string(),
                    is_bot: p.is_bot(),
                    cards: p.hand().len(),
                })
                .collect(),
            draw_pile: self.deck.size(),
            clockwise: self.scheduler.is_clockwise(),
        }
    }

    pub fn game_setup(&self) -> Vec<PlayerSetupData> {
        self.scheduler
            .seats()
            .iter()
            .filter_map(|id| self.player(*id))
            .map(|p| PlayerSetupData {
                id: p.id(),
                label: p.label().to_string(),
                is_human: !p.is_bot(),
            })
            .collect()
    }

    /// Advance the turn order and return the next player
    pub fn next_player(&mut self) -> PlayerId {
        self.scheduler.next_player()
    }

    /// Seat to move now: the opening seat on the first call, the next one afterwards
    pub fn advance_turn(&mut self) -> PlayerId {
        if self.started {
            self.next_player()
        } else {
            self.started = true;
            self.scheduler.current_player()
        }
    }

    /// First seat, in turn order, that has emptied its hand
    pub fn winner(&self) -> Option<PlayerId> {
        self.scheduler
            .seats()
            .iter()
            .copied()
            .find(|id| self.player(*id).is_some_and(|p| p.hand().is_empty()))
    }

    /// What `id` may know when deciding
    pub fn turn_context(&self, id: PlayerId) -> TurnContext {
        TurnContext {
            top_card: self.drop_pile.peek().clone(),
            malus: self.sanctioner.malus_amount(),
            opponents: self
                .scheduler
                .seats()
                .iter()
                .filter(|other| **other != id)
                .filter_map(|other| self.player(*other))
                .map(|p| OpponentView {
                    id: p.id(),
                    cards: p.hand().cards().to_vec(),
                })
                .collect(),
        }
    }

    /// @acp:summary "Apply one move for the active seat"
    ///
    /// Under a pending penalty, `Draw` takes it and a play must be a defense.
    /// A rejected move leaves the table untouched.
    pub fn execute_turn(
        &mut self,
        id: PlayerId,
        action: TurnAction,
    ) -> std::result::Result<TurnReport, MoveRejection> {
        if self.winner().is_some() {
            return Err(MoveRejection::GameOver);
        }
        if !self.players.contains_key(&id) {
            return Err(MoveRejection::UnknownPlayer(id));
        }
        let expected = self.scheduler.current_player();
        if id != expected {
            return Err(MoveRejection::NotYourTurn {
                expected,
                actual: id,
            });
        }

        let report = match action {
            TurnAction::Draw if self.sanctioner.is_active() => {
                let malus = self.sanctioner.malus_amount();
                let count = self.deal(id, malus as usize);
                self.sanctioner.reset();
                TurnReport::TookPenalty { malus, count }
            }
            TurnAction::Draw => TurnReport::Drew {
                count: self.deal(id, 1),
            },
            TurnAction::Play { card, color } => self.play_card(id, card, color)?,
        };

        self.turns += 1;
        self.started = true;
        tracing::debug!(player = id, turn = self.turns, "{:?}", report);
        Ok(report)
    }

    fn play_card(
        &mut self,
        id: PlayerId,
        card: Card,
        color: Option<Color>,
    ) -> std::result::Result<TurnReport, MoveRejection> {
        let top = self.drop_pile.peek().clone();
        let malus = self.sanctioner.malus_amount();
        let player = self
            .players
            .get_mut(&id)
            .ok_or(MoveRejection::UnknownPlayer(id))?;

        let checked = if !player.hand().contains(&card) {
            Err(MoveRejection::CardNotInHand(card.clone()))
        } else if malus > 0 && !self.validator.is_valid_defense(&top, &card) {
            Err(MoveRejection::IllegalDefense {
                card: card.clone(),
                malus,
            })
        } else if malus == 0 && !self.validator.is_valid_card(&top, &card) {
            Err(MoveRejection::IllegalCard {
                card: card.clone(),
                top,
            })
        } else if card.has_effect(CardEffect::ChangeColor) {
            match color {
                None => Err(MoveRejection::MissingColor(card.clone())),
                Some(Color::Black) => Err(MoveRejection::InvalidColor),
                Some(declared) => Ok(card.with_color(declared)),
            }
        } else {
            Ok(card.clone())
        };

        let placed = match checked {
            Ok(placed) => placed,
            Err(rejection) => {
                player.notify_move_result(&card, false);
                return Err(rejection);
            }
        };

        player.hand_mut().remove(&card);
        player.notify_move_result(&card, true);

        self.drop_pile.add_card(placed.clone());
        self.apply_card_effects(&placed);
        self.sanctioner.accumulate(&placed);

        Ok(if malus > 0 {
            TurnReport::Defended {
                card: placed,
                malus,
            }
        } else {
            TurnReport::Played { card: placed }
        })
    }

    /// Turn-order effects. A card that makes the next seat draw does not also skip
    /// it: taking the penalty already uses up that seat's turn.
    fn apply_card_effects(&mut self, card: &Card) {
        if card.has_effect(CardEffect::ReverseTurn) {
            self.scheduler.reverse_direction();
        }
        if card.has_effect(CardEffect::SkipNext) && card.draw_amount() == 0 {
            self.scheduler.skip_turn();
        }
    }

    /// Let the active bot move, falling back to a draw after repeated rejections
    pub fn play_bot_turn(&mut self) -> Result<TurnReport> {
        let id = self.scheduler.current_player();

        for attempt in 1..=MAX_BOT_ATTEMPTS {
            let ctx = self.turn_context(id);
            let player = self
                .players
                .get_mut(&id)
                .ok_or(MoveRejection::UnknownPlayer(id))?;
            let action = player.decide(&ctx).unwrap_or(TurnAction::Draw);

            match self.execute_turn(id, action) {
                Ok(report) => return Ok(report),
                Err(rejection) => {
                    tracing::debug!(player = id, attempt, "Bot move rejected: {}", rejection)
                }
            }
        }

        tracing::warn!(player = id, "Bot kept proposing illegal moves, forcing a draw");
        if let Some(player) = self.players.get_mut(&id) {
            player.reset_turn();
        }
        Ok(self.execute_turn(id, TurnAction::Draw)?)
    }

    /// Draw up to `count` cards for `id`; returns how many were actually drawn
    fn deal(&mut self, id: PlayerId, count: usize) -> usize {
        let cards: Vec<Card> = (0..count).map_while(|_| self.draw_deck_card()).collect();
        let drawn = cards.len();
        if let Some(player) = self.players.get_mut(&id) {
            player.add_cards(cards);
        }
        drawn
    }

    /// Take the top deck card, recycling the drop pile when the deck is empty
    fn draw_deck_card(&mut self) -> Option<Card> {
        if self.deck.is_empty() {
            self.deck.refill_from(&mut self.drop_pile);
        }
        match self.deck.draw_card() {
            Ok(card) => Some(card),
            Err(_) => {
                tracing::warn!("No cards left to draw");
                None
            }
        }
    }

    /// Final record; scores are the points left in each hand
    pub fn outcome(&self, end: GameEnd) -> GameOutcome {
        GameOutcome {
            game_id: self.game_id,
            winner: self.winner(),
            turns: self.turns,
            end,
            scores: self
                .scheduler
                .seats()
                .iter()
                .filter_map(|id| self.player(*id))
                .map(|p| (p.id(), p.hand().points()))
                .collect(),
            finished_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for GameManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameManager")
            .field("game_id", &self.game_id)
            .field("seed", &self.seed)
            .field("turns", &self.turns)
            .field("top", self.drop_pile.peek())
            .field("malus", &self.sanctioner.malus_amount())
            .finish()
    }
}

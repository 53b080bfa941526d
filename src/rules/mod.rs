//! @acp:module "Rules"
//! @acp:summary "Move validation, penalties and rejection reasons"
//! @acp:domain game
//! @acp:layer service

pub mod sanctioner;
pub mod validator;

pub use sanctioner::Sanctioner;
pub use validator::Validator;

use thiserror::Error;

use crate::deck::Card;
use crate::game::PlayerId;

/// Why a move was refused. The game state is unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("it is player {expected}'s turn, not player {actual}'s")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{0} is not in the player's hand")]
    CardNotInHand(Card),

    #[error("{card} cannot be played on {top}")]
    IllegalCard { card: Card, top: Card },

    #[error("{card} does not answer the pending penalty of {malus}")]
    IllegalDefense { card: Card, malus: u32 },

    #[error("{0} needs a declared color")]
    MissingColor(Card),

    #[error("black is not a declarable color")]
    InvalidColor,

    #[error("the game is already over")]
    GameOver,
}

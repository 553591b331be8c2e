//! Errors reported by the engine and the notation codecs

use crate::types::{Color, Coord, CoordError, CoordParseError, GameResult};

use thiserror::Error;

/// Move cannot be created, matched or executed
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// Source square is empty
    #[error("no piece on source square {0}")]
    EmptySource(Coord),
    /// Source and destination squares coincide
    #[error("destination {0} equals source")]
    SameSquare(Coord),
    /// Promotion piece was not chosen before execution
    #[error("promotion piece is not chosen")]
    UnresolvedPromotion,
    /// Promotion piece was given for a move which is not a promotion
    #[error("move is not a promotion")]
    NotPromotion,
    /// Move is not legal in the current position
    #[error("move {0} is not legal")]
    NotLegal(String),
    /// Board contents don't agree with the move being applied or reverted
    #[error("move {0} does not fit the board")]
    Mismatch(String),
    /// Notation cannot be parsed
    #[error("bad notation {0:?}")]
    Syntax(String),
    /// Notation is well-formed, but no legal move matches it
    #[error("no legal move matches notation {0:?}")]
    NoMatch(String),
}

/// Coordinate or piece lookup is out of range
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RangeError {
    #[error("{0}")]
    Coord(#[from] CoordError),
    #[error("bad square: {0}")]
    Notation(#[from] CoordParseError),
    /// The board has no king of the given color
    #[error("no king of color {0:?}")]
    NoKing(Color),
}

/// Operation is not allowed in the current game state
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum GameStateError {
    #[error("cannot undo move from starting position")]
    EmptyLog,
    #[error("no draw request is outstanding")]
    NoDrawOffer,
    #[error("{0:?} cannot accept its own draw request")]
    SelfAccept(Color),
    #[error("game is already over: {0}")]
    GameOver(GameResult),
    /// Side which is not to move is in check, so the position cannot be played
    #[error("opponent's king is attacked")]
    OpponentKingAttacked,
    /// More than one king of the given color
    #[error("too many kings of color {0:?}")]
    TooManyKings(Color),
    /// More than 16 pieces of the given color
    #[error("too many pieces of color {0:?}")]
    TooManyPieces(Color),
}

/// Any error produced by the engine
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum Error {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),
    #[error("out of range: {0}")]
    OutOfRange(#[from] RangeError),
    #[error("{0}")]
    GameState(#[from] GameStateError),
    #[error("it is not {}'s turn", .0.name())]
    WrongTurn(Color),
}

impl From<CoordError> for Error {
    fn from(e: CoordError) -> Self {
        Error::OutOfRange(e.into())
    }
}

impl From<CoordParseError> for Error {
    fn from(e: CoordParseError) -> Self {
        Error::OutOfRange(e.into())
    }
}

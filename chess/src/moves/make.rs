//! Ways to describe a move for [`Engine::make()`]

use super::base::Move;
use super::{san, uci};
use crate::engine::Engine;
use crate::error::{Error, MoveError};

use std::str::FromStr;

/// Something which can be turned into a legal move of the engine
pub trait Make {
    /// Finds the move in the current position of `engine`
    ///
    /// The returned move is ready to be passed into [`Engine::execute()`].
    fn find(&self, engine: &Engine) -> Result<Move, Error>;
}

impl Make for Move {
    #[inline]
    fn find(&self, _engine: &Engine) -> Result<Move, Error> {
        Ok(*self)
    }
}

/// Move in coordinate notation, like `e2e4` or `e2 e4`
pub struct Uci<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> Make for Uci<S> {
    fn find(&self, engine: &Engine) -> Result<Move, Error> {
        let parsed = uci::Move::from_str(self.0.as_ref()).map_err(MoveError::from)?;
        Ok(parsed.into_move(engine)?)
    }
}

/// Move in SAN, like `Nf3` or `exd8=Q#`
pub struct San<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> Make for San<S> {
    fn find(&self, engine: &Engine) -> Result<Move, Error> {
        Ok(san::decode(engine, self.0.as_ref())?)
    }
}

/// Move typed by a human, either in coordinate notation or in SAN
///
/// Coordinate notation is tried first.
pub struct Text<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> Make for Text<S> {
    fn find(&self, engine: &Engine) -> Result<Move, Error> {
        let s = self.0.as_ref().trim();
        match uci::Move::from_str(s) {
            Ok(parsed) => Ok(parsed.into_move(engine)?),
            Err(_) => San(s).find(engine),
        }
    }
}

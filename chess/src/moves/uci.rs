//! Utilities to work with moves in coordinate notation, like `e2e4` or `e7e8q`

use super::base;
use crate::engine::Engine;
use crate::error::MoveError;
use crate::types::{Coord, CoordParseError, PromotePiece};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a move in coordinate notation
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
    /// Bad promote character
    #[error("bad promote char {0:?}")]
    BadPromote(char),
}

impl From<RawParseError> for MoveError {
    fn from(e: RawParseError) -> Self {
        MoveError::Syntax(e.to_string())
    }
}

/// Parsed move in coordinate notation
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// Source square
    pub src: Coord,
    /// Destination square
    pub dst: Coord,
    /// Piece to promote, if any
    pub promote: Option<PromotePiece>,
}

impl Move {
    /// Finds the legal move of `engine` described by this parsed move
    ///
    /// The promotion piece must be given exactly for promotion moves. If the move is a
    /// promotion and no piece is given, the error is [`MoveError::UnresolvedPromotion`].
    pub fn into_move(self, engine: &Engine) -> Result<base::Move, MoveError> {
        let legal = engine.legal_moves();
        let mut candidates = legal
            .iter()
            .filter(|mv| mv.src() == self.src && mv.dst() == self.dst)
            .peekable();
        let first = match candidates.peek() {
            Some(mv) => **mv,
            None => return Err(MoveError::NotLegal(self.to_string())),
        };
        match (first.promotion(), self.promote) {
            (None, None) => Ok(first),
            (None, Some(_)) => Err(MoveError::NotPromotion),
            (Some(_), None) => Err(MoveError::UnresolvedPromotion),
            (Some(_), Some(piece)) => candidates
                .find(|mv| mv.promotion().map(|p| p.piece()) == Some(piece))
                .map(|mv| mv.resolved())
                .ok_or_else(|| MoveError::NotLegal(self.to_string())),
        }
    }
}

impl From<base::Move> for Move {
    #[inline]
    fn from(mv: base::Move) -> Move {
        mv.uci()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = RawParseError;

    /// Parses `<src><dst>[promote]`, where source and destination may be separated by
    /// whitespace, like `e2 e4`
    fn from_str(s: &str) -> Result<Move, Self::Err> {
        let s: String = s.split_ascii_whitespace().collect();
        if !s.is_ascii() || !matches!(s.len(), 4 | 5) {
            return Err(RawParseError::BadLength);
        }
        let src = Coord::from_str(&s[0..2]).map_err(RawParseError::BadSrc)?;
        let dst = Coord::from_str(&s[2..4]).map_err(RawParseError::BadDst)?;
        let promote = match s.as_bytes().get(4) {
            Some(&b) => Some(
                PromotePiece::from_char(b as char).ok_or(RawParseError::BadPromote(b as char))?,
            ),
            None => None,
        };
        Ok(Move { src, dst, promote })
    }
}

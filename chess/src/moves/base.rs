use super::uci;
use crate::board::Board;
use crate::error::MoveError;
use crate::geometry;
use crate::types::{CastlingSide, Chessman, Color, Coord, Piece, PromotePiece};

use std::fmt;

/// Promotion choice carried by a pawn move to the last rank
///
/// The move generator yields one candidate per target piece, all of them [`Promotion::Pending`].
/// The caller commits one via [`Move::resolve()`] or [`Move::resolved()`] before the move can
/// be executed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Promotion {
    /// Candidate piece, not yet chosen by the caller
    Pending(PromotePiece),
    /// Piece chosen by the caller
    Chosen(PromotePiece),
}

impl Promotion {
    #[inline]
    pub fn piece(&self) -> PromotePiece {
        match *self {
            Self::Pending(p) | Self::Chosen(p) => p,
        }
    }

    #[inline]
    pub fn is_chosen(&self) -> bool {
        matches!(self, Self::Chosen(_))
    }
}

/// Special-move data of a [`Move`]
///
/// The variants are mutually exclusive.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Special {
    /// Plain move or capture
    #[default]
    None,
    /// En passant capture
    Enpassant {
        /// Square of the captured pawn, which differs from the destination square
        taken: Coord,
    },
    /// Pawn promotion
    Promote(Promotion),
    /// Castling; the move itself describes the king, the rook follows it
    Castling(CastlingSide),
}

/// Chess move
///
/// Besides source and destination, a move keeps snapshots of the moving piece (with its
/// pre-move moved-flag) and of the captured piece. They make the move self-contained, so
/// [`unmake_move()`] restores the board exactly without looking at any other state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    src: Coord,
    dst: Coord,
    man: Chessman,
    captured: Option<Chessman>,
    special: Special,
}

impl Move {
    /// Creates a move of the piece standing on `src` in board `b`
    ///
    /// Special-move data is derived from the geometry: a king stepping two files is castling,
    /// a pawn moving diagonally to an empty square is en passant, and a pawn reaching the last
    /// rank is a promotion that is still [pending](Promotion::Pending). Whether the move is
    /// legal is not checked here.
    pub fn new(b: &Board, src: Coord, dst: Coord) -> Result<Move, MoveError> {
        let man = b.get(src).ok_or(MoveError::EmptySource(src))?;
        if src == dst {
            return Err(MoveError::SameSquare(src));
        }
        let mut captured = b.get(dst);
        let mut special = Special::None;
        match man.piece {
            Piece::King if src.row() == dst.row() && src.col().abs_diff(dst.col()) == 2 => {
                special = Special::Castling(if dst.col() > src.col() {
                    CastlingSide::King
                } else {
                    CastlingSide::Queen
                });
            }
            Piece::Pawn => {
                if dst.rank() == geometry::promote_dst_rank(man.color) {
                    special = Special::Promote(Promotion::Pending(PromotePiece::Queen));
                } else if src.col() != dst.col() && captured.is_none() {
                    let taken = Coord::from_parts(dst.file(), src.rank());
                    captured = b.get(taken);
                    special = Special::Enpassant { taken };
                }
            }
            _ => {}
        }
        Ok(Move::from_parts(src, dst, man, captured, special))
    }

    #[inline]
    pub(crate) const fn from_parts(
        src: Coord,
        dst: Coord,
        man: Chessman,
        captured: Option<Chessman>,
        special: Special,
    ) -> Move {
        Move {
            src,
            dst,
            man,
            captured,
            special,
        }
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Returns the snapshot of the moving piece, taken before the move
    #[inline]
    pub const fn man(&self) -> Chessman {
        self.man
    }

    #[inline]
    pub const fn piece(&self) -> Piece {
        self.man.piece
    }

    #[inline]
    pub const fn side(&self) -> Color {
        self.man.color
    }

    /// Returns the moved-flag of the moving piece before the move
    #[inline]
    pub const fn was_moved(&self) -> bool {
        self.man.moved
    }

    #[inline]
    pub const fn captured(&self) -> Option<Chessman> {
        self.captured
    }

    #[inline]
    pub const fn special(&self) -> Special {
        self.special
    }

    /// Returns `true` if the move captures something, including en passant
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_enpassant(&self) -> bool {
        matches!(self.special, Special::Enpassant { .. })
    }

    #[inline]
    pub fn castling(&self) -> Option<CastlingSide> {
        match self.special {
            Special::Castling(side) => Some(side),
            _ => None,
        }
    }

    #[inline]
    pub fn promotion(&self) -> Option<Promotion> {
        match self.special {
            Special::Promote(p) => Some(p),
            _ => None,
        }
    }

    /// Returns `false` only for promotions whose piece is not chosen yet
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.promotion().map_or(true, |p| p.is_chosen())
    }

    /// Chooses `piece` as the promotion target
    pub fn resolve(self, piece: PromotePiece) -> Result<Move, MoveError> {
        match self.special {
            Special::Promote(_) => Ok(Move {
                special: Special::Promote(Promotion::Chosen(piece)),
                ..self
            }),
            _ => Err(MoveError::NotPromotion),
        }
    }

    /// Commits the candidate promotion piece as the chosen one
    ///
    /// Moves other than pending promotions are returned unchanged.
    pub fn resolved(self) -> Move {
        match self.special {
            Special::Promote(Promotion::Pending(p)) => Move {
                special: Special::Promote(Promotion::Chosen(p)),
                ..self
            },
            _ => self,
        }
    }

    /// Returns the piece which stands on the destination square after the move
    pub fn landed(&self) -> Chessman {
        let man = match self.special {
            Special::Promote(p) => Chessman::new(self.man.color, p.piece().into()),
            _ => self.man,
        };
        man.with_moved(true)
    }

    /// Converts the move into coordinate notation
    #[inline]
    pub fn uci(&self) -> uci::Move {
        uci::Move {
            src: self.src,
            dst: self.dst,
            promote: self.promotion().map(|p| p.piece()),
        }
    }

    /// Applies the move to a copy of `b` and returns the copy
    ///
    /// Checks are not considered, so the mover's king may remain attacked.
    pub fn make(&self, b: &Board) -> Result<Board, MoveError> {
        let mut res = *b;
        make_move(&mut res, self)?;
        Ok(res)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt::Display::fmt(&self.uci(), f)
    }
}

fn castling_rook(side: CastlingSide, king_src: Coord) -> (Coord, Coord) {
    let rank = king_src.rank();
    (
        Coord::from_parts(geometry::castling_rook_src(side), rank),
        Coord::from_parts(geometry::castling_rook_dst(side), rank),
    )
}

/// Applies the move `mv` to the board `b`
///
/// The board is left untouched if it doesn't hold what the move expects to find, or if the
/// move is a promotion with no piece chosen yet.
pub fn make_move(b: &mut Board, mv: &Move) -> Result<(), MoveError> {
    let mismatch = || MoveError::Mismatch(mv.to_string());

    if !mv.is_resolved() {
        return Err(MoveError::UnresolvedPromotion);
    }
    if b.get(mv.src) != Some(mv.man) {
        return Err(mismatch());
    }

    match mv.special {
        Special::Enpassant { taken } => {
            if b.get(mv.dst).is_some() || b.get(taken) != mv.captured {
                return Err(mismatch());
            }
            b.clear(taken);
        }
        Special::Castling(side) => {
            let (rook_src, rook_dst) = castling_rook(side, mv.src);
            let rook = b
                .get(rook_src)
                .filter(|r| r.is(mv.man.color, Piece::Rook))
                .ok_or_else(mismatch)?;
            if b.get(mv.dst).is_some() || b.get(rook_dst).is_some() {
                return Err(mismatch());
            }
            b.clear(rook_src);
            b.put(rook_dst, rook.with_moved(true));
        }
        Special::None | Special::Promote(_) => {
            if b.get(mv.dst) != mv.captured {
                return Err(mismatch());
            }
        }
    }

    b.clear(mv.src);
    b.put(mv.dst, mv.landed());
    Ok(())
}

/// Reverts the move `mv` previously applied to the board `b` via [`make_move()`]
pub fn unmake_move(b: &mut Board, mv: &Move) -> Result<(), MoveError> {
    let mismatch = || MoveError::Mismatch(mv.to_string());

    if b.get(mv.dst) != Some(mv.landed()) || b.get(mv.src).is_some() {
        return Err(mismatch());
    }

    match mv.special {
        Special::Enpassant { taken } => {
            if b.get(taken).is_some() {
                return Err(mismatch());
            }
            b.clear(mv.dst);
            b.set(taken, mv.captured);
        }
        Special::Castling(side) => {
            let (rook_src, rook_dst) = castling_rook(side, mv.src);
            let rook = b
                .get(rook_dst)
                .filter(|r| r.is(mv.man.color, Piece::Rook))
                .ok_or_else(mismatch)?;
            if b.get(rook_src).is_some() {
                return Err(mismatch());
            }
            b.clear(rook_dst);
            // Castling is only possible with a rook that has never moved
            b.put(rook_src, rook.with_moved(false));
            b.clear(mv.dst);
        }
        Special::None | Special::Promote(_) => b.set(mv.dst, mv.captured),
    }

    b.put(mv.src, mv.man);
    Ok(())
}

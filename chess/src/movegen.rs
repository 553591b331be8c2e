//! Pseudo-legal move generation and attack detection
//!
//! Moves generated here obey the piece geometry and the board occupancy, but may still leave
//! the mover's king attacked. See [`legal`](crate::legal) for the legality filter.

use crate::board::Board;
use crate::error::RangeError;
use crate::geometry;
use crate::moves::{Move, Promotion, Special};
use crate::rules::{self, PawnReach, Reach};
use crate::types::{CastlingSide, Chessman, Color, Coord, Piece, PromotePiece};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;
use log::warn;

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, 256>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        if self.0.try_push(m).is_err() {
            warn!("move list is full, dropping move {}", m);
        }
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        Vec::push(self, m);
    }
}

/// Returns `true` if the move `last` opens the en passant window for a pawn on `src`
/// capturing towards `dst`
fn is_enpassant_window(last: Option<&Move>, src: Coord, dst: Coord) -> bool {
    match last {
        Some(last) => {
            last.piece() == Piece::Pawn
                && last.src().row().abs_diff(last.dst().row()) == 2
                && last.dst().row() == src.row()
                && last.dst().col() == dst.col()
        }
        None => false,
    }
}

fn push_pawn(
    man: Chessman,
    src: Coord,
    dst: Coord,
    captured: Option<Chessman>,
    moves: &mut impl MovePush,
) {
    if dst.rank() == geometry::promote_dst_rank(man.color) {
        for p in PromotePiece::ALL {
            let special = Special::Promote(Promotion::Pending(p));
            moves.push(Move::from_parts(src, dst, man, captured, special));
        }
        return;
    }
    moves.push(Move::from_parts(src, dst, man, captured, Special::None));
}

fn gen_pawn(
    b: &Board,
    man: Chessman,
    src: Coord,
    reach: PawnReach,
    last: Option<&Move>,
    moves: &mut impl MovePush,
) {
    for dst in reach.advance {
        if b.get(dst).is_some() {
            break;
        }
        push_pawn(man, src, dst, None, moves);
    }

    for dst in reach.captures {
        match b.get(dst) {
            Some(victim) => {
                if victim.color != man.color {
                    push_pawn(man, src, dst, Some(victim), moves);
                }
            }
            None => {
                if !is_enpassant_window(last, src, dst) {
                    continue;
                }
                let taken = Coord::from_parts(dst.file(), src.rank());
                if let Some(victim) = b.get(taken).filter(|v| v.color != man.color) {
                    let special = Special::Enpassant { taken };
                    moves.push(Move::from_parts(src, dst, man, Some(victim), special));
                }
            }
        }
    }
}

fn gen_castling(b: &Board, man: Chessman, src: Coord, moves: &mut impl MovePush) {
    if man.moved {
        return;
    }
    for side in [CastlingSide::King, CastlingSide::Queen] {
        let rook_src = Coord::from_parts(geometry::castling_rook_src(side), src.rank());
        match b.get(rook_src) {
            Some(rook) if rook.is(man.color, Piece::Rook) && !rook.moved => {}
            _ => continue,
        }
        let (lo, hi) = if src.col() < rook_src.col() {
            (src.col() + 1, rook_src.col())
        } else {
            (rook_src.col() + 1, src.col())
        };
        let row = src.row() as isize;
        let path_clear = (lo..hi).all(|col| matches!(b.at(row, col as isize), Ok(None)));
        if !path_clear {
            continue;
        }
        if let Some(dst) = src.try_shift(0, geometry::castling_king_delta(side)) {
            moves.push(Move::from_parts(src, dst, man, None, Special::Castling(side)));
        }
    }
}

fn gen_piece(
    b: &Board,
    man: Chessman,
    src: Coord,
    last: Option<&Move>,
    moves: &mut impl MovePush,
) {
    let simple = |dst: Coord, captured: Option<Chessman>| {
        Move::from_parts(src, dst, man, captured, Special::None)
    };
    match rules::reach(man, src) {
        Reach::Slide(rays) => {
            for ray in rays {
                for dst in ray {
                    match b.get(dst) {
                        None => moves.push(simple(dst, None)),
                        Some(other) => {
                            if other.color != man.color {
                                moves.push(simple(dst, Some(other)));
                            }
                            break;
                        }
                    }
                }
            }
        }
        Reach::Leap(dsts) => {
            for dst in dsts {
                match b.get(dst) {
                    None => moves.push(simple(dst, None)),
                    Some(other) if other.color != man.color => {
                        moves.push(simple(dst, Some(other)))
                    }
                    Some(_) => {}
                }
            }
        }
        Reach::Pawn(reach) => gen_pawn(b, man, src, reach, last, moves),
    }
    if man.piece == Piece::King {
        gen_castling(b, man, src, moves);
    }
}

/// Generates all the pseudo-legal moves of `side`
///
/// `last` is the move which led to the current position; it decides whether en passant is
/// possible.
pub fn semilegal(b: &Board, side: Color, last: Option<&Move>, moves: &mut impl MovePush) {
    for (src, man) in b.pieces(side) {
        gen_piece(b, man, src, last, moves);
    }
}

pub fn gen_semilegal(b: &Board, side: Color, last: Option<&Move>) -> MoveList {
    let mut res = MoveList::new();
    semilegal(b, side, last, &mut res);
    res
}

/// Returns `true` if `man` standing on `src` attacks `target`
///
/// Attacks follow the same geometry as moves, except for pawns: a pawn attacks both of its
/// forward diagonals whatever stands there, while its straight moves and castling never attack.
fn attacks(b: &Board, man: Chessman, src: Coord, target: Coord) -> bool {
    match rules::reach(man, src) {
        Reach::Slide(rays) => rays.iter().any(|ray| {
            for &c in ray {
                if c == target {
                    return true;
                }
                if b.get(c).is_some() {
                    return false;
                }
            }
            false
        }),
        Reach::Leap(dsts) => dsts.contains(&target),
        Reach::Pawn(reach) => reach.captures.contains(&target),
    }
}

fn attackers(b: &Board, coord: Coord, color: Color) -> impl Iterator<Item = Coord> + '_ {
    b.pieces(color)
        .filter(move |&(src, man)| attacks(b, man, src, coord))
        .map(|(src, _)| src)
}

/// Returns `true` if the square `coord` is attacked by pieces of color `color`
pub fn is_cell_attacked(b: &Board, coord: Coord, color: Color) -> bool {
    attackers(b, coord, color).next().is_some()
}

/// Returns the squares of all the pieces of color `color` which attack `coord`
pub fn cell_attackers(b: &Board, coord: Coord, color: Color) -> Vec<Coord> {
    attackers(b, coord, color).collect()
}

/// Returns `true` if the king of color `color` is attacked
pub fn is_king_attacked(b: &Board, color: Color) -> Result<bool, RangeError> {
    Ok(is_cell_attacked(b, b.king_pos(color)?, color.inv()))
}

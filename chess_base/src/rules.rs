//! Geometric reach of the pieces
//!
//! Everything here is pure geometry: it knows nothing about other pieces on the board,
//! captures or checks. Occupancy filtering is done by the move generator.

use crate::geometry;
use crate::types::{Chessman, Coord, Piece};

use arrayvec::ArrayVec;

/// Squares along one direction, ordered from the nearest one to the board edge
pub type Ray = ArrayVec<Coord, 7>;

const ROOK_DIRS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(isize, isize); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Candidate squares of a pawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PawnReach {
    /// Straight-ahead squares: one step, then the double step if the pawn has never moved
    pub advance: ArrayVec<Coord, 2>,
    /// Both forward-diagonal squares that are on the board
    pub captures: ArrayVec<Coord, 2>,
}

/// Geometric reach of a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reach {
    /// Sliding piece (rook, bishop or queen), one ray per direction
    Slide(ArrayVec<Ray, 8>),
    /// Leaping piece (knight or king)
    Leap(ArrayVec<Coord, 8>),
    Pawn(PawnReach),
}

fn ray(src: Coord, (dr, dc): (isize, isize)) -> Ray {
    let mut res = Ray::new();
    let mut cur = src;
    while let Some(next) = cur.try_shift(dr, dc) {
        res.push(next);
        cur = next;
    }
    res
}

fn slide(src: Coord, dirs: &[(isize, isize)]) -> ArrayVec<Ray, 8> {
    dirs.iter().map(|&d| ray(src, d)).collect()
}

fn leap(src: Coord, offsets: &[(isize, isize); 8]) -> ArrayVec<Coord, 8> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| src.try_shift(dr, dc))
        .collect()
}

fn pawn(man: Chessman, src: Coord) -> PawnReach {
    let fwd = geometry::pawn_forward_delta(man.color);
    let mut advance = ArrayVec::new();
    if let Some(one) = src.try_shift(fwd, 0) {
        advance.push(one);
        if !man.moved {
            if let Some(two) = one.try_shift(fwd, 0) {
                advance.push(two);
            }
        }
    }
    let captures = [-1, 1]
        .into_iter()
        .filter_map(|dc| src.try_shift(fwd, dc))
        .collect();
    PawnReach { advance, captures }
}

/// Returns the geometric reach of `man` standing on `src`
pub fn reach(man: Chessman, src: Coord) -> Reach {
    match man.piece {
        Piece::Pawn => Reach::Pawn(pawn(man, src)),
        Piece::Knight => Reach::Leap(leap(src, &KNIGHT_OFFSETS)),
        Piece::King => Reach::Leap(leap(src, &KING_OFFSETS)),
        Piece::Bishop => Reach::Slide(slide(src, &BISHOP_DIRS)),
        Piece::Rook => Reach::Slide(slide(src, &ROOK_DIRS)),
        Piece::Queen => {
            let mut rays = slide(src, &ROOK_DIRS);
            rays.extend(slide(src, &BISHOP_DIRS));
            Reach::Slide(rays)
        }
    }
}

/// Returns all the candidate destinations of `man` standing on `src`, ignoring occupancy
pub fn candidates(man: Chessman, src: Coord) -> ArrayVec<Coord, 28> {
    let mut res = ArrayVec::new();
    match reach(man, src) {
        Reach::Slide(rays) => rays.iter().for_each(|r| res.extend(r.iter().copied())),
        Reach::Leap(dsts) => res.extend(dsts),
        Reach::Pawn(p) => {
            res.extend(p.advance);
            res.extend(p.captures);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    fn coords(s: &[&str]) -> BTreeSet<Coord> {
        s.iter().map(|c| Coord::from_str(c).unwrap()).collect()
    }

    fn cands(man: Chessman, src: &str) -> BTreeSet<Coord> {
        candidates(man, Coord::from_str(src).unwrap())
            .into_iter()
            .collect()
    }

    #[test]
    fn test_knight() {
        let knight = Chessman::new(Color::White, Piece::Knight);
        assert_eq!(cands(knight, "a1"), coords(&["b3", "c2"]));
        assert_eq!(cands(knight, "d4").len(), 8);
    }

    #[test]
    fn test_king() {
        let king = Chessman::new(Color::Black, Piece::King);
        assert_eq!(cands(king, "h8"), coords(&["g8", "g7", "h7"]));
        assert_eq!(cands(king, "e4").len(), 8);
    }

    #[test]
    fn test_sliders() {
        let rook = Chessman::new(Color::White, Piece::Rook);
        let bishop = Chessman::new(Color::White, Piece::Bishop);
        let queen = Chessman::new(Color::White, Piece::Queen);
        assert_eq!(cands(rook, "a1").len(), 14);
        assert_eq!(cands(bishop, "a1").len(), 7);
        assert_eq!(cands(bishop, "d4").len(), 13);
        assert_eq!(cands(queen, "d4").len(), 27);

        match reach(rook, Coord::from_str("c3").unwrap()) {
            Reach::Slide(rays) => {
                assert_eq!(rays.len(), 4);
                // Rays go from the nearest square to the edge
                let up = &rays[1];
                assert_eq!(
                    up.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    vec!["c4", "c5", "c6", "c7", "c8"]
                );
            }
            r => panic!("unexpected reach {:?}", r),
        }
    }

    #[test]
    fn test_pawn() {
        let white = Chessman::new(Color::White, Piece::Pawn);
        assert_eq!(cands(white, "e2"), coords(&["e3", "e4", "d3", "f3"]));
        assert_eq!(cands(white.with_moved(true), "e3"), coords(&["e4", "d4", "f4"]));
        assert_eq!(cands(white.with_moved(true), "a7"), coords(&["a8", "b8"]));

        let black = Chessman::new(Color::Black, Piece::Pawn);
        assert_eq!(cands(black, "h7"), coords(&["h6", "h5", "g6"]));
        assert_eq!(cands(black.with_moved(true), "c2"), coords(&["c1", "b1", "d1"]));
    }
}

//! Legality filter over pseudo-legal moves
//!
//! Each candidate is applied to a scratch copy of the board, so the source board is never
//! mutated and the candidates are independent of each other.

use crate::board::Board;
use crate::error::RangeError;
use crate::movegen::{self, MoveList, MovePush};
use crate::moves::Move;
use crate::types::{Color, Coord};

use log::{trace, warn};

#[derive(Clone, Debug)]
pub struct Checker<'a> {
    src: &'a Board,
    side: Color,
    in_check: bool,
}

impl<'a> Checker<'a> {
    /// Creates a checker for the moves of `side` in position `src`
    ///
    /// Fails if `side` has no king.
    pub fn new(src: &'a Board, side: Color) -> Result<Self, RangeError> {
        Ok(Self {
            src,
            side,
            in_check: movegen::is_king_attacked(src, side)?,
        })
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.in_check
    }

    fn is_castling_safe(&self, mv: &Move) -> bool {
        if self.in_check {
            return false;
        }
        let row = mv.src().row() as isize;
        let col = (mv.src().col() + mv.dst().col()) as isize / 2;
        match Coord::new(row, col) {
            Ok(pass) => !movegen::is_cell_attacked(self.src, pass, self.side.inv()),
            Err(_) => false,
        }
    }

    /// Returns `true` if the pseudo-legal move `mv` doesn't leave the mover's king attacked
    ///
    /// A candidate which cannot be applied to the board is rejected and reported via `log`.
    pub fn is_legal(&self, mv: &Move) -> bool {
        if mv.castling().is_some() && !self.is_castling_safe(mv) {
            trace!("castling {} rejected: king is in or passes through check", mv);
            return false;
        }

        let after = match mv.resolved().make(self.src) {
            Ok(b) => b,
            Err(e) => {
                warn!("candidate {} skipped: {}", mv, e);
                return false;
            }
        };
        match movegen::is_king_attacked(&after, self.side) {
            Ok(false) => true,
            Ok(true) => {
                trace!("move {} rejected: king remains attacked", mv);
                false
            }
            Err(e) => {
                warn!("candidate {} skipped: {}", mv, e);
                false
            }
        }
    }
}

/// Generates all the legal moves of `side`
///
/// `last` is the move which led to the current position. Promotions are yielded as four
/// pending candidates each.
pub fn legal(
    b: &Board,
    side: Color,
    last: Option<&Move>,
    moves: &mut impl MovePush,
) -> Result<(), RangeError> {
    let checker = Checker::new(b, side)?;
    for mv in movegen::gen_semilegal(b, side, last) {
        if checker.is_legal(&mv) {
            moves.push(mv);
        }
    }
    Ok(())
}

pub fn gen_legal(b: &Board, side: Color, last: Option<&Move>) -> Result<MoveList, RangeError> {
    let mut res = MoveList::new();
    legal(b, side, last, &mut res)?;
    Ok(res)
}

pub fn has_legal_moves(b: &Board, side: Color, last: Option<&Move>) -> Result<bool, RangeError> {
    let checker = Checker::new(b, side)?;
    Ok(movegen::gen_semilegal(b, side, last)
        .iter()
        .any(|mv| checker.is_legal(mv)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn coord(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn legal_strs(b: &Board, side: Color) -> Vec<String> {
        let mut res: Vec<String> = gen_legal(b, side, None)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        res.sort();
        res.dedup();
        res
    }

    fn play(b: &Board, moves: &[(&str, &str)]) -> (Board, Move) {
        let mut b = *b;
        let mut last = None;
        for &(src, dst) in moves {
            let mv = Move::new(&b, coord(src), coord(dst)).unwrap();
            b = mv.make(&b).unwrap();
            last = Some(mv);
        }
        (b, last.unwrap())
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(gen_legal(&b, Color::White, None).unwrap().len(), 20);
        assert_eq!(gen_legal(&b, Color::Black, None).unwrap().len(), 20);
    }

    #[test]
    fn test_king_safety() {
        let (b, last) = play(
            &Board::initial(),
            &[("e2", "e4"), ("e7", "e5"), ("g1", "f3")],
        );
        for side in [Color::White, Color::Black] {
            let moves = gen_legal(&b, side, Some(&last)).unwrap();
            assert!(!moves.is_empty());
            for mv in moves {
                let after = mv.resolved().make(&b).unwrap();
                assert!(!movegen::is_king_attacked(&after, side).unwrap());
            }
        }
    }

    #[test]
    fn test_pinned() {
        // Knight on e2 is pinned by the rook on e8
        let b = Board::from_placement("4r1k1/8/8/8/8/8/4N3/4K3").unwrap();
        let moves = legal_strs(&b, Color::White);
        assert!(moves.iter().all(|mv| !mv.starts_with("e2")));
        assert!(moves.contains(&"e1d1".to_string()));
        assert!(!moves.contains(&"e1e2".to_string()));
    }

    #[test]
    fn test_castling() {
        const FREE: &str = "r3k2r/8/8/8/8/8/8/R3K2R";
        let b = Board::from_placement(FREE).unwrap();
        let moves = legal_strs(&b, Color::White);
        assert!(moves.contains(&"e1g1".to_string()));
        assert!(moves.contains(&"e1c1".to_string()));

        for (placement, kingside, queenside) in [
            // King in check
            ("r3k2r/8/8/8/8/8/4r3/R3K2R", false, false),
            // Passes through attacked f1
            ("r3k2r/8/8/8/8/8/5r2/R3K2R", false, true),
            // Lands on attacked c1
            ("r3k2r/8/8/8/8/8/2r5/R3K2R", true, false),
            // Attacked b1 is neither passed nor landed on
            ("r3k2r/8/8/8/8/8/1r6/R3K2R", true, true),
            // Pawn covers f1 with its empty diagonal
            ("r3k2r/8/8/8/8/8/6p1/R3K2R", false, true),
            // Pawn covers c1
            ("r3k2r/8/8/8/8/8/1p6/R3K2R", true, false),
            // Rook itself is attacked
            ("r3k2r/8/8/8/8/8/7r/R3K2R", true, true),
        ] {
            let b = Board::from_placement(placement).unwrap();
            let moves = legal_strs(&b, Color::White);
            assert_eq!(moves.contains(&"e1g1".to_string()), kingside, "{}", placement);
            assert_eq!(moves.contains(&"e1c1".to_string()), queenside, "{}", placement);
        }

        // King has moved away and back
        let (b, _) = play(&b, &[("e1", "f1"), ("e8", "f8"), ("f1", "e1")]);
        let moves = legal_strs(&b, Color::White);
        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(!moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn test_enpassant() {
        let (b, last) = play(
            &Board::from_placement("4k3/3p4/8/4P3/8/8/8/4K3").unwrap(),
            &[("d7", "d5")],
        );
        let with_window: Vec<String> = gen_legal(&b, Color::White, Some(&last))
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(with_window.contains(&"e5d6".to_string()));

        // One ply later, the window is closed
        let (b, last) = play(&b, &[("e1", "f1"), ("e8", "f7")]);
        assert!(!gen_legal(&b, Color::White, Some(&last))
            .unwrap()
            .iter()
            .any(|mv| mv.is_enpassant()));

        // En passant would expose the king along the rank
        let (b, last) = play(
            &Board::from_placement("4k3/3p4/8/K3P2r/8/8/8/8").unwrap(),
            &[("d7", "d5")],
        );
        assert!(!gen_legal(&b, Color::White, Some(&last))
            .unwrap()
            .iter()
            .any(|mv| mv.is_enpassant()));
    }

    #[test]
    fn test_promote() {
        let b = Board::from_placement("1n2k3/P7/8/8/8/8/8/4K3").unwrap();
        let moves = gen_legal(&b, Color::White, None).unwrap();
        let to_a8: Vec<&Move> = moves.iter().filter(|mv| mv.dst() == coord("a8")).collect();
        assert_eq!(to_a8.len(), 4);
        assert!(to_a8.iter().all(|mv| !mv.is_resolved()));
    }

    #[test]
    fn test_terminal() {
        // Fool's mate
        let (b, last) = play(
            &Board::initial(),
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );
        assert!(!has_legal_moves(&b, Color::White, Some(&last)).unwrap());
        assert!(Checker::new(&b, Color::White).unwrap().is_check());

        // Stalemate
        let b = Board::from_placement("7k/5Q2/6K1/8/8/8/8/8").unwrap();
        assert!(!has_legal_moves(&b, Color::Black, None).unwrap());
        assert!(!Checker::new(&b, Color::Black).unwrap().is_check());

        assert!(has_legal_moves(&Board::initial(), Color::White, None).unwrap());

        let b = Board::from_placement("8/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(
            has_legal_moves(&b, Color::Black, None),
            Err(RangeError::NoKing(Color::Black))
        );
    }
}

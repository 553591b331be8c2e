//! Game state machine: board, turn, move log, draw offers and the game result

use crate::board::{Board, PlacementParseError};
use crate::error::{Error, GameStateError, MoveError};
use crate::legal::{self, Checker};
use crate::movegen::{self, MoveList};
use crate::moves::{self, san, Make, Move};
use crate::types::{Color, ColorParseError, GameResult, Piece};

use std::str::FromStr;

use log::{debug, warn};
use thiserror::Error;

/// Error creating an [`Engine`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// Piece placement cannot be parsed
    #[error("bad placement: {0}")]
    Placement(#[from] PlacementParseError),
    /// Side to move is missing
    #[error("no move side")]
    NoMoveSide,
    /// Side to move cannot be parsed
    #[error("bad move side: {0}")]
    MoveSide(#[from] ColorParseError),
    /// Position cannot be played
    #[error("invalid position: {0}")]
    Position(#[from] Error),
}

const REASON_CHECKMATE: &str = "Checkmate";
const REASON_STALEMATE: &str = "Stalemate";
const REASON_DRAW_AGREED: &str = "Draw agreed by both players";

/// Chess game
///
/// Owns the board and everything needed to play on it. All the moves go through
/// [`Engine::execute()`], which accepts only legal moves of the side to move. After each move
/// the engine checks whether the new side to move is checkmated or stalemated, and settles the
/// result if so. Once the result is settled, it never changes, and all the mutating operations
/// fail with [`GameStateError::GameOver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    start: Board,
    start_side: Color,
    board: Board,
    side: Color,
    log: Vec<Move>,
    draw_offer: Option<Color>,
    result: GameResult,
    reason: Option<String>,
}

impl Engine {
    /// Creates a game from the standard initial position
    pub fn new() -> Engine {
        Engine {
            start: Board::initial(),
            start_side: Color::White,
            board: Board::initial(),
            side: Color::White,
            log: Vec::new(),
            draw_offer: None,
            result: GameResult::Ongoing,
            reason: None,
        }
    }

    /// Creates a game from the position `board` with `side` to move
    ///
    /// Each side must have exactly one king and at most 16 pieces, and the side which is not
    /// to move must not be in check. If `side` has no legal moves, the game is settled
    /// immediately.
    pub fn from_position(board: Board, side: Color) -> Result<Engine, Error> {
        for color in [Color::White, Color::Black] {
            board.king_pos(color)?;
            let mut pieces = 0;
            let mut kings = 0;
            for (_, man) in board.pieces(color) {
                pieces += 1;
                if man.piece == Piece::King {
                    kings += 1;
                }
            }
            if kings > 1 {
                return Err(GameStateError::TooManyKings(color).into());
            }
            if pieces > 16 {
                return Err(GameStateError::TooManyPieces(color).into());
            }
        }
        if movegen::is_king_attacked(&board, side.inv())? {
            return Err(GameStateError::OpponentKingAttacked.into());
        }
        let mut res = Engine {
            start: board,
            start_side: side,
            board,
            side,
            ..Engine::new()
        };
        res.settle_if_terminal();
        Ok(res)
    }

    /// Creates a game from a FEN-like string `<placement> <side>`, like
    /// `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b`
    ///
    /// The remaining FEN fields, if any, are ignored: castling and en passant eligibility
    /// follow from the moved-flags of the pieces, see [`Board::from_placement()`].
    pub fn from_fen(s: &str) -> Result<Engine, FenParseError> {
        let mut iter = s.split_ascii_whitespace();
        let board = Board::from_placement(iter.next().unwrap_or(""))?;
        let side = Color::from_str(iter.next().ok_or(FenParseError::NoMoveSide)?)?;
        Ok(Engine::from_position(board, side)?)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns the position the game started from, with its side to move
    #[inline]
    pub fn initial(&self) -> (&Board, Color) {
        (&self.start, self.start_side)
    }

    /// Returns all the executed moves, in order
    #[inline]
    pub fn log(&self) -> &[Move] {
        &self.log
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.log.last()
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Returns the human-readable reason of the game result, if the game is over
    #[inline]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.result.is_over()
    }

    /// Returns the color which has an outstanding draw offer, if any
    #[inline]
    pub fn draw_offer(&self) -> Option<Color> {
        self.draw_offer
    }

    /// Returns all the legal moves of the side to move
    ///
    /// Each promotion is represented by four pending candidates, one per target piece.
    pub fn legal_moves(&self) -> MoveList {
        match legal::gen_legal(&self.board, self.side, self.last_move()) {
            Ok(moves) => moves,
            Err(e) => {
                warn!("cannot generate moves: {}", e);
                MoveList::new()
            }
        }
    }

    pub fn has_legal_moves(&self) -> bool {
        match legal::has_legal_moves(&self.board, self.side, self.last_move()) {
            Ok(has) => has,
            Err(e) => {
                warn!("cannot generate moves: {}", e);
                false
            }
        }
    }

    /// Returns `true` if the king of the side to move is attacked
    pub fn is_check(&self) -> bool {
        match Checker::new(&self.board, self.side) {
            Ok(checker) => checker.is_check(),
            Err(e) => {
                warn!("cannot detect check: {}", e);
                false
            }
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves()
    }

    fn ensure_ongoing(&self) -> Result<(), GameStateError> {
        if self.result.is_over() {
            return Err(GameStateError::GameOver(self.result));
        }
        Ok(())
    }

    fn settle(&mut self, result: GameResult, reason: String) {
        debug!("game over: {} ({})", result, reason);
        self.result = result;
        self.reason = Some(reason);
    }

    fn settle_if_terminal(&mut self) {
        if self.has_legal_moves() {
            return;
        }
        if self.is_check() {
            self.settle(GameResult::win(self.side.inv()), REASON_CHECKMATE.to_string());
        } else {
            self.settle(GameResult::Draw, REASON_STALEMATE.to_string());
        }
    }

    fn find_legal(&self, mv: &Move) -> Option<Move> {
        let promote = mv.promotion().map(|p| p.piece());
        self.legal_moves()
            .into_iter()
            .find(|lm| {
                lm.src() == mv.src()
                    && lm.dst() == mv.dst()
                    && lm.man() == mv.man()
                    && lm.promotion().map(|p| p.piece()) == promote
            })
            .map(Move::resolved)
    }

    /// Executes the move `mv`
    ///
    /// The move must be a legal move of the side to move. Special-move data is taken from the
    /// matching legal move, so a move created via [`Move::new()`] is enough. Promotions must be
    /// resolved beforehand.
    pub fn execute(&mut self, mv: Move) -> Result<(), Error> {
        self.ensure_ongoing()?;
        if mv.side() != self.side {
            return Err(Error::WrongTurn(mv.side()));
        }
        if !mv.is_resolved() {
            return Err(MoveError::UnresolvedPromotion.into());
        }
        let mv = self
            .find_legal(&mv)
            .ok_or_else(|| MoveError::NotLegal(mv.to_string()))?;
        moves::make_move(&mut self.board, &mv)?;
        self.log.push(mv);
        self.side = self.side.inv();
        debug!("executed {}", mv);
        self.settle_if_terminal();
        Ok(())
    }

    /// Finds the move described by `m` and executes it
    pub fn make(&mut self, m: &impl Make) -> Result<Move, Error> {
        let mv = m.find(self)?;
        self.execute(mv)?;
        Ok(mv)
    }

    /// Reverts the last executed move and returns it
    pub fn undo(&mut self) -> Result<Move, Error> {
        self.ensure_ongoing()?;
        let mv = *self.log.last().ok_or(GameStateError::EmptyLog)?;
        moves::unmake_move(&mut self.board, &mv)?;
        self.log.pop();
        self.side = self.side.inv();
        debug!("undone {}", mv);
        Ok(mv)
    }

    /// Resigns the game on behalf of the side to move
    pub fn resign(&mut self) -> Result<(), Error> {
        self.ensure_ongoing()?;
        let side = self.side;
        self.settle(GameResult::resigned(side), format!("{} resigned", side.name()));
        Ok(())
    }

    /// Offers a draw on behalf of `color`
    ///
    /// Returns `true` if the offer matches an outstanding offer of the opponent, so the game
    /// is drawn. Otherwise, the offer is recorded and `false` is returned.
    pub fn request_draw(&mut self, color: Color) -> Result<bool, Error> {
        self.ensure_ongoing()?;
        match self.draw_offer {
            Some(offered) if offered != color => {
                self.draw_offer = None;
                self.settle(GameResult::Draw, REASON_DRAW_AGREED.to_string());
                Ok(true)
            }
            _ => {
                self.draw_offer = Some(color);
                debug!("{} offers a draw", color.name());
                Ok(false)
            }
        }
    }

    /// Accepts the outstanding draw offer of the opponent on behalf of `color`
    pub fn accept_draw(&mut self, color: Color) -> Result<(), Error> {
        self.ensure_ongoing()?;
        match self.draw_offer {
            None => Err(GameStateError::NoDrawOffer.into()),
            Some(offered) if offered == color => Err(GameStateError::SelfAccept(color).into()),
            Some(_) => {
                self.draw_offer = None;
                self.settle(GameResult::Draw, REASON_DRAW_AGREED.to_string());
                Ok(())
            }
        }
    }

    /// Declines the outstanding draw offer
    pub fn decline_draw(&mut self) -> Result<(), Error> {
        self.ensure_ongoing()?;
        match self.draw_offer.take() {
            Some(offered) => {
                debug!("draw offer of {} declined", offered.name());
                Ok(())
            }
            None => Err(GameStateError::NoDrawOffer.into()),
        }
    }

    /// Encodes the legal move `mv` into SAN and appends `+` or `#` if it gives check or
    /// checkmate
    pub fn san_with_suffix(&self, mv: &Move) -> Result<String, Error> {
        let data = san::Data::from_move(mv, self);
        let mut after = self.clone();
        after.execute(mv.resolved())?;
        let check = if after.is_checkmate() {
            Some(san::CheckMark::Checkmate)
        } else if after.is_check() {
            Some(san::CheckMark::Single)
        } else {
            None
        };
        Ok(san::Move { data, check }.to_string())
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}

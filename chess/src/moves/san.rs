//! Utilities to work with moves in SAN format

use super::base;
use crate::engine::Engine;
use crate::error::MoveError;
use crate::movegen::MovePush;
use crate::types::{CastlingSide, Coord, CoordParseError, File, Piece, PromotePiece, Rank};

use std::fmt;
use std::marker::PhantomData;
use std::str::{self, FromStr};

use thiserror::Error;

/// Error parsing SAN representation from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// String is empty
    #[error("string is empty")]
    EmptyString,
    /// String contains non-ASCII characters
    #[error("non-ASCII data in string")]
    NonAscii,
    /// Destination cell is invalid
    #[error("invalid destination cell")]
    InvalidDst(#[from] CoordParseError),
    /// Extra bytes in non-pawn move
    #[error("non-pawn move too long")]
    NonPawnMoveTooLong,
    /// String for pawn move is too short
    #[error("pawn move too short")]
    PawnMoveTooShort,
    /// Extra bytes in pawn move
    #[error("pawn move too long")]
    PawnMoveTooLong,
    /// Parsing failed for unspecified reasons
    #[error("syntax error")]
    Syntax,
}

impl From<RawParseError> for MoveError {
    fn from(e: RawParseError) -> Self {
        MoveError::Syntax(e.to_string())
    }
}

/// Style for formatiing SAN moves
///
/// Note that the style can be used only for _formatting_. Move parser only accepts
/// ASCII characters as piece names and doesn't accept Unicode pieces,
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Style {
    /// Use capital Latin letters for pieces
    Algebraic,
    /// Use Unicode chess symbols for pieces
    Utf8,
}

trait PieceTheme {
    fn marker() -> PhantomData<Self>;
    fn piece_to_char(piece: Piece) -> char;
    fn promote_sign() -> &'static str;

    fn promote_to_char(promote: PromotePiece) -> char {
        Self::piece_to_char(promote.into())
    }
}

struct Utf8Theme;

impl PieceTheme for Utf8Theme {
    fn marker() -> PhantomData<Self> {
        PhantomData
    }

    fn promote_sign() -> &'static str {
        ""
    }

    fn piece_to_char(piece: Piece) -> char {
        match piece {
            Piece::Pawn => '♙',
            Piece::Knight => '♘',
            Piece::Bishop => '♗',
            Piece::Rook => '♖',
            Piece::Queen => '♕',
            Piece::King => '♔',
        }
    }
}

struct AlgebraicTheme;

impl PieceTheme for AlgebraicTheme {
    fn marker() -> PhantomData<Self> {
        PhantomData
    }

    fn promote_sign() -> &'static str {
        "="
    }

    fn piece_to_char(piece: Piece) -> char {
        piece.as_char()
    }
}

/// Parsed SAN string, without check indicator
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Data {
    /// Castling
    Castling(CastlingSide),
    /// Simple pawn move
    PawnMove {
        /// Destination square
        dst: Coord,
        /// Piece to promote, if any
        promote: Option<PromotePiece>,
    },
    /// Pawn capture, including en passant
    PawnCapture {
        /// Source file
        src: File,
        /// Destination square
        dst: Coord,
        /// Piece to promote, if any
        promote: Option<PromotePiece>,
    },
    /// Non-pawn move
    Simple {
        /// Piece to move
        piece: Piece,
        /// Source file, if specified
        file: Option<File>,
        /// Source rank, if specified
        rank: Option<Rank>,
        /// Is the move capture?
        is_capture: bool,
        /// Destination square
        dst: Coord,
    },
}

struct PromoteFmt<T: PieceTheme>(Option<PromotePiece>, PhantomData<T>);

impl<T: PieceTheme> fmt::Display for PromoteFmt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.0 {
            None => Ok(()),
            Some(promote) => write!(f, "{}{}", T::promote_sign(), T::promote_to_char(promote)),
        }
    }
}

/// Collects the other movers which compete with `mv` for its destination square
struct AmbigDetector {
    mv: base::Move,
    sim_any: bool,
    sim_file: bool,
    sim_rank: bool,
    sim_other: bool,
}

impl AmbigDetector {
    fn new(mv: base::Move) -> Self {
        Self {
            mv,
            sim_any: false,
            sim_file: false,
            sim_rank: false,
            sim_other: false,
        }
    }

    fn file(&self) -> Option<File> {
        if self.sim_any && (self.sim_rank || self.sim_other || !self.sim_file) {
            return Some(self.mv.src().file());
        }
        None
    }

    fn rank(&self) -> Option<Rank> {
        if self.sim_any && self.sim_file {
            return Some(self.mv.src().rank());
        }
        None
    }
}

impl MovePush for AmbigDetector {
    fn push(&mut self, mv: base::Move) {
        if mv.src() == self.mv.src()
            || mv.dst() != self.mv.dst()
            || mv.piece() != self.mv.piece()
            || mv.castling().is_some()
        {
            return;
        }
        self.sim_any = true;
        let same_file = self.mv.src().file() == mv.src().file();
        let same_rank = self.mv.src().rank() == mv.src().rank();
        self.sim_file |= same_file;
        self.sim_rank |= same_rank;
        self.sim_other |= !same_file && !same_rank;
    }
}

fn promote_piece(mv: &base::Move) -> Option<PromotePiece> {
    mv.promotion().map(|p| p.piece())
}

impl Data {
    /// Returns the wrapper which helps to format the move with the given style `style`
    ///
    /// See [`Move::styled()`] doc for details.
    #[inline]
    pub fn styled(&self, style: Style) -> StyledData<'_> {
        StyledData(self, style)
    }

    /// Creates the parsed SAN from legal move `mv` in the current position of `engine`
    ///
    /// Disambiguation uses the full set of legal moves: a rank is added if another piece of
    /// the same kind on the same file can reach the destination, and a file is added if such
    /// a piece stands anywhere else. Both are added when both cases occur.
    pub fn from_move(mv: &base::Move, engine: &Engine) -> Data {
        if let Some(side) = mv.castling() {
            return Data::Castling(side);
        }
        if mv.piece() == Piece::Pawn {
            let promote = promote_piece(mv);
            return if mv.src().file() == mv.dst().file() {
                Data::PawnMove {
                    dst: mv.dst(),
                    promote,
                }
            } else {
                Data::PawnCapture {
                    src: mv.src().file(),
                    dst: mv.dst(),
                    promote,
                }
            };
        }
        let mut detector = AmbigDetector::new(*mv);
        for other in engine.legal_moves() {
            detector.push(other);
        }
        Data::Simple {
            piece: mv.piece(),
            file: detector.file(),
            rank: detector.rank(),
            is_capture: mv.is_capture(),
            dst: mv.dst(),
        }
    }

    fn promote(&self) -> Option<PromotePiece> {
        match *self {
            Self::PawnMove { promote, .. } | Self::PawnCapture { promote, .. } => promote,
            Self::Castling(_) | Self::Simple { .. } => None,
        }
    }

    fn matches(&self, mv: &base::Move) -> bool {
        match *self {
            Self::Castling(side) => mv.castling() == Some(side),
            Self::PawnMove { dst, .. } => {
                mv.piece() == Piece::Pawn && mv.dst() == dst && !mv.is_capture()
            }
            Self::PawnCapture { src, dst, .. } => {
                mv.piece() == Piece::Pawn
                    && mv.src().file() == src
                    && mv.dst() == dst
                    && mv.is_capture()
            }
            Self::Simple {
                piece,
                file,
                rank,
                is_capture,
                dst,
            } => {
                mv.piece() == piece
                    && mv.castling().is_none()
                    && mv.dst() == dst
                    && mv.is_capture() == is_capture
                    && file.map_or(true, |f| mv.src().file() == f)
                    && rank.map_or(true, |r| mv.src().rank() == r)
            }
        }
    }

    /// Converts the parsed SAN into the legal move of `engine`
    ///
    /// The first legal move consistent with the parsed data is taken. A promotion must name
    /// its piece, and the returned move is resolved to it.
    pub fn into_move(self, engine: &Engine) -> Result<base::Move, MoveError> {
        let promote = self.promote();
        engine
            .legal_moves()
            .into_iter()
            .find(|mv| self.matches(mv) && promote_piece(mv) == promote)
            .map(base::Move::resolved)
            .ok_or_else(|| MoveError::NoMatch(self.to_string()))
    }

    pub(self) fn do_fmt<P: PieceTheme>(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> Result<(), fmt::Error> {
        match *self {
            Self::Castling(CastlingSide::King) => write!(f, "O-O"),
            Self::Castling(CastlingSide::Queen) => write!(f, "O-O-O"),
            Self::PawnMove { dst, promote } => {
                write!(f, "{}{}", dst, PromoteFmt(promote, P::marker()))
            }
            Self::PawnCapture { src, dst, promote } => {
                write!(
                    f,
                    "{}x{}{}",
                    src.as_char(),
                    dst,
                    PromoteFmt(promote, P::marker())
                )
            }
            Self::Simple {
                piece,
                file,
                rank,
                is_capture,
                dst,
            } => {
                write!(f, "{}", P::piece_to_char(piece))?;
                if let Some(file) = file {
                    write!(f, "{}", file.as_char())?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank.as_char())?;
                }
                if is_capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", dst)
            }
        }
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.do_fmt::<AlgebraicTheme>(f)
    }
}

impl<'a> fmt::Display for StyledData<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.1 {
            Style::Algebraic => self.0.do_fmt::<AlgebraicTheme>(f),
            Style::Utf8 => self.0.do_fmt::<Utf8Theme>(f),
        }
    }
}

fn parse_dst(bytes: &[u8]) -> Result<Coord, RawParseError> {
    let s = str::from_utf8(bytes).map_err(|_| RawParseError::NonAscii)?;
    Ok(Coord::from_str(s)?)
}

fn parse_file(b: u8) -> Option<File> {
    File::from_char(b as char)
}

impl FromStr for Data {
    type Err = RawParseError;

    fn from_str(data: &str) -> Result<Data, Self::Err> {
        if data == "O-O" || data == "0-0" {
            return Ok(Self::Castling(CastlingSide::King));
        }
        if data == "O-O-O" || data == "0-0-0" {
            return Ok(Self::Castling(CastlingSide::Queen));
        }
        if data.is_empty() {
            return Err(RawParseError::EmptyString);
        }
        if !data.is_ascii() {
            return Err(RawParseError::NonAscii);
        }

        let bytes = data.as_bytes();

        if let Some(piece) = Piece::from_char(bytes[0] as char)
            .filter(|p| *p != Piece::Pawn && bytes[0].is_ascii_uppercase())
        {
            let bytes = &bytes[1..];
            if bytes.len() < 2 {
                return Err(RawParseError::Syntax);
            }
            let (bytes, dst_bytes) = bytes.split_at(bytes.len() - 2);
            let dst = parse_dst(dst_bytes)?;
            let (file, bytes) = match bytes.first().copied().and_then(parse_file) {
                Some(file) => (Some(file), &bytes[1..]),
                None => (None, bytes),
            };
            let (rank, bytes) = match bytes.first().and_then(|b| Rank::from_char(*b as char)) {
                Some(rank) => (Some(rank), &bytes[1..]),
                None => (None, bytes),
            };
            let (is_capture, bytes) = match bytes.first() {
                Some(b'x' | b':') => (true, &bytes[1..]),
                _ => (false, bytes),
            };
            if !bytes.is_empty() {
                return Err(RawParseError::NonPawnMoveTooLong);
            }
            return Ok(Data::Simple {
                piece,
                file,
                rank,
                is_capture,
                dst,
            });
        }

        let (promote, bytes) = match bytes.split_last() {
            Some((&b, rest)) if b.is_ascii_uppercase() => {
                let promote = PromotePiece::from_char(b as char).ok_or(RawParseError::Syntax)?;
                let rest = match rest.split_last() {
                    Some((b'=', data)) => data,
                    _ => rest,
                };
                (Some(promote), rest)
            }
            _ => (None, bytes),
        };

        if bytes.len() < 2 {
            return Err(RawParseError::PawnMoveTooShort);
        }
        let (bytes, dst_bytes) = bytes.split_at(bytes.len() - 2);
        let dst = parse_dst(dst_bytes)?;

        match bytes.len() {
            0 => Ok(Data::PawnMove { dst, promote }),
            1 => Err(RawParseError::Syntax),
            2 => {
                let src = parse_file(bytes[0]).ok_or(RawParseError::Syntax)?;
                if !matches!(bytes[1], b':' | b'x') {
                    return Err(RawParseError::Syntax);
                }
                Ok(Data::PawnCapture { src, dst, promote })
            }
            _ => Err(RawParseError::PawnMoveTooLong),
        }
    }
}

/// Check indication
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CheckMark {
    /// Check (a.k.a. "+")
    Single,
    /// Double check (a.k.a "++")
    ///
    /// This one is never produced by the encoder and is used primarily for parsing. Note that
    /// in some notations "++" may denote checkmate, but it's still parsed as
    /// [`CheckMark::Double`].
    Double,
    /// Checkmate (a.k.a "#")
    Checkmate,
}

/// Parsed SAN move with a [`CheckMark`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// Data without check mark
    pub data: Data,
    /// Check mark, if any
    pub check: Option<CheckMark>,
}

/// Wrapper to format [`Data`] with the given style
///
/// See [`Move::styled()`] doc for details.
pub struct StyledData<'a>(&'a Data, Style);

/// Wrapper to format [`Move`] with the given style
///
/// See [`Move::styled()`] doc for details.
pub struct StyledMove<'a>(&'a Move, Style);

impl Move {
    /// Returns the wrapper which helps to format the move with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    #[inline]
    pub fn styled(&self, style: Style) -> StyledMove<'_> {
        StyledMove(self, style)
    }

    pub(self) fn do_fmt<P: PieceTheme>(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> Result<(), fmt::Error> {
        self.data.do_fmt::<P>(f)?;
        match self.check {
            Some(CheckMark::Single) => write!(f, "+")?,
            Some(CheckMark::Double) => write!(f, "++")?,
            Some(CheckMark::Checkmate) => write!(f, "#")?,
            None => {}
        };
        Ok(())
    }

    /// Converts the parsed SAN into the legal move of `engine`
    ///
    /// The check mark is ignored.
    #[inline]
    pub fn into_move(self, engine: &Engine) -> Result<base::Move, MoveError> {
        self.data.into_move(engine)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.do_fmt::<AlgebraicTheme>(f)
    }
}

impl<'a> fmt::Display for StyledMove<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.1 {
            Style::Algebraic => self.0.do_fmt::<AlgebraicTheme>(f),
            Style::Utf8 => self.0.do_fmt::<Utf8Theme>(f),
        }
    }
}

impl FromStr for Move {
    type Err = RawParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        let (check, data) = if let Some(rest) = s.strip_suffix('#') {
            (Some(CheckMark::Checkmate), rest)
        } else if let Some(rest) = s.strip_suffix("++") {
            (Some(CheckMark::Double), rest)
        } else if let Some(rest) = s.strip_suffix('+') {
            (Some(CheckMark::Single), rest)
        } else {
            (None, s)
        };
        Ok(Move {
            data: Data::from_str(data)?,
            check,
        })
    }
}

/// Encodes the legal move `mv` of `engine` into SAN, without check suffix
///
/// Use [`Engine::san_with_suffix()`] to get the suffix as well.
pub fn encode(engine: &Engine, mv: &base::Move) -> String {
    Data::from_move(mv, engine).to_string()
}

/// Decodes the SAN token `s` into a legal move of `engine`
///
/// Trailing `+`, `++` or `#` are accepted and ignored.
pub fn decode(engine: &Engine, s: &str) -> Result<base::Move, MoveError> {
    let parsed = Move::from_str(s).map_err(|_| MoveError::Syntax(s.to_string()))?;
    parsed.into_move(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::uci;

    fn from_uci(engine: &Engine, s: &str) -> base::Move {
        uci::Move::from_str(s).unwrap().into_move(engine).unwrap()
    }

    fn candidate(engine: &Engine, s: &str) -> base::Move {
        let parsed = uci::Move::from_str(s).unwrap();
        *engine
            .legal_moves()
            .iter()
            .find(|mv| mv.uci() == parsed)
            .unwrap()
    }

    #[test]
    fn test_simple() {
        let mut engine = Engine::new();
        for (mv_str, placement) in [
            ("e4", "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"),
            ("Nc6", "r1bqkbnr/pppppppp/2n5/8/4P3/8/PPPP1PPP/RNBQKBNR"),
            ("Nf3", "r1bqkbnr/pppppppp/2n5/8/4P3/5N2/PPPP1PPP/RNBQKB1R"),
            ("e5", "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"),
            ("Bb5", "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R"),
            ("Nf6", "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R"),
            ("O-O", "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQ1RK1"),
            ("Nxe4", "r1bqkb1r/pppp1ppp/2n5/1B2p3/4n3/5N2/PPPP1PPP/RNBQ1RK1"),
            ("Re1", "r1bqkb1r/pppp1ppp/2n5/1B2p3/4n3/5N2/PPPP1PPP/RNBQR1K1"),
            ("Qh4", "r1b1kb1r/pppp1ppp/2n5/1B2p3/4n2q/5N2/PPPP1PPP/RNBQR1K1"),
            ("Kh1", "r1b1kb1r/pppp1ppp/2n5/1B2p3/4n2q/5N2/PPPP1PPP/RNBQR2K"),
        ] {
            let mv = decode(&engine, mv_str).unwrap();
            assert_eq!(encode(&engine, &mv), mv_str);
            engine.execute(mv).unwrap();
            assert_eq!(engine.board().as_placement(), placement);
        }
    }

    #[test]
    fn test_tricky() {
        for (placement, uci_str, mv_str) in [
            ("4k3/6K1/8/2N5/8/8/8/N7 w", "a1b3", "Nab3"),
            ("4k3/6K1/8/N7/8/8/8/N7 w", "a1b3", "N1b3"),
            ("4k3/6K1/8/8/8/8/8/N1N5 w", "a1b3", "Nab3"),
            ("4k3/6K1/8/N1N5/8/8/8/N1N5 w", "a1b3", "Na1b3"),
            ("4k3/8/8/8/8/1N3N2/8/1N2K3 w", "b1d2", "Nb1d2"),
            ("4k3/8/8/8/8/1N3N2/8/1N2K3 w", "b3d2", "Nb3d2"),
            ("4k3/8/8/8/8/1N3N2/8/1N2K3 w", "f3d2", "Nfd2"),
            ("5k2/8/5K2/8/3R3R/8/8/b7 w", "h4f4", "Rf4"),
            ("4k3/6K1/8/2N5/8/1r6/8/N7 w", "a1b3", "Naxb3"),
            ("4k3/6K1/8/N7/8/1r6/8/N7 w", "a1b3", "N1xb3"),
            ("4k3/6K1/8/8/8/1r6/8/N1N5 w", "a1b3", "Naxb3"),
            ("4k3/6K1/8/N1N5/8/1r6/8/N1N5 w", "a1b3", "Na1xb3"),
        ] {
            let engine = Engine::from_fen(placement).unwrap();
            let mv = decode(&engine, mv_str).unwrap();
            assert_eq!(mv, from_uci(&engine, uci_str));
            assert_eq!(encode(&engine, &mv), mv_str);
        }
    }

    #[test]
    fn test_conflict() {
        let engine = Engine::from_fen("k5K1/8/5q2/6n1/8/2P5/5q2/8 b").unwrap();
        for (mv_str, uci_str) in [
            ("Qe5", "f6e5"),
            ("Qxc3", "f6c3"),
            ("Qb2", "f2b2"),
            ("Qe3", "f2e3"),
            ("Q2d4", "f2d4"),
            ("Q6d4", "f6d4"),
            ("Qf6d4", "f6d4"),
            ("Qfe5", "f6e5"),
            ("Q6e5", "f6e5"),
            ("Qf6e5", "f6e5"),
            ("Kaa7", "a8a7"),
            ("Qxc3+", "f6c3"),
        ] {
            assert_eq!(
                decode(&engine, mv_str),
                Ok(from_uci(&engine, uci_str)),
                "{}",
                mv_str
            );
        }
        for mv_str in ["Qa1", "Qg5", "Qge5", "Q5e5", "Qg5e5", "Qxe5", "Qc3"] {
            assert_eq!(
                decode(&engine, mv_str),
                Err(MoveError::NoMatch(mv_str.to_string())),
                "{}",
                mv_str
            );
        }
        // The first matching candidate is taken for an underspecified token
        assert!(decode(&engine, "Qd4").is_ok());
        assert_eq!(encode(&engine, &from_uci(&engine, "f2d4")), "Q2d4");
        assert_eq!(encode(&engine, &from_uci(&engine, "f6d4")), "Q6d4");
        assert_eq!(encode(&engine, &from_uci(&engine, "f6e5")), "Qe5");
    }

    #[test]
    fn test_pawns() {
        for (placement, uci_str, mv_strs, real_mv_str) in [
            (
                "4k3/8/8/4p3/3P4/8/3P4/4K3 w",
                "d4e5",
                &["dxe5", "d:e5"][..],
                "dxe5",
            ),
            (
                "2n2n1n/3P2P1/8/8/8/8/3K1k2/8 w",
                "d7d8n",
                &["d8N", "d8=N"][..],
                "d8=N",
            ),
            (
                "2n2n1n/3P2P1/8/8/8/8/3K1k2/8 w",
                "d7c8b",
                &["dxc8B", "dxc8=B"][..],
                "dxc8=B",
            ),
            (
                "2n2n1n/3P2P1/8/8/8/8/3K1k2/8 w",
                "g7f8r",
                &["gxf8=R+"][..],
                "gxf8=R",
            ),
            (
                "2n2n1n/3P2P1/8/8/8/8/3K1k2/8 w",
                "g7g8q",
                &["g8Q"][..],
                "g8=Q",
            ),
            ("8/8/8/8/3p3k/2P5/1PP4K/8 w", "b2b3", &["b3"][..], "b3"),
            ("8/8/8/8/3p3k/2P5/1PP4K/8 w", "b2b4", &["b4"][..], "b4"),
            ("8/8/8/8/3p3k/2P5/1PP4K/8 w", "c3c4", &["c4"][..], "c4"),
            ("8/8/8/8/3p3k/2P5/1PP4K/8 w", "c3d4", &["cxd4"][..], "cxd4"),
        ] {
            let engine = Engine::from_fen(placement).unwrap();
            let expected = from_uci(&engine, uci_str);
            for mv_str in mv_strs {
                assert_eq!(decode(&engine, mv_str), Ok(expected), "{}", mv_str);
            }
            assert_eq!(encode(&engine, &candidate(&engine, uci_str)), real_mv_str);
            assert_eq!(encode(&engine, &expected), real_mv_str);
        }

        let engine = Engine::from_fen("2n2n1n/3P2P1/8/8/8/8/3K1k2/8 w").unwrap();
        assert_eq!(
            decode(&engine, "d8"),
            Err(MoveError::NoMatch("d8".to_string()))
        );
        assert_eq!(
            decode(&engine, "d8=K"),
            Err(MoveError::Syntax("d8=K".to_string()))
        );
    }

    #[test]
    fn test_enpassant() {
        let mut engine = Engine::from_fen("4k3/2p5/8/3P4/8/8/8/4K3 b").unwrap();
        engine.execute(decode(&engine, "c5").unwrap()).unwrap();
        let mv = decode(&engine, "dxc6").unwrap();
        assert!(mv.is_enpassant());
        assert_eq!(encode(&engine, &mv), "dxc6");
        assert_eq!(
            decode(&engine, "dc6"),
            Err(MoveError::Syntax("dc6".to_string()))
        );
        assert_eq!(
            decode(&engine, "c6"),
            Err(MoveError::NoMatch("c6".to_string()))
        );
    }

    #[test]
    fn test_castling() {
        let engine = Engine::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w").unwrap();
        let short = decode(&engine, "O-O").unwrap();
        assert_eq!(short, from_uci(&engine, "e1g1"));
        assert_eq!(decode(&engine, "0-0"), Ok(short));
        assert_eq!(encode(&engine, &short), "O-O");
        let long = decode(&engine, "0-0-0").unwrap();
        assert_eq!(long, from_uci(&engine, "e1c1"));
        assert_eq!(encode(&engine, &long), "O-O-O");

        assert_eq!(
            decode(&engine, "Kg1"),
            Err(MoveError::NoMatch("Kg1".to_string()))
        );
        assert_eq!(decode(&engine, "Kf1"), Ok(from_uci(&engine, "e1f1")));
        assert_eq!(encode(&engine, &from_uci(&engine, "a1d1")), "Rd1");
        assert_eq!(encode(&engine, &from_uci(&engine, "h1h8")), "Rxh8");
    }

    #[test]
    fn test_roundtrip() {
        for fen in [
            "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w",
            "r3k2r/1P6/8/2N1N3/8/2N1N3/8/R3K2R w",
            "k5K1/8/5q2/6n1/8/2P5/5q2/8 b",
        ] {
            let engine = Engine::from_fen(fen).unwrap();
            for mv in engine.legal_moves() {
                let s = encode(&engine, &mv);
                assert_eq!(decode(&engine, &s), Ok(mv.resolved()), "{}", s);
            }
        }
    }

    #[test]
    fn test_syntax() {
        let engine = Engine::new();
        for s in ["", "e", "Nf", "e2e4e", "♘f3", "Zf3", "exxd5", "e9"] {
            assert_eq!(
                decode(&engine, s),
                Err(MoveError::Syntax(s.to_string())),
                "{:?}",
                s
            );
        }
        assert_eq!(Data::from_str(""), Err(RawParseError::EmptyString));
        assert_eq!(Data::from_str("Nf"), Err(RawParseError::Syntax));
        assert_eq!(Data::from_str("Nbb1f3"), Err(RawParseError::NonPawnMoveTooLong));
        assert_eq!(Data::from_str("e"), Err(RawParseError::PawnMoveTooShort));
        assert_eq!(Data::from_str("♘f3"), Err(RawParseError::NonAscii));
    }

    #[test]
    fn test_check_marks() {
        for (s, check) in [
            ("Qh4#", Some(CheckMark::Checkmate)),
            ("Qh4+", Some(CheckMark::Single)),
            ("Qh4++", Some(CheckMark::Double)),
            ("Qh4", None),
        ] {
            let mv = Move::from_str(s).unwrap();
            assert_eq!(mv.check, check);
            assert_eq!(mv.to_string(), s);
        }
    }

    #[test]
    fn test_styled() {
        let engine = Engine::from_fen("8/2P5/8/8/8/8/4k1K1/8 w").unwrap();
        let king = Move {
            data: Data::from_move(&from_uci(&engine, "g2h2"), &engine),
            check: None,
        };
        assert_eq!(king.styled(Style::Utf8).to_string(), "♔h2");
        assert_eq!(king.styled(Style::Algebraic).to_string(), "Kh2");
        let promote = Data::from_move(&from_uci(&engine, "c7c8b"), &engine);
        assert_eq!(promote.styled(Style::Utf8).to_string(), "c8♗");
        assert_eq!(promote.to_string(), "c8=B");
    }
}

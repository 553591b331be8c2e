use derive_more::Display;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("coordinate ({row}, {col}) is out of range")]
    OutOfRange { row: isize, col: isize },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChessmanParseError {
    #[error("unexpected piece char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index must be between 0 and 7");
        Self::ALL[val]
    }

    pub fn try_from_index(val: isize) -> Option<Self> {
        usize::try_from(val).ok().and_then(|v| Self::ALL.get(v).copied())
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(Self::from_index((u32::from(c) - u32::from('a')) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Rank of the board
///
/// Ranks are indexed top-down, so rank 8 has index 0 and rank 1 has index 7. The index of
/// the rank is the row of the square.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R8 = 0,
    R7 = 1,
    R6 = 2,
    R5 = 3,
    R4 = 4,
    R3 = 5,
    R2 = 6,
    R1 = 7,
}

impl Rank {
    const ALL: [Rank; 8] = [
        Rank::R8,
        Rank::R7,
        Rank::R6,
        Rank::R5,
        Rank::R4,
        Rank::R3,
        Rank::R2,
        Rank::R1,
    ];

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index must be between 0 and 7");
        Self::ALL[val]
    }

    pub fn try_from_index(val: isize) -> Option<Self> {
        usize::try_from(val).ok().and_then(|v| Self::ALL.get(v).copied())
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Self::from_index((u32::from('8') - u32::from(c)) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'8' - *self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Square coordinate
///
/// Internally, it is stored as `row * 8 + col`, where row 0 is rank 8 and column 0 is file `a`.
/// So `a8` is `(0, 0)`, `h8` is `(0, 7)` and `a1` is `(7, 0)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

impl Coord {
    /// Creates a coordinate from row and column, failing if any of them is outside `[0, 7]`
    pub fn new(row: isize, col: isize) -> Result<Coord, CoordError> {
        match (Rank::try_from_index(row), File::try_from_index(col)) {
            (Some(rank), Some(file)) => Ok(Coord::from_parts(file, rank)),
            _ => Err(CoordError::OutOfRange { row, col }),
        }
    }

    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(((rank as u8) << 3) | file as u8)
    }

    pub const fn file(&self) -> File {
        File::from_index((self.0 & 7) as usize)
    }

    pub const fn rank(&self) -> Rank {
        Rank::from_index((self.0 >> 3) as usize)
    }

    #[inline]
    pub const fn row(&self) -> usize {
        (self.0 >> 3) as usize
    }

    #[inline]
    pub const fn col(&self) -> usize {
        (self.0 & 7) as usize
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the coordinate shifted by `delta_row` rows and `delta_col` columns, or `None`
    /// if it leaves the board
    pub fn try_shift(self, delta_row: isize, delta_col: isize) -> Option<Coord> {
        Coord::new(self.row() as isize + delta_row, self.col() as isize + delta_col).ok()
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.0 < 64 {
            return write!(f, "Coord({})", self);
        }
        write!(f, "Coord(?{:?})", self.0)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file().as_char(), self.rank().as_char())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file_ch, rank_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file_ch), Some(rank_ch), None) => (file_ch, rank_ch),
            _ => return Err(CoordParseError::BadLength),
        };
        Ok(Coord::from_parts(
            File::from_char(file_ch).ok_or(CoordParseError::UnexpectedFileChar(file_ch))?,
            Rank::from_char(rank_ch).ok_or(CoordParseError::UnexpectedRankChar(rank_ch))?,
        ))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// Returns the lowercase name of the color, like `"white"`
    pub fn name(&self) -> &'static str {
        match *self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch)),
            _ => Err(ColorParseError::BadLength),
        }
    }
}

/// Piece variant
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl Piece {
    pub const COUNT: usize = 6;

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Returns the uppercase letter of the piece, as used in SAN and FEN
    pub fn as_char(&self) -> char {
        match *self {
            Piece::Pawn => 'P',
            Piece::King => 'K',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
        }
    }

    /// Parses an uppercase piece letter
    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            'P' => Some(Piece::Pawn),
            'K' => Some(Piece::King),
            'N' => Some(Piece::Knight),
            'B' => Some(Piece::Bishop),
            'R' => Some(Piece::Rook),
            'Q' => Some(Piece::Queen),
            _ => None,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [
            Piece::Pawn,
            Piece::King,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
        ]
        .into_iter()
    }
}

/// A piece standing on the board
///
/// Besides its variant and color, it remembers whether this particular piece has ever been
/// relocated. This flag drives castling and pawn double-step eligibility.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Chessman {
    pub piece: Piece,
    pub color: Color,
    pub moved: bool,
}

impl Chessman {
    /// Creates a piece that has never moved
    pub const fn new(color: Color, piece: Piece) -> Chessman {
        Chessman {
            piece,
            color,
            moved: false,
        }
    }

    pub const fn with_moved(self, moved: bool) -> Chessman {
        Chessman { moved, ..self }
    }

    pub fn is(&self, color: Color, piece: Piece) -> bool {
        self.color == color && self.piece == piece
    }

    /// Returns the FEN letter of the piece (uppercase for White, lowercase for Black)
    pub fn as_char(&self) -> char {
        let c = self.piece.as_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn as_utf8_char(&self) -> char {
        let glyphs = match self.color {
            Color::White => ['♙', '♔', '♘', '♗', '♖', '♕'],
            Color::Black => ['♟', '♚', '♞', '♝', '♜', '♛'],
        };
        glyphs[self.piece.index()]
    }

    /// Parses the FEN letter of the piece. The resulting piece has never moved.
    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = Piece::from_char(c.to_ascii_uppercase())?;
        Some(Chessman::new(color, piece))
    }
}

impl fmt::Display for Chessman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Chessman {
    type Err = ChessmanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                Chessman::from_char(ch).ok_or(ChessmanParseError::UnexpectedChar(ch))
            }
            _ => Err(ChessmanParseError::BadLength),
        }
    }
}

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl PromotePiece {
    /// All the promotion targets, in the order they are generated
    pub const ALL: [PromotePiece; 4] = [
        PromotePiece::Queen,
        PromotePiece::Rook,
        PromotePiece::Bishop,
        PromotePiece::Knight,
    ];

    pub fn as_char(&self) -> char {
        Piece::from(*self).as_char()
    }

    pub fn from_char(c: char) -> Option<PromotePiece> {
        Piece::from_char(c.to_ascii_uppercase())?.try_into().ok()
    }
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => Piece::Knight,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Queen => Piece::Queen,
        }
    }
}

impl TryFrom<Piece> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: Piece) -> Result<Self, Self::Error> {
        match p {
            Piece::Knight => Ok(PromotePiece::Knight),
            Piece::Bishop => Ok(PromotePiece::Bishop),
            Piece::Rook => Ok(PromotePiece::Rook),
            Piece::Queen => Ok(PromotePiece::Queen),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

/// State of the game
///
/// The game starts as [`GameResult::Ongoing`] and may move into one of the other states
/// exactly once. There is no way back.
#[derive(Debug, Default, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameResult {
    #[default]
    #[display(fmt = "Game in progress")]
    Ongoing,
    #[display(fmt = "White wins!")]
    WhiteWin,
    #[display(fmt = "Black wins!")]
    BlackWin,
    #[display(fmt = "Game ends in a draw")]
    Draw,
    #[display(fmt = "White resigned - Black wins!")]
    WhiteResigned,
    #[display(fmt = "Black resigned - White wins!")]
    BlackResigned,
}

impl GameResult {
    pub fn is_over(&self) -> bool {
        *self != GameResult::Ongoing
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            Self::WhiteWin | Self::BlackResigned => Some(Color::White),
            Self::BlackWin | Self::WhiteResigned => Some(Color::Black),
            Self::Ongoing | Self::Draw => None,
        }
    }

    pub fn win(color: Color) -> GameResult {
        match color {
            Color::White => Self::WhiteWin,
            Color::Black => Self::BlackWin,
        }
    }

    pub fn resigned(color: Color) -> GameResult {
        match color {
            Color::White => Self::WhiteResigned,
            Color::Black => Self::BlackResigned,
        }
    }

    /// Returns the result token used in PGN movetext
    pub fn as_pgn_token(&self) -> &'static str {
        match self {
            Self::Ongoing => "*",
            Self::Draw => "1/2-1/2",
            Self::WhiteWin | Self::BlackResigned => "1-0",
            Self::BlackWin | Self::WhiteResigned => "0-1",
        }
    }
}

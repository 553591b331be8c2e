//! Reading and writing PGN movetext
//!
//! Only the parts needed to exchange game records are supported. Tag pairs are written as the
//! Seven Tag Roster and skipped while reading, without any validation.

use crate::engine::Engine;
use crate::error::Error;
use crate::moves::San;
use crate::types::{Color, GameResult};

use std::io;

use log::debug;
use thiserror::Error;

/// Error applying PGN movetext to an [`Engine`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("cannot apply move {token:?} at ply {ply}: {source}")]
pub struct ReadError {
    /// Number of moves successfully applied before the failure
    pub ply: usize,
    /// Offending movetext token
    pub token: String,
    pub source: Error,
}

/// Error writing PGN
#[derive(Debug, Error)]
pub enum WriteError {
    /// Game log cannot be replayed from its initial position
    #[error("cannot replay move #{0}: {1}")]
    Replay(usize, Error),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

fn strip_annotations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut closing = None;
    for ch in text.chars() {
        match closing {
            Some(c) if c == ch => {
                closing = None;
                out.push(' ');
            }
            Some(_) => {}
            None => match ch {
                '[' => closing = Some(']'),
                '{' => closing = Some('}'),
                ';' => closing = Some('\n'),
                _ => out.push(ch),
            },
        }
    }
    out
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

/// Strips move number prefix, like `12.` or `12...`, from the token
fn strip_move_number(token: &str) -> &str {
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == token.len() || !rest.starts_with('.') {
        return token;
    }
    rest.trim_start_matches('.')
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '!' | '?'))
}

/// Applies SAN moves from PGN movetext `text` to `engine`, one by one
///
/// Tag pairs, comments, move numbers and result tokens are skipped. On failure, the moves
/// preceding the offending one remain applied.
pub fn read_movetext(engine: &mut Engine, text: &str) -> Result<(), ReadError> {
    let text = strip_annotations(text);
    let mut ply = 0;
    for token in text.split_whitespace() {
        if is_result_token(token) {
            continue;
        }
        let token = trim_annotation_suffix(strip_move_number(token));
        if token.is_empty() {
            continue;
        }
        engine
            .make(&San(token))
            .map_err(|source| ReadError {
                ply,
                token: token.to_string(),
                source,
            })?;
        ply += 1;
    }
    debug!("read {} moves from movetext", ply);
    Ok(())
}

/// PGN writer
///
/// Holds the values of the Seven Tag Roster. All of them default to `?`, except `Result`,
/// which is taken from the game unless set explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Writer {
    event: String,
    site: String,
    date: String,
    round: String,
    white: String,
    black: String,
    result: Option<GameResult>,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_tag_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Writer {
    pub fn new() -> Self {
        Writer {
            event: "?".to_string(),
            site: "?".to_string(),
            date: "?".to_string(),
            round: "?".to_string(),
            white: "?".to_string(),
            black: "?".to_string(),
            result: None,
        }
    }

    pub fn event(mut self, value: impl Into<String>) -> Self {
        self.event = value.into();
        self
    }

    pub fn site(mut self, value: impl Into<String>) -> Self {
        self.site = value.into();
        self
    }

    /// Sets the date, in `YYYY.MM.DD` format
    pub fn date(mut self, value: impl Into<String>) -> Self {
        self.date = value.into();
        self
    }

    pub fn round(mut self, value: impl Into<String>) -> Self {
        self.round = value.into();
        self
    }

    pub fn white(mut self, value: impl Into<String>) -> Self {
        self.white = value.into();
        self
    }

    pub fn black(mut self, value: impl Into<String>) -> Self {
        self.black = value.into();
        self
    }

    /// Overrides the game result
    pub fn result(mut self, value: GameResult) -> Self {
        self.result = Some(value);
        self
    }

    /// Renders the movetext of `engine`, including the result token
    ///
    /// The moves are replayed from the initial position of the game to obtain SAN with check
    /// suffixes.
    pub fn movetext(&self, engine: &Engine) -> Result<String, WriteError> {
        let (board, side) = engine.initial();
        let mut replay =
            Engine::from_position(*board, side).map_err(|e| WriteError::Replay(0, e))?;
        let mut parts = Vec::with_capacity(engine.log().len() + 1);
        let mut number = 1;
        for (idx, mv) in engine.log().iter().enumerate() {
            let san = replay
                .san_with_suffix(mv)
                .map_err(|e| WriteError::Replay(idx, e))?;
            match replay.side() {
                Color::White => parts.push(format!("{}. {}", number, san)),
                Color::Black if idx == 0 => parts.push(format!("{}... {}", number, san)),
                Color::Black => parts.push(san),
            }
            if replay.side() == Color::Black {
                number += 1;
            }
            replay
                .execute(*mv)
                .map_err(|e| WriteError::Replay(idx, e))?;
        }
        parts.push(self.result_token(engine).to_string());
        Ok(parts.join(" "))
    }

    fn result_token(&self, engine: &Engine) -> &'static str {
        self.result.unwrap_or_else(|| engine.result()).as_pgn_token()
    }

    /// Writes the game `engine` as PGN into `w`
    pub fn write(&self, engine: &Engine, mut w: impl io::Write) -> Result<(), WriteError> {
        let movetext = self.movetext(engine)?;
        for (name, value) in [
            ("Event", &self.event),
            ("Site", &self.site),
            ("Date", &self.date),
            ("Round", &self.round),
            ("White", &self.white),
            ("Black", &self.black),
        ] {
            writeln!(w, "[{} \"{}\"]", name, escape_tag_value(value))?;
        }
        writeln!(w, "[Result \"{}\"]", self.result_token(engine))?;
        writeln!(w)?;
        writeln!(w, "{}", movetext)?;
        Ok(())
    }

    /// Writes the game `engine` as PGN into a string
    pub fn write_string(&self, engine: &Engine) -> Result<String, WriteError> {
        let mut buf = Vec::new();
        self.write(engine, &mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoveError;

    const SCHOLAR: &str = r#"[Event "Casual game"]
[White "Alice"]
[Black "Bob"]
[Result "1-0"]

1. e4 e5 2. Bc4 {the bishop eyes f7} Nc6 3. Qh5 Nf6?? ; oops
4. Qxf7# 1-0
"#;

    #[test]
    fn test_read() {
        let mut engine = Engine::new();
        read_movetext(&mut engine, SCHOLAR).unwrap();
        assert_eq!(engine.log().len(), 7);
        assert_eq!(engine.result(), GameResult::WhiteWin);
        assert_eq!(engine.reason(), Some("Checkmate"));
    }

    #[test]
    fn test_move_numbers() {
        assert_eq!(strip_move_number("12."), "");
        assert_eq!(strip_move_number("12..."), "");
        assert_eq!(strip_move_number("3.e4"), "e4");
        assert_eq!(strip_move_number("3...e5"), "e5");
        assert_eq!(strip_move_number("e4"), "e4");
        assert_eq!(strip_move_number("0-0"), "0-0");

        let mut engine = Engine::new();
        read_movetext(&mut engine, "1.e4 1...e5 2.Nf3 *").unwrap();
        assert_eq!(engine.log().len(), 3);
        assert_eq!(engine.side(), Color::Black);
    }

    #[test]
    fn test_read_error() {
        let mut engine = Engine::new();
        assert_eq!(
            read_movetext(&mut engine, "1. e4 e5 2. Ke3 Nc6"),
            Err(ReadError {
                ply: 2,
                token: "Ke3".to_string(),
                source: Error::InvalidMove(MoveError::NoMatch("Ke3".to_string())),
            })
        );
        assert_eq!(engine.log().len(), 2);
    }

    #[test]
    fn test_write() {
        let mut engine = Engine::new();
        read_movetext(&mut engine, SCHOLAR).unwrap();
        let pgn = Writer::new()
            .event("Casual game")
            .white("Alice")
            .black("Bob")
            .write_string(&engine)
            .unwrap();
        assert_eq!(
            pgn,
            r#"[Event "Casual game"]
[Site "?"]
[Date "?"]
[Round "?"]
[White "Alice"]
[Black "Bob"]
[Result "1-0"]

1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# 1-0
"#
        );

        let mut copy = Engine::new();
        read_movetext(&mut copy, &pgn).unwrap();
        assert_eq!(copy, engine);
    }

    #[test]
    fn test_write_custom() {
        let mut engine = Engine::from_fen("4k3/8/8/8/8/8/4P3/4K3 b").unwrap();
        read_movetext(&mut engine, "1... Kd7 2. e4 Kd6").unwrap();
        let writer = Writer::new().event("Say \"hi\"");
        assert_eq!(writer.movetext(&engine).unwrap(), "1... Kd7 2. e4 Kd6 *");

        let pgn = writer.result(GameResult::Draw).write_string(&engine).unwrap();
        assert!(pgn.starts_with("[Event \"Say \\\"hi\\\"\"]\n"));
        assert!(pgn.contains("[Result \"1/2-1/2\"]\n"));
        assert!(pgn.ends_with("\n1... Kd7 2. e4 Kd6 1/2-1/2\n"));
    }

    #[test]
    fn test_write_checks() {
        let mut engine = Engine::new();
        read_movetext(&mut engine, "e4 f5 Qh5+ g6").unwrap();
        engine.resign().unwrap();
        assert_eq!(
            Writer::new().movetext(&engine).unwrap(),
            "1. e4 f5 2. Qh5+ g6 0-1"
        );
    }
}

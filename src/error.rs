use crate::{util::Code, Mode, ParseError};
use std::fmt::Display;

impl ParseError {
    pub fn new(pointer: usize, message: String) -> Self {
        Self { pointer, message }
    }

    /// No rule of the active mode matched at `pointer`.
    pub fn lexical(code: &Code, pointer: usize, mode: Mode) -> Self {
        Self::new(
            pointer,
            format!(
                "No lexical rule of mode {:?} matched at {} near {:?}",
                mode,
                code.obtain_position(pointer),
                code.snippet_at(pointer)
            ),
        )
    }

    /// The input ended while a string or comment mode was still open.
    pub fn unterminated(code: &Code, mode: Mode) -> Self {
        let pointer = code.value.len();
        Self::new(
            pointer,
            format!(
                "Unterminated {} at end of input ({})",
                mode.construct_name(),
                code.obtain_position(pointer)
            ),
        )
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SyntaxError: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

use crate::{Category, Lex, Terminal};
use std::fmt::{Display, Formatter};

impl Display for Lex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("")
            .field(&self.category)
            .field(&self.start)
            .field(&self.end)
            .finish()
    }
}

impl Lex {
    pub fn new(category: Category, start: usize, end: usize) -> Self {
        Self {
            category,
            start,
            end,
        }
    }
}

impl Terminal {
    pub fn new(
        name: &'static str,
        value: String,
        raw: String,
        start: usize,
        end: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            name,
            value,
            raw,
            start,
            end,
            line,
            column,
        }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} @ {}..{} ({}:{})",
            self.name, self.value, self.start, self.end, self.line, self.column
        )
    }
}

use super::{Code, Position};
use once_cell::unsync::OnceCell;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

impl<'c> From<&'c [u8]> for Code<'c> {
    fn from(value: &'c [u8]) -> Self {
        Code::new(value)
    }
}
impl<'c> From<&'c str> for Code<'c> {
    fn from(value: &'c str) -> Self {
        Code::new(value.as_bytes())
    }
}

impl<'c> Code<'c> {
    pub fn new(value: &'c [u8]) -> Self {
        Self {
            value,
            line_breaks: OnceCell::new(),
        }
    }

    pub fn obtain_line_breaks(&self) -> &Vec<usize> {
        self.line_breaks.get_or_init(|| {
            self.value
                .iter()
                .enumerate()
                .filter_map(|(index, n)| if *n == b'\n' { Some(index) } else { None })
                .collect()
        })
    }

    /// Compute the 1-based line and column of a byte pointer.
    pub fn obtain_position(&self, pointer: usize) -> Position {
        let line_breaks = self.obtain_line_breaks();
        let index = match line_breaks.binary_search(&pointer) {
            Ok(index) | Err(index) => index,
        };

        if index == 0 {
            Position {
                line: 1,
                column: pointer + 1,
            }
        } else {
            let break_point = line_breaks[index - 1] + 1;
            Position {
                line: index + 1,
                column: pointer - break_point + 1,
            }
        }
    }

    /// Recover the source text backing a `start..end` byte span.
    pub fn text_of(&self, start: usize, end: usize) -> Cow<'c, str> {
        String::from_utf8_lossy(&self.value[start..end])
    }

    /// Whether a pointer sits at the beginning of a line.
    pub fn at_line_start(&self, pointer: usize) -> bool {
        pointer == 0 || self.value[pointer - 1] == b'\n'
    }

    /// A short snippet of the source following a pointer, for error messages.
    pub fn snippet_at(&self, pointer: usize) -> Cow<'c, str> {
        let end = self
            .value
            .len()
            .min(pointer + 24)
            .min(match self.value[pointer..].iter().position(|b| *b == b'\n') {
                Some(nl) => pointer + nl,
                None => self.value.len(),
            });
        String::from_utf8_lossy(&self.value[pointer..end])
    }
}

impl Display for Position {
    // Rendered the way positions read in tokenizer error messages.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

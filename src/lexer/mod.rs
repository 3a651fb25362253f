//! The terminal adapter which turns the raw category stream into parser
//! terminals.
//!
//! The adapter performs four jobs on top of the tokenizer's output: it
//! coalesces adjacent single-character operator emissions into their maximal
//! multi-character operator, resolves every `(category, lexeme)` pair to a
//! terminal of the grammar alphabet, expands syntactic sugar (labels,
//! interpolation paths, `${` openers) into multiple terminals, and attaches
//! byte spans with line/column information while silently dropping
//! whitespace and comments (newlines survive as `NL`).
//!
//! # Example
//!
//! ```
//! use groovy_pt::{Code, GroovyLexer};
//!
//! let lexer = GroovyLexer::new();
//! let terminals = lexer.lex(&Code::from("a = 1 + 2")).unwrap();
//! let names: Vec<&str> = terminals.iter().map(|t| t.name).collect();
//! assert_eq!(
//!     names,
//!     vec!["IDENTIFIER", "ASSIGN", "INTEGER_LITERAL", "ADD", "INTEGER_LITERAL"]
//! );
//! ```

mod mapping;
mod op_trie;


use crate::{util::Code, Category, GroovyTokenizer, Lex, ParseError, Terminal};

pub use mapping::COMBINED_OPERATORS;

/// A byte trie over the multi-character operator set.
///
/// The coalescer asks two questions of the set: can a candidate still grow
/// into an operator (prefix walk), and can a first character open one at all
/// (root probe).
pub struct OperatorTrie {
    terminal: bool,
    children: Vec<(u8, OperatorTrie)>,
}

/// Adapts the raw `(category, lexeme)` stream into grammar terminals.
pub struct TerminalAdapter {
    operators: OperatorTrie,
}

impl TerminalAdapter {
    pub fn new() -> Self {
        Self {
            operators: OperatorTrie::with_operators(&COMBINED_OPERATORS),
        }
    }

    /// Convert a raw stream over `code` into the terminal stream.
    ///
    /// Every raw token either yields one or more terminals, or is filtered;
    /// filtered tokens still advance the source cursor, so spans stay exact.
    pub fn adapt(&self, code: &Code, stream: &[Lex]) -> Vec<Terminal> {
        self.map_terminals(self.coalesce(code, stream))
    }

    /// Merge runs of operator lexemes into their maximal known operator.
    ///
    /// The pending buffer holds at most one operator candidate. A following
    /// token of any category may extend it while the joined text is still a
    /// prefix of a known operator; this is what fuses `!` with `instanceof`
    /// and `in`. The merged token keeps the operator category.
    fn coalesce(&self, code: &Code, stream: &[Lex]) -> Vec<(Category, String)> {
        let mut tokens: Vec<(Category, String)> = Vec::with_capacity(stream.len());
        let mut pending: Option<String> = None;

        for lex in stream {
            let lexeme = code.text_of(lex.start, lex.end);

            if let Some(buffer) = pending.take() {
                let mut candidate = buffer;
                candidate.push_str(&lexeme);
                if self.operators.is_prefix(candidate.as_bytes()) {
                    pending = Some(candidate);
                    continue;
                }
                candidate.truncate(candidate.len() - lexeme.len());
                tokens.push((Category::Operator, candidate));
            }

            if lex.category == Category::Operator
                && self.operators.opens_with(lexeme.as_bytes()[0])
            {
                pending = Some(lexeme.into_owned());
            } else {
                tokens.push((lex.category, lexeme.into_owned()));
            }
        }
        if let Some(buffer) = pending {
            tokens.push((Category::Operator, buffer));
        }
        tokens
    }

    /// Map each coalesced token to its terminals and lay out spans with a
    /// running byte cursor. Multi-terminal expansions partition the raw
    /// lexeme bytes sequentially.
    fn map_terminals(&self, tokens: Vec<(Category, String)>) -> Vec<Terminal> {
        let mut terminals: Vec<Terminal> = Vec::with_capacity(tokens.len());
        let mut start_pos = 0usize;
        let mut line = 1usize;
        let mut column = 0usize;

        for (category, raw) in tokens {
            for (name, value, raw_piece) in expand_token(category, &raw) {
                let next_pos = start_pos + raw_piece.len();
                let next_line = line + raw_piece.bytes().filter(|b| *b == b'\n').count();
                let next_column = match raw_piece.rfind('\n') {
                    Some(last_break) => raw_piece.len() - last_break - 1,
                    None => column + raw_piece.len(),
                };

                if let Some(name) = name {
                    terminals.push(Terminal::new(
                        name, value, raw_piece, start_pos, next_pos, line, column,
                    ));
                }
                start_pos = next_pos;
                line = next_line;
                column = next_column;
            }
        }
        terminals
    }
}

impl Default for TerminalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

type Expansion = (Option<&'static str>, String, String);

fn piece(name: &'static str, value: &str, raw: &str) -> Expansion {
    (Some(name), value.to_string(), raw.to_string())
}

/// The special-case ladder over the categories the dictionaries do not
/// claim, in the fixed precedence order the mapping contract requires.
fn expand_token(category: Category, raw: &str) -> Vec<Expansion> {
    if category == Category::NameLabel {
        let name = &raw[..raw.len() - 1];
        return vec![piece("IDENTIFIER", name, name), piece("COLON", ":", ":")];
    }
    if let Some(mapped) = mapping::mapped_terminal(category, raw) {
        return vec![(mapped, raw.to_string(), raw.to_string())];
    }

    match category {
        Category::StringSingle => {
            let value = if raw.starts_with("'''") {
                &raw[3..raw.len() - 3]
            } else {
                &raw[1..raw.len() - 1]
            };
            vec![piece("STRING_LITERAL", value, raw)]
        }
        Category::GStringBegin => vec![piece("GSTRING_BEGIN", raw, raw)],
        Category::GStringPath => {
            let mut pieces = vec![piece("GSTRING_PART", "$", "$")];
            for identifier in raw[1..].split('.') {
                pieces.push(piece("IDENTIFIER", identifier, identifier));
                pieces.push(piece("DOT", ".", "."));
            }
            pieces.pop();
            pieces
        }
        Category::StringEscape => {
            vec![(
                Some("STRING_LITERAL_PART"),
                decode_escape(raw),
                raw.to_string(),
            )]
        }
        Category::GStringClosureBegin => {
            vec![piece("GSTRING_PART", "$", "$"), piece("LBRACE", "{", "{")]
        }
        Category::GStringClosureEnd => vec![piece("RBRACE", raw, raw)],
        Category::GStringEnd => vec![piece("GSTRING_END", raw, raw)],
        Category::StringDouble => vec![piece("STRING_LITERAL_PART", raw, raw)],
        Category::String => {
            if raw.len() >= 2 && raw.starts_with('/') && raw.ends_with('/') {
                vec![piece("STRING_LITERAL", &raw[1..raw.len() - 1], raw)]
            } else {
                vec![piece("SKIPPABLE", raw, raw)]
            }
        }
        _ => vec![piece("SKIPPABLE", raw, raw)],
    }
}

/// Normalize an escape lexeme: a two-character `\X` keeps the escaped
/// character; `\uXXXX` decodes the first four hex digits, any surplus digits
/// staying literal.
fn decode_escape(raw: &str) -> String {
    if raw.chars().count() == 2 {
        return raw[1..].to_string();
    }
    if let Some(digits) = raw.strip_prefix("\\u") {
        if digits.len() >= 4 {
            let (hex, rest) = digits.split_at(4);
            if let Some(decoded) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                let mut value = String::with_capacity(rest.len() + 4);
                value.push(decoded);
                value.push_str(rest);
                return value;
            }
        }
    }
    raw.to_string()
}

/// The end-to-end lexical frontend: tokenizer and adapter coupled behind a
/// single call.
pub struct GroovyLexer {
    tokenizer: GroovyTokenizer,
    adapter: TerminalAdapter,
}

impl GroovyLexer {
    pub fn new() -> Self {
        Self {
            tokenizer: GroovyTokenizer::new(),
            adapter: TerminalAdapter::new(),
        }
    }

    /// Tokenize and adapt `code` into the terminal stream the grammar
    /// consumes.
    pub fn lex(&self, code: &Code) -> Result<Vec<Terminal>, ParseError> {
        let stream = self.tokenizer.tokenize(code)?;
        Ok(self.adapter.adapt(code, &stream))
    }

    /// The underlying tokenizer, for grammar dumps and log labels.
    pub fn tokenizer(&self) -> &GroovyTokenizer {
        &self.tokenizer
    }
}

impl Default for GroovyLexer {
    fn default() -> Self {
        Self::new()
    }
}

//! Groovy parsing tool (groovy_pt) is a library to tokenize Groovy 3 source
//! text, with an emphasis on the Nextflow DSL dialect, and to adapt the
//! result into the typed terminal stream a grammar-driven parser consumes.
//!
//! # Overview
//!
//! Groovy's lexical grammar is context sensitive: a `/` is division, a
//! regex delimiter or a comment opener depending on what precedes it;
//! `$`-interpolation inside double-quoted and slashy strings nests arbitrary
//! expressions; multi-character operators must be coalesced out of
//! single-character emissions; and labels are lexed as one unit but consumed
//! by the grammar as two terminals. The library splits the problem in two
//! stages:
//!
//! * [GroovyTokenizer] is a pushdown state machine whose modes each own an
//!   ordered table of anchored regular expression rules. It emits a raw
//!   stream of [Lex] spans tagged with a hierarchical [Category]; the
//!   concatenated spans reproduce the input byte for byte.
//! * [TerminalAdapter] coalesces operators, maps `(category, lexeme)`
//!   pairs onto the fixed terminal alphabet (walking category parents when a
//!   tag has no mapping of its own), expands labels and interpolation sugar,
//!   filters whitespace and comments while keeping newlines as `NL`
//!   terminals, and attaches byte spans with line and column information.
//!
//! The [GroovyLexer] facade couples the two. On top of the terminal stream,
//! [ParseTree] and [TreeDigester] turn an external parser's tree into a
//! compact JSON digest, and [NfFeatures] extracts Nextflow `process`,
//! `workflow` and `include` declarations from that digest.
//!
//! # Example
//!
//! ```
//! use groovy_pt::{Code, GroovyLexer};
//!
//! let lexer = GroovyLexer::new();
//! let terminals = lexer.lex(&Code::from("x >>>= y")).unwrap();
//! let names: Vec<&str> = terminals.iter().map(|t| t.name).collect();
//! assert_eq!(names, vec!["IDENTIFIER", "URSHIFT_ASSIGN", "IDENTIFIER"]);
//! ```
//!
//! # License
//! [groovy_pt](crate) is provided under the MIT license.

mod category;
mod error;
mod lex;
mod lexer;
mod nextflow;
mod tokenizer;
mod tree;
mod util;

pub use category::Category;
pub use lexer::{GroovyLexer, OperatorTrie, TerminalAdapter, COMBINED_OPERATORS};
pub use nextflow::{NfFeatures, NfInclude, NfProcess, NfWorkflow};
pub use tokenizer::{
    Action, DefaultRule, GroovyTokenizer, IRule, Mode, PatternRule, SignatureRule,
};
pub use tree::{mirror_source, ParseTree, TreeDigester};
pub use util::{Code, Log, Position};

#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
/// Element of the raw tokenized data: a categorized byte span of the input.
pub struct Lex {
    pub category: Category,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A token of the grammar-facing terminal alphabet.
///
/// `value` is the normalized lexeme (quotes stripped, escapes decoded);
/// `raw` is the exact source text backing the `start..end` byte span. `line`
/// is 1-based and `column` is the 0-based byte offset within the line, both
/// referring to the start of the span.
pub struct Terminal {
    pub name: &'static str,
    pub value: String,
    pub raw: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug)]
/// An error returned when the tokenizer cannot carry a source text into a
/// terminal stream: either no rule matched at a position, or the input ended
/// inside an unterminated string or comment.
pub struct ParseError {
    pub pointer: usize,
    pub message: String,
}

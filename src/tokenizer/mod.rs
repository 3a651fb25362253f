//! The stateful tokenizer for Groovy 3 source text.
//!
//! Tokenization is driven by a stack of lexical [modes](Mode). Every mode
//! owns an ordered table of [rules](IRule); at each position the rules of the
//! top-of-stack mode are tried in declared order and the first match wins. A
//! matching rule emits zero or more [Lex] spans and may push or pop modes,
//! which is how nested constructs (strings, interpolations, comments and
//! bracketed regions) switch the active rule table.
//!
//! # Example
//!
//! ```
//! use groovy_pt::{Category, Code, GroovyTokenizer};
//!
//! let tokenizer = GroovyTokenizer::new();
//! let code = Code::from("a = 1\n");
//! let stream = tokenizer.tokenize(&code).unwrap();
//! let categories: Vec<Category> = stream.iter().map(|lex| lex.category).collect();
//! assert_eq!(
//!     categories,
//!     vec![
//!         Category::Name,
//!         Category::Whitespace,
//!         Category::Operator,
//!         Category::Whitespace,
//!         Category::NumberInteger,
//!         Category::Whitespace,
//!     ]
//! );
//! ```

mod grammar;
mod rule;

#[cfg(test)]
mod __tests__;

use crate::{util::Code, util::Log, Lex, ParseError};
use once_cell::unsync::OnceCell;
use std::fmt::Write;
use std::rc::Rc;

pub use rule::{DefaultRule, PatternRule, SignatureRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A lexical mode of the tokenizer. The top of the mode stack selects the
/// active rule table.
pub enum Mode {
    Root,
    Base,
    Class,
    Import,
    Braces,
    Parens,
    Brackets,
    MultilineComment,
    GString,
    TripleGString,
    SlashyGString,
    DollarSlashyGString,
    GStringClosure,
}

impl Mode {
    /// The modes which must be closed before the end of input. Bracketed
    /// regions left open are tolerated here and rejected by the grammar.
    pub fn requires_terminator(&self) -> bool {
        matches!(
            self,
            Mode::MultilineComment
                | Mode::GString
                | Mode::TripleGString
                | Mode::SlashyGString
                | Mode::DollarSlashyGString
                | Mode::GStringClosure
        )
    }

    pub(crate) fn construct_name(&self) -> &'static str {
        match self {
            Mode::MultilineComment => "multi-line comment",
            Mode::GString => "double-quoted gstring",
            Mode::TripleGString => "triple-quoted gstring",
            Mode::SlashyGString => "slashy gstring",
            Mode::DollarSlashyGString => "dollar-slashy gstring",
            Mode::GStringClosure => "gstring closure",
            Mode::Root => "root",
            Mode::Base => "base",
            Mode::Class => "class declaration",
            Mode::Import => "import declaration",
            Mode::Braces => "braced block",
            Mode::Parens => "parenthesized block",
            Mode::Brackets => "bracketed block",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A mode stack transition fired by a matching rule.
///
/// `Pop2` variants exist for the rules which close a bracketed region from
/// within the `Base` mode entered through a default transition: one pop
/// removes the dangling `Base` entry and the second removes the bracket mode
/// itself.
pub enum Action {
    None,
    Push(Mode),
    Pop,
    Pop2,
    Pop2Push(Mode),
}

impl Action {
    pub(crate) fn perform(&self, stack: &mut Vec<Mode>) {
        match self {
            Action::None => {}
            Action::Push(mode) => stack.push(*mode),
            Action::Pop => pop_guarded(stack),
            Action::Pop2 => {
                pop_guarded(stack);
                pop_guarded(stack);
            }
            Action::Pop2Push(mode) => {
                pop_guarded(stack);
                pop_guarded(stack);
                stack.push(*mode);
            }
        }
    }
}

// Popping past the bottom resets the stack to the root mode. The
// method-signature rule emits `(` without entering a bracket mode, so its
// closing `)` over-pops.
fn pop_guarded(stack: &mut Vec<Mode>) {
    stack.pop();
    if stack.is_empty() {
        stack.push(Mode::Root);
    }
}

/// An interface implemented by the rule utilities which make up a mode's
/// rule table.
pub trait IRule {
    /// Try the rule at `pointer`. A successful match pushes its spans onto
    /// `stream`, applies its mode action to `stack`, and returns the new
    /// pointer. Matching never looks past `end`.
    fn consume(
        &self,
        tokenizer: &GroovyTokenizer,
        code: &Code,
        pointer: usize,
        end: usize,
        stream: &mut Vec<Lex>,
        stack: &mut Vec<Mode>,
    ) -> Result<Option<usize>, ParseError>;

    /// The category/pattern pairs the rule contributes to a grammar dump.
    fn grammar_fields(&self) -> Vec<(crate::Category, String)>;
}

/// The mode-keyed tokenizer for Groovy 3 / Nextflow source.
///
/// Construction installs the full rule table set; [tokenize](Self::tokenize)
/// then drives the tables over an input and returns the raw category stream.
pub struct GroovyTokenizer {
    modes: Vec<(Mode, Vec<Rc<dyn IRule>>)>,
    debug: OnceCell<Log<&'static str>>,
}

impl GroovyTokenizer {
    pub fn new() -> Self {
        Self {
            modes: grammar::mode_tables(),
            debug: OnceCell::new(),
        }
    }

    /// Set a log label to debug the tokenizer. Based on the level of the
    /// [Log], mode switches and failures are reported.
    pub fn set_log(&self, log_label: Log<&'static str>) -> Result<(), String> {
        self.debug
            .set(log_label)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    fn rules_for(&self, mode: Mode) -> &Vec<Rc<dyn IRule>> {
        match self.modes.binary_search_by_key(&mode, |(m, _)| *m) {
            Ok(index) => &self.modes[index].1,
            Err(_) => panic!("Tokenization mode '{:?}' is not implemented", mode),
        }
    }

    /// Tokenize the code and return the raw lexeme stream.
    ///
    /// Concatenating the spans of the returned stream reproduces the input
    /// exactly. Errors carry the failure position: either no rule matched, or
    /// the input ended inside an unterminated string or comment.
    pub fn tokenize(&self, code: &Code) -> Result<Vec<Lex>, ParseError> {
        let mut stream: Vec<Lex> = Vec::new();
        let mut stack = vec![Mode::Root];
        self.run(code, 0, code.value.len(), &mut stream, &mut stack)?;

        if let Some(open) = stack.iter().rev().find(|mode| mode.requires_terminator()) {
            return Err(ParseError::unterminated(code, *open));
        }
        Ok(stream)
    }

    /// Drive the rule tables over `start..end`. Used for whole inputs and,
    /// recursively, for the return-type prefix of a method signature.
    pub(crate) fn run(
        &self,
        code: &Code,
        start: usize,
        end: usize,
        stream: &mut Vec<Lex>,
        stack: &mut Vec<Mode>,
    ) -> Result<(), ParseError> {
        let mut pointer = start;
        let mut current_mode = *stack.last().unwrap_or(&Mode::Root);

        #[cfg(debug_assertions)]
        let debug = self.debug.get().map_or(Log::None, |s| *s);

        while pointer < end {
            let rules = self.rules_for(current_mode);

            let mut next_pointer = None;
            for rule in rules {
                if let Some(next) = rule.consume(self, code, pointer, end, stream, stack)? {
                    next_pointer = Some(next);
                    break;
                }
            }

            match next_pointer {
                Some(next) => {
                    debug_assert!(stream.last().map_or(true, |lex| lex.end <= next));
                    pointer = next;
                }
                None => {
                    #[cfg(debug_assertions)]
                    if debug != Log::None {
                        println!(
                            "{}: Tokenization failed in mode {:?} at {}",
                            debug,
                            current_mode,
                            code.obtain_position(pointer)
                        );
                    }
                    return Err(ParseError::lexical(code, pointer, current_mode));
                }
            }

            let latest_mode = *stack.last().unwrap_or(&Mode::Root);
            if latest_mode != current_mode {
                #[cfg(debug_assertions)]
                if matches!(debug, Log::Verbose(_)) {
                    println!(
                        "{} : Switching mode {:?} -> {:?} at {}",
                        debug,
                        current_mode,
                        latest_mode,
                        code.obtain_position(pointer)
                    );
                }
                current_mode = latest_mode;
            }
        }
        Ok(())
    }

    /// Render the rule tables as a readable grammar fragment per mode.
    pub fn build_grammar(&self) -> Result<String, std::fmt::Error> {
        let mut writer = String::new();
        for (mode, rules) in &self.modes {
            writeln!(writer, "fragment {:?} {{", mode)?;
            for fields in rules.iter().map(|r| r.grammar_fields()) {
                for (category, pattern) in &fields {
                    writeln!(writer, "{:>6}{:?} : {} ,", "", category, pattern)?;
                }
            }
            writeln!(writer, "}}")?;
            writeln!(writer)?;
        }
        Ok(writer)
    }
}

impl Default for GroovyTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

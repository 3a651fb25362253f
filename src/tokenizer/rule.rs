use super::{Action, GroovyTokenizer, IRule, Mode};
use crate::{util::Code, util::Log, Category, Lex, ParseError};
use once_cell::unsync::OnceCell;
use regex::bytes::Regex;

/// A regular expression based rule.
///
/// The pattern is matched at the current position of the input; its capture
/// groups must tile the whole match, and each group is emitted as a [Lex]
/// with the category at the same index in `groups`. Empty groups are skipped.
/// The pattern must be anchored (`^`) and must not match the empty string.
pub struct PatternRule {
    regexp: Regex,
    groups: Vec<Category>,
    action: Action,
    bol: bool,
    log: OnceCell<Log<&'static str>>,
}

impl PatternRule {
    pub fn new(pattern: &str, groups: Vec<Category>, action: Action) -> Result<Self, String> {
        let regexp = Regex::new(pattern)
            .map_err(|err| format!("Rule pattern should be a valid regex expression.{:?}", err))?;

        if regexp.is_match(b"") {
            return Err(format!(
                "Rule pattern '{}' should not be nullable.",
                regexp.as_str()
            ));
        }
        Ok(Self {
            regexp,
            groups,
            action,
            bol: false,
            log: OnceCell::new(),
        })
    }

    /// Restrict the rule to fire only at the beginning of a line.
    pub fn at_line_start(mut self) -> Self {
        self.bol = true;
        self
    }

    /// Set a log label to debug the rule.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.log
            .set(log)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }
}

impl IRule for PatternRule {
    fn consume(
        &self,
        _: &GroovyTokenizer,
        code: &Code,
        pointer: usize,
        end: usize,
        stream: &mut Vec<Lex>,
        stack: &mut Vec<Mode>,
    ) -> Result<Option<usize>, ParseError> {
        if self.bol && !code.at_line_start(pointer) {
            return Ok(None);
        }
        let captures = match self.regexp.captures(&code.value[pointer..end]) {
            Some(captures) => captures,
            None => {
                if let Some(log) = self.log.get() {
                    log.trace_rule_result(pointer, &[], code);
                }
                return Ok(None);
            }
        };

        let whole = captures.get(0).map_or(0, |m| m.end());
        debug_assert!(captures.get(0).map_or(false, |m| m.start() == 0));

        // The groups must tile the whole match, or spans would leak bytes.
        #[cfg(debug_assertions)]
        {
            let mut covered = 0;
            for index in 0..self.groups.len() {
                if let Some(group) = captures.get(index + 1) {
                    debug_assert_eq!(group.start(), covered);
                    covered = group.end();
                }
            }
            debug_assert_eq!(covered, whole);
        }

        let emitted_from = stream.len();
        for (index, category) in self.groups.iter().enumerate() {
            if let Some(group) = captures.get(index + 1) {
                if group.end() > group.start() {
                    stream.push(Lex::new(
                        *category,
                        pointer + group.start(),
                        pointer + group.end(),
                    ));
                }
            }
        }

        if let Some(log) = self.log.get() {
            log.trace_rule_result(pointer, &stream[emitted_from..], code);
        }

        self.action.perform(stack);
        Ok(Some(pointer + whole))
    }

    fn grammar_fields(&self) -> Vec<(Category, String)> {
        self.groups
            .iter()
            .map(|category| {
                (
                    *category,
                    format!("/{}/", self.regexp.as_str().replace('/', "\\/")),
                )
            })
            .collect()
    }
}

/// A rule which transitions to another mode without consuming input.
///
/// Placed last in a table: when every other rule of the mode misses, the
/// target mode is pushed and lexing resumes with its table.
pub struct DefaultRule {
    target: Mode,
}

impl DefaultRule {
    pub fn new(target: Mode) -> Self {
        Self { target }
    }
}

impl IRule for DefaultRule {
    fn consume(
        &self,
        _: &GroovyTokenizer,
        _: &Code,
        pointer: usize,
        _: usize,
        _: &mut Vec<Lex>,
        stack: &mut Vec<Mode>,
    ) -> Result<Option<usize>, ParseError> {
        stack.push(self.target);
        Ok(Some(pointer))
    }

    fn grammar_fields(&self) -> Vec<(Category, String)> {
        Vec::new()
    }
}

/// The method-signature heuristic of the `Base` mode.
///
/// At the beginning of a line, a run of type-ish tokens followed by a method
/// name and `(` is recognized as a signature: the return-type prefix is
/// re-lexed through the tokenizer itself, the name is emitted as
/// [Category::NameFunction] and the parenthesis as a bare operator. No mode
/// is pushed for the parenthesis; the matching closer relies on the
/// tokenizer's pop-past-bottom recovery.
pub struct SignatureRule {
    regexp: Regex,
    log: OnceCell<Log<&'static str>>,
}

const SIGNATURE_PATTERN: &str = concat!(
    r"^(\s*(?:[a-zA-Z_][\w.\[\]]*\s+)+?)",     // return arguments
    r#"([a-zA-Z_]\w*"#,                        // method name
    r#"|"(?:\\\\|\\[^\\]|[^"\\])*""#,          // or double-quoted method name
    r#"|'(?:\\\\|\\[^\\]|[^'\\])*')"#,         // or single-quoted method name
    r"(\s*)(\()",                              // signature start
);

impl SignatureRule {
    pub fn new() -> Result<Self, String> {
        let regexp = Regex::new(SIGNATURE_PATTERN)
            .map_err(|err| format!("Rule pattern should be a valid regex expression.{:?}", err))?;
        Ok(Self {
            regexp,
            log: OnceCell::new(),
        })
    }

    /// Set a log label to debug the rule.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.log
            .set(log)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }
}

impl IRule for SignatureRule {
    fn consume(
        &self,
        tokenizer: &GroovyTokenizer,
        code: &Code,
        pointer: usize,
        end: usize,
        stream: &mut Vec<Lex>,
        _: &mut Vec<Mode>,
    ) -> Result<Option<usize>, ParseError> {
        if !code.at_line_start(pointer) {
            return Ok(None);
        }
        let captures = match self.regexp.captures(&code.value[pointer..end]) {
            Some(captures) => captures,
            None => return Ok(None),
        };

        let (prefix, name, gap, paren) = match (
            captures.get(1),
            captures.get(2),
            captures.get(3),
            captures.get(4),
        ) {
            (Some(prefix), Some(name), Some(gap), Some(paren)) => (prefix, name, gap, paren),
            _ => return Ok(None),
        };

        let emitted_from = stream.len();

        // The return-type prefix is tokenized with the ordinary tables.
        let mut sub_stack = vec![Mode::Root];
        tokenizer.run(
            code,
            pointer + prefix.start(),
            pointer + prefix.end(),
            stream,
            &mut sub_stack,
        )?;

        stream.push(Lex::new(
            Category::NameFunction,
            pointer + name.start(),
            pointer + name.end(),
        ));
        if gap.end() > gap.start() {
            stream.push(Lex::new(
                Category::Whitespace,
                pointer + gap.start(),
                pointer + gap.end(),
            ));
        }
        stream.push(Lex::new(
            Category::Operator,
            pointer + paren.start(),
            pointer + paren.end(),
        ));

        if let Some(log) = self.log.get() {
            log.trace_rule_result(pointer, &stream[emitted_from..], code);
        }

        Ok(Some(pointer + paren.end()))
    }

    fn grammar_fields(&self) -> Vec<(Category, String)> {
        vec![(
            Category::NameFunction,
            format!("/{}/", self.regexp.as_str().replace('/', "\\/")),
        )]
    }
}

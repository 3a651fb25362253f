//! The per-mode rule tables of the Groovy tokenizer.
//!
//! Rules are declared in matching order; the first pattern that matches at
//! the current position wins. The `Base` table carries the
//! division-vs-slashy-string disambiguation: after a token that can end an
//! expression (number, dotted attribute, identifier, closing bracket), a
//! following `/` is an operator or comment opener, never a string delimiter.

use super::{Action, DefaultRule, IRule, Mode, PatternRule, SignatureRule};
use crate::Category;
use std::rc::Rc;

const FLOAT: &str = r"[0-9][0-9]*\.[0-9]+(?:[eE][0-9]+)?[fd]?";
const HEX: &str = r"0x[0-9a-fA-F]+";
const INT: &str = r"[0-9]+L?";

fn rule(pattern: &str, groups: Vec<Category>, action: Action) -> Rc<dyn IRule> {
    Rc::new(PatternRule::new(pattern, groups, action).expect("valid built-in pattern"))
}

/// `<prefix>` followed by optional horizontal whitespace and either a
/// comment opener or a division `/`. Rules that close a bracketed region
/// additionally pop the region and its default `Base` entry.
fn slash_guarded(
    rules: &mut Vec<Rc<dyn IRule>>,
    prefix: &str,
    prefix_groups: &[Category],
    closes_bracket: bool,
) {
    let groups = |tail: &[Category]| -> Vec<Category> {
        prefix_groups.iter().chain(tail.iter()).copied().collect()
    };
    rules.push(rule(
        &format!(r"^{}([^\S\n]*)(/\*)", prefix),
        groups(&[Category::Whitespace, Category::None]),
        if closes_bracket {
            Action::Pop2Push(Mode::MultilineComment)
        } else {
            Action::Push(Mode::MultilineComment)
        },
    ));
    rules.push(rule(
        &format!(r"^{}([^\S\n]*)(//[^\n]*)", prefix),
        groups(&[Category::Whitespace, Category::CommentSingle]),
        if closes_bracket { Action::Pop2 } else { Action::None },
    ));
    rules.push(rule(
        &format!(r"^{}([^\S\n]*)(/)", prefix),
        groups(&[Category::Whitespace, Category::Operator]),
        if closes_bracket { Action::Pop2 } else { Action::None },
    ));
}

/// Interpolation openers shared by every gstring flavor: a dotted `$path`
/// and the `${` closure opener.
fn gstring_common(rules: &mut Vec<Rc<dyn IRule>>) {
    rules.push(rule(
        r"^(\$[a-zA-Z][a-zA-Z0-9_]*(?:\.[a-zA-Z][a-zA-Z0-9_]*)*)",
        vec![Category::GStringPath],
        Action::None,
    ));
    rules.push(rule(
        r"^(\$\{)",
        vec![Category::GStringClosureBegin],
        Action::Push(Mode::GStringClosure),
    ));
}

/// Interpolation plus backslash escapes, for the flavors that support them.
fn gstring_common_escape(rules: &mut Vec<Rc<dyn IRule>>) {
    gstring_common(rules);
    rules.push(rule(
        r"^(\\u[0-9A-Fa-f]+)",
        vec![Category::StringEscape],
        Action::None,
    ));
    rules.push(rule(
        r"^(\\(?s:.))",
        vec![Category::StringEscape],
        Action::None,
    ));
}

fn root_rules() -> Vec<Rc<dyn IRule>> {
    vec![
        rule(
            r"^(#![^\n]*)",
            vec![Category::CommentPreproc],
            Action::Push(Mode::Base),
        ),
        Rc::new(DefaultRule::new(Mode::Base)),
    ]
}

fn base_rules() -> Vec<Rc<dyn IRule>> {
    let mut rules: Vec<Rc<dyn IRule>> = Vec::with_capacity(52);

    rules.push(rule(
        r"^([^\S\n]+)",
        vec![Category::Whitespace],
        Action::None,
    ));
    rules.push(rule(
        r"^(//[^\n]*)",
        vec![Category::CommentSingle],
        Action::None,
    ));
    rules.push(rule(
        r"^(/\*)",
        vec![Category::None],
        Action::Push(Mode::MultilineComment),
    ));

    // Control keywords go before method names, so `throw new XYZ` is not
    // lexed as a method signature.
    rules.push(rule(
        r"^((?:assert|break|case|catch|continue|default|do|else|finally|for|if|goto|instanceof|new|return|switch|this|throw|try|while|in|as)\b)",
        vec![Category::Keyword],
        Action::None,
    ));
    rules.push(Rc::new(
        SignatureRule::new().expect("valid built-in pattern"),
    ));
    rules.push(rule(
        r"^(@[a-zA-Z_][\w.]*)",
        vec![Category::NameDecorator],
        Action::None,
    ));
    rules.push(rule(
        r"^((?:abstract|const|enum|extends|final|implements|native|private|protected|public|static|strictfp|super|synchronized|throws|transient|volatile)\b)",
        vec![Category::KeywordDeclaration],
        Action::None,
    ));
    rules.push(rule(
        r"^((?:def|boolean|byte|char|double|float|int|long|short|void)\b)",
        vec![Category::KeywordType],
        Action::None,
    ));
    rules.push(rule(
        r"^(package)(\s+)",
        vec![Category::KeywordNamespace, Category::Whitespace],
        Action::None,
    ));
    rules.push(rule(
        r"^((?:true|false|null)\b)",
        vec![Category::KeywordConstant],
        Action::None,
    ));
    rules.push(rule(
        r"^(class|interface)(\s+)",
        vec![Category::KeywordDeclaration, Category::Whitespace],
        Action::Push(Mode::Class),
    ));
    rules.push(rule(
        r"^(import)(\s+)",
        vec![Category::KeywordNamespace, Category::Whitespace],
        Action::Push(Mode::Import),
    ));

    rules.push(rule(
        r#"^(""")"#,
        vec![Category::GStringBegin],
        Action::Push(Mode::TripleGString),
    ));
    rules.push(rule(
        r#"^(")"#,
        vec![Category::GStringBegin],
        Action::Push(Mode::GString),
    ));
    rules.push(rule(
        r"^(\$/)",
        vec![Category::GStringBegin],
        Action::Push(Mode::DollarSlashyGString),
    ));

    // Division vs. slashy string disambiguation. `/=` is always an operator;
    // a `/` straight after an expression-ending token is division.
    rules.push(rule(r"^(/=)", vec![Category::Operator], Action::None));
    slash_guarded(&mut rules, &format!("({})", FLOAT), &[Category::NumberFloat], false);
    slash_guarded(&mut rules, &format!("({})", HEX), &[Category::NumberHex], false);
    slash_guarded(&mut rules, &format!("({})", INT), &[Category::NumberInteger], false);

    rules.push(rule(
        r"^('''(?s:.*?)''')",
        vec![Category::StringSingle],
        Action::None,
    ));
    rules.push(rule(
        r"^('(?:\\\\|\\[^\\]|[^'\\])*')",
        vec![Category::StringSingle],
        Action::None,
    ));
    rules.push(rule(
        r"^('\\(?s:.)'|'[^\\]'|'\\u[0-9a-fA-F]{4}')",
        vec![Category::StringChar],
        Action::None,
    ));

    slash_guarded(
        &mut rules,
        r"(\.)([a-zA-Z_]\w*)",
        &[Category::Operator, Category::NameAttribute],
        false,
    );
    rules.push(rule(
        r"^(\.)([a-zA-Z_]\w*)",
        vec![Category::Operator, Category::NameAttribute],
        Action::None,
    ));
    rules.push(rule(
        r"^([a-zA-Z_]\w*:)",
        vec![Category::NameLabel],
        Action::None,
    ));
    slash_guarded(&mut rules, r"([a-zA-Z_$]\w*)", &[Category::Name], false);
    rules.push(rule(
        r"^([a-zA-Z_$]\w*)",
        vec![Category::Name],
        Action::None,
    ));

    rules.push(rule(
        r"^(\{)",
        vec![Category::Operator],
        Action::Push(Mode::Braces),
    ));
    rules.push(rule(
        r"^(\()",
        vec![Category::Operator],
        Action::Push(Mode::Parens),
    ));
    rules.push(rule(
        r"^(\[)",
        vec![Category::Operator],
        Action::Push(Mode::Brackets),
    ));
    rules.push(rule(
        r"^([~^*!%&<>|+=:;,.?-])",
        vec![Category::Operator],
        Action::None,
    ));

    rules.push(rule(
        &format!("^({})", FLOAT),
        vec![Category::NumberFloat],
        Action::None,
    ));
    rules.push(rule(
        &format!("^({})", HEX),
        vec![Category::NumberHex],
        Action::None,
    ));
    rules.push(rule(
        &format!("^({})", INT),
        vec![Category::NumberInteger],
        Action::None,
    ));

    slash_guarded(&mut rules, r"([\]})])", &[Category::Operator], true);
    rules.push(rule(
        r"^([\]})])",
        vec![Category::Operator],
        Action::Pop2,
    ));

    rules.push(rule(
        r"^(/)",
        vec![Category::GStringBegin],
        Action::Push(Mode::SlashyGString),
    ));
    rules.push(rule(r"^(\n)", vec![Category::Whitespace], Action::None));

    rules
}

fn multiline_comment_rules() -> Vec<Rc<dyn IRule>> {
    vec![rule(
        r"^((?s:.*?)\*/)",
        vec![Category::CommentMultiline],
        Action::Pop,
    )]
}

fn bracket_rules(closer: &str) -> Vec<Rc<dyn IRule>> {
    vec![
        rule(closer, vec![Category::Operator], Action::Pop),
        Rc::new(DefaultRule::new(Mode::Base)),
    ]
}

fn class_rules() -> Vec<Rc<dyn IRule>> {
    vec![rule(
        r"^([a-zA-Z_]\w*)",
        vec![Category::NameClass],
        Action::Pop,
    )]
}

fn import_rules() -> Vec<Rc<dyn IRule>> {
    vec![rule(
        r"^([\w.]+\*?)",
        vec![Category::NameNamespace],
        Action::Pop,
    )]
}

fn gstring_rules() -> Vec<Rc<dyn IRule>> {
    let mut rules = vec![rule(r#"^(")"#, vec![Category::GStringEnd], Action::Pop)];
    gstring_common_escape(&mut rules);
    rules.push(rule(
        r#"^([^$"\\]+)"#,
        vec![Category::StringDouble],
        Action::None,
    ));
    rules
}

fn triple_gstring_rules() -> Vec<Rc<dyn IRule>> {
    let mut rules = vec![rule(r#"^(""")"#, vec![Category::GStringEnd], Action::Pop)];
    gstring_common_escape(&mut rules);
    rules.push(rule(
        r#"^([^$"\\]+)"#,
        vec![Category::StringDouble],
        Action::None,
    ));
    rules.push(rule(r#"^(")"#, vec![Category::StringDouble], Action::None));
    rules.push(rule(r#"^("")"#, vec![Category::StringDouble], Action::None));
    rules
}

fn slashy_gstring_rules() -> Vec<Rc<dyn IRule>> {
    let mut rules = vec![rule(r"^(/)", vec![Category::GStringEnd], Action::Pop)];
    gstring_common_escape(&mut rules);
    rules.push(rule(
        r"^([^$\\/]+)",
        vec![Category::StringDouble],
        Action::None,
    ));
    // A lone `$` that opens no interpolation stays literal.
    rules.push(rule(r"^(\$)", vec![Category::StringDouble], Action::None));
    rules
}

fn dollar_slashy_gstring_rules() -> Vec<Rc<dyn IRule>> {
    let mut rules = vec![rule(r"^(/\$)", vec![Category::GStringEnd], Action::Pop)];
    gstring_common(&mut rules);
    // The body stops at `/` so the terminator rule above stays reachable; a
    // slash that is not part of `/$` falls through to the literal rule.
    rules.push(rule(
        r"^([^$/]+)",
        vec![Category::StringDouble],
        Action::None,
    ));
    rules.push(rule(
        r"^(\$\$)",
        vec![Category::StringEscape],
        Action::None,
    ));
    rules.push(rule(r"^(\$/)", vec![Category::StringEscape], Action::None));
    rules.push(rule(r"^(/)", vec![Category::StringDouble], Action::None));
    rules
}

fn gstring_closure_rules() -> Vec<Rc<dyn IRule>> {
    vec![
        rule(r"^(\})", vec![Category::GStringClosureEnd], Action::Pop),
        Rc::new(DefaultRule::new(Mode::Base)),
    ]
}

pub(super) fn mode_tables() -> Vec<(Mode, Vec<Rc<dyn IRule>>)> {
    let mut tables = vec![
        (Mode::Root, root_rules()),
        (Mode::Base, base_rules()),
        (Mode::Class, class_rules()),
        (Mode::Import, import_rules()),
        (Mode::Braces, bracket_rules(r"^(\})")),
        (Mode::Parens, bracket_rules(r"^(\))")),
        (Mode::Brackets, bracket_rules(r"^(\])")),
        (Mode::MultilineComment, multiline_comment_rules()),
        (Mode::GString, gstring_rules()),
        (Mode::TripleGString, triple_gstring_rules()),
        (Mode::SlashyGString, slashy_gstring_rules()),
        (Mode::DollarSlashyGString, dollar_slashy_gstring_rules()),
        (Mode::GStringClosure, gstring_closure_rules()),
    ];
    tables.sort_by_key(|(mode, _)| *mode);
    tables
}

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A hierarchical tag assigned to every raw lexeme by the tokenizer.
///
/// The tag set is closed and tree structured. The terminal adapter resolves a
/// category that carries no direct terminal mapping by walking toward the
/// root through [parent](Category::parent) until a mapped ancestor is found.
/// Sub-categories are flattened into variants; the hierarchy lives in
/// [parent](Category::parent) (e.g. `NumberHex` → `Number`, `GStringPath` →
/// `GString` → `String`).
pub enum Category {
    /// A span that is consumed but never surfaces as a terminal, such as the
    /// opener of a multi-line comment.
    None,
    Whitespace,
    Comment,
    CommentSingle,
    CommentMultiline,
    CommentPreproc,
    Keyword,
    KeywordDeclaration,
    KeywordType,
    KeywordNamespace,
    KeywordConstant,
    Operator,
    Name,
    NameAttribute,
    NameLabel,
    NameClass,
    NameNamespace,
    NameDecorator,
    NameFunction,
    Number,
    NumberInteger,
    NumberHex,
    NumberFloat,
    String,
    StringSingle,
    StringDouble,
    StringChar,
    StringEscape,
    GString,
    GStringBegin,
    GStringEnd,
    GStringPath,
    GStringClosureBegin,
    GStringClosureEnd,
}

impl Category {
    /// The immediate ancestor of the category, or [None](Option::None) for a
    /// root tag.
    pub fn parent(&self) -> Option<Category> {
        match self {
            Category::CommentSingle | Category::CommentMultiline | Category::CommentPreproc => {
                Some(Category::Comment)
            }
            Category::KeywordDeclaration
            | Category::KeywordType
            | Category::KeywordNamespace
            | Category::KeywordConstant => Some(Category::Keyword),
            Category::NameAttribute
            | Category::NameLabel
            | Category::NameClass
            | Category::NameNamespace
            | Category::NameDecorator
            | Category::NameFunction => Some(Category::Name),
            Category::NumberInteger | Category::NumberHex | Category::NumberFloat => {
                Some(Category::Number)
            }
            Category::StringSingle
            | Category::StringDouble
            | Category::StringChar
            | Category::StringEscape
            | Category::GString => Some(Category::String),
            Category::GStringBegin
            | Category::GStringEnd
            | Category::GStringPath
            | Category::GStringClosureBegin
            | Category::GStringClosureEnd => Some(Category::GString),
            _ => None,
        }
    }

    /// Whether the category equals `ancestor` or descends from it.
    pub fn is_in(&self, ancestor: Category) -> bool {
        let mut current = Some(*self);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = c.parent();
        }
        false
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

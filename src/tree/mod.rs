//! Parse tree digestion.
//!
//! The grammar engine that consumes the terminal stream is an external
//! collaborator; [ParseTree] is the crate-side shape of the tree it hands
//! back. [TreeDigester] compacts such a tree into a JSON value: leaves
//! become `{"leaf": NAME, "value": ...}` objects, rule nodes accumulate
//! their ancestry into a `"rule"` path while uninformative single-child
//! chains are flattened away, and separator rules are pruned entirely.

mod digest;
mod writer;


use crate::Terminal;
use ptree::TreeItem;
use std::borrow::Cow;
use std::fmt::Display;

pub use writer::mirror_source;

#[derive(Debug, Clone)]
/// A concrete syntax tree produced by the external grammar engine.
pub enum ParseTree {
    Rule {
        name: String,
        children: Vec<ParseTree>,
    },
    Leaf(Terminal),
}

impl ParseTree {
    pub fn rule(name: &str, children: Vec<ParseTree>) -> Self {
        ParseTree::Rule {
            name: name.to_string(),
            children,
        }
    }

    pub fn leaf(terminal: Terminal) -> Self {
        ParseTree::Leaf(terminal)
    }

    pub fn is_rule(&self) -> bool {
        matches!(self, ParseTree::Rule { .. })
    }

    /// The rule name, if this is a rule node.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            ParseTree::Rule { name, .. } => Some(name),
            ParseTree::Leaf(_) => None,
        }
    }

    /// Print the tree to standard output.
    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(self)
    }
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseTree::Rule { name, children } => {
                write!(f, "{}({} children)", name, children.len())
            }
            ParseTree::Leaf(terminal) => write!(f, "{}", terminal),
        }
    }
}

impl TreeItem for ParseTree {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self {
            ParseTree::Rule { name, .. } => write!(f, "{}", name),
            ParseTree::Leaf(terminal) => write!(f, "{} {:?}", terminal.name, terminal.value),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self {
            ParseTree::Rule { children, .. } => Cow::from(children),
            ParseTree::Leaf(_) => Cow::from(Vec::new()),
        }
    }
}

/// Compacts a [ParseTree] into its JSON digest.
///
/// `prune` names rule children elided outright (separator noise); `no_flatten`
/// names rules which keep their own node even as an only child.
pub struct TreeDigester {
    prune: Vec<String>,
    no_flatten: Vec<String>,
}

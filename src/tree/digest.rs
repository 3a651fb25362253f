use super::{ParseTree, TreeDigester};
use serde_json::{json, Value};

impl TreeDigester {
    /// Create a digester with explicit prune and no-flatten rule lists.
    pub fn new(prune: Vec<&str>, no_flatten: Vec<&str>) -> Self {
        Self {
            prune: prune.iter().map(|s| s.to_string()).collect(),
            no_flatten: no_flatten.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Digest the tree into its JSON form.
    pub fn digest(&self, tree: &ParseTree) -> Value {
        self.digest_node(tree, Vec::new())
    }

    fn digest_node(&self, tree: &ParseTree, rule_path: Vec<String>) -> Value {
        match tree {
            ParseTree::Leaf(terminal) => json!({
                "leaf": terminal.name,
                "value": terminal.value,
            }),
            ParseTree::Rule { name, children } => {
                let mut path = rule_path;
                path.push(name.clone());

                let kept: Vec<&ParseTree> = children
                    .iter()
                    .filter(|child| {
                        child
                            .rule_name()
                            .map_or(true, |rule| !self.prune.iter().any(|p| p == rule))
                    })
                    .collect();

                if kept.is_empty() {
                    return json!({});
                }
                if kept.len() == 1 {
                    if let Some(only) = kept[0].rule_name() {
                        if !self.no_flatten.iter().any(|n| n == only) {
                            return self.digest_node(kept[0], path);
                        }
                    }
                }
                json!({
                    "rule": path,
                    "children": kept
                        .iter()
                        .map(|child| self.digest_node(child, Vec::new()))
                        .collect::<Vec<Value>>(),
                })
            }
        }
    }
}

impl Default for TreeDigester {
    /// The stock configuration: separator rules are pruned and script
    /// statements keep their own node.
    fn default() -> Self {
        Self::new(vec!["sep", "nls"], vec!["script_statement"])
    }
}

//! Nextflow feature extraction over a digested parse tree.
//!
//! Nextflow keywords are ordinary identifiers at the lexical level; the
//! extractor recognizes them structurally, by walking the JSON digest for
//! command expressions whose first identifier is `process`, `workflow` or
//! `include`, and collecting the `container` / `conda` / `template` settings
//! declared inside process bodies.

#[cfg(test)]
mod __tests__;

use serde_json::Value;

const COMMAND_PATH: [&str; 3] = ["statement", "statement_expression", "command_expression"];

// Container engine discriminators appearing in ternary selections such as
// `workflow.containerEngine == 'singularity' ? ... : ...`; they are not
// container addresses.
const CONTAINER_ENGINES: [&str; 2] = ["singularity", "docker"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// A `process` declaration and the deployment settings found in its body.
pub struct NfProcess {
    pub name: String,
    pub containers: Vec<String>,
    pub condas: Vec<String>,
    pub templates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An `include { ... } from '...'` statement.
pub struct NfInclude {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A `workflow` declaration; anonymous workflows carry no name.
pub struct NfWorkflow {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Every Nextflow feature found in one digested source tree.
pub struct NfFeatures {
    pub processes: Vec<NfProcess>,
    pub includes: Vec<NfInclude>,
    pub workflows: Vec<NfWorkflow>,
}

impl NfFeatures {
    /// Walk a digested tree and collect its Nextflow declarations.
    pub fn extract(digest: &Value) -> Self {
        let mut features = NfFeatures::default();
        features.walk(digest);
        features
    }

    fn walk(&mut self, node: &Value) {
        if is_command_expression(node) {
            match leading_identifier(node) {
                Some("process") => {
                    self.processes.push(scan_process(node));
                    return;
                }
                Some("include") => {
                    if let Some(path) = first_string_literal(node) {
                        self.includes.push(NfInclude { path });
                    }
                    return;
                }
                Some("workflow") => {
                    self.workflows.push(NfWorkflow {
                        name: declared_name(node),
                    });
                    return;
                }
                _ => {}
            }
        }
        if let Some(children) = node.get("children").and_then(Value::as_array) {
            for child in children {
                self.walk(child);
            }
        }
    }
}

/// Whether a digested node's rule path ends in
/// `statement / statement_expression / command_expression`.
fn is_command_expression(node: &Value) -> bool {
    match node.get("rule").and_then(Value::as_array) {
        Some(path) => {
            let names: Vec<&str> = path.iter().filter_map(Value::as_str).collect();
            names.len() >= COMMAND_PATH.len()
                && names[names.len() - COMMAND_PATH.len()..] == COMMAND_PATH[..]
        }
        None => false,
    }
}

/// All `(leaf, value)` pairs of a subtree, in source order.
fn leaves<'a>(node: &'a Value, out: &mut Vec<(&'a str, &'a str)>) {
    if let Some(children) = node.get("children").and_then(Value::as_array) {
        for child in children {
            leaves(child, out);
        }
        return;
    }
    if let (Some(leaf), Some(value)) = (
        node.get("leaf").and_then(Value::as_str),
        node.get("value").and_then(Value::as_str),
    ) {
        out.push((leaf, value));
    }
}

fn collect_leaves(node: &Value) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    leaves(node, &mut out);
    out
}

/// The command word of a command expression: its very first leaf, when that
/// leaf is an identifier.
fn leading_identifier(node: &Value) -> Option<&str> {
    match collect_leaves(node).first().copied() {
        Some(("IDENTIFIER", value)) => Some(value),
        _ => None,
    }
}

/// The declared name following the command word, for `process foo { ... }`
/// and `workflow bar { ... }` forms. An opening brace straight after the
/// command word means the declaration is anonymous.
fn declared_name(node: &Value) -> Option<String> {
    match collect_leaves(node).get(1).copied() {
        Some(("IDENTIFIER", value)) | Some(("STRING_LITERAL", value)) => Some(value.to_string()),
        _ => None,
    }
}

fn first_string_literal(node: &Value) -> Option<String> {
    collect_leaves(node)
        .iter()
        .find(|(leaf, _)| *leaf == "STRING_LITERAL")
        .map(|(_, value)| value.to_string())
}

fn scan_process(node: &Value) -> NfProcess {
    let mut process = NfProcess {
        name: declared_name(node).unwrap_or_default(),
        ..NfProcess::default()
    };
    collect_settings(node, &mut process);
    process
}

fn collect_settings(node: &Value, process: &mut NfProcess) {
    if is_command_expression(node) {
        match leading_identifier(node) {
            Some("container") => {
                process.containers.extend(
                    collect_leaves(node)
                        .iter()
                        .filter(|(leaf, value)| {
                            *leaf == "STRING_LITERAL" && !CONTAINER_ENGINES.contains(value)
                        })
                        .map(|(_, value)| value.to_string()),
                );
                return;
            }
            Some("conda") => {
                process.condas.extend(string_literals(node));
                return;
            }
            Some("template") => {
                process.templates.extend(string_literals(node));
                return;
            }
            _ => {}
        }
    }
    if let Some(children) = node.get("children").and_then(Value::as_array) {
        for child in children {
            collect_settings(child, process);
        }
    }
}

fn string_literals(node: &Value) -> Vec<String> {
    collect_leaves(node)
        .iter()
        .filter(|(leaf, _)| *leaf == "STRING_LITERAL")
        .map(|(_, value)| value.to_string())
        .collect()
}

use crate::{NfFeatures, NfInclude, NfWorkflow};
use serde_json::{json, Value};

fn node(rule: &[&str], children: Vec<Value>) -> Value {
    json!({"rule": rule, "children": children})
}

fn command(children: Vec<Value>) -> Value {
    node(
        &["statement", "statement_expression", "command_expression"],
        children,
    )
}

fn closure(children: Vec<Value>) -> Value {
    node(&["closure"], children)
}

fn identifier(value: &str) -> Value {
    json!({"leaf": "IDENTIFIER", "value": value})
}

fn string(value: &str) -> Value {
    json!({"leaf": "STRING_LITERAL", "value": value})
}

fn brace(value: &str) -> Value {
    json!({"leaf": if value == "{" { "LBRACE" } else { "RBRACE" }, "value": value})
}

fn script(statements: Vec<Value>) -> Value {
    node(&["compilation_unit"], statements)
}

#[test]
fn process_with_container_and_conda() {
    let digest = script(vec![command(vec![
        identifier("process"),
        node(
            &["command_argument"],
            vec![
                identifier("trim"),
                closure(vec![
                    brace("{"),
                    command(vec![
                        identifier("container"),
                        string("quay.io/biocontainers/trim-galore"),
                    ]),
                    command(vec![identifier("conda"), string("bioconda::trim-galore")]),
                    command(vec![identifier("template"), string("trim.sh")]),
                    brace("}"),
                ]),
            ],
        ),
    ])]);

    let features = NfFeatures::extract(&digest);
    assert_eq!(features.processes.len(), 1);
    let process = &features.processes[0];
    assert_eq!(process.name, "trim");
    assert_eq!(process.containers, vec!["quay.io/biocontainers/trim-galore"]);
    assert_eq!(process.condas, vec!["bioconda::trim-galore"]);
    assert_eq!(process.templates, vec!["trim.sh"]);
}

#[test]
fn container_engine_names_are_not_containers() {
    let digest = script(vec![command(vec![
        identifier("process"),
        identifier("align"),
        closure(vec![
            brace("{"),
            command(vec![
                identifier("container"),
                node(
                    &["ternary_expression"],
                    vec![
                        identifier("workflow"),
                        string("singularity"),
                        string("https://depot.galaxyproject.org/singularity/bwa.sif"),
                        string("quay.io/biocontainers/bwa"),
                    ],
                ),
            ]),
            brace("}"),
        ]),
    ])]);

    let features = NfFeatures::extract(&digest);
    assert_eq!(
        features.processes[0].containers,
        vec![
            "https://depot.galaxyproject.org/singularity/bwa.sif",
            "quay.io/biocontainers/bwa",
        ]
    );
}

#[test]
fn include_statements_collect_their_path() {
    let digest = script(vec![command(vec![
        identifier("include"),
        brace("{"),
        identifier("FASTQC"),
        brace("}"),
        identifier("from"),
        string("./modules/fastqc"),
    ])]);

    let features = NfFeatures::extract(&digest);
    assert_eq!(
        features.includes,
        vec![NfInclude {
            path: "./modules/fastqc".to_string()
        }]
    );
}

#[test]
fn named_and_anonymous_workflows() {
    let digest = script(vec![
        command(vec![
            identifier("workflow"),
            identifier("QC"),
            closure(vec![brace("{"), brace("}")]),
        ]),
        command(vec![
            identifier("workflow"),
            closure(vec![
                brace("{"),
                command(vec![identifier("FASTQC"), identifier("reads")]),
                brace("}"),
            ]),
        ]),
    ]);

    let features = NfFeatures::extract(&digest);
    assert_eq!(
        features.workflows,
        vec![
            NfWorkflow {
                name: Some("QC".to_string())
            },
            NfWorkflow { name: None },
        ]
    );
}

#[test]
fn unrelated_commands_contribute_nothing() {
    let digest = script(vec![command(vec![
        identifier("println"),
        string("hello"),
    ])]);
    let features = NfFeatures::extract(&digest);
    assert_eq!(features, NfFeatures::default());
}

#[test]
fn rule_paths_must_end_in_a_command_expression() {
    // Same leaves, wrong rule path: nothing should be extracted.
    let digest = script(vec![node(
        &["statement", "statement_expression", "assignment"],
        vec![identifier("process"), identifier("trim")],
    )]);
    let features = NfFeatures::extract(&digest);
    assert!(features.processes.is_empty());
}

#[test]
fn flattened_prefixes_still_match() {
    // Digest flattening prepends ancestor rules; the path only has to end
    // with the command expression triple.
    let digest = script(vec![node(
        &[
            "script_statement",
            "statement",
            "statement_expression",
            "command_expression",
        ],
        vec![identifier("workflow"), brace("{")],
    )]);
    let features = NfFeatures::extract(&digest);
    assert_eq!(features.workflows, vec![NfWorkflow { name: None }]);
}

use crate::{Category, Code, GroovyTokenizer, Lex};

fn categories(stream: &[Lex]) -> Vec<Category> {
    stream.iter().map(|lex| lex.category).collect()
}

fn lexemes<'c>(code: &Code<'c>, stream: &[Lex]) -> Vec<String> {
    stream
        .iter()
        .map(|lex| code.text_of(lex.start, lex.end).into_owned())
        .collect()
}

const SAMPLE: &str = r#"#!/usr/bin/env nextflow
// a small pipeline
process foo {
    container 'quay.io/biocontainers/fastqc'
    cpus 2
    script:
    """
    fastqc ${params.reads}/sample.fq
    """
}
"#;

#[test]
fn every_byte_is_covered_exactly_once() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from(SAMPLE);
    let stream = tokenizer.tokenize(&code).unwrap();

    let mut rebuilt = String::new();
    let mut cursor = 0;
    for lex in &stream {
        assert_eq!(lex.start, cursor, "stream has a gap before {}", lex);
        assert!(lex.end > lex.start, "empty span for {}", lex);
        rebuilt.push_str(&code.text_of(lex.start, lex.end));
        cursor = lex.end;
    }
    assert_eq!(rebuilt, SAMPLE);
}

#[test]
fn shebang_is_a_preproc_comment() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("#!/usr/bin/env nextflow\na");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(stream[0].category, Category::CommentPreproc);
    assert_eq!(&*code.text_of(stream[0].start, stream[0].end), "#!/usr/bin/env nextflow");
}

#[test]
fn division_after_identifier_is_an_operator() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("println a/b");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::Name,
            Category::Whitespace,
            Category::Name,
            Category::Operator,
            Category::Name,
        ]
    );
}

#[test]
fn division_after_number_and_closing_bracket() {
    let tokenizer = GroovyTokenizer::new();

    let code = Code::from("x = 6/2");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::Name,
            Category::Whitespace,
            Category::Operator,
            Category::Whitespace,
            Category::NumberInteger,
            Category::Operator,
            Category::NumberInteger,
        ]
    );

    let code = Code::from("(a)/b");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::Operator,
            Category::Name,
            Category::Operator,
            Category::Operator,
            Category::Name,
        ]
    );
}

#[test]
fn bare_slash_opens_a_slashy_string() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("x = /ab/");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::Name,
            Category::Whitespace,
            Category::Operator,
            Category::Whitespace,
            Category::GStringBegin,
            Category::StringDouble,
            Category::GStringEnd,
        ]
    );
}

#[test]
fn division_assign_is_never_a_string_opener() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("x /= 2");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert!(stream
        .iter()
        .all(|lex| lex.category != Category::GStringBegin));
}

#[test]
fn interpolation_closure_tracks_nested_braces() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from(r#""a${ x { y } }b""#);
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::GStringBegin,
            Category::StringDouble,
            Category::GStringClosureBegin,
            Category::Whitespace,
            Category::Name,
            Category::Whitespace,
            Category::Operator,
            Category::Whitespace,
            Category::Name,
            Category::Whitespace,
            Category::Operator,
            Category::Whitespace,
            Category::Operator,
            Category::StringDouble,
            Category::GStringEnd,
        ]
    );
}

#[test]
fn dotted_interpolation_path_is_one_lexeme() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from(r#""${x}$a.b""#);
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::GStringBegin,
            Category::GStringClosureBegin,
            Category::Name,
            Category::Operator,
            Category::GStringPath,
            Category::GStringEnd,
        ]
    );
    assert_eq!(&*code.text_of(stream[4].start, stream[4].end), "$a.b");
}

#[test]
fn empty_interpolation_closure_emits_closure_end() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from(r#""${}""#);
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::GStringBegin,
            Category::GStringClosureBegin,
            Category::GStringClosureEnd,
            Category::GStringEnd,
        ]
    );
}

#[test]
fn triple_gstring_tolerates_embedded_quotes() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from(r#""""say "hi" now""""#);
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(stream[0].category, Category::GStringBegin);
    assert_eq!(
        stream.last().map(|lex| lex.category),
        Some(Category::GStringEnd)
    );
    assert!(stream[1..stream.len() - 1]
        .iter()
        .all(|lex| lex.category == Category::StringDouble));
}

#[test]
fn dollar_slashy_escapes_and_terminator() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("x = $/a $$ b/$");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream)[4..].to_vec(),
        vec![
            Category::GStringBegin,
            Category::StringDouble,
            Category::StringEscape,
            Category::StringDouble,
            Category::GStringEnd,
        ]
    );
    assert_eq!(
        lexemes(&code, &stream)[4..].to_vec(),
        vec!["$/", "a ", "$$", " b", "/$"]
    );
}

#[test]
fn slashy_string_keeps_a_lone_dollar_literal() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("x = /a$/");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream)[4..].to_vec(),
        vec![
            Category::GStringBegin,
            Category::StringDouble,
            Category::StringDouble,
            Category::GStringEnd,
        ]
    );
    assert_eq!(lexemes(&code, &stream)[5..7].to_vec(), vec!["a", "$"]);
}

#[test]
fn class_and_import_modes_take_one_name() {
    let tokenizer = GroovyTokenizer::new();

    let code = Code::from("import groovy.json.*\n");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::KeywordNamespace,
            Category::Whitespace,
            Category::NameNamespace,
            Category::Whitespace,
        ]
    );
    assert_eq!(&*code.text_of(stream[2].start, stream[2].end), "groovy.json.*");

    let code = Code::from("class Foo extends Bar {}");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::KeywordDeclaration,
            Category::Whitespace,
            Category::NameClass,
            Category::Whitespace,
            Category::KeywordDeclaration,
            Category::Whitespace,
            Category::Name,
            Category::Whitespace,
            Category::Operator,
            Category::Operator,
        ]
    );
}

#[test]
fn method_signature_heuristic_relexes_the_prefix() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("int add(x) { }");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream)[..4].to_vec(),
        vec![
            Category::KeywordType,
            Category::Whitespace,
            Category::NameFunction,
            Category::Operator,
        ]
    );
    assert_eq!(&*code.text_of(stream[2].start, stream[2].end), "add");
    // The remainder still tokenizes despite the unpushed parenthesis.
    assert_eq!(
        categories(&stream)[4..].to_vec(),
        vec![
            Category::Name,
            Category::Operator,
            Category::Whitespace,
            Category::Operator,
            Category::Whitespace,
            Category::Operator,
        ]
    );
}

#[test]
fn signature_heuristic_needs_line_start() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("a; int add(x)");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert!(stream
        .iter()
        .all(|lex| lex.category != Category::NameFunction));
}

#[test]
fn comments_attach_to_expression_enders() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("a /* note */ b");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::Name,
            Category::Whitespace,
            Category::None,
            Category::CommentMultiline,
            Category::Whitespace,
            Category::Name,
        ]
    );

    let code = Code::from("1 // trailing");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(
        categories(&stream),
        vec![
            Category::NumberInteger,
            Category::Whitespace,
            Category::CommentSingle,
        ]
    );
}

#[test]
fn unterminated_string_is_fatal() {
    let tokenizer = GroovyTokenizer::new();
    let err = tokenizer.tokenize(&Code::from("x = \"abc")).unwrap_err();
    assert!(err.message.contains("Unterminated"), "{}", err.message);

    let err = tokenizer.tokenize(&Code::from("x = /abc")).unwrap_err();
    assert!(err.message.contains("slashy"), "{}", err.message);
}

#[test]
fn unmatched_position_is_fatal() {
    let tokenizer = GroovyTokenizer::new();
    // A multi-line comment with no closer leaves its mode without a match.
    let err = tokenizer.tokenize(&Code::from("/* abc")).unwrap_err();
    assert_eq!(err.pointer, 2);
}

#[test]
fn labels_are_single_lexemes() {
    let tokenizer = GroovyTokenizer::new();
    let code = Code::from("script:\n  x");
    let stream = tokenizer.tokenize(&code).unwrap();
    assert_eq!(stream[0].category, Category::NameLabel);
    assert_eq!(&*code.text_of(stream[0].start, stream[0].end), "script:");
}

#[test]
fn grammar_dump_lists_every_mode() {
    let tokenizer = GroovyTokenizer::new();
    let grammar = tokenizer.build_grammar().unwrap();
    assert!(grammar.contains("fragment Base {"));
    assert!(grammar.contains("fragment SlashyGString {"));
}

mod common;
use common::*;
use search_query::*;

#[test]
fn literal_query_table() {
    let cases: &[(&str, &str)] = &[
        ("()", r#""()""#),
        (r#"""#, r#""\"""#),
        (r#""""#, r#""\"\"""#),
        ("(", r#""(""#),
        ("repo:foo foo( or bar(", r#"(and "repo:foo" (or "foo(" "bar("))"#),
        ("x or", r#"(concat "x" "or")"#),
        ("repo:foo (x", r#"(and "repo:foo" "(x")"#),
        ("(x or bar() )", r#"(or "x" "bar()")"#),
        ("(x", r#""(x""#),
        ("x or (x", r#"(or "x" "(x")"#),
        ("(y or (z", r#"(or "(y" "(z")"#),
        ("repo:foo (lisp)", r#"(and "repo:foo" "(lisp)")"#),
        ("repo:foo (lisp lisp())", r#"(and "repo:foo" "(lisp lisp())")"#),
        ("repo:foo (lisp or lisp)", r#"(and "repo:foo" (or "lisp" "lisp"))"#),
        ("repo:foo (lisp or lisp())", r#"(and "repo:foo" (or "lisp" "lisp()"))"#),
        ("repo:foo (lisp or lisp()", r#"(and "repo:foo" (or "(lisp" "lisp()"))"#),
        ("(y or bar())", r#"(or "y" "bar()")"#),
        ("((x or bar(", r#"(or "((x" "bar(")"#),
        ("", ""),
        (" ", ""),
        ("  ", ""),
        ("a", r#""a""#),
        (" a", r#""a""#),
        ("a ", r#""a""#),
        (" a b", r#"(concat "a" "b")"#),
        ("a  b", r#"(concat "a" "b")"#),
        (":", r#"":""#),
        (":=", r#"":=""#),
        (":= range", r#"(concat ":=" "range")"#),
        ("`", r#""`""#),
        ("'", r#""'""#),
        ("file:a", r#""file:a""#),
        (r#""file:a""#, r#""\"file:a\"""#),
        (r#""x foo:bar"#, r#"(concat "\"x" "foo:bar")"#),
        (r#""repo:b -repo:c""#, r#"(and "\"repo:b" "-repo:c\"")"#),
        (r#"".*""#, r#""\".*\"""#),
        ("-pattern: ok", r#"(concat "-pattern:" "ok")"#),
        (
            r#"a:b "patterntype:regexp""#,
            r#"(concat "a:b" "\"patterntype:regexp\"")"#,
        ),
        ("lang:go func  main", r#"(and "lang:go" (concat "func" "main"))"#),
        (r"\n", r#""\\n""#),
        (r"\t", r#""\\t""#),
        (r"\\", r#""\\\\""#),
        (r#"foo\d "bar*""#, r#"(concat "foo\\d" "\"bar*\"")"#),
        (r"\d", r#""\\d""#),
        (
            r#"type:commit message:"a commit message" after:"10 days ago""#,
            r#"(and "type:commit" "message:a commit message" "after:10 days ago")"#,
        ),
        (
            r#"type:commit message:"a commit message" after:"10 days ago" test test2"#,
            r#"(and "type:commit" "message:a commit message" "after:10 days ago" (concat "test" "test2"))"#,
        ),
        (
            "type:commit message:'a commit message' after:'10 days ago' test test2",
            r#"(and "type:commit" "message:a commit message" "after:10 days ago" (concat "test" "test2"))"#,
        ),
        (
            r#"type:commit message:"a com"mit message" after:"10 days ago""#,
            r#"(and "type:commit" "message:a com" (concat "mit" "message\"") "after:10 days ago")"#,
        ),
        (r"bar and (foo or x\) ()", r#"(and "bar" (or "foo" "x\\") "()")"#),
        (r#""quoted""#, r#""\"quoted\"""#),
        ("repo:foo (lisp    lisp)", r#"(and "repo:foo" "(lisp lisp)")"#),
    ];

    init_tracing();
    for (input, want) in cases {
        assert_eq!(&sexp(input), want, "input: {input:?}");
    }
}

#[test]
fn unterminated_quote_is_a_semantic_error() {
    let err = parse_err("type:commit message:'a commit message' after:'10 days ago\" test test2");
    assert!(matches!(
        err,
        ParseError::Invalid(ValidationError::UnterminatedQuote { ref field, position: 45 })
            if field == "after"
    ));
    assert_eq!(err.position(), Some(45));
}

#[test]
fn keyword_case_is_ignored() {
    assert_eq!(sexp("a OR b"), r#"(or "a" "b")"#);
    assert_eq!(sexp("a And b"), r#"(and "a" "b")"#);
}

#[test]
fn and_binds_tighter_than_or() {
    let nodes = parse_ok("a and b or c and d");
    let or = as_operator(&nodes[0], OperatorKind::Or);
    assert_eq!(or.len(), 2);
    let left = as_operator(&or[0], OperatorKind::And);
    pattern_is(&left[0], "a");
    pattern_is(&left[1], "b");
    let right = as_operator(&or[1], OperatorKind::And);
    pattern_is(&right[0], "c");
    pattern_is(&right[1], "d");
}

#[test]
fn same_kind_chains_flatten() {
    assert_eq!(sexp("a or b or c or d"), r#"(or "a" "b" "c" "d")"#);
    assert_eq!(sexp("a and (b and c)"), r#"(and "a" "b" "c")"#);
}

#[test]
fn group_close_ends_the_group_expression() {
    assert_eq!(sexp("(a or b) and c"), r#"(and (or "a" "b") "c")"#);
    assert_eq!(
        sexp("(a or b) or (c and d)"),
        r#"(or "a" "b" (and "c" "d"))"#
    );
    assert_eq!(
        sexp("((a or b) and c) or d"),
        r#"(or (and (or "a" "b") "c") "d")"#
    );
}

#[test]
fn keyword_patterns_do_not_swallow_a_group_close() {
    assert_eq!(sexp("(x or and) and c"), r#"(and (or "x" "and") "c")"#);
    assert_eq!(sexp("c and (and or x)"), r#"(and "c" (or "and" "x"))"#);
    assert_eq!(
        sexp("a or repo:foo or"),
        r#"(and "repo:foo" (or "a" "or"))"#
    );
}

#[test]
fn field_names_are_normalized() {
    assert_eq!(
        sexp("R:foo Language:go -F:test x"),
        r#"(and "repo:foo" "lang:go" "-file:test" "x")"#
    );
    let nodes = parse_ok("msg:fix since:yesterday");
    let and = as_operator(&nodes[0], OperatorKind::And);
    parameter_is(&and[0], "message", "fix", false);
    parameter_is(&and[1], "after", "yesterday", false);
}

#[test]
fn parameters_keep_their_position_among_patterns() {
    let nodes = parse_ok("a b repo:x c -file:y d");
    let and = as_operator(&nodes[0], OperatorKind::And);
    assert_eq!(and.len(), 5);
    let concat = as_operator(&and[0], OperatorKind::Concat);
    pattern_is(&concat[0], "a");
    pattern_is(&concat[1], "b");
    parameter_is(&and[1], "repo", "x", false);
    pattern_is(&and[2], "c");
    parameter_is(&and[3], "file", "y", true);
    pattern_is(&and[4], "d");
}

#[test]
fn hoisting_scopes_edge_parameters() {
    assert_eq!(
        sexp("repo:foo a or b or c file:bar"),
        r#"(and "repo:foo" "file:bar" (or "a" "b" "c"))"#
    );
    assert_eq!(
        sexp("repo:foo a b or c"),
        r#"(and "repo:foo" (or (concat "a" "b") "c"))"#
    );
    // Inner parameters make the query too ambiguous to rewrite.
    assert_eq!(
        sexp("a or repo:foo b or c"),
        r#"(or "a" (and "repo:foo" "b") "c")"#
    );

    let nodes = parse_ok("repo:foo foo( or bar(");
    let and = as_operator(&nodes[0], OperatorKind::And);
    let or = as_operator(&and[1], OperatorKind::Or);
    for (node, value) in or.iter().zip(["foo(", "bar("]) {
        let labels = pattern_is(node, value);
        assert!(labels.contains(Labels::LITERAL | Labels::HEURISTIC_HOISTED));
    }
}

#[test]
fn dangling_parens_are_labelled() {
    let nodes = parse_ok("x or (x");
    let or = as_operator(&nodes[0], OperatorKind::Or);
    let labels = pattern_is(&or[1], "(x");
    assert!(labels.contains(Labels::HEURISTIC_DANGLING_PARENS));

    let nodes = parse_ok("repo:foo (lisp)");
    let and = as_operator(&nodes[0], OperatorKind::And);
    let labels = pattern_is(&and[1], "(lisp)");
    assert!(labels.contains(Labels::HEURISTIC_PARENS_AS_PATTERNS));
}

#[test]
fn stray_close_parens_never_drop_input() {
    assert_eq!(sexp("a) b"), r#"(concat "a" ")" "b")"#);
    assert_eq!(sexp("foo )) bar"), r#"(concat "foo" "))" "bar")"#);
}

#[test]
fn keywords_without_operands() {
    // Never a keyword at the very start.
    assert_eq!(sexp("or"), r#""or""#);
    assert!(matches!(parse_err("a and and b"), ParseError::ExpectedOperand { position: 6 }));
}

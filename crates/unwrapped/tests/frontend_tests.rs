use pretty_assertions::assert_eq;
use unwrapped::*;

// ═══════════════════════════════════════════════════════════════════════
// Literals
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_parse_literals() {
    assert_eq!(parse("42").unwrap(), Expr::lit(42));
    assert_eq!(parse("0b101").unwrap(), Expr::lit(5));
    assert_eq!(parse("2.5").unwrap(), Expr::lit(2.5));
    assert_eq!(parse("\"hi\\tthere\"").unwrap(), Expr::lit("hi\tthere"));
    assert_eq!(parse("'c'").unwrap(), Expr::lit("c"));
    assert_eq!(parse("true").unwrap(), Expr::lit(true));
    assert_eq!(parse("nil").unwrap(), Expr::absent());
}

#[test]
fn test_minus_before_number_is_a_negative_literal() {
    assert_eq!(parse("-5").unwrap(), Expr::lit(-5));
    assert_eq!(parse("- 2.5").unwrap(), Expr::lit(-2.5));
    assert_eq!(parse("-(5)").unwrap(), Expr::unary(UnOp::Neg, Expr::lit(5)));
    assert_eq!(parse("--5").unwrap(), Expr::unary(UnOp::Neg, Expr::lit(-5)));
    assert_eq!(
        parse("1 - -5").unwrap(),
        Expr::binary(BinOp::Sub, Expr::lit(1), Expr::lit(-5))
    );
}

#[test]
fn test_smallest_integer_literal() {
    assert_eq!(parse("-9223372036854775808").unwrap(), Expr::lit(i64::MIN));
    let err = parse("9223372036854775808").unwrap_err();
    assert!(err.message.contains("does not fit in 64 bits"));

    let min = Expr::lit(i64::MIN);
    assert_eq!(parse(&min.to_string()).unwrap(), min);
}

#[test]
fn test_empty_tuple_is_not_source() {
    let empty = Value::tuple(Vec::new());
    assert_eq!(format!("{:?}", empty), "()");
    let err = parse("()").unwrap_err();
    assert_eq!(err.message, "empty parentheses are not an expression");
}

#[test]
fn test_comments_are_ignored() {
    assert_eq!(
        parse("nil ?? 1 // default").unwrap(),
        Expr::coalesce(Expr::absent(), Expr::lit(1))
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Rendering Round-Trip
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_display_round_trips() {
    let sources = [
        "nil ?? 5",
        "(nil ?? nil) ?? 1",
        "nil ?? nil ?? 1",
        "-(1 + 2) * 3",
        "(1 < 2) == true",
        "!(true && false) || true",
        "(1, \"B\") > (2, \"A\")",
        "((1,), nil)",
        "(nil ?? 2)! + 1",
        "1 - (2 - 3)",
        "\"tab\\there\" + \"x\"",
        "--4",
        "-(5)",
        "-(4!)",
        "-2.5 * 2.0",
        "-9223372036854775808 ?? 0",
    ];
    for src in sources {
        let expr = parse(src).unwrap();
        let rendered = expr.to_string();
        assert_eq!(
            parse(&rendered).unwrap(),
            expr,
            "source {:?} rendered as {:?}",
            src,
            rendered
        );
    }
}

#[test]
fn test_display_is_canonical() {
    assert_eq!(parse("( 1+2 )*3").unwrap().to_string(), "(1 + 2) * 3");
    assert_eq!(parse("((nil))??(4)").unwrap().to_string(), "nil ?? 4");
}

// ═══════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_error_locations() {
    let err = parse("1 + = 2").unwrap_err();
    assert_eq!(err.location, Some(SourceLocation::new(1, 5)));
    assert_eq!(err.caret("1 + = 2").unwrap(), "1 + = 2\n    ^");
}

#[test]
fn test_unknown_name() {
    let err = parse("x ?? 1").unwrap_err();
    assert_eq!(
        err.message,
        "unknown name `x`; only `true`, `false` and `nil` are defined"
    );
    assert_eq!(err.location, Some(SourceLocation::new(1, 1)));
}

#[test]
fn test_single_question_mark() {
    let err = parse("nil ? 1").unwrap_err();
    assert_eq!(
        err.message,
        "unexpected `?`; nil-coalescing is written `??`"
    );
}

#[test]
fn test_unbalanced_parentheses() {
    let err = parse("(1 + 2").unwrap_err();
    assert!(err.message.starts_with("could not tokenize input"));
}

#[test]
fn test_unterminated_string() {
    assert!(parse("\"open").is_err());
}

#[test]
fn test_suffix_rejected() {
    let err = parse("1u8 + 1").unwrap_err();
    assert!(err.message.contains("suffix"));
}

#[test]
fn test_missing_operand_inside_group() {
    let err = parse("(1 +)").unwrap_err();
    assert_eq!(err.message, "expected an expression, found end of input");
    assert_eq!(err.location, Some(SourceLocation::new(1, 5)));
}

#[test]
fn test_default_depth_limit() {
    let deep = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    let err = parse(&deep).unwrap_err();
    assert!(err.message.contains("nests deeper than"));

    let ok = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    assert_eq!(parse(&ok).unwrap(), Expr::lit(1));
}

#[test]
fn test_run_surfaces_parse_errors() {
    match run("1 <") {
        Err(SandboxError::Parse(err)) => {
            assert_eq!(err.message, "expected an expression, found end of input")
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

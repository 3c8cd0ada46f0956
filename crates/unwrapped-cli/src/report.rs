//! Rendering evaluation outcomes for the terminal and as JSON

use std::io::{self, Write};

use serde_json::json;
use unwrapped::{EvalError, Evaluation, ParseError};

/// What one line of input produced.
pub type Outcome = Result<Evaluation, ParseError>;

/// Whether the input parsed and evaluated without error.
pub fn succeeded(outcome: &Outcome) -> bool {
    matches!(outcome, Ok(eval) if eval.result.is_ok())
}

/// The evaluation error, if evaluation ran and failed.
pub fn eval_error(outcome: &Outcome) -> Option<&EvalError> {
    match outcome {
        Ok(eval) => eval.result.as_ref().err(),
        Err(_) => None,
    }
}

/// Write the trace and value to `out`, failures to `err`.
pub fn write_text(
    source: &str,
    outcome: &Outcome,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    match outcome {
        Err(parse_err) => {
            writeln!(err, "{}", parse_err)?;
            if let Some(caret) = parse_err.caret(source) {
                writeln!(err, "{}", caret)?;
            }
        }
        Ok(eval) => {
            if !eval.trace.is_empty() {
                write!(out, "{}", eval.trace)?;
            }
            match &eval.result {
                Ok(value) => writeln!(out, "{:?}", value)?,
                Err(eval_err) => writeln!(err, "error: {}", eval_err)?,
            }
        }
    }
    Ok(())
}

/// One JSON document describing the outcome.
pub fn to_json(source: &str, outcome: &Outcome) -> serde_json::Result<serde_json::Value> {
    let doc = match outcome {
        Err(parse_err) => json!({
            "source": source,
            "ok": false,
            "error": {
                "kind": "parse",
                "message": parse_err.message,
                "line": parse_err.location.map(|l| l.line),
                "column": parse_err.location.map(|l| l.column),
            },
        }),
        Ok(eval) => {
            let trace = serde_json::to_value(&eval.trace)?;
            match &eval.result {
                Ok(value) => json!({
                    "source": source,
                    "ok": true,
                    "value": format!("{:?}", value),
                    "kind": value.kind().name(),
                    "trace": trace,
                }),
                Err(eval_err) => json!({
                    "source": source,
                    "ok": false,
                    "error": {
                        "kind": error_kind(eval_err),
                        "message": eval_err.to_string(),
                    },
                    "trace": trace,
                }),
            }
        }
    };
    Ok(doc)
}

fn error_kind(err: &EvalError) -> &'static str {
    match err {
        EvalError::TypeMismatch { .. } => "type_mismatch",
        EvalError::DivisionByZero { .. } => "division_by_zero",
        EvalError::UnwrapOnAbsent => "unwrap_on_absent",
        EvalError::IntegerOverflow { .. } => "integer_overflow",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use unwrapped::{run_with, EvalContext};

    fn text(source: &str, ctx: &EvalContext) -> (String, String) {
        let outcome = run_with(source, ctx);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        write_text(source, &outcome, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_text_value() {
        let (out, err) = text("nil ?? \"guest\"", &EvalContext::default());
        assert_eq!(out, "\"guest\"\n");
        assert_eq!(err, "");
    }

    #[test]
    fn test_text_with_trace() {
        let (out, _) = text("1 + 2", &EvalContext::default().traced(true));
        assert_eq!(out, "  1 => 1\n  2 => 2\n1 + 2 => 3\n3\n");
    }

    #[test]
    fn test_text_eval_error() {
        let (out, err) = text("nil!", &EvalContext::default());
        assert_eq!(out, "");
        assert_eq!(
            err,
            "error: unexpectedly found nil while force-unwrapping a value\n"
        );
    }

    #[test]
    fn test_text_parse_error_has_caret() {
        let (_, err) = text("1 ? 2", &EvalContext::default());
        assert_eq!(
            err,
            "parse error: unexpected `?`; nil-coalescing is written `??` at 1:3\n1 ? 2\n  ^\n"
        );
    }

    #[test]
    fn test_json_value() {
        let outcome = run_with("nil ?? 3", &EvalContext::default());
        let doc = to_json("nil ?? 3", &outcome).unwrap();
        assert_eq!(doc["ok"], json!(true));
        assert_eq!(doc["value"], json!("3"));
        assert_eq!(doc["kind"], json!("Int"));
        assert_eq!(doc["trace"], json!([]));
    }

    #[test]
    fn test_json_trace_steps() {
        let outcome = run_with("nil!", &EvalContext::default().traced(true));
        let doc = to_json("nil!", &outcome).unwrap();
        assert_eq!(doc["ok"], json!(false));
        assert_eq!(doc["error"]["kind"], json!("unwrap_on_absent"));
        assert_eq!(
            doc["trace"][0],
            json!({"depth": 1, "expr": "nil", "outcome": {"status": "value", "detail": "nil"}})
        );
        assert_eq!(doc["trace"][1]["outcome"]["status"], json!("error"));
    }

    #[test]
    fn test_json_parse_error() {
        let outcome = run_with("1 +", &EvalContext::default());
        let doc = to_json("1 +", &outcome).unwrap();
        assert_eq!(doc["error"]["kind"], json!("parse"));
        assert_eq!(doc["error"]["line"], json!(1));
    }

    #[test]
    fn test_succeeded() {
        let ctx = EvalContext::default();
        assert!(succeeded(&run_with("1", &ctx)));
        assert!(!succeeded(&run_with("1 / 0", &ctx)));
        assert!(!succeeded(&run_with("1 /", &ctx)));
        assert_eq!(
            eval_error(&run_with("nil!", &ctx)),
            Some(&EvalError::UnwrapOnAbsent)
        );
    }
}

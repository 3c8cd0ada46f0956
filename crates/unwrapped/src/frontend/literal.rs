//! Literal decoding

use proc_macro2::{Ident, Literal};

use super::ParseError;
use crate::Value;

/// Decode a literal token into a value.
pub(crate) fn decode(token: &Literal) -> Result<Value, ParseError> {
    let span = token.span();

    match syn::Lit::new(token.clone()) {
        syn::Lit::Int(lit) => {
            reject_suffix(lit.suffix(), token)?;
            lit.base10_parse::<i64>().map(Value::Int).map_err(|_| {
                ParseError::at(
                    format!("integer literal `{}` does not fit in 64 bits", token),
                    span,
                )
            })
        }

        syn::Lit::Float(lit) => {
            reject_suffix(lit.suffix(), token)?;
            lit.base10_parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ParseError::at(format!("invalid float literal `{}`", token), span))
        }

        syn::Lit::Str(lit) => {
            reject_suffix(lit.suffix(), token)?;
            Ok(Value::text(lit.value()))
        }

        // A character is just a one-character text
        syn::Lit::Char(lit) => Ok(Value::text(lit.value().to_string())),

        _ => Err(ParseError::at(
            format!("unsupported literal `{}`", token),
            span,
        )),
    }
}

/// Decode `-` followed by `token` as one negative number.
///
/// Returns `None` when the token is not a number, leaving the `-` to be
/// parsed as negation.
pub(crate) fn decode_negated(token: &Literal) -> Option<Result<Value, ParseError>> {
    let span = token.span();

    match syn::Lit::new(token.clone()) {
        syn::Lit::Int(lit) => Some(reject_suffix(lit.suffix(), token).and_then(|()| {
            // Parsed wide so that `-9223372036854775808` fits
            lit.base10_parse::<i128>()
                .ok()
                .and_then(|n| i64::try_from(-n).ok())
                .map(Value::Int)
                .ok_or_else(|| {
                    ParseError::at(
                        format!("integer literal `-{}` does not fit in 64 bits", token),
                        span,
                    )
                })
        })),

        syn::Lit::Float(lit) => Some(reject_suffix(lit.suffix(), token).and_then(|()| {
            lit.base10_parse::<f64>()
                .map(|n| Value::Float(-n))
                .map_err(|_| ParseError::at(format!("invalid float literal `{}`", token), span))
        })),

        _ => None,
    }
}

fn reject_suffix(suffix: &str, token: &Literal) -> Result<(), ParseError> {
    if suffix.is_empty() {
        Ok(())
    } else {
        Err(ParseError::at(
            format!("literal `{}` has a type suffix; suffixes are not supported", token),
            token.span(),
        ))
    }
}

/// Decode one of the literal keywords `true`, `false` and `nil`.
pub(crate) fn keyword(ident: &Ident) -> Result<Value, ParseError> {
    match ident.to_string().as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        "nil" => Ok(Value::Absent),
        other => Err(ParseError::at(
            format!("unknown name `{}`; only `true`, `false` and `nil` are defined", other),
            ident.span(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Span;

    #[test]
    fn test_integers() {
        assert_eq!(
            decode(&Literal::i64_unsuffixed(42)).unwrap(),
            Value::Int(42)
        );
        assert_eq!(decode(&"0x1F".parse().unwrap()).unwrap(), Value::Int(31));
        assert_eq!(decode(&"1_000".parse().unwrap()).unwrap(), Value::Int(1000));
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = decode(&"9223372036854775808".parse().unwrap()).unwrap_err();
        assert!(err.message.contains("does not fit in 64 bits"));
    }

    #[test]
    fn test_negated_numbers() {
        let min: Literal = "9223372036854775808".parse().unwrap();
        assert_eq!(decode_negated(&min).unwrap().unwrap(), Value::Int(i64::MIN));
        let too_big: Literal = "9223372036854775809".parse().unwrap();
        let err = decode_negated(&too_big).unwrap().unwrap_err();
        assert_eq!(
            err.message,
            "integer literal `-9223372036854775809` does not fit in 64 bits"
        );
        assert_eq!(
            decode_negated(&"2.5".parse().unwrap()).unwrap().unwrap(),
            Value::Float(-2.5)
        );
        assert!(decode_negated(&Literal::string("x")).is_none());
    }

    #[test]
    fn test_floats() {
        assert_eq!(decode(&"2.5".parse().unwrap()).unwrap(), Value::Float(2.5));
        assert_eq!(
            decode(&"1e3".parse().unwrap()).unwrap(),
            Value::Float(1000.0)
        );
    }

    #[test]
    fn test_text() {
        assert_eq!(
            decode(&Literal::string("a\nb")).unwrap(),
            Value::text("a\nb")
        );
        assert_eq!(decode(&Literal::character('x')).unwrap(), Value::text("x"));
    }

    #[test]
    fn test_suffix_rejected() {
        let err = decode(&Literal::i32_suffixed(1)).unwrap_err();
        assert!(err.message.contains("suffix"));
    }

    #[test]
    fn test_byte_string_rejected() {
        let err = decode(&Literal::byte_string(b"ab")).unwrap_err();
        assert!(err.message.starts_with("unsupported literal"));
    }

    #[test]
    fn test_keywords() {
        let ident = |s: &str| Ident::new(s, Span::call_site());
        assert_eq!(keyword(&ident("nil")).unwrap(), Value::Absent);
        assert_eq!(keyword(&ident("true")).unwrap(), Value::Bool(true));
        assert!(keyword(&ident("x")).is_err());
    }
}

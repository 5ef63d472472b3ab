//! Condition compiler for free-text filter expressions
//!
//! Turns a restricted filter expression like `name = stanley park and
//! type = park` into a SQL boolean expression: forbidden-character
//! screening, tokenization, structural validation, then rendering either
//! as an inline fragment or as a placeholder form with bound parameters.
//!
//! The compiler is a pure synchronous function: no shared state, no I/O,
//! identical output for identical input.

pub mod predicate;
pub mod sanitize;
pub mod tokenizer;

pub use predicate::{CompiledFilter, Condition, Literal, SqlParams};
pub use sanitize::{is_clean, is_clean_insert};
pub use tokenizer::{Connective, Operator, Token};

use thiserror::Error;

/// Errors produced while compiling a filter expression
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Filter expression is empty")]
    EmptyInput,

    #[error("Filter contains forbidden character '{0}'")]
    ForbiddenCharacter(char),

    #[error("Malformed filter expression: {0}")]
    Malformed(String),

    #[error("Cannot filter by field '{0}'")]
    UnknownField(String),
}

/// Compile a raw filter expression into a structured predicate.
///
/// Rejects empty input, input containing any forbidden character, and
/// token sequences that do not follow
/// `field op value (AND|OR field op value)*`.
pub fn compile(raw: &str) -> Result<CompiledFilter, SelectionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SelectionError::EmptyInput);
    }
    if let Some(c) = sanitize::first_forbidden(trimmed) {
        return Err(SelectionError::ForbiddenCharacter(c));
    }

    let tokens = tokenizer::tokenize(trimmed)?;
    CompiledFilter::from_tokens(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_single_multiword_value() {
        let filter = compile("name = Stanley Park").unwrap();
        assert_eq!(filter.fragment(), "name = 'Stanley Park'");
    }

    #[test]
    fn compile_numeric_and_text_conditions() {
        let filter = compile("rating > 4 AND type = park").unwrap();
        assert_eq!(filter.fragment(), "rating > 4 AND type = 'Park'");
    }

    #[test]
    fn compile_or_between_multiword_values() {
        let filter = compile("name = Stanley Park OR name = Queen Elizabeth").unwrap();
        assert_eq!(
            filter.fragment(),
            "name = 'Stanley Park' OR name = 'Queen Elizabeth'"
        );
    }

    #[test]
    fn compile_bare_numeric() {
        let filter = compile("id = 42").unwrap();
        assert_eq!(filter.fragment(), "id = 42");
    }

    #[test]
    fn compile_lowercase_connective_normalized() {
        let filter = compile("name = a and type = b").unwrap();
        assert_eq!(filter.fragment(), "name = 'A' AND type = 'B'");
    }

    #[test]
    fn compile_rejects_forbidden_character() {
        let err = compile("name = Joe's").unwrap_err();
        assert!(matches!(err, SelectionError::ForbiddenCharacter('\'')));
    }

    #[test]
    fn compile_rejects_empty_input() {
        assert!(matches!(compile(""), Err(SelectionError::EmptyInput)));
        assert!(matches!(compile("   "), Err(SelectionError::EmptyInput)));
    }

    #[test]
    fn compile_rejects_dangling_operator() {
        assert!(matches!(
            compile("name ="),
            Err(SelectionError::Malformed(_))
        ));
    }

    #[test]
    fn compile_is_idempotent() {
        let a = compile("rating > 4 AND type = park").unwrap().fragment();
        let b = compile("rating > 4 AND type = park").unwrap().fragment();
        assert_eq!(a, b);
    }
}

//! Structured predicate built from a token sequence
//!
//! The compiled filter keeps conditions structured (field, operator, value,
//! connective) so it can render two ways: the legacy quoted fragment for
//! `WHERE` splicing, and a placeholder form with bound parameters for the
//! query path. Field names are checked against closed per-table allow-lists
//! before either rendering is used.

use super::SelectionError;
use super::tokenizer::{Connective, Operator, Token};

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<String>,
}

/// A comparison value, classified at tokenization time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// All-digits value, rendered bare
    Number(String),
    /// Free-text value, canonically capitalized, rendered quoted
    Text(String),
}

impl Literal {
    /// Classify a raw accumulated value.
    ///
    /// Pure digit runs stay bare numerics. Anything else is capitalized
    /// word-by-word (first char upper, remainder lower).
    pub fn classify(raw: &str) -> Self {
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            Literal::Number(raw.to_string())
        } else {
            Literal::Text(capitalize_words(raw))
        }
    }

    /// Render as a SQL literal: bare for numbers, single-quoted with
    /// embedded quotes doubled for text.
    pub fn render(&self) -> String {
        match self {
            Literal::Number(n) => n.clone(),
            Literal::Text(t) => format!("'{}'", t.replace('\'', "''")),
        }
    }

    /// The bind-parameter value (no quoting, capitalization preserved)
    pub fn bind_value(&self) -> &str {
        match self {
            Literal::Number(n) => n,
            Literal::Text(t) => t,
        }
    }
}

/// Capitalize each space-separated word: first char upper, rest lower
fn capitalize_words(raw: &str) -> String {
    raw.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One `field operator value` comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: Literal,
}

/// A validated filter expression: one condition followed by zero or more
/// connective-joined conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFilter {
    pub first: Condition,
    pub rest: Vec<(Connective, Condition)>,
}

impl CompiledFilter {
    /// Build from a token sequence, enforcing the
    /// `field op value (AND|OR field op value)*` shape.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, SelectionError> {
        let mut iter = tokens.into_iter().peekable();

        let first = take_condition(&mut iter)?;
        let mut rest = Vec::new();

        while let Some(token) = iter.next() {
            let connective = match token {
                Token::Connective(c) => c,
                other => {
                    return Err(SelectionError::Malformed(format!(
                        "expected AND/OR, found {}",
                        describe(&other)
                    )));
                }
            };
            rest.push((connective, take_condition(&mut iter)?));
        }

        Ok(Self { first, rest })
    }

    /// Render the SQL-ready `WHERE` clause body with inline literals.
    pub fn fragment(&self) -> String {
        let mut out = render_condition(&self.first);
        for (connective, condition) in &self.rest {
            out.push(' ');
            out.push_str(connective.as_str());
            out.push(' ');
            out.push_str(&render_condition(condition));
        }
        out
    }

    /// Render with `?` placeholders, pushing every value into `params`.
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        let mut out = bind_condition(&self.first, params);
        for (connective, condition) in &self.rest {
            out.push(' ');
            out.push_str(connective.as_str());
            out.push(' ');
            out.push_str(&bind_condition(condition, params));
        }
        out
    }

    /// Check every field against a closed allow-list.
    pub fn validate_fields(&self, allowed: &[&str]) -> Result<(), SelectionError> {
        for condition in self.conditions() {
            if !allowed.contains(&condition.field.as_str()) {
                return Err(SelectionError::UnknownField(condition.field.clone()));
            }
        }
        Ok(())
    }

    /// All conditions in order
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, c)| c))
    }
}

fn render_condition(condition: &Condition) -> String {
    format!(
        "{} {} {}",
        condition.field,
        condition.operator.as_str(),
        condition.value.render()
    )
}

fn bind_condition(condition: &Condition, params: &mut SqlParams) -> String {
    params.values.push(condition.value.bind_value().to_string());
    format!("{} {} ?", condition.field, condition.operator.as_str())
}

fn take_condition(
    iter: &mut std::iter::Peekable<std::vec::IntoIter<Token>>,
) -> Result<Condition, SelectionError> {
    let field = match iter.next() {
        Some(Token::Field(f)) => f,
        Some(other) => {
            return Err(SelectionError::Malformed(format!(
                "expected field name, found {}",
                describe(&other)
            )));
        }
        None => {
            return Err(SelectionError::Malformed(
                "expected field name, found end of input".to_string(),
            ));
        }
    };

    let operator = match iter.next() {
        Some(Token::Operator(op)) => op,
        Some(other) => {
            return Err(SelectionError::Malformed(format!(
                "expected comparison operator after '{}', found {}",
                field,
                describe(&other)
            )));
        }
        None => {
            return Err(SelectionError::Malformed(format!(
                "expected comparison operator after '{}', found end of input",
                field
            )));
        }
    };

    let value = match iter.next() {
        Some(Token::Value(v)) if !v.is_empty() => Literal::classify(&v),
        Some(Token::Value(_)) | None => {
            return Err(SelectionError::Malformed(format!(
                "missing value after '{} {}'",
                field,
                operator.as_str()
            )));
        }
        Some(other) => {
            return Err(SelectionError::Malformed(format!(
                "expected value after '{} {}', found {}",
                field,
                operator.as_str(),
                describe(&other)
            )));
        }
    };

    Ok(Condition {
        field,
        operator,
        value,
    })
}

fn describe(token: &Token) -> String {
    match token {
        Token::Field(f) => format!("'{}'", f),
        Token::Operator(op) => format!("operator '{}'", op.as_str()),
        Token::Value(v) => format!("value '{}'", v),
        Token::Connective(c) => format!("'{}'", c.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::tokenizer::tokenize;

    fn build(input: &str) -> Result<CompiledFilter, SelectionError> {
        CompiledFilter::from_tokens(tokenize(input)?)
    }

    #[test]
    fn literal_classify_digits_bare() {
        assert_eq!(Literal::classify("42"), Literal::Number("42".to_string()));
        assert_eq!(Literal::classify("42").render(), "42");
    }

    #[test]
    fn literal_classify_text_capitalized() {
        assert_eq!(
            Literal::classify("stanley park"),
            Literal::Text("Stanley Park".to_string())
        );
        assert_eq!(Literal::classify("PARK").render(), "'Park'");
    }

    #[test]
    fn literal_embedded_quote_doubled() {
        assert_eq!(Literal::classify("o'brien").render(), "'O''brien'");
    }

    #[test]
    fn fragment_single_condition() {
        let filter = build("name = stanley park").unwrap();
        assert_eq!(filter.fragment(), "name = 'Stanley Park'");
    }

    #[test]
    fn fragment_mixed_conditions() {
        let filter = build("rating > 4 and type = park").unwrap();
        assert_eq!(filter.fragment(), "rating > 4 AND type = 'Park'");
    }

    #[test]
    fn to_sql_binds_every_value() {
        let filter = build("rating > 4 and type = park").unwrap();
        let mut params = SqlParams::default();
        let sql = filter.to_sql(&mut params);
        assert_eq!(sql, "rating > ? AND type = ?");
        assert_eq!(params.values, vec!["4".to_string(), "Park".to_string()]);
    }

    #[test]
    fn dangling_operator_rejected() {
        let err = build("name =").unwrap_err();
        assert!(matches!(err, SelectionError::Malformed(_)));
    }

    #[test]
    fn dangling_connective_rejected() {
        let err = build("name = park and").unwrap_err();
        assert!(matches!(err, SelectionError::Malformed(_)));
    }

    #[test]
    fn missing_operator_rejected() {
        let err = build("name stanley park").unwrap_err();
        assert!(matches!(err, SelectionError::Malformed(_)));
    }

    #[test]
    fn validate_fields_against_allow_list() {
        let filter = build("name = park").unwrap();
        assert!(filter.validate_fields(&["name", "type"]).is_ok());

        let err = filter.validate_fields(&["rating"]).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownField(f) if f == "name"));
    }
}

//! Single-pass tokenizer for filter expressions
//!
//! Splits a trimmed input on whitespace. A run of words following a
//! comparison operator is absorbed into one multi-word value until the next
//! connective or operator, so `name = stanley park` captures `stanley park`
//! as a single literal without the user quoting it.
//!
//! Field words are lowercased on emit so the column allow-list check is
//! case-insensitive (`Name = x` and `name = x` compile identically).
//! Values are left untouched here; capitalization happens later in the
//! compiled predicate.

use super::SelectionError;

/// Comparison operators accepted in filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    Ne,
}

impl Operator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Ne => "<>",
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word {
            "=" => Some(Operator::Eq),
            "<" => Some(Operator::Lt),
            ">" => Some(Operator::Gt),
            "<=" => Some(Operator::Le),
            ">=" => Some(Operator::Ge),
            "<>" => Some(Operator::Ne),
            _ => None,
        }
    }
}

/// Boolean connectives joining two conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }

    fn parse(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("and") {
            Some(Connective::And)
        } else if word.eq_ignore_ascii_case("or") {
            Some(Connective::Or)
        } else {
            None
        }
    }
}

/// One lexical unit of a filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Field/identifier, lowercased
    Field(String),
    Operator(Operator),
    /// Raw multi-word value, words joined by single spaces
    Value(String),
    Connective(Connective),
}

/// Tokenize a trimmed, sanitized input string.
///
/// Value accumulation starts immediately after an operator token and stops
/// at the next connective or operator word, or at end of input. An operator
/// followed by nothing produces no value token; the structural check in
/// `compile` rejects that sequence.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SelectionError> {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.is_empty() {
        return Err(SelectionError::EmptyInput);
    }

    let mut tokens: Vec<Token> = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let word = words[i];

        if let Some(conn) = Connective::parse(word) {
            tokens.push(Token::Connective(conn));
            i += 1;
        } else if let Some(op) = Operator::parse(word) {
            tokens.push(Token::Operator(op));
            i += 1;
        } else if matches!(tokens.last(), Some(Token::Operator(_))) {
            // Absorb words into one value until a connective or operator
            let mut value_words: Vec<&str> = Vec::new();
            while i < words.len()
                && Connective::parse(words[i]).is_none()
                && Operator::parse(words[i]).is_none()
            {
                value_words.push(words[i]);
                i += 1;
            }
            tokens.push(Token::Value(value_words.join(" ")));
        } else {
            tokens.push(Token::Field(word.to_lowercase()));
            i += 1;
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_condition() {
        let tokens = tokenize("name = stanley park").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Field("name".to_string()),
                Token::Operator(Operator::Eq),
                Token::Value("stanley park".to_string()),
            ]
        );
    }

    #[test]
    fn connectives_case_insensitive() {
        let tokens = tokenize("rating > 4 and type = park").unwrap();
        assert_eq!(tokens[3], Token::Connective(Connective::And));

        let tokens = tokenize("a = b OR c = d").unwrap();
        assert_eq!(tokens[3], Token::Connective(Connective::Or));
    }

    #[test]
    fn value_accumulation_stops_at_connective() {
        let tokens = tokenize("name = queen elizabeth or type = park").unwrap();
        assert_eq!(tokens[2], Token::Value("queen elizabeth".to_string()));
        assert_eq!(tokens[3], Token::Connective(Connective::Or));
        assert_eq!(tokens[6], Token::Value("park".to_string()));
    }

    #[test]
    fn all_operator_symbols_recognized() {
        for (sym, op) in [
            ("=", Operator::Eq),
            ("<", Operator::Lt),
            (">", Operator::Gt),
            ("<=", Operator::Le),
            (">=", Operator::Ge),
            ("<>", Operator::Ne),
        ] {
            let tokens = tokenize(&format!("rating {} 4", sym)).unwrap();
            assert_eq!(tokens[1], Token::Operator(op));
        }
    }

    #[test]
    fn fields_lowercased() {
        let tokens = tokenize("Name = park").unwrap();
        assert_eq!(tokens[0], Token::Field("name".to_string()));
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(tokenize("   "), Err(SelectionError::EmptyInput)));
    }
}

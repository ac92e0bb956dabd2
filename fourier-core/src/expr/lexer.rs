//! Tokenizer for the formula language.

use crate::error::FormulaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Power,
    LParen,
    RParen,
    Comma,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    EqEq,
    NotEq,
    And,
    Or,
    Not,
}

impl Token {
    /// Short form used in syntax error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(v) => format!("number {}", v),
            Token::Name(name) => format!("'{}'", name),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::Slash => "'/'".into(),
            Token::Percent => "'%'".into(),
            Token::Power => "'**'".into(),
            Token::LParen => "'('".into(),
            Token::RParen => "')'".into(),
            Token::Comma => "','".into(),
            Token::Less => "'<'".into(),
            Token::LessEq => "'<='".into(),
            Token::Greater => "'>'".into(),
            Token::GreaterEq => "'>='".into(),
            Token::EqEq => "'=='".into(),
            Token::NotEq => "'!='".into(),
            Token::And => "'&'".into(),
            Token::Or => "'|'".into(),
            Token::Not => "'~'".into(),
        }
    }
}

/// A token and the 1-based column it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub column: usize,
}

fn syntax(column: usize, message: impl Into<String>) -> FormulaError {
    FormulaError::Syntax {
        column,
        message: message.into(),
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits formula text into tokens.
///
/// Dotted names such as `np.sin` are kept together as one name; the parser
/// decides whether the namespace is acceptable.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, FormulaError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let column = i + 1;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()))
        {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| syntax(column, format!("invalid number '{}'", text)))?;
            tokens.push(Spanned { token: Token::Number(value), column });
            continue;
        }

        if is_name_start(c) {
            let start = i;
            while i < chars.len() {
                if is_name_char(chars[i]) {
                    i += 1;
                } else if chars[i] == '.' && chars.get(i + 1).is_some_and(|&n| is_name_start(n)) {
                    i += 1;
                } else {
                    break;
                }
            }
            let name: String = chars[start..i].iter().collect();
            tokens.push(Spanned { token: Token::Name(name), column });
            continue;
        }

        let next = chars.get(i + 1).copied();
        let (token, width) = match (c, next) {
            ('*', Some('*')) => (Token::Power, 2),
            ('*', _) => (Token::Star, 1),
            ('^', _) => (Token::Power, 1),
            ('+', _) => (Token::Plus, 1),
            ('-', _) => (Token::Minus, 1),
            ('/', _) => (Token::Slash, 1),
            ('%', _) => (Token::Percent, 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            (',', _) => (Token::Comma, 1),
            ('<', Some('=')) => (Token::LessEq, 2),
            ('<', _) => (Token::Less, 1),
            ('>', Some('=')) => (Token::GreaterEq, 2),
            ('>', _) => (Token::Greater, 1),
            ('=', Some('=')) => (Token::EqEq, 2),
            ('=', _) => return Err(syntax(column, "unexpected '=', did you mean '=='?")),
            ('!', Some('=')) => (Token::NotEq, 2),
            ('!', _) | ('~', _) => (Token::Not, 1),
            ('&', Some('&')) => (Token::And, 2),
            ('&', _) => (Token::And, 1),
            ('|', Some('|')) => (Token::Or, 2),
            ('|', _) => (Token::Or, 1),
            _ => return Err(syntax(column, format!("unexpected character '{}'", c))),
        };
        tokens.push(Spanned { token, column });
        i += width;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn numbers_with_fractions_and_exponents() {
        assert_eq!(
            kinds("1 2.5 .5 3e2 4E-1"),
            vec![
                Token::Number(1.0),
                Token::Number(2.5),
                Token::Number(0.5),
                Token::Number(300.0),
                Token::Number(0.4),
            ]
        );
    }

    #[test]
    fn dotted_names_stay_together() {
        assert_eq!(
            kinds("np.sin(2*x)"),
            vec![
                Token::Name("np.sin".into()),
                Token::LParen,
                Token::Number(2.0),
                Token::Star,
                Token::Name("x".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn two_character_operators() {
        assert_eq!(
            kinds("x**2 <= 1 != 0 == 1 >= 2"),
            vec![
                Token::Name("x".into()),
                Token::Power,
                Token::Number(2.0),
                Token::LessEq,
                Token::Number(1.0),
                Token::NotEq,
                Token::Number(0.0),
                Token::EqEq,
                Token::Number(1.0),
                Token::GreaterEq,
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn pi_symbol_is_a_name() {
        assert_eq!(kinds("π"), vec![Token::Name("π".into())]);
    }

    #[test]
    fn columns_point_at_token_starts() {
        let tokens = tokenize("x  + 1").unwrap();
        let columns: Vec<usize> = tokens.iter().map(|t| t.column).collect();
        assert_eq!(columns, vec![1, 4, 6]);
    }

    #[test]
    fn stray_characters_are_rejected() {
        assert_eq!(
            tokenize("x $ 1"),
            Err(FormulaError::Syntax {
                column: 3,
                message: "unexpected character '$'".into()
            })
        );
        assert!(matches!(tokenize("x = 1"), Err(FormulaError::Syntax { column: 3, .. })));
    }
}

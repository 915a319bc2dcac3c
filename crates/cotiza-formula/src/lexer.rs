//! Tokenizer for bound formulas.
//!
//! Input is a formula after variable binding: numbers, operators,
//! parentheses, argument separators and function names. Spreadsheet
//! spellings are folded into their canonical token here: `=` and `==` are
//! both [`Token::Eq`], `<>` and `!=` are both [`Token::Ne`], the words `Y` and
//! `O` are [`Token::And`] and [`Token::Or`], and `;` separates arguments like `,`.

use std::fmt;

use crate::error::{FormulaError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    LParen,
    RParen,
    Comma,
    Plus,
    Minus,
    Star,
    Slash,
    Question,
    Colon,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    And,
    Or,
    Not,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(s) => f.write_str(s),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Question => f.write_str("?"),
            Token::Colon => f.write_str(":"),
            Token::Gt => f.write_str(">"),
            Token::Lt => f.write_str("<"),
            Token::Ge => f.write_str(">="),
            Token::Le => f.write_str("<="),
            Token::Eq => f.write_str("=="),
            Token::Ne => f.write_str("!="),
            Token::And => f.write_str("&&"),
            Token::Or => f.write_str("||"),
            Token::Not => f.write_str("!"),
        }
    }
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// Split `src` into tokens.
pub fn tokenize(src: &str) -> Result<Vec<Spanned>> {
    let chars: Vec<(usize, char)> = src.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        let next = chars.get(i + 1).map(|(_, c)| *c);

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == '.' && next.is_some_and(|n| n.is_ascii_digit())) {
            let start = i;
            let mut seen_dot = false;
            while i < chars.len() {
                let ch = chars[i].1;
                if ch.is_ascii_digit() {
                    i += 1;
                } else if ch == '.' && !seen_dot {
                    seen_dot = true;
                    i += 1;
                } else {
                    break;
                }
            }
            let end = chars.get(i).map_or(src.len(), |(p, _)| *p);
            let text = &src[chars[start].0..end];
            let value = text
                .parse::<f64>()
                .map_err(|_| FormulaError::syntax(pos, format!("invalid number '{}'", text)))?;
            tokens.push(Spanned {
                token: Token::Number(value),
                pos,
            });
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() {
                let ch = chars[i].1;
                if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                    i += 1;
                } else {
                    break;
                }
            }
            let end = chars.get(i).map_or(src.len(), |(p, _)| *p);
            let word = &src[chars[start].0..end];
            let token = match word {
                "Y" => Token::And,
                "O" => Token::Or,
                _ => Token::Ident(word.to_string()),
            };
            tokens.push(Spanned { token, pos });
            continue;
        }

        let (token, width) = match (c, next) {
            ('>', Some('=')) => (Token::Ge, 2),
            ('<', Some('=')) => (Token::Le, 2),
            ('<', Some('>')) => (Token::Ne, 2),
            ('=', Some('=')) => (Token::Eq, 2),
            ('!', Some('=')) => (Token::Ne, 2),
            ('&', Some('&')) => (Token::And, 2),
            ('|', Some('|')) => (Token::Or, 2),
            ('>', _) => (Token::Gt, 1),
            ('<', _) => (Token::Lt, 1),
            ('=', _) => (Token::Eq, 1),
            ('!', _) => (Token::Not, 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            (',', _) | (';', _) => (Token::Comma, 1),
            ('+', _) => (Token::Plus, 1),
            ('-', _) => (Token::Minus, 1),
            ('*', _) => (Token::Star, 1),
            ('/', _) => (Token::Slash, 1),
            ('?', _) => (Token::Question, 1),
            (':', _) => (Token::Colon, 1),
            _ => {
                return Err(FormulaError::syntax(
                    pos,
                    format!("unexpected character '{}'", c),
                ));
            }
        };
        tokens.push(Spanned { token, pos });
        i += width;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<Token> {
        tokenize(src).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn numbers_and_operators() {
        assert_eq!(
            kinds("(1.5+2)*.5/10"),
            vec![
                Token::LParen,
                Token::Number(1.5),
                Token::Plus,
                Token::Number(2.0),
                Token::RParen,
                Token::Star,
                Token::Number(0.5),
                Token::Slash,
                Token::Number(10.0),
            ]
        );
    }

    #[test]
    fn dotted_function_names_are_one_identifier() {
        assert_eq!(
            kinds("REDONDEAR.MENOS(2.99, 0)"),
            vec![
                Token::Ident("REDONDEAR.MENOS".into()),
                Token::LParen,
                Token::Number(2.99),
                Token::Comma,
                Token::Number(0.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn spreadsheet_spellings_fold_to_canonical_tokens() {
        assert_eq!(kinds("1=1"), kinds("1==1"));
        assert_eq!(kinds("1<>2"), kinds("1!=2"));
        assert_eq!(kinds("1 Y 0"), kinds("1 && 0"));
        assert_eq!(kinds("1 O 0"), kinds("1 || 0"));
        assert_eq!(kinds("SI(1;2;3)"), kinds("SI(1,2,3)"));
    }

    #[test]
    fn comparison_pairs() {
        assert_eq!(
            kinds("1>=2<=3>4<5"),
            vec![
                Token::Number(1.0),
                Token::Ge,
                Token::Number(2.0),
                Token::Le,
                Token::Number(3.0),
                Token::Gt,
                Token::Number(4.0),
                Token::Lt,
                Token::Number(5.0),
            ]
        );
    }

    #[test]
    fn unexpected_character_reports_position() {
        match tokenize("1 + $") {
            Err(FormulaError::Syntax { pos, .. }) => assert_eq!(pos, 4),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn second_dot_ends_a_number() {
        let toks = tokenize("1.2.3").unwrap();
        assert_eq!(toks[0].token, Token::Number(1.2));
    }
}

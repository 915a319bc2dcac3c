//! Recursive-descent parser from bound formula text to a canonical expression tree.
//!
//! Precedence, loosest first:
//!
//! 1. `c ? a : b` (right associative)
//! 2. `||`
//! 3. `&&`
//! 4. `==` `!=`
//! 5. `<` `<=` `>` `>=`
//! 6. `+` `-`
//! 7. `*` `/`
//! 8. unary `-` `+` `!`
//! 9. numbers, parenthesized expressions, function calls
//!
//! Function calls are rewritten into canonical nodes as they are parsed
//! (see [`crate::functions`]).
//!
//! Parentheses, calls, conditionals and unary operators may nest at most
//! [`MAX_DEPTH`] levels, and a formula may hold at most [`MAX_TOKENS`]
//! tokens. Together these bound the depth of the tree handed to the
//! evaluator.

use crate::error::{FormulaError, Result};
use crate::functions::{Builtin, FormulaFunction};
use crate::lexer::{Spanned, Token, tokenize};

/// Deepest allowed nesting of parentheses, calls, conditionals and unary operators.
pub const MAX_DEPTH: usize = 64;

/// Largest number of tokens accepted in one formula.
pub const MAX_TOKENS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    And,
    Or,
}

/// Canonical expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Call(Builtin, Vec<Expr>),
}

/// Parse a bound formula into an expression tree.
pub fn parse(src: &str) -> Result<Expr> {
    let tokens = tokenize(src)?;
    if tokens.len() > MAX_TOKENS {
        return Err(FormulaError::syntax(
            tokens[MAX_TOKENS].pos,
            format!("formula longer than {} tokens", MAX_TOKENS),
        ));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: src.len(),
        depth: 0,
    };
    let expr = parser.ternary()?;
    if let Some(tok) = parser.peek() {
        return Err(FormulaError::syntax(
            tok.pos,
            format!("unexpected '{}'", tok.token),
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek().map(|s| &s.token)
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end, |s| s.pos)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek_token() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<()> {
        if self.eat(expected) {
            return Ok(());
        }
        let found = match self.peek() {
            Some(s) => format!("'{}'", s.token),
            None => "end of formula".to_string(),
        };
        Err(FormulaError::syntax(
            self.position(),
            format!("expected '{}', found {}", expected, found),
        ))
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(FormulaError::syntax(self.position(), "formula nested too deeply"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn ternary(&mut self) -> Result<Expr> {
        self.nested(Self::ternary_inner)
    }

    fn ternary_inner(&mut self) -> Result<Expr> {
        let cond = self.or()?;
        if !self.eat(&Token::Question) {
            return Ok(cond);
        }
        let then = self.ternary()?;
        self.expect(&Token::Colon)?;
        let otherwise = self.ternary()?;
        Ok(Expr::Conditional {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    /// Parse a left-associative chain of binary operators.
    fn binary_chain(
        &mut self,
        next: fn(&mut Self) -> Result<Expr>,
        op_for: fn(&Token) -> Option<BinaryOp>,
    ) -> Result<Expr> {
        let mut lhs = next(self)?;
        while let Some(op) = self.peek_token().and_then(op_for) {
            self.pos += 1;
            let rhs = next(self)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn or(&mut self) -> Result<Expr> {
        self.binary_chain(Self::and, |t| (*t == Token::Or).then_some(BinaryOp::Or))
    }

    fn and(&mut self) -> Result<Expr> {
        self.binary_chain(Self::equality, |t| {
            (*t == Token::And).then_some(BinaryOp::And)
        })
    }

    fn equality(&mut self) -> Result<Expr> {
        self.binary_chain(Self::comparison, |t| match t {
            Token::Eq => Some(BinaryOp::Eq),
            Token::Ne => Some(BinaryOp::Ne),
            _ => None,
        })
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.binary_chain(Self::additive, |t| match t {
            Token::Gt => Some(BinaryOp::Gt),
            Token::Lt => Some(BinaryOp::Lt),
            Token::Ge => Some(BinaryOp::Ge),
            Token::Le => Some(BinaryOp::Le),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Expr> {
        self.binary_chain(Self::multiplicative, |t| match t {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<Expr> {
        self.binary_chain(Self::unary, |t| match t {
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            _ => None,
        })
    }

    fn unary(&mut self) -> Result<Expr> {
        let op = match self.peek_token() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Not) => UnaryOp::Not,
            _ => return self.primary(),
        };
        self.pos += 1;
        let operand = self.nested(Self::unary)?;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    fn primary(&mut self) -> Result<Expr> {
        let pos = self.position();
        let Some(tok) = self.advance() else {
            return Err(FormulaError::syntax(pos, "unexpected end of formula"));
        };
        match tok.token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::LParen => {
                let inner = self.ternary()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => {
                if self.peek_token() != Some(&Token::LParen) {
                    return Err(FormulaError::UnknownIdentifier(name));
                }
                self.call(name)
            }
            other => Err(FormulaError::syntax(pos, format!("unexpected '{}'", other))),
        }
    }

    fn call(&mut self, name: String) -> Result<Expr> {
        let function =
            FormulaFunction::from_name(&name).ok_or(FormulaError::UnknownFunction(name))?;
        self.expect(&Token::LParen)?;

        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                args.push(self.ternary()?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::RParen)?;
                break;
            }
        }

        let arity = function.arity();
        if !arity.contains(&args.len()) {
            let expected = if arity.start() == arity.end() {
                arity.start().to_string()
            } else {
                format!("{} to {}", arity.start(), arity.end())
            };
            return Err(FormulaError::Arity {
                function: function.name().to_string(),
                expected,
                found: args.len(),
            });
        }
        Ok(function.transpile(args))
    }
}

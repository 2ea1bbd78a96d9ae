//! Restricted arithmetic expression parser and evaluator.
//!
//! Accepts arithmetic over the free variables `u` and `v` (legacy surfaces
//! use `x` and `y`, accepted as aliases), the constants `pi` and `e`, and a
//! fixed set of math functions. Parsing produces an AST that is evaluated
//! directly; user input is never executed as code.
//!
//! Evaluation itself is total: domain errors surface as NaN or infinity in
//! the usual IEEE way, and the tessellator substitutes `0` per sample.

use livetracer_core::error::{Result, TracerError};

/// A free variable of the surface domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var {
    U,
    V,
}

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Supported math function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sqrt,
    Abs,
    Exp,
    Ln,
    Log,
    Floor,
    Ceil,
    Min,
    Max,
    Pow,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "atan2" => Func::Atan2,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            "exp" => Func::Exp,
            "ln" => Func::Ln,
            "log" => Func::Log,
            "floor" => Func::Floor,
            "ceil" => Func::Ceil,
            "min" => Func::Min,
            "max" => Func::Max,
            "pow" => Func::Pow,
            _ => return None,
        })
    }

    fn arity(self) -> usize {
        match self {
            Func::Atan2 | Func::Min | Func::Max | Func::Pow => 2,
            _ => 1,
        }
    }
}

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Var(Var),
    Neg(Box<Expr>),
    Bin(BinOp, Box<Expr>, Box<Expr>),
    Call(Func, Vec<Expr>),
}

impl Expr {
    /// Parses `source` into an expression AST.
    pub fn parse(source: &str) -> Result<Self> {
        let tokens = tokenize(source).map_err(|message| TracerError::ExprParse {
            expr: source.to_string(),
            message,
        })?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.expression().map_err(|message| TracerError::ExprParse {
            expr: source.to_string(),
            message,
        })?;
        if parser.pos != parser.tokens.len() {
            return Err(TracerError::ExprParse {
                expr: source.to_string(),
                message: "unexpected trailing input".to_string(),
            });
        }
        Ok(expr)
    }

    /// Evaluates the expression at `(u, v)`.
    ///
    /// Never panics; domain errors yield NaN/infinity per IEEE semantics.
    #[must_use]
    pub fn eval(&self, u: f64, v: f64) -> f64 {
        match self {
            Expr::Num(n) => *n,
            Expr::Var(Var::U) => u,
            Expr::Var(Var::V) => v,
            Expr::Neg(inner) => -inner.eval(u, v),
            Expr::Bin(op, lhs, rhs) => {
                let l = lhs.eval(u, v);
                let r = rhs.eval(u, v);
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Pow => l.powf(r),
                }
            }
            Expr::Call(func, args) => {
                let a = args[0].eval(u, v);
                match func {
                    Func::Sin => a.sin(),
                    Func::Cos => a.cos(),
                    Func::Tan => a.tan(),
                    Func::Asin => a.asin(),
                    Func::Acos => a.acos(),
                    Func::Atan => a.atan(),
                    Func::Sqrt => a.sqrt(),
                    Func::Abs => a.abs(),
                    Func::Exp => a.exp(),
                    Func::Ln => a.ln(),
                    Func::Log => a.log10(),
                    Func::Floor => a.floor(),
                    Func::Ceil => a.ceil(),
                    Func::Atan2 => a.atan2(args[1].eval(u, v)),
                    Func::Min => a.min(args[1].eval(u, v)),
                    Func::Max => a.max(args[1].eval(u, v)),
                    Func::Pow => a.powf(args[1].eval(u, v)),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

fn tokenize(source: &str) -> std::result::Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number '{literal}'"))?;
                tokens.push(Token::Num(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        ident.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => return Err(format!("unexpected character '{other}'")),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

type ParseResult = std::result::Result<Expr, String>;

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, token: &Token, what: &str) -> std::result::Result<(), String> {
        if self.peek() == Some(token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(format!("expected {what}"))
        }
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> ParseResult {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> ParseResult {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.factor()?;
            lhs = Expr::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    // factor := unary ('^' factor)?   (right-associative)
    fn factor(&mut self) -> ParseResult {
        let base = self.unary()?;
        if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            let exponent = self.factor()?;
            return Ok(Expr::Bin(BinOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    // unary := '-' unary | primary
    fn unary(&mut self) -> ParseResult {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            let inner = self.unary()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.primary()
    }

    // primary := number | ident | ident '(' args ')' | '(' expression ')'
    fn primary(&mut self) -> ParseResult {
        match self.advance() {
            Some(Token::Num(n)) => Ok(Expr::Num(n)),
            Some(Token::LParen) => {
                let inner = self.expression()?;
                self.expect(&Token::RParen, "closing parenthesis")?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => self.ident(&name),
            Some(other) => Err(format!("unexpected token {other:?}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn ident(&mut self, name: &str) -> ParseResult {
        if self.peek() == Some(&Token::LParen) {
            let func = Func::from_name(name).ok_or_else(|| format!("unknown function '{name}'"))?;
            self.pos += 1;
            let mut args = vec![self.expression()?];
            while self.peek() == Some(&Token::Comma) {
                self.pos += 1;
                args.push(self.expression()?);
            }
            self.expect(&Token::RParen, "closing parenthesis")?;
            if args.len() != func.arity() {
                return Err(format!(
                    "function '{name}' takes {} argument(s), got {}",
                    func.arity(),
                    args.len()
                ));
            }
            return Ok(Expr::Call(func, args));
        }
        match name {
            // legacy height-field expressions use x/y for the two parameters
            "u" | "x" => Ok(Expr::Var(Var::U)),
            "v" | "y" => Ok(Expr::Var(Var::V)),
            "pi" => Ok(Expr::Num(std::f64::consts::PI)),
            "e" => Ok(Expr::Num(std::f64::consts::E)),
            _ => Err(format!("unknown identifier '{name}'")),
        }
    }
}

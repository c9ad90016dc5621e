use crate::ast::*;
use crate::lexer::{Token, TokenKind};
use crate::{HostError, HostResult};
use miette::SourceSpan;

/// Our hand-rolled parser structure.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it.
    fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Consume and return the current token.
    fn next(&mut self) -> Option<&'a Token<'a>> {
        let tok = self.tokens.get(self.pos);
        self.pos += 1;
        tok
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Span just past the last token, for errors at end of input.
    fn eof_span(&self) -> SourceSpan {
        match self.tokens.last() {
            Some(t) => SourceSpan::new((t.span.offset() + t.span.len()).into(), 0usize),
            None => SourceSpan::new(0.into(), 0usize),
        }
    }

    /// Expect the next token to be of a specific kind.
    fn expect(&mut self, expected: TokenKind) -> HostResult<&'a Token<'a>> {
        match self.next() {
            Some(t) if t.kind == expected => Ok(t),
            Some(t) => Err(HostError::Parser {
                span: t.span,
                message: format!("Expected {:?}, found {:?}", expected, t.kind),
            }),
            None => Err(HostError::Parser {
                span: self.eof_span(),
                message: format!("Unexpected end of input; expected {:?}", expected),
            }),
        }
    }

    fn unexpected_end(&self, what: &str) -> HostError {
        HostError::Parser {
            span: self.eof_span(),
            message: format!("Unexpected end of tokens while parsing <{}>", what),
        }
    }

    //--------------------------------------------------------------------------
    // <Program> ::= (<Stmt> ";"?)*
    //--------------------------------------------------------------------------

    pub fn parse_program(&mut self) -> HostResult<Program> {
        let mut body = Vec::new();

        while let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Semicolon {
                self.next();
                continue;
            }
            body.push(self.parse_statement()?);
        }

        Ok(Program { body })
    }

    //--------------------------------------------------------------------------
    // <Stmt> ::= "return" <Expr>?
    //          | ("var" | "let" | "const") <ident> "=" <Expr>
    //          | <Expr>
    //--------------------------------------------------------------------------

    pub fn parse_statement(&mut self) -> HostResult<Stmt> {
        let tok = self.peek().ok_or_else(|| self.unexpected_end("Stmt"))?;

        if tok.kind == TokenKind::Identifier {
            match tok.lexeme {
                "return" => {
                    self.next();
                    let value = match self.peek_kind() {
                        None | Some(TokenKind::Semicolon) | Some(TokenKind::RBrace) => None,
                        Some(_) => Some(self.parse_expression()?),
                    };
                    return Ok(Stmt::Return(value));
                }
                "var" | "let" | "const" => {
                    self.next();
                    let name = self.expect(TokenKind::Identifier)?.lexeme.to_string();
                    self.expect(TokenKind::Assign)?;
                    let init = self.parse_expression()?;
                    return Ok(Stmt::Declare { name, init });
                }
                _ => {}
            }
        }

        Ok(Stmt::Expr(self.parse_expression()?))
    }

    //--------------------------------------------------------------------------
    // <Expr> ::= <Additive> (("===" | "!==") <Additive>)*
    //--------------------------------------------------------------------------

    pub fn parse_expression(&mut self) -> HostResult<Expr> {
        self.parse_chain(Self::parse_additive, |kind| match kind {
            TokenKind::StrictEq => Some(BinaryOp::StrictEq),
            TokenKind::StrictNe => Some(BinaryOp::StrictNe),
            _ => None,
        })
    }

    // <Additive> ::= <Multiplicative> (("+" | "-") <Multiplicative>)*
    fn parse_additive(&mut self) -> HostResult<Expr> {
        self.parse_chain(Self::parse_multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    // <Multiplicative> ::= <Unary> (("*" | "/" | "%") <Unary>)*
    fn parse_multiplicative(&mut self) -> HostResult<Expr> {
        self.parse_chain(Self::parse_unary, |kind| match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Rem),
            _ => None,
        })
    }

    fn parse_chain(
        &mut self,
        operand: fn(&mut Self) -> HostResult<Expr>,
        operator: fn(TokenKind) -> Option<BinaryOp>,
    ) -> HostResult<Expr> {
        let first = operand(self)?;
        let mut rest = Vec::new();

        while let Some(op) = self.peek_kind().and_then(operator) {
            self.next();
            rest.push((op, operand(self)?));
        }

        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Chain {
                first: Box::new(first),
                rest,
            })
        }
    }

    //--------------------------------------------------------------------------
    // <Unary> ::= ("!" | "+" | "-") <Unary> | <Postfix>
    //--------------------------------------------------------------------------

    fn parse_unary(&mut self) -> HostResult<Expr> {
        let op = match self.peek_kind() {
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(TokenKind::Plus) => UnaryOp::Plus,
            Some(TokenKind::Minus) => UnaryOp::Minus,
            _ => return self.parse_postfix(),
        };
        self.next();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    //--------------------------------------------------------------------------
    // <Postfix> ::= <Primary> ("[" <Expr> "]" | "." <ident> | "(" <args> ")")*
    //--------------------------------------------------------------------------

    fn parse_postfix(&mut self) -> HostResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek_kind() {
                Some(TokenKind::LBracket) => {
                    self.next();
                    let property = self.parse_expression()?;
                    self.expect(TokenKind::RBracket)?;
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: Box::new(property),
                    };
                }
                Some(TokenKind::Dot) => {
                    self.next();
                    let name = self.expect(TokenKind::Identifier)?.lexeme.to_string();
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: Box::new(Expr::Str(name)),
                    };
                }
                Some(TokenKind::LParen) => {
                    self.next();
                    let args = self.parse_list(TokenKind::RParen)?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Comma separated expressions up to (and including) `close`.
    fn parse_list(&mut self, close: TokenKind) -> HostResult<Vec<Expr>> {
        let mut items = Vec::new();

        loop {
            if self.peek_kind() == Some(close) {
                self.next();
                return Ok(items);
            }
            items.push(self.parse_expression()?);
            match self.peek_kind() {
                Some(TokenKind::Comma) => {
                    self.next();
                }
                Some(kind) if kind == close => {}
                Some(_) | None => {
                    self.expect(close)?;
                }
            }
        }
    }

    //--------------------------------------------------------------------------
    // <Primary> ::= <number> | <string> | <ident> | "this"
    //             | "[" <list> "]" | "(" <Expr> ")"
    //--------------------------------------------------------------------------

    fn parse_primary(&mut self) -> HostResult<Expr> {
        let tok = self.next().ok_or_else(|| self.unexpected_end("Primary"))?;

        match tok.kind {
            TokenKind::Number => tok
                .lexeme
                .parse::<f64>()
                .map(Expr::Number)
                .map_err(|e| HostError::Parser {
                    span: tok.span,
                    message: format!("Invalid number literal '{}': {}", tok.lexeme, e),
                }),
            TokenKind::String => unescape(tok.lexeme, tok.span).map(Expr::Str),
            TokenKind::Identifier => match tok.lexeme {
                "this" => Ok(Expr::This),
                "return" | "var" | "let" | "const" => Err(HostError::Parser {
                    span: tok.span,
                    message: format!("Unexpected keyword '{}'", tok.lexeme),
                }),
                name => Ok(Expr::Ident(name.to_string())),
            },
            TokenKind::LBracket => Ok(Expr::Array(self.parse_list(TokenKind::RBracket)?)),
            TokenKind::LParen => {
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(HostError::Parser {
                span: tok.span,
                message: format!("Unexpected token in <Primary>: {:?}", tok.kind),
            }),
        }
    }
}

/// Strips the quotes of a string literal and resolves its escapes.
fn unescape(lexeme: &str, span: SourceSpan) -> HostResult<String> {
    let invalid = |message: &str| HostError::Parser {
        span,
        message: message.to_string(),
    };

    let inner = &lexeme[1..lexeme.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let escaped = chars
            .next()
            .ok_or_else(|| invalid("Dangling escape in string literal"))?;
        let resolved = match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            'x' => {
                let digits: String = chars.by_ref().take(2).collect();
                code_point(&digits).ok_or_else(|| invalid("Invalid \\x escape"))?
            }
            'u' => {
                let digits: String = if chars.clone().next() == Some('{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                code_point(&digits).ok_or_else(|| invalid("Invalid \\u escape"))?
            }
            other => other,
        };
        out.push(resolved);
    }

    Ok(out)
}

fn code_point(digits: &str) -> Option<char> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

//------------------------------------------------------------------------------
// Public entry points for the parser.
//------------------------------------------------------------------------------

/// Parse a whole program body from the list of tokens.
pub fn parse_program<'a>(tokens: &'a [Token<'a>]) -> HostResult<Program> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

/// Parse exactly one expression, rejecting trailing tokens.
pub fn parse_expression<'a>(tokens: &'a [Token<'a>]) -> HostResult<Expr> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression()?;
    match parser.peek() {
        None => Ok(expr),
        Some(t) => Err(HostError::Parser {
            span: t.span,
            message: format!("Unexpected trailing token {:?}", t.kind),
        }),
    }
}

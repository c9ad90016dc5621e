/// The grammar references:
/// <Program>, <Stmt>, <Expr>, <Unary>, <Postfix>, <Primary>.

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    // "return" <Expr>?
    Return(Option<Expr>),
    // ("var" | "let" | "const") <ident> "=" <Expr>
    Declare { name: String, init: Expr },
    // <Expr>
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Str(String),
    Ident(String),
    This,
    // "[" (<Expr> ("," <Expr>)*)? "]"
    Array(Vec<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    // Left-associative run of operators sharing one precedence level,
    // kept flat so long concatenations evaluate without deep recursion.
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinaryOp, Expr)>,
    },
    // <Expr> "[" <Expr> "]" and <Expr> "." <ident>
    Member {
        object: Box<Expr>,
        property: Box<Expr>,
    },
    // <Expr> "(" <args> ")"
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    StrictEq,
    StrictNe,
}

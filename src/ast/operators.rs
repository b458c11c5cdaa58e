use std::fmt;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition, or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Floating remainder, sign follows the dividend (`%`)
    Modulo,
    /// Exponentiation (`^`), parsed left-associative
    Power,
}

impl BinOp {
    /// Maps an operator character to its binary operator.
    pub fn from_char(ch: char) -> Option<BinOp> {
        match ch {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Subtract),
            '*' => Some(BinOp::Multiply),
            '/' => Some(BinOp::Divide),
            '%' => Some(BinOp::Modulo),
            '^' => Some(BinOp::Power),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Subtract => '-',
            BinOp::Multiply => '*',
            BinOp::Divide => '/',
            BinOp::Modulo => '%',
            BinOp::Power => '^',
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Numeric coercion (`+x`)
    Plus,
    /// Negation (`-x`)
    Negate,
}

impl UnaryOp {
    pub fn from_char(ch: char) -> Option<UnaryOp> {
        match ch {
            '+' => Some(UnaryOp::Plus),
            '-' => Some(UnaryOp::Negate),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Plus => write!(f, "+"),
            UnaryOp::Negate => write!(f, "-"),
        }
    }
}

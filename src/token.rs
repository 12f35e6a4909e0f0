use std::fmt::{self, Display, Formatter};

/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal
    Number(f64),
    /// A name, resolved against the symbol table at evaluation time
    Symbol(String),
    /// An operator, with its arity already decided
    Op(Op),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

impl Display for Token {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Number(value) => write!(fmt, "{}", value),
            Self::Symbol(ref name) => write!(fmt, "{}", name),
            Self::Op(op) => write!(fmt, "{}", op.lexeme()),
            Self::LParen => write!(fmt, "("),
            Self::RParen => write!(fmt, ")"),
        }
    }
}

/// Grouping rule for operators of equal precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`
    LeftToRight,
    /// `a ** b ** c` is `a ** (b ** c)`
    RightToLeft,
}

/// Number of operands consumed by an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One operand
    Unary,
    /// Two operands
    Binary,
}

/// Operators taking a single operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `!a`, logical negation
    Not,
    /// `+a`, identity
    Plus,
    /// `-a`, negation
    Minus,
}

impl UnaryOp {
    /// Apply the operator to `value`
    #[must_use]
    pub fn call(self, value: f64) -> f64 {
        match self {
            Self::Not => {
                if value == 0.0 || value.is_nan() {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Plus => value,
            Self::Minus => -value,
        }
    }

    /// Source text of the operator
    #[must_use]
    pub fn lexeme(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// Operators taking two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a ** b`
    Pow,
    /// `a / b`
    Div,
    /// `a % b`
    Rem,
    /// `a * b`
    Mul,
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `name = value`, binds `name` in the symbol table
    Assign,
    /// `a, b`, evaluates to `b`
    Comma,
}

impl BinaryOp {
    /// Apply the operator to `left` and `right`. The binding performed by
    /// `Assign` is the evaluator's job, this only yields its value.
    #[must_use]
    pub fn call(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Pow => libm::pow(left, right),
            Self::Div => left / right,
            Self::Rem => libm::fmod(left, right),
            Self::Mul => left * right,
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Assign | Self::Comma => right,
        }
    }

    /// Source text of the operator
    #[must_use]
    pub fn lexeme(self) -> &'static str {
        match self {
            Self::Pow => "**",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Mul => "*",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Assign => "=",
            Self::Comma => ",",
        }
    }

    /// The unary reading of this operator, if it has one
    #[must_use]
    pub fn as_unary(self) -> Option<UnaryOp> {
        match self {
            Self::Add => Some(UnaryOp::Plus),
            Self::Sub => Some(UnaryOp::Minus),
            _ => None,
        }
    }
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// A prefix operator
    Unary(UnaryOp),
    /// An infix operator
    Binary(BinaryOp),
}

impl Op {
    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Unary(_) => 17,
            Self::Binary(BinaryOp::Pow) => 16,
            Self::Binary(BinaryOp::Div | BinaryOp::Rem | BinaryOp::Mul) => 15,
            Self::Binary(BinaryOp::Add | BinaryOp::Sub) => 14,
            Self::Binary(BinaryOp::Assign) => 3,
            Self::Binary(BinaryOp::Comma) => 1,
        }
    }

    #[must_use]
    pub fn associativity(self) -> Associativity {
        match self {
            Self::Unary(_) | Self::Binary(BinaryOp::Pow | BinaryOp::Assign) => {
                Associativity::RightToLeft
            }
            Self::Binary(_) => Associativity::LeftToRight,
        }
    }

    /// Check if the operator is left associative
    #[must_use]
    pub fn is_left_associative(self) -> bool {
        self.associativity() == Associativity::LeftToRight
    }

    #[must_use]
    pub fn arity(self) -> Arity {
        match self {
            Self::Unary(_) => Arity::Unary,
            Self::Binary(_) => Arity::Binary,
        }
    }

    /// Source text of the operator
    #[must_use]
    pub fn lexeme(self) -> &'static str {
        match self {
            Self::Unary(op) => op.lexeme(),
            Self::Binary(op) => op.lexeme(),
        }
    }
}

/// Every fixed lexeme of the language, longest first so that `**` wins over
/// `*`.
pub const LEXEMES: [(&str, Token); 11] = [
    ("**", Token::Op(Op::Binary(BinaryOp::Pow))),
    ("(", Token::LParen),
    (")", Token::RParen),
    ("!", Token::Op(Op::Unary(UnaryOp::Not))),
    ("/", Token::Op(Op::Binary(BinaryOp::Div))),
    ("%", Token::Op(Op::Binary(BinaryOp::Rem))),
    ("*", Token::Op(Op::Binary(BinaryOp::Mul))),
    ("+", Token::Op(Op::Binary(BinaryOp::Add))),
    ("-", Token::Op(Op::Binary(BinaryOp::Sub))),
    ("=", Token::Op(Op::Binary(BinaryOp::Assign))),
    (",", Token::Op(Op::Binary(BinaryOp::Comma))),
];

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Op::Binary(BinaryOp::Pow) => (16, Associativity::RightToLeft) ; "power")]
    #[test_case(Op::Binary(BinaryOp::Mul) => (15, Associativity::LeftToRight) ; "multiplication")]
    #[test_case(Op::Binary(BinaryOp::Rem) => (15, Associativity::LeftToRight) ; "remainder")]
    #[test_case(Op::Binary(BinaryOp::Sub) => (14, Associativity::LeftToRight) ; "binary minus")]
    #[test_case(Op::Unary(UnaryOp::Minus) => (17, Associativity::RightToLeft) ; "unary minus")]
    #[test_case(Op::Unary(UnaryOp::Not) => (17, Associativity::RightToLeft) ; "not")]
    #[test_case(Op::Binary(BinaryOp::Assign) => (3, Associativity::RightToLeft) ; "assignment")]
    #[test_case(Op::Binary(BinaryOp::Comma) => (1, Associativity::LeftToRight) ; "comma")]
    fn registry(op: Op) -> (u8, Associativity) {
        (op.precedence(), op.associativity())
    }

    #[test_case(BinaryOp::Pow, 2.0, 10.0 => 1024.0 ; "power")]
    #[test_case(BinaryOp::Div, 7.0, 2.0 => 3.5 ; "division")]
    #[test_case(BinaryOp::Rem, -7.0, 3.0 => -1.0 ; "remainder keeps the sign of the dividend")]
    #[test_case(BinaryOp::Sub, 3.0, 5.0 => -2.0 ; "subtraction")]
    #[test_case(BinaryOp::Assign, 1.0, 9.0 => 9.0 ; "assignment yields the right value")]
    #[test_case(BinaryOp::Comma, 1.0, 9.0 => 9.0 ; "comma yields the right value")]
    fn binary_actions(op: BinaryOp, left: f64, right: f64) -> f64 {
        op.call(left, right)
    }

    #[test]
    fn unary_actions() {
        assert_eq!(UnaryOp::Minus.call(4.0), -4.0);
        assert_eq!(UnaryOp::Plus.call(4.0), 4.0);
        assert_eq!(UnaryOp::Not.call(0.0), 1.0);
        assert_eq!(UnaryOp::Not.call(f64::NAN), 1.0);
        assert_eq!(UnaryOp::Not.call(-2.5), 0.0);
    }

    #[test]
    fn only_plus_and_minus_have_unary_forms() {
        assert_eq!(BinaryOp::Add.as_unary(), Some(UnaryOp::Plus));
        assert_eq!(BinaryOp::Sub.as_unary(), Some(UnaryOp::Minus));
        assert_eq!(BinaryOp::Mul.as_unary(), None);
        assert_eq!(BinaryOp::Assign.as_unary(), None);
    }

    #[test]
    fn lexemes_are_longest_first() {
        for (i, (earlier, _)) in LEXEMES.iter().enumerate() {
            for (later, _) in &LEXEMES[i + 1..] {
                assert!(!(later.len() > earlier.len() && later.starts_with(earlier)));
            }
        }
        assert_eq!(Token::Op(Op::Binary(BinaryOp::Pow)).to_string(), "**");
        assert_eq!(Token::Number(2.5).to_string(), "2.5");
    }
}

use crate::token::Token;
use thiserror::Error;

/// Error raised while turning source text into a postfix program
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Nothing in the language starts with `character`
    #[error("SyntaxError: unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// Byte offset of the character in the source
        position: usize,
        /// The offending character
        character: char,
    },
    /// A parenthesis without its partner
    #[error("SyntaxError: mismatched parenthesis, unpaired '{paren}'")]
    UnbalancedParentheses {
        /// `'('` when never closed, `')'` when never opened
        paren: char,
    },
}

/// The ways evaluating a postfix program can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    /// An operator found fewer operands than it needs
    StackUnderflow,
    /// A name with no value in the symbol table
    UnboundSymbol,
    /// The left side of `=` is not a name
    InvalidOperand,
    /// The program did not reduce to exactly one value
    MalformedResult,
    /// No successfully parsed program to evaluate
    NotParsed,
}

/// Error raised while evaluating a postfix program.
///
/// Bindings made by `=` before the failure are kept in the symbol table.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("EvaluationError: {message}")]
pub struct EvalError {
    /// What went wrong
    pub kind: EvalErrorKind,
    /// The token the evaluator was looking at, if any
    pub token: Option<Token>,
    /// Human readable description
    pub message: String,
}

impl EvalError {
    pub(crate) fn new(kind: EvalErrorKind, token: Option<Token>, message: String) -> Self {
        Self {
            kind,
            token,
            message,
        }
    }

    pub(crate) fn unbound(name: &str) -> Self {
        Self::new(
            EvalErrorKind::UnboundSymbol,
            Some(Token::Symbol(name.into())),
            format!("name '{}' is not defined", name),
        )
    }

    pub(crate) fn not_parsed() -> Self {
        Self::new(
            EvalErrorKind::NotParsed,
            None,
            "expression has not been parsed".into(),
        )
    }
}

/// Error type for the shunter crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Error while parsing an expression
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Error while evaluating an expression
    #[error(transparent)]
    Eval(#[from] EvalError),
}

use crate::error::{Error, EvalError, EvalErrorKind, ParseError};
use crate::lexer::Lexer;
use crate::symbols::Symbols;
use crate::token::{BinaryOp, Op, Token};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

/// Evaluate a single expression from `input`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed. Assignments in `input` are
/// written to `symbols`.
///
/// # Example
///
/// ```
/// # use shunter::{eval, Symbols};
///
/// let mut symbols = Symbols::new();
/// assert_eq!(eval("45 - 2 ** 3", &mut symbols), Ok(37.0));
///
/// symbols.set("a", -5.0);
/// assert_eq!(eval("3 * a", &mut symbols), Ok(-15.0));
/// assert_eq!(eval("b = a * 2", &mut symbols), Ok(-10.0));
/// assert_eq!(symbols.get("b"), Some(-10.0));
/// ```
pub fn eval(input: &str, symbols: &mut Symbols) -> Result<f64, Error> {
    let expr = Expr::parse(input, symbols)?;
    Ok(expr.eval(symbols)?)
}

/// A parsed expression, stored as tokens in postfix order.
///
/// An `Expr` does not own a symbol table: the same table can be handed to
/// any number of expressions, and each evaluation reads the values bound at
/// that moment.
///
/// # Examples
/// ```
/// # use shunter::{Expr, Symbols};
/// let mut symbols = Symbols::new();
/// let expr = Expr::parse("3 + 5 * 2", &symbols).unwrap();
/// assert_eq!(expr.eval(&mut symbols), Ok(13.0));
/// assert_eq!(expr.to_string(), "3 5 2 * +");
///
/// let expr = Expr::parse("-2 * a", &symbols).unwrap();
/// symbols.set("a", 42.0);
/// assert_eq!(expr.eval(&mut symbols), Ok(-84.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    tokens: Vec<Token>,
}

/// An operand waiting on the evaluation stack. Names stay unresolved until an
/// operator consumes them, so that `=` can bind its left side.
#[derive(Debug, Clone, Copy)]
enum Operand<'a> {
    Value(f64),
    Name(&'a str),
}

impl<'a> Operand<'a> {
    fn resolve(self, symbols: &Symbols) -> Result<f64, EvalError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Name(name) => symbols.get(name).ok_or_else(|| EvalError::unbound(name)),
        }
    }

    fn to_token(self) -> Token {
        match self {
            Self::Value(value) => Token::Number(value),
            Self::Name(name) => Token::Symbol(name.into()),
        }
    }
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`. Names bound
    /// in `symbols` are recognized even if they are not valid fresh names.
    ///
    /// # Examples
    /// ```
    /// # use shunter::{Expr, Symbols};
    /// let symbols = Symbols::new();
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2", &symbols).is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("(3 + 5 * 2", &symbols).is_err());
    /// ```
    pub fn parse(expression: &str, symbols: &Symbols) -> Result<Self, ParseError> {
        let tokens = Lexer::new(expression, symbols).parse()?;
        debug!("parsed {:?} into {} postfix tokens", expression, tokens.len());
        Ok(Self { tokens })
    }

    /// Evaluate the expression against `symbols`.
    ///
    /// Every `=` met during the evaluation binds its name in `symbols`
    /// immediately; a later failure does not undo it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shunter::{Expr, Symbols, EvalErrorKind};
    /// let mut symbols = Symbols::new();
    /// let expr = Expr::parse("x = 5", &symbols).unwrap();
    /// assert_eq!(expr.eval(&mut symbols), Ok(5.0));
    /// assert_eq!(symbols.get("x"), Some(5.0));
    ///
    /// let expr = Expr::parse("y + 1", &symbols).unwrap();
    /// let err = expr.eval(&mut symbols).unwrap_err();
    /// assert_eq!(err.kind, EvalErrorKind::UnboundSymbol);
    /// ```
    pub fn eval(&self, symbols: &mut Symbols) -> Result<f64, EvalError> {
        let mut stack: Vec<Operand> = Vec::with_capacity(self.tokens.len());

        for token in &self.tokens {
            match *token {
                Token::Number(value) => stack.push(Operand::Value(value)),
                Token::Symbol(ref name) => stack.push(Operand::Name(name)),
                Token::Op(Op::Unary(op)) => {
                    let a = stack.pop().ok_or_else(|| underflow(token, 1))?;
                    stack.push(Operand::Value(op.call(a.resolve(symbols)?)));
                }
                Token::Op(Op::Binary(op)) => {
                    let (a, b) = match (stack.pop(), stack.pop()) {
                        (Some(a), Some(b)) => (a, b),
                        _ => return Err(underflow(token, 2)),
                    };
                    let value = a.resolve(symbols)?;
                    let result = if op == BinaryOp::Assign {
                        match b {
                            Operand::Name(name) => {
                                trace!("binding {} = {}", name, value);
                                symbols.set(name, value);
                                value
                            }
                            Operand::Value(_) => {
                                return Err(EvalError::new(
                                    EvalErrorKind::InvalidOperand,
                                    Some(b.to_token()),
                                    format!("cannot assign to '{}'", b.to_token()),
                                ))
                            }
                        }
                    } else {
                        op.call(b.resolve(symbols)?, value)
                    };
                    stack.push(Operand::Value(result));
                }
                Token::LParen | Token::RParen => {
                    return Err(EvalError::new(
                        EvalErrorKind::MalformedResult,
                        Some(token.clone()),
                        format!("unexpected '{}' in postfix expression", token),
                    ))
                }
            }
        }

        let result = match stack.as_slice() {
            [operand] => operand.resolve(symbols)?,
            [] => {
                return Err(EvalError::new(
                    EvalErrorKind::MalformedResult,
                    None,
                    "empty expression".into(),
                ))
            }
            [.., extra] => {
                return Err(EvalError::new(
                    EvalErrorKind::MalformedResult,
                    Some(extra.to_token()),
                    format!("expression left {} values instead of one", stack.len()),
                ))
            }
        };
        debug!("evaluated {} postfix tokens to {}", self.tokens.len(), result);
        Ok(result)
    }

    /// The tokens of the expression, in postfix order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the names this expression refers to.
    ///
    /// # Examples
    /// ```
    /// # use shunter::{Expr, Symbols};
    /// # use std::collections::HashSet;
    /// let expr = Expr::parse("3 + 5 * 2", &Symbols::new()).unwrap();
    /// assert_eq!(expr.variables(), HashSet::new());
    ///
    /// let expr = Expr::parse("y = 3 + a", &Symbols::new()).unwrap();
    /// assert_eq!(expr.variables(), ["a", "y"].iter().copied().collect::<HashSet<_>>());
    /// ```
    pub fn variables(&self) -> HashSet<&str> {
        self.tokens
            .iter()
            .filter_map(|token| match *token {
                Token::Symbol(ref name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Display for Expr {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        let mut tokens = self.tokens.iter();
        if let Some(first) = tokens.next() {
            write!(fmt, "{}", first)?;
            for token in tokens {
                write!(fmt, " {}", token)?;
            }
        }
        Ok(())
    }
}

fn underflow(token: &Token, needed: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::StackUnderflow,
        Some(token.clone()),
        format!("operator '{}' needs {} operand(s)", token, needed),
    )
}

/// A stateful expression: source text, its last successful parse, and the
/// symbol table it is evaluated against.
///
/// This is the convenient interface for a caller driving one expression over
/// and over, for example rebinding `x` before each [`evaluate`] when plotting.
///
/// [`evaluate`]: #method.evaluate
///
/// # Examples
/// ```
/// # use shunter::Expression;
/// let mut expression = Expression::new("x ** 2 + 1");
/// expression.parse().unwrap();
///
/// let mut ys = Vec::new();
/// for x in 0..3 {
///     expression.set_symbol("x", f64::from(x));
///     ys.push(expression.evaluate().unwrap());
/// }
/// assert_eq!(ys, vec![1.0, 2.0, 5.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Expression {
    source: String,
    parsed: Option<Expr>,
    symbols: Symbols,
}

impl Expression {
    /// Create an expression over `source` with an empty symbol table. The
    /// source is not parsed yet.
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self::with_symbols(source, Symbols::new())
    }

    /// Create an expression over `source` evaluated against `symbols`
    pub fn with_symbols<S: Into<String>>(source: S, symbols: Symbols) -> Self {
        Self {
            source: source.into(),
            parsed: None,
            symbols,
        }
    }

    /// Replace the source text. The previous parse stays in use until the
    /// next call to [`parse`](#method.parse).
    pub fn load<S: Into<String>>(&mut self, source: S) {
        self.source = source.into();
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Forget the parsed tokens and every symbol
    pub fn reset(&mut self) {
        self.parsed = None;
        self.symbols.clear();
    }

    /// Parse the current source. On failure nothing is left to evaluate.
    ///
    /// # Examples
    /// ```
    /// # use shunter::{Expression, ParseError};
    /// let mut expression = Expression::new("1 + 2)");
    /// assert_eq!(
    ///     expression.parse(),
    ///     Err(ParseError::UnbalancedParentheses { paren: ')' })
    /// );
    /// assert!(!expression.is_parsed());
    /// ```
    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.parsed = None;
        self.parsed = Some(Expr::parse(&self.source, &self.symbols)?);
        Ok(())
    }

    /// Evaluate the last successful parse against the symbol table
    ///
    /// # Examples
    /// ```
    /// # use shunter::{Expression, EvalErrorKind};
    /// let mut expression = Expression::new("x = 5");
    /// assert_eq!(expression.evaluate().unwrap_err().kind, EvalErrorKind::NotParsed);
    ///
    /// expression.parse().unwrap();
    /// assert_eq!(expression.evaluate(), Ok(5.0));
    ///
    /// expression.load("x + 1");
    /// expression.parse().unwrap();
    /// assert_eq!(expression.evaluate(), Ok(6.0));
    /// ```
    pub fn evaluate(&mut self) -> Result<f64, EvalError> {
        match self.parsed {
            Some(ref expr) => expr.eval(&mut self.symbols),
            None => Err(EvalError::not_parsed()),
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }

    /// The parsed tokens in postfix order, if any
    pub fn tokens(&self) -> Option<&[Token]> {
        self.parsed.as_ref().map(Expr::tokens)
    }

    pub fn set_symbol<S: Into<String>>(&mut self, name: S, value: f64) {
        self.symbols.set(name, value);
    }

    pub fn symbol(&self, name: &str) -> Option<f64> {
        self.symbols.get(name)
    }

    pub fn has_symbol(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    /// Swap in a whole new symbol table, returning the previous one
    pub fn set_symbol_map(&mut self, symbols: Symbols) -> Symbols {
        std::mem::replace(&mut self.symbols, symbols)
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut Symbols {
        &mut self.symbols
    }
}

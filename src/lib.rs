#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::float_cmp
)]

//! Shunter, a crate for parsing and evaluating arithmetic expressions with
//! assignable symbols.
//!
//! The easiest way to use this crate is with the [`eval`](fn.eval.html)
//! function, which parses and evaluates in one go against a
//! [`Symbols`](struct.Symbols.html) table:
//!
//! ```
//! use shunter::Symbols;
//!
//! let mut symbols = Symbols::new();
//! assert_eq!(shunter::eval("3 + 5 * 2", &mut symbols), Ok(13.0));
//! ```
//!
//! The table holds the variables, and assignments write back into it:
//!
//! ```
//! use shunter::Symbols;
//!
//! let mut symbols = Symbols::new();
//! symbols.set("a", 3.5);
//! assert_eq!(shunter::eval("b = 2 * a", &mut symbols), Ok(7.0));
//! assert_eq!(symbols.get("b"), Some(7.0));
//! ```
//!
//! It is also possible to separate the parsing from the evaluation of an
//! expression with the [`Expr`](struct.Expr.html) type. This allow to reuse
//! the same expression with different values for variables, and to evaluate
//! several expressions against one table.
//!
//! ```
//! use shunter::{Expr, Symbols};
//!
//! let mut symbols = Symbols::new();
//! let expr = Expr::parse("3 / c + b", &symbols).unwrap();
//! symbols.set("c", 1.0);
//! symbols.set("b", 5.0);
//! assert_eq!(expr.eval(&mut symbols), Ok(8.0));
//!
//! symbols.set("b", 10.0);
//! assert_eq!(expr.eval(&mut symbols), Ok(13.0));
//! ```
//!
//! [`Expression`](struct.Expression.html) bundles source text, its parse and
//! an owned table behind a `load` / `parse` / `evaluate` interface.
//!
//! # Language definition
//!
//! The language implemented by shunter can contain the following elements:
//!
//! - numeric literals: `12`, `0.5`, `.5`, `4.5e-3`, and the integers `0xff`,
//!   `0o17`, `0b101`;
//! - left and right parenthesis;
//! - binary operators, from loosest to tightest: `,` (evaluates to its right
//!   side), `=` (binds the name on its left), `+` and `-`, `*`, `/` and `%`
//!   (truncated remainder), and `**` (exponentiation);
//! - prefix operators binding tighter than all of those: `-`, `+` and `!`
//!   (`1` for zero or NaN, `0` otherwise);
//! - names: an ASCII letter followed by letters, digits, `_` or `$`. Any
//!   string already bound in the table is also accepted as a name.
//!
//! `**` and `=` group right to left, every other binary operator groups left
//! to right. Any other symbol is forbidden in the input.
//!
//! # Technical details
//!
//! shunter tokenizes the input, decides which `+` and `-` are prefix
//! operators, and reorders the tokens into postfix order with the
//! Shunting-Yard algorithm. Evaluation runs over the postfix tokens with a
//! value stack. It works only with `f64` data, following IEEE-754 rules:
//! `1 / 0` is an infinity, not an error.
//!
//! Diagnostics go through the `log` facade at `debug` and `trace` level.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod error;
mod expr;
mod lexer;
mod literal;
mod symbols;
mod token;
mod util;

pub use error::{Error, EvalError, EvalErrorKind, ParseError};
pub use expr::{eval, Expr, Expression};
pub use lexer::is_variable;
pub use literal::scan_number;
pub use symbols::Symbols;
pub use token::{Arity, Associativity, BinaryOp, Op, Token, UnaryOp};
pub use util::CONSTANTS;

use crate::error::ParseError;
use crate::literal::scan_number;
use crate::symbols::Symbols;
use crate::token::{Op, Token, LEXEMES};

#[must_use]
/// Check if `ident` is a valid fresh symbol name
///
/// # Examples
///
/// ```
/// # use shunter::is_variable;
///
/// assert_eq!(is_variable("x_1$"), true);
/// assert_eq!(is_variable("34zb"), false);
/// assert_eq!(is_variable("_abc"), false);
/// ```
pub fn is_variable(ident: &str) -> bool {
    let mut chars = ident.chars();
    // Check first char
    if !chars.next().map_or(false, is_variable_start) {
        return false;
    }
    // Check all others
    chars.all(is_variable_part)
}

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    symbols: &'a Symbols,
}

impl<'a> Lexer<'a> {
    /// Lex `input`. Names already bound in `symbols` are recognized even when
    /// they would not pass [`is_variable`].
    pub fn new(input: &'a str, symbols: &'a Symbols) -> Lexer<'a> {
        Lexer {
            input,
            position: 0,
            symbols,
        }
    }

    /// Produce the postfix token sequence for the whole input
    pub fn parse(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            trace!("token {:?} ending at {}", token, self.position);
            tokens.push(token);
        }
        to_postfix(resolve_unary(tokens))
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        let rest = &self.input[self.position..];
        let trimmed = rest.trim_start();
        self.position += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            return Ok(None);
        }

        for (lexeme, token) in LEXEMES.iter() {
            if trimmed.starts_with(lexeme) {
                self.position += lexeme.len();
                return Ok(Some(token.clone()));
            }
        }

        let run = trimmed
            .find(|c: char| !is_variable_part(c))
            .map_or(trimmed, |end| &trimmed[..end]);
        if !run.is_empty() && (self.symbols.contains(run) || is_variable(run)) {
            self.position += run.len();
            return Ok(Some(Token::Symbol(run.into())));
        }

        if let Some((len, value)) = scan_number(trimmed) {
            self.position += len;
            return Ok(Some(Token::Number(value)));
        }

        Err(ParseError::UnexpectedCharacter {
            position: self.position,
            character: trimmed.chars().next().unwrap_or_default(),
        })
    }
}

/// Rebuild `tokens` with every `+` or `-` that cannot be binary turned into
/// its unary form. A sign is unary at the start of the input and after any
/// operator or `(`.
pub fn resolve_unary(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = match token {
            Token::Op(Op::Binary(op)) => match op.as_unary() {
                Some(unary) if !follows_operand(output.last()) => Token::Op(Op::Unary(unary)),
                _ => token,
            },
            other => other,
        };
        output.push(token);
    }
    output
}

fn follows_operand(previous: Option<&Token>) -> bool {
    match previous {
        None | Some(Token::Op(_)) | Some(Token::LParen) => false,
        Some(Token::RParen) | Some(Token::Number(_)) | Some(Token::Symbol(_)) => true,
    }
}

/// Reorder infix `tokens` into postfix order with the shunting-yard algorithm
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) | Token::Symbol(_) => output.push(token),
            Token::LParen => operators.push(token),
            Token::RParen => loop {
                match operators.pop() {
                    Some(Token::LParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(ParseError::UnbalancedParentheses { paren: ')' }),
                }
            },
            Token::Op(o1) => {
                while let Some(&Token::Op(o2)) = operators.last() {
                    let pop_me = o2.precedence() > o1.precedence()
                        || (o2.precedence() == o1.precedence() && o1.is_left_associative());
                    if !pop_me {
                        break;
                    }
                    operators.pop();
                    output.push(Token::Op(o2));
                }
                operators.push(token);
            }
        }
    }

    while let Some(token) = operators.pop() {
        match token {
            Token::LParen => return Err(ParseError::UnbalancedParentheses { paren: '(' }),
            other => output.push(other),
        }
    }
    Ok(output)
}

/// Check if `c` can appear at the first character of a variable
fn is_variable_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Check if `c` can appear inside a variable
fn is_variable_part(c: char) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{BinaryOp, UnaryOp};
    use test_case::test_case;

    fn render(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn postfix(input: &str) -> Result<String, ParseError> {
        Lexer::new(input, &Symbols::new())
            .parse()
            .map(|tokens| render(&tokens))
    }

    #[test_case("2 + 2" => Ok("2 2 +".to_string()) ; "addition is parsed properly")]
    #[test_case("2+2" => Ok("2 2 +".to_string()) ; "spaces are optional")]
    #[test_case("1 + 2 * 3" => Ok("1 2 3 * +".to_string()) ; "multiplication binds tighter")]
    #[test_case("(1 + 2) * 3" => Ok("1 2 + 3 *".to_string()) ; "parentheses group")]
    #[test_case("1 - 2 - 3" => Ok("1 2 - 3 -".to_string()) ; "subtraction folds left")]
    #[test_case("2 ** 3 ** 2" => Ok("2 3 2 ** **".to_string()) ; "power folds right")]
    #[test_case("a = b = 4" => Ok("a b 4 = =".to_string()) ; "assignment folds right")]
    #[test_case("x = 1, x + 1" => Ok("x 1 = x 1 + ,".to_string()) ; "comma binds loosest")]
    #[test_case("--3" => Ok("3 - -".to_string()) ; "stacked unary minus")]
    #[test_case("-2 ** 2" => Ok("2 - 2 **".to_string()) ; "unary binds tighter than power")]
    #[test_case("2 ** -1" => Ok("2 1 - **".to_string()) ; "unary exponent")]
    #[test_case("!0 * 3" => Ok("0 ! 3 *".to_string()) ; "not")]
    #[test_case("0xff % 0b11" => Ok("255 3 %".to_string()) ; "radix literals")]
    #[test_case("" => Ok(String::new()) ; "empty input")]
    #[test_case("(1 + 2" => Err(ParseError::UnbalancedParentheses { paren: '(' }) ; "unclosed parenthesis")]
    #[test_case("1 + 2)" => Err(ParseError::UnbalancedParentheses { paren: ')' }) ; "unopened parenthesis")]
    #[test_case("1 # 2" => Err(ParseError::UnexpectedCharacter { position: 2, character: '#' }) ; "unknown character")]
    #[test_case("_x" => Err(ParseError::UnexpectedCharacter { position: 0, character: '_' }) ; "underscore cannot start a name")]
    #[test_case("1 + é" => Err(ParseError::UnexpectedCharacter { position: 4, character: 'é' }) ; "non ascii character")]
    fn parse(equation: &str) -> Result<String, ParseError> {
        postfix(equation)
    }

    #[test]
    fn names_and_numbers() {
        let tokens = Lexer::new("x1 $ 3x", &Symbols::new()).parse();
        assert_eq!(
            tokens,
            Err(ParseError::UnexpectedCharacter {
                position: 3,
                character: '$'
            })
        );

        let tokens = Lexer::new("a_b$ 3x", &Symbols::new()).parse().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Symbol("a_b$".into()),
                Token::Number(3.0),
                Token::Symbol("x".into()),
            ]
        );
    }

    #[test]
    fn known_symbols_need_not_be_identifiers() {
        let mut symbols = Symbols::new();
        symbols.set("2x", 7.0);
        symbols.set("_tmp", 1.0);
        let tokens = Lexer::new("2x + _tmp", &symbols).parse().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Symbol("2x".into()),
                Token::Symbol("_tmp".into()),
                Token::Op(Op::Binary(BinaryOp::Add)),
            ]
        );
    }

    #[test]
    fn unary_resolution() {
        let tokens = Lexer::new("-3 + (-4) - +x", &Symbols::new())
            .parse()
            .map(|tokens| render(&tokens));
        assert_eq!(tokens, Ok("3 - 4 - + x + -".to_string()));

        let resolved = resolve_unary(vec![
            Token::Op(Op::Binary(BinaryOp::Sub)),
            Token::Number(3.0),
            Token::Op(Op::Binary(BinaryOp::Sub)),
            Token::Op(Op::Binary(BinaryOp::Sub)),
            Token::Number(4.0),
            Token::RParen,
            Token::Op(Op::Binary(BinaryOp::Add)),
        ]);
        assert_eq!(
            resolved,
            vec![
                Token::Op(Op::Unary(UnaryOp::Minus)),
                Token::Number(3.0),
                Token::Op(Op::Binary(BinaryOp::Sub)),
                Token::Op(Op::Unary(UnaryOp::Minus)),
                Token::Number(4.0),
                Token::RParen,
                Token::Op(Op::Binary(BinaryOp::Add)),
            ]
        );
    }

    #[test]
    fn idents() {
        let variables = ["abc", "a__45__bc", "x$", "Z9_$"];
        for v in &variables {
            assert!(is_variable(v));
        }

        let non_variables = ["a-bc", "@bc", "6bc", "_x", "$x", "", "é"];
        for nv in &non_variables {
            assert!(!is_variable(nv));
        }
    }
}

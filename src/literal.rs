//! Scanner for numeric literals.

/// Scan the longest numeric literal at the start of `input`.
///
/// Returns the length in bytes of the literal and its value, or `None` if
/// `input` does not start with a number. Accepted forms are decimal numbers
/// with optional fraction and exponent (`12`, `1.5`, `.5`, `3.`, `2e-3`) and
/// `0x`, `0o` or `0b` prefixed integers.
pub fn scan_number(input: &str) -> Option<(usize, f64)> {
    let bytes = input.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            if let Some((len, value)) = scan_radix(&input[2..], radix) {
                return Some((len + 2, value));
            }
        }
    }
    scan_decimal(input)
}

fn scan_radix(input: &str, radix: u32) -> Option<(usize, f64)> {
    let mut value = 0.0;
    let mut len = 0;
    for c in input.chars() {
        match c.to_digit(radix) {
            Some(digit) => {
                value = value * f64::from(radix) + f64::from(digit);
                len += 1;
            }
            None => break,
        }
    }
    if len == 0 {
        None
    } else {
        Some((len, value))
    }
}

fn scan_decimal(input: &str) -> Option<(usize, f64)> {
    let bytes = input.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let integer = digits(0);
    let mut end = integer;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits(end + 1);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer == 0 && fraction == 0 {
        return None;
    }

    if let Some(b'e') | Some(b'E') = bytes.get(end) {
        let mut exponent = end + 1;
        if let Some(b'+') | Some(b'-') = bytes.get(exponent) {
            exponent += 1;
        }
        let exponent_digits = digits(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    input[..end].parse().ok().map(|value| (end, value))
}

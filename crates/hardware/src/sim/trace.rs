//! Address trace reader.
//!
//! Turns a text stream into a lazy sequence of addresses. It performs:
//! 1. **Tokenizing:** Tokens are separated by any whitespace, across line breaks.
//! 2. **Parsing:** The longest hexadecimal prefix of a token is an address, after an
//!    optional sign and `0x`/`0X` prefix, the way `scanf("%lX")` reads it. Characters
//!    left over after that prefix are scanned again as the next token.
//! 3. **Termination:** The sequence ends at end-of-input, at the first token that
//!    does not start with a hex digit (or overflows a `u64`), or at an I/O error.
//!    None of these is a failure; the reason is kept in [`TraceReader::end`].
//!
//! A reader is single-pass: once it has ended it yields nothing further.

use std::collections::VecDeque;
use std::io::BufRead;

/// Why a trace stopped producing addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEnd {
    /// The input was exhausted.
    Exhausted,
    /// A token could not be parsed as an address.
    Malformed(String),
    /// Reading the input failed.
    Io(String),
}

/// Parses the address at the start of a trace token.
///
/// A leading `+` or `-` is accepted; a negative value wraps modulo 2^64. A `0x`
/// prefix is skipped only when a hex digit follows it, so `0xg` reads as `0`
/// with `xg` left over.
///
/// # Arguments
///
/// * `token` - A non-empty, whitespace-free token.
///
/// # Returns
///
/// The address and the unconsumed rest of the token, or `None` if the token
/// does not start with a hex value that fits in a `u64`.
pub fn parse_address(token: &str) -> Option<(u64, &str)> {
    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_hexdigit()))
        .unwrap_or(unsigned);
    let len = digits
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(digits.len());
    if len == 0 {
        return None;
    }
    let value = u64::from_str_radix(&digits[..len], 16).ok()?;
    let value = if negative { value.wrapping_neg() } else { value };
    Some((value, &digits[len..]))
}

/// Lazy iterator of addresses over a buffered reader.
#[derive(Debug)]
pub struct TraceReader<R> {
    input: R,
    line: String,
    pending: VecDeque<String>,
    end: Option<TraceEnd>,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
            pending: VecDeque::new(),
            end: None,
        }
    }

    /// Reason the trace stopped, or `None` while it is still producing.
    pub const fn end(&self) -> Option<&TraceEnd> {
        self.end.as_ref()
    }

    /// Reads lines until at least one token is queued or the input ends.
    fn refill(&mut self) -> bool {
        while self.pending.is_empty() {
            self.line.clear();
            match self.input.read_line(&mut self.line) {
                Ok(0) => {
                    self.end = Some(TraceEnd::Exhausted);
                    return false;
                }
                Ok(_) => self
                    .pending
                    .extend(self.line.split_whitespace().map(str::to_owned)),
                Err(e) => {
                    tracing::warn!(error = %e, "trace read failed; ending trace");
                    self.end = Some(TraceEnd::Io(e.to_string()));
                    return false;
                }
            }
        }
        true
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.end.is_some() || !self.refill() {
            return None;
        }
        let token = self.pending.pop_front()?;
        if let Some((address, rest)) = parse_address(&token) {
            if !rest.is_empty() {
                self.pending.push_front(rest.to_owned());
            }
            return Some(address);
        }
        tracing::warn!(token = %token, "malformed trace token; ending trace");
        self.end = Some(TraceEnd::Malformed(token));
        self.pending.clear();
        None
    }
}

//! Selecting which states are reported, by the shape of their registers.

use std::fmt;
use std::str::FromStr;

use num::BigUint;

use crate::codec;
use crate::error::{Error, Result};
use crate::primes::PrimeTable;

/// A constraint on one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `0`: the register must be empty.
    Zero,
    /// `+`: the register must be non-empty.
    Positive,
    /// `*`: anything.
    Any,
}

impl Token {
    pub fn from_char(c: char) -> Option<Token> {
        match c {
            '0' => Some(Token::Zero),
            '+' => Some(Token::Positive),
            '*' => Some(Token::Any),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Token::Zero => '0',
            Token::Positive => '+',
            Token::Any => '*',
        }
    }

    fn accepts(self, power: u32) -> bool {
        match self {
            Token::Zero => power == 0,
            Token::Positive => power > 0,
            Token::Any => true,
        }
    }
}

/// One token per register. A state with more registers than the filter
/// has tokens never matches, whatever the tokens are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    tokens: Vec<Token>,
}

impl Filter {
    pub fn new(tokens: Vec<Token>) -> Filter {
        Filter { tokens }
    }

    /// Parse a string such as `"+0*"`.
    pub fn parse(text: &str) -> Result<Filter> {
        text.chars()
            .enumerate()
            .map(|(position, c)| {
                Token::from_char(c).ok_or(Error::InvalidFilterToken { token: c, position })
            })
            .collect::<Result<Vec<_>>>()
            .map(Filter::new)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Does `value`, factorised over `primes`, satisfy every token?
    pub fn matches(&self, value: &BigUint, primes: &PrimeTable) -> Result<bool> {
        let exps = codec::decode(value, primes)?;
        Ok(self.matches_vector(&exps))
    }

    pub fn matches_vector(&self, exps: &[u32]) -> bool {
        if exps.len() > self.tokens.len() {
            return false;
        }
        self.tokens
            .iter()
            .enumerate()
            .all(|(i, token)| token.accepts(exps.get(i).copied().unwrap_or(0)))
    }
}

/// `matches` for an optional filter: no filter matches everything,
/// without decoding the value.
pub fn matches(filter: Option<&Filter>, value: &BigUint, primes: &PrimeTable) -> Result<bool> {
    match filter {
        None => Ok(true),
        Some(filter) => filter.matches(value, primes),
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Filter> {
        Filter::parse(s)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token.as_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(s: &str) -> Filter {
        s.parse().unwrap()
    }

    #[test]
    fn parse() {
        assert_eq!(
            filter("0+*").tokens(),
            [Token::Zero, Token::Positive, Token::Any]
        );
        assert_eq!(filter("0+*").to_string(), "0+*");
        assert!(filter("").is_empty());
        assert_eq!(
            Filter::parse("0+x*"),
            Err(Error::InvalidFilterToken {
                token: 'x',
                position: 2
            })
        );
    }

    #[test]
    fn positive_then_zero() {
        let f = filter("+0");
        assert!(f.matches_vector(&[2, 0]));
        assert!(f.matches_vector(&[2]));
        assert!(!f.matches_vector(&[0, 0]));
        assert!(!f.matches_vector(&[1, 1]));
    }

    #[test]
    fn longer_vector_is_rejected() {
        let f = filter("0");
        assert!(!f.matches_vector(&[0, 5, 0]));
        assert!(!filter("**").matches_vector(&[1, 1, 1]));
        assert!(filter("***").matches_vector(&[1, 1, 1]));
    }

    #[test]
    fn every_position_is_checked() {
        // a passing `0` in front must not accept the state on its own
        let f = filter("0+");
        assert!(!f.matches_vector(&[0, 0]));
        assert!(!f.matches_vector(&[]));
        assert!(f.matches_vector(&[0, 3]));
        let f = filter("00+");
        assert!(!f.matches_vector(&[0, 0]));
    }

    #[test]
    fn short_vector_is_zero_padded() {
        assert!(filter("*00").matches_vector(&[4]));
        assert!(!filter("*0+").matches_vector(&[4]));
        assert!(filter("").matches_vector(&[]));
    }

    #[test]
    fn on_values() {
        let primes = PrimeTable::first(3);
        let powers_of_two = filter("*");
        assert!(powers_of_two.matches(&BigUint::from(32u32), &primes).unwrap());
        assert!(!powers_of_two.matches(&BigUint::from(12u32), &primes).unwrap());
        assert!(powers_of_two.matches(&BigUint::from(0u32), &primes).is_err());

        assert!(matches(None, &BigUint::from(0u32), &primes).unwrap());
        assert!(!matches(Some(&filter("+")), &BigUint::from(1u32), &primes).unwrap());
    }
}

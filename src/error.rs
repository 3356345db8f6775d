//! Errors raised while loading programs and converting states.
//!
//! Every error here is definitional: a bad token, a bad rule, a value
//! the prime table cannot describe. None of them can occur in the middle
//! of a run once the program and the initial state are accepted.

use num::BigUint;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A source token is not a legal rule literal.
    #[error("Invalid token: '{token}'")]
    Syntax { token: String },

    /// A rule has a zero denominator.
    #[error("Invalid fraction: '{numerator}/{denominator}'")]
    InvalidRule {
        numerator: BigUint,
        denominator: BigUint,
    },

    /// Only positive integers have a factorisation.
    #[error("cannot factorise {value}: value must be at least 1")]
    Domain { value: BigUint },

    /// The prime table ran out before `value` was reduced to 1.
    #[error("prime table of {primes} primes cannot factorise {value} (left over: {remaining})")]
    PrimeTableExhausted {
        value: BigUint,
        remaining: BigUint,
        primes: usize,
    },

    /// An exponent vector has more entries than there are primes.
    #[error("exponent vector of length {len} is longer than the prime table ({primes} primes)")]
    Index { len: usize, primes: usize },

    /// A register would exceed `u32::MAX`.
    #[error("register {register} overflowed")]
    RegisterOverflow { register: usize },

    #[error("invalid filter token '{token}' at position {position}: expected one of '0', '+', '*'")]
    InvalidFilterToken { token: char, position: usize },

    #[error("invalid prime table entry '{entry}': {reason}")]
    InvalidPrimeTable { entry: String, reason: &'static str },
}

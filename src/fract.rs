use std::cmp;
use std::fmt;

use num::{BigUint, Integer, One, Zero};

use crate::codec;
use crate::error::{Error, Result};
use crate::primes::PrimeTable;

/// A fraction, either as plain integers (a program rule) or as the
/// prime exponents of its numerator and denominator (a compiled rule).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fract<T> {
    pub(crate) numer: T,
    pub(crate) denom: T,
}

/// One rule of a program.
pub type Rule = Fract<BigUint>;

impl<T> Fract<T> {
    pub fn numerator(&self) -> &T {
        &self.numer
    }
    pub fn denominator(&self) -> &T {
        &self.denom
    }
}

impl Fract<BigUint> {
    /// Fails with `InvalidRule` if `denom` is zero. A zero numerator is
    /// allowed, it sends every state to 0.
    pub fn new(numer: BigUint, denom: BigUint) -> Result<Rule> {
        if denom.is_zero() {
            return Err(Error::InvalidRule {
                numerator: numer,
                denominator: denom,
            });
        }
        Ok(Fract { numer, denom })
    }

    /// Does this rule apply to `value`? The test is on the product, so
    /// `6/4` applies to 2 even though 4 does not divide 2.
    pub fn applies(&self, value: &BigUint) -> Option<BigUint> {
        let (quot, rem) = (value * &self.numer).div_rem(&self.denom);
        if rem.is_zero() {
            Some(quot)
        } else {
            None
        }
    }

    fn reduced(&self) -> Rule {
        let gcd = self.numer.gcd(&self.denom);
        if gcd.is_zero() || gcd.is_one() {
            return self.clone();
        }
        Fract {
            numer: &self.numer / &gcd,
            denom: &self.denom / &gcd,
        }
    }
}

impl fmt::Display for Fract<BigUint> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

/// Convert each rule into register form: the exponents of its numerator
/// and denominator over `primes`, with common factors cancelled.
pub fn factorise(rules: &[Rule], primes: &PrimeTable) -> Result<Vec<Fract<Vec<u32>>>> {
    let cancel = |a: &mut [u32], b: &mut [u32]| {
        for (x, y) in a.iter_mut().zip(b.iter_mut()) {
            let m = cmp::min(*x, *y);
            *x -= m;
            *y -= m;
        }
    };

    rules
        .iter()
        .map(|rule| {
            let rule = rule.reduced();
            let mut n = codec::decode(&rule.numer, primes)?;
            let mut d = codec::decode(&rule.denom, primes)?;
            // already coprime after reduction, but the cancel keeps the
            // register form canonical whatever the input
            cancel(&mut n, &mut d);
            Ok(Fract { numer: n, denom: d })
        })
        .collect()
}

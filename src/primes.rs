//! The ordered table of primes that states are factorised against.

use std::collections::HashSet;
use std::ops::Index;
use std::slice;

use num::{BigUint, One};
use slow_primes::Primes;
use tracing::debug;

use crate::error::{Error, Result};
use crate::program::is_comment;

/// An ordered list of distinct primes; index `i` is register `i`.
///
/// Built once and then only read, so a single table can be shared by
/// any number of runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeTable {
    primes: Vec<BigUint>,
}

impl PrimeTable {
    /// Use `primes` as given. Entries must be at least 2 and distinct;
    /// primality itself is the caller's responsibility.
    pub fn new(primes: Vec<BigUint>) -> Result<PrimeTable> {
        let mut seen = HashSet::with_capacity(primes.len());
        for p in &primes {
            if *p <= BigUint::one() {
                return Err(Error::InvalidPrimeTable {
                    entry: p.to_string(),
                    reason: "primes must be at least 2",
                });
            }
            if !seen.insert(p) {
                return Err(Error::InvalidPrimeTable {
                    entry: p.to_string(),
                    reason: "duplicate entry",
                });
            }
        }
        Ok(PrimeTable { primes })
    }

    /// Every prime strictly below `limit`.
    pub fn below(limit: usize) -> PrimeTable {
        let sieve = Primes::sieve(limit);
        let primes = sieve
            .primes()
            .take_while(|&p| p < limit)
            .map(BigUint::from)
            .collect::<Vec<_>>();
        debug!(limit, count = primes.len(), "sieved prime table");
        PrimeTable { primes }
    }

    /// The first `count` primes.
    pub fn first(count: usize) -> PrimeTable {
        let mut limit = 64;
        loop {
            let sieve = Primes::sieve(limit);
            let found = sieve.primes().take_while(|&p| p <= limit).count();
            if found >= count {
                let primes = sieve.primes().take(count).map(BigUint::from).collect();
                return PrimeTable { primes };
            }
            limit *= 2;
        }
    }

    /// Read a persisted primes list: whitespace separated decimal
    /// integers, with the same comment lines as program source.
    pub fn parse(text: &str) -> Result<PrimeTable> {
        let mut primes = vec![];
        for line in text.lines().map(str::trim) {
            if line.is_empty() || is_comment(line) {
                continue;
            }
            for word in line.split_whitespace() {
                if !word.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::InvalidPrimeTable {
                        entry: word.to_owned(),
                        reason: "not a decimal integer",
                    });
                }
                let p = word.parse::<BigUint>().map_err(|_| Error::InvalidPrimeTable {
                    entry: word.to_owned(),
                    reason: "not a decimal integer",
                })?;
                primes.push(p);
            }
        }
        PrimeTable::new(primes)
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, BigUint> {
        self.primes.iter()
    }
}

impl Index<usize> for PrimeTable {
    type Output = BigUint;

    fn index(&self, idx: usize) -> &BigUint {
        &self.primes[idx]
    }
}

impl<'a> IntoIterator for &'a PrimeTable {
    type Item = &'a BigUint;
    type IntoIter = slice::Iter<'a, BigUint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

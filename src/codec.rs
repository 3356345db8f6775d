//! Converting between a state and its exponent vector ("registers").
//!
//! `decode` never produces trailing zeros, so `decode(encode(v))` is `v`
//! with its trailing zeros stripped, and `encode(decode(n)) == n`.

use num::{BigUint, Integer, One, Zero};

use crate::error::{Error, Result};
use crate::primes::PrimeTable;

/// Exponent `i` belongs to prime `i` of the table.
pub type ExponentVector = Vec<u32>;

/// Factorise `n` over `primes`, in table order.
pub fn decode(n: &BigUint, primes: &PrimeTable) -> Result<ExponentVector> {
    if n.is_zero() {
        return Err(Error::Domain { value: n.clone() });
    }

    let mut value = n.clone();
    let mut exps = vec![];
    let mut table = primes.iter();
    while !value.is_one() {
        let p = match table.next() {
            Some(p) => p,
            None => {
                return Err(Error::PrimeTableExhausted {
                    value: n.clone(),
                    remaining: value,
                    primes: primes.len(),
                })
            }
        };

        let mut count: u32 = 0;
        loop {
            let (quot, rem) = value.div_rem(p);
            if !rem.is_zero() {
                break;
            }
            value = quot;
            count = match count.checked_add(1) {
                Some(c) => c,
                None => return Err(Error::RegisterOverflow { register: exps.len() }),
            };
        }
        exps.push(count);
    }
    Ok(exps)
}

/// The product of `primes[i] ^ exps[i]`.
pub fn encode(exps: &[u32], primes: &PrimeTable) -> Result<BigUint> {
    if exps.len() > primes.len() {
        return Err(Error::Index {
            len: exps.len(),
            primes: primes.len(),
        });
    }
    Ok(exps
        .iter()
        .zip(primes)
        .filter(|&(&e, _)| e > 0)
        .fold(BigUint::one(), |acc, (&e, p)| acc * num::pow(p.clone(), e as usize)))
}

/// Parse a space separated exponent vector, as written by `RegisterView`.
pub fn parse_exponents(text: &str) -> Result<ExponentVector> {
    text.split_whitespace()
        .map(|word| {
            word.parse::<u32>().map_err(|_| Error::Syntax {
                token: word.to_owned(),
            })
        })
        .collect()
}

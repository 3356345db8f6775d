//! Programs compiled to prime-exponent registers.
//!
//! A state `2^a 3^b 5^c ...` is held as the registers `[a, b, c, ...]`,
//! so each rule becomes "if every register covers the denominator's
//! exponent, subtract those and add the numerator's". No big integer
//! arithmetic is needed while running.

use std::cmp;

use fractran_support::Fractran;
use num::BigUint;
use tracing::{debug, error, trace};

use crate::codec;
use crate::error::{Error, Result};
use crate::fract::{self, Fract};
use crate::primes::PrimeTable;
use crate::program::Program;

/// A program in register form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterProgram {
    rules: Vec<Fract<Vec<u32>>>,
    length: usize,
}

impl RegisterProgram {
    /// Fails if a rule has a zero numerator or mentions a prime that is
    /// not in `primes`.
    pub fn compile(program: &Program, primes: &PrimeTable) -> Result<RegisterProgram> {
        let rules = fract::factorise(program.rules(), primes)?;
        let length = rules
            .iter()
            .map(|f| cmp::max(f.numer.len(), f.denom.len()))
            .max()
            .unwrap_or(0);
        debug!(rules = rules.len(), registers = length, "compiled program");
        Ok(RegisterProgram { rules, length })
    }

    pub fn rules(&self) -> &[Fract<Vec<u32>>] {
        &self.rules
    }

    /// The number of registers the rules touch.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Run from the given registers.
    pub fn construct(&self, init: &[u32]) -> RegisterMachine<'_> {
        let mut regs = vec![0; cmp::max(self.length, init.len())];
        regs[..init.len()].copy_from_slice(init);
        RegisterMachine {
            program: self,
            regs,
            started: false,
            halted: false,
            steps: 0,
        }
    }

    /// Run from the registers of `value`.
    pub fn construct_from(
        &self,
        value: &BigUint,
        primes: &PrimeTable,
    ) -> Result<RegisterMachine<'_>> {
        let init = codec::decode(value, primes)?;
        Ok(self.construct(&init))
    }

    /// The index of the rule that fires on `regs`, if any.
    fn select(&self, regs: &[u32]) -> Option<usize> {
        self.rules.iter().position(|f| {
            f.denom
                .iter()
                .enumerate()
                .all(|(reg, &v)| v == 0 || regs[reg] >= v)
        })
    }
}

/// A running register program. Yields the registers before every
/// transition and after the last one, like `Machine` does for integers.
///
/// A transition that would overflow a register yields an error and ends
/// the run, leaving the registers as they were before it.
#[derive(Debug, Clone)]
pub struct RegisterMachine<'a> {
    program: &'a RegisterProgram,
    regs: Vec<u32>,
    started: bool,
    halted: bool,
    steps: u64,
}

impl RegisterMachine<'_> {
    /// The current state as an integer.
    pub fn value(&self, primes: &PrimeTable) -> Result<BigUint> {
        codec::encode(&self.regs, primes)
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

impl Iterator for RegisterMachine<'_> {
    type Item = Result<Vec<u32>>;

    fn next(&mut self) -> Option<Result<Vec<u32>>> {
        if !self.started {
            self.started = true;
            return Some(Ok(self.regs.clone()));
        }
        if self.halted {
            return None;
        }
        let Some(idx) = self.program.select(&self.regs) else {
            debug!(steps = self.steps, "halted");
            self.halted = true;
            return None;
        };

        let rule = &self.program.rules[idx];
        let mut next = self.regs.clone();
        for (reg, &v) in rule.denom.iter().enumerate() {
            next[reg] -= v;
        }
        for (reg, &v) in rule.numer.iter().enumerate() {
            match next[reg].checked_add(v) {
                Some(sum) => next[reg] = sum,
                None => {
                    error!(step = self.steps, register = reg, "register overflow");
                    self.halted = true;
                    return Some(Err(Error::RegisterOverflow { register: reg }));
                }
            }
        }
        self.regs = next;
        self.steps += 1;
        trace!(step = self.steps, rule = idx, "transition");
        Some(Ok(self.regs.clone()))
    }
}

impl Fractran for RegisterMachine<'_> {
    type State = [u32];

    fn state(&self) -> &[u32] {
        &self.regs
    }
}

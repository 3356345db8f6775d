//! The integer-state machine.

use fractran_support::Fractran;
use num::BigUint;
use tracing::{debug, trace};

use crate::codec;
use crate::error::Result;
use crate::primes::PrimeTable;
use crate::program::Program;

/// Apply the first rule of `program` that takes `value` to an integer,
/// or `None` if the program halts at `value`.
pub fn step(program: &Program, value: &BigUint) -> Option<BigUint> {
    program.iter().find_map(|rule| rule.applies(value))
}

/// Start `program` at `initial`.
pub fn run(program: &Program, initial: BigUint) -> Machine<'_> {
    Machine::new(program, initial)
}

/// A running program.
///
/// As an iterator this yields the initial value and then every state
/// the program moves through, ending when no rule applies. There is no
/// bound on the length: stop pulling to stop the program.
#[derive(Debug, Clone)]
pub struct Machine<'a> {
    program: &'a Program,
    state: BigUint,
    started: bool,
    halted: bool,
    steps: u64,
}

impl<'a> Machine<'a> {
    pub fn new(program: &'a Program, initial: BigUint) -> Machine<'a> {
        debug!(rules = program.len(), %initial, "starting machine");
        Machine {
            program,
            state: initial,
            started: false,
            halted: false,
            steps: 0,
        }
    }

    /// Start from the state whose exponents over `primes` are `exps`.
    pub fn from_registers(
        program: &'a Program,
        exps: &[u32],
        primes: &PrimeTable,
    ) -> Result<Machine<'a>> {
        let initial = codec::encode(exps, primes)?;
        Ok(Machine::new(program, initial))
    }

    /// The number of transitions taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

impl Iterator for Machine<'_> {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        if !self.started {
            self.started = true;
            return Some(self.state.clone());
        }
        if self.halted {
            return None;
        }
        match step(self.program, &self.state) {
            Some(next) => {
                self.steps += 1;
                trace!(step = self.steps, value = %next, "transition");
                self.state = next;
                Some(self.state.clone())
            }
            None => {
                debug!(steps = self.steps, value = %self.state, "halted");
                self.halted = true;
                None
            }
        }
    }
}

impl Fractran for Machine<'_> {
    type State = BigUint;

    fn state(&self) -> &BigUint {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Zero;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    fn states(program: &str, initial: u64) -> Vec<BigUint> {
        let program = Program::parse(program).unwrap();
        run(&program, big(initial)).collect()
    }

    #[test]
    fn toy_program() {
        assert_eq!(states("3/2 1/3", 2), [big(2), big(3), big(1)]);
    }

    #[test]
    fn first_match_wins() {
        // both rules apply to 6
        let program = Program::parse("5/2 7/3").unwrap();
        assert_eq!(step(&program, &big(6)), Some(big(15)));
        let program = Program::parse("7/3 5/2").unwrap();
        assert_eq!(step(&program, &big(6)), Some(big(14)));
    }

    #[test]
    fn product_divisibility() {
        // 4 does not divide 2, but it divides 2 * 6
        let program = Program::parse("6/4").unwrap();
        assert_eq!(step(&program, &big(2)), Some(big(3)));
    }

    #[test]
    fn empty_program_halts() {
        let program = Program::default();
        assert_eq!(step(&program, &big(12)), None);
        assert_eq!(states("", 12), [big(12)]);
    }

    #[test]
    fn zero_state_loops_on_first_rule() {
        let program = Program::parse("5/7 0 3/2").unwrap();
        let mut machine = run(&program, big(2));
        assert_eq!(machine.next(), Some(big(2)));
        // 5/7 misses 2, 0 sends it to 0
        assert_eq!(machine.next(), Some(big(0)));
        // every rule divides 0, so the first one is taken forever
        for _ in 0..10 {
            assert_eq!(machine.next(), Some(BigUint::zero()));
        }
        assert!(!machine.is_halted());
        assert_eq!(step(&program, &BigUint::zero()), Some(BigUint::zero()));
    }

    #[test]
    fn run_to_completion() {
        // 2^a 3^b => 3^(a + b)
        let program = Program::parse("3/2").unwrap();
        let mut machine = run(&program, big(2u64.pow(5) * 3u64.pow(4)));
        assert_eq!(*machine.run(), big(3u64.pow(9)));
        assert_eq!(machine.steps(), 5);
        assert!(machine.is_halted());
        assert_eq!(machine.next(), None);
    }

    #[test]
    fn from_registers() {
        let program = Program::parse("3/2").unwrap();
        let primes = PrimeTable::first(2);
        let mut machine = Machine::from_registers(&program, &[2, 1], &primes).unwrap();
        assert_eq!(machine.next(), Some(big(12)));
        assert!(Machine::from_registers(&program, &[0, 0, 1], &primes).is_err());
    }

    #[test]
    fn outgrows_u64() {
        let program = Program::parse("4/1").unwrap();
        let last = run(&program, big(1)).nth(40).unwrap();
        assert_eq!(last, num::pow(big(2), 80));
    }
}

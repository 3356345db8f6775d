//! Rendering states for display.

use std::fmt;

use num::BigUint;

use crate::codec::{self, ExponentVector};
use crate::error::Result;
use crate::primes::PrimeTable;

/// What to show for each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Render {
    /// The integer alone.
    #[default]
    Value,
    /// The exponents alone.
    Registers,
    /// `<value>\t<exponents>`.
    Both,
}

/// A state with its exponent vector, formatted as `"<value>\t<e0> <e1> ... "`
/// (every exponent is followed by a space) or as the exponents alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterView<'a> {
    value: &'a BigUint,
    exps: Option<ExponentVector>,
    render: Render,
}

impl<'a> RegisterView<'a> {
    /// Only decodes `value` when the rendering needs the exponents.
    pub fn new(value: &'a BigUint, primes: &PrimeTable, render: Render) -> Result<RegisterView<'a>> {
        let exps = match render {
            Render::Value => None,
            Render::Registers | Render::Both => Some(codec::decode(value, primes)?),
        };
        Ok(RegisterView {
            value,
            exps,
            render,
        })
    }
}

impl fmt::Display for RegisterView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.render != Render::Registers {
            write!(f, "{}", self.value)?;
        }
        if let Some(exps) = &self.exps {
            if self.render == Render::Both {
                f.write_str("\t")?;
            }
            for e in exps {
                write!(f, "{} ", e)?;
            }
        }
        Ok(())
    }
}

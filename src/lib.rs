//! An interpreter for Fractran programs.
//!
//! A program is a list of fractions; running it repeatedly multiplies a
//! single integer by the first fraction that keeps it an integer, and
//! halts when there is none.
//!
//! ```
//! use fractran::{run, Program};
//! use num::BigUint;
//!
//! let program: Program = "3/2 1/3".parse().unwrap();
//! let states: Vec<BigUint> = run(&program, BigUint::from(2u32)).collect();
//! assert_eq!(states, [2u32, 3, 1].map(BigUint::from));
//! ```
//!
//! States can also be viewed as the exponents of their factorisation
//! over a [`PrimeTable`], and a program can be compiled to work on those
//! exponents directly (see [`RegisterProgram`]).

pub use fractran_support::Fractran;

pub use crate::codec::{decode, encode, parse_exponents, ExponentVector};
pub use crate::error::{Error, Result};
pub use crate::filter::{matches, Filter, Token};
pub use crate::fract::{Fract, Rule};
pub use crate::machine::{run, step, Machine};
pub use crate::primes::PrimeTable;
pub use crate::program::{Program, COMMENT_SYMBOLS};
pub use crate::registers::{RegisterMachine, RegisterProgram};
pub use crate::view::{RegisterView, Render};

pub mod codec;
mod error;
pub mod filter;
mod fract;
mod machine;
mod primes;
mod program;
mod registers;
mod view;

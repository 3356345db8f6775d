#![no_std]

/// The interface provided by a running `Fractran` machine.
///
/// Each call to `next` performs one transition; the iterator ends when
/// no rule applies.
pub trait Fractran: Iterator {
    /// The representation of the machine's state, e.g. a single integer
    /// or a slice of registers.
    type State: ?Sized;

    fn state(&self) -> &Self::State;

    /// Run the program to completion, returning the internal state.
    ///
    /// This never returns for a program that does not halt.
    fn run(&mut self) -> &Self::State {
        while self.next().is_some() {}

        self.state()
    }
}

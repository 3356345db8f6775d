use fractran::{Fractran, PrimeTable, Program, RegisterProgram};

fn main() {
    let primes = PrimeTable::first(6);

    let add: Program = "3/2".parse().unwrap();
    let add = RegisterProgram::compile(&add, &primes).unwrap();
    println!("123 + 45 = {:?}", add.construct(&[123, 45]).run());

    let mult: Program = "455/33 11/13 1/11 3/7 11/2 1/3".parse().unwrap();
    let mult = RegisterProgram::compile(&mult, &primes).unwrap();
    println!("123 * 456 = {:?}", mult.construct(&[123, 456]).run());
}

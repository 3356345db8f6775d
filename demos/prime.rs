use fractran::{Filter, PrimeTable, Program};
use num::BigUint;

fn main() {
    // Conway's prime enumeration program. The subsequence of perfect
    // powers of two (other than the initial 2) is 4 = 2^2, 8 = 2^3,
    // 32 = 2^5, etc. specifically, it enumerates the primes.
    let program: Program = "17/91 78/85 19/51 23/38 29/33 77/29 95/23 \
                            77/19 1/17 11/13 13/11 15/14 15/2 55/1"
        .parse()
        .unwrap();
    let primes = PrimeTable::first(10);
    let powers_of_two: Filter = "*".parse().unwrap();

    let mut found = 0;
    for (count, state) in fractran::run(&program, BigUint::from(2u32)).enumerate().skip(1) {
        if count == 1_000_000 || found == 10 {
            break;
        }

        if powers_of_two.matches(&state, &primes).unwrap() {
            let exps = fractran::decode(&state, &primes).unwrap();
            println!("{} (step {})", exps[0], count);
            found += 1;
        }
    }
}

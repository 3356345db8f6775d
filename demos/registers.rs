use fractran::{Machine, PrimeTable, Program, RegisterView, Render};

fn main() {
    // 2^n 3^d 11 => 5^q 7^r, where n = qd + r
    let program: Program = "91/66 11/13 1/33 85/11 57/119 17/19 11/17 1/3"
        .parse()
        .unwrap();
    let primes = PrimeTable::first(8);

    let machine = Machine::from_registers(&program, &[17, 5, 0, 0, 1], &primes).unwrap();
    for state in machine {
        println!("{}", RegisterView::new(&state, &primes, Render::Both).unwrap());
    }
}

//! Benchmarks for the machine conversion path.
//!
//! Measures per-character conversion and whole-message throughput on the
//! historical three-rotor configuration.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use enigma_core::alphabet::Alphabet;
use enigma_core::machine::Machine;
use enigma_core::permutation::Permutation;
use enigma_core::rotor::Rotor;

const ROTOR_I: &str = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";
const ROTOR_II: &str = "(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)";
const ROTOR_III: &str = "(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)";
const REFLECTOR_B: &str =
    "(AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)";

/// Builds the reflector-B, rotors I-II-III machine used by every bench.
fn historical_machine() -> Machine {
    let alphabet = Alphabet::default();
    let perm = |cycles: &str| Permutation::new(cycles, alphabet.clone()).unwrap();
    let catalog = vec![
        Rotor::reflector("B", perm(REFLECTOR_B)).unwrap(),
        Rotor::moving("I", perm(ROTOR_I), "Q").unwrap(),
        Rotor::moving("II", perm(ROTOR_II), "E").unwrap(),
        Rotor::moving("III", perm(ROTOR_III), "V").unwrap(),
    ];
    let mut machine = Machine::new(alphabet, 4, 3, catalog).unwrap();
    machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    machine
}

/// Benchmarks a single `convert` call; rotor state advances naturally
/// between iterations, reflecting real streaming behavior.
fn bench_convert_char(c: &mut Criterion) {
    let mut machine = historical_machine();
    machine.set_rotors("AAA").unwrap();
    c.bench_function("convert_char", |b| {
        b.iter(|| machine.convert(black_box(0)));
    });
}

/// Benchmarks whole-message conversion throughput.
fn bench_convert_message(c: &mut Criterion) {
    let mut machine = historical_machine();
    machine.set_rotors("AAA").unwrap();
    let message = "ATTACKATDAWN".repeat(25);

    let mut group = c.benchmark_group("convert_message");
    group.throughput(Throughput::Bytes(message.len() as u64));
    group.bench_function("300_chars", |b| {
        b.iter(|| machine.convert_message(black_box(&message)).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_convert_char, bench_convert_message);
criterion_main!(benches);

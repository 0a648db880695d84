#![allow(missing_docs)]
use enigma_core::alphabet::Alphabet;
use enigma_core::error::EnigmaError;
use enigma_core::permutation::Permutation;

fn perm(cycles: &str, symbols: &str) -> Permutation {
    Permutation::new(cycles, Alphabet::new(symbols).unwrap()).unwrap()
}

#[test]
fn test_identity_transform() {
    let p = perm("", "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    for index in 0..p.size() {
        assert_eq!(p.permute(index), index);
        assert_eq!(p.invert(index), index);
    }
    assert!(!p.derangement());
}

#[test]
fn test_size() {
    let p = perm("(abc) (defg) (hij)", "abcdefghijklmnop");
    assert_eq!(p.size(), 16);
}

#[test]
fn test_permute_by_index() {
    let p = perm("(BACD)", "ABCD");
    assert_eq!(p.permute(0), 2);
    assert_eq!(p.permute(1), 0);
    assert_eq!(p.permute(2), 3);
    assert_eq!(p.permute(3), 1);

    let p1 = perm("(GACD) (BEFH)", "ABCDEFGH");
    assert_eq!(p1.permute(0), 2);
    assert_eq!(p1.permute(4), 5);
    assert_eq!(p1.permute(7), 1);
    assert_eq!(p1.permute(3), 6);
}

#[test]
fn test_invert_by_index() {
    let p = perm("(BACD)", "ABCD");
    assert_eq!(p.invert(0), 1);
    assert_eq!(p.invert(1), 3);
    assert_eq!(p.invert(2), 0);

    let p1 = perm("(GACD) (BEFH)", "ABCDEFGH");
    assert_eq!(p1.invert(2), 0);
    assert_eq!(p1.invert(5), 4);
    assert_eq!(p1.invert(1), 7);
    assert_eq!(p1.invert(6), 3);
}

#[test]
fn test_permute_by_symbol() {
    let p = perm("(BACD)", "ABCD");
    assert_eq!(p.permute_char('B').unwrap(), 'A');
    assert_eq!(p.permute_char('D').unwrap(), 'B');
    assert_eq!(p.permute_char('C').unwrap(), 'D');

    let p1 = perm("(GACD) (BEFH) (K)", "ABCDEFGHK");
    assert_eq!(p1.permute_char('A').unwrap(), 'C');
    assert_eq!(p1.permute_char('E').unwrap(), 'F');
    assert_eq!(p1.permute_char('H').unwrap(), 'B');
    assert_eq!(p1.permute_char('D').unwrap(), 'G');
    assert_eq!(p1.permute_char('K').unwrap(), 'K');
}

#[test]
fn test_invert_by_symbol() {
    let p = perm("(BACD)", "ABCD");
    assert_eq!(p.invert_char('A').unwrap(), 'B');
    assert_eq!(p.invert_char('B').unwrap(), 'D');
    assert_eq!(p.invert_char('D').unwrap(), 'C');
}

#[test]
fn test_permute_invert_round_trip() {
    let p = perm("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)", "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    for index in 0..p.size() {
        assert_eq!(p.invert(p.permute(index)), index);
        assert_eq!(p.permute(p.invert(index)), index);
    }
}

#[test]
fn test_derangement() {
    assert!(perm("(BACD)", "ABCD").derangement());
    assert!(!perm("(BAD)", "ABCD").derangement());
}

#[test]
fn test_whitespace_inside_cycles_is_ignored() {
    let spaced = perm("(B A C D)", "ABCD");
    let dense = perm("(BACD)", "ABCD");
    for index in 0..4 {
        assert_eq!(spaced.permute(index), dense.permute(index));
    }
    assert!(spaced.derangement());
}

#[test]
fn test_wrap_handles_negative_values() {
    let p = perm("", "ABCD");
    assert_eq!(p.wrap(-1), 3);
    assert_eq!(p.wrap(-5), 3);
    assert_eq!(p.wrap(5), 1);
    assert_eq!(p.wrap(0), 0);
    assert_eq!(p.wrap(4), 0);
}

#[test]
fn test_foreign_cycle_symbol_is_an_error() {
    let alphabet = Alphabet::new("ABCD").unwrap();
    assert_eq!(
        Permutation::new("(AXB)", alphabet).unwrap_err(),
        EnigmaError::SymbolNotInAlphabet('X')
    );
}

#[test]
fn test_repeated_cycle_symbol_is_an_error() {
    let alphabet = Alphabet::new("ABCD").unwrap();
    assert_eq!(
        Permutation::new("(AB) (BC)", alphabet).unwrap_err(),
        EnigmaError::RepeatedCycleSymbol('B')
    );
}

#[test]
fn test_malformed_cycles_are_errors() {
    let alphabet = Alphabet::new("ABCD").unwrap();
    assert!(matches!(
        Permutation::new("(AB", alphabet.clone()).unwrap_err(),
        EnigmaError::MalformedCycles(_)
    ));
    assert!(matches!(
        Permutation::new("AB)", alphabet.clone()).unwrap_err(),
        EnigmaError::MalformedCycles(_)
    ));
    assert!(matches!(
        Permutation::new("AB", alphabet.clone()).unwrap_err(),
        EnigmaError::MalformedCycles(_)
    ));
    assert!(matches!(
        Permutation::new("()", alphabet.clone()).unwrap_err(),
        EnigmaError::MalformedCycles(_)
    ));
    assert!(matches!(
        Permutation::new("((AB))", alphabet).unwrap_err(),
        EnigmaError::MalformedCycles(_)
    ));
}

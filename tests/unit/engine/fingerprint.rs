use super::*;
use crate::engine::trace::generate_steps;

#[test]
fn same_input_same_fingerprint() {
    let a = fingerprint_steps(&generate_steps(&[1, 2, 3]));
    let b = fingerprint_steps(&generate_steps(&[1, 2, 3]));
    assert_eq!(a, b);
}

#[test]
fn order_of_input_changes_fingerprint() {
    let a = fingerprint_steps(&generate_steps(&[1, 2, 3]));
    let b = fingerprint_steps(&generate_steps(&[1, 3, 2]));
    assert_ne!(a, b);
}

#[test]
fn truncation_changes_fingerprint() {
    let steps = generate_steps(&[1, 2, 3]);
    let full = fingerprint_steps(&steps);
    let head = fingerprint_steps(&steps[..steps.len() - 1]);
    assert_ne!(full, head);
}

#[test]
fn hex_is_32_lowercase_digits() {
    let hex = fingerprint_steps(&[]).to_hex();
    assert_eq!(hex.len(), 32);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

//! Fixed-length vector primitives.
//!
//! Every binary operation requires both operands to have the same length.
//! A mismatch is a caller bug and panics; nothing is truncated or padded.

use rand::seq::SliceRandom;
use rand::Rng;

fn check_len(op: &str, a: &[f64], b: &[f64]) {
    assert_eq!(
        a.len(),
        b.len(),
        "{}: operand lengths differ ({} vs {})",
        op,
        a.len(),
        b.len()
    );
}

pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    check_len("add", a, b);
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

pub fn sub(a: &[f64], b: &[f64]) -> Vec<f64> {
    check_len("sub", a, b);
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// Element-wise (Hadamard) product.
pub fn hadamard(a: &[f64], b: &[f64]) -> Vec<f64> {
    check_len("hadamard", a, b);
    a.iter().zip(b).map(|(x, y)| x * y).collect()
}

pub fn scale(a: &[f64], factor: f64) -> Vec<f64> {
    a.iter().map(|x| x * factor).collect()
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    check_len("dot", a, b);
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `acc += b`, in place.
pub fn add_assign(acc: &mut [f64], b: &[f64]) {
    check_len("add_assign", acc, b);
    for (x, y) in acc.iter_mut().zip(b) {
        *x += y;
    }
}

/// Index of the largest element. Ties resolve to the first occurrence.
///
/// Returns `None` for an empty slice. NaN entries never win.
pub fn argmax(v: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in v.iter().enumerate() {
        match best {
            Some((_, b)) if x <= b || x.is_nan() => {}
            None if x.is_nan() => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

/// Uniform in-place permutation (Fisher-Yates) drawn from `rng`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

//! Lexicographic enumeration of every bit arrangement with a fixed length
//! and a fixed number of set bits.
//!
//! `false < true` and position 0 is the most significant, so the smallest
//! arrangement is all zeros followed by all ones and the largest is the
//! reverse. Starting from [`first`] and applying [`next`] until it returns
//! `None` visits each of the `C(total_bits, set_bits)` arrangements exactly
//! once.

use crate::SorensenError;

/// One arrangement produced during enumeration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Candidate {
    bits: Vec<bool>,
}

impl Candidate {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

/// The lexicographically smallest arrangement of `set_bits` ones in
/// `total_bits` positions.
pub fn first(total_bits: u64, set_bits: u64) -> Result<Candidate, SorensenError> {
    if set_bits > total_bits {
        return Err(SorensenError::Format(format!(
            "cannot place {set_bits} set bits in {total_bits} positions"
        )));
    }
    let total = usize::try_from(total_bits).map_err(|_| SorensenError::Resource {
        total_bits,
        reason: "length exceeds the address space".into(),
    })?;
    let zeros = total - set_bits as usize;
    let mut bits = Vec::new();
    bits.try_reserve_exact(total).map_err(|_| SorensenError::Resource {
        total_bits,
        reason: "cannot allocate a candidate of that length".into(),
    })?;
    bits.resize(zeros, false);
    bits.resize(total, true);
    Ok(Candidate { bits })
}

/// The arrangement directly after `candidate`, or `None` once the largest
/// arrangement has been reached.
pub fn next(mut candidate: Candidate) -> Option<Candidate> {
    if next_permutation(&mut candidate.bits) {
        Some(candidate)
    } else {
        None
    }
}

/// Rearrange `items` into the next greater permutation of its multiset.
///
/// Returns `false` and leaves `items` untouched when it is already the
/// greatest permutation.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }
    // Start of the longest non-increasing suffix.
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let pivot = i - 1;
    let mut j = items.len() - 1;
    while items[j] <= items[pivot] {
        j -= 1;
    }
    items.swap(pivot, j);
    items[i..].reverse();
    true
}

/// Iterator over every arrangement, smallest first.
#[derive(Debug, Clone)]
pub struct Permutations {
    pending: Option<Candidate>,
}

impl Iterator for Permutations {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let current = self.pending.take()?;
        self.pending = next(current.clone());
        Some(current)
    }
}

pub fn permutations(total_bits: u64, set_bits: u64) -> Result<Permutations, SorensenError> {
    Ok(Permutations {
        pending: Some(first(total_bits, set_bits)?),
    })
}

/// Exact `C(n, k)`, or `None` if it does not fit in a `u128`.
pub fn candidate_count(n: u64, k: u64) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut acc: u128 = 1;
    for i in 1..=k {
        // acc * (n - k + i) is divisible by i; cancel the common factor first
        // so only the final value has to fit.
        let g = gcd(acc, i);
        acc = (acc / g).checked_mul((n - k + i) / (i / g))?;
    }
    Some(acc)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `log2(C(n, k))`, available even when the exact count overflows.
pub fn log2_candidate_count(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    let k = k.min(n - k);
    if k == 0 {
        return 0.0;
    }
    if k <= 1 << 20 {
        let base = (n - k) as f64;
        return (1..=k).map(|i| ((base + i as f64) / i as f64).log2()).sum();
    }
    // Stirling: ln C(n, k) ~ n H(p) - 0.5 ln(2 pi n p (1 - p)).
    let nf = n as f64;
    let p = k as f64 / nf;
    let q = 1.0 - p;
    let entropy = -(p * p.ln() + q * q.ln());
    let ln = nf * entropy - 0.5 * (2.0 * std::f64::consts::PI * nf * p * q).ln();
    ln / std::f64::consts::LN_2
}

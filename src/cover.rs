//! Cover selection over the prime implicant chart.
//!
//! Exact minimum cover is set cover (Petrick's method); this selector settles for
//! the usual approximation:
//!
//! 1. **Essential pass.** While some uncovered minterm has exactly one implicant
//!    covering it, select that implicant.
//! 2. **Greedy pass.** While minterms remain, select the implicant covering the
//!    most remaining minterms (the earliest one on ties).

use log::debug;

use crate::bitset::BitSet;
use crate::cube::Cube;
use crate::primes::{Implicant, OnSet};

/// Selects implicants covering the whole on-set.
///
/// Returns the selected cubes in selection order.
///
/// # Panics
///
/// Panics if the implicants cannot cover the on-set, which means the chart was not
/// produced by [`prime_implicants`][crate::primes::prime_implicants] for this on-set.
pub fn select_cover(on_set: &OnSet, primes: &[Implicant]) -> Vec<Cube> {
    select_cover_indices(on_set, primes)
        .into_iter()
        .map(|i| primes[i].cube.clone())
        .collect()
}

/// Like [`select_cover`], but returns positions into `primes`.
pub fn select_cover_indices(on_set: &OnSet, primes: &[Implicant]) -> Vec<usize> {
    let mut remaining = BitSet::full(on_set.len());
    let mut selected = Vec::new();
    let mut is_selected = vec![false; primes.len()];

    while let Some(pick) = find_essential(&remaining, primes) {
        debug!("select_cover: essential {}", primes[pick].cube);
        remaining.difference_with(&primes[pick].covers);
        is_selected[pick] = true;
        selected.push(pick);
    }

    while !remaining.is_empty() {
        let mut best = None;
        let mut best_gain = 0;
        for (i, prime) in primes.iter().enumerate() {
            if is_selected[i] {
                continue;
            }
            let gain = prime.covers.intersection_len(&remaining);
            if gain > best_gain {
                best_gain = gain;
                best = Some(i);
            }
        }

        let Some(pick) = best else {
            panic!(
                "Prime implicant chart leaves {} of {} minterms uncoverable",
                remaining.len(),
                on_set.len()
            );
        };
        debug!("select_cover: greedy {} (covers {} more)", primes[pick].cube, best_gain);
        remaining.difference_with(&primes[pick].covers);
        is_selected[pick] = true;
        selected.push(pick);
    }

    selected
}

/// Finds the implicant that alone covers the first (lowest) remaining minterm
/// with a unique coverer.
fn find_essential(remaining: &BitSet, primes: &[Implicant]) -> Option<usize> {
    remaining.iter().find_map(|pos| {
        let mut covering = primes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.covers.contains(pos))
            .map(|(i, _)| i);
        match (covering.next(), covering.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::primes::prime_implicants;

    fn cube(s: &str) -> Cube {
        s.parse().unwrap()
    }

    fn implicant(s: &str, covers: &[usize]) -> Implicant {
        Implicant::new(cube(s), covers.iter().copied().collect())
    }

    fn assert_complete(on_set: &OnSet, primes: &[Implicant], selected: &[usize]) {
        let mut covered = BitSet::default();
        for &i in selected {
            covered.union_with(&primes[i].covers);
        }
        assert_eq!(covered, BitSet::full(on_set.len()));
    }

    #[test]
    fn test_essentials_only() {
        // f = A | (B & C): both primes are essential
        let on_set = OnSet::from_cubes(&[cube("1--"), cube("-11")]);
        let primes = prime_implicants(&on_set);
        let cover = select_cover(&on_set, &primes);
        assert_eq!(cover, vec![cube("-11"), cube("1--")]);
    }

    #[test]
    fn test_redundant_prime_skipped() {
        // f = Σm(0, 1, 5, 7) over (A, B, C): primes 00-, -01, 1-1; the middle one is redundant
        let on_set = OnSet::from_indices([0, 1, 5, 7], 3);
        let primes = prime_implicants(&on_set);
        assert_eq!(primes.len(), 3);
        let selected = select_cover_indices(&on_set, &primes);
        assert_complete(&on_set, &primes, &selected);
        let cover: Vec<String> = selected.iter().map(|&i| primes[i].cube.to_string()).collect();
        assert_eq!(cover, vec!["00-", "1-1"]);
    }

    #[test]
    fn test_cyclic_chart_uses_greedy() {
        // No essential primes: every minterm is covered by exactly two primes.
        let on_set = OnSet::from_indices([0, 1, 2, 5, 6, 7], 3);
        let primes = prime_implicants(&on_set);
        let selected = select_cover_indices(&on_set, &primes);
        assert_complete(&on_set, &primes, &selected);
        assert_eq!(selected.len(), 3);
        // The first prime wins the opening tie.
        assert_eq!(selected[0], 0);
    }

    #[test]
    fn test_greedy_prefers_larger_gain() {
        let on_set = OnSet::from_indices([0, 1, 2, 3], 2);
        let primes = vec![
            implicant("00", &[0]),
            implicant("0-", &[0, 1]),
            implicant("--", &[0, 1, 2, 3]),
            implicant("1-", &[2, 3]),
        ];
        // Every minterm has at least two coverers, so the greedy pass picks `--`.
        let selected = select_cover_indices(&on_set, &primes);
        assert_eq!(selected, vec![2]);
    }

    #[test]
    fn test_empty_on_set() {
        let on_set = OnSet::default();
        assert!(select_cover(&on_set, &[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "uncoverable")]
    fn test_inconsistent_chart_panics() {
        let on_set = OnSet::from_indices([0, 3], 2);
        let primes = vec![implicant("00", &[0]), implicant("01", &[])];
        select_cover(&on_set, &primes);
    }
}

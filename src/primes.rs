//! Prime implicant generation.
//!
//! The on-set is enumerated minterm by minterm ([`OnSet::from_cubes`]) and then
//! reduced level by level: at each level every pair of cubes is tried with
//! [`Cube::merge`], cubes that merged with nothing are primes, and the
//! deduplicated merge results form the next level. Every cube carries the set of
//! on-set positions it covers, so the cover selector needs no further expansion.
//!
//! Enumerating the on-set is exponential in the number of atoms.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::bitset::BitSet;
use crate::cube::Cube;

/// The minterms of a function, sorted by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnSet {
    width: usize,
    indices: Vec<u64>,
    minterms: Vec<Cube>,
}

impl OnSet {
    /// Expands every cube into its minterms and deduplicates them by index.
    ///
    /// # Panics
    ///
    /// Panics if the cubes do not share one width, or the width exceeds
    /// [`Cube::MAX_WIDTH`].
    pub fn from_cubes<'a>(cubes: impl IntoIterator<Item = &'a Cube>) -> Self {
        let mut width = None;
        let mut map = BTreeMap::<u64, Cube>::new();
        for cube in cubes {
            let w = *width.get_or_insert(cube.width());
            assert_eq!(w, cube.width(), "All cubes should share one atom ordering");
            assert!(w <= Cube::MAX_WIDTH, "Cube width should be at most {}", Cube::MAX_WIDTH);
            for minterm in cube.minterms() {
                if let Some(index) = minterm.index() {
                    map.entry(index).or_insert(minterm);
                }
            }
        }

        let (indices, minterms) = map.into_iter().unzip();
        Self {
            width: width.unwrap_or(0),
            indices,
            minterms,
        }
    }

    /// Builds an on-set directly from minterm indices.
    ///
    /// # Panics
    ///
    /// Panics if an index does not fit in `width` bits.
    pub fn from_indices(indices: impl IntoIterator<Item = u64>, width: usize) -> Self {
        let cubes: Vec<Cube> = indices.into_iter().map(|i| Cube::from_index(i, width)).collect();
        let mut on_set = Self::from_cubes(&cubes);
        on_set.width = width;
        on_set
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Minterm indices in ascending order.
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }

    /// Minterm cubes, parallel to [`OnSet::indices`].
    pub fn minterms(&self) -> &[Cube] {
        &self.minterms
    }

    /// Returns the position of the minterm with the given index.
    pub fn position(&self, index: u64) -> Option<usize> {
        self.indices.binary_search(&index).ok()
    }
}

/// A cube together with the on-set positions it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implicant {
    pub cube: Cube,
    pub covers: BitSet,
}

impl Implicant {
    pub fn new(cube: Cube, covers: BitSet) -> Self {
        Self { cube, covers }
    }
}

/// Computes all prime implicants of the on-set.
///
/// Primes are returned level by level (fewest don't-cares first); within a level
/// they keep the order in which they were produced.
pub fn prime_implicants(on_set: &OnSet) -> Vec<Implicant> {
    let mut level: Vec<Implicant> = on_set
        .minterms()
        .iter()
        .enumerate()
        .map(|(pos, minterm)| Implicant::new(minterm.clone(), BitSet::singleton(pos)))
        .collect();
    let mut primes = Vec::new();
    let mut depth = 0;

    while !level.is_empty() {
        let mut used = vec![false; level.len()];
        let mut seen = HashSet::new();
        let mut next = Vec::new();

        for i in 0..level.len() {
            for j in (i + 1)..level.len() {
                let Some(cube) = level[i].cube.merge(&level[j].cube) else {
                    continue;
                };
                used[i] = true;
                used[j] = true;
                if seen.insert(cube.clone()) {
                    let mut covers = level[i].covers.clone();
                    covers.union_with(&level[j].covers);
                    next.push(Implicant::new(cube, covers));
                }
            }
        }

        let before = primes.len();
        primes.extend(
            level
                .into_iter()
                .zip(used)
                .filter(|(_, used)| !used)
                .map(|(implicant, _)| implicant),
        );
        debug!(
            "prime_implicants: level {} -> {} primes, {} merged",
            depth,
            primes.len() - before,
            next.len()
        );

        level = next;
        depth += 1;
    }

    primes
}

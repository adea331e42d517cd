//! Cube algebra.
//!
//! A [`Cube`] is a product term projected onto a fixed ordering of distinct atoms:
//! position `i` holds the [`Trit`] the product requires of the `i`-th atom.
//! A cube without don't-cares is a *minterm* and corresponds to exactly one truth
//! assignment, which is packed big-endian into an integer (position 0 is the most
//! significant bit).
//!
//! ```
//! use qm_rs::cube::Cube;
//!
//! let a: Cube = "101".parse().unwrap();
//! let b: Cube = "100".parse().unwrap();
//! assert_eq!(a.index(), Some(0b101));
//!
//! let merged = a.merge(&b).unwrap();
//! assert_eq!(merged.to_string(), "10-");
//! assert_eq!(merged.minterms().len(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::types::Trit;

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cube(Vec<Trit>);

impl Cube {
    /// Widest cube whose minterms still pack into a `u64`.
    pub const MAX_WIDTH: usize = u64::BITS as usize;

    pub fn new(trits: Vec<Trit>) -> Self {
        Self(trits)
    }

    /// The always-true cube (all don't-cares) over `width` atoms.
    pub fn universe(width: usize) -> Self {
        Self(vec![Trit::DontCare; width])
    }

    /// Unpacks a minterm index into a cube of the given width.
    ///
    /// # Panics
    ///
    /// Panics if `width > Cube::MAX_WIDTH` or `index` does not fit in `width` bits.
    pub fn from_index(index: u64, width: usize) -> Self {
        assert!(width <= Self::MAX_WIDTH, "Cube width should be at most {}", Self::MAX_WIDTH);
        assert!(
            width == Self::MAX_WIDTH || index >> width == 0,
            "Minterm index {} does not fit in {} bits",
            index,
            width
        );
        Self(
            (0..width)
                .map(|i| Trit::from((index >> (width - 1 - i)) & 1 == 1))
                .collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.0.len()
    }

    pub fn trits(&self) -> &[Trit] {
        &self.0
    }

    pub fn get(&self, position: usize) -> Trit {
        self.0[position]
    }

    /// Number of unconstrained positions.
    pub fn dont_cares(&self) -> usize {
        self.0.iter().filter(|t| t.is_dont_care()).count()
    }

    pub fn is_minterm(&self) -> bool {
        self.dont_cares() == 0
    }

    /// Returns the big-endian index of a minterm, or `None` if the cube still has
    /// don't-cares (or is too wide to pack).
    pub fn index(&self) -> Option<u64> {
        if self.width() > Self::MAX_WIDTH {
            return None;
        }
        self.0.iter().try_fold(0u64, |acc, trit| {
            trit.value().map(|bit| (acc << 1) | bit as u64)
        })
    }

    /// Consensus of two cubes.
    ///
    /// Succeeds iff the cubes have the same width and differ in exactly one position,
    /// where one has `1` and the other `0`. Positions where either side is a
    /// don't-care must agree exactly. The result has a don't-care at the differing
    /// position.
    pub fn merge(&self, other: &Cube) -> Option<Cube> {
        if self.width() != other.width() {
            return None;
        }

        let mut diff = None;
        for (i, (a, b)) in self.0.iter().zip(other.0.iter()).enumerate() {
            if a == b {
                continue;
            }
            if a.is_dont_care() || b.is_dont_care() || diff.is_some() {
                return None;
            }
            diff = Some(i);
        }

        let pos = diff?;
        let mut out = self.clone();
        out.0[pos] = Trit::DontCare;
        Some(out)
    }

    /// Returns true if every minterm of `other` is also a minterm of this cube.
    pub fn covers(&self, other: &Cube) -> bool {
        self.width() == other.width()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| a.is_dont_care() || a == b)
    }

    /// Expands the cube into every minterm it denotes.
    ///
    /// The result has `2^k` elements for `k` don't-cares.
    pub fn minterms(&self) -> Vec<Cube> {
        let mut acc: Vec<Vec<Trit>> = vec![Vec::with_capacity(self.width())];
        for &trit in self.0.iter() {
            match trit {
                Trit::DontCare => {
                    let mut zeros = acc.clone();
                    for m in acc.iter_mut() {
                        m.push(Trit::One);
                    }
                    for m in zeros.iter_mut() {
                        m.push(Trit::Zero);
                    }
                    acc.extend(zeros);
                }
                _ => {
                    for m in acc.iter_mut() {
                        m.push(trit);
                    }
                }
            }
        }
        acc.into_iter().map(Cube).collect()
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trit in self.0.iter() {
            write!(f, "{}", trit)?;
        }
        Ok(())
    }
}

impl From<Vec<Trit>> for Cube {
    fn from(trits: Vec<Trit>) -> Self {
        Cube(trits)
    }
}

/// Error returned when parsing a cube from its `01-` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCubeError {
    /// A character other than `0`, `1` or `-`.
    InvalidTrit { position: usize, found: char },
    /// The string is longer than [`Cube::MAX_WIDTH`].
    TooWide(usize),
}

impl fmt::Display for ParseCubeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCubeError::InvalidTrit { position, found } => {
                write!(f, "Invalid trit '{}' at position {}", found, position)
            }
            ParseCubeError::TooWide(width) => {
                write!(f, "Cube of width {} exceeds the maximum of {}", width, Cube::MAX_WIDTH)
            }
        }
    }
}

impl std::error::Error for ParseCubeError {}

impl FromStr for Cube {
    type Err = ParseCubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trits = s
            .chars()
            .enumerate()
            .map(|(position, found)| {
                Trit::from_char(found).ok_or(ParseCubeError::InvalidTrit { position, found })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if trits.len() > Cube::MAX_WIDTH {
            return Err(ParseCubeError::TooWide(trits.len()));
        }
        Ok(Cube(trits))
    }
}

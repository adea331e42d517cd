use std::fmt;
use std::ops::Neg;

/// One position of a cube.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Trit {
    /// The atom must be false.
    Zero,
    /// The atom must be true.
    One,
    /// The atom is not constrained.
    DontCare,
}

impl Trit {
    /// Returns `true` for [`Trit::DontCare`].
    pub const fn is_dont_care(self) -> bool {
        matches!(self, Trit::DontCare)
    }

    /// Returns the required value, or `None` for a don't-care.
    pub const fn value(self) -> Option<bool> {
        match self {
            Trit::Zero => Some(false),
            Trit::One => Some(true),
            Trit::DontCare => None,
        }
    }

    /// Converts the character form (`0`, `1`, `-`) into a trit.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Trit::Zero),
            '1' => Some(Trit::One),
            '-' => Some(Trit::DontCare),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Trit::Zero => '0',
            Trit::One => '1',
            Trit::DontCare => '-',
        }
    }
}

impl From<bool> for Trit {
    fn from(value: bool) -> Self {
        if value {
            Trit::One
        } else {
            Trit::Zero
        }
    }
}

impl From<Option<bool>> for Trit {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Trit::DontCare, Trit::from)
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A signed atom.
///
/// The atom is an opaque value of the caller's expression type `E`; the core never
/// compares atoms by itself and always goes through
/// [`Adapter::equivalent`][crate::adapter::Adapter::equivalent].
///
/// # Invariants
///
/// A [`Product`][crate::sop::Product] never holds two literals over equivalent atoms.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Literal<E> {
    atom: E,
    value: bool,
}

impl<E> Literal<E> {
    pub fn new(atom: E, value: bool) -> Self {
        Self { atom, value }
    }

    /// The atom must hold `true`.
    pub fn positive(atom: E) -> Self {
        Self::new(atom, true)
    }

    /// The atom must hold `false`.
    pub fn negative(atom: E) -> Self {
        Self::new(atom, false)
    }

    pub fn atom(&self) -> &E {
        &self.atom
    }

    /// Returns the required value of the atom.
    pub fn polarity(&self) -> bool {
        self.value
    }

    pub fn is_positive(&self) -> bool {
        self.value
    }

    pub fn is_negative(&self) -> bool {
        !self.value
    }

    pub fn into_atom(self) -> E {
        self.atom
    }
}

impl<E> Neg for Literal<E> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            atom: self.atom,
            value: !self.value,
        }
    }
}

impl<E: fmt::Display> fmt::Display for Literal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.value { "" } else { "~" }, self.atom)
    }
}

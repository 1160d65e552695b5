//! Derivation path prefixes.
//!
//! Only the apostrophe is accepted as hardened marker and every segment must be plain decimal
//! digits without leading zeros. Every accepted string is therefore printed back unchanged.

use std::{fmt, str::FromStr};

use bitcoin::bip32::ChildNumber;

use crate::errors::PathError;

/// Marker of the master key at the start of every path.
const MASTER: &str = "m";

/// Separator between path segments.
const SEPARATOR: char = '/';

/// Suffix marking a hardened segment.
const HARDENED_MARKER: char = '\'';

/// An immutable, ordered list of child numbers starting at the master key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path, i.e. the master key itself.
    pub const fn master() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of steps in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path points at the master key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new path with `child` appended.
    pub fn child(&self, child: ChildNumber) -> Self {
        self.extend([child])
    }

    /// Returns a new path with all of `children` appended.
    pub fn extend(&self, children: impl AsRef<[ChildNumber]>) -> Self {
        let mut steps = self.0.clone();
        steps.extend_from_slice(children.as_ref());
        Self(steps)
    }

    /// Iterates over the steps of the path.
    pub fn iter(&self) -> impl Iterator<Item = &ChildNumber> + '_ {
        self.0.iter()
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(steps: Vec<ChildNumber>) -> Self {
        Self(steps)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for DerivationPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(SEPARATOR);

        // `split` always yields at least one item.
        if parts.next() != Some(MASTER) {
            return Err(PathError::MissingMaster(s.to_string()));
        }

        parts
            .enumerate()
            .map(|(position, segment)| parse_segment(position, segment))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

fn parse_segment(position: usize, segment: &str) -> Result<ChildNumber, PathError> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment { position });
    }

    let (digits, hardened) = match segment.strip_suffix(HARDENED_MARKER) {
        Some(digits) => (digits, true),
        None => (segment, false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::InvalidSegment(segment.to_string()));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(PathError::LeadingZero(segment.to_string()));
    }

    let index = digits
        .parse::<u64>()
        .map_err(|_| PathError::InvalidSegment(segment.to_string()))?;
    let index = u32::try_from(index).map_err(|_| PathError::IndexOutOfRange(index))?;

    let child = if hardened {
        ChildNumber::from_hardened_idx(index)
    } else {
        ChildNumber::from_normal_idx(index)
    };
    child.map_err(|_| PathError::IndexOutOfRange(index.into()))
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASTER)?;
        for child in &self.0 {
            match child {
                ChildNumber::Normal { index } => write!(f, "{SEPARATOR}{index}")?,
                ChildNumber::Hardened { index } => {
                    write!(f, "{SEPARATOR}{index}{HARDENED_MARKER}")?
                }
            }
        }
        Ok(())
    }
}

//! Row-major index arithmetic for flattened SOFA arrays.
//!
//! Every variable read from a SOFA file arrives as a flat `Vec<f64>`. The
//! functions here map a logical multi-index into that buffer; they are the
//! only place the offset formula lives, and every accessor (including the
//! `sofainfo` printer) goes through them.
//!
//! Indices out of range are programming errors and panic: bounds always come
//! from a shape already read from the file.

use std::fmt;

use crate::error::{Error, Result};

/// Offset of element `[i][j]` in a row-major `[d0][d1]` array.
///
/// # Panics
///
/// Panics if `i >= d0` or `j >= d1`.
///
/// # Example
///
/// ```
/// use sofa_rs::index_2d;
///
/// // EmitterPosition with 2 emitters, cartesian xyz.
/// assert_eq!(index_2d(1, 2, 2, 3), 5);
/// ```
#[inline]
pub fn index_2d(i: usize, j: usize, d0: usize, d1: usize) -> usize {
    assert!(
        i < d0 && j < d1,
        "index [{i}][{j}] out of bounds for shape [{d0}][{d1}]"
    );
    d1 * i + j
}

/// Offset of element `[i][j][k]` in a row-major `[d0][d1][d2]` array.
///
/// # Panics
///
/// Panics if any index is out of range for its dimension.
///
/// # Example
///
/// ```
/// use sofa_rs::index_3d;
///
/// // Data.Real with M=3, R=2, N=4: the last element.
/// assert_eq!(index_3d(2, 1, 3, 3, 2, 4), 23);
/// ```
#[inline]
pub fn index_3d(i: usize, j: usize, k: usize, d0: usize, d1: usize, d2: usize) -> usize {
    assert!(
        i < d0 && j < d1 && k < d2,
        "index [{i}][{j}][{k}] out of bounds for shape [{d0}][{d1}][{d2}]"
    );
    d1 * d2 * i + d2 * j + k
}

/// Shape of a positional or data variable, discriminated by rank at runtime.
///
/// Dimension 0 is the entity axis, the last one the coordinate/sample axis.
/// A positional variable may legally be declared either way, so callers
/// discover the variant from the file instead of assuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `[entities][coordinates]`, one value per entity.
    Simple(usize, usize),
    /// `[entities][sub-entities][coordinates]`, e.g. per measurement, or
    /// `[M][R][N]` for frequency-domain data.
    PerSubEntity(usize, usize, usize),
}

impl Shape {
    /// Build a shape from declared dimension sizes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRank`] unless `dims` has 2 or 3 entries.
    pub fn from_dims(name: &str, dims: &[usize]) -> Result<Self> {
        match *dims {
            [d0, d1] => Ok(Shape::Simple(d0, d1)),
            [d0, d1, d2] => Ok(Shape::PerSubEntity(d0, d1, d2)),
            _ => Err(Error::InvalidRank {
                name: name.to_string(),
                rank: dims.len(),
            }),
        }
    }

    /// Number of dimensions (2 or 3).
    pub fn rank(&self) -> usize {
        match self {
            Shape::Simple(..) => 2,
            Shape::PerSubEntity(..) => 3,
        }
    }

    /// Dimension sizes in declaration order.
    pub fn dims(&self) -> Vec<usize> {
        match *self {
            Shape::Simple(d0, d1) => vec![d0, d1],
            Shape::PerSubEntity(d0, d1, d2) => vec![d0, d1, d2],
        }
    }

    /// Size of the entity axis.
    pub fn entities(&self) -> usize {
        match *self {
            Shape::Simple(d0, _) | Shape::PerSubEntity(d0, _, _) => d0,
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        match *self {
            Shape::Simple(d0, d1) => d0 * d1,
            Shape::PerSubEntity(d0, d1, d2) => d0 * d1 * d2,
        }
    }

    /// True if any dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset of a logical coordinate. `coord` must have exactly `rank()`
    /// entries.
    ///
    /// # Panics
    ///
    /// Panics on a rank mismatch or an out-of-range index.
    pub fn offset(&self, coord: &[usize]) -> usize {
        match (*self, coord) {
            (Shape::Simple(d0, d1), &[i, j]) => index_2d(i, j, d0, d1),
            (Shape::PerSubEntity(d0, d1, d2), &[i, j, k]) => index_3d(i, j, k, d0, d1, d2),
            _ => panic!(
                "coordinate of rank {} used with shape of rank {}",
                coord.len(),
                self.rank()
            ),
        }
    }

    /// Iterate over every coordinate in traversal order: `i` outer, `j`
    /// middle, `k` inner, all ascending.
    ///
    /// Downstream consumers rebuild meaning from flat sequences using this
    /// order, so it must not change.
    pub fn indices(&self) -> Indices {
        Indices {
            dims: self.dims(),
            next: if self.is_empty() {
                None
            } else {
                Some(vec![0; self.rank()])
            },
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Simple(d0, d1) => write!(f, "{d0}x{d1}"),
            Shape::PerSubEntity(d0, d1, d2) => write!(f, "{d0}x{d1}x{d2}"),
        }
    }
}

/// Iterator over the coordinates of a [`Shape`] in row-major order.
#[derive(Debug, Clone)]
pub struct Indices {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl Iterator for Indices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;

        // Odometer increment, last axis fastest.
        let mut following = current.clone();
        for axis in (0..following.len()).rev() {
            following[axis] += 1;
            if following[axis] < self.dims[axis] {
                self.next = Some(following);
                break;
            }
            following[axis] = 0;
        }

        Some(current)
    }
}

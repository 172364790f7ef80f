//! Variable metadata and owned data buffers.
//!
//! Everything returned here is a copy: buffers outlive the file they were
//! read from and can be compared in tests without keeping it open.

use ndarray::{ArrayD, IxDyn};

use crate::error::{Error, Result};
use crate::index::Shape;
use crate::storage::Dimension;
use crate::units::{CoordinateSystem, Unit};

/// Read-only description of a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDescriptor {
    /// Variable name, e.g. `ReceiverPosition`.
    pub name: String,
    /// Declared dimensions, in order.
    pub dims: Vec<Dimension>,
    /// Coordinate system; `None` for non-positional variables.
    pub coordinates: Option<CoordinateSystem>,
    /// Unit, when the variable declares a recognised one.
    pub units: Option<Unit>,
}

impl VariableDescriptor {
    /// Dimension sizes in declaration order.
    pub fn shape(&self) -> Vec<usize> {
        self.dims.iter().map(|d| d.len).collect()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.dims.iter().map(|d| d.len).product()
    }

    /// True if the variable holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the variable carries a coordinate system.
    pub fn is_positional(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// The two descriptive tags of a positional variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalVariable {
    /// From `<Var>:Type`.
    pub coordinates: CoordinateSystem,
    /// From `<Var>:Units`.
    pub units: Unit,
}

/// A flattened, row-major array with its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatBuffer {
    shape: Vec<usize>,
    values: Vec<f64>,
    /// Indexing layout, present for 2-D and 3-D buffers.
    layout: Option<Shape>,
}

impl FlatBuffer {
    /// Wrap `values` laid out row-major according to `shape`.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] if `values.len()` is not the product of
    /// `shape`.
    pub fn new(name: &str, shape: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(Error::shape_mismatch(name, shape, vec![values.len()]));
        }
        let layout = Shape::from_dims(name, &shape).ok();
        Ok(FlatBuffer {
            shape,
            values,
            layout,
        })
    }

    /// Dimension sizes.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// All values, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the buffer holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a logical coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is not 2-D or 3-D, or the coordinate is out of
    /// range.
    pub fn get(&self, coord: &[usize]) -> f64 {
        match &self.layout {
            Some(layout) => self.values[layout.offset(coord)],
            None => panic!("cannot index a {}-D buffer", self.shape.len()),
        }
    }

    /// Indexing layout, `None` unless the buffer is 2-D or 3-D.
    pub fn layout(&self) -> Option<&Shape> {
        self.layout.as_ref()
    }

    /// Take ownership of the values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Convert to an n-dimensional array with the same shape.
    pub fn to_array(&self) -> Result<ArrayD<f64>> {
        ArrayD::from_shape_vec(IxDyn(&self.shape), self.values.clone())
            .map_err(|e| Error::validation(format!("Shape error: {e}")))
    }
}

/// Values of a positional variable together with its tags and shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalData {
    /// Variable name.
    pub name: String,
    /// Coordinate system and unit.
    pub variable: PositionalVariable,
    /// Declared shape, discovered from the file.
    pub shape: Shape,
    /// Row-major values, `shape.len()` of them.
    pub values: Vec<f64>,
}

impl PositionalData {
    /// Value at a logical coordinate of rank `shape.rank()`.
    ///
    /// # Panics
    ///
    /// Panics on a rank mismatch or out-of-range index.
    pub fn get(&self, coord: &[usize]) -> f64 {
        self.values[self.shape.offset(coord)]
    }

    /// Iterate over `(coordinate, value)` pairs in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<usize>, f64)> + '_ {
        self.shape.indices().map(move |c| {
            let v = self.get(&c);
            (c, v)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_buffer_rejects_wrong_length() {
        let err = FlatBuffer::new("Data.Real", vec![2, 2, 2], vec![0.0; 7]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_flat_buffer_get() {
        let values: Vec<f64> = (0..24).map(f64::from).collect();
        let buf = FlatBuffer::new("Data.Real", vec![3, 2, 4], values).unwrap();
        assert_relative_eq!(buf.get(&[2, 1, 3]), 23.0);
        assert_relative_eq!(buf.get(&[1, 0, 2]), 10.0);
    }

    #[test]
    fn test_flat_buffer_layout() {
        let buf = FlatBuffer::new("Data.Real", vec![3, 2, 4], vec![0.0; 24]).unwrap();
        assert_eq!(buf.layout(), Some(&Shape::PerSubEntity(3, 2, 4)));

        let freqs = FlatBuffer::new("N", vec![4], vec![0.0; 4]).unwrap();
        assert_eq!(freqs.layout(), None);
    }

    #[test]
    #[should_panic]
    fn test_flat_buffer_get_1d_panics() {
        let freqs = FlatBuffer::new("N", vec![2], vec![125.0, 250.0]).unwrap();
        freqs.get(&[0]);
    }

    #[test]
    fn test_flat_buffer_to_array() {
        let values: Vec<f64> = (0..6).map(f64::from).collect();
        let buf = FlatBuffer::new("EmitterPosition", vec![2, 3], values).unwrap();
        let array = buf.to_array().unwrap();
        assert_eq!(array.shape(), &[2, 3]);
        assert_relative_eq!(array[[1, 2]], buf.get(&[1, 2]));
    }

    #[test]
    fn test_descriptor_len() {
        let desc = VariableDescriptor {
            name: "ReceiverPosition".into(),
            dims: vec![Dimension::new("R", 2), Dimension::new("C", 3), Dimension::new("I", 1)],
            coordinates: Some(CoordinateSystem::Cartesian),
            units: Some(Unit::Metre),
        };
        assert_eq!(desc.shape(), vec![2, 3, 1]);
        assert_eq!(desc.rank(), 3);
        assert_eq!(desc.len(), 6);
        assert!(desc.is_positional());
    }

    #[test]
    fn test_positional_iter_order() {
        let data = PositionalData {
            name: "EmitterPosition".into(),
            variable: PositionalVariable {
                coordinates: CoordinateSystem::Cartesian,
                units: Unit::Metre,
            },
            shape: Shape::Simple(2, 3),
            values: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        };
        let flat: Vec<f64> = data.iter().map(|(_, v)| v).collect();
        assert_eq!(flat, data.values);
    }
}

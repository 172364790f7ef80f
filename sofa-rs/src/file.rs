//! Generic SOFA file model.
//!
//! This module provides [`SofaFile`], the convention-independent view of a
//! SOFA file: global attributes, dimensions, variable shapes, and positional
//! variables with their coordinate-system and unit tags.
//!
//! # Example
//!
//! ```
//! use sofa_rs::{MemoryStorage, SofaFile};
//!
//! let storage = MemoryStorage::new()
//!     .with_variable("EmitterPosition", &[("E", 2), ("C", 3)], vec![0.0; 6])
//!     .with_variable_attribute("EmitterPosition", "Type", "cartesian")
//!     .with_variable_attribute("EmitterPosition", "Units", "metre");
//! let file = SofaFile::from_storage(storage);
//!
//! let emitters = file.positional_data("EmitterPosition")?;
//! assert_eq!(emitters.values.len(), 6);
//! # Ok::<(), sofa_rs::Error>(())
//! ```

#[cfg(feature = "netcdf")]
use std::path::Path;

use crate::error::{Error, Result};
use crate::index::Shape;
#[cfg(feature = "netcdf")]
use crate::storage::{NetcdfStorage, OpenMode};
use crate::storage::{Dimension, Storage};
use crate::units::{CoordinateSystem, Unit};
use crate::variable::{FlatBuffer, PositionalData, PositionalVariable, VariableDescriptor};

/// Global attributes every SOFA file must carry.
pub const REQUIRED_ATTRIBUTES: &[&str] = &[
    "Conventions",
    "Version",
    "SOFAConventions",
    "SOFAConventionsVersion",
    "APIName",
    "APIVersion",
    "DataType",
    "RoomType",
    "Title",
    "DateCreated",
    "DateModified",
    "AuthorContact",
    "Organization",
    "License",
];

/// Dimensions every SOFA file must define.
pub const REQUIRED_DIMENSIONS: &[&str] = &["I", "C", "M", "R", "E", "N"];

/// Positional variables every SOFA file must carry.
pub const REQUIRED_POSITIONS: &[&str] = &[
    "ListenerPosition",
    "ReceiverPosition",
    "SourcePosition",
    "EmitterPosition",
];

/// All positional variables AES69 defines.
pub const POSITIONAL_VARIABLES: &[&str] = &[
    "ListenerPosition",
    "ListenerView",
    "ListenerUp",
    "SourcePosition",
    "SourceView",
    "SourceUp",
    "ReceiverPosition",
    "ReceiverView",
    "ReceiverUp",
    "EmitterPosition",
    "EmitterView",
    "EmitterUp",
];

/// A SOFA file, independent of the convention it follows.
///
/// Owns its storage handle; dropping the `SofaFile` releases it.
/// Accessors never mutate the file and every buffer they return is an
/// independent copy.
///
/// A `SofaFile` is meant to be used from one thread. Open one per thread
/// when reading concurrently.
pub struct SofaFile {
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for SofaFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SofaFile")
            .field("variables", &self.storage.variable_names())
            .finish()
    }
}

impl SofaFile {
    /// Open a SOFA file on disk.
    ///
    /// Only checks that the handle opens; call [`is_valid`](Self::is_valid)
    /// before using other accessors.
    ///
    /// # Errors
    ///
    /// [`Error::OpenFailed`] if the file cannot be opened in `mode`.
    #[cfg(feature = "netcdf")]
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        Ok(Self::from_storage(NetcdfStorage::open(path, mode)?))
    }

    /// Wrap an already opened storage backend.
    pub fn from_storage(storage: impl Storage + 'static) -> Self {
        SofaFile {
            storage: Box::new(storage),
        }
    }

    /// Check the structure every SOFA file must have.
    ///
    /// Returns `false` rather than failing; the reason is logged at debug
    /// level. Use [`validate`](Self::validate) to get it.
    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("not a valid SOFA file: {e}");
                false
            }
        }
    }

    /// Like [`is_valid`](Self::is_valid) but reports the first problem.
    pub fn validate(&self) -> Result<()> {
        self.check_global_attributes()?;
        self.check_dimensions()?;
        self.check_positions()
    }

    fn check_global_attributes(&self) -> Result<()> {
        for name in REQUIRED_ATTRIBUTES {
            self.attribute(name)
                .map_err(|_| Error::validation(format!("missing global attribute '{name}'")))?;
        }

        let conventions = self.conventions()?;
        if conventions != "SOFA" {
            return Err(Error::convention_mismatch("Conventions", "SOFA", conventions));
        }
        Ok(())
    }

    fn check_dimensions(&self) -> Result<()> {
        for name in REQUIRED_DIMENSIONS {
            self.dimension(name)
                .map_err(|_| Error::validation(format!("missing dimension '{name}'")))?;
        }

        for (name, required) in [("I", 1), ("C", 3)] {
            let len = self.dimension(name)?;
            if len != required {
                return Err(Error::validation(format!(
                    "dimension '{name}' must be {required}, found {len}"
                )));
            }
        }
        Ok(())
    }

    fn check_positions(&self) -> Result<()> {
        for name in REQUIRED_POSITIONS {
            let shape = self.variable_shape(name)?;
            Shape::from_dims(name, &shape)?;
            self.positional_variable(name)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Attributes and dimensions
    // ------------------------------------------------------------------

    /// A global attribute as a string.
    pub fn attribute(&self, name: &str) -> Result<String> {
        self.storage.global_attribute(name)
    }

    /// All global attributes as `(name, value)` pairs, in storage order.
    ///
    /// Attributes whose value cannot be rendered are skipped with a warning.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.storage
            .global_attribute_names()
            .into_iter()
            .filter_map(|name| match self.storage.global_attribute(&name) {
                Ok(value) => Some((name, value)),
                Err(e) => {
                    log::warn!("skipping attribute '{name}': {e}");
                    None
                }
            })
            .collect()
    }

    /// The `Conventions` attribute (always `"SOFA"` in a valid file).
    pub fn conventions(&self) -> Result<String> {
        self.attribute("Conventions")
    }

    /// The `SOFAConventions` attribute naming the specialised convention.
    pub fn sofa_conventions(&self) -> Result<String> {
        self.attribute("SOFAConventions")
    }

    /// The `DataType` attribute (`FIR`, `TF`, `SOS`, ...).
    pub fn data_type(&self) -> Result<String> {
        self.attribute("DataType")
    }

    /// The `RoomType` attribute.
    pub fn room_type(&self) -> Result<String> {
        self.attribute("RoomType")
    }

    /// All file-level dimensions.
    pub fn dimensions(&self) -> Vec<Dimension> {
        self.storage.dimensions()
    }

    /// Size of a file-level dimension.
    pub fn dimension(&self, name: &str) -> Result<usize> {
        self.storage
            .dimensions()
            .into_iter()
            .find(|d| d.name == name)
            .map(|d| d.len)
            .ok_or_else(|| Error::dimension_not_found(name))
    }

    /// Names of all variables.
    pub fn variable_names(&self) -> Vec<String> {
        self.storage.variable_names()
    }

    /// True if the file has a variable with this name.
    pub fn has_variable(&self, name: &str) -> bool {
        self.storage.variable_dimensions(name).is_ok()
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    /// Declared dimension sizes of a variable, in declaration order.
    pub fn variable_shape(&self, name: &str) -> Result<Vec<usize>> {
        Ok(self
            .variable_dimensions(name)?
            .into_iter()
            .map(|d| d.len)
            .collect())
    }

    /// Declared dimensions (names and sizes) of a variable.
    pub fn variable_dimensions(&self, name: &str) -> Result<Vec<Dimension>> {
        self.storage.variable_dimensions(name)
    }

    /// An attribute attached to a variable.
    pub fn variable_attribute(&self, variable: &str, attribute: &str) -> Result<String> {
        self.storage.variable_attribute(variable, attribute)
    }

    /// Unit of a variable's `Units` attribute.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if absent, [`Error::InvalidAttribute`] if not a
    /// recognised unit.
    pub fn variable_units(&self, name: &str) -> Result<Unit> {
        let value = self.variable_attribute(name, "Units")?;
        Unit::from_name(&value)
            .ok_or_else(|| Error::invalid_attribute(format!("{name}:Units"), value))
    }

    /// Metadata for a variable. Tags are filled in when present and
    /// recognised.
    pub fn variable_descriptor(&self, name: &str) -> Result<VariableDescriptor> {
        let dims = self.variable_dimensions(name)?;
        let coordinates = self
            .variable_attribute(name, "Type")
            .ok()
            .and_then(|v| CoordinateSystem::from_name(&v));
        let units = self.variable_units(name).ok();

        Ok(VariableDescriptor {
            name: name.to_string(),
            dims,
            coordinates,
            units,
        })
    }

    /// Read a whole variable of any rank into an owned buffer.
    pub fn variable_data(&self, name: &str) -> Result<FlatBuffer> {
        let shape = self.variable_shape(name)?;
        let mut values = vec![0.0; shape.iter().product()];
        self.storage.read_variable(name, &mut values)?;
        FlatBuffer::new(name, shape, values)
    }

    /// Read a whole variable into a caller-sized buffer.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] if `out.len()` differs from the variable's
    /// element count; `out` is not written in that case.
    pub fn variable_data_into(&self, name: &str, out: &mut [f64]) -> Result<()> {
        self.storage.read_variable(name, out)
    }

    // ------------------------------------------------------------------
    // Positional variables
    // ------------------------------------------------------------------

    /// Coordinate system and unit of a positional variable.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the variable or either tag is missing,
    /// [`Error::InvalidAttribute`] if a tag is outside the vocabulary.
    pub fn positional_variable(&self, name: &str) -> Result<PositionalVariable> {
        let kind = self.variable_attribute(name, "Type")?;
        let coordinates = CoordinateSystem::from_name(&kind)
            .ok_or_else(|| Error::invalid_attribute(format!("{name}:Type"), kind))?;
        let units = self.variable_units(name)?;

        Ok(PositionalVariable { coordinates, units })
    }

    /// Shape of a positional variable, 2-D or 3-D as declared.
    pub fn positional_shape(&self, name: &str) -> Result<Shape> {
        Shape::from_dims(name, &self.variable_shape(name)?)
    }

    /// Fill `out` with a positional variable.
    ///
    /// `shape` must be the one declared in the file (obtain it with
    /// [`positional_shape`](Self::positional_shape)) and `out.len()` must
    /// equal `shape.len()`. Nothing is written on mismatch.
    pub fn positional_data_into(&self, name: &str, shape: &Shape, out: &mut [f64]) -> Result<()> {
        let declared = self.positional_shape(name)?;
        if declared != *shape {
            return Err(Error::shape_mismatch(name, declared.dims(), shape.dims()));
        }
        if out.len() != shape.len() {
            return Err(Error::shape_mismatch(name, vec![shape.len()], vec![out.len()]));
        }
        self.storage.read_variable(name, out)
    }

    /// Read a positional variable with its tags, discovering its rank from
    /// the file.
    ///
    /// One accessor serves listener, source, receiver and emitter variables
    /// alike.
    pub fn positional_data(&self, name: &str) -> Result<PositionalData> {
        let variable = self.positional_variable(name)?;
        let shape = self.positional_shape(name)?;
        let mut values = vec![0.0; shape.len()];
        self.positional_data_into(name, &shape, &mut values)?;

        Ok(PositionalData {
            name: name.to_string(),
            variable,
            shape,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn emitters() -> MemoryStorage {
        MemoryStorage::new()
            .with_variable(
                "EmitterPosition",
                &[("E", 2), ("C", 3)],
                vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            )
            .with_variable_attribute("EmitterPosition", "Type", "cartesian")
            .with_variable_attribute("EmitterPosition", "Units", "metre")
    }

    #[test]
    fn test_positional_data_2d() {
        let file = SofaFile::from_storage(emitters());
        let data = file.positional_data("EmitterPosition").unwrap();

        assert_eq!(data.shape, Shape::Simple(2, 3));
        assert_eq!(data.values.len(), 6);
        assert_eq!(data.shape.offset(&[1, 2]), 5);
        assert_eq!(data.get(&[1, 2]), 5.0);
        assert_eq!(data.variable.coordinates, CoordinateSystem::Cartesian);
        assert_eq!(data.variable.units, Unit::Metre);
    }

    #[test]
    fn test_positional_data_3d() {
        let storage = MemoryStorage::new()
            .with_variable(
                "ReceiverPosition",
                &[("R", 2), ("C", 3), ("I", 1)],
                vec![0.0, 0.09, 0.0, 0.0, -0.09, 0.0],
            )
            .with_variable_attribute("ReceiverPosition", "Type", "cartesian")
            .with_variable_attribute("ReceiverPosition", "Units", "metre");
        let file = SofaFile::from_storage(storage);

        let data = file.positional_data("ReceiverPosition").unwrap();
        assert_eq!(data.shape, Shape::PerSubEntity(2, 3, 1));
        assert_eq!(data.get(&[1, 1, 0]), -0.09);
    }

    #[test]
    fn test_positional_data_into_rejects_small_buffer() {
        let file = SofaFile::from_storage(emitters());
        let shape = file.positional_shape("EmitterPosition").unwrap();
        let mut out = vec![0.0; 5];

        let err = file
            .positional_data_into("EmitterPosition", &shape, &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_positional_data_into_rejects_wrong_shape() {
        let file = SofaFile::from_storage(emitters());
        let mut out = vec![0.0; 6];

        let err = file
            .positional_data_into("EmitterPosition", &Shape::Simple(3, 2), &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_positional_variable_missing_tag() {
        let storage = MemoryStorage::new()
            .with_variable("SourcePosition", &[("I", 1), ("C", 3)], vec![0.0; 3])
            .with_variable_attribute("SourcePosition", "Type", "spherical");
        let file = SofaFile::from_storage(storage);

        let err = file.positional_variable("SourcePosition").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_positional_variable_unknown_type() {
        let storage = emitters().with_variable_attribute("EmitterPosition", "Type", "polar");
        let file = SofaFile::from_storage(storage);

        let err = file.positional_variable("EmitterPosition").unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute { .. }));
    }

    #[test]
    fn test_variable_shape_not_found() {
        let file = SofaFile::from_storage(MemoryStorage::new());
        assert!(file.variable_shape("Data.Real").unwrap_err().is_not_found());
        assert!(!file.has_variable("Data.Real"));
    }

    #[test]
    fn test_empty_file_is_not_valid() {
        let file = SofaFile::from_storage(MemoryStorage::new());
        assert!(!file.is_valid());
    }

    #[test]
    fn test_descriptor_for_non_positional() {
        let storage = MemoryStorage::new()
            .with_variable("N", &[("N", 2)], vec![500.0, 1000.0])
            .with_variable_attribute("N", "Units", "hertz");
        let file = SofaFile::from_storage(storage);

        let desc = file.variable_descriptor("N").unwrap();
        assert_eq!(desc.coordinates, None);
        assert_eq!(desc.units, Some(Unit::Hertz));
        assert_eq!(desc.shape(), vec![2]);
    }
}

//! The storage collaborator behind a SOFA file.
//!
//! SOFA files are netCDF-4 containers, but nothing above this module knows
//! that. [`Storage`] is the whole surface the data model needs: global
//! attributes as strings, named dimensions, each variable's declared
//! dimensions and attributes, and a full read of a variable into a
//! caller-sized buffer.
//!
//! Two backends are provided:
//!
//! - [`MemoryStorage`] - populated through a builder, always available
//! - [`NetcdfStorage`] - reads real files (requires the `netcdf` feature)

mod memory;
#[cfg(feature = "netcdf")]
mod netcdf_file;

pub use memory::MemoryStorage;
#[cfg(feature = "netcdf")]
pub use netcdf_file::NetcdfStorage;

use std::fmt;

use crate::error::Result;

/// A named dimension and its size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dimension {
    /// Symbolic name (`I`, `C`, `M`, `R`, `E`, `N`, ...).
    pub name: String,
    /// Number of elements along this dimension.
    pub len: usize,
}

impl Dimension {
    /// Create a dimension.
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Dimension {
            name: name.into(),
            len,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.len)
    }
}

/// Mode a storage handle is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Read only.
    #[default]
    Read,
    /// Read and write an existing file.
    Write,
}

/// Read access to the raw contents of a SOFA container.
///
/// Missing names are reported as [`Error::NotFound`](crate::Error::NotFound);
/// backend failures as [`Error::ReadError`](crate::Error::ReadError).
/// Implementations never mutate the file.
pub trait Storage {
    /// Names of all global attributes, in storage order.
    fn global_attribute_names(&self) -> Vec<String>;

    /// Value of a global attribute rendered as a string.
    fn global_attribute(&self, name: &str) -> Result<String>;

    /// All dimensions defined in the file.
    fn dimensions(&self) -> Vec<Dimension>;

    /// Names of all variables, in storage order.
    fn variable_names(&self) -> Vec<String>;

    /// Declared dimensions of a variable, in declaration order.
    fn variable_dimensions(&self, name: &str) -> Result<Vec<Dimension>>;

    /// Value of an attribute attached to a variable (e.g. `Units` on
    /// `ReceiverPosition`).
    fn variable_attribute(&self, variable: &str, attribute: &str) -> Result<String>;

    /// Read the full contents of a variable into `out`, row-major.
    ///
    /// `out.len()` must equal the product of the variable's dimensions;
    /// otherwise [`Error::ShapeMismatch`](crate::Error::ShapeMismatch) is
    /// returned and `out` is left untouched.
    fn read_variable(&self, name: &str, out: &mut [f64]) -> Result<()>;
}

//! netCDF-4 storage backend.
//!
//! Wraps the `netcdf` crate's file handle. The handle is closed when the
//! `NetcdfStorage` is dropped, on every exit path.

use std::path::Path;

use netcdf::AttributeValue;

use super::{Dimension, OpenMode, Storage};
use crate::error::{Error, Result};

enum Handle {
    Read(netcdf::File),
    Write(netcdf::FileMut),
}

/// A SOFA file on disk, read through libnetcdf.
///
/// # Thread Safety
///
/// libnetcdf is not guaranteed to be thread-safe; use one `NetcdfStorage`
/// per thread.
pub struct NetcdfStorage {
    handle: Handle,
}

impl std::fmt::Debug for NetcdfStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.handle {
            Handle::Read(_) => OpenMode::Read,
            Handle::Write(_) => OpenMode::Write,
        };
        f.debug_struct("NetcdfStorage").field("mode", &mode).finish()
    }
}

impl NetcdfStorage {
    /// Open a netCDF file.
    ///
    /// # Errors
    ///
    /// [`Error::OpenFailed`] if the file is missing, unreadable, or not a
    /// netCDF container.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        let handle = match mode {
            OpenMode::Read => netcdf::open(path).map(Handle::Read),
            OpenMode::Write => netcdf::append(path).map(Handle::Write),
        }
        .map_err(|e| Error::open_failed(path, e.to_string()))?;

        log::debug!("opened {} ({:?})", path.display(), mode);
        Ok(NetcdfStorage { handle })
    }

    fn file(&self) -> &netcdf::File {
        match &self.handle {
            Handle::Read(file) => file,
            Handle::Write(file) => file,
        }
    }

    fn variable(&self, name: &str) -> Result<netcdf::Variable<'_>> {
        self.file()
            .variable(name)
            .ok_or_else(|| Error::variable_not_found(name))
    }
}

/// Render an attribute value the way SOFA tools print it.
fn attribute_to_string(name: &str, value: AttributeValue) -> Result<String> {
    fn join<T: ToString>(values: &[T]) -> String {
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    Ok(match value {
        AttributeValue::Str(s) => s,
        AttributeValue::Strs(v) => v.join(", "),
        AttributeValue::Double(x) => x.to_string(),
        AttributeValue::Doubles(v) => join(&v),
        AttributeValue::Float(x) => x.to_string(),
        AttributeValue::Floats(v) => join(&v),
        AttributeValue::Int(x) => x.to_string(),
        AttributeValue::Ints(v) => join(&v),
        AttributeValue::Short(x) => x.to_string(),
        AttributeValue::Shorts(v) => join(&v),
        AttributeValue::Uint(x) => x.to_string(),
        AttributeValue::Uints(v) => join(&v),
        AttributeValue::Longlong(x) => x.to_string(),
        AttributeValue::Longlongs(v) => join(&v),
        _ => {
            return Err(Error::read_error(format!(
                "attribute '{name}' has an unsupported type"
            )))
        }
    })
}

fn to_dimensions(dims: &[netcdf::Dimension<'_>]) -> Vec<Dimension> {
    dims.iter()
        .map(|d| Dimension::new(d.name(), d.len()))
        .collect()
}

impl Storage for NetcdfStorage {
    fn global_attribute_names(&self) -> Vec<String> {
        self.file()
            .attributes()
            .map(|a| a.name().to_string())
            .collect()
    }

    fn global_attribute(&self, name: &str) -> Result<String> {
        let attr = self
            .file()
            .attribute(name)
            .ok_or_else(|| Error::attribute_not_found(name))?;
        let value = attr.value().map_err(|e| Error::read_error(e.to_string()))?;
        attribute_to_string(name, value)
    }

    fn dimensions(&self) -> Vec<Dimension> {
        self.file()
            .dimensions()
            .map(|d| Dimension::new(d.name(), d.len()))
            .collect()
    }

    fn variable_names(&self) -> Vec<String> {
        self.file().variables().map(|v| v.name()).collect()
    }

    fn variable_dimensions(&self, name: &str) -> Result<Vec<Dimension>> {
        Ok(to_dimensions(self.variable(name)?.dimensions()))
    }

    fn variable_attribute(&self, variable: &str, attribute: &str) -> Result<String> {
        let full_name = format!("{variable}:{attribute}");
        let attr = self
            .variable(variable)?
            .attribute(attribute)
            .ok_or_else(|| Error::attribute_not_found(&full_name))?;
        let value = attr.value().map_err(|e| Error::read_error(e.to_string()))?;
        attribute_to_string(&full_name, value)
    }

    fn read_variable(&self, name: &str, out: &mut [f64]) -> Result<()> {
        let var = self.variable(name)?;
        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let expected: usize = shape.iter().product();

        if out.len() != expected {
            return Err(Error::shape_mismatch(name, shape, vec![out.len()]));
        }

        let values: Vec<f64> = var
            .get_values::<f64, _>(..)
            .map_err(|e| Error::read_error(format!("reading '{name}': {e}")))?;

        if values.len() != expected {
            return Err(Error::read_error(format!(
                "variable '{}' returned {} values, expected {}",
                name,
                values.len(),
                expected
            )));
        }

        out.copy_from_slice(&values);
        Ok(())
    }
}

//! In-memory storage backend.

use indexmap::IndexMap;

use super::{Dimension, Storage};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct MemoryVariable {
    dims: Vec<Dimension>,
    values: Vec<f64>,
}

/// A SOFA container held entirely in memory.
///
/// Useful for tests and for callers that assemble SOFA content themselves.
/// Unlike a netCDF file, each variable carries its own dimension sizes, so
/// an inconsistent file (two variables disagreeing on `R`) can be expressed
/// and then rejected by validation.
///
/// # Example
///
/// ```
/// use sofa_rs::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new()
///     .with_attribute("Conventions", "SOFA")
///     .with_variable("EmitterPosition", &[("E", 2), ("C", 3)], vec![0.0; 6])
///     .with_variable_attribute("EmitterPosition", "Type", "cartesian");
///
/// assert_eq!(storage.global_attribute("Conventions")?, "SOFA");
/// assert_eq!(storage.variable_dimensions("EmitterPosition")?.len(), 2);
/// # Ok::<(), sofa_rs::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    attributes: IndexMap<String, String>,
    dimensions: IndexMap<String, usize>,
    variables: IndexMap<String, MemoryVariable>,
    variable_attributes: IndexMap<(String, String), String>,
}

impl MemoryStorage {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a global attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Define a file-level dimension.
    pub fn with_dimension(mut self, name: impl Into<String>, len: usize) -> Self {
        self.dimensions.insert(name.into(), len);
        self
    }

    /// Add a variable with its declared dimensions and row-major values.
    ///
    /// Dimensions not yet defined at file level are defined with the size
    /// given here.
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        dims: &[(&str, usize)],
        values: Vec<f64>,
    ) -> Self {
        let dims: Vec<Dimension> = dims
            .iter()
            .map(|&(dim, len)| Dimension::new(dim, len))
            .collect();

        for dim in &dims {
            self.dimensions.entry(dim.name.clone()).or_insert(dim.len);
        }

        self.variables
            .insert(name.into(), MemoryVariable { dims, values });
        self
    }

    /// Attach an attribute to a variable.
    pub fn with_variable_attribute(
        mut self,
        variable: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.variable_attributes
            .insert((variable.into(), attribute.into()), value.into());
        self
    }

    /// Remove a global attribute, if present.
    pub fn without_attribute(mut self, name: &str) -> Self {
        self.attributes.shift_remove(name);
        self
    }

    /// Remove a variable and its attributes, if present.
    pub fn without_variable(mut self, name: &str) -> Self {
        self.variables.shift_remove(name);
        self.variable_attributes.retain(|(var, _), _| var != name);
        self
    }

    fn variable(&self, name: &str) -> Result<&MemoryVariable> {
        self.variables
            .get(name)
            .ok_or_else(|| Error::variable_not_found(name))
    }
}

impl Storage for MemoryStorage {
    fn global_attribute_names(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }

    fn global_attribute(&self, name: &str) -> Result<String> {
        self.attributes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::attribute_not_found(name))
    }

    fn dimensions(&self) -> Vec<Dimension> {
        self.dimensions
            .iter()
            .map(|(name, &len)| Dimension::new(name.clone(), len))
            .collect()
    }

    fn variable_names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }

    fn variable_dimensions(&self, name: &str) -> Result<Vec<Dimension>> {
        Ok(self.variable(name)?.dims.clone())
    }

    fn variable_attribute(&self, variable: &str, attribute: &str) -> Result<String> {
        self.variable(variable)?;
        self.variable_attributes
            .get(&(variable.to_string(), attribute.to_string()))
            .cloned()
            .ok_or_else(|| Error::attribute_not_found(format!("{variable}:{attribute}")))
    }

    fn read_variable(&self, name: &str, out: &mut [f64]) -> Result<()> {
        let var = self.variable(name)?;
        let shape: Vec<usize> = var.dims.iter().map(|d| d.len).collect();
        let expected: usize = shape.iter().product();

        if out.len() != expected {
            return Err(Error::shape_mismatch(name, shape, vec![out.len()]));
        }
        if var.values.len() != expected {
            return Err(Error::read_error(format!(
                "variable '{}' holds {} values but declares {:?}",
                name,
                var.values.len(),
                shape
            )));
        }

        out.copy_from_slice(&var.values);
        Ok(())
    }
}

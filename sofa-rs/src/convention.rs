//! Convention identity and dimension-consistency checks.
//!
//! A SOFA convention is a named, versioned contract. [`ConventionValidator`]
//! holds the one comparison every convention model uses: identity through
//! global attributes, and agreement of every variable on the governing
//! dimensions the convention depends on.
//!
//! Opening a file of another convention is expected, so the `is_*` checks
//! return `bool`; the `verify`/`check_*` variants say why.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::file::SofaFile;

/// A `(major, minor)` convention version such as `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConventionVersion {
    /// Major number.
    pub major: u32,
    /// Minor number.
    pub minor: u32,
}

impl ConventionVersion {
    /// Create a version.
    pub const fn new(major: u32, minor: u32) -> Self {
        ConventionVersion { major, minor }
    }

    /// Whether a file declaring `found` satisfies this expected version.
    ///
    /// Exact match. This is the only place compatibility is decided.
    pub fn accepts(&self, found: &ConventionVersion) -> bool {
        self == found
    }
}

impl FromStr for ConventionVersion {
    type Err = Error;

    /// Parse `"1.0"`, `"2"` (minor 0) or `" 1.2 "`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid_attribute("SOFAConventionsVersion", s);
        let trimmed = s.trim();
        let (major, minor) = match trimmed.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (trimmed, "0"),
        };

        Ok(ConventionVersion {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for ConventionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// One variable disagreeing on a governing dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionConflict {
    /// Dimension name.
    pub dimension: String,
    /// Offending variable.
    pub variable: String,
    /// Governing size.
    pub expected: usize,
    /// Size the variable declares.
    pub found: usize,
}

impl From<DimensionConflict> for Error {
    fn from(c: DimensionConflict) -> Self {
        Error::DimensionMismatch {
            dimension: c.dimension,
            variable: c.variable,
            expected: c.expected,
            found: c.found,
        }
    }
}

impl fmt::Display for DimensionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: dimension {} is {}, expected {}",
            self.variable, self.dimension, self.found, self.expected
        )
    }
}

/// Identity and structure checks for one named convention.
///
/// # Example
///
/// ```
/// use sofa_rs::{ConventionValidator, ConventionVersion, MemoryStorage, SofaFile};
///
/// let validator = ConventionValidator::new("FreeFieldDirectivityTF", ConventionVersion::new(1, 0));
///
/// let file = SofaFile::from_storage(
///     MemoryStorage::new()
///         .with_attribute("SOFAConventions", "FreeFieldDirectivityTF")
///         .with_attribute("SOFAConventionsVersion", "2.0"),
/// );
/// assert!(!validator.is_valid_for(&file));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionValidator {
    name: &'static str,
    version: ConventionVersion,
    data_type: Option<&'static str>,
    room_type: Option<&'static str>,
}

impl ConventionValidator {
    /// Expect `SOFAConventions == name` and `SOFAConventionsVersion == version`.
    pub const fn new(name: &'static str, version: ConventionVersion) -> Self {
        ConventionValidator {
            name,
            version,
            data_type: None,
            room_type: None,
        }
    }

    /// Additionally require the `DataType` attribute.
    pub const fn data_type(mut self, data_type: &'static str) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Additionally require the `RoomType` attribute.
    pub const fn room_type(mut self, room_type: &'static str) -> Self {
        self.room_type = Some(room_type);
        self
    }

    /// Convention name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Expected version.
    pub const fn version(&self) -> ConventionVersion {
        self.version
    }

    /// True if the file identifies itself as this convention.
    pub fn is_valid_for(&self, file: &SofaFile) -> bool {
        match self.verify(file) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("not a valid '{}' file: {e}", self.name);
                false
            }
        }
    }

    /// Compare the identifying global attributes.
    ///
    /// # Errors
    ///
    /// [`Error::ConventionMismatch`] naming the first differing attribute,
    /// or [`Error::NotFound`] if one is missing.
    pub fn verify(&self, file: &SofaFile) -> Result<()> {
        let found = file.sofa_conventions()?;
        if found != self.name {
            return Err(Error::convention_mismatch("SOFAConventions", self.name, found));
        }

        let raw = file.attribute("SOFAConventionsVersion")?;
        let version: ConventionVersion = raw.parse()?;
        if !self.version.accepts(&version) {
            return Err(Error::convention_mismatch(
                "SOFAConventionsVersion",
                self.version.to_string(),
                raw,
            ));
        }

        for (attribute, expected) in [("DataType", self.data_type), ("RoomType", self.room_type)] {
            if let Some(expected) = expected {
                let found = file.attribute(attribute)?;
                if found != expected {
                    return Err(Error::convention_mismatch(attribute, expected, found));
                }
            }
        }

        Ok(())
    }

    /// Every variable declaring one of the named dimensions, paired with
    /// the size it declares.
    fn references(file: &SofaFile, names: &[&str]) -> Vec<(String, String, usize)> {
        let mut refs = Vec::new();
        for variable in file.variable_names() {
            let dims = match file.variable_dimensions(&variable) {
                Ok(dims) => dims,
                Err(e) => {
                    log::warn!("cannot read dimensions of '{variable}': {e}");
                    continue;
                }
            };
            for dim in dims {
                if names.contains(&dim.name.as_str()) {
                    refs.push((dim.name, variable.clone(), dim.len));
                }
            }
        }
        refs
    }

    /// All variables whose declared size for a governing dimension differs
    /// from the expected one.
    pub fn dimension_conflicts(file: &SofaFile, expected: &[(&str, usize)]) -> Vec<DimensionConflict> {
        let names: Vec<&str> = expected.iter().map(|&(name, _)| name).collect();

        Self::references(file, &names)
            .into_iter()
            .filter_map(|(dimension, variable, found)| {
                let governing = expected
                    .iter()
                    .find(|&&(name, _)| name == dimension)
                    .map(|&(_, len)| len)?;
                (governing != found).then_some(DimensionConflict {
                    dimension,
                    variable,
                    expected: governing,
                    found,
                })
            })
            .collect()
    }

    /// Check that every variable agrees with the governing sizes.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] for the first conflicting variable; all
    /// conflicts are logged at debug level.
    pub fn check_dimensions(file: &SofaFile, expected: &[(&str, usize)]) -> Result<()> {
        let conflicts = Self::dimension_conflicts(file, expected);
        for conflict in &conflicts {
            log::debug!("{conflict}");
        }
        match conflicts.into_iter().next() {
            Some(conflict) => Err(conflict.into()),
            None => Ok(()),
        }
    }

    /// Sizes of the named dimensions as agreed on by every variable that
    /// references them.
    ///
    /// Dimensions no variable references are omitted.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] naming the first variable that disagrees
    /// with an earlier one.
    pub fn consistent_sizes(file: &SofaFile, names: &[&str]) -> Result<Vec<(String, usize)>> {
        let mut sizes: IndexMap<String, (String, usize)> = IndexMap::new();

        for (dimension, variable, found) in Self::references(file, names) {
            match sizes.get(&dimension) {
                Some((first, expected)) if *expected != found => {
                    log::debug!("'{variable}' disagrees with '{first}' on {dimension}");
                    return Err(Error::DimensionMismatch {
                        dimension,
                        variable,
                        expected: *expected,
                        found,
                    });
                }
                Some(_) => {}
                None => {
                    sizes.insert(dimension, (variable, found));
                }
            }
        }

        Ok(sizes
            .into_iter()
            .map(|(dimension, (_, len))| (dimension, len))
            .collect())
    }
}

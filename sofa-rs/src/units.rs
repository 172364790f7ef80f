//! Coordinate-system and unit tags.
//!
//! AES69 attaches a `:Type` and a `:Units` attribute to every positional
//! variable, and a `:Units` attribute to frequency variables. Both are purely
//! descriptive; they never change how an array is laid out.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Coordinate system of a positional variable (`<Var>:Type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSystem {
    /// x, y, z
    Cartesian,
    /// azimuth, elevation, radius
    Spherical,
    /// Spherical harmonic coefficients.
    SphericalHarmonics,
}

impl CoordinateSystem {
    /// Parse an attribute value, case-insensitively.
    ///
    /// Returns `None` for anything outside the AES69 vocabulary.
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cartesian" => Some(CoordinateSystem::Cartesian),
            "spherical" => Some(CoordinateSystem::Spherical),
            "spherical harmonics" => Some(CoordinateSystem::SphericalHarmonics),
            _ => None,
        }
    }

    /// Canonical AES69 name.
    pub const fn name(&self) -> &'static str {
        match self {
            CoordinateSystem::Cartesian => "cartesian",
            CoordinateSystem::Spherical => "spherical",
            CoordinateSystem::SphericalHarmonics => "spherical harmonics",
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordinateSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::invalid_attribute("Type", s))
    }
}

/// Physical unit of a variable (`<Var>:Units`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// metre
    Metre,
    /// cubic metre
    CubicMetre,
    /// degree
    Degree,
    /// hertz
    Hertz,
    /// second
    Second,
    /// samples per second
    SamplesPerSecond,
    /// kelvin
    Kelvin,
    /// `degree, degree, metre`, the per-axis units of spherical positions.
    SphericalUnits,
}

impl Unit {
    /// Parse an attribute value.
    ///
    /// Matching ignores case and accepts American spellings and plurals
    /// (`meter`, `metres`, `degrees`), as files in the wild use all of them.
    pub fn from_name(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();

        if value.contains(',') {
            let parts: Vec<_> = value.split(',').map(str::trim).collect();
            return match parts.as_slice() {
                [a, e, r]
                    if Self::single(a) == Some(Unit::Degree)
                        && Self::single(e) == Some(Unit::Degree)
                        && Self::single(r) == Some(Unit::Metre) =>
                {
                    Some(Unit::SphericalUnits)
                }
                _ => None,
            };
        }

        Self::single(&value)
    }

    fn single(value: &str) -> Option<Self> {
        match value {
            "metre" | "meter" | "metres" | "meters" => Some(Unit::Metre),
            "cubic metre" | "cubic meter" | "cubic metres" | "cubic meters" => {
                Some(Unit::CubicMetre)
            }
            "degree" | "degrees" => Some(Unit::Degree),
            "hertz" => Some(Unit::Hertz),
            "second" | "seconds" | "s" => Some(Unit::Second),
            "samples per second" => Some(Unit::SamplesPerSecond),
            "kelvin" => Some(Unit::Kelvin),
            _ => None,
        }
    }

    /// Canonical AES69 name.
    pub const fn name(&self) -> &'static str {
        match self {
            Unit::Metre => "metre",
            Unit::CubicMetre => "cubic metre",
            Unit::Degree => "degree",
            Unit::Hertz => "hertz",
            Unit::Second => "second",
            Unit::SamplesPerSecond => "samples per second",
            Unit::Kelvin => "kelvin",
            Unit::SphericalUnits => "degree, degree, metre",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::invalid_attribute("Units", s))
    }
}

//! The FreeFieldDirectivityTF convention.
//!
//! Directivity of a source measured in the free field, stored as complex
//! transfer functions. Four governing dimensions shape every array:
//!
//! | Dimension | Meaning | Anchor |
//! |-----------|---------|--------|
//! | `R` | receivers | `ReceiverPosition` axis 0 |
//! | `E` | emitters | `EmitterPosition` axis 0 |
//! | `M` | measurements | `Data.Real` axis 0 |
//! | `N` | frequency samples | `N` axis 0 |
//!
//! `Data.Real` and `Data.Imag` are `[M][R][N]`.

use std::cell::OnceCell;
#[cfg(feature = "netcdf")]
use std::path::Path;

use crate::convention::{ConventionValidator, ConventionVersion};
use crate::error::{Error, Result};
use crate::file::SofaFile;
use crate::storage::Storage;
#[cfg(feature = "netcdf")]
use crate::storage::OpenMode;
use crate::units::Unit;
use crate::variable::FlatBuffer;

/// Frequency axis variable.
pub const FREQUENCY_VARIABLE: &str = "N";
/// Real part of the transfer functions.
pub const DATA_REAL: &str = "Data.Real";
/// Imaginary part of the transfer functions.
pub const DATA_IMAG: &str = "Data.Imag";

const RECEIVER_ANCHOR: &str = "ReceiverPosition";
const EMITTER_ANCHOR: &str = "EmitterPosition";

/// Declared axes of `Data.Real` and `Data.Imag`.
const DATA_AXES: [&str; 3] = ["M", "R", "N"];

/// The four sizes every array in a FreeFieldDirectivityTF file agrees on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoverningDimensions {
    /// Receivers.
    pub r: usize,
    /// Emitters.
    pub e: usize,
    /// Measurements.
    pub m: usize,
    /// Frequency samples.
    pub n: usize,
}

impl GoverningDimensions {
    /// Shape of `Data.Real` / `Data.Imag`.
    pub fn data_shape(&self) -> [usize; 3] {
        [self.m, self.r, self.n]
    }

    /// `(name, size)` pairs for consistency checks.
    pub fn named(&self) -> [(&'static str, usize); 4] {
        [("R", self.r), ("E", self.e), ("M", self.m), ("N", self.n)]
    }
}

/// A SOFA file following FreeFieldDirectivityTF 1.0.
///
/// Governing dimensions are derived on first use and cached; later calls do
/// not touch the storage. The cache is not synchronised, so share a
/// `FreeFieldDirectivityTF` between threads only by opening one per thread.
///
/// # Example
///
/// ```no_run
/// # #[cfg(feature = "netcdf")]
/// # fn main() -> sofa_rs::Result<()> {
/// use sofa_rs::{FreeFieldDirectivityTF, OpenMode};
///
/// let tf = FreeFieldDirectivityTF::open("speaker.sofa", OpenMode::Read)?;
/// if tf.is_valid() {
///     let dims = tf.governing_dimensions()?;
///     let real = tf.data_real()?;
///     println!("{} x {} x {}: {}", dims.m, dims.r, dims.n, real.get(&[0, 0, 0]));
/// }
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "netcdf"))]
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct FreeFieldDirectivityTF {
    file: SofaFile,
    dims: OnceCell<GoverningDimensions>,
}

impl FreeFieldDirectivityTF {
    /// Convention name.
    pub const NAME: &'static str = "FreeFieldDirectivityTF";

    /// Supported convention version.
    pub const VERSION: ConventionVersion = ConventionVersion::new(1, 0);

    /// Identity checks for this convention.
    pub const VALIDATOR: ConventionValidator = ConventionValidator::new(Self::NAME, Self::VERSION)
        .data_type("TF")
        .room_type("free field");

    /// Open a file on disk.
    #[cfg(feature = "netcdf")]
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        Ok(Self::from_file(SofaFile::open(path, mode)?))
    }

    /// Wrap a generic file.
    pub fn from_file(file: SofaFile) -> Self {
        FreeFieldDirectivityTF {
            file,
            dims: OnceCell::new(),
        }
    }

    /// Wrap a storage backend.
    pub fn from_storage(storage: impl Storage + 'static) -> Self {
        Self::from_file(SofaFile::from_storage(storage))
    }

    /// The generic view of the file.
    pub fn file(&self) -> &SofaFile {
        &self.file
    }

    /// Release the convention view, keeping the file.
    pub fn into_file(self) -> SofaFile {
        self.file
    }

    /// Generic validity, convention identity, required variables and
    /// dimension consistency. Never fails; see [`validate`](Self::validate).
    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("not a valid '{}' file: {e}", Self::NAME);
                false
            }
        }
    }

    /// Like [`is_valid`](Self::is_valid) but reports the first problem.
    pub fn validate(&self) -> Result<()> {
        self.file.validate()?;
        Self::VALIDATOR.verify(&self.file)?;

        for name in [FREQUENCY_VARIABLE, DATA_REAL, DATA_IMAG] {
            if !self.file.has_variable(name) {
                return Err(Error::validation(format!("missing variable '{name}'")));
            }
        }

        for name in [DATA_REAL, DATA_IMAG] {
            self.check_axes(name, &DATA_AXES, true)?;
        }
        self.check_axes(FREQUENCY_VARIABLE, &[FREQUENCY_VARIABLE], true)?;
        self.check_axes(RECEIVER_ANCHOR, &["R"], false)?;
        self.check_axes(EMITTER_ANCHOR, &["E"], false)?;

        self.governing_dimensions()?;
        Ok(())
    }

    /// Require `name` to be declared over `expected` axes, or to start with
    /// them when `exact` is false.
    fn check_axes(&self, name: &str, expected: &[&str], exact: bool) -> Result<()> {
        let dims = self.file.variable_dimensions(name)?;
        if exact && dims.len() != expected.len() {
            return Err(Error::InvalidRank {
                name: name.to_string(),
                rank: dims.len(),
            });
        }

        let declared: Vec<&str> = dims.iter().map(|d| d.name.as_str()).collect();
        if !declared.starts_with(expected) {
            return Err(Error::validation(format!(
                "'{}' must be declared over [{}], found [{}]",
                name,
                expected.join("]["),
                declared.join("][")
            )));
        }
        Ok(())
    }

    /// R, E, M and N, derived from their anchor variables and checked
    /// against every variable that references them.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if an anchor is missing,
    /// [`Error::DimensionMismatch`] if any variable disagrees.
    pub fn governing_dimensions(&self) -> Result<GoverningDimensions> {
        if let Some(dims) = self.dims.get() {
            return Ok(*dims);
        }

        let dims = self.derive_dimensions()?;
        log::debug!(
            "governing dimensions R={} E={} M={} N={}",
            dims.r,
            dims.e,
            dims.m,
            dims.n
        );
        Ok(*self.dims.get_or_init(|| dims))
    }

    fn derive_dimensions(&self) -> Result<GoverningDimensions> {
        let dims = GoverningDimensions {
            r: self.anchor(RECEIVER_ANCHOR)?,
            e: self.anchor(EMITTER_ANCHOR)?,
            m: self.anchor(DATA_REAL)?,
            n: self.anchor(FREQUENCY_VARIABLE)?,
        };

        ConventionValidator::check_dimensions(&self.file, &dims.named())?;
        Ok(dims)
    }

    fn anchor(&self, name: &str) -> Result<usize> {
        self.file
            .variable_shape(name)?
            .first()
            .copied()
            .ok_or_else(|| Error::InvalidRank {
                name: name.to_string(),
                rank: 0,
            })
    }

    /// Number of receivers (R).
    pub fn num_receivers(&self) -> Result<usize> {
        Ok(self.governing_dimensions()?.r)
    }

    /// Number of emitters (E).
    pub fn num_emitters(&self) -> Result<usize> {
        Ok(self.governing_dimensions()?.e)
    }

    /// Number of measurements (M).
    pub fn num_measurements(&self) -> Result<usize> {
        Ok(self.governing_dimensions()?.m)
    }

    /// Number of frequency samples (N).
    pub fn num_data_samples(&self) -> Result<usize> {
        Ok(self.governing_dimensions()?.n)
    }

    /// The N frequency values, in file order. No ordering is assumed.
    pub fn frequency_values(&self) -> Result<Vec<f64>> {
        let n = self.num_data_samples()?;
        let mut values = vec![0.0; n];
        self.file.variable_data_into(FREQUENCY_VARIABLE, &mut values)?;
        Ok(values)
    }

    /// Unit of the frequency axis (`N:Units`), normally hertz.
    pub fn frequency_units(&self) -> Result<Unit> {
        self.file.variable_units(FREQUENCY_VARIABLE)
    }

    /// Descriptive name of the frequency axis (`N:LongName`), if present.
    pub fn frequency_long_name(&self) -> Option<String> {
        self.file
            .variable_attribute(FREQUENCY_VARIABLE, "LongName")
            .ok()
    }

    /// Real parts, `[M][R][N]`.
    pub fn data_real(&self) -> Result<FlatBuffer> {
        self.data(DATA_REAL)
    }

    /// Imaginary parts, `[M][R][N]`.
    pub fn data_imag(&self) -> Result<FlatBuffer> {
        self.data(DATA_IMAG)
    }

    /// Fill a caller-sized buffer with the real parts.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] unless `out.len() == M * R * N`.
    pub fn data_real_into(&self, out: &mut [f64]) -> Result<()> {
        self.data_into(DATA_REAL, out)
    }

    /// Fill a caller-sized buffer with the imaginary parts.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] unless `out.len() == M * R * N`.
    pub fn data_imag_into(&self, out: &mut [f64]) -> Result<()> {
        self.data_into(DATA_IMAG, out)
    }

    fn data(&self, name: &str) -> Result<FlatBuffer> {
        let shape = self.governing_dimensions()?.data_shape();
        let mut values = vec![0.0; shape.iter().product()];
        self.data_into(name, &mut values)?;
        FlatBuffer::new(name, shape.to_vec(), values)
    }

    fn data_into(&self, name: &str, out: &mut [f64]) -> Result<()> {
        let shape = self.governing_dimensions()?.data_shape();
        let expected: usize = shape.iter().product();
        if out.len() != expected {
            return Err(Error::shape_mismatch(name, shape, vec![out.len()]));
        }
        self.file.variable_data_into(name, out)
    }
}

//! # sofa-rs
//!
//! Variable access and convention validation for AES69 SOFA files
//! (Spatially Oriented Format for Acoustics).
//!
//! A SOFA file stores named variables, each a dense array with declared
//! dimensions, plus a coordinate-system and unit tag per positional variable
//! and global attributes naming the convention the file follows. This crate
//! reads that data model; it does not process the acoustic data.
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "netcdf")]
//! # fn main() -> sofa_rs::Result<()> {
//! use sofa_rs::{FreeFieldDirectivityTF, OpenMode, SofaFile};
//!
//! let file = SofaFile::open("speaker.sofa", OpenMode::Read)?;
//! if !file.is_valid() {
//!     return Ok(());
//! }
//!
//! for (name, value) in file.attributes() {
//!     println!("{name} = {value}");
//! }
//!
//! let receivers = file.positional_data("ReceiverPosition")?;
//! println!("{} receivers ({})", receivers.shape.entities(), receivers.variable.units);
//!
//! let tf = FreeFieldDirectivityTF::from_file(file);
//! if tf.is_valid() {
//!     let freqs = tf.frequency_values()?;
//!     let real = tf.data_real()?;
//!     println!("{} bins, first value {}", freqs.len(), real.get(&[0, 0, 0]));
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "netcdf"))]
//! # fn main() {}
//! ```
//!
//! ## Layout
//!
//! Every array is returned flattened in row-major order together with its
//! shape. [`index_2d`] and [`index_3d`] are the only offset formulas; use
//! them (or [`Shape::offset`]) instead of computing offsets by hand.
//!
//! ## Feature Flags
//!
//! - `netcdf`: read SOFA files from disk through libnetcdf
//!
//! ## Thread Safety
//!
//! File models cache derived sizes without synchronisation and are not
//! `Sync`. Open one file model per thread.

#![deny(missing_docs)]

mod convention;
mod directivity;
mod error;
mod file;
mod index;
mod storage;
mod units;
mod variable;

pub use convention::{ConventionValidator, ConventionVersion, DimensionConflict};
pub use directivity::{
    FreeFieldDirectivityTF, GoverningDimensions, DATA_IMAG, DATA_REAL, FREQUENCY_VARIABLE,
};
pub use error::{Error, Result};
pub use file::{
    SofaFile, POSITIONAL_VARIABLES, REQUIRED_ATTRIBUTES, REQUIRED_DIMENSIONS, REQUIRED_POSITIONS,
};
pub use index::{index_2d, index_3d, Indices, Shape};
#[cfg(feature = "netcdf")]
pub use storage::NetcdfStorage;
pub use storage::{Dimension, MemoryStorage, OpenMode, Storage};
pub use units::{CoordinateSystem, Unit};
pub use variable::{FlatBuffer, PositionalData, PositionalVariable, VariableDescriptor};

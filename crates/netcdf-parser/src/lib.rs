//! NetCDF parser for GRACE mascon grids.
//!
//! Reads the monthly liquid-water-equivalent (LWE) thickness product
//! (`lat`, `lon`, `time`, `lwe_thickness`) into an in-memory [`LweDataset`].
//!
//! # Data Layout
//!
//! The data variable is stored `(time, lat, lon)`. Frames are kept in file
//! order; GRACE files store latitude ascending, so use
//! [`LweDataset::north_up_frame`] when a north-up array is needed.

pub mod error;
pub mod grace;

pub use error::{NetCdfError, NetCdfResult};
pub use grace::{read_grace, read_grace_axes, read_grace_variable, silence_hdf5_errors, LweDataset, DEFAULT_VARIABLE};

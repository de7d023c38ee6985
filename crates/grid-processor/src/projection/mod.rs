//! Interpolation kernels and affine-grid reprojection.

pub mod interpolation;
pub mod reproject;

pub use interpolation::{bilinear_interpolate, cubic_interpolate, nearest_interpolate, GridView};

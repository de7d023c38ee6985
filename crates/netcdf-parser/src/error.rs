use thiserror::Error;

pub type NetCdfResult<T> = Result<T, NetCdfError>;

#[derive(Error, Debug)]
pub enum NetCdfError {
    #[error("cannot read file: {0}")]
    IoError(#[from] std::io::Error),

    /// A variable, coordinate or attribute the GRACE layout requires.
    #[error("GRACE file lacks {0}")]
    MissingData(String),

    #[error("unreadable NetCDF: {0}")]
    InvalidFormat(String),

    /// `(time, lat, lon)` of the variable against the coordinate lengths.
    #[error("variable shape {actual:?} does not match axes {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error(transparent)]
    Geo(#[from] geo_common::GeoError),
}

impl From<netcdf::Error> for NetCdfError {
    fn from(err: netcdf::Error) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

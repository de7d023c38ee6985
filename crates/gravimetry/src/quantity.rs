//! Which field a GRACE plot shows.

use serde::{Deserialize, Serialize};

use crate::gravity_anomaly_field;

/// A plotted quantity: raw LWE thickness or the derived gravity anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    #[default]
    Lwe,
    Gravity,
}

impl Quantity {
    pub fn units(&self) -> &'static str {
        match self {
            Quantity::Lwe => "cm",
            Quantity::Gravity => "mGal",
        }
    }

    /// Plot title used by the explorer.
    pub fn title(&self) -> &'static str {
        match self {
            Quantity::Lwe => "Liquid Water Equivalent Thickness (cm)",
            Quantity::Gravity => "Gravity Anomaly from LWE (mGal)",
        }
    }

    /// Color bar label.
    pub fn colorbar_label(&self) -> &'static str {
        match self {
            Quantity::Lwe => "LWE (cm)",
            Quantity::Gravity => "Δg (mGal)",
        }
    }

    /// Short upper-case tag used in animation frame titles.
    pub fn tag(&self) -> &'static str {
        match self {
            Quantity::Lwe => "LWE",
            Quantity::Gravity => "GRAVITY",
        }
    }

    /// Default color style for the quantity.
    pub fn default_style(&self) -> &'static str {
        match self {
            Quantity::Lwe => "RdBu",
            Quantity::Gravity => "PuOr",
        }
    }

    /// Map an LWE frame (cm) to this quantity.
    pub fn derive(&self, lwe_cm: &[f32]) -> Vec<f32> {
        match self {
            Quantity::Lwe => lwe_cm.to_vec(),
            Quantity::Gravity => gravity_anomaly_field(lwe_cm),
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Lwe => write!(f, "lwe"),
            Quantity::Gravity => write!(f, "gravity"),
        }
    }
}

impl std::str::FromStr for Quantity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lwe" => Ok(Quantity::Lwe),
            "gravity" | "grav" => Ok(Quantity::Gravity),
            other => Err(format!("unknown quantity '{}', expected lwe or gravity", other)),
        }
    }
}

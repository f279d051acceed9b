//! Trailer model and conversion errors.

use thiserror::Error;

use crate::conf::N_LEN_TRAILER_STANDARD_M;

/// Trailer loading area used for utilization planning.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecTrailer {
    /// Usable loading length in meters.
    pub len_loading_m: f64,
    /// Gross payload limit in metric tons.
    pub payload_max_t: f64,
}

impl Default for SpecTrailer {
    fn default() -> Self {
        Self {
            len_loading_m: N_LEN_TRAILER_STANDARD_M,
            payload_max_t: 24.0,
        }
    }
}

/// Share of a trailer's floor and payload taken by one shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecTrailerUtilization {
    /// Required loading meters.
    pub loading_meters: f64,
    /// Required loading meters / trailer loading length.
    pub ratio_floor: f64,
    /// Shipment weight / trailer payload limit.
    pub ratio_payload: f64,
}

impl SpecTrailerUtilization {
    /// Whether the shipment fits on one trailer by floor and by weight.
    pub fn if_fits(&self) -> bool {
        self.ratio_floor <= 1.0 && self.ratio_payload <= 1.0
    }
}

/// Invalid conversion input.
#[derive(Debug, Error, PartialEq)]
pub enum UnitConversionError {
    /// Input must be finite and `>= 0`.
    #[error("{name} must be a finite value >= 0, got {value}")]
    InvalidQuantity {
        /// Argument name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Trailer length and payload must be positive.
    #[error("trailer {name} must be > 0, got {value}")]
    InvalidTrailer {
        /// Trailer field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

//! `logikit_units` v1:
//! Logistics unit conversions.
//!
//! Module layout:
//! - `conf`    : trailer/pallet constants
//! - `spec`    : trailer model and errors
//! - `convert` : conversion functions

pub mod conf;
pub mod convert;
pub mod spec;

pub use conf::{
    N_KG_PER_METRIC_TON, N_LDM_PER_EURO_PALLET, N_LEN_TRAILER_STANDARD_M, N_STACK_FACTOR_DOUBLE,
};
pub use convert::{
    calculate_trailer_utilization, kg_to_metric_tons, loading_meters_to_pallets,
    pallets_to_loading_meters,
};
pub use spec::{SpecTrailer, SpecTrailerUtilization, UnitConversionError};

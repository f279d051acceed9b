//! Pallet and trailer constants.

/// Loading meters per non-stacked Euro pallet (0.8 m x 1.2 m).
///
/// Two pallets stand side by side across a 2.4 m trailer, each 0.8 m long
/// in driving direction: 0.8 / 2 = 0.4.
pub const N_LDM_PER_EURO_PALLET: f64 = 0.4;
/// Pallets per floor slot when goods can be double stacked.
pub const N_STACK_FACTOR_DOUBLE: f64 = 2.0;
/// Loading length of a standard semi-trailer in meters.
pub const N_LEN_TRAILER_STANDARD_M: f64 = 13.6;
/// Kilograms per metric ton.
pub const N_KG_PER_METRIC_TON: f64 = 1000.0;

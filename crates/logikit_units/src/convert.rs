//! Loading-meter and weight conversions.

use crate::conf::{N_KG_PER_METRIC_TON, N_LDM_PER_EURO_PALLET, N_STACK_FACTOR_DOUBLE};
use crate::spec::{SpecTrailer, SpecTrailerUtilization, UnitConversionError};

/// Tolerance applied before flooring so `13.6 / 0.4` lands on 34, not 33.
const N_EPS_FLOOR: f64 = 1e-9;

/// Required loading meters for `pallets` Euro pallets on a standard trailer.
///
/// Stackable goods take half the floor. The result is rounded to 2 decimals.
///
/// ```
/// use logikit_units::pallets_to_loading_meters;
///
/// assert_eq!(pallets_to_loading_meters(10, false), 4.0);
/// assert_eq!(pallets_to_loading_meters(10, true), 2.0);
/// ```
pub fn pallets_to_loading_meters(pallets: u32, if_stackable: bool) -> f64 {
    let mut n_slots = f64::from(pallets);
    if if_stackable {
        n_slots /= N_STACK_FACTOR_DOUBLE;
    }
    round_to_cents(n_slots * N_LDM_PER_EURO_PALLET)
}

/// Kilograms to metric tons.
pub fn kg_to_metric_tons(kg: f64) -> f64 {
    kg / N_KG_PER_METRIC_TON
}

/// Maximum number of Euro pallets that fit into `loading_meters`.
pub fn loading_meters_to_pallets(
    loading_meters: f64,
    if_stackable: bool,
) -> Result<u32, UnitConversionError> {
    validate_quantity("loading_meters", loading_meters)?;

    let n_slots = (loading_meters / N_LDM_PER_EURO_PALLET + N_EPS_FLOOR).floor();
    let n_pallets = if if_stackable {
        n_slots * N_STACK_FACTOR_DOUBLE
    } else {
        n_slots
    };
    Ok(n_pallets.min(f64::from(u32::MAX)) as u32)
}

/// Floor and payload share of `trailer` taken by a shipment.
pub fn calculate_trailer_utilization(
    pallets: u32,
    if_stackable: bool,
    weight_kg: f64,
    trailer: &SpecTrailer,
) -> Result<SpecTrailerUtilization, UnitConversionError> {
    validate_quantity("weight_kg", weight_kg)?;
    if !(trailer.len_loading_m.is_finite() && trailer.len_loading_m > 0.0) {
        return Err(UnitConversionError::InvalidTrailer {
            name: "len_loading_m",
            value: trailer.len_loading_m,
        });
    }
    if !(trailer.payload_max_t.is_finite() && trailer.payload_max_t > 0.0) {
        return Err(UnitConversionError::InvalidTrailer {
            name: "payload_max_t",
            value: trailer.payload_max_t,
        });
    }

    let loading_meters = pallets_to_loading_meters(pallets, if_stackable);
    Ok(SpecTrailerUtilization {
        loading_meters,
        ratio_floor: loading_meters / trailer.len_loading_m,
        ratio_payload: kg_to_metric_tons(weight_kg) / trailer.payload_max_t,
    })
}

fn validate_quantity(name: &'static str, value: f64) -> Result<(), UnitConversionError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(UnitConversionError::InvalidQuantity { name, value })
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pallets_to_loading_meters_matches_reference_values() {
        assert_eq!(pallets_to_loading_meters(10, false), 4.0);
        assert_eq!(pallets_to_loading_meters(10, true), 2.0);
        assert_eq!(pallets_to_loading_meters(0, false), 0.0);
        assert_eq!(pallets_to_loading_meters(11, true), 2.2);
        assert_eq!(pallets_to_loading_meters(34, false), 13.6);
    }

    #[test]
    fn kg_to_metric_tons_divides_by_thousand() {
        assert_eq!(kg_to_metric_tons(2500.0), 2.5);
        assert_eq!(kg_to_metric_tons(0.0), 0.0);
    }

    #[test]
    fn loading_meters_to_pallets_fills_standard_trailer() {
        assert_eq!(loading_meters_to_pallets(13.6, false), Ok(34));
        assert_eq!(loading_meters_to_pallets(13.6, true), Ok(68));
        assert_eq!(loading_meters_to_pallets(0.39, false), Ok(0));
    }

    #[test]
    fn loading_meters_to_pallets_rejects_negative_and_nan() {
        assert!(matches!(
            loading_meters_to_pallets(-1.0, false),
            Err(UnitConversionError::InvalidQuantity {
                name: "loading_meters",
                ..
            })
        ));
        assert!(loading_meters_to_pallets(f64::NAN, false).is_err());
    }

    #[test]
    fn trailer_utilization_reports_floor_and_payload() {
        let trailer = SpecTrailer::default();
        let utilization =
            calculate_trailer_utilization(17, false, 12_000.0, &trailer).expect("utilization");

        assert_eq!(utilization.loading_meters, 6.8);
        assert!((utilization.ratio_floor - 0.5).abs() < 1e-12);
        assert!((utilization.ratio_payload - 0.5).abs() < 1e-12);
        assert!(utilization.if_fits());

        let overweight =
            calculate_trailer_utilization(17, false, 30_000.0, &trailer).expect("utilization");
        assert!(!overweight.if_fits());
    }

    #[test]
    fn trailer_utilization_rejects_zero_length_trailer() {
        let trailer = SpecTrailer {
            len_loading_m: 0.0,
            ..Default::default()
        };
        assert_eq!(
            calculate_trailer_utilization(1, false, 1.0, &trailer),
            Err(UnitConversionError::InvalidTrailer {
                name: "len_loading_m",
                value: 0.0,
            })
        );
    }
}

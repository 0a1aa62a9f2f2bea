//! Canonical feature ordering
//!
//! The scaler and ensemble were fit on the nine raw columns followed by the
//! four engineered columns, in exactly this order.

pub const RAW_FEATURE_COUNT: usize = 9;

/// Columns every uploaded table must carry
pub const RAW_FEATURES: [&str; RAW_FEATURE_COUNT] = [
    "koi_period",
    "koi_prad",
    "koi_sma",
    "koi_incl",
    "koi_teq",
    "koi_slogg",
    "koi_srad",
    "koi_smass",
    "koi_steff",
];

/// Columns derived from the raw ones
pub const ENGINEERED_FEATURES: [&str; 4] = ["density_star", "prad_ratio", "period_ratio", "teq_scaled"];

pub const FEATURE_COUNT: usize = RAW_FEATURE_COUNT + ENGINEERED_FEATURES.len();

/// Full feature vector ordering
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    RAW_FEATURES.iter().chain(ENGINEERED_FEATURES.iter()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names_order() {
        let names: Vec<&str> = feature_names().collect();

        assert_eq!(names.len(), FEATURE_COUNT);
        assert_eq!(names[0], "koi_period");
        assert_eq!(names[8], "koi_steff");
        assert_eq!(names[9], "density_star");
        assert_eq!(names[12], "teq_scaled");
    }
}

//! Derived feature computation

use ndarray::Array2;

use super::columns::FEATURE_COUNT;

/// Added to every denominator so degenerate inputs never divide by zero
pub const EPSILON: f64 = 1e-6;

/// One uploaded observation, restricted to the required columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRow {
    pub koi_period: f64,
    pub koi_prad: f64,
    pub koi_sma: f64,
    pub koi_incl: f64,
    pub koi_teq: f64,
    pub koi_slogg: f64,
    pub koi_srad: f64,
    pub koi_smass: f64,
    pub koi_steff: f64,
}

impl RawRow {
    /// Build a row from values in `RAW_FEATURES` order
    pub fn from_values(values: [f64; 9]) -> Self {
        let [koi_period, koi_prad, koi_sma, koi_incl, koi_teq, koi_slogg, koi_srad, koi_smass, koi_steff] =
            values;

        Self {
            koi_period,
            koi_prad,
            koi_sma,
            koi_incl,
            koi_teq,
            koi_slogg,
            koi_srad,
            koi_smass,
            koi_steff,
        }
    }

    pub fn values(&self) -> [f64; 9] {
        [
            self.koi_period,
            self.koi_prad,
            self.koi_sma,
            self.koi_incl,
            self.koi_teq,
            self.koi_slogg,
            self.koi_srad,
            self.koi_smass,
            self.koi_steff,
        ]
    }
}

/// A raw row plus its four derived features.
///
/// Nothing is validated here: zero, negative and non-finite inputs are
/// computed through and handed to the classifier as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineeredRow {
    pub raw: RawRow,
    pub density_star: f64,
    pub prad_ratio: f64,
    pub period_ratio: f64,
    pub teq_scaled: f64,
}

impl EngineeredRow {
    pub fn derive(raw: RawRow) -> Self {
        Self {
            raw,
            density_star: raw.koi_smass / (raw.koi_srad.powi(3) + EPSILON),
            prad_ratio: raw.koi_prad / (raw.koi_srad + EPSILON),
            period_ratio: raw.koi_period / (raw.koi_sma + EPSILON),
            teq_scaled: raw.koi_teq / (raw.koi_steff + EPSILON),
        }
    }

    /// Values in `feature_names()` order
    pub fn feature_vector(&self) -> [f64; FEATURE_COUNT] {
        let raw = self.raw.values();

        [
            raw[0],
            raw[1],
            raw[2],
            raw[3],
            raw[4],
            raw[5],
            raw[6],
            raw[7],
            raw[8],
            self.density_star,
            self.prad_ratio,
            self.period_ratio,
            self.teq_scaled,
        ]
    }
}

/// Engineer every row and stack the feature vectors into an `n x 13` matrix
pub fn engineer_features(rows: &[RawRow]) -> Array2<f64> {
    let mut matrix = Array2::zeros((rows.len(), FEATURE_COUNT));

    for (mut target, raw) in matrix.rows_mut().into_iter().zip(rows) {
        let features = EngineeredRow::derive(*raw).feature_vector();
        for (cell, value) in target.iter_mut().zip(features) {
            *cell = value;
        }
    }

    matrix
}

//! Error type shared by the kernel and the batch driver.

use thiserror::Error;

use crate::radii::Bearing;

/// Why a single measurement could not be turned into a radius.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MeasurementFault {
    #[error("value is missing")]
    Missing,
    #[error("value {0:?} is not numeric")]
    NonNumeric(String),
    #[error("value is not finite")]
    NonFinite,
    #[error("value {0} is not positive")]
    NonPositive(f64),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CrownError {
    /// `bearing` is `None` when the value was checked outside of a radii set.
    #[error("invalid measurement{}: {fault}", bearing_suffix(.bearing))]
    InvalidMeasurement {
        bearing: Option<Bearing>,
        fault: MeasurementFault,
    },
    #[error("angular step {0}° must be in (0, {max}] and yield at most {cap} vertices", max = crate::ring::AngularStep::MAX, cap = crate::ring::AngularStep::MAX_VERTICES)]
    InvalidStep(f64),
    #[error("feature has no position")]
    MissingPosition,
}

fn bearing_suffix(b: &Option<Bearing>) -> String {
    b.map(|b| format!(" ({b})")).unwrap_or_default()
}

impl CrownError {
    #[inline]
    pub(crate) fn measurement(fault: MeasurementFault) -> Self {
        CrownError::InvalidMeasurement {
            bearing: None,
            fault,
        }
    }

    /// Attach a bearing to a measurement error; other variants pass through.
    pub(crate) fn at(self, b: Bearing) -> Self {
        match self {
            CrownError::InvalidMeasurement { fault, .. } => CrownError::InvalidMeasurement {
                bearing: Some(b),
                fault,
            },
            other => other,
        }
    }
}

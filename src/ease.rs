use crate::error::{ArcwiseError, ArcwiseResult};

/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
}

impl Ease {
    pub const ALL: [Ease; 13] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => t * (2.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - 8.0 * (t - 1.0).powi(4)
                }
            }
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 + (t - 1.0).powi(5),
            Self::InOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 + 16.0 * (t - 1.0).powi(5)
                }
            }
        }
    }

    /// Look up an easing by its conventional camel-case name (`"easeInOutCubic"`).
    pub fn from_name(name: &str) -> ArcwiseResult<Self> {
        match name.trim() {
            "linear" => Ok(Self::Linear),
            "easeInQuad" => Ok(Self::InQuad),
            "easeOutQuad" => Ok(Self::OutQuad),
            "easeInOutQuad" => Ok(Self::InOutQuad),
            "easeInCubic" => Ok(Self::InCubic),
            "easeOutCubic" => Ok(Self::OutCubic),
            "easeInOutCubic" => Ok(Self::InOutCubic),
            "easeInQuart" => Ok(Self::InQuart),
            "easeOutQuart" => Ok(Self::OutQuart),
            "easeInOutQuart" => Ok(Self::InOutQuart),
            "easeInQuint" => Ok(Self::InQuint),
            "easeOutQuint" => Ok(Self::OutQuint),
            "easeInOutQuint" => Ok(Self::InOutQuint),
            other => Err(ArcwiseError::validation(format!(
                "unknown easing '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_stable() {
        for ease in Ease::ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for ease in Ease::ALL {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b, "{ease:?}");
            assert!(b < c, "{ease:?}");
        }
    }

    #[test]
    fn progress_outside_unit_range_is_clamped() {
        assert_eq!(Ease::InOutCubic.apply(-1.0), 0.0);
        assert_eq!(Ease::InOutCubic.apply(2.0), 1.0);
    }

    #[test]
    fn from_name_round_trips_the_table() {
        assert_eq!(Ease::from_name("linear").unwrap(), Ease::Linear);
        assert_eq!(
            Ease::from_name("easeInOutQuint").unwrap(),
            Ease::InOutQuint
        );
        assert!(Ease::from_name("bounce").is_err());
    }
}

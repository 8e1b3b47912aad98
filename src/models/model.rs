//! The five ITRF PSD correction families.
//!
//! Each seismic event carries one model per local component, tagged in the
//! catalog with an integer in [0, 4]:
//!
//! - `0` PWL: piece-wise linear — the time-dependent part is identically zero
//! - `1` LOG: `a1 · ln(1 + Δt/t1)`
//! - `2` EXP: `a1 · (1 − e^(−Δt/t1))`
//! - `3` LOGEXP: LOG + EXP with independent parameters
//! - `4` EXPEXP: two EXP terms
//!
//! Amplitudes are millimeters, relaxation times decimal years, `Δt` the
//! fractional-year difference from the earthquake to the query epoch.
//!
//! Validation happens at construction: an unknown tag or a wrong parameter
//! count never produces a half-built model. Evaluation reports a domain
//! error when a logarithm argument is non-positive rather than returning NaN.

use serde::{Deserialize, Serialize};

use crate::error::ItrfError;

/// A closed PSD correction model for one local component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum ParametricModel {
    Pwl,
    Log { a1: f64, t1: f64 },
    Exp { a1: f64, t1: f64 },
    LogExp { a1: f64, t1: f64, a2: f64, t2: f64 },
    ExpExp { a1: f64, t1: f64, a2: f64, t2: f64 },
}

impl ParametricModel {
    /// Build a model from the catalog's integer tag and parameter list.
    ///
    /// Expected parameter counts per tag: 0, 2, 2, 4, 4. A tag outside
    /// [0, 4] is `InvalidModelTag`; a count mismatch or a degenerate value
    /// (non-finite amplitude, zero/non-finite relaxation time) is
    /// `InvalidParameters`.
    pub fn from_catalog(tag: i64, params: &[f64]) -> Result<ParametricModel, ItrfError> {
        let model = match tag {
            0 => {
                Self::check_count(tag, params, 0)?;
                ParametricModel::Pwl
            }
            1 => {
                Self::check_count(tag, params, 2)?;
                ParametricModel::Log {
                    a1: params[0],
                    t1: params[1],
                }
            }
            2 => {
                Self::check_count(tag, params, 2)?;
                ParametricModel::Exp {
                    a1: params[0],
                    t1: params[1],
                }
            }
            3 => {
                Self::check_count(tag, params, 4)?;
                ParametricModel::LogExp {
                    a1: params[0],
                    t1: params[1],
                    a2: params[2],
                    t2: params[3],
                }
            }
            4 => {
                Self::check_count(tag, params, 4)?;
                ParametricModel::ExpExp {
                    a1: params[0],
                    t1: params[1],
                    a2: params[2],
                    t2: params[3],
                }
            }
            other => return Err(ItrfError::InvalidModelTag { tag: other }),
        };
        model.validate()?;
        Ok(model)
    }

    fn check_count(tag: i64, params: &[f64], expected: usize) -> Result<(), ItrfError> {
        if params.len() != expected {
            return Err(ItrfError::InvalidParameters {
                message: format!(
                    "model tag {tag} expects {expected} parameter(s), got {}",
                    params.len()
                ),
            });
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ItrfError> {
        let check = |a: f64, t: f64, which: &str| -> Result<(), ItrfError> {
            if !a.is_finite() {
                return Err(ItrfError::InvalidParameters {
                    message: format!("amplitude {which} is not finite"),
                });
            }
            if !t.is_finite() || t == 0.0 {
                return Err(ItrfError::InvalidParameters {
                    message: format!("relaxation time {which} must be finite and non-zero"),
                });
            }
            Ok(())
        };
        match *self {
            ParametricModel::Pwl => Ok(()),
            ParametricModel::Log { a1, t1 } | ParametricModel::Exp { a1, t1 } => {
                check(a1, t1, "1")
            }
            ParametricModel::LogExp { a1, t1, a2, t2 }
            | ParametricModel::ExpExp { a1, t1, a2, t2 } => {
                check(a1, t1, "1")?;
                check(a2, t2, "2")
            }
        }
    }

    /// Evaluate the correction (mm) at `dtq` fractional years after the
    /// earthquake. `dtq` may be negative; a logarithm argument `<= 0`
    /// (`dtq <= -t1`) is an explicit domain error.
    pub fn evaluate(&self, dtq: f64) -> Result<f64, ItrfError> {
        match *self {
            ParametricModel::Pwl => Ok(0.0),
            ParametricModel::Log { a1, t1 } => Ok(a1 * log_term(dtq, t1)?),
            ParametricModel::Exp { a1, t1 } => Ok(a1 * exp_term(dtq, t1)),
            ParametricModel::LogExp { a1, t1, a2, t2 } => {
                Ok(a1 * log_term(dtq, t1)? + a2 * exp_term(dtq, t2))
            }
            ParametricModel::ExpExp { a1, t1, a2, t2 } => {
                Ok(a1 * exp_term(dtq, t1) + a2 * exp_term(dtq, t2))
            }
        }
    }

    /// Lower-case catalog alias (configuration/display boundary only;
    /// dispatch is always on the enum).
    pub fn alias(&self) -> &'static str {
        match self {
            ParametricModel::Pwl => "pwl",
            ParametricModel::Log { .. } => "log",
            ParametricModel::Exp { .. } => "exp",
            ParametricModel::LogExp { .. } => "logexp",
            ParametricModel::ExpExp { .. } => "expexp",
        }
    }
}

/// `ln(1 + dtq/t1)`, rejecting a non-positive argument.
fn log_term(dtq: f64, t1: f64) -> Result<f64, ItrfError> {
    let arg = 1.0 + dtq / t1;
    if arg <= 0.0 {
        return Err(ItrfError::Domain {
            message: format!(
                "logarithmic PSD term undefined: 1 + dtq/t1 = {arg} (dtq = {dtq}, t1 = {t1})"
            ),
        });
    }
    Ok(arg.ln())
}

/// `1 − e^(−dtq/t1)`, computed via `exp_m1` for small arguments.
fn exp_term(dtq: f64, t1: f64) -> f64 {
    -(-dtq / t1).exp_m1()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_models_are_zero_at_event_epoch() {
        let models = [
            ParametricModel::from_catalog(0, &[]).unwrap(),
            ParametricModel::from_catalog(1, &[10.0, 1.0]).unwrap(),
            ParametricModel::from_catalog(2, &[10.0, 1.0]).unwrap(),
            ParametricModel::from_catalog(3, &[10.0, 1.0, 5.0, 2.0]).unwrap(),
            ParametricModel::from_catalog(4, &[10.0, 1.0, 5.0, 2.0]).unwrap(),
        ];
        for m in models {
            assert_eq!(m.evaluate(0.0).unwrap(), 0.0, "model {} at dtq=0", m.alias());
        }
    }

    #[test]
    fn exp_model_matches_closed_form() {
        // a1=10mm, t1=1yr at dtq=1yr: 10·(1−e⁻¹) ≈ 6.321 mm.
        let m = ParametricModel::from_catalog(2, &[10.0, 1.0]).unwrap();
        let v = m.evaluate(1.0).unwrap();
        assert!((v - 10.0 * (1.0 - (-1.0f64).exp())).abs() < 1e-12);
        assert!((v - 6.3212).abs() < 1e-4);
    }

    #[test]
    fn log_model_matches_closed_form() {
        let m = ParametricModel::from_catalog(1, &[-192.03, 0.5969]).unwrap();
        let dtq = 2.5;
        let v = m.evaluate(dtq).unwrap();
        assert!((v - (-192.03) * (1.0 + dtq / 0.5969).ln()).abs() < 1e-9);
    }

    #[test]
    fn combined_models_are_sums_of_terms() {
        let log = ParametricModel::from_catalog(1, &[3.0, 0.7]).unwrap();
        let exp1 = ParametricModel::from_catalog(2, &[3.0, 0.7]).unwrap();
        let exp2 = ParametricModel::from_catalog(2, &[-1.5, 2.2]).unwrap();
        let logexp = ParametricModel::from_catalog(3, &[3.0, 0.7, -1.5, 2.2]).unwrap();
        let expexp = ParametricModel::from_catalog(4, &[3.0, 0.7, -1.5, 2.2]).unwrap();

        let dtq = 4.25;
        let le = logexp.evaluate(dtq).unwrap();
        let ee = expexp.evaluate(dtq).unwrap();
        assert!((le - (log.evaluate(dtq).unwrap() + exp2.evaluate(dtq).unwrap())).abs() < 1e-12);
        assert!((ee - (exp1.evaluate(dtq).unwrap() + exp2.evaluate(dtq).unwrap())).abs() < 1e-12);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = ParametricModel::from_catalog(7, &[1.0, 1.0]).unwrap_err();
        assert_eq!(err, ItrfError::InvalidModelTag { tag: 7 });
        assert!(ParametricModel::from_catalog(-1, &[]).is_err());
    }

    #[test]
    fn parameter_count_mismatch_is_rejected() {
        assert!(matches!(
            ParametricModel::from_catalog(1, &[10.0]),
            Err(ItrfError::InvalidParameters { .. })
        ));
        assert!(matches!(
            ParametricModel::from_catalog(3, &[10.0, 1.0]),
            Err(ItrfError::InvalidParameters { .. })
        ));
        assert!(matches!(
            ParametricModel::from_catalog(0, &[1.0]),
            Err(ItrfError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn zero_relaxation_time_is_rejected() {
        assert!(matches!(
            ParametricModel::from_catalog(2, &[10.0, 0.0]),
            Err(ItrfError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn log_before_relaxation_horizon_is_domain_error() {
        // dtq <= -t1 makes the log argument non-positive.
        let m = ParametricModel::from_catalog(1, &[10.0, 1.0]).unwrap();
        assert!(matches!(
            m.evaluate(-1.0),
            Err(ItrfError::Domain { .. })
        ));
        assert!(matches!(
            m.evaluate(-2.5),
            Err(ItrfError::Domain { .. })
        ));
        // Slightly inside the horizon is fine.
        assert!(m.evaluate(-0.5).is_ok());
    }

    #[test]
    fn negative_dtq_is_evaluated_for_exp_models() {
        // The reference behavior sums events unconditionally, so models must
        // evaluate before the event too.
        let m = ParametricModel::from_catalog(2, &[10.0, 1.0]).unwrap();
        let v = m.evaluate(-1.0).unwrap();
        assert!((v - 10.0 * (1.0 - 1.0f64.exp())).abs() < 1e-9);
    }
}

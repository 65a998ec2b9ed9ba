use crate::{error::ParamError, types::Age};

/// Side length used when nothing else is requested.
pub const DEFAULT_GRID_SIZE: usize = 20;

/// Fraction of cells set burning by [`crate::rules::randomize`] in the
/// reference setup.
pub const DEFAULT_DENSITY: f64 = 0.15;

/// Parameters of one transition, owned by the caller and passed to every
/// [`crate::rules::step`].
///
/// ### Fields
/// - `prob_spread` - Chance `a` that a single burning neighbor ignites an off cell.
/// - `prob_extinguish` - Chance `s` that a single burning neighbor puts out a burning cell.
/// - `lifespan` - Maximum number of generations `L` a cell may keep burning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    pub prob_spread: f64,
    pub prob_extinguish: f64,
    pub lifespan: Age,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            prob_spread: 0.1,
            prob_extinguish: 0.05,
            lifespan: 10,
        }
    }
}

impl Params {
    /// Builds a validated parameter set.
    ///
    /// ### Returns
    /// - `Ok(Params)` if both probabilities are in `[0, 1]` and `lifespan >= 1`.
    /// - `Err(ParamError)` describing the first offending value otherwise.
    pub fn new(prob_spread: f64, prob_extinguish: f64, lifespan: Age) -> Result<Self, ParamError> {
        let params = Self {
            prob_spread,
            prob_extinguish,
            lifespan,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        check_probability("prob_spread", self.prob_spread)?;
        check_probability("prob_extinguish", self.prob_extinguish)?;
        if self.lifespan == 0 {
            return Err(ParamError::ZeroLifespan);
        }
        Ok(())
    }
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ParamError> {
    // NaN fails the range check too.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParamError::ProbabilityOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert_eq!(Params::default().validate(), Ok(()));
    }

    #[test]
    fn new_accepts_probability_extremes() {
        assert!(Params::new(0.0, 1.0, 1).is_ok());
        assert!(Params::new(1.0, 0.0, 50).is_ok());
    }

    #[test]
    fn new_rejects_out_of_range_probabilities() {
        assert_eq!(
            Params::new(1.5, 0.1, 10),
            Err(ParamError::ProbabilityOutOfRange {
                name: "prob_spread",
                value: 1.5
            })
        );
        assert_eq!(
            Params::new(0.1, -0.01, 10),
            Err(ParamError::ProbabilityOutOfRange {
                name: "prob_extinguish",
                value: -0.01
            })
        );
        assert!(Params::new(f64::NAN, 0.1, 10).is_err());
    }

    #[test]
    fn new_rejects_zero_lifespan() {
        assert_eq!(Params::new(0.1, 0.1, 0), Err(ParamError::ZeroLifespan));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = Params::new(0.1, 2.0, 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "prob_extinguish must be a probability in [0, 1], got 2"
        );
    }
}

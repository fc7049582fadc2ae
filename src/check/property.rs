use rand::{SeedableRng, rngs::StdRng};
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

use super::generator::Generator;

pub const DEFAULT_ITERATIONS: usize = 100;

/// Result of checking a property over many generated inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed {
        iterations: usize,
    },
    Failed {
        /// Zero-based index of the failing case
        iteration: usize,
        /// `Debug` rendering of the input that failed
        counterexample: String,
        seed: u64,
        /// Panic message, when the predicate panicked rather than returning false
        error: Option<String>,
    },
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("property `{name}` failed at iteration {iteration} (seed {seed}): {counterexample}")]
pub struct PropertyFailure {
    pub name: String,
    pub iteration: usize,
    pub counterexample: String,
    pub seed: u64,
    pub error: Option<String>,
}

/// A predicate that should hold for every value a generator produces
pub struct Property<T> {
    generator: Generator<T>,
    predicate: Box<dyn Fn(&T) -> bool>,
}

impl<T: Debug + 'static> Property<T> {
    pub fn new(generator: Generator<T>, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            generator,
            predicate: Box::new(predicate),
        }
    }

    /// Run up to `iterations` cases from `seed`, stopping at the first failure.
    ///
    /// A panicking predicate counts as a failure and its message is kept.
    pub fn check(&self, iterations: usize, seed: u64) -> CheckOutcome {
        let mut rng = StdRng::seed_from_u64(seed);

        for iteration in 0..iterations {
            let value = self.generator.generate(&mut rng);
            let verdict = panic::catch_unwind(AssertUnwindSafe(|| (self.predicate)(&value)));

            let error = match verdict {
                Ok(true) => continue,
                Ok(false) => None,
                Err(payload) => Some(panic_message(payload.as_ref())),
            };
            return CheckOutcome::Failed {
                iteration,
                counterexample: format!("{value:?}"),
                seed,
                error,
            };
        }

        CheckOutcome::Passed { iterations }
    }
}

/// Check `property` and turn a failure into an error carrying `name`
pub fn assert_property<T: Debug + 'static>(
    name: &str,
    property: &Property<T>,
    iterations: usize,
    seed: u64,
) -> Result<usize, PropertyFailure> {
    match property.check(iterations, seed) {
        CheckOutcome::Passed { iterations } => Ok(iterations),
        CheckOutcome::Failed {
            iteration,
            counterexample,
            seed,
            error,
        } => Err(PropertyFailure {
            name: name.to_string(),
            iteration,
            counterexample,
            seed,
            error,
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::generator::integer;

    #[test]
    fn test_true_property_passes_every_iteration() {
        let property = Property::new(integer(0, 10), |n| *n <= 10);
        assert_eq!(
            property.check(250, 1),
            CheckOutcome::Passed { iterations: 250 }
        );
        assert!(property.check(10, 2).passed());
    }

    #[test]
    fn test_false_property_reports_counterexample() {
        let property = Property::new(integer(0, 10), |n| *n < 5);
        match property.check(DEFAULT_ITERATIONS, 7) {
            CheckOutcome::Failed {
                counterexample,
                seed,
                error,
                ..
            } => {
                let value: i32 = counterexample.parse().unwrap();
                assert!(value >= 5);
                assert_eq!(seed, 7);
                assert_eq!(error, None);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_panicking_predicate_is_a_failure() {
        let property = Property::new(integer(1, 3), |n| {
            assert!(*n > 100, "too small: {n}");
            true
        });
        match property.check(10, 3) {
            CheckOutcome::Failed {
                iteration, error, ..
            } => {
                assert_eq!(iteration, 0);
                assert!(error.unwrap().contains("too small"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_failures_reproduce_from_seed() {
        let property = Property::new(integer(0, 1000), |n| n % 17 != 0);
        assert_eq!(property.check(5000, 42), property.check(5000, 42));
    }

    #[test]
    fn test_assert_property_error_names_property() {
        let property = Property::new(integer(0, 0), |n| *n != 0);
        let err = assert_property("never zero", &property, 5, 11).unwrap_err();
        assert_eq!(err.iteration, 0);
        assert_eq!(err.counterexample, "0");
        assert!(err.to_string().contains("never zero"));
        assert!(err.to_string().contains("seed 11"));
    }

    #[test]
    fn test_assert_property_counts_iterations() {
        let property = Property::new(integer(0, 3), |_| true);
        assert_eq!(assert_property("trivial", &property, 40, 0), Ok(40));
    }
}

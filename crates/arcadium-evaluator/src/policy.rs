//! The decision-function boundary shared by both simulators and the live
//! single-step query path.

use arcadium_engine::{FlightSensors, RunnerSensors, SensorVector as _};

/// Output threshold above which the policy's action fires.
pub const ACTION_THRESHOLD: f64 = 0.5;

/// An opaque control policy: a pure mapping from a normalized sensor
/// vector to an output vector.
///
/// Only element 0 of the output is consumed, via [`decide`]. The
/// simulators never observe any internal state of the policy.
pub trait Policy {
    fn evaluate(&self, inputs: &[f64]) -> Vec<f64>;
}

impl<F> Policy for F
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    fn evaluate(&self, inputs: &[f64]) -> Vec<f64> {
        self(inputs)
    }
}

/// Error for malformed policy output.
///
/// The simulation contract assumes well-formed output from the decision
/// function; violations fail the run fast instead of substituting a
/// default action.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PolicyOutputError {
    #[display("policy returned an empty output vector")]
    Empty,
    #[display("policy action output is not finite: {value}")]
    NonFinite {
        #[error(not(source))]
        value: f64,
    },
}

/// Converts a policy's output on the given inputs into the binary action.
pub fn decide<P>(policy: &P, inputs: &[f64; 3]) -> Result<bool, PolicyOutputError>
where
    P: Policy + ?Sized,
{
    let output = policy.evaluate(inputs);
    let Some(&value) = output.first() else {
        return Err(PolicyOutputError::Empty);
    };
    if !value.is_finite() {
        return Err(PolicyOutputError::NonFinite { value });
    }
    Ok(value > ACTION_THRESHOLD)
}

/// Live single-step query for the runner game.
///
/// Applies the identical normalization divisors as the per-frame
/// simulation loop, keeping queries consistent with policies trained under
/// that normalization.
pub fn runner_action<P>(policy: &P, sensors: RunnerSensors) -> Result<bool, PolicyOutputError>
where
    P: Policy + ?Sized,
{
    decide(policy, &sensors.normalized())
}

/// Live single-step query for the flight game.
pub fn flight_action<P>(policy: &P, sensors: FlightSensors) -> Result<bool, PolicyOutputError>
where
    P: Policy + ?Sized,
{
    decide(policy, &sensors.normalized())
}

/// Policy that emits the same output value regardless of input.
///
/// [`ConstantPolicy::ALWAYS`] and [`ConstantPolicy::NEVER`] are the stub
/// policies used in tests and the CLI.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPolicy {
    output: f64,
}

impl ConstantPolicy {
    /// Always acts (output 1.0).
    pub const ALWAYS: Self = Self::new(1.0);
    /// Never acts (output 0.0).
    pub const NEVER: Self = Self::new(0.0);

    #[must_use]
    pub const fn new(output: f64) -> Self {
        Self { output }
    }
}

impl Policy for ConstantPolicy {
    fn evaluate(&self, _inputs: &[f64]) -> Vec<f64> {
        vec![self.output]
    }
}

/// Policy that acts when one chosen input falls below a threshold.
///
/// Useful as a hand-written baseline, e.g. "jump when the normalized
/// obstacle distance drops under 0.2".
#[derive(Debug, Clone, Copy)]
pub struct InputThresholdPolicy {
    input_index: usize,
    threshold: f64,
}

impl InputThresholdPolicy {
    #[must_use]
    pub const fn new(input_index: usize, threshold: f64) -> Self {
        Self {
            input_index,
            threshold,
        }
    }
}

impl Policy for InputThresholdPolicy {
    fn evaluate(&self, inputs: &[f64]) -> Vec<f64> {
        let below = inputs
            .get(self.input_index)
            .is_some_and(|input| *input < self.threshold);
        vec![if below { 1.0 } else { 0.0 }]
    }
}

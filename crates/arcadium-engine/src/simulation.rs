/// Result of completing one simulation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum FrameOutcome {
    /// The agent survived the frame.
    Running,
    /// The agent died this frame; no further frames execute.
    Crashed,
}

/// A fixed-length sensor reading convertible to the normalized input
/// vector handed to a decision function.
pub trait SensorVector {
    /// Normalizes the raw readings into the 3-element input vector.
    ///
    /// The divisors are part of the decision-function contract: a policy
    /// trained against these inputs must be queried through the same
    /// normalization.
    fn normalized(&self) -> [f64; 3];
}

/// A frame-stepped game simulation.
///
/// Each frame is split at the point where the agent decides:
/// [`begin_frame`](Self::begin_frame) runs everything up to and including
/// the sensor read, [`finish_frame`](Self::finish_frame) applies the
/// decision and completes the frame. Callers must alternate the two calls
/// and stop at the first [`FrameOutcome::Crashed`].
pub trait Simulation {
    /// Sensor readings produced for each frame's decision.
    type Sensors: SensorVector;

    /// Advances the pre-decision part of the next frame and returns the
    /// sensor readings for this frame's decision.
    fn begin_frame(&mut self) -> Self::Sensors;

    /// Applies the decision and completes the frame.
    fn finish_frame(&mut self, act: bool) -> FrameOutcome;

    /// Obstacles or gaps fully passed so far.
    fn score(&self) -> u32;

    /// Number of completed frames.
    fn frames(&self) -> u32;
}

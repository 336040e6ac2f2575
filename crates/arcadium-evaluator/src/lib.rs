//! Policy evaluation over the arcadium game simulations.
//!
//! This crate owns the decision-function boundary: an opaque [`Policy`]
//! maps a normalized 3-element sensor vector to an output vector whose
//! first element, compared against a fixed 0.5 threshold, yields the
//! binary action (jump or flap). The policy itself is supplied externally
//! (typically the result of an evolutionary training process) and is
//! treated as a pure function value.
//!
//! [`SessionEvaluator`] drives a policy through a full game run and
//! reports the scalar fitness the external optimizer consumes.

pub use self::{policy::*, session::*};

pub mod policy;
pub mod session;

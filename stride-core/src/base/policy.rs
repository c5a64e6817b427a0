//! Policy.
use super::Env;

/// Maps observations of an environment to actions.
///
/// Sampling takes `&mut self` so that stochastic policies can advance their
/// random state. A trainable policy is an [`Agent`](crate::Agent).
pub trait Policy<E: Env> {
    /// Returns the action to take on `obs`.
    fn sample(&mut self, obs: &E::Obs) -> E::Act;
}

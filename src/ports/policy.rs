//! Policy port - abstraction for edge-selection strategies
//!
//! The engine enforces legality; a policy only ever chooses among the edges
//! the enumerator already produced. Different selection rules (random,
//! greedy-by-weight, learned agents) are adapters implementing this port.

use crate::{Result, spanning::TreeState};

/// Unified interface for edge-selection strategies
pub trait Policy: Send {
    /// Pick one of the enumerated legal edges for the given state.
    ///
    /// `legal` is never empty when this is called; it is exactly the
    /// state's current legal-action sequence, in ascending index order.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy cannot produce a choice.
    fn choose_edge(&mut self, state: &TreeState, legal: &[usize]) -> Result<usize>;

    /// The policy's name, used in reports and exports.
    fn name(&self) -> &str;

    /// Seed the policy's internal random number generator, if it has one.
    ///
    /// Rollout runners call this when supplied with a deterministic seed.
    /// Deterministic policies can use the default no-op.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters in the
//! rollout layer, keeping episode play decoupled from any concrete decision
//! rule or output format.

pub mod observer;
pub mod policy;

pub use observer::RolloutObserver;
pub use policy::Policy;

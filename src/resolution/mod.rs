//! Effect resolution bookkeeping: the FIFO effect queue and the
//! Launch-Stack claims it produces.

pub mod queue;

pub use queue::{EffectQueue, LaunchStackClaim};

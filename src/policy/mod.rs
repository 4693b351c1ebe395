//! Cache replacement policies.

pub mod clock;

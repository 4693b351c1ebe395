pub mod frame_ring;

pub use frame_ring::{FrameMeta, FrameRing, Sweep};

//! Layout engine for tech radar charts: a frame builder that turns sector
//! and ring counts into circular geometry, and a blip packer that assigns
//! every data point a collision-minimized position inside its sector/ring
//! cell via simulated annealing.
//!
//! The engine is a pure function of its inputs plus an injected random
//! source; rendering, persistence, and interaction live with callers.

pub mod color;
pub mod data;
pub mod error;
pub mod frame;
pub mod packing;

pub use color::{ColorBy, InheritedColor, OrdinalColors};
pub use data::{Blip, RadarData};
pub use error::LayoutError;
pub use frame::RadarFrame;
pub use packing::{pack_blips, AnnealingSchedule, AnnealingStats, PackedBlip, PackedLayout, PackingOptions};

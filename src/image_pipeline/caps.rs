//! Stream capability model
//!
//! Candidate stream descriptions exchanged during negotiation (`Caps`,
//! `StreamCaps`, `CapsValue`) and the fully resolved form they collapse into
//! once both sides of the element are fixed (`StreamDescription`).

mod value;
mod structure;
mod description;
pub mod types;

pub use value::CapsValue;
pub use structure::{Caps, StreamCaps};
pub use description::StreamDescription;
pub use types::{CfaOrder, Framerate, StreamKind, GRAY8, DIMENSION_MAX};

//! Transcoder command planning.
//!
//! A [`MuxPlan`] describes the desired output; [`build_command`] turns it
//! into the argument list for the external transcoder process.

mod builder;
mod plan;

pub use builder::build_command;
pub use plan::{ContainerKind, MuxPlan};

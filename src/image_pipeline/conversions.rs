//! Pipeline conversions module
//!
//! This module contains the orchestration that turns a screenshot and a bezel
//! template into a composited PNG, for single files and for batches.

mod bezel_composite;
mod bezel_set;
mod destination;
mod batch;


pub use bezel_composite::BezelCompositePipeline;
pub use bezel_set::{BezelSet, Orientation};
pub use destination::Destination;
pub use batch::BatchReport;

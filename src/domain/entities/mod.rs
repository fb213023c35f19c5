//! Core domain entities.
//!
//! - [`House`] - A single house from the remote reference set
//! - [`HouseSet`] - One fetch worth of houses, in upstream order

pub mod house;

pub use house::{House, HouseSet};

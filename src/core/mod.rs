//! State kept across action bar updates
//!
//! Parsing itself is stateless; this layer is where consumers hold on to the
//! latest readings.

pub mod state;

pub use state::PlayerStats;

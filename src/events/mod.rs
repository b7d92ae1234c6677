//! Event types and observers used by the engine.
//!
//! Submodules:
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod switchdebug;

//! Event types used by the engine.
//!
//! Events provide a decoupled way for the host and the accessory systems to
//! communicate.
//!
//! Submodules:
//! - [`pagesetup`] – notification that a map event's page was (re)established
pub mod pagesetup;

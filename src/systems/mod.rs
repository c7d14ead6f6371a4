//! Engine systems.
//!
//! This module groups the ECS systems and observers that read page
//! configuration and drive accessory overlays.
//!
//! Submodules overview
//! - [`accessories`] – rebuild overlays on list changes and advance their timing
//! - [`character`] – advance walk cycles into the character base frame
//! - [`comments`] – extract JSON configuration from page comments
//! - [`gameconfig`] – apply configuration changes to the frame clock
//! - [`time`] – gate ticks on the fixed-interval frame clock

pub mod accessories;
pub mod character;
pub mod comments;
pub mod gameconfig;
pub mod time;

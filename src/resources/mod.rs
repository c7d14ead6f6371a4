//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `accessorypresets` – named timing patterns shared by every character
//! - `accessoryrng` – random source for timing jitter
//! - `frameclock` – fixed-interval tick gate with frame-drop counting
//! - `gameconfig` – INI-backed runtime settings
pub mod accessorypresets;
pub mod accessoryrng;
pub mod frameclock;
pub mod gameconfig;

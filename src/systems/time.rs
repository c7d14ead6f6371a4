//! Frame clock update.
//!
//! Gates the host loop on the shared
//! [`FrameClock`](crate::resources::frameclock::FrameClock) resource.
use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::frameclock::FrameClock;

/// Report whether the frame arriving at `now_ms` should run a tick.
///
/// Early frames are counted as dropped and skipped entirely.
pub fn advance_frame_clock(world: &mut World, now_ms: f64) -> bool {
    let mut clock = world.resource_mut::<FrameClock>();
    let run = clock.advance(now_ms);
    if !run {
        trace!(
            "Frame dropped at {:.3}ms (count: {})",
            now_ms, clock.dropped
        );
    }
    run
}

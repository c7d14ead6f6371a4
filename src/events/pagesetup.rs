//! Page setup events.
//!
//! A [`PageSetupEvent`] is triggered whenever a map event's current page is
//! (re)established. Observers registered for it run in registration order,
//! which is how extra per-page setup is hooked in. The built-in observer,
//! [`proceed_comments`](crate::systems::comments::proceed_comments), reads
//! the page's comment configuration and replaces the event's accessories.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<PageSetupEvent>| {
//!     log::info!("page set up on {:?}", trigger.event().entity);
//! });
//! ```

use bevy_ecs::prelude::*;

/// Event emitted when an entity's page has been set up.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetupEvent {
    /// The map event whose page changed.
    pub entity: Entity,
}

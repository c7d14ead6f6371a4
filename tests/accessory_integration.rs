//! Accessory overlay integration tests: page setup, overlay rebuilds, and
//! per-tick timing driven through the full update schedule.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test accessory_integration
//! ```

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;

use accessoryengine::components::accessories::{
    Accessories, AccessoryDescriptor, PLAYER_ACCESSORY_IMAGE,
};
use accessoryengine::components::accessorysprite::{
    AccessoryOverlays, AccessorySlot, AccessorySprite, Anchor, FrameRect,
};
use accessoryengine::components::character::CharacterFrame;
use accessoryengine::components::eventpage::{EventPage, PageCommand};
use accessoryengine::game;
use accessoryengine::resources::accessorypresets::{AccessoryPresets, BlockOffset, PatternStep};
use accessoryengine::resources::frameclock::FrameClock;
use accessoryengine::resources::gameconfig::GameConfig;

fn make_world() -> (World, Schedule) {
    let config = GameConfig {
        seed: Some(1),
        ..GameConfig::new()
    };
    let mut world = game::setup_world(config);
    {
        let mut presets = world.resource_mut::<AccessoryPresets>();
        presets.insert(
            "blinkTest",
            vec![
                PatternStep::Visible(true),
                PatternStep::Delay(10),
                PatternStep::Visible(false),
            ],
        );
        presets.insert(
            "blockTest",
            vec![
                PatternStep::Block(BlockOffset::new(3, 0)),
                PatternStep::Delay(100),
            ],
        );
    }
    (world, game::build_schedule())
}

fn tick(world: &mut World, update: &mut Schedule) {
    update.run(world);
    world.clear_trackers();
}

fn accessories_page(layers: &str) -> EventPage {
    EventPage::new(vec![
        PageCommand::comment("{'type':'accessories',"),
        PageCommand::continuation(format!("'layers':{layers}}}")),
        PageCommand::end(),
    ])
}

fn overlay_sprites(world: &World, entity: Entity) -> Vec<Entity> {
    world
        .get::<AccessoryOverlays>(entity)
        .expect("overlays built")
        .sprites
        .to_vec()
}

fn sprite(world: &World, overlay: Entity) -> &AccessorySprite {
    world.get::<AccessorySprite>(overlay).expect("overlay sprite")
}

#[test]
fn page_comments_build_one_overlay_per_layer() {
    let (mut world, mut update) = make_world();
    let page = accessories_page("[{'image':'!Ian','pattern':'blinkTest'},{'image':'!Hat','id':1}]");
    let event = game::spawn_map_event(&mut world, page, CharacterFrame::default());

    tick(&mut world, &mut update);

    let accessories = world.get::<Accessories>(event).unwrap();
    assert_eq!(
        accessories.descriptors(),
        &[
            AccessoryDescriptor::animated("!Ian", "blinkTest"),
            AccessoryDescriptor::fixed("!Hat", 1),
        ]
    );

    let overlays = overlay_sprites(&world, event);
    assert_eq!(overlays.len(), 2);
    for (slot, overlay) in overlays.iter().enumerate() {
        assert_eq!(world.get::<ChildOf>(*overlay).unwrap().parent(), event);
        assert_eq!(world.get::<AccessorySlot>(*overlay).unwrap().0, slot);
        assert_eq!(sprite(&world, *overlay).anchor, Anchor::BOTTOM_CENTER);
    }
    assert_eq!(sprite(&world, overlays[0]).image, "!Ian");
    assert_eq!(sprite(&world, overlays[1]).image, "!Hat");

    // Static overlay: block 1 is three cells right of the character cell.
    let hat = sprite(&world, overlays[1]);
    assert!(hat.visible);
    assert_eq!(hat.frame, FrameRect::new(3 * 48, 0, 48, 48));
}

#[test]
fn visible_delay_hide_pattern_over_ticks() {
    let (mut world, mut update) = make_world();
    let page = accessories_page("[{'image':'!Ian','pattern':'blinkTest'}]");
    let event = game::spawn_map_event(&mut world, page, CharacterFrame::default());

    // tick 1: show
    tick(&mut world, &mut update);
    let overlay = overlay_sprites(&world, event)[0];
    assert!(sprite(&world, overlay).visible);

    // tick 2: start a 10 tick delay
    tick(&mut world, &mut update);
    let state = world.get::<AccessoryOverlays>(event).unwrap().states[0];
    assert_eq!(state.timeout, 10);
    assert_eq!(state.index, 2);

    // ticks 3-12: count down, still visible
    for _ in 0..10 {
        tick(&mut world, &mut update);
        assert!(sprite(&world, overlay).visible);
    }
    assert_eq!(world.get::<AccessoryOverlays>(event).unwrap().states[0].timeout, 0);

    // tick 13: hide and wrap
    tick(&mut world, &mut update);
    assert!(!sprite(&world, overlay).visible);
    let state = world.get::<AccessoryOverlays>(event).unwrap().states[0];
    assert_eq!(state.index, 0);
    assert_eq!(state.timeout, 0);
}

#[test]
fn animated_overlay_starts_hidden() {
    let (mut world, mut update) = make_world();
    let page = accessories_page("[{'image':'!Ian','pattern':'blockTest'}]");
    let event = game::spawn_map_event(&mut world, page, CharacterFrame::default());

    tick(&mut world, &mut update);
    tick(&mut world, &mut update);

    let overlay = overlay_sprites(&world, event)[0];
    assert!(!sprite(&world, overlay).visible);
}

#[test]
fn remembered_block_follows_character_frame_while_waiting() {
    let (mut world, mut update) = make_world();
    let page = accessories_page("[{'image':'!Ian','pattern':'blockTest'}]");
    let event = game::spawn_map_event(&mut world, page, CharacterFrame::default());

    // tick 1 remembers the block, tick 2 applies it and starts the delay
    tick(&mut world, &mut update);
    let overlay = overlay_sprites(&world, event)[0];
    assert_eq!(sprite(&world, overlay).frame, FrameRect::default());

    tick(&mut world, &mut update);
    assert_eq!(sprite(&world, overlay).frame, FrameRect::new(3 * 48, 0, 48, 48));

    {
        let mut frame = world.get_mut::<CharacterFrame>(event).unwrap();
        frame.pattern_x = 2;
        frame.pattern_y = 1;
    }
    tick(&mut world, &mut update);
    assert_eq!(
        sprite(&world, overlay).frame,
        FrameRect::new(5 * 48, 48, 48, 48)
    );
    assert_eq!(world.get::<AccessoryOverlays>(event).unwrap().states[0].timeout, 99);
}

#[test]
fn reestablished_page_with_equal_contents_rebuilds_overlays() {
    let (mut world, mut update) = make_world();
    let layers = "[{'image':'!Ian','pattern':'blinkTest'}]";
    let event = game::spawn_map_event(&mut world, accessories_page(layers), CharacterFrame::default());
    tick(&mut world, &mut update);
    let before = overlay_sprites(&world, event);

    game::set_event_page(&mut world, event, accessories_page(layers));
    tick(&mut world, &mut update);
    let after = overlay_sprites(&world, event);

    assert_eq!(after.len(), 1);
    assert_ne!(before[0], after[0]);
    assert!(world.get_entity(before[0]).is_err());
    // Fresh state: first step consumed again on the rebuild tick.
    let state = world.get::<AccessoryOverlays>(event).unwrap().states[0];
    assert_eq!(state.index, 1);
}

#[test]
fn replacing_list_with_equal_contents_rebuilds_overlays() {
    let (mut world, mut update) = make_world();
    let event = game::spawn_map_event(
        &mut world,
        accessories_page("[{'image':'!Hat','id':0}]"),
        CharacterFrame::default(),
    );
    tick(&mut world, &mut update);
    let before = overlay_sprites(&world, event);

    world
        .get_mut::<Accessories>(event)
        .unwrap()
        .replace(vec![AccessoryDescriptor::fixed("!Hat", 0)]);
    tick(&mut world, &mut update);
    let after = overlay_sprites(&world, event);

    assert_ne!(before, after);
    assert!(world.get_entity(before[0]).is_err());
}

#[test]
fn page_without_accessories_removes_overlays() {
    let (mut world, mut update) = make_world();
    let event = game::spawn_map_event(
        &mut world,
        accessories_page("[{'image':'!Hat','id':0},{'image':'!Hat','id':2}]"),
        CharacterFrame::default(),
    );
    tick(&mut world, &mut update);
    let before = overlay_sprites(&world, event);
    assert_eq!(before.len(), 2);

    let plain = EventPage::new(vec![
        PageCommand::comment("{'type':'lighting','radius':2}"),
        PageCommand::end(),
    ]);
    game::set_event_page(&mut world, event, plain);
    tick(&mut world, &mut update);

    assert!(world.get::<Accessories>(event).unwrap().is_empty());
    assert!(world.get::<AccessoryOverlays>(event).unwrap().is_empty());
    for overlay in before {
        assert!(world.get_entity(overlay).is_err());
    }
}

#[test]
fn player_overlays_are_built_once() {
    let (mut world, mut update) = make_world();
    let player = game::spawn_player(&mut world, CharacterFrame::default());

    tick(&mut world, &mut update);
    let first = overlay_sprites(&world, player);
    assert_eq!(first.len(), 2);
    for overlay in &first {
        assert_eq!(sprite(&world, *overlay).image, PLAYER_ACCESSORY_IMAGE);
    }

    for _ in 0..30 {
        tick(&mut world, &mut update);
    }
    assert_eq!(overlay_sprites(&world, player), first);
}

#[test]
fn other_characters_never_get_overlays() {
    let (mut world, mut update) = make_world();
    let follower = game::spawn_other_character(&mut world, CharacterFrame::default());
    world
        .entity_mut(follower)
        .insert(Accessories::new(vec![AccessoryDescriptor::fixed("!Hat", 0)]));

    tick(&mut world, &mut update);
    assert!(world.get::<AccessoryOverlays>(follower).is_none());
}

#[test]
fn out_of_sheet_static_id_does_not_panic() {
    let (mut world, mut update) = make_world();
    let event = game::spawn_map_event(
        &mut world,
        accessories_page("[{'image':'!Hat','id':4000000000}]"),
        CharacterFrame::default(),
    );

    tick(&mut world, &mut update);

    let hat = sprite(&world, overlay_sprites(&world, event)[0]);
    assert!(hat.visible);
    assert_eq!(hat.frame.y, i32::MAX);
}

#[test]
fn cloned_list_put_back_rebuilds_overlays() {
    let (mut world, mut update) = make_world();
    let event = game::spawn_map_event(
        &mut world,
        accessories_page("[{'image':'!Hat','id':0}]"),
        CharacterFrame::default(),
    );
    tick(&mut world, &mut update);
    let before = overlay_sprites(&world, event);

    let snapshot = world.get::<Accessories>(event).unwrap().clone();
    world.entity_mut(event).insert(snapshot);
    tick(&mut world, &mut update);

    let overlays = world.get::<AccessoryOverlays>(event).unwrap();
    assert_eq!(overlays.len(), 1);
    assert_ne!(overlays.sprites[0], before[0]);
}

#[test]
#[should_panic(expected = "Unknown accessory pattern")]
fn unknown_pattern_is_fatal() {
    let (mut world, mut update) = make_world();
    game::spawn_map_event(
        &mut world,
        accessories_page("[{'image':'!Ian','pattern':'noSuchPattern'}]"),
        CharacterFrame::default(),
    );
    tick(&mut world, &mut update);
}

#[test]
fn run_frame_skips_early_frames() {
    let (mut world, mut update) = make_world();
    update.initialize(&mut world).unwrap();
    let event = game::spawn_map_event(
        &mut world,
        accessories_page("[{'image':'!Ian','pattern':'blinkTest'}]"),
        CharacterFrame::default(),
    );

    assert!(!game::run_frame(&mut world, &mut update, 5.0));
    assert!(world.get::<AccessoryOverlays>(event).is_none());

    assert!(game::run_frame(&mut world, &mut update, 17.0));
    assert!(world.get::<AccessoryOverlays>(event).is_some());

    let clock = world.resource::<FrameClock>();
    assert_eq!(clock.ticks, 1);
    assert_eq!(clock.dropped, 1);
}

#[test]
fn config_changes_reach_frame_clock() {
    let (mut world, mut update) = make_world();
    tick(&mut world, &mut update);
    assert_eq!(world.resource::<FrameClock>().fps, 60);

    world.resource_mut::<GameConfig>().fps = 30;
    tick(&mut world, &mut update);

    let clock = world.resource::<FrameClock>();
    assert_eq!(clock.fps, 30);
    assert!((clock.interval - 1000.0 / 30.0).abs() < 1e-9);
}

#[test]
fn configured_presets_file_extends_builtins() {
    let config = GameConfig {
        presets_path: Some(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/presets.json"),
        ),
        ..GameConfig::new()
    };
    let presets = game::load_presets(&config);
    assert!(presets.contains("dogmeatTail"));
    assert!(presets.contains("eyesPlayer"));
    assert_eq!(presets.len(), 5);
}

#[test]
fn unreadable_presets_file_falls_back_to_builtins() {
    let config = GameConfig {
        presets_path: Some("./no/such/presets.json".into()),
        ..GameConfig::new()
    };
    assert_eq!(game::load_presets(&config).len(), 4);
}

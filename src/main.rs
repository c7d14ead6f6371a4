//! Accessory engine headless runner.
//!
//! Loads a map event page in the editor's JSON format, prints the
//! configuration objects found in its leading comments, then simulates the
//! event (and optionally the player) for a number of ticks, logging every
//! overlay frame and visibility change.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=info cargo run --release -- --page page.json --ticks 600 --player
//! ```

use std::path::PathBuf;

use accessoryengine::components::character::{CharacterFrame, Direction, WalkCycle};
use accessoryengine::components::eventpage::EventPage;
use accessoryengine::game;
use accessoryengine::resources::frameclock::FrameClock;
use accessoryengine::resources::gameconfig::GameConfig;
use accessoryengine::systems::comments::collect_comments;
use clap::Parser;

/// Display refresh rate the simulated host loop is driven at.
const DISPLAY_HZ: f64 = 144.0;

/// Accessory overlay runner for map event pages
#[derive(Parser)]
#[command(version, about = "Simulate accessory overlays of a map event page.")]
struct Cli {
    /// Page file in the map editor's JSON format.
    #[arg(long, value_name = "FILE")]
    page: PathBuf,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seed for accessory timing jitter (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Also spawn the player with its default accessories.
    #[arg(long)]
    player: bool,

    /// Character block of the event's sheet (0-7).
    #[arg(long, default_value_t = 0)]
    character_index: i32,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::debug!("{}; using defaults", e);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let page = match EventPage::load_from_file(&cli.page) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let configs = collect_comments(&page);
    match serde_json::to_string_pretty(&configs) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error printing configuration: {e}");
            std::process::exit(1);
        }
    }

    let mut world = game::setup_world(config);
    let mut update = game::build_schedule();
    if let Err(e) = update.initialize(&mut world) {
        eprintln!("Error initializing schedule: {e}");
        std::process::exit(1);
    }

    let event = game::spawn_map_event(&mut world, page, CharacterFrame::default());
    world
        .entity_mut(event)
        .insert(WalkCycle::new(cli.character_index, Direction::Down, 15));

    if cli.player {
        let player = game::spawn_player(&mut world, CharacterFrame::default());
        world
            .entity_mut(player)
            .insert(WalkCycle::new(0, Direction::Down, 12));
    }

    // --------------- Main loop ---------------
    let display_interval = 1000.0 / DISPLAY_HZ;
    let mut now = 0.0;
    while world.resource::<FrameClock>().ticks < cli.ticks {
        now += display_interval;
        game::run_frame(&mut world, &mut update, now);
    }

    let clock = world.resource::<FrameClock>();
    log::info!(
        "Simulated {} ticks over {:.0}ms, {} frame(s) dropped",
        clock.ticks,
        now,
        clock.dropped
    );
}

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;

use engine::{prelude::*, PerceptionConfig};

mod session;
use session::{Script, Session};

pub const GAME_NAME: &str = "maskwalk";

const DEFAULT_MAP: &str = "
    ##############################
    #............................#
    #..e.........######.......e..#
    #............#....#..........#
    #....@.......#.B..#..........#
    #............#....#....e.....#
    #..........................e.#
    #......e.....................#
    #............................#
    ##############################";

#[derive(Parser, Debug)]
#[command(version, about = "Headless run of the perception core")]
struct Args {
    #[arg(long, default_value_t = 1, help = "Random seed")]
    seed: u64,

    #[arg(long, default_value_t = 600, help = "Number of frames to run")]
    frames: u32,

    #[arg(long, default_value_t = 16, help = "Frame length in milliseconds")]
    frame_ms: u32,

    #[arg(long, help = "Level map file")]
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 32.0, help = "Map tile size in world units")]
    tile_size: f32,

    #[arg(long, help = "Perception configuration IDM file")]
    config: Option<PathBuf>,

    #[arg(
        long,
        default_value = "",
        help = "Scripted input, eg. \"0:right,30:2,90:stop,120:torch\""
    )]
    script: Script,

    #[arg(long, help = "Write the final frame's darkness overlay as PNG")]
    overlay_png: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PerceptionConfig::load(path)?,
        None => PerceptionConfig::default(),
    };

    let map = match &args.map {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => DEFAULT_MAP.to_string(),
    };
    let arena = Arena::parse(&map, args.tile_size)?;

    log::info!("{GAME_NAME} seed: {}", args.seed);
    let runtime = Runtime::new(config, arena, args.seed);

    let mut session = Session::new(runtime, args.script);
    let summary = session.run(args.frames, args.frame_ms);
    log::info!("{summary:?}");

    let r = session.runtime();
    for e in r.hostiles() {
        log::info!(
            "{:?} {} at {} {}",
            e,
            e.kind(r),
            e.pos(r),
            if e.is_visible(r) { "visible" } else { "hidden" }
        );
    }

    if let Some(path) = &args.overlay_png {
        let mask = r.field().mask();
        let bounds = r.arena().bounds();
        let view = gfx::View::covering(&bounds, bounds.max.x.ceil() as u32);
        let buf = gfx::render_overlay(
            &mask.region,
            mask.overlay.rgb(),
            mask.overlay.opacity,
            &view,
        );
        fs::write(path, buf.to_png()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote overlay to {}", path.display());
    }

    Ok(())
}

//! Raycast Demo entry point
//!
//! Headless frame driver: loads settings and a level, replays a fixed set of
//! held keys for a number of frames, then reports the pose and optionally
//! dumps the composed screen.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use raycast_demo::Settings;
use raycast_demo::platform::{FrameClock, Key};
use raycast_demo::renderer::SoftwareRenderer;
use raycast_demo::sim::{Grid, SimState, TickInput, ViewBuffer, WallSide, render_view, tick};

#[derive(Debug, Parser)]
#[command(name = "raycast-demo", about = "First-person grid raycaster")]
struct Cli {
    /// Settings JSON (defaults when omitted or unreadable)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Level JSON, overrides the level named in the settings
    #[arg(long)]
    level: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Simulated time between frames (ms)
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Keys held for the whole run, e.g. `--hold w,j`
    #[arg(long, value_delimiter = ',')]
    hold: Vec<String>,

    #[arg(long, default_value_t = 1280)]
    screen_width: usize,

    #[arg(long, default_value_t = 720)]
    screen_height: usize,

    /// Write the last composed screen as a PPM image
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Write the last composed screen as raw native-endian 0RGB words
    #[arg(long)]
    dump_raw: Option<PathBuf>,

    /// Print a text preview of the last view
    #[arg(long)]
    ascii: bool,

    /// Write the effective settings back out as JSON
    #[arg(long)]
    save_settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Raycast Demo starting...");

    let settings = Settings::load(cli.settings.as_deref());
    let level_path = cli.level.clone().or_else(|| settings.level.clone());
    let grid = load_level(level_path.as_deref())?;
    let keys = parse_keys(&cli.hold)?;

    let mut state = SimState::from_settings(&settings, grid);
    let config = settings.view.projection(state.grid.block_size());
    let mut renderer = SoftwareRenderer::new(
        settings.view.columns,
        settings.view.height as usize,
        cli.screen_width,
        cli.screen_height,
    );

    let mut now_ms = 0;
    let mut clock = FrameClock::new(now_ms);
    let mut last_view = ViewBuffer::default();

    for frame in 0..cli.frames {
        if keys.contains(&Key::Escape) {
            log::info!("Escape held, stopping after {} frames", frame);
            break;
        }
        now_ms += cli.frame_ms;
        let dt = clock.tick(now_ms);

        let input = TickInput::from_keyboard(keys.as_slice());
        tick(&mut state, &input, dt);

        last_view = render_view(&state.pose, &state.grid, &config);
        renderer.render(&state, &last_view);
        log::debug!(
            "Frame {}: pos {:?} angle {:.2}",
            frame,
            state.pose.pos,
            state.pose.angle()
        );
    }

    println!(
        "After {} ticks: pos ({:.2}, {:.2}) angle {:.2} debug_overlay {}",
        state.time_ticks,
        state.pose.pos.x,
        state.pose.pos.y,
        state.pose.angle(),
        state.debug_overlay
    );
    match last_view.center().and_then(|column| column.distance) {
        Some(distance) => println!("Center ray: wall at {:.2}", distance),
        None => println!("Center ray: no wall"),
    }

    if cli.ascii {
        print!("{}", ascii_preview(&last_view, 80, 24));
    }

    if let Some(path) = &cli.dump {
        std::fs::write(path, renderer.screen().to_ppm())
            .with_context(|| format!("writing screen dump to {}", path.display()))?;
        log::info!("Screen written to {}", path.display());
    }

    if let Some(path) = &cli.dump_raw {
        let screen = renderer.screen();
        std::fs::write(path, screen.as_bytes())
            .with_context(|| format!("writing raw screen to {}", path.display()))?;
        log::info!(
            "Raw {}x{} screen written to {}",
            screen.width(),
            screen.height(),
            path.display()
        );
    }

    if let Some(path) = &cli.save_settings {
        settings
            .save(path)
            .with_context(|| format!("saving settings to {}", path.display()))?;
    }

    Ok(())
}

fn load_level(path: Option<&Path>) -> Result<Grid> {
    let Some(path) = path else {
        log::info!("Using built-in level");
        return Ok(Grid::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading level {}", path.display()))?;
    let grid =
        Grid::from_json(&json).with_context(|| format!("parsing level {}", path.display()))?;
    log::info!(
        "Loaded {}x{} level from {}",
        grid.columns(),
        grid.rows(),
        path.display()
    );
    Ok(grid)
}

fn parse_keys(names: &[String]) -> Result<Vec<Key>> {
    let mut keys = Vec::with_capacity(names.len());
    for name in names {
        match Key::from_name(name.trim()) {
            Some(key) => keys.push(key),
            None => bail!("unknown key {:?} (expected one of w a s d j l tab esc)", name),
        }
    }
    Ok(keys)
}

/// Downsample the view into `width` x `rows` characters
fn ascii_preview(view: &ViewBuffer, width: usize, rows: usize) -> String {
    let mut out = String::with_capacity((width + 1) * rows);
    if view.is_empty() || view.view_height == 0 {
        return out;
    }
    let height = view.view_height as usize;

    for row in 0..rows {
        let y = (row * height + height / 2) / rows;
        for x in 0..width {
            let column = &view.columns[x * view.len() / width];
            let top = height.saturating_sub(column.height as usize) / 2;
            let inside = column.height > 0 && y >= top && y < top + column.height as usize;
            out.push(match (inside, column.side) {
                (true, Some(WallSide::Horizontal)) => '=',
                (true, _) => '#',
                (false, _) => ' ',
            });
        }
        out.push('\n');
    }
    out
}

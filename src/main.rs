mod camera;
mod shader;
mod window;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glyph_swarm::assets::{builtin_glyphs, load_images};
use glyph_swarm::{AppError, MorphConfig, SwitchStyle};
use winit::event_loop::{ControlFlow, EventLoop};

/// Shards of colour that gather into an image and scatter when it changes.
///
/// Click, or press Space / Right, to move to the next image. P pauses.
#[derive(Parser)]
#[command(name = "glyph-swarm", version, about, long_about = None)]
struct Cli {
    /// Images to cycle through (dark artwork on a transparent background).
    /// Overrides the list in the config file; built-in shapes are used when
    /// neither gives any.
    images: Vec<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed every random source for a repeatable run
    #[arg(long)]
    seed: Option<u64>,

    /// Scatter particles across the field on every switch
    #[arg(long)]
    scatter: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = match &cli.config {
        Some(path) => MorphConfig::load(path)?,
        None => MorphConfig::default(),
    };
    if !cli.images.is_empty() {
        config.images = cli.images;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.scatter {
        config.switch_style = SwitchStyle::Scatter;
    }
    config.validate()?;

    let images = if config.images.is_empty() {
        log::info!("no images given, using built-in shapes");
        builtin_glyphs()
    } else {
        load_images(config.images.as_slice())?
    };
    log::info!("loaded {} images", images.len());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = window::App::new(config, images, (cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

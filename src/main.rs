//! Auto-place CLI
//!
//! Usage:
//!   autoplace [OPTIONS] --source <ID> [SCENE]
//!
//! Options:
//!   -s, --source <ID>       Shape to append to
//!   -i, --id <ID>           Identifier of the new shape
//!       --width <N>         Width of the new shape
//!       --height <N>        Height of the new shape
//!   -d, --direction <DIR>   Side to place the new shape on (n, e, s, w)
//!       --connect-to-source Connect the new shape to the source instead of the other way round
//!       --detached          Do not connect the new shape at all
//!   -c, --config <FILE>     Placement configuration (TOML format)
//!   -v, --verbose           Log placement decisions to stderr
//!   -h, --help              Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use diagram_autoplace::{
    auto_place_scene, AutoPlaceConfig, AutoPlaceError, Direction, PlacementHints, Scene, Shape,
    ShapeId,
};

#[derive(Parser)]
#[command(name = "autoplace")]
#[command(about = "Append a shape to a diagram scene at an automatically chosen position")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Shape to append to
    #[arg(short, long)]
    source: String,

    /// Identifier of the new shape (generated if not provided)
    #[arg(short, long)]
    id: Option<String>,

    /// Width of the new shape
    #[arg(long, default_value_t = 100.0)]
    width: f64,

    /// Height of the new shape
    #[arg(long, default_value_t = 80.0)]
    height: f64,

    /// Side of the source to place the new shape on (n, e, s, w)
    #[arg(short, long)]
    direction: Option<Direction>,

    /// Connect the new shape to the source instead of the source to the new shape
    #[arg(long, conflicts_with = "detached")]
    connect_to_source: bool,

    /// Do not connect the new shape
    #[arg(long)]
    detached: bool,

    /// Placement configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log placement decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// First `shape_N` not used in the scene
fn generate_id(scene: &Scene) -> ShapeId {
    (1..)
        .map(|n| ShapeId::new(format!("shape_{}", n)))
        .find(|id| scene.shapes.iter().all(|s| &s.id != id))
        .unwrap_or_else(|| ShapeId::new("shape"))
}

fn run(cli: &Cli, source: &str) -> Result<String, AutoPlaceError> {
    let config = match &cli.config {
        Some(path) => AutoPlaceConfig::from_file(path)?,
        None => AutoPlaceConfig::default(),
    };

    let id = match &cli.id {
        Some(id) => ShapeId::new(id.as_str()),
        None => generate_id(&Scene::from_str(source)?),
    };

    let source_id = ShapeId::new(cli.source.as_str());
    let mut hints = PlacementHints::new();
    if let Some(direction) = cli.direction {
        hints = hints.with_direction(direction);
    }
    if cli.detached {
        hints = hints.detached();
    } else if cli.connect_to_source {
        hints = hints.with_connection_target(source_id.clone());
    }

    auto_place_scene(
        source,
        &source_id,
        Shape::sized(id, cli.width, cli.height),
        &hints,
        config,
    )
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match run(&cli, &source) {
        Ok(scene) => {
            print!("{}", scene);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

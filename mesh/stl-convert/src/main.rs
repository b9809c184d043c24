//! STL converter.
//!
//! Decodes an STL file of either variant, writes it back out as STL, and
//! exports a JSON scene document next to it.
//!
//! # Commands
//!
//! - `stl-convert convert <INPUT>` - Re-encode INPUT and export JSON
//! - `stl-convert info <INPUT>` - Print what was decoded
//!
//! Logging goes to stderr. `-v` shows info, `-vv` debug; `RUST_LOG`
//! overrides both.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mesh_io::{
    Detected, SceneExportParams, StlWriteParams, load_stl_detailed, save_scene_json, save_stl,
};
use mesh_types::MeshTopology;
use tracing::{Level, info};

/// Convert STL files between binary, ASCII and JSON scene form
#[derive(Debug, Parser)]
#[command(name = "stl-convert")]
#[command(about = "Convert STL files between binary, ASCII and JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decode an STL file, write it back out and export a JSON scene
    Convert {
        /// STL file to read (binary or ASCII)
        #[arg(name = "INPUT")]
        input: PathBuf,

        /// STL output path [default: <INPUT>output.stl]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON scene output path [default: <INPUT>.json]
        #[arg(long, conflicts_with = "no_json")]
        json: Option<PathBuf>,

        /// Write ASCII STL instead of binary
        #[arg(long)]
        ascii: bool,

        /// Binary header text, or solid name for ASCII
        #[arg(long)]
        header: Option<String>,

        /// Skip the JSON scene export
        #[arg(long)]
        no_json: bool,

        /// Pretty-print the JSON scene
        #[arg(long)]
        pretty: bool,
    },

    /// Print the detected format, counts and bounds of an STL file
    Info {
        /// STL file to inspect
        #[arg(name = "INPUT")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            json,
            ascii,
            header,
            no_json,
            pretty,
        } => {
            let mut params = if ascii {
                StlWriteParams::ascii()
            } else {
                StlWriteParams::default()
            };
            if let Some(header) = header {
                params = params.with_header(header);
            }
            let json = if no_json {
                None
            } else {
                Some(json.unwrap_or_else(|| default_json_path(&input)))
            };
            let output = output.unwrap_or_else(|| default_stl_path(&input));
            convert(&input, &output, &params, json.as_deref(), pretty)
        }
        Commands::Info { input } => {
            let detected = load(&input)?;
            print!("{}", describe(&input, &detected));
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(input: &Path) -> Result<Detected> {
    load_stl_detailed(input).with_context(|| format!("failed to read {}", input.display()))
}

fn convert(
    input: &Path,
    output: &Path,
    params: &StlWriteParams,
    json: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let detected = load(input)?;
    info!(format = %detected.format, facets = detected.mesh.face_count(), "decoded input");

    save_stl(&detected.mesh, output, params)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("wrote {} ({} STL)", output.display(), params.format);

    if let Some(json) = json {
        let scene = SceneExportParams {
            name: scene_name(input),
            pretty,
        };
        save_scene_json(&detected.mesh, json, &scene)
            .with_context(|| format!("failed to write {}", json.display()))?;
        println!("wrote {}", json.display());
    }
    Ok(())
}

/// `<INPUT>output.stl`, appended to the input path as given.
fn default_stl_path(input: &Path) -> PathBuf {
    append(input, "output.stl")
}

/// `<INPUT>.json`, appended to the input path as given.
fn default_json_path(input: &Path) -> PathBuf {
    append(input, ".json")
}

fn append(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn scene_name(input: &Path) -> String {
    input
        .file_stem()
        .map_or_else(|| "mesh".to_string(), |s| s.to_string_lossy().into_owned())
}

fn describe(input: &Path, detected: &Detected) -> String {
    let mesh = &detected.mesh;
    let mut text = format!(
        "file:     {}\nformat:   {}\nfacets:   {}\nvertices: {}\n",
        input.display(),
        detected.format,
        mesh.face_count(),
        mesh.vertex_count(),
    );
    let bounds = mesh.bounds();
    if bounds.is_empty() {
        text.push_str("bounds:   empty\n");
    } else {
        let (min, max) = (bounds.min, bounds.max);
        text.push_str(&format!(
            "bounds:   [{}, {}, {}] .. [{}, {}, {}]\n",
            min.x, min.y, min.z, max.x, max.y, max.z
        ));
    }
    text
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! `nodeclip` - copy and paste geometry node graphs as text.
//!
//! Works on scene snapshots stored as RON:
//! - `copy` prints (or writes) the text of an object's node graph
//! - `paste` decodes text onto an object and saves the scene
//! - `inspect` lists graphs and modifier bindings

mod commands;
mod config;
mod error;

use clap::{Parser, Subcommand};
use config::AppConfig;
use error::AppError;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "nodeclip")]
#[command(about = "Copy and paste geometry node graphs as text", version)]
struct Cli {
    /// RON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode an object's node graph
    Copy {
        /// Scene file
        #[arg(long)]
        scene: PathBuf,
        /// Object carrying the node modifier
        #[arg(long)]
        object: String,
        /// Leave out labels and widths
        #[arg(long)]
        omit_cosmetic: bool,
        /// Write every node's type tag
        #[arg(long)]
        explicit_types: bool,
        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode text onto an object and save the scene
    Paste {
        /// Scene file, rewritten in place
        #[arg(long)]
        scene: PathBuf,
        /// Object to attach the root graph to
        #[arg(long)]
        object: String,
        /// Input file (stdin when absent)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List graphs and modifier bindings
    Inspect {
        /// Scene file
        #[arg(long)]
        scene: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        },
        None => AppConfig::default(),
    };

    // Logs go to stderr; stdout carries the document
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli.command, &config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command, config: &AppConfig) -> Result<(), AppError> {
    match command {
        Command::Copy {
            scene,
            object,
            omit_cosmetic,
            explicit_types,
            output,
        } => {
            let mut options = config.encode;
            options.omit_cosmetic |= omit_cosmetic;
            options.include_explicit_types |= explicit_types;
            commands::copy_command(&scene, &object, &options, output.as_deref())
        }
        Command::Paste {
            scene,
            object,
            input,
        } => commands::paste_command(&scene, &object, input.as_deref()),
        Command::Inspect { scene } => commands::inspect_command(&scene),
    }
}

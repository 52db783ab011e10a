use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::decoder::CommandDecoder;
use crate::heatmap::HeatmapRenderer;
use crate::pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(author, version, about = "Match demo intake and player ledger", long_about = None)]
pub struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending database migrations.
    Migrate,
    /// Process pending demos.
    Work(WorkArgs),
    /// Serve the read API.
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: SocketAddr,
    },
    /// Register a demo file for processing.
    Enqueue {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct WorkArgs {
    /// Keep polling instead of exiting after a single demo.
    #[arg(long)]
    pub watch: bool,

    /// Seconds to sleep when no demo is pending.
    #[arg(long, default_value_t = 5)]
    pub interval: u64,

    #[arg(long, env = "FRAGBOARD_DECODER", value_name = "PROGRAM")]
    pub decoder: PathBuf,

    /// Decoder argument, `{input}` and `{output}` are substituted.
    #[arg(
        long = "decoder-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        default_values = CommandDecoder::DEFAULT_ARGS
    )]
    pub decoder_args: Vec<String>,

    /// Seconds before the decoder is killed.
    #[arg(long, default_value_t = 300)]
    pub decode_timeout: u64,

    /// Render heatmaps into this directory.
    #[arg(long, env = "FRAGBOARD_HEATMAP_DIR")]
    pub heatmap_dir: Option<PathBuf>,

    #[arg(long, default_value_t = HeatmapRenderer::DEFAULT_CELL_SIZE)]
    pub heatmap_cell_size: f64,
}

impl WorkArgs {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn pipeline(&self) -> Pipeline {
        let decoder = CommandDecoder::new(
            &self.decoder,
            self.decoder_args.clone(),
            Duration::from_secs(self.decode_timeout),
        );

        let pipeline = Pipeline::new(Box::new(decoder));
        match self.heatmap_dir.as_ref() {
            Some(dir) => pipeline.with_heatmaps(HeatmapRenderer::new(dir, self.heatmap_cell_size)),
            None => pipeline,
        }
    }
}

// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! phn CLI - hide an image inside another image, or recover it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use phn::imaging;
use phn::{
    decode_with, encode_with, Bounds, DecodeParams, EncodeParams, Parallelism, PhnError,
    PixelBuffer, DEFAULT_DEPTH,
};

/// Hide an image inside another image
///
/// Encoding nudges every colour channel of SOURCE by at most DEPTH levels,
/// driven by HIDDEN. Decoding subtracts the original back out and rescales
/// the difference. Without a second image a uniform background (see -c)
/// with the first image's size takes its place.
#[derive(Parser, Debug)]
#[command(name = "phn")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    phn hidden.png source.png -o encoded.png
    phn hidden.png -c 336699 -o encoded.png
    phn --decode encoded.png source.png -d 0 -o recovered.png
    phn --estimate encoded.png --sigma 10 -o estimate.png")]
struct Cli {
    /// Image to hide (encode) or encoded image (--decode / --estimate).
    /// With --decode the encoded image always comes first, then the original.
    #[arg(value_name = "IMAGE")]
    first: PathBuf,

    /// Visible source image (encode) or original source (--decode)
    #[arg(value_name = "SOURCE")]
    second: Option<PathBuf>,

    /// Output file; the container is chosen by extension
    #[arg(short, long, default_value = "output.png", value_name = "FILE")]
    output: PathBuf,

    /// Colour depth: maximum per-channel change. 0 on decode reads it from the image
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    /// Decode IMAGE against SOURCE
    #[arg(long, conflicts_with = "estimate")]
    decode: bool,

    /// Decode IMAGE against a blurred copy of itself
    #[arg(long)]
    estimate: bool,

    /// Blur strength for --estimate
    #[arg(long, default_value_t = 10.0, value_name = "SIGMA")]
    sigma: f32,

    /// Background colour (RRGGBB hex) when SOURCE is omitted; gray by default
    #[arg(short = 'c', long = "colour", default_value = "", value_name = "HEX")]
    colour: String,

    /// Seed for the encoder's direction choices (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads; 0 uses all available cores
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Do not print anything on success or failure
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    if let Err(e) = run(&cli) {
        if !cli.quiet {
            eprintln!("error: {e}");
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<(), PhnError> {
    let first = imaging::load(&cli.first)?;
    let parallelism = Parallelism::from_count(cli.workers);
    let decode_params = DecodeParams::new()
        .with_depth(cli.depth)
        .with_parallelism(parallelism);

    let output = if cli.estimate {
        if cli.second.is_some() {
            log::warn!("--estimate ignores the second image");
        }
        imaging::estimate(&first, cli.sigma, &decode_params)?
    } else {
        let second = match &cli.second {
            Some(path) => imaging::load(path)?,
            None => background(&cli.colour, first.bounds())?,
        };
        if cli.decode {
            decode_with(&first, &second, &decode_params)
        } else {
            let mut params = EncodeParams::new()
                .with_depth(cli.depth)
                .with_parallelism(parallelism);
            if let Some(seed) = cli.seed {
                params = params.with_seed(expand_seed(seed));
            }
            encode_with(&second, &first, &params)
        }
    };

    imaging::save(&output, &cli.output)?;
    if !cli.quiet {
        eprintln!(
            "wrote {} ({}x{})",
            cli.output.display(),
            output.width(),
            output.height()
        );
    }
    Ok(())
}

/// Warnings go to stderr by default; `RUST_LOG` overrides, `-q` silences.
fn init_logging(quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp(None);
    if quiet {
        builder.filter_level(log::LevelFilter::Off);
    }
    builder.init();
}

/// Opaque uniform image standing in for a missing second input.
fn background(colour: &str, bounds: Bounds) -> Result<PixelBuffer, PhnError> {
    let [r, g, b] = imaging::parse_hex_colour(colour);
    Ok(PixelBuffer::uniform(bounds, [r, g, b, 255])?)
}

fn expand_seed(seed: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    ChaCha20Rng::seed_from_u64(seed).fill_bytes(&mut out);
    out
}

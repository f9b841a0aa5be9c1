// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixelwerk — command-line front end.
//
// Entry point. Initialises logging, decodes the input image, runs the requested
// transform(s), and encodes the result.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pixelwerk_core::{PixelwerkError, Result, TransformConfig};
use pixelwerk_transform::{Pipeline, Transform, Transformer, interop};

#[derive(Parser)]
#[command(name = "pixelwerk")]
#[command(version, about = "Grayscale, contrast, and crop for raster images", long_about = None)]
struct Cli {
    /// Transform configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert to grayscale using the luminosity method
    Grayscale {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Adjust contrast
    Contrast {
        #[command(flatten)]
        io: IoArgs,

        /// Contrast level (0 = no change, 259 is invalid)
        #[arg(long, allow_negative_numbers = true)]
        level: f64,
    },

    /// Crop a region measured from the bottom-left corner
    Crop {
        #[command(flatten)]
        io: IoArgs,

        /// Left edge of the region
        #[arg(long, allow_negative_numbers = true)]
        x: i64,

        /// Bottom edge of the region, counted up from the bottom of the image
        #[arg(long, allow_negative_numbers = true)]
        y: i64,

        /// Region width
        #[arg(long, allow_negative_numbers = true)]
        width: i64,

        /// Region height
        #[arg(long, allow_negative_numbers = true)]
        height: i64,
    },

    /// Run a JSON pipeline of transforms
    Run {
        #[command(flatten)]
        io: IoArgs,

        /// Pipeline file (JSON)
        #[arg(short, long, value_name = "FILE")]
        pipeline: PathBuf,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input image
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output image; format follows the extension
    #[arg(short, long, value_name = "OUTPUT")]
    out: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "pixelwerk failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let transformer = Transformer::new(load_config(cli.config.as_deref())?)?;

    let (io, pipeline) = match cli.command {
        Commands::Grayscale { io } => (io, Pipeline::new(vec![Transform::Grayscale])),
        Commands::Contrast { io, level } => {
            (io, Pipeline::new(vec![Transform::Contrast { level }]))
        }
        Commands::Crop {
            io,
            x,
            y,
            width,
            height,
        } => (
            io,
            Pipeline::new(vec![Transform::Crop {
                x,
                y,
                width,
                height,
            }]),
        ),
        Commands::Run { io, pipeline } => {
            let text = std::fs::read_to_string(&pipeline)?;
            (io, Pipeline::from_json(&text)?)
        }
    };

    process(&transformer, &pipeline, &io.input, &io.out)
}

/// Decode `input`, run `pipeline`, and write the result to `output`.
fn process(
    transformer: &Transformer,
    pipeline: &Pipeline,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let image = interop::open(input)?;
    let result = pipeline.run(transformer, &image).map_err(unwrap_single_step(pipeline))?;
    interop::save(&result, output)?;
    tracing::info!(
        output = %output.display(),
        width = result.width(),
        height = result.height(),
        "Done"
    );
    Ok(())
}

/// Single-op subcommands report the bare failure rather than "step 0 failed".
fn unwrap_single_step(pipeline: &Pipeline) -> impl Fn(PixelwerkError) -> PixelwerkError + '_ {
    move |err| match err {
        PixelwerkError::Step { source, .. } if pipeline.steps.len() == 1 => *source,
        other => other,
    }
}

fn load_config(path: Option<&Path>) -> Result<TransformConfig> {
    match path {
        Some(path) => TransformConfig::from_json(&std::fs::read_to_string(path)?),
        None => Ok(TransformConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pixelwerk_core::{InvalidInput, RasterImage};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_crop_coordinates_parse() {
        let cli = Cli::try_parse_from([
            "pixelwerk", "crop", "in.png", "-o", "out.png", "--x", "-1", "--y", "-1", "--width",
            "2", "--height", "2",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Crop { x: -1, y: -1, .. }));
    }

    #[test]
    fn crop_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let img = RasterImage::from_fn(2, 2, |x, y| {
            if x == 0 && y == 1 {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            }
        });
        interop::save(&img, &input).unwrap();

        let pipeline = Pipeline::new(vec![Transform::Crop {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        }]);
        process(&Transformer::default(), &pipeline, &input, &output).unwrap();

        let out = interop::open(&output).unwrap();
        assert_eq!(out.dimensions(), (1, 1));
        assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn single_op_failure_is_reported_bare() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        interop::save(&RasterImage::from_pixel(16, 16, [255, 0, 0, 255]), &input).unwrap();

        let pipeline = Pipeline::new(vec![Transform::Crop {
            x: 17,
            y: 17,
            width: 2,
            height: 2,
        }]);
        let err = process(
            &Transformer::default(),
            &pipeline,
            &input,
            &dir.path().join("out.png"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PixelwerkError::InvalidInput(InvalidInput::StartOutOfBounds)
        ));
        assert_eq!(err.to_string(), "starting coordinates out of bounds");
    }

    /// Write a 4x4 test image into `dir` and return its path as a string.
    fn write_input(dir: &Path) -> String {
        let input = dir.join("in.png");
        let img = RasterImage::from_fn(4, 4, |x, y| [x as u8 * 60, y as u8 * 60, 200, 255]);
        interop::save(&img, &input).unwrap();
        input.display().to_string()
    }

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["pixelwerk"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn contrast_subcommand_accepts_negative_level() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("out.png");
        let out_arg = output.display().to_string();

        let cli = parse(&["contrast", &input, "-o", &out_arg, "--level", "-50"]);
        assert!(matches!(cli.command, Commands::Contrast { level, .. } if level == -50.0));
        run(cli).unwrap();

        let expected =
            pixelwerk_transform::contrast(&interop::open(&input).unwrap(), -50.0).unwrap();
        assert_eq!(interop::open(&output).unwrap(), expected);
    }

    #[test]
    fn grayscale_subcommand_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("gray.png");

        run(parse(&["grayscale", &input, "-o", &output.display().to_string()])).unwrap();

        let out = interop::open(&output).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.pixels_rgba().all(|px| px[0] == px[1] && px[1] == px[2]));
    }

    #[test]
    fn run_subcommand_reads_pipeline_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("out.png");
        let pipeline = dir.path().join("pipeline.json");
        std::fs::write(
            &pipeline,
            r#"[{"op":"crop","x":1,"y":1,"width":2,"height":3},{"op":"grayscale"}]"#,
        )
        .unwrap();

        run(parse(&[
            "run",
            &input,
            "-o",
            &output.display().to_string(),
            "--pipeline",
            &pipeline.display().to_string(),
        ]))
        .unwrap();

        let source = interop::open(&input).unwrap();
        let expected =
            pixelwerk_transform::grayscale(&pixelwerk_transform::crop(&source, 1, 1, 2, 3).unwrap())
                .unwrap();
        assert_eq!(interop::open(&output).unwrap(), expected);
    }

    #[test]
    fn bad_config_weights_stop_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("out.png");
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"grayscale_weights":{"r":-1.0,"g":0.5,"b":0.5}}"#).unwrap();

        let err = run(parse(&[
            "--config",
            &config.display().to_string(),
            "grayscale",
            &input,
            "-o",
            &output.display().to_string(),
        ]))
        .unwrap_err();
        assert!(matches!(err, PixelwerkError::Config(_)));
        assert!(!output.exists());
    }

    #[test]
    fn config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"contrast_level_domain":"clamped"}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(
            config.contrast_level_domain,
            pixelwerk_core::LevelDomain::Clamped
        );
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use image::RgbaImage;
use indicatif::{HumanDuration, ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::{
    ffi::OsStr,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use qoi::{ChannelMode, Colorspace, QoiDescriptor};

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Path(s) to input image files. A `.qoi` input decodes to PNG; any
    /// other extension encodes to `.qoi`.
    input: Vec<PathBuf>,
    /// Directory to write output files *UNIMPLEMENTED*
    #[arg(short = 'd', long = "output-dir")]
    output_dir: Option<PathBuf>,
    /// Mark encoded output as sRGB (colorspace byte 0) instead of all-linear (1).
    #[arg(long)]
    srgb: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let colorspace = if cli.srgb {
        Colorspace::Srgb
    } else {
        Colorspace::Linear
    };
    if cli.input.len() == 1 {
        let input = &cli.input[0];
        dispatch(input, colorspace)?;
        println!("done!!");
    } else {
        let started = Instant::now();
        let failures: Vec<_> = cli
            .input
            .par_iter()
            .progress_with(
                ProgressBar::new(cli.input.len() as u64).with_style(
                    ProgressStyle::with_template("[{pos}/{len}] [{wide_bar}] {per_sec}")
                        .expect("incorect style")
                        .progress_chars("=> "),
                ),
            )
            .filter_map(|input| dispatch(input, colorspace).err())
            .collect();

        for failure in &failures {
            eprintln!("error: {failure:#}");
        }
        println!("Done in {}", HumanDuration(started.elapsed()));
        if !failures.is_empty() {
            anyhow::bail!("{} of {} files failed", failures.len(), cli.input.len());
        }
    }
    Ok(())
}

fn dispatch(input: &Path, colorspace: Colorspace) -> Result<()> {
    match input.extension().and_then(OsStr::to_str) {
        Some("qoi") => save_from_qoi(input),
        Some(_) => save_to_qoi(input, colorspace),
        None => anyhow::bail!("{input:?} has no extension"),
    }
}

fn save_to_qoi(input: &Path, colorspace: Colorspace) -> Result<()> {
    let image = image::open(input)
        .with_context(|| format!("failed to load {input:?} as an image"))?;
    let pixels = image.to_rgba8();

    let bytes = qoi::qoi_encode(
        &pixels,
        &QoiDescriptor {
            width: image.width() as usize,
            height: image.height() as usize,
            channels: ChannelMode::Rgba,
            colorspace,
        },
    )
    .with_context(|| format!("failed to encode {input:?} as qoi"))?;

    let output = input.with_extension("qoi");
    let mut file =
        File::create(&output).with_context(|| format!("cannot create {output:?}"))?;
    file.write_all(&bytes)
        .with_context(|| format!("cannot write {output:?}"))
}

fn save_from_qoi(input: &Path) -> Result<()> {
    let file = File::open(input).with_context(|| format!("cannot open {input:?}"))?;
    let buf = BufReader::new(file);

    let (pixels, desc) = qoi::qoi_decode(buf, Some(ChannelMode::Rgba))
        .with_context(|| format!("failed to decode {input:?} as qoi"))?;

    let output = input.with_extension("png");
    RgbaImage::from_raw(desc.width as u32, desc.height as u32, pixels)
        .context("decoded pixel buffer does not match declared dimensions")?
        .save(&output)
        .with_context(|| format!("unable to save image to {output:?}"))
}

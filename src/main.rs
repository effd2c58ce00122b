//! Command line front end: enumerates every legal board for a requested
//! size and streams the results to a CSV or JSON Lines file.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use log::info;

use crossmath_layout::export::{ChunkedWriter, LayoutRecord};
use crossmath_layout::generate::{generate, DEFAULT_EQUATION_LENGTH};
use crossmath_layout::model::Size;
use crossmath_layout::progress::{format_elapsed, DynamicProgress};

const DEFAULT_CHUNK_SIZE: usize = 50_000;

struct Args {
    height: usize,
    width: usize,
    output: PathBuf,
    chunk_size: usize,
}

fn print_usage(program: &str) {
    eprintln!(
        "usage: {program} -H <height> -W <width> -o <output.csv|output.jsonl> [-s <chunk-size>]

options:
  -H, --height <n>      board height in cells
  -W, --width <n>       board width in cells
  -o, --output <path>   output file, format chosen by extension (.csv or .jsonl)
  -s, --chunk-size <n>  rows per output chunk (default {DEFAULT_CHUNK_SIZE})
  -h, --help            show this message"
    );
}

fn parse_args() -> anyhow::Result<Args> {
    let mut argv = std::env::args();
    let program = argv.next().unwrap_or_else(|| "crossmath-layout".into());

    let mut height = None;
    let mut width = None;
    let mut output = None;
    let mut chunk_size = DEFAULT_CHUNK_SIZE;

    while let Some(arg) = argv.next() {
        let mut value = |name: &str| {
            argv.next()
                .with_context(|| format!("missing value for {name}"))
        };
        match arg.as_str() {
            "-H" | "--height" => {
                height = Some(value(&arg)?.parse().context("height must be a number")?)
            }
            "-W" | "--width" => {
                width = Some(value(&arg)?.parse().context("width must be a number")?)
            }
            "-o" | "--output" => output = Some(PathBuf::from(value(&arg)?)),
            "-s" | "--chunk-size" => {
                chunk_size = value(&arg)?.parse().context("chunk size must be a number")?
            }
            "-h" | "--help" => {
                print_usage(&program);
                std::process::exit(0);
            }
            other => {
                print_usage(&program);
                anyhow::bail!("unrecognized argument {other:?}");
            }
        }
    }

    Ok(Args {
        height: height.context("missing required argument -H/--height")?,
        width: width.context("missing required argument -W/--width")?,
        output: output.context("missing required argument -o/--output")?,
        chunk_size,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let size = Size::new(args.height, args.width)?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create output directory {parent:?}"))?;
        }
    }
    let mut writer = ChunkedWriter::new(&args.output, args.chunk_size)
        .with_context(|| format!("cannot open output {:?}", args.output))?;

    info!(
        "enumerating {}x{} boards into {:?}",
        size.height(),
        size.width(),
        args.output
    );

    let started = Instant::now();
    let mut progress = DynamicProgress::new("boards", args.chunk_size);
    for (i, board) in generate(size, DEFAULT_EQUATION_LENGTH).enumerate() {
        writer.push(&LayoutRecord::new(i + 1, &board))?;
        progress.update(1);
    }
    let found = progress.finish();
    let paths = writer.finish()?;

    info!(
        "found {} boards in {} across {} file(s)",
        found,
        format_elapsed(started.elapsed(), 1),
        paths.len()
    );
    Ok(())
}

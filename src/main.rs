//! ninepatch CLI - compile images into RGB565 nine-patch headers

use clap::{Args, Parser, Subcommand, ValueEnum};
use ninepatch::emit::{self, EmitOptions, OutputFormat};
use ninepatch::render::{self, FillMode, RenderOptions};
use ninepatch::{
    BorderSpec, CenterSample, CompileRequest, Compiler, EdgeSample, NinePatchError, Role,
};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ninepatch", version, about = "Compile images into nine-patch RGB565 headers")]
struct Cli {
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile one or more images into headers
    Compile(CompileArgs),
    /// Print the nine regions and exported samples of an image
    Regions(RegionsArgs),
    /// Render a compiled image at an arbitrary size to a PNG
    Preview(PreviewArgs),
}

#[derive(Args)]
struct RequestArgs {
    /// JSON request file; command-line flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Name prefix for emitted symbols (single input only; batches use each file stem)
    #[arg(short, long)]
    prefix: Option<String>,
    /// Border thicknesses as LEFT,RIGHT,TOP,BOTTOM
    #[arg(short, long, value_parser = parse_border)]
    border: Option<BorderSpec>,
    #[arg(long)]
    corner_top_left_width: Option<u32>,
    #[arg(long)]
    corner_top_left_height: Option<u32>,
    #[arg(long)]
    corner_top_right_width: Option<u32>,
    #[arg(long)]
    corner_top_right_height: Option<u32>,
    #[arg(long)]
    corner_bottom_left_width: Option<u32>,
    #[arg(long)]
    corner_bottom_left_height: Option<u32>,
    #[arg(long)]
    corner_bottom_right_width: Option<u32>,
    #[arg(long)]
    corner_bottom_right_height: Option<u32>,
    /// Top edge sample as OFFSET,LENGTH
    #[arg(long, value_parser = parse_edge)]
    top_sample: Option<EdgeSample>,
    /// Bottom edge sample as OFFSET,LENGTH
    #[arg(long, value_parser = parse_edge)]
    bottom_sample: Option<EdgeSample>,
    /// Left edge sample as OFFSET,LENGTH
    #[arg(long, value_parser = parse_edge)]
    left_sample: Option<EdgeSample>,
    /// Right edge sample as OFFSET,LENGTH
    #[arg(long, value_parser = parse_edge)]
    right_sample: Option<EdgeSample>,
    /// Center sample as X,Y,WIDTH,HEIGHT
    #[arg(long, value_parser = parse_center)]
    center_sample: Option<CenterSample>,
}

#[derive(Args)]
struct CompileArgs {
    /// Input image files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    #[command(flatten)]
    request: RequestArgs,
    /// Output file (single input) or directory (several inputs); stdout if omitted
    #[arg(short, long)]
    out: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Header)]
    format: Format,
    /// Runtime header to #include
    #[arg(long, default_value = "NinePatch.h")]
    include: String,
    /// Hex values per array line
    #[arg(long, default_value = "16")]
    values_per_line: usize,
}

#[derive(Args)]
struct RegionsArgs {
    /// Input image file
    input: PathBuf,
    #[command(flatten)]
    request: RequestArgs,
}

#[derive(Args)]
struct PreviewArgs {
    /// Input image file
    input: PathBuf,
    #[command(flatten)]
    request: RequestArgs,
    /// Target size as WIDTHxHEIGHT
    #[arg(short, long, value_parser = parse_size)]
    size: (u32, u32),
    /// Output PNG
    #[arg(short, long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = Fill::Tile)]
    edge_mode: Fill,
    #[arg(long, value_enum, default_value_t = Fill::Tile)]
    center_mode: Fill,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Header,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Header => OutputFormat::Header,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Fill {
    Tile,
    Stretch,
}

impl From<Fill> for FillMode {
    fn from(f: Fill) -> Self {
        match f {
            Fill::Tile => FillMode::Tile,
            Fill::Stretch => FillMode::Stretch,
        }
    }
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[u32; N], String> {
    let parts: Vec<u32> = s
        .split([',', 'x'])
        .map(|p| p.trim().parse::<u32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<_, _>>()?;
    parts.try_into().map_err(|_| format!("expected {N} numbers, got {s:?}"))
}

fn parse_border(s: &str) -> Result<BorderSpec, String> {
    let [left, right, top, bottom] = parse_numbers::<4>(s)?;
    Ok(BorderSpec::new(left, right, top, bottom))
}

fn parse_edge(s: &str) -> Result<EdgeSample, String> {
    let [offset, length] = parse_numbers::<2>(s)?;
    Ok(EdgeSample { offset, length })
}

fn parse_center(s: &str) -> Result<CenterSample, String> {
    let [offset_x, offset_y, width, height] = parse_numbers::<4>(s)?;
    Ok(CenterSample { offset_x, offset_y, width, height })
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let [w, h] = parse_numbers::<2>(s)?;
    Ok((w, h))
}

impl RequestArgs {
    fn resolve(&self) -> Result<CompileRequest, NinePatchError> {
        let mut req = match &self.config {
            Some(path) => CompileRequest::load(path)?,
            None => CompileRequest::default(),
        };
        if let Some(prefix) = &self.prefix {
            req.prefix = prefix.clone();
        }
        if let Some(border) = self.border {
            req.border = border;
        }
        let c = &mut req.corners;
        for (slot, value) in [
            (&mut c.top_left.width, self.corner_top_left_width),
            (&mut c.top_left.height, self.corner_top_left_height),
            (&mut c.top_right.width, self.corner_top_right_width),
            (&mut c.top_right.height, self.corner_top_right_height),
            (&mut c.bottom_left.width, self.corner_bottom_left_width),
            (&mut c.bottom_left.height, self.corner_bottom_left_height),
            (&mut c.bottom_right.width, self.corner_bottom_right_width),
            (&mut c.bottom_right.height, self.corner_bottom_right_height),
        ] {
            if value.is_some() {
                *slot = value;
            }
        }
        let s = &mut req.samples;
        if let Some(v) = self.top_sample {
            s.top = v;
        }
        if let Some(v) = self.bottom_sample {
            s.bottom = v;
        }
        if let Some(v) = self.left_sample {
            s.left = v;
        }
        if let Some(v) = self.right_sample {
            s.right = v;
        }
        if let Some(v) = self.center_sample {
            s.center = v;
        }
        Ok(req)
    }
}

fn file_stem_prefix(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[tracing::instrument(skip(request, options), fields(prefix = %request.prefix))]
fn compile_one(
    input: &Path,
    request: CompileRequest,
    format: OutputFormat,
    options: &EmitOptions,
) -> Result<String, NinePatchError> {
    let image = image::open(input)?;
    let set = Compiler::new(request).compile(&image)?;
    emit::emit(&set, format, options)
}

fn run_compile(args: CompileArgs) -> Result<(), NinePatchError> {
    let base = args.request.resolve()?;
    let format = OutputFormat::from(args.format);
    let options = EmitOptions { include: args.include, values_per_line: args.values_per_line };

    if let [input] = args.inputs.as_slice() {
        let text = compile_one(input, base, format, &options)?;
        match &args.out {
            Some(path) => {
                std::fs::write(path, text)?;
                tracing::info!(path = %path.display(), "wrote");
            }
            None => print!("{text}"),
        }
        return Ok(());
    }

    let dir = args.out.ok_or_else(|| {
        NinePatchError::Input("several inputs need --out DIRECTORY".to_string())
    })?;

    let jobs = plan_batch(&args.inputs, &base, args.request.prefix.is_some(), format, &dir)?;

    // Each image gets its own request; nothing is shared between jobs.
    let outputs: Vec<(PathBuf, String)> = jobs
        .into_par_iter()
        .map(|job| -> Result<(PathBuf, String), NinePatchError> {
            let text = compile_one(job.input, job.request, format, &options)?;
            Ok((job.out, text))
        })
        .collect::<Result<_, _>>()?;

    std::fs::create_dir_all(&dir)?;
    for (path, text) in outputs {
        std::fs::write(&path, text)?;
        tracing::info!(path = %path.display(), "wrote");
    }
    Ok(())
}

struct BatchJob<'a> {
    input: &'a Path,
    request: CompileRequest,
    out: PathBuf,
}

/// Resolve each input's request and output path. Two inputs that would land on the
/// same file are rejected before anything is compiled.
fn plan_batch<'a>(
    inputs: &'a [PathBuf],
    base: &CompileRequest,
    fixed_prefix: bool,
    format: OutputFormat,
    dir: &Path,
) -> Result<Vec<BatchJob<'a>>, NinePatchError> {
    if fixed_prefix {
        return Err(NinePatchError::Input(
            "--prefix names a single output; drop it to name batch outputs by file stem"
                .to_string(),
        ));
    }

    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut jobs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let mut request = base.clone();
        request.prefix = file_stem_prefix(input);
        let out = dir.join(format!("{}_ninepatch.{}", request.prefix, format.extension()));
        if let Some(first) = seen.insert(out.clone(), input) {
            return Err(NinePatchError::Input(format!(
                "{} and {} both map to {}",
                first.display(),
                input.display(),
                out.display()
            )));
        }
        jobs.push(BatchJob { input, request, out });
    }
    Ok(jobs)
}

fn run_regions(args: RegionsArgs) -> Result<(), NinePatchError> {
    let request = args.request.resolve()?;
    let (width, height) = image::image_dimensions(&args.input)?;
    let layout = Compiler::new(request).layout(width, height)?;
    println!("image {width}x{height}");
    for role in Role::ALL {
        let base = layout.base_rect(role);
        let sample = layout.export_rect(role);
        println!(
            "{:<12}  base ({}, {}, {}, {})  export ({}, {}, {}, {})",
            role.suffix().trim_start_matches('_').to_ascii_lowercase(),
            base.x,
            base.y,
            base.w,
            base.h,
            sample.x,
            sample.y,
            sample.w,
            sample.h,
        );
    }
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<(), NinePatchError> {
    let request = args.request.resolve()?;
    let image = image::open(&args.input)?;
    let set = Compiler::new(request).compile(&image)?;
    let options = RenderOptions {
        edge_mode: args.edge_mode.into(),
        center_mode: args.center_mode.into(),
    };
    let (w, h) = args.size;
    let canvas = render::render(&set, w, h, &options);
    canvas.to_rgb_image().save(&args.out)?;
    tracing::info!(
        path = %args.out.display(),
        width = canvas.width,
        height = canvas.height,
        "wrote preview"
    );
    Ok(())
}

fn main() -> Result<(), NinePatchError> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Compile(args) => run_compile(args),
        Command::Regions(args) => run_regions(args),
        Command::Preview(args) => run_preview(args),
    }
}

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use hush::{
    CpuSurface, ExportSink as _, FontFace, FrameIndex, HostEvent, PngExport, Point, Sketch,
    SketchConfig, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "hush", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a run of frames with scripted host events.
    Sequence(SequenceArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// JSON config overriding any subset of the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session seed (overrides the config seed).
    #[arg(long)]
    seed: Option<u64>,

    /// TTF/OTF font used for all text (defaults to an installed serif face).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Background texture (SVG or raster image).
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Frame number to render (1 is the first frame).
    #[arg(long, default_value_t = 1)]
    frame: u64,

    /// Pointer position held for the whole run, as `X,Y`.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Number of frames to run.
    #[arg(long)]
    frames: u64,

    /// Write every k-th frame (0 writes none).
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Output directory for frames and exports.
    #[arg(long)]
    out_dir: PathBuf,

    /// Resize before frame F, as `F:WxH`.
    #[arg(long = "resize-at", value_parser = parse_resize)]
    resize_at: Vec<Scripted>,

    /// Move the pointer before frame F, as `F:X,Y`, or `F:leave` to leave the window.
    #[arg(long = "pointer-at", value_parser = parse_pointer)]
    pointer_at: Vec<Scripted>,

    /// Press a key before frame F, as `F:C`.
    #[arg(long = "key-at", value_parser = parse_key)]
    key_at: Vec<Scripted>,
}

#[derive(Clone, Copy, Debug)]
struct Scripted {
    frame: u64,
    event: HostEvent,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn open_session(args: &SessionArgs) -> anyhow::Result<(Sketch, CpuSurface)> {
    let mut config = match &args.config {
        Some(path) => SketchConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => SketchConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let viewport = Viewport::new(args.width, args.height)?;
    let font = FontFace::resolve(args.font.as_deref()).with_context(|| match &args.font {
        Some(p) => format!("load font '{}'", p.display()),
        None => "resolve system font".to_owned(),
    })?;
    let texture = hush::assets::texture::load_optional(args.texture.as_deref());

    let sketch = Sketch::new(config, viewport, texture)?;
    let surface = CpuSurface::new(viewport, font.as_ref())?;
    Ok((sketch, surface))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if args.frame == 0 {
        anyhow::bail!("--frame starts at 1");
    }
    let (mut sketch, mut surface) = open_session(&args.session)?;
    if let Some(p) = args.pointer {
        sketch.handle(HostEvent::PointerMoved(p));
    }

    for _ in 1..args.frame {
        sketch.advance()?;
    }
    let report = sketch.frame(&mut surface)?;
    let frame = surface.readback()?;

    ensure_parent(&args.out)?;
    hush::host::write_png(&args.out, &frame)?;
    eprintln!("wrote {} (frame {})", args.out.display(), report.frame.0);
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let (mut sketch, mut surface) = open_session(&args.session)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut script: Vec<Scripted> = args
        .resize_at
        .iter()
        .chain(&args.pointer_at)
        .chain(&args.key_at)
        .copied()
        .collect();
    script.sort_by_key(|s| s.frame);

    let mut exports = PngExport::new(&args.out_dir);
    let mut written = 0u64;
    for f in 1..=args.frames {
        for s in script.iter().filter(|s| s.frame == f) {
            sketch.handle(s.event);
        }
        let report = sketch.frame(&mut surface)?;
        let keep = args.every > 0 && f % args.every == 0;
        if !(keep || report.export_requested) {
            continue;
        }

        let frame = surface.readback()?;
        if keep {
            let path = args.out_dir.join(format!("frame_{f:05}.png"));
            hush::host::write_png(&path, &frame)?;
            written += 1;
        }
        if report.export_requested {
            exports.export(FrameIndex(f), &frame)?;
        }
    }

    eprintln!(
        "wrote {written} frames and {} exports to {}",
        exports.written().len(),
        args.out_dir.display()
    );
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn split_frame(s: &str) -> Result<(u64, &str), String> {
    let (frame, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:VALUE, got '{s}'"))?;
    let frame = frame
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("bad frame '{frame}': {e}"))?;
    Ok((frame, rest.trim()))
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_resize(s: &str) -> Result<Scripted, String> {
    let (frame, size) = split_frame(s)?;
    let (w, h) = size
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{size}'"))?;
    let w = w.parse::<u32>().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h.parse::<u32>().map_err(|e| format!("bad height '{h}': {e}"))?;
    let viewport = Viewport::new(w, h).map_err(|e| e.to_string())?;
    Ok(Scripted {
        frame,
        event: HostEvent::Resize(viewport),
    })
}

fn parse_pointer(s: &str) -> Result<Scripted, String> {
    let (frame, rest) = split_frame(s)?;
    let event = if rest.eq_ignore_ascii_case("leave") {
        HostEvent::PointerLeft
    } else {
        HostEvent::PointerMoved(parse_point(rest)?)
    };
    Ok(Scripted { frame, event })
}

fn parse_key(s: &str) -> Result<Scripted, String> {
    let (frame, rest) = split_frame(s)?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Scripted {
            frame,
            event: HostEvent::KeyPressed(c),
        }),
        _ => Err(format!("expected a single key, got '{rest}'")),
    }
}

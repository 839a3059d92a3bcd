use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lightrays", version)]
struct Cli {
    /// Log filter (`error`, `warn`, `info`, `debug`, `trace`, or a full `EnvFilter` directive).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG frame sequence.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Ray configuration JSON (camelCase keys). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured origin (e.g. `top-left`, `bottom-center`).
    #[arg(long)]
    origin: Option<lightrays::RayOrigin>,

    /// Container width in CSS pixels.
    #[arg(long)]
    width: f64,

    /// Container height in CSS pixels.
    #[arg(long)]
    height: f64,

    /// Device pixel ratio (clamped to 2).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Opaque background color (`#rrggbb`); transparent when omitted.
    #[arg(long, value_parser = parse_background)]
    background: Option<[u8; 4]>,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Seconds since the first frame.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Pointer position in CSS pixels, `x,y`.
    #[arg(long, value_parser = parse_pointer)]
    pointer: Option<(f64, f64)>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Number of frames.
    #[arg(long)]
    frames: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
    #[cfg(feature = "gpu")]
    Gpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn parse_pointer(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("pointer x: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("pointer y: {e}"))?;
    Ok((x, y))
}

fn parse_background(s: &str) -> Result<[u8; 4], String> {
    let c = lightrays::parse_hex_rgb(s).ok_or_else(|| format!("expected `#rrggbb`, got `{s}`"))?;
    let to_u8 = |v: f64| (v * 255.0).round() as u8;
    Ok([to_u8(c.r), to_u8(c.g), to_u8(c.b), 255])
}

fn read_config(path: Option<&Path>) -> anyhow::Result<lightrays::RayConfig> {
    match path {
        Some(p) => Ok(lightrays::RayConfig::from_path(p)?),
        None => Ok(lightrays::RayConfig::default()),
    }
}

fn mount(
    args: &SurfaceArgs,
    host: &lightrays::HeadlessHost,
) -> anyhow::Result<lightrays::LightRays> {
    let mut config = read_config(args.config.as_deref())?;
    if let Some(origin) = args.origin {
        config.origin = origin;
    }

    let kind = match args.backend {
        BackendChoice::Cpu => lightrays::BackendKind::Cpu,
        #[cfg(feature = "gpu")]
        BackendChoice::Gpu => lightrays::BackendKind::Gpu,
    };
    let provider = lightrays::BackendProvider::new(kind).with_settings(lightrays::RenderSettings {
        clear_rgba: args.background,
    });

    let mut rays = lightrays::LightRays::new(config, Box::new(host.clone()), Box::new(provider));
    rays.mount(lightrays::HostContainer::new(args.width, args.height).with_pixel_ratio(args.dpr));
    if rays.state() != lightrays::SurfaceState::Active {
        anyhow::bail!("no usable drawing context (surface is {:?})", rays.state());
    }
    Ok(rays)
}

fn deliver(batch: &lightrays::FrameBatch, rays: &mut lightrays::LightRays) -> anyhow::Result<()> {
    match batch.deliver_to(rays) {
        Some(lightrays::FrameOutcome::Drawn) => Ok(()),
        other => anyhow::bail!("frame at {} ms was not drawn ({other:?})", batch.now_ms),
    }
}

fn unpremultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn write_png(path: &Path, mut frame: lightrays::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    if frame.premultiplied {
        unpremultiply(&mut frame.data);
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let host = lightrays::HeadlessHost::new();
    let mut rays = mount(&args.surface, &host)?;
    if let Some((x, y)) = args.pointer {
        rays.pointer_moved(x, y);
    }

    deliver(&host.repaint_now(), &mut rays)?;
    if args.time > 0.0 {
        host.advance_by(args.time * 1000.0);
        deliver(&host.repaint_now(), &mut rays)?;
    }

    write_png(&args.out, rays.read_pixels()?)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be positive, got {}", args.fps);
    }
    let host = lightrays::HeadlessHost::with_frame_interval(1000.0 / args.fps);
    let mut rays = mount(&args.surface, &host)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for i in 0..args.frames {
        let batch = if i == 0 {
            host.repaint_now()
        } else {
            host.advance_frame()
        };
        deliver(&batch, &mut rays)?;
        let path = args.out_dir.join(format!("frame_{i:05}.png"));
        write_png(&path, rays.read_pixels()?)?;
    }

    tracing::info!(frames = args.frames, dir = %args.out_dir.display(), "render finished");
    eprintln!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use framegen::{
    CampaignLayer, CampaignManifest, CompositionResult, Compositor, CropShape, FrameAdjust,
    FramegenConfig, ImageSource, OutputSize, ProfilePlacement, QuarterTurn,
};

#[derive(Parser, Debug)]
#[command(name = "framegen", version)]
struct Cli {
    /// Runtime config JSON (loader and encoder options).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overlay a frame on a photo at a preset size (PNG).
    Overlay(OverlayArgs),
    /// Place a shaped profile photo on a poster under a frame (JPEG).
    Poster(PosterArgs),
    /// Cover-resize one image to a preset or explicit size (PNG).
    Resize(ResizeArgs),
}

#[derive(Args, Debug)]
struct CampaignArgs {
    /// Campaign manifest JSON; frames/posters not given directly are picked from it.
    #[arg(long)]
    campaign: Option<PathBuf>,

    /// Frame id within the campaign (falls back to the default frame).
    #[arg(long)]
    frame_id: Option<u64>,
}

#[derive(Args, Debug)]
struct OverlayArgs {
    /// Photo path, URL, or data URL.
    #[arg(long)]
    photo: String,

    /// Frame path, URL, or data URL.
    #[arg(long)]
    frame: Option<String>,

    #[command(flatten)]
    campaign: CampaignArgs,

    /// Output preset name; unknown names fall back to instagram_post.
    #[arg(long, default_value = "instagram_post")]
    size: String,

    /// Frame rotation in degrees, counter-clockwise, multiple of 90.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    frame_rotation: i32,

    #[arg(long)]
    flip_h: bool,

    #[arg(long)]
    flip_v: bool,

    /// Frame opacity in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    opacity: f32,

    /// Output file, or an existing directory to receive a generated name.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PosterArgs {
    /// Poster path, URL, or data URL.
    #[arg(long)]
    poster: Option<String>,

    /// Poster id within the campaign (falls back to the default poster).
    #[arg(long)]
    poster_id: Option<u64>,

    /// Profile photo path, URL, or data URL.
    #[arg(long)]
    profile: String,

    /// Frame path, URL, or data URL.
    #[arg(long)]
    frame: Option<String>,

    #[command(flatten)]
    campaign: CampaignArgs,

    /// Profile center x; defaults to the poster center.
    #[arg(long, allow_hyphen_values = true)]
    x: Option<i32>,

    /// Profile center y; defaults to the poster center.
    #[arg(long, allow_hyphen_values = true)]
    y: Option<i32>,

    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Counter-clockwise rotation in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotation: f64,

    /// circle, square, or rectangle.
    #[arg(long, default_value = "circle")]
    shape: String,

    /// Output file, or an existing directory to receive a generated name.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ResizeArgs {
    /// Input path, URL, or data URL.
    #[arg(long = "in")]
    input: String,

    /// Output preset name; ignored when --width and --height are given.
    #[arg(long, default_value = "instagram_post")]
    size: String,

    #[arg(long, requires = "height")]
    width: Option<u32>,

    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Output file, or an existing directory to receive a generated name.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => FramegenConfig::from_path(path)?,
        None => FramegenConfig::default(),
    };
    let compositor = Compositor::from_config(&cfg)?;

    match cli.cmd {
        Command::Overlay(args) => cmd_overlay(&compositor, args),
        Command::Poster(args) => cmd_poster(&compositor, args),
        Command::Resize(args) => cmd_resize(&compositor, args),
    }
}

fn cmd_overlay(compositor: &Compositor, args: OverlayArgs) -> anyhow::Result<()> {
    let campaign = load_campaign(args.campaign.campaign.as_deref())?;
    let frame = pick_source(
        args.frame.as_deref(),
        campaign.as_ref(),
        |m| m.frame(args.campaign.frame_id),
        "frame",
    )?;
    let adjust = FrameAdjust {
        rotation: QuarterTurn::from_degrees(args.frame_rotation)?,
        flip_h: args.flip_h,
        flip_v: args.flip_v,
        opacity: args.opacity,
    };

    let result = compositor.overlay_adjusted(
        ImageSource::from_locator(&args.photo),
        frame,
        OutputSize::from_name_or_default(&args.size),
        &adjust,
    )?;
    write_result(&result, &args.out)
}

fn cmd_poster(compositor: &Compositor, args: PosterArgs) -> anyhow::Result<()> {
    let campaign = load_campaign(args.campaign.campaign.as_deref())?;
    let poster = pick_source(
        args.poster.as_deref(),
        campaign.as_ref(),
        |m| m.poster(args.poster_id),
        "poster",
    )?;
    let frame = pick_source(
        args.frame.as_deref(),
        campaign.as_ref(),
        |m| m.frame(args.campaign.frame_id),
        "frame",
    )?;
    let placement = ProfilePlacement {
        center_x: args.x,
        center_y: args.y,
        scale: args.scale,
        rotation_degrees: args.rotation,
        crop_shape: CropShape::from_name(&args.shape),
    };

    let result = compositor.compose_poster(
        poster,
        ImageSource::from_locator(&args.profile),
        frame,
        &placement,
    )?;
    write_result(&result, &args.out)
}

fn cmd_resize(compositor: &Compositor, args: ResizeArgs) -> anyhow::Result<()> {
    let target = match (args.width, args.height) {
        (Some(w), Some(h)) => (w, h),
        _ => OutputSize::from_name_or_default(&args.size).dimensions(),
    };
    let image = compositor
        .loader()
        .load(ImageSource::from_locator(&args.input))?;
    let resized = framegen::resize_and_crop(image, target)?;
    let result = CompositionResult::png(&resized.into_rgba8())?;
    write_result(&result, &args.out)
}

fn load_campaign(path: Option<&Path>) -> anyhow::Result<Option<(CampaignManifest, PathBuf)>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let manifest = CampaignManifest::from_path(path)?;
    let root = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
    Ok(Some((manifest, root)))
}

/// Direct locator wins; otherwise the campaign layer chosen by `select`, with
/// relative paths resolved against the manifest's directory.
fn pick_source<'a>(
    direct: Option<&str>,
    campaign: Option<&'a (CampaignManifest, PathBuf)>,
    select: impl FnOnce(&'a CampaignManifest) -> framegen::FramegenResult<&'a CampaignLayer>,
    what: &str,
) -> anyhow::Result<ImageSource> {
    if let Some(locator) = direct {
        return Ok(ImageSource::from_locator(locator));
    }
    let Some((manifest, root)) = campaign else {
        anyhow::bail!("no {what} given: pass --{what} or --campaign");
    };
    let layer = select(manifest)?;
    tracing::info!(
        campaign = %manifest.code,
        id = layer.id,
        name = %layer.name,
        "using campaign {}",
        what
    );
    Ok(match &layer.source {
        ImageSource::Path(p) if p.is_relative() => ImageSource::Path(root.join(p)),
        other => other.clone(),
    })
}

fn write_result(result: &CompositionResult, out: &Path) -> anyhow::Result<()> {
    let path = if out.is_dir() {
        out.join(&result.suggested_filename)
    } else {
        out.to_path_buf()
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&path, &result.bytes)
        .with_context(|| format!("write {} '{}'", result.mime_type(), path.display()))?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

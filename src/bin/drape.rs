use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "drape", version)]
struct Cli {
    /// Config JSON overriding step sizes, overlay opacity and segmentation limits.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten a scene into a PNG snapshot at the base image's size.
    Flatten(SceneArgs),
    /// Render a scene's on-screen preview as a PNG.
    Preview(SceneArgs),
    /// List catalog products as JSON.
    Catalog(CatalogArgs),
    /// Remove the background of an image.
    Cutout(CutoutArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Catalog JSON; the bundled products when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Single product by id.
    #[arg(long)]
    id: Option<String>,

    #[arg(long)]
    category: Option<drape::Category>,

    /// Only customizable products.
    #[arg(long)]
    customizable: bool,

    /// Only products with virtual try-on.
    #[arg(long)]
    try_on: bool,

    /// First N products.
    #[arg(long)]
    featured: Option<usize>,
}

#[derive(Parser, Debug)]
struct CutoutArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = SegmenterChoice::Backdrop)]
    segmenter: SegmenterChoice,

    /// Per-channel tolerance of the backdrop key.
    #[arg(long, default_value_t = 24)]
    tolerance: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SegmenterChoice {
    /// Key out the flat color found in the corners.
    Backdrop,
    /// Keep every pixel.
    Passthrough,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => drape::DrapeConfig::load(path)?,
        None => drape::DrapeConfig::default(),
    };
    match cli.cmd {
        Command::Flatten(args) => cmd_flatten(args, &config),
        Command::Preview(args) => cmd_preview(args, &config),
        Command::Catalog(args) => cmd_catalog(args),
        Command::Cutout(args) => cmd_cutout(args, &config),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DRAPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scene(path: &Path, config: &drape::DrapeConfig) -> anyhow::Result<drape::LoadedScene> {
    let scene = drape::Scene::load_file(path)?;
    let loaded = scene
        .resolve(drape::scene_root(path), config)
        .with_context(|| format!("resolve scene '{}'", path.display()))?;
    Ok(loaded)
}

fn cmd_flatten(args: SceneArgs, config: &drape::DrapeConfig) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path, config)?;
    let snapshot = drape::Compositor::new(config).flatten(&scene.base, scene.store.layers())?;
    snapshot.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_preview(args: SceneArgs, config: &drape::DrapeConfig) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path, config)?;
    let snapshot = drape::Compositor::new(config).render_preview(
        &scene.base,
        &scene.store,
        scene.container,
    )?;
    snapshot.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let catalog = match &args.in_path {
        Some(path) => drape::Catalog::load(path)?,
        None => drape::Catalog::builtin()?,
    };

    let mut products: Vec<&drape::Product> = match &args.id {
        Some(id) => catalog.by_id(id).into_iter().collect(),
        None => catalog.products().iter().collect(),
    };
    if let Some(category) = args.category {
        products.retain(|p| p.category == category);
    }
    if args.customizable {
        products.retain(|p| p.is_customizable);
    }
    if args.try_on {
        products.retain(|p| p.is_virtual_try_on);
    }
    if let Some(n) = args.featured {
        products.truncate(n);
    }

    let json = serde_json::to_string_pretty(&products).context("serialize products")?;
    println!("{json}");
    Ok(())
}

fn cmd_cutout(args: CutoutArgs, config: &drape::DrapeConfig) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let image = drape::decode_image(&bytes)?.to_rgba_image();

    let segmenter: Box<dyn drape::Segmenter> = match args.segmenter {
        SegmenterChoice::Backdrop => Box::new(drape::BackdropKeySegmenter {
            tolerance: args.tolerance,
        }),
        SegmenterChoice::Passthrough => Box::new(drape::PassthroughSegmenter),
    };
    let cut = futures::executor::block_on(drape::remove_background(
        segmenter.as_ref(),
        image,
        config,
    ))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, cut.to_png_bytes()?)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

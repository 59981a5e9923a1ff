use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use driftfield::{
    AmbientField, Animator, DriftResult, Effect, FieldConfig, FrameInput, FrameRGBA, Host,
    SceneConfig, TextField, Viewport,
};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "driftfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an effect for a number of ticks and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Render a scroll ramp as numbered PNGs.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Scene config JSON. Overrides `--effect`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Effect to run when no config is given.
    #[arg(long, value_enum, default_value_t = EffectChoice::Ambient)]
    effect: EffectChoice,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Spawn seed (defaults to the config seed, or 0).
    #[arg(long)]
    seed: Option<u64>,

    /// Font file for the text effect.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Glyph string for the text effect.
    #[arg(long)]
    text: Option<String>,

    /// Print the resolved font family and SHA-256 of its bytes (text effect).
    #[arg(long)]
    dump_font: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Ticks to run; the last one is written.
    #[arg(long, default_value_t = 1)]
    ticks: u32,

    /// Scroll offset reported on every tick.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Scroll offset of the first frame.
    #[arg(long, default_value_t = 0.0)]
    scroll_from: f64,

    /// Scroll offset of the last frame.
    #[arg(long, default_value_t = 0.0)]
    scroll_to: f64,

    /// Output directory for `frame_00000.png` ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EffectChoice {
    Ambient,
    Text,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn resolve_scene(args: &SceneArgs) -> anyhow::Result<SceneConfig> {
    let mut scene = match &args.config {
        Some(path) => SceneConfig::from_json_path(path)?,
        None => SceneConfig {
            seed: 0,
            field: match args.effect {
                EffectChoice::Ambient => FieldConfig::Ambient(Default::default()),
                EffectChoice::Text => FieldConfig::Text(Default::default()),
            },
        },
    };
    if let Some(seed) = args.seed {
        scene.seed = seed;
    }
    if let FieldConfig::Text(t) = &mut scene.field {
        if let Some(font) = &args.font {
            t.font_path = Some(font.clone());
        }
        if let Some(text) = &args.text {
            t.text = text.clone();
        }
    }
    scene.validate()?;
    Ok(scene)
}

/// Renders every presented frame to a numbered PNG while ramping the scroll offset.
struct PngSequenceHost {
    viewport: Viewport,
    out_dir: PathBuf,
    frames: u32,
    next: u32,
    current: u32,
    scroll_from: f64,
    scroll_to: f64,
}

impl Host for PngSequenceHost {
    fn next_frame(&mut self) -> Option<FrameInput> {
        if self.next >= self.frames {
            return None;
        }
        self.current = self.next;
        self.next += 1;
        let t = if self.frames > 1 {
            f64::from(self.current) / f64::from(self.frames - 1)
        } else {
            0.0
        };
        Some(FrameInput {
            viewport: self.viewport,
            scroll_offset: self.scroll_from + (self.scroll_to - self.scroll_from) * t,
        })
    }

    fn present(&mut self, frame: &FrameRGBA) -> DriftResult<()> {
        let path = self.out_dir.join(format!("frame_{:05}.png", self.current));
        write_png(&path, frame).map_err(driftfield::DriftError::Other)
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = resolve_scene(&args.scene)?;
    let viewport = Viewport::new(args.scene.width, args.scene.height);
    let ticks = args.ticks.max(1);

    let frame = match scene.field {
        FieldConfig::Ambient(cfg) => {
            let mut a = Animator::mount(AmbientField::new(cfg), viewport, scene.seed);
            tick_n(&mut a, ticks, args.scroll)
        }
        FieldConfig::Text(cfg) => {
            let mut a = Animator::mount(TextField::new(cfg), viewport, scene.seed);
            if args.scene.dump_font {
                dump_font(a.effect())?;
            }
            tick_n(&mut a, ticks, args.scroll)
        }
    };

    let frame = frame.with_context(|| {
        format!(
            "nothing rendered for a {}x{} viewport",
            viewport.width, viewport.height
        )
    })?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let scene = resolve_scene(&args.scene)?;
    let viewport = Viewport::new(args.scene.width, args.scene.height);
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut host = PngSequenceHost {
        viewport,
        out_dir: args.out_dir.clone(),
        frames: args.frames,
        next: 0,
        current: 0,
        scroll_from: args.scroll_from,
        scroll_to: args.scroll_to,
    };

    let stats = match scene.field {
        FieldConfig::Ambient(cfg) => {
            Animator::mount(AmbientField::new(cfg), viewport, scene.seed).run(&mut host)?
        }
        FieldConfig::Text(cfg) => {
            let mut a = Animator::mount(TextField::new(cfg), viewport, scene.seed);
            if args.scene.dump_font {
                dump_font(a.effect())?;
            }
            a.run(&mut host)?
        }
    };

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_presented,
        args.out_dir.display()
    );
    Ok(())
}

fn tick_n<E: Effect>(a: &mut Animator<E>, ticks: u32, scroll: f64) -> Option<FrameRGBA> {
    let mut last = None;
    for _ in 0..ticks {
        last = a.tick(scroll);
    }
    last
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn dump_font(field: &TextField) -> anyhow::Result<()> {
    let face = match field.font() {
        Some(face) => face.clone(),
        None => driftfield::load_font(field.config().font_path.as_deref())?,
    };
    eprintln!("text font diagnostics:");
    eprintln!("  source:  {}", face.source());
    eprintln!("  index:   {}", face.index());
    eprintln!("  family:  {}", field.font_family().unwrap_or("<unresolved>"));
    eprintln!("  sha256:  {}", sha256_hex(face.bytes()));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

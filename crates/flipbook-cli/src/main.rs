mod logger;
mod script;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use flipbook_async_runtime::{EngineHandle, spawn_engine};
use flipbook_core::{
    ContainerSize, DocumentMetadata, Effect, EngineOptions, NavigationControls, PageWindowManager,
    SpreadGeometry, page_index_to_slide, slide_to_page_index, total_slides,
};
use logger::CliLogger;
use script::ReplayScript;
use std::path::PathBuf;
use tokio::time::{Duration, Instant};

/// Log entries kept in memory for the end-of-run summary
const MAX_LOG_ENTRIES: usize = 256;

#[derive(Parser)]
#[command(name = "flipbook", about = "Flipbook viewer engine tools", version)]
struct Cli {
    /// Engine options (JSON); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (repeat for debug and trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the spread scale for a container and page size
    Scale {
        /// Container size, e.g. 1200x800
        #[arg(long, value_parser = parse_size)]
        container: (f32, f32),

        /// Page size in document units, e.g. 600x800
        #[arg(long, value_parser = parse_size)]
        page: (f32, f32),
    },

    /// Show the slide layout of a document
    Slides {
        /// Number of pages
        #[arg(long)]
        pages: usize,

        /// Page index to locate
        #[arg(long)]
        page: Option<usize>,
    },

    /// Show how the page window evolves over a sequence of flips
    Window {
        /// Number of pages
        #[arg(long)]
        pages: usize,

        /// Page indices flipped to, in order
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        flips: Vec<usize>,
    },

    /// Replay a recorded session through the engine in real time
    Replay {
        /// Session script (JSON)
        #[arg(short, long)]
        script: PathBuf,
    },

    /// Print the engine options, or write them to a file
    Config {
        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_size(s: &str) -> std::result::Result<(f32, f32), String> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let width: f32 = width
        .trim()
        .parse()
        .map_err(|e| format!("invalid width '{}': {}", width, e))?;
    let height: f32 = height
        .trim()
        .parse()
        .map_err(|e| format!("invalid height '{}': {}", height, e))?;
    Ok((width, height))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = CliLogger::new(MAX_LOG_ENTRIES, CliLogger::level_for_verbosity(cli.verbose));
    logger.init().context("Failed to install logger")?;

    let options = match &cli.config {
        Some(path) => EngineOptions::load(path)
            .await
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => EngineOptions::default(),
    };

    match cli.command {
        Commands::Scale { container, page } => {
            let metadata = DocumentMetadata::new(1, page.0, page.1)?;
            let container = ContainerSize::new(container.0, container.1);
            let Some(geometry) = SpreadGeometry::fit(&metadata, container) else {
                bail!(
                    "Container {}x{} is too small to lay out a spread",
                    container.width,
                    container.height
                );
            };
            let (flip_width, flip_height) = geometry.flip_widget_size();

            println!("Scale: {:.4}", geometry.scale);
            println!(
                "  Spread: {:.1} x {:.1}",
                geometry.spread_width, geometry.spread_height
            );
            println!("  Page height: {:.1}", geometry.page_height);
            println!("  Flip widget: {:.1} x {:.1}", flip_width, flip_height);
        }

        Commands::Slides { pages, page } => {
            if pages == 0 {
                bail!("Document must have at least one page");
            }
            let slides = total_slides(pages);
            println!("Pages: {}", pages);
            println!("Slides: {}", slides);
            for slide in 1..=slides {
                println!("  Slide {}: page {}", slide, slide_to_page_index(slide));
            }

            if let Some(page) = page {
                let controls = NavigationControls::new(page.min(pages - 1), pages);
                println!(
                    "Page {} is on slide {} ({})",
                    page,
                    page_index_to_slide(page, pages),
                    controls.label
                );
            }
        }

        Commands::Window { pages, flips } => {
            if pages == 0 {
                bail!("Document must have at least one page");
            }
            let mut windows = PageWindowManager::new(pages, options.initial_window_span)
                .with_lookahead(options.lookahead_pages)
                .with_reset_radius(options.reset_radius)
                .with_jump_reset_span(options.jump_reset_span);

            let start = windows.window();
            println!("Start  page {:>4}  window [{}, {}]", 0, start.low, start.high);

            let mut current = 0;
            for flip in flips {
                let target = flip.min(pages - 1);
                windows.on_flip(current, target);
                current = target;
                let window = windows.window();
                println!(
                    "Flip   page {:>4}  window [{}, {}]  ({} pages)",
                    current,
                    window.low,
                    window.high,
                    window.len()
                );
            }

            windows.on_layout_reset(current);
            let window = windows.window();
            println!(
                "Reset  page {:>4}  window [{}, {}]",
                current, window.low, window.high
            );
        }

        Commands::Replay { script } => {
            let script = ReplayScript::load(&script).await?;
            replay(script, options).await?;

            let warnings = logger
                .entries()
                .into_iter()
                .filter(|entry| entry.level <= log::Level::Warn)
                .count();
            if warnings > 0 {
                eprintln!("{} warning(s) during replay", warnings);
            }
        }

        Commands::Config { output } => {
            match output {
                Some(path) => {
                    options.save(&path).await?;
                    println!("Options written → {}", path.display());
                }
                None => println!("{}", options.to_json()?),
            }
        }
    }

    Ok(())
}

async fn replay(script: ReplayScript, options: EngineOptions) -> Result<()> {
    // Long enough for every debounce window to expire after the last event
    let quiet = options.zoom_debounce().max(options.layout_settle()) + Duration::from_millis(100);
    log::info!(
        "Replaying {} events over {:?}",
        script.events.len(),
        script.duration()
    );

    let mut handle = spawn_engine(options);
    let start = Instant::now();

    for entry in script.events {
        pump_until(&mut handle, start, start + Duration::from_millis(entry.at_ms)).await?;
        println!(
            "{:>6} ms  <- {}",
            start.elapsed().as_millis(),
            serde_json::to_string(&entry.event)?
        );
        handle.send(entry.event)?;
    }
    pump_until(&mut handle, start, Instant::now() + quiet).await?;

    let snapshot = handle.snapshot().await?;
    while let Ok(effect) = handle.updates.try_recv() {
        print_effect(start, &effect)?;
    }
    println!("Final state:");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    handle.shutdown().await;
    Ok(())
}

/// Print effects as they arrive until `deadline`
async fn pump_until(handle: &mut EngineHandle, start: Instant, deadline: Instant) -> Result<()> {
    loop {
        tokio::select! {
            effect = handle.updates.recv() => match effect {
                Some(effect) => print_effect(start, &effect)?,
                None => bail!("Engine stopped during replay"),
            },
            _ = tokio::time::sleep_until(deadline) => return Ok(()),
        }
    }
}

fn print_effect(start: Instant, effect: &Effect) -> Result<()> {
    let elapsed = start.elapsed().as_millis();
    match effect {
        // The full plan lists every page; show the part that matters
        Effect::Render { plan } => {
            let rendered: Vec<_> = plan.rendered_pages().collect();
            let boosted: Vec<_> = plan
                .decisions
                .iter()
                .filter(|d| d.is_visible_spread_member)
                .map(|d| format!("{}@{:.1}x", d.page_index, d.device_pixel_ratio))
                .collect();
            println!(
                "{:>6} ms  -> render window [{}, {}] ({} pages), visible {}",
                elapsed,
                plan.window.low,
                plan.window.high,
                rendered.len(),
                boosted.join(" ")
            );
        }
        other => println!("{:>6} ms  -> {}", elapsed, serde_json::to_string(other)?),
    }
    Ok(())
}

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use loopview::{
    CarouselEvent, CarouselInput, CarouselRuntime, EventBus, Item, KeyboardInputHandler,
    LoopviewConfig, TransitionProperty,
};

#[derive(Parser, Debug)]
#[command(name = "loopview")]
#[command(about = "Looping carousel engine with gesture and keyboard navigation")]
#[command(version)]
#[command(long_about = "A looping carousel engine that centers the active item over a \
clone-buffered sequence and navigates it via keyboard, drag gestures, and press-and-hold \
controls. This binary runs a terminal demo over a sample item set.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "loopview.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit without starting the demo")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,

    /// Simulated viewport width in pixels
    #[arg(long, default_value_t = 1024.0, help = "Viewport width used for breakpoint selection")]
    viewport_width: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    init_logging(&args)?;

    info!("Starting loopview v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    let config = match LoopviewConfig::load_from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if args.validate_config {
        match config.validate() {
            Ok(()) => {
                info!("Configuration validation successful");
                println!("✓ Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                error!("Configuration validation failed: {}", e);
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    config.validate()?;

    let event_bus = Arc::new(EventBus::new(config.system.event_bus_capacity));
    let container_width = args.viewport_width * 0.9;
    let runtime = match CarouselRuntime::new(
        sample_items(),
        &config,
        Arc::clone(&event_bus),
        args.viewport_width,
        container_width,
    ) {
        Ok(runtime) => Arc::new(runtime),
        Err(e) => {
            // Nothing to render; not a crash
            tracing::warn!("Carousel not started: {}", e);
            return Ok(());
        }
    };

    spawn_renderer(Arc::clone(&runtime), &event_bus);

    runtime.start().await?;

    let keyboard = KeyboardInputHandler::new(Arc::clone(&runtime), Arc::clone(&event_bus));
    let done = keyboard.done();
    keyboard.start().await?;

    tokio::select! {
        _ = done.cancelled() => {
            info!("Demo ended by user");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    keyboard.stop().await?;
    runtime.shutdown();

    Ok(())
}

/// Terminal stand-in for the rendering surface: prints each render effect
/// and reports animated translations complete after the animation duration.
fn spawn_renderer(runtime: Arc<CarouselRuntime>, event_bus: &EventBus) {
    const ANIMATION: Duration = Duration::from_millis(300);

    let mut rx = event_bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            println!("{}", event.description());

            if let CarouselEvent::TrackMoved { animate: true, .. } = event {
                let runtime = Arc::clone(&runtime);
                tokio::spawn(async move {
                    tokio::time::sleep(ANIMATION).await;
                    runtime
                        .handle(CarouselInput::TransitionComplete {
                            property: TransitionProperty::Translation,
                        })
                        .await;
                });
            }
        }
    });
}

fn sample_items() -> Vec<Item> {
    vec![
        Item::new(
            "portfolio-site",
            "assets/portfolio.png",
            "Portfolio Site",
            "Personal site with a hand-rolled interaction layer",
            "https://example.com/portfolio",
        ),
        Item::new(
            "weather-cli",
            "",
            "Weather CLI",
            "Terminal forecast client",
            "https://example.com/weather",
        ),
        Item::new(
            "pixel-garden",
            "assets/garden.png",
            "Pixel Garden",
            "Procedural plant sandbox",
            "https://example.com/garden",
        ),
        Item::new(
            "synth-pad",
            "assets/synth.png",
            "Synth Pad",
            "Browser polysynth",
            "https://example.com/synth",
        ),
        Item::new(
            "route-mapper",
            "no-image",
            "Route Mapper",
            "Cycling route planner",
            "https://example.com/routes",
        ),
    ]
}

fn init_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, fmt, Layer};

    // Determine log level based on flags
    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("loopview={}", log_level)));

    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        Some("pretty") | None => fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(args.debug)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer()
                .with_target(true)
                .with_thread_ids(args.debug)
                .with_file(args.debug)
                .with_line_number(args.debug)
                .boxed()
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();

    Ok(())
}

/// Print default configuration in TOML format
fn print_default_config() -> Result<()> {
    println!("# Loopview Configuration File");
    println!("# This is the default configuration with all available options");
    println!();
    println!("{}", toml::to_string_pretty(&LoopviewConfig::default())?);
    Ok(())
}

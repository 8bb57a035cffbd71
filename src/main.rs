//! Airmouse - hand-gesture pointer control
//!
//! Reads hand landmarks from a MediaPipe sidecar and turns pinch
//! gestures into OS pointer actions.

use airmouse::app::cli::{Cli, Commands, ConfigAction};
use airmouse::app::config::Config;
use airmouse::app::runner::{run_session, RunOptions};
use airmouse::gesture::GestureSession;
use airmouse::inject::{PointerInjector, SystemInjector, TraceInjector};
use airmouse::trace::SessionTrace;
use airmouse::tracking::detector::SubprocessDetector;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Run {
            duration,
            dry_run,
            trace,
        } => {
            run_run(duration, dry_run, trace, &config)?;
        }
        Commands::Replay {
            input,
            dry_run,
            frame_delay_ms,
        } => {
            run_replay(&input, dry_run, frame_delay_ms)?;
        }
        Commands::List { detailed } => {
            run_list(detailed)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, config)?;
        }
    }

    Ok(())
}

fn run_run(
    duration: u64,
    dry_run: bool,
    trace_name: Option<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let screen = if config.screen.auto_detect {
        SystemInjector::detect_screen_size(config.screen.fallback_size())
    } else {
        config.screen.fallback_size()
    };
    info!("Mapping gestures to a {}x{} screen", screen.width, screen.height);

    let mut detector =
        SubprocessDetector::spawn(&config.detector.command, config.detector.min_confidence)?;

    let mut injector: Box<dyn PointerInjector> = if dry_run {
        info!("Dry run: intents will be logged, not injected");
        Box::new(TraceInjector)
    } else {
        Box::new(SystemInjector::new()?)
    };

    let mut session = GestureSession::new(config.gesture, screen);

    // Set up Ctrl+C handler
    let stop_flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let stop_flag_handler = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_handler.store(true, std::sync::atomic::Ordering::SeqCst);
    })?;

    if duration > 0 {
        info!("Running for {} seconds, Ctrl+C to stop early", duration);
    } else {
        info!("Running until Ctrl+C");
    }

    let options = RunOptions {
        duration_secs: duration,
        trace_name,
    };
    let trace = run_session(
        &mut detector,
        injector.as_mut(),
        &mut session,
        &options,
        &stop_flag,
    )?;

    if let Some(trace) = trace {
        let traces_dir = Cli::traces_dir();
        std::fs::create_dir_all(&traces_dir)?;
        let path = traces_dir.join(format!("{}.json", trace.metadata.name));
        trace.save(&path)?;
        info!("Saved {} intents to {:?}", trace.len(), path);
    }

    Ok(())
}

fn run_replay(
    input: &std::path::Path,
    dry_run: bool,
    frame_delay_ms: u64,
) -> anyhow::Result<()> {
    // Accept a path or a saved trace name
    let path = if input.exists() {
        input.to_path_buf()
    } else {
        let named = Cli::traces_dir().join(format!("{}.json", input.display()));
        if !named.exists() {
            anyhow::bail!("Trace not found: {:?}", input);
        }
        named
    };

    let trace = SessionTrace::load(&path)?;
    info!(
        "Replaying '{}': {} intents over {} frames",
        trace.metadata.name,
        trace.len(),
        trace.metadata.frame_count
    );

    let mut injector: Box<dyn PointerInjector> = if dry_run {
        Box::new(TraceInjector)
    } else {
        Box::new(SystemInjector::new()?)
    };

    trace.replay(
        injector.as_mut(),
        std::time::Duration::from_millis(frame_delay_ms),
    )?;
    info!("Replay finished");

    Ok(())
}

fn run_list(detailed: bool) -> anyhow::Result<()> {
    let traces_dir = Cli::traces_dir();

    if !traces_dir.exists() {
        println!("No traces found in {}", traces_dir.display());
        println!("Record one with: airmouse run --trace NAME");
        return Ok(());
    }

    println!("Traces in {:?}:", traces_dir);

    let mut entries: Vec<_> = std::fs::read_dir(&traces_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.path());

    for entry in &entries {
        let path = entry.path();
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        if detailed {
            match SessionTrace::load(&path) {
                Ok(trace) => {
                    let m = &trace.metadata;
                    println!(
                        "  {}  ({} intents, {} frames, started {})",
                        file_name,
                        m.intent_count,
                        m.frame_count,
                        m.started_at.format("%Y-%m-%d %H:%M:%S")
                    );
                }
                Err(_) => {
                    let fs_meta = entry.metadata()?;
                    println!("  {}  ({} bytes, failed to parse)", file_name, fs_meta.len());
                }
            }
        } else {
            println!("  {}", file_name);
        }
    }

    if entries.is_empty() {
        println!("  (none)");
        println!("Record one with: airmouse run --trace NAME");
    }

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    std::fs::create_dir_all(Cli::traces_dir())?;
    println!("Traces directory: {:?}", Cli::traces_dir());

    Ok(())
}

fn run_config(action: ConfigAction, mut config: Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Get { key } => {
            let value = config.get_value(&key)?;
            println!("{} = {}", key, value);
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'airmouse init' first.");
            }

            config.set_value(&key, &value)?;
            config.save(&config_path)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            Config::default().save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

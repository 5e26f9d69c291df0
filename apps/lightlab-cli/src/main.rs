use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use lightlab_bindings::preset::showcase_bindings;
use lightlab_bindings::{BindingId, BindingTable, Control, Value};
use lightlab_kernel::FixedStepClock;
use lightlab_kernel::preset::showcase;
use lightlab_render::{AnimationDriver, DebugTextRenderer, FailurePolicy, OrbitControls};
use lightlab_tools::{SceneInspector, SceneSnapshot, SceneSummary};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightlab-cli", about = "Headless light lab driver")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and a summary of the scene
    Info,
    /// Run the animation loop headless on a fixed timestep
    Simulate {
        /// Number of frames to step
        #[arg(short, long, default_value = "100")]
        steps: u64,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Apply a control edit before the first frame, e.g.
        /// `--set "Spot Light/intensity=3"` or `--set "Material/color=#336699"`
        #[arg(long = "set", value_name = "PATH=VALUE")]
        edits: Vec<String>,
        /// Print the final scene as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List every control with its range and current value
    Bindings,
    /// Check every control range against the scene; fails on any finding
    Audit,
}

#[derive(Serialize)]
struct SimulationReport {
    steps: u64,
    dt: f32,
    frames: u64,
    failures: u64,
    summary: SceneSummary,
    scene: SceneSnapshot,
}

/// Split `folder/label=value` and resolve the binding by its path.
fn parse_assignment(table: &BindingTable, text: &str) -> anyhow::Result<(BindingId, Value)> {
    let (path, value) = text
        .rsplit_once('=')
        .with_context(|| format!("expected PATH=VALUE, got {text:?}"))?;
    let (id, binding) = table
        .iter()
        .find(|(_, b)| b.path() == path.trim())
        .with_context(|| format!("no control at {path:?}"))?;
    let value = value.trim();
    let value = match binding.control {
        Control::Color => Value::Color(parse_color(value)?),
        Control::Slider(_) => Value::Scalar(
            value
                .parse()
                .with_context(|| format!("{path}: {value:?} is not a number"))?,
        ),
    };
    Ok((id, value))
}

fn parse_color(text: &str) -> anyhow::Result<u32> {
    let hex = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .unwrap_or(text);
    if hex.len() != 6 {
        bail!("color {text:?} must have six hex digits");
    }
    u32::from_str_radix(hex, 16).with_context(|| format!("color {text:?} is not hex"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    let (mut registry, animator) = showcase()?;
    let table = showcase_bindings();

    match cli.command {
        Commands::Info => {
            println!("lightlab-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", SceneInspector::summary(&registry, &animator));
            for light in SceneInspector::snapshot(&registry).lights {
                println!("  {light}");
            }
            println!("controls: {} in {} folders", table.len(), table.folders().len());
        }
        Commands::Simulate {
            steps,
            dt,
            edits,
            json,
        } => {
            if !(dt.is_finite() && dt > 0.0) {
                bail!("--dt must be a positive number of seconds");
            }
            for text in &edits {
                let (id, raw) = parse_assignment(&table, text)?;
                let applied = table.edit(&mut registry, id, raw)?;
                tracing::info!(binding = %table.get(id)?.path(), %applied, "applied edit");
            }

            let summary = SceneInspector::summary(&registry, &animator);
            let mut driver = AnimationDriver::new(FixedStepClock::new(dt), animator)
                .with_policy(FailurePolicy::Abort);
            let mut camera = OrbitControls::default();
            let mut target = DebugTextRenderer::new().keep_last(1);
            driver.run(&mut registry, &mut camera, &mut target, Some(steps))?;

            if json {
                let report = SimulationReport {
                    steps,
                    dt,
                    frames: driver.frames(),
                    failures: driver.failures(),
                    summary,
                    scene: SceneInspector::snapshot(&registry),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Simulated {} frames at dt={dt}", driver.frames());
                if let Some(frame) = target.last_frame() {
                    print!("{frame}");
                }
            }
        }
        Commands::Bindings => {
            for folder in table.folders() {
                println!("{folder}");
                for (id, binding) in table.in_folder(folder) {
                    let current = table.read(&registry, id)?;
                    let control = match binding.control {
                        Control::Slider(range) => range.to_string(),
                        Control::Color => "color".to_owned(),
                    };
                    println!(
                        "  {id:<4} {:<14} {:<12} {:<12} {control:<28} = {current}",
                        binding.label, binding.target, binding.field
                    );
                }
            }
        }
        Commands::Audit => {
            let findings = table.audit(&registry);
            if findings.is_empty() {
                println!("{} controls, no findings", table.len());
            } else {
                for f in &findings {
                    println!("{f}");
                }
                bail!("{} audit finding(s)", findings.len());
            }
        }
    }

    Ok(())
}

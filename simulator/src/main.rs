use anyhow::Context;
use clap::Parser;
use gui_bridge::bridge::GuiBridge;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ScenarioConfig;
use workflow::runner::{Runner, Session};

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Scenario driver for the tactical map core")]
struct Args {
    /// Run the scenario to completion and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a scenario from YAML
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Override the theater name reported by the simulator
    #[arg(long)]
    theater: Option<String>,
    #[arg(long)]
    ticks: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    /// Tick the session live and serve it over the GUI bridge
    #[arg(long, default_value_t = false)]
    serve: bool,
}

impl Args {
    fn scenario(&self) -> anyhow::Result<ScenarioConfig> {
        let mut config = match &self.scenario {
            Some(path) => ScenarioConfig::load(path)?,
            None => ScenarioConfig::default(),
        };
        if let Some(theater) = &self.theater {
            config.theater = theater.clone();
        }
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        Ok(config)
    }
}

fn write_report(report: &str) -> anyhow::Result<()> {
    let report_path = PathBuf::from("tools/data/offline_session.log");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&report_path)
        .with_context(|| format!("opening {}", report_path.display()))?;
    file.write_all(report.as_bytes())?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.scenario()?;

    if args.offline {
        let (session, summary) = Runner::new(config.clone()).execute()?;
        println!(
            "Offline run -> ticks {}, designations {}, map swaps {}, discarded clicks {}, draw commands {}",
            summary.ticks,
            summary.designations,
            summary.map_swaps,
            summary.clicks_discarded,
            summary.scene_commands
        );
        let model = session.model();
        let report = format!(
            "theater={} ticks={} designations={:?} status={}\n",
            config.theater,
            summary.ticks,
            model
                .designations
                .iter()
                .map(|target| target.label.as_str())
                .collect::<Vec<_>>(),
            model.status
        );
        write_report(&report)?;
    }

    if args.serve {
        let session = Arc::new(RwLock::new(
            Session::new(config.clone()).context("building live session")?,
        ));
        let gui_bridge = GuiBridge::new(session.clone());
        gui_bridge.serve()?;
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");

        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for the tick loop")?;
        runtime.block_on(async {
            let mut interval =
                tokio::time::interval(Duration::from_millis(config.tick_interval_ms.max(1)));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let (outcome, tick) = {
                            let mut guard = session.write().unwrap_or_else(PoisonError::into_inner);
                            let outcome = guard.step()?;
                            (outcome, guard.tick())
                        };
                        if outcome.redraw {
                            gui_bridge.publish();
                        }
                        if outcome.flight_ended {
                            gui_bridge.publish_status(&format!("flight ended at tick {tick}"));
                        }
                    }
                    result = signal::ctrl_c() => {
                        result.context("awaiting Ctrl+C to exit")?;
                        break;
                    }
                }
            }
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

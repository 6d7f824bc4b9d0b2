/// `RcaCrab` - Rule-based log triage and root-cause analysis
///
/// Copyright (C) 2026 Daniel Freiermuth
///
/// This program is free software: you can redistribute it and/or modify
/// it under the terms of the GNU General Public License as published by
/// the Free Software Foundation, either version 3 of the License, or
/// (at your option) any later version.
///
/// This program is distributed in the hope that it will be useful,
/// but WITHOUT ANY WARRANTY; without even the implied warranty of
/// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
/// GNU General Public License for more details.
///
/// You should have received a copy of the GNU General Public License
/// along with this program.  If not, see <https://www.gnu.org/licenses/>.
use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use rcacrab::config::load_rules;
use rcacrab::core::report::render_text_batch;
use rcacrab::feedback::save_unmatched;
use rcacrab::parser::line::RawLog;
use rcacrab::{AnalyzerConfig, Analyzer, ConfigError, SourceReport};
use std::path::PathBuf;
use std::sync::Arc;

#[cfg(feature = "ram-profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "rcacrab")]
#[command(author = "RcaCrab Team")]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
#[command(about = "Triage log files with signature rules and anomaly checks", long_about = None)]
struct Args {
    /// Log files to analyze
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Known-good run to diff each file against
    #[arg(long, value_name = "FILE")]
    baseline: Option<PathBuf>,

    /// Signature rule file (YAML or JSON label: pattern mapping)
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Analyzer config file, instead of the one in the user config directory
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Lines per minute above which a minute is reported as a spike
    #[arg(long, value_name = "N")]
    threshold: Option<usize>,

    /// Write lines no rule matched to this file (overwritten)
    #[arg(long, value_name = "FILE")]
    unmatched_out: Option<PathBuf>,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Store the effective configuration in the user config directory
    #[arg(long)]
    save_config: bool,

    /// Path for the DHAT heap profiling output (only used when built with --features ram-profiling)
    #[cfg(feature = "ram-profiling")]
    #[arg(
        long = "profile-output",
        value_name = "PROFILE_FILE",
        default_value = "dhat-heap.json"
    )]
    profile_output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    // Set RUST_LOG environment variable to override (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "RcaCrab starting up (version {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let args = Args::parse();

    #[cfg(feature = "ram-profiling")]
    let _profiler = {
        tracing::info!("RAM profiling enabled, output: {:?}", args.profile_output);
        dhat::Profiler::builder()
            .file_name(args.profile_output.clone())
            .build()
    };

    #[cfg(feature = "cpu-profiling")]
    {
        tracing::info!("CPU profiling enabled with Tracy - run Tracy profiler to connect");
    }

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load_from(path)?,
        None => AnalyzerConfig::load(),
    };
    if let Some(threshold) = args.threshold {
        config.spike_threshold = threshold;
    }
    if let Some(rules) = &args.rules {
        config.rules_path = Some(rules.clone());
    }

    if args.save_config {
        if let Err(e) = config.save() {
            tracing::warn!("Could not save config: {e}");
        }
    }

    // Rule problems stop the run before any file is touched
    let Some(rules_path) = config.rules_path.clone() else {
        return Err(ConfigError::NoRules.into());
    };
    let rules = load_rules(&rules_path)
        .with_context(|| format!("loading rules from {}", rules_path.display()))?;

    let analyzer = Analyzer::new(config, Arc::new(rules));

    let baseline = match &args.baseline {
        Some(path) => {
            let raw = RawLog::read(path).context("reading baseline")?;
            Some(analyzer.prepare_baseline(&raw))
        }
        None => None,
    };

    let reports = analyzer.analyze_batch(&args.files, baseline.as_deref());

    if let Some(out) = &args.unmatched_out {
        let unmatched: Vec<String> = reports
            .iter()
            .filter_map(|report| match report {
                SourceReport::Analyzed(bundle) => Some(bundle.unmatched.iter().cloned()),
                SourceReport::Failed { .. } => None,
            })
            .flatten()
            .collect();
        save_unmatched(&unmatched, out).context("writing unmatched lines")?;
    }

    let rendered = match args.format {
        OutputFormat::Text => render_text_batch(&reports),
        OutputFormat::Json => render_json(&reports, args.compact)?,
    };
    println!("{rendered}");

    if reports.iter().all(SourceReport::is_failed) {
        bail!("none of the {} sources could be analyzed", reports.len());
    }
    Ok(())
}

/// One source prints as an object, several as an array.
fn render_json(reports: &[SourceReport], compact: bool) -> anyhow::Result<String> {
    let json = match reports {
        [single] if compact => serde_json::to_string(single)?,
        [single] => serde_json::to_string_pretty(single)?,
        many if compact => serde_json::to_string(many)?,
        many => serde_json::to_string_pretty(many)?,
    };
    Ok(json)
}

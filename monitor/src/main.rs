//! softirqtop: per-CPU softirq rate monitoring binary.
//!
//! Redraws an aligned rate table on every refresh interval. The first
//! sample only primes the diff baseline, so the first table appears one
//! interval after startup.

use anyhow::Context;
use clap::Parser;
use log::warn;
use softirqtop::{SoftirqSampler, SOFTIRQS_PATH};
use softirqtop_core::{ProcFile, TextSource};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tokio::time;

/// Command-line arguments for the softirq monitor.
#[derive(Parser)]
#[command(name = "softirqtop")]
#[command(about = "Per-CPU softirq rate monitor")]
#[command(version)]
struct Args {
    /// Refresh interval in seconds (minimum 1)
    #[arg(short, long, default_value = "3", value_parser = validate_interval)]
    interval: u64,

    /// One-shot mode (print a single rate table and exit)
    #[arg(short, long)]
    once: bool,

    /// Override the detected CPU column count
    #[arg(long, value_parser = validate_cpus)]
    cpus: Option<usize>,

    /// Counter source path
    #[arg(long, default_value = SOFTIRQS_PATH)]
    path: PathBuf,

    /// Verify the counter source is readable and exit
    #[arg(long)]
    check: bool,

    /// Do not clear the terminal between redraws
    #[arg(long)]
    no_clear: bool,
}

/// Validate that the interval is at least one second.
fn validate_interval(s: &str) -> Result<u64, String> {
    let interval = s
        .parse::<u64>()
        .map_err(|_| "Interval must be a positive integer".to_owned())?;

    if interval == 0 {
        return Err("Interval must be at least 1 second".to_owned());
    }

    Ok(interval)
}

/// Validate that the CPU count is at least one.
fn validate_cpus(s: &str) -> Result<usize, String> {
    let cpus = s
        .parse::<usize>()
        .map_err(|_| "CPU count must be a positive integer".to_owned())?;

    if cpus == 0 {
        return Err("CPU count must be at least 1".to_owned());
    }

    Ok(cpus)
}

/// Number of CPU columns to display when not overridden.
fn detect_cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Move the cursor home and clear the screen.
fn clear_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(b"\x1b[H\x1b[2J")?;
    stdout.flush()
}

/// Main entry point for the softirq monitor.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let cpu_count = args.cpus.unwrap_or_else(detect_cpu_count);

    let source = ProcFile::new(&args.path);

    // Check availability if requested
    if args.check {
        match source.check_availability() {
            Ok(()) => {
                println!("{} is readable", source.describe());
                return Ok(());
            }
            Err(e) => {
                eprintln!("{} is not readable: {}", source.describe(), e);
                process::exit(1);
            }
        }
    }

    let mut sampler = SoftirqSampler::with_source(source, cpu_count, args.interval);
    let interval = Duration::from_secs(args.interval);

    if args.once {
        // One-shot mode: prime, wait one interval, print a single table.
        sampler
            .sample()
            .with_context(|| format!("failed to read {}", sampler.describe_source()))?;
        time::sleep(interval).await;
        let table = sampler
            .sample()
            .with_context(|| format!("failed to read {}", sampler.describe_source()))?;
        if let Some(table) = table {
            print!("{table}");
            io::stdout().flush()?;
        }
    } else {
        // Continuous mode: redraw every interval; read failures skip the
        // cycle and the loop keeps running.
        let mut ticker = time::interval(interval);

        loop {
            ticker.tick().await;

            match sampler.sample() {
                Ok(Some(table)) => {
                    if !args.no_clear {
                        clear_terminal()?;
                    }
                    print!("{table}");
                    io::stdout().flush()?;
                }
                Ok(None) => {
                    // Priming cycle; nothing to show yet.
                }
                Err(e) => {
                    warn!("skipping cycle: {e}");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_interval() {
        assert_eq!(validate_interval("3"), Ok(3));
        assert!(validate_interval("0").is_err());
        assert!(validate_interval("abc").is_err());
        assert!(validate_interval("-1").is_err());
    }

    #[test]
    fn test_validate_cpus() {
        assert_eq!(validate_cpus("8"), Ok(8));
        assert!(validate_cpus("0").is_err());
        assert!(validate_cpus("four").is_err());
    }

    #[test]
    fn test_detect_cpu_count_is_positive() {
        assert!(detect_cpu_count() >= 1);
    }
}

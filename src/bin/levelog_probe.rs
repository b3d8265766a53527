/// Exercise the process-terminating paths of the leveled logger
///
/// Writes through a logger on stdout (no flags, prefix "probe"), runs one
/// scenario, then prints "after" if control ever comes back. Used by the
/// integration tests to observe exit status and output from outside.
///
/// Usage:
/// cargo run --bin levelog_probe -- --scenario fatal --level Fatal
/// cargo run --bin levelog_probe -- --scenario drain-then-fatal --level Debug
use std::io::Write;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use levelog::{FormatFlags, LeveledLogger, StandardLogger};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Leveled fatal with plain values
    Fatal,
    /// Leveled fatal through the formatting macro
    Fatalf,
    /// Leveled panic, left to unwind out of main
    Panic,
    /// A burst of warnings followed by a fatal
    DrainThenFatal,
    /// The unconditional logger's fatal
    StandardFatal,
}

#[derive(Parser, Debug)]
#[command(name = "levelog_probe")]
#[command(about = "Run one terminating logger scenario")]
struct Args {
    #[arg(long, value_enum)]
    scenario: Scenario,

    /// Threshold name passed to the logger
    #[arg(long, default_value = "Debug")]
    level: String,

    /// Number of warnings written before the fatal call (drain-then-fatal)
    #[arg(long, default_value_t = 200)]
    burst: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log = LeveledLogger::new(std::io::stdout(), "probe", &args.level, FormatFlags::empty())
        .with_context(|| format!("cannot build logger at level {}", args.level))?;

    match args.scenario {
        Scenario::Fatal => log.fatal(&[&"disk", &"gone"]),
        Scenario::Fatalf => levelog::fatalf!(log, "code {}", 7),
        Scenario::Panic => log.panic(&[&"bad", &"state"]),
        Scenario::DrainThenFatal => {
            for i in 0..args.burst {
                log.warnf(format_args!("queued {}", i));
            }
            log.fatal(&[&"done"]);
        }
        Scenario::StandardFatal => StandardLogger::global().fatal(&[&"standard", &"exit"]),
    }

    let mut stdout = std::io::stdout();
    writeln!(stdout, "after")?;
    stdout.flush()?;
    Ok(())
}

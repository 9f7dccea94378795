//! mitest - command-line front end for the MI provider test harness
//!
//! Loads JSON fixtures into a recording context and reports on them, and
//! shows what the environment probes see on the current host.

mod commands;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mitest")]
#[command(about = "Management instrumentation provider test harness", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// When to use colors: auto, always, never
    #[arg(long, global = true)]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Post the instances of a JSON fixture and print what was recorded
    Inspect {
        /// Fixture file
        fixture: PathBuf,
        /// Only post instances of this class
        #[arg(long)]
        class: Option<String>,
        /// Expected property names; every instance must set exactly these
        #[arg(long, value_delimiter = ',')]
        expect: Vec<String>,
    },

    /// Show host name, distribution and privilege status
    Probe {
        /// Also resolve the fully-qualified host name
        #[arg(long)]
        fqdn: bool,
        /// Harness config file (default: $MITEST_CONFIG, then ./mitest.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Route `log` records to stderr.
fn setup_logging(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{:5}][{}] {}",
                record.level(),
                record.target(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(level_for(cli.verbose))?;

    let choice = output::resolve_color_choice(cli.color.as_deref());
    let mut out = output::StyledOutput::new(choice);

    match cli.command {
        Commands::Inspect {
            fixture,
            class,
            expect,
        } => commands::inspect::execute(&mut out, &fixture, class.as_deref(), &expect),

        Commands::Probe { fqdn, config } => {
            commands::probe::execute(&mut out, config.as_deref(), fqdn)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inspect_with_expect_list() {
        let cli = Cli::try_parse_from([
            "mitest",
            "inspect",
            "agent.json",
            "--expect",
            "Name,Id",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Inspect {
                fixture,
                class,
                expect,
            } => {
                assert_eq!(fixture, PathBuf::from("agent.json"));
                assert_eq!(class, None);
                assert_eq!(expect, vec!["Name", "Id"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_probe() {
        let cli = Cli::try_parse_from(["mitest", "probe", "--fqdn", "--config", "m.toml"]).unwrap();
        match cli.command {
            Commands::Probe { fqdn, config } => {
                assert!(fqdn);
                assert_eq!(config, Some(PathBuf::from("m.toml")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }
}

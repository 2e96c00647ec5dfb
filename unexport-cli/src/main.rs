//! unexport CLI - unexport Go identifiers that no other package uses.
//!
//! Every exported package-level name in the target packages is handed to
//! `gorename`; the renamer refuses whatever other packages still reference.
//!
//! Phases run in order and any setup failure stops the run with
//! `PHASE: ERROR`. Individual refusals are reported and the run goes on.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use unexport_core::{
    init_structured_logging, load_config, load_config_file, load_targets, parse_name_list,
    GorenameCommand, Phase, Policy, UnexportConfig, Unexporter, DEFAULT_RENAMER,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Unexport Go symbols that are not used outside their package")]
pub struct Cli {
    /// Packages to process: directories, or patterns like ./...
    #[arg(default_value = ".")]
    targets: Vec<String>,

    /// Print more information than usual (summary of unexported symbols)
    #[arg(short, long)]
    verbose: bool,

    /// Comma-separated list of symbols to unexport; if empty, reads as 'all'
    #[arg(long, default_value = "")]
    unexport: String,

    /// Comma-separated list of symbols not to unexport
    #[arg(long, default_value = "")]
    skip: String,

    /// Show what would be attempted without running the renamer
    #[arg(long)]
    dry_run: bool,

    /// Output results in JSON format (status lines go to stderr)
    #[arg(long)]
    json: bool,

    /// Rename tool to run
    #[arg(long, value_name = "PROGRAM")]
    renamer: Option<String>,

    /// Configuration file (defaults to ./unexport.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Settings after merging the config file with command-line flags.
#[derive(Debug)]
struct Settings {
    policy: Policy,
    verbose: bool,
    renamer: GorenameCommand,
}

/// Command-line values win: a non-empty `--unexport` replaces the file's
/// list, `--skip` adds to it, `--verbose` and `--renamer` override.
fn resolve_settings(cli: &Cli, config: Option<UnexportConfig>) -> Settings {
    let config = config.unwrap_or_default();

    let cli_unexport = parse_name_list(&cli.unexport);
    let unexport = if cli_unexport.is_empty() {
        config.unexport.unwrap_or_default()
    } else {
        cli_unexport
    };

    let mut skip = config.skip.unwrap_or_default();
    skip.extend(parse_name_list(&cli.skip));

    let renamer_config = config.renamer.unwrap_or_default();
    let program = cli
        .renamer
        .clone()
        .or(renamer_config.program)
        .unwrap_or_else(|| DEFAULT_RENAMER.to_string());
    let renamer =
        GorenameCommand::new(program).with_args(renamer_config.args.unwrap_or_default());

    Settings {
        policy: Policy::new(unexport, skip),
        verbose: cli.verbose || config.verbose.unwrap_or(false),
        renamer,
    }
}

fn read_config(cli: &Cli) -> Result<Option<UnexportConfig>> {
    let config = match &cli.config {
        Some(path) => Some(load_config_file(path)?),
        None => load_config(Path::new("."))?,
    };
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = read_config(cli).context(Phase::LoadConfig)?;
    let settings = resolve_settings(cli, config);

    let units = load_targets(&cli.targets).context(Phase::LoadTargets)?;

    let mut unexporter = Unexporter::new(settings.policy, settings.renamer)
        .dry_run(cli.dry_run)
        .verbose(settings.verbose);
    unexporter.collect_symbols(&units);

    let stdout = io::stdout();
    let stderr = io::stderr();
    if cli.json {
        unexporter
            .unexport_symbols(&mut stderr.lock())
            .context(Phase::UnexportSymbols)?;
        unexporter
            .report()
            .write_json(&mut stdout.lock())
            .context(Phase::PrintResults)?;
    } else {
        let mut out = stdout.lock();
        unexporter
            .unexport_symbols(&mut out)
            .context(Phase::UnexportSymbols)?;
        unexporter
            .print_results(&mut out)
            .context(Phase::PrintResults)?;
        out.flush().context(Phase::PrintResults)?;
    }

    Ok(())
}

fn main() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] unexport internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
        std::process::exit(2);
    }));

    // JSON to stderr, respects RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unexport_core::RenamerConfig;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["unexport"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.targets, vec!["."]);
        assert!(!cli.verbose);

        let settings = resolve_settings(&cli, None);
        assert!(settings.policy.attempts_all());
        assert!(settings.policy.skip_set().is_empty());
        assert_eq!(settings.renamer.program(), "gorename");
    }

    #[test]
    fn test_flags() {
        let cli = cli(&[
            "-v",
            "--unexport",
            "Foo,Bar",
            "--skip",
            "Bar",
            "--renamer",
            "/usr/local/bin/gorename",
            "./pkg/...",
            "./cmd",
        ]);
        assert_eq!(cli.targets, vec!["./pkg/...", "./cmd"]);

        let settings = resolve_settings(&cli, None);
        assert!(settings.verbose);
        assert!(settings.policy.allows("Foo"));
        assert!(!settings.policy.allows("Bar"));
        assert!(!settings.policy.allows("Baz"));
        assert_eq!(settings.renamer.program(), "/usr/local/bin/gorename");
    }

    #[test]
    fn test_config_merges_under_flags() {
        let config = UnexportConfig {
            unexport: Some(vec!["Foo".into(), "Qux".into()]),
            skip: Some(vec!["Qux".into()]),
            verbose: Some(true),
            renamer: Some(RenamerConfig {
                program: Some("gorename-1.20".into()),
                args: Some(vec!["-force".into()]),
            }),
        };

        let settings = resolve_settings(&cli(&["--skip", "Foo"]), Some(config.clone()));
        assert!(settings.verbose);
        assert!(!settings.policy.allows("Foo"));
        assert!(!settings.policy.allows("Qux"));
        assert_eq!(settings.renamer.program(), "gorename-1.20");

        let settings = resolve_settings(&cli(&["--unexport", "Zed"]), Some(config));
        assert!(settings.policy.allows("Zed"));
        assert!(!settings.policy.allows("Foo"));
    }

    #[test]
    fn test_empty_unexport_flag_means_all() {
        let settings = resolve_settings(&cli(&["--unexport", ""]), None);
        assert!(settings.policy.attempts_all());
    }
}

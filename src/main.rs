mod app;
mod config;
mod continuum;
mod data;
mod error;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use app::ContinuumApp;
use config::Config;

const USAGE: &str = "usage: rusty-continuum <input> [output] [--config FILE] [--max-bands N] [--no-header] [--strict]";

/// Command-line arguments. Flags override values from `--config`.
#[derive(Debug, Default, PartialEq)]
struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    max_bands: Option<usize>,
    no_header: bool,
    strict: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut positional = Vec::new();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a file")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--max-bands" => {
                let n = iter.next().context("--max-bands needs a number")?;
                parsed.max_bands = Some(
                    n.parse()
                        .with_context(|| format!("--max-bands: '{n}' is not a count"))?,
                );
            }
            "--no-header" => parsed.no_header = true,
            "--strict" => parsed.strict = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    parsed.input = positional.next().context(USAGE)?;
    parsed.output = positional.next();
    if positional.next().is_some() {
        bail!("too many arguments\n{USAGE}");
    }
    Ok(parsed)
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(n) = args.max_bands {
        config.max_bands = n;
    }
    if args.no_header {
        config.has_header = false;
    }
    if args.strict {
        config.strict = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = resolve_config(&args)?;
    let output = args.output.clone().unwrap_or_else(app::default_output);

    ContinuumApp::new(config).run(&args.input, &output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Result<Args> {
        parse_args(raw.iter().map(|s| s.to_string()))
    }

    #[test]
    fn input_only() {
        let parsed = args(&["input.csv"]).unwrap();
        assert_eq!(parsed.input, PathBuf::from("input.csv"));
        assert_eq!(parsed.output, None);
        assert_eq!(resolve_config(&parsed).unwrap(), Config::default());
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = args(&["in.dat", "out.csv", "--max-bands", "1024", "--strict", "--no-header"])
            .unwrap();
        assert_eq!(parsed.output, Some(PathBuf::from("out.csv")));

        let config = resolve_config(&parsed).unwrap();
        assert_eq!(config.max_bands, 1024);
        assert!(config.strict);
        assert!(!config.has_header);
    }

    #[test]
    fn missing_input_and_bad_flags() {
        assert!(args(&[]).is_err());
        assert!(args(&["in.csv", "--max-bands", "many"]).is_err());
        assert!(args(&["in.csv", "--verbose"]).is_err());
        assert!(args(&["a", "b", "c"]).is_err());
    }
}

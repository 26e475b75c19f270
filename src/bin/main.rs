use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use gof_patterns::{CatalogConfig, CatalogError, Section};

const USAGE: &str = "usage: gof-patterns [--config <path>] [--no-color] [section...]
sections: solid, creational, structural, behavioral";

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    sections: Vec<Section>,
    no_color: bool,
    help: bool,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, CatalogError> {
    let mut args = Args {
        config: None,
        sections: Vec::new(),
        no_color: false,
        help: false,
    };

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--config" => {
                let path = raw.next().ok_or_else(|| {
                    CatalogError::InvalidConfig("--config expects a path".to_string())
                })?;
                args.config = Some(PathBuf::from(path));
            }
            "--no-color" => args.no_color = true,
            "-h" | "--help" => args.help = true,
            other => args.sections.push(other.parse()?),
        }
    }

    Ok(args)
}

fn load_config(args: &Args) -> Result<CatalogConfig, CatalogError> {
    let mut config = match &args.config {
        Some(path) => CatalogConfig::from_file(path)?,
        None => CatalogConfig::default(),
    };
    if !args.sections.is_empty() {
        config.run.sections = args.sections.clone();
    }
    if args.no_color {
        config.run.color = false;
    }
    Ok(config)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let result = parse_args(env::args().skip(1)).and_then(|args| {
        if args.help {
            println!("{USAGE}");
            return Ok(());
        }
        let config = load_config(&args)?;
        gof_patterns::run(&config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Result<Args, CatalogError> {
        parse_args(args.iter().map(|arg| arg.to_string()).collect::<Vec<_>>().into_iter())
    }

    #[test]
    fn test_no_arguments_use_defaults() {
        let args = parse(&[]).unwrap();
        assert!(args.config.is_none());
        assert!(args.sections.is_empty());
        assert!(!args.no_color && !args.help);
        assert_eq!(load_config(&args).unwrap(), CatalogConfig::default());
    }

    #[test]
    fn test_config_flag_takes_a_path() {
        let args = parse(&["--config", "catalog.toml", "--no-color"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("catalog.toml")));
        assert!(args.no_color);
    }

    #[test]
    fn test_config_flag_without_path_fails() {
        let result = parse(&["solid", "--config"]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidConfig(message)) if message.contains("--config")
        ));
    }

    #[test]
    fn test_sections_and_help() {
        let args = parse(&["Structural", "solid", "-h"]).unwrap();
        assert_eq!(args.sections, vec![Section::Structural, Section::Solid]);
        assert!(args.help);
        assert!(parse(&["--help"]).unwrap().help);
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(matches!(
            parse(&["solid", "quantum"]),
            Err(CatalogError::UnknownSection(name)) if name == "quantum"
        ));
    }

    #[test]
    fn test_positional_sections_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[run]\nsections = [\"solid\"]\ncolor = true\n\n[chain]\ncash = 47").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let args = parse(&["--config", &path, "behavioral", "--no-color"]).unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.run.sections, vec![Section::Behavioral]);
        assert!(!config.run.color);
        assert_eq!(config.chain.cash, 47);

        let file_only = load_config(&parse(&["--config", &path]).unwrap()).unwrap();
        assert_eq!(file_only.run.sections, vec![Section::Solid]);
        assert!(file_only.run.color);
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml").to_string_lossy().into_owned();
        let args = parse(&["--config", &path]).unwrap();
        assert!(matches!(load_config(&args), Err(CatalogError::Io(_))));
    }
}

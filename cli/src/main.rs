#![allow(missing_docs)]

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use env_logger::Env;
use log::{error, info};
use tilegen::GeneratorConfig;

fn main() -> ExitCode {
    match _main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            error!("{why:#}");
            ExitCode::FAILURE
        },
    }
}

// Default to debug logs on debug builds, info otherwise
#[cfg(debug_assertions)]
type TilegenVerbosity = Verbosity<clap_verbosity_flag::DebugLevel>;
#[cfg(not(debug_assertions))]
type TilegenVerbosity = Verbosity<clap_verbosity_flag::InfoLevel>;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The alphabet source to generate from [default: from --config]
    input: Option<PathBuf>,

    /// Where alphabet data files are read from [default: the input's
    /// directory]
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Write the generated C here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// A TOML file with generator settings, overridden by flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The C type name of tile records [default: tile]
    #[arg(long)]
    tile_type: Option<String>,

    /// The C type name returned by decode functions [default: parsed_tile]
    #[arg(long)]
    parsed_tile_type: Option<String>,

    /// Emit includes and type definitions before the tables
    #[arg(long, overrides_with = "no_preamble")]
    preamble: bool,

    /// Leave out the preamble, even if the config file asks for it
    #[arg(long, overrides_with = "preamble")]
    no_preamble: bool,

    #[command(flatten)]
    verbosity: TilegenVerbosity,
}

impl Args {
    fn generator_config(&self) -> anyhow::Result<GeneratorConfig> {
        let from_flags = GeneratorConfig {
            input: self.input.clone(),
            data_dir: self.data_dir.clone(),
            tile_type: self.tile_type.clone(),
            parsed_tile_type: self.parsed_tile_type.clone(),
            preamble: self.preamble_flag(),
        };
        let Some(config_path) = &self.config else {
            return Ok(from_flags);
        };
        let from_file = GeneratorConfig::load(config_path).with_context(|| {
            format!("failed to load config {}", config_path.display())
        })?;
        Ok(from_flags.or(from_file))
    }

    /// `None` when neither flag was given, so the config file decides.
    const fn preamble_flag(&self) -> Option<bool> {
        match (self.preamble, self.no_preamble) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

fn _main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(args.verbosity.log_level_filter())
        .parse_env(Env::new().filter("TILEGEN_LOG"))
        .init();

    let config = args.generator_config()?;
    let start = Instant::now();
    let code = tilegen::generate(&config).context("failed to generate tiles")?;
    info!("Took {:?}", start.elapsed());

    match &args.output {
        Some(path) => fs::write(path, code).with_context(|| {
            format!("failed to write {}", path.display())
        })?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(code.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")?;
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let argv = std::iter::once("tilegen").chain(args.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn preamble_flags_are_tri_state() {
        assert_eq!(parse(&["in.rs"]).preamble_flag(), None);
        assert_eq!(parse(&["--preamble", "in.rs"]).preamble_flag(), Some(true));
        assert_eq!(parse(&["--no-preamble", "in.rs"]).preamble_flag(), Some(false));
        // The last one given wins
        assert_eq!(
            parse(&["--preamble", "--no-preamble", "in.rs"]).preamble_flag(),
            Some(false),
        );
        assert_eq!(
            parse(&["--no-preamble", "--preamble", "in.rs"]).preamble_flag(),
            Some(true),
        );
    }

    #[test]
    fn no_preamble_overrides_config_file() {
        let dir = std::env::temp_dir().join(format!(
            "tilegen-no_preamble_overrides_config_file-{}",
            std::process::id(),
        ));
        fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("tilegen.toml");
        let written =
            fs::write(&config_path, "input = \"alphabet.rs\"\npreamble = true\n");
        let config_arg = config_path.to_string_lossy().into_owned();

        let overridden =
            parse(&["--no-preamble", "--config", &config_arg]).generator_config();
        let from_file = parse(&["--config", &config_arg]).generator_config();
        fs::remove_dir_all(&dir).unwrap();
        written.unwrap();

        let overridden = overridden.unwrap().emit_options().unwrap();
        assert!(!overridden.preamble());
        let from_file = from_file.unwrap().emit_options().unwrap();
        assert!(from_file.preamble());
    }
}

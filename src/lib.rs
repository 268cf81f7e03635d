pub mod config;
pub mod opacity;

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ConfigError;
use crate::opacity::{OpacityLevels, expand_css};

const USAGE: &str = "
  Usage: cssalpha [options]

  Options:
    -s, --source <file>     Source CSS file
    -o, --output <file>     Output CSS file
    -c, --config <file>     TOML file overriding the opacity levels
    -h, --help              Display help

  Examples:
    cssalpha -s ./variables.css -o ./variables-alpha.css
    cssalpha --source ./variables.css --output ./variables-alpha.css -c cssalpha.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Expand {
        source: String,
        output: String,
        config: Option<String>,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    pub message: String,
    pub show_usage: bool,
}

impl CliError {
    fn usage(message: &str) -> Self {
        Self {
            message: message.to_string(),
            show_usage: true,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self {
            message: err.message,
            show_usage: false,
        }
    }
}

pub fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Expand {
            source,
            output,
            config,
        } => run_expand(&source, &output, config.as_deref()),
        Command::Help => {
            print_usage();
            Ok(())
        }
    }
}

pub fn run_from_env() -> Result<(), CliError> {
    let command = parse_args(env::args().skip(1))?;
    debug!(?command, "parsed arguments");
    run(command)
}

/// Every token starting with `-` takes the token after it as its value, even
/// when that token was itself consumed as another flag's value. The last
/// occurrence of a flag wins, long forms beat short ones, and empty values
/// count as missing.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let mut flags: BTreeMap<&str, Option<&str>> = BTreeMap::new();

    for (idx, arg) in args.iter().enumerate() {
        if arg.starts_with('-') {
            flags.insert(arg.as_str(), args.get(idx + 1).map(String::as_str));
        }
    }

    // presence alone requests help, even as the last token or with an empty value
    if flags.contains_key("-h") || flags.contains_key("--help") {
        return Ok(Command::Help);
    }

    let Some(source) = flag_value(&flags, "--source", "-s") else {
        return Err(CliError::usage("The source CSS file must be provided."));
    };
    let Some(output) = flag_value(&flags, "--output", "-o") else {
        return Err(CliError::usage("The output CSS file must be provided."));
    };

    Ok(Command::Expand {
        source,
        output,
        config: flag_value(&flags, "--config", "-c"),
    })
}

pub fn print_usage() {
    println!("{}", USAGE);
}

fn flag_value(flags: &BTreeMap<&str, Option<&str>>, long: &str, short: &str) -> Option<String> {
    [long, short]
        .into_iter()
        .filter_map(|flag| flags.get(flag).copied().flatten())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn run_expand(source: &str, output: &str, config_path: Option<&str>) -> Result<(), CliError> {
    if !Path::new(source).exists() {
        return Err(CliError {
            message: format!("Source file {} does not exist", source),
            show_usage: false,
        });
    }

    let levels = match config_path {
        Some(path) => {
            let levels = config::load_levels(Path::new(path))?;
            debug!(path, ?levels, "loaded opacity levels");
            levels
        }
        None => OpacityLevels::default(),
    };

    let css = fs::read_to_string(source).map_err(|err| CliError {
        message: format!("failed to read {}: {}", source, err),
        show_usage: false,
    })?;
    debug!(source, bytes = css.len(), "read source stylesheet");

    let expansion = expand_css(&css, &levels);
    debug!(
        declarations = expansion.declarations_expanded,
        variants = expansion.declarations_expanded * levels.len(),
        "expanded stylesheet"
    );

    fs::write(output, &expansion.css).map_err(|err| CliError {
        message: format!("failed to write {}: {}", output, err),
        show_usage: false,
    })?;
    debug!(output, bytes = expansion.css.len(), "wrote output stylesheet");

    Ok(())
}

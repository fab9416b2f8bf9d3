//! Parsing command-line arguments.

use casim_lib::{
    rules::{Life, Wolfram},
    Config, CueConfig, GridInit, LifeConfig, ModelConfig, PolySimulation, PopulationInit, RowInit,
    SchellingConfig, UpdateScheme, WolframConfig,
};
use clap::{
    crate_authors, crate_description, crate_name, crate_version, error::ErrorKind, value_parser,
    Arg, ArgAction, ArgMatches, Command, Error,
};
use std::{fs, path::PathBuf};

#[cfg(feature = "tui")]
use std::time::Duration;

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) simulation: PolySimulation,
    pub(crate) steps: u64,
    pub(crate) trace: bool,
    pub(crate) all: bool,
    pub(crate) output: Option<PathBuf>,
    #[cfg(feature = "tui")]
    pub(crate) live: bool,
    #[cfg(feature = "tui")]
    pub(crate) interval: Duration,
}

fn invalid<S: ToString>(message: S) -> Error {
    Error::raw(ErrorKind::InvalidValue, format!("{}\n", message.to_string()))
}

fn probability(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(String::from("must be between 0 and 1"))
    }
}

/// Reads a configuration file. The format is chosen by the extension.
fn read_config(path: &PathBuf) -> Result<Config, Error> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::raw(ErrorKind::Io, format!("{}: {}\n", path.display(), e)))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("toml") => toml::from_str(&text).map_err(invalid),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text).map_err(invalid),
        Some("json") => serde_json::from_str(&text).map_err(invalid),
        _ => Err(invalid(format!(
            "{}: unknown configuration format, expected .toml, .yaml or .json",
            path.display()
        ))),
    }
}

/// Replaces the model of the configuration by the default one of the named kind,
/// unless it is already of that kind.
fn select_model(model: ModelConfig, name: &str) -> ModelConfig {
    match (name, model) {
        ("life", model @ ModelConfig::Life(_))
        | ("wolfram", model @ ModelConfig::Wolfram(_))
        | ("schelling", model @ ModelConfig::Schelling(_))
        | ("cue", model @ ModelConfig::Cue(_)) => model,
        ("wolfram", _) => WolframConfig::default().into(),
        ("schelling", _) => SchellingConfig::default().into(),
        ("cue", _) => CueConfig::default().into(),
        _ => LifeConfig::default().into(),
    }
}

/// Applies the model-specific flags.
fn apply_model_flags(model: &mut ModelConfig, matches: &ArgMatches) -> Result<(), Error> {
    let rows = matches.get_one::<usize>("ROWS").copied();
    let cols = matches.get_one::<usize>("COLS").copied();
    let rule = matches.get_one::<String>("RULE");
    let density = matches.get_one::<f64>("DENSITY").copied();
    let voids = matches.get_one::<f64>("VOIDS").copied();
    let radius = matches.get_one::<usize>("RADIUS").copied();
    let delta = matches.get_one::<f64>("DELTA").copied();
    let agents = matches.get_one::<usize>("AGENTS").copied();

    let only = |flag: &str, kinds: &str| invalid(format!("--{} is only valid for {}", flag, kinds));

    match model {
        ModelConfig::Life(config) => {
            config.rows = rows.unwrap_or(config.rows);
            config.cols = cols.unwrap_or(config.cols);
            if let Some(rule) = rule {
                rule.parse::<Life>().map_err(invalid)?;
                config.rule_string = rule.clone();
            }
            if let Some(density) = density {
                config.init = GridInit::Random { density };
            }
        }
        ModelConfig::Wolfram(config) => {
            if rows.is_some() {
                return Err(only("rows", "2-D models"));
            }
            config.length = cols.unwrap_or(config.length);
            if let Some(rule) = rule {
                config.rule = rule.parse::<Wolfram>().map_err(invalid)?.number();
            }
            if let Some(density) = density {
                config.init = RowInit::Random { density };
            }
        }
        ModelConfig::Schelling(config) => {
            config.rows = rows.unwrap_or(config.rows);
            config.cols = cols.unwrap_or(config.cols);
            if let Some(voids) = voids {
                config.init = PopulationInit::Random { voids };
            }
        }
        ModelConfig::Cue(config) => {
            if rows.is_some() {
                return Err(only("rows", "2-D models"));
            }
            config.spaces = cols.unwrap_or(config.spaces);
            config.agents = agents.unwrap_or(config.agents);
            config.radius = radius.unwrap_or(config.radius);
            config.delta_sigma = delta.unwrap_or(config.delta_sigma);
        }
    }

    let is_life = matches!(model, ModelConfig::Life(_));
    let is_wolfram = matches!(model, ModelConfig::Wolfram(_));
    let is_schelling = matches!(model, ModelConfig::Schelling(_));
    let is_cue = matches!(model, ModelConfig::Cue(_));
    if rule.is_some() && !(is_life || is_wolfram) {
        return Err(only("rule", "life and wolfram"));
    }
    if density.is_some() && !(is_life || is_wolfram) {
        return Err(only("density", "life and wolfram"));
    }
    if voids.is_some() && !is_schelling {
        return Err(only("voids", "schelling"));
    }
    for (flag, value) in [
        ("radius", radius.is_some()),
        ("delta", delta.is_some()),
        ("agents", agents.is_some()),
    ] {
        if value && !is_cue {
            return Err(only(flag, "cue"));
        }
    }
    Ok(())
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, Error> {
        let command = Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
            .long_about(
                "Cellular automata and grid agent models on a torus\n\
                 \n\
                 Models:\n\
                 * life: Life-like cellular automata, Conway's Game of Life by default;\n\
                 * wolfram: elementary cellular automata, rule 30 by default;\n\
                 * schelling: Schelling's segregation model;\n\
                 * cue: a 1-D model of agents moving between public spaces.\n\
                 \n\
                 Grids are displayed in Plaintext format.\n\
                 * Dead cells and voids are represented by `.`;\n\
                 * Living cells are represented by `o`;\n\
                 * Agent types are represented by uppercase letters starting from `A`.\n\
                 \n\
                 Every option can also be given in a configuration file \
                 (TOML, YAML or JSON); options on the command line win.\n",
            )
            .arg(
                Arg::new("MODEL")
                    .help("The model to simulate")
                    .index(1)
                    .value_parser(["life", "wolfram", "schelling", "cue"]),
            )
            .arg(
                Arg::new("CONFIG")
                    .help("Configuration file (.toml, .yaml or .json)")
                    .short('c')
                    .long("config")
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("ROWS")
                    .help("Number of rows")
                    .long("rows")
                    .value_parser(value_parser!(usize)),
            )
            .arg(
                Arg::new("COLS")
                    .help("Number of columns, length of the row, or number of spaces")
                    .long("cols")
                    .value_parser(value_parser!(usize)),
            )
            .arg(
                Arg::new("STEPS")
                    .help("Number of generations")
                    .short('n')
                    .long("steps")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("SEED")
                    .help("Random seed")
                    .long_help(
                        "Random seed\n\
                         If not given, a seed is taken from the system clock \
                         and logged, so that the run can be repeated.\n",
                    )
                    .short('s')
                    .long("seed")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("RULE")
                    .help("Rule of the cellular automaton")
                    .long_help(
                        "Rule of the cellular automaton\n\
                         A Life-like rule string such as B3/S23 for life, \
                         a number from 0 to 255 for wolfram.\n",
                    )
                    .short('r')
                    .long("rule"),
            )
            .arg(
                Arg::new("DENSITY")
                    .help("Density of living cells in a random initial state")
                    .short('d')
                    .long("density")
                    .value_parser(probability),
            )
            .arg(
                Arg::new("VOIDS")
                    .help("Fraction of void cells in a random initial state")
                    .long("voids")
                    .value_parser(probability),
            )
            .arg(
                Arg::new("AGENTS")
                    .help("Number of agents")
                    .long("agents")
                    .value_parser(value_parser!(usize)),
            )
            .arg(
                Arg::new("RADIUS")
                    .help("How far an agent looks for its next space")
                    .long("radius")
                    .value_parser(value_parser!(usize)),
            )
            .arg(
                Arg::new("DELTA")
                    .help("Maximal discrepancy for an interaction")
                    .long("delta")
                    .value_parser(value_parser!(f64)),
            )
            .arg(
                Arg::new("SCHEME")
                    .help("Update scheme")
                    .long_help(
                        "Update scheme\n\
                         sync: every cell sees the previous generation;\n\
                         seq: cells are updated in place, one after another.\n\
                         The default depends on the model.\n",
                    )
                    .long("scheme")
                    .value_parser(["sync", "seq", "synchronous", "sequential"]),
            )
            .arg(
                Arg::new("NOTRACE")
                    .help("Does not keep every generation in the output")
                    .long("no-trace")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("OUTPUT")
                    .help("Writes the output record to a file (.json or .yaml)")
                    .short('o')
                    .long("output")
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("ALL")
                    .help("Prints every generation")
                    .short('a')
                    .long("all")
                    .action(ArgAction::SetTrue),
            );

        #[cfg(feature = "tui")]
        let command = command
            .arg(
                Arg::new("LIVE")
                    .help("Shows the simulation in the terminal, one generation per tick")
                    .short('l')
                    .long("live")
                    .action(ArgAction::SetTrue)
                    .conflicts_with_all(["ALL", "OUTPUT"]),
            )
            .arg(
                Arg::new("INTERVAL")
                    .help("Milliseconds between two generations in live mode")
                    .long("interval")
                    .default_value("100")
                    .value_parser(value_parser!(u64)),
            );

        let matches = command.try_get_matches()?;

        let mut config = match matches.get_one::<PathBuf>("CONFIG") {
            Some(path) => read_config(path)?,
            None => Config::default(),
        };

        if let Some(name) = matches.get_one::<String>("MODEL") {
            config.model = select_model(config.model, name);
        }
        apply_model_flags(&mut config.model, &matches)?;

        if let Some(&steps) = matches.get_one::<u64>("STEPS") {
            config.steps = steps;
        }
        if let Some(&seed) = matches.get_one::<u64>("SEED") {
            config.seed = Some(seed);
        }
        if let Some(scheme) = matches.get_one::<String>("SCHEME") {
            config.scheme = match scheme.as_str() {
                "sync" | "synchronous" => Some(UpdateScheme::Synchronous),
                _ => Some(UpdateScheme::Sequential),
            };
        }
        if matches.get_flag("NOTRACE") {
            config.trace = false;
        }

        let simulation = config.simulation().map_err(invalid)?;

        Ok(Args {
            simulation,
            steps: config.steps,
            trace: config.trace,
            all: matches.get_flag("ALL"),
            output: matches.get_one::<PathBuf>("OUTPUT").cloned(),
            #[cfg(feature = "tui")]
            live: matches.get_flag("LIVE"),
            #[cfg(feature = "tui")]
            interval: Duration::from_millis(
                matches.get_one::<u64>("INTERVAL").copied().unwrap_or(100),
            ),
        })
    }
}

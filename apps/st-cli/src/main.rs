mod error;
mod render;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use st_core::{Quantity, parse_quantity};
use st_props::{EngineOptions, KnownInputs, Property, Steam};
use st_tables::TableSet;
use tracing::info;

use crate::error::{CliError, CliResult};
use crate::render::Reading;

#[derive(Parser)]
#[command(name = "st-cli")]
#[command(about = "Steam table lookups by interpolation", long_about = None)]
struct Cli {
    /// JSON table file to use instead of the built-in tables
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
    /// YAML file with engine options
    #[arg(long, global = true)]
    options: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a state from any known properties (e.g. P=1MPa T=400C)
    State {
        /// KEY=VALUE pairs; keys P_kPa (P), T_C (T), x, v, u, h, s
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// Saturation properties at a temperature
    SatT {
        /// Temperature (default °C; K, F and R accepted)
        temperature: String,
    },
    /// Saturation properties at a pressure
    SatP {
        /// Pressure (default kPa; Pa, MPa, bar, atm, psia, psig accepted)
        pressure: String,
    },
    /// Region of a pressure/temperature pair
    Region { pressure: String, temperature: String },
    /// One of v, u, h, s from pressure and temperature
    Prop {
        property: Property,
        pressure: String,
        temperature: String,
    },
    /// Two-phase mixture value of v, u, h or s from temperature and quality
    Mix {
        property: Property,
        temperature: String,
        /// Quality as a fraction or percentage (e.g. 0.35 or 35%)
        quality: String,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let steam = load_engine(cli.tables.as_deref(), cli.options.as_deref())?;

    match cli.command {
        Commands::State { pairs } => cmd_state(&steam, &pairs, cli.json),
        Commands::SatT { temperature } => cmd_sat_t(&steam, &temperature, cli.json),
        Commands::SatP { pressure } => cmd_sat_p(&steam, &pressure, cli.json),
        Commands::Region {
            pressure,
            temperature,
        } => cmd_region(&steam, &pressure, &temperature, cli.json),
        Commands::Prop {
            property,
            pressure,
            temperature,
        } => cmd_prop(&steam, property, &pressure, &temperature, cli.json),
        Commands::Mix {
            property,
            temperature,
            quality,
        } => cmd_mix(&steam, property, &temperature, &quality, cli.json),
    }
}

fn load_engine(tables: Option<&Path>, options: Option<&Path>) -> CliResult<Steam> {
    let steam = match tables {
        Some(path) => {
            let (set, report) = TableSet::load_json(path)?;
            info!(
                path = %path.display(),
                superheated_blocks = ?report.superheated.pressure_blocks,
                compressed_blocks = ?report.compressed.pressure_blocks,
                "loaded steam tables"
            );
            Steam::new(set)
        }
        None => Steam::from_builtin()?,
    };
    let options = match options {
        Some(path) => load_options(path)?,
        None => EngineOptions::default(),
    };
    Ok(steam.with_options(options)?)
}

fn load_options(path: &Path) -> CliResult<EngineOptions> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

fn split_pair(pair: &str) -> CliResult<(&str, &str)> {
    pair.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| CliError::BadPair(pair.to_string()))
}

fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_state(steam: &Steam, pairs: &[String], json: bool) -> CliResult<()> {
    let pairs = pairs
        .iter()
        .map(|p| split_pair(p))
        .collect::<CliResult<Vec<_>>>()?;
    let record = steam.state(&KnownInputs::from_pairs(pairs));

    if json {
        return print_json(&record);
    }
    println!("{}", render::state(&record, steam.precision()));
    Ok(())
}

fn cmd_sat_t(steam: &Steam, temperature: &str, json: bool) -> CliResult<()> {
    let t_c = parse_quantity(temperature, Quantity::Temperature)?;
    let sat = steam.sat_t(t_c)?;
    if json {
        return print_json(&sat);
    }
    for line in render::saturation(&sat, steam.precision()) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_sat_p(steam: &Steam, pressure: &str, json: bool) -> CliResult<()> {
    let p_kpa = parse_quantity(pressure, Quantity::Pressure)?;
    let sat = steam.sat_p(p_kpa)?;
    if json {
        return print_json(&sat);
    }
    for line in render::saturation(&sat, steam.precision()) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_region(steam: &Steam, pressure: &str, temperature: &str, json: bool) -> CliResult<()> {
    let p_kpa = parse_quantity(pressure, Quantity::Pressure)?;
    let t_c = parse_quantity(temperature, Quantity::Temperature)?;
    let region = steam.region(p_kpa, t_c)?;
    let tsat = Reading::new("Tsat_C", Quantity::Temperature, steam.tsat_p(p_kpa)?);

    if json {
        return print_json(&serde_json::json!({ "region": region, "saturation": tsat }));
    }
    println!("region: {region}");
    println!("{}", tsat.render(steam.precision()));
    Ok(())
}

fn property_quantity(prop: Property) -> Quantity {
    match prop {
        Property::V => Quantity::SpecificVolume,
        Property::U | Property::H => Quantity::SpecificEnergy,
        Property::S => Quantity::SpecificEntropy,
    }
}

fn emit(steam: &Steam, reading: &Reading, json: bool) -> CliResult<()> {
    if json {
        return print_json(reading);
    }
    println!("{}", reading.render(steam.precision()));
    Ok(())
}

fn cmd_prop(
    steam: &Steam,
    prop: Property,
    pressure: &str,
    temperature: &str,
    json: bool,
) -> CliResult<()> {
    let p_kpa = parse_quantity(pressure, Quantity::Pressure)?;
    let t_c = parse_quantity(temperature, Quantity::Temperature)?;
    let value = steam.property(prop, p_kpa, t_c)?;
    emit(steam, &Reading::new(prop.name(), property_quantity(prop), value), json)
}

fn cmd_mix(
    steam: &Steam,
    prop: Property,
    temperature: &str,
    quality: &str,
    json: bool,
) -> CliResult<()> {
    let t_c = parse_quantity(temperature, Quantity::Temperature)?;
    let x = parse_quantity(quality, Quantity::Quality)?;
    let value = steam.property_tx(prop, t_c, x)?;
    emit(steam, &Reading::new(prop.name(), property_quantity(prop), value), json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_state_pairs_with_global_flags() {
        let cli = Cli::try_parse_from(["st-cli", "state", "P=1 MPa", "T=400", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::State { pairs } => assert_eq!(pairs, vec!["P=1 MPa", "T=400"]),
            _ => panic!("expected state command"),
        }
    }

    #[test]
    fn parses_property_argument() {
        let cli = Cli::try_parse_from(["st-cli", "prop", "h", "1000", "400"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Prop {
                property: Property::H,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["st-cli", "prop", "rho", "1000", "400"]).is_err());
    }

    #[test]
    fn split_pair_requires_key_and_equals() {
        assert_eq!(split_pair(" h = 2676.1 ").unwrap(), ("h", "2676.1"));
        assert!(matches!(split_pair("h2676"), Err(CliError::BadPair(_))));
        assert!(matches!(split_pair("=5"), Err(CliError::BadPair(_))));
    }

    #[test]
    fn options_load_from_yaml() {
        let opts: EngineOptions = serde_yaml::from_str("saturation_band_c: 0.5\n").unwrap();
        assert_eq!(opts.saturation_band_c, 0.5);
        let steam = Steam::from_builtin().unwrap().with_options(opts).unwrap();
        assert_eq!(steam.options().saturation_band_c, 0.5);
    }

    #[test]
    fn property_quantities() {
        assert_eq!(property_quantity(Property::S), Quantity::SpecificEntropy);
        assert_eq!(property_quantity(Property::U).table_unit(), "kJ/kg");
    }
}

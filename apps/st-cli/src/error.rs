use st_core::UnitError;
use st_props::SteamError;
use st_tables::TableError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Expected KEY=VALUE, got '{0}'")]
    BadPair(String),

    #[error("Invalid value: {0}")]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Steam(#[from] SteamError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Options file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

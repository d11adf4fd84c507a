use clap::Parser;

use crate::model::RoundSetup;

/// Rounds to create at startup, read from `--round-json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundFixtures(pub Vec<RoundSetup>);

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The sqlite filename. `:memory:` keeps everything in process.
    #[arg(short = 'n', long, value_name = "DATABASE_NAME", default_value = ":memory:")]
    pub db_name: String,
    #[arg(short = 'b', long, value_name = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind: String,
    #[arg(short = 'p', long, value_name = "PORT", default_value = "5201")]
    pub port: u16,
    /// Rounds created on startup; rounds that already exist are skipped.
    #[arg(
        long,
        value_name = "ROUND_JSON",
        value_parser = crate::args::validation::check_readable_file_and_json
    )]
    pub round_json: Option<RoundFixtures>,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_name: String,
    pub bind: String,
    pub port: u16,
    pub rounds: Vec<crate::model::RoundSetup>,
}

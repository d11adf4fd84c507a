use clap::Parser;
use tracing::info;

pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs, RoundFixtures};

/// # Errors
///
/// Will return `Err` if the arguments are invalid
pub fn args_checks() -> Result<CleanArgs, String> {
    let args = Args::parse();
    args.validate()?;
    Ok(CleanArgs::new(args))
}

impl Args {
    /// # Errors
    ///
    /// Will return `Err` if the bind address is empty
    pub fn validate(&self) -> Result<(), String> {
        if self.bind.trim().is_empty() {
            return Err("Bind address is required".to_string());
        }
        Ok(())
    }
}

impl CleanArgs {
    #[must_use]
    pub fn new(args: Args) -> Self {
        let rounds = args.round_json.map(|f| f.0).unwrap_or_default();
        if !rounds.is_empty() {
            info!(rounds = rounds.len(), "round fixtures loaded");
        }
        CleanArgs {
            db_name: args.db_name,
            bind: args.bind.trim().to_string(),
            port: args.port,
            rounds,
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> (String, u16) {
        (self.bind.clone(), self.port)
    }
}

use std::collections::HashSet;
use std::{fs, path::PathBuf};

use super::types::RoundFixtures;
use crate::model::RoundSetup;

/// # Errors
///
/// Will return `Err` if the file is not readable or does not hold valid round fixtures
pub fn check_readable_file_and_json(file: &str) -> Result<RoundFixtures, String> {
    let path = PathBuf::from(file);
    if !path.is_file() {
        return Err(format!("The json file '{file}' is not readable."));
    }
    let contents =
        fs::read_to_string(&path).map_err(|e| format!("The json file '{file}' is not readable: {e}"))?;
    parse_round_fixtures(&contents)
}

/// Parses and validates the fixture format:
/// `[{ "round": {..}, "players": [{..}, ..], "pars": [{"hole": 1, "par": 4}, ..] }, ..]`
///
/// # Errors
///
/// Will return `Err` if the json is malformed, a round fails validation, or a
/// round id repeats
pub fn parse_round_fixtures(contents: &str) -> Result<RoundFixtures, String> {
    let setups: Vec<RoundSetup> = serde_json::from_str(contents)
        .map_err(|e| format!("The json file is not in the correct format: {e}"))?;

    let mut seen = HashSet::new();
    for setup in &setups {
        if !seen.insert(setup.round.id.as_str()) {
            return Err(format!("Round '{}' appears more than once.", setup.round.id));
        }
        setup
            .validate()
            .map_err(|e| format!("Round '{}': {e}", setup.round.id))?;
    }
    Ok(RoundFixtures(setups))
}

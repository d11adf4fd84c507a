use rusty_golf_scorecard::args::validation::{check_readable_file_and_json, parse_round_fixtures};
use rusty_golf_scorecard::storage::{ChangeFeedStore, SqliteStore};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test6_rounds.json");

#[test]
fn test6_fixture_file_is_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let fixtures = check_readable_file_and_json(FIXTURE)?;
    assert_eq!(fixtures.0.len(), 1);
    let setup = &fixtures.0[0];
    assert_eq!(setup.round.hole_count, 9);
    assert_eq!(setup.pars.iter().map(|p| p.par).sum::<i32>(), 36);
    Ok(())
}

#[test]
fn test6_missing_file_is_reported() {
    let err = check_readable_file_and_json("/definitely/not/here.json").err();
    assert!(err.is_some_and(|e| e.contains("not readable")));
}

#[test]
fn test6_invalid_rounds_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let good: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(FIXTURE)?)?;

    let mut lower_code = good.clone();
    lower_code[0]["round"]["join_code"] = "rsd9".into();
    let err = parse_round_fixtures(&lower_code.to_string()).err();
    assert!(err.is_some_and(|e| e.contains("join code")));

    let mut bad_par = good.clone();
    bad_par[0]["pars"][4]["par"] = 6.into();
    let err = parse_round_fixtures(&bad_par.to_string()).err();
    assert!(err.is_some_and(|e| e.contains("invalid par 6")));

    let mut short = good.clone();
    short[0]["round"]["hole_count"] = 18.into();
    let err = parse_round_fixtures(&short.to_string()).err();
    assert!(err.is_some_and(|e| e.contains("missing par for hole 10")));

    let doubled = serde_json::Value::Array(vec![good[0].clone(), good[0].clone()]);
    let err = parse_round_fixtures(&doubled.to_string()).err();
    assert!(err.is_some_and(|e| e.contains("more than once")));

    assert!(parse_round_fixtures("{\"round\": 1}").is_err());
    Ok(())
}

#[tokio::test]
async fn test6_fixture_loads_into_sqlite() -> Result<(), Box<dyn std::error::Error>> {
    let fixtures = check_readable_file_and_json(FIXTURE)?;
    let store = SqliteStore::open(":memory:")?;
    for setup in &fixtures.0 {
        store.create_round(setup).await?;
    }
    let players = store.get_players("riverside-sat").await?;
    assert_eq!(players.len(), 2);
    assert_eq!(store.get_pars("riverside-sat").await?.len(), 9);
    Ok(())
}

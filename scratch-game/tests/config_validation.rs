use scratch_game::{ConfigError, GameConfig, GameEngine, JsonFileLoader, LoadError};
use serde_json::{Value, json};

const CANONICAL_CONFIG: &str = include_str!("../../assets/config.json");

fn canonical() -> Value {
    serde_json::from_str(CANONICAL_CONFIG).unwrap()
}

// `Value` objects do not keep key order, so tests that depend on declaration
// order parse the document text directly.
fn build(document: &Value) -> Result<GameEngine, ConfigError> {
    let config: GameConfig = serde_json::from_value(document.clone()).unwrap();
    GameEngine::new(&config)
}

#[test]
fn canonical_config_builds() {
    let engine = GameEngine::new(&GameConfig::from_json(CANONICAL_CONFIG).unwrap()).unwrap();
    assert_eq!(engine.rows(), 3);
    assert_eq!(engine.columns(), 3);
    assert_eq!(engine.symbols().len(), 11);
    assert_eq!(engine.combinations().len(), 11);
    let names: Vec<&str> = engine
        .combinations()
        .iter()
        .map(|combination| combination.name.as_str())
        .collect();
    assert_eq!(names.first(), Some(&"same_symbol_3_times"));
    assert_eq!(names.last(), Some(&"same_symbols_diagonally_right_to_left"));
}

#[test]
fn canonical_bonus_weights_are_declared_in_order() {
    let engine = GameEngine::new(&GameConfig::from_json(CANONICAL_CONFIG).unwrap()).unwrap();
    let bonus = engine.generator().selector().bonus_table();
    assert_eq!(bonus.total(), 15);
    assert_eq!(
        bonus.symbols().collect::<Vec<_>>(),
        vec!["10x", "5x", "+1000", "+500", "MISS"]
    );
    assert!((bonus.probability_of("MISS") - 5.0 / 15.0).abs() < 1e-12);
}

#[test]
fn zero_weight_table_is_rejected() {
    let mut document = canonical();
    document["probabilities"]["bonus_symbols"]["symbols"] =
        json!({ "10x": 0, "5x": 0, "+1000": 0, "+500": 0, "MISS": 0 });
    assert!(matches!(
        build(&document),
        Err(ConfigError::ZeroWeightTable { table }) if table == "bonus_symbols"
    ));
}

#[test]
fn missing_standard_tables_are_rejected() {
    let mut document = canonical();
    document["probabilities"]["standard_symbols"] = json!([]);
    assert_eq!(
        build(&document).unwrap_err(),
        ConfigError::NoStandardProbabilities
    );
}

#[test]
fn table_with_unknown_symbol_is_rejected() {
    let mut document = canonical();
    document["probabilities"]["standard_symbols"][4]["symbols"]["Z"] = json!(3);
    match build(&document) {
        Err(ConfigError::UnknownSymbol { table, symbol }) => {
            assert_eq!(symbol, "Z");
            assert!(table.contains("standard_symbols[4]"), "{table}");
        }
        other => panic!("expected unknown symbol error, got {other:?}"),
    }
}

#[test]
fn non_positive_dimensions_are_rejected() {
    let mut document = canonical();
    document["rows"] = json!(0);
    assert!(matches!(
        build(&document),
        Err(ConfigError::InvalidDimensions { rows: 0, columns: 3 })
    ));
}

#[test]
fn out_of_grid_coordinate_is_rejected() {
    let mut document = canonical();
    document["win_combinations"]["same_symbols_diagonally_left_to_right"]["covered_areas"] =
        json!([["0:0", "1:1", "3:3"]]);
    match build(&document) {
        Err(ConfigError::CoordinateOutOfRange { combination, coord, rows, columns }) => {
            assert_eq!(combination, "same_symbols_diagonally_left_to_right");
            assert_eq!(coord, "3:3");
            assert_eq!((rows, columns), (3, 3));
        }
        other => panic!("expected out of range coordinate, got {other:?}"),
    }
}

#[test]
fn malformed_coordinate_is_rejected() {
    let mut document = canonical();
    document["win_combinations"]["same_symbols_horizontally"]["covered_areas"] =
        json!([["0-0", "0:1", "0:2"]]);
    assert!(matches!(
        build(&document),
        Err(ConfigError::MalformedCoordinate { coord, .. }) if coord == "0-0"
    ));
}

#[test]
fn same_symbols_without_count_is_rejected() {
    let mut document = canonical();
    document["win_combinations"]["same_symbol_3_times"]
        .as_object_mut()
        .unwrap()
        .remove("count");
    assert!(matches!(
        build(&document),
        Err(ConfigError::MalformedCombination { combination, .. })
            if combination == "same_symbol_3_times"
    ));
}

#[test]
fn standard_symbol_without_multiplier_is_rejected() {
    let mut document = canonical();
    document["symbols"]["C"] = json!({ "type": "standard" });
    assert_eq!(
        build(&document).unwrap_err(),
        ConfigError::MissingSymbolField {
            symbol: "C".to_string(),
            field: "reward_multiplier"
        }
    );
}

#[test]
fn unknown_symbol_type_is_rejected() {
    let mut document = canonical();
    document["symbols"]["F"]["type"] = json!("wild");
    assert!(matches!(
        build(&document),
        Err(ConfigError::UnknownSymbolType { symbol, kind }) if symbol == "F" && kind == "wild"
    ));
}

#[test]
fn unsupported_condition_is_not_an_error() {
    let mut document = canonical();
    document["win_combinations"]["scatter"] = json!({
        "reward_multiplier": 100,
        "when": "scatter_symbols",
        "group": "scatter"
    });
    let engine = build(&document).unwrap();
    assert_eq!(engine.combinations().len(), 12);
}

#[test]
fn errors_name_the_offending_entry() {
    let mut document = canonical();
    document["symbols"]["10x"] = json!({ "type": "bonus", "impact": "multiply_reward" });
    let message = build(&document).unwrap_err().to_string();
    assert!(message.contains("10x"), "{message}");
    assert!(message.contains("reward_multiplier"), "{message}");
}

#[test]
fn file_loader_reads_canonical_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../assets/config.json");
    let engine = GameEngine::from_loader(&JsonFileLoader::new(path)).unwrap();
    assert_eq!(engine.symbols().len(), 11);
}

#[test]
fn file_loader_reports_validation_errors() {
    let mut document = canonical();
    document["columns"] = json!(-1);
    let path = std::env::temp_dir().join("scratch-game-invalid-columns.json");
    std::fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();
    let err = GameEngine::from_loader(&JsonFileLoader::new(&path)).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Config(ConfigError::InvalidDimensions { columns: -1, .. })
    ));
    std::fs::remove_file(path).ok();
}

use std::io::Write;

use quantbook_core::engine::NaivePortfolio;
use quantbook_core::PortfolioError;
use quantbook_runner::{BacktestConfig, ConfigError, PerformanceReporter};

const CONFIG: &str = r#"
symbols = ["AAPL", "MSFT", "GOOG"]
start = "2024-01-02T00:00:00Z"
initial_capital = 250000.0
bars_per_year = 252.0
bar_hours = 24.0
"#;

#[test]
fn load_from_file_builds_engine_and_reporter() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();

    let cfg = BacktestConfig::load(file.path()).unwrap();
    assert_eq!(cfg.symbols, vec!["AAPL", "MSFT", "GOOG"]);
    assert_eq!(cfg.initial_capital, 250_000.0);

    let engine_cfg = cfg.engine_config().unwrap();
    assert_eq!(engine_cfg.universe.primary(), "AAPL");

    let portfolio = NaivePortfolio::new(engine_cfg).unwrap();
    assert_eq!(portfolio.holdings().cash, 250_000.0);

    let settings = cfg.report_settings();
    assert_eq!(settings.bars_per_year, 252.0);
    assert_eq!(settings.bar_hours, 24.0);

    let reporter = PerformanceReporter::from_portfolio(&portfolio, settings);
    let frame = reporter.equity_frame().unwrap();
    assert_eq!(frame.width(), 3 + 7);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BacktestConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn duplicate_symbols_in_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "symbols = [\"X\", \"X\"]").unwrap();
    writeln!(file, "start = \"2024-01-02T00:00:00Z\"").unwrap();

    let err = BacktestConfig::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Engine(PortfolioError::DuplicateSymbol(ref s)) if s == "X"
    ));
}

#[test]
fn run_id_stable_across_reload() {
    let a = BacktestConfig::from_toml_str(CONFIG).unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    let b = BacktestConfig::load(file.path()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.run_id().unwrap(), b.run_id().unwrap());
}

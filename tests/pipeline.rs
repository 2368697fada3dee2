//! End-to-end tests: simulate, fit, forecast, export.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use demand_forecast::export;
use demand_forecast::prelude::*;
use demand_forecast::synthetic::DemandSimulator;
use demand_forecast::utils::interval_coverage;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn simulated_year(seed: u64) -> TimeSeries {
    DemandSimulator::new(150.0)
        .with_seed(seed)
        .generate_default()
        .unwrap()
}

#[test]
fn simulated_year_forecasts_every_menu_horizon() {
    let series = simulated_year(42);

    for horizon in [30, 60, 90] {
        let mut engine = ForecastEngine::new(ForecastConfig::default().with_horizon_days(horizon));
        engine.fit(&series).unwrap();

        let forecast = engine.forecast().unwrap();
        assert_eq!(forecast.horizon(), horizon);
        assert_eq!(forecast.first().unwrap().date, date(2026, 1, 1));
        assert_eq!(
            forecast.last().unwrap().date,
            date(2025, 12, 31) + chrono::Days::new(horizon as u64)
        );
    }
}

#[test]
fn flat_noisy_demand_forecasts_near_average() {
    let series = simulated_year(7);
    let mut engine = ForecastEngine::default();
    engine.fit(&series).unwrap();

    let model = engine.model().unwrap();
    assert!(model.slope().abs() < 0.05, "slope {}", model.slope());
    assert!((model.sigma() - 20.0).abs() < 3.0, "sigma {}", model.sigma());

    for row in engine.predict(30).unwrap() {
        assert!((row.yhat - 150.0).abs() < 15.0, "yhat {}", row.yhat);
        assert_relative_eq!(row.interval_width(), 2.0 * model.half_width(), epsilon = 1e-9);
    }
}

#[test]
fn in_sample_band_covers_most_history() {
    let series = simulated_year(11);
    let mut engine = ForecastEngine::default();
    engine.fit(&series).unwrap();

    let in_sample = engine.predict_in_sample().unwrap();
    let coverage = interval_coverage(series.values(), in_sample.rows()).unwrap();
    assert!(coverage > 0.90 && coverage < 0.99, "coverage {}", coverage);

    let metrics = calculate_metrics(series.values(), &in_sample.point(), Some(7)).unwrap();
    assert!(metrics.mae < 25.0);
    assert!(metrics.rmse >= metrics.mae);
}

#[test]
fn short_series_extends_the_line() {
    let series = TimeSeries::daily(date(2025, 3, 1), vec![10.0, 12.0]).unwrap();
    let mut engine = ForecastEngine::with_period(2);
    // Period must be shorter than the series
    assert_eq!(
        engine.fit(&series),
        Err(ForecastError::InvalidPeriod { period: 2, len: 2 })
    );

    let series = TimeSeries::daily(date(2025, 3, 1), vec![10.0, 12.0, 14.0]).unwrap();
    engine.fit(&series).unwrap();
    let forecast = engine.predict(2).unwrap();
    assert_relative_eq!(forecast.rows()[0].yhat, 16.0, epsilon = 1e-9);
    assert_relative_eq!(forecast.rows()[1].yhat, 18.0, epsilon = 1e-9);
}

#[test]
fn empty_and_single_point_series_cannot_fit() {
    let mut engine = ForecastEngine::default();

    let empty = TimeSeries::new(vec![], vec![]).unwrap();
    assert_eq!(
        engine.fit(&empty),
        Err(ForecastError::InsufficientData { needed: 2, got: 0 })
    );

    let single = TimeSeries::daily(date(2025, 1, 1), vec![3.0]).unwrap();
    assert_eq!(
        engine.fit(&single),
        Err(ForecastError::InsufficientData { needed: 2, got: 1 })
    );
    assert_eq!(engine.predict(30), Err(ForecastError::FitRequired));
}

#[test]
fn gapped_dates_are_rejected_before_fitting() {
    let result = TimeSeries::new(
        vec![date(2025, 1, 1), date(2025, 1, 2), date(2025, 1, 4)],
        vec![1.0, 2.0, 3.0],
    );
    assert!(matches!(result, Err(ForecastError::TimestampError(_))));
}

#[test]
fn history_table_exports_to_csv() {
    let series = simulated_year(3);
    let mut engine = ForecastEngine::default();
    engine.fit(&series).unwrap();

    let table = engine.predict_with_history(30).unwrap();
    let text = String::from_utf8(export::to_csv_bytes(&table).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 1 + 365 + 30);
    assert_eq!(lines[0], "date,yhat,yhat_lower,yhat_upper");
    assert!(lines[1].starts_with("2025-01-01,"));
    assert!(lines[365].starts_with("2025-12-31,"));
    assert!(lines[366].starts_with("2026-01-01,"));
    assert!(lines[395].starts_with("2026-01-30,"));
    assert_eq!(export::file_name("Product A"), "Product_A_forecast.csv");
}

#[test]
fn seeded_pipeline_is_reproducible() {
    let run = |seed| {
        let mut engine = ForecastEngine::default();
        engine.fit(&simulated_year(seed)).unwrap();
        export::to_csv_bytes(&engine.predict(90).unwrap()).unwrap()
    };
    assert_eq!(run(99), run(99));
    assert_ne!(run(99), run(100));
}

#[test]
fn config_file_drives_engine() {
    let config = ForecastConfig::from_json_str(r#"{"period_days": 14, "horizon_days": 60}"#).unwrap();
    assert_eq!(config.interval_width, 0.95);

    let mut engine = ForecastEngine::new(config);
    engine.fit(&simulated_year(5)).unwrap();
    assert_eq!(engine.model().unwrap().period(), 14);
    assert_eq!(engine.forecast().unwrap().horizon(), 60);
}

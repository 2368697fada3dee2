//! CSV export of forecast tables.
//!
//! Columns are `date,yhat,yhat_lower,yhat_upper` with ISO dates, one row per
//! forecast day.

use crate::core::Forecast;
use crate::error::{ForecastError, Result};
use std::io::Write;

/// Write `forecast` as CSV with a header row.
pub fn write_csv<W: Write>(forecast: &Forecast, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in forecast {
        csv_writer
            .serialize(row)
            .map_err(|e| ForecastError::Export(e.to_string()))?;
    }
    if forecast.is_empty() {
        // serialize() emits the header with the first record
        csv_writer
            .write_record(["date", "yhat", "yhat_lower", "yhat_upper"])
            .map_err(|e| ForecastError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| ForecastError::Export(e.to_string()))
}

/// Render `forecast` as UTF-8 CSV bytes.
pub fn to_csv_bytes(forecast: &Forecast) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(forecast, &mut buf)?;
    Ok(buf)
}

/// Download file name for a product's forecast, e.g. `Product_A_forecast.csv`.
pub fn file_name(product: &str) -> String {
    let words: Vec<&str> = product.split_whitespace().collect();
    if words.is_empty() {
        return "forecast.csv".to_string();
    }
    format!("{}_forecast.csv", words.join("_"))
}

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::yes_no;
use crate::PredictionRequest;

pub const EXPORT_HEADER: &str =
    "Prediction,Timestamp,Store ID,SKU ID,Total Price,Base Price,Is Featured,Is Display";

/// US-locale date and time, e.g. `10/18/2026, 3:04:05 PM`.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// `sales_prediction_<unix millis>.csv`
pub fn export_file_name(timestamp_millis: i64) -> String {
    format!("sales_prediction_{timestamp_millis}.csv")
}

// RFC 4180 quoting; the locale timestamp always contains a comma.
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One exported prediction: the result, when it was exported and the inputs
/// it was computed from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ExportRecord {
    pub prediction: u32,
    pub timestamp: String,
    pub timestamp_millis: i64,
    pub request: PredictionRequest,
}

impl ExportRecord {
    pub fn new<Tz: TimeZone>(prediction: u32, request: PredictionRequest, at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: Display,
    {
        ExportRecord {
            prediction,
            timestamp: format_timestamp(at),
            timestamp_millis: at.timestamp_millis(),
            request,
        }
    }

    pub fn file_name(&self) -> String {
        export_file_name(self.timestamp_millis)
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.prediction.to_string(),
            self.timestamp.clone(),
            self.request.store_id.to_string(),
            self.request.sku_id.to_string(),
            self.request.total_price.to_string(),
            self.request.base_price.to_string(),
            yes_no(self.request.is_featured_sku).to_string(),
            yes_no(self.request.is_display_sku).to_string(),
        ]
    }

    /// Header line plus one data line, no trailing newline.
    pub fn to_csv(&self) -> String {
        let row = self
            .row()
            .iter()
            .map(|value| escape_field(value))
            .collect::<Vec<_>>()
            .join(",");
        format!("{EXPORT_HEADER}\n{row}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::Asia::Tokyo;

    fn request() -> PredictionRequest {
        PredictionRequest {
            store_id: 8091,
            sku_id: 216418,
            total_price: 99.0375,
            base_price: 99.0375,
            is_featured_sku: true,
            is_display_sku: false,
        }
    }

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 15, 4, 5).unwrap();
        assert_eq!(format_timestamp(&at), "10/18/2026, 3:04:05 PM");

        let morning = Utc.with_ymd_and_hms(2026, 1, 2, 0, 30, 0).unwrap();
        assert_eq!(format_timestamp(&morning), "1/2/2026, 12:30:00 AM");

        // Same instant rendered in another zone
        assert_eq!(format_timestamp(&at.with_timezone(&Tokyo)), "10/19/2026, 12:04:05 AM");
    }

    #[test]
    fn test_export_csv() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 15, 4, 5).unwrap();
        let record = ExportRecord::new(42, request(), &at);

        assert_eq!(
            record.to_csv(),
            "Prediction,Timestamp,Store ID,SKU ID,Total Price,Base Price,Is Featured,Is Display\n\
             42,\"10/18/2026, 3:04:05 PM\",8091,216418,99.0375,99.0375,Yes,No"
        );
        assert_eq!(record.file_name(), format!("sales_prediction_{}.csv", at.timestamp_millis()));
    }

    #[test]
    fn test_whole_prices_render_without_fraction() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let record = ExportRecord::new(
            7,
            PredictionRequest {
                total_price: 100.0,
                base_price: 50.0,
                is_featured_sku: false,
                is_display_sku: true,
                ..request()
            },
            &at,
        );
        let csv = record.to_csv();
        let data_line = csv.lines().nth(1).unwrap();
        assert!(data_line.ends_with(",100,50,No,Yes"));
    }

    #[test]
    fn test_typed_prices_export_in_shortest_form() {
        let request =
            crate::validate_form(&crate::FormValues::new("3", "12", "100.00", "10.50")).unwrap();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let csv = ExportRecord::new(7, request, &at).to_csv();
        assert!(csv.lines().nth(1).unwrap().ends_with(",3,12,100,10.5,No,No"));

        let text = crate::share_text(7, &request);
        assert!(text.contains("Total Price: $100\nBase Price: $10.5\n"));
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}

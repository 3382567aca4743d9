/// Database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Format used for timestamps generated at receipt time.
pub const RECEIPT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a receipt time the way pull-request and merge records carry it.
pub fn format_receipt_timestamp(at: Timestamp) -> String {
    at.format(RECEIPT_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn receipt_timestamp_has_second_precision_and_z_suffix() {
        let at = chrono::Utc
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .unwrap()
            + chrono::Duration::milliseconds(750);
        assert_eq!(format_receipt_timestamp(at), "2024-03-09T07:05:01Z");
    }
}

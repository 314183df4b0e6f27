use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const SLASH_TIME_FORMAT: &str = "%Y/%m/%d";
    pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    pub const DATETIME_T_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    // Plausible bounds for yearly keys; anything outside is a parsing accident
    pub const MIN_YEAR: i32 = -9999;
    pub const MAX_YEAR: i32 = 9999;

    /// Parse a calendar day. Timestamps are accepted and truncated to their date part.
    pub fn parse_date(text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if let Ok(date) = NaiveDate::parse_from_str(text, Self::STANDARD_TIME_FORMAT) {
            return Some(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, Self::SLASH_TIME_FORMAT) {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.date_naive());
        }
        [Self::DATETIME_FORMAT, Self::DATETIME_T_FORMAT]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|dt| dt.date())
    }

    /// Parse a year key. Integral floats ("2001.0") are accepted because
    /// spreadsheet exports often write them that way.
    pub fn parse_year(text: &str) -> Option<i32> {
        let text = text.trim();
        let year = match text.parse::<i32>() {
            Ok(year) => year,
            Err(_) => {
                let value = text.parse::<f64>().ok()?;
                if !value.is_finite() || value.fract() != 0.0 {
                    return None;
                }
                value as i32
            }
        };
        (Self::MIN_YEAR..=Self::MAX_YEAR)
            .contains(&year)
            .then_some(year)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    // Used for display purposes
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 20);
        assert_eq!(TimeUtils::parse_date("2023-03-20"), expected);
        assert_eq!(TimeUtils::parse_date(" 2023/03/20 "), expected);
        assert_eq!(TimeUtils::parse_date("2023-03-20 14:05:00"), expected);
        assert_eq!(TimeUtils::parse_date("2023-03-20T14:05:00"), expected);
        assert_eq!(TimeUtils::parse_date("2023-03-20T14:05:00+02:00"), expected);
        assert_eq!(TimeUtils::parse_date("20/03/2023"), None);
    }

    #[test]
    fn parses_years() {
        assert_eq!(TimeUtils::parse_year("1990"), Some(1990));
        assert_eq!(TimeUtils::parse_year("1990.0"), Some(1990));
        assert_eq!(TimeUtils::parse_year("1990.5"), None);
        assert_eq!(TimeUtils::parse_year("nineteen"), None);
        assert_eq!(TimeUtils::parse_year("1e9"), None);
    }

    #[test]
    fn formats_dates() {
        let date = NaiveDate::from_ymd_opt(2001, 9, 1).unwrap();
        assert_eq!(format_date(date), "2001-09-01");
    }
}

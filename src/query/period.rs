use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Pilihan periode di filter tanggal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Today,
    Week,
    Month,
    Custom,
}

/// Rentang tanggal inklusif. Batas yang `None` tidak dikirim ke server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// `startDate` / `endDate` untuk query string.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start {
            pairs.push(("startDate".to_string(), start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("endDate".to_string(), end.format(DATE_FORMAT).to_string()));
        }
        pairs
    }
}

impl Period {
    /// Terjemahkan periode relatif ke tanggal konkret, relatif terhadap `today`.
    ///
    /// Minggu mengikuti ISO: Senin sampai hari ini, Minggu ikut minggu yang
    /// dimulai enam hari sebelumnya.
    pub fn resolve(
        &self,
        today: NaiveDate,
        custom_start: Option<NaiveDate>,
        custom_end: Option<NaiveDate>,
    ) -> DateRange {
        match self {
            Period::All => DateRange::default(),
            Period::Today => DateRange {
                start: Some(today),
                end: Some(today),
            },
            Period::Week => {
                let back = today.weekday().num_days_from_monday() as i64;
                DateRange {
                    start: Some(today - Duration::days(back)),
                    end: Some(today),
                }
            }
            Period::Month => DateRange {
                start: today.with_day(1),
                end: Some(today),
            },
            Period::Custom => DateRange {
                start: custom_start,
                end: custom_end,
            },
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Input tanggal dari form: kosong berarti tidak dibatasi.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

/// Tanggal dari record API, `YYYY-MM-DD` atau timestamp RFC 3339.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_and_month_on_a_saturday() {
        let today = date(2024, 6, 15);

        let week = Period::Week.resolve(today, None, None);
        assert_eq!(week.start, Some(date(2024, 6, 10)));
        assert_eq!(week.end, Some(today));

        let month = Period::Month.resolve(today, None, None);
        assert_eq!(month.start, Some(date(2024, 6, 1)));
        assert_eq!(month.end, Some(today));
    }

    #[test]
    fn sunday_closes_the_week() {
        let sunday = date(2024, 6, 16);
        let week = Period::Week.resolve(sunday, None, None);
        assert_eq!(week.start, Some(date(2024, 6, 10)));

        let monday = date(2024, 6, 17);
        assert_eq!(Period::Week.resolve(monday, None, None).start, Some(monday));
    }

    #[test]
    fn today_and_all() {
        let today = date(2024, 1, 1);
        let range = Period::Today.resolve(today, None, None);
        assert_eq!(range.start, Some(today));
        assert_eq!(range.end, Some(today));
        assert!(Period::All.resolve(today, Some(today), None).is_unbounded());
    }

    #[test]
    fn custom_omits_blank_bounds() {
        let today = date(2024, 6, 15);
        let range = Period::Custom.resolve(today, parse_date_input("2024-05-01"), parse_date_input("  "));
        assert_eq!(range.start, Some(date(2024, 5, 1)));
        assert_eq!(range.end, None);
        assert_eq!(
            range.query_pairs(),
            vec![("startDate".to_string(), "2024-05-01".to_string())]
        );
    }

    #[test]
    fn record_dates_accept_timestamps() {
        assert_eq!(parse_record_date("2024-06-15T08:30:00.000Z"), Some(date(2024, 6, 15)));
        assert_eq!(parse_record_date("2024-06-15"), Some(date(2024, 6, 15)));
        assert_eq!(parse_record_date("15/06/2024"), None);
    }

    #[test]
    fn range_contains_is_inclusive() {
        let range = DateRange {
            start: Some(date(2024, 6, 10)),
            end: Some(date(2024, 6, 15)),
        };
        assert!(range.contains(date(2024, 6, 10)));
        assert!(range.contains(date(2024, 6, 15)));
        assert!(!range.contains(date(2024, 6, 16)));
    }
}

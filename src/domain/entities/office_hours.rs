use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Weekly office-hours calendar used to decide whether overflow staffing can be drawn on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeHours {
    pub timezone: String, // IANA timezone (e.g., "Europe/London")
    pub schedule: Vec<DaySchedule>,
    /// Closed all day, in YYYY-MM-DD
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: String,   // "Monday", "Tuesday", etc.
    pub start: String, // "09:00"
    pub end: String,   // "17:00"
}

impl OfficeHours {
    /// Parse and validate an office-hours definition from JSON.
    pub fn parse(json_str: &str) -> DomainResult<Self> {
        let hours: OfficeHours = serde_json::from_str(json_str).map_err(|e| {
            DomainError::ValidationError(format!("Invalid office hours format: {}", e))
        })?;
        hours.validate()?;
        Ok(hours)
    }

    /// Monday to Friday, 09:00 to 17:00 UTC.
    pub fn weekdays_nine_to_five() -> Self {
        let schedule = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
            .iter()
            .map(|day| DaySchedule {
                day: day.to_string(),
                start: "09:00".to_string(),
                end: "17:00".to_string(),
            })
            .collect();

        Self {
            timezone: "UTC".to_string(),
            schedule,
            holidays: Vec::new(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.tz()?;
        for entry in &self.schedule {
            let start = parse_hhmm(&entry.start)?;
            let end = parse_hhmm(&entry.end)?;
            if start >= end {
                return Err(DomainError::ValidationError(format!(
                    "Office hours for {} end before they start",
                    entry.day
                )));
            }
        }
        Ok(())
    }

    /// Whether `at` falls inside the schedule (in the calendar's timezone) and is not a holiday.
    pub fn is_open_at(&self, at: DateTime<Utc>) -> DomainResult<bool> {
        let local = at.with_timezone(&self.tz()?);

        if self.holidays.contains(&local.date_naive()) {
            return Ok(false);
        }

        let day_name = match local.weekday() {
            chrono::Weekday::Mon => "Monday",
            chrono::Weekday::Tue => "Tuesday",
            chrono::Weekday::Wed => "Wednesday",
            chrono::Weekday::Thu => "Thursday",
            chrono::Weekday::Fri => "Friday",
            chrono::Weekday::Sat => "Saturday",
            chrono::Weekday::Sun => "Sunday",
        };

        let Some(schedule) = self.schedule.iter().find(|s| s.day == day_name) else {
            return Ok(false);
        };

        // Zero-padded HH:MM compares correctly as strings
        let time_str = format!("{:02}:{:02}", local.hour(), local.minute());
        Ok(time_str.as_str() >= schedule.start.as_str() && time_str.as_str() < schedule.end.as_str())
    }

    fn tz(&self) -> DomainResult<Tz> {
        self.timezone
            .parse()
            .map_err(|_| DomainError::ValidationError(format!("Invalid timezone: {}", self.timezone)))
    }
}

fn parse_hhmm(value: &str) -> DomainResult<NaiveTime> {
    if value.len() != 5 {
        return Err(DomainError::ValidationError(format!(
            "Invalid time '{}', expected HH:MM",
            value
        )));
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        DomainError::ValidationError(format!("Invalid time '{}', expected HH:MM", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_open_inside_weekday_window() {
        let hours = OfficeHours::weekdays_nine_to_five();
        // 2024-03-06 is a Wednesday
        let at = Utc.with_ymd_and_hms(2024, 3, 6, 10, 30, 0).unwrap();
        assert!(hours.is_open_at(at).unwrap());
    }

    #[test]
    fn test_closed_at_end_boundary_and_weekend() {
        let hours = OfficeHours::weekdays_nine_to_five();
        let closing = Utc.with_ymd_and_hms(2024, 3, 6, 17, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).unwrap();
        assert!(!hours.is_open_at(closing).unwrap());
        assert!(!hours.is_open_at(saturday).unwrap());
    }

    #[test]
    fn test_timezone_shifts_the_window() {
        let hours = OfficeHours::parse(
            r#"{"timezone":"America/New_York","schedule":[{"day":"Wednesday","start":"09:00","end":"17:00"}]}"#,
        )
        .unwrap();
        // 10:00 UTC is 05:00 in New York (EST)
        let early = Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap();
        let midday = Utc.with_ymd_and_hms(2024, 3, 6, 16, 0, 0).unwrap();
        assert!(!hours.is_open_at(early).unwrap());
        assert!(hours.is_open_at(midday).unwrap());
    }

    #[test]
    fn test_holiday_closes_the_day() {
        let mut hours = OfficeHours::weekdays_nine_to_five();
        hours.holidays.push(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        let at = Utc.with_ymd_and_hms(2024, 3, 6, 10, 30, 0).unwrap();
        assert!(!hours.is_open_at(at).unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_definitions() {
        assert!(OfficeHours::parse("not json").is_err());
        assert!(OfficeHours::parse(r#"{"timezone":"Mars/Olympus","schedule":[]}"#).is_err());
        assert!(OfficeHours::parse(
            r#"{"timezone":"UTC","schedule":[{"day":"Monday","start":"9:00","end":"17:00"}]}"#
        )
        .is_err());
        assert!(OfficeHours::parse(
            r#"{"timezone":"UTC","schedule":[{"day":"Monday","start":"17:00","end":"09:00"}]}"#
        )
        .is_err());
    }
}

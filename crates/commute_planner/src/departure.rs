use commute_providers::travel_mode::TravelMode;
use jiff::{
    SignedDuration, Timestamp, Zoned,
    civil::{Date, Time},
    tz::TimeZone,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::request_builder::RequestBuildError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    Am,
    Pm,
}

/// Departure entered as a calendar date and a 12-hour wall clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LeaveByTime {
    #[schemars(with = "String")]
    pub date: Date,
    /// 1 to 12
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Meridiem,
}

impl LeaveByTime {
    pub fn hour_24(&self) -> u8 {
        match (self.meridiem, self.hour) {
            (Meridiem::Pm, hour) if hour < 12 => hour + 12,
            (Meridiem::Am, 12) => 0,
            (_, hour) => hour,
        }
    }

    /// Interprets the fields as wall clock time in `time_zone`.
    pub fn to_timestamp(&self, time_zone: &TimeZone) -> Result<Timestamp, jiff::Error> {
        let time = Time::new(self.hour_24() as i8, self.minute as i8, 0, 0)?;
        let zoned = self.date.to_datetime(time).to_zoned(time_zone.clone())?;
        Ok(zoned.timestamp())
    }

    /// One hour from `now`, rounded to the nearest quarter hour.
    pub fn default_from(now: &Zoned) -> Result<Self, jiff::Error> {
        let later = now.checked_add(SignedDuration::from_hours(1))?;
        let rounded_minutes = ((later.minute() as f64) / 15.0).round() as i64 * 15;

        let later = if rounded_minutes == 60 {
            later.checked_add(SignedDuration::from_hours(1))?
        } else {
            later
        };

        let hour_24 = later.hour() as u8;
        let meridiem = if hour_24 >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };

        Ok(LeaveByTime {
            date: later.date(),
            hour: match hour_24 % 12 {
                0 => 12,
                hour => hour,
            },
            minute: (rounded_minutes % 60) as u8,
            meridiem,
        })
    }
}

/// The "leave by" toggle and the time it holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LeaveBy {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub time: Option<LeaveByTime>,
}

impl LeaveBy {
    /// Switching the toggle on fills in a default time when none is set.
    pub fn enable(&mut self, now: &Zoned) -> Result<(), jiff::Error> {
        self.enabled = true;
        if self.time.is_none() {
            self.time = Some(LeaveByTime::default_from(now)?);
        }
        Ok(())
    }
}

/// Departure timestamp to send, if any.
///
/// Transit always needs one: it is refused when "leave by" is off, and
/// defaults to an hour from now when the toggle is on without a time.
/// Other modes without a time ask for current conditions.
pub fn resolve_departure_time(
    travel_mode: TravelMode,
    leave_by: &LeaveBy,
    now: &Zoned,
) -> Result<Option<Timestamp>, RequestBuildError> {
    if travel_mode == TravelMode::Transit && !leave_by.enabled {
        return Err(RequestBuildError::DepartureTimeRequired);
    }

    match (leave_by.enabled, leave_by.time) {
        (true, Some(time)) => time
            .to_timestamp(now.time_zone())
            .map(Some)
            .map_err(|err| RequestBuildError::InvalidDepartureTime(err.to_string())),
        _ if travel_mode == TravelMode::Transit => now
            .timestamp()
            .checked_add(SignedDuration::from_hours(1))
            .map(Some)
            .map_err(|err| RequestBuildError::InvalidDepartureTime(err.to_string())),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz};

    use super::*;

    fn eastern() -> TimeZone {
        tz::offset(-5).to_time_zone()
    }

    fn now_at(hour: i8, minute: i8) -> Zoned {
        date(2025, 3, 3)
            .at(hour, minute, 0, 0)
            .to_zoned(eastern())
            .unwrap()
    }

    fn leave_by(hour: u8, minute: u8, meridiem: Meridiem) -> LeaveBy {
        LeaveBy {
            enabled: true,
            time: Some(LeaveByTime {
                date: date(2025, 3, 4),
                hour,
                minute,
                meridiem,
            }),
        }
    }

    #[test]
    fn test_hour_24() {
        let time = |hour, meridiem| LeaveByTime {
            date: date(2025, 3, 4),
            hour,
            minute: 0,
            meridiem,
        };

        assert_eq!(time(12, Meridiem::Am).hour_24(), 0);
        assert_eq!(time(1, Meridiem::Am).hour_24(), 1);
        assert_eq!(time(12, Meridiem::Pm).hour_24(), 12);
        assert_eq!(time(5, Meridiem::Pm).hour_24(), 17);
    }

    #[test]
    fn test_explicit_time_uses_local_wall_clock() {
        let departure = resolve_departure_time(
            TravelMode::Drive,
            &leave_by(8, 30, Meridiem::Am),
            &now_at(7, 0),
        )
        .unwrap();

        let expected: Timestamp = "2025-03-04T13:30:00Z".parse().unwrap();
        assert_eq!(departure, Some(expected));
    }

    #[test]
    fn test_transit_without_leave_by_is_refused() {
        let result = resolve_departure_time(TravelMode::Transit, &LeaveBy::default(), &now_at(7, 0));

        assert_eq!(result, Err(RequestBuildError::DepartureTimeRequired));
        assert_eq!(
            RequestBuildError::DepartureTimeRequired.to_string(),
            "Departure time is required for public transit routes"
        );
    }

    #[test]
    fn test_transit_with_toggle_but_no_time_defaults_to_one_hour() {
        let now = now_at(7, 10);
        let leave_by = LeaveBy {
            enabled: true,
            time: None,
        };

        let departure = resolve_departure_time(TravelMode::Transit, &leave_by, &now).unwrap();

        assert_eq!(
            departure,
            Some(now.timestamp() + SignedDuration::from_hours(1))
        );
    }

    #[test]
    fn test_drive_without_leave_by_has_no_departure() {
        let departure =
            resolve_departure_time(TravelMode::Drive, &LeaveBy::default(), &now_at(7, 0)).unwrap();
        assert_eq!(departure, None);
    }

    #[test]
    fn test_disabled_toggle_ignores_stored_time() {
        let mut leave_by = leave_by(8, 30, Meridiem::Am);
        leave_by.enabled = false;

        let departure = resolve_departure_time(TravelMode::Walk, &leave_by, &now_at(7, 0)).unwrap();
        assert_eq!(departure, None);
    }

    #[test]
    fn test_default_rounds_to_quarter_hour() {
        let time = LeaveByTime::default_from(&now_at(13, 7)).unwrap();
        assert_eq!(
            time,
            LeaveByTime {
                date: date(2025, 3, 3),
                hour: 2,
                minute: 0,
                meridiem: Meridiem::Pm,
            }
        );

        let time = LeaveByTime::default_from(&now_at(10, 23)).unwrap();
        assert_eq!((time.hour, time.minute, time.meridiem), (11, 30, Meridiem::Am));
    }

    #[test]
    fn test_default_rolls_into_next_hour() {
        let time = LeaveByTime::default_from(&now_at(10, 53)).unwrap();
        assert_eq!((time.hour, time.minute, time.meridiem), (12, 0, Meridiem::Pm));

        let time = LeaveByTime::default_from(&now_at(22, 55)).unwrap();
        assert_eq!(time.date, date(2025, 3, 4));
        assert_eq!((time.hour, time.minute, time.meridiem), (12, 0, Meridiem::Am));
    }

    #[test]
    fn test_enable_keeps_existing_time() {
        let mut leave_by = leave_by(6, 15, Meridiem::Pm);
        leave_by.enabled = false;
        leave_by.enable(&now_at(7, 0)).unwrap();

        assert!(leave_by.enabled);
        assert_eq!(leave_by.time.unwrap().hour, 6);

        let mut empty = LeaveBy::default();
        empty.enable(&now_at(7, 0)).unwrap();
        assert_eq!(empty.time.unwrap().hour, 8);
    }
}

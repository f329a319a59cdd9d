use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// microseconds since the epoch, the storage representation of every timestamp
pub fn to_micros(time: &NaiveDateTime) -> i64 {
    DateTime::<Utc>::from_naive_utc_and_offset(*time, Utc).timestamp_micros()
}

pub fn from_micros(micros: i64) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp(micros.div_euclid(1_000_000), (micros.rem_euclid(1_000_000) * 1_000) as u32)
        .map(|dt| dt.naive_utc())
}

// current time truncated to the precision the store keeps
pub fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    from_micros(to_micros(&now)).unwrap_or(now)
}

/// Returns the UTC instant of the first day of `now`'s calendar month at local midnight.
pub fn start_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDateTime {
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    let midnight = first.and_time(NaiveTime::MIN);
    match now.timezone().from_local_datetime(&midnight).earliest() {
        Some(local) => local.naive_utc(),
        None => midnight - Duration::seconds(now.offset().fix().local_minus_utc() as i64),
    }
}

fn time_to_json(t: NaiveDateTime) -> String {
    DateTime::<Utc>::from_naive_utc_and_offset(t, Utc).to_rfc3339()
}

fn json_to_time(str_time: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    DateTime::parse_from_rfc3339(str_time)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(str_time, DATE_FMT))
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{json_to_time, time_to_json};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        json_to_time(&str_time).map_err(D::Error::custom)
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{json_to_time, time_to_json};

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        time.map(time_to_json).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(s) => json_to_time(&s).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
    use crate::utils::date::{from_micros, start_of_month, to_micros};

    #[tokio::test]
    async fn test_should_round_trip_micros() {
        let time = NaiveDate::from_ymd_opt(2023, 7, 14).unwrap()
            .and_hms_micro_opt(10, 30, 5, 123456).unwrap();
        assert_eq!(Some(time), from_micros(to_micros(&time)));
        let before_epoch = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()
            .and_hms_micro_opt(23, 59, 59, 500000).unwrap();
        assert_eq!(Some(before_epoch), from_micros(to_micros(&before_epoch)));
    }

    #[tokio::test]
    async fn test_should_find_start_of_month_in_utc() {
        let now = Utc.with_ymd_and_hms(2024, 3, 17, 15, 4, 5).unwrap();
        let start = start_of_month(&now);
        assert_eq!(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(), start);
    }

    #[tokio::test]
    async fn test_should_find_start_of_month_in_local_offset() {
        // local midnight at +02:00 is 22:00 of the previous day in UTC
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap();
        let start = start_of_month(&now);
        assert_eq!(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap().and_hms_opt(22, 0, 0).unwrap(), start);
    }
}

use chrono::{NaiveDate, NaiveTime};

#[must_use]
pub fn date_to_unix_seconds(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp() as f64
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::date_to_unix_seconds;

    #[test]
    fn epoch_day_maps_to_zero() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date");
        assert_eq!(date_to_unix_seconds(epoch), 0.0);
    }

    #[test]
    fn consecutive_days_are_one_day_apart() {
        let day = NaiveDate::from_ymd_opt(2021, 6, 1).expect("valid date");
        let next = NaiveDate::from_ymd_opt(2021, 6, 2).expect("valid date");
        assert_eq!(date_to_unix_seconds(next) - date_to_unix_seconds(day), 86_400.0);
    }
}

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, Utc};

pub const SLOT_MINUTES: i64 = 30;
pub const OPENING_HOUR: i64 = 9;
pub const CLOSING_HOUR: i64 = 17;
pub const BUSINESS_DAYS: i64 = 5;

const SLOTS_PER_DAY: i64 = (CLOSING_HOUR - OPENING_HOUR) * 60 / SLOT_MINUTES;

/// Candidate slots for the week containing `reference`: Monday through
/// Friday, every half hour in [09:00, 17:00), so 80 instants in ascending
/// order. Pure wall-clock arithmetic in UTC; DST transitions are out of
/// scope.
pub fn week_slots(reference: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let monday = reference.date_naive()
        - Duration::days(i64::from(reference.weekday().num_days_from_monday()));

    let mut slots = Vec::with_capacity((BUSINESS_DAYS * SLOTS_PER_DAY) as usize);
    for day in 0..BUSINESS_DAYS {
        let day_start =
            NaiveDateTime::new(monday + Duration::days(day), NaiveTime::MIN).and_utc();
        for slot in 0..SLOTS_PER_DAY {
            slots.push(
                day_start + Duration::hours(OPENING_HOUR) + Duration::minutes(slot * SLOT_MINUTES),
            );
        }
    }
    slots
}

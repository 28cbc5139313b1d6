//! Available slot generation for the public booking flow

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::{
    models::{court::Court, schedule::AvailableSlot, schedule::TimeSlotConfig},
    repository::bookings::BusyInterval,
};

/// Generate the slot grid for one date. Slots step through the opening hours
/// by the configured duration; a slot that would end after closing is dropped.
/// A slot is unavailable when it overlaps an occupied interval on its court or
/// when its start is already in the past.
pub fn build_slots(
    config: &TimeSlotConfig,
    courts: &[Court],
    busy: &[BusyInterval],
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<AvailableSlot> {
    let step = Duration::minutes(config.slot_duration_minutes as i64);
    let mut slots = Vec::new();

    for court in courts {
        let mut start = config.opening_time;
        loop {
            let end = start + step;
            if end > config.closing_time || end <= start {
                break;
            }

            let occupied = busy.iter().any(|interval| {
                interval.court_id == court.id
                    && interval.start_time < end
                    && interval.end_time > start
            });
            let in_past = NaiveDateTime::new(date, start) < now;

            slots.push(AvailableSlot {
                court_id: court.id,
                court_name: court.name.clone(),
                court_price: court.price.to_string(),
                start_time: start.format("%H:%M").to_string(),
                end_time: end.format("%H:%M").to_string(),
                available: !occupied && !in_past,
            });

            start = end;
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use rust_decimal::Decimal;

    use crate::models::enums::CourtType;

    fn config() -> TimeSlotConfig {
        TimeSlotConfig {
            id: 1,
            opening_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            closing_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            slot_duration_minutes: 90,
            min_cancellation_hours: 2,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn court(id: i32) -> Court {
        Court {
            id,
            name: format!("Cancha {}", id),
            court_type: CourtType::Indoor,
            price: Decimal::new(5000, 0),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn future_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 10).unwrap()
    }

    fn early_morning(date: NaiveDate) -> NaiveDateTime {
        NaiveDateTime::new(date, at(0, 0))
    }

    #[test]
    fn slots_step_by_duration_and_stop_at_closing() {
        let date = future_date();
        let slots = build_slots(&config(), &[court(1)], &[], date, early_morning(date));

        // 08:00 to 23:00 in 90 minute steps yields exactly 10 slots
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0].start_time, "08:00");
        assert_eq!(slots[0].end_time, "09:30");
        assert_eq!(slots[9].start_time, "21:30");
        assert_eq!(slots[9].end_time, "23:00");
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn slot_ending_after_closing_is_dropped() {
        let mut cfg = config();
        cfg.closing_time = at(22, 30);
        let date = future_date();
        let slots = build_slots(&cfg, &[court(1)], &[], date, early_morning(date));

        // Last full slot is 20:00-21:30; 21:30-23:00 would overrun
        assert_eq!(slots.last().unwrap().end_time, "21:30");
    }

    #[test]
    fn overlapping_booking_marks_slot_unavailable() {
        let date = future_date();
        let busy = vec![BusyInterval {
            court_id: 1,
            start_time: at(9, 0),
            end_time: at(10, 30),
        }];
        let slots = build_slots(&config(), &[court(1)], &busy, date, early_morning(date));

        // The booking straddles both the 08:00 and the 09:30 slot
        assert!(!slots[0].available);
        assert!(!slots[1].available);
        assert!(slots[2].available);
    }

    #[test]
    fn busy_interval_on_other_court_does_not_block() {
        let date = future_date();
        let busy = vec![BusyInterval {
            court_id: 2,
            start_time: at(8, 0),
            end_time: at(9, 30),
        }];
        let slots = build_slots(&config(), &[court(1)], &busy, date, early_morning(date));
        assert!(slots[0].available);
    }

    #[test]
    fn past_slots_are_unavailable_today() {
        let date = future_date();
        let now = NaiveDateTime::new(date, at(10, 0));
        let slots = build_slots(&config(), &[court(1)], &[], date, now);

        assert!(!slots[0].available); // 08:00 already started
        assert!(!slots[1].available); // 09:30 already started
        assert!(slots[2].available); // 11:00 still ahead
    }

    #[test]
    fn grid_repeats_per_court() {
        let date = future_date();
        let slots = build_slots(
            &config(),
            &[court(1), court(2)],
            &[],
            date,
            early_morning(date),
        );
        assert_eq!(slots.len(), 20);
        assert_eq!(slots.iter().filter(|s| s.court_id == 2).count(), 10);
    }
}

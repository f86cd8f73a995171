//! Next pickup resolution.
//!
//! Month-groups are scanned in the order the schedule lists them. Inside a
//! group, days are scanned in date order. The first day that passes the bin
//! filter and is either today or later in the current month, or any day of
//! the following month, wins.

use chrono::{Datelike, NaiveDate};

use crate::model::{BinType, CollectionDay, Pickup, Schedule};

/// Find the next collection in `schedule` relative to `today`.
///
/// Returns `None` when neither the rest of the current month nor the
/// following month has a collection matching `filter`.
#[must_use]
pub fn next_pickup(
    schedule: &Schedule,
    filter: Option<BinType>,
    today: NaiveDate,
) -> Option<Pickup> {
    let current = (today.year(), today.month());
    let following = following_month(current);

    for group in &schedule.months {
        let month = (group.key.year, group.key.month());
        if month != current && month != following {
            continue;
        }

        let mut days: Vec<&CollectionDay> = group.days.iter().collect();
        days.sort_by_key(|day| day.date);

        let found = days
            .into_iter()
            .filter(|day| filter.is_none_or(|bin| day.collects(bin)))
            .find(|day| month == following || day.date.day() >= today.day());

        if let Some(day) = found {
            return Some(Pickup {
                date: day.date,
                bins: day.bins.clone(),
            });
        }
    }

    None
}

fn following_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::next_pickup;
    use crate::model::{BinType, CollectionDay, MonthGroup, MonthKey, Schedule};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn group(key: &str, days: &[(u32, &[&str])]) -> MonthGroup {
        let key = key.parse::<MonthKey>().expect("valid key");
        MonthGroup {
            key,
            days: days
                .iter()
                .map(|(day, bins)| CollectionDay {
                    date: key.date(*day).expect("valid day"),
                    bins: bins.iter().map(|bin| (*bin).to_owned()).collect(),
                })
                .collect(),
        }
    }

    fn schedule(months: Vec<MonthGroup>) -> Schedule {
        Schedule { months }
    }

    #[test]
    fn finds_later_day_in_current_month() {
        let data = schedule(vec![group("3-2024", &[(15, &["blau"])])]);
        let pickup = next_pickup(&data, None, date(2024, 4, 10)).expect("pickup expected");
        assert_eq!(pickup.date, date(2024, 4, 15), "date");
        assert_eq!(pickup.bins, vec!["blau"], "bins");
    }

    #[test]
    fn past_days_of_current_month_do_not_match() {
        let data = schedule(vec![group("3-2024", &[(15, &["blau"])])]);
        assert_eq!(next_pickup(&data, None, date(2024, 4, 20)), None, "nothing left");
    }

    #[test]
    fn collection_today_counts() {
        let data = schedule(vec![group("3-2024", &[(20, &["grau", "blau"])])]);
        let pickup = next_pickup(&data, None, date(2024, 4, 20)).expect("pickup expected");
        assert_eq!(pickup.date, date(2024, 4, 20), "today");
    }

    #[test]
    fn concrete_scenario_keeps_bin_order() {
        let data = schedule(vec![group("3-2024", &[(20, &["grau", "blau"])])]);
        let pickup = next_pickup(&data, None, date(2024, 4, 18)).expect("pickup expected");
        assert_eq!(pickup.formatted_date(), "Saturday, 20 April 2024", "formatted");
        assert_eq!(pickup.bins, vec!["grau", "blau"], "bins in response order");
    }

    #[test]
    fn falls_through_to_following_month() {
        let data = schedule(vec![
            group("3-2024", &[(2, &["gelb"]), (9, &["grau"])]),
            group("4-2024", &[(21, &["blau"]), (7, &["braun"])]),
        ]);
        let pickup = next_pickup(&data, None, date(2024, 4, 18)).expect("pickup expected");
        assert_eq!(pickup.date, date(2024, 5, 7), "earliest day of May");
        assert_eq!(pickup.bins, vec!["braun"], "bins");
    }

    #[test]
    fn months_after_the_following_one_are_ignored() {
        let data = schedule(vec![group("5-2024", &[(3, &["blau"])])]);
        assert_eq!(next_pickup(&data, None, date(2024, 4, 18)), None, "June is too far");
    }

    #[test]
    fn december_rolls_over_to_january() {
        let data = schedule(vec![
            group("11-2024", &[(3, &["grau"])]),
            group("0-2025", &[(8, &["pink"])]),
        ]);
        let pickup = next_pickup(&data, None, date(2024, 12, 28)).expect("pickup expected");
        assert_eq!(pickup.date, date(2025, 1, 8), "January of next year");
    }

    #[test]
    fn same_month_of_another_year_does_not_match() {
        let data = schedule(vec![group("3-2025", &[(25, &["blau"])])]);
        assert_eq!(next_pickup(&data, None, date(2024, 4, 10)), None, "wrong year");
    }

    #[test]
    fn filter_skips_other_bins() {
        let data = schedule(vec![group(
            "3-2024",
            &[(12, &["grau"]), (19, &["gelb", "blau"]), (26, &["blau"])],
        )]);
        let pickup =
            next_pickup(&data, Some(BinType::Blue), date(2024, 4, 10)).expect("pickup expected");
        assert_eq!(pickup.date, date(2024, 4, 19), "first blue day");
        assert_eq!(pickup.bins, vec!["gelb", "blau"], "all bins of that day");
    }

    #[test]
    fn filter_without_matches_finds_nothing() {
        let data = schedule(vec![
            group("3-2024", &[(12, &["grau"]), (19, &["blau"])]),
            group("4-2024", &[(3, &["gelb"])]),
        ]);
        assert_eq!(
            next_pickup(&data, Some(BinType::Pink), date(2024, 4, 10)),
            None,
            "no pink collections"
        );
    }

    #[test]
    fn empty_schedule_finds_nothing() {
        assert_eq!(
            next_pickup(&Schedule::default(), None, date(2024, 4, 10)),
            None,
            "empty schedule"
        );
    }

    #[test]
    fn group_order_is_taken_as_given() {
        let data = schedule(vec![
            group("4-2024", &[(2, &["blau"])]),
            group("3-2024", &[(28, &["grau"])]),
        ]);
        let pickup = next_pickup(&data, None, date(2024, 4, 18)).expect("pickup expected");
        assert_eq!(pickup.date, date(2024, 5, 2), "first listed group wins");
    }
}

//! The age-gate eligibility rule.
//!
//! Pure calendar arithmetic, no clock access: the caller supplies the
//! reference date. Whole-year age is the calendar-year difference minus one
//! when the birthday has not yet occurred in the reference year.

use chrono::{Datelike, NaiveDate};

/// Minimum whole-year age required to enter the venue.
pub const MINIMUM_AGE: i32 = 18;

/// Whole-year age at `on` for someone born `birth_date`.
#[must_use]
pub fn age_in_years(birth_date: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Entry eligibility: age ≥ [`MINIMUM_AGE`] on the reference date.
///
/// The boundary is inclusive — the exact 18th birthday is eligible.
#[must_use]
pub fn is_of_age(birth_date: NaiveDate, on: NaiveDate) -> bool {
    age_in_years(birth_date, on) >= MINIMUM_AGE
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::day_before_18th(date(2000, 6, 15), date(2018, 6, 14), false)]
    #[case::on_18th_birthday(date(2000, 6, 15), date(2018, 6, 15), true)]
    #[case::day_after_18th(date(2000, 6, 15), date(2018, 6, 16), true)]
    #[case::well_over(date(1995, 5, 15), date(2024, 1, 20), true)]
    #[case::ten_years_old(date(2014, 1, 20), date(2024, 1, 20), false)]
    #[case::birthday_later_this_year(date(2006, 12, 31), date(2024, 1, 1), false)]
    fn eligibility_boundary(
        #[case] birth: NaiveDate,
        #[case] on: NaiveDate,
        #[case] eligible: bool,
    ) {
        assert_eq!(is_of_age(birth, on), eligible);
    }

    #[rstest]
    #[case(date(1995, 5, 15), date(2024, 1, 20), 28)]
    #[case(date(1998, 8, 22), date(2024, 8, 22), 26)]
    #[case(date(2000, 12, 1), date(2024, 1, 18), 23)]
    fn whole_year_age(#[case] birth: NaiveDate, #[case] on: NaiveDate, #[case] expected: i32) {
        assert_eq!(age_in_years(birth, on), expected);
    }

    #[test]
    fn leap_day_birthday_counts_from_march_first() {
        let birth = date(2004, 2, 29);
        // Feb 28 of a non-leap year: birthday not yet reached.
        assert_eq!(age_in_years(birth, date(2022, 2, 28)), 17);
        assert!(!is_of_age(birth, date(2022, 2, 28)));
        // Mar 1: the month/day pair has passed.
        assert_eq!(age_in_years(birth, date(2022, 3, 1)), 18);
        assert!(is_of_age(birth, date(2022, 3, 1)));
    }
}

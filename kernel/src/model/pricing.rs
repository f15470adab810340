use chrono::{Months, NaiveDate};

/// Number of whole billing periods (months) spanned by `[check_in, check_out)`,
/// rounded up. Returns 0 when the range is empty or inverted; callers treat a
/// zero quote as "not bookable yet".
pub fn billing_periods(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    if check_in >= check_out {
        return 0;
    }
    let mut periods = 1;
    while check_in + Months::new(periods) < check_out {
        periods += 1;
    }
    periods
}

/// Total price for a stay, from raw dates.
pub fn quote_total(price_per_period: i64, check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    total_for_periods(price_per_period, billing_periods(check_in, check_out))
}

/// Total price for an explicit period count.
pub fn total_for_periods(price_per_period: i64, periods: u32) -> i64 {
    price_per_period.saturating_mul(i64::from(periods))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn two_exact_months_cost_two_periods() {
        assert_eq!(
            quote_total(1000, date(2024, 1, 1), date(2024, 3, 1)),
            2000
        );
    }

    #[test]
    fn equal_dates_quote_zero() {
        assert_eq!(quote_total(1000, date(2024, 1, 1), date(2024, 1, 1)), 0);
        assert_eq!(billing_periods(date(2024, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn inverted_dates_quote_zero() {
        assert_eq!(quote_total(1000, date(2024, 3, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn partial_month_rounds_up() {
        assert_eq!(billing_periods(date(2024, 1, 1), date(2024, 1, 15)), 1);
        assert_eq!(billing_periods(date(2024, 1, 1), date(2024, 2, 2)), 2);
        assert_eq!(quote_total(1500, date(2025, 2, 1), date(2025, 4, 1)), 3000);
    }

    #[test]
    fn month_end_clamping_counts_one_period() {
        // Jan 31 + 1 month clamps to Feb 29 in a leap year
        assert_eq!(billing_periods(date(2024, 1, 31), date(2024, 2, 29)), 1);
    }

    #[test]
    fn explicit_period_count_mode() {
        assert_eq!(total_for_periods(1200, 3), 3600);
        assert_eq!(total_for_periods(1200, 0), 0);
    }
}

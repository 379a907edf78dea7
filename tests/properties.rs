// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use lunisolar::civil::{fixed_from_gregorian, gregorian_from_fixed};
use lunisolar::{
    chinese_from_fixed, fixed_from_chinese, lunar_phase, new_moon_at_or_after, new_moon_before,
    nth_new_moon, Moment, Universal,
};
use proptest::prelude::*;

const FIRST_DAY: i64 = 693_596; // 1900-01-01
const LAST_DAY: i64 = 767_009; // 2100-12-31

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn chinese_dates_roundtrip(date in FIRST_DAY..=LAST_DAY) {
        let chinese = chinese_from_fixed(date).unwrap();
        prop_assert_eq!(fixed_from_chinese(&chinese).unwrap(), date);
    }

    #[test]
    fn chinese_months_start_on_a_beijing_new_moon(date in FIRST_DAY..=LAST_DAY) {
        let chinese = chinese_from_fixed(date).unwrap();
        let first = chinese_from_fixed(date - i64::from(chinese.day()) + 1).unwrap();
        prop_assert_eq!(first.day(), 1);
        prop_assert_eq!(first.chinese_month(), chinese.chinese_month());
        prop_assert!(chinese.day() <= 30);
    }

    #[test]
    fn consecutive_new_moons_are_a_lunation_apart(n in -1_500i64..1_500) {
        let gap = (nth_new_moon(n + 1) - nth_new_moon(n)).value();
        prop_assert!((29.2..=29.9).contains(&gap), "lunation {} lasts {} days", n, gap);
    }

    #[test]
    fn new_moons_bracket_any_moment(t in FIRST_DAY as f64..LAST_DAY as f64) {
        let t = Moment::<Universal>::new(t);
        let before = new_moon_before(t).unwrap();
        let after = new_moon_at_or_after(t).unwrap();
        prop_assert!(before < t && t <= after);
        let gap = (after - before).value();
        prop_assert!((29.2..=29.9).contains(&gap), "lunation lasts {} days", gap);
        // the new-moon series and the longitude series disagree by up to 0.003°
        let phase = lunar_phase(after).value();
        prop_assert!(
            phase.min(360.0 - phase) < 0.003,
            "phase {} at {}",
            phase,
            after.value()
        );
    }

    #[test]
    fn gregorian_dates_roundtrip(date in -1_000_000i64..1_000_000) {
        let civil = gregorian_from_fixed(date);
        prop_assert_eq!(fixed_from_gregorian(civil.year(), civil.month(), civil.day()), date);
    }
}

#[test]
fn range_bounds_are_the_intended_days() {
    assert_eq!(fixed_from_gregorian(1900, 1, 1), FIRST_DAY);
    assert_eq!(fixed_from_gregorian(2100, 12, 31), LAST_DAY);
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use chrono::DateTime;
use lunisolar::chinese::{chinese_new_year, Sui};
use lunisolar::civil::fixed_from_gregorian;
use lunisolar::riseset::{twilight_dawn, twilight_dusk};
use lunisolar::solar_terms::season_in_gregorian_year;
use lunisolar::{
    chinese_from_fixed, fixed_from_chinese, new_moon_at_or_after, new_moon_before, solar_longitude,
    solar_longitude_after, sunrise, sunset, timezone_conversion, ChineseDate, ChineseMonth, Error,
    Moment, Season, Standard, Twilight, Universal, CFS_ALERT, HONG_KONG, MEAN_SYNODIC_MONTH,
    URBANA,
};
use qtty::{Days, Degrees};

#[test]
fn chinese_new_year_2024_is_first_day_of_dragon_year() {
    let date = fixed_from_gregorian(2024, 2, 10);
    let chinese = chinese_from_fixed(date).unwrap();
    assert_eq!(chinese, ChineseDate::new(78, 41, 1, false, 1).unwrap());
    assert_eq!(chinese_new_year(2024).unwrap(), date);
    assert_eq!(fixed_from_chinese(&chinese).unwrap(), date);
}

#[test]
fn midsummer_2024_and_the_zone_change_of_1929() {
    let summer = chinese_from_fixed(fixed_from_gregorian(2024, 6, 21)).unwrap();
    assert_eq!(summer.to_string(), "78-41-5-16");

    // before 1929 the calendar runs on Beijing mean time
    let old = chinese_from_fixed(fixed_from_gregorian(1900, 1, 1)).unwrap();
    assert_eq!(old, ChineseDate::new(76, 36, 12, false, 1).unwrap());
}

fn leap_sui_from(first: i64, count: i64) -> Vec<bool> {
    (first..first + count)
        .map(|year| {
            Sui::containing(fixed_from_gregorian(year, 12, 31))
                .unwrap()
                .has_leap_month()
        })
        .collect()
}

#[test]
fn leap_months_over_one_metonic_cycle() {
    let leap_sui = leap_sui_from(2000, 19).into_iter().filter(|&leap| leap).count();
    assert_eq!(leap_sui, 7);

    let sui = Sui::containing(fixed_from_gregorian(2023, 6, 1)).unwrap();
    assert_eq!(sui.leap_month(), Some(ChineseMonth::Leap(2)));
}

#[test]
fn every_nineteen_sui_hold_six_to_eight_leap_months() {
    // sui opened by the solstices of 1955 through 2069
    let leaps = leap_sui_from(1955, 115);
    for (offset, window) in leaps.windows(19).enumerate() {
        let count = window.iter().filter(|&&leap| leap).count();
        assert!((6..=8).contains(&count), "19 sui from {}: {count}", 1955 + offset);
    }
    // the solar terms drift against the Metonic cycle: eight leap months
    // in the sui from 1965 and from 2033
    let count_from = |year: usize| {
        let start = year - 1955;
        leaps[start..start + 19].iter().filter(|&&leap| leap).count()
    };
    assert_eq!(count_from(1965), 8);
    assert_eq!(count_from(2033), 8);
    assert_eq!(count_from(1984), 6);
}

#[test]
fn leap_sui_roundtrip_every_day() {
    let cases = [
        ((2017, 7, 23), ChineseMonth::Leap(6)),
        ((2020, 5, 23), ChineseMonth::Leap(4)),
        ((2023, 3, 22), ChineseMonth::Leap(2)),
        ((2033, 12, 22), ChineseMonth::Leap(11)),
    ];
    for ((y, m, d), leap) in cases {
        let sui = Sui::containing(fixed_from_gregorian(y, m, d)).unwrap();
        assert_eq!(sui.leap_month(), Some(leap), "{y}-{m}-{d}");

        let mut leap_days = 0;
        for date in sui.months()[0].date..sui.end() {
            let chinese = chinese_from_fixed(date).unwrap();
            assert_eq!(fixed_from_chinese(&chinese).unwrap(), date, "{chinese}");
            let (month, day) = sui.month_for(date).unwrap();
            assert_eq!((chinese.chinese_month(), chinese.day()), (month, day));
            if chinese.is_leap_month() {
                assert_eq!(chinese.chinese_month(), leap);
                leap_days += 1;
            }
        }
        assert!(leap_days == 29 || leap_days == 30, "{leap}: {leap_days} days");
    }
}

#[test]
fn sunrise_precedes_sunset_at_urbana() {
    let date = fixed_from_gregorian(2024, 2, 10);
    let rise = sunrise(date, &URBANA).unwrap();
    let set = sunset(date, &URBANA).unwrap();
    assert!(rise < set);
    assert!((rise.time_of_day().value() * 24.0 - 6.822).abs() < 1e-3);
    assert!((set.time_of_day().value() * 24.0 - 17.421).abs() < 1e-3);

    let dawn = twilight_dawn(date, &URBANA, Twilight::Astronomical).unwrap();
    let dusk = twilight_dusk(date, &URBANA, Twilight::Astronomical).unwrap();
    assert!(dawn < rise && set < dusk);
}

#[test]
fn polar_night_has_no_sunrise() {
    let date = fixed_from_gregorian(2024, 12, 21);
    assert_eq!(sunrise(date, &CFS_ALERT), Err(Error::NoEventThisDay));
    assert_eq!(sunset(date, &CFS_ALERT), Err(Error::NoEventThisDay));
}

#[test]
fn new_moons_bracket_a_moment() {
    let t = Moment::<Universal>::new(738_926.3);
    let before = new_moon_before(t).unwrap();
    let after = new_moon_at_or_after(t).unwrap();
    assert!(before < t && t <= after);
    let gap = after - before;
    assert!((gap - MEAN_SYNODIC_MONTH).abs() < Days::new(0.5));
    assert_eq!(after.fixed(), fixed_from_gregorian(2024, 3, 10));
}

#[test]
fn vernal_equinox_2024() {
    let start = Moment::<Universal>::from_fixed(fixed_from_gregorian(2024, 1, 1));
    let equinox = solar_longitude_after(Degrees::new(0.0), start).unwrap();
    assert!((equinox.value() - 738_965.128_56).abs() < 1e-4);
    let lambda = solar_longitude(equinox).value();
    assert!(lambda < 1e-3 || lambda > 360.0 - 1e-3);

    let hk = season_in_gregorian_year(Season::Spring, 2024, &HONG_KONG).unwrap();
    assert_eq!(hk.fixed(), fixed_from_gregorian(2024, 3, 20));
}

#[test]
fn standard_time_moves_between_zones() {
    let noon = Moment::<Standard>::new(738_926.5);
    let in_hong_kong = timezone_conversion(noon, &URBANA, &HONG_KONG);
    // UTC-6 to UTC+8
    assert!((in_hong_kong - noon - Days::new(14.0 / 24.0)).abs() < Days::new(1e-12));
}

#[test]
fn utc_interop_lands_on_the_fixed_date() {
    // 2024-02-10T00:00:00Z
    let datetime = DateTime::from_timestamp(1_707_523_200, 0).unwrap();
    let t = Moment::<Universal>::from_utc(datetime);
    assert_eq!(t.fixed(), fixed_from_gregorian(2024, 2, 10));
    assert_eq!(t.to_utc().unwrap(), datetime);
}

#[cfg(feature = "serde")]
#[test]
fn serde_moment_is_a_bare_day_count() {
    let t = Moment::<Universal>::new(738_926.5);
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, "738926.5");
    let back: Moment<Universal> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}

#[cfg(feature = "serde")]
#[test]
fn serde_roundtrips_dates_and_locations() {
    let date = ChineseDate::new(78, 40, 2, true, 15).unwrap();
    let json = serde_json::to_string(&date).unwrap();
    assert!(json.contains("\"leap\":true"));
    let back: ChineseDate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, date);

    let json = serde_json::to_string(&URBANA).unwrap();
    let back: lunisolar::Location = serde_json::from_str(&json).unwrap();
    assert_eq!(back, URBANA);
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer positions on the Earth's surface.

use crate::math::{atan2_deg, cos_deg, sin_deg, tan_deg};
use qtty::{Days, Degrees, Meters};

/// A geographic position together with its standard time zone.
///
/// `zone` is the offset of local standard time from Universal Time as a
/// fraction of a day (UTC+8 is `8/24`).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    latitude: Degrees,
    longitude: Degrees,
    elevation: Meters,
    zone: Days,
}

impl Location {
    /// Location from its coordinates, elevation and zone offset.
    #[inline]
    pub const fn new(latitude: Degrees, longitude: Degrees, elevation: Meters, zone: Days) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
            zone,
        }
    }

    /// Latitude, positive north.
    #[inline]
    pub const fn latitude(&self) -> Degrees {
        self.latitude
    }

    /// Longitude, positive east.
    #[inline]
    pub const fn longitude(&self) -> Degrees {
        self.longitude
    }

    /// Height above sea level.
    #[inline]
    pub const fn elevation(&self) -> Meters {
        self.elevation
    }

    /// Offset of standard time from Universal Time.
    #[inline]
    pub const fn zone(&self) -> Days {
        self.zone
    }

    /// Initial great-circle bearing from `self` towards `focus`, measured
    /// east of due north, on a spherical Earth.
    ///
    /// A focus at either pole has a fixed bearing (0° for the north pole,
    /// 180° for the south pole) instead of the undefined spherical formula.
    pub fn direction(&self, focus: &Location) -> Degrees {
        let phi = self.latitude.value();
        let phi_focus = focus.latitude.value();
        if phi_focus >= 90.0 {
            return Degrees::new(0.0);
        }
        if phi_focus <= -90.0 {
            return Degrees::new(180.0);
        }
        let psi = self.longitude.value();
        let psi_focus = focus.longitude.value();
        let y = sin_deg(psi_focus - psi);
        let x = cos_deg(phi) * tan_deg(phi_focus) - sin_deg(phi) * cos_deg(psi - psi_focus);
        if x == 0.0 && y == 0.0 {
            return Degrees::new(0.0);
        }
        Degrees::new(atan2_deg(y, x))
    }
}

/// Time-zone offset implied by a longitude: 15° per hour.
#[inline]
pub fn zone_from_longitude(longitude: Degrees) -> Days {
    Days::new(longitude.value() / 360.0)
}

/// Urbana, Illinois.
pub const URBANA: Location = Location::new(
    Degrees::new(40.1),
    Degrees::new(-88.2),
    Meters::new(225.0),
    Days::new(-6.0 / 24.0),
);

/// Royal Observatory, Greenwich.
pub const GREENWICH: Location = Location::new(
    Degrees::new(51.477_781_5),
    Degrees::new(0.0),
    Meters::new(46.9),
    Days::new(0.0),
);

/// Mecca, 21°25′24″N 39°49′24″E.
pub const MECCA: Location = Location::new(
    Degrees::new(21.0 + 25.0 / 60.0 + 24.0 / 3600.0),
    Degrees::new(39.0 + 49.0 / 60.0 + 24.0 / 3600.0),
    Meters::new(298.0),
    Days::new(3.0 / 24.0),
);

/// Jerusalem.
pub const JERUSALEM: Location = Location::new(
    Degrees::new(31.8),
    Degrees::new(35.2),
    Meters::new(800.0),
    Days::new(2.0 / 24.0),
);

/// Canadian Forces Station Alert, 82°30′N 62°19′W, well inside the Arctic
/// circle.
pub const CFS_ALERT: Location = Location::new(
    Degrees::new(82.5),
    Degrees::new(-(62.0 + 19.0 / 60.0)),
    Meters::new(0.0),
    Days::new(-5.0 / 24.0),
);

/// Hong Kong Observatory.
pub const HONG_KONG: Location = Location::new(
    Degrees::new(22.3964),
    Degrees::new(114.1095),
    Meters::new(0.0),
    Days::new(8.0 / 24.0),
);

/// San Francisco, 37°46′29″N 122°25′09″W.
pub const SAN_FRANCISCO: Location = Location::new(
    Degrees::new(37.0 + 46.0 / 60.0 + 29.0 / 3600.0),
    Degrees::new(-(122.0 + 25.0 / 60.0 + 9.0 / 3600.0)),
    Meters::new(28.0),
    Days::new(-8.0 / 24.0),
);

/// Palo Alto, California.
pub const PALO_ALTO: Location = Location::new(
    Degrees::new(37.4419),
    Degrees::new(-122.1430),
    Meters::new(9.0),
    Days::new(-8.0 / 24.0),
);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn at(latitude: f64, longitude: f64) -> Location {
        Location::new(
            Degrees::new(latitude),
            Degrees::new(longitude),
            Meters::new(0.0),
            Days::new(0.0),
        )
    }

    #[test]
    fn direction_to_poles_is_fixed() {
        let north = at(90.0, 0.0);
        let south = at(-90.0, 0.0);
        assert_eq!(URBANA.direction(&north), Degrees::new(0.0));
        assert_eq!(URBANA.direction(&south), Degrees::new(180.0));
    }

    #[test]
    fn direction_along_meridian_and_equator() {
        let equator_east = at(0.0, 10.0);
        let origin = at(0.0, 0.0);
        let north_of_origin = at(10.0, 0.0);
        assert_abs_diff_eq!(origin.direction(&equator_east).value(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.direction(&north_of_origin).value(), 0.0, epsilon = 1e-9);
        assert_eq!(origin.direction(&origin), Degrees::new(0.0));
    }

    #[test]
    fn qibla_from_urbana_points_northeast() {
        let bearing = URBANA.direction(&MECCA).value();
        assert!((bearing - 48.5).abs() < 0.5, "bearing = {bearing}");
    }

    #[test]
    fn zone_from_longitude_is_a_fraction_of_a_day() {
        assert_abs_diff_eq!(zone_from_longitude(Degrees::new(120.0)).value(), 1.0 / 3.0);
        assert_abs_diff_eq!(CFS_ALERT.longitude().value(), -62.316_666_666, epsilon = 1e-6);
        assert_abs_diff_eq!(URBANA.zone().value(), -0.25);
    }
}

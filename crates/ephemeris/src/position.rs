//! Low-precision geocentric Moon coordinates and horizon geometry.
//!
//! The series keeps only the leading periodic terms of the lunar theory: the
//! mean longitude, mean anomaly and mean argument of latitude, each linear in
//! days since J2000.0. Accuracy is a fraction of a degree, which is enough to
//! place horizon crossings within a few minutes.

use lunar_core::units::deg_to_rad;

/// Mean obliquity of the ecliptic at J2000.0 (degrees).
pub const OBLIQUITY_DEG: f64 = 23.4397;

/// Geocentric equatorial coordinates of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    pub right_ascension_rad: f64,
    pub declination_rad: f64,
    pub distance_km: f64,
}

/// Geocentric Moon position for a time given in days since J2000.0.
pub fn moon_position(days_j2000: f64) -> EquatorialPosition {
    let mean_longitude = deg_to_rad(218.316 + 13.176_396 * days_j2000);
    let mean_anomaly = deg_to_rad(134.963 + 13.064_993 * days_j2000);
    let mean_latitude_arg = deg_to_rad(93.272 + 13.229_350 * days_j2000);

    let longitude = mean_longitude + deg_to_rad(6.289) * mean_anomaly.sin();
    let latitude = deg_to_rad(5.128) * mean_latitude_arg.sin();
    let distance_km = 385_001.0 - 20_905.0 * mean_anomaly.cos();

    EquatorialPosition {
        right_ascension_rad: right_ascension(longitude, latitude),
        declination_rad: declination(longitude, latitude),
        distance_km,
    }
}

/// Right ascension from ecliptic longitude and latitude (radians).
pub fn right_ascension(longitude: f64, latitude: f64) -> f64 {
    let e = deg_to_rad(OBLIQUITY_DEG);
    (longitude.sin() * e.cos() - latitude.tan() * e.sin()).atan2(longitude.cos())
}

/// Declination from ecliptic longitude and latitude (radians).
pub fn declination(longitude: f64, latitude: f64) -> f64 {
    let e = deg_to_rad(OBLIQUITY_DEG);
    (latitude.sin() * e.cos() + latitude.cos() * e.sin() * longitude.sin()).asin()
}

/// Local sidereal time in radians. `longitude_deg` is east-positive.
pub fn sidereal_time_rad(days_j2000: f64, longitude_deg: f64) -> f64 {
    deg_to_rad(280.16 + 360.985_623_5 * days_j2000) + deg_to_rad(longitude_deg)
}

/// Geometric altitude of a body at the given hour angle.
pub fn altitude_rad(hour_angle_rad: f64, latitude_rad: f64, declination_rad: f64) -> f64 {
    (latitude_rad.sin() * declination_rad.sin()
        + latitude_rad.cos() * declination_rad.cos() * hour_angle_rad.cos())
    .asin()
}

/// Atmospheric refraction for an apparent altitude, clamped at the horizon.
pub fn refraction_rad(altitude_rad: f64) -> f64 {
    let h = altitude_rad.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

/// Refracted topocentric altitude of the Moon (radians).
pub fn moon_altitude_rad(days_j2000: f64, latitude_deg: f64, longitude_deg: f64) -> f64 {
    let position = moon_position(days_j2000);
    let hour_angle = sidereal_time_rad(days_j2000, longitude_deg) - position.right_ascension_rad;
    let h = altitude_rad(hour_angle, deg_to_rad(latitude_deg), position.declination_rad);
    h + refraction_rad(h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_stays_between_perigee_and_apogee() {
        for day in (-20_000..20_000).step_by(97) {
            let p = moon_position(day as f64);
            assert!((364_000.0..=406_000.0).contains(&p.distance_km), "{}", p.distance_km);
        }
    }

    #[test]
    fn declination_is_bounded_by_orbit_tilt() {
        let limit = deg_to_rad(OBLIQUITY_DEG + 5.2);
        for day in 0..400 {
            let p = moon_position(day as f64 * 0.7);
            assert!(p.declination_rad.abs() <= limit);
            assert!(p.right_ascension_rad.abs() <= std::f64::consts::PI);
        }
    }

    #[test]
    fn refraction_lifts_horizon_by_about_half_a_degree() {
        let r = refraction_rad(0.0).to_degrees();
        assert!((0.45..0.65).contains(&r), "refraction at horizon {r}");
        assert!(refraction_rad(deg_to_rad(45.0)) < refraction_rad(0.0));
    }

    #[test]
    fn altitude_of_body_on_meridian_at_equator() {
        let h = altitude_rad(0.0, 0.0, 0.0);
        assert!((h - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}

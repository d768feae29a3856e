//! Indicative monthly premium shown next to the quote form.

use crate::submission::Gender;

/// Coverage unit the age multiplier applies to.
const COVERAGE_UNIT: f64 = 100_000.0;

const FEMALE_FACTOR: f64 = 0.9;

/// Premium per coverage unit for an applicant of `age`.
#[must_use]
pub const fn age_multiplier(age: i32) -> u32 {
    match age {
        i32::MIN..25 => 15,
        25..35 => 20,
        35..45 => 30,
        45..55 => 50,
        _ => 80,
    }
}

/// Estimate the monthly premium, rounded to the nearest whole unit.
///
/// Age is `current_year - birth_year`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn estimate_premium(birth_year: i32, gender: Gender, coverage: i64, current_year: i32) -> i64 {
    let age = current_year - birth_year;
    let gender_factor = match gender {
        Gender::Female => FEMALE_FACTOR,
        Gender::Male | Gender::Other => 1.0,
    };
    let premium =
        coverage as f64 / COVERAGE_UNIT * f64::from(age_multiplier(age)) * gender_factor;
    premium.round() as i64
}

//! Parsing of the `AxB` and `re,im` strings accepted on the command
//! line, and the clap validators built on them.

use num::Complex;
use std::str::FromStr;

/// Splits `s` at the first `separator` and parses both halves.  Both
/// halves must parse; a missing separator yields `None`.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let index = s.find(separator)?;
    let (left, right) = (&s[..index], &s[index + separator.len_utf8()..]);
    Some((left.parse().ok()?, right.parse().ok()?))
}

/// Parses `re,im` into a point on the complex plane.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex::new(re, im))
}

/// Clap validator: accepts anything [`parse_pair`] can read.
pub fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    parse_pair::<T>(s, separator)
        .map(|_| ())
        .ok_or_else(|| err.to_string())
}

/// Clap validator: accepts a number within `low..=high`.
pub fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    not_a_number: &str,
    out_of_range: &str,
) -> Result<(), String> {
    let value = s.parse::<T>().map_err(|_| not_a_number.to_string())?;
    if value < low || value > high {
        return Err(out_of_range.to_string());
    }
    Ok(())
}

/// Clap validator: accepts a finite, strictly positive float.
pub fn validate_positive(s: &str, err: &str) -> Result<(), String> {
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => Ok(()),
        _ => Err(err.to_string()),
    }
}

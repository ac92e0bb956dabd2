//! # Input Parsing Module
//!
//! Converts raw form text into the numbers a [`crate::series::SeriesRequest`]
//! needs. Surrounding whitespace is ignored.

use crate::error::InputError;

/// Parses the number of terms: a non-negative integer.
pub fn parse_terms(text: &str) -> Result<u32, InputError> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| InputError::Terms(text.to_string()))
}

/// Parses the amplitude: any finite real number.
pub fn parse_amplitude(text: &str) -> Result<f64, InputError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::Amplitude(text.to_string())),
    }
}

/// Parses a period in units of π: a finite, strictly positive number.
pub fn parse_period(text: &str) -> Result<f64, InputError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(InputError::Period(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_accept_padded_integers() {
        assert_eq!(parse_terms(" 5 "), Ok(5));
        assert_eq!(parse_terms("0"), Ok(0));
    }

    #[test]
    fn terms_reject_fractions_and_negatives() {
        assert_eq!(parse_terms("2.5"), Err(InputError::Terms("2.5".into())));
        assert_eq!(parse_terms("-3"), Err(InputError::Terms("-3".into())));
        assert_eq!(parse_terms("five"), Err(InputError::Terms("five".into())));
    }

    #[test]
    fn amplitude_must_be_finite() {
        assert_eq!(parse_amplitude("1.0"), Ok(1.0));
        assert_eq!(parse_amplitude("-2"), Ok(-2.0));
        assert!(parse_amplitude("inf").is_err());
        assert!(parse_amplitude("NaN").is_err());
        assert!(parse_amplitude("").is_err());
    }

    #[test]
    fn period_must_be_positive() {
        assert_eq!(parse_period("2"), Ok(2.0));
        assert_eq!(parse_period("0.5"), Ok(0.5));
        assert_eq!(parse_period("0"), Err(InputError::Period("0".into())));
        assert!(parse_period("-1").is_err());
    }
}

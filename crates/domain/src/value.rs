use log::debug;

/// Parse the leading decimal number of user input.
///
/// Leading whitespace is skipped and any text after the number is ignored,
/// so `12kg` yields 12 and `17,5` yields 17. The number may carry a sign, a
/// fraction and an exponent.
pub fn parse_decimal(value: &str) -> Result<f32, NumberError> {
    let trimmed = value.trim_start();

    if trimmed.trim_end().is_empty() {
        return Err(NumberError::Empty);
    }

    match numeric_prefix(trimmed).parse::<f32>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(NumberError::Invalid(trimmed.trim_end().to_string())),
    }
}

fn numeric_prefix(value: &str) -> &str {
    let bytes = value.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits(end);
    end += integer;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits(end + 1);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }

    if integer == 0 && fraction == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    &value[..end]
}

/// Numeric value of an input field, with malformed or empty input counting as zero.
#[must_use]
pub fn parse_or_zero(value: &str) -> f32 {
    match parse_decimal(value) {
        Ok(parsed) => parsed,
        Err(err) => {
            if err != NumberError::Empty {
                debug!("treating input as zero: {err}");
            }
            0.0
        }
    }
}

/// Format seconds as `MM:SS`, or `HH:MM:SS` from one hour on.
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;

    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("Value must not be empty")]
    Empty,
    #[error("Value must be a decimal number ({0})")]
    Invalid(String),
}

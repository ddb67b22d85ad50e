use std::time::Duration;

use super::types::PositiveUsize;
use crate::error::ValidationError;

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}

pub(crate) fn parse_bool_env(s: &str) -> Result<bool, ValidationError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        }),
    }
}

/// Normalises one endpoint path: trimmed, non-empty, rooted at `/`.
pub(crate) fn parse_endpoint(s: &str) -> Result<String, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::EndpointEmpty);
    }
    if !value.starts_with('/') {
        return Err(ValidationError::EndpointMissingSlash {
            value: value.to_owned(),
        });
    }
    Ok(value.to_owned())
}

pub(crate) fn parse_root_segment(s: &str) -> Result<String, ValidationError> {
    let value = s.trim().trim_matches('/');
    if value.is_empty() || value.contains('/') {
        return Err(ValidationError::InvalidRootSegment {
            value: s.to_owned(),
        });
    }
    Ok(value.to_owned())
}

pub(crate) fn parse_duration(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => Duration::from_secs(
            number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?,
        ),
        "h" => Duration::from_secs(
            number
                .checked_mul(60)
                .and_then(|minutes| minutes.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?,
        ),
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.as_millis() == 0 {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}

use crate::utils::error::{RiskError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RiskError::invalid_parameter(
            field_name,
            value,
            "Value must be a finite number",
        ));
    }
    Ok(())
}

pub fn validate_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < min || value > max {
        return Err(RiskError::invalid_parameter(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(RiskError::invalid_parameter(
            field_name,
            value,
            "Value must be greater than zero",
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < 0.0 {
        return Err(RiskError::invalid_parameter(
            field_name,
            value,
            "Value cannot be negative",
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RiskError::ConfigError {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(RiskError::ConfigError {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RiskError::ConfigError {
            message: format!("{}: value cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

/// A scenario name becomes a directory under the output path, so it must be
/// a single plain path component.
pub fn validate_scenario_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    let reason = if name.contains('/') || name.contains('\\') {
        Some("must not contain path separators")
    } else if name.contains('\0') {
        Some("must not contain null bytes")
    } else if name == "." || name == ".." || name.contains("..") {
        Some("must not contain '.' or '..' path segments")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RiskError::ConfigError {
            message: format!("{}: scenario '{}' {}", field_name, name, reason),
        }),
        None => Ok(()),
    }
}

pub fn validate_unique_names<'a>(
    field_name: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        validate_non_empty_string(field_name, name)?;
        if !seen.insert(name) {
            return Err(RiskError::ConfigError {
                message: format!("{}: duplicate name '{}'", field_name, name),
            });
        }
    }
    Ok(())
}

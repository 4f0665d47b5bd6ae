use crate::errors::TreeError;

/// Create a string of all available items.
pub fn items_to_strings(items: &[String]) -> String {
    let mut s = String::new();
    if let Some(last) = items.len().checked_sub(1) {
        for i in &items[..last] {
            s.push_str(i);
            s.push_str(", ");
        }
        s.push_str(&items[last]);
    }
    s
}

/// Parse the value of a continuous attribute.
///
/// * `attribute` - Name of the attribute, used in the error.
/// * `value` - Raw string value.
pub fn parse_numeric(attribute: &str, value: &str) -> Result<f64, TreeError> {
    match value.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => Ok(v),
        _ => Err(TreeError::NonNumericValue(attribute.to_string(), value.to_string())),
    }
}

// Validation
pub fn validate_positive_float_parameter(value: f64, parameter: &str) -> Result<(), TreeError> {
    validate_float_parameter(value, 0.0, f64::INFINITY, parameter)
}

pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), TreeError> {
    if value.is_nan() || value < min || max < value || value.is_infinite() {
        Err(TreeError::InvalidConfiguration(format!(
            "{} expected a finite value within range {} and {}, but {} provided",
            parameter, min, max, value
        )))
    } else {
        Ok(())
    }
}

/// Validate an ordered list of output classes used for discretization.
pub fn validate_output_classes(output_classes: &[String]) -> Result<(), TreeError> {
    if output_classes.len() < 2 {
        return Err(TreeError::InvalidConfiguration(format!(
            "output classes need at least two labels, got [{}]",
            items_to_strings(output_classes)
        )));
    }
    for (i, c) in output_classes.iter().enumerate() {
        if output_classes[..i].contains(c) {
            return Err(TreeError::InvalidConfiguration(format!(
                "output class {} is listed more than once in [{}]",
                c,
                items_to_strings(output_classes)
            )));
        }
    }
    Ok(())
}

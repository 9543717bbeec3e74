//! Setting value validation.

use crate::sink::Alignment;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "TARGET_WIDTH" => validate_int_range(value, 1, 4096)?,
        "FEED_LINES" => validate_int_range(value, 0, 255)?,
        "PRINT_ALIGN" => {
            value.parse::<Alignment>()?;
        }
        "OUTPUT_PATH" => {
            if value.trim().is_empty() {
                return Err("must not be blank".into());
            }
        }
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "DITHER" | "ROTATE_PRINT" | "DRY_RUN_MODE")
}

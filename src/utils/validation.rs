use crate::utils::error::{LabError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LabError::config(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LabError::config(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(LabError::config(
            field_name,
            format!("Invalid URL format '{}': {}", url_str, e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LabError::config(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(LabError::config(field_name, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LabError::config(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LabError::validation(format!(
            "{} must be between {} and {} (got {})",
            field_name, min, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("payment.gateway_url", "https://api.stripe.com").is_ok());
        assert!(validate_url("payment.gateway_url", "http://localhost:8080").is_ok());
        assert!(validate_url("payment.gateway_url", "").is_err());
        assert!(validate_url("payment.gateway_url", "invalid-url").is_err());
        assert!(validate_url("payment.gateway_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("brightness", 50, 0, 100).is_ok());
        assert!(validate_range("brightness", 0, 0, 100).is_ok());
        assert!(validate_range("brightness", 101, 0, 100).is_err());
    }

    #[test]
    fn test_validate_path_and_strings() {
        assert!(validate_path("transcribe.work_dir", "temp_audio").is_ok());
        assert!(validate_path("transcribe.work_dir", "").is_err());
        assert!(validate_non_empty_string("payment.currency", "USD").is_ok());
        assert!(validate_non_empty_string("payment.currency", "   ").is_err());
    }
}

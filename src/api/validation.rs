use super::ApiError;

pub fn validate_month(month: u32) -> Result<u32, ApiError> {
    if !(1..=12).contains(&month) {
        return Err(ApiError::validation(format!(
            "Invalid month: {}. Month must be between 1 and 12",
            month
        )));
    }
    Ok(month)
}

pub fn validate_year(year: i32) -> Result<i32, ApiError> {
    if !(1970..=9999).contains(&year) {
        return Err(ApiError::validation(format!(
            "Invalid year: {}. Year must be between 1970 and 9999",
            year
        )));
    }
    Ok(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_month() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(validate_month(0).is_err());
        assert!(validate_month(13).is_err());
    }

    #[test]
    fn test_validate_year() {
        assert!(validate_year(2024).is_ok());
        assert!(validate_year(1969).is_err());
        assert!(validate_year(10_000).is_err());
    }
}

use super::error::FetchError;

/// Trims and upper-cases a user-entered ticker, rejecting empty input and
/// characters outside `A-Z`, `0-9`, `.` and `-`.
pub fn normalize_symbol(raw: &str) -> Result<String, FetchError> {
    let symbol = raw.trim().to_uppercase();

    if symbol.is_empty()
        || !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(FetchError::Validation(raw.to_string()));
    }

    Ok(symbol)
}

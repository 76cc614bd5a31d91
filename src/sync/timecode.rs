use crate::error::SyncError;

/// Parse `SS`, `MM:SS` or `HH:MM:SS` (fractional seconds allowed) into seconds.
pub fn parse_timestamp(label: &str) -> Result<f64, SyncError> {
    let invalid = || SyncError::InvalidTimestamp(label.to_string());
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() > 3 {
        return Err(invalid());
    }

    let (last, leading) = parts.split_last().ok_or_else(invalid)?;
    let seconds: f64 = last.parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 || (!leading.is_empty() && seconds >= 60.0) {
        return Err(invalid());
    }

    let mut total = 0.0;
    for (i, part) in leading.iter().enumerate() {
        let value: u32 = part.parse().map_err(|_| invalid())?;
        // Minutes are bounded when hours precede them.
        if leading.len() == 2 && i == 1 && value >= 60 {
            return Err(invalid());
        }
        total = total * 60.0 + value as f64;
    }

    Ok(total * 60.0 + seconds)
}

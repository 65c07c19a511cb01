//! Runtime configuration through environment variables.

pub(crate) const FMT_MAX_ROWS: &str = "AVOCET_FMT_MAX_ROWS";

pub fn verbose() -> bool {
    std::env::var("AVOCET_VERBOSE").as_deref().unwrap_or("") == "1"
}

/// Maximum number of rows shown when formatting a DataFrame.
pub(crate) fn fmt_max_rows() -> usize {
    std::env::var(FMT_MAX_ROWS)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10)
}

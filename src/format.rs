//! Compact human-readable byte counts: `"1.5 K"`, `"12.0 M"`.

use crate::error::ScanError;

const UNITS: [&str; 7] = ["B", "K", "M", "G", "T", "P", "E"];

/// Counts below this are printed as a bare integer.
const EXACT_BELOW: u64 = 10;

/// Format a byte count with binary units and one decimal, rounding half up.
///
/// Counts under ten bytes are printed without decimals (`"0 B"`, `"9 B"`).
pub fn format_bytes(bytes: u64) -> String {
    if bytes < EXACT_BELOW {
        return format!("{} B", bytes);
    }

    let mut unit = 0;
    let mut divisor: u64 = 1;
    while unit < UNITS.len() - 1 && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }

    // Tenths of the unit, rounded half up. u128 keeps the *10 from overflowing.
    let divisor = u128::from(divisor);
    let tenths = (u128::from(bytes) * 10 + divisor / 2) / divisor;
    format!("{}.{} {}", tenths / 10, tenths % 10, UNITS[unit])
}

/// Signed variant of [`format_bytes`]; negative counts are rejected.
pub fn format_signed(bytes: i64) -> Result<String, ScanError> {
    u64::try_from(bytes)
        .map(format_bytes)
        .map_err(|_| ScanError::InvalidArgument(format!("negative byte count: {}", bytes)))
}

//! Bikram Sambat month names as the upstream `detailed-calendar/` endpoint
//! expects them.

/// Months of the Bikram Sambat year, in calendar order.
pub const NEPALI_MONTHS: [&str; 12] = [
    "Baisakh", "Jestha", "Asar", "Shrawan", "Bhadra", "Asoj", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

/// Returns the name of the 1-based `month`. Anything outside 1..=12 maps to
/// the first month rather than failing.
pub fn month_name(month: i64) -> &'static str {
    if (1..=12).contains(&month) {
        NEPALI_MONTHS[(month - 1) as usize]
    } else {
        NEPALI_MONTHS[0]
    }
}

/// Resolves a raw `month` query value. Missing or non-numeric input falls back
/// to the first month, same as an out-of-range number.
pub fn month_name_from_param(raw: Option<&str>) -> &'static str {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .map(month_name)
        .unwrap_or(NEPALI_MONTHS[0])
}

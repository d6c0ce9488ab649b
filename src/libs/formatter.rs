//! Presentation helpers for hours and amounts.

/// Formats decimal hours as `HH:MM`, e.g. `7.5` → `07:30`. Negative input
/// is shown as `00:00`.
pub fn format_hours(hours: f64) -> String {
    let minutes = (hours.max(0.0) * 60.0).round() as i64;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Formats an amount with two decimals and the euro sign, e.g. `350.00 €`.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2} €", amount)
}

/// Formats an hourly rate, e.g. `50.00 €/h`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2} €/h", rate)
}

/// Human label of a period bound pair, e.g. `2025-01-01 → 2025-01-31`.
pub fn format_period(from: Option<&str>, to: Option<&str>) -> String {
    match (from, to) {
        (None, None) => "(all time)".to_string(),
        (from, to) => format!("{} → {}", from.unwrap_or("…"), to.unwrap_or("…")),
    }
}

//! Timing and number formatting helpers for reports

use std::time::Duration;

const DURATION_UNITS: [&str; 4] = ["ns", "us", "ms", "s"];
const RATE_SUFFIXES: [&str; 4] = ["", "K", "M", "G"];

/// Divide by 1000 until `value` drops below 1000 or `units` runs out
fn scale_by_thousands(mut value: f64, units: &[&'static str]) -> (f64, &'static str) {
    let mut unit = 0;
    while value >= 1_000.0 && unit + 1 < units.len() {
        value /= 1_000.0;
        unit += 1;
    }
    (value, units[unit])
}

/// Format a duration with the largest unit up to seconds
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use matsum::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    let (value, unit) = scale_by_thousands(nanos as f64, &DURATION_UNITS);
    format!("{:.2}{}", value, unit)
}

/// Format a per-second rate with a K/M/G suffix
pub fn format_rate(rate: f64) -> String {
    if rate < 1_000.0 {
        return format!("{:.0}", rate);
    }
    let (value, suffix) = scale_by_thousands(rate, &RATE_SUFFIXES);
    format!("{:.2}{}", value, suffix)
}

/// Elements summed per second of `elapsed`, 0 when no time was measured
pub fn elements_per_sec(elements: usize, elapsed: Duration) -> f64 {
    match elapsed.as_secs_f64() {
        secs if secs > 0.0 => elements as f64 / secs,
        _ => 0.0,
    }
}

/// Group digits in threes: `1234567` becomes `1,234,567`
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

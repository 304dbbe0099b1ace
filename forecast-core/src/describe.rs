//! Canned one-sentence summaries of the current weather.

/// Build a short description from a temperature and the provider's condition text.
///
/// The temperature picks a band (inclusive upper bounds at 5, 15, 25 and 35 °C) and the
/// condition adds a phrase chosen by case-insensitive substring match, with rain taking
/// priority over cloud, then sun/clear, then snow.
pub fn generate_description(temperature_c: f64, condition: &str) -> String {
    let mut desc = String::from(temperature_phrase(temperature_c));
    desc.push(' ');
    desc.push_str(condition_phrase(condition));
    desc
}

fn temperature_phrase(t: f64) -> &'static str {
    if t <= 5.0 {
        "Very cold."
    } else if t <= 15.0 {
        "Cool weather."
    } else if t <= 25.0 {
        "Mild and pleasant."
    } else if t <= 35.0 {
        "Warm and sunny."
    } else {
        "Extremely hot."
    }
}

fn condition_phrase(condition: &str) -> &'static str {
    let lower = condition.to_lowercase();

    if lower.contains("rain") {
        "Rain is expected, carry an umbrella!"
    } else if lower.contains("cloud") {
        "Mostly cloudy skies today."
    } else if lower.contains("sunny") || lower.contains("clear") {
        "Clear skies with plenty of sunshine."
    } else if lower.contains("snow") {
        "Snowfall is expected. Stay warm!"
    } else {
        "No major weather events expected."
    }
}

use forecast_core::{
    WeatherReport,
    display::{ForecastCell, feels_like, format_temp, icon_url, info_items},
    generate_description,
};

/// Plain-text rendering of one report, for `forecast show`.
pub fn format_report(report: &WeatherReport) -> String {
    let current = &report.current;
    let mut lines = vec![
        format!("📍 {}", report.location),
        String::new(),
        format!("{}  {}", format_temp(current.temp_c), current.condition.text),
        feels_like(current),
        format!("Icon: {}", icon_url(&current.condition.icon)),
        generate_description(current.temp_c, &current.condition.text),
        String::new(),
    ];

    lines.extend(
        info_items(current)
            .iter()
            .map(|item| format!("{} {:<12} {}", item.kind.glyph(), item.label, item.value)),
    );

    lines.push(String::new());
    lines.push("5-Days Forecast".to_string());
    lines.extend(report.forecast.iter().map(ForecastCell::from).map(|cell| {
        format!("{} {}  {:>7}  {}", cell.day_month, cell.weekday, cell.temperature, cell.condition)
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

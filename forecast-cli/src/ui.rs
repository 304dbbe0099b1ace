//! Rendering for the interactive screen: the decorative shell and the weather view.

use forecast_core::{
    CurrentConditions, ForecastDay, Screen, ViewState,
    display::{ForecastCell, condition_glyph, feels_like, format_temp, info_items},
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
};

/// Background stops, top-left to bottom-right.
const GRADIENT: [(u8, u8, u8); 3] = [(0x1e, 0x25, 0x49), (0x47, 0x3b, 0x90), (0x76, 0x46, 0xa6)];

const MUTED: Color = Color::Rgb(0xda, 0xda, 0xda);
const PLACEHOLDER: Color = Color::Rgb(0xcc, 0xcc, 0xcc);

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

const CELL_WIDTH: u16 = 14;
const CELL_HEIGHT: u16 = 7;

pub fn render(frame: &mut Frame, area: Rect, view: &ViewState, tick: usize) {
    let content = render_shell(frame, area);
    render_view(frame, content, view, tick);
}

// ============================================================================
// Shell
// ============================================================================

/// Paint the gradient and return the safe area inside it.
fn render_shell(frame: &mut Frame, area: Rect) -> Rect {
    for row in 0..area.height {
        let strip = Rect::new(area.x, area.y + row, area.width, 1);
        let color = gradient_at(row, area.height);
        frame.render_widget(Block::default().style(Style::default().bg(color)), strip);
    }

    safe_area(area)
}

/// Roughly 90% of the width, centered, below one row of padding.
fn safe_area(area: Rect) -> Rect {
    let width = (u32::from(area.width) * 9 / 10) as u16;
    let x = area.x + (area.width - width) / 2;
    let top = area.height.min(1);
    Rect::new(x, area.y + top, width, area.height - top)
}

fn gradient_at(row: u16, height: u16) -> Color {
    let t = if height <= 1 { 0.0 } else { f32::from(row) / f32::from(height - 1) };
    let (from, to, local) = if t <= 0.5 {
        (GRADIENT[0], GRADIENT[1], t * 2.0)
    } else {
        (GRADIENT[1], GRADIENT[2], (t - 0.5) * 2.0)
    };
    let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * local).round() as u8;
    Color::Rgb(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

// ============================================================================
// Weather view
// ============================================================================

fn render_view(frame: &mut Frame, area: Rect, view: &ViewState, tick: usize) {
    let [header, body, footer] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .areas(area);

    render_header(frame, header, view);

    match view.screen() {
        Screen::Loading => render_spinner(frame, body, tick),
        Screen::Ready { current, forecast } => render_ready(frame, body, current, forecast),
    }

    let hint = Line::from("Enter search · Esc clear · Ctrl-C quit").fg(MUTED).centered();
    frame.render_widget(Paragraph::new(hint), footer);
}

fn render_header(frame: &mut Frame, area: Rect, view: &ViewState) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(24)]).areas(area);

    let city = Line::from(vec![Span::raw("📍 "), Span::raw(view.city()).fg(Color::White)]);
    frame.render_widget(Paragraph::new(city), left);

    let input = if view.search().is_empty() {
        Span::raw("Search city").fg(PLACEHOLDER)
    } else {
        Span::raw(format!("{}▏", view.search())).fg(Color::White)
    };
    let search = Line::from(vec![input.underlined(), Span::raw(" 🔍")]).right_aligned();
    frame.render_widget(Paragraph::new(search), right);
}

fn render_spinner(frame: &mut Frame, area: Rect, tick: usize) {
    let [slot] = Layout::vertical([Constraint::Length(1)]).flex(Flex::Center).areas(area);
    let glyph = SPINNER[tick % SPINNER.len()];
    let line = Line::from(format!("{glyph} Loading...")).fg(Color::White).centered();
    frame.render_widget(Paragraph::new(line), slot);
}

fn render_ready(
    frame: &mut Frame,
    area: Rect,
    current: Option<&CurrentConditions>,
    forecast: &[ForecastDay],
) {
    let current_height = if current.is_some() { 12 } else { 0 };
    let [current_area, heading, strip] = Layout::vertical([
        Constraint::Length(current_height),
        Constraint::Length(2),
        Constraint::Length(CELL_HEIGHT),
    ])
    .areas(area);

    if let Some(current) = current {
        render_current(frame, current_area, current);
    }

    let title = Line::from("5-Days Forecast").fg(Color::White).bold();
    let [_, title_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(heading);
    frame.render_widget(Paragraph::new(title), title_row);

    render_forecast(frame, strip, forecast);
}

fn render_current(frame: &mut Frame, area: Rect, current: &CurrentConditions) {
    let [_, main, desc, _, grid] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(5),
    ])
    .areas(area);

    let [temps, sky] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(main);

    let temp_lines = vec![
        Line::from(format_temp(current.temp_c)).fg(Color::White).bold(),
        Line::from(feels_like(current)).fg(MUTED),
    ];
    frame.render_widget(Paragraph::new(temp_lines).alignment(Alignment::Center), temps);

    let sky_lines = vec![
        Line::from(condition_glyph(&current.condition.text)),
        Line::from(current.condition.text.as_str()).fg(MUTED),
    ];
    frame.render_widget(Paragraph::new(sky_lines).alignment(Alignment::Center), sky);

    let description =
        forecast_core::generate_description(current.temp_c, &current.condition.text);
    frame.render_widget(
        Paragraph::new(Line::from(description).fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        desc,
    );

    render_info_grid(frame, grid, current);
}

fn render_info_grid(frame: &mut Frame, area: Rect, current: &CurrentConditions) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(MUTED));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
        .flex(Flex::SpaceAround)
        .split(inner);
    let items = info_items(current);

    for (row, pair) in rows.iter().zip(items.chunks(2)) {
        let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for (col, item) in cols.iter().zip(pair) {
            let line = Line::from(vec![
                Span::raw(format!(" {} ", item.kind.glyph())),
                Span::raw(item.label).fg(Color::White),
                Span::raw(" "),
                Span::raw(item.value.as_str()).fg(MUTED),
            ]);
            frame.render_widget(Paragraph::new(line), *col);
        }
    }
}

fn render_forecast(frame: &mut Frame, area: Rect, forecast: &[ForecastDay]) {
    let fits = usize::from(area.width / CELL_WIDTH).max(1);
    let cells = Layout::horizontal(vec![Constraint::Length(CELL_WIDTH); forecast.len().min(fits)])
        .spacing(0)
        .split(area);

    for (slot, day) in cells.iter().zip(forecast) {
        let cell = ForecastCell::from(day);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(MUTED));
        let lines = vec![
            Line::from(cell.day_month).fg(MUTED),
            Line::from(cell.weekday).fg(MUTED),
            Line::from(condition_glyph(&cell.condition)),
            Line::from(cell.temperature).fg(Color::White),
            Line::from(cell.condition).fg(MUTED),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            *slot,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use forecast_core::{Condition, FetchError, WeatherReport};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(view: &ViewState, tick: usize) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 34)).expect("terminal");
        terminal.draw(|frame| render(frame, frame.area(), view, tick)).expect("draw");

        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded_view() -> ViewState {
        let cloudy =
            Condition { text: "Partly cloudy".into(), icon: "//cdn/116.png".into(), code: 1003 };
        let mut view = ViewState::new("Gwalior");
        view.mount();
        view.settle(Ok(WeatherReport {
            location: "Gwalior".into(),
            current: CurrentConditions {
                temp_c: 31.0,
                feelslike_c: 33.4,
                humidity: 38,
                wind_kph: 12.6,
                vis_km: 6.0,
                condition: cloudy.clone(),
            },
            forecast: vec![
                ForecastDay {
                    date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                    avgtemp_c: 30.2,
                    condition: cloudy.clone(),
                },
                ForecastDay {
                    date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                    avgtemp_c: 32.5,
                    condition: Condition {
                        text: "Sunny".into(),
                        icon: "//cdn/113.png".into(),
                        code: 1000,
                    },
                },
            ],
        }));
        view
    }

    #[test]
    fn idle_view_shows_current_panel_and_forecast() {
        let out = draw(&loaded_view(), 0);

        assert!(out.contains("Gwalior"));
        assert!(out.contains("31°C"));
        assert!(out.contains("Feels like: 33.4°C"));
        assert!(out.contains("Partly cloudy"));
        assert!(out.contains("Warm and sunny. Mostly cloudy skies today."));
        assert!(out.contains("Humidity"));
        assert!(out.contains("12.6 km/h"));
        assert!(out.contains("5-Days Forecast"));
        assert!(out.contains("01-04"));
        assert!(out.contains("Tue"));
        assert!(out.contains("32.5°C"));
    }

    #[test]
    fn loading_hides_prior_data() {
        let mut view = loaded_view();
        view.edit_search("Delhi");
        view.submit_search();

        let out = draw(&view, 3);

        assert!(out.contains("Loading..."));
        assert!(!out.contains("Feels like"));
        assert!(!out.contains("5-Days Forecast"));
    }

    #[test]
    fn empty_view_after_failed_first_load() {
        let mut view = ViewState::new("Gwalior");
        view.mount();
        view.settle(Err(FetchError::Transport("offline".into())));

        let out = draw(&view, 0);

        assert!(out.contains("Search city"));
        assert!(out.contains("5-Days Forecast"));
        assert!(!out.contains("Feels like"));
    }

    #[test]
    fn typed_search_replaces_placeholder() {
        let mut view = ViewState::new("Gwalior");
        view.edit_search("Pune");

        let out = draw(&view, 0);

        assert!(out.contains("Pune"));
        assert!(!out.contains("Search city"));
    }

    #[test]
    fn gradient_hits_end_stops() {
        assert_eq!(gradient_at(0, 10), Color::Rgb(0x1e, 0x25, 0x49));
        assert_eq!(gradient_at(9, 10), Color::Rgb(0x76, 0x46, 0xa6));
        assert_eq!(gradient_at(0, 1), Color::Rgb(0x1e, 0x25, 0x49));
    }

    #[test]
    fn safe_area_is_inset() {
        let inner = safe_area(Rect::new(0, 0, 100, 30));
        assert_eq!(inner, Rect::new(5, 1, 90, 29));
    }
}

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::{Component, ERROR_ICON};
use crate::action::Action;
use crate::icons;
use crate::state::{AppState, WeatherSnapshot};

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
}

const SPINNER_FRAMES: [&str; 10] = [
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}",
    "\u{2827}", "\u{2807}", "\u{280f}",
];

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match &props.state.weather {
            DataResource::Failed(error) => render_error(frame, area, error),
            DataResource::Loaded(snapshot) => render_ready(frame, area, snapshot),
            DataResource::Loading => render_loading(frame, area, props.state.tick_count),
            DataResource::Empty => render_idle_hint(frame, area),
        }
    }
}

fn render_ready(frame: &mut Frame, area: Rect, snapshot: &WeatherSnapshot) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // location name
        Constraint::Length(1), // temperature
        Constraint::Length(1), // description
        Constraint::Length(1), // blank
        Constraint::Length(1), // icon glyph
        Constraint::Length(1), // icon url
    ])
    .flex(Flex::Center)
    .split(area);

    let name = Line::from(vec![Span::styled(
        snapshot.location_name.clone(),
        Style::default().bold(),
    )])
    .centered();
    frame.render_widget(Paragraph::new(name), chunks[0]);

    let temp = Line::from(vec![Span::styled(
        format!("{:.1}\u{b0}C", snapshot.temperature_c),
        Style::default()
            .fg(temperature_color(snapshot.temperature_c))
            .bold(),
    )])
    .centered();
    frame.render_widget(Paragraph::new(temp), chunks[1]);

    let desc = Line::from(vec![Span::styled(
        snapshot.description.clone(),
        Style::default().fg(Color::Gray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(desc), chunks[2]);

    let glyph = Line::from(icons::icon_glyph(&snapshot.icon_id)).centered();
    frame.render_widget(Paragraph::new(glyph), chunks[4]);

    let url = Line::from(vec![Span::styled(
        icons::icon_url(&snapshot.icon_id),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(url), chunks[5]);
}

fn render_loading(frame: &mut Frame, area: Rect, tick_count: u32) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let frame_index = tick_count as usize % SPINNER_FRAMES.len();
    let line = Line::from(vec![
        Span::styled(
            SPINNER_FRAMES[frame_index],
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled("Loading...", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

fn render_idle_hint(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // search hint
        Constraint::Length(1), // locate hint
    ])
    .flex(Flex::Center)
    .split(area);

    let search = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("/", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to search for a city", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(search), chunks[0]);

    let locate = Line::from(vec![
        Span::styled("or ", Style::default().fg(Color::DarkGray)),
        Span::styled("l", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to use your location", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(locate), chunks[1]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), chunks[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[4],
    );
}

fn temperature_color(celsius: f32) -> Color {
    match celsius {
        t if t < 0.0 => Color::Rgb(150, 200, 255),
        t if t < 15.0 => Color::Rgb(100, 180, 255),
        t if t < 25.0 => Color::Rgb(100, 200, 150),
        t if t < 35.0 => Color::Rgb(255, 180, 80),
        _ => Color::Rgb(255, 100, 80),
    }
}

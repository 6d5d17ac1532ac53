use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Cell, Chart, Clear,
        Dataset as ChartDataset, GraphType, Paragraph, Row, Table, Tabs, Wrap,
    },
    Frame,
};

use crate::{
    aggregation::{
        average_per_day, least_used, most_used, sort_by_duration_descending, total_duration,
        week_total_duration,
    },
    cli::report::{delete_warning, NO_DATA},
    dashboard::{ChartKind, Dashboard, DeleteOutcome, DeleteState, Tab, TABS},
    model::{AppUsage, ChartSeries, UsageRecord},
    utils::format::{
        day_name_for_index, day_of_week_name, format_calendar_date, format_duration,
        LOADING_PLACEHOLDER,
    },
};

use super::{
    icons::{application_icon, general_icon},
    theme::Theme,
};

fn block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Theme::secondary()))
        .title(Span::styled(format!(" {title} "), Theme::title()))
}

/// Renders the whole dashboard for a single frame.
pub fn draw(frame: &mut Frame, dashboard: &Dashboard) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let tabs = Tabs::new(TABS.iter().map(|v| format!(" {v} ")))
        .select(dashboard.tab.index())
        .style(Style::default().fg(Theme::dim()))
        .highlight_style(Theme::selected_tab())
        .block(block("Screen Time"));
    frame.render_widget(tabs, layout[0]);

    match dashboard.tab {
        Tab::Day => draw_day(frame, layout[1], dashboard),
        Tab::Week => draw_week(frame, layout[1], dashboard),
        Tab::Other => draw_other(frame, layout[1], dashboard),
    }

    frame.render_widget(footer(dashboard), layout[2]);

    if dashboard.delete_state() == DeleteState::PendingConfirmation {
        draw_delete_confirmation(frame, dashboard);
    }
}

fn footer(dashboard: &Dashboard) -> Paragraph<'_> {
    let line = match dashboard.last_error() {
        Some(error) => Line::from(Span::styled(error, Style::default().fg(Theme::danger()))),
        None => {
            let hints = match dashboard.tab {
                Tab::Day => "←/→ change day  t today",
                Tab::Week => "←/→ change week",
                Tab::Other => "0-9 months  d delete",
            };
            Line::from(Span::styled(
                format!("{hints}  Tab switch view  q quit"),
                Style::default().fg(Theme::dim()),
            ))
        }
    };
    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::secondary())),
    )
}

fn card<'a>(title: &'a str, value: String) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        value,
        Style::default()
            .fg(Theme::text())
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block(title))
}

fn draw_day(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let records = dashboard.day_records();
    frame.render_widget(
        card("Total Screen Time", format_duration(total_duration(records))),
        cards[0],
    );

    let date = dashboard.selected_date();
    let next = if date < dashboard.today() { " ▶" } else { "  " };
    let title = day_of_week_name(Some(date));
    frame.render_widget(
        card(
            &title,
            format!("◀ {}{next}", format_calendar_date(Some(date))),
        ),
        cards[1],
    );

    if dashboard.chart().is_ready(ChartKind::Day) {
        frame.render_widget(day_chart(dashboard.day_chart()), body[0]);
    } else {
        frame.render_widget(loading(), body[0]);
    }
    frame.render_widget(usage_table("Most Used", records), body[1]);
}

fn day_chart(series: &ChartSeries) -> BarChart<'_> {
    let bars: Vec<Bar> = series
        .points()
        .map(|(label, minutes)| {
            Bar::default()
                .label(Line::from(label))
                .value(minutes.round() as u64)
                .text_value(format!("{minutes:.0}m"))
        })
        .collect();
    let title = series
        .datasets
        .first()
        .map(|v| v.label.as_str())
        .unwrap_or_default();
    BarChart::default()
        .block(block(title))
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Theme::primary()))
        .value_style(Style::default().fg(Theme::text()).bg(Theme::primary()))
        .data(BarGroup::default().bars(&bars))
}

fn loading() -> Paragraph<'static> {
    Paragraph::new(LOADING_PLACEHOLDER)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Theme::dim()))
        .block(block("Chart"))
}

fn usage_table<'a>(title: &'a str, records: &[UsageRecord]) -> Table<'a> {
    let rows: Vec<Row> = sort_by_duration_descending(records)
        .into_iter()
        .map(|v| {
            Row::new(vec![
                Cell::from(application_icon(&v.application)),
                Cell::from(v.application.to_string()),
                Cell::from(format_duration(v.duration)),
            ])
        })
        .collect();
    Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["", "Application", "Time"]).style(
            Style::default()
                .fg(Theme::dim())
                .add_modifier(Modifier::BOLD),
        ),
    )
    .style(Style::default().fg(Theme::text()))
    .block(block(title))
}

fn describe_usage(usage: &AppUsage) -> String {
    if usage.is_sentinel() {
        NO_DATA.to_string()
    } else {
        format!(
            "{} {} {}",
            application_icon(&usage.application),
            usage.application,
            format_duration(usage.duration)
        )
    }
}

fn draw_week(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Min(5),
        ])
        .split(area);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    let week = dashboard.week_records();
    frame.render_widget(
        card("Total Screen Time", format_duration(week_total_duration(week))),
        cards[0],
    );
    frame.render_widget(
        card("Average Time Per Day", format_duration(average_per_day(week))),
        cards[1],
    );
    frame.render_widget(
        card("Most Used Weekly App", describe_usage(&most_used(week))),
        cards[2],
    );
    frame.render_widget(
        card("Least Used Weekly App", describe_usage(&least_used(week))),
        cards[3],
    );

    let week_start = dashboard.week_start().map(|v| v.date_naive());
    frame.render_widget(
        Paragraph::new(format!(
            "◀ Week Beginning: {} ▶",
            format_calendar_date(week_start)
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Theme::text()))
        .block(block("Week")),
        rows[1],
    );

    if dashboard.chart().is_ready(ChartKind::Week) {
        let points: Vec<(f64, f64)> = dashboard
            .week_chart()
            .points()
            .enumerate()
            .map(|(index, (_, minutes))| (index as f64, minutes))
            .collect();
        frame.render_widget(week_chart(dashboard.week_chart(), &points), rows[2]);
    } else {
        frame.render_widget(loading(), rows[2]);
    }

    let days = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(rows[3]);
    for (index, records) in week.days().iter().enumerate() {
        let title = day_name_for_index(index).unwrap_or_default();
        frame.render_widget(day_column(title, records), days[index]);
    }
}

fn week_chart<'a>(series: &'a ChartSeries, points: &'a [(f64, f64)]) -> Chart<'a> {
    let max = points
        .iter()
        .map(|(_, minutes)| *minutes)
        .fold(0., f64::max)
        .max(1.);
    let name = series
        .datasets
        .first()
        .map(|v| v.label.as_str())
        .unwrap_or_default();
    let dataset = ChartDataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Theme::accent()))
        .data(points);
    Chart::new(vec![dataset])
        .block(block(name))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Theme::dim()))
                .bounds([0., (series.labels.len().max(2) - 1) as f64])
                .labels(
                    series
                        .labels
                        .iter()
                        .map(|v| Span::raw(v.as_str()))
                        .collect::<Vec<_>>(),
                ),
        )
        .y_axis(
            Axis::default()
                .title("min")
                .style(Style::default().fg(Theme::dim()))
                .bounds([0., max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{max:.0}"))]),
        )
}

fn day_column<'a>(title: &'a str, records: &[UsageRecord]) -> Paragraph<'a> {
    let lines: Vec<Line> = sort_by_duration_descending(records)
        .into_iter()
        .map(|v| {
            Line::from(vec![
                Span::raw(format!("{} ", application_icon(&v.application))),
                Span::styled(v.application.to_string(), Style::default().fg(Theme::text())),
                Span::styled(
                    format!(" {}", format_duration(v.duration)),
                    Style::default().fg(Theme::dim()),
                ),
            ])
        })
        .collect();
    Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(block(title))
}

fn draw_other(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", general_icon("bell"))),
            Span::styled(
                format!("Current Screen Time Alert: {}", dashboard.alert_screen_time()),
                Theme::title(),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Months to delete: ", Style::default().fg(Theme::dim())),
            Span::styled(
                dashboard.delete_input(),
                Style::default()
                    .fg(Theme::text())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
        ]),
        match dashboard.delete_input_months() {
            Some(months) => Line::from(Span::styled(
                format!("[d] Delete {months} months"),
                Style::default()
                    .fg(Theme::danger())
                    .add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(
                "Enter a positive number of months",
                Style::default().fg(Theme::warn()),
            )),
        },
        Line::from(""),
    ];

    if dashboard.delete_state() == DeleteState::Deleting {
        lines.push(Line::from(Span::styled(
            "Deleting...",
            Style::default().fg(Theme::warn()),
        )));
    } else if let Some(outcome) = dashboard.delete_outcome() {
        let line = match outcome {
            DeleteOutcome::Sent => Line::from(vec![
                Span::raw(format!("{} ", general_icon("check"))),
                Span::styled(outcome.message(), Style::default().fg(Theme::success())),
            ]),
            DeleteOutcome::Failed(_) => Line::from(Span::styled(
                outcome.message(),
                Style::default().fg(Theme::danger()),
            )),
        };
        lines.push(line);
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(block("Other")),
        area,
    );
}

fn draw_delete_confirmation(frame: &mut Frame, dashboard: &Dashboard) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("Are you sure?", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(
            delete_warning(dashboard.delete_months()),
            Style::default().fg(Theme::text()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Theme::dim())),
            Span::styled("Y", Style::default().fg(Theme::danger()).add_modifier(Modifier::BOLD)),
            Span::styled(" to continue or ", Style::default().fg(Theme::dim())),
            Span::styled("N", Style::default().fg(Theme::secondary()).add_modifier(Modifier::BOLD)),
            Span::styled(" to cancel", Style::default().fg(Theme::dim())),
        ]),
    ];
    let popup = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block("Confirm"));
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

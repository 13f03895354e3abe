use crate::config::ChartConfig;
use crate::error::SibylError;
use crate::ingest::trend::TrendStore;
use crate::record::RECORD_DATE_FORMAT;
use chrono::NaiveDateTime;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, tty::IsTty};
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Terminal;
use std::io;
use std::time::Duration;

/// Presents the current trend history as a line chart.
///
/// Each call is a full redraw from the snapshot it is handed; no series
/// state accumulates between calls.
pub trait Renderer {
    fn redraw(&mut self, trend: &TrendStore) -> Result<(), SibylError>;

    /// Whether the operator asked to close the display. The terminal runs
    /// in raw mode, so Ctrl-C arrives here as a key event rather than as a
    /// signal.
    fn poll_quit(&mut self) -> Result<bool, SibylError>;
}

/// Terminal line chart on the alternate screen. Quit with `q` or Ctrl-C.
pub struct TermChart {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    title: String,
    window: Option<usize>,
}

impl TermChart {
    pub fn new(config: &ChartConfig) -> Result<Self, SibylError> {
        let mut stdout = io::stdout();
        if !stdout.is_tty() {
            return Err(SibylError::DisplayUnavailable(io::Error::new(
                io::ErrorKind::Other,
                "stdout is not a terminal",
            )));
        }
        enable_raw_mode().map_err(SibylError::DisplayUnavailable)?;
        execute!(stdout, EnterAlternateScreen).map_err(SibylError::DisplayUnavailable)?;
        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).map_err(SibylError::DisplayUnavailable)?;

        Ok(Self {
            terminal,
            title: config.title.clone(),
            window: config.window,
        })
    }
}

impl Renderer for TermChart {
    fn redraw(&mut self, trend: &TrendStore) -> Result<(), SibylError> {
        let (timestamps, sentiments) = trend.snapshot();
        let first_visible = match self.window {
            Some(window) => timestamps.len().saturating_sub(window),
            None => 0,
        };
        let points: Vec<(f64, f64)> = sentiments
            .iter()
            .enumerate()
            .skip(first_visible)
            .map(|(index, &value)| (index as f64, value))
            .collect();

        let x_lo = points.first().map(|p| p.0).unwrap_or(0.0);
        let x_hi = points.last().map(|p| p.0).unwrap_or(0.0).max(x_lo + 1.0);
        let x_labels: Vec<Span> = match (timestamps.get(first_visible), timestamps.last()) {
            (Some(first), Some(last)) if trend.len() > first_visible + 1 => vec![
                Span::raw(tick_label(first)),
                Span::raw(tick_label(last)),
            ],
            (Some(only), _) => vec![Span::raw(tick_label(only))],
            _ => Vec::new(),
        };
        let title = self.title.clone();

        self.terminal
            .draw(|frame| {
                let dataset = Dataset::default()
                    .name("sentiment")
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::Green))
                    .data(&points);
                let chart = Chart::new(vec![dataset])
                    .block(Block::default().title(title).borders(Borders::ALL))
                    .x_axis(
                        Axis::default()
                            .title("Time")
                            .style(Style::default().fg(Color::Gray))
                            .bounds([x_lo, x_hi])
                            .labels(x_labels),
                    )
                    .y_axis(
                        Axis::default()
                            .title("Sentiment Score")
                            .style(Style::default().fg(Color::Gray))
                            .bounds([0.0, 1.0])
                            .labels(vec![
                                Span::raw("0.0"),
                                Span::raw("0.5"),
                                Span::raw("1.0"),
                            ]),
                    );
                frame.render_widget(chart, frame.size());
            })
            .map_err(SibylError::DisplayUnavailable)?;
        Ok(())
    }

    fn poll_quit(&mut self) -> Result<bool, SibylError> {
        while event::poll(Duration::from_millis(0)).map_err(SibylError::DisplayUnavailable)? {
            let input = event::read().map_err(SibylError::DisplayUnavailable)?;
            if let Event::Key(key) = input {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true)
                    }
                    _ => {}
                }
            }
        }
        Ok(false)
    }
}

impl Drop for TermChart {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Shorten a record timestamp to its time-of-day for axis ticks; labels
/// that do not match the record date format are shown as-is.
fn tick_label(timestamp: &str) -> String {
    NaiveDateTime::parse_from_str(timestamp, RECORD_DATE_FORMAT)
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_label_shortens_record_timestamps() {
        assert_eq!(tick_label("2025-01-29 14:35:20"), "14:35:20");
    }

    #[test]
    fn tick_label_passes_through_unparseable_values() {
        assert_eq!(tick_label("T1"), "T1");
    }
}

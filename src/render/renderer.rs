use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::canvas::{Canvas, CellPaint};
use crate::game::{BoardStatus, Rgb};
use crate::metrics::GameMetrics;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        canvas: &Canvas,
        status: &BoardStatus,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], status, metrics);
        frame.render_widget(stats, chunks[0]);

        let board = self.render_board(chunks[1], canvas);
        frame.render_widget(board, chunks[1]);

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Two terminal columns per cell; outlined cells show brackets in the border color
    fn cell_span(cell: &CellPaint) -> Span<'static> {
        match cell.outline {
            Some(outline) => Span::styled(
                "[]",
                Style::default().fg(color(outline)).bg(color(cell.fill)),
            ),
            None => Span::styled("  ", Style::default().bg(color(cell.fill))),
        }
    }

    fn render_board(&self, _area: Rect, canvas: &Canvas) -> Paragraph<'_> {
        let lines: Vec<Line> = (0..canvas.rows())
            .map(|row| Line::from(canvas.row(row).iter().map(Self::cell_span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        status: &BoardStatus,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

        let text = vec![Line::from(vec![
            label("Length: "),
            Span::styled(
                status.length.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            label("Speed: "),
            value(format!("{}/s", status.tick_rate)),
            Span::raw("    "),
            label("Best: "),
            value(metrics.best_length.to_string()),
            Span::raw("    "),
            label("Resets: "),
            value(status.resets.to_string()),
            Span::raw("    "),
            label("Time: "),
            value(metrics.format_time()),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn status() -> BoardStatus {
        BoardStatus {
            length: 3,
            target_length: 3,
            tick_rate: 12,
            resets: 2,
            ticks: 40,
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_stats_and_cells() {
        let mut canvas = Canvas::new(4, 3, Rgb(0, 0, 0));
        canvas.paint(1, 1, Rgb(0, 255, 0), Some(Rgb(93, 216, 228)));

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|frame| {
                Renderer::new().render(frame, &canvas, &status(), &GameMetrics::new());
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Length: 3"));
        assert!(text.contains("Speed: 12/s"));
        assert!(text.contains("Resets: 2"));
        assert!(text.contains("[]"));
        assert!(text.contains(" Snake "));
    }

    #[test]
    fn test_cell_span_colors() {
        let outlined = Renderer::cell_span(&CellPaint {
            fill: Rgb(255, 0, 0),
            outline: Some(Rgb(1, 2, 3)),
        });
        assert_eq!(outlined.content, "[]");
        assert_eq!(outlined.style.bg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(outlined.style.fg, Some(Color::Rgb(1, 2, 3)));

        let empty = Renderer::cell_span(&CellPaint {
            fill: Rgb(0, 0, 0),
            outline: None,
        });
        assert_eq!(empty.content, "  ");
    }
}

//! Horizontal bar lists for ranked counts (top IPs, paths, attack types).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use minisoc_core::aggregate::BarEntry;
use minisoc_core::format::format_count;

use crate::theme;

const LABEL_WIDTH: usize = 18;
const COUNT_WIDTH: usize = 8;

/// Bar length in cells for a `0.0..=1.0` ratio. A non-zero count always
/// gets at least one cell.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn bar_len(entry: &BarEntry<'_>, budget: usize) -> usize {
    if entry.count == 0 || budget == 0 {
        return 0;
    }
    let len = (entry.ratio * budget as f64).round() as usize;
    len.clamp(1, budget)
}

pub fn bar_lines(entries: &[BarEntry<'_>], width: u16) -> Vec<Line<'static>> {
    let budget = usize::from(width).saturating_sub(LABEL_WIDTH + COUNT_WIDTH + 4);
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let color = theme::CHART_SERIES[i % theme::CHART_SERIES.len()];
            let label: String = entry.label.chars().take(LABEL_WIDTH).collect();
            Line::from(vec![
                Span::styled(
                    format!(" {label:<LABEL_WIDTH$} "),
                    Style::default().fg(theme::DIM_WHITE),
                ),
                Span::styled("█".repeat(bar_len(entry, budget)), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>COUNT_WIDTH$}", format_count(entry.count)),
                    Style::default().fg(theme::DIM_WHITE),
                ),
            ])
        })
        .collect()
}

/// Render a bar list, or `placeholder` when there is nothing to rank.
pub fn render_bars(frame: &mut Frame, area: Rect, entries: &[BarEntry<'_>], placeholder: &str) {
    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new(format!("  {placeholder}")).style(theme::placeholder()),
            area,
        );
        return;
    }
    frame.render_widget(Paragraph::new(bar_lines(entries, area.width)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(count: u64, ratio: f64) -> BarEntry<'static> {
        BarEntry {
            label: "203.0.113.7",
            count,
            ratio,
        }
    }

    #[test]
    fn largest_entry_fills_budget() {
        assert_eq!(bar_len(&entry(40, 1.0), 20), 20);
        assert_eq!(bar_len(&entry(20, 0.5), 20), 10);
    }

    #[test]
    fn small_counts_stay_visible() {
        assert_eq!(bar_len(&entry(1, 0.001), 20), 1);
        assert_eq!(bar_len(&entry(0, 0.0), 20), 0);
    }

    #[test]
    fn line_shows_label_and_count() {
        let lines = bar_lines(&[entry(1234, 1.0)], 60);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with(" 203.0.113.7"));
        assert!(text.ends_with("1,234"));
    }
}

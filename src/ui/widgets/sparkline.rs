//! Temperature sparkline widget for the hourly strip

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different temperatures (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline placing one block per value, centered in equal-width slots
///
/// Blocks are scaled between the lowest and highest value shown, so the
/// hourly columns above line up with their block.
pub struct TemperatureSparkline<'a> {
    /// Temperatures for each slot
    temperatures: &'a [i64],
    /// Style for the blocks
    style: Style,
    /// Style for the warmest slot
    peak_style: Style,
}

impl<'a> TemperatureSparkline<'a> {
    pub fn new(temperatures: &'a [i64]) -> Self {
        Self {
            temperatures,
            style: Style::default().fg(Color::Cyan),
            peak_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn bounds(&self) -> Option<(i64, i64)> {
        let min = *self.temperatures.iter().min()?;
        let max = *self.temperatures.iter().max()?;
        Some((min, max))
    }

    fn temperature_to_block(&self, temperature: i64) -> char {
        let Some((min, max)) = self.bounds() else {
            return BLOCKS[0];
        };
        if max == min {
            return BLOCKS[3];
        }
        let normalized = ((temperature - min) as f64 / (max - min) as f64).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TemperatureSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.temperatures.is_empty() {
            return;
        }

        let slot = area.width / self.temperatures.len() as u16;
        if slot == 0 {
            return;
        }
        let peak = self.bounds().map(|(_, max)| max);

        for (i, temperature) in self.temperatures.iter().enumerate() {
            let block = self.temperature_to_block(*temperature);
            let x = area.x + i as u16 * slot + slot / 2;
            let y = area.y;

            let style = if Some(*temperature) == peak {
                self.peak_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_to_block_minimum() {
        let temps = [10, 15, 20];
        let sparkline = TemperatureSparkline::new(&temps);
        assert_eq!(sparkline.temperature_to_block(10), '▁');
    }

    #[test]
    fn test_temperature_to_block_maximum() {
        let temps = [10, 15, 20];
        let sparkline = TemperatureSparkline::new(&temps);
        assert_eq!(sparkline.temperature_to_block(20), '█');
    }

    #[test]
    fn test_temperature_to_block_flat_series() {
        let temps = [12, 12, 12];
        let sparkline = TemperatureSparkline::new(&temps);
        assert_eq!(sparkline.temperature_to_block(12), '▄');
    }

    #[test]
    fn test_temperature_to_block_out_of_range_clamps() {
        let temps = [0, 10];
        let sparkline = TemperatureSparkline::new(&temps);
        assert_eq!(sparkline.temperature_to_block(30), '█');
        assert_eq!(sparkline.temperature_to_block(-5), '▁');
    }

    #[test]
    fn test_render_places_blocks_in_slot_centers() {
        let temps = [0, 10];
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);

        TemperatureSparkline::new(&temps)
            .style(Style::default().fg(Color::Blue))
            .render(area, &mut buf);

        assert_eq!(buf[(2, 0)].symbol(), "▁");
        assert_eq!(buf[(7, 0)].symbol(), "█");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn test_render_empty_series_is_noop() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        TemperatureSparkline::new(&[]).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}

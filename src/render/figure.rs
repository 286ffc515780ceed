use std::{convert::Infallible, path::Path};

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::Rgb888,
    primitives::Rectangle,
};
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};

use super::{BACKGROUND, Chart, RadarChart, WordCloud};
use crate::{error::AnalyserError, utils};

pub const CELL_WIDTH: u32 = 400;
pub const CELL_HEIGHT: u32 = 360;
pub const WORDCLOUD_HEIGHT: u32 = 320;

const RADAR_ROWS: u32 = 2;

/// Composite figure: two rows of radar charts above one word-cloud row that
/// spans every column.
pub struct Figure {
    display: SimulatorDisplay<Rgb888>,
    total: usize,
    columns: usize,
}

impl Figure {
    /// Blank figure sized for `total` radar charts.
    pub fn new(total: usize) -> Result<Self, AnalyserError> {
        let columns = utils::grid_columns(total).max(1);
        let size = Size::new(
            CELL_WIDTH * columns as u32,
            CELL_HEIGHT * RADAR_ROWS + WORDCLOUD_HEIGHT,
        );
        let mut display = SimulatorDisplay::new(size);
        display.clear(BACKGROUND).map_err(render_error)?;

        Ok(Self {
            display,
            total,
            columns,
        })
    }

    pub fn size(&self) -> Size {
        self.display.size()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Area of the radar chart at `index`.
    pub fn cell(&self, index: usize) -> Rectangle {
        let (row, col) = utils::grid_position(index, self.total);
        Rectangle::new(
            Point::new(
                (col as u32 * CELL_WIDTH) as i32,
                (row as u32 * CELL_HEIGHT) as i32,
            ),
            Size::new(CELL_WIDTH, CELL_HEIGHT),
        )
    }

    pub fn wordcloud_area(&self) -> Rectangle {
        Rectangle::new(
            Point::new(0, (RADAR_ROWS * CELL_HEIGHT) as i32),
            Size::new(self.columns as u32 * CELL_WIDTH, WORDCLOUD_HEIGHT),
        )
    }

    pub fn draw_radar(&mut self, index: usize, chart: &RadarChart) -> Result<(), AnalyserError> {
        if index >= self.total {
            return Err(AnalyserError::Render(format!(
                "chart index {} outside a figure of {} charts",
                index, self.total
            )));
        }

        let area = self.cell(index);
        chart
            .draw(&mut self.display.cropped(&area))
            .map_err(render_error)
    }

    pub fn draw_wordcloud(&mut self, cloud: &WordCloud) -> Result<(), AnalyserError> {
        let area = self.wordcloud_area();
        cloud
            .draw(&mut self.display.cropped(&area))
            .map_err(render_error)
    }

    pub fn display(&self) -> &SimulatorDisplay<Rgb888> {
        &self.display
    }

    /// Writes the figure as PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), AnalyserError> {
        write_png(&self.display, path)
    }

    /// Shows the figure in a window and blocks until it is closed.
    #[cfg(feature = "window")]
    pub fn show(&self, title: &str) {
        let mut window = embedded_graphics_simulator::Window::new(title, &output_settings());
        window.show_static(&self.display);
    }
}

/// Renders the word cloud alone into a PNG of `size`.
pub fn save_wordcloud_png(cloud: &WordCloud, size: Size, path: &Path) -> Result<(), AnalyserError> {
    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(size);
    cloud.draw(&mut display).map_err(render_error)?;
    write_png(&display, path)
}

fn write_png(display: &SimulatorDisplay<Rgb888>, path: &Path) -> Result<(), AnalyserError> {
    display
        .to_rgb_output_image(&output_settings())
        .save_png(path)
        .map_err(|e| AnalyserError::Render(format!("cannot write {}: {}", path.display(), e)))
}

fn output_settings() -> OutputSettings {
    OutputSettingsBuilder::new().scale(1).build()
}

fn render_error(e: Infallible) -> AnalyserError {
    match e {}
}

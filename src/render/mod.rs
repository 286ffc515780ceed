//! # Render Module
//!
//! Draws the analysis results with `embedded-graphics` primitives into an
//! in-memory [`SimulatorDisplay`](embedded_graphics_simulator::SimulatorDisplay):
//!
//! - [`RadarChart`] - one polar chart per playlist summary
//! - [`WordCloud`] - artist names sized by how often they occur
//! - [`Figure`] - the grid holding all charts, exported as PNG and, with the
//!   `window` feature, shown in an SDL window
//!
//! Every chart implements [`Chart`] and draws into whatever target it is
//! handed. The figure crops the display to a grid cell first, so charts work
//! in local coordinates starting at the origin.

mod figure;
mod radar;
mod scaled;
mod wordcloud;

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888};

pub use figure::{CELL_HEIGHT, CELL_WIDTH, Figure, WORDCLOUD_HEIGHT, save_wordcloud_png};
pub use radar::RadarChart;
pub use scaled::Scaled;
pub use wordcloud::{PlacedWord, WordCloud};

pub const BACKGROUND: Rgb888 = Rgb888::new(255, 255, 255);
pub const TEXT: Rgb888 = Rgb888::new(0, 0, 0);
pub const LABEL: Rgb888 = Rgb888::new(128, 128, 128);
pub const GRID: Rgb888 = Rgb888::new(204, 204, 204);

pub trait Chart {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, target: &mut D) -> Result<(), D::Error>;
}

use std::f32::consts::PI;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, Point},
    mono_font::{MonoTextStyle, ascii::FONT_9X15_BOLD, iso_8859_1::FONT_6X10},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, Polyline, PrimitiveStyle, Triangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use super::{BACKGROUND, Chart, GRID, LABEL, TEXT};
use crate::{
    types::{Feature, FeatureSummary},
    utils,
};

const TITLE_HEIGHT: i32 = 24;
const LABEL_ROOM: i32 = 50;
const LABEL_GAP: f32 = 8.0;
const FILL_ALPHA: f32 = 0.5;
const RINGS: [f64; 3] = [25.0, 50.0, 75.0];
const SCALE_MAX: f64 = 100.0;

/// Polar chart of one playlist's feature means.
///
/// Axis `k` of six sits at angle `k/6 · 2π`, counter-clockwise from the
/// positive x axis. Values are on a 0-100 scale.
pub struct RadarChart {
    title: String,
    color: Rgb888,
    values: Option<[f64; 6]>,
}

impl RadarChart {
    pub fn new(title: impl Into<String>, color: Rgb888, summary: &FeatureSummary) -> Self {
        let title = title.into();
        let values = summary.values(&title).ok();
        Self {
            title,
            color,
            values,
        }
    }

    pub fn has_data(&self) -> bool {
        self.values.is_some()
    }

    /// Angle of axis `k` in radians.
    pub fn axis_angle(k: usize) -> f32 {
        k as f32 / Feature::ALL.len() as f32 * 2.0 * PI
    }

    /// Screen position of `value` on axis `k` for a chart centred at `center`.
    pub fn project(center: Point, radius: f32, k: usize, value: f64) -> Point {
        let r = radius * (value.clamp(0.0, SCALE_MAX) / SCALE_MAX) as f32;
        let angle = Self::axis_angle(k);
        Point::new(
            center.x + (r * angle.cos()).round() as i32,
            center.y - (r * angle.sin()).round() as i32,
        )
    }

    /// Closed outline of the values, first point repeated at the end.
    pub fn polygon(center: Point, radius: f32, values: &[f64; 6]) -> Vec<Point> {
        let mut points: Vec<Point> = values
            .iter()
            .enumerate()
            .map(|(k, v)| Self::project(center, radius, k, *v))
            .collect();
        points.push(points[0]);
        points
    }

    fn geometry<D: DrawTarget>(target: &D) -> (Point, f32) {
        let area = target.bounding_box();
        let width = area.size.width as i32;
        let height = area.size.height as i32 - TITLE_HEIGHT;
        let center = area.top_left + Point::new(width / 2, TITLE_HEIGHT + height / 2);
        let radius = (width.min(height) / 2 - LABEL_ROOM).max(10) as f32;
        (center, radius)
    }

    fn draw_title<D: DrawTarget<Color = Rgb888>>(&self, target: &mut D) -> Result<(), D::Error> {
        let area = target.bounding_box();
        let style = MonoTextStyle::new(&FONT_9X15_BOLD, TEXT);
        let layout = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        Text::with_text_style(
            &self.title,
            area.top_left + Point::new(area.size.width as i32 / 2, 4),
            style,
            layout,
        )
        .draw(target)?;
        Ok(())
    }

    fn draw_fill<D: DrawTarget<Color = Rgb888>>(
        &self,
        target: &mut D,
        center: Point,
        points: &[Point],
    ) -> Result<(), D::Error> {
        let fill = PrimitiveStyle::with_fill(utils::blend(self.color, BACKGROUND, FILL_ALPHA));
        // values are radial, so the polygon is star-shaped around the centre
        for pair in points.windows(2) {
            Triangle::new(center, pair[0], pair[1])
                .into_styled(fill)
                .draw(target)?;
        }
        Ok(())
    }

    fn draw_grid<D: DrawTarget<Color = Rgb888>>(
        target: &mut D,
        center: Point,
        radius: f32,
    ) -> Result<(), D::Error> {
        let grid = PrimitiveStyle::with_stroke(GRID, 1);
        let tick_style = MonoTextStyle::new(&FONT_6X10, LABEL);

        for ring in RINGS {
            let r = (radius * (ring / SCALE_MAX) as f32).round() as u32;
            Circle::with_center(center, r * 2 + 1)
                .into_styled(grid)
                .draw(target)?;
            Text::with_baseline(
                &format!("{}%", ring as u32),
                Point::new(center.x + r as i32 + 2, center.y - 2),
                tick_style,
                Baseline::Bottom,
            )
            .draw(target)?;
        }

        Circle::with_center(center, radius.round() as u32 * 2 + 1)
            .into_styled(PrimitiveStyle::with_stroke(LABEL, 1))
            .draw(target)?;

        for k in 0..Feature::ALL.len() {
            Line::new(center, Self::project(center, radius, k, SCALE_MAX))
                .into_styled(grid)
                .draw(target)?;
        }
        Ok(())
    }

    fn draw_axis_labels<D: DrawTarget<Color = Rgb888>>(
        target: &mut D,
        center: Point,
        radius: f32,
    ) -> Result<(), D::Error> {
        let style = MonoTextStyle::new(&FONT_6X10, LABEL);
        for (k, feature) in Feature::ALL.iter().enumerate() {
            let angle = Self::axis_angle(k);
            let (sin, cos) = angle.sin_cos();
            let position = Point::new(
                center.x + ((radius + LABEL_GAP) * cos).round() as i32,
                center.y - ((radius + LABEL_GAP) * sin).round() as i32,
            );
            let alignment = if cos > 0.3 {
                Alignment::Left
            } else if cos < -0.3 {
                Alignment::Right
            } else {
                Alignment::Center
            };
            let baseline = if sin > 0.3 {
                Baseline::Bottom
            } else if sin < -0.3 {
                Baseline::Top
            } else {
                Baseline::Middle
            };
            let layout = TextStyleBuilder::new()
                .alignment(alignment)
                .baseline(baseline)
                .build();
            Text::with_text_style(feature.label(), position, style, layout).draw(target)?;
        }
        Ok(())
    }

    fn draw_no_data<D: DrawTarget<Color = Rgb888>>(
        target: &mut D,
        center: Point,
    ) -> Result<(), D::Error> {
        let layout = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            "no data",
            center,
            MonoTextStyle::new(&FONT_6X10, TEXT),
            layout,
        )
        .draw(target)?;
        Ok(())
    }
}

impl Chart for RadarChart {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, target: &mut D) -> Result<(), D::Error> {
        let (center, radius) = Self::geometry(target);
        self.draw_title(target)?;

        let outline = self.values.map(|v| Self::polygon(center, radius, &v));
        if let Some(points) = &outline {
            self.draw_fill(target, center, points)?;
        }

        Self::draw_grid(target, center, radius)?;
        Self::draw_axis_labels(target, center, radius)?;

        match &outline {
            Some(points) => {
                Polyline::new(points)
                    .into_styled(PrimitiveStyle::with_stroke(self.color, 1))
                    .draw(target)?;
            }
            None => Self::draw_no_data(target, center)?,
        }

        Ok(())
    }
}

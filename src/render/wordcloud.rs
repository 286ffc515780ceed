use std::collections::BTreeMap;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, Point, Size},
    mono_font::{MonoTextStyle, iso_8859_1::FONT_6X10},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{BACKGROUND, Chart, Scaled};
use crate::utils;

const GLYPH_WIDTH: u32 = 6;
const GLYPH_HEIGHT: u32 = 10;
const RELATIVE_SCALING: f64 = 0.5;
const MARGIN: i32 = 2;
const SPIRAL_STEP: f32 = 0.05;
const SPIRAL_GROWTH: f32 = 1.5;

/// A word positioned on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub position: Point,
    pub scale: u32,
    pub color: Rgb888,
}

impl PlacedWord {
    /// Rendered glyph height in pixels.
    pub fn font_size(&self) -> u32 {
        GLYPH_HEIGHT * self.scale
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.position, text_size(&self.text, self.scale))
    }
}

/// Word cloud of label frequencies.
///
/// Larger counts get larger glyphs. Layout is deterministic for a given seed.
///
/// Glyphs come from the ISO 8859-1 bitmap font, so only Latin-1 text renders
/// as written. Characters outside it, such as CJK or Cyrillic artist names,
/// are drawn as the font's replacement glyph.
pub struct WordCloud {
    frequencies: Vec<(String, usize)>,
    pub max_words: usize,
    pub max_font_size: u32,
    pub background: Rgb888,
    pub seed: u64,
}

impl WordCloud {
    pub fn new(frequencies: &BTreeMap<String, usize>) -> Self {
        let mut words: Vec<(String, usize)> = frequencies
            .iter()
            .filter(|(word, count)| **count > 0 && !word.trim().is_empty())
            .map(|(word, count)| (word.clone(), *count))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            frequencies: words,
            max_words: 100,
            max_font_size: 50,
            background: BACKGROUND,
            seed: 42,
        }
    }

    /// Places the words on a canvas of `size`.
    ///
    /// The first word gets `max_font_size`; each following one is scaled
    /// from its predecessor by `0.5 · count/previous_count + 0.5`. A word that
    /// does not fit is retried one scale step smaller; when even the smallest
    /// glyphs do not fit, layout stops.
    pub fn layout(&self, size: Size) -> Vec<PlacedWord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let max_scale = (self.max_font_size / GLYPH_HEIGHT).max(1);
        let canvas = Rectangle::new(Point::zero(), size);

        let mut placed: Vec<PlacedWord> = Vec::new();
        let mut font_size = self.max_font_size as f64;
        let mut last_count: Option<usize> = None;

        for (word, count) in self.frequencies.iter().take(self.max_words) {
            if let Some(last) = last_count {
                font_size *= RELATIVE_SCALING * (*count as f64 / last as f64) + (1.0 - RELATIVE_SCALING);
            }

            let mut scale = ((font_size / GLYPH_HEIGHT as f64).round() as u32).clamp(1, max_scale);
            let start_angle = rng.random_range(0.0..std::f32::consts::TAU);
            let position = loop {
                let found = find_position(canvas, text_size(word, scale), &placed, start_angle);
                if found.is_some() || scale == 1 {
                    break found;
                }
                scale -= 1;
            };

            let Some(position) = position else {
                break;
            };

            let hue = rng.random_range(0.0..360.0);
            placed.push(PlacedWord {
                text: word.clone(),
                count: *count,
                position,
                scale,
                color: utils::hsv_to_rgb(hue, 0.85, 0.8),
            });
            last_count = Some(*count);
        }

        placed
    }
}

impl Chart for WordCloud {
    fn draw<D: DrawTarget<Color = Rgb888>>(&self, target: &mut D) -> Result<(), D::Error> {
        let area = target.bounding_box();
        target.fill_solid(&area, self.background)?;

        for word in self.layout(area.size) {
            let style = MonoTextStyle::new(&FONT_6X10, word.color);
            let mut scaled = Scaled::new(&mut *target, area.top_left + word.position, word.scale);
            Text::with_baseline(&word.text, Point::zero(), style, Baseline::Top)
                .draw(&mut scaled)?;
        }
        Ok(())
    }
}

fn text_size(text: &str, scale: u32) -> Size {
    Size::new(
        text.chars().count() as u32 * GLYPH_WIDTH * scale,
        GLYPH_HEIGHT * scale,
    )
}

/// First free spot along an Archimedean spiral from the canvas centre.
fn find_position(
    canvas: Rectangle,
    size: Size,
    placed: &[PlacedWord],
    start_angle: f32,
) -> Option<Point> {
    if size.width > canvas.size.width || size.height > canvas.size.height {
        return None;
    }

    let center = canvas.center();
    let half = Point::new(size.width as i32 / 2, size.height as i32 / 2);
    let aspect = canvas.size.height as f32 / canvas.size.width as f32;
    let max_radius = (canvas.size.width.max(canvas.size.height)) as f32;

    let mut theta = 0.0f32;
    loop {
        let radius = SPIRAL_GROWTH * theta;
        if radius > max_radius {
            return None;
        }

        let angle = start_angle + theta;
        let candidate = center
            + Point::new(
                (radius * angle.cos()).round() as i32,
                (radius * angle.sin() * aspect).round() as i32,
            )
            - half;
        let rect = Rectangle::new(candidate, size);

        if contains(canvas, rect) && placed.iter().all(|w| !overlaps(&w.bounds(), &rect)) {
            return Some(candidate);
        }

        theta += SPIRAL_STEP;
    }
}

fn contains(outer: Rectangle, inner: Rectangle) -> bool {
    inner.top_left.x >= outer.top_left.x
        && inner.top_left.y >= outer.top_left.y
        && inner.top_left.x + inner.size.width as i32 <= outer.top_left.x + outer.size.width as i32
        && inner.top_left.y + inner.size.height as i32
            <= outer.top_left.y + outer.size.height as i32
}

fn overlaps(a: &Rectangle, b: &Rectangle) -> bool {
    a.top_left.x - MARGIN < b.top_left.x + b.size.width as i32
        && b.top_left.x - MARGIN < a.top_left.x + a.size.width as i32
        && a.top_left.y - MARGIN < b.top_left.y + b.size.height as i32
        && b.top_left.y - MARGIN < a.top_left.y + a.size.height as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frequencies(entries: &[(&str, usize)]) -> BTreeMap<String, usize> {
        entries
            .iter()
            .map(|(word, count)| (word.to_string(), *count))
            .collect()
    }

    #[test]
    fn most_frequent_word_gets_largest_font() {
        let cloud = WordCloud::new(&frequencies(&[("Adele", 1), ("Queen", 8), ("Muse", 3)]));
        let words = cloud.layout(Size::new(800, 300));

        assert_eq!(words[0].text, "Queen");
        assert_eq!(words[0].font_size(), 50);
        assert!(words.iter().all(|w| w.font_size() <= words[0].font_size()));
    }

    #[test]
    fn words_never_overlap_and_stay_on_canvas() {
        let entries: Vec<(String, usize)> = (0..60)
            .map(|i| (format!("Artist {}", i), 60 - i))
            .collect();
        let map: BTreeMap<String, usize> = entries.into_iter().collect();
        let canvas = Rectangle::new(Point::zero(), Size::new(800, 300));

        let words = WordCloud::new(&map).layout(canvas.size);
        assert!(!words.is_empty());
        for (i, a) in words.iter().enumerate() {
            assert!(contains(canvas, a.bounds()));
            for b in &words[i + 1..] {
                assert!(!overlaps(&a.bounds(), &b.bounds()), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn respects_max_words_and_max_font_size() {
        let map: BTreeMap<String, usize> = (0..150).map(|i| (format!("a{}", i), 1)).collect();
        let mut cloud = WordCloud::new(&map);
        cloud.max_font_size = 30;

        let words = cloud.layout(Size::new(2000, 2000));
        assert!(words.len() <= 100);
        assert!(words.iter().all(|w| w.font_size() <= 30));
    }

    #[test]
    fn layout_is_deterministic() {
        let map = frequencies(&[("Björk", 4), ("Sigur Rós", 2), ("Múm", 1)]);
        let cloud = WordCloud::new(&map);
        assert_eq!(cloud.layout(Size::new(400, 200)), cloud.layout(Size::new(400, 200)));
    }

    #[test]
    fn empty_frequencies_place_nothing() {
        let cloud = WordCloud::new(&BTreeMap::new());
        assert!(cloud.layout(Size::new(400, 200)).is_empty());
    }
}

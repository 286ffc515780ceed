use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{Dimensions, Point, Size},
    primitives::Rectangle,
};

/// Draw target that magnifies everything drawn into it by an integer factor.
///
/// Each source pixel becomes a `factor × factor` block at
/// `origin + point · factor` on the wrapped target. Used to draw bitmap fonts
/// larger than their native size.
pub struct Scaled<'a, D> {
    target: &'a mut D,
    origin: Point,
    factor: u32,
}

impl<'a, D: DrawTarget> Scaled<'a, D> {
    pub fn new(target: &'a mut D, origin: Point, factor: u32) -> Self {
        Self {
            target,
            origin,
            factor: factor.max(1),
        }
    }
}

impl<D: DrawTarget> Dimensions for Scaled<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let outer = self.target.bounding_box();
        Rectangle::new(
            Point::zero(),
            Size::new(outer.size.width / self.factor, outer.size.height / self.factor),
        )
    }
}

impl<D: DrawTarget> DrawTarget for Scaled<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new_equal(self.factor);
        for Pixel(point, color) in pixels {
            let top_left = self.origin + point * self.factor as i32;
            self.target
                .fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}

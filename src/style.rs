use crate::geometry::Color;

/// Horizontal placement of each line's background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Flush with the container's leading edge (x = 0).
    #[default]
    Start,
    Center,
    /// Flush with the container's trailing edge (`Line::right`).
    End,
}

impl Alignment {
    /// Computes `(left, right)` of a line background from its drawn width.
    ///
    /// `right` is the right bound of the text container; padding extends the
    /// background past the flush edge so the text keeps its inset.
    pub fn horizontal_bounds(self, drawn_width: f32, right: f32, padding: f32) -> (f32, f32) {
        match self {
            Alignment::Start => {
                let left = -padding;
                (left, left + drawn_width)
            }
            Alignment::End => {
                let edge = right + padding;
                (edge - drawn_width, edge)
            }
            Alignment::Center => {
                let left = (right - drawn_width) / 2.0;
                (left, right - left)
            }
        }
    }
}

/// Style of the filled background.
///
/// The values are read once per pass; changing them means starting a new pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleConfig {
    pub fill_color: Color,
    /// Added on both sides of the measured text width.
    pub padding: f32,
    pub corner_radius: f32,
    pub alignment: Alignment,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fill_color: Color::BLUE.with_alpha(0.5),
            padding: 5.0,
            corner_radius: 5.0,
            alignment: Alignment::Start,
        }
    }
}

impl StyleConfig {
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Padding and radius proportional to the screen width, in pixels.
    ///
    /// `density` converts density-independent units to pixels.
    pub fn scaled_to_width(self, screen_width: f32, density: f32) -> Self {
        self.with_padding((screen_width / 34.0).floor() * density)
            .with_corner_radius((screen_width / 54.0).floor() * density)
    }

    /// Clamps negative or non-finite padding and radius to zero.
    pub fn sanitized(mut self) -> Self {
        self.padding = non_negative("padding", self.padding);
        self.corner_radius = non_negative("corner_radius", self.corner_radius);
        self
    }
}

/// Style of the bordered variant: an outer ring with an inner cutout on top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineStyle {
    pub outer_color: Color,
    pub inner_color: Color,
    /// Padding of the inner cutout around the text.
    pub inner_padding: f32,
    /// Padding of the outer ring around the text; must not be smaller than
    /// `inner_padding`.
    pub outer_padding: f32,
    pub corner_radius: f32,
    pub alignment: Alignment,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            outer_color: Color::BLUE,
            inner_color: Color::RED,
            inner_padding: 5.0,
            outer_padding: 10.0,
            corner_radius: 5.0,
            alignment: Alignment::Start,
        }
    }
}

impl OutlineStyle {
    /// Thickness of the visible ring on every side of the cutout.
    pub fn ring_width(&self) -> f32 {
        (self.outer_padding - self.inner_padding).max(0.0)
    }

    /// Style of the inner cutout; the stepper runs on this one.
    pub fn inner(&self) -> StyleConfig {
        StyleConfig {
            fill_color: self.inner_color,
            padding: self.inner_padding,
            corner_radius: self.corner_radius,
            alignment: self.alignment,
        }
    }

    pub fn sanitized(mut self) -> Self {
        self.inner_padding = non_negative("inner_padding", self.inner_padding);
        self.outer_padding = non_negative("outer_padding", self.outer_padding);
        self.corner_radius = non_negative("corner_radius", self.corner_radius);
        if self.outer_padding < self.inner_padding {
            log::warn!(
                "outer_padding {} is smaller than inner_padding {}; ring collapses",
                self.outer_padding,
                self.inner_padding
            );
            self.outer_padding = self.inner_padding;
        }
        self
    }
}

fn non_negative(name: &str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{name} {value} is not a non-negative finite value; using 0");
        0.0
    }
}

//! Shape-dependent layout tables
//!
//! The panel is 240x240 either way; what differs is the glass fitted over
//! it. Round glass pushes everything toward the center, rectangular glass
//! can use the corners. All anchors are fixed offsets; nothing is measured
//! or centered at draw time.

/// Panel width in pixels
pub const DISPLAY_WIDTH: i32 = 240;

/// Panel height in pixels
pub const DISPLAY_HEIGHT: i32 = 240;

/// Glass shape fitted over the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    Round,
    Rectangular,
}

/// Pixel anchors for every face element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Time text anchor (top-left of the glyph run)
    pub time_x: i32,
    pub time_y: i32,
    /// Date line anchor
    pub date_x: i32,
    pub date_y: i32,
    /// Divider line: horizontal span at a fixed height
    pub divider_start_x: i32,
    pub divider_end_x: i32,
    pub divider_y: i32,
    /// Condition icon anchor (top-left)
    pub icon_x: i32,
    pub icon_y: i32,
    /// High/low temperature anchors on a shared baseline
    pub high_x: i32,
    pub low_x: i32,
    pub temps_y: i32,
}

const ROUND: Layout = Layout {
    time_x: 62,
    time_y: 78,
    date_x: 56,
    date_y: 122,
    // Divider spans the middle half of the panel
    divider_start_x: 60,
    divider_end_x: 180,
    divider_y: 142,
    icon_x: 44,
    icon_y: 158,
    high_x: 104,
    low_x: 164,
    temps_y: 168,
};

const RECTANGULAR: Layout = Layout {
    time_x: 48,
    time_y: 64,
    date_x: 44,
    date_y: 110,
    divider_start_x: 60,
    divider_end_x: 180,
    divider_y: 132,
    icon_x: 28,
    icon_y: 152,
    high_x: 96,
    low_x: 164,
    temps_y: 162,
};

impl Layout {
    /// Look up the anchor table for a glass shape
    pub const fn for_shape(shape: Shape) -> &'static Layout {
        match shape {
            Shape::Round => &ROUND,
            Shape::Rectangular => &RECTANGULAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_have_distinct_tables() {
        let round = Layout::for_shape(Shape::Round);
        let rect = Layout::for_shape(Shape::Rectangular);
        assert_ne!(round, rect);
    }

    #[test]
    fn test_anchors_are_on_panel() {
        for shape in [Shape::Round, Shape::Rectangular] {
            let layout = Layout::for_shape(shape);
            for x in [
                layout.time_x,
                layout.date_x,
                layout.divider_start_x,
                layout.divider_end_x,
                layout.icon_x,
                layout.high_x,
                layout.low_x,
            ] {
                assert!((0..DISPLAY_WIDTH).contains(&x));
            }
            for y in [
                layout.time_y,
                layout.date_y,
                layout.divider_y,
                layout.icon_y,
                layout.temps_y,
            ] {
                assert!((0..DISPLAY_HEIGHT).contains(&y));
            }
        }
    }

    #[test]
    fn test_divider_spans_middle_half() {
        for shape in [Shape::Round, Shape::Rectangular] {
            let layout = Layout::for_shape(shape);
            assert_eq!(layout.divider_start_x, DISPLAY_WIDTH / 4);
            assert_eq!(layout.divider_end_x, DISPLAY_WIDTH * 3 / 4);
        }
    }
}

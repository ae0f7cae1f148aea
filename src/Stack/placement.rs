use serde::Deserialize;

/// Screen corner the popup stack grows away from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn is_right(self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomRight)
    }

    fn is_bottom(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }
}

/// Where popups go on screen, before stacking is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub corner: Corner,
    /// Horizontal distance from the anchor corner.
    pub pos_x: u32,
    /// Vertical distance from the anchor corner for the first popup.
    pub pos_y: u32,
    pub border_size: u32,
}

impl Placement {
    /// Top-left window origin for a popup of `size` that claimed `stacked_offset`.
    ///
    /// Pure function of the screen size, the anchor corner, the base offset and
    /// the stacking offset. May go negative on screens too small for the popup.
    pub fn origin(&self, screen: (u32, u32), size: (u32, u32), stacked_offset: u32) -> (i32, i32) {
        let (screen_width, screen_height) = (i64::from(screen.0), i64::from(screen.1));
        let (width, height) = (i64::from(size.0), i64::from(size.1));
        let borders = 2 * i64::from(self.border_size);

        let mut x = i64::from(self.pos_x);
        let mut y = i64::from(self.pos_y) + i64::from(stacked_offset);

        if self.corner.is_right() {
            x = screen_width - width - borders - x;
        }
        if self.corner.is_bottom() {
            y = screen_height - height - borders - y;
        }

        (clamp_i32(x), clamp_i32(y))
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(corner: Corner) -> Placement {
        Placement {
            corner,
            pos_x: 30,
            pos_y: 60,
            border_size: 2,
        }
    }

    #[test]
    fn top_left_is_base_plus_stack() {
        let origin = placement(Corner::TopLeft).origin((1920, 1080), (450, 100), 0);
        assert_eq!(origin, (30, 60));

        let stacked = placement(Corner::TopLeft).origin((1920, 1080), (450, 100), 115);
        assert_eq!(stacked, (30, 175));
    }

    #[test]
    fn top_right_mirrors_horizontally() {
        let origin = placement(Corner::TopRight).origin((1920, 1080), (450, 100), 115);
        assert_eq!(origin, (1920 - 450 - 4 - 30, 175));
    }

    #[test]
    fn bottom_corners_grow_upwards() {
        let first = placement(Corner::BottomLeft).origin((1920, 1080), (450, 100), 0);
        let second = placement(Corner::BottomLeft).origin((1920, 1080), (450, 100), 115);
        assert_eq!(first, (30, 1080 - 100 - 4 - 60));
        assert_eq!(second.1, first.1 - 115);

        let br = placement(Corner::BottomRight).origin((1920, 1080), (450, 100), 0);
        assert_eq!(br, (1920 - 450 - 4 - 30, 1080 - 100 - 4 - 60));
    }

    #[test]
    fn tiny_screen_goes_negative() {
        let origin = placement(Corner::BottomRight).origin((100, 100), (450, 100), 0);
        assert!(origin.0 < 0);
        assert!(origin.1 < 0);
    }
}

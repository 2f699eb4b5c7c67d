//! Core geometry types shared by resources and instances

use std::fmt;
use std::str::FromStr;

use crate::error::ResourceError;

/// Largest magnitude accepted for a configured coordinate or size
pub const MAX_COORDINATE: i32 = 1 << 24;

/// A 2D point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Center point, rounded toward the origin like integer screen rects
    pub fn center(&self) -> Point {
        Point::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// Check if this rectangle contains a point (right and bottom edges excluded)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Check if this rectangle overlaps another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Position a rectangle of `size` so that its `align` anchor sits on `pos`
    ///
    /// Coordinates saturate at the `i32` bounds.
    pub fn anchored(pos: Point, size: Size, align: Align) -> Self {
        let (dx, dy) = align.offset(size);
        Self::new(
            pos.x.saturating_sub(dx),
            pos.y.saturating_sub(dy),
            size.width,
            size.height,
        )
    }

    /// The point that `anchored` would place on `align`; its exact inverse
    pub fn anchor_point(&self, align: Align) -> Point {
        let (dx, dy) = align.offset(self.size());
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Center a rectangle of `size` inside this one
    pub fn centered(&self, size: Size) -> Rect {
        Rect::anchored(self.center(), size, Align::Center)
    }
}

/// Nine-point anchor used to place a rectangle relative to a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Align {
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    #[default]
    NorthWest,
}

impl Align {
    pub const ALL: [Align; 9] = [
        Align::Center,
        Align::North,
        Align::NorthEast,
        Align::East,
        Align::SouthEast,
        Align::South,
        Align::SouthWest,
        Align::West,
        Align::NorthWest,
    ];

    /// Distance from a rect's top-left corner to this anchor
    fn offset(self, size: Size) -> (i32, i32) {
        let (w, h) = (size.width, size.height);
        match self {
            Align::NorthWest => (0, 0),
            Align::North => (w / 2, 0),
            Align::NorthEast => (w, 0),
            Align::West => (0, h / 2),
            Align::Center => (w / 2, h / 2),
            Align::East => (w, h / 2),
            Align::SouthWest => (0, h),
            Align::South => (w / 2, h),
            Align::SouthEast => (w, h),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Center => "center",
            Align::North => "n",
            Align::NorthEast => "ne",
            Align::East => "e",
            Align::SouthEast => "se",
            Align::South => "s",
            Align::SouthWest => "sw",
            Align::West => "w",
            Align::NorthWest => "nw",
        }
    }
}

impl FromStr for Align {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Align::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Align::ALL.iter().map(|a| a.as_str()).collect();
                ResourceError::configuration(format!(
                    "unknown alignment '{}' (valid: {})",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color variants for interactive shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSet {
    pub active: Color,
    pub inactive: Color,
    pub border: Color,
}

impl Default for ColorSet {
    fn default() -> Self {
        Self {
            active: Color::BLACK,
            inactive: Color::RED,
            border: Color::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_center() {
        let r = Rect::new(10, 20, 100, 40);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.center(), Point::new(60, 40));
    }

    #[test]
    fn test_contains_excludes_far_edges() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 5)));
    }

    #[test]
    fn test_anchored_all_points() {
        let pos = Point::new(100, 100);
        let size = Size::new(20, 10);
        let cases = [
            (Align::NorthWest, (100, 100)),
            (Align::North, (90, 100)),
            (Align::NorthEast, (80, 100)),
            (Align::West, (100, 95)),
            (Align::Center, (90, 95)),
            (Align::East, (80, 95)),
            (Align::SouthWest, (100, 90)),
            (Align::South, (90, 90)),
            (Align::SouthEast, (80, 90)),
        ];
        for (align, (x, y)) in cases {
            let r = Rect::anchored(pos, size, align);
            assert_eq!((r.x, r.y), (x, y), "anchor {}", align);
            assert_eq!(r.size(), size);
        }
    }

    #[test]
    fn test_anchor_point_inverts_anchored() {
        let rect = Rect::new(7, 3, 21, 11);
        for align in Align::ALL {
            let pos = rect.anchor_point(align);
            assert_eq!(Rect::anchored(pos, rect.size(), align), rect, "anchor {}", align);
        }
    }

    #[test]
    fn test_align_parse_round_trip() {
        for align in Align::ALL {
            assert_eq!(align.as_str().parse::<Align>().unwrap(), align);
        }
    }

    #[test]
    fn test_align_parse_unknown() {
        let err = "middle".parse::<Align>().unwrap_err();
        assert!(matches!(err, ResourceError::Configuration { .. }));
        assert!(err.to_string().contains("middle"));
    }

    #[test]
    fn test_rect_math_saturates() {
        let wide = Rect::new(2_000_000_000, 0, 2_000_000_000, 10);
        assert_eq!(wide.right(), i32::MAX);
        assert_eq!(wide.center(), Point::new(i32::MAX, 5));
        assert!(!wide.contains(Point::new(0, 0)));

        let r = Rect::anchored(Point::new(i32::MIN, 0), Size::new(100, 100), Align::SouthEast);
        assert_eq!((r.x, r.y), (i32::MIN, -100));
        assert_eq!(r.anchor_point(Align::Center), Point::new(i32::MIN + 50, -50));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&Rect::new(0, 20, 5, 5)));
    }

    #[test]
    fn test_centered() {
        let outer = Rect::new(0, 0, 100, 50);
        assert_eq!(outer.centered(Size::new(20, 10)), Rect::new(40, 20, 20, 10));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::new(255, 0, 16).to_string(), "#ff0010");
    }
}

//! Geometric primitives for page-space layout.
//!
//! Coordinates follow the rendered-page convention used by the fragment
//! source: the origin is the top-left corner and `y` grows downwards, so a
//! smaller `top()` means higher on the page.

/// A rectangle in page space (points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiz_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points `(x0, y0)` and `(x1, y1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiz_oxide::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.y, 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check whether this rectangle horizontally overlaps the open band
    /// `(start, end)`.
    ///
    /// Touching edges do not count as overlap, so a fragment ending exactly
    /// on the band start is outside it.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiz_oxide::geometry::Rect;
    ///
    /// let rect = Rect::from_points(280.0, 0.0, 320.0, 10.0);
    /// assert!(rect.overlaps_x_band(0.0, 300.0));
    /// assert!(rect.overlaps_x_band(300.0, 600.0));
    /// assert!(!rect.overlaps_x_band(320.0, 600.0));
    /// ```
    pub fn overlaps_x_band(&self, start: f32, end: f32) -> bool {
        self.left() < end && self.right() > start
    }

    /// Check if this rectangle intersects with another.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Compute the overlapping region of two rectangles.
    ///
    /// Returns `None` when they do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiz_oxide::geometry::Rect;
    ///
    /// let page = Rect::new(0.0, 0.0, 600.0, 800.0);
    /// let clip = Rect::from_points(-5.0, 790.0, 100.0, 900.0);
    /// let clamped = clip.intersection(&page).unwrap();
    /// assert_eq!(clamped, Rect::from_points(0.0, 790.0, 100.0, 800.0));
    /// ```
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect::from_points(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        ))
    }

    /// Whether the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Scale position and size by a uniform factor.
    pub fn scale(&self, factor: f32) -> Rect {
        Rect::new(self.x * factor, self.y * factor, self.width * factor, self.height * factor)
    }

    /// Compute the area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

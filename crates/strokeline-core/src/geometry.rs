//! Surface-local geometry.
//!
//! Points are plain `kurbo` points in surface pixels; a segment is a
//! `kurbo::Line` from the last committed point to the next queued one.

pub use kurbo::Point;

/// One rendered straight line between two consecutive points.
pub type Segment = kurbo::Line;

/// Map a client-space position into surface-local coordinates, given the
/// surface's current on-screen top-left offset.
pub fn to_local(client: Point, offset: Point) -> Point {
    client - offset.to_vec2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtracts_surface_offset() {
        let local = to_local(Point::new(110.0, 65.5), Point::new(100.0, 50.0));
        assert_eq!(local, Point::new(10.0, 15.5));
    }

    #[test]
    fn offset_past_pointer_goes_negative() {
        // Pointer left of / above the surface still maps; nothing clamps.
        let local = to_local(Point::new(5.0, 5.0), Point::new(20.0, 8.0));
        assert_eq!(local, Point::new(-15.0, -3.0));
    }
}

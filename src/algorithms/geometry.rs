//! Planar distance and bounding-box helpers

use crate::core::Point;

/// Euclidean distance between two points
pub fn distance(p: &Point, q: &Point) -> f64 {
    (p.to_vector2() - q.to_vector2()).norm()
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Box spanning a single point
    pub fn from_point(p: &Point) -> Self {
        Self {
            min_x: p.x,
            max_x: p.x,
            min_y: p.y,
            max_y: p.y,
        }
    }

    /// Smallest box enclosing every point, `None` for an empty input
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_point(first), |bbox, p| bbox.expanded_to(p)))
    }

    /// Grow the box so it also covers `p`
    pub fn expanded_to(self, p: &Point) -> Self {
        Self {
            min_x: self.min_x.min(p.x),
            max_x: self.max_x.max(p.x),
            min_y: self.min_y.min(p.y),
            max_y: self.max_y.max(p.y),
        }
    }

    /// Smallest box enclosing both boxes
    pub fn union(self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Inclusive containment test
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Whether `other` lies entirely inside this box
    pub fn contains_box(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let p = Point::new(0.0, 0.0);
        let q = Point::new(3.0, 4.0);
        assert!((distance(&p, &q) - 5.0).abs() < 1e-10);
        assert!((distance(&q, &p) - 5.0).abs() < 1e-10);
        assert_eq!(distance(&q, &q), 0.0);
    }

    #[test]
    fn test_enclosing_box() {
        let points = vec![Point::new(1.0, 5.0), Point::new(-2.0, 3.0), Point::new(4.0, -1.0)];
        let bbox = BoundingBox::enclosing(&points).unwrap();

        assert_eq!(bbox, BoundingBox { min_x: -2.0, max_x: 4.0, min_y: -1.0, max_y: 5.0 });
        assert_eq!(bbox.center(), Point::new(1.0, 2.0));
        assert_eq!(bbox.width(), 6.0);
        assert_eq!(bbox.height(), 6.0);
        assert!(points.iter().all(|p| bbox.contains(p)));
    }

    #[test]
    fn test_empty_input_has_no_box() {
        let points: Vec<Point> = Vec::new();
        assert!(BoundingBox::enclosing(&points).is_none());
    }

    #[test]
    fn test_union_and_containment() {
        let a = BoundingBox::from_point(&Point::new(0.0, 0.0));
        let b = BoundingBox::from_point(&Point::new(2.0, 3.0));
        let joined = a.union(&b);

        assert!(joined.contains_box(&a));
        assert!(joined.contains_box(&b));
        assert!(!a.contains_box(&joined));
    }
}

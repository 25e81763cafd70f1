use crate::Pt2D;

/// A single segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line(pt1, pt2)
    }

    pub fn length(&self) -> f64 {
        self.0.dist_to(self.1)
    }

    /// Finds the point on this segment closest to `query`. Also returns how far along the segment
    /// that point is, as a percentage in [0, 1]. A zero-length segment always answers its first
    /// point.
    pub fn project_pt(&self, query: Pt2D) -> (Pt2D, f64) {
        let dx = self.1.x() - self.0.x();
        let dy = self.1.y() - self.0.y();
        let len_squared = dx * dx + dy * dy;
        if len_squared == 0.0 {
            return (self.0, 0.0);
        }

        let percent = (((query.x() - self.0.x()) * dx + (query.y() - self.0.y()) * dy)
            / len_squared)
            .clamp(0.0, 1.0);
        (self.percent_along(percent), percent)
    }

    pub fn percent_along(&self, percent: f64) -> Pt2D {
        Pt2D::new(
            self.0.x() + percent * (self.1.x() - self.0.x()),
            self.0.y() + percent * (self.1.y() - self.0.y()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_pt() {
        let l = Line::new(Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0));
        assert_eq!(l.project_pt(Pt2D::new(5.0, -1.0)), (Pt2D::new(5.0, 0.0), 0.5));
        // Clamped to the endpoints
        assert_eq!(l.project_pt(Pt2D::new(-3.0, 2.0)), (Pt2D::new(0.0, 0.0), 0.0));
        assert_eq!(l.project_pt(Pt2D::new(12.0, 2.0)), (Pt2D::new(10.0, 0.0), 1.0));

        let degenerate = Line::new(Pt2D::new(1.0, 1.0), Pt2D::new(1.0, 1.0));
        assert_eq!(
            degenerate.project_pt(Pt2D::new(5.0, 5.0)),
            (Pt2D::new(1.0, 1.0), 0.0)
        );
    }
}

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inside_and_edges() {
        let b = Aabb::from_center_size(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(b.contains(Vec2::new(50.0, 50.0)));
        assert!(b.contains(Vec2::new(45.0, 55.0)), "Edges are inclusive");
        assert!(!b.contains(Vec2::new(44.9, 50.0)));
        assert!(!b.contains(Vec2::new(50.0, 55.1)));
    }
}

use glam::Vec3;

/// Bounding extents grown while vertices are authored.
///
/// Each axis keeps the largest coordinate seen so far; extents never shrink.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Extents {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Extents {
    #[inline]
    pub fn include(&mut self, p: Vec3) {
        self.width = self.width.max(p.x);
        self.height = self.height.max(p.y);
        self.depth = self.depth.max(p.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_monotonically() {
        let mut e = Extents::default();
        e.include(Vec3::new(10.0, 5.0, 0.0));
        e.include(Vec3::new(3.0, 8.0, 0.0));
        e.include(Vec3::new(-20.0, -20.0, 0.0));
        assert_eq!(e, Extents { width: 10.0, height: 8.0, depth: 0.0 });
    }
}

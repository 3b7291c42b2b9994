use glam::{Affine2, Mat4, Vec2, Vec3, Vec4};

/// Threshold for re-normalizing a rotation axis.
const AXIS_EPSILON: f32 = 0.0001;

/// How many dimensions a transform call needs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Dimensions {
    Two,
    Three,
}

/// A 2D affine matrix or a full 3D matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeMatrix {
    TwoD(Affine2),
    ThreeD(Mat4),
}

impl ShapeMatrix {
    /// Identity of the requested dimensionality.
    pub fn identity(dims: Dimensions) -> Self {
        match dims {
            Dimensions::Two => ShapeMatrix::TwoD(Affine2::IDENTITY),
            Dimensions::Three => ShapeMatrix::ThreeD(Mat4::IDENTITY),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        match self {
            ShapeMatrix::TwoD(_) => Dimensions::Two,
            ShapeMatrix::ThreeD(_) => Dimensions::Three,
        }
    }

    #[inline]
    pub fn is_3d(&self) -> bool {
        self.dimensions() == Dimensions::Three
    }

    /// Promotes a 2D matrix to 3D when `dims` asks for it. Never demotes.
    pub fn ensure(&mut self, dims: Dimensions) {
        if let (Dimensions::Three, ShapeMatrix::TwoD(a)) = (dims, *self) {
            *self = ShapeMatrix::ThreeD(affine_to_mat4(a));
        }
    }

    /// The matrix as 4x4, embedding a 2D matrix if needed.
    pub fn to_mat4(&self) -> Mat4 {
        match *self {
            ShapeMatrix::TwoD(a) => affine_to_mat4(a),
            ShapeMatrix::ThreeD(m) => m,
        }
    }

    pub fn reset(&mut self) {
        *self = ShapeMatrix::identity(self.dimensions());
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        match self {
            ShapeMatrix::TwoD(a) => *a = *a * Affine2::from_translation(Vec2::new(x, y)),
            ShapeMatrix::ThreeD(m) => *m = *m * Mat4::from_translation(Vec3::new(x, y, 0.0)),
        }
    }

    /// Translation along all three axes; promotes to 3D.
    pub fn translate_3d(&mut self, x: f32, y: f32, z: f32) {
        self.ensure(Dimensions::Three);
        if let ShapeMatrix::ThreeD(m) = self {
            *m = *m * Mat4::from_translation(Vec3::new(x, y, z));
        }
    }

    /// Rotation in the XY plane (about Z in 3D).
    pub fn rotate(&mut self, angle: f32) {
        match self {
            ShapeMatrix::TwoD(a) => *a = *a * Affine2::from_angle(angle),
            ShapeMatrix::ThreeD(m) => *m = *m * Mat4::from_rotation_z(angle),
        }
    }

    /// Rotation about an arbitrary axis; promotes to 3D.
    ///
    /// The axis is normalized only when its squared length is off by more
    /// than a small epsilon. A zero axis leaves the matrix unchanged.
    pub fn rotate_axis(&mut self, angle: f32, axis: Vec3) {
        self.ensure(Dimensions::Three);

        let norm2 = axis.length_squared();
        if norm2 == 0.0 {
            return;
        }
        let axis = if (norm2 - 1.0).abs() > AXIS_EPSILON {
            axis / norm2.sqrt()
        } else {
            axis
        };

        if let ShapeMatrix::ThreeD(m) = self {
            *m = *m * Mat4::from_axis_angle(axis, angle);
        }
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        match self {
            ShapeMatrix::TwoD(a) => *a = *a * Affine2::from_scale(Vec2::new(x, y)),
            ShapeMatrix::ThreeD(m) => *m = *m * Mat4::from_scale(Vec3::new(x, y, 1.0)),
        }
    }

    /// Uniform scale over every axis the matrix has.
    pub fn scale_uniform(&mut self, s: f32) {
        match self {
            ShapeMatrix::TwoD(a) => *a = *a * Affine2::from_scale(Vec2::splat(s)),
            ShapeMatrix::ThreeD(m) => *m = *m * Mat4::from_scale(Vec3::splat(s)),
        }
    }

    pub fn scale_3d(&mut self, x: f32, y: f32, z: f32) {
        self.ensure(Dimensions::Three);
        if let ShapeMatrix::ThreeD(m) = self {
            *m = *m * Mat4::from_scale(Vec3::new(x, y, z));
        }
    }

    /// Post-multiplies by the row-major 2x3 affine `[n00 n01 n02; n10 n11 n12]`.
    pub fn apply_2d(&mut self, n: [f32; 6]) {
        let [n00, n01, n02, n10, n11, n12] = n;
        match self {
            ShapeMatrix::TwoD(a) => {
                *a = *a * Affine2::from_cols_array(&[n00, n10, n01, n11, n02, n12]);
            }
            ShapeMatrix::ThreeD(m) => {
                *m = *m * affine_to_mat4(Affine2::from_cols_array(&[n00, n10, n01, n11, n02, n12]));
            }
        }
    }

    /// Post-multiplies by a row-major 4x4 matrix; promotes to 3D.
    pub fn apply_3d(&mut self, n: [f32; 16]) {
        self.ensure(Dimensions::Three);
        if let ShapeMatrix::ThreeD(m) = self {
            *m = *m * Mat4::from_cols_array(&n).transpose();
        }
    }

    /// Post-multiplies by another shape matrix, promoting if `other` is 3D.
    pub fn apply(&mut self, other: &ShapeMatrix) {
        match *other {
            ShapeMatrix::TwoD(b) => match self {
                ShapeMatrix::TwoD(a) => *a = *a * b,
                ShapeMatrix::ThreeD(m) => *m = *m * affine_to_mat4(b),
            },
            ShapeMatrix::ThreeD(b) => {
                self.ensure(Dimensions::Three);
                if let ShapeMatrix::ThreeD(m) = self {
                    *m = *m * b;
                }
            }
        }
    }

    /// Inverse, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<ShapeMatrix> {
        match self {
            ShapeMatrix::TwoD(a) => {
                if a.matrix2.determinant() == 0.0 {
                    return None;
                }
                Some(ShapeMatrix::TwoD(a.inverse()))
            }
            ShapeMatrix::ThreeD(m) => {
                if m.determinant() == 0.0 {
                    return None;
                }
                Some(ShapeMatrix::ThreeD(m.inverse()))
            }
        }
    }

    /// Maps a point in the XY plane.
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        match self {
            ShapeMatrix::TwoD(a) => a.transform_point2(p),
            ShapeMatrix::ThreeD(m) => m.transform_point3(p.extend(0.0)).truncate(),
        }
    }

    /// Approximate equality, comparing as 4x4 matrices.
    pub fn abs_diff_eq(&self, other: &ShapeMatrix, max_abs_diff: f32) -> bool {
        self.to_mat4().abs_diff_eq(other.to_mat4(), max_abs_diff)
    }
}

fn affine_to_mat4(a: Affine2) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(a.matrix2.x_axis.x, a.matrix2.x_axis.y, 0.0, 0.0),
        Vec4::new(a.matrix2.y_axis.x, a.matrix2.y_axis.y, 0.0, 0.0),
        Vec4::Z,
        Vec4::new(a.translation.x, a.translation.y, 0.0, 1.0),
    )
}

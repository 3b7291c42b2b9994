use glam::{Vec2, Vec3};

use crate::geometry::PathSegment;
use crate::shape::{ArcMode, CloseMode, Family, ShapeId, ShapeKind, ShapeMode, ShapeNode, ShapeTree};
use crate::texture::TextureRef;

use super::{CornerRadii, Renderer};

impl ShapeTree {
    /// Replays `id` onto `r`, recursing into group children in order.
    ///
    /// Invisible nodes draw nothing. A node's transform and, if it honors
    /// its style, its style are pushed before its content and popped after.
    pub fn draw<R: Renderer + ?Sized>(&mut self, id: ShapeId, r: &mut R) {
        let Some(node) = self.get_mut(id) else { return };
        if !node.is_visible() {
            return;
        }
        log::trace!("draw {} {:?}", node.family(), node.kind());

        node.pre_draw(r);
        if node.family() == Family::Group {
            let mut i = 0;
            while let Some(child) = self.child(id, i) {
                self.draw(child, r);
                i += 1;
            }
        } else {
            node.draw_content(r);
        }
        if let Some(node) = self.get(id) {
            node.post_draw(r);
        }
    }
}

impl ShapeNode {
    fn pre_draw<R: Renderer + ?Sized>(&self, r: &mut R) {
        if let Some(m) = &self.matrix {
            r.push_matrix();
            r.apply_matrix(m);
        }
        if self.honor_style {
            r.push_style();
            self.replay_style(r);
        }
    }

    fn replay_style<R: Renderer + ?Sized>(&self, r: &mut R) {
        let s = &self.style;
        if s.stroke {
            r.stroke(s.stroke_color);
            r.stroke_weight(s.stroke_weight);
            r.stroke_cap(s.stroke_cap);
            r.stroke_join(s.stroke_join);
        } else {
            r.no_stroke();
        }
        if s.fill {
            r.fill(s.fill_color);
        } else {
            r.no_fill();
        }
    }

    fn post_draw<R: Renderer + ?Sized>(&self, r: &mut R) {
        if self.honor_style {
            r.pop_style();
        }
        if self.matrix.is_some() {
            r.pop_matrix();
        }
    }

    fn draw_content<R: Renderer + ?Sized>(&mut self, r: &mut R) {
        match self.family {
            Family::Group => {}
            Family::Primitive => self.draw_primitive(r),
            Family::Geometry => self.draw_geometry(r),
            Family::Path => self.draw_path(r),
        }
    }

    fn close_mode(&self) -> CloseMode {
        if self.closed { CloseMode::Close } else { CloseMode::Open }
    }

    // ── primitives ────────────────────────────────────────────────────────

    /// One renderer call per primitive. Parameter counts outside the
    /// accepted set draw nothing.
    fn draw_primitive<R: Renderer + ?Sized>(&mut self, r: &mut R) {
        if self.kind == ShapeKind::Rect {
            self.draw_rect(r);
            return;
        }

        let p = self.params.as_slice();
        match (self.kind, p.len()) {
            (ShapeKind::Point, 2) => r.point(v2(p, 0)),
            (ShapeKind::Point, 3) => r.point_3d(v3(p, 0)),
            (ShapeKind::Line, 4) => r.line(v2(p, 0), v2(p, 2)),
            (ShapeKind::Line, 6) => r.line_3d(v3(p, 0), v3(p, 3)),
            (ShapeKind::Triangle, 6) => r.triangle(v2(p, 0), v2(p, 2), v2(p, 4)),
            (ShapeKind::Quad, 8) => r.quad(v2(p, 0), v2(p, 2), v2(p, 4), v2(p, 6)),
            (ShapeKind::Ellipse, 4) => {
                let old = r.ellipse_mode();
                r.set_ellipse_mode(self.style.ellipse_mode);
                r.ellipse(p[0], p[1], p[2], p[3]);
                r.set_ellipse_mode(old);
            }
            (ShapeKind::Arc, n @ (6 | 7)) => {
                let mode = (n == 7).then(|| ArcMode::from_param(p[6]));
                let old = r.ellipse_mode();
                r.set_ellipse_mode(self.style.ellipse_mode);
                r.arc(p[0], p[1], p[2], p[3], p[4], p[5], mode);
                r.set_ellipse_mode(old);
            }
            (ShapeKind::Box, 1) => r.box_3d(Vec3::splat(p[0])),
            (ShapeKind::Box, 3) => r.box_3d(v3(p, 0)),
            (ShapeKind::Sphere, 1) => r.sphere(p[0]),
            (kind, n) => log::trace!("no primitive draw for {kind:?} with {n} params"),
        }
    }

    /// Draws the bound image in place of the rect when there is one,
    /// resolving a pending texture reference first.
    fn draw_rect<R: Renderer + ?Sized>(&mut self, r: &mut R) {
        if self.image_path.is_some() {
            self.resolve_image(r);
        }

        let p = self.params.as_slice();
        if p.len() < 4 {
            return;
        }
        if let Some(img) = &self.image {
            let old = r.image_mode();
            r.set_image_mode(ShapeMode::Corner);
            r.image(img, p[0], p[1], p[2], p[3]);
            r.set_image_mode(old);
            return;
        }

        let Some(radii) = CornerRadii::from_params(&p[4..]) else {
            return;
        };
        let old = r.rect_mode();
        r.set_rect_mode(self.style.rect_mode);
        r.rect(p[0], p[1], p[2], p[3], radii);
        r.set_rect_mode(old);
    }

    /// Resolves the pending reference once. Failures are logged and leave
    /// the shape untextured; the reference is cleared either way.
    fn resolve_image<R: Renderer + ?Sized>(&mut self, r: &mut R) {
        let Some(reference) = self.image_path.take() else { return };
        let resolved = TextureRef::parse(&reference).and_then(|t| t.resolve(|path| r.load_image(path)));
        match resolved {
            Ok(img) => {
                log::debug!("resolved texture {}x{}", img.width(), img.height());
                self.image = Some(img);
            }
            Err(e) => log::error!("texture not loaded: {e}"),
        }
    }

    // ── vertex runs ───────────────────────────────────────────────────────

    /// One vertex run in the node's kind. Styled nodes send full records;
    /// otherwise each vertex goes out as 2D unless its z is nonzero.
    fn draw_geometry<R: Renderer + ?Sized>(&self, r: &mut R) {
        r.begin_shape(self.kind);
        for v in self.path.vertices() {
            if self.honor_style {
                r.styled_vertex(v);
            } else if v.z() == 0.0 {
                r.vertex(v.xy());
            } else {
                r.vertex_3d(v.xyz());
            }
        }
        r.end_shape(self.close_mode());
    }

    /// Walks the coded path. Each break closes the open contour, if any,
    /// and opens the next; a contour still open at the end is closed.
    fn draw_path<R: Renderer + ?Sized>(&self, r: &mut R) {
        if self.path.vertex_count() == 0 {
            return;
        }
        let flat = !self.is_3d();
        let mut in_contour = false;

        r.begin_shape(ShapeKind::Polygon);
        for seg in self.path.segments() {
            match seg {
                PathSegment::Vertex(v) if flat => r.vertex(v.xy()),
                PathSegment::Vertex(v) => r.vertex_3d(v.xyz()),
                PathSegment::Quadratic(c, a) if flat => r.quadratic_vertex(c.xy(), a.xy()),
                PathSegment::Quadratic(c, a) => r.quadratic_vertex_3d(c.xyz(), a.xyz()),
                PathSegment::Bezier(c1, c2, a) if flat => r.bezier_vertex(c1.xy(), c2.xy(), a.xy()),
                PathSegment::Bezier(c1, c2, a) => r.bezier_vertex_3d(c1.xyz(), c2.xyz(), a.xyz()),
                PathSegment::Curve(v) if flat => r.curve_vertex(v.xy()),
                PathSegment::Curve(v) => r.curve_vertex_3d(v.xyz()),
                PathSegment::Break => {
                    if in_contour {
                        r.end_contour();
                    }
                    r.begin_contour();
                    in_contour = true;
                }
            }
        }
        if in_contour {
            r.end_contour();
        }
        r.end_shape(self.close_mode());
    }
}

#[inline]
fn v2(p: &[f32], i: usize) -> Vec2 {
    Vec2::new(p[i], p[i + 1])
}

#[inline]
fn v3(p: &[f32], i: usize) -> Vec3 {
    Vec3::new(p[i], p[i + 1], p[i + 2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::rc::Rc;

    use ::image::{ImageFormat, Rgba, RgbaImage};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;

    use crate::scene::{DrawCmd, DrawList};
    use crate::texture::Image;

    fn png_data_uri() -> String {
        let img = RgbaImage::from_pixel(1, 1, Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        format!("data:image/png;base64,{}", BASE64.encode(out.into_inner()))
    }

    fn count(list: &DrawList, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        list.cmds().iter().filter(|c| pred(c)).count()
    }

    fn draw(tree: &mut ShapeTree, id: ShapeId) -> DrawList {
        let mut list = DrawList::new();
        tree.draw(id, &mut list);
        assert_eq!(list.matrix_depth(), 0);
        assert_eq!(list.style_depth(), 0);
        list
    }

    // ── path ──────────────────────────────────────────────────────────────

    #[test]
    fn one_contour_pair_per_break_and_trailing_contour_closed() {
        let mut t = ShapeTree::new();
        let id = t.create(Family::Path);
        let n = &mut t[id];
        n.begin_shape(ShapeKind::Polygon);
        for (x, y) in [(0.0, 0.0), (40.0, 0.0), (40.0, 40.0)] {
            n.vertex(x, y);
        }
        n.begin_contour();
        n.vertex(10.0, 10.0);
        n.vertex(20.0, 10.0);
        n.end_contour();
        n.begin_contour();
        n.vertex(25.0, 25.0);
        n.end_contour();
        n.end_shape(CloseMode::Close);
        t.disable_style(id);

        let list = draw(&mut t, id);
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::BeginContour)), 2);
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::EndContour)), 2);

        let tail: Vec<_> = list.cmds().iter().rev().take(4).rev().cloned().collect();
        assert_eq!(
            tail,
            vec![
                DrawCmd::BeginContour,
                DrawCmd::Vertex(Vec2::new(25.0, 25.0)),
                DrawCmd::EndContour,
                DrawCmd::EndShape(CloseMode::Close),
            ]
        );
    }

    #[test]
    fn curves_replay_as_curve_calls() {
        let mut t = ShapeTree::new();
        let id = t.create(Family::Path);
        let n = &mut t[id];
        n.begin_shape(ShapeKind::Polygon);
        n.vertex(0.0, 0.0);
        n.bezier_vertex(1.0, 1.0, 2.0, 2.0, 3.0, 3.0);
        n.quadratic_vertex(4.0, 4.0, 5.0, 5.0);
        n.curve_vertex(6.0, 6.0);
        n.end_shape(CloseMode::Open);

        let list = draw(&mut t, id);
        assert!(list.cmds().contains(&DrawCmd::Bezier(Vec2::ONE, Vec2::splat(2.0), Vec2::splat(3.0))));
        assert!(list.cmds().contains(&DrawCmd::Quadratic(Vec2::splat(4.0), Vec2::splat(5.0))));
        assert!(list.cmds().contains(&DrawCmd::Curve(Vec2::splat(6.0))));
        assert!(list.cmds().contains(&DrawCmd::EndShape(CloseMode::Open)));
    }

    #[test]
    fn deep_path_replays_in_3d() {
        let mut t = ShapeTree::new();
        let id = t.create(Family::Path);
        let n = &mut t[id];
        n.begin_shape(ShapeKind::Polygon);
        n.vertex(1.0, 2.0);
        n.vertex_3d(1.0, 2.0, 3.0);
        n.end_shape(CloseMode::Open);

        let list = draw(&mut t, id);
        assert!(list.cmds().contains(&DrawCmd::Vertex3d(Vec3::new(1.0, 2.0, 0.0))));
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::Vertex(_))), 0);
    }

    #[test]
    fn empty_path_draws_no_run() {
        let mut t = ShapeTree::new();
        let id = t.create(Family::Path);
        let list = draw(&mut t, id);
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::BeginShape(_))), 0);
    }

    // ── pre / post ────────────────────────────────────────────────────────

    #[test]
    fn transform_and_style_bracket_the_content() {
        let mut t = ShapeTree::new();
        let id = t.insert(ShapeNode::primitive(ShapeKind::Point, [1.0, 1.0]));
        t[id].translate(5.0, 0.0);
        t[id].set_stroke_enabled(false);

        let list = draw(&mut t, id);
        let cmds = list.cmds();
        assert_eq!(cmds[0], DrawCmd::PushMatrix);
        assert!(matches!(cmds[1], DrawCmd::ApplyMatrix(_)));
        assert_eq!(cmds[2], DrawCmd::PushStyle);
        assert_eq!(cmds[3], DrawCmd::NoStroke);
        assert_eq!(cmds[4], DrawCmd::Fill(0xffff_ffff));
        assert_eq!(cmds[5], DrawCmd::Point(Vec2::ONE));
        assert_eq!(&cmds[6..], &[DrawCmd::PopStyle, DrawCmd::PopMatrix]);
    }

    #[test]
    fn disabled_style_is_not_replayed() {
        let mut t = ShapeTree::new();
        let id = t.insert(ShapeNode::primitive(ShapeKind::Sphere, [3.0]));
        t.disable_style(id);
        let list = draw(&mut t, id);
        assert_eq!(list.cmds(), &[DrawCmd::Sphere(3.0)]);
    }

    #[test]
    fn invisible_nodes_draw_nothing() {
        let mut t = ShapeTree::new();
        let g = t.create(Family::Group);
        let p = t.insert(ShapeNode::primitive(ShapeKind::Point, [0.0, 0.0]));
        t.add_child(g, p);
        t[g].set_visible(false);
        assert!(draw(&mut t, g).is_empty());
    }

    #[test]
    fn group_draws_children_in_order() {
        let mut t = ShapeTree::new();
        let g = t.create(Family::Group);
        t.disable_style(g);
        for x in [1.0, 2.0, 3.0] {
            let p = t.insert(ShapeNode::primitive(ShapeKind::Point, [x, 0.0]));
            t.disable_style(p);
            t.add_child(g, p);
        }
        let list = draw(&mut t, g);
        assert_eq!(
            list.cmds(),
            &[
                DrawCmd::Point(Vec2::new(1.0, 0.0)),
                DrawCmd::Point(Vec2::new(2.0, 0.0)),
                DrawCmd::Point(Vec2::new(3.0, 0.0)),
            ]
        );
    }

    // ── primitives ────────────────────────────────────────────────────────

    #[test]
    fn primitive_param_counts() {
        let cases: [(ShapeKind, &[f32], usize); 8] = [
            (ShapeKind::Line, &[0.0, 0.0, 1.0, 1.0], 1),
            (ShapeKind::Line, &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0], 1),
            (ShapeKind::Line, &[0.0, 0.0, 1.0], 0),
            (ShapeKind::Arc, &[0.0, 0.0, 5.0, 5.0, 0.0], 0),
            (ShapeKind::Arc, &[0.0, 0.0, 5.0, 5.0, 0.0, 1.0], 1),
            (ShapeKind::Box, &[2.0], 1),
            (ShapeKind::Box, &[2.0, 3.0], 0),
            (ShapeKind::Rect, &[0.0, 0.0, 5.0, 5.0, 1.0, 2.0], 0),
        ];
        for (kind, params, expected) in cases {
            let mut t = ShapeTree::new();
            let id = t.insert(ShapeNode::primitive(kind, params));
            t.disable_style(id);
            assert_eq!(draw(&mut t, id).len(), expected, "{kind:?} with {} params", params.len());
        }
    }

    #[test]
    fn arc_mode_comes_from_seventh_param() {
        let mut t = ShapeTree::new();
        let id = t.insert(ShapeNode::primitive(ShapeKind::Arc, [0.0, 0.0, 5.0, 5.0, 0.0, 1.0, 3.0]));
        t.disable_style(id);
        let list = draw(&mut t, id);
        assert!(matches!(list.cmds()[0], DrawCmd::Arc { mode: Some(ArcMode::Pie), .. }));
    }

    #[test]
    fn rect_uses_shape_mode_and_restores_renderer_mode() {
        let mut t = ShapeTree::new();
        let mut node = ShapeNode::primitive(ShapeKind::Rect, [0.0, 0.0, 10.0, 10.0, 2.0]);
        node.style.rect_mode = ShapeMode::Center;
        let id = t.insert(node);

        let list = draw(&mut t, id);
        let rect = list.cmds().iter().find_map(|c| match c {
            DrawCmd::Rect(r) => Some(r.clone()),
            _ => None,
        });
        let rect = rect.unwrap();
        assert_eq!(rect.mode, ShapeMode::Center);
        assert_eq!(rect.radii, CornerRadii::all(2.0));
        assert_eq!(list.rect_mode(), ShapeMode::Corner);
    }

    // ── textures ──────────────────────────────────────────────────────────

    #[test]
    fn inline_png_rect_becomes_image_and_clears_reference() {
        let mut t = ShapeTree::new();
        let id = t.insert(ShapeNode::primitive(ShapeKind::Rect, [1.0, 2.0, 30.0, 40.0]));
        assert!(t[id].set_image_path(png_data_uri()).is_applied());

        let list = draw(&mut t, id);
        assert!(t[id].image_path().is_none());
        assert!(t[id].image().is_some());
        let img = list.cmds().iter().find_map(|c| match c {
            DrawCmd::Image(i) => Some(i.clone()),
            _ => None,
        });
        let img = img.unwrap();
        assert_eq!((img.x, img.y, img.w, img.h), (1.0, 2.0, 30.0, 40.0));
        assert_eq!(img.mode, ShapeMode::Corner);
        assert_eq!(img.image.pixels().get_pixel(0, 0).0, [200, 10, 10, 255]);
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::Rect(_))), 0);

        // Second frame reuses the bound image.
        let again = draw(&mut t, id);
        assert_eq!(count(&again, |c| matches!(c, DrawCmd::Image(_))), 1);
    }

    #[test]
    fn file_reference_goes_through_the_loader() {
        let img = Rc::new(Image::from_rgba(RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]))));
        let mut t = ShapeTree::new();
        let id = t.insert(ShapeNode::primitive(ShapeKind::Rect, [0.0, 0.0, 3.0, 3.0]));
        t[id].set_image_path("file://sprites/tile.png");

        let mut list = DrawList::new();
        list.register_image("sprites/tile.png", Rc::clone(&img));
        t.draw(id, &mut list);
        assert!(Rc::ptr_eq(t[id].image().unwrap(), &img));
    }

    #[test]
    fn bad_payload_leaves_rect_untextured() {
        let mut t = ShapeTree::new();
        let id = t.insert(ShapeNode::primitive(ShapeKind::Rect, [0.0, 0.0, 3.0, 3.0]));
        t[id].set_image_path("data:image/png;base64,%%%");

        let list = draw(&mut t, id);
        assert!(t[id].image().is_none());
        assert!(t[id].image_path().is_none());
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::Rect(_))), 1);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn geometry_replays_styled_or_bare_vertices() {
        let mut t = ShapeTree::new();
        let id = t.create(Family::Geometry);
        let n = &mut t[id];
        n.begin_shape(ShapeKind::Triangles);
        n.fill(0xff00_00ff_u32);
        n.vertex(0.0, 0.0);
        n.vertex_3d(1.0, 0.0, 2.0);
        n.vertex(0.0, 1.0);
        n.end_shape(CloseMode::Open);

        let styled = draw(&mut t, id);
        assert!(styled.cmds().contains(&DrawCmd::BeginShape(ShapeKind::Triangles)));
        assert_eq!(count(&styled, |c| matches!(c, DrawCmd::StyledVertex(v) if v.fill == [0.0, 0.0, 1.0, 1.0])), 3);

        t.disable_style(id);
        let bare = draw(&mut t, id);
        assert_eq!(
            bare.cmds(),
            &[
                DrawCmd::BeginShape(ShapeKind::Triangles),
                DrawCmd::Vertex(Vec2::ZERO),
                DrawCmd::Vertex3d(Vec3::new(1.0, 0.0, 2.0)),
                DrawCmd::Vertex(Vec2::Y),
                DrawCmd::EndShape(CloseMode::Open),
            ]
        );
    }
}

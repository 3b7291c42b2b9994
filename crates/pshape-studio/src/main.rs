use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{Context, bail};
use pshape_engine::logging::{LoggingConfig, init_logging};
use pshape_engine::render::Renderer;
use pshape_engine::scene::DrawList;
use pshape_engine::shape::{CloseMode, Family, ShapeId, ShapeKind, ShapeMode, ShapeNode, ShapeTree};
use pshape_engine::texture::Image;

/// Builds a small retained scene, replays it into a recording renderer and
/// logs what came out.
///
/// Usage: `pshape-studio [texture.png]`. With a texture, the badge rect is
/// drawn as that image.
fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let texture = std::env::args().nth(1);
    let mut list = DrawList::new();
    if let Some(path) = &texture {
        let img = Image::open(path).with_context(|| format!("loading texture {path}"))?;
        log::info!("texture {path}: {}x{}", img.width(), img.height());
        list.register_image(path.clone(), Rc::new(img));
    }

    let mut tree = ShapeTree::new();
    let (scene, frame) = build_scene(&mut tree, &mut list, texture.as_deref())?;

    // The first frame resolves the deferred texture; the second reuses it.
    for pass in 0..2 {
        list.clear();
        tree.draw(scene, &mut list);
        log_summary(pass, &list);
    }

    for (x, y) in [(50.0, 50.0), (50.0, 45.0), (200.0, 200.0)] {
        let hit = tree.contains(frame, x, y).context("hit test")?;
        log::info!("contains({x}, {y}) = {hit}");
    }

    if let Some(badge) = tree.find_child(scene, "badge") {
        let textured = tree[badge].image().is_some();
        log::info!("badge textured: {textured}");
    }
    Ok(())
}

/// Returns the root group and the framed path inside it.
fn build_scene(
    tree: &mut ShapeTree,
    r: &mut DrawList,
    texture: Option<&str>,
) -> anyhow::Result<(ShapeId, ShapeId)> {
    let scene = tree.create(Family::Group);

    // Square frame with a square hole.
    let frame = tree.create_with_style(Family::Path, r.current_style());
    {
        let n = &mut tree[frame];
        n.begin_shape(ShapeKind::Polygon);
        n.fill(0xff33_6699_u32);
        n.stroke(0xff11_2233_u32);
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)] {
            n.vertex(x, y);
        }
        n.begin_contour();
        for (x, y) in [(40.0, 40.0), (40.0, 60.0), (60.0, 60.0), (60.0, 40.0)] {
            n.vertex(x, y);
        }
        n.end_contour();
        n.end_shape(CloseMode::Close);
    }

    // Per-vertex colored strip.
    let strip = tree.insert(ShapeNode::new(Family::Geometry).with_per_vertex_styles(true));
    {
        let n = &mut tree[strip];
        n.begin_shape(ShapeKind::TriangleStrip);
        n.no_stroke();
        for (i, x) in [0.0, 20.0, 40.0, 60.0].into_iter().enumerate() {
            n.fill(if i % 2 == 0 { 0xffff_0000_u32 } else { 0xff00_00ff_u32 });
            n.vertex(x, 120.0 + (i % 2) as f32 * 20.0);
        }
        n.end_shape(CloseMode::Open);
        n.set_fill_at(0, 0xff00_ff00);
    }

    let badge = tree.insert(
        ShapeNode::primitive(ShapeKind::Rect, [110.0, 0.0, 32.0, 32.0, 4.0]).with_name("badge"),
    );
    if let Some(path) = texture {
        tree[badge].set_image_path(format!("file://{path}"));
    }

    // New nodes capture the renderer's modes.
    r.set_ellipse_mode(ShapeMode::Radius);
    let dot = tree.insert(
        ShapeNode::with_style(Family::Primitive, r.current_style())
            .with_kind(ShapeKind::Ellipse)
            .with_params([126.0, 60.0, 6.0, 6.0]),
    );
    r.set_ellipse_mode(ShapeMode::Center);
    tree[dot].translate(0.0, 4.0);

    for child in [frame, strip, badge, dot] {
        let status = tree.add_child(scene, child);
        if let Some(w) = status.warning() {
            bail!("building scene: {w}");
        }
    }
    Ok((scene, frame))
}

fn log_summary(pass: usize, list: &DrawList) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for cmd in list.cmds() {
        *counts.entry(cmd.label()).or_default() += 1;
    }
    log::info!("pass {pass}: {} commands", list.len());
    for (label, n) in counts {
        log::info!("  {label:<10} {n}");
    }
}

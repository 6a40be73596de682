//! PNG export. Boxes only; labels need a font rasterizer and are left out.

use crate::color::parse_hex;
use crate::error::Result;
use crate::widget::Squaire;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Gap left between neighbouring boxes, in pixels.
const BOX_GAP: f32 = 1.0;

pub fn render(map: &Squaire) -> RgbaImage {
    let scene = map.scene();
    let w = scene.width.ceil().max(0.0) as u32;
    let h = scene.height.ceil().max(0.0) as u32;
    let mut img = RgbaImage::new(w, h);

    for g in scene.paint_order() {
        let Some(color) = parse_hex(&g.fill) else {
            continue;
        };
        let px = Rgba([color.r(), color.g(), color.b(), 255]);
        let r = g.rect.shrink(BOX_GAP / 2.0);
        let x0 = r.min.x.round().max(0.0) as u32;
        let y0 = r.min.y.round().max(0.0) as u32;
        let x1 = (r.max.x.round().max(0.0) as u32).min(w);
        let y1 = (r.max.y.round().max(0.0) as u32).min(h);
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, px);
            }
        }
    }
    img
}

pub fn save(map: &Squaire, path: &Path) -> Result<()> {
    render(map).save_with_format(path, image::ImageFormat::Png)?;
    tracing::info!(path = %path.display(), "wrote PNG");
    Ok(())
}

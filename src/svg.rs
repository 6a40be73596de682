//! Standalone SVG export of the current scene.

use crate::widget::Squaire;
use std::fmt::Write as _;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the map as an SVG document, groups in paint order.
pub fn render(map: &Squaire) -> String {
    let scene = map.scene();
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="squaire" data-breakpoint="{}" width="{}" height="{}">"#,
        escape(&scene.breakpoint),
        scene.width,
        scene.height
    );
    for g in scene.paint_order() {
        let mut class = g.class.clone();
        if g.active {
            if !class.is_empty() {
                class.push(' ');
            }
            class.push_str("active");
        }
        let _ = writeln!(
            svg,
            r#"  <g data-box="{}" class="{}">"#,
            escape(&g.id),
            escape(&class)
        );
        let _ = writeln!(
            svg,
            r#"    <rect x="{}" y="{}" width="{}" height="{}" class="box-rect" style="fill: {}"/>"#,
            g.rect.min.x,
            g.rect.min.y,
            g.rect.width(),
            g.rect.height(),
            escape(&g.fill)
        );
        let _ = writeln!(
            svg,
            r#"    <text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" style="fill: {}">{}</text>"#,
            g.label_pos.x,
            g.label_pos.y,
            g.label_color,
            escape(&g.label)
        );
        svg.push_str("  </g>\n");
    }
    svg.push_str("</svg>\n");
    svg
}

use std::fmt::Write as _;

use crate::{
    foundation::core::Affine,
    scene::{
        element::{Element, Primitive, Style},
        graph::{GroupId, Layer, SceneGraph},
    },
};

/// Serialize the scene as a standalone SVG document at the viewport's physical size.
pub fn to_svg(scene: &SceneGraph) -> String {
    let vp = scene.viewport();
    let (w, h) = vp.physical_size();
    let mut out = String::with_capacity(16 * 1024);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    write_group(scene, scene.surface_group(), 1, &mut out);
    out.push_str("</svg>\n");
    out
}

fn write_group(scene: &SceneGraph, id: GroupId, depth: usize, out: &mut String) {
    let group = scene.group(id);
    let indent = "  ".repeat(depth);
    let _ = write!(out, r#"{indent}<g class="{}""#, escape(&group.class));
    if group.transform != Affine::IDENTITY {
        let _ = write!(out, r#" transform="{}""#, matrix(group.transform));
    }
    out.push_str(">\n");

    if let Some(layer) = Layer::ALL.into_iter().find(|l| scene.layer_group(*l) == id) {
        for el in scene.elements(layer) {
            write_element(el, depth + 1, out);
        }
    }
    for (child, g) in scene.groups() {
        if g.parent == Some(id) {
            write_group(scene, child, depth + 1, out);
        }
    }

    let _ = writeln!(out, "{indent}</g>");
}

fn write_element(el: &Element, depth: usize, out: &mut String) {
    let a = el.display_attrs();
    if a.opacity <= 0.0 {
        return;
    }
    let indent = "  ".repeat(depth);
    let common = format!(
        r#"class="{}" data-key="{}" opacity="{:.3}"{}{}"#,
        el.class(),
        escape(&el.key().to_string()),
        a.opacity,
        style_attrs(el.style()),
        if el.transform() == Affine::IDENTITY {
            String::new()
        } else {
            format!(r#" transform="{}""#, matrix(el.transform()))
        }
    );
    let _ = match el.primitive() {
        Primitive::Rect(r) => writeln!(
            out,
            r#"{indent}<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {common}/>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height()
        ),
        Primitive::Path(p) => writeln!(out, r#"{indent}<path d="{}" {common}/>"#, p.to_svg()),
        Primitive::Circle => writeln!(
            out,
            r#"{indent}<circle cx="{:.2}" cy="{:.2}" r="{:.2}" {common}/>"#,
            a.pos.x, a.pos.y, a.radius
        ),
        Primitive::Line => writeln!(
            out,
            r#"{indent}<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {common}/>"#,
            a.pos.x, a.pos.y, a.pos2.x, a.pos2.y
        ),
        Primitive::Label { text, anchor, size } => writeln!(
            out,
            r#"{indent}<text x="{:.2}" y="{:.2}" text-anchor="{}" font-size="{:.1}" font-family="sans-serif" {common}>{}</text>"#,
            a.pos.x,
            a.pos.y,
            anchor.as_svg(),
            size,
            escape(text)
        ),
    };
}

fn style_attrs(s: &Style) -> String {
    let mut out = String::new();
    match s.fill {
        Some(c) => {
            let _ = write!(out, r#" fill="{}""#, c.to_hex());
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(c) = s.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{:.2}" stroke-opacity="{:.3}""#,
            c.to_hex(),
            s.stroke_width,
            s.stroke_opacity
        );
    }
    if let Some((on, off)) = s.dash {
        let _ = write!(out, r#" stroke-dasharray="{on:.1} {off:.1}""#);
    }
    out
}

fn matrix(t: Affine) -> String {
    let [a, b, c, d, e, f] = t.as_coeffs();
    format!("matrix({a} {b} {c} {d} {e} {f})")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;

//! Shape generation for 2D primitives
//!
//! All shapes are emitted in playfield coordinates (pixels, y down) as
//! triangle lists; the pipeline maps them to clip space.

use glam::Vec2;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Alien sprite parts as (offset, size) on a 40x30 cell
const ALIEN_PARTS: [(Vec2, Vec2); 4] = [
    // Head
    (Vec2::new(5.0, 0.0), Vec2::new(30.0, 20.0)),
    // Wings
    (Vec2::new(0.0, 10.0), Vec2::new(40.0, 15.0)),
    // Feet
    (Vec2::new(10.0, 25.0), Vec2::new(5.0, 5.0)),
    (Vec2::new(25.0, 25.0), Vec2::new(5.0, 5.0)),
];

/// Generate vertices for an alien sprite, scaled to its cell size
pub fn alien(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let scale = size / Vec2::new(40.0, 30.0);
    ALIEN_PARTS
        .iter()
        .flat_map(|&(offset, part)| rect(pos + offset * scale, part * scale, color))
        .collect()
}

/// Glyph height in font pixels
pub const GLYPH_ROWS: usize = 7;
/// Glyph width in font pixels
pub const GLYPH_COLS: usize = 5;

/// 5x7 bitmap glyphs (bit 4 = leftmost column) for overlay labels
fn glyph(c: char) -> Option<[u8; GLYPH_ROWS]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        ' ' => [0; GLYPH_ROWS],
        _ => return None,
    };
    Some(rows)
}

/// Width of a rendered label: glyphs are one font pixel apart
pub fn text_width(label: &str, pixel: f32) -> f32 {
    let count = label.chars().count() as f32;
    if count == 0.0 {
        return 0.0;
    }
    (count * (GLYPH_COLS as f32 + 1.0) - 1.0) * pixel
}

/// Generate vertices for a label centered on `center`.
///
/// Characters without a glyph are skipped but still advance the cursor.
pub fn text_centered(label: &str, center: Vec2, pixel: f32, color: [f32; 4]) -> Vec<Vertex> {
    let origin = center
        - Vec2::new(
            text_width(label, pixel) / 2.0,
            GLYPH_ROWS as f32 * pixel / 2.0,
        );
    let advance = (GLYPH_COLS as f32 + 1.0) * pixel;

    let mut vertices = Vec::new();
    for (i, c) in label.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let left = origin.x + i as f32 * advance;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_COLS {
                if bits & (1 << (GLYPH_COLS - 1 - col)) != 0 {
                    let min = Vec2::new(left + col as f32 * pixel, origin.y + row as f32 * pixel);
                    vertices.extend(rect(min, Vec2::splat(pixel), color));
                }
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let verts = rect(Vec2::new(10.0, 20.0), Vec2::new(4.0, 15.0), [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 14.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 35.0);
    }

    #[test]
    fn test_alien_stays_inside_cell() {
        let pos = Vec2::new(100.0, 50.0);
        let verts = alien(pos, Vec2::new(40.0, 30.0), [1.0; 4]);
        assert_eq!(verts.len(), 4 * 6);
        for v in &verts {
            assert!(v.position[0] >= 100.0 && v.position[0] <= 140.0);
            assert!(v.position[1] >= 50.0 && v.position[1] <= 80.0);
        }
    }

    #[test]
    fn test_paused_label_is_centered() {
        let center = Vec2::new(400.0, 300.0);
        let verts = text_centered("PAUSED", center, 4.0, [1.0; 4]);
        assert!(!verts.is_empty());

        let min_x = verts.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        // Both outer glyphs touch their left/right edges
        assert!(((min_x + max_x) / 2.0 - center.x).abs() < 1e-3);
        assert_eq!(max_x - min_x, text_width("PAUSED", 4.0));
    }

    #[test]
    fn test_unknown_glyphs_skipped() {
        assert!(text_centered("?", Vec2::ZERO, 2.0, [1.0; 4]).is_empty());
        assert!(text_centered("", Vec2::ZERO, 2.0, [1.0; 4]).is_empty());
    }
}

//! Shape generation for the host's draw pass
//!
//! Two outputs: integer fill rectangles for immediate-mode 2D renderers, and
//! triangle lists in normalized device coordinates for GPU renderers.

use serde::{Deserialize, Serialize};

use super::vertex::Vertex;
use crate::sim::{Body, Bounds, Color};

/// Filled rectangle in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub color: Color,
}

impl FillRect {
    /// Truncates toward zero, like a C-style integer cast
    pub fn from_body(body: &Body) -> Self {
        Self {
            x: body.position.x as i32,
            y: body.position.y as i32,
            w: body.size.x as i32,
            h: body.size.y as i32,
            color: body.color,
        }
    }
}

/// Everything a host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Steps taken before this frame was captured
    pub step: u64,
    pub background: Color,
    pub rects: Vec<FillRect>,
}

impl Frame {
    pub fn capture(step: u64, background: Color, bodies: &[Body]) -> Self {
        Self {
            step,
            background,
            rects: bodies.iter().map(FillRect::from_body).collect(),
        }
    }
}

/// Map a screen-space point (y down) to NDC (y up)
fn to_ndc(x: f64, y: f64, bounds: Bounds) -> (f32, f32) {
    let nx = x / bounds.width as f64 * 2.0 - 1.0;
    let ny = 1.0 - y / bounds.height as f64 * 2.0;
    (nx as f32, ny as f32)
}

/// Two triangles covering a body
pub fn body_quad(body: &Body, bounds: Bounds) -> [Vertex; 6] {
    let color = body.color.to_f32_array();
    let min = body.position;
    let max = body.position + body.size;

    let (l, t) = to_ndc(min.x, min.y, bounds);
    let (r, b) = to_ndc(max.x, max.y, bounds);

    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Triangle list for every body, in draw order
pub fn frame_vertices(bodies: &[Body], bounds: Bounds) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(bodies.len() * 6);
    for body in bodies {
        vertices.extend_from_slice(&body_quad(body, bounds));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_fill_rect_truncates() {
        let body = Body::new(DVec2::splat(100.0), DVec2::new(409.95, 285.5), DVec2::ZERO)
            .with_color(Color::from_rgb(200, 100, 50));
        let rect = FillRect::from_body(&body);
        assert_eq!((rect.x, rect.y, rect.w, rect.h), (409, 285, 100, 100));
        assert_eq!(rect.color, Color::new(200, 100, 50, 255));
    }

    #[test]
    fn test_full_screen_quad_spans_ndc() {
        let bounds = Bounds::new(800, 600).unwrap();
        let body = Body::new(DVec2::new(800.0, 600.0), DVec2::ZERO, DVec2::ZERO);
        let quad = body_quad(&body, bounds);

        assert_eq!(quad[0].position, [-1.0, 1.0]);
        assert_eq!(quad[5].position, [1.0, -1.0]);
        assert_eq!(quad[0].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_frame_capture() {
        let bodies = vec![
            Body::new(DVec2::splat(10.0), DVec2::new(1.0, 2.0), DVec2::ZERO),
            Body::new(DVec2::splat(10.0), DVec2::new(3.0, 4.0), DVec2::ZERO),
        ];
        let frame = Frame::capture(7, Color::BLACK, &bodies);
        assert_eq!(frame.step, 7);
        assert_eq!(frame.rects.len(), 2);
        assert_eq!(frame_vertices(&bodies, Bounds::default()).len(), 12);
    }
}

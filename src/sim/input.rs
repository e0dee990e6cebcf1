//! Pointer to paddle mapping

use super::arena::Aabb;

/// Map a pointer X in `[-1, 1]` to a paddle X between the walls.
///
/// Out of range input clamps to the nearest reachable position; NaN maps to
/// the center. A paddle too wide for the gap (or a NaN width) pins to the
/// midpoint between the walls.
pub fn map_pointer_to_paddle_x(
    pointer_x: f32,
    left_wall: &Aabb,
    right_wall: &Aabb,
    paddle_half_width: f32,
) -> f32 {
    let min_x = left_wall.center.x + paddle_half_width;
    let max_x = right_wall.center.x - paddle_half_width;
    let center = (left_wall.center.x + right_wall.center.x) / 2.0;
    if min_x.is_nan() || max_x.is_nan() || min_x > max_x {
        return center;
    }
    let half_span = (max_x - min_x) / 2.0;

    let pointer_x = if pointer_x.is_nan() { 0.0 } else { pointer_x };
    (center + pointer_x * half_span).clamp(min_x, max_x)
}

/// Convert a client-space pointer X to `[-1, 1]` across a canvas
pub fn normalize_pointer(client_x: f32, rect_left: f32, rect_width: f32) -> f32 {
    if rect_width <= 0.0 {
        return 0.0;
    }
    (((client_x - rect_left) / rect_width) * 2.0 - 1.0).clamp(-1.0, 1.0)
}

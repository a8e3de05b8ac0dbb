use egui::Pos2;

use super::Line;

/// Distance within which a tap picks up a line.
pub const HIT_TOLERANCE: f32 = 20.0;
/// Number of evenly spaced samples checked along each line.
pub const HIT_SAMPLES: usize = 20;

/// Returns the index of the first line passing near `point`.
///
/// Each line is sampled at `t = 0, 1/samples, ..., (samples-1)/samples`; the
/// end point itself is never sampled. Lines are scanned in creation order and
/// the first one with a sample strictly closer than `tolerance` wins, even if a
/// later line is closer.
pub fn find_line_index(
    lines: &[Line],
    point: Pos2,
    tolerance: f32,
    samples: usize,
) -> Option<usize> {
    let samples = samples.max(1);

    lines.iter().position(|line| {
        (0..samples).any(|i| {
            let t = i as f32 / samples as f32;
            line.point_at(t).distance(point) < tolerance
        })
    })
}

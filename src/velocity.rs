use egui::Vec2;
use log::debug;

/// Maps pan speed onto a line width: the faster the finger, the thinner the
/// line. The observed speed range only ever widens.
#[derive(Debug, Clone)]
pub struct WidthMapper {
    min_seen: f32,
    max_seen: f32,
    current: f32,
    min_width: f32,
    max_width: f32,
}

impl WidthMapper {
    pub fn new(min_width: f32, max_width: f32) -> Self {
        Self {
            min_seen: f32::INFINITY,
            max_seen: f32::MIN_POSITIVE,
            current: 0.0,
            min_width,
            max_width,
        }
    }

    /// Records one pan velocity sample and returns its speed.
    pub fn record(&mut self, velocity: Vec2) -> f32 {
        let speed = velocity.x.hypot(velocity.y);
        self.current = speed;
        self.max_seen = self.max_seen.max(speed);
        self.min_seen = self.min_seen.min(speed);
        debug!(
            "velocity {:.1} (min {:.1}, max {:.1})",
            speed, self.min_seen, self.max_seen
        );
        speed
    }

    /// Width for the most recent speed, relative to every speed seen so far.
    ///
    /// Until two distinct speeds have been observed there is no range to
    /// interpolate over and the widest line is returned.
    pub fn width(&self) -> f32 {
        let range = self.max_seen - self.min_seen;
        if !range.is_finite() || range <= f32::EPSILON {
            return self.max_width;
        }

        let fraction = (self.max_seen - self.current) / range;
        fraction * (self.max_width - self.min_width) + self.min_width
    }

    pub fn min_seen(&self) -> f32 {
        self.min_seen
    }

    pub fn max_seen(&self) -> f32 {
        self.max_seen
    }

    pub fn current(&self) -> f32 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_variance_gives_max_width() {
        let mut mapper = WidthMapper::new(1.0, 10.0);
        assert_eq!(mapper.width(), 10.0);
        mapper.record(Vec2::new(30.0, 40.0));
        assert_eq!(mapper.width(), 10.0);
        mapper.record(Vec2::new(40.0, 30.0));
        assert_eq!(mapper.width(), 10.0);
    }

    #[test]
    fn test_faster_is_thinner() {
        let mut mapper = WidthMapper::new(1.0, 10.0);
        assert_eq!(mapper.record(Vec2::new(3.0, 4.0)), 5.0);
        mapper.record(Vec2::new(0.0, 105.0));
        assert!((mapper.width() - 1.0).abs() < 1e-4);

        mapper.record(Vec2::new(5.0, 0.0));
        assert!((mapper.width() - 10.0).abs() < 1e-4);

        mapper.record(Vec2::new(55.0, 0.0));
        assert!((mapper.width() - 5.5).abs() < 1e-4);
    }

    #[test]
    fn test_range_widens_monotonically() {
        let mut mapper = WidthMapper::new(1.0, 10.0);
        let speeds = [12.0, 3.0, 50.0, 7.0, 0.5, 49.0, 80.0, 1.0];
        let mut seen_min = f32::INFINITY;
        let mut seen_max = 0.0_f32;

        for speed in speeds {
            let prev_min = mapper.min_seen();
            let prev_max = mapper.max_seen();
            mapper.record(Vec2::new(speed, 0.0));
            seen_min = seen_min.min(speed);
            seen_max = seen_max.max(speed);

            assert!(mapper.min_seen() <= prev_min);
            assert!(mapper.max_seen() >= prev_max);
            assert!(mapper.min_seen() <= seen_min);
            assert!(mapper.max_seen() >= seen_max);
            let width = mapper.width();
            assert!((1.0..=10.0).contains(&width), "width {width} out of range");
        }
    }
}

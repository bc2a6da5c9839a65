use serde::{Deserialize, Serialize};

use crate::error::{LandingError, LandingResult};

const TICK_EPSILON: f64 = 1e-9;

/// Numeric target of a counter element plus the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterTarget {
    pub value: i64,
    /// Text following the numeric prefix (`"+"` for `"150+"`).
    pub suffix: String,
    /// Text the counter settles on when the original formatting is kept.
    pub original_text: String,
}

/// Parses the leading integer of `input` with `parseInt(input, 10)` semantics.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Returns the value and the remaining text, or `None` when no
/// digit is present or the value does not fit in `i64`.
#[must_use]
pub fn parse_integer_prefix(input: &str) -> Option<(i64, &str)> {
    let trimmed = input.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = unsigned
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = unsigned[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    Some((value, &unsigned[digits_len..]))
}

impl CounterTarget {
    #[must_use]
    pub fn parse(source_text: &str, original_text: &str) -> Option<Self> {
        let (value, suffix) = parse_integer_prefix(source_text)?;
        Some(Self {
            value,
            suffix: suffix.to_owned(),
            original_text: original_text.to_owned(),
        })
    }
}

/// One interpolated counter frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterFrame {
    pub value: f64,
    pub finished: bool,
}

impl CounterFrame {
    /// Integer shown on screen for this frame.
    #[must_use]
    pub fn displayed(self) -> i64 {
        self.value.floor() as i64
    }
}

/// Linear interpolation from `start` to `target` over `duration_ms`.
///
/// When `quantum_ms` is set, elapsed time is floored to whole quanta, which
/// reproduces fixed-interval stepping (`quantum_ms` per tick, `duration_ms /
/// quantum_ms` ticks) without accumulating per-tick float error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterTween {
    pub start: f64,
    pub target: f64,
    pub duration_ms: f64,
    pub quantum_ms: Option<f64>,
}

impl CounterTween {
    pub fn new(
        start: f64,
        target: f64,
        duration_ms: f64,
        quantum_ms: Option<f64>,
    ) -> LandingResult<Self> {
        if !start.is_finite() || !target.is_finite() {
            return Err(LandingError::InvalidData(
                "counter start and target must be finite".to_owned(),
            ));
        }
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(LandingError::InvalidData(
                "counter duration must be finite and > 0".to_owned(),
            ));
        }
        if let Some(quantum) = quantum_ms {
            if !quantum.is_finite() || quantum <= 0.0 || quantum > duration_ms {
                return Err(LandingError::InvalidData(
                    "counter tick must be finite, > 0 and not longer than the duration".to_owned(),
                ));
            }
        }
        Ok(Self {
            start,
            target,
            duration_ms,
            quantum_ms,
        })
    }

    /// Fixed-interval stepping: `steps` ticks of `tick_ms` each.
    pub fn stepped(start: f64, target: f64, tick_ms: f64, steps: u32) -> LandingResult<Self> {
        if steps == 0 {
            return Err(LandingError::InvalidData(
                "counter steps must be > 0".to_owned(),
            ));
        }
        Self::new(start, target, tick_ms * f64::from(steps), Some(tick_ms))
    }

    /// Returns the frame for `elapsed_ms` since start, or `None` before the first tick.
    #[must_use]
    pub fn frame_at(&self, elapsed_ms: f64) -> Option<CounterFrame> {
        let elapsed = elapsed_ms.max(0.0);
        let progress = match self.quantum_ms {
            Some(quantum) => {
                // Whole ticks elapsed; the epsilon absorbs `n * q / q` rounding.
                let ticks = (elapsed / quantum + TICK_EPSILON).floor();
                if ticks < 1.0 {
                    return None;
                }
                let total_ticks = (self.duration_ms / quantum).round().max(1.0);
                (ticks / total_ticks).min(1.0)
            }
            None => (elapsed / self.duration_ms).min(1.0),
        };
        let value = self.start + (self.target - self.start) * progress;
        if progress >= 1.0 || value >= self.target {
            return Some(CounterFrame {
                value: self.target,
                finished: true,
            });
        }
        Some(CounterFrame {
            value,
            finished: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CounterTarget, CounterTween, parse_integer_prefix};

    #[test]
    fn integer_prefix_follows_parse_int_rules() {
        assert_eq!(parse_integer_prefix("150+"), Some((150, "+")));
        assert_eq!(parse_integer_prefix("  42 drones"), Some((42, " drones")));
        assert_eq!(parse_integer_prefix("-7"), Some((-7, "")));
        assert_eq!(parse_integer_prefix("+12%"), Some((12, "%")));
        assert_eq!(parse_integer_prefix("abc"), None);
        assert_eq!(parse_integer_prefix(""), None);
        assert_eq!(parse_integer_prefix("-"), None);
        assert_eq!(parse_integer_prefix("99999999999999999999"), None);
    }

    #[test]
    fn counter_target_keeps_original_text() {
        let target = CounterTarget::parse("150+", "150+").expect("numeric");
        assert_eq!(target.value, 150);
        assert_eq!(target.suffix, "+");
        assert_eq!(target.original_text, "150+");
    }

    #[test]
    fn stepped_tween_waits_for_first_tick_and_finishes_on_last() {
        let tween = CounterTween::stepped(0.0, 150.0, 30.0, 40).expect("valid tween");
        assert!(tween.frame_at(0.0).is_none());
        assert!(tween.frame_at(29.9).is_none());

        let first = tween.frame_at(30.0).expect("first tick");
        assert_eq!(first.displayed(), 3);
        assert!(!first.finished);

        let before_last = tween.frame_at(39.0 * 30.0).expect("tick 39");
        assert_eq!(before_last.displayed(), 146);
        assert!(!before_last.finished);

        let last = tween.frame_at(40.0 * 30.0).expect("tick 40");
        assert!(last.finished);
        assert_eq!(last.displayed(), 150);
    }

    #[test]
    fn non_positive_targets_finish_on_first_frame() {
        let zero = CounterTween::stepped(0.0, 0.0, 30.0, 30).expect("valid tween");
        let frame = zero.frame_at(30.0).expect("first tick");
        assert!(frame.finished);
        assert_eq!(frame.displayed(), 0);

        let negative = CounterTween::new(0.0, -20.0, 500.0, None).expect("valid tween");
        let frame = negative.frame_at(0.0).expect("frame");
        assert!(frame.finished);
        assert_eq!(frame.displayed(), -20);
    }

    #[test]
    fn eased_tween_interpolates_linearly() {
        let tween = CounterTween::new(0.0, 1000.0, 1000.0, None).expect("valid tween");
        let half = tween.frame_at(500.0).expect("frame");
        assert!((half.value - 500.0).abs() <= 1e-9);
        assert!(tween.frame_at(2000.0).expect("frame").finished);
    }

    #[test]
    fn invalid_tweens_are_rejected() {
        assert!(CounterTween::stepped(0.0, 10.0, 30.0, 0).is_err());
        assert!(CounterTween::new(0.0, 10.0, 0.0, None).is_err());
        assert!(CounterTween::new(0.0, f64::INFINITY, 10.0, None).is_err());
        assert!(CounterTween::new(0.0, 10.0, 10.0, Some(20.0)).is_err());
    }
}

// event_core/src/math/curve.rs
use serde::{Deserialize, Serialize};

/// One key on an [`AnimationCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub in_tangent: f32,
    pub out_tangent: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }
}

/// Piecewise cubic-hermite curve, keys kept sorted by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnimationCurve {
    pub keys: Vec<Keyframe>,
}

impl AnimationCurve {
    /// Straight line between `(0, start)` and `(1, end)`.
    pub fn linear(start: f32, end: f32) -> Self {
        let slope = end - start;
        Self {
            keys: vec![
                Keyframe {
                    time: 0.0,
                    value: start,
                    in_tangent: slope,
                    out_tangent: slope,
                },
                Keyframe {
                    time: 1.0,
                    value: end,
                    in_tangent: slope,
                    out_tangent: slope,
                },
            ],
        }
    }

    /// Inserts a key, keeping the key list ordered by time.
    pub fn add_key(&mut self, key: Keyframe) {
        let at = self
            .keys
            .iter()
            .position(|k| k.time > key.time)
            .unwrap_or(self.keys.len());
        self.keys.insert(at, key);
    }

    /// Samples the curve at `time`. Clamps outside the key range.
    pub fn evaluate(&self, time: f32) -> f32 {
        match self.keys.len() {
            0 => 0.0,
            1 => self.keys[0].value,
            _ => {
                let first = &self.keys[0];
                let last = &self.keys[self.keys.len() - 1];
                if time <= first.time {
                    return first.value;
                }
                if time >= last.time {
                    return last.value;
                }
                let right = self
                    .keys
                    .iter()
                    .position(|k| k.time > time)
                    .unwrap_or(self.keys.len() - 1);
                let a = &self.keys[right - 1];
                let b = &self.keys[right];
                hermite(a, b, time)
            }
        }
    }
}

/// Cubic hermite interpolation between two keys.
fn hermite(a: &Keyframe, b: &Keyframe, time: f32) -> f32 {
    let dt = b.time - a.time;
    if dt <= f32::EPSILON {
        return a.value;
    }
    let t = (time - a.time) / dt;
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    h00 * a.value + h10 * dt * a.in_tangent + h01 * b.value + h11 * dt * b.out_tangent
}

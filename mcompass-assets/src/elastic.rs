use std::str::FromStr;

use super::Error;

/// Decay rate used by the pointer animation.
pub const DEFAULT_K: f64 = 0.1;

/// The pointer animation: overshoot from 270 to 450, then settle back to 360.
pub const DEFAULT_SEGMENTS: [Segment; 2] = [
    Segment {
        start: 270.0,
        end: 450.0,
        steps: 45,
        direction: Direction::Rise,
    },
    Segment {
        start: 450.0,
        end: 360.0,
        steps: 15,
        direction: Direction::Fall,
    },
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Rise,
    Fall,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Rise => "rise",
            Direction::Fall => "fall",
        }
    }
}

/// One part of an animation curve.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
    pub direction: Direction,
}

impl Segment {
    pub fn values(&self, k: f64) -> Vec<f64> {
        elastic_interpolation(self.start, self.end, self.steps, k, self.direction)
    }
}

impl FromStr for Segment {
    type Err = Error;

    /// Parses `rise:START:END:STEPS` or `fall:START:END:STEPS`.
    fn from_str(s: &str) -> Result<Segment, Error> {
        let invalid = || Error::InvalidSegment(s.to_string());
        let parts = s.split(':').collect::<Vec<_>>();
        if parts.len() != 4 {
            return Err(invalid());
        }
        let direction = match parts[0] {
            "rise" => Direction::Rise,
            "fall" => Direction::Fall,
            _ => return Err(invalid()),
        };
        Ok(Segment {
            start: parts[1].parse().map_err(|_| invalid())?,
            end: parts[2].parse().map_err(|_| invalid())?,
            steps: parts[3].parse().map_err(|_| invalid())?,
            direction,
        })
    }
}

/// Samples an exponential approach from `start` towards `end` at `steps`
/// evenly spaced points of `t` in `[0, 1]`.
///
/// A rising curve follows `start + (end - start) * (1 - e^(-k*t))`, a falling
/// one `end + (start - end) * e^(-k*t)`. Both begin exactly at `start`.
pub fn elastic_interpolation(
    start: f64,
    end: f64,
    steps: usize,
    k: f64,
    direction: Direction,
) -> Vec<f64> {
    if steps == 1 {
        return vec![start];
    }
    let mut result = Vec::with_capacity(steps);
    for i in 0..steps {
        let t = i as f64 / (steps - 1) as f64;
        let value = match direction {
            Direction::Rise => start + (end - start) * (1.0 - (-k * t).exp()),
            Direction::Fall => end + (start - end) * (-k * t).exp(),
        };
        result.push(value);
    }
    log::trace!(
        "{} {} -> {} in {} steps",
        direction.as_str(),
        start,
        end,
        steps
    );
    result
}

/// Concatenates the values of all segments.
pub fn sequence(segments: &[Segment], k: f64) -> Vec<f64> {
    segments.iter().flat_map(|s| s.values(k)).collect()
}

pub fn format_steps(values: &[f64]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        out += &format!("Step {}: {:.2}\n", i + 1, value);
    }
    out
}

/// Formats the values as a C `float` array definition.
pub fn format_array(name: &str, values: &[f64]) -> String {
    let mut out = format!("const float {}[] = {{", name);
    for (i, value) in values.iter().enumerate() {
        if (i & 7) == 0 {
            out += "\n   ";
        }
        out += &format!(" {:.2},", value);
    }
    out += "\n};\n";
    out
}

// src/math_utils.rs

/// Locate `x` on the uniform grid `start + j·step`, `j = 0..=last`
///
/// Returns the left cell index `j ∈ [0, last - 1]` and the weight of the
/// right node. Points outside the grid are extrapolated from the edge cell.
pub fn uniform_cell(start: f64, step: f64, last: usize, x: f64) -> (usize, f64) {
    let position = (x - start) / step;
    let cell = position.floor().max(0.0) as usize;
    let cell = cell.min(last.saturating_sub(1));
    (cell, position - cell as f64)
}

/// Linear interpolation of `values` sampled on a uniform grid
pub fn interpolate_uniform(start: f64, step: f64, values: &[f64], x: f64) -> f64 {
    if values.len() == 1 || step == 0.0 {
        return values[0];
    }
    let (j, w) = uniform_cell(start, step, values.len() - 1, x);
    (1.0 - w) * values[j] + w * values[j + 1]
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

//! Environmental richness: a scalar per cell, computed once before the run.
//!
//! The engine reads it through [`EnvironmentGrid`]; anything implementing
//! [`EnvironmentProvider`] can be sampled into one.

use crate::config::{AppConfig, EnvironmentMode};
use phyta_data::Position;

/// Source of richness values, queried once per cell.
pub trait EnvironmentProvider {
    fn value(&self, x: u32, y: u32) -> f64;
}

impl<F: Fn(u32, u32) -> f64 + ?Sized> EnvironmentProvider for F {
    fn value(&self, x: u32, y: u32) -> f64 {
        self(x, y)
    }
}

/// Same richness everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform(pub f64);

impl EnvironmentProvider for Uniform {
    fn value(&self, _x: u32, _y: u32) -> f64 {
        self.0
    }
}

/// Smoothed value noise, quantised to tenths and then scaled.
///
/// `value = round1(noise) * amplitude + offset`, floored at zero, where
/// `noise` lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseField {
    pub seed: u64,
    pub scale: f64,
    pub amplitude: f64,
    pub offset: f64,
}

impl NoiseField {
    #[must_use]
    pub fn new(seed: u64, scale: f64, amplitude: f64, offset: f64) -> Self {
        Self {
            seed,
            scale,
            amplitude,
            offset,
        }
    }

    /// Three octaves of hash noise, in `[0, 1]`.
    #[must_use]
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        let freq = 1.0 / self.scale.max(f64::EPSILON);
        let n1 = Self::hash_noise(x * freq, y * freq, self.seed) * 0.5;
        let n2 = Self::hash_noise(x * freq * 2.0, y * freq * 2.0, self.seed.wrapping_add(1)) * 0.3;
        let n3 = Self::hash_noise(x * freq * 4.0, y * freq * 4.0, self.seed.wrapping_add(2)) * 0.2;
        (n1 + n2 + n3).clamp(0.0, 1.0)
    }

    fn hash_noise(x: f64, y: f64, seed: u64) -> f64 {
        let ix = x.floor() as i64;
        let iy = y.floor() as i64;
        let fx = x - x.floor();
        let fy = y - y.floor();
        let ux = fx * fx * (3.0 - 2.0 * fx);
        let uy = fy * fy * (3.0 - 2.0 * fy);
        let v00 = Self::hash(ix, iy, seed);
        let v10 = Self::hash(ix + 1, iy, seed);
        let v01 = Self::hash(ix, iy + 1, seed);
        let v11 = Self::hash(ix + 1, iy + 1, seed);
        let v0 = v00 + ux * (v10 - v00);
        let v1 = v01 + ux * (v11 - v01);
        v0 + uy * (v1 - v0)
    }

    fn hash(x: i64, y: i64, seed: u64) -> f64 {
        let n = (x.wrapping_mul(127) ^ y.wrapping_mul(311)) as u64 ^ seed;
        let n = n.wrapping_mul(0x517c_c1b7_2722_0a95);
        let n = n ^ (n >> 32);
        (n & 0xFF_FFFF) as f64 / 0xFF_FFFF as f64
    }
}

impl EnvironmentProvider for NoiseField {
    fn value(&self, x: u32, y: u32) -> f64 {
        let tenths = (self.noise(f64::from(x), f64::from(y)) * 10.0).round() / 10.0;
        (tenths * self.amplitude + self.offset).max(0.0)
    }
}

/// Immutable rows × cols richness matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentGrid {
    rows: u32,
    cols: u32,
    cells: Vec<f64>,
}

impl EnvironmentGrid {
    /// Samples `provider` at every cell. Negative or non-finite values become 0.
    pub fn from_provider<P: EnvironmentProvider + ?Sized>(rows: u32, cols: u32, provider: &P) -> Self {
        let mut cells = Vec::with_capacity(rows as usize * cols as usize);
        for y in 0..rows {
            for x in 0..cols {
                let v = provider.value(x, y);
                cells.push(if v.is_finite() { v.max(0.0) } else { 0.0 });
            }
        }
        Self { rows, cols, cells }
    }

    #[must_use]
    pub fn uniform(rows: u32, cols: u32, value: f64) -> Self {
        Self::from_provider(rows, cols, &Uniform(value))
    }

    /// Builds a grid from row-major data, `rows[y][x]`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> anyhow::Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        anyhow::ensure!(height > 0 && width > 0, "environment grid must not be empty");
        anyhow::ensure!(
            rows.iter().all(|r| r.len() == width),
            "environment rows must all have {} columns",
            width
        );
        let rows_u32 = u32::try_from(height)?;
        let cols_u32 = u32::try_from(width)?;
        Ok(Self::from_provider(rows_u32, cols_u32, &|x: u32, y: u32| {
            rows[y as usize][x as usize]
        }))
    }

    /// Grid described by the `[environment]` section, using `seed` for noise.
    #[must_use]
    pub fn from_config(config: &AppConfig, seed: u64) -> Self {
        let env = &config.environment;
        let (rows, cols) = (config.world.rows, config.world.cols);
        match env.mode {
            EnvironmentMode::Uniform => Self::uniform(rows, cols, env.uniform_value),
            EnvironmentMode::Noise => Self::from_provider(
                rows,
                cols,
                &NoiseField::new(seed, env.noise_scale, env.amplitude, env.offset),
            ),
        }
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Richness at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<f64> {
        if pos.x < self.cols && pos.y < self.rows {
            Some(self.cells[pos.y as usize * self.cols as usize + pos.x as usize])
        } else {
            None
        }
    }

    /// Mean richness over all cells.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells.iter().sum::<f64>() / self.cells.len() as f64
    }
}

impl EnvironmentProvider for EnvironmentGrid {
    fn value(&self, x: u32, y: u32) -> f64 {
        self.get(Position::new(x, y)).unwrap_or(0.0)
    }
}

use crate::report::HeatmapSample;

/// Upper bound for either side of the grid.
const MAX_CELLS: usize = 2048;

pub struct HeatMap {
    max_x: usize,
    max_y: usize,
    max_value: usize,
    rows: Vec<Vec<usize>>,
}

impl HeatMap {
    fn new() -> Self {
        Self {
            max_x: 0,
            max_y: 0,
            max_value: 0,
            rows: Vec::new(),
        }
    }

    /// Buckets the samples into square cells of `cell_size` world units. The
    /// grid starts at the smallest sampled coordinate.
    pub fn from_samples(samples: &[HeatmapSample], cell_size: f64) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };

        let min_x = samples.iter().map(|s| s.x).fold(f64::INFINITY, f64::min);
        let min_y = samples.iter().map(|s| s.y).fold(f64::INFINITY, f64::min);

        let mut heatmap = Self::new();
        for sample in samples {
            let x = (((sample.x - min_x) / cell_size) as usize).min(MAX_CELLS - 1);
            let y = (((sample.y - min_y) / cell_size) as usize).min(MAX_CELLS - 1);

            heatmap.increment(x, y);
        }

        tracing::trace!(
            "Built HeatMap of {}x{} cells from {} samples",
            heatmap.max_x + 1,
            heatmap.max_y + 1,
            samples.len()
        );

        heatmap
    }

    fn increment(&mut self, x: usize, y: usize) {
        if self.rows.len() <= y {
            self.rows.resize(y + 1, Vec::new());
        }
        self.max_y = self.max_y.max(y);

        let row = &mut self.rows[y];
        if row.len() <= x {
            row.resize(x + 1, 0);
        }
        self.max_x = self.max_x.max(x);

        let cell = &mut row[x];
        *cell += 1;

        self.max_value = self.max_value.max(*cell);
    }

    pub fn get(&self, x: usize, y: usize) -> usize {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }

    pub fn max_value(&self) -> usize {
        self.max_value
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.max_x as u32 + 1, self.max_y as u32 + 1)
    }

    /// Red intensity image, the hottest cell is full red.
    pub fn as_image(&self) -> image::RgbImage {
        let (width, height) = self.dimensions();
        let mut buffer = image::RgbImage::new(width, height);

        tracing::trace!("Creating Image with Dimensions: {}x{}", width, height);

        if self.max_value == 0 {
            return buffer;
        }

        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let intensity = (*cell * 255 / self.max_value) as u8;
                buffer.put_pixel(x as u32, y as u32, image::Rgb([intensity, 0, 0]));
            }
        }

        buffer
    }
}

impl core::fmt::Display for HeatMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.max_value.max(1).ilog10() as usize + 1;

        for row in self.rows.iter() {
            for cell in row.iter().copied() {
                write!(f, "{: ^width$} ", cell, width = size)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

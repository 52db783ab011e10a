use std::path::PathBuf;

use sha2::{Digest, Sha256};
use stats::heatmap::HeatMap;
use stats::report::HeatmapSample;

use crate::ledger::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum HeatmapError {
    #[error("writing heatmap: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding heatmap: {0}")]
    Image(#[from] image::ImageError),
    #[error("rendering task: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("storing heatmap: {0}")]
    Store(#[from] StoreError),
}

/// Writes per-player, per-map heatmap PNGs into a directory.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    output_dir: PathBuf,
    cell_size: f64,
}

impl HeatmapRenderer {
    pub const DEFAULT_CELL_SIZE: f64 = 5.0;

    pub fn new(output_dir: impl Into<PathBuf>, cell_size: f64) -> Self {
        Self {
            output_dir: output_dir.into(),
            cell_size,
        }
    }

    /// `<player>_<map>_<hash>.png`. The map name is reduced to a safe file
    /// name, the hash of the raw name keeps distinct maps apart.
    pub fn image_path(&self, player_id: i64, map: &str) -> PathBuf {
        let sanitized: String = map
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();

        let digest = Sha256::digest(map.as_bytes());
        let mut hash = String::with_capacity(8);
        for byte in &digest[..4] {
            hash.push_str(&format!("{byte:02x}"));
        }

        self.output_dir
            .join(format!("{}_{}_{}.png", player_id, sanitized, hash))
    }

    #[tracing::instrument(skip(self, samples), fields(samples = samples.len()))]
    pub async fn render(
        &self,
        player_id: i64,
        map: &str,
        samples: &[HeatmapSample],
    ) -> Result<PathBuf, HeatmapError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let path = self.image_path(player_id, map);
        let target = path.clone();
        let samples = samples.to_vec();
        let cell_size = self.cell_size;

        tokio::task::spawn_blocking(move || {
            let heatmap = HeatMap::from_samples(&samples, cell_size);
            heatmap
                .as_image()
                .save_with_format(&target, image::ImageFormat::Png)
        })
        .await??;

        tracing::debug!("Rendered heatmap to {:?}", path);

        Ok(path)
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::formats::write_labels;
use crate::model::{Extent, LabelVolume, Seed};

use super::{OverlayStyle, Region, Result, Rgb, SegmentError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub label: u16,
    pub color: Rgb,
    pub seeds: Vec<Seed>,
    pub voxel_count: usize,
}

/// JSON sidecar describing a saved label volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub source: Option<PathBuf>,
    pub labels: PathBuf,
    pub extent: Extent,
    pub overlay: OverlayStyle,
    pub regions: Vec<RegionSummary>,
}

impl SessionReport {
    /// `palette[label - 1]` is the color drawn for `label`, as built by
    /// [`label_palette`](super::label_palette).
    pub fn new(
        source: Option<PathBuf>,
        labels: PathBuf,
        extent: Extent,
        overlay: OverlayStyle,
        regions: &[Region],
        palette: &[Rgb],
    ) -> Self {
        let regions = regions
            .iter()
            .map(|region| RegionSummary {
                label: region.label,
                color: palette
                    .get(usize::from(region.label).saturating_sub(1))
                    .copied()
                    .unwrap_or_default(),
                seeds: region.seeds.clone(),
                voxel_count: region.voxel_count,
            })
            .collect();
        Self {
            source,
            labels,
            extent,
            overlay,
            regions,
        }
    }
}

/// `labels.tif` -> `labels.json`
pub fn report_path_for(labels_path: &Path) -> PathBuf {
    labels_path.with_extension("json")
}

/// Writes the label stack and its report, returning the report path.
pub fn write_session(
    labels_path: &Path,
    labels: &LabelVolume,
    report: &SessionReport,
) -> Result<PathBuf> {
    write_labels(labels_path, labels)?;
    let report_path = report_path_for(labels_path);
    let serialized = serde_json::to_string_pretty(report)?;
    fs::write(&report_path, serialized).map_err(|source| SegmentError::Report {
        path: report_path.clone(),
        source,
    })?;
    log::info!(
        "saved {} regions to {} and {}",
        report.regions.len(),
        labels_path.display(),
        report_path.display()
    );
    Ok(report_path)
}

use std::fs;
use std::path::Path;

use super::{PipelineError, PipelineReport, PipelineSpec, Result};

/// Recipes and reports are YAML for `.yaml`/`.yml` and JSON otherwise.
fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn file_error(path: &Path) -> impl FnOnce(std::io::Error) -> PipelineError + '_ {
    move |source| PipelineError::File {
        path: path.to_path_buf(),
        source,
    }
}

pub fn load_spec(path: impl AsRef<Path>) -> Result<PipelineSpec> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(file_error(path))?;
    let spec: PipelineSpec = if is_yaml(path) {
        serde_yaml::from_str(&raw)?
    } else {
        serde_json::from_str(&raw)?
    };
    spec.validate()?;
    log::debug!(
        "loaded recipe {} with {} steps",
        path.display(),
        spec.operations.len()
    );
    Ok(spec)
}

pub fn save_report(path: impl AsRef<Path>, report: &PipelineReport) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    fs::write(path, serialized).map_err(file_error(path))
}

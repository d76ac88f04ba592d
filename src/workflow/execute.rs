use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use crate::commands::{Operation, execute_operation_with_registry};
use crate::model::DatasetF32;

use super::{PipelineReport, PipelineSpec, Result, StepReport};

pub fn run_pipeline(
    spec: &PipelineSpec,
    dataset: &DatasetF32,
    registry: &HashMap<&'static str, Arc<dyn Operation>>,
) -> Result<(DatasetF32, PipelineReport)> {
    spec.validate()?;
    dataset.validate()?;

    let mut current = dataset.clone();
    let mut steps = Vec::with_capacity(spec.operations.len());
    let mut final_measurements = BTreeMap::new();

    for (index, invocation) in spec.operations.iter().enumerate() {
        let started = Instant::now();
        let output = execute_operation_with_registry(
            registry,
            &invocation.op,
            &current,
            &invocation.params,
        )?;
        let duration_ms = started.elapsed().as_millis();
        log::info!(
            "step {}/{} {} finished in {duration_ms} ms",
            index + 1,
            spec.operations.len(),
            invocation.op
        );
        if let Some(measurements) = &output.measurements {
            final_measurements.extend(
                measurements
                    .values
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
        steps.push(StepReport {
            op: invocation.op.clone(),
            duration_ms,
            measurements: output.measurements,
        });
        current = output.dataset;
    }

    let report = PipelineReport {
        pipeline_name: spec.name.clone(),
        steps,
        final_measurements,
        input_metadata: dataset.metadata.clone(),
        output_metadata: current.metadata.clone(),
    };
    Ok((current, report))
}

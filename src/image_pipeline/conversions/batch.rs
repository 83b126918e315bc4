use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::{
        BezelCompositePipeline, BezelSet, Destination, Orientation,
        bezel_composite::{read_input_file, write_output_file},
    },
    png::PngWriter,
    raster::RasterReader,
};

/// Outcome of a batch run. Inputs that failed are listed with their error.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// `(input, output)` for every written file
    pub succeeded: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<(PathBuf, ConversionError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<R: RasterReader + Sync, W: PngWriter + Sync> BezelCompositePipeline<R, W> {
    /// Composites one screenshot with the template matching its orientation
    /// and writes it to `destination`. Returns the written path.
    pub fn process_input(
        &self,
        input: &Path,
        bezels: &BezelSet,
        destination: &Destination,
    ) -> Result<PathBuf> {
        let screenshot = self.read_screenshot(&read_input_file(input)?)?;
        let orientation = Orientation::of_image(&screenshot);
        let template = bezels.template_for(orientation)?;

        let image = self.composite(&screenshot, template)?;
        let encoded = self.encode_png(&image)?;

        let output = destination.resolve(input);
        write_output_file(&output, &encoded)?;
        Ok(output)
    }

    /// Processes every input independently, in parallel.
    ///
    /// A failing input is logged and recorded in the report; it never stops
    /// the others. With `max_parallel` set, inputs run on a dedicated pool of
    /// that many threads. [`Destination::File`] names a single output, so it
    /// takes exactly one input.
    pub fn process_batch(
        &self,
        inputs: &[PathBuf],
        bezels: &BezelSet,
        destination: &Destination,
    ) -> Result<BatchReport> {
        if let Destination::File(path) = destination {
            if inputs.len() != 1 {
                return Err(ConversionError::InvalidDestination(format!(
                    "{} takes exactly one input, got {}",
                    path.display(),
                    inputs.len()
                )));
            }
        }

        info!(inputs = inputs.len(), "Starting batch");

        let run = || {
            inputs
                .par_iter()
                .map(|input| {
                    let _span = tracing::info_span!("input", path = %input.display()).entered();
                    let result = self.process_input(input, bezels, destination);
                    match &result {
                        Ok(output) => info!(output = %output.display(), "Wrote composite"),
                        Err(e) => error!(error = %e, "Failed to process input"),
                    }
                    (input.clone(), result)
                })
                .collect::<Vec<_>>()
        };

        let results = match self.config().max_parallel {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| ConversionError::ThreadPool(e.to_string()))?
                .install(run),
            None => run(),
        };

        let mut report = BatchReport::default();
        for (input, result) in results {
            match result {
                Ok(output) => report.succeeded.push((input, output)),
                Err(e) => report.failed.push((input, e)),
            }
        }

        info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Batch complete"
        );
        Ok(report)
    }
}

//! Conversion dispatch
//!
//! Runs the validation pipeline in order (format gate, sanitization,
//! containment, existence, routine selection, output re-validation) and
//! executes exactly one routine per request on a worker thread bounded by
//! a wall-clock timeout.

use crate::convert::formats::{ExtensionClass, Format};
use crate::convert::results::ConversionResult;
use crate::convert::routines;
use crate::error::{ConvertError, RoutineError, ValidationError};
use crate::utils::temp_write_path;
use crate::validation::{PathValidator, sanitize_filename};
use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

type Routine = fn(&Path, &Path) -> Result<(), RoutineError>;

/// Dispatches validated conversion requests to the format routines.
///
/// Holds one validator per base directory; both are canonicalized once at
/// construction and immutable afterwards.
pub struct Converter {
    input: PathValidator,
    output: PathValidator,
    timeout: Duration,
}

impl Converter {
    /// Build a converter over the upload and converted-output roots.
    /// Both directories must exist.
    pub fn new(
        input_dir: &Path,
        output_dir: &Path,
        timeout: Duration,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            input: PathValidator::new(input_dir)?,
            output: PathValidator::new(output_dir)?,
            timeout,
        })
    }

    /// Convert `raw_filename` from the input root into `output_format`.
    ///
    /// Validation failures are reported before any filesystem mutation;
    /// an unvalidated value never reaches a file operation.
    pub fn convert(
        &self,
        raw_filename: &str,
        output_format: &str,
    ) -> Result<ConversionResult, ConvertError> {
        // The format gate runs first: an unknown format is rejected
        // before any path resolution or filesystem access
        let format = Format::from_str(output_format)?;

        let filename = sanitize_filename(raw_filename).map_err(|e| {
            warn!("Rejected filename for conversion: {}", e);
            ConvertError::InvalidFilename(e.to_string())
        })?;

        let input_path = self
            .input
            .resolve(&filename)
            .map_err(|_| ConvertError::AccessDenied(filename.to_string()))?;

        if !input_path.is_file() {
            return Err(ConvertError::NotFound(filename.to_string()));
        }

        let ext = filename.extension().unwrap_or("");
        let Some(input_class) = ExtensionClass::from_extension(ext) else {
            return Err(ConvertError::UnsupportedConversion {
                input: ext.to_string(),
                output: format.to_string(),
            });
        };

        let routine = select_routine(input_class, format)?;

        // The derived output name goes through the validator again before
        // anything is written
        let output_filename = filename.with_extension(format.as_str());
        let output_path = self
            .output
            .resolve(&output_filename)
            .map_err(|_| ConvertError::AccessDenied(output_filename.to_string()))?;

        self.run_routine(routine, &input_path, &output_path)?;

        info!("Converted {} -> {}", filename, output_filename);
        Ok(ConversionResult {
            output_filename,
            output_path,
        })
    }

    /// Run one routine on a worker thread under the wall-clock timeout.
    ///
    /// The routine writes to a temporary sibling of the final path; the
    /// rename happens here, only on success, so a failed or expired
    /// conversion never leaves output visible under the final name.
    fn run_routine(
        &self,
        routine: Routine,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), ConvertError> {
        let temp_path = temp_write_path(output_path);

        let (tx, rx) = mpsc::channel();
        let worker_input = input_path.to_path_buf();
        let worker_temp = temp_path.clone();
        thread::spawn(move || {
            let _ = tx.send(routine(&worker_input, &worker_temp));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(())) => fs::rename(&temp_path, output_path).map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                error!("Failed to move converted file into place: {}", e);
                ConvertError::Failed(e.to_string())
            }),
            Ok(Err(e)) => {
                let _ = fs::remove_file(&temp_path);
                error!("Conversion routine failed: {}", e);
                Err(ConvertError::Failed(e.to_string()))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // The worker is detached; at worst its temporary output
                // remains, never the final name
                let _ = fs::remove_file(&temp_path);
                warn!("Conversion timed out after {:?}", self.timeout);
                Err(ConvertError::Timeout(self.timeout))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                let _ = fs::remove_file(&temp_path);
                error!("Conversion worker exited without a result");
                Err(ConvertError::Failed("conversion worker exited unexpectedly".into()))
            }
        }
    }
}

/// Select exactly one routine for the (input class, output format) pair.
/// Pairings outside the table fail; there is no generic fallback.
fn select_routine(input: ExtensionClass, output: Format) -> Result<Routine, ConvertError> {
    match (input, output) {
        (ExtensionClass::Image, Format::Pdf) => Ok(routines::image_to_pdf),
        (ExtensionClass::Text, Format::Pdf) => Ok(routines::text_to_pdf),
        (ExtensionClass::Image, Format::Png) => Ok(routines::image_to_png),
        (ExtensionClass::Image, Format::Jpg) => Ok(routines::image_to_jpg),
        (ExtensionClass::Text, Format::Txt) | (ExtensionClass::Pdf, Format::Pdf) => {
            Ok(routines::copy_file)
        }
        (input, output) => Err(ConvertError::UnsupportedConversion {
            input: input.to_string(),
            output: output.to_string(),
        }),
    }
}

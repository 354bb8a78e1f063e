//! Conversion facade for a single input file.
//!
//! Derives the output paths at construction, checks preconditions, then
//! runs the data pipeline and the control file generator in turn.

use crate::config::ConverterConfig;
use crate::constants::{DAT_SUFFIX, INP_SUFFIX};
use crate::control_file::ControlFileGenerator;
use crate::error::{ConverterError, OutputKind, Result};
use crate::models::ConversionReport;
use crate::pipeline;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Converts one tab-delimited export into an Mplus `.dat`/`.inp` pair
#[derive(Debug)]
pub struct MplusConverter<'a> {
    in_file: PathBuf,
    out_dat_file: PathBuf,
    out_inp_file: PathBuf,
    config: &'a ConverterConfig,
}

impl<'a> MplusConverter<'a> {
    /// Create a converter, failing on an empty path or invalid configuration
    pub fn new(in_file: impl Into<PathBuf>, config: &'a ConverterConfig) -> Result<Self> {
        let in_file = in_file.into();
        if in_file.as_os_str().is_empty() {
            return Err(ConverterError::invalid_argument("input path must not be empty"));
        }
        config.validate()?;

        let (out_dat_file, out_inp_file) = derive_output_paths(&in_file)?;

        Ok(Self {
            in_file,
            out_dat_file,
            out_inp_file,
            config,
        })
    }

    pub fn in_file(&self) -> &Path {
        &self.in_file
    }

    pub fn out_dat_file(&self) -> &Path {
        &self.out_dat_file
    }

    pub fn out_inp_file(&self) -> &Path {
        &self.out_inp_file
    }

    /// Convert the input file, writing both artifacts
    pub fn process(&self) -> Result<ConversionReport> {
        self.confirm_input_exists()?;
        self.confirm_outputs_absent()?;

        info!("Converting {}", self.in_file.display());
        let data = pipeline::run(&self.in_file, self.config)?;

        write_file(&self.out_dat_file, &data.render(self.config.newline()))?;
        debug!(
            "Wrote {} data rows to {}",
            data.lines.len(),
            self.out_dat_file.display()
        );

        let dat_file_name = file_name(&self.out_dat_file);
        let generator = ControlFileGenerator::new(self.config, &data.variable_names, &dat_file_name);
        let too_long_names = generator.too_long_names();
        let duplicate_names = generator.duplicate_names();

        if !too_long_names.is_empty() {
            warn!(
                "{}: variable names longer than {} characters: {}",
                self.in_file.display(),
                self.config.max_name_length,
                too_long_names.join(", ")
            );
        }
        if !duplicate_names.is_empty() {
            warn!(
                "{}: variable names are not unique: {}",
                self.in_file.display(),
                duplicate_names.join(", ")
            );
        }

        write_file(&self.out_inp_file, &generator.generate())?;
        debug!("Wrote control file {}", self.out_inp_file.display());

        Ok(ConversionReport {
            input: self.in_file.clone(),
            dat_file: self.out_dat_file.clone(),
            inp_file: self.out_inp_file.clone(),
            data_rows: data.lines.len(),
            variable_names: data.variable_names,
            too_long_names,
            duplicate_names,
        })
    }

    fn confirm_input_exists(&self) -> Result<()> {
        if !self.in_file.is_file() {
            return Err(ConverterError::InputNotFound {
                path: self.in_file.clone(),
            });
        }
        Ok(())
    }

    fn confirm_outputs_absent(&self) -> Result<()> {
        for (kind, path) in [
            (OutputKind::Dat, &self.out_dat_file),
            (OutputKind::Inp, &self.out_inp_file),
        ] {
            if path.exists() {
                return Err(ConverterError::OutputAlreadyExists {
                    kind,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }
}

/// `<dir>/<name with spaces as underscores>.dat` and `.inp`
pub fn derive_output_paths(in_file: &Path) -> Result<(PathBuf, PathBuf)> {
    let name = in_file.file_name().ok_or_else(|| {
        ConverterError::invalid_argument(format!(
            "input path has no file name: {}",
            in_file.display()
        ))
    })?;
    let sanitized = name.to_string_lossy().replace(' ', "_");

    Ok((
        in_file.with_file_name(format!("{sanitized}{DAT_SUFFIX}")),
        in_file.with_file_name(format!("{sanitized}{INP_SUFFIX}")),
    ))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| ConverterError::io(path, e))
}

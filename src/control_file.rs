//! Mplus control file (`.inp`) generation.
//!
//! Sections are emitted in a fixed order, each followed by a blank line.
//! The two diagnostic sections and `VARIABLE:` are skipped when they have
//! nothing to say; `DATA:` and `ANALYSIS:` are always written.

use crate::config::ConverterConfig;
use crate::constants::keywords;
use crate::wrap::wrap_with_prefix;
use std::collections::HashMap;

/// Builds control file text for one converted data file
pub struct ControlFileGenerator<'a> {
    config: &'a ConverterConfig,
    variable_names: &'a [String],
    dat_file_name: &'a str,
}

impl<'a> ControlFileGenerator<'a> {
    /// `dat_file_name` is the base name of the data file, not its full path
    pub fn new(
        config: &'a ConverterConfig,
        variable_names: &'a [String],
        dat_file_name: &'a str,
    ) -> Self {
        Self {
            config,
            variable_names,
            dat_file_name,
        }
    }

    pub fn generate(&self) -> String {
        let mut out = String::new();

        self.add_too_long_names(&mut out);
        self.add_duplicate_names(&mut out);
        self.add_data(&mut out);
        self.add_variables(&mut out);
        self.add_analysis(&mut out);

        out
    }

    /// Names longer than the configured maximum, in header order
    pub fn too_long_names(&self) -> Vec<String> {
        self.variable_names
            .iter()
            .filter(|name| name.chars().count() > self.config.max_name_length)
            .cloned()
            .collect()
    }

    /// First occurrence of every case-insensitively repeated name
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut groups: Vec<(&String, usize)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for name in self.variable_names {
            let key = name.to_lowercase();
            match positions.get(&key) {
                Some(&position) => groups[position].1 += 1,
                None => {
                    positions.insert(key, groups.len());
                    groups.push((name, 1));
                }
            }
        }

        groups
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn add_too_long_names(&self, out: &mut String) {
        let names = self.too_long_names();
        if names.is_empty() {
            return;
        }
        self.line(
            out,
            &format!(
                "{}\tThe following variable names are too long, you should make them shorter:",
                keywords::COMMENT
            ),
        );
        self.line(out, &self.wrap_comment(&names));
        self.blank(out);
    }

    fn add_duplicate_names(&self, out: &mut String) {
        let names = self.duplicate_names();
        if names.is_empty() {
            return;
        }
        self.line(
            out,
            &format!(
                "{}\tThe following variable names are not unique:",
                keywords::COMMENT
            ),
        );
        self.line(out, &self.wrap_comment(&names));
        self.blank(out);
    }

    fn add_data(&self, out: &mut String) {
        let indent = &self.config.indent;
        self.line(out, keywords::DATA);
        self.line(
            out,
            &format!("{indent}{} {};", keywords::FILE_IS, self.dat_file_name),
        );
        self.blank(out);
    }

    fn add_variables(&self, out: &mut String) {
        let has_names = !self.variable_names.is_empty();
        if !has_names && !self.config.has_empty_replacement() {
            return;
        }

        let indent = &self.config.indent;
        self.line(out, keywords::VARIABLE);

        if let Some(first) = self.variable_names.first() {
            self.line(out, &format!("{indent}{}", keywords::NAMES_ARE));
            let names = wrap_with_prefix(
                &self.variable_names.join(" "),
                &format!("{indent}\t"),
                self.config.max_line_length,
                self.config.newline(),
            );
            self.line(out, &format!("{names};"));
            self.line(out, &format!("{indent}{} {first};", keywords::IDVARIABLE_IS));
        }

        if let Some(token) = &self.config.empty_replacement {
            self.line(
                out,
                &format!("{indent}{} ({token});", keywords::MISSING_ARE_ALL),
            );
        }

        self.blank(out);
    }

    fn add_analysis(&self, out: &mut String) {
        let indent = &self.config.indent;
        self.line(out, keywords::ANALYSIS);
        self.line(
            out,
            &format!("{indent}{} {};", keywords::TYPE_IS, self.config.analysis_type),
        );
        self.blank(out);
    }

    fn wrap_comment(&self, names: &[String]) -> String {
        wrap_with_prefix(
            &names.join(", "),
            &format!("{}{}", keywords::COMMENT, self.config.indent),
            self.config.max_line_length,
            self.config.newline(),
        )
    }

    fn line(&self, out: &mut String, text: &str) {
        out.push_str(text);
        out.push_str(self.config.newline());
    }

    fn blank(&self, out: &mut String) {
        out.push_str(self.config.newline());
    }
}

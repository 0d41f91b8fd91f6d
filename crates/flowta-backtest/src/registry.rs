//! Registry of report sinks.

use std::collections::BTreeMap;
use std::path::PathBuf;

use flowta_core::error::{FlowError, ReportError};
use flowta_core::traits::Report;

use crate::{CsvReport, DataReport, JsonReport};

/// Options shared by every report builder.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Directory reports write their files into
    pub output_dir: PathBuf,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Creates a report from options.
pub type ReportBuilder = fn(&ReportOptions) -> Box<dyn Report>;

/// Named report builders.
pub struct ReportRegistry {
    builders: BTreeMap<String, ReportBuilder>,
}

impl ReportRegistry {
    /// Create a registry with the built-in reports.
    pub fn new() -> Self {
        let mut registry = Self {
            builders: BTreeMap::new(),
        };

        registry.register("data", data_report);
        registry.register("csv", csv_report);
        registry.register("json", json_report);

        registry
    }

    /// Register a builder, replacing any builder with the same name.
    pub fn register(&mut self, name: &str, builder: ReportBuilder) {
        self.builders.insert(name.to_string(), builder);
    }

    /// Names of all registered reports.
    pub fn names(&self) -> Vec<&String> {
        self.builders.keys().collect()
    }

    /// Check if a report exists.
    pub fn exists(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Build a report by name.
    pub fn build(&self, name: &str, options: &ReportOptions) -> Result<Box<dyn Report>, FlowError> {
        let builder = self.builders.get(name).ok_or_else(|| {
            FlowError::Config(ReportError::UnknownReport(name.to_string()).to_string())
        })?;
        Ok(builder(options))
    }
}

fn data_report(_options: &ReportOptions) -> Box<dyn Report> {
    Box::new(DataReport::new())
}

fn csv_report(options: &ReportOptions) -> Box<dyn Report> {
    Box::new(CsvReport::new(options.output_dir.clone()))
}

fn json_report(options: &ReportOptions) -> Box<dyn Report> {
    Box::new(JsonReport::new(options.output_dir.clone()))
}

impl Default for ReportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::section::*;

/// Destination for a rendered template
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSink {
    fn accept(&self, contents: &str) -> Result<()>;
}

/// Writes the template to a file, replacing any previous contents
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateSink for FileSink {
    fn accept(&self, contents: &str) -> Result<()> {
        debug!(path = %self.path.display(), bytes = contents.len(), "writing template");
        fs::write(&self.path, contents).map_err(|source| Error::Sink {
            path: self.path.clone(),
            source,
        })
    }
}

/// Prints the template to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl TemplateSink for StdoutSink {
    fn accept(&self, contents: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", contents)
            .and_then(|_| stdout.flush())
            .map_err(|source| Error::Sink {
                path: PathBuf::from("<stdout>"),
                source,
            })
    }
}

/// Renders a template once and hands the result to a sink
pub struct TemplateGenerator<S> {
    template: Section,
    sink: S,
}

impl<S: TemplateSink> TemplateGenerator<S> {
    pub fn new(template: Section, sink: S) -> Self {
        Self { template, sink }
    }

    pub fn generate(&self) -> Result<()> {
        let contents = self.template.render();
        info!(lines = contents.lines().count(), "rendered template");
        self.sink.accept(&contents)
    }
}

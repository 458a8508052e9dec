use std::path::PathBuf;

use anyhow::{Context, Result};
use cftemplate::stack::StackLoader;
use cftemplate::{FileSink, IntoSection, StdoutSink, TemplateGenerator};
use clap::{Arg, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("cftemplate")
        .about("Generate a CloudFormation YAML template from a JSON stack definition")
        .arg(
            Arg::new("input")
                .help("Stack definition JSON file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the template to this file instead of stdout")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing input file")?;

    let template = StackLoader::from_path(input)
        .with_context(|| format!("failed to load stack definition {}", input.display()))?
        .into_section();

    match matches.get_one::<PathBuf>("output") {
        Some(path) => TemplateGenerator::new(template, FileSink::new(path)).generate()?,
        None => TemplateGenerator::new(template, StdoutSink).generate()?,
    }

    Ok(())
}

//! Ties the command line, configuration and input adapters to the procedure.

use std::io::Write;

use anyhow::{Context, Result};
use holm_sidak_core::{
    compute, GroupInput, JsonReporter, ProcedureResult, Reporter, StudentsTDistribution,
    TDistribution, TerminalReporter,
};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::{Config, OutputFormat};
use crate::input::{parse_inline_group, read_group_file, read_grouped_table, read_request};

/// Everything needed to run one analysis.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub config: Config,
    pub groups: Vec<GroupInput>,
}

impl Analysis {
    /// Resolve configuration and groups from the command line.
    ///
    /// Options come from the defaults, then the config file, then whichever
    /// options a request document sets, then CLI flags. Groups come from the
    /// request document, or else from group files, inline groups and the
    /// pooled table, in that order.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file or any input cannot be read.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Config::load_from(cli.config.as_deref())?;

        let groups = match &cli.request {
            Some(path) => {
                let request = read_request(path)?;
                config.procedure = request.options.apply_to(config.procedure.options()).into();
                request.groups
            }
            None => Self::collect_groups(cli)?,
        };

        cli.apply_to_config(&mut config);
        debug!(?config, groups = groups.len(), "resolved analysis");

        Ok(Self { config, groups })
    }

    fn collect_groups(cli: &Cli) -> Result<Vec<GroupInput>> {
        let mut groups = Vec::new();

        for path in &cli.files {
            groups.push(read_group_file(path)?);
        }

        for arg in &cli.group {
            let group =
                parse_inline_group(arg).with_context(|| format!("Invalid group '{}'", arg))?;
            groups.push(group);
        }

        if let Some(path) = &cli.grouped {
            groups.extend(read_grouped_table(path)?);
        }

        Ok(groups)
    }

    /// Run the procedure with the given t-distribution.
    pub fn run(&self, dist: &dyn TDistribution) -> Result<ProcedureResult> {
        let result = compute(&self.groups, &self.config.procedure.options(), dist)
            .context("Holm-Sidak procedure failed")?;
        Ok(result)
    }

    /// Render a result in the configured output format.
    pub fn report(&self, result: &ProcedureResult, writer: &mut dyn Write) -> Result<()> {
        let reporter: Box<dyn Reporter> = match self.config.output.format {
            OutputFormat::Terminal if self.config.output.colors => {
                Box::new(TerminalReporter::new())
            }
            OutputFormat::Terminal => Box::new(TerminalReporter::without_colors()),
            OutputFormat::Json => Box::new(JsonReporter::new()),
        };
        reporter.report(result, writer)?;
        Ok(())
    }
}

/// Resolve, compute and report in one go, using the statrs t-distribution.
pub fn run(cli: &Cli, writer: &mut dyn Write) -> Result<ProcedureResult> {
    let analysis = Analysis::from_cli(cli)?;
    info!(groups = analysis.groups.len(), "running Holm-Sidak procedure");

    let result = analysis.run(&StudentsTDistribution::new())?;
    analysis.report(&result, writer)?;

    Ok(result)
}

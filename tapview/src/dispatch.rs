// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, TapviewExitCode,
    errors::Result,
    output::{OutputContext, OutputOpts, OutputWriter, StdoutStyles},
};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::io::Write;
use tap_report::{DisplayStatus, TestCounts};
use tapview_runner::{
    compare::Comparator,
    config::TapviewConfig,
    history::{HistoryEntry, HistoryWalker},
    job::{BuildNumber, Job, JobLookup, JobRegistry},
    trend::{Series, TrendSeries},
    view::{RenderedTable, Row, RowKind, ViewFilter, ViewPreset, classify_results},
};
use tracing::debug;

/// Inspect TAP test results recorded for a set of jobs.
///
/// Jobs, builds and their TAP results are read from a JSON export of a job registry.
#[derive(Debug, Parser)]
#[command(version)]
pub struct TapviewApp {
    /// Path to the JSON export of the job registry
    #[arg(long, value_name = "PATH", env = "TAPVIEW_REGISTRY")]
    registry: Utf8PathBuf,

    /// Config file [default: .config/tapview.toml under the root]
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<Utf8PathBuf>,

    /// Directory the repository config is looked up in
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    root: Utf8PathBuf,

    #[command(flatten)]
    output: OutputOpts,

    #[command(subcommand)]
    command: Command,
}

impl TapviewApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the exit code on success.
    pub fn exec(self, output_writer: &mut OutputWriter) -> Result<i32> {
        let config = TapviewConfig::from_sources(&self.root, self.config.as_deref())?;
        let registry = JobRegistry::from_json_path(&self.registry)?;
        debug!(
            "read {} jobs from {}",
            registry.jobs().count(),
            self.registry
        );

        let styles = StdoutStyles::new(self.output.color);
        let mut writer = output_writer.stdout_writer();
        let ctx = CommandContext {
            registry: &registry,
            config: &config,
            styles: &styles,
        };
        self.command.exec(&ctx, &mut writer)?;
        writer.flush()?;

        Ok(TapviewExitCode::OK)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the counters of a job's latest completed build
    Stats {
        /// Full name of the job
        job: String,
    },

    /// Print a job's build history, newest first
    ///
    /// For a matrix job, the history of each axis is printed after the job's own. With --file and
    /// --test, the status of a single test is printed for each build instead.
    History {
        /// Full name of the job
        job: String,

        /// File name of the test set the test belongs to
        #[arg(long, requires = "test")]
        file: Option<String>,

        /// Exact description of the test
        #[arg(long, requires = "file")]
        test: Option<String>,
    },

    /// Compare a job's latest completed build with the previous completed build
    Regression {
        /// Full name of the job
        job: String,
    },

    /// Compare a job's latest completed build with its counterpart's
    Compatibility {
        /// Full name of the job
        job: String,
    },

    /// Print the rows of a build's results page visible under a view preset
    Rows {
        /// Full name of the job
        job: String,

        /// Build number [default: the latest completed build]
        #[arg(long, value_name = "NUMBER")]
        build: Option<u32>,

        /// View preset [default: view.default-preset from the config]
        #[arg(long, value_name = "PRESET")]
        preset: Option<ViewPreset>,
    },

    /// Print the pass/fail/skip trend of a job, newest first
    Trend {
        /// Full name of the job
        job: String,
    },
}

struct CommandContext<'a> {
    registry: &'a JobRegistry,
    config: &'a TapviewConfig,
    styles: &'a StdoutStyles,
}

impl<'a> CommandContext<'a> {
    fn job(&self, name: &str) -> Result<&'a Job> {
        self.registry
            .job(name)
            .ok_or_else(|| ExpectedError::job_not_found(name))
    }

    fn comparator(&self) -> Comparator<'a, JobRegistry> {
        Comparator::new(self.registry, self.config.substitution_rule())
    }
}

impl Command {
    fn exec(self, ctx: &CommandContext<'_>, writer: &mut dyn Write) -> Result<()> {
        match self {
            Command::Stats { job } => {
                let job = ctx.job(&job)?;
                write!(writer, "{}: ", job.display_name().style(ctx.styles.heading))?;
                match ctx.comparator().latest_stats(job) {
                    Some(counts) => write_counts(writer, ctx.styles, &counts)?,
                    None => writeln!(writer, "no results")?,
                }
            }
            Command::History { job, file, test } => {
                let job = ctx.job(&job)?;
                let walker = HistoryWalker::new(ctx.registry, ctx.config.history_max_builds());
                writeln!(writer, "{}", walker.title(job).style(ctx.styles.heading))?;

                if let (Some(file), Some(test)) = (file, test) {
                    for entry in walker.test_status_history(job, &file, &test) {
                        write!(writer, "  #{:<6}", entry.build)?;
                        match entry.status {
                            Some(status) => {
                                writeln!(writer, "{}", status_str(ctx.styles, status))?
                            }
                            None => writeln!(writer, "-")?,
                        }
                    }
                    return Ok(());
                }

                write_history(writer, ctx.styles, &walker.history(job))?;
                for child in walker.children_histories(job) {
                    writeln!(writer, "{}", child.title.style(ctx.styles.heading))?;
                    write_history(writer, ctx.styles, &child.entries)?;
                }
            }
            Command::Regression { job } => {
                let job = ctx.job(&job)?;
                let status = ctx.comparator().regression(job);
                writeln!(
                    writer,
                    "{}: {status}",
                    job.display_name().style(ctx.styles.heading)
                )?;
            }
            Command::Compatibility { job } => {
                let job = ctx.job(&job)?;
                let comparator = ctx.comparator();
                let status = comparator.compatibility(job);
                write!(
                    writer,
                    "{}: {status}",
                    job.display_name().style(ctx.styles.heading)
                )?;
                match comparator.counterpart_job(job) {
                    Some(counterpart) => writeln!(writer, " (counterpart: {})", counterpart.name)?,
                    None => writeln!(writer)?,
                }
            }
            Command::Rows { job, build, preset } => {
                let job = ctx.job(&job)?;
                let number = match build {
                    Some(number) => BuildNumber::new(number),
                    None => {
                        job.builds
                            .last_completed()
                            .ok_or_else(|| ExpectedError::build_not_found(&job.name, None))?
                            .number
                    }
                };
                let results = ctx
                    .registry
                    .build_results(job, number)
                    .ok_or_else(|| ExpectedError::build_not_found(&job.name, Some(number.get())))?;
                let page = classify_results(&results)?;

                let filter = ViewFilter::new(preset.unwrap_or(ctx.config.default_preset()));
                debug!("showing build {number} of {} as {}", job.name, filter.preset());
                for table in &page.tables {
                    write_table(writer, ctx.styles, &filter, table)?;
                }
            }
            Command::Trend { job } => {
                let job = ctx.job(&job)?;
                let walker = HistoryWalker::new(ctx.registry, ctx.config.trend_max_builds());
                let trend = TrendSeries::from_history(&walker.history(job));

                write!(writer, "{:<8}", "build".style(ctx.styles.heading))?;
                for series in Series::ALL {
                    write!(writer, "{:>10}", series.label().style(ctx.styles.heading))?;
                }
                writeln!(writer)?;
                for point in trend.points() {
                    write!(writer, "{:<8}", point.label)?;
                    for series in Series::ALL {
                        write!(writer, "{:>10}", point.value(series))?;
                    }
                    writeln!(writer)?;
                }
            }
        }

        Ok(())
    }
}

fn write_counts(
    writer: &mut dyn Write,
    styles: &StdoutStyles,
    counts: &TestCounts,
) -> std::io::Result<()> {
    write!(
        writer,
        "{} passed, {} failed, {} skipped ({} total",
        counts.passed.style(styles.pass),
        counts.failed.style(styles.fail),
        counts.skipped.style(styles.skip),
        counts.total(),
    )?;
    if counts.todo > 0 {
        write!(writer, ", {} todo", counts.todo)?;
    }
    if counts.bail_outs > 0 {
        write!(writer, ", {} bail-outs", counts.bail_outs)?;
    }
    writeln!(writer, ")")
}

fn write_history(
    writer: &mut dyn Write,
    styles: &StdoutStyles,
    entries: &[HistoryEntry<'_>],
) -> std::io::Result<()> {
    for entry in entries {
        write!(writer, "  #{:<6}", entry.build)?;
        match &entry.result {
            Some(results) => write_counts(writer, styles, &results.stats())?,
            None => writeln!(writer, "no results")?,
        }
    }
    Ok(())
}

fn write_table(
    writer: &mut dyn Write,
    styles: &StdoutStyles,
    filter: &ViewFilter,
    table: &RenderedTable,
) -> std::io::Result<()> {
    match &table.axis {
        Some(axis) => writeln!(
            writer,
            "{}",
            format!("{axis}: {}", table.file_name).style(styles.heading)
        )?,
        None => writeln!(writer, "{}", table.file_name.style(styles.heading))?,
    }

    for row in filter.visible_rows(table) {
        write_row(writer, styles, row)?;
    }
    Ok(())
}

fn write_row(writer: &mut dyn Write, styles: &StdoutStyles, row: &Row) -> std::io::Result<()> {
    match &row.kind {
        RowKind::Header { .. } => Ok(()),
        RowKind::Comment { text } => writeln!(writer, "  # {text}"),
        RowKind::BailOut { reason } => writeln!(writer, "  Bail out! {reason}"),
        RowKind::Test(test) => {
            write!(
                writer,
                "  {} {:>3} {}",
                status_str(styles, test.status),
                test.ordinal,
                test.description
            )?;
            if let Some(reason) = test.directive_reason.as_deref().filter(|r| !r.is_empty()) {
                write!(writer, " ({reason})")?;
            }
            writeln!(writer)
        }
        RowKind::Detail(detail) => {
            for entry in &detail.entries {
                writeln!(writer, "           {}: {}", entry.key, entry.value)?;
            }
            Ok(())
        }
    }
}

fn status_str(styles: &StdoutStyles, status: DisplayStatus) -> String {
    let style = match status {
        DisplayStatus::Pass => styles.pass,
        DisplayStatus::Fail => styles.fail,
        DisplayStatus::Skip | DisplayStatus::Todo => styles.skip,
    };
    format!("{:>4}", status.as_str().style(style))
}

//! Command implementations

use super::args::{Args, Commands, GlobalArgs};
use crate::config::{load_config, load_config_for_scan, CliArgs};
use crate::config::file::DEFAULT_CONFIG_FILE;
use crate::config::parser::create_default_config;
use crate::core::impact::ImpactPredictor;
use crate::core::project::{AnalysisRun, ProjectAnalyzer};
use crate::error::{Result, ResultExt, RippleError};
use crate::models::config::Settings;
use crate::models::plan::{ChangeType, PlanStatus};
use crate::output::{create_formatter, create_progress_callback, create_writer, AnalysisReport, Formatter, ProgressReporter};
use crate::planner::{validate_change_under, ChangePlanner, PlanStore};
use crate::utils::path_resolver::{normalize_path, path_key};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// A parsed invocation ready to run
#[derive(Debug)]
pub struct Command {
    global: GlobalArgs,
    command: Commands,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            global: args.global,
            command: args.command,
        }
    }

    pub fn cli_args(&self) -> CliArgs {
        CliArgs::from_global(&self.global)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Analyze => self.analyze(),
            Commands::Impact { target, change } => self.impact(target, (*change).into()),
            Commands::Plan {
                target,
                change,
                description,
                execute,
                rollback_on_failure,
            } => self.plan(target, (*change).into(), description, *execute, *rollback_on_failure),
            Commands::Validate {
                target,
                change,
                content_file,
            } => self.validate(target, (*change).into(), content_file.as_deref()),
            Commands::Graph { dot } => self.graph(*dot),
            Commands::Init { force } => self.init(*force),
        }
    }

    fn scan_settings(&self) -> Result<Settings> {
        let settings = load_config_for_scan(&self.cli_args())?;
        debug!(?settings, "resolved settings");
        Ok(settings)
    }

    fn formatter(settings: &Settings) -> Box<dyn Formatter> {
        create_formatter(settings.output_format, settings.use_colors, settings.verbose, settings.quiet)
    }

    fn emit(settings: &Settings, content: &str) -> Result<()> {
        create_writer(settings.output_file.as_ref()).write(content)?;
        if let Some(path) = &settings.output_file {
            if !settings.quiet {
                eprintln!("Output written to {}", path.display());
            }
        }
        Ok(())
    }

    /// Run a full analysis with progress reporting
    fn run_analysis(settings: &Settings) -> Result<AnalysisRun> {
        let reporter = Arc::new(ProgressReporter::with_bar(
            settings.quiet,
            settings.verbose,
            settings.show_progress,
        ));

        reporter.print(&format!(
            "{} v{} - analyzing {}",
            crate::NAME,
            crate::VERSION,
            settings.scan_path.display()
        ));
        reporter.start(0, "Reading sources");

        let result = ProjectAnalyzer::new(settings.clone())
            .analyze_with_progress(create_progress_callback(reporter.clone()));

        match &result {
            Ok(run) => reporter.finish(&format!(
                "Analyzed {} files in {:.2}s",
                run.graph.len(),
                run.duration.as_secs_f64()
            )),
            Err(_) => reporter.finish("Analysis aborted"),
        }

        let run = result?;
        for err in &run.errors {
            warn!("{}", err);
        }
        Ok(run)
    }

    fn analyze(&self) -> Result<()> {
        let settings = self.scan_settings()?;
        let run = Self::run_analysis(&settings)?;

        let report = AnalysisReport::new(&run.graph, &run.errors, run.duration);
        let output = Self::formatter(&settings).format_analysis(&report, &run.graph)?;
        Self::emit(&settings, &output)
    }

    fn impact(&self, target: &str, kind: crate::models::impact::ChangeKind) -> Result<()> {
        let settings = self.scan_settings()?;
        let run = Self::run_analysis(&settings)?;

        let key = normalize_path(target);
        if !run.graph.contains(&key) {
            warn!(target = %key, "target is not an analyzed file; no impacts predicted");
        }

        let impacts = ImpactPredictor::predict(&key, kind, &run.graph);
        let output = Self::formatter(&settings).format_impacts(&key, &impacts)?;
        Self::emit(&settings, &output)
    }

    fn plan(
        &self,
        target: &str,
        change: ChangeType,
        description: &str,
        execute: bool,
        rollback_on_failure: bool,
    ) -> Result<()> {
        let settings = self.scan_settings()?;
        let run = Self::run_analysis(&settings)?;

        let planner = ChangePlanner::new(settings.clone(), PlanStore::shared());
        let plan = planner.create_change_plan_with_graph(&run.graph, target, change, description)?;

        if !execute {
            let output = Self::formatter(&settings).format_plan(&plan)?;
            return Self::emit(&settings, &output);
        }

        let outcome = planner.execute_to_completion(&plan.id);
        let failure = match outcome {
            Ok(_) => None,
            Err(err) => {
                warn!(plan = %plan.id, "{}", err);
                let status = planner.get_plan(&plan.id).map(|p| p.status);
                if rollback_on_failure && status == Some(PlanStatus::Failed) {
                    planner.rollback_change_plan(&plan.id)?;
                }
                Some(err)
            }
        };

        let final_plan = planner
            .get_plan(&plan.id)
            .ok_or_else(|| RippleError::PlanNotFound { id: plan.id.clone() })?;
        let output = Self::formatter(&settings).format_plan(&final_plan)?;
        Self::emit(&settings, &output)?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn validate(&self, target: &str, change: ChangeType, content_file: Option<&Path>) -> Result<()> {
        let settings = load_config(&self.cli_args())?;

        let content = match content_file {
            Some(path) => read_content(path)?,
            None if change == ChangeType::Delete => String::new(),
            None => read_content(Path::new(target))?,
        };

        let root = path_key(&settings.scan_path);
        let result = validate_change_under(&root, &normalize_path(target), change, &content);
        let output = Self::formatter(&settings).format_validation(target, &result)?;
        Self::emit(&settings, &output)
    }

    fn graph(&self, dot: bool) -> Result<()> {
        let settings = self.scan_settings()?;
        let run = Self::run_analysis(&settings)?;

        let output = if dot {
            run.graph.to_dot()
        } else {
            Self::formatter(&settings).format_statistics(&run.graph.statistics())?
        };
        Self::emit(&settings, &output)
    }

    fn init(&self, force: bool) -> Result<()> {
        let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

        if config_path.exists() && !force {
            println!("Configuration file already exists at: {}", config_path.display());
            println!("Use --force to overwrite it.");
            return Ok(());
        }

        create_default_config(&config_path)?;

        println!("Created default configuration file at: {}", config_path.display());
        println!("\nEvery key is commented out; uncomment one to override the built-in default.");
        println!("RIPPLE_* environment variables and command-line flags take precedence over the file.");

        Ok(())
    }
}

fn read_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_file_context(path)
}

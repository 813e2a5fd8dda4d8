mod document;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod taxonomy;
mod workflow;

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::document::{Document, DocumentFormat};
use crate::error::AppError;
use crate::input::{ScoreSheet, build_score_matrix};
use crate::model::history::{ParsedMeta, ReportRecord, Subject};
use crate::model::profile::{ScoreScale, ScoringProfile};
use crate::pipeline::stage1_parse::parse_report;
use crate::pipeline::stage2_aggregate::Stage2Output;
use crate::pipeline::stage3_merge::{Stage3Inputs, run_stage3};
use crate::pipeline::stage4_report::{Stage4Input, WrittenReport, write_report};
use crate::report::chart::{ChartOptions, render_barograph};
use crate::report::json::render_parsed_json;
use crate::report::{check_subject, format_one_decimal, overall_rating_line};
use crate::taxonomy::Taxonomy;
use crate::taxonomy::defs::builtin_taxonomy;
use crate::taxonomy::loader::load_taxonomy;
use crate::workflow::{WorkflowError, WorkflowState};

#[derive(Debug, Parser)]
#[command(
    name = "skill-barograph",
    version,
    about = "Score subjects, chart their skills, and carry history forward through exported reports"
)]
struct Cli {
    /// trace | debug | info | warn | error. RUST_LOG overrides it.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a subject and export a report, resuming from an earlier report if given.
    Evaluate(EvaluateArgs),
    /// Print the history recovered from a report as JSON.
    Inspect {
        #[arg(long)]
        report: PathBuf,
    },
    /// List subject types, named subjects and their categories.
    Taxonomy {
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct EvaluateArgs {
    /// Previously exported report (.docx or .txt) to resume from.
    #[arg(long)]
    report: Option<PathBuf>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long = "type")]
    subject_type: Option<String>,
    /// JSON object: category -> sub-skill -> score.
    #[arg(long)]
    scores: Option<PathBuf>,
    #[arg(long)]
    taxonomy: Option<PathBuf>,
    #[arg(long, default_value = ".")]
    out: PathBuf,
    #[arg(long, value_enum, default_value = "120")]
    scale: ScoreScale,
    #[arg(long, conflicts_with = "no_cap")]
    cap: bool,
    #[arg(long)]
    no_cap: bool,
    /// Defaults to the format of --report, else docx.
    #[arg(long, value_enum)]
    format: Option<DocumentFormat>,
    /// Also write a JSON summary next to the report.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    no_sub_bars: bool,
    #[arg(long)]
    no_avg_bars: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    if let Err(err) = run(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Evaluate(args) => run_evaluate(&args),
        Command::Inspect { report } => run_inspect(&report),
        Command::Taxonomy { taxonomy } => run_taxonomy(taxonomy.as_deref()),
    }
}

fn run_evaluate(args: &EvaluateArgs) -> Result<(), AppError> {
    let profile = resolve_profile(args);
    let taxonomy = resolve_taxonomy(args.taxonomy.as_deref())?;

    let mut workflow = WorkflowState::default();
    let input_format = match &args.report {
        Some(path) => {
            let (parsed, format) = read_report(path)?;
            if !parsed.has_history() {
                warn!(path = %path.display(), "report carries no history; starting from scratch");
            }
            workflow.report_uploaded(parsed)?;
            Some(format)
        }
        None => {
            workflow.start_fresh()?;
            None
        }
    };

    if let Some(requested) = requested_subject(args)? {
        workflow.select_subject(requested)?;
    }
    let session = workflow.session().ok_or(WorkflowError::NoSubject)?;
    let subject = session.subject().cloned().ok_or(WorkflowError::NoSubject)?;
    info!(
        subject = %subject,
        mode = workflow.name(),
        resumed = session.is_resumed(),
        "evaluating"
    );

    let categories = taxonomy.categories_for(&subject)?;
    let sheet = match &args.scores {
        Some(path) => ScoreSheet::load(path)?,
        None => ScoreSheet::default(),
    };
    let matrix = build_score_matrix(&categories, &sheet, session.prior(), &profile)?;
    workflow.record_scores(matrix)?;

    let session = workflow.session().ok_or(WorkflowError::NoSubject)?;
    let matrix = session.scores().ok_or(WorkflowError::NoScores)?;
    let now = Local::now().naive_local();
    let merged = run_stage3(&Stage3Inputs {
        prior_categories: &session.prior().categories,
        prior_overall: &session.prior().overall,
        matrix,
        profile: &profile,
        today: now.date(),
    })?;

    let chart = render_barograph(
        matrix,
        &merged.evaluation.averages,
        &profile,
        ChartOptions {
            show_sub_skills: !args.no_sub_bars,
            show_averages: !args.no_avg_bars,
        },
    );
    let record = ReportRecord {
        subject,
        generated_at: now,
        categories: merged.categories,
        overall: merged.overall,
        chart,
    };

    let written = write_report(&Stage4Input {
        record: &record,
        display_scale: profile.display_scale,
        format: resolve_output_format(args.format, input_format),
        out_dir: &args.out,
        write_json: args.json,
    })?;
    workflow.reset();

    print!(
        "{}",
        breakdown(&record.subject, &merged.evaluation, &profile, &written)
    );
    Ok(())
}

fn run_inspect(path: &Path) -> Result<(), AppError> {
    let (parsed, format) = read_report(path)?;
    info!(
        path = %path.display(),
        format = format.extension(),
        categories = parsed.categories.len(),
        evaluations = parsed.overall.len(),
        "parsed report"
    );
    println!("{}", render_parsed_json(&parsed)?);
    Ok(())
}

fn run_taxonomy(path: Option<&Path>) -> Result<(), AppError> {
    let taxonomy = resolve_taxonomy(path)?;
    print!("{}", taxonomy_listing(&taxonomy));
    Ok(())
}

fn read_report(path: &Path) -> Result<(ParsedMeta, DocumentFormat), AppError> {
    let bytes = std::fs::read(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (doc, format) = Document::from_bytes(&bytes)?;
    Ok((parse_report(doc.lines()), format))
}

fn resolve_taxonomy(path: Option<&Path>) -> Result<Taxonomy, AppError> {
    match path {
        Some(path) => Ok(load_taxonomy(path)?),
        None => Ok(builtin_taxonomy()),
    }
}

fn resolve_profile(args: &EvaluateArgs) -> ScoringProfile {
    let profile = ScoringProfile::for_scale(args.scale);
    if args.cap {
        profile.with_cap(true)
    } else if args.no_cap {
        profile.with_cap(false)
    } else {
        profile
    }
}

fn resolve_output_format(
    requested: Option<DocumentFormat>,
    input: Option<DocumentFormat>,
) -> DocumentFormat {
    requested.or(input).unwrap_or(DocumentFormat::Docx)
}

/// `--name` and `--type` only make sense together.
fn requested_subject(args: &EvaluateArgs) -> Result<Option<Subject>, AppError> {
    match (&args.name, &args.subject_type) {
        (Some(name), Some(subject_type)) => {
            let subject = Subject::new(name.trim(), subject_type.trim());
            check_subject(&subject).map_err(AppError::Usage)?;
            Ok(Some(subject))
        }
        (None, None) => Ok(None),
        _ => Err(AppError::Usage(
            "--name and --type must be given together".to_string(),
        )),
    }
}

fn breakdown(
    subject: &Subject,
    evaluation: &Stage2Output,
    profile: &ScoringProfile,
    written: &WrittenReport,
) -> String {
    let mut out = format!("{subject}\n");
    for avg in &evaluation.averages {
        out.push_str(&format!(
            "  {}: {}\n",
            avg.category,
            format_one_decimal(avg.average)
        ));
    }
    out.push_str(&overall_rating_line(evaluation.overall, profile.display_scale));
    out.push('\n');
    out.push_str(&format!(
        "report: {} ({})\n",
        written.report_path.display(),
        written.mime_type
    ));
    if let Some(json_path) = &written.json_path {
        out.push_str(&format!("summary: {}\n", json_path.display()));
    }
    out
}

fn taxonomy_listing(taxonomy: &Taxonomy) -> String {
    let mut out = String::new();
    for subject_type in &taxonomy.types {
        out.push_str(&format!("{}\n", subject_type.name));
        for category in &subject_type.skillset {
            out.push_str(&format!(
                "  {}: {}\n",
                category.name,
                category.sub_skills.join(", ")
            ));
        }
        for subject in &subject_type.subjects {
            out.push_str(&format!("  - {}\n", subject.name));
            for category in &subject.specialty {
                out.push_str(&format!(
                    "      {}: {}\n",
                    category.name,
                    category.sub_skills.join(", ")
                ));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

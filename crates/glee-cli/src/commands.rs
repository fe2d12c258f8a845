use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, trace, warn};

use glee_cli::logging::redact_value;
use glee_import::{Completed, Idle, InvalidRowPolicy, JsonFileStore, NaturalKey, Parsed};
use glee_ingest::{export_csv, template_csv};
use glee_map::MappingRepository;
use glee_model::{ImportProfile, find_profile};

use crate::cli::{ExportArgs, ImportArgs, InspectArgs, TemplateArgs};
use crate::summary::{print_mapping, print_profiles, print_validation};

/// Result of `glee import`.
pub enum ImportOutcome {
    /// Rows were written.
    Completed(Completed),
    /// `--dry-run`: nothing was written.
    DryRun {
        fresh: usize,
        duplicates: usize,
        skipped_invalid: usize,
    },
}

pub fn run_profiles(profiles: &[ImportProfile]) -> Result<()> {
    print_profiles(profiles);
    Ok(())
}

pub fn run_template(profiles: &[ImportProfile], args: &TemplateArgs) -> Result<()> {
    let profile = find_profile(profiles, &args.profile)?;
    let csv = template_csv(profile)?;
    write_output(args.output.as_deref(), &csv)
}

pub fn run_export(profiles: &[ImportProfile], args: &ExportArgs) -> Result<()> {
    let profile = find_profile(profiles, &args.profile)?;
    let key = NaturalKey::from(profile);
    let store = JsonFileStore::open(&args.store, key.target())?;
    let rows = store.records().iter().map(|record| {
        profile
            .fields
            .iter()
            .map(|field| record.cell(&field.target))
            .collect::<Vec<String>>()
    });
    let csv = export_csv(&profile.labels(), rows)?;
    info!(records = store.len(), store = %args.store.display(), "exported records");
    write_output(args.output.as_deref(), &csv)
}

pub fn run_inspect(profiles: &[ImportProfile], args: &InspectArgs) -> Result<()> {
    let profile = find_profile(profiles, &args.profile)?;
    let parsed = Idle::new().select_file(&args.file).parse(profile)?;
    println!("File: {}", args.file.display());
    println!("Rows: {}", parsed.rows().len());
    println!("Headers: {}", parsed.headers().join(", "));
    trace_sample(&parsed);
    print_mapping(parsed.fields(), &parsed.mapper().unmapped_headers());
    let missing = parsed.mapper().missing_required();
    if !missing.is_empty() {
        eprintln!("Missing required fields: {}", missing.join(", "));
    }
    Ok(())
}

pub fn run_import(profiles: &[ImportProfile], args: &ImportArgs) -> Result<ImportOutcome> {
    let profile = find_profile(profiles, &args.profile)?;
    let span = info_span!("import", profile = %profile.name, file = %args.file.display());
    let _guard = span.enter();

    let mut parsed = Idle::new().select_file(&args.file).parse(profile)?;
    trace_sample(&parsed);
    parsed = apply_saved_mapping(parsed, &args.mapping_dir)?;
    for binding in &args.map {
        parsed = parsed
            .with_mapping(&binding.target, binding.column())
            .with_context(|| format!("--map {binding}"))?;
    }
    if args.save_mapping {
        let repository = MappingRepository::new(&args.mapping_dir)?;
        let path = repository.save(&profile.name, parsed.mapper())?;
        println!("Saved mapping: {}", path.display());
    }
    print_mapping(parsed.fields(), &parsed.mapper().unmapped_headers());

    let validated = parsed.map()?.validate();
    // Blocked runs list the errors when the session error is reported.
    print_validation(validated.outcome(), args.skip_invalid);

    let mut store = JsonFileStore::open(&args.store, NaturalKey::from(profile).target())?;
    let policy = if args.skip_invalid {
        InvalidRowPolicy::SkipInvalid
    } else {
        InvalidRowPolicy::Block
    };
    let reconciled = validated.reconcile(&store, policy)?;

    if args.dry_run {
        return Ok(ImportOutcome::DryRun {
            fresh: reconciled.fresh().len(),
            duplicates: reconciled.duplicate_count(),
            skipped_invalid: reconciled.skipped_invalid(),
        });
    }

    let progress = progress_bar(reconciled.fresh().len() as u64);
    let completed = reconciled.execute(&mut store, |done, _| progress.set_position(done as u64));
    progress.finish_and_clear();
    info!(store = %args.store.display(), records = store.len(), "store updated");
    Ok(ImportOutcome::Completed(completed))
}

/// Applies the saved manual bindings for the profile, if any.
fn apply_saved_mapping(parsed: Parsed, mapping_dir: &Path) -> Result<Parsed> {
    if !mapping_dir.exists() {
        return Ok(parsed);
    }
    let repository = MappingRepository::new(mapping_dir)?;
    let Some(saved) = repository.load(&parsed.profile().name)? else {
        return Ok(parsed);
    };
    let (next, skipped) = parsed.with_saved_mapping(&saved);
    for target in &skipped {
        warn!(target_field = %target, "saved binding skipped; column not in this file");
    }
    info!(
        bindings = saved.bindings.len().saturating_sub(skipped.len()),
        "applied saved mapping"
    );
    Ok(next)
}

fn trace_sample(parsed: &Parsed) {
    if let Some(row) = parsed.rows().first() {
        for (column, value) in &row.values {
            trace!(
                line = row.line,
                column = %column,
                value = redact_value(value),
                "sample cell"
            );
        }
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} rows {msg}") {
        bar.set_style(style.progress_chars("##-"));
    }
    bar
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{contents}"),
    }
    Ok(())
}

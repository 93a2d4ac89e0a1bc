use std::io;
use std::path::Path;

use clap::Parser;
use tracing::{debug, error, info, warn};

use photostamp::cli::Args;
use photostamp::history::latest_backup;
use photostamp::logging;
use photostamp::output::{display_commit_result, display_preview, display_revert_result};
use photostamp::revert::{revert_from_backup, RevertOptions};
use photostamp::ui::{Ui, UiConfig};
use photostamp::{
    preview, spawn_commit, AppError, CommitReport, ExifDateExtractor, NoProgress, Progress,
    ProgressReporter, RenameConfig, Session, WorkerEvent,
};

fn main() {
    let args = Args::parse();

    let ui_config = UiConfig::new(args.verbose > 0);
    logging::init(args.verbose, ui_config.colors_enabled);

    let mut ui = Ui::new(ui_config);

    if let Err(e) = run(args, &mut ui) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args, ui: &mut Ui) -> Result<(), AppError> {
    ui.print_header(env!("CARGO_PKG_VERSION"));

    let mut progress = Progress::new_with_ui(ui.is_verbose(), ui.is_colors_enabled());

    if let Some(backup_file) = &args.revert {
        info!("Revert mode: {:?}", backup_file);
        return run_revert(backup_file, args.dry, &mut progress);
    }

    let target_dir = args
        .target_dir
        .as_deref()
        .ok_or_else(|| AppError::InvalidArguments("A target folder is required".to_string()))?;

    if args.undo {
        let latest = latest_backup(target_dir)?.ok_or_else(|| AppError::NoBackupFound {
            path: target_dir.to_path_buf(),
        })?;
        info!("Undo mode, latest backup: {:?}", latest);
        return run_revert(&latest, args.dry, &mut progress);
    }

    let config = RenameConfig::new(
        args.pattern,
        args.prefix.clone(),
        args.suffix.clone(),
        !args.no_backup,
    );
    debug!("Configuration: {:?}", config);

    // Step 1: Scan folder and read capture dates
    progress.scan_start(target_dir);
    let session = Session::scan(target_dir, config, &ExifDateExtractor)?;
    progress.scan_complete(session.candidates.len(), session.undated_count());

    if session.is_empty() {
        ui.warning("No photos found in this folder.");
        return Ok(());
    }

    // Step 2: Preview
    let plan = preview(&session, &mut NoProgress);
    display_preview(&session, &plan, &mut io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    if args.dry {
        println!();
        println!("Run without --dry to apply these changes.");
        return Ok(());
    }

    if plan.is_empty() {
        ui.info("Nothing to rename.");
        return Ok(());
    }

    // Step 3: Confirm
    if !args.yes {
        let question = format!("Rename {} photos?", plan.rename_count());
        if !ui.confirm(&question, &mut io::stdin().lock()) {
            ui.info("Aborted, no files were changed.");
            return Ok(());
        }
    }

    // Step 4: Commit on a worker thread
    ui.section("Renaming photos");
    let report = run_commit(session, &mut progress)?;

    if let Some(path) = &report.backup_path {
        progress.backup_written(path);
    }

    display_commit_result(&report, &mut io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    if let Some(err) = AppError::from_commit(&report) {
        return Err(err);
    }

    if !report.cancelled {
        ui.success(&format!("{} photos renamed", report.success_count()));
    }

    Ok(())
}

fn run_commit(session: Session, progress: &mut Progress) -> Result<CommitReport, AppError> {
    let worker = spawn_commit(session);

    let cancel = worker.cancel_flag();
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    let mut report = None;
    for event in worker.events.iter() {
        match event {
            WorkerEvent::Progress { index, total } => progress.on_file_processed(index, total),
            WorkerEvent::Finished(finished) => report = Some(finished),
        }
    }

    worker
        .join()
        .map_err(|_| AppError::Other("Rename worker panicked".to_string()))?;

    report.ok_or_else(|| AppError::Other("Rename worker stopped without a result".to_string()))
}

fn run_revert(backup_file: &Path, dry_run: bool, progress: &mut Progress) -> Result<(), AppError> {
    let options = RevertOptions { dry_run };
    let result = revert_from_backup(backup_file, &options, progress)?;

    display_revert_result(&result, &mut io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    Ok(())
}

use chrono::Utc;
use clap::Parser;
use page_compare::config::validate_threshold;
use page_compare::store::{self, JsonFileStore, SavedResult, SavedSettings};
use page_compare::{CompareConfig, Error, PageCompare, PageFetcher, Result, aggregate, export};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

mod args;
use args::{Args, convert_parser, convert_source_type};

/// Exit code for a comparison that scored below the threshold
const EXIT_FAIL_VERDICT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            ::log::error!("Comparison failed: {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let mut state = JsonFileStore::open(config.state_file_path())?;

    if args.clear_results {
        store::clear_results(&mut state)?;
        println!("Cleared saved results in {}", state.path().display());
        return Ok(ExitCode::SUCCESS);
    }

    if args.show_last {
        let Some(saved) = store::last_result(&state)? else {
            println!("No saved results");
            return Ok(ExitCode::SUCCESS);
        };
        print_result(&saved, args.json)?;
        if let Some(target) = &args.export {
            export_to(&saved, target)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = match store::load_settings(&state)? {
        Some(saved) => config.with_saved_settings(&saved),
        None => config,
    };
    let (Some(pre_go_live), Some(current)) = (config.pre_go_live_url.clone(), config.current_url.clone()) else {
        return Err(Error::MissingSource);
    };

    let compare = PageCompare::new(pre_go_live.as_str(), current.as_str()).with_config(&config);
    let fetcher = PageFetcher::new(Duration::from_secs(config.timeout_secs), &config.user_agent)?;
    let report_progress = |percent: u8| ::log::info!("Progress: {}%", percent);
    let result = compare.run(&fetcher, &report_progress).await?;

    let saved = SavedResult {
        result,
        threshold: compare.threshold(),
        timestamp: Utc::now(),
    };

    if !args.no_save {
        store::save_settings(
            &mut state,
            &SavedSettings {
                pre_go_live_url: pre_go_live,
                current_url: current,
                success_threshold: compare.threshold(),
            },
        )?;
        store::save_result(&mut state, &saved)?;
        ::log::debug!("Saved settings and result to {}", state.path().display());
    }

    print_result(&saved, args.json)?;
    if let Some(target) = &args.export {
        export_to(&saved, target)?;
    }

    if saved.result.verdict(saved.threshold).is_pass() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FAIL_VERDICT))
    }
}

/// Config file (or defaults) with command-line flags layered on top
fn load_config(args: &Args) -> Result<CompareConfig> {
    let mut config = match &args.config {
        Some(path) => CompareConfig::from_file(path)?,
        None => CompareConfig::default(),
    };

    if let Some(pre_go_live) = &args.pre_go_live {
        config.pre_go_live_url = Some(pre_go_live.clone());
    }
    if let Some(current) = &args.current {
        config.current_url = Some(current.clone());
    }
    if let Some(threshold) = args.threshold {
        config.success_threshold = Some(validate_threshold(threshold)?);
    }
    if let Some(parser) = args.parser {
        config.parser = convert_parser(parser);
    }
    if let Some(source_type) = args.source_type {
        config.source_type = convert_source_type(source_type);
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err(Error::Config("--timeout must be greater than 0".into()));
        }
        config.timeout_secs = timeout;
    }
    if let Some(state_file) = &args.state_file {
        config.state_file = state_file.clone();
    }

    Ok(config)
}

fn print_result(saved: &SavedResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(saved)?);
    } else {
        println!("{}", aggregate::summary(&saved.result, saved.threshold));
        println!("Compared at: {}", saved.timestamp.to_rfc3339());
    }
    Ok(())
}

fn export_to(saved: &SavedResult, target: &str) -> Result<()> {
    let path = (!target.is_empty()).then(|| PathBuf::from(target));
    let written = export::export_report(saved, path.as_deref(), Path::new("."), Utc::now())?;
    println!("Report written to {}", written.display());
    Ok(())
}

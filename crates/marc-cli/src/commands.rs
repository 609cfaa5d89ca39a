use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use marc_cli::failure_report::write_failure_report;
use marc_cli::pipeline::{PipelineConfig, run_pipeline};
use marc_ingest::{SkipList, load_skip_list};
use marc_output::{DirectorySink, MemorySink};
use marc_transform::{Rule, RuleEngine};
use marc_validate::AcceptancePolicy;

use crate::cli::ConvertArgs;
use crate::summary::apply_table_style;
use crate::types::ConvertResult;

pub fn run_rules() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Rule", "Fields", "Action", "Required"]);
    apply_table_style(&mut table);
    for rule in Rule::ALL {
        table.add_row(vec![
            rule.to_string(),
            rule.tags().to_string(),
            rule.description().to_string(),
            if rule.is_required() { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("convert_command", source = %args.source.display());
    let _guard = span.enter();

    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("resolve current directory")?,
    };
    let config = PipelineConfig::new(&args.source)
        .with_engine(build_engine(args))
        .with_policy(build_policy(args)?);

    let report = if args.dry_run {
        info!(output_dir = %output_dir.display(), "dry run, no files will be written");
        let mut sink = MemorySink::rooted_at(&output_dir);
        run_pipeline(&config, &mut sink)?
    } else {
        let mut sink = DirectorySink::new(&output_dir)?;
        run_pipeline(&config, &mut sink)?
    };

    let failure_report = match &args.failure_report {
        Some(path) => Some(write_failure_report(path, &report)?),
        None => None,
    };

    Ok(ConvertResult {
        report,
        output_dir,
        dry_run: args.dry_run,
        failure_report,
    })
}

fn build_engine(args: &ConvertArgs) -> RuleEngine {
    let disabled: Vec<Rule> = args.disable_rule.iter().copied().map(Rule::from).collect();
    RuleEngine::without(&disabled)
}

fn build_policy(args: &ConvertArgs) -> Result<AcceptancePolicy> {
    let skip_list = match &args.skip_list {
        Some(path) => load_skip_list(path)
            .with_context(|| format!("load skip list {}", path.display()))?,
        None => SkipList::default(),
    };
    if !skip_list.is_empty() {
        info!(entries = skip_list.len(), "loaded skip list");
    }
    Ok(AcceptancePolicy::new()
        .with_skip_list(skip_list)
        .with_prefix(args.prefix.clone()))
}


//! Demo binary: annotates the code blocks of an HTML page with hover hints.
//!
//! `--dry-run` stops after tokenization and prints the canonical model input
//! per block; a full run drives the retrieval runtime end to end and reports
//! every hint as it streams in.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bus::{CoreCommand, CoreEvent, make_bus};
use net::ModelConfig;

#[derive(Parser)]
#[command(name = "hoverlay", about = "Hover-hint annotation for highlighted code blocks")]
struct Args {
    /// HTML page to annotate.
    #[arg(long)]
    input: PathBuf,

    /// Model endpoint configuration (TOML: key, url, model).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tokenize and print the canonical model input without calling the model.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("hoverlay: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let markup = fs::read_to_string(&args.input)
        .map_err(|e| format!("reading {}: {e}", args.input.display()))?;

    let mut dom = html::parse(&markup);
    let mut page = overlay::PageState::new();
    let block_ids = page.process_document(&mut dom);
    if block_ids.is_empty() {
        println!("no code blocks found in {}", args.input.display());
        return Ok(());
    }
    log::info!("{} code blocks, {} tokens", block_ids.len(), page.mappings.len());

    let roots = overlay::find_code_block_roots(&dom);
    let block_markup: Vec<String> = roots
        .iter()
        .filter_map(|root_id| html::find_node_by_id(&dom, *root_id))
        .map(html::serialize)
        .collect();

    if args.dry_run {
        for (block_id, raw) in block_ids.iter().zip(&block_markup) {
            println!("== {block_id}");
            println!("{}", lex::canonicalize(raw));
        }
        return Ok(());
    }

    let config_path = args
        .config
        .as_deref()
        .ok_or("a --config file is required unless --dry-run is given")?;
    let config = ModelConfig::load(config_path).map_err(|e| e.to_string())?;
    let transport = runtime_retrieval::make_transport(config).map_err(|e| e.to_string())?;

    let (bus, cmd_rx) = make_bus();
    runtime_retrieval::start_retrieval_runtime(cmd_rx, bus.evt_tx.clone(), transport);

    for (request_id, raw) in block_markup.iter().enumerate() {
        bus.cmd_tx
            .send(CoreCommand::HoverHintRetrieval {
                page_id: 1,
                request_id: request_id as u64,
                code_block_raw_html: raw.clone(),
            })
            .map_err(|_| "retrieval runtime is gone".to_string())?;
    }

    let mut state = overlay::HoverHintState::new();
    let mut outstanding = block_markup.len();
    let mut received = 0usize;
    let mut failures = 0usize;
    while outstanding > 0 {
        let event = bus
            .evt_rx
            .recv()
            .map_err(|_| "retrieval runtime is gone".to_string())?;
        match event {
            CoreEvent::HoverHint { hover_hint, .. } => {
                overlay::attach_hover_hint(&hover_hint, &mut state, &page.mappings, &mut dom);
                received += 1;
                println!("hint for tokens {:?}", hover_hint.ids);
            }
            CoreEvent::HoverHintDone { request_id, .. } => {
                log::debug!("request {request_id} complete");
                outstanding -= 1;
            }
            CoreEvent::HoverHintError {
                request_id,
                error_message,
                ..
            } => {
                eprintln!("hoverlay: request {request_id} failed: {error_message}");
                failures += 1;
                outstanding -= 1;
            }
        }
    }

    println!("{received} hints attached across {} blocks", block_ids.len());
    if failures > 0 {
        return Err(format!("{failures} of {} requests failed", block_ids.len()));
    }
    Ok(())
}

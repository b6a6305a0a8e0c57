//! Background worker runtime for hint retrieval.
//!
//! Owns the command receiver side of the bus. Each retrieval request runs on
//! its own thread because a request can block on backoff sleeps for tens of
//! seconds; commands keep draining meanwhile. There is no cancellation: an
//! already-dispatched request runs to completion or exhausts its retries.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use bus::{CoreCommand, CoreEvent};
use core_types::{PageId, RequestId};
use net::{ModelTransport, NetError};
use retrieval::Orchestrator;

pub fn start_retrieval_runtime(
    cmd_rx: Receiver<CoreCommand>,
    evt_tx: Sender<CoreEvent>,
    transport: Arc<dyn ModelTransport + Send + Sync>,
) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                CoreCommand::HoverHintRetrieval {
                    page_id,
                    request_id,
                    code_block_raw_html,
                } => {
                    let evt_tx = evt_tx.clone();
                    let transport = transport.clone();
                    thread::spawn(move || {
                        run_one(page_id, request_id, &code_block_raw_html, &*transport, &evt_tx);
                    });
                }
            }
        }
    });
}

fn run_one(
    page_id: PageId,
    request_id: RequestId,
    raw_html: &str,
    transport: &dyn ModelTransport,
    evt_tx: &Sender<CoreEvent>,
) {
    let orchestrator = Orchestrator::new(transport);
    let result = orchestrator.retrieve(raw_html, &mut |hover_hint| {
        let _ = evt_tx.send(CoreEvent::HoverHint {
            page_id,
            request_id,
            hover_hint,
        });
    });
    match result {
        Ok(()) => {
            let _ = evt_tx.send(CoreEvent::HoverHintDone {
                page_id,
                request_id,
            });
        }
        Err(err) => {
            log::warn!("retrieval {request_id} for page {page_id} failed: {err}");
            let _ = evt_tx.send(CoreEvent::HoverHintError {
                page_id,
                request_id,
                error_message: err.to_string(),
            });
        }
    }
}

/// Builds a runtime transport from configuration. Split out so the binary
/// can surface configuration errors before any command is sent.
pub fn make_transport(
    config: net::ModelConfig,
) -> Result<Arc<dyn ModelTransport + Send + Sync>, NetError> {
    Ok(Arc::new(net::HttpModelTransport::new(config)?))
}

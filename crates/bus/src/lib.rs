//! Message protocol between the page side and the retrieval worker.
//!
//! The two sides share no state; everything crossing the bus is an owned
//! value. Hints stream back one event per parsed element, followed by at
//! most one terminal error for the request.

use std::sync::mpsc::{Receiver, Sender, channel};

use core_types::{PageId, RequestId};
use hints::HoverHint;

#[derive(Debug)]
pub enum CoreCommand {
    /// One annotation request for one code block's raw markup.
    HoverHintRetrieval {
        page_id: PageId,
        request_id: RequestId,
        code_block_raw_html: String,
    },
}

#[derive(Debug)]
pub enum CoreEvent {
    /// One streamed hint, delivered as soon as it parses.
    HoverHint {
        page_id: PageId,
        request_id: RequestId,
        hover_hint: HoverHint,
    },
    /// Terminal failure for a request. Hints already delivered stay valid.
    HoverHintError {
        page_id: PageId,
        request_id: RequestId,
        error_message: String,
    },
    /// Clean end of one request's hint stream.
    HoverHintDone {
        page_id: PageId,
        request_id: RequestId,
    },
}

pub struct Bus {
    pub cmd_tx: Sender<CoreCommand>,
    pub evt_rx: Receiver<CoreEvent>,
    // shareable for runtimes
    pub evt_tx: Sender<CoreEvent>,
}

/// Builds a bus plus the command receiver handed to the worker runtime.
pub fn make_bus() -> (Bus, Receiver<CoreCommand>) {
    let (cmd_tx, cmd_rx) = channel();
    let (evt_tx, evt_rx) = channel();
    (
        Bus {
            cmd_tx,
            evt_rx,
            evt_tx,
        },
        cmd_rx,
    )
}

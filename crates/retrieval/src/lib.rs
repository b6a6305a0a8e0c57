//! Retrieval orchestration: one annotation request end to end.
//!
//! Canonicalize the block's markup, invoke the model, feed the streamed
//! chunks through the incremental list parser, and forward each hint to the
//! caller as soon as it parses. Transient failures are retried with
//! exponential backoff; anything else aborts on the first failure.

use std::sync::LazyLock;
use std::time::Duration;

use hints::{HINT_LIST_KEY, HoverHint};
use net::{ModelRequest, ModelTransport, NetError};
use stream::ListStreamParser;
use thiserror::Error;

/// Fixed system prompt sent verbatim with every request. Built from the wire
/// key constant so the prompt and the hint model agree on the list's name.
pub static SYSTEM_PROMPT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "You annotate source code for hover documentation. The user message is a \
         canonicalized code block: a sequence of <id=TOKEN class=\"...\" style=\"...\"/>TEXT</> \
         groups and bare text, where TOKEN addresses one lexical token. Reply with a \
         single JSON object {{\"{HINT_LIST_KEY}\": [...]}}. Each array element is \
         {{\"ids\": [token ids the hint covers], \"documentation\": {{...}}}} where \
         documentation is one of: {{\"type\": \"function\", \"signature\", optional \
         \"paramDocs\" [{{\"name\", \"doc\"}}], optional \"returnDoc\", optional \
         \"explanation\", optional \"tokenStyles\" mapping literal signature \
         substrings to CSS}}, {{\"type\": \"object\", \"docInHtml\", optional \
         \"propertyDocs\" [{{\"name\", \"doc\"}}]}}, or {{\"type\": \"variable\", \
         \"docInHtml\"}}. Emit hints for identifiers worth documenting; skip \
         punctuation. Do not emit anything outside the JSON object."
    )
});

pub const MAX_ATTEMPTS: u32 = 5;
pub const BACKOFF_BASE: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("retrieval failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: NetError,
    },
    #[error("retrieval aborted: {0}")]
    Fatal(#[from] NetError),
}

/// Drives retrieval for one canonicalized code block, invoking `on_hint` per
/// streamed hint. Hints delivered before a failed attempt are not retracted;
/// a retry restarts the stream from scratch with a fresh parser.
pub struct Orchestrator<'a> {
    transport: &'a dyn ModelTransport,
    sleep: Box<dyn Fn(Duration) + 'a>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(transport: &'a dyn ModelTransport) -> Self {
        Orchestrator {
            transport,
            sleep: Box::new(|d| std::thread::sleep(d)),
        }
    }

    /// Replaces the backoff sleeper; tests record the delays instead of
    /// actually waiting.
    pub fn with_sleeper(transport: &'a dyn ModelTransport, sleep: Box<dyn Fn(Duration) + 'a>) -> Self {
        Orchestrator { transport, sleep }
    }

    /// Canonicalizes `raw_html` and retrieves hints for it.
    pub fn retrieve(
        &self,
        raw_html: &str,
        on_hint: &mut dyn FnMut(HoverHint),
    ) -> Result<(), RetrievalError> {
        let canonical = lex::canonicalize(raw_html);
        self.retrieve_canonical(&canonical, on_hint)
    }

    pub fn retrieve_canonical(
        &self,
        canonical: &str,
        on_hint: &mut dyn FnMut(HoverHint),
    ) -> Result<(), RetrievalError> {
        let request = ModelRequest {
            system_prompt: SYSTEM_PROMPT.as_str(),
            user_content: canonical,
        };

        let mut attempt = 1;
        loop {
            let mut parser = ListStreamParser::new();
            let result = self.transport.stream(&request, &mut |chunk| {
                parser.feed(chunk, &mut |hint: HoverHint| on_hint(hint));
            });
            match result {
                Ok(()) => {
                    parser.finish(&mut |hint: HoverHint| on_hint(hint));
                    if parser.skipped() > 0 {
                        log::warn!("{} malformed hints skipped", parser.skipped());
                    }
                    return Ok(());
                }
                Err(err) if err.is_transient() && attempt < MAX_ATTEMPTS => {
                    let delay = BACKOFF_BASE * 2u32.pow(attempt - 1);
                    log::warn!(
                        "transient retrieval failure (attempt {attempt}/{MAX_ATTEMPTS}), \
                         retrying in {delay:?}: {err}"
                    );
                    (self.sleep)(delay);
                    attempt += 1;
                }
                Err(err) if err.is_transient() => {
                    return Err(RetrievalError::RetriesExhausted {
                        attempts: attempt,
                        source: err,
                    });
                }
                Err(err) => return Err(RetrievalError::Fatal(err)),
            }
        }
    }
}

//! Delivery sinks for the normalized MBS document.
//!
//! After the output file is written it can be handed to a user command
//! ([`CommandSink`]) and/or POSTed to a webhook ([`WebhookSink`]). Sink
//! failures never undo the written file; callers decide how to report them.

mod command;
mod error;
mod webhook;

pub use command::{CommandOutcome, CommandSink, ExecutionMode, FILE_PLACEHOLDER, render_command};
pub use error::{DeliveryError, Result};
pub use webhook::{WebhookSink, build_headers, parse_headers};

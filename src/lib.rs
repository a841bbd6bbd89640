// only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::unused_self)]
#![allow(clippy::module_name_repetitions)]
//! An embeddable logging facility with named sinks.
//!
//! Application code writes leveled messages to one or more sinks;
//! each sink has a unique name, its own threshold, its own formatter,
//! and exactly one destination: stdout, stdout with colours, a file,
//! or an application-provided [`LogWriter`](crate::writers::LogWriter).
//!
//! ```rust
//! use sinklog::{values, LogLevel, Registry};
//!
//! let registry = Registry::new();
//! let console = registry.create_console_colour("console");
//! let file = registry.create_file("file", "app.log", "log_files", true);
//!
//! console.set_threshold(LogLevel::Info);
//! console.debug("not shown");
//! console.info_with("{} files processed in {} s", &values![17, 2.5]);
//! file.warning("disk almost full");
//! ```
//!
//! Every call is synchronous: when a level method returns, the message was handed
//! to the destination. Concurrent calls on the same sink are serialized by the sink's lock,
//! so lines never interleave, and colour changes never leak into other sinks' output.
//!
//! Logging never fails from the caller's point of view. Failures are dropped silently,
//! unless an [`ErrorChannel`] is set with [`set_error_channel`].
//!
//! See
//!
//! * [`Registry`] for creating and finding sinks,
//! * [`Sink`] for writing messages and reconfiguring a sink,
//! * module [`writers`] for own destinations,
//! * [`SinkLogger`] for routing the macros of the `log` crate into a sink.
//!
//! By default, i.e. if feature `colors` is not switched off, the colour console sinks
//! colour their lines by level when stdout is a terminal.
//! See [`Sink::set_colour`] for adapting the colours.

mod colour;
mod deferred_now;
mod destination;
mod formats;
mod level;
mod record;
mod registry;
mod sink;
mod sink_error;
mod sink_logger;
mod util;

pub mod writers;

pub use crate::colour::{Colour, ColourPalette};
pub use crate::deferred_now::{DeferredNow, TimeZone};
pub use crate::destination::{Destination, SinkKind};
#[cfg(feature = "json")]
pub use crate::formats::json_format;
pub use crate::formats::{
    default_format, detailed_format, message_format, FormatFunction, FormatProperties, Formatter,
    StringFormat,
};
pub use crate::level::LogLevel;
pub use crate::record::{
    Record, RenderOptions, Value, MAX_DECIMAL_PLACES, TS_DASHES_BLANK_COLONS_DOT,
};
pub use crate::registry::Registry;
pub use crate::sink::Sink;
pub use crate::sink_error::SinkError;
pub use crate::sink_logger::SinkLogger;
pub use crate::util::{error_channel, set_error_channel, ErrorChannel};

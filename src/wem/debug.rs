//! Logging decorator for event consumers.

use super::{forward_as_events, Event, WikiEventModel};

/// Formats events as numbered lines indented by nesting depth.
#[derive(Debug, Clone, Default)]
pub struct EventFormatter {
    depth: usize,
    count: usize,
}

impl EventFormatter {
    /// Create a formatter at depth zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Format one event and advance the nesting state.
    pub fn line(&mut self, event: &Event) -> String {
        if event.closes().is_some() {
            self.depth = self.depth.saturating_sub(1);
        }
        let line = format!("{:04}  {}{}", self.count, "  ".repeat(self.depth), event);
        if event.opens().is_some() {
            self.depth += 1;
        }
        self.count += 1;
        line
    }
}

/// Format a whole event stream, one event per line.
pub fn format_events(events: &[Event]) -> String {
    let mut formatter = EventFormatter::new();
    let mut out = String::new();
    for event in events {
        out.push_str(&formatter.line(event));
        out.push('\n');
    }
    out
}

/// Decorator that logs every event at debug level before forwarding it.
///
/// # Example
///
/// ```
/// use wikiutil::model::DocumentBuilder;
/// use wikiutil::parser::WikiParser;
/// use wikiutil::wem::DebugWem;
///
/// let parser = WikiParser::from_text("= Title =\nSome text");
/// let mut traced = DebugWem::new(DocumentBuilder::new());
/// parser.parse_into(&mut traced)?;
/// let doc = traced.into_inner().finish()?;
/// assert_eq!(doc.root.sections.len(), 1);
/// # Ok::<(), wikiutil::Error>(())
/// ```
#[derive(Debug)]
pub struct DebugWem<W> {
    inner: W,
    formatter: EventFormatter,
}

impl<W: WikiEventModel> DebugWem<W> {
    /// Wrap a consumer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            formatter: EventFormatter::new(),
        }
    }

    /// The wrapped consumer.
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Unwrap the consumer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn on_event(&mut self, event: Event) {
        log::debug!("{}", self.formatter.line(&event));
        event.dispatch(&mut self.inner);
    }
}

impl<W: WikiEventModel> WikiEventModel for DebugWem<W> {
    forward_as_events!();
}

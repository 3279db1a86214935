//! Fan-out of one event stream to several consumers.

use super::{forward_as_events, Event, WikiEventModel};

/// Consumer that forwards every event to each of its targets in order.
///
/// Targets are borrowed, so they remain usable after the stream ends:
///
/// ```
/// use wikiutil::model::DocumentBuilder;
/// use wikiutil::parser::WikiParser;
/// use wikiutil::render::HtmlRenderer;
/// use wikiutil::wem::CompositeWem;
///
/// let mut builder = DocumentBuilder::new();
/// let mut html = HtmlRenderer::default();
/// {
///     let mut both = CompositeWem::new().with(&mut builder).with(&mut html);
///     WikiParser::from_text("Hello").parse_into(&mut both)?;
/// }
/// let doc = builder.finish()?;
/// assert!(html.into_html().contains("<p>Hello</p>"));
/// assert_eq!(doc.plain_text(), "Hello");
/// # Ok::<(), wikiutil::Error>(())
/// ```
#[derive(Default)]
pub struct CompositeWem<'a> {
    targets: Vec<&'a mut dyn WikiEventModel>,
}

impl<'a> CompositeWem<'a> {
    /// Create a composite without targets.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Add a target.
    pub fn with(mut self, target: &'a mut dyn WikiEventModel) -> Self {
        self.targets.push(target);
        self
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if there are no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn on_event(&mut self, event: Event) {
        for target in self.targets.iter_mut() {
            event.dispatch(&mut **target);
        }
    }
}

impl WikiEventModel for CompositeWem<'_> {
    forward_as_events!();
}

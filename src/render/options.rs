//! Rendering options and configuration.

/// Options for rendering documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Wrap HTML output in `<html><body>`
    pub full_document: bool,

    /// Prefix put before internal link targets (e.g., "./")
    pub link_prefix: String,

    /// Suffix put after internal link targets (e.g., ".html")
    pub link_suffix: String,

    /// LaTeX structure level of the page title (0 = `\part`)
    pub structure_level: usize,

    /// Title rendered before the content, defaults to the page summary
    pub title: Option<String>,

    /// Name of the output file, used to derive names of LaTeX side files
    pub output_name: String,

    /// Collect document statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the `<html><body>` wrapper.
    pub fn with_full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    /// Set the internal link prefix.
    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = prefix.into();
        self
    }

    /// Set the internal link suffix.
    pub fn with_link_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.link_suffix = suffix.into();
        self
    }

    /// Set the LaTeX structure level of the page title.
    pub fn with_structure_level(mut self, level: usize) -> Self {
        self.structure_level = level;
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the output file name.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Internal link target as it appears in output.
    pub fn internal_href(&self, target: &str) -> String {
        format!("{}{}{}", self.link_prefix, target, self.link_suffix)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            full_document: true,
            link_prefix: String::new(),
            link_suffix: String::new(),
            structure_level: 0,
            title: None,
            output_name: "wiki.tex".to_string(),
            collect_stats: false,
        }
    }
}

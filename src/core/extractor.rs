use crate::config::ExtractorSettings;
use crate::models::MatchInfo;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Prefix of the text written to the info element when extraction fails
pub const ERROR_PREFIX: &str = "Fel: ";

/// Errors raised while extracting or rendering the match widget
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome of a single extraction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Widget missing or its text is still below the readiness threshold
    NotReady,
    Ready(MatchInfo),
}

#[derive(Debug, Clone)]
struct FieldSelectors {
    home: Selector,
    away: Selector,
    score: Selector,
    datetime: Selector,
    arena: Selector,
    official: Selector,
}

/// Pulls a [`MatchInfo`] out of the match widget of an HTML document
///
/// The document is only ever read. Running the extractor repeatedly on the
/// same document yields the same result.
#[derive(Debug, Clone)]
pub struct Extractor {
    widget: Selector,
    fields: FieldSelectors,
    min_text_len: usize,
}

impl Extractor {
    /// Compile the configured selectors
    pub fn new(settings: &ExtractorSettings) -> Result<Self, ExtractError> {
        let s = &settings.selectors;

        Ok(Self {
            widget: compile(&s.widget)?,
            fields: FieldSelectors {
                home: compile(&s.home)?,
                away: compile(&s.away)?,
                score: compile(&s.score)?,
                datetime: compile(&s.datetime)?,
                arena: compile(&s.arena)?,
                official: compile(&s.official)?,
            },
            min_text_len: settings.min_text_len,
        })
    }

    /// Extractor with the stock widget selectors and heuristics
    pub fn with_defaults() -> Result<Self, ExtractError> {
        Self::new(&ExtractorSettings::default())
    }

    /// Extract the widget contents of `html`
    ///
    /// Returns [`Extraction::NotReady`] when the widget is absent or its
    /// trimmed text is shorter than the readiness threshold. Missing fields
    /// are not errors, so this cannot fail once the selectors compiled.
    pub fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        self.extract_document(&document)
    }

    /// Same as [`Extractor::extract`] on an already parsed document
    pub fn extract_document(&self, document: &Html) -> Extraction {
        let Some(widget) = document.select(&self.widget).next() else {
            return Extraction::NotReady;
        };

        if rendered_text(widget).chars().count() < self.min_text_len {
            return Extraction::NotReady;
        }

        let f = &self.fields;
        Extraction::Ready(MatchInfo {
            home: first_text(widget, &f.home),
            away: first_text(widget, &f.away),
            score: first_text(widget, &f.score),
            datetime: first_text(widget, &f.datetime),
            arena: first_text(widget, &f.arena),
            referees: widget.select(&f.official).map(rendered_text).collect(),
        })
    }

    /// Run one extraction and produce the text for the info element
    ///
    /// `None` means "not ready yet" and the info element must be left alone.
    /// Failures never escape: they come back as a `Fel: ` message.
    pub fn render(&self, html: &str) -> Option<String> {
        render_output(self.extract(html))
    }
}

/// Turn an extraction outcome into info element text
pub fn render_output(extraction: Extraction) -> Option<String> {
    match extraction {
        Extraction::NotReady => None,
        Extraction::Ready(info) => Some(
            serde_json::to_string_pretty(&info)
                .unwrap_or_else(|e| render_error(&ExtractError::from(e))),
        ),
    }
}

/// Info element text for a failed extraction
pub fn render_error(err: &ExtractError) -> String {
    format!("{}{}", ERROR_PREFIX, err)
}

fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn first_text(widget: ElementRef<'_>, selector: &Selector) -> Option<String> {
    widget.select(selector).next().map(rendered_text)
}

fn is_hidden(name: &str) -> bool {
    matches!(name, "script" | "style" | "template" | "noscript" | "head")
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "address" | "article" | "aside" | "blockquote" | "dd" | "details" | "dialog"
            | "div" | "dl" | "dt" | "fieldset" | "figcaption" | "figure" | "footer"
            | "form" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hr"
            | "li" | "main" | "nav" | "ol" | "p" | "pre" | "section" | "summary"
            | "table" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr" | "ul"
    )
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };

        let name = child.value().name();
        if is_hidden(name) {
            continue;
        }
        if name == "br" {
            out.push('\n');
            continue;
        }

        let block = is_block(name);
        if block {
            out.push('\n');
        }
        collect_text(child, out);
        if block {
            out.push('\n');
        }
    }
}

/// Visible text of an element, close to what a browser's `innerText` gives
///
/// `<br>` and block element edges break lines; script and style contents
/// are skipped. Within a line whitespace runs collapse to one space, and
/// blank lines are dropped.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

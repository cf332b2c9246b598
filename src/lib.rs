//! # rs-domclean
//!
//! Post-parse cleaning for HTML document trees.
//!
//! After a document has been parsed, this crate tidies the tree in place:
//! comments and empty elements are removed on request (with a separating
//! space inserted where a removal would glue two words together), attribute
//! names and values are trimmed, and insignificant whitespace is collapsed
//! while text under `pre`, `code`, `script`, `style` and `textarea` is left
//! alone. Output-time escaping is context-aware: raw-text elements such as
//! `script` and `style` bypass entity escaping.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_domclean::{clean_html, CleanOptions};
//!
//! let html = "<p>Hello<!-- note -->World</p>\n   <span>  </span>";
//! let cleaned = clean_html(html, &CleanOptions::minify())?;
//! assert_eq!(cleaned, "<html><body><p>Hello World</p></body></html>");
//! # Ok::<(), rs_domclean::Error>(())
//! ```
//!
//! ## Bring your own DOM
//!
//! The pass itself only talks to the [`DomTree`] trait. [`DomDocument`]
//! implements it over `dom_query`; any other engine can implement the same
//! contract and call [`clean`] directly.

mod error;
mod options;

/// DOM contract and the `dom_query` adapter.
pub mod dom;

/// Whitespace normalization for text and markup.
pub mod text;

/// Attribute name/value trimming.
pub mod attributes;

/// Comment and empty-node removal with word separation.
pub mod removal;

/// Raw-text / no-escape classification and entity escaping.
pub mod context;

/// The depth-first cleaning pass.
pub mod cleaner;

/// Context-aware HTML serialization.
pub mod serialize;

// Public API - re-exports
pub use attributes::normalize_attributes;
pub use cleaner::{clean, CleanReport};
pub use context::{
    escape_smart, escape_text_node, is_no_escape_context, is_raw_text_context,
    leading_whitespace_size, NoEscapeTag, RawTextTag,
};
pub use dom::{Document, DomDocument, DomTree, NodeKind};
pub use error::{Error, Result};
pub use options::CleanOptions;
pub use removal::remove_with_spacing;
pub use serialize::serialize_smart;
pub use text::{is_whitespace_only, normalize_markup, normalize_whitespace};

/// Cleans a parsed `dom_query` document in place, starting at its root.
///
/// # Example
///
/// ```rust
/// use rs_domclean::{clean_document, CleanOptions, Document};
///
/// let doc = Document::from(r#"<div  class=" box ">  some   text  </div>"#);
/// let report = clean_document(&doc, &CleanOptions::default())?;
///
/// assert_eq!(doc.select("div").attr("class").map(|v| v.to_string()), Some("box".to_string()));
/// assert_eq!(doc.select("div").text().to_string(), "some text");
/// assert!(report.text_rewritten >= 1);
/// # Ok::<(), rs_domclean::Error>(())
/// ```
///
/// # Errors
///
/// Returns the first allocation or mutation failure of the pass.
pub fn clean_document(doc: &Document, options: &CleanOptions) -> Result<CleanReport> {
    let mut dom = DomDocument::new(doc);
    let root = dom.root();
    clean(&mut dom, root, options)
}

/// Parses an HTML document, cleans it and serializes the result.
///
/// # Errors
///
/// Returns `Error::ParseError` for empty input, otherwise the first failure
/// of the pass.
pub fn clean_html(html: &str, options: &CleanOptions) -> Result<String> {
    let doc = parse_non_empty(html)?;
    clean_document(&doc, options)?;
    Ok(doc.html().to_string())
}

/// Parses an HTML snippet, cleans it and returns the cleaned `<body>`
/// content.
///
/// The snippet is parsed as a full document so that the parser's usual
/// recovery applies; only the body's children are returned. If the pass
/// removes the body itself, the result is empty.
///
/// # Example
///
/// ```rust
/// use rs_domclean::{clean_fragment, CleanOptions};
///
/// let options = CleanOptions { remove_comments: true, ..CleanOptions::default() };
/// let out = clean_fragment("<b>Hi</b>  there<!-- x -->", &options)?;
/// assert_eq!(out, "<b>Hi</b> there");
/// # Ok::<(), rs_domclean::Error>(())
/// ```
///
/// # Errors
///
/// Returns `Error::ParseError` for empty input, otherwise the first failure
/// of the pass.
pub fn clean_fragment(html: &str, options: &CleanOptions) -> Result<String> {
    let doc = parse_non_empty(html)?;
    clean_document(&doc, options)?;

    let dom = DomDocument::new(&doc);
    let Some(body) = dom.body() else {
        return Ok(String::new());
    };
    Ok(dom
        .children(body)
        .into_iter()
        .map(|child| dom.serialize(child))
        .collect())
}

fn parse_non_empty(html: &str) -> Result<Document> {
    if html.is_empty() {
        return Err(Error::ParseError("empty input".to_string()));
    }
    Ok(dom::parse(html))
}

//! Malformed input, option loading and other edges of the public API.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use rs_domclean::{
    clean_document, clean_fragment, clean_html, normalize_whitespace, CleanOptions, Document,
    Error,
};

#[test]
fn empty_input_is_a_parse_error() {
    let err = clean_html("", &CleanOptions::default()).expect_err("empty input");
    assert!(matches!(err, Error::ParseError(_)));

    let err = clean_fragment("", &CleanOptions::default()).expect_err("empty input");
    assert!(matches!(err, Error::ParseError(_)));
}

#[test]
fn unclosed_tags_are_recovered() {
    let out = clean_fragment("<div><p>one<p>two  <b>bold", &CleanOptions::minify()).expect("clean");

    assert_eq!(out, "<div><p>one</p><p>two <b>bold</b></p></div>");
}

#[test]
fn deeply_nested_empty_tree_collapses() {
    let depth = 200;
    let html = format!("<p>x</p>{}{}", "<div>".repeat(depth), "</div>".repeat(depth));

    let out = clean_fragment(&html, &CleanOptions::minify()).expect("clean");

    assert_eq!(out, "<p>x</p>");
}

#[test]
fn non_ascii_whitespace_is_content() {
    // U+00A0 is not ASCII whitespace: it is kept, and serialized as &nbsp;.
    let out = clean_fragment("<p>\u{a0}</p><p>  a\u{a0} b  </p>", &CleanOptions::minify())
        .expect("clean");

    assert_eq!(out, "<p>&nbsp;</p><p>a&nbsp; b</p>");
}

#[test]
fn escaped_entities_survive_round_trip() {
    let out = clean_fragment("<p>  a &lt; b &amp;&amp; c  </p>", &CleanOptions::default())
        .expect("clean");

    assert_eq!(out, "<p>a &lt; b &amp;&amp; c</p>");
}

#[test]
fn comment_at_document_level_removed() {
    let doc = Document::from("<!-- header --><p>x</p>");
    let report = clean_document(
        &doc,
        &CleanOptions {
            remove_comments: true,
            ..CleanOptions::default()
        },
    )
    .expect("clean");

    assert_eq!(report.comments_removed, 1);
    assert!(!doc.html().contains("<!--"));
}

#[test]
fn options_from_json() {
    let options = CleanOptions::from_json(
        r#"{"remove_comments": true, "remove_empty_elements": true, "keep_new_lines": false}"#,
    )
    .expect("valid");
    assert_eq!(options, CleanOptions::minify());

    let options = CleanOptions::from_json("{}").expect("valid");
    assert_eq!(options, CleanOptions::default());

    let err = CleanOptions::from_json("not json").expect_err("invalid");
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn options_serialize_to_json() {
    let json = serde_json::to_string(&CleanOptions::minify()).expect("serialize");
    let back = CleanOptions::from_json(&json).expect("parse");

    assert_eq!(back, CleanOptions::minify());
}

#[test]
fn markup_normalization() {
    let markup = "<ul>\n  <li> a   b </li>\n\n  <li>c</li>\n</ul>";

    assert_eq!(
        normalize_whitespace(markup, false).expect("normalize"),
        "<ul><li> a b </li><li>c</li></ul>"
    );
    assert_eq!(
        normalize_whitespace("line one\n\n  line two", true).expect("normalize"),
        "line one\nline two"
    );
}

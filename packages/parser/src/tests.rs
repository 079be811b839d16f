use crate::*;

#[test]
fn test_sanitize_strips_scripts_by_default() {
    let clean = sanitize(
        "<script>alert(1)</script><p>ok</p>",
        &SanitizationPolicy::default(),
    );

    assert!(!clean.contains("<script"));
    assert!(clean.contains("<p>ok</p>"));
}

#[test]
fn test_sanitize_preserves_scripts_when_asked() {
    let policy = SanitizationPolicy::from_options(&SanitizationOptions {
        preserve_scripts: true,
        ..Default::default()
    });
    let clean = sanitize("<script>alert(1)</script><p>ok</p>", &policy);

    assert!(clean.contains("<script>alert(1)</script>"));
    assert!(clean.contains("<p>ok</p>"));
}

#[test]
fn test_sanitize_removes_event_handlers() {
    let clean = sanitize(
        r#"<button onclick="steal()" class="btn">Go</button>"#,
        &SanitizationPolicy::default(),
    );

    assert_eq!(clean, r#"<button class="btn">Go</button>"#);
}

#[test]
fn test_sanitize_unwraps_unknown_tags() {
    let clean = sanitize(
        "<p>a <mark>marked</mark> word</p>",
        &SanitizationPolicy::default(),
    );

    assert_eq!(clean, "<p>a marked word</p>");
}

#[test]
fn test_sanitize_drops_disallowed_attributes() {
    let clean = sanitize(
        r#"<div id="x" bogus="1" aria-label="label" data-id="7">t</div>"#,
        &SanitizationPolicy::default(),
    );

    assert!(clean.contains(r#"id="x""#));
    assert!(clean.contains(r#"aria-label="label""#));
    assert!(clean.contains(r#"data-id="7""#));
    assert!(!clean.contains("bogus"));
}

#[test]
fn test_sanitize_without_styles() {
    let policy = SanitizationPolicy::from_options(&SanitizationOptions {
        allow_styles: false,
        ..Default::default()
    });
    let clean = sanitize(
        r#"<style>p{color:red}</style><p style="color:blue">x</p>"#,
        &policy,
    );

    assert_eq!(clean, "<p>x</p>");
}

#[test]
fn test_sanitize_keeps_document_shape() {
    let html = "<!DOCTYPE html><html lang=\"en\"><head><title>T</title></head><body><p>x</p><script>bad()</script></body></html>";
    let clean = sanitize(html, &SanitizationPolicy::default());

    assert!(clean.starts_with("<!DOCTYPE html>"));
    assert!(clean.contains("<title>T</title>"));
    assert!(clean.contains("<p>x</p>"));
    assert!(!clean.contains("bad()"));
}

#[test]
fn test_sanitize_malformed_input() {
    let clean = sanitize("<div><p>unclosed <b>bold", &SanitizationPolicy::default());

    assert_eq!(clean, "<div><p>unclosed <b>bold</b></p></div>");
}

#[test]
fn test_sanitize_output_stays_safe_when_reparsed() {
    let payloads = [
        r#"<svg><style><a title="</style><img src=x onerror=alert(1)>"></a></style></svg><p>ok</p>"#,
        r#"<svg><title><a title="</title><img src=x onerror=alert(1)>"></a></title></svg><p>ok</p>"#,
        r#"<math><iframe><a title="</iframe><img src=x onerror=alert(1)>"></a></iframe></math><p>ok</p>"#,
    ];

    for payload in payloads {
        let clean = sanitize(payload, &SanitizationPolicy::default());
        let reparsed = dom::parse_html(&clean);

        assert!(dom::all_matches(&reparsed, "img[onerror]").is_empty(), "{}", clean);
        assert!(!clean.contains("<svg") && !clean.contains("<math"), "{}", clean);
        assert!(clean.contains("<p>ok</p>"));
    }
}

#[test]
fn test_sanitize_keeps_style_text_only() {
    let clean = sanitize(
        "<style>p { color: red; }</style><p>x</p>",
        &SanitizationPolicy::default(),
    );

    assert_eq!(clean, "<style>p { color: red; }</style><p>x</p>");
}

#[test]
fn test_preserved_scripts_keep_loading_attributes() {
    let policy = SanitizationPolicy::from_options(&SanitizationOptions {
        preserve_scripts: true,
        ..Default::default()
    });
    let html = r#"<script src="a.js" defer="" async="" integrity="sha-x" crossorigin="anonymous"></script>"#;

    let clean = sanitize(html, &policy);

    for attribute in ["defer", "async", r#"integrity="sha-x""#, r#"crossorigin="anonymous""#] {
        assert!(clean.contains(attribute), "{} missing from {}", attribute, clean);
    }
}

#[test]
fn test_parse_extracts_structure() {
    let html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>My Page</title>
    <link rel="stylesheet" href="/main.css">
    <link rel="icon" href="/favicon.ico">
    <style>body { margin: 0; }</style>
    <script src="/app.js"></script>
</head>
<body>
    <h1>Hello</h1>
    <style>h1 { color: red; }</style>
    <script>console.log("hi")</script>
</body>
</html>"#;

    let parsed = parse_document(html);

    assert_eq!(parsed.title, "My Page");
    assert_eq!(parsed.stylesheet_links, vec!["/main.css"]);
    assert_eq!(
        parsed.styles,
        vec!["body { margin: 0; }", "h1 { color: red; }"]
    );
    assert_eq!(parsed.scripts, vec!["/app.js", "console.log(\"hi\")"]);
    assert!(parsed.full_markup.starts_with("<html lang=\"en\">"));
    assert!(parsed.head_markup.starts_with("<head>"));
    assert!(parsed.body_markup.starts_with("<body>"));
    assert!(parsed.body_content.starts_with("<h1>Hello</h1>"));
}

#[test]
fn test_parse_defaults_title() {
    let parsed = parse_document("<p>no head at all</p>");

    assert_eq!(parsed.title, DEFAULT_TITLE);
    assert_eq!(parsed.body_content, "<p>no head at all</p>");
    assert!(parsed.styles.is_empty());
    assert!(parsed.scripts.is_empty());
}

#[test]
fn test_parse_never_fails() {
    for input in ["", "<<<>>>", "</body></html>", "<html><html><body>", "\u{0}"] {
        let parsed = parse_document(input);
        assert!(parsed.full_markup.starts_with("<html"));
    }
}

#[test]
fn test_style_text_joins_blocks() {
    let parsed = parse_document(
        "<style>\n  a { color: red; }\n</style><style> </style><style>b { x: y; }</style>",
    );

    assert_eq!(parsed.style_text(), "a { color: red; }\nb { x: y; }");
}

#[test]
fn test_import_html_sanitizes_first() {
    let parsed = import_html(
        "<html><head><style>p{}</style></head><body><p onclick=\"x()\">hi</p><script>evil()</script></body></html>",
        &SanitizationOptions::default(),
    );

    assert_eq!(parsed.body_content, "<p>hi</p>");
    assert!(parsed.scripts.is_empty());
    assert_eq!(parsed.styles, vec!["p{}"]);
}

#[test]
fn test_parsed_document_serializes_camel_case() {
    let parsed = parse_document("<title>T</title><p>x</p>");
    let json = serde_json::to_value(&parsed).unwrap();

    assert_eq!(json["title"], "T");
    assert_eq!(json["bodyContent"], "<p>x</p>");
    assert!(json["stylesheetLinks"].as_array().unwrap().is_empty());
}

use crate::*;
use twinpane_parser::parse_document;

#[test]
fn test_assemble_round_trips_through_parser() {
    let bodies = [
        "<h1>Title</h1>\n<p>Paragraph with <em>emphasis</em>.</p>",
        "<div class=\"card\" data-id=\"3\"><img src=\"a.png\" alt=\"\"></div>",
        "",
    ];
    let stylesheets = ["", "body { margin: 0; }", "h1 { color: red; }\np > a { color: blue; }"];

    for body in bodies {
        for css in stylesheets {
            let parsed = parse_document(&assemble(body, css));

            assert_eq!(parsed.body_content, body.trim());
            assert_eq!(parsed.style_text(), css.trim());
            if css.is_empty() {
                assert!(parsed.styles.is_empty());
            } else {
                assert_eq!(parsed.styles.len(), 1);
            }
        }
    }
}

#[test]
fn test_default_template_parses() {
    let parsed = parse_document(DEFAULT_TEMPLATE);

    assert_eq!(parsed.title, "Untitled Document");
    assert!(parsed.body_content.contains("<h1>Welcome to Your HTML Document</h1>"));
    assert!(parsed.style_text().contains("line-height: 1.6"));
}

#[test]
fn test_export_adds_doctype() {
    let html = export_html("<p>Hello</p>", &[], &ExportOptions::default()).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<body><p>Hello</p></body>"));
}

#[test]
fn test_export_replaces_head_styles() {
    let source = "<html><head><style>p { color: red; }</style></head><body><p>x</p></body></html>";
    let styles = vec!["p { color: blue; }".to_string(), "  ".to_string(), "h1 {}".to_string()];

    let html = export_html(source, &styles, &ExportOptions::default()).unwrap();

    assert!(!html.contains("color: red"));
    assert!(html.contains("<style>p { color: blue; }</style><style>h1 {}</style>"));
}

#[test]
fn test_export_strips_scripts_unless_preserved() {
    let source = "<html><body><p onclick=\"go()\">x</p><script>go()</script></body></html>";

    let strict = export_html(source, &[], &ExportOptions::default()).unwrap();
    assert!(!strict.contains("<script"));
    assert!(!strict.contains("onclick"));

    let options = ExportOptions {
        preserve_scripts: true,
        ..Default::default()
    };
    let permissive = export_html(source, &[], &options).unwrap();
    assert!(permissive.contains("<script>go()</script>"));
    assert!(permissive.contains("onclick=\"go()\""));
}

#[test]
fn test_export_inlines_css_in_append_order() {
    let source = r#"<html><head><style>
        p { color: red; }
        .note { color: green; }
        a::before { content: "x"; }
    </style></head><body><p class="note" style="margin: 0;">x</p><p>y</p></body></html>"#;
    let options = ExportOptions {
        inline_css: true,
        ..Default::default()
    };

    let html = export_html(source, &[], &options).unwrap();

    assert!(!html.contains("<style"));
    assert!(html.contains(r#"<p class="note" style="margin: 0; color: red; color: green;">x</p>"#));
    assert!(html.contains(r#"<p style="color: red;">y</p>"#));
}

#[test]
fn test_export_formats_output() {
    let options = ExportOptions {
        format_html: true,
        ..Default::default()
    };

    let html = export_html("<div><p>x</p></div>", &[], &options).unwrap();

    assert!(html.contains("<div>\n"));
    assert!(html.contains("<p>x</p>"));
}

#[test]
fn test_format_is_idempotent() {
    let source = assemble(
        "<div class=\"wrap\"><ul><li>one</li><li>two</li></ul><br><img src=\"x.png\"/></div>",
        "body { margin: 0; }",
    );

    let once = format_html(&source);
    let twice = format_html(&once);

    assert_eq!(once, twice);
}

#[test]
fn test_export_options_deserialize() {
    let options: ExportOptions =
        serde_json::from_str(r#"{ "inlineCSS": true, "preserveScripts": true }"#).unwrap();

    assert!(options.inline_css);
    assert!(options.preserve_scripts);
    assert!(!options.format_html);
    assert!(options.allow_styles);
}

#[test]
fn test_download_file_name() {
    assert_eq!(download_file_name("page"), "page.html");
    assert_eq!(download_file_name("page.HTML"), "page.HTML");
    assert_eq!(download_file_name(""), "document.html");
}

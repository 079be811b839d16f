/// Title written into every assembled document.
pub const DOCUMENT_TITLE: &str = "Document";

/// Seed document for first load and "new document".
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Untitled Document</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 20px;
            line-height: 1.6;
        }
    </style>
</head>
<body>
    <h1>Welcome to Your HTML Document</h1>
    <p>Start editing your content here...</p>
</body>
</html>"#;

const INDENT: &str = "    ";

struct Context {
    depth: usize,
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Caller-supplied content goes in untouched, on its own line.
    fn add_verbatim(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(mut self) -> String {
        if self.buffer.ends_with('\n') {
            self.buffer.pop();
        }
        self.buffer
    }
}

/// Wrap a body fragment and a stylesheet into a complete HTML document.
///
/// Pure string templating: neither argument is escaped or sanitized, so
/// both must already be trusted.
pub fn assemble(body_fragment: &str, css_text: &str) -> String {
    let mut ctx = Context::new();

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");

    compile_head(css_text, &mut ctx);

    ctx.add_line("<body>");
    ctx.add_verbatim(body_fragment);
    ctx.add_line("</body>");
    ctx.add_line("</html>");

    ctx.get_output()
}

fn compile_head(css_text: &str, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", DOCUMENT_TITLE));

    if !css_text.trim().is_empty() {
        ctx.add_line("<style>");
        ctx.add_verbatim(css_text);
        ctx.add_line("</style>");
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

use crate::vdom::VNode;

/// Options for HTML rendering
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    /// Single-line output, used for embedding and tests
    pub fn compact() -> Self {
        Self {
            pretty: false,
            indent: String::new(),
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render a node tree to HTML
pub fn render_html(node: &VNode, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    write_node(node, &mut ctx);
    ctx.get_output()
}

/// Render a full HTML document around `body`
pub fn render_document(
    title: &str,
    stylesheet: Option<&str>,
    body: &[VNode],
    options: &HtmlOptions,
) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    if let Some(css) = stylesheet {
        ctx.add_line("<style>");
        ctx.add_line(css);
        ctx.add_line("</style>");
    }
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    for node in body {
        write_node(node, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => {
            if ctx.options.pretty {
                ctx.add_indent();
            }
            ctx.add(&format!("<{}", tag));

            for (name, value) in attributes {
                if value.is_empty() && is_boolean_attribute(name) {
                    ctx.add(&format!(" {}", name));
                } else {
                    ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
                }
            }

            if !styles.is_empty() {
                let inline = styles
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect::<Vec<_>>()
                    .join("; ");
                ctx.add(&format!(" style=\"{}\"", escape_html(&inline)));
            }

            // Void elements
            if children.is_empty() && is_self_closing(tag) {
                ctx.add(" />");
                ctx.newline();
                return;
            }

            ctx.add(">");

            let block = has_element_children(children);
            if block {
                ctx.newline();
                ctx.indent();
                for child in children {
                    write_node(child, ctx);
                }
                ctx.dedent();
                if ctx.options.pretty {
                    ctx.add_indent();
                }
            } else {
                for child in children {
                    write_inline(child, ctx);
                }
            }

            ctx.add(&format!("</{}>", tag));
            ctx.newline();
        }

        VNode::Text { content } => ctx.add_line(&escape_html(content)),

        VNode::Comment { content } => {
            ctx.add_line(&format!("<!-- {} -->", content.replace("--", "- -")))
        }
    }
}

fn write_inline(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add(&escape_html(content)),
        VNode::Comment { content } => {
            ctx.add(&format!("<!-- {} -->", content.replace("--", "- -")))
        }
        VNode::Element { .. } => write_node(node, ctx),
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_boolean_attribute(name: &str) -> bool {
    matches!(
        name,
        "checked"
            | "selected"
            | "disabled"
            | "hidden"
            | "readonly"
            | "required"
            | "autoplay"
            | "loop"
            | "muted"
            | "controls"
            | "playsinline"
            | "open"
    )
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| matches!(child, VNode::Element { .. }))
}

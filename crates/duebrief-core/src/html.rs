//! HTML rendering of the plain-text digest.

/// Transforms the plain-text digest into an HTML fragment.
///
/// Content is HTML-escaped first, then `**…**` spans become `<b>…</b>`,
/// a blank line is guaranteed before every section header that follows
/// prior content, and the whole result is wrapped in a monospace
/// preformatted block. For input whose sections are already separated by
/// blank lines the line content is unchanged apart from the bold tags.
#[must_use]
pub fn render_html(text: &str) -> String {
    let spaced = ensure_header_spacing(&convert_bold(&escape(text)));
    format!("<pre style=\"font-family: monospace\">{spaced}</pre>")
}

/// Escapes the HTML-significant characters in item text.
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replaces each `**…**` span with `<b>…</b>`.
///
/// Spans never nest; an unpaired trailing `**` is left verbatim.
fn convert_bold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("**") else { break };
        out.push_str(&rest[..open]);
        out.push_str("<b>");
        out.push_str(&after[..close]);
        out.push_str("</b>");
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

/// Guarantees one blank line before every bold section header that
/// follows prior content.
///
/// A no-op when the preceding line is already blank, so applying it to
/// its own output changes nothing.
fn ensure_header_spacing(input: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in input.lines() {
        if line.starts_with("<b>") && out.last().is_some_and(|prev| !prev.is_empty()) {
            out.push("");
        }
        out.push(line);
    }
    out.join("\n")
}

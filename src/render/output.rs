use std::fmt;

use super::FormattedDocument;

struct TextLayout<'a>(&'a FormattedDocument);

struct HtmlLayout<'a>(&'a FormattedDocument);

impl FormattedDocument {
    pub fn to_text(&self) -> String {
        TextLayout(self).to_string()
    }

    /// Standalone HTML page handed to a browser print dialog.
    pub fn to_html(&self) -> String {
        HtmlLayout(self).to_string()
    }
}

impl fmt::Display for TextLayout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.0;
        writeln!(f, "{}", doc.country)?;
        writeln!(f, "{}", doc.title)?;
        writeln!(f, "{}", doc.heading)?;

        for section in &doc.sections {
            writeln!(f)?;
            let indent = match section.title {
                Some(title) => {
                    writeln!(f, "{title}")?;
                    "  "
                }
                None => "",
            };
            for line in &section.lines {
                writeln!(f, "{indent}{}: {}", line.label, line.value)?;
            }
        }

        writeln!(f, "\n{}", doc.stamp)
    }
}

impl fmt::Display for HtmlLayout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.0;
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"ru\">")?;
        writeln!(
            f,
            "<head><meta charset=\"utf-8\"><title>{} {}</title></head>",
            escape_html(doc.title),
            escape_html(&doc.number)
        )?;
        writeln!(f, "<body class=\"certificate {}\">", doc.doc_type)?;
        writeln!(f, "<header>")?;
        writeln!(f, "<div class=\"country\">{}</div>", escape_html(doc.country))?;
        writeln!(f, "<h1>{}</h1>", escape_html(doc.title))?;
        writeln!(f, "<h2>{}</h2>", escape_html(doc.heading))?;
        writeln!(f, "</header>")?;

        for section in &doc.sections {
            writeln!(f, "<section>")?;
            if let Some(title) = section.title {
                writeln!(f, "<h3>{}</h3>", escape_html(title))?;
            }
            writeln!(f, "<dl>")?;
            for line in &section.lines {
                writeln!(
                    f,
                    "<dt>{}</dt><dd>{}</dd>",
                    escape_html(line.label),
                    escape_html(&line.value)
                )?;
            }
            writeln!(f, "</dl>")?;
            writeln!(f, "</section>")?;
        }

        writeln!(f, "<footer class=\"stamp\">{}</footer>", escape_html(doc.stamp))?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

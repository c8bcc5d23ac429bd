//! Light markdown for bot replies: `**bold**`, `__bold__`, `-`/`*` bullets and
//! line breaks. Input is HTML-escaped before any markup is added.

const LIST_OPEN: &str = r#"<ul class="list-disc ml-4 mt-2 space-y-1">"#;

pub fn format_message(text: &str) -> String {
    let mut html = String::with_capacity(text.len() + 32);
    let mut in_list = false;
    let mut previous_was_text = false;

    for line in text.split('\n') {
        if let Some(item) = bullet_item(line) {
            if !in_list {
                html.push_str(LIST_OPEN);
                in_list = true;
            }
            html.push_str("<li>");
            html.push_str(&inline(item));
            html.push_str("</li>");
            previous_was_text = false;
        } else {
            if in_list {
                html.push_str("</ul>");
                in_list = false;
            }
            if previous_was_text {
                html.push_str("<br/>");
            }
            html.push_str(&inline(line));
            previous_was_text = true;
        }
    }
    if in_list {
        html.push_str("</ul>");
    }
    html
}

fn bullet_item(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-').or_else(|| line.strip_prefix('*'))?;
    let item = rest.trim_start();
    (rest.starts_with(char::is_whitespace) && !item.is_empty()).then_some(item)
}

fn inline(text: &str) -> String {
    let escaped = escape_html(text);
    embolden(&embolden(&escaped, "**"), "__")
}

fn embolden(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(marker) {
        let after = &rest[start + marker.len()..];
        let Some(end) = after.find(marker) else { break };
        out.push_str(&rest[..start]);
        out.push_str("<strong>");
        out.push_str(&after[..end]);
        out.push_str("</strong>");
        rest = &after[end + marker.len()..];
    }
    out.push_str(rest);
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

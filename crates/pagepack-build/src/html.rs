//! Minimal string-based HTML tag builder.
//!
//! Attribute values and children are inserted verbatim; nothing is escaped.

/// Render attributes as ` key='value'` pairs, or an empty string when there are none.
pub fn attribute_string(attributes: &[(&str, &str)]) -> String {
    let raw = attributes
        .iter()
        .map(|(key, value)| format!("{}='{}'", key, value))
        .collect::<Vec<_>>()
        .join(" ");

    if raw.is_empty() {
        raw
    } else {
        format!(" {}", raw)
    }
}

/// Render an element with its child on its own line.
pub fn to_tag(name: &str, attributes: &[(&str, &str)], child: &str) -> String {
    format!(
        "<{name}{attrs}>\n{child}\n</{name}>",
        attrs = attribute_string(attributes)
    )
}

/// Render a self-closing element.
pub fn self_closing_tag(name: &str, attributes: &[(&str, &str)]) -> String {
    format!("<{}{}/>", name, attribute_string(attributes))
}

/// Render an element without attributes.
pub fn simple_tag(name: &str, child: &str) -> String {
    to_tag(name, &[], child)
}

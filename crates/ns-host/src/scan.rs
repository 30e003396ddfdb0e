use ns_core::{NyanScriptError, ScriptTag};
use roxmltree::Document;

// Discovers every <nyscript> element in document order. A `src` attribute
// names an external script body and wins over inline text; otherwise the
// element's concatenated text content is the body.
pub fn scan_document(source: &str) -> Result<Vec<ScriptTag>, NyanScriptError> {
    let document = Document::parse(source)
        .map_err(|error| NyanScriptError::new("HOST_DOCUMENT_PARSE", error.to_string()))?;

    let mut tags = Vec::new();
    for node in document.descendants() {
        if !node.is_element() || node.tag_name().name() != "nyscript" {
            continue;
        }
        if let Some(src) = node.attribute("src") {
            tags.push(ScriptTag::external(src));
            continue;
        }
        let body = node
            .descendants()
            .filter(|child| child.is_text())
            .filter_map(|child| child.text())
            .collect::<String>();
        tags.push(ScriptTag::inline(body));
    }

    Ok(tags)
}

//! Embedding documents into pages
//!
//! `to_script_tag` renders any document as a `<script type="application/ld+json">`
//! block ready to drop into a page head.

use serde::Serialize;

use crate::error::{Error, Result};

/// Serialize a document into a JSON-LD script block.
///
/// `<` is written as `\u003c` so a `</script>` inside a description cannot
/// terminate the block early.
pub fn to_script_tag<T: Serialize>(document: &T) -> Result<String> {
    let json = serde_json::to_string(document).map_err(Error::Serialize)?;
    Ok(format!(
        r#"<script type="application/ld+json">{}</script>"#,
        json.replace('<', "\\u003c")
    ))
}

//! Inline citation rewriting.
//!
//! Each annotation's marked substring is replaced in the message body with a
//! bracketed index `[i]`, and a matching footnote line is appended:
//!
//! ```text
//! [0] <quote> from <filename>
//! [1] Click <here> to download <filename>
//! ```

use std::collections::HashMap;

use gptc_types::message::{Annotation, TextContent};

/// Build the footnote line for annotation `index`.
///
/// Citations without a quote (newer API versions drop it) fall back to the
/// annotated text itself. Unsupported annotations have no footnote.
pub fn citation_line(index: usize, annotation: &Annotation, filename: &str) -> Option<String> {
    match annotation {
        Annotation::FileCitation {
            text, file_citation, ..
        } => {
            let quote = file_citation.quote.as_deref().unwrap_or(text.as_str());
            Some(format!("[{index}] {quote} from {filename}"))
        }
        Annotation::FilePath { .. } => {
            Some(format!("[{index}] Click <here> to download {filename}"))
        }
        Annotation::Unsupported => None,
    }
}

/// Rewrite `content` into a markdown body with numbered citations.
///
/// `filenames` maps file ids to display names; ids missing from the map are
/// shown as the raw id. Every occurrence of an annotated substring is
/// replaced, in annotation order. Unsupported annotations are skipped and do
/// not take an index.
pub fn rewrite_citations(content: &TextContent, filenames: &HashMap<String, String>) -> String {
    let mut body = content.value.clone();
    let mut citations = Vec::with_capacity(content.annotations.len());

    let cited = content
        .annotations
        .iter()
        .filter_map(|annotation| Some((annotation, annotation.file_id()?)));
    for (index, (annotation, file_id)) in cited.enumerate() {
        if !annotation.text().is_empty() {
            body = body.replace(annotation.text(), &format!("[{index}]"));
        }
        let filename = filenames.get(file_id).map(String::as_str).unwrap_or(file_id);
        citations.extend(citation_line(index, annotation, filename));
    }

    if !citations.is_empty() {
        body.push('\n');
        body.push_str(&citations.join("\n"));
    }
    body
}

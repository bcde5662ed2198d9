//! Thread message types.
//!
//! A message carries an ordered list of content items. Each item is a tagged
//! union on the wire field `type`; text items carry annotations marking
//! citation spans.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Author of a thread message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message stored in a thread. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

/// One content item of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    ImageFile { image_file: ImageFile },
    /// Any content type this client does not render (e.g. `image_url`).
    #[serde(other)]
    Unsupported,
}

/// Text body plus the annotations that point into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Reference to an image file produced by the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    pub file_id: String,
}

/// A marked span inside message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    FileCitation {
        text: String,
        #[serde(default)]
        start_index: Option<usize>,
        #[serde(default)]
        end_index: Option<usize>,
        file_citation: FileCitation,
    },
    FilePath {
        text: String,
        #[serde(default)]
        start_index: Option<usize>,
        #[serde(default)]
        end_index: Option<usize>,
        file_path: FilePath,
    },
    /// Any annotation type this client does not render.
    #[serde(other)]
    Unsupported,
}

impl Annotation {
    /// The exact substring of the message text this annotation marks.
    /// Empty for unsupported annotations.
    pub fn text(&self) -> &str {
        match self {
            Annotation::FileCitation { text, .. } | Annotation::FilePath { text, .. } => text,
            Annotation::Unsupported => "",
        }
    }

    /// Id of the file the annotation refers to.
    pub fn file_id(&self) -> Option<&str> {
        match self {
            Annotation::FileCitation { file_citation, .. } => Some(&file_citation.file_id),
            Annotation::FilePath { file_path, .. } => Some(&file_path.file_id),
            Annotation::Unsupported => None,
        }
    }
}

/// A quoted excerpt from an uploaded source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCitation {
    pub file_id: String,
    /// Present on older API versions; newer ones omit it.
    #[serde(default)]
    pub quote: Option<String>,
}

/// A downloadable file generated by the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePath {
    pub file_id: String,
}

/// Body of a create-message request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub role: MessageRole,
    pub content: String,
}

/// One page of a list-messages response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageList {
    pub data: Vec<Message>,
    #[serde(default)]
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_with_annotations_decodes() {
        let json = r#"{
            "id": "msg_1",
            "object": "thread.message",
            "thread_id": "thread_1",
            "role": "assistant",
            "content": [{
                "type": "text",
                "text": {
                    "value": "See the docs【4:0†source】.",
                    "annotations": [
                        {
                            "type": "file_citation",
                            "text": "【4:0†source】",
                            "start_index": 12,
                            "end_index": 24,
                            "file_citation": {"file_id": "file-a", "quote": "foo"}
                        },
                        {
                            "type": "file_path",
                            "text": "sandbox:/mnt/data/out.csv",
                            "file_path": {"file_id": "file-b"}
                        }
                    ]
                }
            }]
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.role, MessageRole::Assistant);
        let MessageContent::Text { text } = &message.content[0] else {
            panic!("expected text content");
        };
        assert_eq!(text.annotations.len(), 2);
        assert_eq!(text.annotations[0].file_id(), Some("file-a"));
        assert_eq!(text.annotations[1].text(), "sandbox:/mnt/data/out.csv");
        match &text.annotations[0] {
            Annotation::FileCitation { file_citation, .. } => {
                assert_eq!(file_citation.quote.as_deref(), Some("foo"));
            }
            other => panic!("expected file citation, got {other:?}"),
        }
    }

    #[test]
    fn test_citation_without_quote_decodes() {
        let json = r#"{"type": "file_citation", "text": "[x]", "file_citation": {"file_id": "file-a"}}"#;
        let annotation: Annotation = serde_json::from_str(json).unwrap();
        match annotation {
            Annotation::FileCitation { file_citation, .. } => assert!(file_citation.quote.is_none()),
            other => panic!("expected file citation, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_annotation_type_keeps_message_decodable() {
        let json = r#"{
            "id": "msg_2",
            "thread_id": "thread_1",
            "role": "assistant",
            "content": [{
                "type": "text",
                "text": {
                    "value": "Look here",
                    "annotations": [{"type": "url_citation", "text": "here", "url": "https://example.com"}]
                }
            }]
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        let MessageContent::Text { text } = &message.content[0] else {
            panic!("expected text content");
        };
        assert_eq!(text.annotations, vec![Annotation::Unsupported]);
        assert_eq!(text.annotations[0].file_id(), None);
        assert_eq!(text.annotations[0].text(), "");
    }

    #[test]
    fn test_image_file_content_decodes() {
        let json = r#"{"type": "image_file", "image_file": {"file_id": "file-img"}}"#;
        let content: MessageContent = serde_json::from_str(json).unwrap();
        assert_eq!(
            content,
            MessageContent::ImageFile {
                image_file: ImageFile {
                    file_id: "file-img".to_string()
                }
            }
        );
    }

    #[test]
    fn test_unknown_content_type_is_unsupported() {
        let json = r#"{"type": "image_url", "image_url": {"url": "https://example.com/a.png"}}"#;
        let content: MessageContent = serde_json::from_str(json).unwrap();
        assert_eq!(content, MessageContent::Unsupported);
    }

    #[test]
    fn test_new_message_serializes_lowercase_role() {
        let body = NewMessage {
            role: MessageRole::User,
            content: "hello".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(value["content"], "hello");
    }
}

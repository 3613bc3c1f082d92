//! # Content Renderer
//!
//! Maps one topic to the ordered blocks the article page shows:
//!
//! ```text
//! Title                         always
//! Body                          always
//! Key Points                    key_points non-empty
//! Industry Examples             examples non-empty
//! Architectural Considerations  present and non-empty
//! Limitations & Considerations  present and non-empty
//! ```
//!
//! Only presence checks happen here. Styling belongs to the TUI.

use crate::core::topic::{Example, Topic};

/// Which bulleted list a `Block::Bullets` holds. Drives heading and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletKind {
    KeyPoints,
    ArchitecturalConsiderations,
    Limitations,
}

impl BulletKind {
    pub fn heading(self) -> &'static str {
        match self {
            BulletKind::KeyPoints => "Key Points",
            BulletKind::ArchitecturalConsiderations => "Architectural Considerations",
            BulletKind::Limitations => "Limitations & Considerations",
        }
    }
}

pub const EXAMPLES_HEADING: &str = "Industry Examples";

/// Caption for a code block whose example has no language.
pub const DEFAULT_CODE_LABEL: &str = "Code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSample<'a> {
    pub label: &'a str,
    /// Language token for syntax lookup, when the example names one.
    pub language: Option<&'a str>,
    pub code: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleView<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Absent when the example carries no code.
    pub code: Option<CodeSample<'a>>,
    pub explanation: &'a str,
}

impl<'a> ExampleView<'a> {
    fn from_example(example: &'a Example) -> Self {
        let language = example.language.as_deref();
        Self {
            title: &example.title,
            description: &example.description,
            code: example.code.as_deref().map(|code| CodeSample {
                label: language.unwrap_or(DEFAULT_CODE_LABEL),
                language,
                code,
            }),
            explanation: &example.explanation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Title(&'a str),
    /// Markdown body, passed through untouched.
    Body(&'a str),
    Bullets(BulletKind, &'a [String]),
    Examples(Vec<ExampleView<'a>>),
}

/// A topic laid out as display blocks, borrowing from the topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicView<'a> {
    pub blocks: Vec<Block<'a>>,
}

impl<'a> TopicView<'a> {
    pub fn from_topic(topic: &'a Topic) -> Self {
        let mut blocks = vec![Block::Title(&topic.title), Block::Body(&topic.content)];

        if !topic.key_points.is_empty() {
            blocks.push(Block::Bullets(BulletKind::KeyPoints, &topic.key_points));
        }
        if !topic.examples.is_empty() {
            blocks.push(Block::Examples(
                topic.examples.iter().map(ExampleView::from_example).collect(),
            ));
        }
        if let Some(items) = non_empty(&topic.architectural_considerations) {
            blocks.push(Block::Bullets(BulletKind::ArchitecturalConsiderations, items));
        }
        if let Some(items) = non_empty(&topic.limitations) {
            blocks.push(Block::Bullets(BulletKind::Limitations, items));
        }

        Self { blocks }
    }

    pub fn has_bullets(&self, kind: BulletKind) -> bool {
        self.blocks
            .iter()
            .any(|b| matches!(b, Block::Bullets(k, _) if *k == kind))
    }
}

fn non_empty(list: &Option<Vec<String>>) -> Option<&[String]> {
    list.as_deref().filter(|items| !items.is_empty())
}

//! Requirement tree nodes.
//!
//! A [`RequirementNode`] is one entry in a category's `courses` list: either a
//! concrete course, a flexible requirement, or a group combining other nodes.
//!
//! Nodes are read from the JSON stored with each program. Deserialization is
//! deliberately lenient: every field is optional and unrecognised
//! `courseType` values become [`NodeKind::Unknown`], so one bad node never
//! makes a whole program unloadable. Missing or invalid fields are reported
//! later by the evaluator and the lint rules.

use serde::{Deserialize, Serialize};

/// Credits assumed for a course whose record has no (or a zero) credit value.
pub const DEFAULT_CREDITS: u32 = 3;

/// A node of the requirement tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub struct RequirementNode {
    /// Stable identity for display and caching. Not globally unique.
    pub group_id: Option<String>,
    /// Indices into the program's footnote list. Display only.
    pub footnote_refs: Vec<u32>,
    /// What kind of requirement this is.
    pub kind: NodeKind,
}

/// The variant part of a [`RequirementNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A concrete course.
    Regular(Course),
    /// Any course from an approved list, or a free-text requirement.
    Flexible(FlexibleRequirement),
    /// Every child is required.
    AndGroup { children: Vec<RequirementNode> },
    /// At least one child is required.
    OrGroup { children: Vec<RequirementNode> },
    /// At least `selection_count` of `options` are required.
    Selection {
        selection_count: i64,
        options: Vec<RequirementNode>,
    },
    /// A named group from the program's `shared_groups` table.
    Reference { name: String },
    /// A `courseType` this version does not understand.
    Unknown { kind: String },
}

/// A concrete course requirement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Course {
    pub code: Option<String>,
    pub title: Option<String>,
    pub credits: Option<u32>,
    /// Marks a course listed as one option among several. Informational only.
    pub is_option: bool,
}

/// A requirement satisfied by an approved-list course or a described activity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlexibleRequirement {
    pub code: Option<String>,
    pub text: Option<String>,
    pub credits: Option<u32>,
}

impl Course {
    /// Credits, falling back to [`DEFAULT_CREDITS`].
    pub fn effective_credits(&self) -> u32 {
        self.credits.unwrap_or(DEFAULT_CREDITS)
    }
}

impl FlexibleRequirement {
    /// Credits, falling back to [`DEFAULT_CREDITS`].
    pub fn effective_credits(&self) -> u32 {
        self.credits.unwrap_or(DEFAULT_CREDITS)
    }
}

/// The identifier under which a leaf is recorded in the completion set.
///
/// The completion set holds both course codes and the literal text of
/// text-only flexible requirements. This type is the one place that decides
/// which string identifies a leaf; both variants are looked up as plain
/// strings via [`CompletionKey::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKey<'a> {
    /// A course code, e.g. `CS 1331`.
    Course(&'a str),
    /// The description of a text-only flexible requirement.
    Text(&'a str),
}

impl<'a> CompletionKey<'a> {
    /// The string stored in the completion set.
    pub fn as_str(&self) -> &'a str {
        match *self {
            CompletionKey::Course(s) | CompletionKey::Text(s) => s,
        }
    }
}

impl RequirementNode {
    /// Create a node with no group id or footnotes.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            group_id: None,
            footnote_refs: Vec::new(),
            kind,
        }
    }

    /// A regular course with the given code and optional credits.
    pub fn course(code: impl Into<String>, credits: Option<u32>) -> Self {
        Self::new(NodeKind::Regular(Course {
            code: Some(code.into()),
            credits,
            ..Default::default()
        }))
    }

    /// A text-only flexible requirement.
    pub fn flexible_text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Flexible(FlexibleRequirement {
            text: Some(text.into()),
            ..Default::default()
        }))
    }

    /// An AND-group of the given children.
    pub fn all_of(children: Vec<RequirementNode>) -> Self {
        Self::new(NodeKind::AndGroup { children })
    }

    /// An OR-group of the given children.
    pub fn any_of(children: Vec<RequirementNode>) -> Self {
        Self::new(NodeKind::OrGroup { children })
    }

    /// A selection group requiring `count` of `options`.
    pub fn select(count: i64, options: Vec<RequirementNode>) -> Self {
        Self::new(NodeKind::Selection {
            selection_count: count,
            options,
        })
    }

    /// A reference to a shared group.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Reference { name: name.into() })
    }

    /// Attach a group id.
    pub fn with_group_id(mut self, id: impl Into<String>) -> Self {
        self.group_id = Some(id.into());
        self
    }

    /// The `courseType` tag for this node.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            NodeKind::Regular(_) => "regular",
            NodeKind::Flexible(_) => "flexible",
            NodeKind::AndGroup { .. } => "and_group",
            NodeKind::OrGroup { .. } => "or_group",
            NodeKind::Selection { .. } => "selection",
            NodeKind::Reference { .. } => "group_ref",
            NodeKind::Unknown { kind } => kind.as_str(),
        }
    }

    /// Direct children of a group node; empty for leaves and references.
    pub fn children(&self) -> &[RequirementNode] {
        match &self.kind {
            NodeKind::AndGroup { children } | NodeKind::OrGroup { children } => children,
            NodeKind::Selection { options, .. } => options,
            _ => &[],
        }
    }

    /// Whether this node is a course or flexible requirement.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Regular(_) | NodeKind::Flexible(_))
    }

    /// The completion-set identifier of a leaf.
    ///
    /// A code always wins over text. Returns `None` for groups and for
    /// leaves with nothing to identify them by.
    pub fn completion_key(&self) -> Option<CompletionKey<'_>> {
        match &self.kind {
            NodeKind::Regular(course) => course.code.as_deref().map(CompletionKey::Course),
            NodeKind::Flexible(flex) => match (&flex.code, &flex.text) {
                (Some(code), _) => Some(CompletionKey::Course(code)),
                (None, Some(text)) => Some(CompletionKey::Text(text)),
                (None, None) => None,
            },
            _ => None,
        }
    }

    /// Effective credits of a leaf; `None` for groups.
    pub fn leaf_credits(&self) -> Option<u32> {
        match &self.kind {
            NodeKind::Regular(course) => Some(course.effective_credits()),
            NodeKind::Flexible(flex) => Some(flex.effective_credits()),
            _ => None,
        }
    }

    /// Short human-readable label used in logs, diagnostics and the tree view.
    pub fn label(&self) -> String {
        match &self.kind {
            NodeKind::Regular(course) => match (&course.code, &course.title) {
                (Some(code), Some(title)) => format!("{} {}", code, title),
                (Some(code), None) => code.clone(),
                (None, Some(title)) => title.clone(),
                (None, None) => "course without code".to_string(),
            },
            NodeKind::Flexible(flex) => flex
                .code
                .clone()
                .or_else(|| flex.text.clone())
                .unwrap_or_else(|| "flexible requirement".to_string()),
            NodeKind::AndGroup { children } => self.group_label("all of", children.len()),
            NodeKind::OrGroup { children } => self.group_label("one of", children.len()),
            NodeKind::Selection {
                selection_count,
                options,
            } => self.group_label(&format!("{} of", selection_count), options.len()),
            NodeKind::Reference { name } => format!("group '{}'", name),
            NodeKind::Unknown { kind } => format!("unknown requirement type '{}'", kind),
        }
    }

    fn group_label(&self, prefix: &str, len: usize) -> String {
        match &self.group_id {
            Some(id) => format!("{} {} ({})", prefix, len, id),
            None => format!("{} {}", prefix, len),
        }
    }
}

/// Wire representation of a node, matching the stored JSON.
#[doc(hidden)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    course_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credits: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_option: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    courses: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selection_count: Option<i64>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    footnote_refs: Vec<u32>,
}

fn positive_credits(raw: Option<i64>) -> Option<u32> {
    raw.filter(|c| *c > 0).and_then(|c| u32::try_from(c).ok())
}

fn convert_all(raw: Option<Vec<RawNode>>) -> Vec<RequirementNode> {
    raw.unwrap_or_default()
        .into_iter()
        .map(RequirementNode::from)
        .collect()
}

impl From<RawNode> for RequirementNode {
    fn from(raw: RawNode) -> Self {
        // Legacy records omit courseType for plain courses.
        let course_type = raw.course_type.unwrap_or_else(|| "regular".to_string());
        let kind = match course_type.as_str() {
            "regular" => NodeKind::Regular(Course {
                code: raw.code,
                title: raw.title,
                credits: positive_credits(raw.credits),
                is_option: raw.is_option.unwrap_or(false),
            }),
            "flexible" => NodeKind::Flexible(FlexibleRequirement {
                code: raw.code,
                text: raw.text.or(raw.title),
                credits: positive_credits(raw.credits),
            }),
            "and_group" => NodeKind::AndGroup {
                children: convert_all(raw.courses.or(raw.options)),
            },
            "or_group" => NodeKind::OrGroup {
                children: convert_all(raw.courses.or(raw.options)),
            },
            "selection" => NodeKind::Selection {
                selection_count: raw.selection_count.unwrap_or(0),
                options: convert_all(raw.options.or(raw.courses)),
            },
            "group_ref" => match raw.reference {
                Some(name) => NodeKind::Reference { name },
                None => NodeKind::Unknown {
                    kind: "group_ref".to_string(),
                },
            },
            _ => NodeKind::Unknown { kind: course_type },
        };

        Self {
            group_id: raw.group_id,
            footnote_refs: raw.footnote_refs,
            kind,
        }
    }
}

impl From<RequirementNode> for RawNode {
    fn from(node: RequirementNode) -> Self {
        let mut raw = RawNode {
            course_type: Some(node.kind_name().to_string()),
            group_id: node.group_id,
            footnote_refs: node.footnote_refs,
            ..Default::default()
        };
        let collect = |nodes: Vec<RequirementNode>| -> Option<Vec<RawNode>> {
            Some(nodes.into_iter().map(RawNode::from).collect())
        };

        match node.kind {
            NodeKind::Regular(course) => {
                raw.code = course.code;
                raw.title = course.title;
                raw.credits = course.credits.map(i64::from);
                raw.is_option = course.is_option.then_some(true);
            }
            NodeKind::Flexible(flex) => {
                raw.code = flex.code;
                raw.text = flex.text;
                raw.credits = flex.credits.map(i64::from);
            }
            NodeKind::AndGroup { children } | NodeKind::OrGroup { children } => {
                raw.courses = collect(children);
            }
            NodeKind::Selection {
                selection_count,
                options,
            } => {
                raw.selection_count = Some(selection_count);
                raw.options = collect(options);
            }
            NodeKind::Reference { name } => raw.reference = Some(name),
            NodeKind::Unknown { .. } => {}
        }

        raw
    }
}

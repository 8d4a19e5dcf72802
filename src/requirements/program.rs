//! Degree and minor programs.
//!
//! A [`Program`] mirrors one `degree_programs` record: a name, the credit
//! total the registrar publishes, and an ordered list of requirement
//! categories. Programs are read once per planning session and never mutated.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::RequirementNode;

/// Whether a program is a major or a minor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramKind {
    #[default]
    Major,
    Minor,
}

impl fmt::Display for ProgramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramKind::Major => write!(f, "major"),
            ProgramKind::Minor => write!(f, "minor"),
        }
    }
}

/// A footnote attached to requirement nodes by number. Display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    pub number: u32,
    pub text: String,
}

/// A named block of requirements, e.g. "Core Courses".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequirementCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_credits: Option<u32>,
    /// Top-level nodes. Called `courses` in stored data even though it
    /// holds groups too.
    pub courses: Vec<RequirementNode>,
}

impl RequirementCategory {
    /// Create a category from its nodes.
    pub fn new(name: impl Into<String>, courses: Vec<RequirementNode>) -> Self {
        Self {
            name: name.into(),
            min_credits: None,
            courses,
        }
    }
}

/// A degree or minor program record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    pub name: String,

    pub kind: ProgramKind,

    /// Credit total from the program record. Not derived from the tree.
    #[serde(alias = "totalCredits")]
    pub total_credits: u32,

    pub requirements: Vec<RequirementCategory>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub footnotes: Vec<Footnote>,

    /// Named groups that category nodes can point at with `group_ref`.
    #[serde(alias = "sharedGroups", skip_serializing_if = "BTreeMap::is_empty")]
    pub shared_groups: BTreeMap<String, RequirementNode>,
}

impl Program {
    /// Create a major with the given categories.
    pub fn new(
        name: impl Into<String>,
        total_credits: u32,
        requirements: Vec<RequirementCategory>,
    ) -> Self {
        Self {
            name: name.into(),
            total_credits,
            requirements,
            ..Default::default()
        }
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&RequirementCategory> {
        self.requirements.iter().find(|c| c.name == name)
    }

    /// Look up a shared group by name.
    pub fn shared_group(&self, name: &str) -> Option<&RequirementNode> {
        self.shared_groups.get(name)
    }

    /// Look up a footnote by number.
    pub fn footnote(&self, number: u32) -> Option<&Footnote> {
        self.footnotes.iter().find(|f| f.number == number)
    }

    /// Visit every node in the program, depth first, with its path.
    ///
    /// Categories are visited in order, then shared groups by name.
    /// References are not followed, so this terminates on cyclic programs.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&NodePath, &'a RequirementNode)) {
        for (ci, category) in self.requirements.iter().enumerate() {
            let base = NodePath::category(ci);
            for (ni, node) in category.courses.iter().enumerate() {
                walk_node(&base.child("courses", ni), node, visit);
            }
        }
        for (name, node) in &self.shared_groups {
            walk_node(&NodePath::shared(name), node, visit);
        }
    }

    /// Credits of the first leaf with this code, if the program lists it.
    pub fn course_credits(&self, code: &str) -> Option<u32> {
        let mut found = None;
        self.walk(&mut |_, node| {
            if found.is_none() {
                if let Some(key) = node.completion_key() {
                    if key.as_str() == code {
                        found = node.leaf_credits();
                    }
                }
            }
        });
        found
    }

    /// Every distinct completion key in the program, sorted.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = std::collections::BTreeSet::new();
        self.walk(&mut |_, node| {
            if let Some(key) = node.completion_key() {
                keys.insert(key.as_str().to_string());
            }
        });
        keys.into_iter().collect()
    }
}

fn walk_node<'a>(
    path: &NodePath,
    node: &'a RequirementNode,
    visit: &mut dyn FnMut(&NodePath, &'a RequirementNode),
) {
    visit(path, node);
    let field = match node.kind {
        super::node::NodeKind::Selection { .. } => "options",
        _ => "courses",
    };
    for (i, child) in node.children().iter().enumerate() {
        walk_node(&path.child(field, i), child, visit);
    }
}

/// Location of a node inside a program, e.g. `requirements[0].courses[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(String);

impl NodePath {
    /// Path of a category.
    pub fn category(index: usize) -> Self {
        Self(format!("requirements[{}]", index))
    }

    /// Path of a shared group.
    pub fn shared(name: &str) -> Self {
        Self(format!("shared_groups.{}", name))
    }

    /// Path of a child under this one.
    pub fn child(&self, field: &str, index: usize) -> Self {
        Self(format!("{}.{}[{}]", self.0, field, index))
    }

    /// The path as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM_JSON: &str = r#"{
        "name": "Computer Science",
        "kind": "major",
        "total_credits": 122,
        "requirements": [
            {
                "name": "Core",
                "minCredits": 7,
                "courses": [
                    {"courseType": "regular", "code": "CS 1331", "credits": 4},
                    {"courseType": "selection", "selectionCount": 1, "options": [
                        {"courseType": "regular", "code": "CS 2110"},
                        {"courseType": "group_ref", "ref": "labs"}
                    ]}
                ]
            }
        ],
        "footnotes": [{"number": 1, "text": "Grade of C or better"}],
        "shared_groups": {
            "labs": {"courseType": "and_group", "courses": [
                {"courseType": "regular", "code": "PHYS 2211", "credits": 4}
            ]}
        }
    }"#;

    fn program() -> Program {
        serde_json::from_str(PROGRAM_JSON).unwrap()
    }

    #[test]
    fn parses_program_record() {
        let program = program();
        assert_eq!(program.name, "Computer Science");
        assert_eq!(program.kind, ProgramKind::Major);
        assert_eq!(program.total_credits, 122);
        assert_eq!(program.requirements[0].min_credits, Some(7));
        assert_eq!(program.footnote(1).unwrap().text, "Grade of C or better");
        assert!(program.shared_group("labs").is_some());
    }

    #[test]
    fn accepts_camel_case_totals() {
        let program: Program =
            serde_json::from_str(r#"{"name":"Math","kind":"minor","totalCredits":18}"#).unwrap();
        assert_eq!(program.kind, ProgramKind::Minor);
        assert_eq!(program.total_credits, 18);
        assert!(program.requirements.is_empty());
    }

    #[test]
    fn walk_visits_every_node_with_paths() {
        let program = program();
        let mut paths = Vec::new();
        program.walk(&mut |path, _| paths.push(path.to_string()));
        assert_eq!(
            paths,
            vec![
                "requirements[0].courses[0]",
                "requirements[0].courses[1]",
                "requirements[0].courses[1].options[0]",
                "requirements[0].courses[1].options[1]",
                "shared_groups.labs",
                "shared_groups.labs.courses[0]",
            ]
        );
    }

    #[test]
    fn course_credits_searches_shared_groups() {
        let program = program();
        assert_eq!(program.course_credits("CS 1331"), Some(4));
        assert_eq!(program.course_credits("CS 2110"), Some(3));
        assert_eq!(program.course_credits("PHYS 2211"), Some(4));
        assert_eq!(program.course_credits("ART 1000"), None);
    }

    #[test]
    fn leaf_keys_are_sorted_and_distinct() {
        let program = program();
        assert_eq!(program.leaf_keys(), vec!["CS 1331", "CS 2110", "PHYS 2211"]);
    }

    #[test]
    fn category_lookup_by_name() {
        let program = program();
        assert!(program.category("Core").is_some());
        assert!(program.category("Electives").is_none());
    }
}

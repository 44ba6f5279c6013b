use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// The input document: an ordered sequence of entity groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub groups: Vec<Vec<RawEntity>>,
}

impl Document {
    /// Parses a document from JSON. A flat array of entity objects is read
    /// as a single group.
    ///
    /// The shape is decided first, then the typed parse runs against the
    /// source so errors point at the offending key.
    pub fn from_json(src: &str) -> Result<Document> {
        let value: serde_json::Value = serde_json::from_str(src)?;

        let groups = match value.as_array() {
            Some(items) if items.iter().any(serde_json::Value::is_object) => {
                vec![serde_json::from_str::<Vec<RawEntity>>(src)?]
            }
            Some(_) => serde_json::from_str::<Vec<Vec<RawEntity>>>(src)?,
            None => {
                return Err(Error::invalid_input(
                    "expected an array of entity groups (arrays of entity objects)",
                ))
            }
        };

        Ok(Document { groups })
    }

    /// Reads and parses a JSON document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::file_not_found(path));
        }

        let contents = std::fs::read_to_string(path)?;
        Document::from_json(&contents)
    }

    /// A document holding one entity.
    pub fn single(entity: RawEntity) -> Document {
        Document {
            groups: vec![vec![entity]],
        }
    }
}

/// An entity node exactly as it appears in the input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    pub name: Option<String>,

    #[serde(alias = "controller_namespace")]
    pub controller_namespace: Option<String>,

    #[serde(alias = "model_namespace")]
    pub model_namespace: Option<String>,

    pub model_name: Option<String>,

    pub view_path: Option<String>,

    pub route_path: Option<String>,

    pub route_group: Option<String>,

    pub per_page: Option<PerPage>,

    /// `field#rules;field#rules`
    pub validations: Option<String>,

    /// Pre-declared relationships, `name#kind#target|localKey|foreignKey,...`
    pub relationships: Option<String>,

    #[serde(alias = "pk")]
    pub primary_key: Option<String>,

    /// Comma separated indexed columns
    pub indices: Option<String>,

    /// Pre-declared constraints, `column#refColumn#refTable#onUpdate#onDelete,...`
    pub foreign_keys: Option<String>,

    pub route: Option<Flag>,

    /// Label views through `trans()` instead of literal text
    pub localize: Option<Flag>,

    /// Allow-list of generation job kinds
    pub to_process: Option<Vec<String>>,

    /// Fields in the `name#type[#modifier];...` mini-language
    pub fields: Option<String>,

    #[serde(default)]
    pub data: RawData,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawData {
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// A field object of the structured JSON form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub ty: Option<String>,

    #[serde(default)]
    pub options: Vec<String>,

    pub modifier: Option<String>,

    pub validations: Option<String>,

    #[serde(alias = "showform", alias = "showForm")]
    pub show_in_form: Option<Flag>,

    #[serde(alias = "showinindex")]
    pub show_in_index: Option<Flag>,

    /// Child entity of a one-to-many field
    #[serde(alias = "child")]
    pub entity: Option<Box<RawEntity>>,
}

/// A yes/no switch, written either as a JSON boolean or as `"yes"` / `"no"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    pub fn is_yes(&self) -> bool {
        match self {
            Flag::Bool(value) => *value,
            Flag::Text(text) => !matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "no" | "false" | "0" | "off"
            ),
        }
    }
}

/// Page size, written either as a number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PerPage {
    Number(u32),
    Text(String),
}

impl PerPage {
    pub fn value(&self) -> Option<u32> {
        match self {
            PerPage::Number(n) => Some(*n),
            PerPage::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_and_flat_documents() {
        let doc = Document::from_json(r#"[[{"name": "Post"}], [{"name": "Tag"}]]"#).unwrap();
        assert_eq!(doc.groups.len(), 2);

        let doc = Document::from_json(r#"[{"name": "Post"}, {"name": "Tag"}]"#).unwrap();
        assert_eq!(doc.groups.len(), 1);
        assert_eq!(doc.groups[0].len(), 2);
    }

    #[test]
    fn wrong_shape_is_invalid_input() {
        let err = Document::from_json(r#"{"name": "Post"}"#).unwrap_err();
        assert!(err.is_invalid_input());

        let err = Document::from_json("[[").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn mistyped_key_is_reported_with_its_position() {
        let err = Document::from_json(r#"[[{"name": "Post", "perPage": {}}]]"#).unwrap_err();
        assert!(err.is_invalid_input());
        let message = err.to_string();
        assert!(message.contains("PerPage"), "{message}");
        assert!(message.contains("line 1"), "{message}");

        let err = Document::from_json(r#"[{"name": 5}]"#).unwrap_err();
        assert!(err.to_string().contains("expected a string"));
    }

    #[test]
    fn key_aliases() {
        let doc = Document::from_json(
            r#"[[{
                "name": "Post",
                "controller_namespace": "Admin",
                "perPage": "15",
                "route": "no",
                "data": {"fields": [{"name": "body", "type": "text", "showform": "no"}]}
            }]]"#,
        )
        .unwrap();

        let post = &doc.groups[0][0];
        assert_eq!(post.controller_namespace.as_deref(), Some("Admin"));
        assert_eq!(post.per_page.as_ref().and_then(PerPage::value), Some(15));
        assert!(!post.route.as_ref().unwrap().is_yes());
        assert!(!post.data.fields[0].show_in_form.as_ref().unwrap().is_yes());
    }

    #[test]
    fn missing_file() {
        let err = Document::load("/nonexistent/scaffold.json").unwrap_err();
        assert!(err.is_file_not_found());
    }
}

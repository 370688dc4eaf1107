//! Typed collection descriptors, serialized in the shape `POST /api/collections` expects

use serde::Serialize;

use crate::collections::CollectionId;

/// Collection type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    Auth,
    Base,
}

/// Access rule. `None` serializes as `null`: nobody but admins.
/// `Some("")` lets everyone through.
pub type Rule = Option<String>;

/// Build a rule from a filter expression
pub fn rule(expr: &str) -> Rule {
    Some(expr.to_string())
}

/// A complete collection definition
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSchema {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: CollectionType,

    pub schema: Vec<SchemaField>,

    pub list_rule: Rule,
    pub view_rule: Rule,
    pub create_rule: Rule,
    pub update_rule: Rule,
    pub delete_rule: Rule,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<AuthOptions>,
}

impl CollectionSchema {
    /// Field by name
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.schema.iter().find(|f| f.name == name)
    }

    /// Collections referenced by relation fields, in field order
    pub fn relation_targets(&self) -> Vec<&CollectionId> {
        self.schema
            .iter()
            .filter_map(|f| match &f.kind {
                FieldKind::Relation(opts) => Some(&opts.collection_id),
                _ => None,
            })
            .collect()
    }
}

/// Options of an `auth` collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOptions {
    pub allow_email_auth: bool,
    #[serde(rename = "allowOAuth2Auth")]
    pub allow_oauth2_auth: bool,
    pub allow_username_auth: bool,
    pub min_password_length: u32,
    pub require_email: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            allow_email_auth: true,
            allow_oauth2_auth: false,
            allow_username_auth: true,
            min_password_length: 8,
            require_email: true,
        }
    }
}

/// One field of a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaField {
    pub name: String,
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Field type and its options. Date and bool fields carry no `options` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum FieldKind {
    Date,
    Text(TextOptions),
    Select(SelectOptions),
    File(FileOptions),
    Bool,
    Relation(RelationOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl TextOptions {
    pub fn max(max: u32) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn between(min: u32, max: u32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptions {
    pub max_select: u32,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOptions {
    pub max_select: u32,
    pub max_size: u64,
    pub mime_types: Vec<String>,
    pub thumbs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationOptions {
    pub collection_id: CollectionId,
    pub cascade_delete: bool,
    pub max_select: u32,
}

impl SchemaField {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            kind,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn date(name: &str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn bool(name: &str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    pub fn text(name: &str, options: TextOptions) -> Self {
        Self::new(name, FieldKind::Text(options))
    }

    /// Single-choice select over `values`
    pub fn select_one(name: &str, values: &[&str]) -> Self {
        Self::new(
            name,
            FieldKind::Select(SelectOptions {
                max_select: 1,
                values: values.iter().map(|v| v.to_string()).collect(),
            }),
        )
    }

    pub fn file(name: &str, options: FileOptions) -> Self {
        Self::new(name, FieldKind::File(options))
    }

    /// Single relation to the collection `target`
    pub fn relation(name: &str, target: &CollectionId, cascade_delete: bool) -> Self {
        Self::new(
            name,
            FieldKind::Relation(RelationOptions {
                collection_id: target.clone(),
                cascade_delete,
                max_select: 1,
            }),
        )
    }
}

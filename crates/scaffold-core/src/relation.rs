use crate::{Error, Result};
use std::fmt;

/// A model relationship method.
///
/// At the file-generation boundary it is written as
/// `name#kind#target|localKey|foreignKey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Method name on the model (`comments`, `post`)
    pub name: String,

    pub kind: RelationKind,

    /// Fully qualified class of the related model
    pub target: String,

    pub local_key: Option<String>,

    pub foreign_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    BelongsTo,
    HasMany,
}

impl Relationship {
    pub fn belongs_to(
        name: impl Into<String>,
        target: impl Into<String>,
        local_key: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Relationship {
        Relationship {
            name: name.into(),
            kind: RelationKind::BelongsTo,
            target: target.into(),
            local_key: Some(local_key.into()),
            foreign_key: Some(foreign_key.into()),
        }
    }

    pub fn has_many(
        name: impl Into<String>,
        target: impl Into<String>,
        local_key: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Relationship {
        Relationship {
            name: name.into(),
            kind: RelationKind::HasMany,
            target: target.into(),
            local_key: Some(local_key.into()),
            foreign_key: Some(foreign_key.into()),
        }
    }

    /// Parses one `name#kind#target[|localKey[|foreignKey]]` descriptor.
    pub fn parse(token: &str) -> Result<Relationship> {
        let token = token.trim();
        let segments: Vec<_> = token.split('#').map(str::trim).collect();

        let &[name, kind, target] = segments.as_slice() else {
            return Err(Error::malformed_relation_spec(
                token,
                "expected `name#kind#target|localKey|foreignKey`",
            ));
        };

        if name.is_empty() {
            return Err(Error::malformed_relation_spec(token, "missing name"));
        }

        let kind = RelationKind::parse(kind).ok_or_else(|| {
            Error::malformed_relation_spec(
                token,
                format!("unsupported relationship kind `{kind}`"),
            )
        })?;

        let mut keys = target.split('|').map(str::trim);
        let target = keys.next().unwrap_or_default();
        if target.is_empty() {
            return Err(Error::malformed_relation_spec(token, "missing target class"));
        }

        let mut next_key = || keys.next().filter(|k| !k.is_empty()).map(String::from);
        let local_key = next_key();
        let foreign_key = next_key();

        Ok(Relationship {
            name: name.to_string(),
            kind,
            target: target.to_string(),
            local_key,
            foreign_key,
        })
    }

    /// Parses a `,` separated list of descriptors.
    pub fn parse_list(src: &str) -> Result<Vec<Relationship>> {
        split_list(src).map(Relationship::parse).collect()
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}#{}", self.name, self.kind, self.target)?;

        match (&self.local_key, &self.foreign_key) {
            (Some(local), Some(foreign)) => write!(f, "|{local}|{foreign}"),
            (Some(local), None) => write!(f, "|{local}"),
            (None, Some(foreign)) => write!(f, "||{foreign}"),
            (None, None) => Ok(()),
        }
    }
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::HasMany => "hasMany",
        }
    }

    fn parse(src: &str) -> Option<RelationKind> {
        match src.to_ascii_lowercase().replace('_', "").as_str() {
            "belongsto" => Some(RelationKind::BelongsTo),
            "hasmany" => Some(RelationKind::HasMany),
            _ => None,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A foreign key constraint on a table column.
///
/// At the file-generation boundary it is written as
/// `column#refColumn#refTable#onUpdate#onDelete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Constrained column on the owning table
    pub column: String,

    /// Referenced column
    pub references: String,

    /// Referenced table
    pub on: String,

    pub on_update: Option<ReferentialAction>,

    pub on_delete: Option<ReferentialAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferentialAction {
    Cascade,
    Restrict,
    SetNull,
    NoAction,
}

impl ForeignKey {
    /// A constraint that cascades both updates and deletes.
    pub fn cascade(
        column: impl Into<String>,
        references: impl Into<String>,
        on: impl Into<String>,
    ) -> ForeignKey {
        ForeignKey {
            column: column.into(),
            references: references.into(),
            on: on.into(),
            on_update: Some(ReferentialAction::Cascade),
            on_delete: Some(ReferentialAction::Cascade),
        }
    }

    pub fn parse(token: &str) -> Result<ForeignKey> {
        let token = token.trim();
        let segments: Vec<_> = token.split('#').map(str::trim).collect();

        if !(3..=5).contains(&segments.len()) || segments[..3].iter().any(|s| s.is_empty()) {
            return Err(Error::malformed_relation_spec(
                token,
                "expected `column#refColumn#refTable[#onUpdate[#onDelete]]`",
            ));
        }

        let action = |index: usize| -> Result<Option<ReferentialAction>> {
            match segments.get(index).copied() {
                None | Some("") => Ok(None),
                Some(src) => ReferentialAction::parse(src).map(Some).ok_or_else(|| {
                    Error::malformed_relation_spec(
                        token,
                        format!("unknown referential action `{src}`"),
                    )
                }),
            }
        };

        Ok(ForeignKey {
            column: segments[0].to_string(),
            references: segments[1].to_string(),
            on: segments[2].to_string(),
            on_update: action(3)?,
            on_delete: action(4)?,
        })
    }

    pub fn parse_list(src: &str) -> Result<Vec<ForeignKey>> {
        split_list(src).map(ForeignKey::parse).collect()
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}#{}", self.column, self.references, self.on)?;

        if self.on_update.is_some() || self.on_delete.is_some() {
            write!(f, "#{}", self.on_update.map_or("", ReferentialAction::as_str))?;
        }
        if let Some(on_delete) = self.on_delete {
            write!(f, "#{on_delete}")?;
        }
        Ok(())
    }
}

impl ReferentialAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "cascade",
            ReferentialAction::Restrict => "restrict",
            ReferentialAction::SetNull => "set null",
            ReferentialAction::NoAction => "no action",
        }
    }

    fn parse(src: &str) -> Option<ReferentialAction> {
        match src.to_ascii_lowercase().replace(['_', ' '], "").as_str() {
            "cascade" => Some(ReferentialAction::Cascade),
            "restrict" => Some(ReferentialAction::Restrict),
            "setnull" => Some(ReferentialAction::SetNull),
            "noaction" => Some(ReferentialAction::NoAction),
            _ => None,
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders descriptors as a `,` separated list.
pub fn to_spec_string<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn split_list(src: &str) -> impl Iterator<Item = &str> {
    src.split(',').map(str::trim).filter(|token| !token.is_empty())
}

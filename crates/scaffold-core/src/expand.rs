use crate::diagnostic::Diagnostics;
use crate::entity::{push_unique, Document, Entity, ParentRef, RawEntity};
use crate::relation::Relationship;
use crate::{Error, Name, Result};
use std::collections::HashSet;
use tracing::{debug, info};

pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Root namespace model namespaces are resolved under
    pub app_namespace: String,

    /// Deepest allowed nesting of one-to-many children
    pub max_depth: usize,

    /// Record a warning for every expected attribute an entity node lacks
    pub presence_checks: bool,

    /// Translated view labels for entities that do not say otherwise
    pub localize: bool,
}

/// The normalized entity trees of a document, plus everything that went
/// wrong while building them.
#[derive(Debug, Default)]
pub struct Expansion {
    pub roots: Vec<Entity>,
    pub diagnostics: Diagnostics,
}

impl Default for ExpandOptions {
    fn default() -> ExpandOptions {
        ExpandOptions {
            app_namespace: "App".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            presence_checks: true,
            localize: false,
        }
    }
}

impl Expansion {
    /// Every entity, parents before children, in the order the input
    /// declares them.
    pub fn walk(&self) -> Vec<&Entity> {
        fn visit<'a>(entity: &'a Entity, out: &mut Vec<&'a Entity>) {
            out.push(entity);
            for child in &entity.children {
                visit(child, out);
            }
        }

        let mut out = vec![];
        for root in &self.roots {
            visit(root, &mut out);
        }
        out
    }

    /// Looks up an entity by declared name anywhere in the trees.
    pub fn find(&self, name: &str) -> Option<&Entity> {
        self.walk().into_iter().find(|entity| entity.name == name)
    }
}

/// Expands every root entity of the document.
///
/// A hard error drops the root entity it occurred under, together with its
/// whole subtree, and is recorded in the returned diagnostics. Sibling roots
/// are still expanded.
///
/// A model class may only be declared once per document. A later
/// declaration is a hard error for the root it appears under.
pub fn expand(document: &Document, options: &ExpandOptions) -> Expansion {
    let mut expansion = Expansion::default();
    let mut declared = HashSet::new();

    for (index, group) in document.groups.iter().enumerate() {
        for raw in group {
            let mut walker = Walker {
                options,
                diagnostics: &mut expansion.diagnostics,
                declared: &declared,
                ancestors: vec![],
                claimed: vec![],
            };

            let result = walker.expand_node(raw, None, None);
            let claimed = walker.claimed;

            match result {
                Ok(entity) => {
                    declared.extend(claimed);
                    expansion.roots.push(entity);
                }
                Err(err) => {
                    let subject = label(raw);
                    let err = err.context(crate::err!("entity group {index}"));
                    expansion.diagnostics.error(subject, err);
                }
            }
        }
    }

    info!(
        roots = expansion.roots.len(),
        diagnostics = expansion.diagnostics.len(),
        "expanded document"
    );
    expansion
}

struct Walker<'a> {
    options: &'a ExpandOptions,
    diagnostics: &'a mut Diagnostics,

    /// Model classes of the roots expanded so far
    declared: &'a HashSet<String>,

    /// Model classes from the root down to the node being expanded
    ancestors: Vec<String>,

    /// Model classes of the current root tree
    claimed: Vec<String>,
}

impl Walker<'_> {
    fn expand_node(
        &mut self,
        raw: &RawEntity,
        parent: Option<&ParentRef>,
        parent_path: Option<&str>,
    ) -> Result<Entity> {
        let path = match parent_path {
            Some(parent_path) => format!("{parent_path} > {}", label(raw)),
            None => label(raw).to_string(),
        };

        if self.ancestors.len() >= self.options.max_depth {
            let chain = self.ancestors.iter().cloned().chain([label(raw).to_string()]);
            return Err(Error::cyclic_entity_graph(chain).context(crate::err!(
                "nesting exceeds the maximum depth of {}",
                self.options.max_depth
            )));
        }

        let mut entity = Entity::normalize(raw, self.options, &path, self.diagnostics)?;

        if self.ancestors.contains(&entity.model_class) {
            let chain = self.ancestors.iter().cloned().chain([entity.model_class]);
            return Err(Error::cyclic_entity_graph(chain));
        }

        let model_class = &entity.model_class;
        if self.declared.contains(model_class) || self.claimed.contains(model_class) {
            return Err(Error::duplicate_entity(entity.model_class));
        }
        self.claimed.push(entity.model_class.clone());

        if let Some(parent) = parent {
            entity.attach_parent(parent.clone());
        }

        self.ancestors.push(entity.model_class.clone());
        let result = self.expand_children(&mut entity, &path);
        self.ancestors.pop();
        result?;

        debug!(%path, children = entity.children.len(), "expanded entity");
        Ok(entity)
    }

    /// Recurses into the inline entity of every one-to-many field, in
    /// declaration order.
    fn expand_children(&mut self, entity: &mut Entity, path: &str) -> Result<()> {
        let as_parent = entity.as_parent();

        for index in 0..entity.fields.len() {
            let field = &entity.fields[index];
            let Some(child) = field.child.clone() else {
                continue;
            };
            let field_name = field.name.clone();

            let child = self
                .expand_node(&child, Some(&as_parent), Some(path))
                .map_err(|err| {
                    err.context(crate::err!(
                        "one-to-many field `{field_name}` of `{}`",
                        entity.name
                    ))
                })?;

            let has_many = Relationship::has_many(
                Name::new(&child.name).plural().snake_case(),
                &child.model_class,
                &as_parent.foreign_key,
                &as_parent.primary_key,
            );
            push_unique(&mut entity.relationships, has_many);
            entity.children.push(child);
        }

        Ok(())
    }
}

fn label(raw: &RawEntity) -> &str {
    raw.name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("<unnamed>")
}

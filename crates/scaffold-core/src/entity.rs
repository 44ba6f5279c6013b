mod normalize;

mod raw;
pub use raw::{Document, Flag, PerPage, RawData, RawEntity, RawField};

use crate::field::{self, FieldSpec};
use crate::job::JobKind;
use crate::relation::{self, ForeignKey, Relationship};
use crate::Name;
use std::fmt;

pub const DEFAULT_PRIMARY_KEY: &str = "id";

pub const DEFAULT_PER_PAGE: u32 = 25;

/// A normalized entity: one CRUD resource with every derived name computed,
/// plus the child entities reached through its one-to-many fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Name as declared in the input (`Posts`, `BlogPost`)
    pub name: String,

    /// Lower-cased name used in views and labels (`posts`)
    pub crud_name: String,

    /// Model class name without namespace (`Post`)
    pub model_name: String,

    /// Namespace of the model (`App`, `App\Models`)
    pub model_namespace: String,

    /// Fully qualified model class (`App\Models\Post`)
    pub model_class: String,

    /// Controller namespace relative to the controllers root (`Admin`)
    pub controller_namespace: String,

    /// Controller class relative to the controllers root
    /// (`Admin\PostsController`)
    pub controller_class: String,

    pub table_name: String,

    pub migration_name: String,

    pub primary_key: String,

    /// Dotted view path prefix (`admin`), if any
    pub view_path: Option<String>,

    /// Folder holding the entity's views (`blog-posts`)
    pub view_folder: String,

    pub route_path: String,

    pub per_page: u32,

    pub validations: Vec<ValidationRule>,

    /// Indexed columns
    pub indices: Vec<String>,

    /// Whether a route line is registered for the entity
    pub route: bool,

    /// View labels are `trans('<crud_name>.<field>')` lookups
    pub localize: bool,

    /// Jobs the entity takes part in
    pub to_process: Vec<JobKind>,

    pub fields: Vec<FieldSpec>,

    pub relationships: Vec<Relationship>,

    pub foreign_keys: Vec<ForeignKey>,

    pub parent: Option<ParentRef>,

    pub children: Vec<Entity>,
}

/// What a child entity needs to know about its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub name: String,
    pub model_class: String,
    pub table_name: String,
    pub primary_key: String,

    /// Column on the child pointing at the parent (`post_id`)
    pub foreign_key: String,
}

/// Validation rules for one field, `field#rules` at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRule {
    pub field: String,
    pub rules: String,
}

impl Entity {
    pub fn crud_name_singular(&self) -> String {
        pluralizer::pluralize(&self.crud_name, 1, false)
    }

    /// `admin.blog-posts`, the dotted view directory used by `@include` and
    /// `view()` calls.
    pub fn view_template_dir(&self) -> String {
        match &self.view_path {
            Some(view_path) => format!("{view_path}.{}", self.view_folder),
            None => self.view_folder.clone(),
        }
    }

    pub fn processes(&self, kind: JobKind) -> bool {
        self.to_process.contains(&kind)
    }

    /// The reference a child entity of this one is linked with.
    pub fn as_parent(&self) -> ParentRef {
        let singular = Name::new(&self.name).singular().snake_case();
        ParentRef {
            name: self.name.clone(),
            model_class: self.model_class.clone(),
            table_name: self.table_name.clone(),
            primary_key: self.primary_key.clone(),
            foreign_key: format!("{singular}_id"),
        }
    }

    pub fn fillable(&self) -> Vec<String> {
        field::fillable(&self.fields)
    }

    pub fn fields_spec(&self) -> String {
        field::to_spec_string(&self.fields)
    }

    pub fn relationships_spec(&self) -> String {
        relation::to_spec_string(&self.relationships)
    }

    pub fn foreign_keys_spec(&self) -> String {
        relation::to_spec_string(&self.foreign_keys)
    }

    pub fn validations_spec(&self) -> String {
        self.validations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Links this entity to its parent: the foreign key column goes first,
    /// followed by a `belongsTo` relationship and a cascading constraint.
    pub(crate) fn attach_parent(&mut self, parent: ParentRef) {
        if !self.fields.iter().any(|f| f.name == parent.foreign_key) {
            let mut fk = FieldSpec::new(&parent.foreign_key, field::FieldType::Integer);
            fk.modifier = Some("unsigned".to_string());
            fk.show_in_form = false;
            fk.show_in_index = false;
            self.fields.insert(0, fk);
        }

        let belongs_to = Relationship::belongs_to(
            Name::new(&parent.name).singular().snake_case(),
            &parent.model_class,
            &parent.foreign_key,
            &parent.primary_key,
        );
        push_unique(&mut self.relationships, belongs_to);

        let constraint = ForeignKey::cascade(
            &parent.foreign_key,
            &parent.primary_key,
            &parent.table_name,
        );
        push_unique(&mut self.foreign_keys, constraint);

        self.parent = Some(parent);
    }
}

impl ValidationRule {
    pub fn new(field: impl Into<String>, rules: impl Into<String>) -> ValidationRule {
        ValidationRule {
            field: field.into(),
            rules: rules.into(),
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.field, self.rules)
    }
}

pub(crate) fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

use super::{Entity, Flag, RawEntity, ValidationRule, DEFAULT_PER_PAGE, DEFAULT_PRIMARY_KEY};
use crate::diagnostic::Diagnostics;
use crate::expand::ExpandOptions;
use crate::field::FieldSpec;
use crate::job::JobKind;
use crate::name::{qualify, Name};
use crate::relation::{ForeignKey, Relationship};
use crate::{Error, Result};
use tracing::trace;

impl Entity {
    /// Normalizes one raw entity node.
    ///
    /// Missing attributes other than `name` are recorded as warnings under
    /// `subject` and replaced by their defaults. Malformed field,
    /// relationship, or foreign key descriptors are returned as errors.
    pub(crate) fn normalize(
        raw: &RawEntity,
        options: &ExpandOptions,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<Entity> {
        let name = raw.name.as_deref().map(str::trim).unwrap_or_default();
        let declared = Name::new(name);
        if declared.is_empty() {
            return Err(Error::missing_required_attribute(subject, "name"));
        }

        if options.presence_checks {
            for (attribute, present) in presence(raw) {
                if !present {
                    diagnostics.warn(subject, Error::missing_required_attribute(name, attribute));
                }
            }
        }

        let model_name = match non_empty(&raw.model_name) {
            Some(model_name) => model_name.to_string(),
            None => declared.singular().upper_camel_case(),
        };
        let model_namespace = qualify([
            options.app_namespace.as_str(),
            non_empty(&raw.model_namespace).unwrap_or_default(),
        ]);
        let model_class = qualify([model_namespace.as_str(), model_name.as_str()]);

        let controller_namespace = qualify([non_empty(&raw.controller_namespace).unwrap_or_default()]);
        let controller_name = format!("{}Controller", declared.upper_camel_case());
        let controller_class = qualify([controller_namespace.as_str(), controller_name.as_str()]);

        let table_name = declared.plural().snake_case();
        let view_folder = declared.kebab_case();

        let route_path = match non_empty(&raw.route_path).map(|path| path.trim_matches('/')) {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => match non_empty(&raw.route_group).map(|group| group.trim_matches('/')) {
                Some(group) if !group.is_empty() => format!("{group}/{view_folder}"),
                _ => view_folder.clone(),
            },
        };

        let per_page = match &raw.per_page {
            None => DEFAULT_PER_PAGE,
            Some(per_page) => match per_page.value() {
                Some(n) if n > 0 => n,
                _ => {
                    diagnostics.warn(
                        subject,
                        Error::invalid_input(format!(
                            "`perPage` of `{name}` is not a positive number; using {DEFAULT_PER_PAGE}"
                        )),
                    );
                    DEFAULT_PER_PAGE
                }
            },
        };

        let mut fields = match non_empty(&raw.fields) {
            Some(src) => FieldSpec::parse_list(src)?,
            None => vec![],
        };
        if let Some(field) = fields.iter().find(|field| field.ty.is_one_to_many()) {
            return Err(Error::malformed_field_spec(
                field.to_string(),
                "one-to-many fields must be declared in `data.fields` with an inline `entity`",
            ));
        }
        for raw_field in &raw.data.fields {
            fields.push(FieldSpec::from_raw(raw_field)?);
        }

        let mut validations = match non_empty(&raw.validations) {
            Some(src) => parse_validations(src, subject, diagnostics),
            None => vec![],
        };

        // Entity-level rules fill in fields without rules of their own; field
        // rules are appended after the entity-level ones.
        for field in &mut fields {
            if let Some(rules) = field.validations.clone() {
                if !validations.iter().any(|rule| rule.field == field.name) {
                    validations.push(ValidationRule::new(&field.name, rules));
                }
            } else if let Some(rule) = validations.iter().find(|rule| rule.field == field.name) {
                field.set_validations(&rule.rules);
            }
        }

        let relationships = match non_empty(&raw.relationships) {
            Some(src) => Relationship::parse_list(src)?,
            None => vec![],
        };

        let foreign_keys = match non_empty(&raw.foreign_keys) {
            Some(src) => ForeignKey::parse_list(src)?,
            None => vec![],
        };

        let indices = non_empty(&raw.indices)
            .map(|src| {
                src.split(',')
                    .map(str::trim)
                    .filter(|column| !column.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let to_process = match &raw.to_process {
            None => JobKind::ALL.to_vec(),
            Some(kinds) => {
                let mut selected = vec![];
                for src in kinds {
                    match JobKind::parse(src) {
                        Some(kind) => selected.push(kind),
                        None => diagnostics.warn(
                            subject,
                            Error::invalid_input(format!("unknown job kind `{src}` in `toProcess`")),
                        ),
                    }
                }
                JobKind::ALL
                    .into_iter()
                    .filter(|kind| selected.contains(kind))
                    .collect()
            }
        };

        trace!(%subject, %model_class, %table_name, "normalized entity");

        Ok(Entity {
            name: name.to_string(),
            crud_name: declared.lower(),
            model_name,
            model_namespace,
            model_class,
            controller_namespace,
            controller_class,
            migration_name: table_name.clone(),
            table_name,
            primary_key: non_empty(&raw.primary_key)
                .unwrap_or(DEFAULT_PRIMARY_KEY)
                .to_string(),
            view_path: non_empty(&raw.view_path)
                .map(|path| path.trim_matches('.'))
                .filter(|path| !path.is_empty())
                .map(String::from),
            view_folder,
            route_path,
            per_page,
            validations,
            indices,
            route: raw.route.as_ref().map_or(true, |flag| flag.is_yes()),
            localize: raw.localize.as_ref().map_or(options.localize, Flag::is_yes),
            to_process,
            fields,
            relationships,
            foreign_keys,
            parent: None,
            children: vec![],
        })
    }
}

/// Attributes every entity node is expected to carry, paired with whether the
/// node has them. `name` is checked separately.
fn presence(raw: &RawEntity) -> [(&'static str, bool); 11] {
    [
        ("route", raw.route.is_some()),
        ("viewPath", raw.view_path.is_some()),
        ("routePath", raw.route_path.is_some()),
        ("perPage", raw.per_page.is_some()),
        ("controllerNamespace", raw.controller_namespace.is_some()),
        ("modelNamespace", raw.model_namespace.is_some()),
        ("validations", raw.validations.is_some()),
        ("relationships", raw.relationships.is_some()),
        ("primaryKey", raw.primary_key.is_some()),
        ("indices", raw.indices.is_some()),
        ("foreignKeys", raw.foreign_keys.is_some()),
    ]
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_validations(
    src: &str,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<ValidationRule> {
    let mut rules = vec![];

    for token in src.split(';').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once('#') {
            Some((field, rule)) if !field.trim().is_empty() && !rule.trim().is_empty() => {
                rules.push(ValidationRule::new(field.trim(), rule.trim()));
            }
            _ => diagnostics.warn(
                subject,
                Error::malformed_field_spec(token, "expected `field#rules`"),
            ),
        }
    }

    rules
}

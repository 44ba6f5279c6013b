use crate::template::{Placeholders, Stub};
use crate::{class_path, php_array, Artifact, Context};
use scaffold_core::{Entity, Relationship, Result};
use std::path::PathBuf;

/// Output path of the entity's model. Model classes live below the models
/// directory by their namespace relative to the application namespace.
pub fn path(cx: &Context<'_>, entity: &Entity) -> PathBuf {
    let app_prefix = format!("{}\\", cx.options.app_namespace);
    let relative = entity
        .model_class
        .strip_prefix(&app_prefix)
        .unwrap_or(&entity.model_class);
    class_path(&cx.options.paths.models, relative)
}

pub fn generate(cx: &Context<'_>, entity: &Entity) -> Result<Artifact> {
    let mut relationships = String::new();
    for relationship in &entity.relationships {
        let method = cx
            .templates
            .render(Stub::Relationship, &relationship_values(relationship))?;
        relationships.push_str(method.trim_end());
    }

    let mut values = Placeholders::new();
    values.insert("namespace", entity.model_namespace.clone());
    values.insert("modelName", entity.model_name.clone());
    values.insert("table", entity.table_name.clone());
    values.insert("primaryKey", entity.primary_key.clone());
    values.insert("fillable", php_array(&entity.fillable()));
    values.insert("relationships", relationships);

    Ok(Artifact {
        path: path(cx, entity),
        contents: cx.templates.render(Stub::Model, &values)?,
        subject: entity.model_class.clone(),
    })
}

/// `return $this->hasMany('App\Comment', 'post_id', 'id');`
fn relationship_values(relationship: &Relationship) -> Placeholders {
    let mut args = vec![format!("'{}'", relationship.target)];
    args.extend(
        [&relationship.local_key, &relationship.foreign_key]
            .into_iter()
            .flatten()
            .map(|key| format!("'{key}'")),
    );

    let mut values = Placeholders::new();
    values.insert("relationName", relationship.name.clone());
    values.insert("relationType", relationship.kind.as_str().to_string());
    values.insert("relationArgs", args.join(", "));
    values
}

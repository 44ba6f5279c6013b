use crate::template::{Placeholders, Stub};
use crate::{class_basename, class_path, php_string, Artifact, Context};
use scaffold_core::{qualify, Entity, FieldType, Result};
use std::path::PathBuf;

/// Output path of the entity's controller, relative to the project root.
pub fn path(cx: &Context<'_>, entity: &Entity) -> PathBuf {
    class_path(&cx.options.paths.controllers, &entity.controller_class)
}

/// Renders the resource controller of an entity.
///
/// Child entities get the parent-aware `create` action, which loads the
/// parent model by the foreign key passed along with the request.
pub fn generate(cx: &Context<'_>, entity: &Entity) -> Result<Artifact> {
    let mut values = Placeholders::new();
    values.insert(
        "namespace",
        qualify([
            cx.options.app_namespace.as_str(),
            "Http\\Controllers",
            entity.controller_namespace.as_str(),
        ]),
    );
    values.insert("appNamespace", cx.options.app_namespace.clone());
    values.insert("className", class_basename(&entity.controller_class).to_string());
    values.insert("modelClass", entity.model_class.clone());
    values.insert("modelName", entity.model_name.clone());
    values.insert("crudName", entity.crud_name.clone());
    values.insert("crudNameSingular", entity.crud_name_singular());
    values.insert("viewTemplateDir", entity.view_template_dir());
    values.insert("routePath", entity.route_path.clone());
    values.insert("pagination", entity.per_page.to_string());
    values.insert("searchQuery", search_query(entity));
    values.insert("validationRules", validation_rules(entity));
    values.insert("fileSnippet", file_snippet(cx, entity)?);

    let create_action = match &entity.parent {
        Some(parent) => {
            values.insert(
                "parentModelNamespace",
                format!("use {} as ParentModel;", parent.model_class),
            );
            values.insert("parentForeignKey", parent.foreign_key.clone());
            cx.templates.render(Stub::ChildCreateAction, &values)?
        }
        None => {
            values.insert("parentModelNamespace", String::new());
            cx.templates.render(Stub::NormalCreateAction, &values)?
        }
    };
    values.insert("controllerCreate", create_action.trim_end().to_string());

    Ok(Artifact {
        path: path(cx, entity),
        contents: cx.templates.render(Stub::Controller, &values)?,
        subject: qualify([
            cx.options.app_namespace.as_str(),
            "Http\\Controllers",
            entity.controller_class.as_str(),
        ]),
    })
}

/// The `$this->validate(...)` call guarding `store` and `update`.
fn validation_rules(entity: &Entity) -> String {
    if entity.validations.is_empty() {
        return String::new();
    }

    let rules: Vec<_> = entity
        .validations
        .iter()
        .map(|rule| format!("            '{}' => {}", rule.field, php_string(&rule.rules)))
        .collect();

    format!("$this->validate($request, [\n{}\n        ]);", rules.join(",\n"))
}

fn file_snippet(cx: &Context<'_>, entity: &Entity) -> Result<String> {
    let mut snippets = vec![];

    for field in entity.fields.iter().filter(|f| f.ty == FieldType::File) {
        let mut values = Placeholders::new();
        values.insert("fieldName", field.name.clone());
        snippets.push(cx.templates.render(Stub::FileUpload, &values)?.trim_end().to_string());
    }

    Ok(snippets.join("\n\n        "))
}

/// Paginated query filtering the index page by keyword across the columns
/// shown there.
fn search_query(entity: &Entity) -> String {
    let model = &entity.model_name;
    let mut columns = entity.fields.iter().filter(|field| {
        field.is_column()
            && field.show_in_index
            && !matches!(field.ty, FieldType::File | FieldType::Password)
    });

    let Some(first) = columns.next() else {
        return format!("{model}::latest()->paginate($perPage)");
    };

    let mut query = format!("{model}::where('{}', 'LIKE', \"%$keyword%\")", first.name);
    for field in columns {
        query.push_str(&format!(
            "\n                ->orWhere('{}', 'LIKE', \"%$keyword%\")",
            field.name
        ));
    }
    query.push_str("\n                ->latest()->paginate($perPage)");
    query
}

use crate::template::{Placeholders, Stub};
use crate::{php_array, Artifact, Context};
use scaffold_core::{Entity, FieldSpec, FieldType, ForeignKey, Name, Result};
use std::path::PathBuf;
use tracing::debug;

const INDENT: &str = "            ";

/// Column modifiers that translate into a chained call without arguments.
const MODIFIERS: &[&str] = &["unsigned", "nullable", "first"];

pub fn file_name(entity: &Entity, date_prefix: &str) -> String {
    format!("{date_prefix}_create_{}_table.php", entity.migration_name)
}

pub fn path(cx: &Context<'_>, entity: &Entity, date_prefix: &str) -> PathBuf {
    cx.options.paths.migrations.join(file_name(entity, date_prefix))
}

/// Renders the `create_<table>_table` migration of an entity.
pub fn generate(cx: &Context<'_>, entity: &Entity, date_prefix: &str) -> Result<Artifact> {
    let class_name = format!(
        "Create{}Table",
        Name::new(&entity.migration_name).upper_camel_case()
    );

    let mut values = Placeholders::new();
    values.insert("className", class_name.clone());
    values.insert("tableName", entity.table_name.clone());
    values.insert("schemaUp", schema_up(entity));
    values.insert("schemaDown", format!("Schema::drop('{}');", entity.table_name));

    Ok(Artifact {
        path: path(cx, entity, date_prefix),
        contents: cx.templates.render(Stub::Migration, &values)?,
        subject: class_name,
    })
}

/// Body of the `Schema::create` closure.
pub fn schema_up(entity: &Entity) -> String {
    let mut lines = vec![
        format!("$table->increments('{}');", entity.primary_key),
        "$table->timestamps();".to_string(),
    ];

    for field in &entity.fields {
        if field.is_column() && field.name != entity.primary_key {
            lines.push(column(field));
        }
    }

    for index in &entity.indices {
        lines.push(format!("$table->index(['{index}']);"));
    }

    for foreign_key in &entity.foreign_keys {
        lines.push(foreign(foreign_key));
    }

    lines
        .iter()
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn column(field: &FieldSpec) -> String {
    let mut line = match &field.ty {
        FieldType::Enum => format!(
            "$table->enum('{}', {})",
            field.name,
            php_array(&field.options)
        ),
        ty => format!("$table->{}('{}')", column_method(ty), field.name),
    };

    if let Some(modifier) = &field.modifier {
        if MODIFIERS.contains(&modifier.as_str()) {
            line.push_str(&format!("->{modifier}()"));
        } else {
            debug!(field = %field.name, %modifier, "ignoring unsupported column modifier");
        }
    }

    line.push(';');
    line
}

/// Schema builder method for a field type.
fn column_method(ty: &FieldType) -> &str {
    use FieldType::*;

    match ty {
        String | Varchar | Password | Email | Select | File => "string",
        Char => "char",
        Text => "text",
        MediumText => "mediumText",
        LongText => "longText",
        Json => "json",
        Jsonb => "jsonb",
        Binary => "binary",
        Number | Integer => "integer",
        BigInt => "bigInteger",
        MediumInt => "mediumInteger",
        TinyInt => "tinyInteger",
        SmallInt => "smallInteger",
        Decimal => "decimal",
        Double => "double",
        Float => "float",
        Date => "date",
        DateTime => "dateTime",
        Timestamp => "timestamp",
        Time => "time",
        Boolean => "boolean",
        Enum => "enum",
        OneToMany => "integer",
        Other(name) => name,
    }
}

fn foreign(foreign_key: &ForeignKey) -> String {
    let mut line = format!(
        "$table->foreign('{}')->references('{}')->on('{}')",
        foreign_key.column, foreign_key.references, foreign_key.on
    );
    if let Some(action) = foreign_key.on_delete {
        line.push_str(&format!("->onDelete('{action}')"));
    }
    if let Some(action) = foreign_key.on_update {
        line.push_str(&format!("->onUpdate('{action}')"));
    }
    line.push(';');
    line
}

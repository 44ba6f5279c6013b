use crate::{run, Config};
use anyhow::{Context as _, Result};
use clap::Parser;
use scaffold_core::entity::{Flag, PerPage, RawData};
use scaffold_core::{Document, ExpandOptions, RawEntity};
use std::path::{Path, PathBuf};

/// Flags mirror the attributes of an entity object in a JSON document.
#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Entity name, e.g. `Posts`
    name: String,

    /// Fields as `name#type[#modifier];...`
    #[arg(long)]
    fields: Option<String>,

    /// JSON file holding a `fields` array, used instead of --fields
    #[arg(long, alias = "fields_from_file", conflicts_with = "fields")]
    fields_from_file: Option<PathBuf>,

    /// Validation rules as `field#rules;...`
    #[arg(long)]
    validations: Option<String>,

    #[arg(long)]
    controller_namespace: Option<String>,

    /// Namespace of the model below the application namespace
    #[arg(long)]
    model_namespace: Option<String>,

    /// Primary key column
    #[arg(long, default_value = "id")]
    pk: String,

    /// Models per index page
    #[arg(long, default_value_t = 25)]
    pagination: u32,

    /// Comma separated columns to index
    #[arg(long)]
    indexes: Option<String>,

    /// Constraints as `column#refColumn#refTable#onUpdate#onDelete,...`
    #[arg(long)]
    foreign_keys: Option<String>,

    /// Relationships as `name#kind#target|localKey|foreignKey,...`
    #[arg(long)]
    relationships: Option<String>,

    /// Register a resource route
    #[arg(long, default_value = "yes", value_parser = ["yes", "no"])]
    route: String,

    /// Prefix of the resource route
    #[arg(long)]
    route_group: Option<String>,

    /// Dotted directory the views go under
    #[arg(long)]
    view_path: Option<String>,

    /// Label views through `trans()`; defaults to the `localize` setting
    #[arg(long, value_parser = ["yes", "no"])]
    localize: Option<String>,
}

impl GenerateCommand {
    pub(crate) fn run(self, root: &Path, config: &Config) -> Result<()> {
        let document = Document::single(self.raw_entity()?);

        // Flags nobody passed are not worth a warning each
        let options = ExpandOptions {
            presence_checks: false,
            ..config.expand_options()
        };
        run::scaffold(&document, &options, root, config)
    }

    fn raw_entity(&self) -> Result<RawEntity> {
        let mut raw = RawEntity {
            name: Some(self.name.clone()),
            fields: self.fields.clone(),
            validations: self.validations.clone(),
            controller_namespace: self.controller_namespace.clone(),
            model_namespace: self.model_namespace.clone(),
            primary_key: Some(self.pk.clone()),
            per_page: Some(PerPage::Number(self.pagination)),
            indices: self.indexes.clone(),
            foreign_keys: self.foreign_keys.clone(),
            relationships: self.relationships.clone(),
            route: Some(Flag::Text(self.route.clone())),
            route_group: self.route_group.clone(),
            view_path: self.view_path.clone(),
            localize: self.localize.clone().map(Flag::Text),
            ..RawEntity::default()
        };

        if let Some(path) = &self.fields_from_file {
            raw.data = fields_file(path)?;
        }
        Ok(raw)
    }
}

fn fields_file(path: &Path) -> Result<RawData> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fields file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid fields file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scaffold_core::expand;

    fn parse(args: &[&str]) -> GenerateCommand {
        GenerateCommand::try_parse_from(["generate"].iter().chain(args)).unwrap()
    }

    #[test]
    fn flags_become_entity_attributes() {
        let cmd = parse(&[
            "Posts",
            "--fields",
            "title#string;body#text",
            "--validations",
            "title#required",
            "--controller-namespace",
            "Admin",
            "--route-group",
            "admin",
            "--pagination",
            "10",
        ]);
        let raw = cmd.raw_entity().unwrap();

        assert_eq!(raw.name.as_deref(), Some("Posts"));
        assert_eq!(raw.primary_key.as_deref(), Some("id"));
        assert_eq!(raw.per_page, Some(PerPage::Number(10)));
        assert_eq!(raw.route, Some(Flag::Text("yes".to_string())));

        let expansion = expand(&Document::single(raw), &ExpandOptions::default());
        let post = &expansion.roots[0];
        assert_eq!(post.controller_class, "Admin\\PostsController");
        assert_eq!(post.route_path, "admin/posts");
        assert_eq!(post.per_page, 10);
        assert_eq!(post.fields_spec(), "title#string;body#text");
        assert_eq!(post.validations_spec(), "title#required");
    }

    #[test]
    fn route_accepts_yes_or_no() {
        let raw = parse(&["Posts", "--route", "no"]).raw_entity().unwrap();
        assert!(!raw.route.unwrap().is_yes());

        assert!(GenerateCommand::try_parse_from(["generate", "Posts", "--route", "maybe"]).is_err());
    }

    #[test]
    fn localize_is_left_to_config_unless_given() {
        let raw = parse(&["Posts"]).raw_entity().unwrap();
        assert_eq!(raw.localize, None);

        let raw = parse(&["Posts", "--localize", "yes"]).raw_entity().unwrap();
        let expansion = expand(&Document::single(raw), &ExpandOptions::default());
        assert!(expansion.roots[0].localize);

        assert!(GenerateCommand::try_parse_from(["generate", "Posts", "--localize", "fr"]).is_err());
    }

    #[test]
    fn fields_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.json");
        std::fs::write(
            &path,
            r#"{ "fields": [
                { "name": "title", "type": "string" },
                { "name": "status", "type": "select", "options": ["draft", "live"] }
            ] }"#,
        )
        .unwrap();

        let path = path.to_string_lossy().into_owned();
        let raw = parse(&["Posts", "--fields-from-file", &path]).raw_entity().unwrap();
        assert_eq!(raw.fields, None);

        let expansion = expand(&Document::single(raw), &ExpandOptions::default());
        assert_eq!(
            expansion.roots[0].fields_spec(),
            "title#string;status#select#options=draft,live"
        );
    }

    #[test]
    fn fields_and_fields_file_conflict() {
        let result = GenerateCommand::try_parse_from([
            "generate",
            "Posts",
            "--fields",
            "title#string",
            "--fields-from-file",
            "fields.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_fields_file() {
        let err = parse(&["Posts", "--fields-from-file", "/nonexistent/fields.json"])
            .raw_entity()
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to read fields file"));
    }
}

use scaffold_core::*;

fn quiet() -> ExpandOptions {
    ExpandOptions {
        presence_checks: false,
        ..ExpandOptions::default()
    }
}

#[test]
fn self_referencing_child_is_a_cycle() {
    let document = Document::from_json(
        r#"[[{
            "name": "Category",
            "data": { "fields": [
                { "name": "children", "type": "OneToMany", "entity": { "name": "Category" } }
            ] }
        }]]"#,
    )
    .unwrap();

    let expansion = expand(&document, &quiet());
    assert!(expansion.roots.is_empty());

    let errors: Vec<_> = expansion.diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].subject, "Category");
    assert!(errors[0].error.root().is_cyclic_entity_graph());
    assert!(errors[0]
        .error
        .to_string()
        .ends_with("cyclic entity graph: App\\Category -> App\\Category"));
}

#[test]
fn model_class_declared_twice_in_one_tree() {
    let document = Document::from_json(
        r#"[[{
            "name": "Post",
            "data": { "fields": [
                { "name": "comments", "type": "OneToMany", "entity": { "name": "Comment" } },
                { "name": "notes", "type": "OneToMany", "entity": { "name": "Comment" } }
            ] }
        }]]"#,
    )
    .unwrap();

    let expansion = expand(&document, &quiet());
    assert!(expansion.walk().is_empty());

    let errors: Vec<_> = expansion.diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].error.root().is_duplicate_entity());
    assert_eq!(
        errors[0].error.to_string(),
        "entity group 0: one-to-many field `notes` of `Post`: \
         model class `App\\Comment` is declared more than once"
    );
}

#[test]
fn model_class_declared_again_by_a_later_root() {
    let document = Document::from_json(
        r#"[[
            { "name": "Post", "data": { "fields": [
                { "name": "comments", "type": "OneToMany", "entity": { "name": "Comment" } }
            ] } },
            { "name": "Comment" }
        ], [
            { "name": "Post" },
            { "name": "Tag" }
        ]]"#,
    )
    .unwrap();

    let expansion = expand(&document, &quiet());

    let names: Vec<_> = expansion.walk().into_iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Post", "Comment", "Tag"]);

    let errors: Vec<_> = expansion.diagnostics.errors().collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].subject, "Comment");
    assert_eq!(errors[1].subject, "Post");
    assert!(errors.iter().all(|e| e.error.root().is_duplicate_entity()));
}

#[test]
fn failed_root_does_not_claim_its_model_classes() {
    let document = Document::from_json(
        r#"[[
            { "name": "Post", "fields": "title" },
            { "name": "Post", "fields": "title#string" }
        ]]"#,
    )
    .unwrap();

    let expansion = expand(&document, &quiet());
    assert_eq!(expansion.roots.len(), 1);
    assert_eq!(expansion.roots[0].fields_spec(), "title#string");

    let error = expansion.diagnostics.errors().next().unwrap();
    assert!(error.error.root().is_malformed_field_spec());
}

#[test]
fn nesting_beyond_max_depth_is_rejected() {
    let document = Document::from_json(
        r#"[[{
            "name": "Country",
            "data": { "fields": [ { "name": "regions", "type": "OneToMany", "entity": {
                "name": "Region",
                "data": { "fields": [ { "name": "cities", "type": "OneToMany", "entity": {
                    "name": "City"
                } } ] }
            } } ] }
        }]]"#,
    )
    .unwrap();

    let shallow = ExpandOptions {
        max_depth: 2,
        ..quiet()
    };
    let expansion = expand(&document, &shallow);
    assert!(expansion.roots.is_empty());
    assert!(expansion.diagnostics.has_errors());

    let expansion = expand(&document, &quiet());
    assert_eq!(expansion.walk().len(), 3);
}

#[test]
fn hard_error_only_drops_its_own_root() {
    let document = Document::from_json(
        r#"[[
            { "name": "Post", "fields": "title#string" },
            { "name": "Broken", "fields": "title" },
            { "fields": "title#string" }
        ], [
            { "name": "Tag" }
        ]]"#,
    )
    .unwrap();

    let expansion = expand(&document, &quiet());

    let names: Vec<_> = expansion.roots.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Post", "Tag"]);

    let errors: Vec<_> = expansion.diagnostics.errors().collect();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].error.root().is_malformed_field_spec());
    assert!(errors[1].error.root().is_missing_required_attribute());
    assert_eq!(errors[1].subject, "<unnamed>");
}

#[test]
fn error_in_child_drops_the_whole_tree() {
    let document = Document::from_json(
        r#"[[{
            "name": "Post",
            "data": { "fields": [
                { "name": "comments", "type": "OneToMany", "entity": {
                    "name": "Comment", "relationships": "post#hasOne#App\\Post"
                } }
            ] }
        }]]"#,
    )
    .unwrap();

    let expansion = expand(&document, &quiet());
    assert!(expansion.roots.is_empty());

    let error = expansion.diagnostics.errors().next().unwrap();
    assert!(error.error.root().is_malformed_relation_spec());
    assert!(error
        .error
        .to_string()
        .starts_with("entity group 0: one-to-many field `comments` of `Post`"));
}

#[test]
fn one_to_many_without_entity_is_malformed() {
    let document = Document::from_json(
        r#"[[{ "name": "Post", "data": { "fields": [ { "name": "comments", "type": "OneToMany" } ] } }]]"#,
    )
    .unwrap();

    let expansion = expand(&document, &quiet());
    let error = expansion.diagnostics.errors().next().unwrap();
    assert!(error.error.root().is_malformed_field_spec());
}

#[test]
fn strict_policy_fails_on_warnings() {
    let document = Document::from_json(r#"[[{ "name": "Post" }]]"#).unwrap();
    let expansion = expand(&document, &ExpandOptions::default());

    assert!(expansion.diagnostics.enforce(Policy::Lenient).is_ok());
    assert!(expansion.diagnostics.enforce(Policy::Strict).is_err());
}

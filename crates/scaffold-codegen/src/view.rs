use crate::template::{Placeholders, Stub};
use crate::{php_array, php_string, Artifact, Context};
use scaffold_core::{Entity, FieldSpec, FieldType, Name, Result};
use std::path::PathBuf;

/// The view files of an entity, with the stub each one is rendered from.
pub const VIEWS: [(&str, Stub); 5] = [
    ("index", Stub::Index),
    ("form", Stub::Form),
    ("create", Stub::Create),
    ("edit", Stub::Edit),
    ("show", Stub::Show),
];

/// Directory holding the entity's views, relative to the project root.
pub fn dir(cx: &Context<'_>, entity: &Entity) -> PathBuf {
    let mut dir = cx.options.paths.views.clone();
    if let Some(view_path) = &entity.view_path {
        dir.extend(view_path.split('.').filter(|s| !s.is_empty()));
    }
    dir.push(&entity.view_folder);
    dir
}

/// Renders the index, form, create, edit and show views of an entity.
pub fn generate(cx: &Context<'_>, entity: &Entity) -> Result<Vec<Artifact>> {
    let values = placeholders(cx, entity)?;
    let dir = dir(cx, entity);

    VIEWS
        .iter()
        .map(|(name, stub)| {
            let file_name = format!("{name}.blade.php");
            Ok(Artifact {
                path: dir.join(&file_name),
                contents: cx.templates.render(*stub, &values)?,
                subject: format!("{}/{file_name}", entity.view_template_dir()),
            })
        })
        .collect()
}

fn placeholders(cx: &Context<'_>, entity: &Entity) -> Result<Placeholders> {
    let singular = entity.crud_name_singular();
    let lang = entity.localize.then_some(entity.crud_name.as_str());
    let columns: Vec<_> = entity.fields.iter().filter(|f| f.is_column()).collect();

    let mut heading = String::new();
    let mut body = String::new();
    for field in columns
        .iter()
        .filter(|f| f.show_in_index)
        .take(cx.options.view_columns)
    {
        heading.push_str(&format!("<th>{}</th>", heading_label(lang, field)));
        body.push_str(&format!("<td>{{{{ $item->{} }}}}</td>", field.name));
    }

    let mut show = String::new();
    for field in &columns {
        show.push_str(&format!(
            "\n                                    <tr><th> {} </th><td> {{{{ ${singular}->{} }}}} </td></tr>",
            heading_label(lang, field),
            field.name
        ));
    }

    let mut form = vec![];
    for field in columns.iter().filter(|f| f.show_in_form) {
        form.push(form_field(cx, field, lang)?);
    }

    let parent_field = match &entity.parent {
        Some(parent) => format!(
            "                        {{!! Form::hidden('{}', $parent->{}) !!}}\n",
            parent.foreign_key, parent.primary_key
        ),
        None => String::new(),
    };

    let mut values = Placeholders::new();
    values.insert("crudName", entity.crud_name.clone());
    values.insert("crudNameCap", capitalize(&entity.crud_name));
    values.insert("crudNameSingular", singular);
    values.insert("modelName", entity.model_name.clone());
    values.insert("primaryKey", entity.primary_key.clone());
    values.insert("primaryKeyCap", Name::new(&entity.primary_key).title_case());
    values.insert("routePath", entity.route_path.clone());
    values.insert("viewTemplateDir", entity.view_template_dir());
    values.insert("formHeadingHtml", heading);
    values.insert("formBodyHtml", body);
    values.insert("formBodyHtmlForShowView", show);
    values.insert("formFieldsHtml", form.join("\n"));
    values.insert("parentField", parent_field);
    Ok(values)
}

/// HTML input type used for a field in forms.
pub fn input_type(ty: &FieldType) -> &'static str {
    use FieldType::*;

    match ty {
        String | Char | Varchar => "text",
        Text | MediumText | LongText | Json | Jsonb | Binary => "textarea",
        Password => "password",
        Email => "email",
        Number | Integer | BigInt | MediumInt | TinyInt | SmallInt | Decimal | Double | Float => {
            "number"
        }
        Date => "date",
        DateTime | Timestamp => "datetime-local",
        Time => "time",
        Boolean => "radio",
        Enum | Select => "select",
        File => "file",
        OneToMany | Other(_) => "text",
    }
}

/// One wrapped form widget. `lang` is the translation namespace of the label,
/// if the entity is localized.
fn form_field(cx: &Context<'_>, field: &FieldSpec, lang: Option<&str>) -> Result<String> {
    let input = input_type(&field.ty);

    let mut values = Placeholders::new();
    values.insert("itemName", field.name.clone());
    values.insert("fieldType", input.to_string());
    values.insert(
        "required",
        if field.required {
            ", 'required' => 'required'".to_string()
        } else {
            String::new()
        },
    );

    let stub = match input {
        "password" => Stub::PasswordField,
        "datetime-local" | "time" => Stub::InputField,
        "radio" => Stub::RadioField,
        "select" => {
            values.insert("options", php_array(&field.options));
            Stub::SelectField
        }
        _ => Stub::FormField,
    };
    let widget = cx.templates.render(stub, &values)?;

    let mut wrap = Placeholders::new();
    wrap.insert("itemName", field.name.clone());
    wrap.insert("label", form_label(lang, field));
    wrap.insert("field", widget.trim_end().to_string());
    Ok(cx.templates.render(Stub::WrapField, &wrap)?.trim_end().to_string())
}

fn label(field: &FieldSpec) -> String {
    Name::new(&field.name).title_case()
}

/// Label as Blade output, for table headings.
fn heading_label(lang: Option<&str>, field: &FieldSpec) -> String {
    match lang {
        Some(lang) => format!("{{{{ trans('{lang}.{}') }}}}", field.name),
        None => label(field),
    }
}

/// Label as a PHP expression, for `Form::label`.
fn form_label(lang: Option<&str>, field: &FieldSpec) -> String {
    match lang {
        Some(lang) => format!("trans('{lang}.{}')", field.name),
        None => php_string(&label(field)),
    }
}

fn capitalize(src: &str) -> String {
    let mut chars = src.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Options, Templates};
    use pretty_assertions::assert_eq;

    fn render(field: &str, required: bool) -> String {
        let options = Options::default();
        let templates = Templates::embedded();
        let cx = Context::new(&options, &templates);

        let mut field = FieldSpec::parse(field).unwrap();
        if required {
            field.set_validations("required");
        }
        form_field(&cx, &field, None).unwrap()
    }

    #[test]
    fn text_widget() {
        let html = render("title#string", true);
        assert_eq!(
            html,
            "<div class=\"form-group {{ $errors->has('title') ? 'has-error' : ''}}\">\n    \
             {!! Form::label('title', 'Title', ['class' => 'control-label']) !!}\n    \
             {!! Form::text('title', null, ['class' => 'form-control', 'required' => 'required']) !!}\n    \
             {!! $errors->first('title', '<p class=\"help-block\">:message</p>') !!}\n\
             </div>"
        );
    }

    #[test]
    fn widget_per_type() {
        assert!(render("body#text", false).contains("Form::textarea('body', null, ['class' => 'form-control'])"));
        assert!(render("secret#password", false).contains("Form::password('secret'"));
        assert!(render("starts_at#datetime", false).contains("Form::input('datetime-local', 'starts_at'"));
        assert!(render("active#boolean", false).contains("Form::radio('active', '1')"));
        assert!(render("avatar#file", false).contains("Form::file('avatar'"));
        assert!(render("color#select#options=red,blue", false)
            .contains("Form::select('color', ['red', 'blue'], null"));
        assert!(render("color#select", false).contains("Form::select('color', [], null"));
    }

    #[test]
    fn localized_labels() {
        let options = Options::default();
        let templates = Templates::embedded();
        let cx = Context::new(&options, &templates);
        let field = FieldSpec::parse("title#string").unwrap();

        let html = form_field(&cx, &field, Some("posts")).unwrap();
        assert!(html.contains("{!! Form::label('title', trans('posts.title'), ['class' => 'control-label']) !!}"));
        assert_eq!(heading_label(Some("posts"), &field), "{{ trans('posts.title') }}");
        assert_eq!(heading_label(None, &field), "Title");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("blogposts"), "Blogposts");
        assert_eq!(capitalize(""), "");
    }
}

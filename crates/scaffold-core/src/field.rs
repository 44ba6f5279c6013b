mod ty;

pub use ty::FieldType;

use crate::entity::{RawEntity, RawField};
use crate::{Error, Result};
use std::fmt;

const OPTIONS_PREFIX: &str = "options=";

/// One normalized field of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Column / input name
    pub name: String,

    pub ty: FieldType,

    /// Raw third segment of a `name#type#modifier` token (`unsigned`,
    /// `nullable`, ...). For select and enum fields the `options=` clause is
    /// lifted into `options` instead.
    pub modifier: Option<String>,

    /// Choices of a select / enum field, in declaration order
    pub options: Vec<String>,

    /// An `options=` clause was given, even if it listed nothing
    pub has_options_clause: bool,

    /// Validation rules, `|` separated (`required|max:255`)
    pub validations: Option<String>,

    /// True iff `validations` contains the `required` rule
    pub required: bool,

    pub show_in_form: bool,

    pub show_in_index: bool,

    /// Inline child entity of a one-to-many field
    pub child: Option<Box<RawEntity>>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: FieldType) -> FieldSpec {
        FieldSpec {
            name: name.into(),
            ty,
            modifier: None,
            options: vec![],
            has_options_clause: false,
            validations: None,
            required: false,
            show_in_form: true,
            show_in_index: true,
            child: None,
        }
    }

    /// Parses a single `name#type[#modifier]` token.
    pub fn parse(token: &str) -> Result<FieldSpec> {
        let token = token.trim();
        let mut segments = token.splitn(3, '#').map(str::trim);

        let name = segments.next().unwrap_or_default();
        if name.is_empty() {
            return Err(Error::malformed_field_spec(token, "missing field name"));
        }

        let ty = match segments.next() {
            Some(ty) if !ty.is_empty() => ty,
            _ => return Err(Error::malformed_field_spec(token, "missing `#type`")),
        };

        let mut field = FieldSpec::new(name, FieldType::from_name(ty));
        field.set_modifier(segments.next().filter(|m| !m.is_empty()));
        Ok(field)
    }

    /// Parses a `;` separated list of field tokens. Empty tokens (such as a
    /// trailing `;`) are skipped.
    pub fn parse_list(src: &str) -> Result<Vec<FieldSpec>> {
        src.split(';')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(FieldSpec::parse)
            .collect()
    }

    /// Builds a field from its structured JSON form.
    pub fn from_raw(raw: &RawField) -> Result<FieldSpec> {
        let name = raw.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(Error::malformed_field_spec(
                "<unnamed>",
                "field object has no `name`",
            ));
        }

        let ty = match raw.ty.as_deref().map(str::trim) {
            Some(ty) if !ty.is_empty() => FieldType::from_name(ty),
            _ => return Err(Error::malformed_field_spec(name, "field object has no `type`")),
        };

        let mut field = FieldSpec::new(name, ty);
        field.set_modifier(raw.modifier.as_deref().filter(|m| !m.is_empty()));

        if field.ty.has_options() && !raw.options.is_empty() {
            field.options = raw.options.clone();
            field.has_options_clause = true;
        }

        field.show_in_form = raw.show_in_form.as_ref().map_or(true, |flag| flag.is_yes());
        field.show_in_index = raw.show_in_index.as_ref().map_or(true, |flag| flag.is_yes());

        if let Some(rules) = raw.validations.as_deref() {
            field.set_validations(rules);
        }

        if field.ty.is_one_to_many() {
            match &raw.entity {
                Some(child) => field.child = Some(child.clone()),
                None => {
                    return Err(Error::malformed_field_spec(
                        name,
                        "one-to-many field requires an inline `entity`",
                    ))
                }
            }
        }

        Ok(field)
    }

    /// Sets the validation rules and recomputes `required`.
    pub fn set_validations(&mut self, rules: &str) {
        let rules = rules.trim();
        if rules.is_empty() {
            self.validations = None;
            self.required = false;
            return;
        }

        self.required = rules.split('|').any(|rule| rule.trim() == "required");
        self.validations = Some(rules.to_string());
    }

    /// Returns `true` if the field maps to a table column.
    pub fn is_column(&self) -> bool {
        !self.ty.is_one_to_many()
    }

    fn set_modifier(&mut self, modifier: Option<&str>) {
        match modifier {
            Some(modifier) if self.ty.has_options() && modifier.starts_with(OPTIONS_PREFIX) => {
                self.options = split_options(&modifier[OPTIONS_PREFIX.len()..]);
                self.has_options_clause = true;
            }
            Some(modifier) => self.modifier = Some(modifier.to_string()),
            None => {}
        }
    }
}

/// Renders the field back into the mini-language.
impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.ty)?;

        let options_clause =
            self.ty.has_options() && (self.has_options_clause || !self.options.is_empty());

        if options_clause {
            write!(f, "#{OPTIONS_PREFIX}{}", self.options.join(","))
        } else if let Some(modifier) = &self.modifier {
            write!(f, "#{modifier}")
        } else if self.ty == FieldType::Select {
            write!(f, "#{OPTIONS_PREFIX}")
        } else {
            Ok(())
        }
    }
}

/// Renders the column fields as a `;` separated mini-language string.
/// One-to-many fields are left out.
pub fn to_spec_string(fields: &[FieldSpec]) -> String {
    fields
        .iter()
        .filter(|field| field.is_column())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Names of the mass-assignable columns.
pub fn fillable(fields: &[FieldSpec]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| field.is_column())
        .map(|field| field.name.clone())
        .collect()
}

fn split_options(src: &str) -> Vec<String> {
    src.split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(String::from)
        .collect()
}

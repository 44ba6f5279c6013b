use std::fmt;
use std::str::FromStr;

/// Column / widget type of a field.
///
/// Type names are matched case-insensitively. Names the generator does not
/// know are carried through verbatim as [`FieldType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Char,
    Varchar,
    Text,
    MediumText,
    LongText,
    Json,
    Jsonb,
    Binary,
    Password,
    Email,
    Number,
    Integer,
    BigInt,
    MediumInt,
    TinyInt,
    SmallInt,
    Decimal,
    Double,
    Float,
    Date,
    DateTime,
    Timestamp,
    Time,
    Boolean,
    Enum,
    Select,
    File,

    /// Relation to a list of child entities. Never becomes a column.
    OneToMany,

    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        use FieldType::*;

        match self {
            String => "string",
            Char => "char",
            Varchar => "varchar",
            Text => "text",
            MediumText => "mediumtext",
            LongText => "longtext",
            Json => "json",
            Jsonb => "jsonb",
            Binary => "binary",
            Password => "password",
            Email => "email",
            Number => "number",
            Integer => "integer",
            BigInt => "bigint",
            MediumInt => "mediumint",
            TinyInt => "tinyint",
            SmallInt => "smallint",
            Decimal => "decimal",
            Double => "double",
            Float => "float",
            Date => "date",
            DateTime => "datetime",
            Timestamp => "timestamp",
            Time => "time",
            Boolean => "boolean",
            Enum => "enum",
            Select => "select",
            File => "file",
            OneToMany => "OneToMany",
            Other(name) => name,
        }
    }

    pub fn is_one_to_many(&self) -> bool {
        matches!(self, FieldType::OneToMany)
    }

    /// Types whose modifier may carry an `options=` list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Enum)
    }
}

impl FieldType {
    /// Maps a type name onto a variant. Never fails: unknown names become
    /// [`FieldType::Other`].
    pub fn from_name(s: &str) -> FieldType {
        use FieldType::*;

        match s.to_ascii_lowercase().as_str() {
            "string" => String,
            "char" => Char,
            "varchar" => Varchar,
            "text" => Text,
            "mediumtext" => MediumText,
            "longtext" => LongText,
            "json" => Json,
            "jsonb" => Jsonb,
            "binary" => Binary,
            "password" => Password,
            "email" => Email,
            "number" => Number,
            "integer" | "int" => Integer,
            "bigint" => BigInt,
            "mediumint" => MediumInt,
            "tinyint" => TinyInt,
            "smallint" => SmallInt,
            "decimal" => Decimal,
            "double" => Double,
            "float" => Float,
            "date" => Date,
            "datetime" => DateTime,
            "timestamp" => Timestamp,
            "time" => Time,
            "boolean" | "bool" => Boolean,
            "enum" => Enum,
            "select" => Select,
            "file" => File,
            "onetomany" | "one_to_many" => OneToMany,
            _ => Other(s.to_string()),
        }
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldType::from_name(s))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use heck::{ToSnakeCase, ToTitleCase, ToUpperCamelCase};

/// A name split into lower-case words, rendered in whichever case a target
/// artifact needs.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = src.to_snake_case();
        let parts = snake
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// `blog_post`
    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    /// `blog-post`
    pub fn kebab_case(&self) -> String {
        self.parts.join("-")
    }

    /// `BlogPost`
    pub fn upper_camel_case(&self) -> String {
        self.snake_case().to_upper_camel_case()
    }

    /// `Blog Post`
    pub fn title_case(&self) -> String {
        self.snake_case().to_title_case()
    }

    /// `blogpost`, the way CRUD labels and route names are spelled.
    pub fn lower(&self) -> String {
        self.parts.concat()
    }

    /// Singularizes the last word: `blog_posts` -> `blog_post`.
    pub fn singular(&self) -> Name {
        self.map_last(|word| pluralizer::pluralize(word, 1, false))
    }

    /// Pluralizes the last word: `blog_post` -> `blog_posts`.
    pub fn plural(&self) -> Name {
        self.map_last(|word| pluralizer::pluralize(word, 2, false))
    }

    fn map_last(&self, f: impl FnOnce(&str) -> String) -> Name {
        let mut parts = self.parts.clone();
        if let Some(last) = parts.last_mut() {
            *last = f(last);
        }
        Name { parts }
    }
}

/// Joins namespace segments with `\`, ignoring empty segments and stray
/// separators around each one.
pub fn qualify<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .map(|segment| segment.trim().trim_matches('\\'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("\\")
}

use super::Error;

/// Error when the entity tree refers back to one of its ancestors, or nests
/// deeper than the configured limit.
///
/// `path` lists the model classes from the root down to the offending node.
#[derive(Debug)]
pub(super) struct CyclicEntityGraph {
    path: Vec<String>,
}

impl std::error::Error for CyclicEntityGraph {}

impl core::fmt::Display for CyclicEntityGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cyclic entity graph: {}", self.path.join(" -> "))
    }
}

impl Error {
    pub fn cyclic_entity_graph<I, S>(path: I) -> Error
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error::from(super::ErrorKind::CyclicEntityGraph(CyclicEntityGraph {
            path: path.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn is_cyclic_entity_graph(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CyclicEntityGraph(_))
    }
}

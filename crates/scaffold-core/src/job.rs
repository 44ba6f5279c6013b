use crate::entity::Entity;
use crate::expand::Expansion;
use chrono::{Duration, NaiveDateTime};
use std::fmt;
use tracing::debug;

/// Date prefix of migration file names (`2024_01_31_120000`).
pub const DATE_PREFIX_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// The artifact a job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobKind {
    Controller,
    Model,
    Migration,
    View,
}

/// Index of an entity in the discovery (pre-order) walk of an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationJob {
    pub kind: JobKind,
    pub entity: EntityId,

    /// Position of the job across the whole run, in discovery order
    pub discovery_order: u32,

    /// Migration file name prefix; set for migration jobs only
    pub date_prefix: Option<String>,
}

/// Every generation job of an expansion, in discovery order.
#[derive(Debug)]
pub struct Schedule<'a> {
    entities: Vec<&'a Entity>,
    jobs: Vec<GenerationJob>,
}

impl JobKind {
    pub const ALL: [JobKind; 4] = [
        JobKind::Controller,
        JobKind::Model,
        JobKind::Migration,
        JobKind::View,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Controller => "controller",
            JobKind::Model => "model",
            JobKind::Migration => "migration",
            JobKind::View => "view",
        }
    }

    /// Parses a job kind name. `views` and `migrations` are accepted too.
    pub fn parse(src: &str) -> Option<JobKind> {
        match src.trim().to_ascii_lowercase().trim_end_matches('s') {
            "controller" => Some(JobKind::Controller),
            "model" => Some(JobKind::Model),
            "migration" => Some(JobKind::Migration),
            "view" => Some(JobKind::View),
            _ => None,
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> Schedule<'a> {
    /// Builds the job list for an expansion.
    ///
    /// Migrations are stamped `base + i` seconds, `i` being the migration's
    /// index in discovery order, so a parent table always sorts before the
    /// tables referencing it.
    pub fn new(expansion: &'a Expansion, base: NaiveDateTime) -> Schedule<'a> {
        let entities = expansion.walk();
        let mut jobs = vec![];
        let mut migrations = 0;

        for (index, entity) in entities.iter().enumerate() {
            for kind in JobKind::ALL {
                if !entity.processes(kind) {
                    continue;
                }

                let date_prefix = if kind == JobKind::Migration {
                    let at = base + Duration::seconds(migrations);
                    migrations += 1;
                    Some(at.format(DATE_PREFIX_FORMAT).to_string())
                } else {
                    None
                };

                jobs.push(GenerationJob {
                    kind,
                    entity: EntityId(index),
                    discovery_order: jobs.len() as u32,
                    date_prefix,
                });
            }
        }

        debug!(entities = entities.len(), jobs = jobs.len(), "scheduled");

        Schedule { entities, jobs }
    }

    /// Jobs in discovery order.
    pub fn jobs(&self) -> &[GenerationJob] {
        &self.jobs
    }

    /// Jobs in the order they run: the latest discovered first, so child
    /// entities are generated before their parents.
    pub fn dispatch_order(&self) -> Vec<&GenerationJob> {
        let mut jobs: Vec<_> = self.jobs.iter().collect();
        jobs.sort_by(|a, b| b.discovery_order.cmp(&a.discovery_order));
        jobs
    }

    pub fn entity(&self, id: EntityId) -> &'a Entity {
        self.entities[id.0]
    }

    pub fn entities(&self) -> &[&'a Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_job_kind() {
        assert_eq!(JobKind::parse("Controller"), Some(JobKind::Controller));
        assert_eq!(JobKind::parse("views"), Some(JobKind::View));
        assert_eq!(JobKind::parse("seeder"), None);
    }
}

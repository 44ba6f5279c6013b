use crate::{Context, WriteStatus, Writer};
use scaffold_core::{Entity, Result};

/// `Route::resource('admin/posts', 'Admin\PostsController');`
pub fn line(entity: &Entity) -> String {
    format!(
        "Route::resource('{}', '{}');",
        entity.route_path, entity.controller_class
    )
}

/// Appends the entity's resource route to the routing file. Nothing happens
/// for entities with routing turned off.
pub fn register(cx: &Context<'_>, writer: &mut Writer, entity: &Entity) -> Result<Option<WriteStatus>> {
    if !entity.route {
        return Ok(None);
    }
    writer
        .append_line(&cx.options.paths.routes, &line(entity))
        .map(Some)
}

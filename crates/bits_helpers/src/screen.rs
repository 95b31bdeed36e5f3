use bevy::prelude::*;

/// Despawns every entity tagged with the screen marker `T`.
pub fn despawn_screen<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

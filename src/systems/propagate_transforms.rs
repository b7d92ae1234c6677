//! Transform propagation for parent-child entity hierarchies.
//!
//! Computes [`GlobalTransform2D`] for every entity participating in a hierarchy
//! (root parents with [`Children`] and descendants with [`ChildOf`]).
//! Transforms are translation only: a child's world position is its parent's
//! world position plus its own local [`MapPosition`].
//!
//! # Schedule position
//!
//! Runs after slingshot initialization and before hover/aim so anchor and
//! launch point positions are current when the rubber bands are updated.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;

use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::mapposition::MapPosition;

type ChildQuery<'w, 's> =
    Query<'w, 's, (&'static MapPosition, Option<&'static Children>), With<ChildOf>>;

/// Propagate positions from root parents down through the hierarchy.
///
/// Entities that already have a `GlobalTransform2D` are updated in place.
/// Entities missing the component get it inserted via deferred [`Commands`]
/// (visible next frame).
pub fn propagate_transforms(
    roots: Query<(Entity, &MapPosition, &Children), Without<ChildOf>>,
    children_query: ChildQuery,
    mut globals: Query<&mut GlobalTransform2D>,
    mut commands: Commands,
) {
    for (root_entity, pos, children) in roots.iter() {
        let root_gt = GlobalTransform2D { position: pos.pos };

        if let Ok(mut gt) = globals.get_mut(root_entity) {
            *gt = root_gt;
        } else {
            commands.entity(root_entity).insert(root_gt);
        }

        propagate_children(
            &root_gt,
            children,
            &children_query,
            &mut globals,
            &mut commands,
        );
    }
}

fn propagate_children(
    parent_gt: &GlobalTransform2D,
    children: &Children,
    children_query: &ChildQuery,
    globals: &mut Query<&mut GlobalTransform2D>,
    commands: &mut Commands,
) {
    for child_entity in children.iter() {
        let Ok((pos, maybe_grandchildren)) = children_query.get(child_entity) else {
            continue;
        };

        let child_gt = GlobalTransform2D {
            position: parent_gt.position + pos.pos,
        };

        if let Ok(mut gt) = globals.get_mut(child_entity) {
            *gt = child_gt;
        } else {
            commands.entity(child_entity).insert(child_gt);
        }

        if let Some(grandchildren) = maybe_grandchildren {
            propagate_children(&child_gt, grandchildren, children_query, globals, commands);
        }
    }
}

//! The geometry scene graph.
//!
//! Arena-style storage: flat id→node maps plus ordered root id lists. Child
//! ownership is by id only, never by pointer, so cycles are structurally
//! preventable with an ancestor-chain check before any reparent mutation.
//!
//! A node referencing a missing parent is attached to the root rather than
//! leaked: every node stays reachable by hierarchy traversal.

use std::collections::HashMap;

use livetracer_core::error::{Result, TracerError};

use crate::entity::{EntityId, EntitySpec, GeometryEntity, GroupId};
use crate::group::GeometryGroup;

/// Where to place a node relative to its reorder anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// The scene graph: all groups and entities of a session.
#[derive(Debug, Default)]
pub struct SceneGraph {
    groups: HashMap<GroupId, GeometryGroup>,
    entities: HashMap<EntityId, GeometryEntity>,
    root_groups: Vec<GroupId>,
    root_entities: Vec<EntityId>,
}

impl SceneGraph {
    /// Creates an empty scene graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group and links it under `parent`, or under the root when
    /// `parent` is `None` or does not resolve (logged).
    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        parent: Option<&GroupId>,
        visible: bool,
    ) -> GroupId {
        let name = name.into();
        let id = GroupId::fresh();
        let mut group = GeometryGroup::new(id.clone(), name, visible);
        group.parent = self.link_group(&id, parent);
        self.groups.insert(id.clone(), group);
        id
    }

    /// Creates an entity from `spec` and links it under its parent, or under
    /// the root when the parent is absent or does not resolve (logged).
    pub fn add_entity(&mut self, spec: EntitySpec) -> EntityId {
        let id = EntityId::fresh();
        let parent = spec.parent.clone();
        let linked = self.link_entity(&id, parent.as_ref());
        let entity = spec.build(id.clone(), linked);
        self.entities.insert(id.clone(), entity);
        id
    }

    /// Removes an entity and unlinks it from its parent's child list.
    pub fn remove_entity(&mut self, id: &EntityId) -> Result<()> {
        let entity = self
            .entities
            .remove(id)
            .ok_or_else(|| TracerError::UnknownEntity(id.to_string()))?;
        self.detach_entity(id, entity.parent.as_ref());
        Ok(())
    }

    /// Removes a group together with every descendant group and entity.
    pub fn remove_group_cascade(&mut self, id: &GroupId) -> Result<()> {
        if !self.groups.contains_key(id) {
            return Err(TracerError::UnknownGroup(id.to_string()));
        }
        let parent = self.groups[id].parent.clone();
        self.detach_group(id, parent.as_ref());

        let mut pending = vec![id.clone()];
        while let Some(group_id) = pending.pop() {
            if let Some(group) = self.groups.remove(&group_id) {
                pending.extend(group.children_groups().iter().cloned());
                for entity_id in group.children_entities() {
                    self.entities.remove(entity_id);
                }
            }
        }
        Ok(())
    }

    /// Removes only the group node, re-parenting its direct children to the
    /// removed group's former parent (or the root). Relative child order is
    /// preserved.
    pub fn remove_group_promote(&mut self, id: &GroupId) -> Result<()> {
        let group = self
            .groups
            .remove(id)
            .ok_or_else(|| TracerError::UnknownGroup(id.to_string()))?;
        let target = group.parent.clone();
        self.detach_group(id, target.as_ref());

        for child_id in group.children_groups() {
            if let Some(child) = self.groups.get_mut(child_id) {
                child.parent = target.clone();
            }
            match target.as_ref().and_then(|t| self.groups.get_mut(t)) {
                Some(parent) => parent.add_child_group(child_id.clone()),
                None => self.root_groups.push(child_id.clone()),
            }
        }
        for child_id in group.children_entities() {
            if let Some(child) = self.entities.get_mut(child_id) {
                child.parent = target.clone();
            }
            match target.as_ref().and_then(|t| self.groups.get_mut(t)) {
                Some(parent) => parent.add_child_entity(child_id.clone()),
                None => self.root_entities.push(child_id.clone()),
            }
        }
        Ok(())
    }

    /// Moves a group under a new parent (or the root when `None`).
    ///
    /// Rejects, leaving the tree unchanged, when the move would make the
    /// group a descendant of itself.
    pub fn reparent_group(&mut self, id: &GroupId, new_parent: Option<&GroupId>) -> Result<()> {
        if !self.groups.contains_key(id) {
            return Err(TracerError::UnknownGroup(id.to_string()));
        }
        if let Some(np) = new_parent {
            if !self.groups.contains_key(np) {
                return Err(TracerError::UnknownGroup(np.to_string()));
            }
            if np == id || self.is_descendant(np, id) {
                return Err(TracerError::CycleDetected(id.to_string()));
            }
        }
        let old_parent = self.groups[id].parent.clone();
        self.detach_group(id, old_parent.as_ref());
        let linked = match new_parent {
            Some(np) => {
                if let Some(parent) = self.groups.get_mut(np) {
                    parent.add_child_group(id.clone());
                }
                Some(np.clone())
            }
            None => {
                self.root_groups.push(id.clone());
                None
            }
        };
        if let Some(group) = self.groups.get_mut(id) {
            group.parent = linked;
        }
        Ok(())
    }

    /// Moves an entity under a new parent group (or the root when `None`).
    pub fn reparent_entity(&mut self, id: &EntityId, new_parent: Option<&GroupId>) -> Result<()> {
        if !self.entities.contains_key(id) {
            return Err(TracerError::UnknownEntity(id.to_string()));
        }
        if let Some(np) = new_parent {
            if !self.groups.contains_key(np) {
                return Err(TracerError::UnknownGroup(np.to_string()));
            }
        }
        let old_parent = self.entities[id].parent.clone();
        self.detach_entity(id, old_parent.as_ref());
        let linked = match new_parent {
            Some(np) => {
                if let Some(parent) = self.groups.get_mut(np) {
                    parent.add_child_entity(id.clone());
                }
                Some(np.clone())
            }
            None => {
                self.root_entities.push(id.clone());
                None
            }
        };
        if let Some(entity) = self.entities.get_mut(id) {
            entity.parent = linked;
        }
        Ok(())
    }

    /// Repositions a group within its current sibling list, relative to
    /// `anchor`. Parentage does not change.
    pub fn reorder_group(
        &mut self,
        id: &GroupId,
        anchor: &GroupId,
        placement: Placement,
    ) -> Result<()> {
        let parent = self
            .groups
            .get(id)
            .ok_or_else(|| TracerError::UnknownGroup(id.to_string()))?
            .parent
            .clone();
        let anchor_parent = self
            .groups
            .get(anchor)
            .ok_or_else(|| TracerError::UnknownGroup(anchor.to_string()))?
            .parent
            .clone();
        if parent != anchor_parent {
            return Err(TracerError::NotSiblings(id.to_string(), anchor.to_string()));
        }
        let list = match parent.as_ref().and_then(|p| self.groups.get_mut(p)) {
            Some(group) => group.children_groups_mut(),
            None => &mut self.root_groups,
        };
        if reorder_in(list, id, anchor, placement) {
            Ok(())
        } else {
            Err(TracerError::NotSiblings(id.to_string(), anchor.to_string()))
        }
    }

    /// Repositions an entity within its current sibling list, relative to
    /// `anchor`. Parentage does not change.
    pub fn reorder_entity(
        &mut self,
        id: &EntityId,
        anchor: &EntityId,
        placement: Placement,
    ) -> Result<()> {
        let parent = self
            .entities
            .get(id)
            .ok_or_else(|| TracerError::UnknownEntity(id.to_string()))?
            .parent
            .clone();
        let anchor_parent = self
            .entities
            .get(anchor)
            .ok_or_else(|| TracerError::UnknownEntity(anchor.to_string()))?
            .parent
            .clone();
        if parent != anchor_parent {
            return Err(TracerError::NotSiblings(id.to_string(), anchor.to_string()));
        }
        let list = match parent.as_ref().and_then(|p| self.groups.get_mut(p)) {
            Some(group) => group.children_entities_mut(),
            None => &mut self.root_entities,
        };
        if reorder_in(list, id, anchor, placement) {
            Ok(())
        } else {
            Err(TracerError::NotSiblings(id.to_string(), anchor.to_string()))
        }
    }

    /// Returns true if `candidate` sits somewhere below `ancestor`.
    ///
    /// Walks `candidate`'s parent chain upward; strict (a group is not its
    /// own descendant).
    #[must_use]
    pub fn is_descendant(&self, candidate: &GroupId, ancestor: &GroupId) -> bool {
        let mut cursor = self.groups.get(candidate).and_then(|g| g.parent.clone());
        while let Some(current) = cursor {
            if &current == ancestor {
                return true;
            }
            cursor = self.groups.get(&current).and_then(|g| g.parent.clone());
        }
        false
    }

    /// Effective visibility of an entity: its own flag AND every ancestor
    /// group's flag. Pure helper for the external renderer.
    #[must_use]
    pub fn entity_effectively_visible(&self, id: &EntityId) -> bool {
        let Some(entity) = self.entities.get(id) else {
            return false;
        };
        entity.visible && self.chain_visible(entity.parent.as_ref())
    }

    /// Effective visibility of a group: its own flag AND every ancestor's.
    #[must_use]
    pub fn group_effectively_visible(&self, id: &GroupId) -> bool {
        let Some(group) = self.groups.get(id) else {
            return false;
        };
        group.visible && self.chain_visible(group.parent.as_ref())
    }

    /// Gets an entity by id.
    #[must_use]
    pub fn entity(&self, id: &EntityId) -> Option<&GeometryEntity> {
        self.entities.get(id)
    }

    /// Gets a mutable entity by id.
    pub fn entity_mut(&mut self, id: &EntityId) -> Option<&mut GeometryEntity> {
        self.entities.get_mut(id)
    }

    /// Gets a group by id.
    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&GeometryGroup> {
        self.groups.get(id)
    }

    /// Gets a mutable group by id.
    pub fn group_mut(&mut self, id: &GroupId) -> Option<&mut GeometryGroup> {
        self.groups.get_mut(id)
    }

    /// Ordered ids of parentless groups.
    #[must_use]
    pub fn root_groups(&self) -> &[GroupId] {
        &self.root_groups
    }

    /// Ordered ids of parentless entities.
    #[must_use]
    pub fn root_entities(&self) -> &[EntityId] {
        &self.root_entities
    }

    /// Iterates over all entities, in arbitrary order.
    pub fn entities(&self) -> impl Iterator<Item = &GeometryEntity> {
        self.entities.values()
    }

    /// Iterates over all groups, in arbitrary order.
    pub fn groups(&self) -> impl Iterator<Item = &GeometryGroup> {
        self.groups.values()
    }

    /// Total entity count.
    #[must_use]
    pub fn num_entities(&self) -> usize {
        self.entities.len()
    }

    /// Total group count.
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if the scene holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.entities.is_empty()
    }

    /// Removes every group and entity.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.entities.clear();
        self.root_groups.clear();
        self.root_entities.clear();
    }

    fn chain_visible<'a>(&'a self, mut cursor: Option<&'a GroupId>) -> bool {
        while let Some(id) = cursor {
            match self.groups.get(id) {
                Some(group) if group.visible => cursor = group.parent.as_ref(),
                _ => return false,
            }
        }
        true
    }

    fn link_group(&mut self, id: &GroupId, parent: Option<&GroupId>) -> Option<GroupId> {
        match parent {
            Some(p) => {
                if let Some(parent_group) = self.groups.get_mut(p) {
                    parent_group.add_child_group(id.clone());
                    Some(p.clone())
                } else {
                    log::warn!("parent group '{p}' not found; attaching group to root");
                    self.root_groups.push(id.clone());
                    None
                }
            }
            None => {
                self.root_groups.push(id.clone());
                None
            }
        }
    }

    fn link_entity(&mut self, id: &EntityId, parent: Option<&GroupId>) -> Option<GroupId> {
        match parent {
            Some(p) => {
                if let Some(parent_group) = self.groups.get_mut(p) {
                    parent_group.add_child_entity(id.clone());
                    Some(p.clone())
                } else {
                    log::warn!("parent group '{p}' not found; attaching entity to root");
                    self.root_entities.push(id.clone());
                    None
                }
            }
            None => {
                self.root_entities.push(id.clone());
                None
            }
        }
    }

    fn detach_group(&mut self, id: &GroupId, parent: Option<&GroupId>) {
        match parent.and_then(|p| self.groups.get_mut(p)) {
            Some(parent_group) => {
                parent_group.remove_child_group(id);
            }
            None => self.root_groups.retain(|g| g != id),
        }
    }

    fn detach_entity(&mut self, id: &EntityId, parent: Option<&GroupId>) {
        match parent.and_then(|p| self.groups.get_mut(p)) {
            Some(parent_group) => {
                parent_group.remove_child_entity(id);
            }
            None => self.root_entities.retain(|e| e != id),
        }
    }
}

fn reorder_in<T: PartialEq>(list: &mut Vec<T>, id: &T, anchor: &T, placement: Placement) -> bool {
    let Some(from) = list.iter().position(|x| x == id) else {
        return false;
    };
    let item = list.remove(from);
    let Some(anchor_pos) = list.iter().position(|x| x == anchor) else {
        list.insert(from, item);
        return false;
    };
    let to = match placement {
        Placement::Before => anchor_pos,
        Placement::After => anchor_pos + 1,
    };
    list.insert(to, item);
    true
}

//! Geometry group node.
//!
//! Groups organize entities and other groups into a tree. Children are held
//! as ordered id lists so sibling order survives reordering and export.
//! Visibility is a plain flag; effective visibility is computed by walking
//! the ancestor chain at render time, never stored denormalized.

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, GroupId};

/// A group node in the geometry scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryGroup {
    pub id: GroupId,
    pub parent: Option<GroupId>,
    pub name: String,
    pub visible: bool,
    children_groups: Vec<GroupId>,
    children_entities: Vec<EntityId>,
}

impl GeometryGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(id: GroupId, name: impl Into<String>, visible: bool) -> Self {
        Self {
            id,
            parent: None,
            name: name.into(),
            visible,
            children_groups: Vec::new(),
            children_entities: Vec::new(),
        }
    }

    /// Ordered child group ids.
    #[must_use]
    pub fn children_groups(&self) -> &[GroupId] {
        &self.children_groups
    }

    /// Ordered child entity ids.
    #[must_use]
    pub fn children_entities(&self) -> &[EntityId] {
        &self.children_entities
    }

    /// Appends a child group id.
    pub fn add_child_group(&mut self, id: GroupId) {
        self.children_groups.push(id);
    }

    /// Removes a child group id. Returns whether it was present.
    pub fn remove_child_group(&mut self, id: &GroupId) -> bool {
        let before = self.children_groups.len();
        self.children_groups.retain(|c| c != id);
        self.children_groups.len() != before
    }

    /// Appends a child entity id.
    pub fn add_child_entity(&mut self, id: EntityId) {
        self.children_entities.push(id);
    }

    /// Removes a child entity id. Returns whether it was present.
    pub fn remove_child_entity(&mut self, id: &EntityId) -> bool {
        let before = self.children_entities.len();
        self.children_entities.retain(|c| c != id);
        self.children_entities.len() != before
    }

    pub(crate) fn children_groups_mut(&mut self) -> &mut Vec<GroupId> {
        &mut self.children_groups
    }

    pub(crate) fn children_entities_mut(&mut self) -> &mut Vec<EntityId> {
        &mut self.children_entities
    }

    /// Returns true if this group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children_groups.is_empty() && self.children_entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_creation() {
        let group = GeometryGroup::new(GroupId::fresh(), "recordings", true);
        assert_eq!(group.name, "recordings");
        assert!(group.visible);
        assert!(group.is_empty());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut group = GeometryGroup::new(GroupId::fresh(), "g", true);
        let a = EntityId::fresh();
        let b = EntityId::fresh();
        group.add_child_entity(a.clone());
        group.add_child_entity(b.clone());
        assert_eq!(group.children_entities(), &[a, b]);
    }

    #[test]
    fn test_remove_child() {
        let mut group = GeometryGroup::new(GroupId::fresh(), "g", true);
        let child = GroupId::fresh();
        group.add_child_group(child.clone());
        assert!(group.remove_child_group(&child));
        assert!(!group.remove_child_group(&child));
        assert!(group.is_empty());
    }
}

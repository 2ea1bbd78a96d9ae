//! Geometry export/import.
//!
//! The export format is a parent-free tree snapshot: `{version: 1, items}`
//! where each item is either a group (with nested children) or an entity.
//! Import validates the whole payload before touching the scene graph, so a
//! malformed file never leaves partial state behind, and always mints fresh
//! ids so a re-import cannot collide with a live session.

use serde::{Deserialize, Serialize};

use livetracer_core::error::{Result, TracerError};

use crate::entity::{
    CoordinateSpace, EntityId, EntitySpec, GeometryData, GeometryEntity, GroupId, DEFAULT_COLOR,
};
use crate::scene::SceneGraph;

/// Export format version understood by this build.
pub const FORMAT_VERSION: u32 = 1;

/// The top-level export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryDocument {
    pub version: u32,
    pub items: Vec<GeometryNode>,
}

/// One node of the exported tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeometryNode {
    Group {
        name: String,
        #[serde(default = "default_true")]
        visible: bool,
        #[serde(default)]
        children: Vec<GeometryNode>,
    },
    Entity { entity: EntityPayload },
}

/// Wire shape of one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPayload {
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub coordinate_space: CoordinateSpace,
    #[serde(default = "default_true")]
    pub visible_if_outside_graph: bool,
    #[serde(flatten)]
    pub data: GeometryData,
}

fn default_true() -> bool {
    true
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_opacity() -> f64 {
    1.0
}

impl From<&GeometryEntity> for EntityPayload {
    fn from(entity: &GeometryEntity) -> Self {
        Self {
            name: entity.name.clone(),
            visible: entity.visible,
            color: entity.color.clone(),
            opacity: entity.opacity,
            coordinate_space: entity.coordinate_space,
            visible_if_outside_graph: entity.visible_outside_graph,
            data: entity.data.clone(),
        }
    }
}

/// What an import added to the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub groups: usize,
    pub entities: usize,
}

/// Serializes the whole scene, root order preserved, groups before loose
/// entities.
#[must_use]
pub fn export_scene(scene: &SceneGraph) -> GeometryDocument {
    let mut items = Vec::new();
    for group_id in scene.root_groups() {
        if let Some(node) = serialize_group(scene, group_id) {
            items.push(node);
        }
    }
    for entity_id in scene.root_entities() {
        if let Some(node) = serialize_entity(scene, entity_id) {
            items.push(node);
        }
    }
    GeometryDocument {
        version: FORMAT_VERSION,
        items,
    }
}

/// Serializes one group subtree. Returns `None` for a dangling id.
#[must_use]
pub fn serialize_group(scene: &SceneGraph, id: &GroupId) -> Option<GeometryNode> {
    let group = scene.group(id)?;
    let mut children = Vec::new();
    for child in group.children_groups() {
        if let Some(node) = serialize_group(scene, child) {
            children.push(node);
        }
    }
    for child in group.children_entities() {
        if let Some(node) = serialize_entity(scene, child) {
            children.push(node);
        }
    }
    Some(GeometryNode::Group {
        name: group.name.clone(),
        visible: group.visible,
        children,
    })
}

/// Serializes one entity. Returns `None` for a dangling id.
#[must_use]
pub fn serialize_entity(scene: &SceneGraph, id: &EntityId) -> Option<GeometryNode> {
    scene.entity(id).map(|entity| GeometryNode::Entity {
        entity: EntityPayload::from(entity),
    })
}

/// Serializes the scene to a JSON string.
pub fn export_json(scene: &SceneGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_scene(scene))?)
}

/// Imports a parsed document into the scene under the root, minting fresh
/// ids for every node.
pub fn import_document(scene: &mut SceneGraph, document: &GeometryDocument) -> Result<ImportReport> {
    if document.version != FORMAT_VERSION {
        return Err(TracerError::MalformedImport(format!(
            "unsupported version {}",
            document.version
        )));
    }
    let mut report = ImportReport::default();
    for item in &document.items {
        insert_node(scene, item, None, &mut report);
    }
    log::info!(
        "imported {} group(s) and {} entit(ies)",
        report.groups,
        report.entities
    );
    Ok(report)
}

/// Parses and imports a JSON export. A payload that fails to parse aborts
/// with zero side effects on the scene.
pub fn import_json(scene: &mut SceneGraph, json: &str) -> Result<ImportReport> {
    let document: GeometryDocument = serde_json::from_str(json)
        .map_err(|e| TracerError::MalformedImport(e.to_string()))?;
    import_document(scene, &document)
}

fn insert_node(
    scene: &mut SceneGraph,
    node: &GeometryNode,
    parent: Option<&GroupId>,
    report: &mut ImportReport,
) {
    match node {
        GeometryNode::Group {
            name,
            visible,
            children,
        } => {
            let id = scene.add_group(name.clone(), parent, *visible);
            report.groups += 1;
            for child in children {
                insert_node(scene, child, Some(&id), report);
            }
        }
        GeometryNode::Entity { entity } => {
            let mut spec = EntitySpec::new(entity.name.clone(), entity.data.clone())
                .color(entity.color.clone())
                .opacity(entity.opacity)
                .visible(entity.visible)
                .coordinate_space(entity.coordinate_space);
            spec.visible_outside_graph = entity.visible_if_outside_graph;
            if let Some(p) = parent {
                spec = spec.parent(p.clone());
            }
            scene.add_entity(spec);
            report.entities += 1;
        }
    }
}

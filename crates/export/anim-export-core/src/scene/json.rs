use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::Channel;
use crate::ids::NodeId;
use crate::scene::memory::MemoryScene;
use crate::scene::{Scene, SceneImporter};

/// Public API: parse a JSON scene dump into a [`MemoryScene`].
///
/// Notes:
/// - Nodes are registered in document order; `parent` names an earlier node.
/// - Curves name their node; duplicate node names resolve to the first node.
/// - Key times are frame numbers and are kept in document order.
/// - `root` optionally names the scene's own root node.
pub fn parse_scene_json(s: &str) -> Result<MemoryScene, String> {
    let doc: SceneDoc = serde_json::from_str(s).map_err(|e| format!("parse error: {e}"))?;

    let mut scene = MemoryScene::new();
    for node in doc.nodes {
        let parent = match node.parent.as_deref() {
            Some(name) => Some(
                scene
                    .find_node_by_name(name)
                    .ok_or_else(|| format!("node '{}' has unknown parent '{name}'", node.name))?,
            ),
            None => None,
        };
        scene.add_node(node.name, parent);
    }

    if let Some(root) = doc.root.as_deref() {
        let id = scene
            .find_node_by_name(root)
            .ok_or_else(|| format!("unknown root node '{root}'"))?;
        scene.set_root(id);
    }

    for stack in doc.stacks {
        let stack_id = scene.add_stack(stack.name);
        for layer in stack.layers {
            let layer_id = scene.add_layer(stack_id, layer.name);
            for curve in layer.curves {
                let node: NodeId = scene.find_node_by_name(&curve.node).ok_or_else(|| {
                    format!(
                        "curve {} targets unknown node '{}'",
                        curve.channel, curve.node
                    )
                })?;
                scene.set_curve(
                    node,
                    layer_id,
                    curve.channel,
                    curve.keys.into_iter().map(|k| (k.time, k.value)),
                );
            }
        }
    }

    Ok(scene)
}

/// Importer for JSON scene dumps.
///
/// `initialize` reads the file, `import` parses and validates it.
#[derive(Debug, Default)]
pub struct JsonSceneImporter {
    source: Option<(PathBuf, String)>,
}

impl JsonSceneImporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneImporter for JsonSceneImporter {
    type Scene = MemoryScene;

    fn initialize(&mut self, path: &Path) -> Result<(), String> {
        let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
        self.source = Some((path.to_path_buf(), text));
        Ok(())
    }

    fn import(&mut self) -> Result<MemoryScene, String> {
        let (_, text) = self
            .source
            .take()
            .ok_or_else(|| "importer was not initialized".to_string())?;
        parse_scene_json(&text)
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct SceneDoc {
    #[serde(default)]
    root: Option<String>,
    nodes: Vec<SdNode>,
    #[serde(default)]
    stacks: Vec<SdStack>,
}

#[derive(Debug, Deserialize)]
struct SdNode {
    name: String,
    #[serde(default)]
    parent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SdStack {
    name: String,
    #[serde(default)]
    layers: Vec<SdLayer>,
}

#[derive(Debug, Deserialize)]
struct SdLayer {
    name: String,
    #[serde(default)]
    curves: Vec<SdCurve>,
}

#[derive(Debug, Deserialize)]
struct SdCurve {
    node: String,
    channel: Channel,
    keys: Vec<SdKey>,
}

#[derive(Debug, Deserialize)]
struct SdKey {
    time: i64,
    value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::AnimCurve;

    const ARM: &str = r#"
    {
      "nodes": [
        { "name": "root" },
        { "name": "arm", "parent": "root" }
      ],
      "stacks": [
        {
          "name": "Armature|Wave",
          "layers": [
            {
              "name": "Base",
              "curves": [
                {
                  "node": "arm",
                  "channel": "rotateX",
                  "keys": [ { "time": 0, "value": 0.0 }, { "time": 24, "value": 90.0 } ]
                }
              ]
            }
          ]
        }
      ]
    }
    "#;

    #[test]
    fn parses_nodes_stacks_and_curves() {
        let scene = parse_scene_json(ARM).unwrap();
        assert_eq!(scene.node_count(), 2);
        assert_eq!(scene.child_count(NodeId(0)), 1);
        assert_eq!(scene.stack_count(), 1);
        assert_eq!(scene.stack_name(crate::ids::StackId(0)), Some("Armature|Wave"));

        let layer = scene.first_layer(crate::ids::StackId(0)).unwrap();
        let curve = scene.curve(NodeId(1), layer, Channel::RotateX).unwrap();
        assert_eq!(curve.key_count(), 2);
        assert_eq!(curve.key_value(1), 90.0);
        assert_eq!(scene.root_node(), None);
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = parse_scene_json(r#"{ "nodes": [ { "name": "a", "parent": "ghost" } ] }"#)
            .unwrap_err();
        assert!(err.contains("ghost"));
    }

    #[test]
    fn rejects_unknown_channel() {
        let json = r#"{
          "nodes": [ { "name": "a" } ],
          "stacks": [ { "name": "S", "layers": [ { "name": "L", "curves": [
            { "node": "a", "channel": "skewX", "keys": [] }
          ] } ] } ]
        }"#;
        assert!(parse_scene_json(json).unwrap_err().starts_with("parse error"));
    }

    #[test]
    fn rejects_curve_on_unknown_node() {
        let json = r#"{
          "nodes": [ { "name": "a" } ],
          "stacks": [ { "name": "S", "layers": [ { "name": "L", "curves": [
            { "node": "b", "channel": "scaleY", "keys": [] }
          ] } ] } ]
        }"#;
        assert!(parse_scene_json(json).unwrap_err().contains("'b'"));
    }

    #[test]
    fn parses_biped_fixture() {
        let json = anim_export_test_fixtures::scenes::json("biped-clips").unwrap();
        let scene = parse_scene_json(&json).unwrap();
        assert_eq!(scene.node_count(), 8);
        assert_eq!(scene.root_node(), scene.find_node_by_name("RootNode"));

        let hips = scene.find_node_by_name("hips").unwrap();
        assert_eq!(scene.child_count(hips), 3);
        assert_eq!(scene.node_parent(hips), scene.find_node_by_name("Armature"));

        let names: Vec<_> = scene.stacks().into_iter().map(|s| scene.stack_name(s)).collect();
        assert_eq!(
            names,
            vec![Some("Armature|Walk"), Some("Armature|Idle"), Some("T-Pose")]
        );
        assert_eq!(scene.first_layer(crate::ids::StackId(2)), None);
    }

    #[test]
    fn broken_parent_fixture_names_missing_node() {
        let json = anim_export_test_fixtures::scenes::json("broken-parent").unwrap();
        assert!(parse_scene_json(&json).unwrap_err().contains("Armature"));
    }

    #[test]
    fn import_without_initialize_fails() {
        let mut importer = JsonSceneImporter::new();
        assert!(importer.import().is_err());
    }
}

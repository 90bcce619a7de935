//! Scene loading and the clip table built on top of it.

use std::path::Path;

use log::{debug, info};

use crate::data::AnimationClip;
use crate::error::ExportError;
use crate::scene::{Scene, SceneImporter};
use crate::Result;

/// An imported scene together with the clips it exposes.
///
/// Clips refer to their animation stack by id, so renaming or removing a
/// clip never touches the scene itself.
#[derive(Debug)]
pub struct LoadedScene<S> {
    pub scene: S,
    clips: Vec<AnimationClip>,
}

impl<S: Scene> LoadedScene<S> {
    /// Build the clip table for an already imported scene.
    pub fn from_scene(scene: S) -> Self {
        let clips = scene
            .stacks()
            .into_iter()
            .map(|stack| {
                let original = scene.stack_name(stack).unwrap_or_default();
                let clip = AnimationClip::new(stack, original);
                debug!(
                    "clip {:?}: '{}' -> '{}'",
                    stack, clip.original_name, clip.display_name
                );
                clip
            })
            .collect();
        Self { scene, clips }
    }

    /// Clips in stack enumeration order.
    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    /// `(original_name, display_name)` pairs in clip order.
    pub fn clip_names(&self) -> Vec<(String, String)> {
        self.clips
            .iter()
            .map(|c| (c.original_name.clone(), c.display_name.clone()))
            .collect()
    }

    pub fn display_names(&self) -> Vec<String> {
        self.clips.iter().map(|c| c.display_name.clone()).collect()
    }

    /// First clip whose display name matches exactly.
    pub fn find_clip(&self, display_name: &str) -> Option<&AnimationClip> {
        self.clips.iter().find(|c| c.display_name == display_name)
    }

    /// Give the clip at `index` a new display name.
    pub fn rename_clip(&mut self, index: usize, display_name: impl Into<String>) -> Result<()> {
        let clip = self
            .clips
            .get_mut(index)
            .ok_or_else(|| ExportError::ClipNotFound {
                name: format!("#{index}"),
            })?;
        clip.display_name = display_name.into();
        Ok(())
    }

    /// Drop the clip at `index` from the table.
    pub fn remove_clip(&mut self, index: usize) -> Result<AnimationClip> {
        if index >= self.clips.len() {
            return Err(ExportError::ClipNotFound {
                name: format!("#{index}"),
            });
        }
        Ok(self.clips.remove(index))
    }
}

/// Open `path` with `importer` and enumerate its animation clips.
///
/// Initialization and import failures are reported separately and are
/// never retried.
pub fn load<I: SceneImporter>(mut importer: I, path: &Path) -> Result<LoadedScene<I::Scene>> {
    let shown = path.display().to_string();
    importer
        .initialize(path)
        .map_err(|reason| ExportError::SceneInitialize {
            path: shown.clone(),
            reason,
        })?;
    let scene = importer
        .import()
        .map_err(|reason| ExportError::SceneImport {
            path: shown.clone(),
            reason,
        })?;

    let loaded = LoadedScene::from_scene(scene);
    info!("loaded {} clip(s) from {}", loaded.clips.len(), shown);
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::StackId;
    use crate::scene::MemoryScene;

    struct FailingImporter {
        fail_init: bool,
    }

    impl SceneImporter for FailingImporter {
        type Scene = MemoryScene;

        fn initialize(&mut self, _path: &Path) -> std::result::Result<(), String> {
            if self.fail_init {
                Err("unreadable".into())
            } else {
                Ok(())
            }
        }

        fn import(&mut self) -> std::result::Result<MemoryScene, String> {
            Err("corrupt".into())
        }
    }

    fn two_clip_scene() -> MemoryScene {
        let mut scene = MemoryScene::new();
        scene.add_stack("Armature|Walk");
        scene.add_stack("Idle");
        scene
    }

    #[test]
    fn clip_table_strips_prefixes_in_order() {
        let loaded = LoadedScene::from_scene(two_clip_scene());
        assert_eq!(
            loaded.clip_names(),
            vec![
                ("Armature|Walk".to_string(), "Walk".to_string()),
                ("Idle".to_string(), "Idle".to_string()),
            ]
        );
        assert_eq!(loaded.find_clip("Walk").map(|c| c.stack), Some(StackId(0)));
        assert!(loaded.find_clip("Armature|Walk").is_none());
    }

    #[test]
    fn rename_and_remove_leave_scene_untouched() {
        let mut loaded = LoadedScene::from_scene(two_clip_scene());
        loaded.rename_clip(0, "Run").unwrap();
        assert_eq!(loaded.find_clip("Run").map(|c| c.stack), Some(StackId(0)));
        assert_eq!(loaded.scene.stack_name(StackId(0)), Some("Armature|Walk"));

        let removed = loaded.remove_clip(1).unwrap();
        assert_eq!(removed.display_name, "Idle");
        assert_eq!(loaded.display_names(), vec!["Run".to_string()]);
        assert!(loaded.remove_clip(5).is_err());
        assert!(loaded.rename_clip(3, "x").is_err());
    }

    #[test]
    fn init_and_import_failures_are_distinct() {
        let err = load(FailingImporter { fail_init: true }, Path::new("a.fbx")).unwrap_err();
        assert!(matches!(err, ExportError::SceneInitialize { .. }));

        let err = load(FailingImporter { fail_init: false }, Path::new("a.fbx")).unwrap_err();
        assert!(matches!(err, ExportError::SceneImport { ref reason, .. } if reason == "corrupt"));
    }
}

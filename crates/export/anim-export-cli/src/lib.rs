//! Command-line front end for anim-export-core.
//!
//! Loads a JSON scene dump, applies clip renames/skips, and exports one clip
//! or all remaining clips to `.anim` files.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use anim_export_core::{
    export_all_animations, export_single_animation, load, ExportConfig, JsonSceneImporter,
    LoadedScene, MemoryScene, MissingClipPolicy, RootPolicy,
};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List clips as: index, display name, (original name)
    List,
    /// Export one clip
    Export {
        #[arg(help = "Display name of the clip")]
        clip: String,
        #[arg(help = "Output .anim file")]
        dest: PathBuf,
    },
    /// Export every clip to <DIR>/<clip>.anim
    ExportAll {
        #[arg(help = "Output directory, created when missing")]
        dir: PathBuf,
    },
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "anim-export", version, about = "Export scene animation clips to .anim files")]
pub struct CliArgs {
    #[arg(help = "Path to the scene dump (.json)")]
    pub scene: PathBuf,
    #[command(subcommand)]
    pub command: Command,
    #[arg(long, global = true, help = "Load export settings from a JSON file")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Frame rate of the source keys")]
    pub from_fps: Option<u32>,
    #[arg(long, global = true, help = "Frame rate of the written file")]
    pub to_fps: Option<u32>,
    #[arg(
        long = "rename",
        global = true,
        value_name = "OLD=NEW",
        value_parser = parse_rename,
        help = "Rename a clip before exporting"
    )]
    pub renames: Vec<(String, String)>,
    #[arg(long = "skip", global = true, value_name = "CLIP", help = "Leave a clip out")]
    pub skips: Vec<String>,
    #[arg(long, global = true, help = "Fail when the requested clip does not exist")]
    pub strict: bool,
    #[arg(
        long,
        global = true,
        help = "Drop top-level nodes instead of the first animated bone"
    )]
    pub top_level_roots: bool,
}

fn parse_rename(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(old, new)| (old.to_string(), new.to_string()))
        .ok_or_else(|| format!("expected <old>=<new>, got '{s}'"))
}

impl CliArgs {
    /// Settings file (if any) overridden by command-line flags.
    pub fn export_config(&self) -> Result<ExportConfig> {
        let mut cfg = match &self.config {
            Some(path) => ExportConfig::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => ExportConfig::default(),
        };
        if let Some(fps) = self.from_fps {
            cfg.original_fps = fps;
        }
        if let Some(fps) = self.to_fps {
            cfg.target_fps = fps;
        }
        if self.strict {
            cfg.missing_clip = MissingClipPolicy::Error;
        }
        if self.top_level_roots {
            cfg.root_policy = RootPolicy::TopLevel;
        }
        Ok(cfg)
    }
}

/// Apply `--rename` then `--skip` to the clip table.
pub fn apply_clip_edits(loaded: &mut LoadedScene<MemoryScene>, args: &CliArgs) -> Result<()> {
    for (old, new) in &args.renames {
        let index = clip_index(loaded, old)?;
        loaded.rename_clip(index, new.clone())?;
        info!("renamed clip '{old}' -> '{new}'");
    }
    for name in &args.skips {
        let index = clip_index(loaded, name)?;
        loaded.remove_clip(index)?;
        info!("skipping clip '{name}'");
    }
    Ok(())
}

fn clip_index(loaded: &LoadedScene<MemoryScene>, name: &str) -> Result<usize> {
    loaded
        .clips()
        .iter()
        .position(|c| c.display_name == name)
        .ok_or_else(|| anyhow!("no clip named '{name}'"))
}

/// Run a parsed command, writing user-facing output to `out`.
pub fn run<W: Write>(args: &CliArgs, out: &mut W) -> Result<()> {
    let cfg = args.export_config()?;
    let mut loaded = load(JsonSceneImporter::new(), &args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;
    apply_clip_edits(&mut loaded, args)?;

    match &args.command {
        Command::List => {
            for (i, clip) in loaded.clips().iter().enumerate() {
                writeln!(out, "{i}\t{}\t({})", clip.display_name, clip.original_name)?;
            }
        }
        Command::Export { clip, dest } => {
            let summary = export_single_animation(clip, dest, &loaded, &cfg)
                .with_context(|| format!("failed to export clip '{clip}'"))?;
            writeln!(
                out,
                "{} -> {} ({} curves, frames {}..{})",
                summary.clip,
                summary.path.display(),
                summary.curves,
                summary.range.start_time,
                summary.range.end_time
            )?;
        }
        Command::ExportAll { dir } => {
            let names = loaded.display_names();
            let summaries = export_all_animations(&names, dir, &loaded, &cfg)
                .with_context(|| format!("failed to export clips to {}", dir.display()))?;
            for summary in &summaries {
                writeln!(
                    out,
                    "{} -> {} ({} curves)",
                    summary.clip,
                    summary.path.display(),
                    summary.curves
                )?;
            }
        }
    }
    Ok(())
}

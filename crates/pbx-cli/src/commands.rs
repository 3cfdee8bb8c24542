use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{self, Path};

use anyhow::{bail, Context};
use colored::Colorize;
use pbx_objects::{GroupAddingOptions, PbxProj, ProjectEncoder, SourceTree};
use pbx_plist::PlistValue;
use pbx_store::Reference;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load_or_default(cli.config.as_deref())?;
    match cli.command {
        Command::Render(args) => cmd_render(args, &cli.format, &config),
        Command::Tree(args) => cmd_tree(args, &cli.format),
        Command::AddGroup(args) => cmd_add_group(args, &cli.format, &config),
        Command::AddFile(args) => cmd_add_file(args, &cli.format, &config),
    }
}

fn cmd_render(args: RenderArgs, format: &OutputFormat, config: &CliConfig) -> anyhow::Result<()> {
    let proj = load_project(&args.project)?;
    emit(&proj, format, config, args.output.as_deref())
}

fn cmd_tree(args: TreeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let proj = load_project(&args.project)?;
    let tree = group_tree(&proj)?;
    match format {
        OutputFormat::Text => print!("{}", render_tree(&tree)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
    }
    Ok(())
}

fn cmd_add_group(args: AddGroupArgs, format: &OutputFormat, config: &CliConfig) -> anyhow::Result<()> {
    let mut proj = load_project(&args.project)?;
    let parent = find_group(&proj, args.parent.as_deref())?;
    let options = GroupAddingOptions {
        without_folder: args.without_folder,
    };
    let created = proj
        .add_group(&parent, &args.name, options)
        .with_context(|| format!("adding group {}", args.name))?;
    emit(&proj, format, config, args.output.as_deref())?;
    for group in &created {
        eprintln!("{} Added group {}", "✓".green().bold(), group.value().yellow());
    }
    Ok(())
}

fn cmd_add_file(args: AddFileArgs, format: &OutputFormat, config: &CliConfig) -> anyhow::Result<()> {
    let mut proj = load_project(&args.project)?;
    let group = find_group(&proj, args.group.as_deref())?;
    let source_root = match args.source_root.or_else(|| config.source_root.clone()) {
        Some(root) => path::absolute(&root)
            .with_context(|| format!("resolving source root {}", root.display()))?,
        None => env::current_dir().context("resolving current directory")?,
    };
    let file = path::absolute(&args.file)
        .with_context(|| format!("resolving {}", args.file.display()))?;
    let source_tree = match args.source_tree {
        SourceTreeArg::Group => SourceTree::Group,
        SourceTreeArg::SourceRoot => SourceTree::SourceRoot,
        SourceTreeArg::Absolute => SourceTree::Absolute,
    };
    debug!(file = %file.display(), source_root = %source_root.display(), "adding file");
    let reference = proj
        .add_file(&group, &file, source_tree, &source_root)
        .with_context(|| format!("adding file {}", args.file.display()))?;
    emit(&proj, format, config, args.output.as_deref())?;
    eprintln!(
        "{} Added {} as {}",
        "✓".green().bold(),
        args.file.display().to_string().bold(),
        reference.value().yellow()
    );
    Ok(())
}

fn load_project(path: &Path) -> anyhow::Result<PbxProj> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading project {}", path.display()))?;
    let value: PlistValue = serde_json::from_str(&text)
        .with_context(|| format!("parsing project JSON {}", path.display()))?;
    let proj = PbxProj::decode(&value)
        .with_context(|| format!("decoding project {}", path.display()))?;
    info!(objects = proj.objects().len(), path = %path.display(), "loaded project");
    Ok(proj)
}

/// Write the document as pbxproj text or as JSON.
fn emit(
    proj: &PbxProj,
    format: &OutputFormat,
    config: &CliConfig,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let text = match format {
        OutputFormat::Text => ProjectEncoder::new(config.encoder.clone()).encode(proj),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&proj.to_plist())?;
            json.push('\n');
            json
        }
    };
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote project");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Walk a slash-separated group path from the main group.
fn find_group(proj: &PbxProj, path: Option<&str>) -> anyhow::Result<Reference> {
    let mut current = proj.root_group().context("locating main group")?;
    for segment in path.unwrap_or("").split('/').filter(|s| !s.is_empty()) {
        current = match proj.group_named(&current, segment) {
            Some(group) => group,
            None => bail!("no group named {segment:?} under {}", current.value()),
        };
    }
    Ok(current)
}

#[derive(Debug, Serialize)]
struct TreeNode {
    id: String,
    label: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
}

fn group_tree(proj: &PbxProj) -> anyhow::Result<TreeNode> {
    let root = proj.root_group().context("locating main group")?;
    let mut visited = HashSet::new();
    Ok(tree_node(proj, &root, &mut visited))
}

fn tree_node(proj: &PbxProj, reference: &Reference, visited: &mut HashSet<Reference>) -> TreeNode {
    let label = proj
        .objects()
        .object(reference)
        .ok()
        .and_then(|object| object.file_element().and_then(|e| e.file_name()).or(object.display_label()))
        .map(str::to_string);
    let mut node = TreeNode {
        id: reference.value().to_string(),
        label,
        children: Vec::new(),
    };
    if !visited.insert(reference.clone()) {
        return node;
    }
    let children = proj
        .objects()
        .object(reference)
        .ok()
        .and_then(|object| object.children())
        .unwrap_or_default();
    node.children = children
        .iter()
        .map(|child| tree_node(proj, child, visited))
        .collect();
    node
}

fn render_tree(root: &TreeNode) -> String {
    let mut out = String::new();
    render_node(root, 0, &mut out);
    out
}

fn render_node(node: &TreeNode, depth: usize, out: &mut String) {
    let label = node.label.as_deref().unwrap_or("(unnamed)");
    let marker = if node.children.is_empty() { "" } else { "/" };
    out.push_str(&format!(
        "{}{}{} {}\n",
        "  ".repeat(depth),
        label,
        marker,
        node.id.dimmed()
    ));
    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PROJECT: &str = r#"{
        "archiveVersion": "1",
        "classes": {},
        "objectVersion": "46",
        "objects": {
            "ROOT": {"isa": "PBXProject", "mainGroup": "MAIN"},
            "MAIN": {"isa": "PBXGroup", "children": ["SRC"], "sourceTree": "<group>"},
            "SRC": {"isa": "PBXGroup", "children": ["FR_MAIN"], "path": "Sources", "sourceTree": "<group>"},
            "FR_MAIN": {"isa": "PBXFileReference", "lastKnownFileType": "sourcecode.swift", "path": "main.swift", "sourceTree": "<group>"}
        },
        "rootObject": "ROOT"
    }"#;

    fn workspace() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("project.json");
        fs::write(&project, PROJECT).unwrap();
        (dir, project)
    }

    #[test]
    fn render_to_file() {
        let (dir, project) = workspace();
        let output = dir.path().join("project.pbxproj");
        cmd_render(
            RenderArgs { project, output: Some(output.clone()) },
            &OutputFormat::Text,
            &CliConfig::default(),
        )
        .unwrap();
        let text = fs::read_to_string(output).unwrap();
        assert!(text.starts_with("// !$*UTF8*$!\n"));
        assert!(text.contains("rootObject = ROOT /* Project object */;"));
    }

    #[test]
    fn render_json_round_trips() {
        let (dir, project) = workspace();
        let output = dir.path().join("out.json");
        cmd_render(
            RenderArgs { project, output: Some(output.clone()) },
            &OutputFormat::Json,
            &CliConfig::default(),
        )
        .unwrap();
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        let original: serde_json::Value = serde_json::from_str(PROJECT).unwrap();
        assert_eq!(written, original);
    }

    #[test]
    fn add_group_under_parent() {
        let (dir, project) = workspace();
        let output = dir.path().join("out.json");
        cmd_add_group(
            AddGroupArgs {
                project,
                name: "Feature/Views".into(),
                parent: Some("Sources".into()),
                without_folder: false,
                output: Some(output.clone()),
            },
            &OutputFormat::Json,
            &CliConfig::default(),
        )
        .unwrap();

        let proj = load_project(&output).unwrap();
        let views = find_group(&proj, Some("Sources/Feature/Views")).unwrap();
        assert_eq!(proj.comment_for(&views).as_deref(), Some("Views"));
    }

    #[test]
    fn add_group_missing_parent_fails() {
        let (_dir, project) = workspace();
        let err = cmd_add_group(
            AddGroupArgs {
                project,
                name: "x".into(),
                parent: Some("Nope".into()),
                without_folder: false,
                output: None,
            },
            &OutputFormat::Text,
            &CliConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Nope"));
    }

    #[test]
    fn add_file_into_group() {
        let (dir, project) = workspace();
        let file = dir.path().join("Sources").join("util.swift");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "").unwrap();
        let output = dir.path().join("out.json");

        cmd_add_file(
            AddFileArgs {
                project,
                file: file.clone(),
                group: Some("Sources".into()),
                source_tree: SourceTreeArg::Group,
                source_root: Some(dir.path().to_path_buf()),
                output: Some(output.clone()),
            },
            &OutputFormat::Json,
            &CliConfig::default(),
        )
        .unwrap();

        let proj = load_project(&output).unwrap();
        let src = find_group(&proj, Some("Sources")).unwrap();
        assert!(proj.file_named(&src, "util.swift").is_some());
        assert!(proj.file_named(&src, "main.swift").is_some());
    }

    #[test]
    fn add_file_twice_with_relative_source_root() {
        let cwd = std::env::current_dir().unwrap();
        let dir = TempDir::new_in(&cwd).unwrap();
        let relative_root = dir.path().strip_prefix(&cwd).unwrap().to_path_buf();
        let project = dir.path().join("project.json");
        fs::write(&project, PROJECT).unwrap();
        let file = dir.path().join("Sources").join("util.swift");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "").unwrap();
        let output = dir.path().join("out.json");

        for input in [project, output.clone()] {
            cmd_add_file(
                AddFileArgs {
                    project: input,
                    file: file.clone(),
                    group: Some("Sources".into()),
                    source_tree: SourceTreeArg::Group,
                    source_root: Some(relative_root.clone()),
                    output: Some(output.clone()),
                },
                &OutputFormat::Json,
                &CliConfig::default(),
            )
            .unwrap();
        }

        let proj = load_project(&output).unwrap();
        let src = find_group(&proj, Some("Sources")).unwrap();
        let util = proj.file_named(&src, "util.swift").unwrap();
        let children = proj.object(&src).unwrap().children().unwrap();
        assert_eq!(children.iter().filter(|child| **child == util).count(), 1);
        assert_eq!(proj.file_references().count(), 2);
        assert_eq!(proj.comment_for(&util).as_deref(), Some("util.swift"));
    }

    #[test]
    fn add_missing_file_fails() {
        let (dir, project) = workspace();
        let err = cmd_add_file(
            AddFileArgs {
                project,
                file: dir.path().join("missing.swift"),
                group: None,
                source_tree: SourceTreeArg::Group,
                source_root: Some(dir.path().to_path_buf()),
                output: None,
            },
            &OutputFormat::Text,
            &CliConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("file not found"));
    }

    #[test]
    fn tree_lists_groups_and_files() {
        let (_dir, project) = workspace();
        let proj = load_project(&project).unwrap();
        let tree = group_tree(&proj).unwrap();
        assert_eq!(tree.id, "MAIN");
        assert_eq!(tree.children[0].label.as_deref(), Some("Sources"));
        assert_eq!(tree.children[0].children[0].label.as_deref(), Some("main.swift"));

        colored::control::set_override(false);
        let text = render_tree(&tree);
        assert_eq!(text, "(unnamed)/ MAIN\n  Sources/ SRC\n    main.swift FR_MAIN\n");
    }

    #[test]
    fn load_invalid_project_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(load_project(&path).is_err());
    }
}

//! Nested view over the flat folder and project lists.

use lexical_sort::lexical_cmp;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::project::{CutlistFolder, SavedCutlistProject};

/// A folder with its sub-folders and projects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderNode {
    pub folder: CutlistFolder,
    pub children: Vec<FolderNode>,
    pub projects: Vec<SavedCutlistProject>,
}

/// The whole folder hierarchy. Root-level projects sit beside root folders.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FolderTree {
    pub folders: Vec<FolderNode>,
    pub projects: Vec<SavedCutlistProject>,
}

impl FolderTree {
    /// Build the tree. Folders whose parent is missing are placed at the root,
    /// as are projects pointing at a missing folder.
    pub fn build(folders: &[CutlistFolder], projects: &[SavedCutlistProject]) -> Self {
        let known: HashSet<&str> = folders.iter().map(|f| f.id.as_str()).collect();

        let mut children: HashMap<Option<&str>, Vec<&CutlistFolder>> = HashMap::new();
        for folder in folders {
            let parent = folder
                .parent_id
                .as_deref()
                .filter(|p| known.contains(p) && *p != folder.id);
            children.entry(parent).or_default().push(folder);
        }
        for list in children.values_mut() {
            list.sort_by(|a, b| lexical_cmp(&a.name, &b.name));
        }

        let mut by_folder: HashMap<Option<&str>, Vec<SavedCutlistProject>> = HashMap::new();
        for project in projects {
            let folder = project.folder_id.as_deref().filter(|f| known.contains(f));
            by_folder.entry(folder).or_default().push(project.clone());
        }

        let mut visited = HashSet::new();
        let roots = build_level(None, &children, &mut by_folder, &mut visited);

        Self {
            folders: roots,
            projects: by_folder.remove(&None).unwrap_or_default(),
        }
    }

    /// Total number of folders in the tree.
    pub fn folder_count(&self) -> usize {
        fn count(nodes: &[FolderNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.folders)
    }
}

fn build_level<'a>(
    parent: Option<&'a str>,
    children: &HashMap<Option<&'a str>, Vec<&'a CutlistFolder>>,
    projects: &mut HashMap<Option<&'a str>, Vec<SavedCutlistProject>>,
    visited: &mut HashSet<&'a str>,
) -> Vec<FolderNode> {
    let Some(level) = children.get(&parent) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(level.len());
    for &folder in level {
        // parent links can form a cycle in a hand-edited store
        if !visited.insert(folder.id.as_str()) {
            continue;
        }
        let id = Some(folder.id.as_str());
        nodes.push(FolderNode {
            folder: folder.clone(),
            children: build_level(id, children, projects, visited),
            projects: projects.remove(&id).unwrap_or_default(),
        });
    }
    nodes
}

/// Breadcrumb chain from the root down to `folder_id` (inclusive).
///
/// Returns an empty list for an unknown folder.
pub fn folder_path<'a>(folders: &'a [CutlistFolder], folder_id: &str) -> Vec<&'a CutlistFolder> {
    let by_id: HashMap<&str, &CutlistFolder> =
        folders.iter().map(|f| (f.id.as_str(), f)).collect();

    let mut path = Vec::new();
    let mut seen = HashSet::new();
    let mut current = by_id.get(folder_id).copied();
    while let Some(folder) = current {
        if !seen.insert(folder.id.as_str()) {
            break;
        }
        path.push(folder);
        current = folder
            .parent_id
            .as_deref()
            .and_then(|p| by_id.get(p).copied());
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SavedCutlistData;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn folder(id: &str, name: &str, parent_id: Option<&str>) -> CutlistFolder {
        CutlistFolder {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
        }
    }

    fn project(id: &str, folder_id: Option<&str>) -> SavedCutlistProject {
        SavedCutlistProject {
            id: id.to_string(),
            name: id.to_string(),
            folder_id: folder_id.map(str::to_string),
            data: SavedCutlistData::default(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_nests_and_sorts() {
        let folders = vec![
            folder("F1", "kitchen", None),
            folder("F2", "Bathroom", None),
            folder("F3", "Upper cabinets", Some("F1")),
        ];
        let projects = vec![project("P1", Some("F3")), project("P2", None)];

        let tree = FolderTree::build(&folders, &projects);

        let names: Vec<_> = tree.folders.iter().map(|n| n.folder.name.as_str()).collect();
        assert_eq!(names, ["Bathroom", "kitchen"]);
        assert_eq!(tree.folders[1].children[0].folder.id, "F3");
        assert_eq!(tree.folders[1].children[0].projects[0].id, "P1");
        assert_eq!(tree.projects.len(), 1);
        assert_eq!(tree.projects[0].id, "P2");
        assert_eq!(tree.folder_count(), 3);
    }

    #[test]
    fn test_dangling_references_land_at_root() {
        let folders = vec![folder("F1", "Orphan", Some("gone"))];
        let projects = vec![project("P1", Some("deleted"))];

        let tree = FolderTree::build(&folders, &projects);

        assert_eq!(tree.folders.len(), 1);
        assert_eq!(tree.projects[0].id, "P1");
    }

    #[test]
    fn test_cycle_does_not_recurse_forever() {
        let folders = vec![folder("A", "A", Some("B")), folder("B", "B", Some("A"))];
        let tree = FolderTree::build(&folders, &[]);
        assert_eq!(tree.folder_count(), 0);
        assert_eq!(folder_path(&folders, "A").len(), 2);
    }

    #[test]
    fn test_folder_path() {
        let folders = vec![
            folder("F1", "Kitchen", None),
            folder("F2", "Upper", Some("F1")),
            folder("F3", "Doors", Some("F2")),
        ];
        let path: Vec<_> = folder_path(&folders, "F3")
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(path, ["Kitchen", "Upper", "Doors"]);
        assert!(folder_path(&folders, "missing").is_empty());
    }
}

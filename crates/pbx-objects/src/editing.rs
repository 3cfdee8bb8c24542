//! Group mutation: adding groups and files, and resolving element paths.
//!
//! Multi-step operations are not rolled back. A failure leaves every step
//! completed before it in place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pbx_store::{Narrow, Reference, StoreError, StoreObject};
use tracing::{debug, warn};

use crate::element::FileElement;
use crate::error::{ObjectsError, ObjectsResult};
use crate::file_reference::FileReference;
use crate::filetype;
use crate::group::Group;
use crate::object::PbxObject;
use crate::paths;
use crate::project::PbxProj;
use crate::source_tree::SourceTree;

/// Options for [`PbxProj::add_group`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupAddingOptions {
    /// Create virtual groups: set a name but no folder path.
    pub without_folder: bool,
}

impl PbxProj {
    /// Create nested groups for each `/`-separated segment of `path` under
    /// `parent`.
    ///
    /// Each new group is appended to the previous one's children (the first
    /// to `parent`'s). Returns the created groups, root to leaf. Empty
    /// segments are skipped.
    pub fn add_group(
        &mut self,
        parent: &Reference,
        path: &str,
        options: GroupAddingOptions,
    ) -> ObjectsResult<Vec<Reference>> {
        self.children_mut(parent)?;

        let mut created: Vec<Reference> = Vec::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let folder = (!options.without_folder).then(|| segment.to_string());
            let group = Group::new(FileElement::new(
                SourceTree::Group,
                Some(segment.to_string()),
                folder,
            ));
            let reference = self.add_object(PbxObject::Group(group));
            let owner = created.last().unwrap_or(parent).clone();
            self.children_mut(&owner)?.push(reference.clone());
            debug!(group = %reference, parent = %owner, name = segment, "added group");
            created.push(reference);
        }
        Ok(created)
    }

    /// Add the file at `path` to `group`, or reuse the existing reference to
    /// it.
    ///
    /// `path` must exist. An existing file reference whose full path equals
    /// `path` is reused: its path is rewritten relative to `group` when the
    /// group resolves to a folder, and it is appended to `group` unless it
    /// is already a child. Otherwise a new file reference is created with a
    /// path computed for `source_tree` and a file type taken from the
    /// extension. The child list never gains a duplicate entry.
    ///
    /// Relative `path` and `source_root` are taken from the current
    /// directory. A new reference gets a `name` only when it differs from
    /// its path, and only `lastKnownFileType` is set, never
    /// `explicitFileType`; this matches what Xcode writes for files added
    /// through its navigator.
    pub fn add_file(
        &mut self,
        group: &Reference,
        path: &Path,
        source_tree: SourceTree,
        source_root: &Path,
    ) -> ObjectsResult<Reference> {
        self.children_mut(group)?;
        if !paths::exists(path) {
            return Err(ObjectsError::FileNotFound(path.to_path_buf()));
        }
        let file_path = paths::absolute(path)?;
        let source_root = paths::absolute(source_root)?;
        let source_root = source_root.as_path();
        let group_path = self.full_path(group, source_root);

        if let Some(existing) = self.file_reference_at(&file_path, source_root) {
            if let Some(group_path) = &group_path {
                let relative = paths::relative_to(&file_path, group_path);
                existing.object_mut::<FileElement, _>(self.objects_mut())?.path = Some(relative);
            }
            self.append_child(group, &existing)?;
            debug!(file = %existing, group = %group, "reused file reference");
            return Ok(existing);
        }

        let element_path = match source_tree {
            SourceTree::Group => group_path
                .as_deref()
                .map(|base| paths::relative_to(&file_path, base)),
            SourceTree::SourceRoot => Some(paths::relative_to(&file_path, source_root)),
            SourceTree::Absolute => Some(paths::to_document_string(&file_path)),
            _ => None,
        };
        let name = paths::last_component(&file_path).filter(|name| Some(name) != element_path.as_ref());

        let mut file = FileReference::new(FileElement::new(source_tree, name, element_path));
        file.last_known_file_type = paths::extension(&file_path)
            .and_then(filetype::file_type)
            .map(str::to_string);

        let reference = self.add_object(PbxObject::FileReference(file));
        self.append_child(group, &reference)?;
        debug!(file = %reference, group = %group, path = %file_path.display(), "added file");
        Ok(reference)
    }

    /// The first child group of `parent` whose name (or, without a name,
    /// last path component) is `name`.
    pub fn group_named(&self, parent: &Reference, name: &str) -> Option<Reference> {
        self.child_named::<Group>(parent, name)
    }

    /// The first file reference child of `parent` named `name`.
    pub fn file_named(&self, parent: &Reference, name: &str) -> Option<Reference> {
        self.child_named::<FileReference>(parent, name)
    }

    /// Resolve the filesystem path an element stands for.
    ///
    /// Group-relative elements are resolved through their parent groups,
    /// ending at `source_root` for a group without a parent. Returns `None`
    /// for source trees that cannot be resolved here, for dangling
    /// references, and when the parent chain loops.
    pub fn full_path(&self, reference: &Reference, source_root: &Path) -> Option<PathBuf> {
        let mut visited = HashSet::new();
        self.resolve_path(reference, source_root, &mut visited)
            .map(|path| paths::normalize(&path))
    }

    /// The first group, in identifier order, that lists `reference` as a
    /// child.
    pub fn parent_group(&self, reference: &Reference) -> Option<Reference> {
        self.objects()
            .iter()
            .find(|(_, object)| {
                object
                    .children()
                    .is_some_and(|children| children.contains(reference))
            })
            .map(|(id, _)| Reference::new(id.clone()))
    }

    fn resolve_path(
        &self,
        reference: &Reference,
        source_root: &Path,
        visited: &mut HashSet<Reference>,
    ) -> Option<PathBuf> {
        if !visited.insert(reference.clone()) {
            warn!(element = %reference, "cycle in group hierarchy");
            return None;
        }
        let element = match self.objects().object(reference) {
            Ok(object) => object.file_element()?,
            Err(_) => {
                warn!(element = %reference, "dangling reference");
                return None;
            }
        };
        let path = element.path.as_deref().unwrap_or("");
        match element.source_tree.clone().unwrap_or_default() {
            SourceTree::Absolute => element.path.as_ref().map(PathBuf::from),
            SourceTree::SourceRoot => Some(source_root.join(path)),
            SourceTree::Group => {
                let base = match self.parent_group(reference) {
                    Some(parent) => self.resolve_path(&parent, source_root, visited)?,
                    None => source_root.to_path_buf(),
                };
                Some(base.join(path))
            }
            _ => None,
        }
    }

    fn file_reference_at(&self, file_path: &Path, source_root: &Path) -> Option<Reference> {
        self.file_references()
            .map(|(reference, _)| reference)
            .find(|reference| self.full_path(reference, source_root).as_deref() == Some(file_path))
    }

    fn child_named<T>(&self, parent: &Reference, name: &str) -> Option<Reference>
    where
        T: Narrow<PbxObject>,
    {
        let children = self.objects().object(parent).ok()?.children()?;
        children
            .iter()
            .find(|child| {
                let Ok(object) = self.objects().object(child) else {
                    return false;
                };
                T::narrow(object).is_some()
                    && object.file_element().and_then(FileElement::file_name) == Some(name)
            })
            .cloned()
    }

    fn append_child(&mut self, group: &Reference, child: &Reference) -> ObjectsResult<()> {
        let children = self.children_mut(group)?;
        if !children.contains(child) {
            children.push(child.clone());
        }
        Ok(())
    }

    fn children_mut(&mut self, group: &Reference) -> ObjectsResult<&mut Vec<Reference>> {
        let object = self.objects_mut().object_mut(group)?;
        let found = object.isa().to_string();
        object.children_mut().ok_or_else(|| {
            ObjectsError::Store(StoreError::TypeMismatch {
                id: group.id().clone(),
                expected: Group::ISA,
                found,
            })
        })
    }
}

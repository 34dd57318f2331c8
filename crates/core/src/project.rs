//! Project folder access
//!
//! A GameMaker project keeps one folder per game object under `objects/`.
//! The quiz code lives in each object's `Create_0.gml` event file. This module
//! lists object folders, resolves and validates the event file path, and
//! overwrites it.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Folder inside a project that holds one subfolder per game object.
pub const OBJECTS_DIR: &str = "objects";

/// Event file that receives the generated quiz code.
pub const OBJECT_FILE: &str = "Create_0.gml";

/// Error type for project folder operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),

    #[error("Error when reading out the object folders: {0}")]
    ReadObjects(#[source] io::Error),

    #[error("Error while writing the file: {0}")]
    Write(#[source] io::Error),
}

/// Path of the `objects/` folder inside a project.
pub fn objects_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(OBJECTS_DIR)
}

/// List the object folders of a project
///
/// Returns the sorted names of all subdirectories of `<project_dir>/objects`.
/// Plain files are ignored.
pub fn list_objects(project_dir: &Path) -> Result<Vec<String>, ProjectError> {
    let objects_path = objects_dir(project_dir);

    if !objects_path.is_dir() {
        return Err(ProjectError::FolderNotFound(
            objects_path.display().to_string(),
        ));
    }

    let mut objects = Vec::new();

    for entry in fs::read_dir(&objects_path).map_err(ProjectError::ReadObjects)? {
        let entry = entry.map_err(ProjectError::ReadObjects)?;

        if entry.path().is_dir() {
            objects.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    objects.sort();
    Ok(objects)
}

/// Build the event file path for an object
///
/// The object name must be a single plain path component so that a request
/// cannot escape the project's `objects/` folder.
pub fn object_file_path(project_dir: &Path, object_name: &str) -> Result<PathBuf, ProjectError> {
    validate_object_name(object_name)?;

    Ok(objects_dir(project_dir)
        .join(object_name)
        .join(OBJECT_FILE))
}

/// Build the event file path for an object and require that the file exists.
pub fn existing_object_file(
    project_dir: &Path,
    object_name: &str,
) -> Result<PathBuf, ProjectError> {
    let path = object_file_path(project_dir, object_name)?;

    if !path.is_file() {
        return Err(ProjectError::FileNotFound(path.display().to_string()));
    }

    Ok(path)
}

/// Overwrite an object's event file with new contents.
pub fn write_object_file(path: &Path, contents: &str) -> Result<(), ProjectError> {
    fs::write(path, contents).map_err(ProjectError::Write)
}

fn validate_object_name(name: &str) -> Result<(), ProjectError> {
    let mut components = Path::new(name).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(ProjectError::InvalidObjectName(name.to_string())),
    }
}

//! Loading the curriculum snapshot.

use crate::error::DataError;
use plansheet_types::CurriculumTree;
use std::fs;
use std::path::Path;

pub fn load_tree(json: &str) -> Result<CurriculumTree, DataError> {
    let tree = CurriculumTree::from_json(json)?;
    log::debug!(
        "Loaded curriculum tree with {} term(s) and {} week(s).",
        tree.terms.len(),
        tree.terms.iter().map(|t| t.weeks.len()).sum::<usize>()
    );
    Ok(tree)
}

pub fn load_tree_file<P: AsRef<Path>>(path: P) -> Result<CurriculumTree, DataError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_tree(&source)
}

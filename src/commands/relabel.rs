use crate::concordance::{self, ConcordanceField};
use crate::error::{Error, Result};
use crate::newick::write_newick_file;
use crate::nexus;
use std::path::{Path, PathBuf};

/// Reads the concordance factor tree and writes one relabeled Newick tree per
/// concordance field present in it.
///
/// Returns the paths of the written files (zero, one or two).
pub fn concord_to_newick(tree_file: &Path, output_prefix: &str) -> Result<Vec<PathBuf>> {
    let tree = nexus::read_tree(tree_file)?;
    log::debug!(
        "Read tree with {} leaves and {} internal vertices from {}",
        tree.num_leaves(),
        tree.num_internal(),
        tree_file.display()
    );

    let mut written = Vec::new();
    for field in ConcordanceField::ALL {
        let Some((view, count)) = concordance::relabeled(&tree, field) else {
            log::info!("No {} annotation found, skipping", field.key());
            continue;
        };

        let path = field.output_path(output_prefix);
        write_newick_file(&path, std::slice::from_ref(&view))
            .map_err(|err| Error::write(&path, err))?;
        log::info!(
            "Relabeled {} vertices with {} and wrote {}",
            count,
            field.key(),
            path.display()
        );
        written.push(path);
    }

    Ok(written)
}

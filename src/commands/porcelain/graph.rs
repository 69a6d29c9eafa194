//! Object graph export
//!
//! Walks the whole object graph reachable from HEAD through the store's read
//! interface and emits it in the Graphviz DOT language: commits as ellipses,
//! trees as triangles, blobs as boxes, tree edges labelled with entry names.
//! Rendering the text is left to external tooling (`dot -Tsvg`, etc.).

use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use colored::Colorize;
use std::collections::HashSet;
use std::io::Write;

impl Repository {
    pub fn graph(&self) -> anyhow::Result<()> {
        if self.refs().read_head()?.is_none() {
            writeln!(
                self.writer(),
                "{} no snapshots yet, nothing to graph",
                "warning:".yellow()
            )?;
            return Ok(());
        }

        writeln!(self.writer(), "digraph gil {{")?;

        // unchanged subtrees are shared between commits; emit each once
        let mut visited = HashSet::new();

        for item in self.history()? {
            let (commit_oid, commit) = item?;

            writeln!(self.writer(), "    \"{}\";", commit_oid.to_short_oid())?;
            writeln!(
                self.writer(),
                "    \"{}\" [shape=triangle];",
                commit.tree_oid().to_short_oid()
            )?;
            writeln!(
                self.writer(),
                "    \"{}\" -> \"{}\";",
                commit_oid.to_short_oid(),
                commit.tree_oid().to_short_oid()
            )?;

            self.graph_subtree(commit.tree_oid(), &mut visited)?;

            if let Some(parent_oid) = commit.parent() {
                writeln!(
                    self.writer(),
                    "    \"{}\" -> \"{}\";",
                    parent_oid.to_short_oid(),
                    commit_oid.to_short_oid()
                )?;
            }
        }

        writeln!(self.writer(), "}}")?;

        Ok(())
    }

    fn graph_subtree(
        &self,
        tree_oid: &ObjectId,
        visited: &mut HashSet<ObjectId>,
    ) -> anyhow::Result<()> {
        if !visited.insert(tree_oid.clone()) {
            return Ok(());
        }

        let tree = self
            .database()
            .parse_object_as_tree(tree_oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a tree", tree_oid))?;

        for entry in tree.entries() {
            match self.database().object_kind(entry.oid())? {
                ObjectKind::Tree => {
                    writeln!(
                        self.writer(),
                        "    \"{}\" [shape=triangle];",
                        entry.oid().to_short_oid()
                    )?;
                    self.graph_subtree(entry.oid(), visited)?;
                }
                ObjectKind::Blob => {
                    writeln!(
                        self.writer(),
                        "    \"{}\" [shape=box];",
                        entry.oid().to_short_oid()
                    )?;
                }
                ObjectKind::Commit => {
                    anyhow::bail!("tree {} references a commit object", tree_oid);
                }
            }

            writeln!(
                self.writer(),
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                tree_oid.to_short_oid(),
                entry.oid().to_short_oid(),
                entry.name().replace('"', "\\\"")
            )?;
        }

        Ok(())
    }
}

//! Install actions.
//!
//! Builtins with `install: true` queue an install target in the workspace.
//! The queue can be copied into a fresh bare workspace, which is what an
//! install step running after evaluation works from.

use crate::object::{obj_clone, CloneError, InstallTarget, Obj, Object};
use crate::path;
use crate::workspace::{Workspace, WorkspaceBuilder};

impl Workspace {
    /// Queue installing `src` into directory `dest_dir`.
    pub(crate) fn push_install_target(&mut self, src: &str, dest_dir: &str) -> Obj {
        let dest = path::join(dest_dir, path::basename(src));
        tracing::debug!(src, dest = %dest, "install target");
        let src = self.make_str(src);
        let dest = self.make_str(&dest);
        let tgt = self.make_obj(Object::InstallTarget(InstallTarget { src, dest }));
        let install = self.globals.install;
        self.array_push(install, tgt);
        tgt
    }

    /// `(source, destination)` pairs of every queued install target.
    pub fn install_plan(&self) -> Vec<(String, String)> {
        self.array_to_vec(self.globals.install)
            .into_iter()
            .map(|t| {
                let t = self.get_install_target(t);
                (self.str(t.src).to_string(), self.str(t.dest).to_string())
            })
            .collect()
    }

    /// Bare workspace holding only a copy of the install queue.
    pub fn export_install_plan(&self) -> Result<Workspace, CloneError> {
        let mut dest = WorkspaceBuilder::new()
            .buffered_diagnostics()
            .roots(&self.source_root, &self.build_root)
            .build_bare();
        let install = obj_clone(self, &mut dest, self.globals.install)?;
        dest.globals.install = install;
        Ok(dest)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "install plans in tests only hold cloneable objects")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn install_plan_survives_export() {
        let mut wk = Workspace::builder().buffered_diagnostics().build();
        wk.push_install_target("build/app", "/usr/local/bin");
        wk.push_install_target("src/data.txt", "/usr/local/share/app");

        let exported = wk.export_install_plan().unwrap();
        assert_eq!(
            exported.install_plan(),
            vec![
                ("build/app".to_string(), "/usr/local/bin/app".to_string()),
                ("src/data.txt".to_string(), "/usr/local/share/app/data.txt".to_string()),
            ]
        );
        assert!(exported.projects().is_empty());
    }
}

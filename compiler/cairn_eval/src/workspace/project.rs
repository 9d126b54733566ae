use cairn_data::Hash;

use super::Workspace;
use crate::object::Obj;

/// A project: the root build or one subproject.
pub struct Project {
    pub(crate) scope: Hash<String, Obj>,
    pub(crate) subproject_name: Option<String>,
    pub(crate) source_root: String,
    pub(crate) build_root: String,
    /// Directory of the build file being evaluated.
    pub(crate) cwd: String,
    pub(crate) build_dir: String,
    /// Directory holding subprojects, relative to `source_root`.
    pub(crate) subproject_dir: String,

    pub(crate) name: Obj,
    pub(crate) version: Obj,
    pub(crate) license: Obj,
    /// Project options, name to option object.
    pub(crate) opts: Obj,
    pub(crate) targets: Obj,
    pub(crate) tests: Obj,
    /// Section name to dict of summary entries.
    pub(crate) summary: Obj,
    pub(crate) initialized: bool,
    /// `name=value` option overrides from the parent's `subproject()` call,
    /// applied after the project's own defaults.
    pub(crate) pending_default_options: Vec<String>,
}

impl Project {
    pub(crate) fn new(
        wk: &mut Workspace,
        subproject_name: Option<&str>,
        cwd: &str,
        build_dir: &str,
    ) -> Self {
        let opts = wk.make_dict();
        let targets = wk.make_array();
        let tests = wk.make_array();
        let summary = wk.make_dict();
        Project {
            scope: Hash::new(),
            subproject_name: subproject_name.map(str::to_string),
            source_root: cwd.to_string(),
            build_root: build_dir.to_string(),
            cwd: cwd.to_string(),
            build_dir: build_dir.to_string(),
            subproject_dir: "subprojects".to_string(),
            name: Obj::NULL,
            version: Obj::NULL,
            license: Obj::NULL,
            opts,
            targets,
            tests,
            summary,
            initialized: false,
            pending_default_options: Vec::new(),
        }
    }

    pub fn subproject_name(&self) -> Option<&str> {
        self.subproject_name.as_deref()
    }

    pub fn is_subproject(&self) -> bool {
        self.subproject_name.is_some()
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn build_dir(&self) -> &str {
        &self.build_dir
    }

    pub fn source_root(&self) -> &str {
        &self.source_root
    }

    pub fn build_root(&self) -> &str {
        &self.build_root
    }

    /// Name string object, or null before `project()` ran.
    pub fn name(&self) -> Obj {
        self.name
    }

    pub fn version(&self) -> Obj {
        self.version
    }

    pub fn license(&self) -> Obj {
        self.license
    }

    /// Option name to option object.
    pub fn options(&self) -> Obj {
        self.opts
    }

    pub fn targets(&self) -> Obj {
        self.targets
    }

    pub fn tests(&self) -> Obj {
        self.tests
    }

    pub fn summary(&self) -> Obj {
        self.summary
    }

    pub fn variables(&self) -> &Hash<String, Obj> {
        &self.scope
    }
}

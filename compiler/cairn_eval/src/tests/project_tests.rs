//! Whole projects loaded through a frontend: `project()`, `subdir()`,
//! subprojects, options and the install plan.

use cairn_ir::{Arg, Ast, AstBuilder, NodeId};
use pretty_assertions::assert_eq;

use crate::frontend::MemoryFrontend;
use crate::workspace::Workspace;

fn tree(build: impl FnOnce(&mut AstBuilder) -> Vec<NodeId>) -> Ast {
    let mut b = AstBuilder::new();
    let stmts = build(&mut b);
    b.finish(stmts)
}

/// `project(name, version: version, ...extra)`
fn project_call(b: &mut AstBuilder, name: &str, version: &str, extra: Vec<Arg>) -> NodeId {
    let name = b.string(name);
    let v = b.string(version);
    let mut args = vec![Arg::Positional(name), b.kw("version", v)];
    args.extend(extra);
    b.call("project", args)
}

fn workspace(frontend: MemoryFrontend) -> Workspace {
    Workspace::builder()
        .buffered_diagnostics()
        .frontend(Box::new(frontend))
        .build()
}

fn messages(wk: &Workspace) -> Vec<String> {
    super::messages(wk)
}

fn project_var(wk: &Workspace, idx: usize, name: &str) -> String {
    let v = wk.projects()[idx].variables().get(name).copied().unwrap();
    wk.obj_to_s(v)
}

#[test]
fn first_statement_must_be_project() {
    let root = tree(|b| {
        let one = b.number(1);
        vec![b.assign("x", one)]
    });
    let mut wk = workspace(MemoryFrontend::new().with("/src/meson.build", "", root));

    assert!(wk.eval_project(None, "/src", "/build").is_err());
    assert_eq!(messages(&wk), vec!["first statement is not a call to project()"]);
}

#[test]
fn project_may_only_be_called_once() {
    let root = tree(|b| {
        let first = project_call(b, "demo", "1.0", vec![]);
        let second = project_call(b, "again", "1.0", vec![]);
        vec![first, second]
    });
    let mut wk = workspace(MemoryFrontend::new().with("/src/meson.build", "", root));

    assert!(wk.eval_project(None, "/src", "/build").is_err());
    assert_eq!(messages(&wk)[0], "project() may only be called once");
}

#[test]
fn missing_build_file() {
    let mut wk = workspace(MemoryFrontend::new());
    assert!(wk.eval_project(None, "/nowhere", "/build").is_err());
    assert_eq!(messages(&wk), vec!["file not found: /nowhere/meson.build"]);
}

#[test]
fn meson_version_requirement() {
    let root = tree(|b| {
        let req = b.string(">=99.0");
        let req = b.kw("meson_version", req);
        vec![project_call(b, "demo", "1.0", vec![req])]
    });
    let mut wk = workspace(MemoryFrontend::new().with("/src/meson.build", "", root));

    assert!(wk.eval_project(None, "/src", "/build").is_err());
    assert_eq!(messages(&wk)[0], "project requires version >=99.0, this is 1.3.0");
}

#[test]
fn subdir_evaluates_relative_to_its_directory() {
    let root = tree(|b| {
        let p = project_call(b, "demo", "1.0", vec![]);
        let sub = b.string("lib");
        let s = b.call("subdir", vec![Arg::Positional(sub)]);
        let meson = b.id("meson");
        let dir = b.method(meson, "current_source_dir", vec![]);
        let after = b.assign("after", dir);
        vec![p, s, after]
    });
    let lib = tree(|b| {
        let name = b.string("util");
        let src = b.string("util.c");
        let tgt = b.call("static_library", vec![Arg::Positional(name), Arg::Positional(src)]);
        let t = b.assign("util", tgt);
        let recv = b.id("util");
        let path = b.method(recv, "full_path", vec![]);
        let p = b.assign("util_path", path);
        let f = b.string("util.h");
        let files = b.call("files", vec![Arg::Positional(f)]);
        let h = b.assign("header", files);
        vec![t, p, h]
    });
    let frontend = MemoryFrontend::new()
        .with("/src/meson.build", "", root)
        .with("/src/lib/meson.build", "", lib);
    let mut wk = workspace(frontend);

    let idx = wk.eval_project(None, "/src", "/build").unwrap();
    assert_eq!(project_var(&wk, idx, "util_path"), "'/build/lib/libutil.a'");
    assert_eq!(project_var(&wk, idx, "header"), "[<file /src/lib/util.h>]");
    assert_eq!(project_var(&wk, idx, "after"), "'/src'");
}

#[test]
fn subproject_variables_and_caching() {
    let root = tree(|b| {
        let p = project_call(b, "demo", "1.0", vec![]);

        let name = b.string("zlib");
        let sp = b.call("subproject", vec![Arg::Positional(name)]);
        let a = b.assign("zlib", sp);

        let recv = b.id("zlib");
        let v = b.string("zlib_dep");
        let dep = b.method(recv, "get_variable", vec![Arg::Positional(v)]);
        let d = b.assign("dep", dep);

        let recv = b.id("dep");
        let version = b.method(recv, "version", vec![]);
        let v = b.assign("dep_version", version);

        let name = b.string("zlib");
        let again = b.call("subproject", vec![Arg::Positional(name)]);
        let g = b.assign("again", again);
        vec![p, a, d, v, g]
    });
    let sub = tree(|b| {
        let p = project_call(b, "zlib", "1.2.13", vec![]);
        let v = b.string("1.2.13");
        let v = b.kw("version", v);
        let dep = b.call("declare_dependency", vec![v]);
        let d = b.assign("zlib_dep", dep);
        vec![p, d]
    });
    let frontend = MemoryFrontend::new()
        .with("/src/meson.build", "", root)
        .with("/src/subprojects/zlib/meson.build", "", sub);
    let mut wk = workspace(frontend);

    let idx = wk.eval_project(None, "/src", "/build").unwrap();
    assert_eq!(wk.projects().len(), 2);
    assert_eq!(wk.projects()[1].subproject_name(), Some("zlib"));
    assert_eq!(wk.projects()[1].build_dir(), "/build/subprojects/zlib");
    assert_eq!(project_var(&wk, idx, "dep_version"), "'1.2.13'");

    let scope = wk.projects()[idx].variables();
    assert_eq!(scope.get("zlib"), scope.get("again"));
}

#[test]
fn missing_subproject_variable() {
    let root = tree(|b| {
        let p = project_call(b, "demo", "1.0", vec![]);
        let name = b.string("sub");
        let sp = b.call("subproject", vec![Arg::Positional(name)]);
        let v = b.string("nope");
        vec![p, b.method(sp, "get_variable", vec![Arg::Positional(v)])]
    });
    let sub = tree(|b| vec![project_call(b, "sub", "0.1", vec![])]);
    let frontend = MemoryFrontend::new()
        .with("/src/meson.build", "", root)
        .with("/src/subprojects/sub/meson.build", "", sub);
    let mut wk = workspace(frontend);

    assert!(wk.eval_project(None, "/src", "/build").is_err());
    assert_eq!(
        messages(&wk),
        vec!["subproject does not define 'nope'", "in method subproject.get_variable()"]
    );
}

#[test]
fn optional_subproject_not_found() {
    let root = tree(|b| {
        let p = project_call(b, "demo", "1.0", vec![]);
        let name = b.string("absent");
        let f = b.bool_lit(false);
        let req = b.kw("required", f);
        let sp = b.call("subproject", vec![Arg::Positional(name), req]);
        let found = b.method(sp, "found", vec![]);
        vec![p, b.assign("found", found)]
    });
    let mut wk = workspace(MemoryFrontend::new().with("/src/meson.build", "", root));

    let idx = wk.eval_project(None, "/src", "/build").unwrap();
    assert_eq!(project_var(&wk, idx, "found"), "false");
    assert!(messages(&wk).contains(&"subproject 'absent' could not be configured".to_string()));
}

#[test]
fn options_file_and_default_options() {
    let options = tree(|b| {
        let name = b.string("with_docs");
        let ty = b.string("boolean");
        let ty = b.kw("type", ty);
        let f = b.bool_lit(false);
        let value = b.kw("value", f);
        vec![b.call("option", vec![Arg::Positional(name), ty, value])]
    });
    let root = tree(|b| {
        let docs = b.string("with_docs=true");
        let lib = b.string("default_library=static");
        let defaults = b.array(&[docs, lib]);
        let defaults = b.kw("default_options", defaults);
        let p = project_call(b, "demo", "1.0", vec![defaults]);

        let name = b.string("with_docs");
        let opt = b.call("get_option", vec![Arg::Positional(name)]);
        let o = b.assign("docs", opt);

        let name = b.string("z");
        let src = b.string("z.c");
        let lib = b.call("library", vec![Arg::Positional(name), Arg::Positional(src)]);
        let path = b.method(lib, "full_path", vec![]);
        let l = b.assign("lib", path);
        vec![p, o, l]
    });
    let frontend = MemoryFrontend::new()
        .with("/src/meson_options.txt", "", options)
        .with("/src/meson.build", "", root);
    let mut wk = workspace(frontend);

    let idx = wk.eval_project(None, "/src", "/build").unwrap();
    assert_eq!(project_var(&wk, idx, "docs"), "true");
    assert_eq!(project_var(&wk, idx, "lib"), "'/build/libz.a'");
}

#[test]
fn install_plan_and_export() {
    let root = tree(|b| {
        let p = project_call(b, "demo", "1.0", vec![]);

        let name = b.string("app");
        let src = b.string("main.c");
        let t = b.bool_lit(true);
        let install = b.kw("install", t);
        let exe = b.call("executable", vec![Arg::Positional(name), Arg::Positional(src), install]);

        let data = b.string("data.txt");
        let dir = b.string("/usr/local/share/demo");
        let dir = b.kw("install_dir", dir);
        let inst = b.call("install_data", vec![Arg::Positional(data), dir]);
        vec![p, exe, inst]
    });
    let mut wk = workspace(MemoryFrontend::new().with("/src/meson.build", "", root));
    wk.eval_project(None, "/src", "/build").unwrap();

    let expected = vec![
        ("/build/app".to_string(), "/usr/local/bin/app".to_string()),
        ("/src/data.txt".to_string(), "/usr/local/share/demo/data.txt".to_string()),
    ];
    assert_eq!(wk.install_plan(), expected);

    let exported = wk.export_install_plan().unwrap();
    assert_eq!(exported.install_plan(), expected);
    assert!(exported.projects().is_empty());
}

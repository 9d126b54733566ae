#![allow(clippy::unwrap_used, reason = "helper inputs are built to succeed")]

use super::*;
use cairn_ir::{Ast, Source};
use pretty_assertions::assert_eq;

use crate::object::{BuildTarget, BuildTargetKind, ExternalProgram};

fn wk() -> Workspace {
    let mut wk = Workspace::builder().buffered_diagnostics().build();
    wk.make_project(None, "/src", "/build");
    wk
}

fn paths(wk: &Workspace, files: Obj) -> Vec<String> {
    wk.array_to_vec(files)
        .into_iter()
        .map(|f| wk.file_path(f).to_string())
        .collect()
}

#[test]
fn requirement_from_kwarg() {
    let mut wk = wk();
    let mut kw = Kwarg::new("required", TypeTag::BOOL | TypeTag::FEATURE_OPT);
    assert_eq!(coerce_requirement(&wk, &kw), Requirement::Required);

    kw.set = true;
    kw.val = wk.make_bool(false);
    assert_eq!(coerce_requirement(&wk, &kw), Requirement::Auto);

    kw.val = wk.make_obj(Object::FeatureOpt(FeatureState::Disabled));
    assert_eq!(coerce_requirement(&wk, &kw), Requirement::Skip);

    kw.val = wk.make_obj(Object::FeatureOpt(FeatureState::Enabled));
    assert_eq!(coerce_requirement(&wk, &kw), Requirement::Required);
}

#[test]
fn target_output_paths() {
    let mut wk = wk();
    let name = wk.make_str("z");
    let build_dir = wk.make_str("/build/sub");
    let empty = wk.make_array();
    let mut tgt = BuildTarget {
        name,
        kind: BuildTargetKind::StaticLibrary,
        sources: empty,
        deps: empty,
        include_dirs: empty,
        build_dir,
    };
    let lib = wk.make_obj(Object::BuildTarget(tgt));
    assert_eq!(build_target_path(&wk, lib), "/build/sub/libz.a");

    tgt.kind = BuildTargetKind::Executable;
    let exe = wk.make_obj(Object::BuildTarget(tgt));
    assert_eq!(build_target_path(&wk, exe), "/build/sub/z");
}

#[test]
fn files_are_relative_to_current_dir() {
    let mut wk = wk();
    let rel = wk.make_str("a.c");
    let abs = wk.make_str("/elsewhere/b.c");
    let file = wk.make_file("/src/c.c");
    let nested = wk.make_array_from(&[abs, file]);
    let input = wk.make_array_from(&[rel, nested]);

    let src = Source::internal("");
    let ast = Ast::empty();
    let mut interp = Interp::new(&mut wk, &src, &ast);
    let files = coerce_files(&mut interp, NodeId::DUMMY, input).unwrap();
    assert_eq!(
        paths(interp.wk, files),
        vec!["/src/a.c", "/elsewhere/b.c", "/src/c.c"]
    );
}

#[test]
fn files_reject_numbers() {
    let mut wk = wk();
    let n = wk.make_number(3);

    let src = Source::internal("");
    let ast = Ast::empty();
    let mut interp = Interp::new(&mut wk, &src, &ast);
    let res = coerce_files(&mut interp, NodeId::DUMMY, n);
    assert!(matches!(res, Err(CallHalt::Error(_))));
    assert_eq!(interp.wk.diagnostics().error_count(), 1);
}

#[test]
fn missing_program_is_not_executable() {
    let mut wk = wk();
    let name = wk.make_str("nope");
    let prog = wk.make_obj(Object::ExternalProgram(ExternalProgram {
        name,
        path: Obj::NULL,
        found: false,
    }));

    let src = Source::internal("");
    let ast = Ast::empty();
    let mut interp = Interp::new(&mut wk, &src, &ast);
    assert!(coerce_executable(&mut interp, NodeId::DUMMY, prog).is_err());
}

#[test]
fn env_from_strings_and_dicts() {
    let mut wk = wk();
    let a = wk.make_str("A=1");
    let b = wk.make_str("B=x=y");
    let list = wk.make_array_from(&[a, b]);
    let dict = wk.make_dict();
    let v = wk.make_str("2");
    wk.dict_set_str(dict, "C", v);

    let src = Source::internal("");
    let ast = Ast::empty();
    let mut interp = Interp::new(&mut wk, &src, &ast);
    assert_eq!(
        env_pairs(&mut interp, NodeId::DUMMY, list).unwrap(),
        vec![("A".to_string(), "1".to_string()), ("B".to_string(), "x=y".to_string())]
    );
    assert_eq!(
        env_pairs(&mut interp, NodeId::DUMMY, dict).unwrap(),
        vec![("C".to_string(), "2".to_string())]
    );

    let bad = interp.wk.make_str("novalue");
    assert!(env_pairs(&mut interp, NodeId::DUMMY, bad).is_err());
}

#[test]
fn no_project_is_an_error() {
    let mut wk = Workspace::builder().buffered_diagnostics().build();
    let src = Source::internal("");
    let ast = Ast::empty();
    let mut interp = Interp::new(&mut wk, &src, &ast);
    assert!(project_idx(&mut interp, NodeId::DUMMY).is_err());
}

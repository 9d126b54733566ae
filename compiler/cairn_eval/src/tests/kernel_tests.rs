//! Free functions: argument binding, disablers and the builtin kernel.

use std::cell::RefCell;
use std::rc::Rc;

use cairn_ir::{Arg, AstBuilder, NodeId};

use super::{messages, run, var, workspace};
use crate::command::{CommandOutput, CommandRunner, RunError};
use crate::object::{Obj, ObjType};
use crate::workspace::Workspace;

fn positional(ids: &[NodeId]) -> Vec<Arg> {
    ids.iter().map(|&id| Arg::Positional(id)).collect()
}

/// `name(strs...)`
fn call_strs(b: &mut AstBuilder, name: &str, strs: &[&str]) -> NodeId {
    let ids: Vec<NodeId> = strs.iter().map(|s| b.string(s)).collect();
    b.call(name, positional(&ids))
}

mod binding {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn invalid_kwarg() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let t = b.bool_lit(true);
            let bogus = b.kw("bogus", t);
            vec![b.call("declare_dependency", vec![bogus])]
        });
        assert!(res.is_err());
        assert_eq!(
            messages(&wk),
            vec!["invalid kwarg: 'bogus'", "in function declare_dependency()"]
        );
    }

    #[test]
    fn varargs_function_rejects_kwargs() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let f = b.string("a.c");
            let t = b.bool_lit(true);
            let bogus = b.kw("bogus", t);
            vec![b.call("files", vec![Arg::Positional(f), bogus])]
        });
        assert!(res.is_err());
        assert_eq!(
            messages(&wk),
            vec![
                "this function does not accept kwargs (signature: varargs)",
                "in function files()"
            ]
        );
    }

    #[test]
    fn kwarg_set_twice() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let name = b.string("x");
            let o1 = b.string("a");
            let o2 = b.string("b");
            let out1 = b.kw("output", o1);
            let out2 = b.kw("output", o2);
            vec![b.call("custom_target", vec![Arg::Positional(name), out1, out2])]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk)[0], "keyword argument 'output' set twice");
    }

    #[test]
    fn missing_required_kwarg() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let name = b.string("x");
            let o = b.string("out.c");
            let out = b.kw("output", o);
            vec![b.call("custom_target", vec![Arg::Positional(name), out])]
        });
        assert!(res.is_err());
        assert_eq!(
            messages(&wk),
            vec!["missing required kwarg: command", "in function custom_target()"]
        );
    }

    #[test]
    fn missing_and_extra_positionals() {
        let mut wk = workspace();
        assert!(run(&mut wk, |b| vec![b.call("is_variable", vec![])]).is_err());
        assert!(run(&mut wk, |b| vec![call_strs(b, "is_variable", &["a", "b"])]).is_err());
        assert_eq!(
            messages(&wk),
            vec![
                "missing arguments (signature: 1 positional)",
                "in function is_variable()",
                "too many arguments (signature: 1 positional)",
                "in function is_variable()",
            ]
        );
    }

    #[test]
    fn kwarg_before_positional() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let v = b.string("a");
            let k = b.kw("name", v);
            vec![b.call("is_variable", vec![k])]
        });
        assert!(res.is_err());
        assert_eq!(
            messages(&wk)[0],
            "unexpected kwarg before required arguments (signature: 1 positional)"
        );
    }

    #[test]
    fn kwargs_not_accepted() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let n = b.string("a");
            let v = b.number(1);
            let k = b.kw("extra", v);
            vec![b.call("is_variable", vec![Arg::Positional(n), k])]
        });
        assert!(res.is_err());
        assert_eq!(
            messages(&wk)[0],
            "this function does not accept kwargs (signature: 1 positional)"
        );
    }

    #[test]
    fn wrong_argument_type() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let n = b.number(1);
            vec![b.call("is_variable", vec![Arg::Positional(n)])]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["expected type str, got int", "in function is_variable()"]);
    }

    #[test]
    fn glob_flattens_nested_arrays() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let a = b.string("a.c");
            let bc = b.string("b.c");
            let c = b.string("/abs/c.c");
            let inner = b.array(&[c]);
            let outer = b.array(&[bc, inner]);
            let files = b.call("files", positional(&[a, outer]));
            vec![b.assign("srcs", files)]
        })
        .unwrap();
        assert_eq!(
            var(&wk, "srcs"),
            "[<file /src/a.c>, <file /src/b.c>, <file /abs/c.c>]"
        );
    }

    #[test]
    fn kwargs_dict_expands() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let name = b.string("app");
            let src = b.string("main.c");
            let key = b.string("install");
            let t = b.bool_lit(true);
            let d = b.dict(&[(key, t)]);
            let kwargs = b.kw("kwargs", d);
            vec![b.call("executable", vec![Arg::Positional(name), Arg::Positional(src), kwargs])]
        })
        .unwrap();
        assert_eq!(
            wk.install_plan(),
            vec![("/build/app".to_string(), "/usr/local/bin/app".to_string())]
        );
    }

    #[test]
    fn unknown_function() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| vec![b.call("nope", vec![])]);
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["function nope() not found"]);
    }
}

mod disabler {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn calls_with_disabled_arguments_are_disabled() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let d = b.call("disabler", vec![]);
            let a = b.assign("d", d);
            let dref = b.id("d");
            let f = b.call("files", positional(&[dref]));
            let x = b.assign("x", f);
            let xref = b.id("x");
            let is = b.call("is_disabler", positional(&[xref]));
            let y = b.assign("is", is);
            vec![a, x, y]
        })
        .unwrap();

        assert_eq!(wk.get_variable("x"), Some(Obj::DISABLER));
        assert_eq!(var(&wk, "is"), "true");
        assert!(messages(&wk).is_empty());
    }

    #[test]
    fn disabler_as_kwargs_dict() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let d = b.call("disabler", vec![]);
            let kwargs = b.kw("kwargs", d);
            let dep = b.call("declare_dependency", vec![kwargs]);
            vec![b.assign("x", dep)]
        })
        .unwrap();

        assert_eq!(wk.get_variable("x"), Some(Obj::DISABLER));
        assert!(messages(&wk).is_empty());
    }

    #[test]
    fn disabler_inside_array() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let one = b.number(1);
            let d = b.call("disabler", vec![]);
            let arr = b.array(&[one, d]);
            let is = b.call("is_disabler", positional(&[arr]));
            let a = b.assign("in_array", is);
            let s = b.string("plain");
            let is = b.call("is_disabler", positional(&[s]));
            let c = b.assign("plain", is);
            vec![a, c]
        })
        .unwrap();
        assert_eq!(var(&wk, "in_array"), "true");
        assert_eq!(var(&wk, "plain"), "false");
    }

    #[test]
    fn disabled_condition_skips_every_branch() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let d = b.call("disabler", vec![]);
            let v = b.string("then");
            let set = b.assign("branch", v);
            let then = b.block(vec![set]);
            let v = b.string("else");
            let set = b.assign("branch", v);
            let otherwise = b.block(vec![set]);
            vec![b.if_chain(&[(Some(d), then), (None, otherwise)])]
        })
        .unwrap();
        assert_eq!(wk.get_variable("branch"), None);
    }

    #[test]
    fn methods_on_disabler() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let d = b.call("disabler", vec![]);
            let found = b.method(d, "found", vec![]);
            let a = b.assign("found", found);
            let d = b.call("disabler", vec![]);
            let any = b.method(d, "anything_at_all", vec![]);
            let c = b.assign("any", any);
            vec![a, c]
        })
        .unwrap();
        assert_eq!(var(&wk, "found"), "false");
        assert_eq!(wk.get_variable("any"), Some(Obj::DISABLER));
    }

    #[test]
    fn operators_propagate_disabler() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let d = b.call("disabler", vec![]);
            let one = b.number(1);
            let sum = b.arith(cairn_ir::ArithOp::Add, d, one);
            let a = b.assign("sum", sum);
            let d = b.call("disabler", vec![]);
            let not = b.not(d);
            let c = b.assign("not", not);
            vec![a, c]
        })
        .unwrap();
        assert_eq!(wk.get_variable("sum"), Some(Obj::DISABLER));
        assert_eq!(wk.get_variable("not"), Some(Obj::DISABLER));
    }
}

mod variables {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_get_is_variable() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let name = b.string("dyn");
            let val = b.number(5);
            let set = b.call("set_variable", positional(&[name, val]));
            let got = call_strs(b, "get_variable", &["dyn"]);
            let g = b.assign("got", got);
            let missing = b.string("missing");
            let fallback = b.string("fallback");
            let dflt = b.call("get_variable", positional(&[missing, fallback]));
            let d = b.assign("default", dflt);
            let is = call_strs(b, "is_variable", &["missing"]);
            let i = b.assign("is", is);
            vec![set, g, d, i]
        })
        .unwrap();
        assert_eq!(var(&wk, "dyn"), "5");
        assert_eq!(var(&wk, "got"), "5");
        assert_eq!(var(&wk, "default"), "'fallback'");
        assert_eq!(var(&wk, "is"), "false");
    }

    #[test]
    fn get_undefined_variable() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| vec![call_strs(b, "get_variable", &["missing"])]);
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["undefined object", "in function get_variable()"]);
    }
}

mod builtins {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dependency_variables() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let k = b.string("prefix");
            let v = b.string("/opt");
            let vars = b.dict(&[(k, v)]);
            let vars = b.kw("variables", vars);
            let dep = b.call("declare_dependency", vec![vars]);
            let d = b.assign("dep", dep);

            let recv = b.id("dep");
            let name = b.string("prefix");
            let got = b.method(recv, "get_variable", vec![Arg::Positional(name)]);
            let p = b.assign("by_name", got);

            let recv = b.id("dep");
            let name = b.string("prefix");
            let internal = b.kw("internal", name);
            let got = b.method(recv, "get_variable", vec![internal]);
            let q = b.assign("by_internal", got);

            let recv = b.id("dep");
            let name = b.string("nope");
            let dflt = b.string("none");
            let dflt = b.kw("default_value", dflt);
            let got = b.method(recv, "get_variable", vec![Arg::Positional(name), dflt]);
            let r = b.assign("fallback", got);
            vec![d, p, q, r]
        })
        .unwrap();

        assert_eq!(var(&wk, "by_name"), "'/opt'");
        assert_eq!(var(&wk, "by_internal"), "'/opt'");
        assert_eq!(var(&wk, "fallback"), "'none'");

        let res = run(&mut wk, |b| {
            let recv = b.id("dep");
            let name = b.string("nope");
            vec![b.method(recv, "get_variable", vec![Arg::Positional(name)])]
        });
        assert!(res.is_err());
        assert_eq!(
            messages(&wk),
            vec!["dependency has no variable 'nope'", "in method dep.get_variable()"]
        );
    }

    #[test]
    fn range_builds_arrays() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let three = b.number(3);
            let r = b.call("range", positional(&[three]));
            vec![b.assign("r", r)]
        })
        .unwrap();
        assert_eq!(var(&wk, "r"), "[0, 1, 2]");
    }

    #[test]
    fn range_rejects_backwards_bounds() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let five = b.number(5);
            let two = b.number(2);
            vec![b.call("range", positional(&[five, two]))]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk)[0], "range stop must be >= start (5), got 2");
    }

    #[test]
    fn join_paths_restarts_at_absolute() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let j = call_strs(b, "join_paths", &["a", "b", "/c", "d"]);
            vec![b.assign("p", j)]
        })
        .unwrap();
        assert_eq!(var(&wk, "p"), "'/c/d'");
    }

    #[test]
    fn assert_and_error() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let f = b.bool_lit(false);
            let msg = b.string("boom");
            vec![b.call("assert", positional(&[f, msg]))]
        });
        assert!(res.is_err());

        let res = run(&mut wk, |b| {
            let s = b.string("bad");
            let n = b.number(1);
            vec![b.call("error", positional(&[s, n]))]
        });
        assert!(res.is_err());
        assert_eq!(
            messages(&wk),
            vec![
                "assertion failed: boom",
                "in function assert()",
                "bad 1",
                "in function error()",
            ]
        );
    }

    #[test]
    fn message_and_warning_are_reported() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let s = b.string("hello");
            let arr = b.array(&[s]);
            let m = b.call("message", positional(&[arr]));
            let w = call_strs(b, "warning", &["careful"]);
            vec![m, w]
        })
        .unwrap();
        assert_eq!(messages(&wk), vec!["['hello']", "careful"]);
        assert_eq!(wk.diagnostics().error_count(), 0);
    }

    #[test]
    fn configuration_data_methods() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let cfg = b.call("configuration_data", vec![]);
            let a = b.assign("cfg", cfg);

            let recv = b.id("cfg");
            let k = b.string("VERSION");
            let v = b.string("1.0");
            let set = b.method(recv, "set_quoted", positional(&[k, v]));

            let recv = b.id("cfg");
            let k = b.string("HAVE_X");
            let t = b.bool_lit(true);
            let set10 = b.method(recv, "set10", positional(&[k, t]));

            let recv = b.id("cfg");
            let keys = b.method(recv, "keys", vec![]);
            let ks = b.assign("keys", keys);

            let recv = b.id("cfg");
            let k = b.string("VERSION");
            let get = b.method(recv, "get", positional(&[k]));
            let g = b.assign("version", get);

            let recv = b.id("cfg");
            let k = b.string("NOPE");
            let has = b.method(recv, "has", positional(&[k]));
            let h = b.assign("has", has);
            vec![a, set, set10, ks, g, h]
        })
        .unwrap();

        assert_eq!(var(&wk, "keys"), "['HAVE_X', 'VERSION']");
        assert_eq!(var(&wk, "version"), "'\"1.0\"'");
        assert_eq!(var(&wk, "has"), "false");
    }

    #[test]
    fn library_follows_default_library() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let name = b.string("z");
            let src = b.string("z.c");
            let lib = b.call("library", positional(&[name, src]));
            let path = b.method(lib, "full_path", vec![]);
            let p = b.assign("shared", path);

            let name = b.string("z");
            let src = b.string("z.c");
            let both = b.call("both_libraries", positional(&[name, src]));
            let st = b.method(both, "get_static_lib", vec![]);
            let path = b.method(st, "full_path", vec![]);
            let s = b.assign("static", path);
            vec![p, s]
        })
        .unwrap();
        assert_eq!(var(&wk, "shared"), "'/build/libz.so'");
        assert_eq!(var(&wk, "static"), "'/build/libz.a'");
        assert_eq!(wk.array_len(wk.current_project().unwrap().targets()), 3);
    }

    #[test]
    fn custom_target_expands_placeholders() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let name = b.string("gen");
            let input = b.string("in.txt");
            let input = b.kw("input", input);
            let output = b.string("out.c");
            let output = b.kw("output", output);
            let cmd0 = b.string("/bin/cp");
            let cmd1 = b.string("@INPUT@");
            let cmd2 = b.string("@OUTPUT@");
            let cmd = b.array(&[cmd0, cmd1, cmd2]);
            let cmd = b.kw("command", cmd);
            let tgt = b.call("custom_target", vec![Arg::Positional(name), input, output, cmd]);
            let a = b.assign("tgt", tgt);
            let recv = b.id("tgt");
            let path = b.method(recv, "full_path", vec![]);
            let p = b.assign("out", path);
            vec![a, p]
        })
        .unwrap();

        assert_eq!(var(&wk, "out"), "'/build/out.c'");
        let tgt = wk.get_variable("tgt").unwrap();
        let command = wk.get_custom_target(tgt).command;
        assert_eq!(wk.obj_to_s(command), "['/bin/cp', '/src/in.txt', '/build/out.c']");
    }

    #[test]
    fn summary_groups_by_section() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let k = b.string("compiler");
            let v = b.string("cc");
            let first = b.call("summary", positional(&[k, v]));
            let k = b.string("debug");
            let v = b.bool_lit(true);
            let sect = b.string("Build");
            let sect = b.kw("section", sect);
            let second = b.call("summary", vec![Arg::Positional(k), Arg::Positional(v), sect]);
            vec![first, second]
        })
        .unwrap();
        let summary = wk.current_project().unwrap().summary();
        assert_eq!(wk.obj_to_s(summary), "{'': {'compiler': 'cc'}, 'Build': {'debug': true}}");
    }

    #[test]
    fn get_builtin_option() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let o = call_strs(b, "get_option", &["prefix"]);
            vec![b.assign("prefix", o)]
        })
        .unwrap();
        assert_eq!(var(&wk, "prefix"), "'/usr/local'");
    }
}

mod programs {
    use super::*;
    use pretty_assertions::assert_eq;

    type Calls = Rc<RefCell<Vec<(Vec<String>, Vec<(String, String)>)>>>;

    struct FakeRunner {
        calls: Calls,
        output: CommandOutput,
    }

    impl CommandRunner for FakeRunner {
        fn run(&mut self, argv: &[String], env: &[(String, String)]) -> Result<CommandOutput, RunError> {
            self.calls.borrow_mut().push((argv.to_vec(), env.to_vec()));
            Ok(self.output.clone())
        }
    }

    fn workspace_with_runner(status: i64, stdout: &str) -> (Workspace, Calls) {
        let calls = Calls::default();
        let runner = FakeRunner {
            calls: Rc::clone(&calls),
            output: CommandOutput {
                status,
                stdout: stdout.to_string(),
                stderr: "oops\n".to_string(),
            },
        };
        let mut wk = Workspace::builder()
            .buffered_diagnostics()
            .command_runner(Box::new(runner))
            .build();
        wk.make_project(None, "/src", "/build");
        (wk, calls)
    }

    #[test]
    fn run_command_captures_output() {
        let (mut wk, calls) = workspace_with_runner(0, "hi\n");
        run(&mut wk, |b| {
            let env = b.call("environment", vec![]);
            let e = b.assign("env", env);
            let recv = b.id("env");
            let k = b.string("PATH");
            let v = b.string("/a");
            let set = b.method(recv, "set", positional(&[k, v]));
            let recv = b.id("env");
            let k = b.string("PATH");
            let v = b.string("/b");
            let append = b.method(recv, "append", positional(&[k, v]));

            let exe = b.string("/bin/echo");
            let arg = b.string("hi");
            let env = b.id("env");
            let env = b.kw("env", env);
            let rc = b.call("run_command", vec![Arg::Positional(exe), Arg::Positional(arg), env]);
            let r = b.assign("r", rc);

            let recv = b.id("r");
            let out = b.method(recv, "stdout", vec![]);
            let o = b.assign("out", out);
            let recv = b.id("r");
            let code = b.method(recv, "returncode", vec![]);
            let c = b.assign("code", code);
            vec![e, set, append, r, o, c]
        })
        .unwrap();

        assert_eq!(var(&wk, "out"), "'hi\\n'");
        assert_eq!(var(&wk, "code"), "0");
        assert_eq!(
            *calls.borrow(),
            vec![(
                vec!["/bin/echo".to_string(), "hi".to_string()],
                vec![("PATH".to_string(), "/a:/b".to_string())]
            )]
        );
    }

    #[test]
    fn run_command_check_fails_on_nonzero() {
        let (mut wk, _calls) = workspace_with_runner(1, "");
        let res = run(&mut wk, |b| {
            let exe = b.string("/bin/false");
            let t = b.bool_lit(true);
            let check = b.kw("check", t);
            vec![b.call("run_command", vec![Arg::Positional(exe), check])]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk)[0], "command failed: 'oops'");
    }

    #[test]
    fn fuzz_unsafe_functions_can_be_disabled() {
        let mut wk = Workspace::builder()
            .buffered_diagnostics()
            .disable_fuzz_unsafe(true)
            .build();
        wk.make_project(None, "/src", "/build");
        let res = run(&mut wk, |b| vec![call_strs(b, "run_command", &["/bin/true"])]);
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["function run_command() is disabled"]);
    }

    #[test]
    fn find_program_honors_overrides() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let meson = b.id("meson");
            let name = b.string("tool");
            let files = call_strs(b, "files", &["tool.py"]);
            let zero = b.number(0);
            let file = b.index(files, zero);
            let ovr = b.method(meson, "override_find_program", positional(&[name, file]));
            let prog = call_strs(b, "find_program", &["tool"]);
            let path = b.method(prog, "full_path", vec![]);
            let p = b.assign("tool", path);
            vec![ovr, p]
        })
        .unwrap();
        assert_eq!(var(&wk, "tool"), "'/src/tool.py'");
    }

    #[test]
    fn optional_program_not_found() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let name = b.string("cairn-test-no-such-program");
            let f = b.bool_lit(false);
            let req = b.kw("required", f);
            let prog = b.call("find_program", vec![Arg::Positional(name), req]);
            let found = b.method(prog, "found", vec![]);
            vec![b.assign("found", found)]
        })
        .unwrap();
        assert_eq!(var(&wk, "found"), "false");
    }

    #[test]
    fn dependency_overrides_and_versions() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let v = b.string("1.2.0");
            let v = b.kw("version", v);
            let dep = b.call("declare_dependency", vec![v]);
            let meson = b.id("meson");
            let name = b.string("zlib");
            let ovr = b.method(meson, "override_dependency", positional(&[name, dep]));

            let name = b.string("zlib");
            let want = b.string(">=1.0");
            let want = b.kw("version", want);
            let dep = b.call("dependency", vec![Arg::Positional(name), want]);
            let found = b.method(dep, "found", vec![]);
            let ok = b.assign("ok", found);

            let name = b.string("zlib");
            let want = b.string(">=2.0");
            let want = b.kw("version", want);
            let f = b.bool_lit(false);
            let req = b.kw("required", f);
            let dep = b.call("dependency", vec![Arg::Positional(name), want, req]);
            let found = b.method(dep, "found", vec![]);
            let too_old = b.assign("too_old", found);
            vec![ovr, ok, too_old]
        })
        .unwrap();
        assert_eq!(var(&wk, "ok"), "true");
        assert_eq!(var(&wk, "too_old"), "false");
    }

    #[test]
    fn required_dependency_missing() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| vec![call_strs(b, "dependency", &["nothere"])]);
        assert!(res.is_err());
        assert_eq!(messages(&wk)[0], "dependency 'nothere' not found");
    }

    #[test]
    fn imports() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let fs = call_strs(b, "import", &["fs"]);
            let p = b.string("/abs");
            let abs = b.method(fs, "is_absolute", positional(&[p]));
            let a = b.assign("abs", abs);

            let name = b.string("nope");
            let f = b.bool_lit(false);
            let req = b.kw("required", f);
            let t = b.bool_lit(true);
            let dis = b.kw("disabler", t);
            let m = b.call("import", vec![Arg::Positional(name), req, dis]);
            let d = b.assign("missing", m);
            vec![a, d]
        })
        .unwrap();
        assert_eq!(var(&wk, "abs"), "true");
        assert_eq!(wk.get_variable("missing"), Some(Obj::DISABLER));

        let res = run(&mut wk, |b| vec![call_strs(b, "import", &["nope"])]);
        assert!(res.is_err());
        assert_eq!(messages(&wk)[0], "module 'nope' not found");
        assert_eq!(wk.obj_type(wk.get_variable("meson").unwrap()), ObjType::Meson);
    }
}

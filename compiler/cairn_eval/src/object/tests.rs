#![allow(clippy::unwrap_used, reason = "test values are known to be cloneable")]

use super::*;
use pretty_assertions::assert_eq;

fn wk() -> Workspace {
    Workspace::builder().buffered_diagnostics().build_bare()
}

fn strs(wk: &mut Workspace, vals: &[&str]) -> Obj {
    let objs: Vec<Obj> = vals.iter().map(|s| wk.make_str(s)).collect();
    wk.make_array_from(&objs)
}

#[test]
fn reserved_handles() {
    let wk = wk();
    assert_eq!(wk.obj_type(Obj::NULL), ObjType::Null);
    assert_eq!(wk.obj_type(Obj::DISABLER), ObjType::Disabler);
    assert!(Obj::NULL.is_null());
    assert!(!Obj::DISABLER.is_null());
}

mod array {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_and_index() {
        let mut wk = wk();
        let arr = strs(&mut wk, &["a", "b", "c"]);
        assert_eq!(wk.array_len(arr), 3);
        assert_eq!(wk.str(wk.array_index(arr, 0)), "a");
        assert_eq!(wk.str(wk.array_index(arr, 2)), "c");
        assert_eq!(wk.obj_to_s(arr), "['a', 'b', 'c']");
    }

    #[test]
    fn empty_array() {
        let mut wk = wk();
        let arr = wk.make_array();
        assert_eq!(wk.array_len(arr), 0);
        assert!(wk.array_to_vec(arr).is_empty());
        assert_eq!(wk.obj_to_s(arr), "[]");
    }

    #[test]
    fn dup_does_not_alias() {
        let mut wk = wk();
        let arr = strs(&mut wk, &["a"]);
        let dup = wk.array_dup(arr);
        let b = wk.make_str("b");
        wk.array_push(dup, b);
        assert_eq!(wk.array_len(arr), 1);
        assert_eq!(wk.array_len(dup), 2);
    }

    #[test]
    fn extend_into_empty_and_nonempty() {
        let mut wk = wk();
        let target = wk.make_array();
        let one = strs(&mut wk, &["x"]);
        wk.array_extend(target, one);
        assert_eq!(wk.obj_to_s(target), "['x']");

        let more = strs(&mut wk, &["y", "z"]);
        wk.array_extend(target, more);
        assert_eq!(wk.obj_to_s(target), "['x', 'y', 'z']");
        // `more` keeps its own nodes
        assert_eq!(wk.array_len(more), 2);

        let w = wk.make_str("w");
        wk.array_push(target, w);
        assert_eq!(wk.obj_to_s(target), "['x', 'y', 'z', 'w']");
        assert_eq!(wk.obj_to_s(more), "['y', 'z']");
    }

    #[test]
    fn flat_and_membership() {
        let mut wk = wk();
        let inner = strs(&mut wk, &["b", "c"]);
        let a = wk.make_str("a");
        let outer = wk.make_array_from(&[a, inner]);

        let flat: Vec<String> = wk.array_flat(outer).into_iter().map(|o| wk.str(o).to_string()).collect();
        assert_eq!(flat, vec!["a", "b", "c"]);

        let c = wk.make_str("c");
        let d = wk.make_str("d");
        assert!(wk.array_in(outer, c));
        assert!(!wk.array_in(outer, d));
    }

    #[test]
    fn contains_disabler_when_nested() {
        let mut wk = wk();
        let inner = wk.make_array_from(&[Obj::DISABLER]);
        let outer = wk.make_array_from(&[inner]);
        assert!(wk.array_contains_disabler(outer));
    }

    #[test]
    fn delete_rebuilds() {
        let mut wk = wk();
        let arr = strs(&mut wk, &["a", "b", "c"]);
        wk.array_del(arr, 1);
        assert_eq!(wk.obj_to_s(arr), "['a', 'c']");
        wk.array_del(arr, 0);
        wk.array_del(arr, 0);
        assert_eq!(wk.array_len(arr), 0);
    }

    #[test]
    fn join_rejects_non_strings() {
        let mut wk = wk();
        let arr = strs(&mut wk, &["a", "b"]);
        let joined = wk.array_join(arr, "-").unwrap();
        assert_eq!(wk.str(joined), "a-b");

        let n = wk.make_number(1);
        wk.array_push(arr, n);
        assert!(wk.array_join(arr, "-").is_none());
    }
}

mod dict {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insertion_order_and_overwrite() {
        let mut wk = wk();
        let d = wk.make_dict();
        let one = wk.make_number(1);
        let two = wk.make_number(2);
        let three = wk.make_number(3);
        wk.dict_set_str(d, "b", one);
        wk.dict_set_str(d, "a", two);
        wk.dict_set_str(d, "b", three);

        assert_eq!(wk.dict_len(d), 2);
        assert_eq!(wk.obj_to_s(d), "{'b': 3, 'a': 2}");
        assert_eq!(wk.dict_get(d, "b"), Some(three));
        assert_eq!(wk.dict_get(d, "missing"), None);
    }

    #[test]
    fn merge_leaves_operands_alone() {
        let mut wk = wk();
        let l = wk.make_dict();
        let r = wk.make_dict();
        let one = wk.make_number(1);
        let two = wk.make_number(2);
        wk.dict_set_str(l, "k", one);
        wk.dict_set_str(r, "k", two);
        wk.dict_set_str(r, "j", one);

        let merged = wk.dict_merge(l, r);
        assert_eq!(wk.obj_to_s(merged), "{'k': 2, 'j': 1}");
        assert_eq!(wk.obj_to_s(l), "{'k': 1}");
    }

    #[test]
    fn delete_key() {
        let mut wk = wk();
        let d = wk.make_dict();
        let v = wk.make_bool(true);
        wk.dict_set_str(d, "x", v);
        wk.dict_set_str(d, "y", v);
        wk.dict_del(d, "x");
        assert!(!wk.dict_contains(d, "x"));
        assert_eq!(wk.obj_to_s(d), "{'y': true}");
    }
}

mod equality {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn structural_for_containers() {
        let mut wk = wk();
        let a = strs(&mut wk, &["x", "y"]);
        let b = strs(&mut wk, &["x", "y"]);
        let c = strs(&mut wk, &["y", "x"]);
        assert!(wk.obj_equal(a, b));
        assert!(!wk.obj_equal(a, c));
    }

    #[test]
    fn dicts_ignore_order() {
        let mut wk = wk();
        let one = wk.make_number(1);
        let two = wk.make_number(2);
        let l = wk.make_dict();
        wk.dict_set_str(l, "a", one);
        wk.dict_set_str(l, "b", two);
        let r = wk.make_dict();
        wk.dict_set_str(r, "b", two);
        wk.dict_set_str(r, "a", one);
        assert!(wk.obj_equal(l, r));
    }

    #[test]
    fn files_and_strings_differ() {
        let mut wk = wk();
        let s = wk.make_str("a.c");
        let f = wk.make_file("a.c");
        assert!(!wk.obj_equal(s, f));
    }
}

mod display {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_strings() {
        let mut wk = wk();
        let s = wk.make_str("it's\n");
        assert_eq!(wk.obj_to_s(s), "'it\\'s\\n'");
        assert_eq!(wk.coerce_string(s).as_deref(), Some("it's\n"));
    }

    #[test]
    fn scalars() {
        let mut wk = wk();
        let n = wk.make_number(-4);
        let t = wk.make_bool(true);
        let f = wk.make_file("/src/a.c");
        assert_eq!(wk.obj_to_s(n), "-4");
        assert_eq!(wk.obj_to_s(t), "true");
        assert_eq!(wk.obj_to_s(f), "<file /src/a.c>");
        assert_eq!(wk.obj_to_s(Obj::DISABLER), "<disabler>");
        assert_eq!(wk.coerce_string(Obj::NULL), None);
    }
}

mod clone {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deep_copies_containers() {
        let mut src = wk();
        let inner = strs(&mut src, &["a"]);
        let d = src.make_dict();
        src.dict_set_str(d, "list", inner);

        let mut dest = wk();
        let copy = obj_clone(&src, &mut dest, d).unwrap();
        assert_eq!(dest.obj_to_s(copy), "{'list': ['a']}");
    }

    #[test]
    fn reserved_handles_clone_to_themselves() {
        let src = wk();
        let mut dest = wk();
        assert_eq!(obj_clone(&src, &mut dest, Obj::DISABLER).unwrap(), Obj::DISABLER);
        assert_eq!(obj_clone(&src, &mut dest, Obj::NULL).unwrap(), Obj::NULL);
    }

    #[test]
    fn meson_object_is_not_cloneable() {
        let mut src = wk();
        let meson = src.make_obj(Object::Meson);
        let mut dest = wk();
        assert_eq!(
            obj_clone(&src, &mut dest, meson),
            Err(CloneError::Unsupported("meson"))
        );
    }

    #[test]
    fn unalias_copies_arrays() {
        let mut wk = wk();
        let arr = strs(&mut wk, &["a"]);
        let copy = wk.obj_unalias(arr);
        assert_ne!(copy, arr);
        assert!(wk.obj_equal(copy, arr));
    }
}

mod persistent_array {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pushes_keep_order(vals in proptest::collection::vec(any::<i64>(), 0..64)) {
            let mut wk = wk();
            let arr = wk.make_array();
            for &v in &vals {
                let n = wk.make_number(v);
                wk.array_push(arr, n);
            }
            prop_assert_eq!(wk.array_len(arr) as usize, vals.len());
            let got: Vec<i64> = wk.array_to_vec(arr).into_iter().map(|o| wk.number(o)).collect();
            prop_assert_eq!(got, vals);
        }

        #[test]
        fn dup_is_isolated(first in 0..16usize, more in 1..16usize) {
            let mut wk = wk();
            let arr = wk.make_array();
            for i in 0..first {
                let n = wk.make_number(i as i64);
                wk.array_push(arr, n);
            }
            let copy = wk.array_dup(arr);
            for i in 0..more {
                let n = wk.make_number(i as i64);
                wk.array_push(arr, n);
            }
            prop_assert_eq!(wk.array_len(copy) as usize, first);
            prop_assert_eq!(wk.array_len(arr) as usize, first + more);
        }
    }

    #[test]
    fn flattening_is_depth_first() {
        let mut wk = wk();
        let one = wk.make_number(1);
        let two = wk.make_number(2);
        let three = wk.make_number(3);
        let innermost = wk.make_array_from(&[two]);
        let inner = wk.make_array_from(&[one, innermost]);
        let empty = wk.make_array();
        let outer = wk.make_array_from(&[inner, empty, three]);
        let flat: Vec<i64> = wk.array_flat(outer).into_iter().map(|o| wk.number(o)).collect();
        assert_eq!(flat, vec![1, 2, 3]);
    }
}

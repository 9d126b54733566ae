//! Expressions, assignment and control flow.

use cairn_ir::{Arg, ArithOp, CompareOp};

use super::{messages, run, var, workspace};

mod operators {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arithmetic_on_numbers() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let seven = b.number(7);
            let two = b.number(2);
            let div = b.arith(ArithOp::Div, seven, two);
            let a = b.assign("quot", div);
            let seven = b.number(7);
            let two = b.number(2);
            let rem = b.arith(ArithOp::Mod, seven, two);
            let m = b.assign("rem", rem);
            let five = b.number(5);
            let neg = b.neg(five);
            let n = b.assign("neg", neg);
            vec![a, m, n]
        })
        .unwrap();

        assert_eq!(var(&wk, "quot"), "3");
        assert_eq!(var(&wk, "rem"), "1");
        assert_eq!(var(&wk, "neg"), "-5");
    }

    #[test]
    fn divide_by_zero_is_an_error() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let one = b.number(1);
            let zero = b.number(0);
            vec![b.arith(ArithOp::Div, one, zero)]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["divide by 0"]);
    }

    #[test]
    fn overflow_is_an_error() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let max = b.number(i64::MAX);
            let one = b.number(1);
            vec![b.arith(ArithOp::Add, max, one)]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["integer overflow"]);
    }

    #[test]
    fn string_concat_and_path_join() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let l = b.string("foo");
            let r = b.string("bar");
            let cat = b.arith(ArithOp::Add, l, r);
            let a = b.assign("cat", cat);
            let l = b.string("a/b");
            let r = b.string("c");
            let joined = b.arith(ArithOp::Div, l, r);
            let j = b.assign("joined", joined);
            let l = b.string("a");
            let r = b.string("/abs");
            let abs = b.arith(ArithOp::Div, l, r);
            let k = b.assign("abs", abs);
            vec![a, j, k]
        })
        .unwrap();

        assert_eq!(var(&wk, "cat"), "'foobar'");
        assert_eq!(var(&wk, "joined"), "'a/b/c'");
        assert_eq!(var(&wk, "abs"), "'/abs'");
    }

    #[test]
    fn string_plus_number_is_a_type_error() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let s = b.string("abc");
            let a = b.assign("x", s);
            let x = b.id("x");
            let one = b.number(1);
            let sum = b.arith(ArithOp::Add, x, one);
            vec![a, b.assign("y", sum)]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["expected type str, got int"]);
        assert_eq!(wk.get_variable("y"), None);
    }

    #[test]
    fn string_minus_is_unsupported() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let l = b.string("a");
            let r = b.string("b");
            vec![b.arith(ArithOp::Sub, l, r)]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["str does not support -"]);
    }

    #[test]
    fn array_plus_does_not_touch_operand() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let one = b.number(1);
            let arr = b.array(&[one]);
            let a = b.assign("a", arr);
            let lhs = b.id("a");
            let two = b.number(2);
            let sum = b.arith(ArithOp::Add, lhs, two);
            let s = b.assign("b", sum);
            vec![a, s]
        })
        .unwrap();

        assert_eq!(var(&wk, "a"), "[1]");
        assert_eq!(var(&wk, "b"), "[1, 2]");
    }

    #[test]
    fn comparisons() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let x = b.string("x");
            let y = b.string("y");
            let x2 = b.string("x");
            let arr = b.array(&[y, x2]);
            let inn = b.compare(CompareOp::In, x, arr);
            let a = b.assign("in", inn);

            let k = b.string("k");
            let k2 = b.string("k");
            let one = b.number(1);
            let d = b.dict(&[(k2, one)]);
            let not_in = b.compare(CompareOp::NotIn, k, d);
            let c = b.assign("not_in", not_in);

            let three = b.number(3);
            let four = b.number(4);
            let lt = b.compare(CompareOp::Lt, three, four);
            let l = b.assign("lt", lt);

            let s1 = b.string("a");
            let one = b.number(1);
            let ne = b.compare(CompareOp::Ne, s1, one);
            let n = b.assign("ne", ne);
            vec![a, c, l, n]
        })
        .unwrap();

        assert_eq!(var(&wk, "in"), "true");
        assert_eq!(var(&wk, "not_in"), "false");
        assert_eq!(var(&wk, "lt"), "true");
        assert_eq!(var(&wk, "ne"), "true");
    }

    #[test]
    fn ordering_requires_numbers() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let s = b.string("a");
            let one = b.number(1);
            vec![b.compare(CompareOp::Gt, s, one)]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["expected type int, got str"]);
    }

    #[test]
    fn and_or_short_circuit() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            // The right side would fail if evaluated.
            let f = b.bool_lit(false);
            let undefined = b.id("undefined");
            let and = b.and(f, undefined);
            let a = b.assign("and", and);
            let t = b.bool_lit(true);
            let undefined = b.id("undefined");
            let or = b.or(t, undefined);
            let o = b.assign("or", or);
            vec![a, o]
        })
        .unwrap();

        assert_eq!(var(&wk, "and"), "false");
        assert_eq!(var(&wk, "or"), "true");
    }

    #[test]
    fn ternary_and_not() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let f = b.bool_lit(false);
            let cond = b.not(f);
            let yes = b.string("yes");
            let no = b.string("no");
            let t = b.ternary(cond, yes, no);
            vec![b.assign("pick", t)]
        })
        .unwrap();
        assert_eq!(var(&wk, "pick"), "'yes'");
    }

    #[test]
    fn stringify_values() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let n = b.number(12);
            let s = b.stringify(n);
            vec![b.assign("s", s)]
        })
        .unwrap();
        assert_eq!(var(&wk, "s"), "'12'");
    }
}

mod collections {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn indexing_counts_from_the_end() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let a = b.string("a");
            let z = b.string("z");
            let arr = b.array(&[a, z]);
            let minus_one = b.number(-1);
            let idx = b.index(arr, minus_one);
            let l = b.assign("last", idx);

            let s = b.string("hello");
            let one = b.number(1);
            let ch = b.index(s, one);
            let c = b.assign("ch", ch);
            vec![l, c]
        })
        .unwrap();

        assert_eq!(var(&wk, "last"), "'z'");
        assert_eq!(var(&wk, "ch"), "'e'");
    }

    #[test]
    fn index_out_of_bounds() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let a = b.string("a");
            let arr = b.array(&[a]);
            let two = b.number(2);
            vec![b.index(arr, two)]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk).len(), 1);
    }

    #[test]
    fn dict_lookup_and_missing_key() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let k = b.string("k");
            let v = b.string("v");
            let d = b.dict(&[(k, v)]);
            let a = b.assign("d", d);
            let d = b.id("d");
            let k = b.string("k");
            let got = b.index(d, k);
            let g = b.assign("got", got);
            let d = b.id("d");
            let missing = b.string("nope");
            let bad = b.index(d, missing);
            vec![a, g, bad]
        });

        assert!(res.is_err());
        assert_eq!(var(&wk, "got"), "'v'");
        assert_eq!(messages(&wk), vec!["key not in dictionary: 'nope'"]);
    }

    #[test]
    fn dict_duplicate_key() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let k1 = b.string("k");
            let v1 = b.number(1);
            let k2 = b.string("k");
            let v2 = b.number(2);
            vec![b.dict(&[(k1, v1), (k2, v2)])]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["key 'k' is duplicated"]);
    }

    #[test]
    fn keyword_in_array_literal() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let v = b.number(1);
            let arg = b.kw("k", v);
            vec![b.array_args(vec![arg])]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk).len(), 1);
    }

    #[test]
    fn positional_in_dict_literal() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let v = b.number(1);
            vec![b.dict_args(vec![Arg::Positional(v)])]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["non-kwarg not valid in dict constructor"]);
    }
}

mod assignment {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn assignment_copies_arrays() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let one = b.number(1);
            let arr = b.array(&[one]);
            let a = b.assign("a", arr);
            let a_ref = b.id("a");
            let c = b.assign("b", a_ref);
            let two = b.number(2);
            let push = b.array(&[two]);
            let p = b.plus_assign("b", push);
            vec![a, c, p]
        })
        .unwrap();

        assert_eq!(var(&wk, "a"), "[1]");
        assert_eq!(var(&wk, "b"), "[1, 2]");
    }

    #[test]
    fn plus_assign_on_strings_leaves_copies_alone() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let s = b.string("ab");
            let a = b.assign("a", s);
            let a_ref = b.id("a");
            let c = b.assign("b", a_ref);
            let more = b.string("cd");
            let p = b.plus_assign("b", more);
            let more = b.string("ef");
            let q = b.plus_assign("b", more);
            vec![a, c, p, q]
        })
        .unwrap();

        assert_eq!(var(&wk, "a"), "'ab'");
        assert_eq!(var(&wk, "b"), "'abcdef'");
    }

    #[test]
    fn plus_assign_merges_dicts() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let k = b.string("a");
            let v = b.number(1);
            let d = b.dict(&[(k, v)]);
            let a = b.assign("d", d);
            let k = b.string("b");
            let v = b.number(2);
            let more = b.dict(&[(k, v)]);
            let p = b.plus_assign("d", more);
            vec![a, p]
        })
        .unwrap();
        assert_eq!(var(&wk, "d"), "{'a': 1, 'b': 2}");
    }

    #[test]
    fn plus_assign_undefined() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let one = b.number(1);
            vec![b.plus_assign("missing", one)]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["undefined object"]);
    }

    #[test]
    fn assigning_null_is_an_error() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let s = b.string("x");
            let msg = b.call("message", vec![Arg::Positional(s)]);
            vec![b.assign("x", msg)]
        });
        assert!(res.is_err());
        assert!(messages(&wk).contains(&"cannot assign variable to null".to_string()));
        assert_eq!(wk.get_variable("x"), None);
    }
}

mod control_flow {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn if_elif_else() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let f = b.bool_lit(false);
            let one = b.string("first");
            let a1 = b.assign("branch", one);
            let first = b.block(vec![a1]);
            let t = b.bool_lit(true);
            let two = b.string("second");
            let a2 = b.assign("branch", two);
            let second = b.block(vec![a2]);
            let three = b.string("else");
            let a3 = b.assign("branch", three);
            let otherwise = b.block(vec![a3]);
            vec![b.if_chain(&[(Some(f), first), (Some(t), second), (None, otherwise)])]
        })
        .unwrap();
        assert_eq!(var(&wk, "branch"), "'second'");
    }

    #[test]
    fn if_condition_must_be_bool() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let n = b.number(1);
            let body = b.block(vec![]);
            vec![b.if_chain(&[(Some(n), body)])]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["expected type bool, got int"]);
    }

    #[test]
    fn foreach_break_and_continue() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let empty = b.array(&[]);
            let init = b.assign("seen", empty);

            let elems: Vec<_> = (1..=5).map(|i| b.number(i)).collect();
            let iter = b.array(&elems);

            // if i == 2: continue
            let i = b.id("i");
            let two = b.number(2);
            let is_two = b.compare(CompareOp::Eq, i, two);
            let cont = b.continue_stmt();
            let cont_body = b.block(vec![cont]);
            let skip = b.if_chain(&[(Some(is_two), cont_body)]);

            // if i == 4: break
            let i = b.id("i");
            let four = b.number(4);
            let is_four = b.compare(CompareOp::Eq, i, four);
            let brk = b.break_stmt();
            let brk_body = b.block(vec![brk]);
            let stop = b.if_chain(&[(Some(is_four), brk_body)]);

            let i = b.id("i");
            let push = b.plus_assign("seen", i);
            let body = b.block(vec![skip, stop, push]);
            let lp = b.foreach(&["i"], iter, body);
            vec![init, lp]
        })
        .unwrap();

        assert_eq!(var(&wk, "seen"), "[1, 3]");
    }

    #[test]
    fn foreach_binds_copies_of_elements() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let one = b.number(1);
            let inner = b.array(&[one]);
            let outer = b.array(&[inner]);
            let init = b.assign("outer", outer);

            let nine = b.number(9);
            let more = b.array(&[nine]);
            let push = b.plus_assign("x", more);
            let body = b.block(vec![push]);
            let iter = b.id("outer");
            let lp = b.foreach(&["x"], iter, body);
            vec![init, lp]
        })
        .unwrap();

        assert_eq!(var(&wk, "outer"), "[[1]]");
        assert_eq!(var(&wk, "x"), "[1, 9]");
    }

    #[test]
    fn foreach_break_at_three_runs_twice() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let zero = b.number(0);
            let init = b.assign("runs", zero);

            let i = b.id("i");
            let three = b.number(3);
            let is_three = b.compare(CompareOp::Eq, i, three);
            let brk = b.break_stmt();
            let brk_body = b.block(vec![brk]);
            let stop = b.if_chain(&[(Some(is_three), brk_body)]);
            let one = b.number(1);
            let count = b.plus_assign("runs", one);
            let body = b.block(vec![stop, count]);

            let elems: Vec<_> = (1..=4).map(|i| b.number(i)).collect();
            let iter = b.array(&elems);
            vec![init, b.foreach(&["i"], iter, body)]
        })
        .unwrap();

        assert_eq!(var(&wk, "runs"), "2");
    }

    #[test]
    fn foreach_over_dict() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let init_s = b.string("");
            let init = b.assign("out", init_s);
            let ka = b.string("a");
            let va = b.string("1");
            let kb = b.string("b");
            let vb = b.string("2");
            let d = b.dict(&[(ka, va), (kb, vb)]);

            let k = b.id("k");
            let v = b.id("v");
            let kv = b.arith(ArithOp::Add, k, v);
            let push = b.plus_assign("out", kv);
            let body = b.block(vec![push]);
            let lp = b.foreach(&["k", "v"], d, body);
            vec![init, lp]
        })
        .unwrap();
        assert_eq!(var(&wk, "out"), "'a1b2'");
    }

    #[test]
    fn foreach_arity_mismatch() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let arr = b.array(&[]);
            let body = b.block(vec![]);
            vec![b.foreach(&["k", "v"], arr, body)]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["array foreach needs exactly one variable to set"]);
    }

    #[test]
    fn foreach_over_number() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| {
            let n = b.number(3);
            let body = b.block(vec![]);
            vec![b.foreach(&["i"], n, body)]
        });
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["int is not iterable"]);
    }

    #[test]
    fn foreach_over_range() {
        let mut wk = workspace();
        run(&mut wk, |b| {
            let zero = b.number(0);
            let init = b.assign("sum", zero);
            let one = b.number(1);
            let ten = b.number(10);
            let three = b.number(3);
            let range = b.call(
                "range",
                vec![Arg::Positional(one), Arg::Positional(ten), Arg::Positional(three)],
            );
            let i = b.id("i");
            let add = b.plus_assign("sum", i);
            let body = b.block(vec![add]);
            let lp = b.foreach(&["i"], range, body);
            vec![init, lp]
        })
        .unwrap();
        // 1 + 4 + 7
        assert_eq!(var(&wk, "sum"), "12");
    }

    #[test]
    fn break_outside_loop() {
        let mut wk = workspace();
        let res = run(&mut wk, |b| vec![b.break_stmt()]);
        assert!(res.is_err());
        assert_eq!(messages(&wk), vec!["break outside of a foreach loop"]);
    }
}

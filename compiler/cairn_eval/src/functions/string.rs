//! Methods of `str`.

use std::cmp::Ordering;

use cairn_ir::NodeId;

use crate::args::ArgSlot;
use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::{resolve_index, Interp};
use crate::object::Obj;
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("contains", func_contains, TypeTag::BOOL).pure(),
    FuncImpl::new("endswith", func_endswith, TypeTag::BOOL).pure(),
    FuncImpl::new("format", func_format, TypeTag::STRING).pure(),
    FuncImpl::new("join", func_join, TypeTag::STRING).pure(),
    FuncImpl::new("replace", func_replace, TypeTag::STRING).pure(),
    FuncImpl::new("split", func_split, TypeTag::ARRAY).pure(),
    FuncImpl::new("startswith", func_startswith, TypeTag::BOOL).pure(),
    FuncImpl::new("strip", func_strip, TypeTag::STRING).pure(),
    FuncImpl::new("substring", func_substring, TypeTag::STRING).pure(),
    FuncImpl::new("to_int", func_to_int, TypeTag::NUMBER).pure(),
    FuncImpl::new("to_lower", func_to_lower, TypeTag::STRING).pure(),
    FuncImpl::new("to_upper", func_to_upper, TypeTag::STRING).pure(),
    FuncImpl::new("underscorify", func_underscorify, TypeTag::STRING).pure(),
    FuncImpl::new("version_compare", func_version_compare, TypeTag::BOOL).pure(),
];

fn func_strip(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut opt = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut [], &mut opt, &mut [])?;

    let s = interp.wk.str(rcvr);
    let stripped = if opt[0].set {
        let chars: Vec<char> = interp.wk.str(opt[0].val).chars().collect();
        s.trim_matches(chars.as_slice()).to_string()
    } else {
        s.trim().to_string()
    };
    Ok(interp.wk.make_str(&stripped))
}

fn func_to_upper(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let s = interp.wk.str(rcvr).to_ascii_uppercase();
    Ok(interp.wk.make_str(&s))
}

fn func_to_lower(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let s = interp.wk.str(rcvr).to_ascii_lowercase();
    Ok(interp.wk.make_str(&s))
}

/// Every character that is not ASCII alphanumeric becomes `_`.
fn func_underscorify(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let s: String = interp
        .wk
        .str(rcvr)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    Ok(interp.wk.make_str(&s))
}

/// Replace `@N@` with the string form of argument N. `@@` is not an
/// escape; unmatched `@` are kept.
fn func_format(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::MESSAGE)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;

    let args = interp.wk.array_to_vec(pos[0].val);
    let fmt = interp.wk.str(rcvr).to_string();
    let mut out = String::with_capacity(fmt.len());
    let mut rest = fmt.as_str();

    while let Some(start) = rest.find('@') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();

        if digits == 0 || !after[digits..].starts_with('@') {
            out.push('@');
            rest = after;
            continue;
        }

        let idx: usize = after[..digits].parse().unwrap_or(usize::MAX);
        let Some(&arg) = args.get(idx) else {
            let msg = format!("format placeholder @{idx}@ is out of bounds");
            return Err(interp.halt(pos[0].node, msg));
        };
        let Some(s) = interp.wk.coerce_string(arg) else {
            let msg = format!("cannot format {}", interp.wk.obj_to_s(arg));
            return Err(interp.halt(pos[0].node, msg));
        };
        out.push_str(&s);
        rest = &after[digits + 1..];
    }
    out.push_str(rest);
    Ok(interp.wk.make_str(&out))
}

/// Split on a separator, or on runs of whitespace when none is given.
fn func_split(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut opt = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut [], &mut opt, &mut [])?;

    let s = interp.wk.str(rcvr).to_string();
    let parts: Vec<&str> = if opt[0].set {
        let sep = interp.wk.str(opt[0].val).to_string();
        if sep.is_empty() {
            return Err(interp.halt(opt[0].node, "separator must not be empty"));
        }
        s.split(sep.as_str()).collect()
    } else {
        s.split_whitespace().collect()
    };

    let arr = interp.wk.make_array();
    for part in parts {
        let p = interp.wk.make_str(part);
        interp.wk.array_push(arr, p);
    }
    Ok(arr)
}

/// `sep.join(a, b, ...)`; array arguments are flattened.
fn func_join(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::glob(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;

    let sep = interp.wk.str(rcvr).to_string();
    match interp.wk.array_join(pos[0].val, &sep) {
        Some(joined) => Ok(joined),
        None => Err(interp.halt(pos[0].node, "join() arguments must be strings")),
    }
}

fn func_contains(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let found = interp.wk.str(rcvr).contains(interp.wk.str(pos[0].val));
    Ok(interp.wk.make_bool(found))
}

fn func_startswith(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let found = interp.wk.str(rcvr).starts_with(interp.wk.str(pos[0].val));
    Ok(interp.wk.make_bool(found))
}

fn func_endswith(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let found = interp.wk.str(rcvr).ends_with(interp.wk.str(pos[0].val));
    Ok(interp.wk.make_bool(found))
}

/// Characters `start..end`. Negative positions count from the end; both
/// ends are clamped to the string.
fn func_substring(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut opt = [ArgSlot::new(TypeTag::NUMBER), ArgSlot::new(TypeTag::NUMBER)];
    interp.interp_args(args_node, &mut [], &mut opt, &mut [])?;
    let [start, end] = opt;

    let chars: Vec<char> = interp.wk.str(rcvr).chars().collect();
    let len = chars.len();
    let clamp = |i: i64| -> usize {
        if i < 0 {
            resolve_index(i, len).unwrap_or(0)
        } else {
            usize::try_from(i).map_or(len, |i| i.min(len))
        }
    };

    let from = if start.set { clamp(interp.wk.number(start.val)) } else { 0 };
    let to = if end.set { clamp(interp.wk.number(end.val)) } else { len };
    let s: String = if from < to { chars[from..to].iter().collect() } else { String::new() };
    Ok(interp.wk.make_str(&s))
}

fn func_replace(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING), ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let [from, to] = pos;

    let replaced = interp
        .wk
        .str(rcvr)
        .replace(interp.wk.str(from.val), interp.wk.str(to.val));
    Ok(interp.wk.make_str(&replaced))
}

fn func_to_int(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    interp.no_args(args_node)?;
    let s = interp.wk.str(rcvr);
    match s.trim().parse::<i64>() {
        Ok(n) => Ok(interp.wk.make_number(n)),
        Err(_) => {
            let msg = format!("unable to parse '{s}' as an integer");
            Err(interp.halt(args_node, msg))
        }
    }
}

fn func_version_compare(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    interp.interp_args(args_node, &mut pos, &mut [], &mut [])?;
    let ok = version_compare(interp.wk.str(rcvr), interp.wk.str(pos[0].val));
    Ok(interp.wk.make_bool(ok))
}

/// Compare two version strings segment by segment. Numeric segments
/// compare as numbers and sort after alphabetic ones; when one version
/// runs out of segments the longer one is greater.
fn version_cmp(a: &str, b: &str) -> Ordering {
    fn segments(v: &str) -> impl Iterator<Item = &str> {
        v.split(|c: char| !c.is_ascii_alphanumeric())
            .flat_map(|part| {
                let mut out = Vec::new();
                let mut rest = part;
                while let Some(first) = rest.chars().next() {
                    let digit = first.is_ascii_digit();
                    let end = rest
                        .find(|c: char| c.is_ascii_digit() != digit)
                        .unwrap_or(rest.len());
                    out.push(&rest[..end]);
                    rest = &rest[end..];
                }
                out
            })
    }

    let mut lhs = segments(a);
    let mut rhs = segments(b);
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(l), Some(r)) => {
                let l_num = l.starts_with(|c: char| c.is_ascii_digit());
                let r_num = r.starts_with(|c: char| c.is_ascii_digit());
                let ord = match (l_num, r_num) {
                    (true, true) => {
                        let l = l.trim_start_matches('0');
                        let r = r.trim_start_matches('0');
                        l.len().cmp(&r.len()).then_with(|| l.cmp(r))
                    }
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Whether `version` satisfies `cond`, e.g. `>=1.2`. A condition without
/// an operator means equality.
pub(crate) fn version_compare(version: &str, cond: &str) -> bool {
    let cond = cond.trim();
    let (op, want) = ["==", "!=", ">=", "<=", ">", "<", "="]
        .iter()
        .find_map(|op| cond.strip_prefix(op).map(|rest| (*op, rest.trim_start())))
        .unwrap_or(("==", cond));

    let ord = version_cmp(version.trim(), want);
    match op {
        "==" | "=" => ord == Ordering::Equal,
        "!=" => ord != Ordering::Equal,
        ">=" => ord != Ordering::Less,
        "<=" => ord != Ordering::Greater,
        ">" => ord == Ordering::Greater,
        _ => ord == Ordering::Less,
    }
}

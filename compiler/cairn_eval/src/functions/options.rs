//! Option definition files and option values.

use cairn_ir::NodeId;

use crate::args::{ArgSlot, Kwarg};
use crate::dispatch::FuncImpl;
use crate::errors::{CallHalt, CallResult};
use crate::interp::Interp;
use crate::object::{BuildOption, BuildOptionKind, FeatureState, Obj, ObjType, Object};
use crate::types::TypeTag;
use crate::workspace::Workspace;

use super::{kernel, project_idx};

pub(crate) static FUNCS: &[FuncImpl] = &[
    FuncImpl::new("option", func_option, TypeTag::NULL).pure(),
    FuncImpl::new("p", kernel::func_p, TypeTag::NULL),
];

/// Names of the options every workspace defines.
const BUILTIN_OPTIONS: &[&str] = &["prefix", "buildtype", "default_library", "werror"];

fn func_option(interp: &mut Interp<'_>, _: Obj, args_node: NodeId) -> CallResult {
    let mut pos = [ArgSlot::new(TypeTag::STRING)];
    let mut kw = [
        Kwarg::new("type", TypeTag::STRING).required(),
        Kwarg::new("value", TypeTag::ANY),
        Kwarg::new("choices", TypeTag::STRING | TypeTag::ARRAY_OF),
        Kwarg::new("description", TypeTag::STRING),
        Kwarg::new("min", TypeTag::NUMBER),
        Kwarg::new("max", TypeTag::NUMBER),
        Kwarg::new("yield", TypeTag::BOOL),
    ];
    interp.interp_args(args_node, &mut pos, &mut [], &mut kw)?;
    let [name] = pos;
    let [ty, value, choices, description, min, max, _yield] = kw;

    let idx = project_idx(interp, args_node)?;
    let name_str = interp.wk.str(name.val).to_string();
    if name_str.contains(':') || BUILTIN_OPTIONS.contains(&name_str.as_str()) {
        return Err(interp.halt(name.node, format!("option name '{name_str}' is reserved")));
    }
    let opts = interp.wk.projects[idx].opts;
    if interp.wk.dict_contains(opts, &name_str) {
        return Err(interp.halt(name.node, format!("duplicate option '{name_str}'")));
    }

    let Some(kind) = BuildOptionKind::parse(interp.wk.str(ty.val)) else {
        let msg = format!("invalid option type '{}'", interp.wk.str(ty.val));
        return Err(interp.halt(ty.node, msg));
    };

    let choices = choices.get().unwrap_or(Obj::NULL);
    if kind == BuildOptionKind::Combo && (choices.is_null() || interp.wk.array_len(choices) == 0) {
        return Err(interp.halt(args_node, "combo options must have choices"));
    }

    let val = match value.get() {
        Some(v) if kind == BuildOptionKind::Feature => {
            interp.typecheck(value.node, v, TypeTag::STRING)?;
            let s = interp.wk.str(v).to_string();
            parse_option_value(interp.wk, kind, choices, &s).map_err(|msg| interp.halt(value.node, msg))?
        }
        Some(v) => {
            interp.typecheck(value.node, v, kind.value_type())?;
            v
        }
        None => default_value(interp.wk, kind, choices),
    };
    check_option_value(interp.wk, kind, choices, val).map_err(|msg| interp.halt(value.node, msg))?;

    if kind == BuildOptionKind::Integer {
        let n = interp.wk.number(val);
        if let Some(lo) = min.get().map(|m| interp.wk.number(m)).filter(|lo| n < *lo) {
            return Err(interp.halt(value.node, format!("value {n} is less than minimum {lo}")));
        }
        if let Some(hi) = max.get().map(|m| interp.wk.number(m)).filter(|hi| n > *hi) {
            return Err(interp.halt(value.node, format!("value {n} is greater than maximum {hi}")));
        }
    }

    let opt = interp.wk.make_obj(Object::BuildOption(BuildOption {
        name: name.val,
        kind,
        val,
        choices,
        description: description.get().unwrap_or(Obj::NULL),
    }));
    interp.wk.dict_set(opts, name.val, opt);
    tracing::debug!(option = %name_str, "option defined");
    Ok(Obj::NULL)
}

fn default_value(wk: &mut Workspace, kind: BuildOptionKind, choices: Obj) -> Obj {
    match kind {
        BuildOptionKind::String => wk.make_str(""),
        BuildOptionKind::Boolean => wk.make_bool(true),
        BuildOptionKind::Combo => wk.array_index(choices, 0),
        BuildOptionKind::Integer => wk.make_number(0),
        BuildOptionKind::Array if choices.is_null() => wk.make_array(),
        BuildOptionKind::Array => wk.array_dup(choices),
        BuildOptionKind::Feature => wk.make_obj(Object::FeatureOpt(FeatureState::Auto)),
    }
}

/// Reject values outside an option's choices.
fn check_option_value(wk: &Workspace, kind: BuildOptionKind, choices: Obj, val: Obj) -> Result<(), String> {
    if choices.is_null() {
        return Ok(());
    }
    let allowed = |v: Obj| wk.array_in(choices, v);
    match kind {
        BuildOptionKind::Combo if !allowed(val) => {
            Err(format!("value {} is not one of the choices", wk.obj_to_s(val)))
        }
        BuildOptionKind::Array => match wk.array_to_vec(val).into_iter().find(|v| !allowed(*v)) {
            Some(bad) => Err(format!("value {} is not one of the choices", wk.obj_to_s(bad))),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

/// Parse the textual form of an option value, as given in
/// `default_options`.
pub(crate) fn parse_option_value(
    wk: &mut Workspace,
    kind: BuildOptionKind,
    choices: Obj,
    s: &str,
) -> Result<Obj, String> {
    let val = match kind {
        BuildOptionKind::String | BuildOptionKind::Combo => wk.make_str(s),
        BuildOptionKind::Boolean => match s {
            "true" => wk.make_bool(true),
            "false" => wk.make_bool(false),
            _ => return Err(format!("invalid boolean value '{s}'")),
        },
        BuildOptionKind::Integer => match s.parse::<i64>() {
            Ok(n) => wk.make_number(n),
            Err(_) => return Err(format!("invalid integer value '{s}'")),
        },
        BuildOptionKind::Array => {
            let arr = wk.make_array();
            for part in s.split(',').filter(|p| !p.is_empty()) {
                let part = wk.make_str(part.trim());
                wk.array_push(arr, part);
            }
            arr
        }
        BuildOptionKind::Feature => match FeatureState::parse(s) {
            Some(state) => wk.make_obj(Object::FeatureOpt(state)),
            None => return Err(format!("invalid feature value '{s}'")),
        },
    };
    check_option_value(wk, kind, choices, val)?;
    Ok(val)
}

/// Option object named `name`: project options shadow built-in ones.
pub(crate) fn lookup_option(wk: &Workspace, name: &str) -> Option<Obj> {
    wk.current_project()
        .and_then(|p| wk.dict_get(p.opts, name))
        .or_else(|| wk.dict_get(wk.globals.global_opts, name))
}

/// Current value of option `name`.
pub(crate) fn option_value(wk: &Workspace, name: &str) -> Option<Obj> {
    lookup_option(wk, name).map(|o| wk.get_build_option(o).val)
}

/// String value of option `name`, or `default` if unset.
pub(crate) fn option_str(wk: &Workspace, name: &str, default: &str) -> String {
    match option_value(wk, name) {
        Some(v) if wk.obj_type(v) == ObjType::String => wk.str(v).to_string(),
        _ => default.to_string(),
    }
}

/// Apply one `name=value` default option.
pub(crate) fn set_default_option(interp: &mut Interp<'_>, node: NodeId, spec: &str) -> Result<(), CallHalt> {
    let Some((name, value)) = spec.split_once('=') else {
        return Err(interp.halt(node, format!("expected 'key=value', got '{spec}'")));
    };
    let Some(opt) = lookup_option(interp.wk, name) else {
        return Err(interp.halt(node, format!("unknown option '{name}'")));
    };

    let BuildOption { kind, choices, .. } = *interp.wk.get_build_option(opt);
    let val = parse_option_value(interp.wk, kind, choices, value).map_err(|msg| interp.halt(node, msg))?;
    interp.wk.get_build_option_mut(opt).val = val;
    tracing::debug!(option = name, value, "default option applied");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test values are known to parse")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_option_values() {
        let mut wk = Workspace::builder().buffered_diagnostics().build();
        let b = parse_option_value(&mut wk, BuildOptionKind::Boolean, Obj::NULL, "false").unwrap();
        assert!(!wk.boolean(b));
        let n = parse_option_value(&mut wk, BuildOptionKind::Integer, Obj::NULL, "42").unwrap();
        assert_eq!(wk.number(n), 42);
        let a = parse_option_value(&mut wk, BuildOptionKind::Array, Obj::NULL, "a, b").unwrap();
        assert_eq!(wk.obj_to_s(a), "['a', 'b']");
        let f = parse_option_value(&mut wk, BuildOptionKind::Feature, Obj::NULL, "disabled").unwrap();
        assert_eq!(*wk.get_feature_opt(f), FeatureState::Disabled);
    }

    #[test]
    fn rejects_bad_values() {
        let mut wk = Workspace::builder().buffered_diagnostics().build();
        assert!(parse_option_value(&mut wk, BuildOptionKind::Boolean, Obj::NULL, "yes").is_err());
        assert!(parse_option_value(&mut wk, BuildOptionKind::Integer, Obj::NULL, "x1").is_err());

        let a = wk.make_str("a");
        let b = wk.make_str("b");
        let choices = wk.make_array_from(&[a, b]);
        assert!(parse_option_value(&mut wk, BuildOptionKind::Combo, choices, "c").is_err());
        assert!(parse_option_value(&mut wk, BuildOptionKind::Combo, choices, "b").is_ok());
    }

    #[test]
    fn builtin_options_resolve_without_project() {
        let wk = Workspace::builder().buffered_diagnostics().build();
        assert_eq!(option_str(&wk, "default_library", ""), "shared");
        assert_eq!(option_str(&wk, "missing", "fallback"), "fallback");
    }
}

//! Methods of `feature` option values.

use cairn_ir::NodeId;

use crate::dispatch::FuncImpl;
use crate::errors::CallResult;
use crate::interp::Interp;
use crate::object::{FeatureState, Obj};
use crate::types::TypeTag;

pub(crate) static METHODS: &[FuncImpl] = &[
    FuncImpl::new("allowed", func_allowed, TypeTag::BOOL).pure(),
    FuncImpl::new("auto", func_auto, TypeTag::BOOL).pure(),
    FuncImpl::new("disabled", func_disabled, TypeTag::BOOL).pure(),
    FuncImpl::new("enabled", func_enabled, TypeTag::BOOL).pure(),
];

fn state_is(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId, pred: fn(FeatureState) -> bool) -> CallResult {
    interp.no_args(args_node)?;
    let state = *interp.wk.get_feature_opt(rcvr);
    Ok(interp.wk.make_bool(pred(state)))
}

fn func_enabled(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    state_is(interp, rcvr, args_node, |s| s == FeatureState::Enabled)
}

fn func_disabled(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    state_is(interp, rcvr, args_node, |s| s == FeatureState::Disabled)
}

fn func_auto(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    state_is(interp, rcvr, args_node, |s| s == FeatureState::Auto)
}

/// Enabled or auto.
fn func_allowed(interp: &mut Interp<'_>, rcvr: Obj, args_node: NodeId) -> CallResult {
    state_is(interp, rcvr, args_node, |s| s != FeatureState::Disabled)
}

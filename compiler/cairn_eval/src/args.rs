//! Argument binding for builtin functions.
//!
//! A builtin declares what it accepts as three slot lists: required
//! positionals, optional positionals, and keywords. [`Interp::interp_args`]
//! evaluates the call's argument nodes into those slots, checking types and
//! arity as it goes. The same entry point doubles as the hook for signature
//! dumping and purity analysis, since every builtin calls it before doing
//! anything else.

use cairn_ir::{Arg, NodeId};

use crate::errors::{self, CallHalt};
use crate::interp::Interp;
use crate::object::{Obj, ObjType};
use crate::types::TypeTag;

/// A positional argument slot.
#[derive(Copy, Clone, Debug)]
pub struct ArgSlot {
    pub ty: TypeTag,
    pub val: Obj,
    /// Node the value came from, for error positions.
    pub node: NodeId,
    pub set: bool,
}

impl ArgSlot {
    pub const fn new(ty: TypeTag) -> Self {
        ArgSlot {
            ty,
            val: Obj::NULL,
            node: NodeId::DUMMY,
            set: false,
        }
    }

    /// A slot collecting every remaining positional argument into an
    /// array. Must be the last required slot.
    pub const fn glob(ty: TypeTag) -> Self {
        Self::new(ty.union(TypeTag::GLOB))
    }

    /// The bound value, if the argument was given.
    pub fn get(&self) -> Option<Obj> {
        self.set.then_some(self.val)
    }
}

/// A keyword argument slot.
#[derive(Copy, Clone, Debug)]
pub struct Kwarg {
    pub key: &'static str,
    pub ty: TypeTag,
    pub required: bool,
    pub val: Obj,
    pub node: NodeId,
    pub set: bool,
}

impl Kwarg {
    pub const fn new(key: &'static str, ty: TypeTag) -> Self {
        Kwarg {
            key,
            ty,
            required: false,
            val: Obj::NULL,
            node: NodeId::DUMMY,
            set: false,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The bound value, if the keyword was given.
    pub fn get(&self) -> Option<Obj> {
        self.set.then_some(self.val)
    }
}

/// Short description of a signature for arity errors, e.g.
/// `(signature: 1 positional, 2 keyword)`.
pub(crate) fn arity(pos: &[ArgSlot], opt: &[ArgSlot], kw: &[Kwarg]) -> String {
    let mut parts = Vec::new();
    let required = pos.iter().filter(|s| !s.ty.contains(TypeTag::GLOB)).count();
    if required > 0 {
        parts.push(format!("{required} positional"));
    }
    if pos.iter().any(|s| s.ty.contains(TypeTag::GLOB)) {
        parts.push("varargs".to_string());
    }
    if !opt.is_empty() {
        parts.push(format!("{} optional", opt.len()));
    }
    if !kw.is_empty() {
        parts.push(format!("{} keyword", kw.len()));
    }
    if parts.is_empty() {
        "(signature: 0 arguments)".to_string()
    } else {
        format!("(signature: {})", parts.join(", "))
    }
}

impl Interp<'_> {
    /// Bind the arguments of `args_node` to the given slots.
    pub fn interp_args(
        &mut self,
        args_node: NodeId,
        pos: &mut [ArgSlot],
        opt: &mut [ArgSlot],
        kw: &mut [Kwarg],
    ) -> Result<(), CallHalt> {
        if self.wk.analyze.opts.dump_signature {
            self.wk.analyze.record_signature(pos, opt, kw);
            return Err(CallHalt::SignatureDumped);
        }

        debug_assert!(
            pos.iter().rev().skip(1).all(|s| !s.ty.contains(TypeTag::GLOB)),
            "glob slot must come last"
        );
        debug_assert!(
            opt.is_empty() || pos.iter().all(|s| !s.ty.contains(TypeTag::GLOB)),
            "glob slot cannot be followed by optional slots"
        );

        let mut args = self.args_of(args_node).iter().copied();
        // Keyword argument that ended the positional stages early.
        let mut first_kwarg: Option<Arg> = None;

        'stages: for stage in 0..2 {
            let count = if stage == 0 { pos.len() } else { opt.len() };
            for i in 0..count {
                let mut slot = if stage == 0 { pos[i] } else { opt[i] };

                if slot.ty.contains(TypeTag::GLOB) {
                    let ended_by = self.bind_glob(args_node, &mut slot, &mut args)?;
                    pos[i] = slot;
                    if ended_by.is_some() {
                        first_kwarg = ended_by;
                        break 'stages;
                    }
                    continue;
                }

                let Some(arg) = args.next() else {
                    if stage == 0 {
                        let sig = arity(pos, opt, kw);
                        return Err(self.halt(args_node, errors::missing_arguments(&sig)));
                    }
                    break 'stages;
                };

                match arg {
                    Arg::Keyword { key, .. } if stage == 0 => {
                        let sig = arity(pos, opt, kw);
                        return Err(self.halt(key, errors::kwarg_before_required(&sig)));
                    }
                    Arg::Keyword { .. } => {
                        first_kwarg = Some(arg);
                        break 'stages;
                    }
                    Arg::Positional(node) => {
                        let val = self.interp_arg_node(node)?;
                        slot.val = self.typecheck_function_arg(node, val, slot.ty)?;
                        slot.node = node;
                        slot.set = true;
                    }
                }

                if stage == 0 {
                    pos[i] = slot;
                } else {
                    opt[i] = slot;
                }
            }
        }

        let mut rest = first_kwarg.into_iter().chain(args);
        // A typeinfo `kwargs:` dict may supply any keyword.
        let mut opaque_kwargs = false;
        if kw.is_empty() {
            if let Some(arg) = rest.next() {
                let sig = arity(pos, opt, kw);
                return Err(match arg {
                    Arg::Keyword { key, .. } => self.halt(key, errors::kwargs_not_accepted(&sig)),
                    Arg::Positional(node) => self.halt(node, errors::too_many_arguments(&sig)),
                });
            }
        } else {
            for arg in rest {
                let (key, value) = match arg {
                    Arg::Keyword { key, value } => (key, value),
                    Arg::Positional(node) => {
                        let sig = arity(pos, opt, kw);
                        return Err(self.halt(node, errors::positional_after_kwargs(&sig)));
                    }
                };

                let name = self.ident(key);
                let val = self.interp_arg_node(value)?;
                if name == "kwargs" {
                    let val = self.typecheck_function_arg(value, val, TypeTag::DICT)?;
                    if self.wk.obj_type(val) == ObjType::TypeInfo {
                        opaque_kwargs = true;
                        continue;
                    }
                    for (k, v) in self.wk.dict_entries(val) {
                        let k = self.wk.str(k).to_string();
                        self.process_kwarg(key, value, kw, &k, v)?;
                    }
                } else {
                    self.process_kwarg(key, value, kw, name, val)?;
                }
            }

            if !opaque_kwargs {
                if let Some(missing) = kw.iter().find(|k| k.required && !k.set) {
                    return Err(self.halt(args_node, errors::missing_required_kwarg(missing.key)));
                }
            }
        }

        if self.wk.analyze.opts.do_analyze {
            if opaque_kwargs {
                self.wk.analyze.opts.pure_function = false;
            }
            return self.analyze_bound_args(pos, opt, kw);
        }
        Ok(())
    }

    /// Fill a glob slot. Returns the keyword argument that ended it, if any.
    fn bind_glob(
        &mut self,
        args_node: NodeId,
        slot: &mut ArgSlot,
        args: &mut impl Iterator<Item = Arg>,
    ) -> Result<Option<Arg>, CallHalt> {
        let ty = slot.ty.difference(TypeTag::GLOB);
        debug_assert!(!ty.contains(TypeTag::ARRAY_OF), "glob slots are implicitly arrays");

        let arr = self.wk.make_array();
        slot.val = arr;
        slot.set = true;
        slot.node = args_node;

        let mut first = true;
        for arg in args {
            let node = match arg {
                Arg::Keyword { .. } => return Ok(Some(arg)),
                Arg::Positional(node) => node,
            };
            if first {
                slot.node = node;
                first = false;
            }

            let val = self.interp_arg_node(node)?;
            let is_array = self.wk.obj_type(val) == ObjType::Array || self.wk.is_typeinfo_of(val, TypeTag::ARRAY);
            let wants_array = ty.contains(TypeTag::ANY) || ty.contains(TypeTag::ARRAY);

            if is_array && !wants_array {
                if self.wk.obj_type(val) == ObjType::TypeInfo {
                    self.wk.array_push(arr, val);
                } else {
                    let flat = self.typecheck_function_arg(node, val, ty | TypeTag::ARRAY_OF)?;
                    self.wk.array_extend_nodup(arr, flat);
                }
            } else {
                let val = self.typecheck_function_arg(node, val, ty)?;
                self.wk.array_push(arr, val);
            }
        }
        Ok(None)
    }

    /// Evaluate an argument. Immunity to disablers applies to the call
    /// being bound, not to calls nested inside its arguments.
    fn interp_arg_node(&mut self, node: NodeId) -> Result<Obj, CallHalt> {
        let immune = std::mem::replace(&mut self.wk.disabler_immunity, false);
        let res = self.interp_node(node);
        self.wk.disabler_immunity = immune;
        Ok(res?)
    }

    fn process_kwarg(
        &mut self,
        key_node: NodeId,
        value_node: NodeId,
        kw: &mut [Kwarg],
        name: &str,
        val: Obj,
    ) -> Result<(), CallHalt> {
        let Some(slot) = kw.iter_mut().find(|k| k.key == name) else {
            return Err(self.halt(key_node, errors::invalid_kwarg(name)));
        };

        let val = self.typecheck_function_arg(value_node, val, slot.ty)?;
        if slot.set {
            return Err(self.halt(value_node, errors::kwarg_set_twice(slot.key)));
        }
        slot.val = val;
        slot.node = key_node;
        slot.set = true;
        Ok(())
    }

    /// Check one argument against its slot type, coercing as needed.
    ///
    /// A disabler, or an array containing one, halts binding unless the
    /// call is immune. `ARRAY_OF` tags flatten arrays into a fresh array
    /// and wrap single values; a single-element array of files is unpacked
    /// where a file is expected.
    pub(crate) fn typecheck_function_arg(&mut self, node: NodeId, val: Obj, ty: TypeTag) -> Result<Obj, CallHalt> {
        let is_array = self.wk.obj_type(val) == ObjType::Array;
        if !self.wk.disabler_immunity && (val == Obj::DISABLER || (is_array && self.wk.array_contains_disabler(val))) {
            return Err(CallHalt::Disabler);
        }

        let array_of = ty.contains(TypeTag::ARRAY_OF);
        let ty = ty.base();
        let typeinfo_array = self.wk.is_typeinfo_of(val, TypeTag::ARRAY);

        let mut val = val;
        if !array_of && ty.contains(TypeTag::FILE) {
            if is_array && self.wk.array_len(val) == 1 {
                let first = self.wk.array_index(val, 0);
                if self.wk.obj_type(first) == ObjType::File {
                    val = first;
                }
            } else if typeinfo_array {
                return Ok(val);
            }
        }

        if !array_of {
            self.typecheck(node, val, ty)?;
            return Ok(val);
        }

        if typeinfo_array {
            return Ok(val);
        }
        let elems = if is_array { self.wk.array_flat(val) } else { vec![val] };
        for &v in &elems {
            self.typecheck(node, v, ty)?;
        }
        Ok(self.wk.make_array_from(&elems))
    }

    /// Fail unless every element of `arr` satisfies `ty`.
    pub(crate) fn typecheck_array(&mut self, node: NodeId, arr: Obj, ty: TypeTag) -> Result<(), CallHalt> {
        self.typecheck(node, arr, TypeTag::ARRAY)?;
        if self.wk.obj_type(arr) == ObjType::TypeInfo {
            return Ok(());
        }
        for v in self.wk.array_to_vec(arr) {
            self.typecheck(node, v, ty)?;
        }
        Ok(())
    }

    /// Fail unless every value of `dict` satisfies `ty`.
    pub(crate) fn typecheck_dict(&mut self, node: NodeId, dict: Obj, ty: TypeTag) -> Result<(), CallHalt> {
        self.typecheck(node, dict, TypeTag::DICT)?;
        if self.wk.obj_type(dict) == ObjType::TypeInfo {
            return Ok(());
        }
        for (_, v) in self.wk.dict_entries(dict) {
            self.typecheck(node, v, ty)?;
        }
        Ok(())
    }

    /// Call a builtin that takes no arguments.
    pub fn no_args(&mut self, args_node: NodeId) -> Result<(), CallHalt> {
        self.interp_args(args_node, &mut [], &mut [], &mut [])
    }
}

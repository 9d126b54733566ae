//! The object model.
//!
//! Every runtime value is an [`Obj`] handle into the workspace's object
//! arena. Handle `0` is the null object and handle `1` the disabler; both
//! are allocated when a workspace is created. Objects are never freed.
//!
//! Arrays and dicts are singly linked lists of arena nodes. Only the head
//! node's `len` and `tail` are authoritative.

mod array;
mod clone;
mod dict;
mod display;
mod equal;

#[cfg(test)]
mod tests;

pub use array::ArrayCursor;
pub use clone::{obj_clone, CloneError};
pub use dict::DictCursor;

use cairn_data::Str;

use crate::types::TypeTag;
use crate::workspace::Workspace;

/// Handle to an object in a [`Workspace`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Obj(pub(crate) u32);

impl Obj {
    /// The null object; "no value".
    pub const NULL: Obj = Obj(0);
    /// The disabler sentinel.
    pub const DISABLER: Obj = Obj(1);

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Discriminant of an [`Object`]. Doubles as the bit index in [`TypeTag`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ObjType {
    Null = 0,
    Disabler,
    Meson,
    Bool,
    File,
    FeatureOpt,
    Number,
    String,
    Array,
    Dict,
    BuildTarget,
    CustomTarget,
    Subproject,
    Dependency,
    ExternalProgram,
    RunResult,
    ConfigurationData,
    Test,
    Module,
    InstallTarget,
    Environment,
    IncludeDirectory,
    BuildOption,
    Generator,
    GeneratedList,
    AliasTarget,
    BothLibs,
    TypeInfo,
}

impl ObjType {
    pub const COUNT: usize = 28;

    pub const ALL: [ObjType; Self::COUNT] = [
        ObjType::Null,
        ObjType::Disabler,
        ObjType::Meson,
        ObjType::Bool,
        ObjType::File,
        ObjType::FeatureOpt,
        ObjType::Number,
        ObjType::String,
        ObjType::Array,
        ObjType::Dict,
        ObjType::BuildTarget,
        ObjType::CustomTarget,
        ObjType::Subproject,
        ObjType::Dependency,
        ObjType::ExternalProgram,
        ObjType::RunResult,
        ObjType::ConfigurationData,
        ObjType::Test,
        ObjType::Module,
        ObjType::InstallTarget,
        ObjType::Environment,
        ObjType::IncludeDirectory,
        ObjType::BuildOption,
        ObjType::Generator,
        ObjType::GeneratedList,
        ObjType::AliasTarget,
        ObjType::BothLibs,
        ObjType::TypeInfo,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ObjType::Null => "null",
            ObjType::Disabler => "disabler",
            ObjType::Meson => "meson",
            ObjType::Bool => "bool",
            ObjType::File => "file",
            ObjType::FeatureOpt => "feature",
            ObjType::Number => "int",
            ObjType::String => "str",
            ObjType::Array => "list",
            ObjType::Dict => "dict",
            ObjType::BuildTarget => "build_tgt",
            ObjType::CustomTarget => "custom_tgt",
            ObjType::Subproject => "subproject",
            ObjType::Dependency => "dep",
            ObjType::ExternalProgram => "external_program",
            ObjType::RunResult => "runresult",
            ObjType::ConfigurationData => "cfg_data",
            ObjType::Test => "test",
            ObjType::Module => "module",
            ObjType::InstallTarget => "install_tgt",
            ObjType::Environment => "env",
            ObjType::IncludeDirectory => "inc",
            ObjType::BuildOption => "option",
            ObjType::Generator => "generator",
            ObjType::GeneratedList => "generated_list",
            ObjType::AliasTarget => "alias_tgt",
            ObjType::BothLibs => "both_libs",
            ObjType::TypeInfo => "typeinfo",
        }
    }
}

/// One node of an array list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArrayNode {
    pub val: Obj,
    pub next: Option<Obj>,
    pub tail: Obj,
    pub len: u32,
}

/// One node of a dict list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DictNode {
    pub key: Obj,
    pub val: Obj,
    pub next: Option<Obj>,
    pub tail: Obj,
    pub len: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FeatureState {
    Enabled,
    Disabled,
    Auto,
}

impl FeatureState {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "enabled" => Some(FeatureState::Enabled),
            "disabled" => Some(FeatureState::Disabled),
            "auto" => Some(FeatureState::Auto),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureState::Enabled => "enabled",
            FeatureState::Disabled => "disabled",
            FeatureState::Auto => "auto",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildTargetKind {
    Executable,
    StaticLibrary,
    SharedLibrary,
}

impl BuildTargetKind {
    /// Output file name for a target called `name`.
    pub fn output_name(self, name: &str) -> String {
        match self {
            BuildTargetKind::Executable => name.to_string(),
            BuildTargetKind::StaticLibrary => format!("lib{name}.a"),
            BuildTargetKind::SharedLibrary => format!("lib{name}.so"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildTarget {
    pub name: Obj,
    pub kind: BuildTargetKind,
    pub sources: Obj,
    pub deps: Obj,
    pub include_dirs: Obj,
    pub build_dir: Obj,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CustomTarget {
    pub name: Obj,
    pub inputs: Obj,
    pub outputs: Obj,
    pub command: Obj,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Subproject {
    pub project: Option<u32>,
    pub found: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
    pub name: Obj,
    pub version: Obj,
    pub found: bool,
    pub link_with: Obj,
    pub include_dirs: Obj,
    pub variables: Obj,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExternalProgram {
    pub name: Obj,
    pub path: Obj,
    pub found: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunResult {
    pub status: i64,
    pub out: Obj,
    pub err: Obj,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TestObj {
    pub name: Obj,
    pub exe: Obj,
    pub args: Obj,
    pub should_fail: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModuleKind {
    Fs,
    Keyval,
    Pkgconfig,
    Python,
    Sourceset,
}

impl ModuleKind {
    pub const COUNT: usize = 5;
    pub const ALL: [ModuleKind; Self::COUNT] = [
        ModuleKind::Fs,
        ModuleKind::Keyval,
        ModuleKind::Pkgconfig,
        ModuleKind::Python,
        ModuleKind::Sourceset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::Fs => "fs",
            ModuleKind::Keyval => "keyval",
            ModuleKind::Pkgconfig => "pkgconfig",
            ModuleKind::Python => "python",
            ModuleKind::Sourceset => "sourceset",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub kind: ModuleKind,
    pub found: bool,
    pub has_impl: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InstallTarget {
    pub src: Obj,
    pub dest: Obj,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IncludeDirectory {
    pub path: Obj,
    pub is_system: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildOptionKind {
    String,
    Boolean,
    Combo,
    Integer,
    Array,
    Feature,
}

impl BuildOptionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(BuildOptionKind::String),
            "boolean" => Some(BuildOptionKind::Boolean),
            "combo" => Some(BuildOptionKind::Combo),
            "integer" => Some(BuildOptionKind::Integer),
            "array" => Some(BuildOptionKind::Array),
            "feature" => Some(BuildOptionKind::Feature),
            _ => None,
        }
    }

    /// Type a value of this option must have.
    pub fn value_type(self) -> TypeTag {
        match self {
            BuildOptionKind::String | BuildOptionKind::Combo => TypeTag::STRING,
            BuildOptionKind::Boolean => TypeTag::BOOL,
            BuildOptionKind::Integer => TypeTag::NUMBER,
            BuildOptionKind::Array => TypeTag::ARRAY,
            BuildOptionKind::Feature => TypeTag::FEATURE_OPT,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildOption {
    pub name: Obj,
    pub kind: BuildOptionKind,
    pub val: Obj,
    pub choices: Obj,
    pub description: Obj,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Generator {
    pub exe: Obj,
    pub output: Obj,
    pub args: Obj,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GeneratedList {
    pub generator: Obj,
    pub input: Obj,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AliasTarget {
    pub name: Obj,
    pub depends: Obj,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BothLibs {
    pub static_lib: Obj,
    pub shared_lib: Obj,
}

/// A runtime value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Object {
    Null,
    Disabler,
    Meson,
    Bool(bool),
    File(Str),
    FeatureOpt(FeatureState),
    Number(i64),
    String(Str),
    Array(ArrayNode),
    Dict(DictNode),
    BuildTarget(BuildTarget),
    CustomTarget(CustomTarget),
    Subproject(Subproject),
    Dependency(Dependency),
    ExternalProgram(ExternalProgram),
    RunResult(RunResult),
    /// Wraps a dict of configuration values.
    ConfigurationData(Obj),
    Test(TestObj),
    Module(Module),
    InstallTarget(InstallTarget),
    /// Wraps a dict of environment variable values.
    Environment(Obj),
    IncludeDirectory(IncludeDirectory),
    BuildOption(BuildOption),
    Generator(Generator),
    GeneratedList(GeneratedList),
    AliasTarget(AliasTarget),
    BothLibs(BothLibs),
    /// Placeholder for a value only known to have one of these types.
    TypeInfo(TypeTag),
}

impl Object {
    pub fn obj_type(&self) -> ObjType {
        match self {
            Object::Null => ObjType::Null,
            Object::Disabler => ObjType::Disabler,
            Object::Meson => ObjType::Meson,
            Object::Bool(_) => ObjType::Bool,
            Object::File(_) => ObjType::File,
            Object::FeatureOpt(_) => ObjType::FeatureOpt,
            Object::Number(_) => ObjType::Number,
            Object::String(_) => ObjType::String,
            Object::Array(_) => ObjType::Array,
            Object::Dict(_) => ObjType::Dict,
            Object::BuildTarget(_) => ObjType::BuildTarget,
            Object::CustomTarget(_) => ObjType::CustomTarget,
            Object::Subproject(_) => ObjType::Subproject,
            Object::Dependency(_) => ObjType::Dependency,
            Object::ExternalProgram(_) => ObjType::ExternalProgram,
            Object::RunResult(_) => ObjType::RunResult,
            Object::ConfigurationData(_) => ObjType::ConfigurationData,
            Object::Test(_) => ObjType::Test,
            Object::Module(_) => ObjType::Module,
            Object::InstallTarget(_) => ObjType::InstallTarget,
            Object::Environment(_) => ObjType::Environment,
            Object::IncludeDirectory(_) => ObjType::IncludeDirectory,
            Object::BuildOption(_) => ObjType::BuildOption,
            Object::Generator(_) => ObjType::Generator,
            Object::GeneratedList(_) => ObjType::GeneratedList,
            Object::AliasTarget(_) => ObjType::AliasTarget,
            Object::BothLibs(_) => ObjType::BothLibs,
            Object::TypeInfo(_) => ObjType::TypeInfo,
        }
    }
}

#[cold]
#[track_caller]
fn type_mismatch(o: Obj, expected: ObjType, actual: ObjType) -> ! {
    panic!(
        "object {} is a {}, expected {}",
        o.0,
        actual.name(),
        expected.name()
    )
}

/// Generates typed payload accessors. Asking for the wrong type is a bug in
/// the caller and panics.
macro_rules! payload_accessors {
    ($($get:ident, $get_mut:ident => $variant:ident($ty:ty);)*) => {
        impl Workspace {
            $(
                #[track_caller]
                pub fn $get(&self, o: Obj) -> &$ty {
                    match self.objs.get(o.0) {
                        Object::$variant(v) => v,
                        other => type_mismatch(o, ObjType::$variant, other.obj_type()),
                    }
                }

                #[track_caller]
                #[allow(dead_code, reason = "generated for every payload type")]
                pub(crate) fn $get_mut(&mut self, o: Obj) -> &mut $ty {
                    match self.objs.get_mut(o.0) {
                        Object::$variant(v) => v,
                        other => type_mismatch(o, ObjType::$variant, other.obj_type()),
                    }
                }
            )*
        }
    };
}

payload_accessors! {
    get_build_target, get_build_target_mut => BuildTarget(BuildTarget);
    get_custom_target, get_custom_target_mut => CustomTarget(CustomTarget);
    get_subproject, get_subproject_mut => Subproject(Subproject);
    get_dependency, get_dependency_mut => Dependency(Dependency);
    get_external_program, get_external_program_mut => ExternalProgram(ExternalProgram);
    get_run_result, get_run_result_mut => RunResult(RunResult);
    get_configuration_data, get_configuration_data_mut => ConfigurationData(Obj);
    get_test, get_test_mut => Test(TestObj);
    get_module, get_module_mut => Module(Module);
    get_install_target, get_install_target_mut => InstallTarget(InstallTarget);
    get_environment, get_environment_mut => Environment(Obj);
    get_include_directory, get_include_directory_mut => IncludeDirectory(IncludeDirectory);
    get_build_option, get_build_option_mut => BuildOption(BuildOption);
    get_generator, get_generator_mut => Generator(Generator);
    get_generated_list, get_generated_list_mut => GeneratedList(GeneratedList);
    get_alias_target, get_alias_target_mut => AliasTarget(AliasTarget);
    get_both_libs, get_both_libs_mut => BothLibs(BothLibs);
    get_feature_opt, get_feature_opt_mut => FeatureOpt(FeatureState);
    get_typeinfo, get_typeinfo_mut => TypeInfo(TypeTag);
}

impl Workspace {
    /// Allocate `object`, returning its handle.
    pub fn make_obj(&mut self, object: Object) -> Obj {
        Obj(self.objs.push(object))
    }

    #[inline]
    pub fn obj(&self, o: Obj) -> &Object {
        self.objs.get(o.0)
    }

    #[inline]
    pub(crate) fn obj_mut(&mut self, o: Obj) -> &mut Object {
        self.objs.get_mut(o.0)
    }

    #[inline]
    pub fn obj_type(&self, o: Obj) -> ObjType {
        self.obj(o).obj_type()
    }

    /// Number of objects allocated, reserved handles included.
    pub fn obj_count(&self) -> u32 {
        self.objs.len()
    }

    pub fn make_number(&mut self, n: i64) -> Obj {
        self.make_obj(Object::Number(n))
    }

    pub fn make_bool(&mut self, b: bool) -> Obj {
        self.make_obj(Object::Bool(b))
    }

    /// New string object holding a copy of `s`.
    pub fn make_str(&mut self, s: &str) -> Obj {
        let s = self.strs.push(s);
        self.make_obj(Object::String(s))
    }

    pub fn make_file(&mut self, path: &str) -> Obj {
        let s = self.strs.push(path);
        self.make_obj(Object::File(s))
    }

    pub fn make_typeinfo(&mut self, ty: TypeTag) -> Obj {
        self.make_obj(Object::TypeInfo(ty))
    }

    #[track_caller]
    pub fn number(&self, o: Obj) -> i64 {
        match self.obj(o) {
            Object::Number(n) => *n,
            other => type_mismatch(o, ObjType::Number, other.obj_type()),
        }
    }

    #[track_caller]
    pub fn boolean(&self, o: Obj) -> bool {
        match self.obj(o) {
            Object::Bool(b) => *b,
            other => type_mismatch(o, ObjType::Bool, other.obj_type()),
        }
    }

    /// Contents of a string object.
    #[track_caller]
    pub fn str(&self, o: Obj) -> &str {
        match self.obj(o) {
            Object::String(s) => self.strs.get(*s),
            other => type_mismatch(o, ObjType::String, other.obj_type()),
        }
    }

    /// Path of a file object.
    #[track_caller]
    pub fn file_path(&self, o: Obj) -> &str {
        match self.obj(o) {
            Object::File(s) => self.strs.get(*s),
            other => type_mismatch(o, ObjType::File, other.obj_type()),
        }
    }

    pub fn make_strf(&mut self, args: std::fmt::Arguments<'_>) -> Obj {
        match args.as_str() {
            Some(s) => self.make_str(s),
            None => self.make_str(&args.to_string()),
        }
    }

    pub fn str_eq(&self, o: Obj, other: &str) -> bool {
        self.str(o) == other
    }

    pub fn str_has_null(&self, o: Obj) -> bool {
        self.str(o).contains('\0')
    }

    /// Contents of a string object that is about to be handed to the
    /// operating system. An embedded NUL is a bug in the caller.
    #[track_caller]
    pub fn get_cstr(&self, o: Obj) -> &str {
        let s = self.str(o);
        if s.contains('\0') {
            cairn_data::unrecoverable(&format!("string {s:?} has an embedded NUL"));
        }
        s
    }

    /// Handle of a string object's contents.
    #[track_caller]
    pub(crate) fn str_handle(&self, o: Obj) -> Str {
        match self.obj(o) {
            Object::String(s) => *s,
            other => type_mismatch(o, ObjType::String, other.obj_type()),
        }
    }

    /// Append `more` to a string object in place.
    pub fn str_app(&mut self, o: Obj, more: &str) {
        let s = self.str_handle(o);
        if s == Str::EMPTY {
            let fresh = self.strs.push(more);
            *self.obj_mut(o) = Object::String(fresh);
        } else {
            self.strs.append(s, more);
        }
    }

    /// Typeinfo tag of `o`: its own tag for typeinfo objects, otherwise the
    /// single bit of its type.
    pub fn type_tag_of(&self, o: Obj) -> TypeTag {
        match self.obj(o) {
            Object::TypeInfo(t) => *t,
            other => TypeTag::of(other.obj_type()),
        }
    }

    /// Whether `o` satisfies `ty`. Typeinfo placeholders satisfy any tag
    /// they overlap with.
    pub fn type_matches(&self, o: Obj, ty: TypeTag) -> bool {
        match self.obj(o) {
            Object::TypeInfo(t) => t.base().intersects(ty.base()),
            other => ty.accepts(other.obj_type()),
        }
    }

    /// Whether `o` is a typeinfo placeholder that could be any of `ty`.
    pub fn is_typeinfo_of(&self, o: Obj, ty: TypeTag) -> bool {
        matches!(self.obj(o), Object::TypeInfo(t) if t.intersects(ty))
    }
}

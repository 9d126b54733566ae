//! Type tags for argument checking and static analysis.
//!
//! Each object type owns one bit. A [`TypeTag`] with several bits accepts
//! any of those types. [`TypeTag::ARRAY_OF`] and [`TypeTag::GLOB`] are
//! modifiers: "an array whose elements match the rest of the tag" and
//! "collect every remaining positional argument".

use bitflags::bitflags;

use crate::object::ObjType;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeTag: u64 {
        const NULL = 1 << 0;
        const DISABLER = 1 << 1;
        const MESON = 1 << 2;
        const BOOL = 1 << 3;
        const FILE = 1 << 4;
        const FEATURE_OPT = 1 << 5;
        const NUMBER = 1 << 6;
        const STRING = 1 << 7;
        const ARRAY = 1 << 8;
        const DICT = 1 << 9;
        const BUILD_TARGET = 1 << 10;
        const CUSTOM_TARGET = 1 << 11;
        const SUBPROJECT = 1 << 12;
        const DEPENDENCY = 1 << 13;
        const EXTERNAL_PROGRAM = 1 << 14;
        const RUN_RESULT = 1 << 15;
        const CONFIGURATION_DATA = 1 << 16;
        const TEST = 1 << 17;
        const MODULE = 1 << 18;
        const INSTALL_TARGET = 1 << 19;
        const ENVIRONMENT = 1 << 20;
        const INCLUDE_DIRECTORY = 1 << 21;
        const BUILD_OPTION = 1 << 22;
        const GENERATOR = 1 << 23;
        const GENERATED_LIST = 1 << 24;
        const ALIAS_TARGET = 1 << 25;
        const BOTH_LIBS = 1 << 26;
        const TYPEINFO = 1 << 27;

        const ARRAY_OF = 1 << 62;
        const GLOB = 1 << 63;

        /// Every value type a script can hold.
        const ANY = Self::DISABLER.bits()
            | Self::MESON.bits()
            | Self::BOOL.bits()
            | Self::FILE.bits()
            | Self::FEATURE_OPT.bits()
            | Self::NUMBER.bits()
            | Self::STRING.bits()
            | Self::ARRAY.bits()
            | Self::DICT.bits()
            | Self::BUILD_TARGET.bits()
            | Self::CUSTOM_TARGET.bits()
            | Self::SUBPROJECT.bits()
            | Self::DEPENDENCY.bits()
            | Self::EXTERNAL_PROGRAM.bits()
            | Self::RUN_RESULT.bits()
            | Self::CONFIGURATION_DATA.bits()
            | Self::TEST.bits()
            | Self::MODULE.bits()
            | Self::INSTALL_TARGET.bits()
            | Self::ENVIRONMENT.bits()
            | Self::INCLUDE_DIRECTORY.bits()
            | Self::BUILD_OPTION.bits()
            | Self::GENERATOR.bits()
            | Self::GENERATED_LIST.bits()
            | Self::ALIAS_TARGET.bits()
            | Self::BOTH_LIBS.bits();

        /// Things that name a file on disk.
        const COERCIBLE_FILES = Self::STRING.bits()
            | Self::FILE.bits()
            | Self::CUSTOM_TARGET.bits()
            | Self::BUILD_TARGET.bits()
            | Self::GENERATED_LIST.bits();

        /// Anything `files()`-like functions accept as an executable.
        const COERCIBLE_EXE = Self::STRING.bits()
            | Self::FILE.bits()
            | Self::BUILD_TARGET.bits()
            | Self::EXTERNAL_PROGRAM.bits();

        /// Values `message()` and friends can print.
        const MESSAGE = Self::STRING.bits()
            | Self::NUMBER.bits()
            | Self::BOOL.bits()
            | Self::ARRAY.bits()
            | Self::DICT.bits()
            | Self::FILE.bits();
    }
}

impl TypeTag {
    /// Tag of a single object type.
    #[inline]
    pub fn of(t: ObjType) -> TypeTag {
        TypeTag::from_bits_retain(1 << (t as u64))
    }

    /// This tag without the `ARRAY_OF` and `GLOB` modifiers.
    #[inline]
    pub fn base(self) -> TypeTag {
        self.difference(TypeTag::ARRAY_OF | TypeTag::GLOB)
    }

    /// Whether a value of type `t` satisfies this tag.
    #[inline]
    pub fn accepts(self, t: ObjType) -> bool {
        self.base().intersects(TypeTag::of(t))
    }

    /// Object types named by this tag, in declaration order.
    pub fn types(self) -> impl Iterator<Item = ObjType> {
        ObjType::ALL.into_iter().filter(move |t| self.accepts(*t))
    }

    /// Human-readable rendering, e.g. `list[int|str]`.
    pub fn render(self) -> String {
        let base = self.base();
        let inner = if base.contains(TypeTag::ANY) {
            "any".to_string()
        } else {
            let mut names: Vec<&str> = base.types().map(ObjType::name).collect();
            names.sort_unstable();
            if names.is_empty() {
                "void".to_string()
            } else {
                names.join("|")
            }
        };

        if self.contains(TypeTag::GLOB) {
            format!("glob[{inner}]")
        } else if self.contains(TypeTag::ARRAY_OF) {
            format!("list[{inner}]")
        } else {
            inner
        }
    }
}

//! Argument values shared between [`Action`][a] parsing and execution.
//!
//! [a]: crate::cli::Action

use mcompass_assets::build_flags::FlagDefaults;

/// How a generated table is printed.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum TableFormat {
    /// Bare entries, ready to be pasted into an existing initializer.
    #[default]
    Entries,
    /// A complete C array definition.
    Array,
}

impl TableFormat {
    /// Returns the textual representation of the [`TableFormat`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entries => "entries",
            Self::Array => "array",
        }
    }
}

impl clap::ValueEnum for TableFormat {
    fn value_variants<'a>() -> &'a [Self] {
        static FORMATS: &[TableFormat] = &[TableFormat::Entries, TableFormat::Array];

        FORMATS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// How the build definitions are emitted.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum FlagsFormat {
    /// `-DNAME=VALUE` compiler flags.
    #[default]
    Flags,
    /// A C header of `#define`s.
    Header,
}

impl FlagsFormat {
    /// Returns the textual representation of the [`FlagsFormat`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flags => "flags",
            Self::Header => "header",
        }
    }
}

impl clap::ValueEnum for FlagsFormat {
    fn value_variants<'a>() -> &'a [Self] {
        static FORMATS: &[FlagsFormat] = &[FlagsFormat::Flags, FlagsFormat::Header];

        FORMATS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// The hardware revision whose defaults apply to unset environment variables.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Revision {
    /// The current revision, shipped without GPS by default.
    #[default]
    Lite,
    /// The first revision, which always had GPS.
    Gps,
}

impl Revision {
    /// Returns the textual representation of the [`Revision`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lite => "lite",
            Self::Gps => "gps",
        }
    }

    /// Returns the [`FlagDefaults`] of the [`Revision`].
    pub fn defaults(&self) -> FlagDefaults {
        match self {
            Self::Lite => FlagDefaults::default(),
            Self::Gps => FlagDefaults::gps(),
        }
    }
}

impl clap::ValueEnum for Revision {
    fn value_variants<'a>() -> &'a [Self] {
        static REVISIONS: &[Revision] = &[Revision::Lite, Revision::Gps];

        REVISIONS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

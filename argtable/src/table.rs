use std::collections::HashSet;

use crate::value::{Kind, Value};

// ============================================================================
// Arity
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    /// A flag; any attached value is ignored.
    #[default]
    None,
    Optional,
    Required,
}

// ============================================================================
// Arg
// ============================================================================

/// One row of an [`ArgTable`].
///
/// An option has a short name, a `--long` name, or both. A positional has no
/// short name and a long name without a leading dash, conventionally written
/// in upper case (`LENGTH`); that name doubles as its placeholder in usage
/// and error output.
#[derive(Debug, Clone, Default)]
pub struct Arg {
    short_name: Option<char>,
    long_name: Option<String>,
    kind: Option<Kind>,
    arity: Arity,
    default_value: Option<Value>,
}

impl Arg {
    pub fn new() -> Self {
        Self::default()
    }

    /// A positional argument bound by order.
    pub fn positional(name: &str) -> Self {
        Arg {
            long_name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn short(mut self, c: char) -> Self {
        self.short_name = Some(c);
        self
    }

    pub fn long(mut self, name: &str) -> Self {
        self.long_name = Some(name.to_string());
        self
    }

    /// Store converted values of this kind. Without a kind, values are
    /// accepted and discarded.
    pub fn value(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn required(self) -> Self {
        self.arity(Arity::Required)
    }

    pub fn optional(self) -> Self {
        self.arity(Arity::Optional)
    }

    /// Initial slot content for an option that may not be given.
    pub fn default_val<V: Into<Value>>(mut self, v: V) -> Self {
        self.default_value = Some(v.into());
        self
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    pub fn get_arity(&self) -> Arity {
        self.arity
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn is_positional(&self) -> bool {
        self.short_name.is_none()
            && self
                .long_name
                .as_deref()
                .is_some_and(|name| !name.starts_with('-'))
    }

    pub fn is_option(&self) -> bool {
        self.short_name.is_some()
            || self
                .long_name
                .as_deref()
                .is_some_and(|name| name.starts_with('-'))
    }

    pub fn takes_value(&self) -> bool {
        self.arity != Arity::None
    }

    /// Placeholder shown for the value: the long name without dashes, in
    /// upper case.
    pub fn placeholder(&self) -> Option<String> {
        self.long_name
            .as_deref()
            .map(|name| name.trim_start_matches('-').to_uppercase())
    }

    /// How the descriptor is cited in error output.
    pub fn spelling(&self) -> Option<String> {
        match (self.short_name, self.long_name.as_deref()) {
            (Some(c), Some(long)) => Some(format!("-{}/{}", c, long)),
            (Some(c), None) => Some(format!("-{}", c)),
            (None, Some(long)) => Some(long.to_string()),
            (None, None) => None,
        }
    }

    /// Name used for lookups and missing-argument messages: the long name,
    /// or `-c` for a short-only option.
    pub fn key(&self) -> Option<String> {
        match (self.long_name.as_deref(), self.short_name) {
            (Some(long), _) => Some(long.to_string()),
            (None, Some(c)) => Some(format!("-{}", c)),
            (None, None) => None,
        }
    }

    /// True when `key` names this descriptor by its long name or as `-c`.
    pub(crate) fn answers_to(&self, key: &str) -> bool {
        if self.long_name.as_deref() == Some(key) {
            return true;
        }
        let mut chars = key.chars();
        chars.next() == Some('-')
            && self.short_name.is_some()
            && chars.next() == self.short_name
            && chars.next().is_none()
    }
}

// ============================================================================
// ArgTable
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ArgTable {
    args: Vec<Arg>,
}

impl ArgTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Check the table for descriptors the parser could never honour.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut shorts = HashSet::new();
        let mut longs = HashSet::new();

        for arg in &self.args {
            if let Some(c) = arg.short_name {
                if !c.is_ascii_graphic() || c == '-' || c == '=' {
                    return Err(TableError::InvalidShort(c));
                }
                if !shorts.insert(c) {
                    return Err(TableError::DuplicateShort(c));
                }
            }

            if let Some(long) = arg.long_name.as_deref() {
                let dash_led_ok = match long.strip_prefix("--") {
                    Some(rest) => !rest.is_empty(),
                    None => !long.starts_with('-'),
                };
                if long.is_empty() || long.contains('=') || !dash_led_ok {
                    return Err(TableError::InvalidLong(long.to_string()));
                }
                if !longs.insert(long) {
                    return Err(TableError::DuplicateLong(long.to_string()));
                }
            }

            if let Some(default) = &arg.default_value {
                let name = arg.key().unwrap_or_default();
                if arg.is_positional() {
                    return Err(TableError::PositionalDefault(name));
                }
                if arg.kind != Some(default.kind()) {
                    return Err(TableError::DefaultMismatch(name));
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("invalid short option name '{0}'")]
    InvalidShort(char),

    #[error("invalid long option name \"{0}\"")]
    InvalidLong(String),

    #[error("short option '-{0}' declared twice")]
    DuplicateShort(char),

    #[error("name \"{0}\" declared twice")]
    DuplicateLong(String),

    #[error("default for {0} does not match its value kind")]
    DefaultMismatch(String),

    #[error("positional {0} cannot have a default")]
    PositionalDefault(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- classification --

    #[test]
    fn positional_and_option_shapes() {
        let length = Arg::positional("LENGTH");
        assert!(length.is_positional());
        assert!(!length.is_option());

        let input = Arg::new().short('i').long("--input");
        assert!(input.is_option());
        assert!(!input.is_positional());

        let long_only = Arg::new().long("--dry-run");
        assert!(long_only.is_option());

        let dead = Arg::new();
        assert!(!dead.is_option());
        assert!(!dead.is_positional());
    }

    #[test]
    fn short_with_bare_long_is_an_option() {
        let arg = Arg::new().short('x').long("NAME");
        assert!(arg.is_option());
        assert!(!arg.is_positional());
    }

    #[test]
    fn placeholder_strips_dashes() {
        assert_eq!(Arg::new().long("--input").placeholder().as_deref(), Some("INPUT"));
        assert_eq!(Arg::new().long("--dry-run").placeholder().as_deref(), Some("DRY-RUN"));
        assert_eq!(Arg::positional("LENGTH").placeholder().as_deref(), Some("LENGTH"));
        assert_eq!(Arg::new().short('q').placeholder(), None);
    }

    #[test]
    fn spelling_and_key() {
        let both = Arg::new().short('o').long("--offset");
        assert_eq!(both.spelling().as_deref(), Some("-o/--offset"));
        assert_eq!(both.key().as_deref(), Some("--offset"));

        let short = Arg::new().short('q');
        assert_eq!(short.spelling().as_deref(), Some("-q"));
        assert_eq!(short.key().as_deref(), Some("-q"));

        assert_eq!(Arg::positional("LENGTH").spelling().as_deref(), Some("LENGTH"));
        assert_eq!(Arg::new().spelling(), None);
    }

    #[test]
    fn answers_to_long_or_short_spelling() {
        let arg = Arg::new().short('v').long("--verbose");
        assert!(arg.answers_to("--verbose"));
        assert!(arg.answers_to("-v"));
        assert!(!arg.answers_to("-vv"));
        assert!(!arg.answers_to("v"));
        assert!(!Arg::new().long("--v").answers_to("-v"));
    }

    // -- validation --

    #[test]
    fn valid_table_passes() {
        let table = ArgTable::new()
            .arg(Arg::new().short('i').long("--input").value(Kind::Text).required())
            .arg(Arg::new().short('v').long("--verbose"))
            .arg(Arg::new().short('c').value(Kind::Text).optional().default_val("x"))
            .arg(Arg::positional("LENGTH").value(Kind::Uint64).required())
            .arg(Arg::new());
        assert_eq!(table.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_short_names() {
        for c in ['-', '=', ' ', 'é', '\t'] {
            let table = ArgTable::new().arg(Arg::new().short(c));
            assert_eq!(table.validate(), Err(TableError::InvalidShort(c)));
        }
    }

    #[test]
    fn rejects_bad_long_names() {
        for name in ["-input", "--", "--in=put", "", "-", "NA=ME"] {
            let table = ArgTable::new().arg(Arg::new().long(name));
            assert_eq!(
                table.validate(),
                Err(TableError::InvalidLong(name.to_string())),
                "{name}"
            );
        }
    }

    #[test]
    fn rejects_duplicates() {
        let table = ArgTable::new()
            .arg(Arg::new().short('v'))
            .arg(Arg::new().short('v').long("--very"));
        assert_eq!(table.validate(), Err(TableError::DuplicateShort('v')));

        let table = ArgTable::new()
            .arg(Arg::positional("FILE"))
            .arg(Arg::positional("FILE"));
        assert_eq!(table.validate(), Err(TableError::DuplicateLong("FILE".to_string())));
    }

    #[test]
    fn rejects_mismatched_defaults() {
        let table = ArgTable::new().arg(Arg::new().long("--n").value(Kind::Int).default_val(3_u64));
        assert_eq!(table.validate(), Err(TableError::DefaultMismatch("--n".to_string())));

        let table = ArgTable::new().arg(Arg::new().long("--n").default_val("x"));
        assert_eq!(table.validate(), Err(TableError::DefaultMismatch("--n".to_string())));

        let table = ArgTable::new().arg(Arg::positional("N").value(Kind::Text).default_val("x"));
        assert_eq!(table.validate(), Err(TableError::PositionalDefault("N".to_string())));
    }
}

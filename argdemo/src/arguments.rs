use argtable::{Arg, ArgTable, Identity, Kind, Parsed};

const USAGE: &str = "[OPTION]... ARGNAME LENGTH [FILTER]";

const HELP: &str = r#"Parse the command line and print what was recognised.

Options:
  -i, --input FILE       Input file (required value).
  -q                     Increase quietness.  Can be repeated.
  -c, --config [FILE]    Config file; the value is optional.
  -v, --verbose          Increase verboseness.  Can be repeated.
  -o, --offset N         File offset.  Accepts k/M/G/T suffixes.
      --name NAME        A name.
      --dry-run          Count dry runs.
  -h, --help             This help.
  -V, --version          Print the version.

Positional arguments:
  ARGNAME                Any text.
  LENGTH                 File length.  Accepts k/M/G/T suffixes.
  FILTER                 Optional filter text.

Arguments that fit nowhere are listed as remaining arguments.
Everything after -- is passed through untouched."#;

pub fn identity() -> Identity {
    Identity::from_env()
        .with_canonical_name("argtable-demo")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_usage(USAGE)
        .with_help(HELP)
        .with_tagline("table-driven argument parsing")
}

pub fn build_table() -> ArgTable {
    ArgTable::new()
        .arg(Arg::new().short('i').long("--input").value(Kind::Text).required())
        .arg(Arg::new().short('q'))
        .arg(
            Arg::new()
                .short('c')
                .long("--config")
                .value(Kind::Text)
                .optional()
                .default_val("default"),
        )
        .arg(Arg::new().short('v').long("--verbose"))
        .arg(Arg::new().short('o').long("--offset").value(Kind::Uint64).required())
        .arg(Arg::new().long("--name").value(Kind::Text).required())
        .arg(Arg::new().long("--dry-run"))
        .arg(Arg::positional("ARGNAME").value(Kind::Text).required())
        .arg(Arg::positional("LENGTH").value(Kind::Uint64).required())
        .arg(Arg::positional("FILTER").value(Kind::Text).optional())
}

/// Everything the demo reports, pulled out of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub input: String,
    pub quiet: u32,
    pub config: String,
    pub config_count: u32,
    pub verbose: u32,
    pub offset: u64,
    pub name: String,
    pub dry_run: u32,
    pub argname: String,
    pub length: u64,
    pub filter: String,
    pub filter_count: u32,
    pub remaining: Vec<String>,
}

impl Opts {
    pub fn from_parsed(parsed: &Parsed<'_>) -> Self {
        let text = |key: &str| parsed.text(key).unwrap_or_default().to_string();
        Opts {
            input: text("--input"),
            quiet: parsed.count("-q"),
            config: text("--config"),
            config_count: parsed.count("--config"),
            verbose: parsed.count("--verbose"),
            offset: parsed.get("--offset").unwrap_or(0),
            name: text("--name"),
            dry_run: parsed.count("--dry-run"),
            argname: text("ARGNAME"),
            length: parsed.get("LENGTH").unwrap_or(0),
            filter: text("FILTER"),
            filter_count: parsed.count("FILTER"),
            remaining: parsed.leftover().to_vec(),
        }
    }
}

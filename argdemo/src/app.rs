use std::io::{self, Write};

use argtable::{Mode, Parser};

use crate::arguments::{self, Opts};

const SEPARATOR: &str = "------------";

fn write_opts<W: Write>(w: &mut W, opts: &Opts) -> io::Result<()> {
    writeln!(w, "Input file: [{}]", opts.input)?;
    writeln!(w, "Quietness: [{}]", opts.quiet)?;
    writeln!(w, "Config file: [{}] (count: {})", opts.config, opts.config_count)?;
    writeln!(w, "Verboseness: [{}]", opts.verbose)?;
    writeln!(w, "File offset: [{}]", opts.offset)?;
    writeln!(w, "Name: [{}]", opts.name)?;
    writeln!(w, "Dry runs: [{}]", opts.dry_run)?;
    writeln!(w, "Argument name: [{}]", opts.argname)?;
    writeln!(w, "File length: [{}]", opts.length)?;
    writeln!(w, "Filter: [{}] (count: {})", opts.filter, opts.filter_count)?;
    writeln!(w, "Remaining arguments:")?;
    for arg in &opts.remaining {
        writeln!(w, "{}", arg)?;
    }
    Ok(())
}

pub fn run() {
    let identity = arguments::identity();
    let parser = match Parser::new(&identity, arguments::build_table()) {
        Ok(parser) => parser,
        Err(e) => identity.fail(false, format_args!(": {}", e)),
    };

    parser.print_usage();
    println!("{}", SEPARATOR);

    let parsed = parser.run_env(Mode::Permute);
    tracing::debug!(index = parsed.index(), "parsed command line");
    let opts = Opts::from_parsed(&parsed);

    let stdout = io::stdout();
    if let Err(e) = write_opts(&mut stdout.lock(), &opts) {
        identity.fail(false, format_args!(": {}", e));
    }
}

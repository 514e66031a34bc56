//! One-line usage synopsis derived from an argument table.
//!
//! Options come first in table order, then positionals. Output wraps before
//! any chunk that would reach the terminal width; a chunk is never split.

use crate::table::{Arg, Arity};

struct Wrapper {
    out: String,
    column: usize,
    width: usize,
}

impl Wrapper {
    fn push(&mut self, chunk: &str) {
        let len = chunk.chars().count();
        if self.column + len >= self.width {
            self.out.push('\n');
            self.column = 0;
        }
        self.out.push_str(chunk);
        self.column += len;
    }
}

fn option_fragment(arg: &Arg) -> Option<String> {
    let name = match (arg.short_name(), arg.long_name()) {
        (Some(c), _) => format!("-{}", c),
        (None, Some(long)) => long.to_string(),
        (None, None) => return None,
    };

    let value = match (arg.get_arity(), arg.placeholder()) {
        (Arity::Optional, Some(p)) => format!(" [{}]", p),
        (Arity::Required, Some(p)) => format!(" {}", p),
        _ => String::new(),
    };

    Some(format!(" [{}{}]", name, value))
}

fn positional_fragment(arg: &Arg) -> String {
    let name = arg.placeholder().unwrap_or_default();
    match arg.get_arity() {
        Arity::Optional => format!(" [{}]", name),
        Arity::Required => format!(" {}", name),
        Arity::None => String::new(),
    }
}

/// Render the synopsis for `args` without a trailing newline.
pub fn render(progname: &str, args: &[Arg], width: usize) -> String {
    let mut w = Wrapper {
        out: String::new(),
        column: 0,
        width,
    };

    w.push("usage: ");
    w.push(progname);

    for arg in args.iter().filter(|a| a.is_option()) {
        if let Some(fragment) = option_fragment(arg) {
            w.push(&fragment);
        }
    }

    for arg in args.iter().filter(|a| a.is_positional()) {
        w.push(&positional_fragment(arg));
    }

    w.out
}

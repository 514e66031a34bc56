use std::io::{self, Write};

use tracing::{debug, trace};

use crate::error::{ParseError, Result};
use crate::identity::Identity;
use crate::table::{Arg, ArgTable, Arity, TableError};
use crate::terminal;
use crate::usage;
use crate::value::{FromValue, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Scan the whole vector; unbindable free tokens move to the leftover.
    #[default]
    Permute,
    /// Stop at the first free token that no positional accepts.
    Stop,
}

/// A validated table bound to the identity that reports its failures.
#[derive(Debug)]
pub struct Parser<'a> {
    identity: &'a Identity,
    args: Vec<Arg>,
}

/// Per-parse counters and values, indexed like the table.
struct Slots {
    counts: Vec<u32>,
    values: Vec<Option<Value>>,
}

impl<'a> Parser<'a> {
    pub fn new(identity: &'a Identity, table: ArgTable) -> std::result::Result<Self, TableError> {
        table.validate()?;
        Ok(Parser {
            identity,
            args: table.args().to_vec(),
        })
    }

    pub fn identity(&self) -> &Identity {
        self.identity
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    // ========================================================================
    // Usage
    // ========================================================================

    pub fn usage(&self, width: usize) -> String {
        usage::render(self.identity.progname(), &self.args, width)
    }

    pub fn write_usage<W: Write>(&self, w: &mut W, width: usize) -> io::Result<()> {
        write!(w, "{}\n", self.usage(width))
    }

    /// Print the synopsis on stdout, wrapped to the terminal.
    pub fn print_usage(&self) {
        let _ = self.write_usage(&mut io::stdout().lock(), terminal::width());
    }

    /// Print the synopsis on stderr, wrapped to the terminal.
    pub fn eprint_usage(&self) {
        let _ = self.write_usage(&mut io::stderr().lock(), terminal::width());
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    /// Parse `argv` (program path first) against the table.
    #[tracing::instrument(level = "debug", skip_all, fields(argc = argv.len(), mode = ?mode))]
    pub fn run<S: AsRef<str>>(&self, argv: &[S], mode: Mode) -> Result<Parsed<'_>> {
        let tokens: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();
        let mut slots = self.reset();
        let mut overflow = vec![false; tokens.len()];
        let mut posindex = 0;

        let mut i = 1;
        while i < tokens.len() {
            let token = tokens[i];
            let next = tokens.get(i + 1).copied();

            if token == "--" {
                trace!("terminator");
                for flag in overflow.iter_mut().skip(i + 1) {
                    *flag = true;
                }
                break;
            }
            if token == "--help" {
                return Err(ParseError::WantsHelp);
            }
            if token == "--version" {
                return Err(ParseError::WantsVersion);
            }

            if token.starts_with("--") {
                trace!(token, "long option");
                let index = self
                    .find_long(token)
                    .ok_or_else(|| ParseError::UnknownArgument(token.to_string()))?;
                i += self.take_long(index, token, next, &mut slots)?;
            } else if let Some(cluster) = token.strip_prefix('-') {
                trace!(token, "short cluster");
                i += self.take_short(cluster, next, &mut slots)?;
            } else if let Some(index) = self.next_positional(posindex) {
                trace!(token, positional = self.args[index].long_name(), "positional");
                slots.counts[index] += 1;
                self.load(index, token, &mut slots)?;
                posindex = index + 1;
            } else if mode == Mode::Stop {
                trace!(token, "stopping at unbound token");
                self.verify(&slots)?;
                return Ok(self.finish(&tokens, slots, &tokens[1..i], &tokens[i..]));
            } else {
                trace!(token, "overflow");
                overflow[i] = true;
            }

            i += 1;
        }

        let body = tokens.get(1..).unwrap_or_default();
        let (consumed, leftover) = shuffle(body.iter().copied(), |n| overflow[n + 1]);
        self.verify(&slots)?;
        Ok(self.finish(&tokens, slots, &consumed, &leftover))
    }

    /// Like [`Parser::run`], handing any failure to the identity, which
    /// prints it and exits.
    pub fn run_or_exit<S: AsRef<str>>(&self, argv: &[S], mode: Mode) -> Parsed<'_> {
        match self.run(argv, mode) {
            Ok(parsed) => parsed,
            Err(err) => self.identity.exit(&err),
        }
    }

    /// Parse the process arguments, exiting on any failure.
    pub fn run_env(&self, mode: Mode) -> Parsed<'_> {
        match crate::env_args() {
            Ok(argv) => self.run_or_exit(argv.as_slice(), mode),
            Err(err) => self.identity.exit(&err),
        }
    }

    fn reset(&self) -> Slots {
        let values = self
            .args
            .iter()
            .map(|arg| {
                if arg.is_positional() {
                    None
                } else {
                    arg.default_value().cloned()
                }
            })
            .collect();
        Slots {
            counts: vec![0; self.args.len()],
            values,
        }
    }

    fn find_long(&self, token: &str) -> Option<usize> {
        self.args.iter().position(|arg| {
            arg.is_option()
                && arg
                    .long_name()
                    .filter(|name| name.starts_with('-'))
                    .and_then(|name| token.strip_prefix(name))
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('='))
        })
    }

    fn find_short(&self, c: char) -> Option<usize> {
        self.args.iter().position(|arg| arg.short_name() == Some(c))
    }

    fn next_positional(&self, from: usize) -> Option<usize> {
        (from..self.args.len()).find(|&n| self.args[n].is_positional())
    }

    /// Returns how many following tokens were consumed as the value.
    fn take_long(
        &self,
        index: usize,
        token: &str,
        next: Option<&str>,
        slots: &mut Slots,
    ) -> Result<usize> {
        let arg = &self.args[index];
        slots.counts[index] += 1;
        if !arg.takes_value() {
            return Ok(0);
        }

        let name = arg.long_name().unwrap_or_default();
        if let Some(value) = token[name.len()..].strip_prefix('=') {
            self.load(index, value, slots)?;
            return Ok(0);
        }
        self.take_detached(index, name, next, slots)
    }

    fn take_short(&self, cluster: &str, next: Option<&str>, slots: &mut Slots) -> Result<usize> {
        for (pos, c) in cluster.char_indices() {
            let index = match self.find_short(c) {
                Some(index) => index,
                None if c == 'h' => return Err(ParseError::WantsHelp),
                None if c == 'V' => return Err(ParseError::WantsVersion),
                None => return Err(ParseError::UnknownArgument(format!("-{}", c))),
            };

            slots.counts[index] += 1;
            if !self.args[index].takes_value() {
                continue;
            }

            let rest = &cluster[pos + c.len_utf8()..];
            if !rest.is_empty() {
                let value = rest.strip_prefix('=').unwrap_or(rest);
                self.load(index, value, slots)?;
                return Ok(0);
            }
            return self.take_detached(index, &format!("-{}", c), next, slots);
        }
        Ok(0)
    }

    /// Value in the following token, if it exists and is not dash-led.
    fn take_detached(
        &self,
        index: usize,
        cited: &str,
        next: Option<&str>,
        slots: &mut Slots,
    ) -> Result<usize> {
        if let Some(value) = next.filter(|n| !n.starts_with('-')) {
            self.load(index, value, slots)?;
            return Ok(1);
        }
        if self.args[index].get_arity() == Arity::Required {
            return Err(ParseError::MissingArgument(cited.to_string()));
        }
        Ok(0)
    }

    fn load(&self, index: usize, text: &str, slots: &mut Slots) -> Result<()> {
        let arg = &self.args[index];
        let Some(kind) = arg.kind() else {
            return Ok(());
        };
        let value = kind.transform(text).map_err(|source| ParseError::InvalidValue {
            value: text.to_string(),
            spelling: arg.spelling(),
            source,
        })?;
        slots.values[index] = Some(value);
        Ok(())
    }

    fn verify(&self, slots: &Slots) -> Result<()> {
        for (arg, &count) in self.args.iter().zip(&slots.counts) {
            if arg.is_positional() && arg.get_arity() == Arity::Required && count == 0 {
                let name = arg.long_name().unwrap_or_default();
                return Err(ParseError::MissingArgument(name.to_string()));
            }
        }
        Ok(())
    }

    fn finish(&self, tokens: &[&str], slots: Slots, consumed: &[&str], leftover: &[&str]) -> Parsed<'_> {
        debug!(consumed = consumed.len(), leftover = leftover.len(), "scan complete");
        Parsed {
            args: &self.args,
            counts: slots.counts,
            values: slots.values,
            program: tokens.first().map(|s| s.to_string()).unwrap_or_default(),
            consumed: consumed.iter().map(|s| s.to_string()).collect(),
            leftover: leftover.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Stable partition: items for which `is_overflow(position)` holds move
/// behind the rest, and both groups keep their relative order.
pub fn shuffle<T>(
    items: impl IntoIterator<Item = T>,
    mut is_overflow: impl FnMut(usize) -> bool,
) -> (Vec<T>, Vec<T>) {
    let mut kept = Vec::new();
    let mut moved = Vec::new();
    for (n, item) in items.into_iter().enumerate() {
        if is_overflow(n) {
            moved.push(item);
        } else {
            kept.push(item);
        }
    }
    (kept, moved)
}

// ============================================================================
// Parsed
// ============================================================================

/// Outcome of a successful parse.
///
/// Lookups take the long name (`--input`, `LENGTH`) or a short spelling
/// (`-q`). Unknown keys read as absent.
#[derive(Debug, Clone)]
pub struct Parsed<'p> {
    args: &'p [Arg],
    counts: Vec<u32>,
    values: Vec<Option<Value>>,
    program: String,
    consumed: Vec<String>,
    leftover: Vec<String>,
}

impl Parsed<'_> {
    fn lookup(&self, key: &str) -> Option<usize> {
        self.args.iter().position(|arg| arg.answers_to(key))
    }

    /// How many times the descriptor matched.
    pub fn count(&self, key: &str) -> u32 {
        self.lookup(key).map_or(0, |n| self.counts[n])
    }

    pub fn is_present(&self, key: &str) -> bool {
        self.count(key) > 0
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.lookup(key).and_then(|n| self.values[n].as_ref())
    }

    pub fn get<T: FromValue>(&self, key: &str) -> Option<T> {
        self.value(key).and_then(T::from_value)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_text)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Option tokens, their values and bound positionals, in input order.
    pub fn consumed(&self) -> &[String] {
        &self.consumed
    }

    /// Tokens nothing in the table claimed, in input order.
    pub fn leftover(&self) -> &[String] {
        &self.leftover
    }

    /// Position of the first leftover token in the reordered vector.
    pub fn index(&self) -> usize {
        1 + self.consumed.len()
    }

    /// The reordered vector: program, consumed tokens, leftover tokens.
    pub fn into_argv(self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.index() + self.leftover.len());
        argv.push(self.program);
        argv.extend(self.consumed);
        argv.extend(self.leftover);
        argv
    }
}

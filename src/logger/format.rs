//! Message rendering and severity decoration
//!
//! Every emitting call goes through one of three renderings:
//! - plain: values joined by single spaces, the sink adds a newline if missing
//! - formatted: a `format_args!` template
//! - joined: values joined by single spaces with one newline always appended

use std::fmt::{self, Display, Write as _};

use super::levels::Severity;

/// Written in place of a value whose `Display` impl fails
const FORMAT_ERROR: &str = "%!(FORMAT ERROR)";

/// Body of a message before decoration
#[derive(Clone, Copy)]
pub(crate) enum Message<'a> {
    Plain(&'a [&'a dyn Display]),
    Formatted(fmt::Arguments<'a>),
    Joined(&'a [&'a dyn Display]),
}

impl Message<'_> {
    /// Render the body after `head`
    pub(crate) fn render(self, head: &str) -> String {
        let mut out = String::from(head);
        match self {
            Message::Plain(values) => push_spaced(&mut out, values),
            Message::Formatted(args) => {
                if out.write_fmt(args).is_err() {
                    out.push_str(FORMAT_ERROR);
                }
            }
            Message::Joined(values) => {
                push_spaced(&mut out, values);
                out.push('\n');
            }
        }
        out
    }
}

/// Severity decoration: "WARN svc " or, with no prefix, "WARN "
pub(crate) fn decoration(severity: Severity, prefix: &str) -> String {
    let label = severity.label().unwrap_or_default();
    if prefix.is_empty() {
        format!("{} ", label)
    } else {
        format!("{} {} ", label, prefix)
    }
}

fn push_spaced(out: &mut String, values: &[&dyn Display]) {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if write!(out, "{}", value).is_err() {
            out.push_str(FORMAT_ERROR);
        }
    }
}

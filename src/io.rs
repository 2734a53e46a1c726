use std::fs;
use std::path::Path;

use crate::error::{Result, SimError};
use crate::translation::{Access, AccessKind};

/// Read a trace file. See [`parse_trace`] for the format.
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<Access>> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_trace(&content)
}

/// Parse whitespace-separated accesses.
///
/// Each access is either a single token such as `w51` / `r374`, or a kind
/// token followed by an address token (`w 51`). `#` comments out the rest
/// of a line.
pub fn parse_trace(content: &str) -> Result<Vec<Access>> {
    let mut accesses = Vec::new();
    let mut pending: Option<(AccessKind, usize)> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.split('#').next().unwrap_or("");

        for token in line.split_whitespace() {
            if let Some((kind, _)) = pending.take() {
                let address = parse_address(token, line_no)?;
                accesses.push(Access { address, kind });
                continue;
            }

            let (kind, rest) = split_kind(token).ok_or_else(|| invalid(token, line_no))?;
            if rest.is_empty() {
                pending = Some((kind, line_no));
            } else {
                let address = parse_address(rest, line_no)?;
                accesses.push(Access { address, kind });
            }
        }
    }

    if let Some((kind, line_no)) = pending {
        return Err(invalid(&kind.tag().to_string(), line_no));
    }
    Ok(accesses)
}

pub fn write_trace<P: AsRef<Path>>(path: P, accesses: &[Access]) -> Result<()> {
    fs::write(path.as_ref(), format_trace(accesses))?;
    Ok(())
}

/// One access per line, in the single-token form
pub fn format_trace(accesses: &[Access]) -> String {
    let mut out = String::with_capacity(accesses.len() * 8);
    for access in accesses {
        out.push_str(&access.to_string());
        out.push('\n');
    }
    out
}

fn split_kind(token: &str) -> Option<(AccessKind, &str)> {
    let mut chars = token.chars();
    let kind = match chars.next()? {
        'r' | 'R' => AccessKind::Read,
        'w' | 'W' => AccessKind::Write,
        _ => return None,
    };
    Some((kind, chars.as_str()))
}

fn parse_address(token: &str, line: usize) -> Result<u64> {
    token.parse().map_err(|_| invalid(token, line))
}

fn invalid(token: &str, line: usize) -> SimError {
    SimError::Trace { line, token: token.to_string() }
}

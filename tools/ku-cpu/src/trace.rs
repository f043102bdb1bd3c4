//! Access trace parsing.
//!
//! A trace is a whitespace-separated sequence of `pid va` pairs. Both are
//! signed bytes; addresses up to 255 are accepted too and keep their low
//! byte.

use mmu_addresses::VirtualAddress;
use mmu_alloc::ProcessId;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TraceEntry {
    pub pid: ProcessId,
    pub va: VirtualAddress,
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum TraceError {
    #[error("entry {entry}: invalid process id {token:?}")]
    InvalidPid { entry: usize, token: String },
    #[error("entry {entry}: invalid virtual address {token:?}")]
    InvalidAddress { entry: usize, token: String },
    #[error("entry {entry}: process id {token:?} has no address")]
    Unpaired { entry: usize, token: String },
}

/// Parse a whole trace. Entries are numbered from 1 in errors.
pub fn parse(input: &str) -> Result<Vec<TraceEntry>, TraceError> {
    let mut tokens = input.split_whitespace();
    let mut entries = Vec::new();

    while let Some(pid) = tokens.next() {
        let entry = entries.len() + 1;
        let Some(va) = tokens.next() else {
            return Err(TraceError::Unpaired {
                entry,
                token: pid.to_owned(),
            });
        };

        let pid = pid
            .parse::<i8>()
            .map(ProcessId::new)
            .map_err(|_| TraceError::InvalidPid {
                entry,
                token: pid.to_owned(),
            })?;
        let va = parse_address(va).ok_or_else(|| TraceError::InvalidAddress {
            entry,
            token: va.to_owned(),
        })?;
        entries.push(TraceEntry { pid, va });
    }

    Ok(entries)
}

fn parse_address(token: &str) -> Option<VirtualAddress> {
    let value = token.parse::<i16>().ok()?;
    (-128..=255)
        .contains(&value)
        .then_some(VirtualAddress::new(value.to_le_bytes()[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_span_lines() {
        let trace = parse("1 0\n1 4 2\n-8\n").unwrap();
        assert_eq!(
            trace,
            [
                TraceEntry {
                    pid: ProcessId::new(1),
                    va: VirtualAddress::new(0)
                },
                TraceEntry {
                    pid: ProcessId::new(1),
                    va: VirtualAddress::new(4)
                },
                TraceEntry {
                    pid: ProcessId::new(2),
                    va: VirtualAddress::new(0xF8)
                },
            ]
        );
    }

    #[test]
    fn unsigned_addresses_keep_their_low_byte() {
        let trace = parse("0 255 0 -1 0 128").unwrap();
        assert_eq!(trace[0].va, trace[1].va);
        assert_eq!(trace[2].va.as_signed(), -128);
    }

    #[test]
    fn out_of_range_tokens_are_rejected() {
        assert_eq!(
            parse("1 256"),
            Err(TraceError::InvalidAddress {
                entry: 1,
                token: "256".into()
            })
        );
        assert_eq!(
            parse("1 0 128 0"),
            Err(TraceError::InvalidPid {
                entry: 2,
                token: "128".into()
            })
        );
        assert!(matches!(parse("x 0"), Err(TraceError::InvalidPid { .. })));
    }

    #[test]
    fn trailing_token_is_an_error() {
        assert_eq!(
            parse("1 0 2"),
            Err(TraceError::Unpaired {
                entry: 2,
                token: "2".into()
            })
        );
    }

    #[test]
    fn empty_trace() {
        assert_eq!(parse(" \n\t"), Ok(Vec::new()));
    }
}

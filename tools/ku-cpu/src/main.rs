//! Replays an access trace against the emulated MMU.
//!
//! ```text
//! ku-cpu <input_file> <pmem_size> <swap_size>
//! ```
//!
//! Every entry prints `[pid] VA: va -> PA: pa`, preceded by
//! `[pid] VA: va -> Page Fault` if the access had to be resolved first.

mod logger;
mod trace;

use crate::logger::StderrLogger;
use crate::trace::{TraceEntry, TraceError};
use mmu_addresses::VirtualAddress;
use mmu_alloc::{AllocError, Mmu, MmuConfig, MmuError, NoCapacity, PageTableBase, ProcessId};
use mmu_vmem::Translation;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::string::FromUtf8Error;
use std::{env, fs};

#[derive(Debug, thiserror::Error)]
enum DriverError {
    #[error("usage: ku-cpu <input_file> <pmem_size> <swap_size>")]
    Usage,
    #[error("invalid {name} {value:?}")]
    InvalidSize { name: &'static str, value: String },
    #[error("failed to open the input file {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("input file {path} is not valid UTF-8: {source}")]
    Encoding {
        path: String,
        #[source]
        source: FromUtf8Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] TraceError),
    #[error("failed to allocate memory: {0}")]
    Init(#[from] AllocError),
    #[error("context switch failed: {0}")]
    ContextSwitch(#[source] NoCapacity),
    #[error("fault handler failed: {0}")]
    FaultHandler(#[source] MmuError),
    #[error("address translation failed for process {pid} at {va}")]
    Translation { pid: ProcessId, va: VirtualAddress },
}

fn main() -> ExitCode {
    if let Err(e) = StderrLogger::from_env().init() {
        eprintln!("ku-cpu: {e}");
    }

    match run(env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ku-cpu: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: impl Iterator<Item = String>) -> Result<(), DriverError> {
    let args: Vec<String> = args.collect();
    let [path, pmem_size, swap_size] = args.as_slice() else {
        return Err(DriverError::Usage);
    };

    let config = MmuConfig::new(
        parse_size("pmem_size", pmem_size)?,
        parse_size("swap_size", swap_size)?,
    );
    let bytes = fs::read(path).map_err(|source| DriverError::Input {
        path: path.clone(),
        source,
    })?;
    let input = String::from_utf8(bytes).map_err(|source| DriverError::Encoding {
        path: path.clone(),
        source,
    })?;
    let trace = trace::parse(&input)?;

    let mut mmu = Mmu::new(config)?;
    let mut out = BufWriter::new(io::stdout().lock());
    replay(&mut mmu, &trace, &mut out)?;
    out.flush()?;

    log::debug!("finished: {:?}", mmu.stats());
    Ok(())
}

fn parse_size(name: &'static str, value: &str) -> Result<usize, DriverError> {
    value.trim().parse().map_err(|_| DriverError::InvalidSize {
        name,
        value: value.to_owned(),
    })
}

/// Run `trace` to completion or to the first failure.
fn replay(mmu: &mut Mmu, trace: &[TraceEntry], out: &mut impl Write) -> Result<(), DriverError> {
    let mut current: Option<(ProcessId, PageTableBase)> = None;

    for &TraceEntry { pid, va } in trace {
        let base = match current {
            Some((running, base)) if running == pid => base,
            _ => {
                let base = mmu
                    .admit_or_switch(pid)
                    .map_err(DriverError::ContextSwitch)?;
                current = Some((pid, base));
                base
            }
        };

        let pa = match mmu.translate(base, va) {
            Translation::Mapped(pa) => pa,
            Translation::Fault => {
                mmu.resolve_fault(pid, va)
                    .map_err(DriverError::FaultHandler)?;
                writeln!(out, "[{pid}] VA: {} -> Page Fault", va.as_signed())?;

                mmu.translate(base, va)
                    .physical_address()
                    .ok_or(DriverError::Translation { pid, va })?
            }
        };
        writeln!(out, "[{pid}] VA: {} -> PA: {}", va.as_signed(), pa.as_signed())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay_str(pmem: usize, swap: usize, input: &str) -> (String, Result<(), DriverError>) {
        let mut mmu = Mmu::init(pmem, swap).unwrap();
        let trace = trace::parse(input).unwrap();
        let mut out = Vec::new();
        let result = replay(&mut mmu, &trace, &mut out);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn faults_are_reported_before_the_translation() {
        let (out, result) = replay_str(16, 16, "1 0 1 1 1 -4");
        assert!(result.is_ok());
        assert_eq!(
            out,
            "[1] VA: 0 -> Page Fault\n\
             [1] VA: 0 -> PA: 4\n\
             [1] VA: 1 -> PA: 5\n\
             [1] VA: -4 -> Page Fault\n\
             [1] VA: -4 -> PA: 8\n"
        );
    }

    #[test]
    fn switching_processes_keeps_their_mappings_apart() {
        let (out, result) = replay_str(16, 16, "1 0 2 0 1 0");
        assert!(result.is_ok());
        assert_eq!(
            out,
            "[1] VA: 0 -> Page Fault\n\
             [1] VA: 0 -> PA: 4\n\
             [2] VA: 0 -> Page Fault\n\
             [2] VA: 0 -> PA: 12\n\
             [1] VA: 0 -> PA: 4\n"
        );
    }

    #[test]
    fn exhausted_swap_stops_the_replay() {
        let (out, result) = replay_str(8, 8, "1 0 1 4 1 8");
        assert_eq!(out.lines().count(), 4);
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            DriverError::FaultHandler(MmuError::NoCapacity(NoCapacity::SwapExhausted))
        ));
        assert_eq!(err.to_string(), "fault handler failed: no free swap slot");
    }

    #[test]
    fn failed_context_switch() {
        let (out, result) = replay_str(8, 0, "1 0 2 0");
        assert_eq!(out.lines().count(), 2);
        let err = result.unwrap_err();
        assert!(matches!(err, DriverError::ContextSwitch(NoCapacity::SwapExhausted)));
        assert_eq!(err.to_string(), "context switch failed: no free swap slot");
    }

    #[test]
    fn wrong_argument_count() {
        let args = ["trace.txt", "16"].map(String::from).into_iter();
        assert!(matches!(run(args), Err(DriverError::Usage)));
    }

    #[test]
    fn missing_input_file() {
        let path = env::temp_dir().join(format!("ku-cpu-missing-{}.txt", std::process::id()));
        let args = [path.display().to_string(), "16".into(), "16".into()].into_iter();
        let err = run(args).unwrap_err();
        assert!(matches!(err, DriverError::Input { .. }));
        assert!(err.to_string().starts_with("failed to open the input file"));
    }

    #[test]
    fn input_that_is_not_utf8_is_an_encoding_error() {
        let path = env::temp_dir().join(format!("ku-cpu-latin1-{}.txt", std::process::id()));
        fs::write(&path, b"1 0\n\xff 4\n").unwrap();
        let args = [path.display().to_string(), "16".into(), "16".into()].into_iter();
        let result = run(args);
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, DriverError::Encoding { .. }));
        assert!(err.to_string().contains("is not valid UTF-8"));
    }

    #[test]
    fn sizes_must_be_numbers() {
        let args = ["trace.txt", "sixteen", "16"].map(String::from).into_iter();
        assert!(matches!(
            run(args),
            Err(DriverError::InvalidSize { name: "pmem_size", .. })
        ));
    }
}

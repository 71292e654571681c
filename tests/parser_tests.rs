use dxt_timeline::parser::{parse_trace, Diagnostic};
use dxt_timeline::utils::error::ParseError;
use pretty_assertions::assert_eq;

const TRACE: &str = "\
# darshan log version: 3.21
# exe: ./vpicio_uni_h5 -f /lustre/run/parts.h5
# nprocs: 2
# start_time: 1600000000
# end_time: 1600000012

# DXT, file_id: 9101, file_name: /nvme/parts.h5-cache/mmap-0.dat
# DXT, rank: 0, hostname: nid00012
# DXT, write_count: 2, read_count: 0
# DXT, mnt_pt: /nvme, fs_type: xfs
# Module    Rank  Wt/Rd  Segment          Offset       Length    Start(s)      End(s)
 X_POSIX       0  write        0               0      1048576      0.1000      0.1200
 X_POSIX       0  write        1         1048576      1048576      0.1300      0.1500

# DXT, file_id: 9202, file_name: /lustre/run/parts.h5
# DXT, rank: 1, hostname: nid00013
# Module    Rank  Wt/Rd  Segment          Offset       Length    Start(s)      End(s)
 X_MPIIO       1  write        0               0      2097152      0.2000      0.9000
 X_POSIX       1  write        0               0      2097152      0.2100      0.8800
";

#[test]
fn test_parse_full_trace() {
    let scan = parse_trace(TRACE);

    assert_eq!(scan.records.len(), 4);
    assert!(scan.diagnostics.is_empty());

    assert_eq!(scan.metadata.nprocs().unwrap(), 2);
    assert_eq!(scan.metadata.start_time().unwrap(), 1_600_000_000.0);
    assert_eq!(scan.metadata.get("exe"), Some("./vpicio_uni_h5 -f /lustre/run/parts.h5"));
    assert_eq!(scan.metadata.primary_file(), Some("parts.h5"));

    let first = &scan.records[0];
    assert_eq!(first.file_identifier, "/nvme/parts.h5-cache/mmap-0.dat");
    assert_eq!(first.file_name(), "mmap-0.dat");
    assert_eq!(first.length, 1_048_576);

    let last = &scan.records[3];
    assert_eq!(last.module, "X_POSIX");
    assert_eq!(last.rank, 1);
    assert_eq!(last.file_name(), "parts.h5");
}

#[test]
fn test_section_lines_become_metadata() {
    // the per-file "# DXT, ..." lines outside a block are plain metadata
    let scan = parse_trace(TRACE);
    assert_eq!(scan.metadata.get("DXT, rank"), Some("1, hostname: nid00013"));
}

#[test]
fn test_metadata_after_event_block() {
    let text = "\
# DXT, file_id: 1, file_name: /lustre/a.h5
# Module    Rank  Wt/Rd  Segment  Offset  Length  Start(s)  End(s)
 X_POSIX 0 read 0 0 8 0.1 0.2

# start_time: 50
# start_time: 60
";
    let scan = parse_trace(text);
    assert_eq!(scan.records.len(), 1);
    assert_eq!(scan.metadata.start_time().unwrap(), 60.0);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let text = "\
# DXT, file_id: 1, file_name: /lustre/a.h5
# Module    Rank  Wt/Rd  Segment  Offset  Length  Start(s)  End(s)
 X_POSIX 0 write 0 0 8 0.1 0.2
 X_POSIX 0 write 0 0
 X_POSIX 0 write 0 zero 8 0.3 0.4
 X_POSIX 0 write 1 8 8 0.5 0.6
";
    let scan = parse_trace(text);

    assert_eq!(scan.records.len(), 2);
    assert_eq!(scan.records[0].start_offset, 0.1);
    assert_eq!(scan.records[1].start_offset, 0.5);

    assert_eq!(
        scan.diagnostics,
        vec![
            Diagnostic {
                line: 4,
                error: ParseError::TooFewFields {
                    expected: 8,
                    found: 5
                },
            },
            Diagnostic {
                line: 5,
                error: ParseError::InvalidInteger {
                    field: "offset",
                    value: "zero".to_string()
                },
            },
        ]
    );
}

#[test]
fn test_header_without_file_name() {
    let text = "\
# DXT, file_id: 1,
# Module
 X_POSIX 0 write 0 0 8 0.1 0.2
";
    let scan = parse_trace(text);
    assert!(scan.records.is_empty());
    assert_eq!(scan.diagnostics.len(), 2);
    assert_eq!(scan.diagnostics[0].error, ParseError::MissingFileIdentifier);
    assert_eq!(scan.diagnostics[1].error, ParseError::NoActiveFile);
}

#[test]
fn test_crlf_input() {
    let text = "# nprocs: 3\r\n# DXT, file_id: 1, file_name: /lustre/a.h5\r\n# Module\r\n X_POSIX 2 read 0 0 8 0.1 0.2\r\n";
    let scan = parse_trace(text);
    assert_eq!(scan.metadata.nprocs().unwrap(), 3);
    assert_eq!(scan.records.len(), 1);
    assert_eq!(scan.records[0].file_identifier, "/lustre/a.h5");
}

//! End-to-end runs of the report driver over captures written to disk.

use std::io::Write;
use std::path::Path;

use netstat_report::app::{App, ReportMode};
use netstat_report::core::error::ParseError;
use netstat_report::core::filters::ConnectionFilter;
use netstat_report::error::NetstatError;
use tempfile::NamedTempFile;

const CAPTURE: &str = "\
14/10/2017
10:30

Active Connections

  Proto  Local Address          Foreign Address        State
  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING
  RpcSs
 [svchost.exe]
  TCP    10.0.0.130:8080        10.0.0.20:61000        ESTABLISHED
 [java.exe]
  TCP    10.0.0.130:8080        10.0.0.21:61001        ESTABLISHED
 [java.exe]
  TCP    10.0.0.130:pptp        10.0.0.22:1            CLOSE_WAIT
 [java.exe]
  TCP    10.0.0.130:50100       10.0.0.40:ms-sql-s     TIME_WAIT
 Can not obtain ownership information
14/10/2017
10:35

  TCP    10.0.0.130:8080        10.0.0.20:61000        FIN_WAIT_2
 [java.exe]
  TCP    10.0.0.130:8080        10.0.0.23:61007        ESTABLISHED
 [javaw.exe]
";

fn capture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run(app: &App, path: &Path) -> Result<String, NetstatError> {
    let mut out = Vec::new();
    app.run(path, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn timeline_report_has_a_row_per_snapshot() {
    let file = capture(CAPTURE);
    let text = run(&App::new(), file.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0]
        .starts_with("# time, ESTABLISHED (total), LISTENING (total), TIME_WAIT (total)"));
    assert!(lines[0].ends_with("SYN_RECEIVED (java), SYN_SENT (java)"));

    // ESTABLISHED, LISTENING, TIME_WAIT, CLOSED, CLOSE_WAIT, CLOSING,
    // FIN_WAIT_1, FIN_WAIT_2, LAST_ACK, SYN_RECEIVED, SYN_SENT
    assert_eq!(
        lines[1],
        "10/14/17 10:30, 2, 1, 1, 0, 1, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0"
    );
    assert_eq!(
        lines[2],
        "10/14/17 10:35, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0"
    );
}

#[test]
fn summary_report_covers_the_whole_capture() {
    let file = capture(CAPTURE);
    let app = App::new().with_mode(ReportMode::Summary);
    let text = run(&app, file.path()).unwrap();
    let lines: Vec<&str> = text.lines().map(str::trim_start).collect();

    assert_eq!(
        lines,
        vec![
            "ESTABLISHED (total/java): 3/2",
            "LISTENING (total/java): 1/0",
            "TIME_WAIT (total/java): 1/0",
            "CLOSE_WAIT (total/java): 1/1",
            "FIN_WAIT_2 (total/java): 1/1",
        ]
    );
}

#[test]
fn filter_selects_the_restricted_column() {
    let file = capture(CAPTURE);
    let filter = ConnectionFilter::new()
        .with_process_name("javaw.exe".to_string())
        .with_remote_host("10.0.0.23".to_string());
    let app = App::new().with_mode(ReportMode::Summary).with_filter(filter);
    let text = run(&app, file.path()).unwrap();

    assert!(text.lines().any(|l| l.trim_start() == "ESTABLISHED (total/javaw): 3/1"));
}

#[test]
fn capture_without_connections() {
    let file = capture("14/10/2017\n10:30\n\nActive Connections\n");
    let text = run(&App::new(), file.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1]
        .trim_start_matches("10/14/17 10:30")
        .split(", ")
        .skip(1)
        .all(|count| count == "0"));

    let summary = run(&App::new().with_mode(ReportMode::Summary), file.path()).unwrap();
    assert_eq!(summary, "");
}

#[test]
fn first_error_aborts_with_its_line_number() {
    let file = capture(
        "\
14/10/2017
10:30
TCP 1.2.3.4:80 1.2.3.5:1 LISTENING
  TCP 1.2.3.4:80 1.2.3.5:1 BOGUS_STATE
",
    );
    let err = run(&App::new(), file.path()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 4: invalid state BOGUS_STATE: TCP 1.2.3.4:80 1.2.3.5:1 BOGUS_STATE"
    );
    assert!(matches!(err, NetstatError::Parse(ParseError::UnknownState { line: 4, .. })));
}

#[test]
fn unknown_port_name_is_reported() {
    let file = capture("TCP 1.2.3.4:nosuch 1.2.3.5:1 LISTENING\n");
    let err = run(&App::new().with_mode(ReportMode::Summary), file.path()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 1: unknown standard port nosuch: TCP 1.2.3.4:nosuch 1.2.3.5:1 LISTENING"
    );
}

#[test]
fn malformed_address_quotes_the_whole_line() {
    let file = capture("\nTCP 1.2.3.4 1.2.3.5:1 LISTENING\n");
    let err = run(&App::new().with_mode(ReportMode::Summary), file.path()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 2: missing ':' separator in the local address: TCP 1.2.3.4 1.2.3.5:1 LISTENING"
    );
}

#[test]
fn missing_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    let err = run(&App::new(), &path).unwrap_err();
    assert!(matches!(err, NetstatError::Open { .. }));
    assert!(err.to_string().starts_with("cannot open "));
}

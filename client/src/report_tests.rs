//! Tests for report parsing, rendering and the quality gate.

use super::*;
use crate::test_utils::report_archive;
use rstest::rstest;

fn notification(id: i64, severity: &str, message: &str) -> Notification {
    Notification {
        id,
        severity: severity.to_owned(),
        message: message.to_owned(),
    }
}

fn report_of(notifications: Vec<Notification>) -> Report {
    Report {
        notifications,
        ..Report::default()
    }
}

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<delivery>
  <report>
    <returnValue>1</returnValue>
    <highestSeverity>ERROR</highestSeverity>
    <notification id="1">
      <severity>WARN</severity>
      <message>ok</message>
    </notification>
    <notification id="2">
      <severity>ERROR</severity>
      <message>bad</message>
    </notification>
  </report>
</delivery>"#;

#[test]
fn parses_full_document() {
    let delivery = parse_delivery(SAMPLE).expect("valid document");
    assert_eq!(delivery.report.return_value, "1");
    assert_eq!(delivery.report.highest_severity, "ERROR");
    assert_eq!(
        delivery.report.notifications,
        vec![notification(1, "WARN", "ok"), notification(2, "ERROR", "bad")]
    );
}

#[test]
fn missing_elements_default_to_empty() {
    let delivery = parse_delivery("<delivery><report></report></delivery>").expect("valid");
    assert_eq!(delivery.report, Report::default());
}

#[test]
fn rejects_malformed_xml() {
    assert!(parse_delivery("<delivery><report>").is_err());
}

#[test]
fn renders_fixed_width_lines() {
    let report = report_of(vec![
        notification(1, "WARN", "ok"),
        notification(12, "ERROR", "bad"),
    ]);
    let mut out = Vec::new();
    render_notifications(&report, &mut out).expect("render succeeds");
    assert_eq!(
        String::from_utf8(out).expect("UTF-8"),
        "01 WARN     ok\n12 ERROR    bad\n"
    );
}

#[test]
fn warn_then_error_prints_both_and_fails() {
    let report = report_of(vec![
        notification(1, "WARN", "ok"),
        notification(2, "ERROR", "bad"),
    ]);
    let mut out = Vec::new();
    render_notifications(&report, &mut out).expect("render succeeds");

    assert_eq!(String::from_utf8(out).expect("UTF-8").lines().count(), 2);
    assert_eq!(
        quality_gate(&report),
        GateVerdict::Failed(notification(2, "ERROR", "bad"))
    );
}

#[rstest]
#[case::empty(vec![], true)]
#[case::warn_and_info(vec![notification(1, "WARN", "w"), notification(2, "INFO", "i")], true)]
#[case::lower_case_error(vec![notification(1, "error", "e")], true)]
#[case::fatal(vec![notification(1, "INFO", "i"), notification(2, "FATAL", "f")], false)]
fn quality_gate_matches_exact_severities(
    #[case] notifications: Vec<Notification>,
    #[case] passes: bool,
) {
    assert_eq!(quality_gate(&report_of(notifications)).passed(), passes);
}

#[test]
fn quality_gate_reports_first_blocking_notification() {
    let report = report_of(vec![
        notification(1, "FATAL", "first"),
        notification(2, "ERROR", "second"),
    ]);
    assert_eq!(
        quality_gate(&report),
        GateVerdict::Failed(notification(1, "FATAL", "first"))
    );
}

#[rstest]
#[case::html_page("<html><body><p>Login required</p></body></html>", "html")]
#[case::bare_report("<report><highestSeverity>ERROR</highestSeverity></report>", "report")]
#[case::empty_element("<?xml version=\"1.0\"?><status/>", "status")]
fn rejects_documents_not_rooted_at_delivery(#[case] xml: &str, #[case] root: &str) {
    let err = parse_delivery(xml).expect_err("not a delivery document");
    assert!(matches!(err, DocumentError::UnexpectedRoot { ref found } if found == root));
}

#[test]
fn rejects_document_without_elements() {
    let err = parse_delivery("<!-- nothing here -->").expect_err("no root element");
    assert!(matches!(err, DocumentError::MissingRoot));
}

#[test]
fn accepts_empty_delivery_element() {
    let delivery = parse_delivery("<delivery/>").expect("valid");
    assert_eq!(delivery, Delivery::default());
}

#[test]
fn parses_notifications_interleaved_with_other_elements() {
    let delivery = parse_delivery(
        r#"<delivery><report>
          <notification id="1"><severity>WARN</severity><message>first</message></notification>
          <highestSeverity>ERROR</highestSeverity>
          <notification id="2"><severity>ERROR</severity><message>second</message></notification>
        </report></delivery>"#,
    )
    .expect("valid document");
    assert_eq!(delivery.report.highest_severity, "ERROR");
    assert_eq!(
        delivery.report.notifications,
        vec![notification(1, "WARN", "first"), notification(2, "ERROR", "second")]
    );
}

#[test]
fn message_whitespace_is_trimmed() {
    let delivery = parse_delivery(
        r#"<delivery><report><notification id="3"><severity>INFO</severity><message>  padded  </message></notification></report></delivery>"#,
    )
    .expect("valid document");
    let mut out = Vec::new();
    render_notifications(&delivery.report, &mut out).expect("render succeeds");
    assert_eq!(String::from_utf8(out).expect("UTF-8"), "03 INFO     padded\n");
}

#[test]
fn reads_report_from_archive() {
    let archive = report_archive(&[("report.xml", SAMPLE)]);
    let mut listing = Vec::new();
    let report = read_report_archive(&archive, &mut listing).expect("valid archive");
    assert_eq!(report.notifications.len(), 2);
    assert_eq!(
        String::from_utf8(listing).expect("UTF-8"),
        "Contents of report.xml:\n"
    );
}

#[test]
fn foreign_document_in_archive_is_fatal() {
    let archive = report_archive(&[(
        "login.html",
        "<html><body><p>Login required</p></body></html>",
    )]);
    let err = read_report_archive(&archive, &mut Vec::new()).expect_err("not a report");
    assert!(matches!(
        err,
        ReportError::Xml { ref name, source: DocumentError::UnexpectedRoot { .. } }
            if name == "login.html"
    ));
}

#[test]
fn last_archive_entry_wins() {
    let archive = report_archive(&[
        ("first.xml", SAMPLE),
        (
            "second.xml",
            r#"<delivery><report><notification id="9"><severity>INFO</severity><message>later</message></notification></report></delivery>"#,
        ),
    ]);
    let mut listing = Vec::new();
    let report = read_report_archive(&archive, &mut listing).expect("valid archive");
    assert_eq!(report.notifications, vec![notification(9, "INFO", "later")]);
    assert_eq!(
        String::from_utf8(listing).expect("UTF-8"),
        "Contents of first.xml:\nContents of second.xml:\n"
    );
}

#[test]
fn empty_archive_yields_empty_report() {
    let archive = report_archive(&[]);
    let mut listing = Vec::new();
    let report = read_report_archive(&archive, &mut listing).expect("valid archive");
    assert!(report.notifications.is_empty());
    assert!(listing.is_empty());
}

#[test]
fn malformed_entry_is_fatal() {
    let archive = report_archive(&[("broken.xml", "<delivery><report>")]);
    let err = read_report_archive(&archive, &mut Vec::new()).expect_err("malformed entry");
    assert!(matches!(err, ReportError::Xml { ref name, .. } if name == "broken.xml"));
}

#[test]
fn non_zip_bytes_are_rejected() {
    let err = read_report_archive(b"not a zip file", &mut Vec::new()).expect_err("not an archive");
    assert!(matches!(err, ReportError::Archive(_)));
}

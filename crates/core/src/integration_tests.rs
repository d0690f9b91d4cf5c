//! Integration tests: exercise the full flow against a simulated Aria.
//!
//! These tests drive connect → apply → close through the session and the
//! settings orchestration, then check the exact report stream the device
//! would have seen.

#[cfg(test)]
mod tests {
    use crate::configure::{
        apply_settings, ApplyReport, SettingOutcome, SettingsRequest, EXIT_DPI_FAILED, EXIT_OK,
        EXIT_POLLING_FAILED,
    };
    use crate::device::{DpiLevel, PollingRate};
    use crate::frame::{commit_frame, handshake_frame, CommandKind};
    use crate::session::DeviceSession;
    use crate::transport::mock::MockTransport;

    fn run(mock: &MockTransport, polling: PollingRate, dpi: DpiLevel) -> ApplyReport {
        let mut session = DeviceSession::new(mock);
        session.connect().unwrap();
        let report = apply_settings(&mut session, SettingsRequest { polling, dpi });
        session.close();
        report
    }

    /// Test: polling 1000 + DPI 3200 produces two full transactions, in order.
    #[test]
    fn end_to_end_polling_then_dpi() {
        let mock = MockTransport::aria();
        let report = run(&mock, PollingRate::Hz1000, DpiLevel::Dpi3200);

        assert_eq!(report.exit_code(), EXIT_OK);
        assert_eq!(report.polling, SettingOutcome::Applied);
        assert_eq!(report.dpi, SettingOutcome::Applied);

        let sent = mock.sent();
        assert_eq!(sent.len(), 6);
        assert_eq!(
            mock.sent_kinds(),
            vec![
                Some(CommandKind::Handshake),
                Some(CommandKind::PollingRate),
                Some(CommandKind::Commit),
                Some(CommandKind::Handshake),
                Some(CommandKind::Dpi),
                Some(CommandKind::Commit),
            ]
        );

        assert_eq!(sent[0], handshake_frame().as_bytes());
        assert_eq!(sent[2], commit_frame().as_bytes());
        assert_eq!(&sent[1][6..8], &[0x01, 0x54]);
        assert_eq!(sent[4][6], 0x3F);
        assert_eq!(sent[4][7], 0x3F);
        assert_eq!(sent[4][9], 0xD7);

        assert_eq!(mock.open_count(), 1);
        assert_eq!(mock.close_count(), 1);
    }

    /// Test: 125 Hz is skipped without touching the device; DPI still lands.
    #[test]
    fn hz125_skips_polling_only() {
        let mock = MockTransport::aria();
        let report = run(&mock, PollingRate::Hz125, DpiLevel::Dpi800);

        assert_eq!(report.polling, SettingOutcome::Skipped);
        assert_eq!(report.dpi, SettingOutcome::Applied);
        assert_eq!(report.exit_code(), EXIT_OK);
        assert_eq!(
            mock.sent_kinds(),
            vec![
                Some(CommandKind::Handshake),
                Some(CommandKind::Dpi),
                Some(CommandKind::Commit),
            ]
        );
    }

    /// Test: a failed polling transaction does not stop the DPI transaction.
    #[test]
    fn polling_failure_still_attempts_dpi() {
        let mock = MockTransport::aria();
        mock.fail_on(CommandKind::PollingRate);
        let report = run(&mock, PollingRate::Hz500, DpiLevel::Dpi1600);

        assert!(report.polling.is_failed());
        assert_eq!(report.dpi, SettingOutcome::Applied);
        assert_eq!(report.exit_code(), EXIT_POLLING_FAILED);
        assert_eq!(
            mock.sent_kinds(),
            vec![
                Some(CommandKind::Handshake),
                Some(CommandKind::PollingRate),
                Some(CommandKind::Handshake),
                Some(CommandKind::Dpi),
                Some(CommandKind::Commit),
            ]
        );
    }

    /// Test: every commit failing fails both settings; DPI decides the exit code.
    #[test]
    fn both_failures_report_dpi_code() {
        let mock = MockTransport::aria();
        mock.fail_on(CommandKind::Commit);
        let report = run(&mock, PollingRate::Hz250, DpiLevel::Dpi8000);

        assert!(report.polling.is_failed());
        assert!(report.dpi.is_failed());
        assert_eq!(report.exit_code(), EXIT_DPI_FAILED);
        match &report.dpi {
            SettingOutcome::Failed(msg) => assert!(msg.contains("commit")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(mock.close_count(), 1);
    }

    /// Test: dropping a session after a failed apply still releases the device.
    #[test]
    fn failed_apply_then_drop_releases_device() {
        let mock = MockTransport::aria();
        mock.fail_on(CommandKind::Handshake);
        {
            let mut session = DeviceSession::new(&mock);
            session.connect().unwrap();
            assert!(session.apply_dpi(DpiLevel::Dpi3200).is_err());
        }
        assert_eq!(mock.close_count(), 1);
    }
}

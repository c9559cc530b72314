//! # Desk Flows
//!
//! Several front desk sessions driving one shared queue, the way a clinic
//! runs a reception desk and one or more consulting rooms.
//!
//! ## Flows Tested
//!
//! 1. Reception admits, consulting room attends in priority order
//! 2. A patient cancels at reception while still waiting
//! 3. Re-admission after being attended
//! 4. Export reflects exactly what `list` shows

#[cfg(test)]
mod tests {
    use triage_desk::{DeskError, FrontDesk, Outcome};
    use triage_queue::{
        PatientStatus, PriorityClass, QueueRow, TriageApi, TriageConfig, TriageError,
        TriageService, DEFAULT_TIMESTAMP_FORMAT,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Reception and consulting room sharing one queue.
    fn create_clinic() -> (FrontDesk, FrontDesk) {
        let service = TriageService::new(TriageConfig::for_testing());
        let reception = FrontDesk::new(service.clone(), DEFAULT_TIMESTAMP_FORMAT);
        let consulting = FrontDesk::new(service, DEFAULT_TIMESTAMP_FORMAT);
        (reception, consulting)
    }

    fn say(desk: &mut FrontDesk, line: &str) -> String {
        match desk.handle_line(line) {
            Ok(Some(Outcome::Continue(text))) => text,
            other => panic!("'{}' gave {:?}", line, other),
        }
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_reception_admits_consulting_attends_in_priority_order() {
        let (mut reception, mut consulting) = create_clinic();

        say(&mut reception, "admit PATIENT-A regular Alba Ruiz");
        say(&mut reception, "admit PATIENT-B critical Bruno Sanz");
        say(&mut reception, "admit PATIENT-C urgent Carla Mora");

        assert_eq!(
            say(&mut consulting, "next"),
            "Now attending PATIENT-B Bruno Sanz (Critical)"
        );
        assert_eq!(
            say(&mut consulting, "next"),
            "Now attending PATIENT-C Carla Mora (Urgent)"
        );
        assert_eq!(
            say(&mut consulting, "next"),
            "Now attending PATIENT-A Alba Ruiz (Regular)"
        );
        assert_eq!(say(&mut consulting, "next"), "No patients waiting");
        assert_eq!(consulting.attending_count(), 3);

        // Reception never attended anyone
        let err = reception.handle_line("complete PATIENT-B").unwrap_err();
        assert!(matches!(err, DeskError::NotAttending(_)));

        say(&mut consulting, "complete PATIENT-B");
        assert_eq!(consulting.attending_count(), 2);
    }

    #[test]
    fn test_same_class_served_in_arrival_order() {
        let (mut reception, mut consulting) = create_clinic();

        for i in 1..=5 {
            say(&mut reception, &format!("admit URGENT-0{} urgent Patient {}", i, i));
        }

        for i in 1..=5 {
            let text = say(&mut consulting, "next");
            assert!(text.starts_with(&format!("Now attending URGENT-0{} ", i)), "{}", text);
        }
    }

    #[test]
    fn test_cancel_while_waiting() {
        let (mut reception, mut consulting) = create_clinic();

        say(&mut reception, "admit PATIENT-A urgent Alba Ruiz");
        say(&mut reception, "admit PATIENT-B regular Bruno Sanz");
        say(&mut reception, "cancel PATIENT-A");

        let service = reception.service();
        assert_eq!(service.len(), 1);
        assert!(service.get("PATIENT-A").is_none());

        assert_eq!(
            say(&mut consulting, "next"),
            "Now attending PATIENT-B Bruno Sanz (Regular)"
        );
        assert_eq!(say(&mut consulting, "next"), "No patients waiting");

        // Attended patients cannot be cancelled
        assert_eq!(say(&mut reception, "cancel PATIENT-B"), "No pending turn for PATIENT-B");
    }

    #[test]
    fn test_duplicate_rejected_until_attended() {
        let (mut reception, mut consulting) = create_clinic();

        say(&mut reception, "admit PATIENT-A regular Alba Ruiz");
        let err = reception
            .handle_line("admit PATIENT-A critical Alba Ruiz")
            .unwrap_err();
        assert!(matches!(err, DeskError::Triage(TriageError::DuplicateEntry(_))));

        say(&mut consulting, "next");
        say(&mut consulting, "complete PATIENT-A");

        // Back for a follow-up
        say(&mut reception, "admit PATIENT-A critical Alba Ruiz");
        let entry = reception.service().get("PATIENT-A").unwrap();
        assert_eq!(entry.priority(), PriorityClass::Critical);
        assert_eq!(entry.status(), PatientStatus::Pending);
    }

    #[test]
    fn test_export_matches_list_order() {
        let (mut reception, _) = create_clinic();

        say(&mut reception, "admit PATIENT-A regular Alba Ruiz");
        say(&mut reception, "admit PATIENT-B critical Bruno Sanz");
        say(&mut reception, "admit PATIENT-C urgent Carla Mora");
        say(&mut reception, "admit PATIENT-D crítico Diego León");

        let rows: Vec<QueueRow> =
            serde_json::from_str(&say(&mut reception, "export")).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["PATIENT-B", "PATIENT-D", "PATIENT-C", "PATIENT-A"]);

        let listing = say(&mut reception, "list");
        let listed: Vec<_> = listing
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().nth(1))
            .collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn test_snapshot_does_not_consume() {
        let (mut reception, _) = create_clinic();
        say(&mut reception, "admit PATIENT-A regular Alba Ruiz");
        say(&mut reception, "admit PATIENT-B critical Bruno Sanz");

        let service = reception.service();
        let first = service.snapshot();
        let second = service.snapshot();
        assert_eq!(first, second);
        assert_eq!(service.len(), 2);
    }

    #[test]
    fn test_status_counts_by_class() {
        let (mut reception, mut consulting) = create_clinic();
        say(&mut reception, "admit PATIENT-A regular Alba Ruiz");
        say(&mut reception, "admit PATIENT-B critical Bruno Sanz");
        say(&mut reception, "admit PATIENT-C urgent Carla Mora");
        say(&mut consulting, "next");

        let status = reception.service().status();
        assert_eq!(status.waiting, 2);
        assert_eq!(status.critical, 0);
        assert_eq!(status.urgent, 1);
        assert_eq!(status.regular, 1);

        let text = say(&mut consulting, "status");
        assert!(text.starts_with("Patients waiting: 2 (critical 0, urgent 1, regular 1)"));
        assert!(text.ends_with("attending 1"));
    }

    #[test]
    fn test_quit_only_ends_one_session() {
        let (mut reception, mut consulting) = create_clinic();
        say(&mut reception, "admit PATIENT-A regular Alba Ruiz");

        assert_eq!(reception.handle_line("quit").unwrap(), Some(Outcome::Quit));
        assert_eq!(
            say(&mut consulting, "next"),
            "Now attending PATIENT-A Alba Ruiz (Regular)"
        );
    }
}

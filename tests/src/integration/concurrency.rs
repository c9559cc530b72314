//! # Concurrent Sessions
//!
//! Many desk sessions admitting, cancelling and attending against one queue
//! at the same time.
//!
//! ## Guarantees Checked
//!
//! - Every admitted patient is attended or cancelled exactly once
//! - No attendant ever receives a cancelled patient
//! - Each attendant sees its own patients in non-decreasing service order

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use rand::Rng;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    use triage_desk::{FrontDesk, Outcome};
    use triage_queue::{
        is_service_ordered, PatientEntry, PriorityClass, TriageApi, TriageConfig, TriageService,
        DEFAULT_TIMESTAMP_FORMAT,
    };

    const SESSIONS: usize = 4;
    const PER_SESSION: usize = 100;

    fn random_priority() -> &'static str {
        match rand::thread_rng().gen_range(0..3) {
            0 => "critical",
            1 => "urgent",
            _ => "regular",
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_admit_cancel_and_attend() {
        let service = TriageService::new(TriageConfig::for_testing());
        let cancelled = Arc::new(Mutex::new(HashSet::new()));

        // Reception sessions: admit, and cancel every fifth patient
        let mut receptions = Vec::new();
        for session in 0..SESSIONS {
            let service = service.clone();
            let cancelled = Arc::clone(&cancelled);
            receptions.push(tokio::spawn(async move {
                for i in 0..PER_SESSION {
                    let id = format!("DESK{}-{:05}", session, i);
                    service.request_turn(&id, "Walk-in", random_priority()).unwrap();
                    if i % 5 == 0 && service.cancel(&id).is_some() {
                        cancelled.lock().insert(id);
                    }
                    tokio::task::yield_now().await;
                }
            }));
        }
        for handle in receptions {
            handle.await.unwrap();
        }

        let expected_waiting = SESSIONS * PER_SESSION - cancelled.lock().len();
        assert_eq!(service.len(), expected_waiting);

        // Consulting rooms drain the queue in parallel
        let mut rooms = Vec::new();
        for _ in 0..SESSIONS {
            let service = service.clone();
            rooms.push(tokio::spawn(async move {
                let mut served: Vec<PatientEntry> = Vec::new();
                while let Some(entry) = service.next() {
                    served.push(entry);
                    tokio::task::yield_now().await;
                }
                served
            }));
        }

        let mut all_ids = HashSet::new();
        for handle in rooms {
            let served = handle.await.unwrap();
            // Nothing is admitted while draining, so each room's share is ordered
            assert!(is_service_ordered(served.iter()));
            for entry in served {
                assert!(!cancelled.lock().contains(entry.id().as_str()));
                assert!(all_ids.insert(entry.id().to_string()), "served twice");
            }
        }

        assert_eq!(all_ids.len(), expected_waiting);
        assert!(service.is_empty());
    }

    #[test]
    fn test_desks_on_os_threads_share_queue() {
        let service = TriageService::new(TriageConfig::for_testing());
        let served = Arc::new(Mutex::new(Vec::new()));

        std::thread::scope(|scope| {
            for session in 0..SESSIONS {
                let mut desk = FrontDesk::new(service.clone(), DEFAULT_TIMESTAMP_FORMAT);
                scope.spawn(move || {
                    for i in 0..PER_SESSION {
                        let line = format!("admit THREAD{}-{:05} urgent Walk-in", session, i);
                        desk.handle_line(&line).unwrap();
                    }
                });
            }
        });
        assert_eq!(service.len(), SESSIONS * PER_SESSION);

        std::thread::scope(|scope| {
            for _ in 0..SESSIONS {
                let mut desk = FrontDesk::new(service.clone(), DEFAULT_TIMESTAMP_FORMAT);
                let served = Arc::clone(&served);
                scope.spawn(move || loop {
                    match desk.handle_line("next").unwrap() {
                        Some(Outcome::Continue(text)) if text.starts_with("Now attending") => {
                            served.lock().push(text)
                        }
                        _ => break,
                    }
                });
            }
        });

        let served = served.lock();
        let unique: HashSet<_> = served.iter().collect();
        assert_eq!(served.len(), SESSIONS * PER_SESSION);
        assert_eq!(unique.len(), served.len());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_snapshots_during_mutation_are_consistent() {
        let service = TriageService::new(TriageConfig::for_testing());
        for i in 0..50 {
            service
                .request_turn(&format!("SEED-{:05}", i), "Seed", random_priority())
                .unwrap();
        }

        let writer = {
            let service = service.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    service
                        .request_turn(&format!("LATE-{:05}", i), "Late", random_priority())
                        .unwrap();
                    service.next();
                    tokio::task::yield_now().await;
                }
            })
        };

        let reader = {
            let service = service.clone();
            tokio::spawn(async move {
                for _ in 0..200 {
                    let snapshot = service.snapshot();
                    assert!(is_service_ordered(snapshot.iter()));
                    let ids: HashSet<_> = snapshot.iter().map(|e| e.id().as_str()).collect();
                    assert_eq!(ids.len(), snapshot.len());
                    tokio::time::sleep(Duration::from_micros(50)).await;
                }
            })
        };

        writer.await.unwrap();
        reader.await.unwrap();
        assert_eq!(service.len(), 50);
    }

    #[test]
    fn test_priority_class_counts_survive_concurrency() {
        let service = TriageService::new(TriageConfig::for_testing());

        std::thread::scope(|scope| {
            for class in PriorityClass::ALL {
                let service = service.clone();
                scope.spawn(move || {
                    for i in 0..30 {
                        let id = format!("{}-{:05}", class.label().to_uppercase(), i);
                        service.request_turn(&id, "Walk-in", class.label()).unwrap();
                    }
                });
            }
        });

        let status = service.status();
        assert_eq!(status.waiting, 90);
        for class in PriorityClass::ALL {
            assert_eq!(status.count_for(class), 30);
        }

        let first_regular = service
            .snapshot()
            .iter()
            .position(|e| e.priority() == PriorityClass::Regular)
            .unwrap();
        assert_eq!(first_regular, 60);
    }
}

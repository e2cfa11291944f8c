//! Integration tests for pisr-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use pisr_core::{Point, TaskId, VehicleId};
    use pisr_sim::VisitRecord;

    use crate::csv::CsvWriter;
    use crate::row::{AgeRow, VisitRow};
    use crate::writer::OutputWriter;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn visit_row(vehicle_id: u32, task_id: u32, time: f64) -> VisitRow {
        let record = VisitRecord {
            vehicle_id: VehicleId(vehicle_id),
            task_id:    TaskId(task_id),
            time,
            trajectory: vec![Point::new(0.0, 0.0), Point::new(1000.0, 0.5)],
        };
        VisitRow::from(&record)
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path(), 3).unwrap();
        assert!(dir.path().join("visits.csv").exists());
        assert!(dir.path().join("task_ages.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), 3).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("visits.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["vehicle_id", "task_id", "time", "waypoints"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("task_ages.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["time", "phase", "age_1", "age_2", "age_3"]);
    }

    #[test]
    fn csv_visit_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), 2).unwrap();
        w.write_visit(&visit_row(100, 2, 40.0)).unwrap();
        w.write_visit(&visit_row(200, 1, 52.5)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("visits.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "100");
        assert_eq!(&rows[0][1], "2");
        assert_eq!(&rows[0][2], "40");
        assert_eq!(&rows[0][3], "0,0;1000,0.5");
        assert_eq!(&rows[1][2], "52.5");
    }

    #[test]
    fn csv_age_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), 2).unwrap();
        w.write_ages(&AgeRow { time: 40.0, phase: "pre", ages: vec![40.0, 40.0] }).unwrap();
        w.write_ages(&AgeRow { time: 40.01, phase: "post", ages: vec![40.0, 0.0] }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("task_ages.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "pre");
        assert_eq!(&rows[1][0], "40.01");
        assert_eq!(&rows[1][1], "post");
        assert_eq!(&rows[1][3], "0");
    }

    #[test]
    fn csv_rejects_wrong_width() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), 3).unwrap();
        let err = w.write_ages(&AgeRow { time: 0.0, phase: "pre", ages: vec![0.0] }).unwrap_err();
        assert!(matches!(err, OutputError::AgeWidth { expected: 3, got: 1 }));
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), 1).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn first_visit_has_no_waypoints() {
        let record = VisitRecord {
            vehicle_id: VehicleId(100),
            task_id:    TaskId(1),
            time:       0.0,
            trajectory: Vec::new(),
        };
        assert_eq!(VisitRow::from(&record).waypoints, "");
    }

    #[test]
    fn integration_csv() {
        use pisr_behavior::{CommunicationStrategy, Md2wrp, RoutingPolicy};
        use pisr_core::SimConfig;
        use pisr_fleet::{TaskRegistry, TrackedFields, VehicleState};
        use pisr_pathing::PathingStrategy;
        use pisr_sim::{SimBuilder, VehicleSetup};

        use crate::observer::HistoryObserver;

        let tasks = TaskRegistry::from_positions(&[Point::new(0.0, 0.0), Point::new(1000.0, 0.0)]);
        let state = VehicleState::new(VehicleId(100), 0, TaskId(1), 0.0, 25.0, 30f64.to_radians(), 0.0, f64::INFINITY)
            .unwrap();
        let policy = Md2wrp::new(5.0, vec![1.0, 1.0], PathingStrategy::Euclidean, &tasks, 25.0).unwrap();
        let mut sim = SimBuilder::new(SimConfig::visits(5), tasks)
            .vehicle(VehicleSetup {
                state,
                routing:       RoutingPolicy::Md2wrp(policy),
                pathing:       PathingStrategy::Euclidean,
                communication: CommunicationStrategy::None,
                fields:        TrackedFields::ALL,
            })
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path(), 2).unwrap();
        let mut obs = HistoryObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no output errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("visits.csv")).unwrap();
        let visits: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(visits.len(), 5);
        let tasks: Vec<&str> = visits.iter().map(|r| r.get(1).unwrap()).collect();
        assert_eq!(tasks, ["1", "2", "1", "2", "1"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("task_ages.csv")).unwrap();
        let ages: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(ages.len(), 10, "a pre and a post snapshot per visit");
        assert_eq!(&ages[0][1], "pre");
        assert_eq!(&ages[1][1], "post");
    }

    #[test]
    fn observer_keeps_first_error() {
        use pisr_sim::{AgeSnapshot, SimObserver, SnapshotPhase};

        use crate::observer::HistoryObserver;

        let dir = tmp();
        let writer = CsvWriter::new(dir.path(), 2).unwrap();
        let mut obs = HistoryObserver::new(writer);
        let bad = AgeSnapshot { time: 0.0, phase: SnapshotPhase::PreVisit, ages: vec![1.0] };
        let worse = AgeSnapshot { time: 1.0, phase: SnapshotPhase::PostVisit, ages: vec![1.0, 2.0, 3.0] };
        obs.on_age_snapshot(&bad);
        obs.on_age_snapshot(&worse);
        assert!(matches!(obs.take_error(), Some(OutputError::AgeWidth { got: 1, .. })));
        assert!(obs.take_error().is_none());
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{AgeRow, VisitRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_visits() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let row = VisitRow { vehicle_id: 200, task_id: 3, time: 12.5, waypoints: "0,0;5,5".into() };
        w.write_visit(&row).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (vehicle, task, time, waypoints): (u32, u32, f64, String) = conn
            .query_row("SELECT vehicle_id, task_id, time, waypoints FROM visits", [], |r| {
                Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
            })
            .unwrap();
        assert_eq!((vehicle, task, time, waypoints.as_str()), (200, 3, 12.5, "0,0;5,5"));
    }

    #[test]
    fn sqlite_ages_are_long_form() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_ages(&AgeRow { time: 80.0, phase: "pre", ages: vec![80.0, 40.0, 10.0] }).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM task_ages", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 3);
        let age: f64 = conn
            .query_row("SELECT age FROM task_ages WHERE task_id = 2", [], |r| r.get(0))
            .unwrap();
        assert_eq!(age, 40.0);
    }
}

#[cfg(test)]
mod latency_tests {
    use pisr_sim::{AgeSnapshot, SnapshotPhase};

    use crate::latency::{weighted_latency, LatencySummary};

    fn snap(time: f64, ages: &[f64]) -> AgeSnapshot {
        AgeSnapshot { time, phase: SnapshotPhase::PreVisit, ages: ages.to_vec() }
    }

    #[test]
    fn weighted_sum() {
        assert_eq!(weighted_latency(&[10.0, 20.0], &[2.0, 0.5]), 30.0);
    }

    #[test]
    fn trapezoid_average() {
        // L rises 0 → 20 over 10 s and falls back to 0 over the next 10 s.
        let ages = [snap(0.0, &[0.0, 0.0]), snap(10.0, &[10.0, 10.0]), snap(20.0, &[0.0, 0.0])];
        let s = LatencySummary::from_history(&ages, &[1.0, 1.0]);
        assert!((s.mean_latency - 10.0).abs() < 1e-12);
        assert_eq!(s.max_latency, 20.0);
        assert_eq!(s.max_ages, vec![10.0, 10.0]);
        assert_eq!(s.duration, 20.0);
    }

    #[test]
    fn priorities_weight_latency() {
        let ages = [snap(0.0, &[0.0, 0.0]), snap(10.0, &[10.0, 10.0])];
        let s = LatencySummary::from_history(&ages, &[3.0, 0.0]);
        assert_eq!(s.max_latency, 30.0);
        assert!((s.mean_latency - 15.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_histories() {
        assert_eq!(LatencySummary::from_history(&[], &[1.0]), LatencySummary::default());
        let one = LatencySummary::from_history(&[snap(5.0, &[4.0])], &[2.0]);
        assert_eq!(one.mean_latency, 8.0);
        assert_eq!(one.duration, 0.0);
    }
}

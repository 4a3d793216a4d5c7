//! Unit tests for wt-schedule.

use wt_core::{AgentKind, CellId, PresenceRequirements, SimRng};

use crate::{
    AgentSchedule, CellDemand, CellRef, PoolCursor, ScheduleError, Staffing, Visit, VisitQueue,
    distribute, required_personnel,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const CAP: u64 = 1_000_000;

fn pool(kind: AgentKind, n: usize) -> Vec<AgentSchedule> {
    vec![AgentSchedule::for_kind(kind); n]
}

fn total_at(pool: &[AgentSchedule], cell: CellId) -> u64 {
    pool.iter().map(|s| s.queue.ticks_at(cell)).sum()
}

fn real_visits(schedule: &AgentSchedule) -> Vec<Visit> {
    schedule.queue.iter().filter(|v| !v.cell.is_holding()).copied().collect()
}

// ── VisitQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod visit_queue {
    use super::*;

    #[test]
    fn merge_consecutive_same_cell() {
        let mut q = VisitQueue::new();
        q.push_merging(CellId(0), 10);
        q.push_merging(CellId(0), 5);
        q.push_merging(CellId(1), 7);
        q.push_merging(CellId(0), 1);
        let cells: Vec<(CellRef, u32)> = q.iter().map(|v| (v.cell, v.duration)).collect();
        assert_eq!(
            cells,
            vec![
                (CellRef::Cell(CellId(0)), 15),
                (CellRef::Cell(CellId(1)), 7),
                (CellRef::Cell(CellId(0)), 1),
            ]
        );
    }

    #[test]
    fn never_merges_into_holding() {
        let mut q = VisitQueue::new();
        q.push_holding(40);
        q.push_merging(CellId(0), 10);
        assert_eq!(q.len(), 2);
        assert_eq!(q.front(), Some(&Visit { cell: CellRef::Holding, duration: 40 }));
        assert_eq!(q.scheduled_ticks(), 10);
    }

    #[test]
    fn assign_inserts_holding_once() {
        let mut s = AgentSchedule::for_kind(AgentKind::Nurse);
        s.assign(CellId(2), 100, 55);
        s.assign(CellId(3), 50, 999);
        let holding: Vec<_> = s.queue.iter().filter(|v| v.cell.is_holding()).collect();
        assert_eq!(holding.len(), 1);
        assert_eq!(holding[0].duration, 55);
        assert_eq!(s.remaining_allotment, 28_800 - 150);
    }

    #[test]
    #[should_panic(expected = "allotment underflow")]
    fn assign_past_allotment_panics() {
        let mut s = AgentSchedule::for_kind(AgentKind::Visitor);
        s.assign(CellId(0), 3_601, 0);
    }

    #[test]
    fn patient_schedule_is_empty() {
        let s = AgentSchedule::for_kind(AgentKind::Patient);
        assert!(!s.is_schedulable());
        assert!(s.queue.is_empty());
    }
}

// ── Staffing ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod staffing {
    use super::*;

    #[test]
    fn required_rounds_up() {
        // 1 cell × 7 200 / 28 800 = 0.25 → 1 doctor.
        assert_eq!(required_personnel(AgentKind::Doctor, 1, 7_200), 1);
        // 5 cells × 7 200 / 28 800 = 1.25 → 2 doctors.
        assert_eq!(required_personnel(AgentKind::Doctor, 5, 7_200), 2);
        // Nurses: exactly one per cell.
        assert_eq!(required_personnel(AgentKind::Nurse, 7, 28_800), 7);
        // Visitors: 3 h / 1 h = 3 per cell.
        assert_eq!(required_personnel(AgentKind::Visitor, 4, 10_800), 12);
    }

    #[test]
    fn patients_and_zero_requirements_need_nobody() {
        assert_eq!(required_personnel(AgentKind::Patient, 10, 86_400), 0);
        assert_eq!(required_personnel(AgentKind::Doctor, 10, 0), 0);
    }

    #[test]
    fn staffing_from_default_table() {
        let s = Staffing::required(8, &PresenceRequirements::default());
        assert_eq!(s, Staffing { doctors: 2, nurses: 8, visitors: 24 });
        assert_eq!(s.total(), 34);
        assert_eq!(s.get(AgentKind::Patient), 0);
    }

    #[test]
    fn staffing_total_does_not_wrap() {
        let s = Staffing { doctors: u32::MAX, nurses: u32::MAX, visitors: 2 };
        assert_eq!(s.total(), 2 * u64::from(u32::MAX) + 2);
    }
}

// ── distribute ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod distribution {
    use super::*;

    #[test]
    fn single_doctor_covers_requirement_exactly() {
        let mut doctors = pool(AgentKind::Doctor, 1);
        let mut demand = CellDemand::new(CellId(0), AgentKind::Doctor, 7_200);
        let mut cursor = PoolCursor::new();
        let mut rng = SimRng::new(7);

        let assigned = distribute(&mut demand, &mut doctors, &mut cursor, 1_800, &mut rng, CAP).unwrap();

        assert_eq!(assigned, 7_200);
        assert!(demand.is_met());
        assert_eq!(doctors[0].queue.scheduled_ticks(), 7_200);
        assert_eq!(doctors[0].remaining_allotment, 28_800 - 7_200);
        // A lone agent only ever extends its own last entry.
        assert_eq!(real_visits(&doctors[0]).len(), 1);
        assert_eq!(doctors[0].queue.front().unwrap().cell, CellRef::Holding);
    }

    #[test]
    fn two_doctors_share_requirement() {
        let mut doctors = pool(AgentKind::Doctor, 2);
        let mut demand = CellDemand::new(CellId(0), AgentKind::Doctor, 7_200);
        let mut cursor = PoolCursor::new();
        let mut rng = SimRng::new(11);

        distribute(&mut demand, &mut doctors, &mut cursor, 1_800, &mut rng, CAP).unwrap();

        assert_eq!(total_at(&doctors, CellId(0)), 7_200);
        for d in &doctors {
            assert_eq!(
                u64::from(AgentKind::Doctor.daily_allotment() - d.remaining_allotment),
                d.queue.scheduled_ticks()
            );
        }
    }

    #[test]
    fn queues_never_repeat_a_cell_back_to_back() {
        let mut nurses = pool(AgentKind::Nurse, 6);
        let mut cursor = PoolCursor::new();
        let mut rng = SimRng::new(3);
        for c in 0..3 {
            let mut demand = CellDemand::new(CellId(c), AgentKind::Nurse, 28_800);
            distribute(&mut demand, &mut nurses, &mut cursor, 3_600, &mut rng, CAP).unwrap();
            assert_eq!(total_at(&nurses, CellId(c)), 28_800);
        }
        for n in &nurses {
            let visits = real_visits(n);
            for pair in visits.windows(2) {
                assert_ne!(pair[0].cell, pair[1].cell, "unmerged consecutive visits: {visits:?}");
            }
        }
    }

    #[test]
    fn conservation_and_coverage_with_computed_pool() {
        let cells = 5;
        let presence = PresenceRequirements::default();
        let mut rng = SimRng::new(2024);

        for kind in AgentKind::PERSONNEL {
            let req = presence.for_kind(kind);
            let n = required_personnel(kind, cells, req) as usize;
            let mut members = pool(kind, n);
            let mut cursor = PoolCursor::new();
            for c in 0..cells as u32 {
                let mut demand = CellDemand::new(CellId(c), kind, req);
                distribute(&mut demand, &mut members, &mut cursor, kind.max_stay_per_visit(), &mut rng, CAP)
                    .unwrap();
            }
            for c in 0..cells as u32 {
                assert!(total_at(&members, CellId(c)) >= u64::from(req), "{kind} coverage at cell {c}");
            }
            for m in &members {
                assert_eq!(
                    u64::from(kind.daily_allotment() - m.remaining_allotment),
                    m.queue.scheduled_ticks(),
                    "{kind} conservation"
                );
            }
        }
    }

    #[test]
    fn holding_delay_staggers_first_visits() {
        let seed = 99;
        let mut doctors = pool(AgentKind::Doctor, 3);
        let mut demand = CellDemand::new(CellId(0), AgentKind::Doctor, 7_200);
        let mut cursor = PoolCursor::new();
        let mut rng = SimRng::new(seed);
        distribute(&mut demand, &mut doctors, &mut cursor, 1_800, &mut rng, CAP).unwrap();

        // Replay the first two draws: both are bounded by 1 800 because the
        // cell still needs well over 3 600 ticks at that point.
        let mut replay = SimRng::new(seed);
        let d0: u32 = replay.gen_range(0..=1_800);
        let d1: u32 = replay.gen_range(0..=1_800);

        let delays: Vec<u32> = doctors
            .iter()
            .map(|d| {
                let head = d.queue.front().unwrap();
                assert!(head.cell.is_holding());
                head.duration
            })
            .collect();
        assert_eq!(delays, vec![0, d0, d1]);
    }

    #[test]
    fn zero_requirement_touches_nothing() {
        let mut doctors = pool(AgentKind::Doctor, 2);
        let mut demand = CellDemand::new(CellId(0), AgentKind::Doctor, 0);
        let mut cursor = PoolCursor::new();
        let mut rng = SimRng::new(1);
        assert_eq!(distribute(&mut demand, &mut doctors, &mut cursor, 1_800, &mut rng, CAP).unwrap(), 0);
        assert!(doctors.iter().all(|d| d.queue.is_empty()));
    }

    #[test]
    fn empty_pool_is_capacity_exhausted() {
        let mut none: Vec<AgentSchedule> = Vec::new();
        let mut demand = CellDemand::new(CellId(4), AgentKind::Doctor, 7_200);
        let mut rng = SimRng::new(1);
        let err = distribute(&mut demand, &mut none, &mut PoolCursor::new(), 1_800, &mut rng, CAP)
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::CapacityExhausted { cell: CellId(4), kind: AgentKind::Doctor, remaining: 7_200 }
        ));
    }

    #[test]
    fn undersized_pool_is_capacity_exhausted() {
        // One visitor has 3 600 ticks; the cell needs 10 800.
        let mut visitors = pool(AgentKind::Visitor, 1);
        let mut demand = CellDemand::new(CellId(0), AgentKind::Visitor, 10_800);
        let mut rng = SimRng::new(5);
        let err = distribute(&mut demand, &mut visitors, &mut PoolCursor::new(), 900, &mut rng, CAP)
            .unwrap_err();
        match err {
            ScheduleError::CapacityExhausted { remaining, .. } => assert_eq!(remaining, 7_200),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(visitors[0].remaining_allotment, 0);
    }

    #[test]
    fn iteration_cap_stops_the_walk() {
        let mut doctors = pool(AgentKind::Doctor, 1);
        let mut demand = CellDemand::new(CellId(0), AgentKind::Doctor, 7_200);
        let mut rng = SimRng::new(5);
        let err = distribute(&mut demand, &mut doctors, &mut PoolCursor::new(), 1_800, &mut rng, 1)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::IterationCapExceeded { iterations: 1, .. }));
    }

    #[test]
    fn same_seed_same_schedule() {
        let run = |seed| {
            let mut doctors = pool(AgentKind::Doctor, 2);
            let mut demand = CellDemand::new(CellId(0), AgentKind::Doctor, 7_200);
            let mut rng = SimRng::new(seed);
            distribute(&mut demand, &mut doctors, &mut PoolCursor::new(), 1_800, &mut rng, CAP).unwrap();
            doctors
        };
        assert_eq!(run(8), run(8));
    }
}

// ── Census loader ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod census {
    use std::io::Cursor;

    use crate::{ScheduleError, load_census_reader};

    #[test]
    fn absent_cells_get_zero() {
        let csv = "cell,patients\n0,3\n2,1\n";
        let counts = load_census_reader(Cursor::new(csv), 4).unwrap();
        assert_eq!(counts, vec![3, 0, 1, 0]);
    }

    #[test]
    fn repeated_cells_are_summed() {
        let csv = "cell,patients\n1,2\n1,2\n";
        assert_eq!(load_census_reader(Cursor::new(csv), 2).unwrap(), vec![0, 4]);
    }

    #[test]
    fn summed_count_overflow_errors() {
        let csv = "cell,patients\n0,4294967295\n0,1\n";
        let err = load_census_reader(Cursor::new(csv), 1).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse(_)));
    }

    #[test]
    fn out_of_range_cell_errors() {
        let csv = "cell,patients\n5,1\n";
        let err = load_census_reader(Cursor::new(csv), 2).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse(_)));
    }

    #[test]
    fn malformed_row_errors() {
        let csv = "cell,patients\nzero,1\n";
        assert!(load_census_reader(Cursor::new(csv), 2).is_err());
    }
}

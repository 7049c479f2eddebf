//! Integration tests for ds-sim.

use ds_core::{DriftSource, ProbeId, SimClock, SimConfig, Surface, Tick};
use ds_grid::CellKey;
use ds_probe::{ProbeStore, SegmentPolicy, WindConfig};

use crate::{CoverageReport, SimBuilder, SimObserver, Simulation, TickOutcome};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Always returns the same draw.  `0.5` cancels the mid-band bias, so a
/// probe in the middle band moves due east.
struct FixedDrift(f64);

impl DriftSource for FixedDrift {
    fn unit(&mut self) -> f64 {
        self.0
    }
}

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        tick_duration_secs:    3600,
        total_ticks,
        seed:                  42,
        num_threads:           Some(1),
        output_interval_ticks: total_ticks,
    }
}

fn fixed_sim(total_ticks: u64) -> Simulation<FixedDrift> {
    SimBuilder::new(test_config(total_ticks))
        .drift_sources(|_| FixedDrift(0.5))
        .build()
        .unwrap()
}

/// 100 × 40 surface, no latitude motion, 30 units east per tick.
fn ring_sim(policy: SegmentPolicy) -> Simulation<FixedDrift> {
    let surface = Surface::new(-50.0, 50.0, -20.0, 20.0, 1, 4_000).unwrap();
    let wind = WindConfig {
        wind_speed_lon:     30.0,
        max_lat_wind_speed: 0.0,
        lat_band_threshold: 0.0,
        dt_hours:           1.0,
        segment_policy:     policy,
    };
    SimBuilder::new(test_config(100))
        .surface(surface)
        .wind(wind)
        .drift_sources(|_| FixedDrift(0.5))
        .build()
        .unwrap()
}

#[derive(Default)]
struct CountingObserver {
    starts:    usize,
    ends:      usize,
    advanced:  usize,
    snapshots: Vec<Tick>,
    finished:  Option<Tick>,
}

impl SimObserver for CountingObserver {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }

    fn on_tick_end(&mut self, _tick: Tick, outcome: &TickOutcome) {
        self.ends += 1;
        if outcome.advanced {
            self.advanced += 1;
        }
    }

    fn on_snapshot(&mut self, tick: Tick, probes: &ProbeStore, report: &CoverageReport) {
        assert!(!probes.is_empty());
        assert_eq!(report.tick, tick);
        self.snapshots.push(tick);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.finished = Some(final_tick);
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_idle_with_defaults() {
        let sim = SimBuilder::new(test_config(10)).build().unwrap();
        assert_eq!(sim.state(), crate::SimState::Idle);
        assert_eq!(sim.surface, Surface::mars());
        assert!(sim.grid.is_empty());
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn zero_tick_duration_is_rejected() {
        let mut config = test_config(10);
        config.tick_duration_secs = 0;
        assert!(SimBuilder::new(config).build().is_err());
    }

    #[test]
    fn invalid_wind_is_rejected() {
        let wind = WindConfig { dt_hours: 0.0, ..WindConfig::mars() };
        let err = SimBuilder::new(test_config(10)).wind(wind).build().err().unwrap();
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn inverted_surface_is_rejected() {
        let mut surface = Surface::mars();
        surface.lat_min = surface.lat_max;
        assert!(SimBuilder::new(test_config(10)).surface(surface).build().is_err());
    }
}

// ── Deploy ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod deploy_tests {
    use super::*;
    use crate::SimState;

    #[test]
    fn zero_count_is_invalid_argument() {
        let mut sim = fixed_sim(10);
        let err = sim.deploy(0, 0.0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(sim.state(), SimState::Idle);
    }

    #[test]
    fn out_of_range_start_lon_is_invalid_argument() {
        let mut sim = fixed_sim(10);
        for lon in [f64::NAN, f64::INFINITY, 1.0e9, -1.0e9] {
            assert!(sim.deploy(1, lon).unwrap_err().is_invalid_argument(), "lon {lon}");
        }
        assert!(sim.probes.is_empty());
    }

    #[test]
    fn first_deploy_starts_running() {
        let mut sim = fixed_sim(10);
        let ids = sim.deploy(3, 0.0).unwrap();
        assert_eq!(ids, vec![ProbeId(0), ProbeId(1), ProbeId(2)]);
        assert_eq!(sim.state(), SimState::Running);
        assert_eq!(sim.drift.len(), 3);
    }

    #[test]
    fn probes_spread_over_inner_band() {
        let mut sim = fixed_sim(10);
        sim.deploy(3, 0.0).unwrap();
        let lats: Vec<f64> = sim.probes.positions().map(|p| p.lat).collect();
        assert_eq!(lats, vec![-48_360.0, 0.0, 48_360.0]);
        assert!(sim.probes.positions().all(|p| p.lon == 0.0));
    }

    #[test]
    fn single_probe_sits_mid_band() {
        let mut sim = fixed_sim(10);
        sim.deploy(1, 1_000.0).unwrap();
        let probe = sim.probes.get(ProbeId(0)).unwrap();
        assert_eq!((probe.position.lon, probe.position.lat), (1_000.0, 0.0));
        assert_eq!(probe.previous, probe.position);
    }

    #[test]
    fn start_on_lon_max_wraps_to_lon_min() {
        let mut sim = fixed_sim(10);
        sim.deploy(1, sim.surface.lon_max).unwrap();
        assert_eq!(sim.probes.positions().next().unwrap().lon, sim.surface.lon_min);
    }

    #[test]
    fn later_deploy_appends_ids() {
        let mut sim = fixed_sim(10);
        sim.deploy(2, 0.0).unwrap();
        sim.tick().unwrap();
        let more = sim.deploy(2, 0.0).unwrap();
        assert_eq!(more, vec![ProbeId(2), ProbeId(3)]);
        assert_eq!(sim.clock.current_tick, Tick(1));
    }

    #[test]
    fn count_beyond_id_space_is_invalid_argument() {
        let mut sim = fixed_sim(10);
        let err = sim.deploy(usize::MAX, 0.0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(sim.probes.is_empty());
        assert!(sim.drift.is_empty());
        assert_eq!(sim.state(), SimState::Idle);
    }

    #[test]
    fn rejected_deploy_leaves_existing_probes_alone() {
        let mut sim = fixed_sim(10);
        sim.deploy(2, 0.0).unwrap();
        let room = u32::MAX as usize - 2;
        assert!(sim.deploy(room + 1, 0.0).unwrap_err().is_invalid_argument());
        assert_eq!(sim.probes.len(), 2);
        assert_eq!(sim.drift.len(), 2);
    }

    #[test]
    fn deploy_does_not_mark_cells() {
        let mut sim = fixed_sim(10);
        sim.deploy(5, 0.0).unwrap();
        assert!(sim.grid.is_empty());
        assert_eq!(sim.snapshot().last_cell, None);
    }
}

// ── Tick ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn idle_tick_is_noop() {
        let mut sim = fixed_sim(10);
        let outcome = sim.tick().unwrap();
        assert!(!outcome.advanced);
        assert_eq!(outcome.tick, Tick::ZERO);
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
        assert!(sim.grid.is_empty());
    }

    #[test]
    fn running_tick_advances_clock_by_one() {
        let mut sim = fixed_sim(10);
        sim.deploy(1, 0.0).unwrap();
        for expected in 1..=5 {
            let outcome = sim.tick().unwrap();
            assert!(outcome.advanced);
            assert_eq!(outcome.tick, Tick(expected));
        }
        assert_eq!(sim.clock.current_tick, Tick(5));
    }

    #[test]
    fn eastward_segment_marks_every_cell() {
        let mut sim = fixed_sim(10);
        sim.deploy(1, 0.0).unwrap();

        // (0,0) → (300,0), both ends included.
        assert_eq!(sim.tick().unwrap().new_cells, 301);
        // (300,0) shared with the previous segment.
        assert_eq!(sim.tick().unwrap().new_cells, 300);
        assert_eq!(sim.grid.len(), 601);
        assert!(sim.grid.contains(CellKey::new(0, 0)));
        assert!(sim.grid.contains(CellKey::new(600, 0)));
    }

    #[test]
    fn previous_tracks_last_position() {
        let mut sim = fixed_sim(10);
        sim.deploy(1, 0.0).unwrap();
        sim.tick().unwrap();
        let probe = sim.probes.get(ProbeId(0)).unwrap();
        assert_eq!(probe.position.lon, 300.0);
        assert_eq!(probe.previous, probe.position);
    }

    #[test]
    fn snapshot_reports_last_cell() {
        let mut sim = fixed_sim(10);
        sim.deploy(1, 0.0).unwrap();
        sim.tick().unwrap();
        let snap = sim.snapshot();
        assert_eq!(snap.tick, Tick(1));
        assert_eq!(snap.explored_cells, 301);
        assert_eq!(snap.last_cell, Some(CellKey::new(300, 0)));
    }

    #[test]
    fn coverage_never_decreases() {
        let mut sim = SimBuilder::new(test_config(500)).build().unwrap();
        sim.deploy(5, 0.0).unwrap();
        let mut last = 0;
        for _ in 0..500 {
            sim.tick().unwrap();
            let explored = sim.snapshot().explored_cells;
            assert!(explored >= last);
            last = explored;
        }
        assert!(last > 0);
    }

    #[test]
    fn probes_stay_on_surface() {
        let mut sim = SimBuilder::new(test_config(300)).build().unwrap();
        sim.deploy(8, 0.0).unwrap();
        for _ in 0..300 {
            sim.tick().unwrap();
            assert!(sim.probes.positions().all(|p| sim.surface.contains(p)));
        }
    }

    #[test]
    fn same_seed_same_coverage() {
        let run = |seed: u64| {
            let mut config = test_config(200);
            config.seed = seed;
            let mut sim = SimBuilder::new(config).build().unwrap();
            sim.deploy(4, -10_000.0).unwrap();
            for _ in 0..200 {
                sim.tick().unwrap();
            }
            let mut cells: Vec<CellKey> = sim.grid.iter().collect();
            cells.sort();
            cells
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }
}

// ── Boundary crossing ─────────────────────────────────────────────────────────

#[cfg(test)]
mod wrap_tests {
    use super::*;

    #[test]
    fn unwrapped_policy_folds_across_the_seam() {
        let mut sim = ring_sim(SegmentPolicy::Unwrapped);
        sim.deploy(1, 40.0).unwrap();

        let outcome = sim.tick().unwrap();
        assert_eq!(outcome.crossings, 1);
        // 40..=49 on the east side, -50..=-30 on the west side.
        assert_eq!(outcome.new_cells, 31);
        assert!(sim.grid.contains(CellKey::new(49, 0)));
        assert!(sim.grid.contains(CellKey::new(-50, 0)));
        assert!(sim.grid.contains(CellKey::new(-30, 0)));
        assert!(!sim.grid.contains(CellKey::new(0, 0)));
        assert_eq!(sim.probes.positions().next().unwrap().lon, -30.0);
    }

    #[test]
    fn teleported_policy_draws_across_the_surface() {
        let mut sim = ring_sim(SegmentPolicy::Teleported);
        sim.deploy(1, 40.0).unwrap();

        let outcome = sim.tick().unwrap();
        assert_eq!(outcome.crossings, 1);
        // (40,0) → (-30,0) straight back across the middle.
        assert_eq!(outcome.new_cells, 71);
        assert!(sim.grid.contains(CellKey::new(0, 0)));
        assert!(!sim.grid.contains(CellKey::new(49, 0)));
    }

    #[test]
    fn policies_agree_away_from_the_seam() {
        let mut a = ring_sim(SegmentPolicy::Unwrapped);
        let mut b = ring_sim(SegmentPolicy::Teleported);
        a.deploy(1, -40.0).unwrap();
        b.deploy(1, -40.0).unwrap();
        for _ in 0..2 {
            assert_eq!(a.tick().unwrap(), b.tick().unwrap());
        }
        assert_eq!(a.grid.len(), b.grid.len());
    }

    #[test]
    fn full_lap_covers_the_ring_once() {
        let mut sim = ring_sim(SegmentPolicy::Unwrapped);
        sim.deploy(1, 0.0).unwrap();
        for _ in 0..10 {
            sim.tick().unwrap();
        }
        // 300 units travelled around a 100-cell ring.
        assert_eq!(sim.grid.len(), 100);
    }
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use super::*;

    fn mars_report(explored_cells: u64) -> CoverageReport {
        let surface = Surface::mars();
        CoverageReport {
            explored_cells,
            cells_per_unit_area: surface.cells_per_unit_area,
            total_area:          surface.total_area,
            tick:                Tick::ZERO,
            elapsed_days:        0,
        }
    }

    #[test]
    fn small_coverage_shows_zero_percent() {
        let report = mars_report(1_448);
        assert_eq!(report.percent_text(), "0.00");
        assert!((report.explored_area() - 14.48).abs() < 1e-9);
    }

    #[test]
    fn percentage_truncates() {
        assert_eq!(mars_report(4_199_199_999).percent_text(), "28.99");
        assert_eq!(mars_report(4_199_200_000).percent_text(), "29.00");
    }

    #[test]
    fn full_coverage_is_one_hundred() {
        assert_eq!(mars_report(14_480_000_000).percent_text(), "100.00");
    }

    #[test]
    fn elapsed_days_follow_clock() {
        let mut clock = SimClock::default();
        for _ in 0..49 {
            clock.advance().unwrap();
        }
        let report = CoverageReport::new(0, &Surface::mars(), &clock);
        assert_eq!(report.elapsed_days, 2);
        assert_eq!(report.tick, Tick(49));
    }

    #[test]
    fn display_mentions_percent_and_days() {
        let text = mars_report(4_199_200_000).to_string();
        assert!(text.contains("29.00%"), "{text}");
        assert!(text.contains("0 days"), "{text}");
    }

    #[test]
    fn sim_report_matches_grid() {
        let mut sim = fixed_sim(10);
        sim.deploy(1, 0.0).unwrap();
        sim.tick().unwrap();
        let report = sim.report();
        assert_eq!(report.explored_cells, 301);
        assert_eq!(report.tick, Tick(1));
        assert_eq!(report.percent_text(), "0.00");
    }
}

// ── Run loops & observers ─────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_end_tick() {
        let mut sim = fixed_sim(5);
        sim.deploy(1, 0.0).unwrap();
        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
        assert_eq!((obs.starts, obs.ends, obs.advanced), (5, 5, 5));
        assert_eq!(obs.snapshots, vec![Tick(5)]);
        assert_eq!(obs.finished, Some(Tick(5)));
    }

    #[test]
    fn run_while_idle_returns_immediately() {
        let mut sim = fixed_sim(5);
        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 0);
        assert_eq!(obs.finished, Some(Tick::ZERO));
    }

    #[test]
    fn run_ticks_snapshots_on_interval() {
        let mut config = test_config(100);
        config.output_interval_ticks = 2;
        let mut sim = SimBuilder::new(config).drift_sources(|_| FixedDrift(0.5)).build().unwrap();
        sim.deploy(2, 0.0).unwrap();

        let mut obs = CountingObserver::default();
        sim.run_ticks(5, &mut obs).unwrap();
        assert_eq!(obs.ends, 5);
        assert_eq!(obs.snapshots, vec![Tick(2), Tick(4)]);
        assert_eq!(obs.finished, None);
    }

    #[test]
    fn run_ticks_while_idle_reports_unadvanced() {
        let mut sim = fixed_sim(10);
        let mut obs = CountingObserver::default();
        sim.run_ticks(3, &mut obs).unwrap();
        assert_eq!((obs.starts, obs.ends, obs.advanced), (3, 3, 0));
        assert!(obs.snapshots.is_empty());
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let mut config = test_config(4);
        config.output_interval_ticks = 0;
        let mut sim = SimBuilder::new(config).build().unwrap();
        sim.deploy(1, 0.0).unwrap();
        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();
        assert!(obs.snapshots.is_empty());
        assert_eq!(obs.advanced, 4);
    }
}

// ── Read interface ────────────────────────────────────────────────────────────

#[cfg(test)]
mod accessor_tests {
    use super::*;

    #[test]
    fn accessors_expose_current_state() {
        let mut sim = ring_sim(SegmentPolicy::Teleported);
        sim.deploy(2, 0.0).unwrap();
        sim.tick().unwrap();

        assert_eq!(sim.surface().lon_max, 50.0);
        assert_eq!(sim.wind().segment_policy, SegmentPolicy::Teleported);
        assert_eq!(sim.config().total_ticks, 100);
        assert_eq!(sim.clock().current_tick, Tick(1));
        assert_eq!(sim.probes().len(), 2);
        assert_eq!(sim.grid().len(), sim.snapshot().explored_cells);
    }
}

// ── Serial reference ──────────────────────────────────────────────────────────

/// Straight-line re-implementation of the tick loop: one probe at a time,
/// cells marked as they are walked.  The simulation must match it exactly
/// whichever way the motion phase is scheduled.
fn serial_reference(
    config:    &SimConfig,
    count:     usize,
    start_lon: f64,
    ticks:     u64,
) -> (Vec<CellKey>, Vec<ds_core::SurfacePoint>) {
    use ds_core::ProbeRng;
    use ds_grid::{CellFold, CoverageGrid, LineCells};
    use ds_probe::MotionModel;

    let surface = Surface::mars();
    let motion = MotionModel::new(WindConfig::mars()).unwrap();
    let fold = CellFold::for_surface(&surface);

    let mut start = SimBuilder::new(config.clone()).build().unwrap();
    start.deploy(count, start_lon).unwrap();
    let mut positions: Vec<_> = start.probes().positions().collect();
    let mut rngs: Vec<ProbeRng> =
        (0..count).map(|i| ProbeRng::new(config.seed, ProbeId(i as u32))).collect();

    let mut grid = CoverageGrid::new();
    for _ in 0..ticks {
        for (pos, rng) in positions.iter_mut().zip(rngs.iter_mut()) {
            let step = motion.advance(*pos, &surface, rng);
            let walk = LineCells::new(CellKey::from_point(*pos), CellKey::from_point(step.unwrapped));
            grid.merge(walk.filter_map(|key| fold.fold(key)));
            *pos = step.wrapped;
        }
    }
    let mut cells: Vec<CellKey> = grid.iter().collect();
    cells.sort();
    (cells, positions)
}

fn seeded_run(
    config:    SimConfig,
    count:     usize,
    start_lon: f64,
    ticks:     u64,
) -> (Vec<CellKey>, Vec<ds_core::SurfacePoint>) {
    let mut sim = SimBuilder::new(config).build().unwrap();
    sim.deploy(count, start_lon).unwrap();
    for _ in 0..ticks {
        sim.tick().unwrap();
    }
    let mut cells: Vec<CellKey> = sim.grid().iter().collect();
    cells.sort();
    (cells, sim.probes().positions().collect())
}

#[cfg(test)]
mod schedule_tests {
    use super::*;

    #[test]
    fn matches_serial_reference_across_the_seam() {
        // Starting 6 720 west of lon_max: every probe wraps after 23 ticks.
        let config = test_config(60);
        let (cells, positions) = seeded_run(config.clone(), 6, 100_000.0, 60);
        let (want_cells, want_positions) = serial_reference(&config, 6, 100_000.0, 60);
        assert_eq!(positions, want_positions);
        assert_eq!(cells, want_cells);
        assert!(positions.iter().all(|p| p.lon < 0.0));
    }
}

#[cfg(all(test, feature = "parallel"))]
mod parallel_tests {
    use super::*;

    #[test]
    fn thread_pool_matches_serial_reference() {
        for threads in [Some(1), Some(4), None] {
            let mut config = test_config(80);
            config.seed = 2024;
            config.num_threads = threads;
            let got = seeded_run(config.clone(), 16, 90_000.0, 80);
            let want = serial_reference(&config, 16, 90_000.0, 80);
            assert_eq!(got, want, "num_threads {threads:?}");
        }
    }
}

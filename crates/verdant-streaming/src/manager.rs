//! Chunk lifecycle around a moving observer.
//!
//! Each tick decides which chunks are needed, advances at most one build by
//! one time slice, installs finished chunks and evicts everything outside the
//! render radius. At most one chunk is ever pending.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use verdant_config::{Config, ConfigError, MeshConfig, RadiusShape, VegetationConfig};
use verdant_mesh::{
    ChunkBuild, ChunkCoord, ChunkGeometry, ChunkSpec, MeshError, SliceOutcome, SliceScheduler,
};
use verdant_terrain::TerrainSampler;

use crate::backend::SurfaceBackend;
use crate::region::needed_coords;
use crate::snapshot::{ChunkSnapshot, ChunkView};
use crate::table::{ActiveChunk, ChunkTable};

/// Ticks a failed chunk waits before it is picked again.
///
/// Heights are a pure function of seed and position, so a chunk that failed
/// will usually fail again; the wait lets every other needed chunk go first.
pub const FAILURE_BACKOFF_TICKS: u64 = 30;

/// Lifecycle state of a chunk coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    /// No entry and no build. Evicted and failed chunks return here.
    Unrequested,
    /// Currently being built.
    Pending,
    /// Built and installed.
    Active,
}

/// What happened during one tick.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    /// Chunk containing the observer.
    pub observer: ChunkCoord,
    /// Size of the needed set.
    pub needed: usize,
    /// In-flight build dropped because its chunk left the needed set.
    pub cancelled: Option<ChunkCoord>,
    /// Build started this tick.
    pub started: Option<ChunkCoord>,
    /// How the build slice ended, if a build ran.
    pub slice: Option<SliceOutcome>,
    /// Chunk installed this tick.
    pub installed: Option<ChunkCoord>,
    /// Build that failed this tick; the chunk will be retried.
    pub failed: Option<(ChunkCoord, MeshError)>,
    /// Chunks evicted this tick, in coordinate order.
    pub evicted: Vec<ChunkCoord>,
}

/// Running totals since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamingStats {
    pub ticks: u64,
    pub builds_started: u64,
    pub builds_completed: u64,
    pub builds_failed: u64,
    pub builds_cancelled: u64,
    pub chunks_evicted: u64,
}

/// Owns the active chunk table and the single in-flight build.
pub struct StreamingManager<B: SurfaceBackend> {
    sampler: Arc<TerrainSampler>,
    mesh: MeshConfig,
    vegetation: VegetationConfig,
    chunk_size: f64,
    resolution: u32,
    render_radius: u32,
    radius_shape: RadiusShape,
    scheduler: SliceScheduler,
    backend: B,
    table: ChunkTable<B::Handle>,
    in_flight: Option<ChunkBuild>,
    /// Failed coordinates and the tick from which they may be retried.
    retry_at: FxHashMap<ChunkCoord, u64>,
    epoch: u64,
    stats: StreamingStats,
}

impl<B: SurfaceBackend> StreamingManager<B> {
    /// Create a manager over an existing sampler.
    ///
    /// Refuses to start on an invalid configuration.
    pub fn new(
        config: &Config,
        sampler: Arc<TerrainSampler>,
        backend: B,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let streaming = &config.streaming;
        tracing::info!(
            seed = sampler.seed(),
            chunk_size = streaming.chunk_size,
            resolution = config.mesh.grid_resolution,
            render_radius = streaming.render_radius,
            "streaming manager ready"
        );
        Ok(Self {
            sampler,
            mesh: config.mesh.clone(),
            vegetation: config.vegetation.clone(),
            chunk_size: streaming.chunk_size,
            resolution: config.mesh.grid_resolution,
            render_radius: streaming.render_radius,
            radius_shape: streaming.radius_shape,
            scheduler: SliceScheduler::new(streaming.slice_budget()),
            backend,
            table: ChunkTable::new(),
            in_flight: None,
            retry_at: FxHashMap::default(),
            epoch: 0,
            stats: StreamingStats::default(),
        })
    }

    /// Create a manager and its sampler from one configuration.
    pub fn from_config(config: &Config, backend: B) -> Result<Self, ConfigError> {
        let sampler = Arc::new(TerrainSampler::from_config(config));
        Self::new(config, sampler, backend)
    }

    /// Advance the world by one frame for an observer at `(x, z)`.
    pub fn tick(&mut self, observer_x: f64, observer_z: f64) -> TickReport {
        let observer = ChunkCoord::from_world(observer_x, observer_z, self.chunk_size);
        let needed_list = needed_coords(observer, self.render_radius, self.radius_shape);
        let needed: FxHashSet<ChunkCoord> = needed_list.iter().copied().collect();
        self.stats.ticks += 1;

        let mut report = TickReport {
            observer,
            needed: needed.len(),
            ..Default::default()
        };
        self.retry_at.retain(|coord, _| needed.contains(coord));

        if let Some(build) = &self.in_flight
            && !needed.contains(&build.coord())
        {
            let coord = build.coord();
            tracing::debug!(%coord, rows = build.rows_done(), "chunk left range mid-build, cancelled");
            self.in_flight = None;
            self.stats.builds_cancelled += 1;
            report.cancelled = Some(coord);
        }

        if self.in_flight.is_none()
            && let Some(coord) = self.nearest_missing(observer, &needed_list)
        {
            let spec = ChunkSpec::new(coord, self.chunk_size, self.resolution);
            match ChunkBuild::new(
                spec,
                Arc::clone(&self.sampler),
                self.mesh.clone(),
                self.vegetation.clone(),
            ) {
                Ok(build) => {
                    self.in_flight = Some(build);
                    self.stats.builds_started += 1;
                    report.started = Some(coord);
                }
                Err(e) => self.record_failure(&mut report, coord, e),
            }
        }

        if let Some(mut build) = self.in_flight.take() {
            let coord = build.coord();
            match self.scheduler.drive(&mut build) {
                Ok(outcome) => {
                    report.slice = Some(outcome);
                    if build.is_complete() {
                        match build.finish() {
                            Ok(geometry) => {
                                self.install(coord, geometry);
                                report.installed = Some(coord);
                            }
                            Err(e) => self.record_failure(&mut report, coord, e),
                        }
                    } else {
                        self.in_flight = Some(build);
                    }
                }
                Err(e) => self.record_failure(&mut report, coord, e),
            }
        }

        let mut stale: Vec<ChunkCoord> = self
            .table
            .coords()
            .filter(|c| !needed.contains(c))
            .collect();
        stale.sort();
        for coord in stale {
            if let Some(chunk) = self.table.remove(coord) {
                self.backend.release(chunk.handle);
                self.stats.chunks_evicted += 1;
                report.evicted.push(coord);
            }
        }

        if report.installed.is_some() || !report.evicted.is_empty() {
            self.epoch += 1;
        }
        if !report.evicted.is_empty() {
            tracing::info!(
                evicted = report.evicted.len(),
                active = self.table.len(),
                %observer,
                "evicted chunks out of range"
            );
        }

        report
    }

    /// Smallest squared distance to the observer, ties by coordinate order.
    /// Chunks still backing off from a failure are skipped.
    fn nearest_missing(&self, observer: ChunkCoord, needed: &[ChunkCoord]) -> Option<ChunkCoord> {
        needed
            .iter()
            .copied()
            .filter(|c| !self.table.contains(*c))
            .filter(|c| {
                self.retry_at
                    .get(c)
                    .is_none_or(|&tick| tick <= self.stats.ticks)
            })
            .min_by_key(|c| (c.distance_sq(observer), *c))
    }

    fn install(&mut self, coord: ChunkCoord, geometry: ChunkGeometry) {
        let handle = self.backend.allocate(coord, &geometry);
        let chunk = ActiveChunk {
            geometry: Arc::new(geometry),
            handle,
        };
        if let Some(previous) = self.table.insert(coord, chunk) {
            self.backend.release(previous.handle);
        }
        self.retry_at.remove(&coord);
        self.stats.builds_completed += 1;
        tracing::debug!(%coord, active = self.table.len(), "chunk installed");
    }

    fn record_failure(&mut self, report: &mut TickReport, coord: ChunkCoord, error: MeshError) {
        let retry_at = self.stats.ticks + FAILURE_BACKOFF_TICKS;
        tracing::warn!(%coord, %error, retry_at, "chunk build failed, will retry");
        self.retry_at.insert(coord, retry_at);
        self.stats.builds_failed += 1;
        report.failed = Some((coord, error));
    }

    pub fn state(&self, coord: ChunkCoord) -> ChunkState {
        if self.table.contains(coord) {
            ChunkState::Active
        } else if self.pending() == Some(coord) {
            ChunkState::Pending
        } else {
            ChunkState::Unrequested
        }
    }

    /// The chunk currently being built, if any.
    pub fn pending(&self) -> Option<ChunkCoord> {
        self.in_flight.as_ref().map(ChunkBuild::coord)
    }

    pub fn active_count(&self) -> usize {
        self.table.len()
    }

    /// Active coordinates in coordinate order.
    pub fn active_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<_> = self.table.coords().collect();
        coords.sort();
        coords
    }

    pub fn geometry(&self, coord: ChunkCoord) -> Option<Arc<ChunkGeometry>> {
        self.table.get(coord).map(|c| Arc::clone(&c.geometry))
    }

    /// Height-field elevation; available before any chunk is built.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        self.sampler.height_at(x, z)
    }

    /// Direct field access for minimaps and other coarse consumers.
    pub fn sampler(&self) -> &Arc<TerrainSampler> {
        &self.sampler
    }

    /// Stable view of the active set as of the last tick.
    pub fn snapshot(&self) -> ChunkSnapshot {
        let mut chunks: Vec<ChunkView> = self
            .table
            .iter()
            .map(|(coord, chunk)| ChunkView {
                coord,
                geometry: Arc::clone(&chunk.geometry),
            })
            .collect();
        chunks.sort_by_key(|v| v.coord);
        ChunkSnapshot::new(self.epoch, self.chunk_size, chunks)
    }

    /// `true` if nothing was installed or evicted since `snapshot` was taken.
    pub fn is_current(&self, snapshot: &ChunkSnapshot) -> bool {
        snapshot.epoch() == self.epoch
    }

    /// Incremented whenever the active set changes.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn stats(&self) -> StreamingStats {
        self.stats
    }

    pub fn chunk_size(&self) -> f64 {
        self.chunk_size
    }

    pub fn render_radius(&self) -> u32 {
        self.render_radius
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Drop the in-flight build, release every surface and hand back the backend.
    pub fn shutdown(mut self) -> B {
        self.in_flight = None;
        let drained = self.table.drain_sorted();
        let released = drained.len();
        for (_, chunk) in drained {
            self.backend.release(chunk.handle);
        }
        tracing::info!(released, "streaming manager shut down");
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::region::in_region;

    const UNLIMITED_MS: f64 = 60_000.0;

    fn config(radius: u32, budget_ms: f64) -> Config {
        let mut config = Config::default();
        config.world.seed = 42;
        config.streaming.chunk_size = 150.0;
        config.streaming.render_radius = radius;
        config.streaming.slice_budget_ms = budget_ms;
        config.mesh.grid_resolution = 6;
        config
    }

    fn manager(radius: u32, budget_ms: f64) -> StreamingManager<HeadlessBackend> {
        StreamingManager::from_config(&config(radius, budget_ms), HeadlessBackend::new()).unwrap()
    }

    fn block(x0: i64, x1: i64, z0: i64, z1: i64) -> Vec<ChunkCoord> {
        let mut coords = Vec::new();
        for x in x0..=x1 {
            for z in z0..=z1 {
                coords.push(ChunkCoord::new(x, z));
            }
        }
        coords
    }

    #[test]
    fn test_three_by_three_then_move_one_chunk() {
        let mut m = manager(1, UNLIMITED_MS);

        let first = m.tick(0.0, 0.0);
        assert_eq!(first.observer, ChunkCoord::new(0, 0));
        assert_eq!(first.needed, 9);
        assert_eq!(first.started, Some(ChunkCoord::new(0, 0)));
        assert_eq!(first.installed, Some(ChunkCoord::new(0, 0)));

        for _ in 1..9 {
            let report = m.tick(0.0, 0.0);
            assert!(report.installed.is_some());
        }
        assert_eq!(m.active_count(), 9);
        assert_eq!(m.active_coords(), block(-1, 1, -1, 1));
        for coord in block(-1, 1, -1, 1) {
            assert_eq!(m.state(coord), ChunkState::Active);
        }

        let idle = m.tick(0.0, 0.0);
        assert!(idle.started.is_none() && idle.evicted.is_empty());

        let moved = m.tick(150.0, 0.0);
        assert_eq!(moved.observer, ChunkCoord::new(1, 0));
        assert_eq!(
            moved.evicted,
            vec![
                ChunkCoord::new(-1, -1),
                ChunkCoord::new(-1, 0),
                ChunkCoord::new(-1, 1)
            ]
        );
        assert_eq!(moved.started, Some(ChunkCoord::new(2, 0)));

        let mut started = vec![ChunkCoord::new(2, 0)];
        for _ in 0..2 {
            started.extend(m.tick(150.0, 0.0).started);
        }
        assert_eq!(
            started,
            vec![
                ChunkCoord::new(2, 0),
                ChunkCoord::new(2, -1),
                ChunkCoord::new(2, 1)
            ]
        );
        assert_eq!(m.active_coords(), block(0, 2, -1, 1));
        assert!(m.tick(150.0, 0.0).started.is_none());
    }

    #[test]
    fn test_nearest_first_order() {
        let mut m = manager(2, UNLIMITED_MS);
        let observer = ChunkCoord::new(0, 0);
        let mut last = 0;
        for _ in 0..25 {
            let coord = m.tick(10.0, 10.0).installed.unwrap();
            let d = coord.distance_sq(observer);
            assert!(d >= last, "{coord} built after a farther chunk");
            last = d;
        }
        assert_eq!(m.active_count(), 25);
    }

    #[test]
    fn test_single_flight_with_zero_budget() {
        let mut m = manager(1, 0.0);
        let needed = block(-1, 1, -1, 1);
        let mut installs = 0;

        for tick in 1..=9 * 6 {
            let pending_before = m.pending();
            let report = m.tick(0.0, 0.0);
            if pending_before.is_some() {
                assert!(report.started.is_none(), "second build started on tick {tick}");
            }
            assert_eq!(report.slice.map(SliceOutcome::rows), Some(1));

            let pending = needed
                .iter()
                .filter(|c| m.state(**c) == ChunkState::Pending)
                .count();
            assert!(pending <= 1, "{pending} chunks pending on tick {tick}");

            if report.installed.is_some() {
                installs += 1;
                assert_eq!(tick % 6, 0, "six rows take six ticks");
            }
        }
        assert_eq!(installs, 9);
        assert_eq!(m.active_count(), 9);
        assert!(m.pending().is_none());
    }

    #[test]
    fn test_eviction_completeness_on_walk() {
        let mut m = manager(2, UNLIMITED_MS);
        let path = [
            (0.0, 0.0),
            (160.0, 0.0),
            (320.0, 40.0),
            (320.0, 500.0),
            (-700.0, -700.0),
            (-700.0, -540.0),
        ];
        for (x, z) in path {
            for _ in 0..30 {
                let report = m.tick(x, z);
                for coord in m.active_coords() {
                    assert!(
                        in_region(report.observer, coord, 2, RadiusShape::Square),
                        "stale chunk {coord} around {}",
                        report.observer
                    );
                }
                assert_eq!(m.backend().live_count(), m.active_count());
            }
            assert_eq!(m.active_count(), 25, "needed set not filled at ({x}, {z})");
        }
        let stats = m.stats();
        assert_eq!(stats.builds_completed - stats.chunks_evicted, 25);
    }

    #[test]
    fn test_cancel_when_pending_chunk_leaves_range() {
        let mut m = manager(0, 0.0);
        let first = m.tick(0.0, 0.0);
        assert_eq!(first.started, Some(ChunkCoord::new(0, 0)));
        assert_eq!(m.state(ChunkCoord::new(0, 0)), ChunkState::Pending);

        let jumped = m.tick(1500.0, 0.0);
        assert_eq!(jumped.cancelled, Some(ChunkCoord::new(0, 0)));
        assert_eq!(jumped.started, Some(ChunkCoord::new(10, 0)));
        assert_eq!(m.state(ChunkCoord::new(0, 0)), ChunkState::Unrequested);
        assert_eq!(m.stats().builds_cancelled, 1);
        assert_eq!(m.backend().allocated(), 0, "cancelled chunk must not be installed");
    }

    #[test]
    fn test_failed_build_is_retried_after_backoff() {
        let config = config(0, UNLIMITED_MS);
        let mut broken = config.clone();
        broken.terrain.continent.frequency = f64::NAN;
        let sampler = Arc::new(TerrainSampler::from_config(&broken));
        let mut m = StreamingManager::new(&config, sampler, HeadlessBackend::new()).unwrap();
        let origin = ChunkCoord::new(0, 0);

        let report = m.tick(0.0, 0.0);
        assert_eq!(report.started, Some(origin));
        let (coord, error) = report.failed.expect("build should fail");
        assert_eq!(coord, origin);
        assert!(matches!(error, MeshError::NonFiniteHeight { .. }));
        assert_eq!(m.state(origin), ChunkState::Unrequested);

        for _ in 1..FAILURE_BACKOFF_TICKS {
            let report = m.tick(0.0, 0.0);
            assert!(report.started.is_none(), "retried before the backoff ran out");
        }
        let retry = m.tick(0.0, 0.0);
        assert_eq!(retry.started, Some(origin));
        assert!(retry.failed.is_some());

        assert_eq!(m.active_count(), 0);
        assert_eq!(m.stats().builds_failed, 2);
        assert_eq!(m.backend().allocated(), 0);
    }

    /// A chunk fails when any of its lattice heights is non-finite.
    fn chunk_fails(sampler: &TerrainSampler, coord: ChunkCoord, resolution: u32) -> bool {
        let spec = ChunkSpec::new(coord, 150.0, resolution);
        let r = resolution as i64;
        (0..=r).any(|i| {
            (0..=r).any(|j| {
                let x = spec.lattice_world(coord.x * r + i);
                let z = spec.lattice_world(coord.z * r + j);
                !sampler.height_at(x, z).is_finite()
            })
        })
    }

    #[test]
    fn test_failing_chunk_does_not_block_neighbors() {
        let config = config(1, UNLIMITED_MS);
        // Infinite mountains: chunks touching the mountain mask fail, flat land builds.
        let mut broken = config.clone();
        broken.terrain.mountain_height = f64::INFINITY;
        let sampler = Arc::new(TerrainSampler::from_config(&broken));

        let mixed = (0..4000)
            .map(|i| ChunkCoord::new(i, i / 3))
            .find(|center| {
                let fails: Vec<bool> = block(center.x - 1, center.x + 1, center.z - 1, center.z + 1)
                    .into_iter()
                    .map(|c| chunk_fails(&sampler, c, 6))
                    .collect();
                fails[4] && fails.iter().any(|f| !f)
            })
            .expect("a failing chunk next to healthy ones");

        let mut m =
            StreamingManager::new(&config, Arc::clone(&sampler), HeadlessBackend::new()).unwrap();
        let (x, z) = (mixed.x as f64 * 150.0 + 75.0, mixed.z as f64 * 150.0 + 75.0);
        for _ in 0..20 {
            m.tick(x, z);
        }

        let needed = block(mixed.x - 1, mixed.x + 1, mixed.z - 1, mixed.z + 1);
        let (failing, healthy): (Vec<_>, Vec<_>) =
            needed.into_iter().partition(|c| chunk_fails(&sampler, *c, 6));
        for coord in &healthy {
            assert_eq!(m.state(*coord), ChunkState::Active, "{coord} never built");
        }
        for coord in &failing {
            assert_ne!(m.state(*coord), ChunkState::Active);
        }
        assert_eq!(m.active_count(), healthy.len());
        assert_eq!(m.stats().builds_failed, failing.len() as u64);
    }

    #[test]
    fn test_far_observer_streams_at_clamped_edge() {
        let mut m = manager(1, UNLIMITED_MS);
        let report = m.tick(1e300, -1e300);
        assert_eq!(
            report.observer,
            ChunkCoord::new(verdant_mesh::MAX_CHUNK_INDEX, -verdant_mesh::MAX_CHUNK_INDEX)
        );
        assert_eq!(report.installed, Some(report.observer));
        assert!(report.failed.is_none());
    }

    #[test]
    fn test_invalid_config_refused() {
        let mut config = config(1, 12.0);
        config.streaming.chunk_size = 0.0;
        let result = StreamingManager::from_config(&config, HeadlessBackend::new());
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "streaming.chunk_size",
                ..
            })
        ));
    }

    #[test]
    fn test_unbounded_radius_refused() {
        let mut config = config(1, 12.0);
        config.streaming.render_radius = u32::MAX;
        let result = StreamingManager::from_config(&config, HeadlessBackend::new());
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "streaming.render_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_height_at_before_any_chunk() {
        let m = manager(1, 12.0);
        assert_eq!(m.active_count(), 0);
        assert_eq!(m.height_at(123.0, -456.0), m.sampler().height_at(123.0, -456.0));
    }

    #[test]
    fn test_snapshot_ground_queries_and_revalidation() {
        let mut m = manager(1, UNLIMITED_MS);
        for _ in 0..9 {
            m.tick(0.0, 0.0);
        }
        let snapshot = m.snapshot();
        assert_eq!(snapshot.len(), 9);
        assert!(m.is_current(&snapshot));
        assert_eq!(snapshot.ground_height(0.0, 0.0), Some(m.height_at(0.0, 0.0)));
        assert!(snapshot.ground_height(75.0, -75.0).is_some());
        assert!(snapshot.ground_height(1000.0, 0.0).is_none());

        m.tick(150.0, 0.0);
        assert!(!m.is_current(&snapshot));
        // Evicted geometry stays readable through the old snapshot.
        let west = snapshot.get(ChunkCoord::new(-1, 0)).unwrap();
        assert!(m.geometry(west.coord).is_none());
        assert!(west.geometry.ground_height(-75.0, 75.0).is_some());
    }

    #[test]
    fn test_handles_released_exactly_once() {
        let mut m = manager(1, UNLIMITED_MS);
        for x in 0..20 {
            m.tick(x as f64 * 75.0, 0.0);
        }
        let backend = m.shutdown();
        assert_eq!(backend.live_count(), 0);
        assert_eq!(backend.allocated(), backend.released());
        assert_eq!(backend.double_releases(), 0);
    }

    #[test]
    fn test_circle_radius_shape() {
        let mut config = config(2, UNLIMITED_MS);
        config.streaming.radius_shape = RadiusShape::Circle;
        let mut m = StreamingManager::from_config(&config, HeadlessBackend::new()).unwrap();
        let report = m.tick(0.0, 0.0);
        assert_eq!(report.needed, 13);
        for _ in 0..20 {
            m.tick(0.0, 0.0);
        }
        assert_eq!(m.active_count(), 13);
        assert_eq!(m.state(ChunkCoord::new(2, 2)), ChunkState::Unrequested);
    }

    #[test]
    fn test_is_lava_reproducible_across_managers() {
        let a = manager(1, 12.0);
        let b = manager(1, 12.0);
        assert_eq!(
            a.sampler().is_lava_at(1_000_000.0, 1_000_000.0),
            b.sampler().is_lava_at(1_000_000.0, 1_000_000.0)
        );
        assert_eq!(
            a.height_at(1_000_000.0, 1_000_000.0).to_bits(),
            b.height_at(1_000_000.0, 1_000_000.0).to_bits()
        );
    }
}

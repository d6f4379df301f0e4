//! World streaming controller.
//!
//! Each tick the controller derives the padded window from the viewpoint,
//! diffs it against the previous window, generates chunks that entered and
//! evicts chunks that left. It is the only code that subscribes or
//! unsubscribes vegetation, and it always does so in the same step that
//! adds the entity to or removes it from the scene, so the subscriber set
//! equals the set of resident reactive entities after every step.

use ahash::{AHashMap, AHashSet};
use tracing::{debug, info, warn};
use verdant_common::{ChunkKey, EntityIdAllocator};

use crate::broadcast::Broadcaster;
use crate::chunk::{Chunk, VegetationHandle};
use crate::config::{ConfigResult, WorldConfig};
use crate::flora::FloraGenerator;
use crate::scene::Scene;
use crate::terrain::TerrainGenerator;
use crate::window::{Window, WindowDiff};

/// What one tick changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Chunks generated
    pub generated: usize,
    /// Chunks evicted
    pub evicted: usize,
}

/// Running totals for the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamingStats {
    /// Ticks processed
    pub ticks: u64,
    /// Chunks generated since start
    pub generated_total: u64,
    /// Chunks evicted since start
    pub evicted_total: u64,
    /// Jump notifications delivered
    pub jumps: u64,
    /// Chunks currently resident
    pub resident_chunks: usize,
    /// Entities currently resident
    pub resident_entities: usize,
    /// Current subscribers
    pub subscribers: usize,
}

/// Streams terrain and trees around a moving viewpoint.
#[derive(Debug)]
pub struct WorldStreamer {
    /// Fixed configuration
    config: WorldConfig,
    /// Terrain columns and the height field
    terrain: TerrainGenerator,
    /// Tree placement
    flora: FloraGenerator,
    /// Window reconciled by the last tick
    window: Window,
    /// Resident chunks
    chunks: AHashMap<ChunkKey, Chunk>,
    /// Jump subscribers
    jump_event: Broadcaster<VegetationHandle>,
    /// Entity ID source, owned by this controller alone
    ids: EntityIdAllocator,
    /// Running totals
    stats: StreamingStats,
}

impl WorldStreamer {
    /// Validates `config` and populates the initial window into `scene`.
    pub fn new<S: Scene>(config: WorldConfig, scene: &mut S) -> ConfigResult<Self> {
        config.validate()?;
        let window = Window::initial(&config);
        let mut streamer = Self {
            terrain: TerrainGenerator::new(&config),
            flora: FloraGenerator::new(&config),
            window,
            chunks: AHashMap::new(),
            jump_event: Broadcaster::new(),
            ids: EntityIdAllocator::new(),
            stats: StreamingStats::default(),
            config,
        };

        for key in window.keys(streamer.config.block_size).iter() {
            streamer.generate(key, scene);
        }
        streamer.refresh_stats();

        info!(
            seed = streamer.config.seed,
            left = window.left,
            right = window.right,
            chunks = streamer.chunks.len(),
            "World streamer ready"
        );
        Ok(streamer)
    }

    /// Reconciles the world with a viewpoint centred at `center_x`.
    ///
    /// Viewpoints past [`crate::window::WORLD_EDGE_LIMIT`] stream the chunks at
    /// the edge.
    pub fn tick<S: Scene>(&mut self, center_x: f32, scene: &mut S) -> TickReport {
        self.stats.ticks += 1;
        let current = Window::around(center_x, &self.config);
        let diff = WindowDiff::between(&self.window, &current, self.config.block_size);
        if diff.is_empty() {
            self.window = current;
            return TickReport::default();
        }

        let mut report = TickReport::default();
        for key in diff.entered_keys() {
            if self.generate(key, scene) {
                report.generated += 1;
            }
        }
        for key in diff.exited_keys() {
            if self.evict(key, scene) {
                report.evicted += 1;
            }
        }
        self.window = current;
        self.refresh_stats();

        debug!(
            left = current.left,
            right = current.right,
            generated = report.generated,
            evicted = report.evicted,
            "Window moved"
        );
        report
    }

    /// Delivers the avatar's jump to every resident reactive entity.
    ///
    /// Returns the number of entities that reacted.
    pub fn on_avatar_jump<S: Scene>(&mut self, scene: &mut S) -> usize {
        let chunks = &mut self.chunks;
        let mut reacted = 0;
        self.jump_event.notify_all(|handle| {
            let entity = chunks
                .get_mut(&handle.key)
                .and_then(|chunk| chunk.resolve_mut(&handle));
            match entity {
                Some(entity) => {
                    if let Some(vegetation) = entity.vegetation_mut() {
                        vegetation.react();
                        reacted += 1;
                    }
                    scene.refresh(entity);
                },
                None => warn!("Stale jump subscriber {}", handle.id),
            }
        });
        self.stats.jumps += 1;
        reacted
    }

    /// Generates and registers the chunk for `key`. Returns `false` if the
    /// chunk was already resident.
    fn generate<S: Scene>(&mut self, key: ChunkKey, scene: &mut S) -> bool {
        if self.chunks.contains_key(&key) {
            warn!("Skipping generation of resident {key}");
            return false;
        }

        let block = self.config.block_size;
        let (min_x, max_x) = (key.left_x(block), key.right_x(block));
        let blocks = self.terrain.create_in_range(min_x, max_x);
        let terrain = &self.terrain;
        let trees = self
            .flora
            .create_in_range(min_x, max_x, |x| terrain.surface_top(x));
        let tree_count = trees.len();

        let chunk = Chunk::assemble(
            key,
            blocks,
            trees,
            block,
            self.config.leaf_size,
            self.config.fruit_size,
            &mut self.ids,
        );

        for entity in chunk.entities() {
            scene.add(entity);
        }
        for handle in chunk.vegetation_handles() {
            self.jump_event.subscribe(handle);
        }

        debug!(%key, entities = chunk.len(), trees = tree_count, "Generated chunk");
        self.chunks.insert(key, chunk);
        self.stats.generated_total += 1;
        true
    }

    /// Removes the chunk for `key` from the scene and the broadcaster.
    /// Returns `false` if the chunk was not resident.
    fn evict<S: Scene>(&mut self, key: ChunkKey, scene: &mut S) -> bool {
        let Some(chunk) = self.chunks.remove(&key) else {
            warn!("Skipping eviction of absent {key}");
            return false;
        };

        for entity in chunk.entities() {
            scene.remove(entity);
        }
        for handle in chunk.vegetation_handles() {
            self.jump_event.unsubscribe(&handle);
        }

        debug!(%key, entities = chunk.len(), "Evicted chunk");
        self.stats.evicted_total += 1;
        true
    }

    fn refresh_stats(&mut self) {
        self.stats.resident_chunks = self.chunks.len();
        self.stats.resident_entities = self.chunks.values().map(Chunk::len).sum();
        self.stats.subscribers = self.jump_event.len();
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the terrain generator (and through it the height field).
    #[must_use]
    pub const fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// Returns the window reconciled by the last tick.
    #[must_use]
    pub const fn window(&self) -> Window {
        self.window
    }

    /// Returns the running totals.
    #[must_use]
    pub const fn stats(&self) -> StreamingStats {
        self.stats
    }

    /// Returns the jump broadcaster.
    #[must_use]
    pub const fn jump_event(&self) -> &Broadcaster<VegetationHandle> {
        &self.jump_event
    }

    /// Returns a resident chunk.
    #[must_use]
    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    /// Checks whether a chunk is resident.
    #[must_use]
    pub fn is_resident(&self, key: ChunkKey) -> bool {
        self.chunks.contains_key(&key)
    }

    /// Returns the resident chunk keys in ascending order.
    #[must_use]
    pub fn resident_keys(&self) -> Vec<ChunkKey> {
        let mut keys: Vec<ChunkKey> = self.chunks.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Checks that the subscriber set is exactly the set of resident
    /// reactive entities.
    #[must_use]
    pub fn subscriptions_consistent(&self) -> bool {
        let live: AHashSet<VegetationHandle> = self
            .chunks
            .values()
            .flat_map(Chunk::vegetation_handles)
            .collect();
        live.len() == self.jump_event.len()
            && live.iter().all(|h| self.jump_event.is_subscribed(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::LayoutEntry;
    use crate::entity::{Entity, Role};
    use crate::scene::HeadlessScene;
    use crate::window::WORLD_EDGE_LIMIT;
    use proptest::prelude::*;
    use verdant_common::{Color, EntityId};

    /// 300 px window with no padding, shallow terrain, plenty of trees.
    fn small_config() -> WorldConfig {
        WorldConfig {
            window_width: 300,
            window_height: 600,
            padding_left: 0,
            padding_right: 0,
            terrain_depth: 4,
            tree_probability: 0.5,
            seed: 31,
            ..Default::default()
        }
    }

    fn raw_keys(streamer: &WorldStreamer) -> Vec<i32> {
        streamer.resident_keys().into_iter().map(ChunkKey::raw).collect()
    }

    fn assert_consistent(streamer: &WorldStreamer, scene: &HeadlessScene) {
        let expected: Vec<i32> = streamer
            .window()
            .keys(streamer.config().block_size)
            .iter()
            .map(ChunkKey::raw)
            .collect();
        assert_eq!(raw_keys(streamer), expected);
        assert!(streamer.subscriptions_consistent());
        assert_eq!(scene.len(), streamer.stats().resident_entities);
        assert_eq!(scene.duplicate_adds(), 0);
        assert_eq!(scene.missing_removes(), 0);
        let reactive = scene.len() - scene.count_role(Role::Ground);
        assert_eq!(reactive, streamer.jump_event().len());
    }

    #[test]
    fn test_initial_population() {
        let mut scene = HeadlessScene::new();
        let streamer = WorldStreamer::new(small_config(), &mut scene).expect("valid config");
        assert_eq!(raw_keys(&streamer), (0..10).collect::<Vec<_>>());
        assert_eq!(streamer.stats().generated_total, 10);
        assert_consistent(&streamer, &scene);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut scene = HeadlessScene::new();
        let config = WorldConfig {
            block_size: 0,
            ..Default::default()
        };
        assert!(WorldStreamer::new(config, &mut scene).is_err());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_scroll_right_one_block() {
        let mut scene = HeadlessScene::new();
        let mut streamer = WorldStreamer::new(small_config(), &mut scene).expect("valid config");
        let key0: Vec<EntityId> = streamer
            .chunk(ChunkKey(0))
            .map(|c| c.entities().iter().map(Entity::id).collect())
            .unwrap_or_default();
        assert!(!key0.is_empty());

        let report = streamer.tick(180.0, &mut scene);

        assert_eq!(report, TickReport { generated: 1, evicted: 1 });
        assert_eq!(streamer.window(), Window::new(30, 330));
        assert_eq!(raw_keys(&streamer), (1..11).collect::<Vec<_>>());
        assert!(key0.iter().all(|id| !scene.contains(*id)));
        assert!(streamer
            .jump_event()
            .subscribers()
            .all(|h| h.key != ChunkKey(0)));
        assert_consistent(&streamer, &scene);
    }

    #[test]
    fn test_scroll_left_generates_negative_keys() {
        let mut scene = HeadlessScene::new();
        let mut streamer = WorldStreamer::new(small_config(), &mut scene).expect("valid config");
        streamer.tick(150.0 - 95.0, &mut scene);
        assert_eq!(raw_keys(&streamer), (-4..6).collect::<Vec<_>>());
        assert_consistent(&streamer, &scene);
    }

    #[test]
    fn test_far_viewpoint_streams_at_world_edge() {
        let mut scene = HeadlessScene::new();
        let mut streamer = WorldStreamer::new(small_config(), &mut scene).expect("valid config");
        for center in [2.2e9f32, -2.2e9, 2.2e9, 150.0] {
            streamer.tick(center, &mut scene);
            let window = streamer.window();
            assert_eq!(window.left.rem_euclid(30), 0);
            assert_eq!(window.right.rem_euclid(30), 0);
            assert!(window.left >= -WORLD_EDGE_LIMIT && window.right <= WORLD_EDGE_LIMIT);
            assert!(!streamer.resident_keys().is_empty());
            assert_consistent(&streamer, &scene);
        }
        assert_eq!(streamer.window(), Window::new(0, 300));
    }

    #[test]
    fn test_idle_tick_changes_nothing() {
        let mut scene = HeadlessScene::new();
        let mut streamer = WorldStreamer::new(small_config(), &mut scene).expect("valid config");
        let before = scene.len();
        assert_eq!(streamer.tick(150.0, &mut scene), TickReport::default());
        assert_eq!(streamer.tick(160.0, &mut scene), TickReport::default());
        assert_eq!(scene.len(), before);
        assert_eq!(streamer.stats().ticks, 2);
    }

    #[test]
    fn test_shrink_one_side_grow_other() {
        let mut scene = HeadlessScene::new();
        let config = WorldConfig {
            padding_left: -60,
            ..small_config()
        };
        let mut streamer = WorldStreamer::new(config, &mut scene).expect("valid config");
        assert_eq!(streamer.window(), Window::new(-60, 300));
        // Moving two blocks right exits two keys on the left and enters two
        // on the right in the same tick.
        streamer.tick(210.0, &mut scene);
        assert_eq!(raw_keys(&streamer), (0..12).collect::<Vec<_>>());
        assert_consistent(&streamer, &scene);
    }

    fn layout_of(streamer: &WorldStreamer, key: ChunkKey) -> Vec<LayoutEntry> {
        streamer.chunk(key).map(Chunk::layout).unwrap_or_default()
    }

    #[test]
    fn test_revisit_is_identical() {
        let mut scene = HeadlessScene::new();
        let mut streamer = WorldStreamer::new(small_config(), &mut scene).expect("valid config");
        let original: Vec<Vec<LayoutEntry>> =
            (0..10).map(|k| layout_of(&streamer, ChunkKey(k))).collect();

        streamer.tick(50_000.0, &mut scene);
        assert!(!streamer.is_resident(ChunkKey(0)));
        streamer.tick(-20_000.0, &mut scene);
        streamer.tick(150.0, &mut scene);

        let revisited: Vec<Vec<LayoutEntry>> =
            (0..10).map(|k| layout_of(&streamer, ChunkKey(k))).collect();
        assert_eq!(original, revisited);
        assert_consistent(&streamer, &scene);
    }

    #[test]
    fn test_same_seed_same_world_across_streamers() {
        let mut scene_a = HeadlessScene::new();
        let mut scene_b = HeadlessScene::new();
        let mut a = WorldStreamer::new(small_config(), &mut scene_a).expect("valid config");
        let mut b = WorldStreamer::new(small_config(), &mut scene_b).expect("valid config");
        // Reach the same region along different paths.
        a.tick(3000.0, &mut scene_a);
        b.tick(-900.0, &mut scene_b);
        b.tick(1200.0, &mut scene_b);
        b.tick(3000.0, &mut scene_b);
        for key in a.resident_keys() {
            assert_eq!(layout_of(&a, key), layout_of(&b, key));
        }
    }

    #[test]
    fn test_jump_reaches_only_resident_vegetation() {
        let mut scene = HeadlessScene::new();
        let config = WorldConfig {
            tree_probability: 1.0,
            ..small_config()
        };
        let mut streamer = WorldStreamer::new(config, &mut scene).expect("valid config");
        let subscribers = streamer.jump_event().len();
        assert!(subscribers > 0);

        let reacted = streamer.on_avatar_jump(&mut scene);
        assert_eq!(reacted, subscribers);
        assert_eq!(scene.refreshes(), subscribers as u64);
        let fruits_yellow = scene
            .iter()
            .filter(|(_, e)| e.role == Role::Fruit)
            .all(|(_, e)| e.color == Color::YELLOW);
        assert!(fruits_yellow);

        streamer.tick(180.0, &mut scene);
        let after_move = streamer.jump_event().len();
        let reacted = streamer.on_avatar_jump(&mut scene);
        assert_eq!(reacted, after_move);
        assert_eq!(streamer.stats().jumps, 2);
    }

    #[test]
    fn test_regenerated_vegetation_starts_fresh() {
        let mut scene = HeadlessScene::new();
        let config = WorldConfig {
            tree_probability: 1.0,
            ..small_config()
        };
        let mut streamer = WorldStreamer::new(config, &mut scene).expect("valid config");
        let before = layout_of(&streamer, ChunkKey(0));
        streamer.on_avatar_jump(&mut scene);
        streamer.tick(10_000.0, &mut scene);
        streamer.tick(150.0, &mut scene);
        assert_eq!(layout_of(&streamer, ChunkKey(0)), before);
    }

    #[test]
    fn test_no_duplicate_generation() {
        let mut scene = HeadlessScene::new();
        let mut streamer = WorldStreamer::new(small_config(), &mut scene).expect("valid config");
        for center in [150.0, 400.0, 800.0, 300.0, -600.0, 150.0, 150.0] {
            streamer.tick(center, &mut scene);
            assert_eq!(scene.duplicate_adds(), 0);
            assert_eq!(scene.missing_removes(), 0);
        }
        let stats = streamer.stats();
        assert_eq!(
            stats.generated_total - stats.evicted_total,
            streamer.resident_keys().len() as u64
        );
        assert_eq!(stats.resident_chunks, 10);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn random_walk_keeps_invariants(
            moves in proptest::collection::vec(-2_000.0f32..2_000.0, 1..24),
            jumps in proptest::collection::vec(any::<bool>(), 24),
        ) {
            let mut scene = HeadlessScene::new();
            let mut streamer = WorldStreamer::new(small_config(), &mut scene)
                .expect("valid config");
            let mut center = 150.0f32;
            for (step, delta) in moves.iter().enumerate() {
                center += delta;
                streamer.tick(center, &mut scene);
                if jumps[step] {
                    let reacted = streamer.on_avatar_jump(&mut scene);
                    prop_assert_eq!(reacted, streamer.jump_event().len());
                }
                let expected = Window::around(center, streamer.config()).keys(30);
                let resident = streamer.resident_keys();
                prop_assert_eq!(resident.len(), expected.len());
                prop_assert!(resident.iter().all(|k| expected.contains(*k)));
                prop_assert!(streamer.subscriptions_consistent());
                prop_assert_eq!(scene.len(), streamer.stats().resident_entities);
                prop_assert_eq!(scene.duplicate_adds(), 0);
                prop_assert_eq!(scene.missing_removes(), 0);
            }
        }
    }
}

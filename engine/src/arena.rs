//! Tile arena the entities move in.

use anyhow::bail;
use fov::Bounds;
use glam::{ivec2, vec2, IVec2, Vec2};
use rand::Rng;
use util::{AsciiMap, HashSet};

/// Walls and spawn points of a level on a square tile grid.
#[derive(Clone, Debug)]
pub struct Arena {
    tile_size: f32,
    dim: IVec2,
    walls: HashSet<IVec2>,
    player_spawn: Vec2,
    enemy_spawns: Vec<Vec2>,
    boss_spawn: Option<Vec2>,
}

impl Arena {
    pub const DEFAULT_TILE_SIZE: f32 = 32.0;

    /// Parse an arena from a map drawing.
    ///
    /// `#` is wall, `.` is floor, `@` is the player start, `e` an enemy and
    /// `B` the boss. There must be exactly one player start and at most one
    /// boss.
    pub fn parse(text: &str, tile_size: f32) -> anyhow::Result<Self> {
        Arena::from_map(&AsciiMap::new(text), tile_size)
    }

    pub fn from_map(map: &AsciiMap, tile_size: f32) -> anyhow::Result<Self> {
        if !(tile_size > 0.0) {
            bail!("bad tile size {tile_size}");
        }

        let mut walls = HashSet::default();
        let mut player_spawn = None;
        let mut enemy_spawns = Vec::new();
        let mut boss_spawn = None;

        let center = |p: IVec2| (p.as_vec2() + vec2(0.5, 0.5)) * tile_size;

        for (p, c) in map.iter() {
            match c {
                '#' => {
                    walls.insert(p);
                }
                '.' => {}
                '@' => {
                    if player_spawn.is_some() {
                        bail!("multiple player starts in map");
                    }
                    player_spawn = Some(center(p));
                }
                'e' => enemy_spawns.push(center(p)),
                'B' => {
                    if boss_spawn.is_some() {
                        bail!("multiple bosses in map");
                    }
                    boss_spawn = Some(center(p));
                }
                c => bail!("unknown map cell {c:?} at {p}"),
            }
        }

        let Some(player_spawn) = player_spawn else {
            bail!("map has no player start");
        };

        Ok(Arena {
            tile_size,
            dim: map.dim(),
            walls,
            player_spawn,
            enemy_spawns,
            boss_spawn,
        })
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Size in tiles.
    pub fn dim(&self) -> IVec2 {
        self.dim
    }

    /// World space extents.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: Vec2::ZERO,
            max: self.dim.as_vec2() * self.tile_size,
        }
    }

    pub fn player_spawn(&self) -> Vec2 {
        self.player_spawn
    }

    pub fn enemy_spawns(&self) -> &[Vec2] {
        &self.enemy_spawns
    }

    pub fn boss_spawn(&self) -> Option<Vec2> {
        self.boss_spawn
    }

    pub fn tile_at(&self, pos: Vec2) -> IVec2 {
        (pos / self.tile_size).floor().as_ivec2()
    }

    pub fn tile_center(&self, tile: IVec2) -> Vec2 {
        (tile.as_vec2() + vec2(0.5, 0.5)) * self.tile_size
    }

    pub fn is_wall(&self, tile: IVec2) -> bool {
        self.walls.contains(&tile)
    }

    /// Whether a world position is blocked for movement.
    ///
    /// Everything outside the arena counts as wall.
    pub fn is_wall_at(&self, pos: Vec2) -> bool {
        let tile = self.tile_at(pos);
        tile.x < 0
            || tile.y < 0
            || tile.x >= self.dim.x
            || tile.y >= self.dim.y
            || self.is_wall(tile)
    }

    /// Whether a position is further than one tile size away from the center
    /// of every wall tile.
    pub fn is_clear(&self, pos: Vec2) -> bool {
        let tile = self.tile_at(pos);
        // Wall centers two or more tiles away can't be within range.
        for y in -1..=1 {
            for x in -1..=1 {
                let t = tile + ivec2(x, y);
                if self.is_wall(t)
                    && self.tile_center(t).distance(pos) <= self.tile_size
                {
                    return false;
                }
            }
        }
        true
    }

    /// Look for a random position to teleport to.
    ///
    /// The position is inside the arena, clear of walls and further than
    /// `min_dist` from `avoid`. Gives up after `attempts` samples.
    pub fn sample_teleport(
        &self,
        rng: &mut impl Rng,
        avoid: Vec2,
        min_dist: f32,
        attempts: usize,
    ) -> Option<Vec2> {
        let b = self.bounds();
        if !(b.max.x > 0.0 && b.max.y > 0.0) {
            return None;
        }

        for _ in 0..attempts {
            let pos = vec2(
                rng.gen_range(b.min.x..b.max.x),
                rng.gen_range(b.min.y..b.max.y),
            );
            if !self.is_wall_at(pos)
                && self.is_clear(pos)
                && pos.distance(avoid) > min_dist
            {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
mod test {
    use util::srng;

    use super::*;

    const MAP: &str = "
        ##########
        #@.......#
        #........#
        #...e..e.#
        #.......B#
        ##########";

    #[test]
    fn parse_spawns() {
        let arena = Arena::parse(MAP, 10.0).unwrap();
        assert_eq!(arena.dim(), ivec2(10, 6));
        assert_eq!(arena.player_spawn(), vec2(15.0, 15.0));
        assert_eq!(arena.enemy_spawns(), &[vec2(45.0, 35.0), vec2(75.0, 35.0)]);
        assert_eq!(arena.boss_spawn(), Some(vec2(85.0, 45.0)));
        assert_eq!(arena.bounds().max, vec2(100.0, 60.0));
    }

    #[test]
    fn bad_maps() {
        assert!(Arena::parse("#..#", 10.0).is_err());
        assert!(Arena::parse("#@@#", 10.0).is_err());
        assert!(Arena::parse("#@BB", 10.0).is_err());
        assert!(Arena::parse("#@x#", 10.0).is_err());
        assert!(Arena::parse("@", 0.0).is_err());
        assert!(Arena::parse("@", 1.0).is_ok());
    }

    #[test]
    fn walls() {
        let arena = Arena::parse(MAP, 10.0).unwrap();
        assert!(arena.is_wall_at(vec2(5.0, 5.0)));
        assert!(!arena.is_wall_at(vec2(15.0, 15.0)));
        assert!(arena.is_wall_at(vec2(-1.0, 15.0)));
        assert!(arena.is_wall_at(vec2(15.0, 600.0)));

        // Next to the corner, within a tile's length of the wall centers.
        assert!(!arena.is_clear(vec2(15.0, 15.0)));
        // Middle of the room.
        assert!(arena.is_clear(vec2(45.0, 30.0)));
    }

    #[test]
    fn teleport_targets() {
        let arena = Arena::parse(MAP, 10.0).unwrap();
        let mut rng = srng("teleport");
        let player = vec2(15.0, 15.0);

        for _ in 0..50 {
            let pos =
                arena.sample_teleport(&mut rng, player, 40.0, 100).unwrap();
            assert!(pos.distance(player) > 40.0);
            assert!(!arena.is_wall_at(pos));
            for y in 0..6 {
                for x in 0..10 {
                    let t = ivec2(x, y);
                    if arena.is_wall(t) {
                        assert!(arena.tile_center(t).distance(pos) > 10.0);
                    }
                }
            }
        }
    }

    #[test]
    fn no_room_to_teleport() {
        let arena = Arena::parse(
            "
            ###
            #@#
            ###",
            10.0,
        )
        .unwrap();
        let mut rng = srng("cramped");
        let player = vec2(15.0, 15.0);
        assert_eq!(arena.sample_teleport(&mut rng, player, 0.0, 100), None);
        assert_eq!(arena.sample_teleport(&mut rng, Vec2::ZERO, 0.0, 0), None);
    }
}

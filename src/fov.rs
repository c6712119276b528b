use crate::map::Map;

/// Field of view over the current map.
///
/// The turn loop owns one of these through the `Context`. It is rebuilt from the
/// map by `initialize_fov` and recomputed around the player when needed; it is
/// never saved.
pub trait Fov {
    // forget all cells and resize to a map, nothing is visible until the next compute
    fn reset(&mut self, width: i32, height: i32);
    fn set(&mut self, x: i32, y: i32, transparent: bool, walkable: bool);
    fn compute_fov(&mut self, x: i32, y: i32, radius: i32, light_walls: bool);
    fn is_in_fov(&self, x: i32, y: i32) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
struct Cell {
    transparent: bool,
    walkable: bool,
    visible: bool,
}

// simple ray casting fov: a cell is seen when the straight line to it only crosses transparent cells
#[derive(Clone, Debug)]
pub struct SightMap {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl SightMap {
    pub fn new(width: i32, height: i32) -> Self {
        SightMap {
            width,
            height,
            cells: vec![Cell::default(); (width.max(0) * height.max(0)) as usize],
        }
    }

    // sight map already populated from a map
    pub fn from_map(map: &Map) -> Self {
        let width = map.len() as i32;
        let height = map.first().map_or(0, |column| column.len() as i32);
        let mut fov = SightMap::new(width, height);
        for (x, column) in map.iter().enumerate() {
            for (y, tile) in column.iter().enumerate() {
                fov.set(x as i32, y as i32, !tile.block_sight, !tile.blocked);
            }
        }
        fov
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(false, |i| self.cells[i].walkable)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    fn transparent(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(false, |i| self.cells[i].transparent)
    }

    // walk the bresenham line from origin to target, checking every cell strictly between them
    fn line_is_clear(&self, (x0, y0): (i32, i32), (x1, y1): (i32, i32)) -> bool {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            if (x, y) == (x1, y1) {
                return true;
            }
            if !self.transparent(x, y) {
                return false;
            }
        }
    }
}

impl Fov for SightMap {
    fn reset(&mut self, width: i32, height: i32) {
        *self = SightMap::new(width, height);
    }

    fn set(&mut self, x: i32, y: i32, transparent: bool, walkable: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].transparent = transparent;
            self.cells[i].walkable = walkable;
        }
    }

    fn compute_fov(&mut self, x: i32, y: i32, radius: i32, light_walls: bool) {
        for cell in self.cells.iter_mut() {
            cell.visible = false;
        }
        let origin = match self.index(x, y) {
            Some(i) => i,
            None => return,
        };
        self.cells[origin].visible = true;

        // radius 0 means unlimited, like libtcod
        let reach = if radius > 0 {
            radius
        } else {
            self.width.max(self.height)
        };
        for ty in (y - reach)..=(y + reach) {
            for tx in (x - reach)..=(x + reach) {
                let i = match self.index(tx, ty) {
                    Some(i) => i,
                    None => continue,
                };
                if (tx, ty) == (x, y) || (tx - x).pow(2) + (ty - y).pow(2) > reach * reach {
                    continue;
                }
                if !light_walls && !self.cells[i].transparent {
                    continue;
                }
                if self.line_is_clear((x, y), (tx, ty)) {
                    self.cells[i].visible = true;
                }
            }
        }
    }

    fn is_in_fov(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(false, |i| self.cells[i].visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Tile;

    // 7x7 open room with a wall column at x == 4 from y 1 to 5
    fn room() -> Map {
        let mut map = vec![vec![Tile::empty(); 7]; 7];
        for y in 1..6 {
            map[4][y] = Tile::wall();
        }
        map
    }

    #[test]
    fn walls_block_sight_but_are_lit() {
        let mut fov = SightMap::from_map(&room());
        fov.compute_fov(1, 3, 10, true);

        assert!(fov.is_in_fov(1, 3));
        assert!(fov.is_in_fov(3, 3));
        assert!(fov.is_in_fov(4, 3)); // the wall itself
        assert!(!fov.is_in_fov(5, 3)); // behind the wall
        assert!(!fov.is_walkable(4, 3));
    }

    #[test]
    fn radius_limits_sight() {
        let mut fov = SightMap::from_map(&vec![vec![Tile::empty(); 20]; 20]);
        fov.compute_fov(0, 0, 3, true);

        assert!(fov.is_in_fov(3, 0));
        assert!(fov.is_in_fov(2, 2));
        assert!(!fov.is_in_fov(4, 0));
        assert!(!fov.is_in_fov(3, 3));
    }

    #[test]
    fn reset_hides_everything() {
        let mut fov = SightMap::from_map(&room());
        fov.compute_fov(1, 1, 10, true);
        fov.reset(30, 30);
        assert!(!fov.is_in_fov(1, 1));
        assert!(!fov.is_walkable(1, 1));
        assert!(!fov.is_in_fov(99, 99));
    }
}

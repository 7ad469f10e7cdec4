//! Tile-path quad-tree geometry and the keep/blank filter decision (C3).
//!
//! Filenames are raw ZIP entry name bytes (CP437, not guaranteed UTF-8), so
//! the alphabet check and descent below work byte-by-byte rather than on
//! `str`.

use crate::geometry::{intersects, Rect, WORLD};

/// Number of leading bytes of `name` that fall in `{a,b,c,d}`. Any byte
/// outside that alphabet — including the first — terminates the count.
pub fn tile_len(name: &[u8]) -> usize {
    name.iter()
        .take_while(|&&b| matches!(b, b'a' | b'b' | b'c' | b'd'))
        .count()
}

/// Computes the Mercator bounding box of a tile path, descending from
/// [`WORLD`] one quadrant per character: `a` keeps the lower-x/lower-y
/// quadrant, `b` higher-x/lower-y, `c` lower-x/higher-y, `d`
/// higher-x/higher-y. Every character but the last cuts cleanly at the
/// midpoint on the two edges shared with its siblings; the last character
/// (the leaf) additionally pushes those same two shared edges outward by
/// `overlap_percent` of the current rectangle's width/height, so that
/// adjacent leaves overlap slightly instead of meeting exactly at the mid.
/// The two edges a quadrant inherits directly from its parent (not shared
/// with a sibling at this depth) are left untouched.
pub fn tile_bbox(path: &[u8], overlap_percent: i64) -> Rect {
    let mut r = WORLD;
    let len = path.len();

    for (i, &ch) in path.iter().enumerate() {
        let is_leaf = i + 1 == len;
        let mx = (r.low.x as i64 + r.high.x as i64) / 2;
        let my = (r.low.y as i64 + r.high.y as i64) / 2;

        let (xo, yo) = if is_leaf {
            (
                (r.high.x as i64 - r.low.x as i64) * overlap_percent / 100,
                (r.high.y as i64 - r.low.y as i64) * overlap_percent / 100,
            )
        } else {
            (0, 0)
        };

        // Each letter moves exactly the two bounds shared with a sibling
        // quadrant; the other two are already correct from the parent.
        match ch {
            b'a' => {
                r.high.x = (mx + xo) as i32;
                r.high.y = (my + yo) as i32;
            }
            b'b' => {
                r.low.x = (mx - xo) as i32;
                r.high.y = (my + yo) as i32;
            }
            b'c' => {
                r.high.x = (mx + xo) as i32;
                r.low.y = (my - yo) as i32;
            }
            b'd' => {
                r.low.x = (mx - xo) as i32;
                r.low.y = (my - yo) as i32;
            }
            other => unreachable!("tile_bbox called with out-of-alphabet byte {other:#x}"),
        }
    }

    r
}

/// The keep/blank decision for a ZIP member named `name`, given the query
/// rectangle. Non-tile "control" files (whose name doesn't start with a
/// tile-path character at all) are always kept.
pub fn should_keep(query: &Rect, name: &[u8]) -> bool {
    let len = tile_len(name);
    if len == 0 {
        return true;
    }
    let bb = tile_bbox(&name[..len], 1);
    intersects(query, &bb)
}

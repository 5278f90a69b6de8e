//! ASCII renderings of a ring snapshot for debugging.
//!
//! Everything here works on a [`Snapshot`], never on the live buffer, so
//! rendering cannot observe slots outside the live window.

use std::f64::consts::PI;

use crate::sample::Sample;
use crate::snapshot::Snapshot;

/// Placeholder for a slot outside the live window.
pub const EMPTY_SLOT: &str = ".";

/// Renders the physical slot array, e.g. `[3, ., ., 1, 2]`.
pub fn render_slots<T: Sample>(snapshot: &Snapshot<T>) -> String {
    let cells: Vec<String> = snapshot
        .slots()
        .map(|slot| match slot {
            Some(value) => value.to_string(),
            None => EMPTY_SLOT.to_string(),
        })
        .collect();
    format!("[{}]", cells.join(", "))
}

/// Renders the ring as a circle of slots.
///
/// Slot `i` sits at angle `2πi / capacity`. `radius` defaults to
/// `max(3, capacity / 2)` and the vertical axis is squashed by half so the
/// circle looks round in a terminal. The last written slot is marked `H`,
/// the next read slot `T`, or `B` when they are the same cell.
pub fn render_circle<T: Sample>(snapshot: &Snapshot<T>, radius: Option<usize>) -> String {
    if snapshot.is_empty() {
        return "ring is empty".to_string();
    }

    let n = snapshot.capacity();
    let radius = radius.filter(|&r| r > 0).unwrap_or_else(|| (n / 2).max(3));
    let side = radius * 2 + 1;
    let mut canvas = vec![vec![" ".to_string(); side]; side];

    for (slot, value) in snapshot.slots().enumerate() {
        let (x, y) = cell(slot, n, radius);
        if let Some(target) = canvas.get_mut(y).and_then(|row| row.get_mut(x)) {
            *target = match value {
                Some(v) => v.to_string(),
                None => EMPTY_SLOT.to_string(),
            };
        }
    }

    let last_written = (snapshot.head() + n - 1) % n;
    let head = cell(last_written, n, radius);
    let tail = cell(snapshot.tail(), n, radius);
    if head == tail {
        mark(&mut canvas, head, "B");
    } else {
        mark(&mut canvas, head, "H");
        mark(&mut canvas, tail, "T");
    }

    canvas
        .iter()
        .map(|row| row.concat().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell(slot: usize, n: usize, radius: usize) -> (usize, usize) {
    let angle = 2.0 * PI * slot as f64 / n as f64;
    let r = radius as f64;
    let x = (r + r * angle.cos()).round();
    let y = (r + r * angle.sin() * 0.5).round();
    (x.max(0.0) as usize, y.max(0.0) as usize)
}

fn mark(canvas: &mut [Vec<String>], (x, y): (usize, usize), label: &str) {
    if let Some(target) = canvas.get_mut(y).and_then(|row| row.get_mut(x)) {
        *target = label.to_string();
    }
}

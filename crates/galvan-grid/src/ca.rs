//! The per-cell transition rule.
//!
//! Each cell's successor is computed from the 3×3 Moore neighborhood of
//! the *previous* generation only; [`World::step`](crate::World::step)
//! writes successors into the scratch buffer and swaps, so no cell ever
//! observes a same-tick update.

use galvan_core::{AgentId, Cell, CellKind, UNOWNED};

use crate::torus::Torus;
use crate::world::LossList;

/// Kinds and owners of the 3×3 neighborhood centered on a cell, in
/// row-major order (the center itself is element 4). Wraparound means a
/// single neighbor can appear more than once on small grids; that is
/// intentional and matches the counting rules below.
struct Neighborhood {
    kinds: [CellKind; 9],
    owners: [u8; 9],
}

impl Neighborhood {
    fn gather(torus: Torus, cells: &[Cell], x: i32, y: i32) -> Self {
        let mut kinds = [CellKind::Empty; 9];
        let mut owners = [UNOWNED; 9];
        let mut i = 0;
        for ny in (y - 1)..=(y + 1) {
            for nx in (x - 1)..=(x + 1) {
                let cell = cells[torus.index(nx, ny)];
                kinds[i] = cell.kind;
                owners[i] = cell.owner;
                i += 1;
            }
        }
        Self { kinds, owners }
    }

    fn count(&self, kind: CellKind) -> usize {
        self.kinds.iter().filter(|&&k| k == kind).count()
    }

    fn any(&self, kind: CellKind) -> bool {
        self.kinds.iter().any(|&k| k == kind)
    }
}

/// Compute the next-generation cell at `(x, y)` from the live buffer.
///
/// Flag-loss events (flag adjacent to an enemy base) are appended to
/// `losses`; they do not affect the returned cell. Damage is carried
/// through unchanged — only Hit actions mutate it.
pub(crate) fn successor(
    torus: Torus,
    cells: &[Cell],
    x: i32,
    y: i32,
    losses: &mut LossList,
) -> Cell {
    let this = cells[torus.index(x, y)];

    match this.kind {
        // Tails need no neighborhood: they decay unconditionally.
        CellKind::ElectronTail => Cell {
            kind: CellKind::Conductor,
            ..this
        },

        CellKind::Conductor => {
            let n = Neighborhood::gather(torus, cells, x, y);
            let electrons = n.count(CellKind::Electron);
            if electrons == 1 || electrons == 2 {
                Cell {
                    kind: CellKind::Electron,
                    ..this
                }
            } else {
                this
            }
        }

        CellKind::Electron => {
            let n = Neighborhood::gather(torus, cells, x, y);
            let near_flag = n.kinds.iter().any(|&k| k.is_flag_like());
            if near_flag && n.any(CellKind::ElectronTail) {
                // Fired next to claimed territory: condense into a
                // flag-seeking photon.
                Cell {
                    kind: CellKind::Photon,
                    ..this
                }
            } else {
                Cell {
                    kind: CellKind::ElectronTail,
                    ..this
                }
            }
        }

        CellKind::Photon => {
            // Capture only when every neighboring flag agrees on one
            // non-zero owner; any dispute or an empty neighborhood
            // dissipates the photon.
            let n = Neighborhood::gather(torus, cells, x, y);
            let mut claimant = UNOWNED;
            let mut contested = false;
            for i in 0..9 {
                if n.kinds[i].is_flag_like() {
                    if claimant != UNOWNED && n.owners[i] != claimant {
                        contested = true;
                        break;
                    }
                    claimant = n.owners[i];
                }
            }
            if !contested && claimant != UNOWNED {
                Cell {
                    kind: CellKind::Flag,
                    owner: claimant,
                    damage: this.damage,
                }
            } else {
                Cell {
                    kind: CellKind::Conductor,
                    ..this
                }
            }
        }

        CellKind::Flag => {
            let n = Neighborhood::gather(torus, cells, x, y);
            // Scoring: one loss entry per adjacent enemy base.
            for i in 0..9 {
                if n.kinds[i] == CellKind::Base && n.owners[i] != this.owner {
                    losses.push(AgentId(this.owner));
                }
            }
            // An adjacent photon knocks the flag back to neutral
            // conductor, opening the point for recapture.
            if n.any(CellKind::Photon) {
                Cell {
                    kind: CellKind::Conductor,
                    owner: UNOWNED,
                    damage: this.damage,
                }
            } else {
                this
            }
        }

        // Everything else is terminal for the CA: agents, bases, geysers
        // and boundary cells change only through agent actions.
        _ => this,
    }
}

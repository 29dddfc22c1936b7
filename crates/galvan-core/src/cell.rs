//! The cell model: kinds, ownership, and damage.

use std::fmt;

/// Owner value meaning "no owner". Owned cells carry the owning agent's
/// 1-based id instead.
pub const UNOWNED: u8 = 0;

/// Damage at which a destructible cell is destroyed.
///
/// A Hit action increments the target's damage counter; reaching this
/// threshold resets the cell to [`CellKind::Empty`] and credits the
/// attacker's inventory.
pub const DAMAGE_LIMIT: u8 = 4;

/// What occupies a grid cell.
///
/// Discriminants are wire values: the viewport transmits `kind as u8`
/// directly (owner-biased for owned kinds, see `galvan-obs`), so the
/// numbering here is a compatibility surface and must not be reordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellKind {
    /// Nothing here. Agents can move into empty cells.
    #[default]
    Empty = 0,
    /// Immutable filler. Never changes and never participates in the CA.
    Boundary = 1,
    /// Wire substrate. Becomes an electron when excited by 1 or 2
    /// neighboring electrons.
    Conductor = 2,
    /// A signal head travelling along conductors.
    Electron = 3,
    /// One-step memory of an electron; always decays back to conductor.
    ElectronTail = 4,
    /// A capture packet formed when an electron fires next to a flag.
    Photon = 5,
    /// A cell occupied by an agent. Owned.
    Agent = 6,
    /// Claimed territory. Owned.
    Flag = 7,
    /// A flag spawn point near an agent's start position. Owned.
    FlagGeyser = 8,
    /// An agent's home marker; flags touching an enemy base score a loss
    /// against the flag's owner. Owned.
    Base = 9,
}

impl CellKind {
    /// Kinds that carry a non-zero owner.
    pub fn is_owned(self) -> bool {
        matches!(
            self,
            Self::Agent | Self::Flag | Self::FlagGeyser | Self::Base
        )
    }

    /// Flags and flag geysers: the targets photons seek.
    pub fn is_flag_like(self) -> bool {
        matches!(self, Self::Flag | Self::FlagGeyser)
    }

    /// Kinds a Hit action may damage. Empty cells and owned structures
    /// cannot be attacked.
    pub fn is_destructible(self) -> bool {
        matches!(
            self,
            Self::Conductor | Self::Electron | Self::ElectronTail | Self::Photon
        )
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Boundary => "boundary",
            Self::Conductor => "conductor",
            Self::Electron => "electron",
            Self::ElectronTail => "electron-tail",
            Self::Photon => "photon",
            Self::Agent => "agent",
            Self::Flag => "flag",
            Self::FlagGeyser => "flag-geyser",
            Self::Base => "base",
        };
        write!(f, "{name}")
    }
}

/// One grid cell.
///
/// `owner` is non-zero only for owned kinds ([`CellKind::is_owned`]);
/// `damage` is meaningful only for destructible kinds and saturates at
/// [`DAMAGE_LIMIT`], at which point the cell is destroyed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// What occupies the cell.
    pub kind: CellKind,
    /// Owning agent id, or [`UNOWNED`].
    pub owner: u8,
    /// Accumulated Hit damage.
    pub damage: u8,
}

impl Cell {
    /// An unowned, undamaged cell of the given kind.
    pub fn of(kind: CellKind) -> Self {
        Self {
            kind,
            owner: UNOWNED,
            damage: 0,
        }
    }

    /// An undamaged cell of the given kind owned by `owner`.
    pub fn owned(kind: CellKind, owner: u8) -> Self {
        Self {
            kind,
            owner,
            damage: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_kinds_are_exactly_the_four() {
        let owned: Vec<CellKind> = [
            CellKind::Empty,
            CellKind::Boundary,
            CellKind::Conductor,
            CellKind::Electron,
            CellKind::ElectronTail,
            CellKind::Photon,
            CellKind::Agent,
            CellKind::Flag,
            CellKind::FlagGeyser,
            CellKind::Base,
        ]
        .into_iter()
        .filter(|k| k.is_owned())
        .collect();
        assert_eq!(
            owned,
            vec![
                CellKind::Agent,
                CellKind::Flag,
                CellKind::FlagGeyser,
                CellKind::Base
            ]
        );
    }

    #[test]
    fn owned_kinds_are_not_destructible() {
        for kind in [
            CellKind::Agent,
            CellKind::Flag,
            CellKind::FlagGeyser,
            CellKind::Base,
            CellKind::Empty,
            CellKind::Boundary,
        ] {
            assert!(!kind.is_destructible(), "{kind} must not be attackable");
        }
        for kind in [
            CellKind::Conductor,
            CellKind::Electron,
            CellKind::ElectronTail,
            CellKind::Photon,
        ] {
            assert!(kind.is_destructible(), "{kind} must be attackable");
        }
    }

    #[test]
    fn wire_discriminants_are_stable() {
        assert_eq!(CellKind::Empty as u8, 0);
        assert_eq!(CellKind::Conductor as u8, 2);
        assert_eq!(CellKind::Electron as u8, 3);
        assert_eq!(CellKind::ElectronTail as u8, 4);
        assert_eq!(CellKind::Photon as u8, 5);
        assert_eq!(CellKind::Agent as u8, 6);
        assert_eq!(CellKind::Base as u8, 9);
    }

    #[test]
    fn default_cell_is_empty_unowned() {
        let c = Cell::default();
        assert_eq!(c.kind, CellKind::Empty);
        assert_eq!(c.owner, UNOWNED);
        assert_eq!(c.damage, 0);
    }
}

//! `BlocksState`: an id-indexed arena of object placements over a shared catalog.
//!
//! # Layout
//!
//! - [`Catalog`]: id, name and shape of every object, sorted by id, shared by
//!   every state derived from the same input (`Arc`).
//! - Placement plane: one `(support slot, lying)` pair per catalog slot.
//! - Load plane: number of objects resting directly on each slot.
//!
//! Cloning a state copies the two planes only. The load plane is derived
//! from the placement plane and is kept in sync by the two mutators, which
//! are crate-private: outside the kernel a state is immutable.
//!
//! # Invariants (established by [`BlocksState::from_records`])
//!
//! - exactly one TABLE, with no support and never lying;
//! - every non-table object has a support that exists in the state;
//! - the support relation is acyclic and every chain ends at the table.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::object::{CatalogEntry, ObjectId, ObjectRecord, ObjectView};
use crate::domain::shape::Shape;

/// Malformed input, rejected before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("duplicate object id {id}")]
    DuplicateId { id: ObjectId },
    #[error("state has no TABLE object")]
    MissingTable,
    #[error("state has several TABLE objects ({first} and {second})")]
    MultipleTables { first: ObjectId, second: ObjectId },
    #[error("table {id} must not rest on {support}")]
    TableHasSupport { id: ObjectId, support: ObjectId },
    #[error("object {id} has no support")]
    MissingSupport { id: ObjectId },
    #[error("object {id} rests on unknown object {support}")]
    UnknownSupport { id: ObjectId, support: ObjectId },
    #[error("object {id} rests on itself")]
    SelfSupport { id: ObjectId },
    #[error("support chain of object {id} is cyclic")]
    CyclicSupport { id: ObjectId },
    #[error("start and goal describe different objects: {detail}")]
    CatalogMismatch { detail: String },
}

/// Immutable object catalog shared between states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: BTreeMap<ObjectId, usize>,
    table_slot: usize,
}

impl Catalog {
    /// Number of objects, table included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a validated catalog (the table is always present).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending id order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Dense slot of an id.
    #[must_use]
    pub fn slot_of(&self, id: ObjectId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Entry at a dense slot, `None` past the end.
    #[must_use]
    pub fn entry(&self, slot: usize) -> Option<&CatalogEntry> {
        self.entries.get(slot)
    }

    /// Id of the table.
    #[must_use]
    pub fn table_id(&self) -> ObjectId {
        self.entries[self.table_slot].id
    }

    /// Display name of an id, or the id itself when unknown.
    #[must_use]
    pub fn name_of(&self, id: ObjectId) -> String {
        self.slot_of(id)
            .map_or_else(|| format!("#{id}"), |slot| self.entries[slot].name.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    support: Option<usize>,
    lying: bool,
}

/// A complete configuration of the blocks world.
#[derive(Debug, Clone)]
pub struct BlocksState {
    catalog: Arc<Catalog>,
    placements: Vec<Placement>,
    load: Vec<u32>,
}

impl PartialEq for BlocksState {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.catalog, &other.catalog) || self.catalog == other.catalog)
            && self.placements == other.placements
    }
}

impl Eq for BlocksState {}

impl BlocksState {
    /// Validate a collection of object records into a state.
    ///
    /// Record order is irrelevant. For the table, a `support_id` equal to its
    /// own id is read as "no support". A `lying` flag on a cube or the table
    /// is normalized to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for duplicate ids, a missing or duplicated
    /// table, a supported table, an unsupported non-table object, an unknown
    /// or self support, or a cyclic support chain.
    pub fn from_records(records: &[ObjectRecord]) -> Result<Self, ValidationError> {
        let mut sorted: Vec<&ObjectRecord> = records.iter().collect();
        sorted.sort_by_key(|r| r.id);

        let mut index = BTreeMap::new();
        let mut table_slot: Option<usize> = None;
        for (slot, rec) in sorted.iter().enumerate() {
            if index.insert(rec.id, slot).is_some() {
                return Err(ValidationError::DuplicateId { id: rec.id });
            }
            if rec.shape == Shape::Table {
                if let Some(first) = table_slot {
                    return Err(ValidationError::MultipleTables {
                        first: sorted[first].id,
                        second: rec.id,
                    });
                }
                table_slot = Some(slot);
            }
        }
        let table_slot = table_slot.ok_or(ValidationError::MissingTable)?;

        let mut placements = Vec::with_capacity(sorted.len());
        for rec in &sorted {
            let support = match (rec.shape, rec.support_id) {
                (Shape::Table, None) => None,
                (Shape::Table, Some(s)) if s == rec.id => None,
                (Shape::Table, Some(s)) => {
                    return Err(ValidationError::TableHasSupport {
                        id: rec.id,
                        support: s,
                    })
                }
                (_, None) => return Err(ValidationError::MissingSupport { id: rec.id }),
                (_, Some(s)) if s == rec.id => {
                    return Err(ValidationError::SelfSupport { id: rec.id })
                }
                (_, Some(s)) => Some(*index.get(&s).ok_or(ValidationError::UnknownSupport {
                    id: rec.id,
                    support: s,
                })?),
            };
            placements.push(Placement {
                support,
                lying: rec.lying && rec.shape.has_orientation(),
            });
        }

        let mut load = vec![0u32; sorted.len()];
        for p in &placements {
            if let Some(s) = p.support {
                load[s] += 1;
            }
        }

        let catalog = Catalog {
            entries: sorted
                .iter()
                .map(|r| CatalogEntry {
                    id: r.id,
                    name: r.name.clone(),
                    shape: r.shape,
                })
                .collect(),
            index,
            table_slot,
        };

        let state = Self {
            catalog: Arc::new(catalog),
            placements,
            load,
        };
        state.check_acyclic()?;
        Ok(state)
    }

    /// Every chain must reach the table within `len` steps.
    fn check_acyclic(&self) -> Result<(), ValidationError> {
        let n = self.placements.len();
        for start in 0..n {
            let mut current = start;
            let mut steps = 0;
            while let Some(next) = self.placements[current].support {
                steps += 1;
                if steps > n {
                    return Err(ValidationError::CyclicSupport {
                        id: self.catalog.entries[start].id,
                    });
                }
                current = next;
            }
            if current != self.catalog.table_slot {
                return Err(ValidationError::CyclicSupport {
                    id: self.catalog.entries[start].id,
                });
            }
        }
        Ok(())
    }

    /// The shared catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Whether both states share the same catalog contents.
    #[must_use]
    pub fn same_catalog(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.catalog, &other.catalog) || self.catalog == other.catalog
    }

    /// Re-point this state at an equal catalog so the two share one allocation.
    pub(crate) fn adopt_catalog(&mut self, catalog: &Arc<Catalog>) {
        debug_assert!(*self.catalog == **catalog);
        self.catalog = Arc::clone(catalog);
    }

    /// Number of objects, table included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Never true for a validated state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Id of the table.
    #[must_use]
    pub fn table_id(&self) -> ObjectId {
        self.catalog.table_id()
    }

    /// Whether an id exists in this state.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.catalog.slot_of(id).is_some()
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.catalog.entries.iter().map(|e| e.id)
    }

    /// All objects in ascending id order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectView<'_>> + '_ {
        (0..self.placements.len()).map(move |slot| self.view_slot(slot))
    }

    /// One object by id.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<ObjectView<'_>> {
        self.catalog.slot_of(id).map(|slot| self.view_slot(slot))
    }

    fn view_slot(&self, slot: usize) -> ObjectView<'_> {
        let entry = &self.catalog.entries[slot];
        let placement = self.placements[slot];
        ObjectView {
            id: entry.id,
            name: &entry.name,
            shape: entry.shape,
            support: placement.support.map(|s| self.catalog.entries[s].id),
            lying: placement.lying,
        }
    }

    /// Shape of an id.
    #[must_use]
    pub fn shape_of(&self, id: ObjectId) -> Option<Shape> {
        self.catalog.slot_of(id).map(|s| self.catalog.entries[s].shape)
    }

    /// Support of an id (`None` for the table or an unknown id).
    #[must_use]
    pub fn support_of(&self, id: ObjectId) -> Option<ObjectId> {
        let slot = self.catalog.slot_of(id)?;
        self.placements[slot]
            .support
            .map(|s| self.catalog.entries[s].id)
    }

    /// Lying flag of an id (`false` for unknown ids).
    #[must_use]
    pub fn is_lying(&self, id: ObjectId) -> bool {
        self.catalog
            .slot_of(id)
            .is_some_and(|s| self.placements[s].lying)
    }

    /// Number of objects resting directly on `id`.
    #[must_use]
    pub fn load_of(&self, id: ObjectId) -> u32 {
        self.catalog.slot_of(id).map_or(0, |s| self.load[s])
    }

    /// Ids below `id`, nearest first, ending at the table.
    ///
    /// Bounded by the object count, so a corrupted chain cannot loop forever.
    #[must_use]
    pub fn support_chain(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut chain = Vec::new();
        let Some(mut current) = self.catalog.slot_of(id) else {
            return chain;
        };
        while let Some(next) = self.placements[current].support {
            if chain.len() >= self.placements.len() {
                break;
            }
            chain.push(self.catalog.entries[next].id);
            current = next;
        }
        chain
    }

    /// Back to owned input records (ascending id order).
    #[must_use]
    pub fn to_records(&self) -> Vec<ObjectRecord> {
        self.objects().map(|o| o.to_record()).collect()
    }

    /// Crate-private mutator: rest `id` on `target`, keeping the load plane in sync.
    pub(crate) fn set_support(&mut self, id: ObjectId, target: ObjectId) {
        let (Some(slot), Some(target_slot)) =
            (self.catalog.slot_of(id), self.catalog.slot_of(target))
        else {
            return;
        };
        if let Some(old) = self.placements[slot].support {
            self.load[old] -= 1;
        }
        self.placements[slot].support = Some(target_slot);
        self.load[target_slot] += 1;
    }

    /// Crate-private mutator: set the lying flag.
    pub(crate) fn set_lying(&mut self, id: ObjectId, lying: bool) {
        if let Some(slot) = self.catalog.slot_of(id) {
            self.placements[slot].lying = lying;
        }
    }
}

/// A validated start/goal pair over one shared catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    start: BlocksState,
    goal: BlocksState,
}

impl Problem {
    /// Pair two validated states.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CatalogMismatch`] if the states do not
    /// describe the same objects (ids, names and shapes).
    pub fn new(start: BlocksState, mut goal: BlocksState) -> Result<Self, ValidationError> {
        if !start.same_catalog(&goal) {
            return Err(ValidationError::CatalogMismatch {
                detail: describe_catalog_difference(start.catalog(), goal.catalog()),
            });
        }
        goal.adopt_catalog(start.catalog());
        Ok(Self { start, goal })
    }

    /// Validate both record sets and pair them.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found in `start`, then `goal`,
    /// then the pairing.
    pub fn from_records(
        start: &[ObjectRecord],
        goal: &[ObjectRecord],
    ) -> Result<Self, ValidationError> {
        Self::new(
            BlocksState::from_records(start)?,
            BlocksState::from_records(goal)?,
        )
    }

    #[must_use]
    pub fn start(&self) -> &BlocksState {
        &self.start
    }

    #[must_use]
    pub fn goal(&self) -> &BlocksState {
        &self.goal
    }
}

fn describe_catalog_difference(a: &Catalog, b: &Catalog) -> String {
    if a.len() != b.len() {
        return format!("{} objects vs {} objects", a.len(), b.len());
    }
    for (x, y) in a.entries.iter().zip(b.entries.iter()) {
        if x != y {
            return format!(
                "{} {:?} ({}) vs {} {:?} ({})",
                x.id, x.name, x.shape, y.id, y.name, y.shape
            );
        }
    }
    "catalogs differ".into()
}

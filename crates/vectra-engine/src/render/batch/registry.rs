use std::collections::HashMap;

/// Shape category a batch belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    Line,
    Circle,
    Polygon,
    Grid,
}

/// Identifies a batch.
///
/// `instance == None` is the shared per-category batch. Callers that want a
/// shape (or group of shapes) drawn and animated independently pass their own
/// instance id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BatchKey {
    pub kind: ShapeKind,
    pub instance: Option<u64>,
}

impl BatchKey {
    pub const LINE: BatchKey = BatchKey::shared(ShapeKind::Line);
    pub const CIRCLE: BatchKey = BatchKey::shared(ShapeKind::Circle);
    pub const POLYGON: BatchKey = BatchKey::shared(ShapeKind::Polygon);
    pub const GRID: BatchKey = BatchKey::shared(ShapeKind::Grid);

    #[inline]
    pub const fn shared(kind: ShapeKind) -> Self {
        Self { kind, instance: None }
    }

    #[inline]
    pub const fn instance(kind: ShapeKind, id: u64) -> Self {
        Self { kind, instance: Some(id) }
    }
}

/// Primitive topology of a batch.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Topology {
    #[default]
    Triangles,
}

impl Topology {
    #[inline]
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// A contiguous run of arena records and indices drawn with one call.
///
/// Offsets are in records / indices and are fixed at creation; the counts only
/// grow until the registry is cleared.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawBatch {
    pub key: BatchKey,
    pub topology: Topology,
    pub vertex_offset: usize,
    pub vertex_count: usize,
    pub index_offset: usize,
    pub index_count: usize,
}

impl DrawBatch {
    #[inline]
    pub fn vertex_end(&self) -> usize {
        self.vertex_offset + self.vertex_count
    }

    #[inline]
    pub fn index_end(&self) -> usize {
        self.index_offset + self.index_count
    }
}

/// One indexed draw covering every run of a key.
///
/// `first_index` addresses the grouped index layout of
/// [`BatchRegistry::grouped_indices`], not the arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub key: BatchKey,
    pub topology: Topology,
    pub first_index: usize,
    pub index_count: usize,
}

impl DrawCall {
    #[inline]
    pub fn index_byte_offset(&self) -> u64 {
        (self.first_index * std::mem::size_of::<u32>()) as u64
    }
}

/// Batches in registration order, plus a key lookup.
///
/// A key normally maps to a single batch. When other keys were appended to the
/// arena after a key's batch, that batch can no longer grow in place; the next
/// shape for the key opens a continuation batch at the current marks, so
/// record ranges stay contiguous in the arena. At draw time a key's runs are
/// laid out back to back and drawn with a single call, keys in the order they
/// were first registered.
#[derive(Debug, Default)]
pub struct BatchRegistry {
    batches: Vec<DrawBatch>,
    open: HashMap<BatchKey, usize>,
    /// Distinct keys in first-registration order.
    keys: Vec<BatchKey>,
}

impl BatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position of the batch that the next shape for `key` goes into,
    /// creating it if needed.
    ///
    /// `marks` are the arena's current `(vertex, index)` high-water marks; a new
    /// batch seals its offsets there.
    pub fn get_or_create(&mut self, key: BatchKey, topology: Topology, marks: (usize, usize)) -> usize {
        if let Some(&i) = self.open.get(&key) {
            let b = &self.batches[i];
            if b.topology == topology && b.vertex_end() == marks.0 && b.index_end() == marks.1 {
                return i;
            }
            log::trace!("batch {key:?} interrupted; opening continuation at {marks:?}");
        }

        let i = self.batches.len();
        if self.open.insert(key, i).is_none() {
            self.keys.push(key);
        }
        self.batches.push(DrawBatch {
            key,
            topology,
            vertex_offset: marks.0,
            vertex_count: 0,
            index_offset: marks.1,
            index_count: 0,
        });
        i
    }

    /// Adds counts to the open batch for `key`. Returns `false` for unknown keys.
    pub fn accumulate(&mut self, key: BatchKey, records: usize, indices: usize) -> bool {
        let Some(&i) = self.open.get(&key) else { return false };
        let b = &mut self.batches[i];
        b.vertex_count += records;
        b.index_count += indices;
        true
    }

    /// The batch currently receiving shapes for `key`.
    pub fn get(&self, key: BatchKey) -> Option<&DrawBatch> {
        self.open.get(&key).map(|&i| &self.batches[i])
    }

    /// Every batch (original and continuations) registered under `key`.
    pub fn runs_for(&self, key: BatchKey) -> impl Iterator<Item = &DrawBatch> {
        self.batches.iter().filter(move |b| b.key == key)
    }

    /// All batches in registration order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DrawBatch> {
        self.batches.iter()
    }

    /// Distinct keys in first-registration order.
    #[inline]
    pub fn keys(&self) -> &[BatchKey] {
        &self.keys
    }

    /// Whether some key has continuation runs, making the arena index order
    /// differ from the grouped draw layout.
    #[inline]
    pub fn is_interleaved(&self) -> bool {
        self.batches.len() > self.keys.len()
    }

    /// One call per key. A key's runs share the topology of its first run.
    pub fn draw_calls(&self) -> Vec<DrawCall> {
        let mut first_index = 0;
        self.keys
            .iter()
            .filter_map(|&key| {
                let mut runs = self.runs_for(key).peekable();
                let topology = runs.peek()?.topology;
                let index_count = runs.map(|b| b.index_count).sum();
                let call = DrawCall { key, topology, first_index, index_count };
                first_index += index_count;
                Some(call)
            })
            .collect()
    }

    /// `indices` (the arena's) reordered so each key's runs are contiguous,
    /// in the layout [`draw_calls`](Self::draw_calls) addresses.
    pub fn grouped_indices(&self, indices: &[u32]) -> Vec<u32> {
        let mut out = Vec::with_capacity(indices.len());
        for &key in &self.keys {
            for b in self.runs_for(key) {
                out.extend_from_slice(&indices[b.index_offset..b.index_end()]);
            }
        }
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn clear(&mut self) {
        self.batches.clear();
        self.open.clear();
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Topology = Topology::Triangles;

    #[test]
    fn creation_seals_offsets_at_marks() {
        let mut reg = BatchRegistry::new();
        let i = reg.get_or_create(BatchKey::CIRCLE, T, (6, 12));
        let b = *reg.iter().nth(i).unwrap();
        assert_eq!((b.vertex_offset, b.index_offset), (6, 12));
        assert_eq!((b.vertex_count, b.index_count), (0, 0));
    }

    #[test]
    fn contiguous_shapes_share_one_batch() {
        let mut reg = BatchRegistry::new();
        let a = reg.get_or_create(BatchKey::LINE, T, (0, 0));
        reg.accumulate(BatchKey::LINE, 6, 6);
        let b = reg.get_or_create(BatchKey::LINE, T, (6, 6));
        reg.accumulate(BatchKey::LINE, 6, 6);

        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
        let batch = reg.get(BatchKey::LINE).unwrap();
        assert_eq!((batch.vertex_count, batch.index_count), (12, 12));
    }

    #[test]
    fn interleaved_key_opens_continuation() {
        let mut reg = BatchRegistry::new();
        reg.get_or_create(BatchKey::LINE, T, (0, 0));
        reg.accumulate(BatchKey::LINE, 6, 6);
        reg.get_or_create(BatchKey::CIRCLE, T, (6, 6));
        reg.accumulate(BatchKey::CIRCLE, 3, 3);
        let cont = reg.get_or_create(BatchKey::LINE, T, (9, 9));
        reg.accumulate(BatchKey::LINE, 6, 6);

        assert_eq!(cont, 2);
        let keys: Vec<BatchKey> = reg.iter().map(|b| b.key).collect();
        assert_eq!(keys, vec![BatchKey::LINE, BatchKey::CIRCLE, BatchKey::LINE]);
        assert_eq!(reg.runs_for(BatchKey::LINE).count(), 2);
        assert_eq!(reg.get(BatchKey::LINE).unwrap().vertex_offset, 9);
        assert!(reg.is_interleaved());
    }

    #[test]
    fn interleaved_key_still_draws_once() {
        let mut reg = BatchRegistry::new();
        for (key, marks, n) in [
            (BatchKey::LINE, (0, 0), 6),
            (BatchKey::CIRCLE, (6, 6), 3),
            (BatchKey::LINE, (9, 9), 6),
            (BatchKey::CIRCLE, (15, 15), 3),
            (BatchKey::POLYGON, (18, 18), 3),
        ] {
            reg.get_or_create(key, T, marks);
            reg.accumulate(key, n, n);
        }

        assert_eq!(reg.keys(), &[BatchKey::LINE, BatchKey::CIRCLE, BatchKey::POLYGON]);
        let calls: Vec<(BatchKey, usize, usize)> =
            reg.draw_calls().iter().map(|c| (c.key, c.first_index, c.index_count)).collect();
        assert_eq!(
            calls,
            vec![(BatchKey::LINE, 0, 12), (BatchKey::CIRCLE, 12, 6), (BatchKey::POLYGON, 18, 3)]
        );
        assert_eq!(reg.draw_calls()[1].index_byte_offset(), 48);

        let arena: Vec<u32> = (0..21).collect();
        let grouped = reg.grouped_indices(&arena);
        let expected: Vec<u32> = (0..6).chain(9..15).chain(6..9).chain(15..18).chain(18..21).collect();
        assert_eq!(grouped, expected);
    }

    #[test]
    fn contiguous_keys_keep_arena_layout() {
        let mut reg = BatchRegistry::new();
        reg.get_or_create(BatchKey::LINE, T, (0, 0));
        reg.accumulate(BatchKey::LINE, 6, 6);
        reg.get_or_create(BatchKey::CIRCLE, T, (6, 6));
        reg.accumulate(BatchKey::CIRCLE, 3, 3);

        assert!(!reg.is_interleaved());
        let arena: Vec<u32> = (0..9).collect();
        assert_eq!(reg.grouped_indices(&arena), arena);
        let firsts: Vec<usize> = reg.draw_calls().iter().map(|c| c.first_index).collect();
        assert_eq!(firsts, vec![0, 6]);
    }

    #[test]
    fn instance_keys_are_distinct_from_shared() {
        let mut reg = BatchRegistry::new();
        reg.get_or_create(BatchKey::LINE, T, (0, 0));
        reg.get_or_create(BatchKey::instance(ShapeKind::Line, 7), T, (0, 0));
        assert_eq!(reg.len(), 2);
        assert!(reg.get(BatchKey::instance(ShapeKind::Line, 8)).is_none());
    }

    #[test]
    fn accumulate_unknown_key_is_noop() {
        let mut reg = BatchRegistry::new();
        assert!(!reg.accumulate(BatchKey::POLYGON, 3, 3));
        assert!(reg.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut reg = BatchRegistry::new();
        reg.get_or_create(BatchKey::GRID, T, (0, 0));
        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.keys().is_empty());
        assert!(reg.get(BatchKey::GRID).is_none());
    }
}

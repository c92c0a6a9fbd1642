/// Removes the value at `source_idx` and reinserts it so it ends up in front of whatever was at
/// `offset` before the move (`offset == vec.len()` moves it to the end). Returns whether anything
/// moved. Out of range indices and no-op moves leave the vec alone.
pub fn shift_vec<T>(source_idx: usize, offset: usize, vec: &mut Vec<T>) -> bool {
    if source_idx >= vec.len() || offset > vec.len() {
        return false;
    }
    // in front of itself or in front of its own successor: already there
    if offset == source_idx || offset == source_idx + 1 {
        return false;
    }

    let target_idx = if source_idx < offset {
        offset - 1
    } else {
        offset
    };

    let item = vec.remove(source_idx);
    vec.insert(target_idx, item);
    true
}

/// Offset for moving the item at `source_idx` onto the item at `target_idx`.
///
/// Dragging towards the end lands just past the target, dragging towards the start takes the
/// target's slot. Either way the moved item ends up at `target_idx`.
pub fn relocation_offset(source_idx: usize, target_idx: usize) -> usize {
    if target_idx > source_idx {
        target_idx + 1
    } else {
        target_idx
    }
}

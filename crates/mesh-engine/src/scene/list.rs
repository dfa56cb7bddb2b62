use super::DrawCmd;

/// Z layer. Higher values paint on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

/// Paint-order key: `z` ascending, then insertion order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded overlay for one frame.
///
/// The paint-order index buffer is reused across frames.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key: SortKey { z, order }, cmd });
        self.sorted_dirty = true;
    }

    /// Items back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted_indices.clear();
            self.sorted_indices.extend(0..self.items.len());
            let items = &self.items;
            self.sorted_indices.sort_by_key(|&i| items[i].key);
            self.sorted_dirty = false;
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn rect(tag: f32) -> DrawCmd {
        DrawCmd::Rect { rect: Rect::new(tag, 0.0, 1.0, 1.0), color: Color::WHITE }
    }

    fn tag(item: &DrawItem) -> f32 {
        match item.cmd {
            DrawCmd::Rect { rect, .. } => rect.origin.x,
            _ => unreachable!(),
        }
    }

    #[test]
    fn paint_order_is_z_then_insertion() {
        let mut list = DrawList::new();
        list.push(ZIndex(2), rect(0.0));
        list.push(ZIndex(1), rect(1.0));
        list.push(ZIndex(2), rect(2.0));
        list.push(ZIndex(0), rect(3.0));

        let order: Vec<f32> = list.iter_in_paint_order().map(tag).collect();
        assert_eq!(order, [3.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn clear_resets_order() {
        let mut list = DrawList::new();
        list.push(ZIndex(0), rect(0.0));
        list.clear();
        assert!(list.is_empty());
        list.push(ZIndex(0), rect(5.0));
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(list.iter_in_paint_order().count(), 1);
    }
}

//! Session-local product selections: the compare tray and the wishlist.
//!
//! Both live in the visitor's session, not the store. The compare tray is
//! capped because the comparison table only renders three columns; the
//! wishlist is unbounded.

use arc_audio_core::ProductId;

/// Maximum products in the compare tray.
pub const COMPARE_CAP: usize = 3;

/// What a compare toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareChange {
    Added,
    Removed,
    /// The tray was already at capacity; nothing changed.
    Full,
}

/// Toggle `id` in the compare tray, refusing to grow past [`COMPARE_CAP`].
pub fn toggle_compare(tray: &mut Vec<ProductId>, id: ProductId) -> CompareChange {
    if let Some(pos) = tray.iter().position(|p| *p == id) {
        tray.remove(pos);
        return CompareChange::Removed;
    }
    if tray.len() >= COMPARE_CAP {
        return CompareChange::Full;
    }
    tray.push(id);
    CompareChange::Added
}

/// Toggle `id` in the wishlist; returns `true` when it was added.
pub fn toggle_wishlist(wishlist: &mut Vec<ProductId>, id: ProductId) -> bool {
    if let Some(pos) = wishlist.iter().position(|p| *p == id) {
        wishlist.remove(pos);
        return false;
    }
    wishlist.push(id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_toggle_add_remove() {
        let mut tray = Vec::new();
        let id = ProductId::generate();
        assert_eq!(toggle_compare(&mut tray, id), CompareChange::Added);
        assert_eq!(tray.len(), 1);
        assert_eq!(toggle_compare(&mut tray, id), CompareChange::Removed);
        assert!(tray.is_empty());
    }

    #[test]
    fn test_compare_refuses_fourth_product() {
        let mut tray: Vec<ProductId> = (0..3).map(|_| ProductId::generate()).collect();
        let before = tray.clone();
        let fourth = ProductId::generate();
        assert_eq!(toggle_compare(&mut tray, fourth), CompareChange::Full);
        assert_eq!(tray, before);

        // Removing a member always works, even at capacity.
        assert_eq!(toggle_compare(&mut tray, before[0]), CompareChange::Removed);
        assert_eq!(toggle_compare(&mut tray, fourth), CompareChange::Added);
    }

    #[test]
    fn test_wishlist_is_unbounded() {
        let mut wishlist = Vec::new();
        for _ in 0..10 {
            assert!(toggle_wishlist(&mut wishlist, ProductId::generate()));
        }
        assert_eq!(wishlist.len(), 10);

        let id = wishlist[3];
        assert!(!toggle_wishlist(&mut wishlist, id));
        assert_eq!(wishlist.len(), 9);
    }
}

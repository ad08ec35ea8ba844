use crate::importer::AlbumMembers;
use std::collections::HashSet;

/// Attributes each fetched media id to exactly one album. When albums in a
/// submission overlap, the first album in submission order claims the item;
/// later albums only keep the ids not seen before. Input is
/// `(album_id, title, fetched item ids)` per album, in submission order.
#[must_use]
pub fn attribute_members(fetched: &[(String, String, Vec<String>)]) -> Vec<AlbumMembers> {
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut mapping = Vec::with_capacity(fetched.len());

    for (album_id, title, items) in fetched {
        let mut own_items = Vec::new();
        for item in items {
            if claimed.insert(item) {
                own_items.push(item.clone());
            }
        }
        mapping.push(AlbumMembers {
            album_id: album_id.clone(),
            title: title.clone(),
            items: own_items,
        });
    }

    mapping
}

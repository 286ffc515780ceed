/// Largest page the playlist items endpoint serves.
pub const PAGE_LIMIT: u32 = 100;

/// URL of the first page of a playlist's items.
///
/// Later pages are addressed by the `next` URL the API returns, so only the
/// first request is composed here.
pub fn first_page_url(api_url: &str, playlist_id: &str) -> String {
    format!(
        "{uri}/playlists/{id}/tracks?limit={limit}",
        uri = api_url,
        id = playlist_id,
        limit = PAGE_LIMIT
    )
}

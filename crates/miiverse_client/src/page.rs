use engine_logging::engine_debug;
use scraper::Html;

use crate::dom::{child_elements, find_by_id, find_first_by_class, has_class};
use crate::error::ExtractError;
use crate::post::extract_post;
use crate::types::Post;

const DETAIL_POST_ID: &str = "post-content";
const FEED_ROOT_ID: &str = "main-body";
const FEED_LIST: &str = "post-list";

/// Post shown on a post detail page.
pub fn extract_single_post(page: &Html) -> Result<Post, ExtractError> {
    let fragment = find_by_id(page, DETAIL_POST_ID)?;
    Ok(extract_post(fragment)?)
}

/// Posts of an activity feed page in document order. Placeholder entries
/// (class `none`) are skipped; the first malformed entry fails the call.
pub fn extract_feed(page: &Html) -> Result<Vec<Post>, ExtractError> {
    let list = find_first_by_class(find_by_id(page, FEED_ROOT_ID)?, FEED_LIST)?;
    let posts = child_elements(list)
        .filter(|entry| has_class(*entry, "post") && !has_class(*entry, "none"))
        .map(extract_post)
        .collect::<Result<Vec<_>, _>>()?;
    engine_debug!("extracted {} posts from feed", posts.len());
    Ok(posts)
}

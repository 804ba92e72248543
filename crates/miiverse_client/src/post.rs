//! Assembly of a `Post` from one post fragment.
//!
//! The fragment is either the `#post-content` element of a detail page or
//! one entry of an activity feed. Steps run in a fixed order; a failing
//! required step aborts with `MalformedPost` naming that step, while the
//! optional tag and screenshot resolve to their empty forms.

use engine_logging::{engine_debug, engine_warn};
use scraper::ElementRef;
use url::Url;

use crate::classify::{classify_feeling, classify_tag_kind, normalized_icon_uri, parse_tag_href};
use crate::dom::{
    attr, find_all_by_class, find_first_by_class, first_element_child, has_class, inner_text,
    match_class_among_children, read_image_source_uri, read_uint_text,
};
use crate::error::{AtStep, ExtractStep, MalformedPost, NodeError};
use crate::types::{Feeling, Post, PostBody, PostCommunity, PostTag, PostUser, TagKind};

const POST_ID_PREFIX: &str = "post-";
const USER_PATH_PREFIX: &str = "/users/";

const BODY: &str = "body";
const POST_CONTENT: &str = "post-content";
const POST_META: &str = "post-meta";
const TEXT_CONTENT: &str = "post-content-text";
const MEMO_CONTENT: &str = "post-content-memo";
const SPOILER: &str = "hidden";

/// Where the content of a fragment lives; feed entries nest it one level
/// deeper than detail pages.
#[derive(Clone, Copy)]
enum ContentLayout<'a> {
    Feed(ElementRef<'a>),
    Detail(ElementRef<'a>),
}

impl<'a> ContentLayout<'a> {
    fn detect(fragment: ElementRef<'a>) -> Result<Self, NodeError> {
        let body = find_first_by_class(fragment, BODY)?;
        Ok(match find_all_by_class(body, POST_CONTENT).next() {
            Some(nested) => ContentLayout::Feed(nested),
            None => ContentLayout::Detail(body),
        })
    }

    fn label(self) -> &'static str {
        match self {
            ContentLayout::Feed(_) => "feed",
            ContentLayout::Detail(_) => "detail",
        }
    }

    fn container(self) -> ElementRef<'a> {
        match self {
            ContentLayout::Feed(node) | ContentLayout::Detail(node) => node,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Meta {
    reply_count: u32,
    empathy_count: u32,
    is_played: bool,
}

pub fn extract_post(fragment: ElementRef<'_>) -> Result<Post, MalformedPost> {
    let id = read_post_id(fragment).at(ExtractStep::Identity)?;

    let layout = ContentLayout::detect(fragment).at(ExtractStep::Content)?;
    engine_debug!("post {id}: {} layout", layout.label());
    let content = layout.container();

    let meta = read_meta(content).at(ExtractStep::Meta)?;
    let is_spoiler = has_class(fragment, SPOILER);

    let body = read_body(content).at(ExtractStep::Variant)?;
    let tag = read_tag(content);
    let screenshot_uri = read_screenshot(content, &id);

    let (author, feeling) = read_author(fragment).at(ExtractStep::Author)?;
    let community = read_community(fragment).at(ExtractStep::Community)?;

    Ok(Post {
        id,
        tag,
        body,
        reply_count: meta.reply_count,
        empathy_count: meta.empathy_count,
        is_played: meta.is_played,
        is_spoiler,
        screenshot_uri,
        author,
        feeling,
        community,
    })
}

fn read_post_id(fragment: ElementRef<'_>) -> Result<String, NodeError> {
    fragment
        .value()
        .id()
        .and_then(|id| id.strip_prefix(POST_ID_PREFIX))
        .map(str::to_string)
        .ok_or_else(|| NodeError::NotFound(format!("id with prefix `{POST_ID_PREFIX}`")))
}

fn read_meta(content: ElementRef<'_>) -> Result<Meta, NodeError> {
    let meta = find_first_by_class(content, POST_META)?;
    let reply = find_first_by_class(meta, "reply")?;
    let empathy = find_first_by_class(meta, "empathy")?;
    Ok(Meta {
        reply_count: read_uint_text(find_first_by_class(reply, "reply-count")?)?,
        empathy_count: read_uint_text(find_first_by_class(empathy, "empathy-count")?)?,
        is_played: find_all_by_class(meta, "played").next().is_some(),
    })
}

fn read_body(content: ElementRef<'_>) -> Result<PostBody, NodeError> {
    let texts: Vec<ElementRef<'_>> = find_all_by_class(content, TEXT_CONTENT).collect();
    match texts.as_slice() {
        [] => {
            let memo = find_first_by_class(content, MEMO_CONTENT)?;
            Ok(PostBody::Image(read_image_source_uri(memo)?))
        }
        [text] => Ok(PostBody::Text(inner_text(*text))),
        many => Err(NodeError::Ambiguous {
            what: format!(".{TEXT_CONTENT}"),
            count: many.len(),
        }),
    }
}

fn read_tag(content: ElementRef<'_>) -> PostTag {
    let Some(anchor) = match_class_among_children(content, "post-tag") else {
        return PostTag::none();
    };
    let href = anchor.value().attr("href").unwrap_or_default();
    let Some((key, value)) = parse_tag_href(href) else {
        return PostTag::none();
    };
    match classify_tag_kind(key) {
        TagKind::None => {
            engine_debug!("ignoring tag with unrecognized key `{key}`");
            PostTag::none()
        }
        kind => PostTag::new(kind, value, inner_text(anchor)),
    }
}

fn read_screenshot(content: ElementRef<'_>, id: &str) -> Option<Url> {
    let container = match_class_among_children(content, "screenshot-container")?;
    match read_image_source_uri(container) {
        Ok(uri) => Some(uri),
        Err(err) => {
            engine_warn!("post {id}: ignoring screenshot container: {err}");
            None
        }
    }
}

fn read_author(fragment: ElementRef<'_>) -> Result<(PostUser, Feeling), NodeError> {
    let anchor = first_element_child(find_first_by_class(fragment, "user-name")?)?;
    let href = attr(anchor, "href")?;
    let account_name = href
        .get(USER_PATH_PREFIX.len()..)
        .ok_or_else(|| NodeError::NotFound(format!("account name in `{href}`")))?;

    let shown_icon = read_image_source_uri(find_first_by_class(fragment, "icon-container")?)?;
    let feeling = classify_feeling(&shown_icon);

    let user = PostUser {
        account_name: account_name.to_string(),
        display_name: inner_text(anchor),
        icon_uri: normalized_icon_uri(&shown_icon, feeling),
    };
    Ok((user, feeling))
}

fn read_community(fragment: ElementRef<'_>) -> Result<PostCommunity, NodeError> {
    let anchor = first_element_child(find_first_by_class(fragment, "community-container")?)?;
    let href = attr(anchor, "href")?;
    let (title_id, community_id) = parse_community_path(href)?;
    Ok(PostCommunity {
        title_id,
        community_id,
        name: inner_text(anchor),
        icon_uri: read_image_source_uri(anchor)?,
    })
}

/// `/titles/<title id>/<community id>`: the second and third path segments.
fn parse_community_path(href: &str) -> Result<(u64, u64), NodeError> {
    let path = href.strip_prefix('/').unwrap_or(href);
    let segments: Vec<&str> = path.split('/').collect();
    let [_, title, community, ..] = segments.as_slice() else {
        return Err(NodeError::NotFound(format!("community ids in `{href}`")));
    };
    let parse = |segment: &str| {
        segment
            .parse::<u64>()
            .map_err(|_| NodeError::Parse(segment.to_string()))
    };
    Ok((parse(*title)?, parse(*community)?))
}

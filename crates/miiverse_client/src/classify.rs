//! Decoders for signals the service encodes in incidental attributes.
//!
//! Every classifier is total: an unknown input maps to the type's default.
//! The tables are the only place that needs touching when the service adds
//! a new icon or tag variant.

use url::Url;

use crate::types::{Feeling, Platform, TagKind};

const FACE_SUFFIX: &str = "_face";
const PLATFORM_PREFIX: &str = "platform-tag-";

const FEELINGS: &[(&str, Feeling)] = &[
    ("normal", Feeling::Normal),
    ("happy", Feeling::Happy),
    ("like", Feeling::Like),
    ("surprised", Feeling::Surprised),
    ("frustrated", Feeling::Frustrated),
    ("puzzled", Feeling::Puzzled),
];

const PLATFORMS: &[(&str, Platform)] = &[
    ("wiiu-3ds", Platform::WiiUAnd3ds),
    ("wiiu", Platform::WiiU),
    ("3ds", Platform::Nintendo3ds),
];

const TAG_KINDS: &[(&str, TagKind)] = &[
    ("official_tag_id", TagKind::Official),
    ("topic_tag_id", TagKind::Topic),
];

/// Mood shown by an icon named `<hash>_<mood>_face.<ext>`.
pub fn classify_feeling(icon: &Url) -> Feeling {
    mood_span(icon.path())
        .and_then(|(start, end)| {
            let mood = &icon.path()[start..end];
            FEELINGS
                .iter()
                .find(|(fragment, _)| *fragment == mood)
                .map(|(_, feeling)| *feeling)
        })
        .unwrap_or_default()
}

/// Same icon with the mood fragment swapped for `normal`. Icons that do not
/// carry `feeling` in their name are returned unchanged.
pub fn normalized_icon_uri(icon: &Url, feeling: Feeling) -> Url {
    let path = icon.path();
    let Some((start, end)) = mood_span(path) else {
        return icon.clone();
    };
    if &path[start..end] != feeling_fragment(feeling) {
        return icon.clone();
    }
    let rewritten = format!(
        "{}{}{}",
        &path[..start],
        feeling_fragment(Feeling::Normal),
        &path[end..]
    );
    let mut normalized = icon.clone();
    normalized.set_path(&rewritten);
    normalized
}

/// Platform from an image name such as `platform-tag-wiiu.png`. A bare
/// fragment (`3ds`) or a full image URL are accepted as well.
pub fn classify_platform(name: &str) -> Platform {
    let file = name.rsplit('/').next().unwrap_or(name);
    let file = file.split(['?', '#']).next().unwrap_or(file);
    let stem = file.split_once('.').map_or(file, |(stem, _)| stem);
    let fragment = stem.strip_prefix(PLATFORM_PREFIX).unwrap_or(stem);
    PLATFORMS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(fragment))
        .map(|(_, platform)| *platform)
        .unwrap_or_default()
}

pub fn classify_tag_kind(key: &str) -> TagKind {
    TAG_KINDS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, kind)| *kind)
        .unwrap_or(TagKind::None)
}

/// Splits a tag href into the text between the first `?` and the first `=`
/// and the text after that `=`.
pub fn parse_tag_href(href: &str) -> Option<(&str, &str)> {
    let question = href.find('?')?;
    let equals = href.find('=')?;
    if equals < question {
        return None;
    }
    Some((&href[question + 1..equals], &href[equals + 1..]))
}

fn feeling_fragment(feeling: Feeling) -> &'static str {
    FEELINGS
        .iter()
        .find(|(_, known)| *known == feeling)
        .map_or("normal", |(fragment, _)| *fragment)
}

/// Byte range of the mood fragment inside `path`.
fn mood_span(path: &str) -> Option<(usize, usize)> {
    let file_start = path.rfind('/').map_or(0, |idx| idx + 1);
    let file = &path[file_start..];
    let stem = file.split_once('.').map_or(file, |(stem, _)| stem);
    let without_face = stem.strip_suffix(FACE_SUFFIX)?;
    let mood_start = without_face.rfind('_').map_or(0, |idx| idx + 1);
    if mood_start == without_face.len() {
        return None;
    }
    Some((file_start + mood_start, file_start + without_face.len()))
}

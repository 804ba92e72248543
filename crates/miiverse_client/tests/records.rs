mod common;

use common::{init_logging, PostFixture};
use miiverse_client::{extract_post, find_first_by_class, Game, Platform, PostTag, TagKind};
use pretty_assertions::assert_eq;
use scraper::Html;
use serde_json::json;
use url::Url;

#[test]
fn game_classifies_platform_badge() {
    let icon = Url::parse("https://cdn.example.net/titles/icon.png").unwrap();
    let game = Game::new(
        "14866558073037299863",
        "Splatoon",
        "/titles/14866558073037299863",
        icon.clone(),
        "https://cdn.example.net/img/platform-tag-wiiu.png",
        "game",
    );
    assert_eq!(game.platform, Platform::WiiU);

    let unknown = Game::new("1", "Odd", "/titles/1", icon, "platform-tag-vb.png", "app");
    assert_eq!(unknown.platform, Platform::Unknown);
}

#[test]
fn game_serializes_with_service_field_names() {
    let icon = Url::parse("https://cdn.example.net/icon.png").unwrap();
    let game = Game::new("7", "Mario Kart 8", "/titles/7", icon, "platform-tag-3ds", "game");
    assert_eq!(
        serde_json::to_value(&game).unwrap(),
        json!({
            "id": "7",
            "title": "Mario Kart 8",
            "title_url": "/titles/7",
            "icon_uri": "https://cdn.example.net/icon.png",
            "platform": "nintendo3ds",
            "type": "game",
        })
    );
}

#[test]
fn tag_of_kind_none_drops_id_and_label() {
    assert_eq!(PostTag::new(TagKind::None, "99", "label"), PostTag::none());
    let official = PostTag::new(TagKind::Official, "99", "label");
    assert!(!official.is_none());
    assert_eq!(official.tag_id(), "99");
}

#[test]
fn tag_with_neither_id_nor_label_is_no_tag() {
    assert_eq!(PostTag::new(TagKind::Official, "", ""), PostTag::none());
    assert_eq!(PostTag::new(TagKind::Topic, "", "label").kind(), TagKind::Topic);
}

#[test]
fn deserialized_tags_keep_the_none_invariant() {
    let stray: PostTag =
        serde_json::from_str(r#"{"kind":"none","tag_id":"9","label":"x"}"#).unwrap();
    assert_eq!(stray, PostTag::none());

    let empty: PostTag =
        serde_json::from_str(r#"{"kind":"official","tag_id":"","label":""}"#).unwrap();
    assert!(empty.is_none());

    let topic: PostTag =
        serde_json::from_str(r#"{"kind":"topic","tag_id":"abc","label":"Art"}"#).unwrap();
    assert_eq!(topic, PostTag::new(TagKind::Topic, "abc", "Art"));
}

#[test]
fn serialized_post_carries_exactly_one_content_key() {
    init_logging();
    for fixture in [
        PostFixture::text("t", "words"),
        PostFixture::image("i", "https://cdn.example.net/memo.png"),
    ] {
        let doc = Html::parse_document(&fixture.html());
        let post = extract_post(find_first_by_class(doc.root_element(), "post").unwrap()).unwrap();
        let value = serde_json::to_value(&post).unwrap();
        let has_text = value.get("text").is_some();
        let has_image = value.get("image_uri").is_some();
        assert!(has_text ^ has_image, "{value}");
        assert_eq!(has_image, post.is_image_post());
        assert_eq!(value["feeling"], json!("normal"));
        assert_eq!(value["tag"]["kind"], json!("none"));

        let back: miiverse_client::Post = serde_json::from_value(value).unwrap();
        assert_eq!(back, post);
    }
}

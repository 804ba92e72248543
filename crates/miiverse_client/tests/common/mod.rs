#![allow(dead_code)]

use std::sync::Once;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub const ICON_HOST: &str = "https://mii-secure.cdn.example.net";

/// Markup of one post, shaped like the service's feed entries and detail
/// pages.
#[derive(Debug, Clone)]
pub struct PostFixture {
    pub element_id: Option<String>,
    pub extra_classes: String,
    pub nested_content: bool,
    pub texts: Vec<String>,
    pub memo_src: Option<String>,
    pub tag_href: Option<String>,
    pub tag_label: String,
    pub screenshot_src: Option<String>,
    pub reply_count: String,
    pub empathy_count: String,
    pub played: bool,
    pub user_href: String,
    pub display_name: String,
    pub icon_name: String,
    pub community_href: String,
    pub community_name: String,
}

impl PostFixture {
    pub fn text(id: &str, text: &str) -> Self {
        Self {
            element_id: Some(format!("post-{id}")),
            extra_classes: String::new(),
            nested_content: true,
            texts: vec![text.to_string()],
            memo_src: None,
            tag_href: None,
            tag_label: String::new(),
            screenshot_src: None,
            reply_count: "0".into(),
            empathy_count: "0".into(),
            played: false,
            user_href: "/users/alice".into(),
            display_name: "Alice".into(),
            icon_name: "a1b2_normal_face.png".into(),
            community_href: "/titles/1234/5678".into(),
            community_name: "Splatoon Community".into(),
        }
    }

    pub fn image(id: &str, memo_src: &str) -> Self {
        Self {
            texts: Vec::new(),
            memo_src: Some(memo_src.to_string()),
            ..Self::text(id, "")
        }
    }

    /// Laid out like the `#post-content` element of a detail page.
    pub fn detail(mut self) -> Self {
        self.element_id = Some("post-content".into());
        self.nested_content = false;
        self
    }

    pub fn html(&self) -> String {
        let id_attr = self
            .element_id
            .as_deref()
            .map(|id| format!(r#" id="{id}""#))
            .unwrap_or_default();

        let mut content = String::new();
        if let Some(href) = &self.tag_href {
            content.push_str(&format!(
                r#"<a class="post-tag" href="{href}">{}</a>"#,
                self.tag_label
            ));
        }
        if let Some(src) = &self.screenshot_src {
            content.push_str(&format!(
                r#"<div class="screenshot-container"><img src="{src}"></div>"#
            ));
        }
        for text in &self.texts {
            content.push_str(&format!(r#"<div class="post-content-text">{text}</div>"#));
        }
        if let Some(src) = &self.memo_src {
            content.push_str(&format!(
                r#"<div class="post-content-memo"><img class="post-memo" src="{src}"></div>"#
            ));
        }
        content.push_str(&format!(
            r#"<div class="post-meta"><button class="empathy"><span class="empathy-count">{}</span></button><div class="reply"><span class="reply-count">{}</span></div>{}</div>"#,
            self.empathy_count,
            self.reply_count,
            if self.played {
                r#"<div class="played">Played</div>"#
            } else {
                ""
            }
        ));

        let body = if self.nested_content {
            format!(r#"<div class="body"><div class="post-content">{content}</div></div>"#)
        } else {
            format!(r#"<div class="body">{content}</div>"#)
        };

        format!(
            r#"<div{id_attr} class="post {classes}"><a class="icon-container" href="{user_href}"><img class="icon" src="{ICON_HOST}/{icon}"></a><div class="user-name"><a href="{user_href}">{name}</a></div><div class="community-container"><a href="{community_href}"><img class="community-icon" src="https://cdn.example.net/c.png">{community}</a></div>{body}</div>"#,
            classes = self.extra_classes,
            user_href = self.user_href,
            icon = self.icon_name,
            name = self.display_name,
            community_href = self.community_href,
            community = self.community_name,
        )
    }
}

pub fn detail_page(post: &PostFixture) -> String {
    format!(
        r#"<html><body><div id="main-body"><div id="post-permalink">{}</div></div></body></html>"#,
        post.html()
    )
}

/// Feed page; entries are inserted verbatim so placeholders can be mixed in.
pub fn feed_page(entries: &[String]) -> String {
    format!(
        r#"<html><body><div id="main-body"><div class="post-list">{}</div></div></body></html>"#,
        entries.concat()
    )
}

pub const PLACEHOLDER: &str = r#"<div class="post none"><p>No posts yet.</p></div>"#;

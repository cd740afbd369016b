pub const TEXT_TO_VIDEO: &str = "text2video";
pub const IMAGE_TO_IMAGE: &str = "image2image";
pub const STYLE: &str = "style";
pub const PORTRAIT: &str = "portrait";
pub const ILLUSTRATION: &str = "illustration";
pub const TEXT_TO_IMAGE: &str = "text2image";

/// Keyword groups in priority order. The first group with any keyword present
/// decides the category.
const RULES: &[(&str, &[&str])] = &[
    (TEXT_TO_VIDEO, &["视频", "video", "动画"]),
    (IMAGE_TO_IMAGE, &["编辑", "edit", "修改"]),
    (STYLE, &["风格", "style"]),
    (PORTRAIT, &["人物", "portrait", "写真"]),
    (ILLUSTRATION, &["插画", "illustration", "场景"]),
];

/// Guess a category from tags plus free text.
pub fn classify<S: AsRef<str>>(tags: &[S], text: &str) -> &'static str {
    let haystack = tags
        .iter()
        .map(|tag| tag.as_ref())
        .chain(std::iter::once(text))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| haystack.contains(kw)))
        .map(|(label, _)| *label)
        .unwrap_or(TEXT_TO_IMAGE)
}

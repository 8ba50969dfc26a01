use std::collections::BTreeMap;

use crate::models::{ArchiveStats, Post};

/// 空结果占位 - 结果区域的固定标记
pub const NO_RESULTS_HTML: &str =
    r#"<div class="no-results">No posts found matching your criteria.</div>"#;

/// 作者缺失时的展示文本
const UNKNOWN_AUTHOR: &str = "Unknown";

/// 按年份分组，组键按字符串降序排列
///
/// 字符串排序对固定 4 位年份与数字排序一致；"Unknown" 纯按字典序参与排序，
/// 不做特殊安放。组内保持筛选结果的原有顺序。
pub fn group_by_year<'a>(posts: &[&'a Post]) -> Vec<(String, Vec<&'a Post>)> {
    let mut by_year: BTreeMap<String, Vec<&Post>> = BTreeMap::new();
    for &post in posts {
        by_year
            .entry(post.year_key().to_string())
            .or_default()
            .push(post);
    }
    by_year.into_iter().rev().collect()
}

/// 渲染结果区域标记 - 空输入渲染占位，否则按年份分组输出卡片
pub fn render_posts_html(posts: &[&Post]) -> String {
    if posts.is_empty() {
        return NO_RESULTS_HTML.to_string();
    }

    let mut html = String::new();
    for (year, group) in group_by_year(posts) {
        html.push_str("<div class=\"year-group\">");
        html.push_str("<h2 class=\"year-header\">");
        html.push_str(&escape_html(&year));
        html.push_str("</h2>");
        html.push_str("<div class=\"posts-grid\">");
        for post in group {
            render_post_card(&mut html, post);
        }
        html.push_str("</div></div>");
    }
    html
}

/// 渲染单张文章卡片
fn render_post_card(html: &mut String, post: &Post) {
    html.push_str("<div class=\"post-card");
    let class = author_class(post.author.as_deref());
    if !class.is_empty() {
        html.push(' ');
        html.push_str(class);
    }
    html.push_str("\">");

    html.push_str("<h2><a href=\"posts/");
    html.push_str(&escape_html(&post.filename));
    html.push_str(".html\">");
    html.push_str(&escape_html(&post.title));
    html.push_str("</a></h2>");

    html.push_str("<div class=\"meta\"><span>");
    html.push_str(&escape_html(post.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)));
    html.push_str("</span><span>");
    html.push_str(&escape_html(&post.date));
    html.push_str("</span></div></div>");
}

/// 作者分类样式 - becker 优先于 posner，其余为空
///
/// 每次渲染独立推导，与当前生效的分类筛选无关
pub fn author_class(author: Option<&str>) -> &'static str {
    match author {
        Some(author) => {
            let lower = author.to_lowercase();
            if lower.contains("becker") {
                "becker"
            } else if lower.contains("posner") {
                "posner"
            } else {
                ""
            }
        }
        None => "",
    }
}

/// 计算全库统计 - 基于完整数据集，与筛选结果无关
pub fn compute_stats(posts: &[Post]) -> ArchiveStats {
    ArchiveStats {
        total: posts.len(),
        becker: posts.iter().filter(|p| p.author_contains("becker")).count(),
        posner: posts.iter().filter(|p| p.author_contains("posner")).count(),
    }
}

/// HTML 转义 - 防止文本中的特殊字符破坏标记结构
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

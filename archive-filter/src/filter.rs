use crate::models::{Post, AUTHOR_FILTER_ALL};

/// 筛选文章 - 两个独立谓词顺序应用，保持数据集中的相对顺序
pub fn filter_posts<'a>(posts: &'a [Post], author_filter: &str, search_term: &str) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| matches_author(post, author_filter))
        .filter(|post| matches_search(post, search_term))
        .collect()
}

/// 分类谓词 - "all" 放行全部，否则要求作者包含筛选词
fn matches_author(post: &Post, author_filter: &str) -> bool {
    if author_filter == AUTHOR_FILTER_ALL {
        return true;
    }
    post.author_contains(author_filter)
}

/// 搜索谓词 - 空搜索词放行全部，否则要求预置搜索文本包含搜索词
///
/// 匹配为子串包含，不分词、不模糊，search_term 需已转为小写
fn matches_search(post: &Post, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    post.search_text
        .as_ref()
        .map_or(false, |haystack| haystack.contains(search_term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, author: Option<&str>, search_text: Option<&str>) -> Post {
        Post {
            title: title.to_string(),
            author: author.map(str::to_string),
            date: "2005-01-01".to_string(),
            year: Some("2005".to_string()),
            filename: title.to_lowercase(),
            search_text: search_text.map(str::to_string),
        }
    }

    fn corpus() -> Vec<Post> {
        vec![
            post("A", Some("Gary Becker"), Some("a gary becker economics")),
            post("B", Some("Richard Posner"), Some("b richard posner law")),
            post("C", None, Some("c anonymous economics")),
            post("D", Some("Gary Becker"), None),
        ]
    }

    #[test]
    fn default_query_is_identity() {
        let posts = corpus();
        let filtered = filter_posts(&posts, AUTHOR_FILTER_ALL, "");
        let titles: Vec<&str> = filtered.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn result_is_order_preserving_subsequence() {
        let posts = corpus();
        let filtered = filter_posts(&posts, "becker", "");
        let titles: Vec<&str> = filtered.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "D"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let posts = corpus();
        let once: Vec<Post> = filter_posts(&posts, "becker", "economics")
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_posts(&once, "becker", "economics");
        let titles: Vec<&str> = twice.iter().map(|p| p.title.as_str()).collect();
        let expected: Vec<&str> = once.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn absent_author_fails_every_category_filter() {
        let posts = corpus();
        assert!(filter_posts(&posts, "becker", "")
            .iter()
            .all(|p| p.author.is_some()));
        assert!(filter_posts(&posts, "posner", "")
            .iter()
            .all(|p| p.author.is_some()));
    }

    #[test]
    fn absent_search_text_never_matches_nonempty_term() {
        let posts = corpus();
        let filtered = filter_posts(&posts, AUTHOR_FILTER_ALL, "becker");
        let titles: Vec<&str> = filtered.iter().map(|p| p.title.as_str()).collect();
        // D 的 searchText 缺失，即便作者是 Becker 也不匹配
        assert_eq!(titles, vec!["A"]);
    }

    #[test]
    fn author_match_is_case_insensitive_substring() {
        let posts = corpus();
        let filtered = filter_posts(&posts, "posner", "");
        let titles: Vec<&str> = filtered.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["B"]);
    }

    #[test]
    fn both_predicates_must_pass() {
        let posts = corpus();
        // "economics" 命中 A 和 C，分类 becker 只留下 A
        let filtered = filter_posts(&posts, "becker", "economics");
        let titles: Vec<&str> = filtered.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A"]);
    }

    #[test]
    fn unknown_category_matches_nothing() {
        let posts = corpus();
        assert!(filter_posts(&posts, "friedman", "").is_empty());
    }
}

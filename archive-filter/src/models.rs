use serde::{Deserialize, Deserializer, Serialize};

/// 分类筛选的默认值 - 不做任何作者过滤
pub const AUTHOR_FILTER_ALL: &str = "all";

/// 缺失年份的分组键
pub const UNKNOWN_YEAR: &str = "Unknown";

/// 归档文章记录 - 从 posts.json 加载，加载后不再修改
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Post {
    /// 文章标题
    pub title: String,
    /// 作者（可能缺失）
    #[serde(default)]
    pub author: Option<String>,
    /// 展示用日期字符串
    #[serde(default)]
    pub date: String,
    /// 发布年份 - 始终按字符串处理，源数据可能是数字
    #[serde(default, deserialize_with = "year_as_string")]
    pub year: Option<String>,
    /// 文章文件名，用于拼接 posts/<filename>.html 链接
    pub filename: String,
    /// 预先转为小写的搜索文本（可能缺失）
    #[serde(rename = "searchText", default)]
    pub search_text: Option<String>,
}

impl Post {
    /// 年份分组键，缺失时归入 "Unknown"
    pub fn year_key(&self) -> &str {
        self.year.as_deref().unwrap_or(UNKNOWN_YEAR)
    }

    /// 作者字段是否（忽略大小写）包含给定子串，token 需为小写
    pub fn author_contains(&self, token: &str) -> bool {
        self.author
            .as_ref()
            .map_or(false, |author| author.to_lowercase().contains(token))
    }
}

/// 年份字段反序列化 - 同时接受字符串和数字
fn year_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Text(String),
        Number(i64),
    }

    let raw = Option::<RawYear>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        RawYear::Text(text) => text,
        RawYear::Number(number) => number.to_string(),
    }))
}

/// 全库统计 - 与当前筛选条件无关，加载完成后计算一次
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchiveStats {
    /// 文章总数
    pub total: usize,
    /// 作者包含 becker 的文章数
    pub becker: usize,
    /// 作者包含 posner 的文章数
    pub posner: usize,
}

/// 查询状态 - 数据集与当前的两个查询参数
#[derive(Debug)]
pub struct QueryState {
    /// 已加载的全部文章，加载后视为只读
    pub posts: Vec<Post>,
    /// 当前作者分类，"all" 表示不过滤
    pub author_filter: String,
    /// 当前搜索词 - 始终为小写并去除首尾空白
    pub search_term: String,
    /// 全库统计
    pub stats: ArchiveStats,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            author_filter: AUTHOR_FILTER_ALL.to_string(),
            search_term: String::new(),
            stats: ArchiveStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_record() {
        let json = r#"{
            "title": "P1",
            "author": "Richard Posner",
            "date": "2005-01-01",
            "year": "2005",
            "filename": "p1",
            "searchText": "p1 richard posner"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.title, "P1");
        assert_eq!(post.author.as_deref(), Some("Richard Posner"));
        assert_eq!(post.year.as_deref(), Some("2005"));
        assert_eq!(post.search_text.as_deref(), Some("p1 richard posner"));
    }

    #[test]
    fn numeric_year_becomes_string_key() {
        let json = r#"{"title":"T","year":2005,"filename":"t","date":"d"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.year.as_deref(), Some("2005"));
        assert_eq!(post.year_key(), "2005");
    }

    #[test]
    fn absent_optional_fields_deserialize() {
        let json = r#"{"title":"T","filename":"t"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.author.is_none());
        assert!(post.year.is_none());
        assert!(post.search_text.is_none());
        assert_eq!(post.date, "");
        assert_eq!(post.year_key(), UNKNOWN_YEAR);
    }

    #[test]
    fn author_contains_is_case_insensitive() {
        let json = r#"{"title":"T","author":"Gary Becker","filename":"t"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.author_contains("becker"));
        assert!(!post.author_contains("posner"));
    }

    #[test]
    fn absent_author_never_contains() {
        let json = r#"{"title":"T","filename":"t"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(!post.author_contains("becker"));
    }

    #[test]
    fn query_state_defaults() {
        let state = QueryState::default();
        assert_eq!(state.author_filter, AUTHOR_FILTER_ALL);
        assert_eq!(state.search_term, "");
        assert!(state.posts.is_empty());
        assert_eq!(state.stats, ArchiveStats::default());
    }
}

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use crate::models::ArchiveStats;

/// 结果容器的元素 ID
pub const RESULTS_CONTAINER_ID: &str = "posts-container";
/// 搜索框的元素 ID
pub const SEARCH_INPUT_ID: &str = "search-input";
/// 分类按钮选择器
pub const FILTER_BUTTON_SELECTOR: &str = ".filter-btn";
/// 按钮上携带分类口令的属性
pub const AUTHOR_DATA_ATTR: &str = "data-author";
/// 激活按钮的样式类
const ACTIVE_CLASS: &str = "active";

/// 加载失败提示 - 本次会话为终态，仅能整页刷新恢复
const LOAD_ERROR_HTML: &str =
    r#"<div class="no-results">Error loading posts. Please refresh.</div>"#;

/// 当前文档
pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("document 不可用"))
}

/// 将渲染好的标记写入结果容器
pub fn write_results(html: &str) -> Result<(), JsValue> {
    let container = document()?
        .get_element_by_id(RESULTS_CONTAINER_ID)
        .ok_or_else(|| JsValue::from_str("结果容器不存在"))?;
    container.set_inner_html(html);
    Ok(())
}

/// 将全库统计写入三个固定的统计元素
///
/// 元素缺失时跳过对应字段，不报错
pub fn write_stats(stats: &ArchiveStats) -> Result<(), JsValue> {
    let document = document()?;
    let fields = [
        ("total-count", stats.total),
        ("becker-count", stats.becker),
        ("posner-count", stats.posner),
    ];
    for (id, count) in fields {
        if let Some(element) = document.get_element_by_id(id) {
            element.set_text_content(Some(&count.to_string()));
        }
    }
    Ok(())
}

/// 用终态错误提示替换结果区域，尽力而为
pub fn write_load_error() {
    if let Ok(document) = document() {
        if let Some(container) = document.get_element_by_id(RESULTS_CONTAINER_ID) {
            container.set_inner_html(LOAD_ERROR_HTML);
        }
    }
}

/// 更新按钮激活状态，保证只有当前分类高亮
pub fn mark_active_button(token: &str) -> Result<(), JsValue> {
    let buttons = document()?.query_selector_all(FILTER_BUTTON_SELECTOR)?;
    for index in 0..buttons.length() {
        let Some(node) = buttons.item(index) else {
            continue;
        };
        let Ok(element) = node.dyn_into::<Element>() else {
            continue;
        };
        let is_active = element.get_attribute(AUTHOR_DATA_ATTR).as_deref() == Some(token);
        element.class_list().toggle_with_force(ACTIVE_CLASS, is_active)?;
    }
    Ok(())
}

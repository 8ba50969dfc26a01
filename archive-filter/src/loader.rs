use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, Response};

use crate::dom;
use crate::models::Post;
use crate::ArchivePage;

/// 数据源的固定相对路径
pub const POSTS_DATA_URL: &str = "data/posts.json";

/// 拉取并解析文章数据集
///
/// 网络错误、非 2xx 状态和无法解析的负载都视为同一种加载失败
pub async fn fetch_posts() -> Result<Vec<Post>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window 不可用"))?;

    let response = JsFuture::from(window.fetch_with_str(POSTS_DATA_URL)).await?;
    let response: Response = response.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "请求文章数据失败: HTTP {}",
            response.status()
        )));
    }

    let payload = JsFuture::from(response.text()?).await?;
    let payload = payload
        .as_string()
        .ok_or_else(|| JsValue::from_str("响应不是文本"))?;

    serde_json::from_str(&payload)
        .map_err(|e| JsValue::from_str(&format!("解析文章数据失败: {}", e)))
}

/// 加载入口 - 每次会话只调用一次
///
/// 失败在此处终结：记录到控制台并把结果区域替换为静态错误提示，
/// 不重试，也不向调用方传播
pub async fn load_and_render() {
    match fetch_posts().await {
        Ok(posts) => {
            if let Err(e) = ArchivePage::install_posts(posts) {
                console::error_1(&JsValue::from_str(&format!("装载文章失败: {}", e)));
            }
        }
        Err(e) => {
            console::error_1(&e);
            dom::write_load_error();
        }
    }
}
